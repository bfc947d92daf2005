//! Reduced shapes that upstream listing results are projected onto.
//!
//! Projection only selects keys. A selected key present on the upstream item is
//! copied with its value untouched (`null` included); a missing key stays
//! missing. Keys come out in the order listed for the shape.

use serde_json::{Map, Value};

const MEDIA_FIELDS: &[&str] = &[
    "id",
    "backdrop_path",
    "poster_path",
    "profile_path",
    "title",
    "name",
    "original_title",
    "original_name",
    "overview",
    "vote_average",
    "vote_count",
    "release_date",
    "first_air_date",
    "known_for",
    "popularity",
];

const KNOWN_FOR_FIELDS: &[&str] = &["id", "name", "title", "original_title", "vote_average"];

const PERSON_FIELDS: &[&str] = &["id", "profile_path", "name", "known_for", "popularity"];

const POSTER_FIELDS: &[&str] = &["id", "poster_path"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemShape {
    /// Movie, series or person entry from listing and search routes.
    Media,
    /// Credit listed under an entry's `known_for`.
    KnownFor,
    Person,
    Poster,
}

impl ItemShape {
    #[must_use]
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Media => MEDIA_FIELDS,
            Self::KnownFor => KNOWN_FOR_FIELDS,
            Self::Person => PERSON_FIELDS,
            Self::Poster => POSTER_FIELDS,
        }
    }

    /// Projects a single upstream item. Anything that is not an object
    /// projects to `{}`.
    #[must_use]
    pub fn project(self, item: &Value) -> Value {
        let Some(source) = item.as_object() else {
            return Value::Object(Map::new());
        };

        let mut projected = Map::new();
        for &key in self.fields() {
            let Some(value) = source.get(key) else {
                continue;
            };

            if key == "known_for" {
                match value {
                    Value::Array(credits) => {
                        let credits = credits.iter().map(|c| Self::KnownFor.project(c)).collect();
                        projected.insert(key.to_string(), Value::Array(credits));
                    }
                    // a null list is dropped rather than echoed
                    Value::Null => {}
                    other => {
                        projected.insert(key.to_string(), other.clone());
                    }
                }
                continue;
            }

            projected.insert(key.to_string(), value.clone());
        }

        Value::Object(projected)
    }

    /// Projects every element of the page's `results` array. `None` when the
    /// payload has no such array.
    #[must_use]
    pub fn project_results(self, payload: &Value) -> Option<Value> {
        let results = payload.get("results")?.as_array()?;
        Some(Value::Array(
            results.iter().map(|item| self.project(item)).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_media_item_drops_unknown_fields() {
        let raw = json!({
            "id": 550,
            "title": "Fight Club",
            "adult": false,
            "genre_ids": [18],
            "vote_average": 8.4,
            "video": false
        });

        assert_eq!(
            ItemShape::Media.project(&raw),
            json!({ "id": 550, "title": "Fight Club", "vote_average": 8.4 })
        );
    }

    #[test]
    fn test_null_fields_are_kept() {
        let raw = json!({ "id": 1, "backdrop_path": null, "poster_path": null });

        assert_eq!(
            ItemShape::Poster.project(&raw),
            json!({ "id": 1, "poster_path": null })
        );
        assert_eq!(
            ItemShape::Media.project(&raw),
            json!({ "id": 1, "backdrop_path": null, "poster_path": null })
        );
    }

    #[test]
    fn test_values_are_copied_without_coercion() {
        let raw = json!({
            "id": "278",
            "vote_average": 0,
            "vote_count": 12.0,
            "popularity": 7
        });

        let projected = ItemShape::Media.project(&raw);

        assert_eq!(
            serde_json::to_string(&projected).unwrap(),
            r#"{"id":"278","vote_average":0,"vote_count":12.0,"popularity":7}"#
        );
    }

    #[test]
    fn test_keys_follow_shape_order() {
        let raw = json!({ "popularity": 1.5, "name": "A", "profile_path": null, "id": 2 });

        assert_eq!(
            serde_json::to_string(&ItemShape::Person.project(&raw)).unwrap(),
            r#"{"id":2,"profile_path":null,"name":"A","popularity":1.5}"#
        );
    }

    #[test]
    fn test_known_for_is_reprojected() {
        let raw = json!({
            "id": 287,
            "name": "Brad Pitt",
            "gender": 2,
            "known_for": [
                { "id": 550, "title": "Fight Club", "media_type": "movie", "overview": "..." },
                { "id": 1399, "name": "Game of Thrones", "vote_average": null }
            ]
        });

        assert_eq!(
            ItemShape::Person.project(&raw)["known_for"],
            json!([
                { "id": 550, "title": "Fight Club" },
                { "id": 1399, "name": "Game of Thrones", "vote_average": null }
            ])
        );
    }

    #[test]
    fn test_null_known_for_is_dropped() {
        let raw = json!({ "id": 3, "known_for": null });
        assert_eq!(ItemShape::Media.project(&raw), json!({ "id": 3 }));
    }

    #[test]
    fn test_non_object_item_projects_to_empty_object() {
        assert_eq!(ItemShape::Poster.project(&json!(42)), json!({}));
    }

    #[test]
    fn test_results_array_required() {
        assert!(ItemShape::Media.project_results(&json!({ "page": 1 })).is_none());
        assert!(
            ItemShape::Media
                .project_results(&json!({ "results": "nope" }))
                .is_none()
        );
        assert_eq!(
            ItemShape::Poster.project_results(&json!({ "results": [] })),
            Some(json!([]))
        );
    }
}
