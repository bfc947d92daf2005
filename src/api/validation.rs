use super::ApiError;

pub const SEARCH_TERM_REQUIRED: &str = "O termo de pesquisa é obrigatório.";
pub const INVALID_GENRE: &str = "Gênero do filme inválido ou não informado";

/// Returns the trimmed search term.
pub fn validate_search_query(query: Option<&str>) -> Result<&str, ApiError> {
    match query.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed),
        _ => Err(ApiError::invalid_input(SEARCH_TERM_REQUIRED)),
    }
}

/// Genre ids are non-negative integers; surrounding whitespace and a leading
/// `+` are ignored. Decimals are rejected.
pub fn validate_genre_id(id: Option<&str>) -> Result<u64, ApiError> {
    id.map(str::trim)
        .filter(|id| !id.is_empty())
        .and_then(|id| id.parse().ok())
        .ok_or_else(|| ApiError::invalid_input(INVALID_GENRE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query(Some("batman")).unwrap(), "batman");
        assert_eq!(validate_search_query(Some("  trimmed  ")).unwrap(), "trimmed");
        assert!(validate_search_query(Some("")).is_err());
        assert!(validate_search_query(Some("   ")).is_err());
        assert!(validate_search_query(None).is_err());
    }

    #[test]
    fn test_validate_genre_id() {
        assert_eq!(validate_genre_id(Some("28")).unwrap(), 28);
        assert_eq!(validate_genre_id(Some(" 35 ")).unwrap(), 35);
        assert!(validate_genre_id(Some("abc")).is_err());
        assert!(validate_genre_id(Some("28a")).is_err());
        assert!(validate_genre_id(Some("-1")).is_err());
        assert!(validate_genre_id(Some("")).is_err());
        assert!(validate_genre_id(None).is_err());
    }

    #[test]
    fn test_genre_id_integer_forms_only() {
        assert_eq!(validate_genre_id(Some("+28")).unwrap(), 28);
        assert!(validate_genre_id(Some("28.5")).is_err());
        assert!(validate_genre_id(Some("28.0")).is_err());
        assert!(validate_genre_id(Some("1e2")).is_err());
    }

    #[test]
    fn test_error_message() {
        match validate_search_query(Some(" ")).unwrap_err() {
            ApiError::InvalidInput(msg) => assert_eq!(msg, SEARCH_TERM_REQUIRED),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
