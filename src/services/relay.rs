//! Forwarding pipeline shared by every relay route.
//!
//! Each call issues exactly one upstream request and, depending on the route
//! and the configured [`ResponseMode`], projects the `results` array onto one of
//! the reduced shapes in [`crate::models::media`].

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::clients::tmdb::{Endpoint, TmdbClient, TmdbError};
use crate::config::{ResponseMode, TmdbConfig};
use crate::models::ItemShape;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Upstream(#[from] TmdbError),

    #[error("Unexpected TMDB payload: {0}")]
    Projection(String),
}

impl RelayError {
    /// True when TMDB answered with a non-success status.
    #[must_use]
    pub const fn is_upstream_status(&self) -> bool {
        matches!(self, Self::Upstream(TmdbError::Status { .. }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Passthrough,
    Media,
    People,
    Posters,
}

impl Projection {
    /// Reshapes an upstream payload. Pure: the same input always yields the
    /// same output.
    pub fn apply(self, payload: Value) -> Result<Value, RelayError> {
        match self {
            Self::Passthrough => Ok(payload),
            Self::Media => project(ItemShape::Media, &payload),
            Self::People => project(ItemShape::Person, &payload),
            Self::Posters => project(ItemShape::Poster, &payload),
        }
    }
}

fn project(shape: ItemShape, payload: &Value) -> Result<Value, RelayError> {
    shape
        .project_results(payload)
        .ok_or_else(|| RelayError::Projection("response has no `results` array".to_string()))
}

pub struct RelayService {
    tmdb: TmdbClient,
    mode: ResponseMode,
}

impl RelayService {
    pub fn new(config: &TmdbConfig) -> Result<Self, TmdbError> {
        Ok(Self {
            tmdb: TmdbClient::new(config)?,
            mode: config.response_mode,
        })
    }

    #[must_use]
    pub const fn mode(&self) -> ResponseMode {
        self.mode
    }

    /// Fetches `endpoint` and applies `projection`.
    pub async fn forward(
        &self,
        endpoint: &Endpoint,
        projection: Projection,
    ) -> Result<Value, RelayError> {
        let payload = self.tmdb.get_json(endpoint).await?;
        debug!(
            endpoint = endpoint.name(),
            projection = ?projection,
            "Projecting upstream payload"
        );
        projection.apply(payload)
    }

    /// Movie and series listings.
    pub async fn listing(&self, endpoint: &Endpoint) -> Result<Value, RelayError> {
        self.forward(endpoint, self.shaped(Projection::Media)).await
    }

    pub async fn popular_people(&self) -> Result<Value, RelayError> {
        self.forward(&Endpoint::PopularPeople, self.shaped(Projection::People))
            .await
    }

    /// `term` must already be trimmed and non-empty.
    pub async fn search(&self, term: &str) -> Result<Value, RelayError> {
        let endpoint = Endpoint::MultiSearch {
            query: term.to_string(),
        };
        self.forward(&endpoint, self.shaped(Projection::Media)).await
    }

    /// Genre discovery is always reduced to posters, whatever the mode.
    pub async fn discover_by_genre(&self, genre_id: u64) -> Result<Value, RelayError> {
        self.forward(&Endpoint::DiscoverByGenre { genre_id }, Projection::Posters)
            .await
    }

    const fn shaped(&self, projection: Projection) -> Projection {
        match self.mode {
            ResponseMode::Filtered => projection,
            ResponseMode::Passthrough => Projection::Passthrough,
        }
    }
}
