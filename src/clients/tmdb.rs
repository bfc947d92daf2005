use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::TmdbConfig;

#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("TMDB returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("TMDB request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("TMDB response could not be decoded: {0}")]
    Decode(String),

    #[error("Invalid TMDB credential: {0}")]
    Credential(String),
}

/// Upstream resources the relay knows how to reach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    TopRatedMovies,
    PopularMovies,
    TopRatedSeries,
    PopularSeries,
    PopularPeople,
    MultiSearch { query: String },
    DiscoverByGenre { genre_id: u64 },
}

impl Endpoint {
    /// Path and query relative to the API base URL.
    #[must_use]
    pub fn path_and_query(&self, language: &str) -> String {
        match self {
            Self::TopRatedMovies => format!("/movie/top_rated?language={language}&page=1"),
            Self::PopularMovies => format!("/movie/popular?language={language}&page=1"),
            Self::TopRatedSeries => format!("/tv/top_rated?language={language}&page=1"),
            Self::PopularSeries => format!("/tv/popular?language={language}&page=1"),
            Self::PopularPeople => format!("/person/popular?language={language}&page=1"),
            Self::MultiSearch { query } => format!(
                "/search/multi?query={}&include_adult=false&language={language}&page=1",
                urlencoding::encode(query)
            ),
            Self::DiscoverByGenre { genre_id } => {
                format!("/discover/movie?with_genres={genre_id}")
            }
        }
    }

    /// Stable label for logs and metrics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TopRatedMovies => "movie_top_rated",
            Self::PopularMovies => "movie_popular",
            Self::TopRatedSeries => "tv_top_rated",
            Self::PopularSeries => "tv_popular",
            Self::PopularPeople => "person_popular",
            Self::MultiSearch { .. } => "search_multi",
            Self::DiscoverByGenre { .. } => "discover_movie",
        }
    }
}

/// TMDB v3 client. Headers and credential are fixed at construction.
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    language: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> Result<Self, TmdbError> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| TmdbError::Credential(e.to_string()))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, authorization);

        let mut builder = Client::builder()
            .user_agent(concat!("cinerelay/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);

        if let Some(secs) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
        })
    }

    #[must_use]
    pub fn url(&self, endpoint: &Endpoint) -> String {
        format!(
            "{}{}",
            self.base_url,
            endpoint.path_and_query(&self.language)
        )
    }

    /// Fetches `endpoint` and parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`TmdbError::Status`] for any non-2xx response,
    /// [`TmdbError::Network`] when the request cannot be completed and
    /// [`TmdbError::Decode`] when the body is not JSON.
    pub async fn get_json(&self, endpoint: &Endpoint) -> Result<Value, TmdbError> {
        let url = self.url(endpoint);
        debug!(endpoint = endpoint.name(), "Fetching {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                record_upstream(endpoint, "network_error");
                return Err(e.into());
            }
        };

        let status = response.status();
        record_upstream(endpoint, status.as_str());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TmdbError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| TmdbError::Decode(e.to_string()))
    }
}

fn record_upstream(endpoint: &Endpoint, status: &str) {
    metrics::counter!(
        "upstream_requests_total",
        "endpoint" => endpoint.name(),
        "status" => status.to_string()
    )
    .increment(1);
}
