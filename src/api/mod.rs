use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::Config;
use crate::services::RelayService;

mod catalog;
mod error;
mod genre;
pub mod observability;
mod search;
mod types;
pub mod validation;

pub use error::ApiError;
pub use types::*;

pub struct AppState {
    pub config: Config,

    pub relay: RelayService,

    pub prometheus_handle: Option<PrometheusHandle>,
}

/// Builds the shared state. `config` must already be validated.
pub fn create_app_state(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let relay = RelayService::new(&config.tmdb).context("Failed to build TMDB client")?;

    Ok(Arc::new(AppState {
        config,
        relay,
        prometheus_handle,
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = &state.config.server.cors_allowed_origins;
    let cors_layer = if cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    let mut routes = Router::new()
        .route("/", get(catalog::hello))
        .route("/movies/top", get(catalog::top_rated_movies))
        .route("/movies/popular", get(catalog::popular_movies))
        .route("/series/top", get(catalog::top_rated_series))
        .route("/series/popular", get(catalog::popular_series))
        .route("/actors", get(catalog::popular_actors))
        .route("/search", post(search::search))
        .route("/genre", get(genre::missing_genre))
        .route("/genre/", get(genre::missing_genre))
        .route("/genre/{id}", get(genre::discover_by_genre));

    if state.prometheus_handle.is_some() {
        routes = routes.route("/metrics", get(observability::get_metrics));
    }

    routes
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}
