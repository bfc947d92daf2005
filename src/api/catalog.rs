use axum::{Json, extract::State};
use serde_json::Value;
use std::sync::Arc;

use crate::clients::tmdb::Endpoint;

use super::{ApiError, AppState};

pub async fn hello() -> &'static str {
    "Hello, World!"
}

pub async fn top_rated_movies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let body = state.relay.listing(&Endpoint::TopRatedMovies).await?;
    Ok(Json(body))
}

pub async fn popular_movies(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let body = state.relay.listing(&Endpoint::PopularMovies).await?;
    Ok(Json(body))
}

pub async fn top_rated_series(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let body = state.relay.listing(&Endpoint::TopRatedSeries).await?;
    Ok(Json(body))
}

pub async fn popular_series(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let body = state.relay.listing(&Endpoint::PopularSeries).await?;
    Ok(Json(body))
}

pub async fn popular_actors(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let body = state.relay.popular_people().await?;
    Ok(Json(body))
}
