use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;
use std::sync::Arc;

use super::validation::{INVALID_GENRE, validate_genre_id};
use super::{ApiError, AppState};

pub async fn discover_by_genre(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let genre_id = validate_genre_id(Some(&id))?;
    let body = state.relay.discover_by_genre(genre_id).await?;
    Ok(Json(body))
}

/// `/genre` and `/genre/` without an id.
pub async fn missing_genre() -> ApiError {
    ApiError::invalid_input(INVALID_GENRE)
}
