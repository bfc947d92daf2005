use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use super::validation::validate_search_query;
use super::{ApiError, AppState, SearchRequest};

/// A missing or malformed body is treated like an empty search term.
pub async fn search(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("Unusable search body: {}", rejection.body_text());
            SearchRequest { query: None }
        }
    };

    let term = validate_search_query(request.query.as_deref())?;
    info!(term = %term, "Searching TMDB");

    let body = state.relay.search(term).await?;
    Ok(Json(body))
}
