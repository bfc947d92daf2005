use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ErrorBody;
use crate::services::RelayError;

const UPSTREAM_STATUS_MESSAGE: &str = "Erro na requisição à API do TMDB";
const UPSTREAM_FAILURE_MESSAGE: &str = "Falha ao buscar dados";

#[derive(Debug)]
pub enum ApiError {
    /// Caller supplied data that failed validation.
    InvalidInput(String),

    /// The upstream call failed. `message` is returned to the caller,
    /// `detail` only goes to the log.
    Upstream {
        service: String,
        message: String,
        detail: String,
    },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ApiError::Upstream {
                service, detail, ..
            } => write!(f, "{} error: {}", service, detail),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidInput(msg) => {
                tracing::warn!("Rejected request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::Upstream {
                service,
                message,
                detail,
            } => {
                tracing::error!("{} API error: {}", service, detail);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(ErrorBody::new(error_message))).into_response()
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        let message = if err.is_upstream_status() {
            UPSTREAM_STATUS_MESSAGE
        } else {
            UPSTREAM_FAILURE_MESSAGE
        };

        ApiError::Upstream {
            service: "TMDB".to_string(),
            message: message.to_string(),
            detail: err.to_string(),
        }
    }
}

impl ApiError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        ApiError::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::tmdb::TmdbError;
    use reqwest::StatusCode as UpstreamStatus;

    #[test]
    fn test_upstream_status_message() {
        let err: ApiError = RelayError::Upstream(TmdbError::Status {
            status: UpstreamStatus::UNAUTHORIZED,
            body: "{}".to_string(),
        })
        .into();

        match err {
            ApiError::Upstream {
                message, detail, ..
            } => {
                assert_eq!(message, UPSTREAM_STATUS_MESSAGE);
                assert!(detail.contains("401"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_failure_message() {
        let err: ApiError = RelayError::Projection("missing field `results`".to_string()).into();

        match err {
            ApiError::Upstream { message, .. } => assert_eq!(message, UPSTREAM_FAILURE_MESSAGE),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::invalid_input("bad").into_response().status(),
            StatusCode::BAD_REQUEST
        );

        let upstream: ApiError =
            RelayError::Upstream(TmdbError::Decode("eof".to_string())).into();
        assert_eq!(
            upstream.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
