use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Application error taxonomy, mapped to HTTP responses by [`IntoResponse`].
///
/// User-input and authorization failures carry descriptive messages. Internal
/// failures (database, configuration) are logged in full but serialized
/// opaque — callers only see that the server failed.
#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    QuotaExceeded { message: String, details: Value },
    DuplicateDomain { message: String, details: Value },
    Unauthorized { message: String, details: Value },
    Forbidden { message: String, details: Value },
    NotFound { message: String, details: Value },
    DnsResolution { message: String, details: Value },
    Provisioning { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn quota_exceeded(message: impl Into<String>, details: Value) -> Self {
        Self::QuotaExceeded {
            message: message.into(),
            details,
        }
    }
    pub fn duplicate_domain(message: impl Into<String>, details: Value) -> Self {
        Self::DuplicateDomain {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn dns_resolution(message: impl Into<String>, details: Value) -> Self {
        Self::DnsResolution {
            message: message.into(),
            details,
        }
    }
    pub fn provisioning(message: impl Into<String>, details: Value) -> Self {
        Self::Provisioning {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::QuotaExceeded { message, details } => {
                (StatusCode::BAD_REQUEST, "quota_exceeded", message, details)
            }
            AppError::DuplicateDomain { message, details } => (
                StatusCode::BAD_REQUEST,
                "duplicate_domain",
                message,
                details,
            ),
            AppError::Unauthorized { message, details } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", message, details)
            }
            AppError::Forbidden { message, details } => {
                (StatusCode::FORBIDDEN, "forbidden", message, details)
            }
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::DnsResolution { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "dns_resolution_failed",
                message,
                details,
            ),
            AppError::Provisioning { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "provisioning_failed",
                message,
                details,
            ),
            AppError::Internal { message, details } => {
                // Full detail goes to the log; the response body stays opaque.
                tracing::error!(%message, %details, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                    json!({}),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return AppError::duplicate_domain(
                    "Record already exists",
                    json!({ "constraint": db.constraint() }),
                );
            }
        }

        AppError::internal("Database error", json!({ "source": e.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    async fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[tokio::test]
    async fn test_status_mapping() {
        assert_eq!(
            status_of(AppError::quota_exceeded("q", json!({}))).await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::duplicate_domain("d", json!({}))).await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::forbidden("f", json!({}))).await,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(AppError::not_found("n", json!({}))).await,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::dns_resolution("r", json!({}))).await,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::provisioning("p", json!({}))).await,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_internal_error_is_opaque() {
        let response =
            AppError::internal("connection pool exhausted", json!({"pool": "pg"})).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["error"]["code"], "internal_error");
        assert_eq!(body["error"]["message"], "Internal server error");
        assert_eq!(body["error"]["details"], json!({}));
    }
}
