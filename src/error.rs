use axum::{http::StatusCode, response::IntoResponse};

use crate::dto::response::Envelope;

pub type Result<T> = std::result::Result<T, Error>;

pub const INVALID_PARAM: &str = "invalid param";
pub const USER_NOT_FOUND: &str = "user doesn't exist";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Constraint(String),

    #[error("{0}")]
    Failed(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

impl Error {
    /// Envelope code and message reported to the client for this error.
    pub fn envelope_parts(&self) -> (StatusCode, String) {
        match self {
            Error::BadRequest(_) | Error::Validation(_) => {
                (StatusCode::BAD_REQUEST, INVALID_PARAM.to_string())
            }
            Error::NotFound(msg) | Error::Constraint(msg) | Error::Failed(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            Error::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database error".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred".to_string(),
            ),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (code, msg) = self.envelope_parts();
        match self {
            Error::BadRequest(_) | Error::Validation(_) => {
                tracing::warn!(error = %self, "rejected request")
            }
            Error::NotFound(_) | Error::Constraint(_) | Error::Failed(_) => {
                tracing::info!(error = %self, "operation failed")
            }
            _ => tracing::error!(error = %self, "request failed"),
        }
        Envelope::<()>::failure(code, msg).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound(USER_NOT_FOUND.to_string()),
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                let constraint = db.constraint().unwrap_or_default();
                if constraint.contains("username") {
                    Error::Constraint("username already exists".to_string())
                } else {
                    Error::Constraint(format!("duplicate value violates {}", constraint))
                }
            }
            sqlx::Error::Database(ref db) if db.is_check_violation() => Error::Constraint(
                format!(
                    "value violates check constraint {}",
                    db.constraint().unwrap_or_default()
                ),
            ),
            other => Error::Database(other),
        }
    }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(err: argon2::password_hash::Error) -> Self {
        Error::PasswordHash(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value as JsonValue;

    async fn body_of(err: Error) -> (StatusCode, JsonValue) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn bad_request_is_a_400_envelope_over_http_200() {
        let (status, body) = body_of(Error::BadRequest("missing username".into())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], 400);
        assert_eq!(body["msg"], "invalid param");
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn not_found_keeps_its_message() {
        let (status, body) = body_of(Error::NotFound(USER_NOT_FOUND.into())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], 500);
        assert_eq!(body["msg"], "user doesn't exist");
    }

    #[tokio::test]
    async fn database_errors_do_not_leak_details() {
        let (_, body) = body_of(Error::Database(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(body["code"], 500);
        assert_eq!(body["msg"], "database error");
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = Error::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, Error::NotFound(msg) if msg == USER_NOT_FOUND));
    }

    #[test]
    fn other_sqlx_errors_map_to_database() {
        let err = Error::from(sqlx::Error::PoolClosed);
        assert!(matches!(err, Error::Database(_)));
    }
}
