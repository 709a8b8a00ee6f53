use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use meridian_core::error::CoreError;
use serde_json::json;

/// What a handler returns when something goes wrong.
///
/// Every variant renders as `{"error": <message>, "code": <CODE>}` with a
/// matching status, so API clients parse one failure shape everywhere.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Domain failure bubbled up from `meridian_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request was syntactically fine but unusable (bad multipart, etc.).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Something broke on our side; the message stays in the logs and the
    /// client gets a generic line.
    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<crate::storage::StorageError> for AppError {
    fn from(err: crate::storage::StorageError) -> Self {
        use crate::storage::StorageError;
        match err {
            StorageError::InvalidName(msg) => AppError::BadRequest(msg),
            other => AppError::InternalError(format!("Storage error: {other}")),
        }
    }
}

impl AppError {
    /// Status, machine code, and client-facing message for this error.
    ///
    /// Internal details are logged here and replaced with a generic message
    /// before anything leaves the process.
    fn http_parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, key } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} '{key}' not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal_parts()
                }
            },
            AppError::Database(err) => db_error_parts(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_parts()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.http_parts();
        let body = json!({ "error": message, "code": code });
        (status, axum::Json(body)).into_response()
    }
}

fn internal_parts() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Map a sqlx failure onto the API surface.
///
/// `RowNotFound` becomes 404. A Postgres 23505 on one of our `uq_*`
/// constraints means the client raced or repeated itself, which is a 409
/// naming the constraint. Anything else is logged and hidden behind a 500.
fn db_error_parts(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                )
            } else {
                tracing::error!(error = %db_err, "Database error");
                internal_parts()
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal_parts()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = AppError::Core(CoreError::not_found_slug("BlogPost", "missing-post"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = AppError::Core(CoreError::Validation("Please fill in Name".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_row_not_found_maps_to_404() {
        let err = AppError::Database(sqlx::Error::RowNotFound);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_forbidden_maps_to_403() {
        let err = AppError::Core(CoreError::Forbidden(
            "This action needs administrator access".into(),
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    /// Clients depend on the `{error, code}` body shape.
    #[tokio::test]
    async fn test_error_body_has_message_and_code() {
        let err = AppError::BadRequest("Uploaded file is empty".into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "Uploaded file is empty");
        assert_eq!(json["code"], "BAD_REQUEST");
    }
}
