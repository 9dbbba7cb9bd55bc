use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value as JsonValue};

pub type Result<T> = std::result::Result<T, Error>;

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) | Error::Validation(_) | Error::MissingField(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::Unauthenticated(_) | Error::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Error::Config(_) | Error::Database(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Flattens validator output into `{ field: [codes or messages] }`.
fn field_errors(errors: &validator::ValidationErrors) -> JsonValue {
    let mut fields = serde_json::Map::new();
    for (field, errs) in errors.field_errors() {
        let messages: Vec<JsonValue> = errs
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| JsonValue::String(m.to_string()))
                    .unwrap_or_else(|| JsonValue::String(e.code.to_string()))
            })
            .collect();
        fields.insert(field.to_string(), JsonValue::Array(messages));
    }
    JsonValue::Object(fields)
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = match self {
            Error::Validation(ref err) => json!({
                "error": "Validation failed",
                "fields": field_errors(err),
            }),
            Error::BadRequest(msg)
            | Error::Unauthenticated(msg)
            | Error::InvalidToken(msg)
            | Error::Forbidden(msg)
            | Error::NotFound(msg)
            | Error::Conflict(msg) => json!({ "error": msg }),
            Error::MissingField(field) => json!({
                "error": "Validation failed",
                "fields": { (field.clone()): [format!("{} is required", field)] },
            }),
            Error::RateLimited => json!({ "error": "rate_limit_exceeded" }),
            other => {
                tracing::error!(error = %other, "request failed");
                json!({ "error": "An unexpected error occurred" })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(ref db)
                if db.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                Error::Conflict("Record already exists".to_string())
            }
            other => Error::Database(other),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Error::InvalidToken(err.to_string())
    }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(err: argon2::password_hash::Error) -> Self {
        Error::Internal(format!("Password hashing failed: {}", err))
    }
}

/// Validation failure for a single field, reported like derive-based ones.
pub fn invalid_field(field: &'static str, code: &'static str, message: impl Into<String>) -> Error {
    let mut err = validator::ValidationError::new(code);
    err.message = Some(message.into().into());
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, err);
    Error::Validation(errors)
}

/// Validation failure listing required fields that were left empty.
pub fn missing_fields(fields: &[&'static str]) -> Error {
    let mut errors = validator::ValidationErrors::new();
    for &field in fields {
        let mut err = validator::ValidationError::new("required");
        err.message = Some(format!("{} is required", field).into());
        errors.add(field, err);
    }
    Error::Validation(errors)
}

/// Whether the error is a unique-index violation reported by Postgres.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION))
}
