//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Club API                        │
//! │                                                                      │
//! │  Handler                                                             │
//! │  Result<T, ApiError>                                                 │
//! │       │                                                              │
//! │       ▼                                                              │
//! │  DbError?   ── NotFound / EventFull / AlreadyRegistered ──┐          │
//! │       │                                                   ▼          │
//! │  CoreError? ── MemberNotApproved / Validation ───────► ApiError      │
//! │       │                                                   │          │
//! │       ▼                                                   ▼          │
//! │  Success ────────────────────────────────────────► HTTP response     │
//! │                                                                      │
//! │  Body on failure: { "code": "EVENT_FULL", "message": "..." }         │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Expected outcomes (not found, full, duplicate) become typed 4xx
//! results; infrastructure failures are logged and collapsed to a
//! generic 500 so internals never leak to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use clubhouse_core::{CoreError, ValidationError};
use clubhouse_db::DbError;

/// API error returned from HTTP handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Event not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Member has not passed the approval gate (403)
    NotApproved,

    /// A live registration already exists for the pair (409)
    AlreadyRegistered,

    /// The event has no free seats (409)
    EventFull,

    /// Constraint conflict, e.g. duplicate email (409)
    Conflict,

    /// Storage operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status this code maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::NotApproved => StatusCode::FORBIDDEN,
            ErrorCode::AlreadyRegistered | ErrorCode::EventFull | ErrorCode::Conflict => {
                StatusCode::CONFLICT
            }
            ErrorCode::DatabaseError | ErrorCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, id),
            DbError::EventFull { event_id } => ApiError::new(
                ErrorCode::EventFull,
                format!("Event {event_id} is at capacity"),
            ),
            DbError::AlreadyRegistered { member_id, event_id } => ApiError::new(
                ErrorCode::AlreadyRegistered,
                format!("Member {member_id} is already registered for event {event_id}"),
            ),
            DbError::UniqueViolation { field } => ApiError::new(
                ErrorCode::Conflict,
                format!("Duplicate value for {field}"),
            ),
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!(message = %message, "Foreign key violation");
                ApiError::new(ErrorCode::Conflict, "Invalid or still-referenced record")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!(error = %e, "Database connection failed");
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!(error = %e, "Database migration failed");
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!(error = %e, "Database query failed");
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!(error = %e, "Internal database error");
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core domain errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MemberNotFound(id) => ApiError::not_found("Member", id),
            CoreError::EventNotFound(id) => ApiError::not_found("Event", id),
            CoreError::MemberNotApproved(id) => ApiError::new(
                ErrorCode::NotApproved,
                format!("Member {id} is not approved"),
            ),
            CoreError::UnknownStatus(status) => {
                ApiError::validation(format!("Unknown member status: {status}"))
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::NotApproved.status(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorCode::EventFull.status(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::AlreadyRegistered.status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::DatabaseError.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_db_error_conversion() {
        let err: ApiError = DbError::EventFull { event_id: 7 }.into();
        assert_eq!(err.code, ErrorCode::EventFull);

        let err: ApiError = DbError::not_found("Event", 7).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Event not found: 7");
    }

    #[test]
    fn test_error_codes_serialize_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::AlreadyRegistered).unwrap();
        assert_eq!(json, "\"ALREADY_REGISTERED\"");

        let json = serde_json::to_string(&ErrorCode::EventFull).unwrap();
        assert_eq!(json, "\"EVENT_FULL\"");
    }
}
