//! # Error Types
//!
//! Domain-specific error types for clubhouse-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                           Error Types                                │
//! │                                                                      │
//! │  clubhouse-core errors (this file)                                   │
//! │  ├── CoreError        - General domain errors                        │
//! │  └── ValidationError  - Input validation failures                    │
//! │                                                                      │
//! │  clubhouse-db errors (separate crate)                                │
//! │  └── DbError          - Database operation failures                  │
//! │                                                                      │
//! │  club-api errors (in app)                                            │
//! │  └── ApiError         - What HTTP clients see (serialized)           │
//! │                                                                      │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client     │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// These represent business rule violations independent of any storage or
/// transport concern.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Member id is unknown.
    #[error("Member not found: {0}")]
    MemberNotFound(String),

    /// Member exists but has not passed the approval gate.
    ///
    /// Raised by the registration facade before the ledger is touched;
    /// the ledger itself never sees unapproved members.
    #[error("Member is not approved: {0}")]
    MemberNotApproved(String),

    /// Event id is unknown.
    #[error("Event not found: {0}")]
    EventNotFound(i64),

    /// A status string did not name a known member status.
    #[error("Unknown member status: {0}")]
    UnknownStatus(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller-supplied input does not meet requirements.
/// Used for early rejection before any storage work happens.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. malformed email or phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
