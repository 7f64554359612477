//! # Validation Module
//!
//! Input validation rules for the Clubhouse backend.
//!
//! ## Validation Strategy
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                        Validation Layers                             │
//! │                                                                      │
//! │  Layer 1: HTTP request (serde)                                       │
//! │  ├── Type validation (deserialization)                               │
//! │  └── Enum variants (member status, registration status)              │
//! │           │                                                          │
//! │           ▼                                                          │
//! │  Layer 2: Service layer                                              │
//! │  └── THIS MODULE: field shape and range rules                        │
//! │           │                                                          │
//! │           ▼                                                          │
//! │  Layer 3: Database (SQLite)                                          │
//! │  ├── NOT NULL / CHECK constraints                                    │
//! │  ├── UNIQUE constraints (email, phone, registration pair)            │
//! │  └── Foreign key constraints                                         │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_DESCRIPTION_LEN, MAX_EVENT_CAPACITY, MAX_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a member's or event's display name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most [`MAX_NAME_LEN`] characters
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a free-form description field.
///
/// Empty descriptions are allowed.
pub fn validate_description(field: &str, value: &str) -> ValidationResult<()> {
    if value.len() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates an email address shape.
///
/// ## Rules
/// - Exactly one `@`
/// - Non-empty local part
/// - Domain part containing at least one `.` with characters around it
///
/// This is deliberately a shape check, not an RFC 5322 parser; the
/// database UNIQUE constraint and the mail system do the rest.
///
/// ## Example
/// ```rust
/// use clubhouse_core::validation::validate_email;
///
/// assert!(validate_email("ada@example.com").is_ok());
/// assert!(validate_email("not-an-email").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must look like local@domain.tld".to_string(),
    };

    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(invalid()),
    };

    if local.is_empty() || domain.is_empty() {
        return Err(invalid());
    }

    // Domain needs a dot that is neither leading nor trailing.
    match domain.rfind('.') {
        Some(idx) if idx > 0 && idx < domain.len() - 1 => Ok(()),
        _ => Err(invalid()),
    }
}

/// Validates a phone number shape.
///
/// ## Rules
/// - Optional leading `+`
/// - 10 to 15 ASCII digits
///
/// ## Example
/// ```rust
/// use clubhouse_core::validation::validate_phone;
///
/// assert!(validate_phone("+15550100200").is_ok());
/// assert!(validate_phone("79001002030").is_ok());
/// assert!(validate_phone("call me").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let digits = phone.strip_prefix('+').unwrap_or(phone);

    if !(10..=15).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must be 10-15 digits with an optional leading +".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an event capacity.
///
/// ## Rules
/// - Must be positive (> 0); a zero-seat event could never be registered
/// - Must not exceed [`MAX_EVENT_CAPACITY`]
pub fn validate_capacity(capacity: i64) -> ValidationResult<()> {
    if capacity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "capacity".to_string(),
        });
    }

    if capacity > MAX_EVENT_CAPACITY {
        return Err(ValidationError::OutOfRange {
            field: "capacity".to_string(),
            min: 1,
            max: MAX_EVENT_CAPACITY,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a member id (UUID string format).
///
/// ## Example
/// ```rust
/// use clubhouse_core::validation::validate_member_id;
///
/// assert!(validate_member_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_member_id("not-a-uuid").is_err());
/// ```
pub fn validate_member_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "member_id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "member_id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("full_name", "Ada Lovelace").is_ok());
        assert!(validate_name("full_name", "").is_err());
        assert!(validate_name("full_name", "   ").is_err());
        assert!(validate_name("full_name", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("first.last@sub.example.org").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("two@@signs.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ada@").is_err());
        assert!(validate_email("ada@nodot").is_err());
        assert!(validate_email("ada@dot.").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+15550100200").is_ok());
        assert!(validate_phone("79001002030").is_ok());
        assert!(validate_phone("5550100200").is_ok());

        assert!(validate_phone("").is_err());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("phone-number").is_err());
        assert!(validate_phone("+1 555 010 0200").is_err());
        assert!(validate_phone(&"9".repeat(20)).is_err());
    }

    #[test]
    fn test_validate_capacity() {
        assert!(validate_capacity(1).is_ok());
        assert!(validate_capacity(500).is_ok());

        assert!(validate_capacity(0).is_err());
        assert!(validate_capacity(-3).is_err());
        assert!(validate_capacity(MAX_EVENT_CAPACITY + 1).is_err());
    }

    #[test]
    fn test_validate_member_id() {
        assert!(validate_member_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_member_id("").is_err());
        assert!(validate_member_id("not-a-uuid").is_err());
    }
}
