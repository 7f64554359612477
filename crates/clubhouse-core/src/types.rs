//! # Domain Types
//!
//! Core domain types used throughout the Clubhouse backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                           Domain Types                               │
//! │                                                                      │
//! │  ┌───────────────┐   ┌───────────────┐   ┌────────────────────┐      │
//! │  │    Member     │   │     Event     │   │    Registration    │      │
//! │  │  ───────────  │   │  ───────────  │   │  ────────────────  │      │
//! │  │  id (UUID)    │   │  id (i64)     │   │  member_id (FK)    │      │
//! │  │  email        │   │  capacity     │   │  event_id (FK)     │      │
//! │  │  status       │   │  event_date   │   │  status            │      │
//! │  └───────────────┘   └───────────────┘   └────────────────────┘      │
//! │                                                                      │
//! │  ┌───────────────┐   ┌─────────────────────┐   ┌────────────────┐    │
//! │  │ MemberStatus  │   │ RegistrationStatus  │   │ Location       │    │
//! │  │  Pending      │   │  Registered         │   │ EventType      │    │
//! │  │  Approved     │   │  Cancelled          │   │ ClubInfo       │    │
//! │  │  Declined     │   └─────────────────────┘   └────────────────┘    │
//! │  └───────────────┘                                                   │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A Registration is soft state: exactly one row may exist per
//! (member, event) pair, and cancellation flips the status instead of
//! deleting the row. That is what makes re-registration reuse the row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Member
// =============================================================================

/// Approval status of a club member.
///
/// New members start as `Pending`; only `Approved` members may register
/// for events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Pending,
    Approved,
    Declined,
}

impl MemberStatus {
    /// Returns the lowercase wire/database representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Pending => "pending",
            MemberStatus::Approved => "approved",
            MemberStatus::Declined => "declined",
        }
    }
}

impl Default for MemberStatus {
    fn default() -> Self {
        MemberStatus::Pending
    }
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A club member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Member {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub full_name: String,

    /// Contact email, unique across the club.
    pub email: String,

    /// Contact phone, unique across the club.
    pub phone: String,

    /// Approval status; gates event registration.
    pub status: MemberStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Whether this member has passed the approval gate.
    #[inline]
    pub fn is_approved(&self) -> bool {
        self.status == MemberStatus::Approved
    }
}

/// Payload for creating or updating a member profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMember {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

// =============================================================================
// Event
// =============================================================================

/// A club event with a fixed number of seats.
///
/// `capacity` is the hard ceiling on simultaneously registered members;
/// it is validated positive on creation and enforced by the registration
/// ledger on every registration attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Event type id (see [`EventType`]).
    pub event_type: i64,
    pub event_date: DateTime<Utc>,
    /// Location id (see [`Location`]).
    pub location: i64,
    /// Maximum number of simultaneously registered members.
    pub capacity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating or updating an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub event_type: i64,
    pub event_date: DateTime<Utc>,
    pub location: i64,
    pub capacity: i64,
}

/// Filter for event listings. All fields optional; `None` means "any".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventFilter {
    pub event_type: Option<i64>,
    pub begin: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

// =============================================================================
// Registration
// =============================================================================

/// Lifecycle status of a registration row.
///
/// The pair state machine is `Absent → Registered ⇄ Cancelled`; there is
/// no terminal state and no row deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Registered,
    Cancelled,
}

impl RegistrationStatus {
    /// Returns the lowercase wire/database representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Registered => "registered",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A member's registration for one event.
///
/// At most one row exists per (member, event) pair, enforced by a UNIQUE
/// constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Registration {
    pub id: i64,
    pub member_id: String,
    pub event_id: i64,
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Reference Data
// =============================================================================

/// A venue where events take place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Location {
    pub id: i64,
    pub name: String,
    /// How to get there (public transport, directions).
    pub route: String,
    /// Free-form notes about the venue (stage, acoustics, parking).
    pub features: String,
}

/// Category of event (rehearsal, concert, social, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct EventType {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// A key/value fact about the club (contact address, rehearsal schedule).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ClubInfo {
    pub key: String,
    pub value: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
