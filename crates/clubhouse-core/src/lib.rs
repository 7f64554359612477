//! # clubhouse-core: Pure Domain Logic for the Clubhouse Backend
//!
//! This crate holds the domain model for a club-management backend:
//! members, events, locations and event registrations. Everything here is
//! pure data and pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     Clubhouse Architecture                       │
//! │                                                                  │
//! │  ┌────────────────────────────────────────────────────────────┐  │
//! │  │                  apps/club-api (HTTP)                      │  │
//! │  │   routes ──► services (approval gate, orchestration)       │  │
//! │  └───────────────────────────┬────────────────────────────────┘  │
//! │                              │                                   │
//! │  ┌───────────────────────────▼────────────────────────────────┐  │
//! │  │              ★ clubhouse-core (THIS CRATE) ★               │  │
//! │  │                                                            │  │
//! │  │   ┌──────────┐   ┌────────────┐   ┌───────────┐            │  │
//! │  │   │  types   │   │ validation │   │   error   │            │  │
//! │  │   │ Member   │   │   rules    │   │ CoreError │            │  │
//! │  │   │ Event    │   │   checks   │   │ Validation│            │  │
//! │  │   └──────────┘   └────────────┘   └───────────┘            │  │
//! │  │                                                            │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS       │  │
//! │  └───────────────────────────┬────────────────────────────────┘  │
//! │                              │                                   │
//! │  ┌───────────────────────────▼────────────────────────────────┐  │
//! │  │              clubhouse-db (Database Layer)                 │  │
//! │  │        SQLite queries, migrations, repositories            │  │
//! │  └────────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Member, Event, Registration, etc.)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use clubhouse_core::Member` instead of
// `use clubhouse_core::types::Member`

pub use error::{CoreError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length accepted for member and event names.
///
/// Keeps pathological input out of the database; generous enough for any
/// real name or title.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length accepted for free-form description fields.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Upper bound on event capacity.
///
/// The schema only requires capacity > 0; this cap rejects obvious typos
/// (e.g. 500000 seats) before they reach storage.
pub const MAX_EVENT_CAPACITY: i64 = 100_000;
