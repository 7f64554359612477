//! # Club API
//!
//! HTTP backend for the Clubhouse club-management system: members,
//! events, locations, and capacity-bounded event registrations.
//!
//! ## Architecture
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         Club API Server                          │
//! │                                                                  │
//! │  Client ───► axum routes ───► services ───► clubhouse-db         │
//! │                                  │                               │
//! │                                  └── approval gate fronting      │
//! │                                      the registration ledger     │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod services;

use clubhouse_db::Database;

use crate::services::{EventsService, MembersService, ReferenceService, RegistrationsService};

/// Shared application state.
///
/// Cheap to clone; every service holds a clone of the same pooled
/// [`Database`] handle.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub members: MembersService,
    pub events: EventsService,
    pub registrations: RegistrationsService,
    pub reference: ReferenceService,
}

impl AppState {
    /// Wires the service layer over one database handle.
    pub fn new(db: Database) -> Self {
        AppState {
            members: MembersService::new(db.clone()),
            events: EventsService::new(db.clone()),
            registrations: RegistrationsService::new(db.clone()),
            reference: ReferenceService::new(db.clone()),
            db,
        }
    }
}
