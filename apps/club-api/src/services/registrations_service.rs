//! Registration facade: the single entry point for registration calls.
//!
//! `register` applies the member-approval gate *before* the ledger runs.
//! Approval is a slow-changing property, so it is checked outside the
//! ledger's atomic transaction; the capacity race is entirely the
//! ledger's problem. `cancel` and `status` pass straight through with no
//! gate - a member who got a seat can always give it back, approved or
//! not.

use tracing::{info, warn};

use crate::error::ApiError;
use clubhouse_core::{CoreError, RegistrationStatus};
use clubhouse_db::Database;

/// Orchestrates approval-gating plus ledger calls.
#[derive(Debug, Clone)]
pub struct RegistrationsService {
    db: Database,
}

impl RegistrationsService {
    /// Creates a new RegistrationsService.
    pub fn new(db: Database) -> Self {
        RegistrationsService { db }
    }

    /// Registers a member for an event.
    ///
    /// ## Errors
    /// * `NotFound` - Unknown member or event
    /// * `NotApproved` - Member exists but is not approved; the ledger is
    ///   never touched in this case
    /// * `AlreadyRegistered` / `EventFull` - Ledger outcomes
    pub async fn register(
        &self,
        member_id: &str,
        event_id: i64,
    ) -> Result<RegistrationStatus, ApiError> {
        info!(member_id = %member_id, event_id = event_id, "Attempting registration");

        let approved = self.db.members().is_approved(member_id).await?;

        if !approved {
            warn!(member_id = %member_id, "Registration denied: member not approved");
            return Err(CoreError::MemberNotApproved(member_id.to_string()).into());
        }

        let status = self.db.registrations().register(member_id, event_id).await?;

        info!(member_id = %member_id, event_id = event_id, "Registration successful");
        Ok(status)
    }

    /// Cancels a registration. No approval gate; idempotent.
    pub async fn cancel(
        &self,
        member_id: &str,
        event_id: i64,
    ) -> Result<RegistrationStatus, ApiError> {
        info!(member_id = %member_id, event_id = event_id, "Cancelling registration");

        let status = self.db.registrations().cancel(member_id, event_id).await?;

        info!(member_id = %member_id, event_id = event_id, "Cancellation successful");
        Ok(status)
    }

    /// Looks up the registration status for a pair.
    pub async fn status(
        &self,
        member_id: &str,
        event_id: i64,
    ) -> Result<RegistrationStatus, ApiError> {
        let status = self.db.registrations().status_of(member_id, event_id).await?;
        Ok(status)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
