//! Event catalog management and per-member event listings.
//!
//! The member-facing listings (`available`, `registered`) are gated on
//! approval the same way registration itself is; administrative CRUD is
//! not.

use tracing::{debug, info};

use crate::error::ApiError;
use clubhouse_core::validation::{validate_capacity, validate_description, validate_name};
use clubhouse_core::{CoreError, Event, EventFilter, NewEvent};
use clubhouse_db::Database;

/// Service for event operations.
#[derive(Debug, Clone)]
pub struct EventsService {
    db: Database,
}

impl EventsService {
    /// Creates a new EventsService.
    pub fn new(db: Database) -> Self {
        EventsService { db }
    }

    /// Adds an event and returns its id.
    pub async fn add(&self, new: &NewEvent) -> Result<i64, ApiError> {
        validate_event(new)?;

        let id = self.db.events().insert(new).await?;

        info!(event_id = id, capacity = new.capacity, "Event added");
        Ok(id)
    }

    /// Gets an event by id.
    pub async fn get(&self, id: i64) -> Result<Event, ApiError> {
        debug!(event_id = id, "Getting event");

        self.db
            .events()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Event", id))
    }

    /// Lists events matching the filter.
    pub async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, ApiError> {
        let events = self.db.events().list(filter).await?;

        debug!(count = events.len(), "Events retrieved");
        Ok(events)
    }

    /// Lists upcoming events.
    pub async fn upcoming(&self) -> Result<Vec<Event>, ApiError> {
        let events = self.db.events().list_upcoming().await?;
        Ok(events)
    }

    /// Lists upcoming events the member could still register for.
    ///
    /// Gated on approval like registration itself.
    pub async fn available(&self, member_id: &str) -> Result<Vec<Event>, ApiError> {
        self.require_approved(member_id).await?;

        let events = self.db.events().list_available(member_id).await?;

        debug!(member_id = %member_id, count = events.len(), "Available events retrieved");
        Ok(events)
    }

    /// Lists upcoming events the member holds a registration row for.
    pub async fn registered(&self, member_id: &str) -> Result<Vec<Event>, ApiError> {
        self.require_approved(member_id).await?;

        let events = self.db.events().list_registered(member_id).await?;

        debug!(member_id = %member_id, count = events.len(), "Registered events retrieved");
        Ok(events)
    }

    /// Updates an event.
    pub async fn update(&self, id: i64, new: &NewEvent) -> Result<(), ApiError> {
        validate_event(new)?;

        self.db.events().update(id, new).await?;

        info!(event_id = id, "Event updated");
        Ok(())
    }

    /// Deletes an event. Fails while registration rows reference it.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.db.events().delete(id).await?;

        info!(event_id = id, "Event deleted");
        Ok(())
    }

    async fn require_approved(&self, member_id: &str) -> Result<(), ApiError> {
        if !self.db.members().is_approved(member_id).await? {
            return Err(CoreError::MemberNotApproved(member_id.to_string()).into());
        }
        Ok(())
    }
}

fn validate_event(new: &NewEvent) -> Result<(), ApiError> {
    validate_name("title", &new.title)?;
    validate_description("description", &new.description)?;
    validate_capacity(new.capacity)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
