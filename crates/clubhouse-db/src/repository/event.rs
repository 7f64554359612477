//! # Event Repository
//!
//! Database operations for events: the event catalog.
//!
//! Capacity is stored here but *enforced* in the registration ledger,
//! whose guarded statements read `events.capacity` in the same atomic
//! unit as the seat count. Nothing in this module caches or precomputes
//! seat availability.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use clubhouse_core::{Event, EventFilter, NewEvent};

/// Repository for event database operations.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: SqlitePool,
}

const EVENT_COLUMNS: &str =
    "id, title, description, event_type, event_date, location, capacity, created_at, updated_at";

impl EventRepository {
    /// Creates a new EventRepository.
    pub fn new(pool: SqlitePool) -> Self {
        EventRepository { pool }
    }

    /// Inserts a new event and returns its generated id.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - Unknown event type or
    ///   location id
    pub async fn insert(&self, new: &NewEvent) -> DbResult<i64> {
        debug!(title = %new.title, capacity = new.capacity, "Inserting event");

        let now = Utc::now();

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO events (title, description, event_type, event_date, location, capacity, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            RETURNING id
            "#,
        )
        .bind(new.title.trim())
        .bind(&new.description)
        .bind(new.event_type)
        .bind(new.event_date)
        .bind(new.location)
        .bind(new.capacity)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Gets an event by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Lists events matching the filter, soonest first.
    ///
    /// `None` filter fields match everything, so the same statement
    /// serves the unfiltered listing.
    pub async fn list(&self, filter: &EventFilter) -> DbResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            r#"
            SELECT {EVENT_COLUMNS} FROM events
            WHERE (?1 IS NULL OR event_type = ?1)
              AND (?2 IS NULL OR event_date >= ?2)
              AND (?3 IS NULL OR event_date <= ?3)
            ORDER BY event_date ASC
            "#
        ))
        .bind(filter.event_type)
        .bind(filter.begin)
        .bind(filter.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Lists events that have not happened yet, soonest first.
    pub async fn list_upcoming(&self) -> DbResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE event_date >= ?1 ORDER BY event_date ASC"
        ))
        .bind(Utc::now())
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Lists upcoming events the member holds no live registration for.
    ///
    /// A cancelled registration does not hide the event: the member can
    /// claim the seat again.
    pub async fn list_available(&self, member_id: &str) -> DbResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            r#"
            SELECT {EVENT_COLUMNS} FROM events
            WHERE event_date >= ?2
              AND id NOT IN (
                  SELECT event_id FROM registrations
                  WHERE member_id = ?1 AND status = 'registered'
              )
            ORDER BY event_date ASC
            "#
        ))
        .bind(member_id)
        .bind(Utc::now())
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Lists upcoming events the member has any registration row for,
    /// cancelled ones included.
    pub async fn list_registered(&self, member_id: &str) -> DbResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            r#"
            SELECT {EVENT_COLUMNS} FROM events
            WHERE event_date >= ?2
              AND id IN (
                  SELECT event_id FROM registrations WHERE member_id = ?1
              )
            ORDER BY event_date ASC
            "#
        ))
        .bind(member_id)
        .bind(Utc::now())
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Updates an existing event.
    pub async fn update(&self, id: i64, new: &NewEvent) -> DbResult<()> {
        debug!(id = id, "Updating event");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE events
            SET title = ?2, description = ?3, event_type = ?4, event_date = ?5,
                location = ?6, capacity = ?7, updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(new.title.trim())
        .bind(&new.description)
        .bind(new.event_type)
        .bind(new.event_date)
        .bind(new.location)
        .bind(new.capacity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Event", id));
        }

        Ok(())
    }

    /// Deletes an event.
    ///
    /// Events referenced by registration rows cannot be deleted; the
    /// foreign key surfaces as `DbError::ForeignKeyViolation`.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "Deleting event");

        let result = sqlx::query("DELETE FROM events WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Event", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Duration;

    async fn setup() -> (Database, i64, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let location = db
            .reference()
            .add_location("Main Hall", "Bus 12 to Park St", "stage, piano")
            .await
            .unwrap();
        let event_type = db
            .reference()
            .add_event_type("rehearsal", "Weekly full rehearsal")
            .await
            .unwrap();
        (db, location, event_type)
    }

    fn event_in(days: i64, event_type: i64, location: i64, capacity: i64) -> NewEvent {
        NewEvent {
            title: format!("Event in {days}d"),
            description: String::new(),
            event_type,
            event_date: Utc::now() + Duration::days(days),
            location,
            capacity,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let (db, location, event_type) = setup().await;
        let repo = db.events();

        let id = repo
            .insert(&event_in(7, event_type, location, 30))
            .await
            .unwrap();

        let event = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(event.capacity, 30);
        assert_eq!(event.location, location);
        assert!(repo.get_by_id(id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_with_unknown_location_fails() {
        let (db, _, event_type) = setup().await;

        let err = db
            .events()
            .insert(&event_in(7, event_type, 9999, 30))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_list_filters_by_type_and_date() {
        let (db, location, event_type) = setup().await;
        let other_type = db
            .reference()
            .add_event_type("concert", "Public performance")
            .await
            .unwrap();
        let repo = db.events();

        repo.insert(&event_in(1, event_type, location, 10)).await.unwrap();
        repo.insert(&event_in(5, other_type, location, 10)).await.unwrap();
        repo.insert(&event_in(30, event_type, location, 10)).await.unwrap();

        let all = repo.list(&EventFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let rehearsals = repo
            .list(&EventFilter {
                event_type: Some(event_type),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(rehearsals.len(), 2);

        let this_week = repo
            .list(&EventFilter {
                event_type: None,
                begin: Some(Utc::now()),
                end: Some(Utc::now() + Duration::days(7)),
            })
            .await
            .unwrap();
        assert_eq!(this_week.len(), 2);
    }

    #[tokio::test]
    async fn test_upcoming_excludes_past_events() {
        let (db, location, event_type) = setup().await;
        let repo = db.events();

        repo.insert(&event_in(-2, event_type, location, 10)).await.unwrap();
        let future = repo.insert(&event_in(2, event_type, location, 10)).await.unwrap();

        let upcoming = repo.list_upcoming().await.unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].id, future);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (db, location, event_type) = setup().await;
        let repo = db.events();

        let id = repo
            .insert(&event_in(3, event_type, location, 10))
            .await
            .unwrap();

        let mut updated = event_in(3, event_type, location, 25);
        updated.title = "Renamed".to_string();
        repo.update(id, &updated).await.unwrap();

        let event = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(event.title, "Renamed");
        assert_eq!(event.capacity, 25);

        repo.delete(id).await.unwrap();
        assert!(repo.get_by_id(id).await.unwrap().is_none());

        let err = repo.delete(id).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
