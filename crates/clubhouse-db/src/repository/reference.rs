//! # Reference Data Repository
//!
//! Locations, event types and club info: small lookup relations that
//! events hang off. No concurrency concerns here; plain CRUD.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use clubhouse_core::{ClubInfo, EventType, Location};

/// Repository for reference-data operations.
#[derive(Debug, Clone)]
pub struct ReferenceRepository {
    pool: SqlitePool,
}

impl ReferenceRepository {
    /// Creates a new ReferenceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReferenceRepository { pool }
    }

    // -------------------------------------------------------------------------
    // Locations
    // -------------------------------------------------------------------------

    /// Lists all locations.
    pub async fn list_locations(&self) -> DbResult<Vec<Location>> {
        let locations = sqlx::query_as::<_, Location>(
            "SELECT id, name, route, features FROM locations ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    /// Gets a location by id.
    pub async fn get_location(&self, id: i64) -> DbResult<Location> {
        let location = sqlx::query_as::<_, Location>(
            "SELECT id, name, route, features FROM locations WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        location.ok_or_else(|| DbError::not_found("Location", id))
    }

    /// Adds a location and returns its generated id.
    pub async fn add_location(
        &self,
        name: &str,
        route: &str,
        features: &str,
    ) -> DbResult<i64> {
        debug!(name = %name, "Adding location");

        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO locations (name, route, features) VALUES (?1, ?2, ?3) RETURNING id",
        )
        .bind(name)
        .bind(route)
        .bind(features)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    // -------------------------------------------------------------------------
    // Event Types
    // -------------------------------------------------------------------------

    /// Lists all event types.
    pub async fn list_event_types(&self) -> DbResult<Vec<EventType>> {
        let types = sqlx::query_as::<_, EventType>(
            "SELECT id, name, description FROM event_types ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(types)
    }

    /// Gets an event type by id.
    pub async fn get_event_type(&self, id: i64) -> DbResult<EventType> {
        let event_type = sqlx::query_as::<_, EventType>(
            "SELECT id, name, description FROM event_types WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        event_type.ok_or_else(|| DbError::not_found("EventType", id))
    }

    /// Adds an event type and returns its generated id.
    pub async fn add_event_type(&self, name: &str, description: &str) -> DbResult<i64> {
        debug!(name = %name, "Adding event type");

        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO event_types (name, description) VALUES (?1, ?2) RETURNING id",
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    // -------------------------------------------------------------------------
    // Club Info
    // -------------------------------------------------------------------------

    /// Gets a club info entry by key.
    pub async fn get_info(&self, key: &str) -> DbResult<ClubInfo> {
        let info = sqlx::query_as::<_, ClubInfo>(
            "SELECT info_key AS key, info_value AS value FROM club_info WHERE info_key = ?1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        info.ok_or_else(|| DbError::not_found("ClubInfo", key))
    }

    /// Inserts or overwrites a club info entry.
    pub async fn set_info(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, "Setting club info");

        sqlx::query(
            r#"
            INSERT INTO club_info (info_key, info_value)
            VALUES (?1, ?2)
            ON CONFLICT (info_key)
            DO UPDATE SET info_value = excluded.info_value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
