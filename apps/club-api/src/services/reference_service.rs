//! Reference data: locations, event types, and club info.

use tracing::info;

use crate::error::ApiError;
use clubhouse_core::validation::{validate_description, validate_name};
use clubhouse_core::{ClubInfo, EventType, Location};
use clubhouse_db::Database;

/// Service for reference-data operations.
#[derive(Debug, Clone)]
pub struct ReferenceService {
    db: Database,
}

impl ReferenceService {
    /// Creates a new ReferenceService.
    pub fn new(db: Database) -> Self {
        ReferenceService { db }
    }

    /// Lists all locations.
    pub async fn locations(&self) -> Result<Vec<Location>, ApiError> {
        Ok(self.db.reference().list_locations().await?)
    }

    /// Gets one location.
    pub async fn location(&self, id: i64) -> Result<Location, ApiError> {
        Ok(self.db.reference().get_location(id).await?)
    }

    /// Adds a location and returns its id.
    pub async fn add_location(
        &self,
        name: &str,
        route: &str,
        features: &str,
    ) -> Result<i64, ApiError> {
        validate_name("name", name)?;
        validate_description("route", route)?;
        validate_description("features", features)?;

        let id = self.db.reference().add_location(name, route, features).await?;

        info!(location_id = id, "Location added");
        Ok(id)
    }

    /// Lists all event types.
    pub async fn event_types(&self) -> Result<Vec<EventType>, ApiError> {
        Ok(self.db.reference().list_event_types().await?)
    }

    /// Gets one event type.
    pub async fn event_type(&self, id: i64) -> Result<EventType, ApiError> {
        Ok(self.db.reference().get_event_type(id).await?)
    }

    /// Adds an event type and returns its id.
    pub async fn add_event_type(
        &self,
        name: &str,
        description: &str,
    ) -> Result<i64, ApiError> {
        validate_name("name", name)?;
        validate_description("description", description)?;

        let id = self.db.reference().add_event_type(name, description).await?;

        info!(event_type_id = id, "Event type added");
        Ok(id)
    }

    /// Gets a club info entry by key.
    pub async fn info(&self, key: &str) -> Result<ClubInfo, ApiError> {
        Ok(self.db.reference().get_info(key).await?)
    }

    /// Inserts or overwrites a club info entry.
    pub async fn set_info(&self, key: &str, value: &str) -> Result<(), ApiError> {
        validate_name("key", key)?;

        self.db.reference().set_info(key, value).await?;

        info!(key = %key, "Club info set");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use clubhouse_db::DbConfig;

    async fn setup() -> ReferenceService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        ReferenceService::new(db)
    }

    #[tokio::test]
    async fn test_location_round_trip() {
        let service = setup().await;

        let id = service
            .add_location("Main Hall", "Bus 12", "stage")
            .await
            .unwrap();
        assert_eq!(service.location(id).await.unwrap().name, "Main Hall");
        assert_eq!(service.locations().await.unwrap().len(), 1);

        let err = service.add_location("", "", "").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_info_upsert() {
        let service = setup().await;

        service.set_info("address", "12 Park St").await.unwrap();
        service.set_info("address", "1 New Rd").await.unwrap();
        assert_eq!(service.info("address").await.unwrap().value, "1 New Rd");

        let err = service.info("missing").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
