//! Member directory management: profiles and the approval status that
//! the registration facade gates on.

use tracing::{debug, info};

use crate::error::ApiError;
use clubhouse_core::validation::{validate_email, validate_name, validate_phone};
use clubhouse_core::{Member, MemberStatus, NewMember};
use clubhouse_db::Database;

/// Service for member operations.
#[derive(Debug, Clone)]
pub struct MembersService {
    db: Database,
}

impl MembersService {
    /// Creates a new MembersService.
    pub fn new(db: Database) -> Self {
        MembersService { db }
    }

    /// Adds a member. New members start in `pending` status.
    pub async fn add(&self, new: &NewMember) -> Result<Member, ApiError> {
        validate_profile(new)?;

        let member = self.db.members().insert(new).await?;

        info!(member_id = %member.id, "Member added");
        Ok(member)
    }

    /// Gets a member by id.
    pub async fn get(&self, id: &str) -> Result<Member, ApiError> {
        debug!(member_id = %id, "Getting member");

        self.db
            .members()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Member", id))
    }

    /// Lists members, optionally filtered by approval status.
    pub async fn list(&self, status: Option<MemberStatus>) -> Result<Vec<Member>, ApiError> {
        let members = match status {
            Some(status) => self.db.members().list_with_status(status).await?,
            None => self.db.members().list().await?,
        };

        debug!(count = members.len(), "Members retrieved");
        Ok(members)
    }

    /// Updates a member's profile fields.
    pub async fn update_profile(&self, id: &str, new: &NewMember) -> Result<(), ApiError> {
        validate_profile(new)?;

        self.db.members().update_profile(id, new).await?;

        info!(member_id = %id, "Member profile updated");
        Ok(())
    }

    /// Sets a member's approval status.
    pub async fn update_status(&self, id: &str, status: MemberStatus) -> Result<(), ApiError> {
        self.db.members().update_status(id, status).await?;

        info!(member_id = %id, status = %status, "Member status updated");
        Ok(())
    }

    /// Deletes a member. Fails while registration rows reference them.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.db.members().delete(id).await?;

        info!(member_id = %id, "Member deleted");
        Ok(())
    }
}

fn validate_profile(new: &NewMember) -> Result<(), ApiError> {
    validate_name("full_name", &new.full_name)?;
    validate_email(&new.email)?;
    validate_phone(&new.phone)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use clubhouse_db::DbConfig;

    async fn setup() -> MembersService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        MembersService::new(db)
    }

    fn valid_member() -> NewMember {
        NewMember {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+15550100200".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_and_get() {
        let service = setup().await;

        let member = service.add(&valid_member()).await.unwrap();
        assert_eq!(member.status, MemberStatus::Pending);

        let fetched = service.get(&member.id).await.unwrap();
        assert_eq!(fetched.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_add_rejects_bad_input() {
        let service = setup().await;

        let mut bad_email = valid_member();
        bad_email.email = "not-an-email".to_string();
        let err = service.add(&bad_email).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let mut bad_phone = valid_member();
        bad_phone.phone = "call me".to_string();
        let err = service.add(&bad_phone).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let mut no_name = valid_member();
        no_name.full_name = "  ".to_string();
        let err = service.add(&no_name).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let service = setup().await;

        service.add(&valid_member()).await.unwrap();

        let mut dup = valid_member();
        dup.phone = "+15550100299".to_string();
        let err = service.add(&dup).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn test_status_update_and_filtered_list() {
        let service = setup().await;

        let member = service.add(&valid_member()).await.unwrap();
        service
            .update_status(&member.id, MemberStatus::Approved)
            .await
            .unwrap();

        let approved = service.list(Some(MemberStatus::Approved)).await.unwrap();
        assert_eq!(approved.len(), 1);

        let pending = service.list(Some(MemberStatus::Pending)).await.unwrap();
        assert!(pending.is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_member() {
        let service = setup().await;

        let err = service.get("ghost").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
