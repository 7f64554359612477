//! # Member Repository
//!
//! Database operations for club members: the member directory.
//!
//! From the registration ledger's point of view this is a read-only
//! collaborator; the only thing the ledger path ever asks it is
//! [`MemberRepository::is_approved`].

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use clubhouse_core::{Member, MemberStatus, NewMember};

/// Repository for member database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = MemberRepository::new(pool);
///
/// let member = repo.insert(&new_member).await?;
/// let approved = repo.is_approved(&member.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: SqlitePool,
}

const MEMBER_COLUMNS: &str = "id, full_name, email, phone, status, created_at, updated_at";

impl MemberRepository {
    /// Creates a new MemberRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MemberRepository { pool }
    }

    /// Inserts a new member with a generated id and `pending` status.
    ///
    /// ## Returns
    /// * `Ok(Member)` - Inserted member with generated fields
    /// * `Err(DbError::UniqueViolation)` - Email or phone already taken
    pub async fn insert(&self, new: &NewMember) -> DbResult<Member> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        debug!(id = %id, "Inserting member");

        let member = Member {
            id: id.clone(),
            full_name: new.full_name.trim().to_string(),
            email: new.email.trim().to_string(),
            phone: new.phone.trim().to_string(),
            status: MemberStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO members (id, full_name, email, phone, status, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&member.id)
        .bind(&member.full_name)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(member.status)
        .bind(member.created_at)
        .bind(member.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(member)
    }

    /// Gets a member by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Member))` - Member found
    /// * `Ok(None)` - Member not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    /// Lists all members, newest first.
    pub async fn list(&self) -> DbResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Lists members with the given approval status, newest first.
    pub async fn list_with_status(&self, status: MemberStatus) -> DbResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE status = ?1 ORDER BY created_at DESC"
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Updates a member's profile fields (not the approval status).
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Member doesn't exist
    /// * `Err(DbError::UniqueViolation)` - New email or phone taken
    pub async fn update_profile(&self, id: &str, new: &NewMember) -> DbResult<()> {
        debug!(id = %id, "Updating member profile");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE members
            SET full_name = ?2, email = ?3, phone = ?4, updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(new.full_name.trim())
        .bind(new.email.trim())
        .bind(new.phone.trim())
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Member", id));
        }

        Ok(())
    }

    /// Sets a member's approval status.
    pub async fn update_status(&self, id: &str, status: MemberStatus) -> DbResult<()> {
        debug!(id = %id, status = %status, "Updating member status");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE members SET status = ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(status)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Member", id));
        }

        Ok(())
    }

    /// Deletes a member.
    ///
    /// Members referenced by registration rows cannot be deleted; the
    /// foreign key surfaces as `DbError::ForeignKeyViolation`.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting member");

        let result = sqlx::query("DELETE FROM members WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Member", id));
        }

        Ok(())
    }

    /// Checks whether a member has been approved.
    ///
    /// ## Returns
    /// * `Ok(true)` - Member exists and status is `approved`
    /// * `Ok(false)` - Member exists with any other status
    /// * `Err(DbError::NotFound)` - Id is unknown
    pub async fn is_approved(&self, id: &str) -> DbResult<bool> {
        let status = sqlx::query_scalar::<_, MemberStatus>(
            "SELECT status FROM members WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match status {
            Some(status) => Ok(status == MemberStatus::Approved),
            None => Err(DbError::not_found("Member", id)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_member(email: &str, phone: &str) -> NewMember {
        NewMember {
            full_name: "Ada Lovelace".to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = setup().await;
        let repo = db.members();

        let member = repo
            .insert(&sample_member("ada@example.com", "+15550100200"))
            .await
            .unwrap();
        assert_eq!(member.status, MemberStatus::Pending);

        let fetched = repo.get_by_id(&member.id).await.unwrap().unwrap();
        assert_eq!(fetched.email, "ada@example.com");
        assert_eq!(fetched.status, MemberStatus::Pending);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = setup().await;
        let repo = db.members();

        repo.insert(&sample_member("dup@example.com", "+15550100201"))
            .await
            .unwrap();

        let err = repo
            .insert(&sample_member("dup@example.com", "+15550100202"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_is_approved_follows_status() {
        let db = setup().await;
        let repo = db.members();

        let member = repo
            .insert(&sample_member("pending@example.com", "+15550100203"))
            .await
            .unwrap();
        assert!(!repo.is_approved(&member.id).await.unwrap());

        repo.update_status(&member.id, MemberStatus::Approved)
            .await
            .unwrap();
        assert!(repo.is_approved(&member.id).await.unwrap());

        repo.update_status(&member.id, MemberStatus::Declined)
            .await
            .unwrap();
        assert!(!repo.is_approved(&member.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_is_approved_unknown_member() {
        let db = setup().await;

        let err = db.members().is_approved("no-such-id").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_with_status() {
        let db = setup().await;
        let repo = db.members();

        let a = repo
            .insert(&sample_member("a@example.com", "+15550100204"))
            .await
            .unwrap();
        repo.insert(&sample_member("b@example.com", "+15550100205"))
            .await
            .unwrap();

        repo.update_status(&a.id, MemberStatus::Approved).await.unwrap();

        let approved = repo.list_with_status(MemberStatus::Approved).await.unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, a.id);

        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_member() {
        let db = setup().await;
        let repo = db.members();

        let err = repo
            .update_profile("ghost", &sample_member("g@example.com", "+15550100206"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = repo.delete("ghost").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
