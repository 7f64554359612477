//! # Registration Ledger
//!
//! The capacity-bounded registration state machine. This is the one part
//! of the backend with a genuine concurrency hazard: many handlers may
//! race to register members for the same event, and the invariant
//!
//! ```text
//! count(registered rows for event E) <= capacity(E)
//! ```
//!
//! must hold at every instant, not just after the dust settles.
//!
//! ## Pair State Machine
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │            One (member, event) pair, one row forever                 │
//! │                                                                      │
//! │              register                 cancel                         │
//! │   Absent ──────────────► Registered ──────────► Cancelled            │
//! │                              ▲                      │                │
//! │                              └──────────────────────┘                │
//! │                                register (seat free)                  │
//! │                                                                      │
//! │   Rows are never deleted; cancellation flips the status column.      │
//! │   UNIQUE(member_id, event_id) caps the pair at one row.              │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## How the Capacity Check Stays Race-Free
//!
//! Each write statement embeds the seat count *inside itself* as a
//! subquery guard:
//!
//! ```sql
//! UPDATE registrations SET status = 'registered'
//! WHERE ... AND (SELECT COUNT(*) ...) < (SELECT capacity ...)
//! ```
//!
//! A single SQL statement is atomic: SQLite evaluates the guard and
//! applies the write under the same write lock, so no other writer can
//! change the count in between. Counting the rows and then deciding in
//! application code would reintroduce the race — two callers could both
//! read `count < capacity` and both commit. The count is recomputed from
//! the relation on every attempt; nothing is cached.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use clubhouse_core::{Registration, RegistrationStatus};

/// Repository owning the registration relation and its transitions.
///
/// Callers are expected to have checked member approval already (the
/// service layer does); the ledger itself only knows about rows, seats
/// and capacity.
#[derive(Debug, Clone)]
pub struct RegistrationRepository {
    pool: SqlitePool,
}

impl RegistrationRepository {
    /// Creates a new RegistrationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RegistrationRepository { pool }
    }

    /// Registers a member for an event.
    ///
    /// Runs as one transaction containing two guarded writes:
    ///
    /// 1. Flip an existing `cancelled` row back to `registered`, guarded
    ///    by `registered count < capacity`.
    /// 2. If nothing flipped, insert a fresh row under the same guard
    ///    plus `NOT EXISTS` for the pair.
    ///
    /// If neither statement writes, the failure is classified from the
    /// same transaction: unknown event, already registered, or full.
    ///
    /// ## Returns
    /// * `Ok(RegistrationStatus::Registered)` - Seat claimed
    /// * `Err(DbError::NotFound)` - Event (or member) does not exist
    /// * `Err(DbError::AlreadyRegistered)` - Pair already has a live row,
    ///   including the case where a racing insert tripped the UNIQUE
    ///   constraint
    /// * `Err(DbError::EventFull)` - No free seat; nothing written
    pub async fn register(
        &self,
        member_id: &str,
        event_id: i64,
    ) -> DbResult<RegistrationStatus> {
        debug!(member_id = %member_id, event_id = event_id, "Registering for event");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        // Re-claim a cancelled seat. The count guard and the status flip
        // are one statement, hence one atomic unit.
        let flipped = sqlx::query(
            r#"
            UPDATE registrations
            SET status = 'registered', updated_at = ?3
            WHERE member_id = ?1
              AND event_id = ?2
              AND status = 'cancelled'
              AND (SELECT COUNT(*) FROM registrations live
                   WHERE live.event_id = ?2 AND live.status = 'registered')
                  < (SELECT capacity FROM events WHERE id = ?2)
            "#,
        )
        .bind(member_id)
        .bind(event_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if flipped.rows_affected() > 0 {
            tx.commit().await?;
            return Ok(RegistrationStatus::Registered);
        }

        // First registration for this pair. The same count guard applies;
        // NOT EXISTS keeps this from double-inserting, and the UNIQUE
        // constraint backstops a racing insert that slipped past it.
        let inserted = sqlx::query(
            r#"
            INSERT INTO registrations (member_id, event_id, status, created_at, updated_at)
            SELECT ?1, ?2, 'registered', ?3, ?3
            WHERE (SELECT COUNT(*) FROM registrations live
                   WHERE live.event_id = ?2 AND live.status = 'registered')
                  < (SELECT capacity FROM events WHERE id = ?2)
              AND NOT EXISTS (
                  SELECT 1 FROM registrations
                  WHERE member_id = ?1 AND event_id = ?2
              )
            "#,
        )
        .bind(member_id)
        .bind(event_id)
        .bind(now)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(result) if result.rows_affected() > 0 => {
                tx.commit().await?;
                Ok(RegistrationStatus::Registered)
            }
            Ok(_) => {
                // Neither statement wrote. The transaction still holds the
                // write lock from the UPDATE, so these reads are consistent
                // with the failed guards. The transaction rolls back on
                // drop; there is nothing to undo.
                let capacity = sqlx::query_scalar::<_, i64>(
                    "SELECT capacity FROM events WHERE id = ?1",
                )
                .bind(event_id)
                .fetch_optional(&mut *tx)
                .await?;

                if capacity.is_none() {
                    return Err(DbError::not_found("Event", event_id));
                }

                let existing = sqlx::query_scalar::<_, RegistrationStatus>(
                    "SELECT status FROM registrations WHERE member_id = ?1 AND event_id = ?2",
                )
                .bind(member_id)
                .bind(event_id)
                .fetch_optional(&mut *tx)
                .await?;

                match existing {
                    Some(RegistrationStatus::Registered) => Err(DbError::AlreadyRegistered {
                        member_id: member_id.to_string(),
                        event_id,
                    }),
                    // Absent pair or a cancelled row that failed the
                    // count guard: every seat is taken.
                    _ => Err(DbError::EventFull { event_id }),
                }
            }
            Err(err) => {
                if let sqlx::Error::Database(db_err) = &err {
                    let msg = db_err.message();
                    if msg.contains("UNIQUE constraint failed") {
                        // A concurrent insert won the pair; report it the
                        // same way as an ordinary duplicate.
                        return Err(DbError::AlreadyRegistered {
                            member_id: member_id.to_string(),
                            event_id,
                        });
                    }
                    if msg.contains("FOREIGN KEY constraint failed") {
                        // The event guard already proved the event exists,
                        // so the dangling reference is the member.
                        return Err(DbError::not_found("Member", member_id));
                    }
                }
                Err(err.into())
            }
        }
    }

    /// Cancels a registration.
    ///
    /// Idempotent by design: there is no status filter, so cancelling an
    /// already-cancelled row touches one row and succeeds with the same
    /// result. The row is never deleted.
    ///
    /// ## Returns
    /// * `Ok(RegistrationStatus::Cancelled)` - Row is now cancelled
    /// * `Err(DbError::NotFound)` - No row exists for the pair
    pub async fn cancel(
        &self,
        member_id: &str,
        event_id: i64,
    ) -> DbResult<RegistrationStatus> {
        debug!(member_id = %member_id, event_id = event_id, "Cancelling registration");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE registrations
            SET status = 'cancelled', updated_at = ?3
            WHERE member_id = ?1 AND event_id = ?2
            "#,
        )
        .bind(member_id)
        .bind(event_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(
                "Registration",
                format!("{member_id}/{event_id}"),
            ));
        }

        Ok(RegistrationStatus::Cancelled)
    }

    /// Looks up the registration status for a pair.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No row exists for the pair
    pub async fn status_of(
        &self,
        member_id: &str,
        event_id: i64,
    ) -> DbResult<RegistrationStatus> {
        let status = sqlx::query_scalar::<_, RegistrationStatus>(
            "SELECT status FROM registrations WHERE member_id = ?1 AND event_id = ?2",
        )
        .bind(member_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        status.ok_or_else(|| {
            DbError::not_found("Registration", format!("{member_id}/{event_id}"))
        })
    }

    /// Fetches the full registration row for a pair, if any.
    pub async fn get(
        &self,
        member_id: &str,
        event_id: i64,
    ) -> DbResult<Option<Registration>> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            SELECT id, member_id, event_id, status, created_at, updated_at
            FROM registrations
            WHERE member_id = ?1 AND event_id = ?2
            "#,
        )
        .bind(member_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Counts live registrations for an event.
    ///
    /// Always derived from the relation; the ledger keeps no counters.
    pub async fn registered_count(&self, event_id: i64) -> DbResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM registrations WHERE event_id = ?1 AND status = 'registered'",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
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
    use clubhouse_core::{MemberStatus, NewEvent, NewMember};

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    /// Creates an event with the given capacity, with its reference rows.
    async fn seed_event(db: &Database, capacity: i64) -> i64 {
        let location = db
            .reference()
            .add_location("Main Hall", "Bus 12 to Park St", "stage")
            .await
            .unwrap();
        let event_type = db
            .reference()
            .add_event_type("rehearsal", "Weekly rehearsal")
            .await
            .unwrap();

        db.events()
            .insert(&NewEvent {
                title: "Spring rehearsal".to_string(),
                description: String::new(),
                event_type,
                event_date: Utc::now() + Duration::days(7),
                location,
                capacity,
            })
            .await
            .unwrap()
    }

    /// Creates an approved member and returns its id.
    async fn seed_member(db: &Database, n: u32) -> String {
        let member = db
            .members()
            .insert(&NewMember {
                full_name: format!("Member {n}"),
                email: format!("member{n}@example.com"),
                phone: format!("+1555010{n:04}"),
            })
            .await
            .unwrap();
        db.members()
            .update_status(&member.id, MemberStatus::Approved)
            .await
            .unwrap();
        member.id
    }

    #[tokio::test]
    async fn test_register_and_status() {
        let db = setup().await;
        let event = seed_event(&db, 10).await;
        let member = seed_member(&db, 1).await;
        let ledger = db.registrations();

        let status = ledger.register(&member, event).await.unwrap();
        assert_eq!(status, RegistrationStatus::Registered);

        let status = ledger.status_of(&member, event).await.unwrap();
        assert_eq!(status, RegistrationStatus::Registered);
        assert_eq!(ledger.registered_count(event).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_unknown_event() {
        let db = setup().await;
        let member = seed_member(&db, 1).await;

        let err = db.registrations().register(&member, 999).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Event"));
    }

    #[tokio::test]
    async fn test_duplicate_registration_rejected() {
        let db = setup().await;
        let event = seed_event(&db, 10).await;
        let member = seed_member(&db, 1).await;
        let ledger = db.registrations();

        ledger.register(&member, event).await.unwrap();

        // Both repeat attempts fail the same way; no second row appears.
        for _ in 0..2 {
            let err = ledger.register(&member, event).await.unwrap_err();
            assert!(matches!(err, DbError::AlreadyRegistered { .. }));
        }
        assert_eq!(ledger.registered_count(event).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_event_full() {
        let db = setup().await;
        let event = seed_event(&db, 1).await;
        let first = seed_member(&db, 1).await;
        let second = seed_member(&db, 2).await;
        let ledger = db.registrations();

        ledger.register(&first, event).await.unwrap();

        let err = ledger.register(&second, event).await.unwrap_err();
        assert!(matches!(err, DbError::EventFull { .. }));

        // The losing attempt left no row behind.
        assert!(ledger.get(&second, event).await.unwrap().is_none());
        assert_eq!(ledger.registered_count(event).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_cancel_is_idempotent() {
        let db = setup().await;
        let event = seed_event(&db, 10).await;
        let member = seed_member(&db, 1).await;
        let ledger = db.registrations();

        ledger.register(&member, event).await.unwrap();

        let status = ledger.cancel(&member, event).await.unwrap();
        assert_eq!(status, RegistrationStatus::Cancelled);

        // Cancelling again succeeds with the same result.
        let status = ledger.cancel(&member, event).await.unwrap();
        assert_eq!(status, RegistrationStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_cancel_without_row() {
        let db = setup().await;
        let event = seed_event(&db, 10).await;
        let member = seed_member(&db, 1).await;

        let err = db.registrations().cancel(&member, event).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Registration"));
    }

    #[tokio::test]
    async fn test_status_without_row() {
        let db = setup().await;
        let event = seed_event(&db, 10).await;
        let member = seed_member(&db, 1).await;

        let err = db.registrations().status_of(&member, event).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_reregistration_reuses_row() {
        let db = setup().await;
        let event = seed_event(&db, 10).await;
        let member = seed_member(&db, 1).await;
        let ledger = db.registrations();

        ledger.register(&member, event).await.unwrap();
        let first_row = ledger.get(&member, event).await.unwrap().unwrap();

        ledger.cancel(&member, event).await.unwrap();
        ledger.register(&member, event).await.unwrap();

        let second_row = ledger.get(&member, event).await.unwrap().unwrap();
        assert_eq!(first_row.id, second_row.id);
        assert_eq!(second_row.status, RegistrationStatus::Registered);
    }

    #[tokio::test]
    async fn test_reclaim_blocked_when_full() {
        let db = setup().await;
        let event = seed_event(&db, 1).await;
        let first = seed_member(&db, 1).await;
        let second = seed_member(&db, 2).await;
        let ledger = db.registrations();

        ledger.register(&first, event).await.unwrap();
        ledger.cancel(&first, event).await.unwrap();
        ledger.register(&second, event).await.unwrap();

        // The cancelled row cannot flip back while the seat is taken,
        // and it stays cancelled.
        let err = ledger.register(&first, event).await.unwrap_err();
        assert!(matches!(err, DbError::EventFull { .. }));
        assert_eq!(
            ledger.status_of(&first, event).await.unwrap(),
            RegistrationStatus::Cancelled
        );
    }

    #[tokio::test]
    async fn test_cancel_frees_seat() {
        let db = setup().await;
        let event = seed_event(&db, 2).await;
        let a = seed_member(&db, 1).await;
        let b = seed_member(&db, 2).await;
        let c = seed_member(&db, 3).await;
        let ledger = db.registrations();

        ledger.register(&a, event).await.unwrap();
        assert_eq!(ledger.registered_count(event).await.unwrap(), 1);

        ledger.register(&b, event).await.unwrap();
        assert_eq!(ledger.registered_count(event).await.unwrap(), 2);

        let err = ledger.register(&c, event).await.unwrap_err();
        assert!(matches!(err, DbError::EventFull { .. }));

        ledger.cancel(&a, event).await.unwrap();
        assert_eq!(ledger.registered_count(event).await.unwrap(), 1);

        ledger.register(&c, event).await.unwrap();
        assert_eq!(ledger.registered_count(event).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_exactly_one_winner_on_last_seat() {
        let db = setup().await;
        let event = seed_event(&db, 1).await;
        let first = seed_member(&db, 1).await;
        let second = seed_member(&db, 2).await;

        let mut handles = Vec::new();
        for member in [first, second] {
            let ledger = db.registrations();
            handles.push(tokio::spawn(async move {
                ledger.register(&member, event).await
            }));
        }

        let mut wins = 0;
        let mut full = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(RegistrationStatus::Registered) => wins += 1,
                Err(DbError::EventFull { .. }) => full += 1,
                other => panic!("unexpected outcome: {other:?}"),
            }
        }

        assert_eq!(wins, 1);
        assert_eq!(full, 1);
        assert_eq!(db.registrations().registered_count(event).await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_capacity_invariant_under_concurrency() {
        let db = setup().await;
        let capacity = 3;
        let racers = 10;
        let event = seed_event(&db, capacity).await;

        let mut members = Vec::new();
        for n in 0..racers {
            members.push(seed_member(&db, n).await);
        }

        let mut handles = Vec::new();
        for member in members {
            let ledger = db.registrations();
            handles.push(tokio::spawn(async move {
                ledger.register(&member, event).await
            }));
        }

        let mut wins = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(RegistrationStatus::Registered) => wins += 1,
                Err(DbError::EventFull { .. }) => {}
                other => panic!("unexpected outcome: {other:?}"),
            }
        }

        assert_eq!(wins as i64, capacity);
        assert_eq!(
            db.registrations().registered_count(event).await.unwrap(),
            capacity
        );
    }
}
