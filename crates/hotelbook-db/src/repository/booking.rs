//! # Booking Repository
//!
//! Persisted bookings, one row per confirmed submission.
//!
//! ## Column Mapping
//! ```text
//! BookingRecord.room_type  ──► room_type     (JSON object, as confirmed)
//! BookingRecord.add_ons    ──► add_ons       (JSON array of add-ons)
//! Money                    ──► INTEGER       (whole units)
//! DateTime<Utc>            ──► TEXT          (RFC 3339)
//! ```
//!
//! Prices are read back exactly as stored, never looked up again in the
//! fixed room type and add-on lists.
//!
//! Every write bumps the database's booking revision so open history feeds
//! re-read their snapshot.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use hotelbook_core::{
    AddOn, BookingId, BookingRecord, BookingStatus, Money, RoomType, StoredBooking,
};
use sqlx::SqlitePool;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};

const SELECT_BOOKING: &str = r#"
    SELECT
        id, user_id, item_id, item_name, item_location,
        check_in, check_out, nights, room_count, guest_count,
        room_type, add_ons, guest_name, guest_phone,
        room_unit_price, total, status, created_at
    FROM bookings
"#;

#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: String,
    user_id: String,
    item_id: String,
    item_name: String,
    item_location: String,
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    nights: i64,
    room_count: i64,
    guest_count: i64,
    room_type: String,
    add_ons: String,
    guest_name: String,
    guest_phone: String,
    room_unit_price: i64,
    total: i64,
    status: BookingStatus,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for StoredBooking {
    type Error = DbError;

    fn try_from(row: BookingRow) -> DbResult<Self> {
        let room_type: RoomType =
            serde_json::from_str(&row.room_type).map_err(|e| DbError::decode("room_type", e))?;
        let add_ons: Vec<AddOn> =
            serde_json::from_str(&row.add_ons).map_err(|e| DbError::decode("add_ons", e))?;

        Ok(StoredBooking {
            id: BookingId(row.id),
            user_id: row.user_id,
            record: BookingRecord {
                item_id: row.item_id,
                item_name: row.item_name,
                item_location: row.item_location,
                check_in: row.check_in,
                check_out: row.check_out,
                nights: to_u32("nights", row.nights)?,
                room_count: to_u32("room_count", row.room_count)?,
                guest_count: to_u32("guest_count", row.guest_count)?,
                room_type,
                add_ons,
                guest_name: row.guest_name,
                guest_phone: row.guest_phone,
                room_unit_price: Money::from_units(row.room_unit_price),
                total: Money::from_units(row.total),
                status: row.status,
                created_at: row.created_at,
            },
        })
    }
}

fn to_u32(column: &str, value: i64) -> DbResult<u32> {
    u32::try_from(value).map_err(|e| DbError::decode(column, e))
}

/// Repository for booking database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.bookings();
///
/// let id = repo.insert("user-1", &record).await?;
/// let history = repo.list_for_user("user-1").await?;
/// ```
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
    changes: Arc<watch::Sender<u64>>,
}

impl BookingRepository {
    /// Creates a new BookingRepository.
    pub fn new(pool: SqlitePool, changes: Arc<watch::Sender<u64>>) -> Self {
        BookingRepository { pool, changes }
    }

    fn notify(&self) {
        self.changes.send_modify(|revision| *revision += 1);
    }

    /// Stores a booking for `user_id` and returns its new id.
    pub async fn insert(&self, user_id: &str, record: &BookingRecord) -> DbResult<BookingId> {
        let id = Uuid::new_v4().to_string();
        let room_type = serde_json::to_string(&record.room_type)
            .map_err(|e| DbError::Internal(e.to_string()))?;
        let add_ons =
            serde_json::to_string(&record.add_ons).map_err(|e| DbError::Internal(e.to_string()))?;

        debug!(id = %id, user_id = %user_id, item_id = %record.item_id, "Inserting booking");

        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, user_id, item_id, item_name, item_location,
                check_in, check_out, nights, room_count, guest_count,
                room_type, add_ons, guest_name, guest_phone,
                room_unit_price, total, status, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(&record.item_id)
        .bind(&record.item_name)
        .bind(&record.item_location)
        .bind(record.check_in)
        .bind(record.check_out)
        .bind(i64::from(record.nights))
        .bind(i64::from(record.room_count))
        .bind(i64::from(record.guest_count))
        .bind(room_type)
        .bind(add_ons)
        .bind(&record.guest_name)
        .bind(&record.guest_phone)
        .bind(record.room_unit_price.units())
        .bind(record.total.units())
        .bind(record.status)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        info!(id = %id, total = %record.total, "Booking stored");
        self.notify();

        Ok(BookingId(id))
    }

    /// Lists a user's bookings, newest first.
    ///
    /// Rows that no longer decode are logged and left out, so the rest of
    /// the history still loads.
    pub async fn list_for_user(&self, user_id: &str) -> DbResult<Vec<StoredBooking>> {
        let sql = format!(
            "{} WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
            SELECT_BOOKING
        );
        let rows: Vec<BookingRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        debug!(user_id = %user_id, count = rows.len(), "Loaded booking history");

        let mut bookings = Vec::with_capacity(rows.len());
        for row in rows {
            let id = row.id.clone();
            match StoredBooking::try_from(row) {
                Ok(booking) => bookings.push(booking),
                Err(e) => warn!(id = %id, error = %e, "Skipping unreadable booking row"),
            }
        }
        Ok(bookings)
    }

    /// Gets a booking by id.
    pub async fn get(&self, id: &BookingId) -> DbResult<Option<StoredBooking>> {
        let sql = format!("{} WHERE id = ?1", SELECT_BOOKING);
        let row: Option<BookingRow> = sqlx::query_as(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(StoredBooking::try_from).transpose()
    }

    /// Changes a booking's status.
    ///
    /// ## Errors
    /// `DbError::NotFound` if no booking has this id.
    pub async fn update_status(&self, id: &BookingId, status: BookingStatus) -> DbResult<()> {
        let result = sqlx::query("UPDATE bookings SET status = ?1 WHERE id = ?2")
            .bind(status)
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Booking", id.as_str()));
        }

        info!(id = %id, status = status.label(), "Booking status updated");
        self.notify();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use chrono::{Duration, TimeZone};
    use hotelbook_core::Multiplier;

    fn record(item_id: &str, location: &str, created_at: DateTime<Utc>) -> BookingRecord {
        let check_in = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        BookingRecord {
            item_id: item_id.to_string(),
            item_name: format!("Hotel {}", item_id),
            item_location: location.to_string(),
            check_in,
            check_out: check_in + Duration::days(2),
            nights: 2,
            room_count: 1,
            guest_count: 2,
            room_type: RoomType::deluxe(),
            add_ons: vec![AddOn::parking(), AddOn::spa()],
            guest_name: "Lerato Mokoena".to_string(),
            guest_phone: "0831234567".to_string(),
            room_unit_price: Money::from_units(1560),
            total: Money::from_units(4320),
            status: BookingStatus::Confirmed,
            created_at,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.bookings();
        let created = Utc.with_ymd_and_hms(2024, 2, 1, 9, 30, 0).unwrap();
        let original = record("1", "Cape Town", created);

        let id = repo.insert("user-1", &original).await.unwrap();
        let stored = repo.get(&id).await.unwrap().unwrap();

        assert_eq!(stored.id, id);
        assert_eq!(stored.user_id, "user-1");
        assert_eq!(stored.record, original);
    }

    #[tokio::test]
    async fn test_list_for_user_newest_first() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.bookings();
        let t0 = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();

        repo.insert("user-1", &record("1", "Cape Town", t0)).await.unwrap();
        repo.insert("user-1", &record("2", "Durban", t0 + Duration::hours(2)))
            .await
            .unwrap();
        repo.insert("user-2", &record("3", "Durban", t0 + Duration::hours(1)))
            .await
            .unwrap();

        let history = repo.list_for_user("user-1").await.unwrap();
        let items: Vec<&str> = history.iter().map(|b| b.record.item_id.as_str()).collect();
        assert_eq!(items, vec!["2", "1"]);
        assert!(repo.list_for_user("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_status() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.bookings();
        let id = repo
            .insert("user-1", &record("1", "Cape Town", Utc::now()))
            .await
            .unwrap();

        repo.update_status(&id, BookingStatus::Cancelled).await.unwrap();
        let stored = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.record.status, BookingStatus::Cancelled);

        let missing = BookingId("missing".to_string());
        assert!(matches!(
            repo.update_status(&missing, BookingStatus::Completed).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_writes_bump_revision() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut rx = db.subscribe_bookings();

        let id = db
            .bookings()
            .insert("user-1", &record("1", "Cape Town", Utc::now()))
            .await
            .unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 1);

        db.bookings()
            .update_status(&id, BookingStatus::Completed)
            .await
            .unwrap();
        assert_eq!(*rx.borrow_and_update(), 2);
    }

    #[tokio::test]
    async fn test_snapshot_keeps_prices_as_confirmed() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.bookings();

        let mut original = record("1", "Cape Town", Utc::now());
        let mut spa = AddOn::spa();
        spa.price_per_night = Money::from_units(650);
        original.add_ons = vec![AddOn::breakfast(), spa];
        original.room_type = RoomType {
            id: "family".to_string(),
            name: "Family Room".to_string(),
            multiplier: Multiplier::from_bps(15_000),
        };

        let id = repo.insert("user-1", &original).await.unwrap();
        let stored = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.record, original);
        assert_eq!(stored.record.add_ons[1].price_per_night.units(), 650);

        let history = repo.list_for_user("user-1").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].record.room_type.name, "Family Room");
        assert_eq!(history[0].record.room_type.multiplier.bps(), 15_000);
    }

    #[tokio::test]
    async fn test_unreadable_row_skipped_in_history() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.bookings();
        let t0 = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();

        let good = repo.insert("user-1", &record("1", "Cape Town", t0)).await.unwrap();
        let bad = repo
            .insert("user-1", &record("2", "Durban", t0 + Duration::hours(1)))
            .await
            .unwrap();

        sqlx::query("UPDATE bookings SET room_type = 'family' WHERE id = ?1")
            .bind(bad.as_str())
            .execute(db.pool())
            .await
            .unwrap();

        let history = repo.list_for_user("user-1").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, good);

        assert!(matches!(
            repo.get(&bad).await,
            Err(DbError::Decode { column, .. }) if column == "room_type"
        ));
    }
}
