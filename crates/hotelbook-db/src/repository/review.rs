//! # Review Repository
//!
//! Hotel reviews. A user may review a given hotel once; the table's
//! `UNIQUE (hotel_id, user_id)` index enforces it.

use chrono::{DateTime, Utc};
use hotelbook_core::Review;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: String,
    hotel_id: String,
    user_id: String,
    author: String,
    rating: i64,
    text: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = DbError;

    fn try_from(row: ReviewRow) -> DbResult<Self> {
        Ok(Review {
            id: row.id,
            hotel_id: row.hotel_id,
            user_id: row.user_id,
            author: row.author,
            rating: u8::try_from(row.rating).map_err(|e| DbError::decode("rating", e))?,
            text: row.text,
            created_at: row.created_at,
        })
    }
}

/// Repository for review database operations.
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    pool: SqlitePool,
}

impl ReviewRepository {
    /// Creates a new ReviewRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReviewRepository { pool }
    }

    /// Stores a review.
    ///
    /// ## Errors
    /// - `DbError::UniqueViolation` if this user already reviewed the hotel
    /// - `DbError::ForeignKeyViolation` if the hotel does not exist
    pub async fn insert(&self, review: &Review) -> DbResult<()> {
        debug!(hotel_id = %review.hotel_id, rating = review.rating, "Inserting review");

        sqlx::query(
            r#"
            INSERT INTO reviews (id, hotel_id, user_id, author, rating, text, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&review.id)
        .bind(&review.hotel_id)
        .bind(&review.user_id)
        .bind(&review.author)
        .bind(i64::from(review.rating))
        .bind(&review.text)
        .bind(review.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::UniqueViolation {
                field,
                value: review.hotel_id.clone(),
            },
            other => other,
        })?;

        Ok(())
    }

    /// Lists a hotel's reviews, newest first.
    pub async fn list_for_hotel(&self, hotel_id: &str) -> DbResult<Vec<Review>> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            r#"
            SELECT id, hotel_id, user_id, author, rating, text, created_at
            FROM reviews
            WHERE hotel_id = ?1
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Review::try_from).collect()
    }

    /// True if `user_id` has already reviewed `hotel_id`.
    pub async fn has_reviewed(&self, hotel_id: &str, user_id: &str) -> DbResult<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE hotel_id = ?1 AND user_id = ?2")
                .bind(hotel_id)
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count > 0)
    }
}
