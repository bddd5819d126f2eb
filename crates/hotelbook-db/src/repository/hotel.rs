//! # Hotel Repository
//!
//! Storage for the bookable catalog.

use hotelbook_core::{BookableItem, Money};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

#[derive(Debug, sqlx::FromRow)]
struct HotelRow {
    id: String,
    name: String,
    location: String,
    rating: f64,
    base_price_per_night: i64,
    image_ref: String,
}

impl From<HotelRow> for BookableItem {
    fn from(row: HotelRow) -> Self {
        BookableItem {
            id: row.id,
            name: row.name,
            location: row.location,
            rating_out_of_five: row.rating,
            base_price_per_night: Money::from_units(row.base_price_per_night),
            image_ref: row.image_ref,
        }
    }
}

/// Repository for hotel database operations.
#[derive(Debug, Clone)]
pub struct HotelRepository {
    pool: SqlitePool,
}

impl HotelRepository {
    /// Creates a new HotelRepository.
    pub fn new(pool: SqlitePool) -> Self {
        HotelRepository { pool }
    }

    /// Inserts a hotel.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` if the id already exists.
    pub async fn insert(&self, item: &BookableItem) -> DbResult<()> {
        debug!(id = %item.id, name = %item.name, "Inserting hotel");

        sqlx::query(
            r#"
            INSERT INTO hotels (id, name, location, rating, base_price_per_night, image_ref)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.location)
        .bind(item.rating_out_of_five)
        .bind(item.base_price_per_night.units())
        .bind(&item.image_ref)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists every hotel in insertion order.
    pub async fn list(&self) -> DbResult<Vec<BookableItem>> {
        let rows: Vec<HotelRow> = sqlx::query_as(
            r#"
            SELECT id, name, location, rating, base_price_per_night, image_ref
            FROM hotels
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BookableItem::from).collect())
    }

    /// Gets a hotel by id.
    pub async fn get(&self, id: &str) -> DbResult<Option<BookableItem>> {
        let row: Option<HotelRow> = sqlx::query_as(
            r#"
            SELECT id, name, location, rating, base_price_per_night, image_ref
            FROM hotels
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BookableItem::from))
    }

    /// Counts hotels (used by the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hotels")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::{Database, DbConfig};
    use hotelbook_core::catalog::StaticCatalog;

    #[tokio::test]
    async fn test_insert_list_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.hotels();

        for hotel in StaticCatalog::hotels() {
            repo.insert(&hotel).await.unwrap();
        }

        assert_eq!(repo.count().await.unwrap(), 8);
        assert_eq!(repo.list().await.unwrap(), StaticCatalog::hotels());

        let safari = repo.get("4").await.unwrap().unwrap();
        assert_eq!(safari.name, "Safari Lodge");
        assert_eq!(safari.base_price_per_night.units(), 2200);
        assert!(repo.get("99").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let hotel = StaticCatalog::hotels().remove(0);

        db.hotels().insert(&hotel).await.unwrap();
        let err = db.hotels().insert(&hotel).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
