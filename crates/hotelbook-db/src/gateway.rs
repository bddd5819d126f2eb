//! # SQLite Gateway
//!
//! The local store seen through the hotelbook-core collaborator traits.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SqliteGateway { db, user_id }                                          │
//! │                                                                         │
//! │  CatalogProvider::fetch_catalog ──► hotels table                        │
//! │                                                                         │
//! │  SubmissionGateway::submit                                              │
//! │       ├── no user? ──────────────► GatewayError::NotAuthenticated       │
//! │       └── bookings.insert ───────► BookingId  (revision += 1)           │
//! │                                                                         │
//! │  BookingFeed::watch_bookings                                            │
//! │       watch::Receiver<u64> ──► WatchStream ──► then(list_for_user)      │
//! │       (current snapshot first, then one snapshot per revision)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The watch channel only keeps the latest revision, so a burst of writes
//! may collapse into a single snapshot. Each snapshot is complete, so
//! nothing is lost.

use async_trait::async_trait;
use chrono::Utc;
use futures_util::stream::{self, StreamExt};
use hotelbook_core::error::{CoreResult, GatewayResult};
use hotelbook_core::gateway::{BookingFeed, CatalogProvider, SnapshotStream, SubmissionGateway};
use hotelbook_core::validation::validate_review;
use hotelbook_core::{
    BookableItem, BookingId, BookingRecord, BookingStatus, GatewayError, Review, StoredBooking,
    SubmissionError,
};
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::DbError;
use crate::pool::Database;

/// Collaborator implementation backed by [`Database`], acting for one user.
#[derive(Debug, Clone)]
pub struct SqliteGateway {
    db: Database,
    user_id: Option<String>,
}

impl SqliteGateway {
    pub fn new(db: Database, user_id: Option<String>) -> Self {
        SqliteGateway { db, user_id }
    }

    /// The signed-in user, if any.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    fn require_user(&self) -> GatewayResult<&str> {
        self.user_id().ok_or(GatewayError::NotAuthenticated)
    }

    /// One-off read of the signed-in user's bookings, newest first.
    pub async fn bookings(&self) -> GatewayResult<Vec<StoredBooking>> {
        let user_id = self.require_user()?;
        Ok(self.db.bookings().list_for_user(user_id).await?)
    }

    /// Marks one of the signed-in user's bookings as cancelled.
    ///
    /// ## Errors
    /// - `NotAuthenticated` without a user
    /// - `Rejected` if the booking does not exist or belongs to someone else
    pub async fn cancel(&self, booking_id: &BookingId) -> GatewayResult<()> {
        let user_id = self.require_user()?;
        let bookings = self.db.bookings();

        match bookings.get(booking_id).await? {
            Some(stored) if stored.user_id == user_id => {}
            _ => {
                warn!(booking_id = %booking_id, "Cancel refused: no such booking for user");
                return Err(GatewayError::Rejected(format!(
                    "Booking {} not found",
                    booking_id
                )));
            }
        }

        bookings
            .update_status(booking_id, BookingStatus::Cancelled)
            .await?;
        info!(booking_id = %booking_id, "Booking cancelled");
        Ok(())
    }

    /// Validates and stores a review by the signed-in user.
    ///
    /// `author` is the display name shown with the review.
    pub async fn post_review(
        &self,
        hotel_id: &str,
        author: &str,
        rating: u8,
        text: &str,
    ) -> CoreResult<Review> {
        let text = validate_review(rating, text)?;
        let user_id = self.require_user()?;

        let reviews = self.db.reviews();
        if reviews
            .has_reviewed(hotel_id, user_id)
            .await
            .map_err(GatewayError::from)?
        {
            return Err(GatewayError::from(DbError::duplicate("review", hotel_id)).into());
        }

        let review = Review {
            id: Uuid::new_v4().to_string(),
            hotel_id: hotel_id.to_string(),
            user_id: user_id.to_string(),
            author: author.to_string(),
            rating,
            text,
            created_at: Utc::now(),
        };
        reviews.insert(&review).await.map_err(GatewayError::from)?;

        info!(hotel_id = %hotel_id, rating, "Review posted");
        Ok(review)
    }

    /// Reviews for a hotel, newest first.
    pub async fn reviews(&self, hotel_id: &str) -> GatewayResult<Vec<Review>> {
        Ok(self.db.reviews().list_for_hotel(hotel_id).await?)
    }
}

#[async_trait]
impl CatalogProvider for SqliteGateway {
    async fn fetch_catalog(&self) -> GatewayResult<Vec<BookableItem>> {
        let items = self.db.hotels().list().await?;
        debug!(count = items.len(), "Catalog loaded");
        Ok(items)
    }
}

#[async_trait]
impl SubmissionGateway for SqliteGateway {
    async fn submit(&self, record: &BookingRecord) -> Result<BookingId, SubmissionError> {
        let user_id = self.require_user()?;
        Ok(self.db.bookings().insert(user_id, record).await?)
    }
}

impl BookingFeed for SqliteGateway {
    fn watch_bookings(&self) -> SnapshotStream {
        let Some(user_id) = self.user_id.clone() else {
            return stream::once(async { Err(GatewayError::NotAuthenticated) }).boxed();
        };

        let bookings = self.db.bookings();
        WatchStream::new(self.db.subscribe_bookings())
            .then(move |revision| {
                let bookings = bookings.clone();
                let user_id = user_id.clone();
                async move {
                    debug!(revision, user_id = %user_id, "Refreshing booking snapshot");
                    bookings
                        .list_for_user(&user_id)
                        .await
                        .map_err(GatewayError::from)
                }
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbConfig;
    use chrono::NaiveDate;
    use hotelbook_core::catalog::StaticCatalog;
    use hotelbook_core::error::CoreError;
    use hotelbook_core::quote::BookingQuote;
    use hotelbook_core::submission::BookingFlow;
    use hotelbook_core::types::{AddOn, DateRange, RoomType};
    use hotelbook_core::ValidationError;
    use std::time::Duration;
    use tokio::time::timeout;

    async fn seeded_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        for hotel in StaticCatalog::hotels() {
            db.hotels().insert(&hotel).await.unwrap();
        }
        db
    }

    fn quote(item: BookableItem) -> BookingQuote {
        let dates = DateRange::from_dates(
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
        );
        BookingQuote::new(item, dates, RoomType::standard())
            .with_guests(2)
            .with_add_on(AddOn::breakfast())
            .with_guest("Naledi Khumalo", "0721234567")
    }

    async fn next_snapshot(stream: &mut SnapshotStream) -> Vec<StoredBooking> {
        timeout(Duration::from_secs(5), stream.next())
            .await
            .expect("snapshot within timeout")
            .expect("stream still open")
            .expect("snapshot loads")
    }

    #[tokio::test]
    async fn test_catalog_from_store() {
        let db = seeded_db().await;
        let items = db.gateway(None).fetch_catalog().await.unwrap();
        assert_eq!(items, StaticCatalog::hotels());
    }

    #[tokio::test]
    async fn test_submit_requires_user() {
        let db = seeded_db().await;
        let flow = BookingFlow::new(db.gateway(None));
        let pending = flow.review(&quote(StaticCatalog::hotels().remove(0))).unwrap();

        let err = flow.confirm(pending).await.unwrap_err();
        assert!(matches!(err, CoreError::Gateway(GatewayError::NotAuthenticated)));
        assert_eq!(err.to_string(), "Not signed in");
    }

    #[tokio::test]
    async fn test_booking_flow_end_to_end() {
        let db = seeded_db().await;
        let gateway = db.gateway(Some("user-1".to_string()));
        let items = gateway.fetch_catalog().await.unwrap();

        let flow = BookingFlow::new(gateway.clone());
        let pending = flow.review(&quote(items[1].clone())).unwrap();
        assert_eq!(pending.breakdown().grand_total.units(), 950 * 3 + 150 * 3);

        let id = flow.confirm(pending).await.unwrap();

        let history = gateway.bookings().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, id);
        assert_eq!(history[0].record.item_location, "Drakensberg");
        assert_eq!(history[0].record.status, BookingStatus::Confirmed);
        assert_eq!(history[0].record.total.units(), 3300);
    }

    #[tokio::test]
    async fn test_feed_emits_current_then_changes() {
        let db = seeded_db().await;
        let gateway = db.gateway(Some("user-1".to_string()));
        let mut feed = gateway.watch_bookings();

        assert!(next_snapshot(&mut feed).await.is_empty());

        let record = BookingFlow::new(gateway.clone())
            .review(&quote(StaticCatalog::hotels().remove(0)))
            .unwrap()
            .to_record(Utc::now());
        let id = gateway.submit(&record).await.unwrap();

        let snapshot = next_snapshot(&mut feed).await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, id);

        gateway.cancel(&id).await.unwrap();
        let snapshot = next_snapshot(&mut feed).await;
        assert_eq!(snapshot[0].record.status, BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_each_watch_starts_fresh() {
        let db = seeded_db().await;
        let gateway = db.gateway(Some("user-1".to_string()));
        let record = BookingFlow::new(gateway.clone())
            .review(&quote(StaticCatalog::hotels().remove(2)))
            .unwrap()
            .to_record(Utc::now());
        gateway.submit(&record).await.unwrap();

        let mut first = gateway.watch_bookings();
        assert_eq!(next_snapshot(&mut first).await.len(), 1);
        drop(first);

        let mut second = gateway.watch_bookings();
        assert_eq!(next_snapshot(&mut second).await.len(), 1);
    }

    #[tokio::test]
    async fn test_feed_without_user() {
        let db = seeded_db().await;
        let mut feed = db.gateway(None).watch_bookings();
        assert!(matches!(
            feed.next().await,
            Some(Err(GatewayError::NotAuthenticated))
        ));
        assert!(feed.next().await.is_none());
    }

    #[tokio::test]
    async fn test_cancel_other_users_booking_rejected() {
        let db = seeded_db().await;
        let owner = db.gateway(Some("user-1".to_string()));
        let record = BookingFlow::new(owner.clone())
            .review(&quote(StaticCatalog::hotels().remove(0)))
            .unwrap()
            .to_record(Utc::now());
        let id = owner.submit(&record).await.unwrap();

        let intruder = db.gateway(Some("user-2".to_string()));
        assert!(matches!(
            intruder.cancel(&id).await,
            Err(GatewayError::Rejected(_))
        ));
        assert_eq!(
            owner.bookings().await.unwrap()[0].record.status,
            BookingStatus::Confirmed
        );
    }

    #[tokio::test]
    async fn test_post_review() {
        let db = seeded_db().await;
        let gateway = db.gateway(Some("user-1".to_string()));

        let review = gateway
            .post_review("4", "Naledi", 5, "  Saw the big five! ")
            .await
            .unwrap();
        assert_eq!(review.text, "Saw the big five!");
        assert_eq!(gateway.reviews("4").await.unwrap(), vec![review]);

        let again = gateway.post_review("4", "Naledi", 4, "Again").await;
        assert!(matches!(again, Err(CoreError::Gateway(GatewayError::Rejected(_)))));

        let invalid = gateway.post_review("4", "Naledi", 0, "Bad rating").await;
        assert!(matches!(
            invalid,
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));

        let anonymous = db.gateway(None).post_review("4", "Anon", 3, "Nice").await;
        assert!(matches!(
            anonymous,
            Err(CoreError::Gateway(GatewayError::NotAuthenticated))
        ));
    }
}
