//! # Collaborator Traits
//!
//! The only way hotelbook-core reaches the outside world.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Caller (UI layer)                                                      │
//! │     │ owns and injects                                                  │
//! │     ▼                                                                   │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │ CatalogProvider  │  │ SubmissionGateway│  │ BookingFeed          │  │
//! │  │ fetch_catalog()  │  │ submit(record)   │  │ watch_bookings()     │  │
//! │  └────────┬─────────┘  └────────┬─────────┘  └──────────┬───────────┘  │
//! │           ▼                     ▼                       ▼              │
//! │   StaticCatalog,        SqliteGateway,            SqliteGateway,       │
//! │   SqliteGateway, fakes  fakes in tests            fakes in tests       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Implementations replace module-level backend singletons: whoever builds the
//! booking flow passes the collaborator in explicitly.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::error::{GatewayResult, SubmissionError};
use crate::types::{BookableItem, BookingId, BookingRecord, StoredBooking};

/// Full booking-history snapshots, newest booking first.
pub type SnapshotStream = BoxStream<'static, GatewayResult<Vec<StoredBooking>>>;

/// Supplies the list of bookable hotels.
///
/// Read-only; callers may cache the result.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch_catalog(&self) -> GatewayResult<Vec<BookableItem>>;
}

/// Persists confirmed bookings.
///
/// Called at most once per confirmed quote. Failures (network, missing
/// sign-in, rejected write) are returned as-is and never retried by the core.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn submit(&self, record: &BookingRecord) -> Result<BookingId, SubmissionError>;
}

/// Pushes booking history to the profile screen.
///
/// Each call to [`BookingFeed::watch_bookings`] starts a fresh stream: it
/// yields the current snapshot first, then one snapshot per change. Dropping
/// the stream unsubscribes.
pub trait BookingFeed: Send + Sync {
    fn watch_bookings(&self) -> SnapshotStream;
}

#[async_trait]
impl<T: CatalogProvider + ?Sized> CatalogProvider for Arc<T> {
    async fn fetch_catalog(&self) -> GatewayResult<Vec<BookableItem>> {
        (**self).fetch_catalog().await
    }
}

#[async_trait]
impl<T: SubmissionGateway + ?Sized> SubmissionGateway for Arc<T> {
    async fn submit(&self, record: &BookingRecord) -> Result<BookingId, SubmissionError> {
        (**self).submit(record).await
    }
}

impl<T: BookingFeed + ?Sized> BookingFeed for Arc<T> {
    fn watch_bookings(&self) -> SnapshotStream {
        (**self).watch_bookings()
    }
}
