//! # Submission Flow
//!
//! Turns a quote into a persisted booking in two explicit steps.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  BookingQuote                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  flow.review(&quote) ──── first failed rule ──► Err(Validation)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PendingBooking (quote + breakdown) ──► shown for confirmation          │
//! │       │                                  │                              │
//! │       │ confirm                          └── cancel: just drop it       │
//! │       ▼                                                                 │
//! │  flow.confirm(pending)                                                  │
//! │       ├── already submitting? ──────────────► Err(SubmissionInFlight)   │
//! │       ├── record { status: confirmed, created_at: now }                 │
//! │       ├── gateway.submit(record) ─ failure ─► Err(Gateway) (verbatim)   │
//! │       ▼                                                                 │
//! │  Ok(BookingId)                                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no retry, no timeout and no cancellation once `confirm` has
//! started; those belong to the gateway.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::gateway::SubmissionGateway;
use crate::quote::{calculate, BookingQuote, QuoteBreakdown};
use crate::types::{BookingId, BookingRecord, BookingStatus};
use crate::validation::validate_booking;

// =============================================================================
// Pending Booking
// =============================================================================

/// A validated, priced quote awaiting the user's final confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingBooking {
    quote: BookingQuote,
    breakdown: QuoteBreakdown,
}

impl PendingBooking {
    pub fn quote(&self) -> &BookingQuote {
        &self.quote
    }

    pub fn breakdown(&self) -> &QuoteBreakdown {
        &self.breakdown
    }

    /// Builds the record handed to the gateway.
    pub fn to_record(&self, created_at: DateTime<Utc>) -> BookingRecord {
        let q = &self.quote;
        BookingRecord {
            item_id: q.item.id.clone(),
            item_name: q.item.name.clone(),
            item_location: q.item.location.clone(),
            check_in: q.date_range.check_in,
            check_out: q.date_range.check_out,
            nights: self.breakdown.nights,
            room_count: q.room_count,
            guest_count: q.guest_count,
            room_type: q.room_type.clone(),
            add_ons: q.add_ons.clone(),
            guest_name: q.guest_name.trim().to_string(),
            guest_phone: q.guest_phone.trim().to_string(),
            room_unit_price: self.breakdown.room_unit_price,
            total: self.breakdown.grand_total,
            status: BookingStatus::Confirmed,
            created_at,
        }
    }
}

// =============================================================================
// Booking Flow
// =============================================================================

/// Review → confirm → persist, against an injected gateway.
///
/// ## Usage
/// ```rust,ignore
/// let flow = BookingFlow::new(db.gateway(Some(user_id)));
///
/// let pending = flow.review(&quote)?;          // show pending.breakdown()
/// let booking_id = flow.confirm(pending).await?;
/// ```
#[derive(Debug)]
pub struct BookingFlow<G> {
    gateway: G,
    in_flight: AtomicBool,
}

impl<G: SubmissionGateway> BookingFlow<G> {
    pub fn new(gateway: G) -> Self {
        BookingFlow {
            gateway,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// True while a `confirm` call is awaiting the gateway.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validates and prices a quote for the confirmation step.
    pub fn review(&self, quote: &BookingQuote) -> CoreResult<PendingBooking> {
        if let Err(e) = validate_booking(quote) {
            debug!(item_id = %quote.item.id, error = %e, "Booking rejected by validator");
            return Err(e.into());
        }

        let breakdown = calculate(quote);
        debug!(
            item_id = %quote.item.id,
            nights = breakdown.nights,
            total = %breakdown.grand_total,
            "Booking ready for confirmation"
        );

        Ok(PendingBooking {
            quote: quote.clone(),
            breakdown,
        })
    }

    /// Submits a confirmed booking exactly once.
    pub async fn confirm(&self, pending: PendingBooking) -> CoreResult<BookingId> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        let record = pending.to_record(Utc::now());
        info!(
            item_id = %record.item_id,
            rooms = record.room_count,
            total = %record.total,
            "Submitting booking"
        );

        match self.gateway.submit(&record).await {
            Ok(id) => {
                info!(booking_id = %id, "Booking confirmed");
                Ok(id)
            }
            Err(e) => {
                warn!(item_id = %record.item_id, error = %e, "Booking submission failed");
                Err(CoreError::Gateway(e))
            }
        }
    }
}

/// Holds the in-flight flag for the duration of one submission.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> CoreResult<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CoreError::SubmissionInFlight)?;
        Ok(InFlightGuard { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::error::{GatewayError, SubmissionError, ValidationError};
    use crate::types::{AddOn, DateRange, RoomType};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    /// Records every submission and answers with a fixed result.
    #[derive(Default)]
    struct FakeGateway {
        submitted: Mutex<Vec<BookingRecord>>,
        fail_with: Option<GatewayError>,
    }

    #[async_trait]
    impl SubmissionGateway for FakeGateway {
        async fn submit(&self, record: &BookingRecord) -> Result<BookingId, SubmissionError> {
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            let mut submitted = self.submitted.lock().unwrap();
            submitted.push(record.clone());
            Ok(BookingId(format!("booking-{}", submitted.len())))
        }
    }

    /// Blocks inside `submit` until released.
    struct BlockingGateway {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl SubmissionGateway for BlockingGateway {
        async fn submit(&self, _record: &BookingRecord) -> Result<BookingId, SubmissionError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(BookingId("slow".to_string()))
        }
    }

    fn valid_quote() -> BookingQuote {
        let dates = DateRange::from_dates(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 18).unwrap(),
        );
        BookingQuote::new(StaticCatalog::hotels().remove(0), dates, RoomType::deluxe())
            .with_guests(2)
            .with_add_on(AddOn::breakfast())
            .with_guest("  Sipho Dlamini ", "0821234567")
    }

    #[test]
    fn test_review_rejects_invalid_quote() {
        let flow = BookingFlow::new(FakeGateway::default());
        let quote = valid_quote().with_guest("Sipho", "12345");

        let err = flow.review(&quote).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidGuestPhone { min_length: 10 })
        ));
    }

    #[test]
    fn test_review_prices_quote() {
        let flow = BookingFlow::new(FakeGateway::default());
        let pending = flow.review(&valid_quote()).unwrap();

        assert_eq!(pending.breakdown().nights, 3);
        assert_eq!(pending.breakdown().room_unit_price.units(), 1560);
        assert_eq!(pending.breakdown().grand_total.units(), 4680 + 450);
        assert_eq!(pending.quote(), &valid_quote());
    }

    #[tokio::test]
    async fn test_confirm_submits_confirmed_record() {
        let flow = BookingFlow::new(FakeGateway::default());
        let pending = flow.review(&valid_quote()).unwrap();

        let id = flow.confirm(pending).await.unwrap();
        assert_eq!(id, BookingId("booking-1".to_string()));
        assert!(!flow.is_submitting());

        let submitted = flow.gateway().submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        let record = &submitted[0];
        assert_eq!(record.status, BookingStatus::Confirmed);
        assert_eq!(record.item_name, "Sunset Resort");
        assert_eq!(record.guest_name, "Sipho Dlamini");
        assert_eq!(record.total.units(), 5130);
        assert_eq!(record.add_ons, vec![AddOn::breakfast()]);
    }

    #[tokio::test]
    async fn test_gateway_error_surfaces_verbatim() {
        let flow = BookingFlow::new(FakeGateway {
            fail_with: Some(GatewayError::NotAuthenticated),
            ..Default::default()
        });
        let pending = flow.review(&valid_quote()).unwrap();

        let err = flow.confirm(pending).await.unwrap_err();
        assert!(matches!(err, CoreError::Gateway(GatewayError::NotAuthenticated)));
        assert_eq!(err.to_string(), "Not signed in");
        assert!(!flow.is_submitting(), "flag released after failure");
    }

    #[tokio::test]
    async fn test_second_confirm_rejected_while_in_flight() {
        let gateway = Arc::new(BlockingGateway {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let flow = Arc::new(BookingFlow::new(gateway.clone()));
        let pending = flow.review(&valid_quote()).unwrap();

        let first = {
            let flow = flow.clone();
            let pending = pending.clone();
            tokio::spawn(async move { flow.confirm(pending).await })
        };

        gateway.entered.notified().await;
        assert!(flow.is_submitting());

        let second = flow.confirm(pending.clone()).await;
        assert!(matches!(second, Err(CoreError::SubmissionInFlight)));

        gateway.release.notify_one();
        let id = first.await.unwrap().unwrap();
        assert_eq!(id.as_str(), "slow");
        assert!(!flow.is_submitting());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let flow = BookingFlow::new(FakeGateway::default());
        let pending = flow.review(&valid_quote()).unwrap();
        let record = pending.to_record(Utc::now());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "confirmed");
        assert_eq!(json["roomCount"], 1);
        assert_eq!(json["itemLocation"], "Cape Town");
    }
}
