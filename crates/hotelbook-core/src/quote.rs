//! # Quote Calculator
//!
//! Prices a booking selection: nights, room unit price and totals.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  nights          = max(1, round_half_up((check_out − check_in) / 1 day))│
//! │  room_unit_price = round(base × multiplier)          (display only)     │
//! │  room_total      = round(base × multiplier × rooms × nights)  ◄─ once   │
//! │  add_ons_total   = Σ add_on.price_per_night × nights                    │
//! │  grand_total     = room_total + add_ons_total                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculator never fails and has no side effects. The booking form calls
//! it on every input change, before validation, so out-of-range counts and
//! dates saturate at [`Money::MAX`] instead of overflowing. Each add-on id is
//! charged once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{AddOn, BookableItem, DateRange, RoomType};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

// =============================================================================
// Nights
// =============================================================================

/// Billable nights between two instants.
///
/// Fractional days (time-of-day components) round half-up; the result is
/// never below one, even for an inverted range.
pub fn nights_between(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> u32 {
    let seconds = (check_out - check_in).num_seconds();
    if seconds <= 0 {
        return 1;
    }
    let days = (seconds + SECONDS_PER_DAY / 2) / SECONDS_PER_DAY;
    days.clamp(1, u32::MAX as i64) as u32
}

// =============================================================================
// Booking Quote
// =============================================================================

/// The in-progress booking form.
///
/// Owned by the caller and recomputed on every change; discarded once the
/// booking is submitted or cancelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuote {
    pub item: BookableItem,
    pub date_range: DateRange,
    pub room_count: u32,
    pub guest_count: u32,
    pub room_type: RoomType,
    /// Selected add-ons; ids are unique.
    pub add_ons: Vec<AddOn>,
    pub guest_name: String,
    pub guest_phone: String,
}

impl BookingQuote {
    /// Starts a quote with one room, one guest and no add-ons.
    pub fn new(item: BookableItem, date_range: DateRange, room_type: RoomType) -> Self {
        BookingQuote {
            item,
            date_range,
            room_count: 1,
            guest_count: 1,
            room_type,
            add_ons: Vec::new(),
            guest_name: String::new(),
            guest_phone: String::new(),
        }
    }

    /// Builds a quote from the ids a front end sends back.
    ///
    /// ## Errors
    /// - [`CoreError::ItemNotFound`] if `item_id` is not in `items`
    /// - [`CoreError::UnknownRoomType`] / [`CoreError::UnknownAddOn`] for ids
    ///   outside the fixed lists
    pub fn from_selection(
        items: &[BookableItem],
        item_id: &str,
        date_range: DateRange,
        room_type_id: &str,
        add_on_ids: &[&str],
    ) -> CoreResult<Self> {
        let item = items
            .iter()
            .find(|i| i.id == item_id)
            .cloned()
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;
        let room_type = RoomType::find(room_type_id)
            .ok_or_else(|| CoreError::UnknownRoomType(room_type_id.to_string()))?;

        let mut quote = BookingQuote::new(item, date_range, room_type);
        for id in add_on_ids {
            let add_on =
                AddOn::find(id).ok_or_else(|| CoreError::UnknownAddOn(id.to_string()))?;
            quote = quote.with_add_on(add_on);
        }
        Ok(quote)
    }

    pub fn with_dates(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    pub fn with_rooms(mut self, room_count: u32) -> Self {
        self.room_count = room_count;
        self
    }

    pub fn with_guests(mut self, guest_count: u32) -> Self {
        self.guest_count = guest_count;
        self
    }

    pub fn with_guest(mut self, name: impl Into<String>, phone: impl Into<String>) -> Self {
        self.guest_name = name.into();
        self.guest_phone = phone.into();
        self
    }

    /// Adds an add-on unless one with the same id is already selected.
    pub fn with_add_on(mut self, add_on: AddOn) -> Self {
        if !self.has_add_on(&add_on.id) {
            self.add_ons.push(add_on);
        }
        self
    }

    /// Selects or deselects an add-on, the way the booking form's chips do.
    ///
    /// Returns `true` if the add-on is selected afterwards.
    pub fn toggle_add_on(&mut self, add_on: AddOn) -> bool {
        if let Some(pos) = self.add_ons.iter().position(|a| a.id == add_on.id) {
            self.add_ons.remove(pos);
            false
        } else {
            self.add_ons.push(add_on);
            true
        }
    }

    pub fn has_add_on(&self, id: &str) -> bool {
        self.add_ons.iter().any(|a| a.id == id)
    }

    /// Guest ceiling for the current room count.
    pub fn max_guests(&self) -> u32 {
        self.room_count.saturating_mul(crate::MAX_GUESTS_PER_ROOM)
    }

    pub fn nights(&self) -> u32 {
        self.date_range.nights()
    }

    /// Shorthand for [`calculate`].
    pub fn breakdown(&self) -> QuoteBreakdown {
        calculate(self)
    }
}

// =============================================================================
// Breakdown
// =============================================================================

/// Derived prices for a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBreakdown {
    pub nights: u32,
    /// Base price × multiplier, rounded for display.
    pub room_unit_price: Money,
    pub room_total: Money,
    pub add_ons_total: Money,
    pub grand_total: Money,
}

/// Computes nights, unit price and totals for a quote.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use hotelbook_core::catalog::StaticCatalog;
/// use hotelbook_core::quote::{calculate, BookingQuote};
/// use hotelbook_core::types::{AddOn, DateRange, RoomType};
///
/// let item = StaticCatalog::hotels().remove(0); // R1200/night
/// let dates = DateRange::from_dates(
///     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 18).unwrap(),
/// );
/// let quote = BookingQuote::new(item, dates, RoomType::standard())
///     .with_add_on(AddOn::breakfast())
///     .with_add_on(AddOn::spa());
///
/// let b = calculate(&quote);
/// assert_eq!(b.add_ons_total.units(), 1950);
/// assert_eq!(b.grand_total.units(), 5550);
/// ```
pub fn calculate(quote: &BookingQuote) -> QuoteBreakdown {
    let nights = quote.nights();
    let base = quote.item.base_price_per_night;
    let bps = quote.room_type.multiplier.bps();

    let room_unit_price = base.scale_bps(bps);
    let room_nights = quote.room_count as i64 * nights as i64;
    let room_total = base.mul_scaled(room_nights, bps);

    let mut add_ons_per_night = Money::zero();
    for (i, add_on) in quote.add_ons.iter().enumerate() {
        if quote.add_ons[..i].iter().any(|a| a.id == add_on.id) {
            continue;
        }
        add_ons_per_night = add_ons_per_night.saturating_add(add_on.price_per_night);
    }
    let add_ons_total = add_ons_per_night * nights;

    QuoteBreakdown {
        nights,
        room_unit_price,
        room_total,
        add_ons_total,
        grand_total: room_total.saturating_add(add_ons_total),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
