//! # Domain Types
//!
//! Core domain types used throughout HotelBook.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  BookableItem   │   │    RoomType     │   │     AddOn       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, name       │   │  standard  1.0× │   │  breakfast  150 │       │
//! │  │  location       │   │  deluxe    1.3× │   │  parking    100 │       │
//! │  │  rating /5      │   │  suite     1.8× │   │  transfer   300 │       │
//! │  │  price / night  │   │  presid.   2.5× │   │  spa        500 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   DateRange     │   │  BookingRecord  │   │  BookingStatus  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  check_in       │   │  snapshot of a  │   │  Confirmed      │       │
//! │  │  check_out      │   │  confirmed      │   │  Upcoming       │       │
//! │  └─────────────────┘   │  quote          │   │  Completed      │       │
//! │                        └─────────────────┘   │  Cancelled      │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `BookingRecord` copies the hotel name, location, room type and add-on
//! prices at confirmation time, so history stays correct if the catalog
//! changes later.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::{Money, BPS_SCALE};
use crate::quote::nights_between;

// =============================================================================
// Multiplier
// =============================================================================

/// A price multiplier in basis points.
///
/// ## Why Basis Points?
/// 10000 bps = 1.0×, 13000 bps = 1.3×. Integer factors keep the quote
/// calculator exact; the decimal form is for display only.
///
/// Never below 1.0×: constructors and deserialization raise smaller factors
/// to [`Multiplier::ONE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export)]
pub struct Multiplier(u32);

impl Multiplier {
    /// 1.0×
    pub const ONE: Multiplier = Multiplier(BPS_SCALE as u32);

    /// Creates a multiplier from basis points, clamped to at least 1.0×.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        if bps < Self::ONE.0 {
            Self::ONE
        } else {
            Multiplier(bps)
        }
    }

    /// Creates a multiplier from a decimal factor (for convenience).
    ///
    /// Negative, NaN and sub-1.0 factors become 1.0×.
    pub fn from_decimal(factor: f64) -> Self {
        if factor.is_nan() || factor < 1.0 {
            return Self::ONE;
        }
        // `as` saturates at u32::MAX
        Self::from_bps((factor * BPS_SCALE as f64).round() as u32)
    }

    /// Returns the multiplier in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the multiplier as a decimal (for display only).
    #[inline]
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / BPS_SCALE as f64
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Multiplier::ONE
    }
}

impl<'de> Deserialize<'de> for Multiplier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        u32::deserialize(deserializer).map(Multiplier::from_bps)
    }
}

// =============================================================================
// Bookable Item
// =============================================================================

/// A hotel (or other bookable product) from the catalog.
///
/// Immutable once fetched from the catalog provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookableItem {
    pub id: String,
    pub name: String,
    pub location: String,
    /// Star rating out of five.
    pub rating_out_of_five: f64,
    pub base_price_per_night: Money,
    /// Opaque image reference (URL or asset key).
    pub image_ref: String,
}

// =============================================================================
// Room Type
// =============================================================================

/// A room category and its price multiplier.
///
/// The set is fixed: standard, deluxe, suite and presidential.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoomType {
    pub id: String,
    pub name: String,
    pub multiplier: Multiplier,
}

impl RoomType {
    fn fixed(id: &str, name: &str, bps: u32) -> Self {
        RoomType {
            id: id.to_string(),
            name: name.to_string(),
            multiplier: Multiplier::from_bps(bps),
        }
    }

    pub fn standard() -> Self {
        Self::fixed("standard", "Standard Room", 10_000)
    }

    pub fn deluxe() -> Self {
        Self::fixed("deluxe", "Deluxe Room", 13_000)
    }

    pub fn suite() -> Self {
        Self::fixed("suite", "Suite", 18_000)
    }

    pub fn presidential() -> Self {
        Self::fixed("presidential", "Presidential Suite", 25_000)
    }

    /// All room types, cheapest first.
    pub fn all() -> Vec<RoomType> {
        vec![
            Self::standard(),
            Self::deluxe(),
            Self::suite(),
            Self::presidential(),
        ]
    }

    /// Looks up a room type by id.
    pub fn find(id: &str) -> Option<RoomType> {
        Self::all().into_iter().find(|r| r.id == id)
    }
}

impl Default for RoomType {
    fn default() -> Self {
        RoomType::standard()
    }
}

// =============================================================================
// Add-On
// =============================================================================

/// An optional extra charged per night, independent of room count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AddOn {
    pub id: String,
    pub name: String,
    pub price_per_night: Money,
}

impl AddOn {
    fn fixed(id: &str, name: &str, price: i64) -> Self {
        AddOn {
            id: id.to_string(),
            name: name.to_string(),
            price_per_night: Money::from_units(price),
        }
    }

    pub fn breakfast() -> Self {
        Self::fixed("breakfast", "Breakfast", 150)
    }

    pub fn parking() -> Self {
        Self::fixed("parking", "Parking", 100)
    }

    pub fn airport_transfer() -> Self {
        Self::fixed("airport-transfer", "Airport Transfer", 300)
    }

    pub fn spa() -> Self {
        Self::fixed("spa", "Spa Access", 500)
    }

    /// All add-ons offered on the booking form.
    pub fn all() -> Vec<AddOn> {
        vec![
            Self::breakfast(),
            Self::parking(),
            Self::airport_transfer(),
            Self::spa(),
        ]
    }

    /// Looks up an add-on by id.
    pub fn find(id: &str) -> Option<AddOn> {
        Self::all().into_iter().find(|a| a.id == id)
    }
}

// =============================================================================
// Date Range
// =============================================================================

/// Check-in and check-out instants.
///
/// Construction accepts any pair; "check-out strictly after check-in" is
/// enforced by the booking validator so the UI can hold an inverted range
/// while the user is still picking dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[ts(as = "String")]
    pub check_in: DateTime<Utc>,
    #[ts(as = "String")]
    pub check_out: DateTime<Utc>,
}

impl DateRange {
    pub fn new(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> Self {
        DateRange {
            check_in,
            check_out,
        }
    }

    /// Builds a range from calendar dates, midnight UTC to midnight UTC.
    pub fn from_dates(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        DateRange {
            check_in: check_in.and_time(NaiveTime::MIN).and_utc(),
            check_out: check_out.and_time(NaiveTime::MIN).and_utc(),
        }
    }

    /// True when check-out is strictly after check-in.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.check_out > self.check_in
    }

    /// Billable nights; never less than one.
    pub fn nights(&self) -> u32 {
        nights_between(self.check_in, self.check_out)
    }
}

// =============================================================================
// Booking Status
// =============================================================================

/// Lifecycle of a persisted booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Written by the submission flow.
    #[default]
    Confirmed,
    Upcoming,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Label shown on the booking history card.
    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Upcoming => "Upcoming",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

// =============================================================================
// Booking Record
// =============================================================================

/// Identifier assigned by the submission gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BookingId(pub String);

impl BookingId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A confirmed booking as handed to the submission gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub item_id: String,
    /// Hotel name at time of booking (frozen).
    pub item_name: String,
    /// Hotel location at time of booking (frozen).
    pub item_location: String,
    #[ts(as = "String")]
    pub check_in: DateTime<Utc>,
    #[ts(as = "String")]
    pub check_out: DateTime<Utc>,
    pub nights: u32,
    pub room_count: u32,
    pub guest_count: u32,
    pub room_type: RoomType,
    pub add_ons: Vec<AddOn>,
    pub guest_name: String,
    pub guest_phone: String,
    pub room_unit_price: Money,
    pub total: Money,
    pub status: BookingStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A booking as read back from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoredBooking {
    pub id: BookingId,
    pub user_id: String,
    pub record: BookingRecord,
}

// =============================================================================
// Review
// =============================================================================

/// A guest review of a hotel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub hotel_id: String,
    pub user_id: String,
    /// Display name or email of the author.
    pub author: String,
    /// 1..=5 stars.
    pub rating: u8,
    pub text: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_multiplier_from_decimal() {
        assert_eq!(Multiplier::from_decimal(1.3).bps(), 13_000);
        assert!((Multiplier::from_bps(18_000).as_decimal() - 1.8).abs() < 1e-9);
        assert_eq!(Multiplier::default(), Multiplier::ONE);
    }

    #[test]
    fn test_multiplier_never_below_one() {
        assert_eq!(Multiplier::from_decimal(0.5), Multiplier::ONE);
        assert_eq!(Multiplier::from_decimal(-2.0), Multiplier::ONE);
        assert_eq!(Multiplier::from_decimal(f64::NAN), Multiplier::ONE);
        assert_eq!(Multiplier::from_decimal(1e12).bps(), u32::MAX);
        assert_eq!(Multiplier::from_bps(0), Multiplier::ONE);
        assert_eq!(Multiplier::from_bps(9_999), Multiplier::ONE);
        assert_eq!(Multiplier::from_bps(10_001).bps(), 10_001);

        let parsed: Multiplier = serde_json::from_str("5000").unwrap();
        assert_eq!(parsed, Multiplier::ONE);
        let parsed: Multiplier = serde_json::from_str("13000").unwrap();
        assert_eq!(parsed.bps(), 13_000);
    }

    #[test]
    fn test_room_types_are_fixed_and_at_least_one() {
        let all = RoomType::all();
        assert_eq!(all.len(), 4);
        assert!(all.iter().all(|r| r.multiplier >= Multiplier::ONE));
        assert_eq!(RoomType::find("deluxe"), Some(RoomType::deluxe()));
        assert_eq!(RoomType::find("penthouse"), None);
    }

    #[test]
    fn test_add_on_lookup() {
        assert_eq!(AddOn::find("spa").unwrap().price_per_night.units(), 500);
        assert_eq!(AddOn::find("breakfast").unwrap().price_per_night.units(), 150);
        assert!(AddOn::find("minibar").is_none());
    }

    #[test]
    fn test_date_range_from_dates() {
        let range = DateRange::from_dates(date(2024, 1, 15), date(2024, 1, 18));
        assert!(range.is_ordered());
        assert_eq!(range.nights(), 3);
        assert_eq!(range.check_out - range.check_in, Duration::days(3));
    }

    #[test]
    fn test_inverted_range_is_representable() {
        let range = DateRange::from_dates(date(2024, 1, 18), date(2024, 1, 15));
        assert!(!range.is_ordered());
        assert_eq!(range.nights(), 1);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&BookingStatus::Confirmed).unwrap();
        assert_eq!(json, "\"confirmed\"");
        assert_eq!(BookingStatus::Cancelled.label(), "Cancelled");
    }
}
