//! # Booking History
//!
//! Summary figures for the profile screen, computed from a snapshot of the
//! user's bookings.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::StoredBooking;

/// Totals shown above the booking history list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookingStats {
    pub total_bookings: usize,
    pub total_spent: Money,
    /// Most frequently booked location; `None` renders as "N/A".
    pub favorite_location: Option<String>,
}

impl BookingStats {
    pub fn from_bookings(bookings: &[StoredBooking]) -> Self {
        BookingStats {
            total_bookings: bookings.len(),
            total_spent: bookings.iter().map(|b| b.record.total).sum(),
            favorite_location: favorite_location(bookings),
        }
    }
}

/// Most frequent non-empty location. Ties go to the location that appears
/// first in the snapshot.
fn favorite_location(bookings: &[StoredBooking]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for booking in bookings {
        let location = booking.record.item_location.as_str();
        if location.is_empty() {
            continue;
        }
        match counts.iter_mut().find(|(loc, _)| *loc == location) {
            Some((_, n)) => *n += 1,
            None => counts.push((location, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (location, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((location, count));
        }
    }
    best.map(|(location, _)| location.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BookingId, BookingRecord, BookingStatus, RoomType};
    use chrono::{TimeZone, Utc};

    fn booking(id: &str, location: &str, total: i64) -> StoredBooking {
        let check_in = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        StoredBooking {
            id: BookingId(id.to_string()),
            user_id: "user-1".to_string(),
            record: BookingRecord {
                item_id: id.to_string(),
                item_name: format!("Hotel {}", id),
                item_location: location.to_string(),
                check_in,
                check_out: check_in + chrono::Duration::days(3),
                nights: 3,
                room_count: 1,
                guest_count: 2,
                room_type: RoomType::standard(),
                add_ons: Vec::new(),
                guest_name: "Guest".to_string(),
                guest_phone: "0821234567".to_string(),
                room_unit_price: Money::from_units(total / 3),
                total: Money::from_units(total),
                status: BookingStatus::Confirmed,
                created_at: check_in,
            },
        }
    }

    #[test]
    fn test_empty_history() {
        let stats = BookingStats::from_bookings(&[]);
        assert_eq!(stats.total_bookings, 0);
        assert!(stats.total_spent.is_zero());
        assert_eq!(stats.favorite_location, None);
    }

    #[test]
    fn test_totals_and_favorite() {
        let bookings = vec![
            booking("1", "Cape Town", 3600),
            booking("2", "Drakensberg", 1900),
            booking("3", "Drakensberg", 1000),
        ];
        let stats = BookingStats::from_bookings(&bookings);
        assert_eq!(stats.total_bookings, 3);
        assert_eq!(stats.total_spent.units(), 6500);
        assert_eq!(stats.favorite_location.as_deref(), Some("Drakensberg"));
    }

    #[test]
    fn test_favorite_tie_goes_to_first_seen() {
        let bookings = vec![
            booking("1", "Durban", 100),
            booking("2", "Cape Town", 100),
            booking("3", "Cape Town", 100),
            booking("4", "Durban", 100),
        ];
        let stats = BookingStats::from_bookings(&bookings);
        assert_eq!(stats.favorite_location.as_deref(), Some("Durban"));
    }

    #[test]
    fn test_blank_locations_ignored() {
        let bookings = vec![booking("1", "", 100)];
        assert_eq!(BookingStats::from_bookings(&bookings).favorite_location, None);
    }
}
