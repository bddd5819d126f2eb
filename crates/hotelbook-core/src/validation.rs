//! # Validation Module
//!
//! Business rules that gate booking submission, plus review input checks.
//!
//! ## Booking Rules (fixed order, fail-fast)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validate_booking(quote)                                                │
//! │       │                                                                 │
//! │       ├── 1. check_out > check_in?          no → InvalidDateRange       │
//! │       ├── 2. rooms in [1, 10]?              no → InvalidRoomCount       │
//! │       ├── 3. guests in [1, rooms × 4]?      no → InvalidGuestCount      │
//! │       ├── 4. guest name non-blank?          no → MissingGuestName       │
//! │       ├── 5. phone ≥ 10 chars (trimmed)?    no → InvalidGuestPhone      │
//! │       ├── 6. add-on ids unique?             no → DuplicateAddOn         │
//! │       │                                                                 │
//! │       └── OK → show confirmation                                        │
//! │                                                                         │
//! │  Only the first failing rule is reported: one alert at a time.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use hotelbook_core::validation::{validate_guest_phone, validate_room_count};
//!
//! assert!(validate_room_count(2).is_ok());
//! assert!(validate_guest_phone("12345").is_err());
//! ```

use crate::error::ValidationError;
use crate::quote::BookingQuote;
use crate::types::{AddOn, DateRange};
use crate::{MAX_GUESTS_PER_ROOM, MAX_REVIEW_RATING, MAX_ROOMS, MIN_PHONE_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Booking Validator
// =============================================================================

/// Runs every booking rule in order and reports the first violation.
///
/// Does not mutate the quote and has no side effects.
pub fn validate_booking(quote: &BookingQuote) -> ValidationResult<()> {
    validate_date_range(&quote.date_range)?;
    validate_room_count(quote.room_count)?;
    validate_guest_count(quote.guest_count, quote.room_count)?;
    validate_guest_name(&quote.guest_name)?;
    validate_guest_phone(&quote.guest_phone)?;
    validate_add_ons(&quote.add_ons)?;
    Ok(())
}

/// Rule 1: check-out strictly after check-in.
pub fn validate_date_range(range: &DateRange) -> ValidationResult<()> {
    if !range.is_ordered() {
        return Err(ValidationError::InvalidDateRange);
    }
    Ok(())
}

/// Rule 2: between 1 and [`MAX_ROOMS`] rooms.
pub fn validate_room_count(rooms: u32) -> ValidationResult<()> {
    if !(1..=MAX_ROOMS).contains(&rooms) {
        return Err(ValidationError::InvalidRoomCount {
            min: 1,
            max: MAX_ROOMS,
        });
    }
    Ok(())
}

/// Rule 3: between 1 and `rooms × MAX_GUESTS_PER_ROOM` guests.
pub fn validate_guest_count(guests: u32, rooms: u32) -> ValidationResult<()> {
    let max = rooms.saturating_mul(MAX_GUESTS_PER_ROOM);
    if guests < 1 || guests > max {
        return Err(ValidationError::InvalidGuestCount { max, rooms });
    }
    Ok(())
}

/// Rule 4: a guest name that is not only whitespace.
pub fn validate_guest_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingGuestName);
    }
    Ok(())
}

/// Rule 5: a phone number of at least [`MIN_PHONE_LENGTH`] characters once
/// trimmed.
pub fn validate_guest_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();
    if phone.is_empty() || phone.chars().count() < MIN_PHONE_LENGTH {
        return Err(ValidationError::InvalidGuestPhone {
            min_length: MIN_PHONE_LENGTH,
        });
    }
    Ok(())
}

/// Rule 6: each add-on selected at most once.
///
/// `BookingQuote::with_add_on` already skips repeats; this catches a list
/// built by hand.
pub fn validate_add_ons(add_ons: &[AddOn]) -> ValidationResult<()> {
    for (i, add_on) in add_ons.iter().enumerate() {
        if add_ons[..i].iter().any(|a| a.id == add_on.id) {
            return Err(ValidationError::DuplicateAddOn {
                id: add_on.id.clone(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Review Validator
// =============================================================================

/// Validates a review before it is stored.
///
/// ## Rules
/// - Text must not be blank
/// - Rating must be 1..=5
///
/// ## Returns
/// The trimmed review text.
pub fn validate_review(rating: u8, text: &str) -> ValidationResult<String> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::Required {
            field: "review text".to_string(),
        });
    }

    if !(1..=MAX_REVIEW_RATING).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 1,
            max: MAX_REVIEW_RATING as i64,
        });
    }

    Ok(text.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
