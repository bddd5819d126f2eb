//! # Error Types
//!
//! Domain-specific error types for hotelbook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  hotelbook-core errors (this file)                                     │
//! │  ├── ValidationError  - Booking/review input rule failures             │
//! │  ├── GatewayError     - Opaque failures reported by a collaborator     │
//! │  └── CoreError        - What the submission flow returns               │
//! │                                                                         │
//! │  hotelbook-db errors (separate crate)                                  │
//! │  └── DbError          - Database failures, mapped into GatewayError    │
//! │                                                                         │
//! │  Flow: ValidationError ─┐                                              │
//! │        GatewayError ────┴─► CoreError ─► caller (one alert per error)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Validation errors carry the limit that was broken
//! 3. Gateway errors are passed through verbatim, never reinterpreted

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Every variant is caller-correctable by changing the input. The booking
/// validator reports exactly one of the first six variants: the first rule
/// that fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Rule 1: check-out is not strictly after check-in.
    #[error("Check-out must be after check-in")]
    InvalidDateRange,

    /// Rule 2: room count outside `[min, max]`.
    #[error("Room count must be between {min} and {max}")]
    InvalidRoomCount { min: u32, max: u32 },

    /// Rule 3: guest count outside `[1, max]`, where `max` derives from the
    /// current room count.
    ///
    /// ## User Workflow
    /// ```text
    /// Rooms: 2   Guests: 9
    ///      │
    ///      ▼
    /// max = 2 × 4 = 8
    ///      │
    ///      ▼
    /// InvalidGuestCount { max: 8 }
    ///      │
    ///      ▼
    /// UI shows: "Guest count must be between 1 and 8 for 2 room(s)"
    /// ```
    #[error("Guest count must be between 1 and {max} for {rooms} room(s)")]
    InvalidGuestCount { max: u32, rooms: u32 },

    /// Rule 4: guest name blank after trimming.
    #[error("Guest name is required")]
    MissingGuestName,

    /// Rule 5: guest phone blank or shorter than `min_length` after trimming.
    #[error("Guest phone must be at least {min_length} characters")]
    InvalidGuestPhone { min_length: usize },

    /// The same add-on id was selected more than once.
    #[error("Add-on {id} is selected more than once")]
    DuplicateAddOn { id: String },

    /// A required free-text field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Gateway Error
// =============================================================================

/// Failures reported by an external collaborator (catalog provider,
/// submission gateway, booking feed).
///
/// The core never retries or reinterprets these; the message reaches the
/// user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// No signed-in user to own the booking.
    #[error("Not signed in")]
    NotAuthenticated,

    /// The backend could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend refused the write.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The backend failed for any other reason.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// What `SubmissionGateway::submit` fails with.
pub type SubmissionError = GatewayError;

/// Convenience type alias for collaborator results.
pub type GatewayResult<T> = Result<T, GatewayError>;

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by the booking flow.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Catalog item cannot be found.
    #[error("Hotel not found: {0}")]
    ItemNotFound(String),

    /// Room type id is not one of the fixed room types.
    #[error("Unknown room type: {0}")]
    UnknownRoomType(String),

    /// Add-on id is not one of the fixed add-ons.
    #[error("Unknown add-on: {0}")]
    UnknownAddOn(String),

    /// A confirmed booking is still being submitted.
    ///
    /// ## When This Occurs
    /// - The user taps "Confirm Booking" twice before the first submission
    ///   resolves
    #[error("A booking submission is already in progress")]
    SubmissionInFlight,

    /// Validation error (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Gateway failure, surfaced verbatim.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_count_message_names_the_derived_maximum() {
        let err = ValidationError::InvalidGuestCount { max: 8, rooms: 2 };
        assert_eq!(
            err.to_string(),
            "Guest count must be between 1 and 8 for 2 room(s)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::InvalidDateRange.to_string(),
            "Check-out must be after check-in"
        );
        assert_eq!(
            ValidationError::InvalidGuestPhone { min_length: 10 }.to_string(),
            "Guest phone must be at least 10 characters"
        );
        assert_eq!(
            ValidationError::Required {
                field: "review".to_string()
            }
            .to_string(),
            "review is required"
        );
    }

    #[test]
    fn test_gateway_error_passes_through_verbatim() {
        let err: CoreError = GatewayError::NotAuthenticated.into();
        assert!(matches!(err, CoreError::Gateway(GatewayError::NotAuthenticated)));
        assert_eq!(err.to_string(), "Not signed in");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::MissingGuestName.into();
        assert!(matches!(
            core_err,
            CoreError::Validation(ValidationError::MissingGuestName)
        ));
    }
}
