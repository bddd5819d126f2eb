//! # hotelbook-core: Pure Booking Logic for HotelBook
//!
//! This crate is the **heart** of HotelBook. It prices and validates hotel
//! bookings as pure functions, and describes the outside world (catalog,
//! booking store, history feed) as traits that callers inject.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        HotelBook Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile Front End                             │   │
//! │  │    Explore ──► Hotel Details ──► Booking Form ──► Profile       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ BookingQuote (TS bindings)             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ hotelbook-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   quote   │  │validation │  │submission │  │  catalog  │  │   │
//! │  │   │ nights    │  │ 5 rules   │  │ review →  │  │ filter    │  │   │
//! │  │   │ totals    │  │ fail-fast │  │ confirm   │  │ sort      │  │   │
//! │  │   └───────────┘  └───────────┘  └─────┬─────┘  └───────────┘  │   │
//! │  │                                       │ SubmissionGateway      │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK   │ (injected trait)       │   │
//! │  └───────────────────────────────────────┼─────────────────────────┘   │
//! │                                          │                              │
//! │  ┌───────────────────────────────────────▼─────────────────────────┐   │
//! │  │             hotelbook-db (or any other backend)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (BookableItem, RoomType, AddOn, BookingRecord...)
//! - [`money`] - Money type with integer arithmetic
//! - [`quote`] - Quote calculator (nights, unit price, totals)
//! - [`validation`] - Booking and review validation rules
//! - [`catalog`] - Catalog filtering, sorting and the built-in hotel list
//! - [`history`] - Booking history statistics
//! - [`gateway`] - Collaborator traits (catalog, submission, booking feed)
//! - [`submission`] - Review → confirm → persist flow
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use hotelbook_core::catalog::StaticCatalog;
//! use hotelbook_core::quote::{calculate, BookingQuote};
//! use hotelbook_core::types::{DateRange, RoomType};
//!
//! let item = StaticCatalog::hotels().remove(0); // Sunset Resort, R1200/night
//! let dates = DateRange::from_dates(
//!     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 1, 18).unwrap(),
//! );
//!
//! let quote = BookingQuote::new(item, dates, RoomType::deluxe());
//! let breakdown = calculate(&quote);
//!
//! assert_eq!(breakdown.nights, 3);
//! assert_eq!(breakdown.room_unit_price.units(), 1560);
//! assert_eq!(breakdown.grand_total.units(), 4680);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod gateway;
pub mod history;
pub mod money;
pub mod quote;
pub mod submission;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, GatewayError, SubmissionError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum rooms in a single booking.
pub const MAX_ROOMS: u32 = 10;

/// Maximum guests per booked room.
///
/// The guest ceiling for a booking is `room_count × MAX_GUESTS_PER_ROOM`.
pub const MAX_GUESTS_PER_ROOM: u32 = 4;

/// Minimum length of a guest phone number, after trimming.
pub const MIN_PHONE_LENGTH: usize = 10;

/// Highest star rating a review may carry.
pub const MAX_REVIEW_RATING: u8 = 5;
