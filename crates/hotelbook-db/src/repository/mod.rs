//! # Repository Module
//!
//! Database repository implementations for HotelBook.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SqliteGateway / seed binary                                            │
//! │       │                                                                 │
//! │       │  db.bookings().list_for_user("user-1")                          │
//! │       ▼                                                                 │
//! │  BookingRepository                                                      │
//! │  ├── insert(&self, user_id, record)                                     │
//! │  ├── list_for_user(&self, user_id)                                      │
//! │  ├── get(&self, id)                                                     │
//! │  └── update_status(&self, id, status)                                   │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows are read into private `*Row` structs with `sqlx::FromRow` and
//! converted into hotelbook-core types at the repository boundary.
//!
//! ## Available Repositories
//!
//! - [`HotelRepository`](hotel::HotelRepository) - Catalog storage
//! - [`BookingRepository`](booking::BookingRepository) - Booking history
//! - [`ReviewRepository`](review::ReviewRepository) - One review per user per hotel

pub mod booking;
pub mod hotel;
pub mod review;
