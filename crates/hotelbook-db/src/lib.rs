//! # hotelbook-db: Local Store for HotelBook
//!
//! SQLite-backed implementation of the collaborators that hotelbook-core
//! expects to be injected: the catalog provider, the submission gateway and
//! the booking history feed.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        HotelBook Data Flow                              │
//! │                                                                         │
//! │  BookingFlow::confirm (hotelbook-core)                                  │
//! │       │ SubmissionGateway::submit                                       │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   hotelbook-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ SqliteGateway │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │ (gateway.rs)  │───►│ HotelRepo     │    │  (embedded)  │  │   │
//! │  │   │ user_id       │    │ BookingRepo   │    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    │ ReviewRepo    │    └──────────────┘  │   │
//! │  │           ▲            └───────┬───────┘                       │   │
//! │  │           │ revision           │                               │   │
//! │  │   ┌───────┴───────┐    ┌───────▼───────┐                       │   │
//! │  │   │ watch channel │◄───│   Database    │                       │   │
//! │  │   └───────────────┘    │   (pool.rs)   │                       │   │
//! │  │                        └───────────────┘                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (AppConfig.database.path)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`repository`] - Hotel, booking and review tables
//! - [`gateway`] - Collaborator trait implementations
//! - [`config`] - App configuration (file + environment)
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hotelbook_core::submission::BookingFlow;
//! use hotelbook_db::{AppConfig, Database};
//!
//! let config = AppConfig::load(None)?;
//! let db = Database::new(config.db_config()).await?;
//!
//! let flow = BookingFlow::new(db.gateway(Some(user_id)));
//! let pending = flow.review(&quote)?;
//! let booking_id = flow.confirm(pending).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod gateway;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::AppConfig;
pub use error::{DbError, DbResult};
pub use gateway::SqliteGateway;
pub use pool::{Database, DbConfig};

pub use repository::booking::BookingRepository;
pub use repository::hotel::HotelRepository;
pub use repository::review::ReviewRepository;
