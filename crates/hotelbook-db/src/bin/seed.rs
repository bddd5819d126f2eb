//! # Catalog Seeder
//!
//! Loads the bundled hotel list into an empty store.
//!
//! ## Usage
//! ```bash
//! # Use hotelbook.toml / HOTELBOOK_* settings
//! cargo run -p hotelbook-db --bin seed
//!
//! # Specify database path
//! cargo run -p hotelbook-db --bin seed -- --db ./data/hotelbook.db
//!
//! # Verbose logging
//! RUST_LOG=debug cargo run -p hotelbook-db --bin seed
//! ```

use std::env;
use std::path::PathBuf;

use hotelbook_core::catalog::StaticCatalog;
use hotelbook_db::{AppConfig, Database};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,hotelbook=debug,sqlx=warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut db_override: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_override = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("HotelBook Catalog Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  Config file (default: platform config dir)");
                println!("  -d, --db <PATH>      Database file path (overrides config)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let mut config = AppConfig::load(config_path)?;
    if let Some(path) = db_override {
        config.database.path = path;
    }

    println!("🌱 HotelBook Catalog Seeder");
    println!("===========================");
    println!("Database: {}", config.database.path.display());
    println!();

    if let Some(parent) = config.database.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = Database::new(config.db_config()).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if !config.booking.seed_catalog {
        println!("⚠ Seeding disabled (booking.seed_catalog = false)");
        return Ok(());
    }

    let existing = db.hotels().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} hotels", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let hotels = db.hotels();
    for hotel in StaticCatalog::hotels() {
        hotels.insert(&hotel).await?;
        println!(
            "  + {:<16} {:<14} {}/night",
            hotel.name,
            hotel.location,
            config.format_money(hotel.base_price_per_night)
        );
    }

    let total = hotels.count().await?;
    info!(total, "Catalog seeded");
    println!();
    println!("✓ Seeded {} hotels", total);

    db.close().await;
    Ok(())
}
