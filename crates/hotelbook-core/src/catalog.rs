//! # Catalog Module
//!
//! Search, location filter and sort for the explore screen, plus the
//! built-in hotel list.
//!
//! ```text
//! items ──► search (name or location, case-insensitive)
//!       ──► location filter ("All" = no filter)
//!       ──► sort (price ↑ | rating ↓ | name ↑)
//!       ──► visible list
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use ts_rs::TS;

use crate::error::GatewayResult;
use crate::gateway::CatalogProvider;
use crate::money::Money;
use crate::types::BookableItem;

/// Location filter value that disables filtering.
pub const ALL_LOCATIONS: &str = "All";

// =============================================================================
// Query
// =============================================================================

/// Sort order for the hotel list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Cheapest first.
    #[default]
    Price,
    /// Best rated first.
    Rating,
    /// Alphabetical.
    Name,
}

/// Filter and sort options from the explore screen.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    pub search: String,
    /// `None` or `"All"` shows every location.
    pub location: Option<String>,
    pub sort: SortBy,
}

impl CatalogQuery {
    fn location_filter(&self) -> Option<&str> {
        self.location
            .as_deref()
            .filter(|loc| *loc != ALL_LOCATIONS)
    }

    fn matches(&self, item: &BookableItem) -> bool {
        let needle = self.search.trim().to_lowercase();
        let search_ok = needle.is_empty()
            || item.name.to_lowercase().contains(&needle)
            || item.location.to_lowercase().contains(&needle);

        let location_ok = self
            .location_filter()
            .map_or(true, |loc| item.location == loc);

        search_ok && location_ok
    }
}

/// Applies a query to a list of items, returning a new list.
pub fn filter_and_sort(items: &[BookableItem], query: &CatalogQuery) -> Vec<BookableItem> {
    let mut visible: Vec<BookableItem> = items
        .iter()
        .filter(|item| query.matches(item))
        .cloned()
        .collect();

    match query.sort {
        SortBy::Price => visible.sort_by_key(|item| item.base_price_per_night),
        SortBy::Rating => visible.sort_by(|a, b| {
            b.rating_out_of_five
                .partial_cmp(&a.rating_out_of_five)
                .unwrap_or(Ordering::Equal)
        }),
        SortBy::Name => visible.sort_by_key(|item| item.name.to_lowercase()),
    }

    visible
}

/// Distinct locations in first-seen order, prefixed with `"All"`.
pub fn unique_locations(items: &[BookableItem]) -> Vec<String> {
    let mut locations = vec![ALL_LOCATIONS.to_string()];
    for item in items {
        if !locations.contains(&item.location) {
            locations.push(item.location.clone());
        }
    }
    locations
}

// =============================================================================
// Static Catalog
// =============================================================================

/// The fixed hotel list bundled with the app.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog;

impl StaticCatalog {
    /// Returns the eight bundled hotels.
    pub fn hotels() -> Vec<BookableItem> {
        const HOTELS: &[(&str, &str, &str, f64, i64, &str)] = &[
            ("1", "Sunset Resort", "Cape Town", 4.5, 1200, "photo-1571003123894-1f0594d2b5d9"),
            ("2", "Mountain Lodge", "Drakensberg", 4.8, 950, "photo-1520250497591-112f2f40a3f4"),
            ("3", "City Inn", "Johannesburg", 4.2, 800, "photo-1564501049412-61c2a3083791"),
            ("4", "Safari Lodge", "Kruger Park", 4.9, 2200, "photo-1578662996442-48f60103fc96"),
            ("5", "Beach Villa", "Durban", 4.6, 1500, "photo-1566073771259-6a8506099945"),
            ("6", "Garden Hotel", "Cape Town", 4.3, 1100, "photo-1551882547-ff40c63fe5fa"),
            ("7", "Business Center", "Johannesburg", 4.1, 900, "photo-1564501049412-61c2a3083791"),
            ("8", "Coastal Resort", "Durban", 4.7, 1800, "photo-1571003123894-1f0594d2b5d9"),
        ];

        HOTELS
            .iter()
            .map(|(id, name, location, rating, price, image)| BookableItem {
                id: id.to_string(),
                name: name.to_string(),
                location: location.to_string(),
                rating_out_of_five: *rating,
                base_price_per_night: Money::from_units(*price),
                image_ref: format!("https://images.unsplash.com/{}?w=400", image),
            })
            .collect()
    }

    /// Finds a bundled hotel by id.
    pub fn find(id: &str) -> Option<BookableItem> {
        Self::hotels().into_iter().find(|h| h.id == id)
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn fetch_catalog(&self) -> GatewayResult<Vec<BookableItem>> {
        Ok(Self::hotels())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
