//! Integration test support for Velocart order aggregation.
//!
//! The tests in `tests/` run the whole read path - session, aggregator,
//! resolver, field normalization - against a seeded [`MemoryStore`]. This
//! module holds the seeding helpers they share.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p velocart-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use serde_json::json;

use velocart_orders::config::OrdersConfig;
use velocart_orders::order::{OrderAggregator, OrderSession};
use velocart_orders::store::{DocumentStore, MemoryStore};

/// Initialize tracing once per test binary; repeated calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// An aggregator over `store` with default configuration.
#[must_use]
pub fn aggregator(store: &Arc<MemoryStore>) -> OrderAggregator {
    let store: Arc<dyn DocumentStore> = Arc::<MemoryStore>::clone(store);
    OrderAggregator::new(store, OrdersConfig::default())
}

/// A session over `store` with default configuration.
#[must_use]
pub fn session(store: &Arc<MemoryStore>) -> OrderSession {
    OrderSession::new(aggregator(store))
}

/// Seed a fully-populated order under `orders/o_1`:
/// customer `customers/c_1` (Lena), courier `couriers/d_1` (Marc, with photo
/// and location), two product lines, a 2h30m shipping window.
pub fn seed_full_order(store: &MemoryStore) {
    store.seed(
        "orders/o_1",
        json!({
            "customer": "customers/c_1",
            "courier": "couriers/d_1",
            "address": {
                "line": "12 Rue Oberkampf",
                "label": "Home",
                "location": { "latitude": 48.86, "longitude": 2.37 }
            },
            "lines": [
                { "product": "products/p_1", "quantity": 2, "unit_price": 9.99 },
                { "product": "products/p_2", "quantity": 1, "unit_price": 5.0 }
            ],
            "status": "Delivering",
            "total_amount": 24.98,
            "placed_at": { "seconds": 1_709_280_000 },
            "shipping_started_at": { "seconds": 1_709_283_600 },
            "finished_at": { "seconds": 1_709_292_600 }
        }),
    );
    store.seed("customers/c_1", json!({ "first_name": "Lena" }));
    store.seed(
        "couriers/d_1",
        json!({
            "first_name": "Marc",
            "photo_url": "/marc.jpg",
            "location": { "latitude": 48.87, "longitude": 2.33 }
        }),
    );
    store.seed("products/p_1", json!({ "name": "Flat white" }));
    store.seed("products/p_2", json!({ "name": "Croissant" }));
}
