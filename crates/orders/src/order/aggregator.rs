//! The order aggregator.
//!
//! Fetches the root order document, resolves everything it references
//! concurrently, and assembles the display-ready view. Only the root fetch
//! can fail the operation; every secondary lookup degrades to its fallback
//! on its own.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use futures::future::join_all;
use tracing::{debug, instrument};

use velocart_core::{CurrencyCode, DocPath, GeoPoint, Money, OrderId};

use crate::config::OrdersConfig;
use crate::store::{DocumentStore, StoreError};

use super::duration::delivery_duration;
use super::resolver::{Resolved, resolve};
use super::snapshot::{CourierRecord, CustomerRecord, OrderSnapshot, ProductRecord};
use super::view::{
    self, AddressView, CourierView, LineItemView, OrderDetailView,
};

/// Read-only aggregator for one order's detail view.
pub struct OrderAggregator {
    store: Arc<dyn DocumentStore>,
    config: OrdersConfig,
}

impl OrderAggregator {
    /// Create an aggregator over an injected store.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, config: OrdersConfig) -> Self {
        Self { store, config }
    }

    /// Load and assemble the detail view for `id`.
    ///
    /// `Ok(None)` when no order document exists under the configured
    /// collection; in that case no secondary lookup is issued.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only for a transport fault on the root fetch.
    /// Secondary faults degrade individual fields instead.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn load(&self, id: &OrderId) -> Result<Option<OrderDetailView>, StoreError> {
        let path = DocPath::new(&self.config.orders_collection, id.as_str());
        let Some(document) = self.store.get(&path).await? else {
            debug!(%path, "order document does not exist");
            return Ok(None);
        };
        let snapshot = OrderSnapshot::parse(&document);
        Ok(Some(self.assemble(snapshot).await))
    }

    /// Resolve all secondary references concurrently and build the view.
    async fn assemble(&self, snapshot: OrderSnapshot) -> OrderDetailView {
        let store = self.store.as_ref();
        let customer_lookup = resolve(store, snapshot.customer.as_ref(), CustomerRecord::parse);
        let courier_lookup = resolve(store, snapshot.courier.as_ref(), CourierRecord::parse);
        // join_all keeps result order equal to input order no matter which
        // lookup completes first.
        let product_lookups = join_all(
            snapshot
                .lines
                .iter()
                .map(|line| resolve(store, line.product.as_ref(), ProductRecord::parse)),
        );

        let (customer, courier, products) =
            tokio::join!(customer_lookup, courier_lookup, product_lookups);

        let lines = snapshot
            .lines
            .iter()
            .zip(products)
            .map(|(line, product)| LineItemView {
                product_name: product_display_name(product),
                quantity: line.quantity,
                unit_price: Money::new(line.unit_price, CurrencyCode::EUR),
            })
            .collect();

        let delivery_duration = match (snapshot.shipping_started_at, snapshot.finished_at) {
            (Some(start), Some(finish)) => Some(delivery_duration(start, finish)),
            _ => None,
        };

        OrderDetailView {
            id: snapshot.id,
            customer_name: customer_display_name(customer),
            address: AddressView {
                line: snapshot
                    .address_line
                    .unwrap_or_else(|| view::NO_ADDRESS.to_string()),
                label: snapshot
                    .address_label
                    .unwrap_or_else(|| view::UNKNOWN_LABEL.to_string()),
                location: snapshot.address_location.unwrap_or(GeoPoint::new(0.0, 0.0)),
            },
            lines,
            status: snapshot.status.unwrap_or_default(),
            total: Money::new(
                snapshot.total_amount.unwrap_or_default(),
                CurrencyCode::EUR,
            ),
            placed_at: snapshot.placed_at.map_or_else(
                || view::UNKNOWN_DATE.to_string(),
                |t| self.format_instant(t),
            ),
            shipping_started_at: snapshot
                .shipping_started_at
                .map(|t| self.format_instant(t)),
            finished_at: snapshot.finished_at.map(|t| self.format_instant(t)),
            courier: self.courier_view(courier),
            delivery_duration,
        }
    }

    fn courier_view(&self, courier: Resolved<CourierRecord>) -> Option<CourierView> {
        // NoReference, Missing, and Fault all mean "no courier card"; the
        // distinction is already in the logs.
        let record = courier.found()?;
        Some(CourierView {
            name: record
                .first_name
                .unwrap_or_else(|| view::UNNAMED_COURIER.to_string()),
            photo_url: record
                .photo_url
                .unwrap_or_else(|| self.config.courier_photo_placeholder.clone()),
            last_location: record.location,
        })
    }

    fn format_instant(&self, instant: DateTime<Utc>) -> String {
        instant
            .with_timezone(&Local)
            .format(&self.config.datetime_format)
            .to_string()
    }
}

fn customer_display_name(customer: Resolved<CustomerRecord>) -> String {
    match customer {
        Resolved::NoReference => view::NO_CUSTOMER_ON_RECORD.to_string(),
        Resolved::Missing { .. } | Resolved::Fault { .. } => view::UNKNOWN_CUSTOMER.to_string(),
        Resolved::Found(record) => record
            .first_name
            .unwrap_or_else(|| view::UNNAMED_CUSTOMER.to_string()),
    }
}

fn product_display_name(product: Resolved<ProductRecord>) -> String {
    match product {
        Resolved::NoReference => view::NO_PRODUCT_REFERENCE.to_string(),
        Resolved::Missing { .. } | Resolved::Fault { .. } => view::UNKNOWN_PRODUCT.to_string(),
        Resolved::Found(record) => record
            .name
            .unwrap_or_else(|| view::UNNAMED_PRODUCT.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    use serde_json::json;

    use crate::store::MemoryStore;

    fn aggregator(store: Arc<MemoryStore>) -> OrderAggregator {
        OrderAggregator::new(store, OrdersConfig::default())
    }

    fn seed_full_order(store: &MemoryStore) {
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

    #[tokio::test]
    async fn test_full_order_assembles() {
        let store = Arc::new(MemoryStore::new());
        seed_full_order(&store);

        let view = aggregator(Arc::clone(&store))
            .load(&OrderId::new("o_1"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(view.customer_name, "Lena");
        assert_eq!(view.address.line, "12 Rue Oberkampf");
        assert_eq!(view.status.as_str(), "Delivering");
        assert_eq!(view.total.display(), "€24.98");
        let names: Vec<&str> = view.lines.iter().map(|l| l.product_name.as_str()).collect();
        assert_eq!(names, ["Flat white", "Croissant"]);
        assert_eq!(view.lines.first().unwrap().subtotal().display(), "€19.98");
        // Shipping window is 2h30m (1_709_283_600 .. 1_709_292_600).
        assert_eq!(view.delivery_duration.as_deref(), Some("2h 30m"));
        let courier = view.courier.unwrap();
        assert_eq!(courier.name, "Marc");
        assert_eq!(courier.photo_url, "/marc.jpg");
        assert!(courier.last_location.is_some());
    }

    #[tokio::test]
    async fn test_root_not_found_issues_no_secondary_lookups() {
        let store = Arc::new(MemoryStore::new());
        let result = aggregator(Arc::clone(&store))
            .load(&OrderId::new("absent"))
            .await
            .unwrap();
        assert!(result.is_none());
        assert_eq!(store.accesses(), vec!["orders/absent"]);
    }

    #[tokio::test]
    async fn test_root_fault_is_an_error() {
        let store = Arc::new(MemoryStore::new());
        store.fail_path("orders/o_1");
        let result = aggregator(Arc::clone(&store)).load(&OrderId::new("o_1")).await;
        assert!(matches!(result, Err(StoreError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn test_deleted_courier_drops_the_card_only() {
        let store = Arc::new(MemoryStore::new());
        seed_full_order(&store);
        store.remove("couriers/d_1");

        let view = aggregator(Arc::clone(&store))
            .load(&OrderId::new("o_1"))
            .await
            .unwrap()
            .unwrap();
        assert!(view.courier.is_none());
        assert_eq!(view.customer_name, "Lena");
        assert_eq!(view.lines.len(), 2);
    }

    #[tokio::test]
    async fn test_customer_fallbacks_are_distinct() {
        let store = Arc::new(MemoryStore::new());
        // No reference at all.
        store.seed("orders/o_a", json!({}));
        // Reference to a deleted record.
        store.seed("orders/o_b", json!({ "customer": "customers/gone" }));
        // Record present but nameless.
        store.seed("orders/o_c", json!({ "customer": "customers/c_1" }));
        store.seed("customers/c_1", json!({}));

        let aggregator = aggregator(Arc::clone(&store));
        let a = aggregator.load(&OrderId::new("o_a")).await.unwrap().unwrap();
        let b = aggregator.load(&OrderId::new("o_b")).await.unwrap().unwrap();
        let c = aggregator.load(&OrderId::new("o_c")).await.unwrap().unwrap();

        assert_eq!(a.customer_name, view::NO_CUSTOMER_ON_RECORD);
        assert_eq!(b.customer_name, view::UNKNOWN_CUSTOMER);
        assert_eq!(c.customer_name, view::UNNAMED_CUSTOMER);
        assert_ne!(a.customer_name, b.customer_name);
    }

    #[tokio::test]
    async fn test_secondary_fault_degrades_one_field() {
        let store = Arc::new(MemoryStore::new());
        seed_full_order(&store);
        store.fail_path("products/p_2");

        let view = aggregator(Arc::clone(&store))
            .load(&OrderId::new("o_1"))
            .await
            .unwrap()
            .unwrap();
        let names: Vec<&str> = view.lines.iter().map(|l| l.product_name.as_str()).collect();
        assert_eq!(names, ["Flat white", view::UNKNOWN_PRODUCT]);
        assert_eq!(view.customer_name, "Lena");
    }

    #[tokio::test]
    async fn test_zero_lines_keeps_stored_total() {
        let store = Arc::new(MemoryStore::new());
        store.seed(
            "orders/o_1",
            json!({ "lines": [], "total_amount": 12.50 }),
        );

        let view = aggregator(Arc::clone(&store))
            .load(&OrderId::new("o_1"))
            .await
            .unwrap()
            .unwrap();
        assert!(view.lines.is_empty());
        assert_eq!(view.total.display(), "€12.50");
    }

    #[tokio::test(start_paused = true)]
    async fn test_line_order_survives_out_of_order_completion() {
        let store = Arc::new(MemoryStore::new());
        store.seed(
            "orders/o_1",
            json!({
                "lines": [
                    { "product": "products/slow", "quantity": 1, "unit_price": 1.0 },
                    { "product": "products/fast", "quantity": 1, "unit_price": 2.0 }
                ]
            }),
        );
        store.seed("products/slow", json!({ "name": "Slow product" }));
        store.seed("products/fast", json!({ "name": "Fast product" }));
        store.delay_path("products/slow", Duration::from_secs(3));

        let view = aggregator(Arc::clone(&store))
            .load(&OrderId::new("o_1"))
            .await
            .unwrap()
            .unwrap();
        let names: Vec<&str> = view.lines.iter().map(|l| l.product_name.as_str()).collect();
        assert_eq!(names, ["Slow product", "Fast product"]);
    }

    #[tokio::test]
    async fn test_duration_absent_without_both_endpoints() {
        let store = Arc::new(MemoryStore::new());
        store.seed(
            "orders/o_1",
            json!({ "shipping_started_at": { "seconds": 1_709_283_600 } }),
        );

        let view = aggregator(Arc::clone(&store))
            .load(&OrderId::new("o_1"))
            .await
            .unwrap()
            .unwrap();
        assert!(view.shipping_started_at.is_some());
        assert!(view.finished_at.is_none());
        assert_eq!(view.delivery_duration, None);
    }

    #[tokio::test]
    async fn test_defaults_for_an_empty_order_document() {
        let store = Arc::new(MemoryStore::new());
        store.seed("orders/o_1", json!({}));

        let view = aggregator(Arc::clone(&store))
            .load(&OrderId::new("o_1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(view.address.line, view::NO_ADDRESS);
        assert_eq!(view.address.label, view::UNKNOWN_LABEL);
        assert_eq!(view.address.location, GeoPoint::new(0.0, 0.0));
        assert_eq!(view.status.as_str(), "Pending");
        assert_eq!(view.total.display(), "€0.00");
        assert_eq!(view.placed_at, view::UNKNOWN_DATE);
    }
}
