//! Tolerant parsing of raw documents into typed snapshots.
//!
//! Nothing here fails: a field the parser cannot use becomes `None` (logged
//! at warn where it points at data damage rather than mere absence), and the
//! aggregator decides the fallback. Line items keep the order and cardinality
//! of the raw array exactly, however broken the individual entries are.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::warn;

use velocart_core::{GeoPoint, OrderId, OrderStatus, Reference};

use crate::store::{Document, fields};

/// Typed form of the root order document.
#[derive(Debug, Clone)]
pub struct OrderSnapshot {
    pub id: OrderId,
    pub customer: Option<Reference<CustomerRecord>>,
    pub courier: Option<Reference<CourierRecord>>,
    pub address_line: Option<String>,
    pub address_label: Option<String>,
    pub address_location: Option<GeoPoint>,
    pub lines: Vec<LineRef>,
    pub status: Option<OrderStatus>,
    pub total_amount: Option<Decimal>,
    pub placed_at: Option<DateTime<Utc>>,
    pub shipping_started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// One entry of the order's line array.
#[derive(Debug, Clone)]
pub struct LineRef {
    pub product: Option<Reference<ProductRecord>>,
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// The fields the aggregator reads off a customer document.
#[derive(Debug, Clone)]
pub struct CustomerRecord {
    pub first_name: Option<String>,
}

/// The fields the aggregator reads off a courier document.
#[derive(Debug, Clone)]
pub struct CourierRecord {
    pub first_name: Option<String>,
    pub photo_url: Option<String>,
    pub location: Option<GeoPoint>,
}

/// The fields the aggregator reads off a product document.
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub name: Option<String>,
}

impl OrderSnapshot {
    /// Parse the root order document.
    #[must_use]
    pub fn parse(document: &Document) -> Self {
        let fields = &document.fields;
        let (address_line, address_label, address_location) = parse_address(fields);
        Self {
            id: OrderId::new(document.id()),
            customer: ref_field(fields, &["customer", "user"]),
            courier: ref_field(fields, &["courier", "deliveryMan"]),
            address_line,
            address_label,
            address_location,
            lines: parse_lines(fields),
            status: fields::str_field(fields, &["status"]).map(OrderStatus::from),
            total_amount: fields::decimal_field(fields, &["total_amount", "totalAmount"]),
            placed_at: fields::timestamp_field(fields, &["placed_at", "placedAt"]),
            shipping_started_at: fields::timestamp_field(
                fields,
                &["shipping_started_at", "shippingStartedAt"],
            ),
            finished_at: fields::timestamp_field(fields, &["finished_at", "finishedAt"]),
        }
    }
}

impl CustomerRecord {
    /// Parse a customer document.
    #[must_use]
    pub fn parse(document: &Document) -> Self {
        Self {
            first_name: fields::str_field(&document.fields, &["first_name", "firstName"]),
        }
    }
}

impl CourierRecord {
    /// Parse a courier document.
    #[must_use]
    pub fn parse(document: &Document) -> Self {
        Self {
            first_name: fields::str_field(&document.fields, &["first_name", "firstName"]),
            photo_url: fields::str_field(&document.fields, &["photo_url", "photoUrl"]),
            location: document
                .fields
                .get("location")
                .and_then(fields::parse_geo_point),
        }
    }
}

impl ProductRecord {
    /// Parse a product document.
    #[must_use]
    pub fn parse(document: &Document) -> Self {
        Self {
            name: fields::str_field(&document.fields, &["name"]),
        }
    }
}

/// Read a reference path under any of `keys`.
///
/// An unparseable path is data damage, not absence; it is logged and then
/// treated like an absent field so the load still succeeds.
fn ref_field<T>(fields: &Map<String, Value>, keys: &[&str]) -> Option<Reference<T>> {
    let path = fields::str_field(fields, keys)?;
    match Reference::parse(&path) {
        Ok(reference) => Some(reference),
        Err(error) => {
            warn!(%path, %error, "malformed reference path in order document");
            None
        }
    }
}

fn parse_address(
    fields: &Map<String, Value>,
) -> (Option<String>, Option<String>, Option<GeoPoint>) {
    let Some(address) = fields::map_field(fields, &["address", "addresse"]) else {
        return (None, None, None);
    };
    (
        fields::str_field(address, &["line", "address"]),
        fields::str_field(address, &["label", "title"]),
        address.get("location").and_then(fields::parse_geo_point),
    )
}

fn parse_lines(fields: &Map<String, Value>) -> Vec<LineRef> {
    let Some(raw) = fields::array_field(fields, &["lines", "products"]) else {
        return Vec::new();
    };
    raw.iter().map(parse_line).collect()
}

fn parse_line(value: &Value) -> LineRef {
    let Some(entry) = value.as_object() else {
        warn!("order line entry is not an object; keeping a placeholder line");
        return LineRef {
            product: None,
            quantity: 0,
            unit_price: Decimal::ZERO,
        };
    };
    LineRef {
        product: ref_field(entry, &["product"]),
        quantity: fields::u32_field(entry, &["quantity"]).unwrap_or(0),
        unit_price: fields::decimal_field(entry, &["unit_price", "unitPrice", "price"])
            .unwrap_or(Decimal::ZERO),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use velocart_core::DocPath;

    fn order_document(fields: Value) -> Document {
        Document::new(
            DocPath::parse("orders/o_1").unwrap(),
            fields.as_object().unwrap().clone(),
        )
    }

    #[test]
    fn test_parse_full_order() {
        let document = order_document(json!({
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
            "placed_at": { "seconds": 1_700_000_000 },
            "shipping_started_at": 1_700_003_600
        }));

        let snapshot = OrderSnapshot::parse(&document);
        assert_eq!(snapshot.id.as_str(), "o_1");
        assert_eq!(snapshot.customer.unwrap().to_string(), "customers/c_1");
        assert_eq!(snapshot.courier.unwrap().to_string(), "couriers/d_1");
        assert_eq!(snapshot.address_line.as_deref(), Some("12 Rue Oberkampf"));
        assert_eq!(snapshot.status, Some(OrderStatus::Delivering));
        assert_eq!(snapshot.lines.len(), 2);
        assert_eq!(snapshot.lines.first().unwrap().quantity, 2);
        assert!(snapshot.placed_at.is_some());
        assert!(snapshot.shipping_started_at.is_some());
        assert!(snapshot.finished_at.is_none());
    }

    #[test]
    fn test_parse_accepts_legacy_spellings() {
        let document = order_document(json!({
            "user": "customers/c_9",
            "addresse": { "address": "5 Av. Parmentier", "title": "Office" },
            "products": [
                { "product": "products/p_1", "quantity": 1, "price": "4.50" }
            ],
            "totalAmount": "4.50",
            "placedAt": "2024-03-01T09:00:00Z"
        }));

        let snapshot = OrderSnapshot::parse(&document);
        assert_eq!(snapshot.customer.unwrap().to_string(), "customers/c_9");
        assert_eq!(snapshot.address_line.as_deref(), Some("5 Av. Parmentier"));
        assert_eq!(snapshot.address_label.as_deref(), Some("Office"));
        assert_eq!(
            snapshot.lines.first().unwrap().unit_price,
            "4.50".parse().unwrap()
        );
        assert_eq!(snapshot.total_amount, Some("4.50".parse().unwrap()));
        assert!(snapshot.placed_at.is_some());
    }

    #[test]
    fn test_parse_empty_document() {
        let snapshot = OrderSnapshot::parse(&order_document(json!({})));
        assert!(snapshot.customer.is_none());
        assert!(snapshot.courier.is_none());
        assert!(snapshot.lines.is_empty());
        assert!(snapshot.status.is_none());
        assert!(snapshot.total_amount.is_none());
        assert!(snapshot.placed_at.is_none());
    }

    #[test]
    fn test_broken_lines_keep_cardinality_and_order() {
        let document = order_document(json!({
            "lines": [
                { "product": "products/p_1", "quantity": 2, "unit_price": 9.99 },
                "not-an-object",
                { "product": "not a path", "quantity": "two", "unit_price": null }
            ]
        }));

        let snapshot = OrderSnapshot::parse(&document);
        assert_eq!(snapshot.lines.len(), 3);
        let broken = snapshot.lines.get(2).unwrap();
        assert!(broken.product.is_none());
        assert_eq!(broken.quantity, 0);
        assert_eq!(broken.unit_price, Decimal::ZERO);
    }

    #[test]
    fn test_wrong_typed_scalars_degrade_to_none() {
        let document = order_document(json!({
            "status": 3,
            "total_amount": true,
            "placed_at": []
        }));

        let snapshot = OrderSnapshot::parse(&document);
        assert!(snapshot.status.is_none());
        assert!(snapshot.total_amount.is_none());
        assert!(snapshot.placed_at.is_none());
    }
}
