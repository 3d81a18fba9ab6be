//! The display-ready view-model.
//!
//! Everything the presentation layer shows comes from these structs. They are
//! fully derived from fetched documents, rebuilt on every load, and never
//! mutated in place.

use serde::Serialize;

use velocart_core::{GeoPoint, Money, OrderId, OrderStatus};

/// Customer fallback when the order never recorded who bought it.
pub const NO_CUSTOMER_ON_RECORD: &str = "No customer on record";
/// Customer fallback when the referenced record is gone (or unreachable).
pub const UNKNOWN_CUSTOMER: &str = "Unknown customer";
/// Customer fallback when the record exists but carries no usable name.
pub const UNNAMED_CUSTOMER: &str = "Unnamed customer";

/// Product fallback when a line carries no reference at all.
pub const NO_PRODUCT_REFERENCE: &str = "No product reference";
/// Product fallback when the referenced record is gone (or unreachable).
pub const UNKNOWN_PRODUCT: &str = "Unknown product";
/// Product fallback when the record exists but carries no usable name.
pub const UNNAMED_PRODUCT: &str = "Unnamed product";

/// Courier name fallback when the record exists but carries no usable name.
pub const UNNAMED_COURIER: &str = "Unnamed courier";

/// Address line fallback.
pub const NO_ADDRESS: &str = "No address";
/// Address label fallback.
pub const UNKNOWN_LABEL: &str = "Unknown label";
/// Placed-at fallback for an order document with no readable timestamp.
pub const UNKNOWN_DATE: &str = "Unknown date";

/// One order's consolidated detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetailView {
    pub id: OrderId,
    pub customer_name: String,
    pub address: AddressView,
    pub lines: Vec<LineItemView>,
    pub status: OrderStatus,
    /// The stored total, surfaced verbatim; never reconciled against the
    /// line subtotals.
    pub total: Money,
    pub placed_at: String,
    pub shipping_started_at: Option<String>,
    pub finished_at: Option<String>,
    pub courier: Option<CourierView>,
    pub delivery_duration: Option<String>,
}

/// Delivery address as displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressView {
    pub line: String,
    pub label: String,
    pub location: GeoPoint,
}

/// One resolved order line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItemView {
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
}

impl LineItemView {
    /// Quantity × unit price, computed at render time and never stored.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// The assigned courier, present only when the order references one and the
/// record resolves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourierView {
    pub name: String,
    pub photo_url: String,
    pub last_location: Option<GeoPoint>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use velocart_core::CurrencyCode;

    #[test]
    fn test_subtotal_is_quantity_times_unit_price() {
        let line = LineItemView {
            product_name: "Flat white".to_string(),
            quantity: 2,
            unit_price: Money::new("9.99".parse().unwrap(), CurrencyCode::EUR),
        };
        assert_eq!(line.subtotal().display(), "€19.98");
    }

    #[test]
    fn test_fallback_strings_are_pairwise_distinct() {
        let fallbacks = [
            NO_CUSTOMER_ON_RECORD,
            UNKNOWN_CUSTOMER,
            UNNAMED_CUSTOMER,
            NO_PRODUCT_REFERENCE,
            UNKNOWN_PRODUCT,
            UNNAMED_PRODUCT,
        ];
        for (i, a) in fallbacks.iter().enumerate() {
            for b in fallbacks.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
