//! The delivery-tracking gate.
//!
//! A map route is only meaningful when there is both a destination and a
//! courier position to draw. The destination always exists on the view (it
//! defaults to the origin point when the order had none), so the gate is the
//! courier's last-known location: no courier, or a courier who never reported
//! a position, means no route.

use serde::Serialize;

use velocart_core::GeoPoint;

use super::view::OrderDetailView;

/// The two coordinate pairs the external map widget consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackingRoute {
    /// The delivery address location.
    pub destination: GeoPoint,
    /// The courier's last-known location.
    pub courier: GeoPoint,
}

impl TrackingRoute {
    /// The route for a view, when one is offerable.
    #[must_use]
    pub fn for_view(view: &OrderDetailView) -> Option<Self> {
        let courier = view.courier.as_ref()?.last_location?;
        Some(Self {
            destination: view.address.location,
            courier,
        })
    }
}
