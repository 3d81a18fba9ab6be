//! Order detail aggregation.
//!
//! The pipeline: [`snapshot`] parses the raw order document, [`resolver`]
//! fetches the records it references, [`aggregator`] joins the results into a
//! [`view::OrderDetailView`], and [`session`] owns the presentation-facing
//! lifecycle around it. [`duration`] and [`tracking`] hold the two derived
//! affordances (elapsed delivery time, map route).

pub mod aggregator;
pub mod duration;
pub mod resolver;
pub mod session;
pub mod snapshot;
pub mod tracking;
pub mod view;

pub use aggregator::OrderAggregator;
pub use duration::delivery_duration;
pub use resolver::{Resolved, resolve};
pub use session::{LoadState, OrderSession};
pub use snapshot::{CourierRecord, CustomerRecord, LineRef, OrderSnapshot, ProductRecord};
pub use tracking::TrackingRoute;
pub use view::{AddressView, CourierView, LineItemView, OrderDetailView};
