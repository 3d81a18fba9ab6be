//! Velocart Orders - back-office order detail aggregation.
//!
//! This crate assembles a single order's detail view out of the records
//! scattered across the document store: the order itself, the purchasing
//! customer, the assigned delivery courier, and each ordered product. The
//! result is a flat, display-ready [`order::OrderDetailView`]; everything the
//! presentation layer shows comes from it and nothing else.
//!
//! # Architecture
//!
//! - [`store`] - the read-only document store boundary: the
//!   [`store::DocumentStore`] trait, a seedable in-memory implementation, and
//!   defensive readers over untyped field bags.
//! - [`order`] - snapshot parsing, reference resolution, the aggregator, the
//!   view-model, the delivery-duration calculator, the tracking gate, and the
//!   presentation-facing [`order::OrderSession`].
//! - [`config`] - environment-driven configuration for the ambient knobs
//!   (collection name, date-time pattern, placeholder assets).
//!
//! The aggregator is a pure read path: no caching, no pagination, no writes.
//! Failures on secondary lookups degrade individual fields to placeholders;
//! only the root order record decides between found, not found, and fault.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod order;
pub mod store;

pub use config::{ConfigError, OrdersConfig};
pub use order::{
    LoadState, OrderAggregator, OrderDetailView, OrderSession, TrackingRoute,
};
pub use store::{Document, DocumentStore, MemoryStore, StoreError};
