//! Core types for Velocart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod geo;
pub mod id;
pub mod money;
pub mod reference;
pub mod status;

pub use geo::GeoPoint;
pub use id::*;
pub use money::{CurrencyCode, Money};
pub use reference::{DocPath, PathError, Reference};
pub use status::OrderStatus;
