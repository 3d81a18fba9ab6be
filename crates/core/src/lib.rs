//! Velocart Core - Shared types library.
//!
//! This crate provides common types used across all Velocart components:
//! - `orders` - Back-office order detail aggregation
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no document store
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, document references,
//!   geo coordinates, money, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
