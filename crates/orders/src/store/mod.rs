//! The document store boundary.
//!
//! The aggregator only ever reads. It sees the store as an object-safe
//! [`DocumentStore`] trait returning optional [`Document`] snapshots, which
//! keeps the whole read path testable against the in-memory implementation
//! in [`memory`].

pub mod fields;
pub mod memory;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use velocart_core::DocPath;

pub use memory::MemoryStore;

/// A point-in-time snapshot of one record: its path plus an untyped field bag.
///
/// Every field is treated as possibly absent, null, or wrong-typed; the
/// readers in [`fields`] apply that discipline.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub path: DocPath,
    pub fields: Map<String, Value>,
}

impl Document {
    /// Create a snapshot from a path and field bag.
    #[must_use]
    pub const fn new(path: DocPath, fields: Map<String, Value>) -> Self {
        Self { path, fields }
    }

    /// The record identifier segment of the path.
    #[must_use]
    pub fn id(&self) -> &str {
        self.path.id()
    }
}

/// Transport-level faults while talking to the document store.
///
/// A missing document is not an error; those surface as `Ok(None)`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store unavailable: {reason}")]
    Unavailable { reason: String },
    #[error("document store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Read-only access to the document store.
///
/// Injected into the aggregator as `Arc<dyn DocumentStore>` so tests can run
/// against [`MemoryStore`] instead of a live backend.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the document at `path`, or `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only for transport faults; a missing document
    /// is never an error.
    async fn get(&self, path: &DocPath) -> Result<Option<Document>, StoreError>;
}
