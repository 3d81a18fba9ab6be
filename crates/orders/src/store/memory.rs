//! Seedable in-memory document store.
//!
//! Used by tests and local development. Besides plain documents it supports
//! per-path fault injection (to exercise the degrade-don't-abort paths) and
//! per-path artificial latency (to exercise completion-order and staleness
//! behavior under `tokio::time::pause`).

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};

use velocart_core::DocPath;

use super::{Document, DocumentStore, StoreError};

#[derive(Default)]
struct MemoryInner {
    documents: HashMap<String, Map<String, Value>>,
    faults: HashSet<String>,
    delays: HashMap<String, Duration>,
    accesses: Vec<String>,
}

/// In-memory [`DocumentStore`] implementation.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document at `path` from a JSON value.
    ///
    /// Non-object values seed an empty field bag; the store never rejects a
    /// document for shape, mirroring the production backend.
    pub fn seed(&self, path: &str, fields: Value) {
        let fields = fields.as_object().cloned().unwrap_or_default();
        self.lock().documents.insert(path.to_string(), fields);
    }

    /// Remove the document at `path`, if any.
    pub fn remove(&self, path: &str) {
        self.lock().documents.remove(path);
    }

    /// Make every `get` of `path` fail with [`StoreError::Unavailable`].
    pub fn fail_path(&self, path: &str) {
        self.lock().faults.insert(path.to_string());
    }

    /// Undo [`Self::fail_path`] for `path`.
    pub fn heal_path(&self, path: &str) {
        self.lock().faults.remove(path);
    }

    /// Delay every `get` of `path` by `delay` before responding.
    pub fn delay_path(&self, path: &str, delay: Duration) {
        self.lock().delays.insert(path.to_string(), delay);
    }

    /// Paths fetched so far, in request order.
    #[must_use]
    pub fn accesses(&self) -> Vec<String> {
        self.lock().accesses.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        // Lock poisoning only happens if a holder panicked; tests want the
        // state anyway.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, path: &DocPath) -> Result<Option<Document>, StoreError> {
        let key = path.to_string();
        let (snapshot, delay) = {
            let mut inner = self.lock();
            inner.accesses.push(key.clone());
            if inner.faults.contains(&key) {
                return Err(StoreError::Unavailable {
                    reason: format!("injected fault for {key}"),
                });
            }
            (
                inner.documents.get(&key).cloned(),
                inner.delays.get(&key).copied(),
            )
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(snapshot.map(|fields| Document::new(path.clone(), fields)))
    }
}
