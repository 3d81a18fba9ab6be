//! Reference resolution with explicit outcomes.
//!
//! The aggregator needs to tell apart "the order never had this reference",
//! "the reference points at nothing", and "the lookup itself failed", because
//! each maps to a different fallback on the view. A plain
//! `Option<Result<..>>` would let those collapse into each other at call
//! sites.

use tracing::warn;

use velocart_core::{DocPath, Reference};

use crate::store::{Document, DocumentStore};

/// Outcome of resolving one optional reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<T> {
    /// The field was never set on the referencing document.
    NoReference,
    /// A reference was supplied but its target does not exist.
    Missing { path: DocPath },
    /// A transport fault occurred while fetching the target.
    Fault { path: DocPath },
    /// The target exists and parsed.
    Found(T),
}

impl<T> Resolved<T> {
    /// The parsed record, if resolution succeeded.
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(record) => Some(record),
            _ => None,
        }
    }
}

/// Resolve an optional reference through the store.
///
/// Never fails: a missing target or a transport fault is logged and returned
/// as its own outcome so the caller can degrade just that field.
pub async fn resolve<T, F>(
    store: &dyn DocumentStore,
    reference: Option<&Reference<T>>,
    parse: F,
) -> Resolved<T>
where
    F: FnOnce(&Document) -> T,
{
    let Some(reference) = reference else {
        return Resolved::NoReference;
    };
    let path = reference.path().clone();
    match store.get(&path).await {
        Ok(Some(document)) => Resolved::Found(parse(&document)),
        Ok(None) => {
            warn!(%path, "referenced record does not exist");
            Resolved::Missing { path }
        }
        Err(error) => {
            warn!(%path, %error, "lookup failed for referenced record");
            Resolved::Fault { path }
        }
    }
}
