//! Document paths and typed cross-document references.
//!
//! Records in the document store refer to each other by path strings such as
//! `"customers/c_1"`. [`DocPath`] is the parsed form of such a path;
//! [`Reference`] adds a compile-time marker for the record type the path is
//! expected to designate, so an order's customer reference cannot be handed
//! to a product lookup by accident.

use core::fmt;
use core::marker::PhantomData;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`DocPath`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The input string is empty.
    #[error("document path cannot be empty")]
    Empty,
    /// The input does not contain a `/` separator.
    #[error("document path must be of the form collection/id: {0}")]
    MissingSeparator(String),
    /// The collection segment (before the last `/`) is empty.
    #[error("document path has an empty collection segment: {0}")]
    EmptyCollection(String),
    /// The identifier segment (after the last `/`) is empty.
    #[error("document path has an empty identifier segment: {0}")]
    EmptyId(String),
}

/// A location in the document store: collection name plus record identifier.
///
/// Displays (and serializes) back to the `collection/id` wire form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocPath {
    collection: String,
    id: String,
}

impl DocPath {
    /// Create a path from already-separated segments.
    #[must_use]
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Parse a `collection/id` path string.
    ///
    /// Sub-collection paths (`a/b/c/d`) are accepted: everything before the
    /// last separator is the collection.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] when the string is empty, has no separator, or
    /// has an empty segment on either side of the last separator.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        let Some((collection, id)) = path.rsplit_once('/') else {
            return Err(PathError::MissingSeparator(path.to_string()));
        };
        if collection.is_empty() {
            return Err(PathError::EmptyCollection(path.to_string()));
        }
        if id.is_empty() {
            return Err(PathError::EmptyId(path.to_string()));
        }
        Ok(Self::new(collection, id))
    }

    /// The collection segment.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The record identifier segment.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

impl TryFrom<String> for DocPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DocPath> for String {
    fn from(path: DocPath) -> Self {
        path.to_string()
    }
}

/// A typed reference to another record, resolved on demand.
///
/// The type parameter is a phantom marker only; it never affects the wire
/// form. It exists so resolution sites state what record shape they expect.
pub struct Reference<T> {
    path: DocPath,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Reference<T> {
    /// Create a reference from a parsed path.
    #[must_use]
    pub const fn new(path: DocPath) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Parse a reference from a `collection/id` path string.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] when the path string is malformed.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        DocPath::parse(path).map(Self::new)
    }

    /// The path this reference points at.
    #[must_use]
    pub const fn path(&self) -> &DocPath {
        &self.path
    }
}

// Manual impls: derives would demand `T: Clone` etc. even though the marker
// carries no value of type T.
impl<T> Clone for Reference<T> {
    fn clone(&self) -> Self {
        Self::new(self.path.clone())
    }
}

impl<T> fmt::Debug for Reference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Reference").field(&self.path).finish()
    }
}

impl<T> PartialEq for Reference<T> {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl<T> Eq for Reference<T> {}

impl<T> fmt::Display for Reference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.path.fmt(f)
    }
}
