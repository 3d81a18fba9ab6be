//! Order status tags.

use serde::{Deserialize, Serialize};

/// Order delivery status.
///
/// The store treats status as an open-ended string tag; unknown tags are
/// preserved verbatim rather than rejected, so a status introduced by a newer
/// writer still displays.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    Delivering,
    Finished,
    /// A tag this build does not know about.
    Other(String),
}

impl OrderStatus {
    /// The display tag for this status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Delivering => "Delivering",
            Self::Finished => "Finished",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "Pending" => Self::Pending,
            "Delivering" => Self::Delivering,
            "Finished" => Self::Finished,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags_round_trip() {
        for tag in ["Pending", "Delivering", "Finished"] {
            let status = OrderStatus::from(tag);
            assert!(!matches!(status, OrderStatus::Other(_)));
            assert_eq!(status.as_str(), tag);
        }
    }

    #[test]
    fn test_unknown_tag_is_preserved() {
        let status = OrderStatus::from("AwaitingPickup");
        assert_eq!(status, OrderStatus::Other("AwaitingPickup".to_string()));
        assert_eq!(status.to_string(), "AwaitingPickup");
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }
}
