//! Order status and its transition table.
//!
//! Orders walk a fixed, linear lifecycle:
//!
//! ```text
//! Placed -> Processing -> Dispatched -> Delivered
//!               |
//!               +-> (cancelled: removed from the order list)
//! ```
//!
//! Cancellation is not a status. A cancelled order simply stops existing, so
//! the table below only knows about forward moves; [`OrderStatus::is_cancellable`]
//! answers the side question.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Delivery status of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order accepted, nothing has happened yet.
    #[default]
    Placed,
    /// Being prepared. The only status from which an order can be cancelled.
    Processing,
    /// Handed to the carrier.
    Dispatched,
    /// Terminal.
    Delivered,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Placed,
        Self::Processing,
        Self::Dispatched,
        Self::Delivered,
    ];

    /// The single status this one may move to, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Placed => Some(Self::Processing),
            Self::Processing => Some(Self::Dispatched),
            Self::Dispatched => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }

    /// Whether moving from this status to `target` is a legal transition.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }

    /// Whether an order in this status may be cancelled.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        matches!(self, Self::Processing)
    }

    /// Whether this status has no successor.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Label of the control that performs the next transition.
    ///
    /// For [`OrderStatus::Delivered`] this is the text of the disabled control
    /// shown in place of an action.
    #[must_use]
    pub const fn action_label(self) -> &'static str {
        match self {
            Self::Placed => "Start Processing",
            Self::Processing => "Dispatch",
            Self::Dispatched => "Deliver",
            Self::Delivered => "Delivered",
        }
    }

    /// Status name as displayed and serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Placed => "Placed",
            Self::Processing => "Processing",
            Self::Dispatched => "Dispatched",
            Self::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid order status: {s}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_edges() {
        assert_eq!(OrderStatus::Placed.next(), Some(OrderStatus::Processing));
        assert_eq!(OrderStatus::Processing.next(), Some(OrderStatus::Dispatched));
        assert_eq!(OrderStatus::Dispatched.next(), Some(OrderStatus::Delivered));
        assert_eq!(OrderStatus::Delivered.next(), None);
    }

    #[test]
    fn test_only_the_next_status_is_reachable() {
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                assert_eq!(
                    from.can_transition_to(to),
                    from.next() == Some(to),
                    "{from} -> {to}"
                );
            }
        }
        assert!(!OrderStatus::Placed.can_transition_to(OrderStatus::Dispatched));
        assert!(!OrderStatus::Dispatched.can_transition_to(OrderStatus::Processing));
        assert!(!OrderStatus::Processing.can_transition_to(OrderStatus::Processing));
    }

    #[test]
    fn test_only_processing_is_cancellable() {
        let cancellable: Vec<_> = OrderStatus::ALL
            .into_iter()
            .filter(|s| s.is_cancellable())
            .collect();
        assert_eq!(cancellable, vec![OrderStatus::Processing]);
    }

    #[test]
    fn test_terminal() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(!OrderStatus::Placed.is_terminal());
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(OrderStatus::Placed.action_label(), "Start Processing");
        assert_eq!(OrderStatus::Processing.action_label(), "Dispatch");
        assert_eq!(OrderStatus::Dispatched.action_label(), "Deliver");
        assert_eq!(OrderStatus::Delivered.action_label(), "Delivered");
    }

    #[test]
    fn test_display_and_parse() {
        for status in OrderStatus::ALL {
            assert_eq!(status.to_string().parse::<OrderStatus>().unwrap(), status);
        }
        assert_eq!("dispatched".parse::<OrderStatus>().unwrap(), OrderStatus::Dispatched);
        assert!("Cancelled".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&OrderStatus::Processing).unwrap();
        assert_eq!(json, "\"Processing\"");
    }
}
