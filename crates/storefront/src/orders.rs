//! Order tracking.
//!
//! Placing an order snapshots the cart into an [`Order`] in
//! [`OrderStatus::Placed`]. From there an order only moves forward one step
//! at a time along the table in [`OrderStatus::next`]; every mutation checks
//! that table itself, so a caller cannot skip or rewind a status no matter
//! which controls the front end chooses to show.
//!
//! Orders live in memory only. Dropping the tracker loses them.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use quickcart_core::{OrderId, OrderStatus, Price, TrackingId};

use crate::cart::{Cart, LineItem};
use crate::prompt::Confirm;

/// Errors that can occur when placing or updating orders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Nothing in the cart to order.
    #[error("cart is empty")]
    EmptyCart,

    /// Shipping address is empty or whitespace.
    #[error("shipping address is required")]
    MissingShippingAddress,

    /// No order with this ID.
    #[error("order {0} not found")]
    NotFound(OrderId),

    /// The requested status change is not an edge of the lifecycle.
    #[error("order {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// The order has no further status to move to.
    #[error("order {id} is already {status}")]
    AlreadyFinal { id: OrderId, status: OrderStatus },

    /// Cancellation is only allowed while processing.
    #[error("order {id} cannot be cancelled while {status}")]
    NotCancellable { id: OrderId, status: OrderStatus },
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Cart lines as they were when the order was placed.
    pub items: Vec<LineItem>,
    pub shipping_address: String,
    pub status: OrderStatus,
    pub tracking_id: TrackingId,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Sum of the snapshotted line totals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(LineItem::total).sum()
    }
}

/// Outcome of a cancellation request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cancellation {
    /// The user confirmed; the order is gone.
    Cancelled(Order),
    /// The user declined; nothing changed.
    Declined,
}

/// The list of placed orders and the ID counter.
#[derive(Debug, Clone)]
pub struct OrderTracker {
    orders: Vec<Order>,
    next_id: OrderId,
}

impl Default for OrderTracker {
    fn default() -> Self {
        Self {
            orders: Vec::new(),
            next_id: OrderId::FIRST,
        }
    }
}

impl OrderTracker {
    /// A tracker with no orders.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn the cart into a new order.
    ///
    /// On success the cart is emptied and the new order's ID is returned. IDs come
    /// from a counter that never goes backwards, so an ID freed by a
    /// cancellation is never handed out again.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyCart` if the cart has no lines and
    /// `OrderError::MissingShippingAddress` if the address is blank. Neither
    /// the cart nor the order list changes on error.
    #[instrument(skip(self, cart, rng), fields(lines = cart.len()))]
    pub fn place_order(
        &mut self,
        cart: &mut Cart,
        shipping_address: &str,
        rng: &mut impl Rng,
    ) -> Result<OrderId, OrderError> {
        if cart.is_empty() {
            warn!("Order rejected, cart is empty");
            return Err(OrderError::EmptyCart);
        }
        if shipping_address.trim().is_empty() {
            warn!("Order rejected, no shipping address");
            return Err(OrderError::MissingShippingAddress);
        }

        let id = self.next_id;
        self.next_id = id.next();

        let order = Order {
            id,
            items: cart.take_items(),
            shipping_address: shipping_address.to_owned(),
            status: OrderStatus::Placed,
            tracking_id: TrackingId::new(rng.random_range(0..TrackingId::UPPER_BOUND)),
            placed_at: Utc::now(),
        };

        info!(
            order_id = %order.id,
            tracking_id = %order.tracking_id,
            total = %order.total(),
            "Order placed"
        );

        self.orders.push(order);
        Ok(id)
    }

    /// Move an order to the next status in its lifecycle.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` for an unknown ID and
    /// `OrderError::AlreadyFinal` for a delivered order.
    pub fn advance(&mut self, id: OrderId) -> Result<OrderStatus, OrderError> {
        let order = self.get_mut(id)?;
        let next = order.status.next().ok_or(OrderError::AlreadyFinal {
            id,
            status: order.status,
        })?;
        self.update_status(id, next)
    }

    /// Move an order to `target`.
    ///
    /// Only the single forward edge out of the current status is accepted;
    /// skipping ahead, repeating the current status, or going backwards is
    /// rejected and the order is left as it was.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` for an unknown ID and
    /// `OrderError::InvalidTransition` for anything but the next status.
    #[instrument(skip(self))]
    pub fn update_status(
        &mut self,
        id: OrderId,
        target: OrderStatus,
    ) -> Result<OrderStatus, OrderError> {
        let order = self.get_mut(id)?;
        let from = order.status;

        if !from.can_transition_to(target) {
            warn!(%from, to = %target, "Rejected order status change");
            return Err(OrderError::InvalidTransition {
                id,
                from,
                to: target,
            });
        }

        order.status = target;
        info!(%from, to = %target, "Order status updated");
        Ok(target)
    }

    /// Cancel an order after asking the user.
    ///
    /// Cancelled orders are removed outright; there is no cancelled status.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` for an unknown ID and
    /// `OrderError::NotCancellable` unless the order is processing. The user
    /// is not asked in either case.
    #[instrument(skip(self, confirm))]
    pub fn cancel(
        &mut self,
        id: OrderId,
        confirm: &mut impl Confirm,
    ) -> Result<Cancellation, OrderError> {
        let (index, status) = self
            .orders
            .iter()
            .enumerate()
            .find(|(_, o)| o.id == id)
            .map(|(index, o)| (index, o.status))
            .ok_or(OrderError::NotFound(id))?;

        if !status.is_cancellable() {
            warn!(%status, "Rejected cancellation");
            return Err(OrderError::NotCancellable { id, status });
        }

        if !confirm.confirm(&format!("Are you sure you want to cancel order ID: {id}?")) {
            debug!("Cancellation declined");
            return Ok(Cancellation::Declined);
        }

        let order = self.orders.remove(index);
        info!(tracking_id = %order.tracking_id, "Order cancelled");
        Ok(Cancellation::Cancelled(order))
    }

    /// Look up an order.
    #[must_use]
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Orders in the order they were placed.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    fn get_mut(&mut self, id: OrderId) -> Result<&mut Order, OrderError> {
        self.orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(OrderError::NotFound(id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::prompt::AutoConfirm;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn cart_with(lines: &[(&str, i64)]) -> Cart {
        let mut cart = Cart::new();
        for (name, price) in lines {
            cart.add(name, Price::from_whole(*price));
        }
        cart
    }

    fn placed(tracker: &mut OrderTracker) -> OrderId {
        let mut cart = cart_with(&[("Lamp", 40)]);
        tracker
            .place_order(&mut cart, "221B Baker Street", &mut rng())
            .unwrap()
    }

    #[test]
    fn test_place_order_rejects_empty_cart() {
        let mut tracker = OrderTracker::new();
        let mut cart = Cart::new();

        let err = tracker
            .place_order(&mut cart, "221B Baker Street", &mut rng())
            .unwrap_err();
        assert_eq!(err, OrderError::EmptyCart);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_place_order_rejects_blank_address() {
        let mut tracker = OrderTracker::new();
        let mut cart = cart_with(&[("Lamp", 40)]);

        for address in ["", "   ", "\t\n"] {
            let err = tracker.place_order(&mut cart, address, &mut rng()).unwrap_err();
            assert_eq!(err, OrderError::MissingShippingAddress);
        }
        assert!(tracker.is_empty());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_place_order_snapshots_and_clears_cart() {
        let mut tracker = OrderTracker::new();
        let mut cart = cart_with(&[("Lamp", 40), ("Lamp", 40), ("Rug", 90)]);

        let id = tracker
            .place_order(&mut cart, "221B Baker Street", &mut rng())
            .unwrap();
        let order = tracker.get(id).unwrap().clone();

        assert_eq!(order.id, OrderId::FIRST);
        assert_eq!(order.status, OrderStatus::Placed);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.total(), Price::from_whole(170));
        assert_eq!(order.shipping_address, "221B Baker Street");
        assert!(order.tracking_id.as_u32() < TrackingId::UPPER_BOUND);
        assert!(cart.is_empty());
        assert_eq!(tracker.len(), 1);

        // The snapshot does not follow later cart edits.
        cart.add("Lamp", Price::from_whole(40));
        assert_eq!(tracker.get(order.id).unwrap().items.len(), 2);
    }

    #[test]
    fn test_full_lifecycle() {
        let mut tracker = OrderTracker::new();
        let id = placed(&mut tracker);

        assert_eq!(tracker.advance(id).unwrap(), OrderStatus::Processing);
        assert_eq!(tracker.advance(id).unwrap(), OrderStatus::Dispatched);
        assert_eq!(tracker.advance(id).unwrap(), OrderStatus::Delivered);
        assert_eq!(
            tracker.advance(id).unwrap_err(),
            OrderError::AlreadyFinal {
                id,
                status: OrderStatus::Delivered
            }
        );
    }

    #[test]
    fn test_skipping_a_status_is_rejected() {
        let mut tracker = OrderTracker::new();
        let id = placed(&mut tracker);

        let err = tracker.update_status(id, OrderStatus::Dispatched).unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition {
                id,
                from: OrderStatus::Placed,
                to: OrderStatus::Dispatched,
            }
        );
        assert_eq!(tracker.get(id).unwrap().status, OrderStatus::Placed);

        tracker.update_status(id, OrderStatus::Processing).unwrap();
        assert!(tracker.update_status(id, OrderStatus::Placed).is_err());
        assert!(tracker.update_status(id, OrderStatus::Processing).is_err());
        assert!(tracker.update_status(id, OrderStatus::Delivered).is_err());
        assert_eq!(tracker.get(id).unwrap().status, OrderStatus::Processing);
    }

    #[test]
    fn test_unknown_order() {
        let mut tracker = OrderTracker::new();
        let missing = OrderId::new(99);

        assert_eq!(tracker.advance(missing), Err(OrderError::NotFound(missing)));
        assert_eq!(
            tracker.cancel(missing, &mut AutoConfirm::YES),
            Err(OrderError::NotFound(missing))
        );
    }

    #[test]
    fn test_cancel_only_while_processing() {
        let mut tracker = OrderTracker::new();
        let id = placed(&mut tracker);

        let mut asked = false;
        let err = tracker
            .cancel(id, &mut |_: &str| {
                asked = true;
                true
            })
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::NotCancellable {
                id,
                status: OrderStatus::Placed
            }
        );
        assert!(!asked);

        tracker.advance(id).unwrap();
        tracker.advance(id).unwrap();
        assert!(matches!(
            tracker.cancel(id, &mut AutoConfirm::YES),
            Err(OrderError::NotCancellable { .. })
        ));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_cancel_removes_order() {
        let mut tracker = OrderTracker::new();
        let first = placed(&mut tracker);
        let second = placed(&mut tracker);
        tracker.advance(first).unwrap();

        assert_eq!(
            tracker.cancel(first, &mut AutoConfirm::NO).unwrap(),
            Cancellation::Declined
        );
        assert_eq!(tracker.len(), 2);

        let mut prompt = String::new();
        let outcome = tracker
            .cancel(first, &mut |message: &str| {
                prompt = message.to_string();
                true
            })
            .unwrap();
        assert!(matches!(outcome, Cancellation::Cancelled(ref o) if o.id == first));
        assert_eq!(prompt, "Are you sure you want to cancel order ID: 1?");
        assert_eq!(tracker.len(), 1);
        assert!(tracker.get(first).is_none());
        assert!(tracker.get(second).is_some());
    }

    #[test]
    fn test_ids_are_not_reused_after_cancel() {
        let mut tracker = OrderTracker::new();
        let first = placed(&mut tracker);
        let second = placed(&mut tracker);
        tracker.advance(second).unwrap();
        tracker.cancel(second, &mut AutoConfirm::YES).unwrap();

        let third = placed(&mut tracker);
        assert_ne!(third, first);
        assert_ne!(third, second);
        assert_eq!(third, OrderId::new(3));
    }
}
