//! Shopping cart.
//!
//! Lines are keyed by item name and kept in the order they were first
//! added. Quantities are not bounded: whatever the
//! quantity control sends is stored as-is.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use quickcart_core::Price;

use crate::prompt::Confirm;

/// A named product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    /// Normally at least 1, but see [`Cart::update_quantity`].
    pub quantity: i64,
    /// Unit price, fixed when the line was created.
    pub price: Price,
}

impl LineItem {
    /// Quantity times unit price.
    #[must_use]
    pub fn total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// The shopping cart.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `name`.
    ///
    /// Adding a name already in the cart bumps its quantity and keeps the
    /// original unit price, even if `price` differs.
    pub fn add(&mut self, name: &str, price: Price) {
        if let Some(item) = self.find_mut(name) {
            item.quantity = item.quantity.saturating_add(1);
            debug!(name, quantity = item.quantity, "Cart quantity incremented");
            return;
        }

        self.items.push(LineItem {
            name: name.to_owned(),
            quantity: 1,
            price,
        });
        debug!(name, %price, "Cart line added");
    }

    /// Remove the line for `name` after asking the user.
    ///
    /// Returns `true` if a line was removed. Declining, or naming an item
    /// that is not in the cart, leaves the cart unchanged.
    pub fn remove(&mut self, name: &str, confirm: &mut impl Confirm) -> bool {
        let message = format!("Are you sure you want to remove {name} from the cart?");
        if !confirm.confirm(&message) {
            debug!(name, "Cart removal declined");
            return false;
        }

        let before = self.items.len();
        self.items.retain(|item| item.name != name);
        let removed = self.items.len() != before;
        if removed {
            info!(name, "Cart line removed");
        }
        removed
    }

    /// Overwrite the quantity for `name`.
    ///
    /// No bounds are enforced; zero and negative quantities are stored as
    /// given. Returns `false` if `name` is not in the cart.
    pub fn update_quantity(&mut self, name: &str, quantity: i64) -> bool {
        let Some(item) = self.find_mut(name) else {
            return false;
        };
        item.quantity = quantity;
        debug!(name, quantity, "Cart quantity updated");
        true
    }

    /// Sum of quantity times price over every line.
    #[must_use]
    pub fn grand_total(&self) -> Price {
        self.items.iter().map(LineItem::total).sum()
    }

    /// Total number of units across all lines, clamped to the `i64` range.
    #[must_use]
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |count, item| count.saturating_add(item.quantity))
    }

    /// Lines in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up the line for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Empty the cart, returning its lines.
    pub fn take_items(&mut self) -> Vec<LineItem> {
        std::mem::take(&mut self.items)
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.name == name)
    }
}
