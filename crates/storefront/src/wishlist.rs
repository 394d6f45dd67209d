//! Wishlist.

use serde::{Deserialize, Serialize};
use tracing::debug;

use quickcart_core::Price;

/// A wished-for item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub name: String,
    pub price: Price,
}

/// An ordered list of wished-for items. Duplicates are allowed.
#[derive(Debug, Clone, Default)]
pub struct Wishlist {
    items: Vec<WishlistItem>,
}

impl Wishlist {
    /// An empty wishlist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item, even if one with the same name is already listed.
    pub fn add(&mut self, name: &str, price: Price) {
        self.items.push(WishlistItem {
            name: name.to_owned(),
            price,
        });
        debug!(name, %price, "Wishlist item added");
    }

    /// Remove every entry named `name`, returning how many were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.name != name);
        let removed = before - self.items.len();
        debug!(name, removed, "Wishlist items removed");
        removed
    }

    /// Items in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_duplicates() {
        let mut wishlist = Wishlist::new();
        wishlist.add("Lamp", Price::from_whole(40));
        wishlist.add("Lamp", Price::from_whole(40));
        assert_eq!(wishlist.len(), 2);
    }

    #[test]
    fn test_remove_drops_every_match() {
        let mut wishlist = Wishlist::new();
        wishlist.add("Lamp", Price::from_whole(40));
        wishlist.add("Rug", Price::from_whole(90));
        wishlist.add("Lamp", Price::from_whole(45));

        assert_eq!(wishlist.remove("Lamp"), 2);
        assert_eq!(wishlist.items().len(), 1);
        assert_eq!(wishlist.items()[0].name, "Rug");
        assert_eq!(wishlist.remove("Lamp"), 0);
    }
}
