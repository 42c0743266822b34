//! Shopping cart held for the duration of a visitor's session.
//!
//! A [`Cart`] is an ordered list of line items. Each line is identified by a
//! [`LineKey`]: the product plus the options the shopper picked. Adding the
//! same product with the same options bumps the existing line instead of
//! creating a second one.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Identity of a cart line: product plus selected options, compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    /// Selected options in option-group order. Empty for products without
    /// an option group.
    pub options: Vec<String>,
}

impl LineKey {
    #[must_use]
    pub const fn new(product_id: ProductId, options: Vec<String>) -> Self {
        Self {
            product_id,
            options,
        }
    }
}

/// What the caller supplies when putting a product in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub image: String,
    pub options: Vec<String>,
}

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub image: String,
    /// Always at least 1 while the line exists.
    pub quantity: u32,
    pub options: Vec<String>,
}

impl CartItem {
    /// The key this line is stored under.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id.clone(), self.options.clone())
    }

    fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.options == key.options
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }
}

/// An in-memory shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add one unit of `item`.
    ///
    /// If a line with the same product and options exists its quantity goes
    /// up by one; otherwise a new line with quantity 1 is appended.
    pub fn add(&mut self, item: NewCartItem) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|line| line.product_id == item.product_id && line.options == item.options)
        {
            existing.quantity = existing.quantity.saturating_add(1);
            return;
        }

        self.items.push(CartItem {
            product_id: item.product_id,
            name: item.name,
            unit_price: item.unit_price,
            image: item.image,
            quantity: 1,
            options: item.options,
        });
    }

    /// Remove the line stored under `key`. Unknown keys are ignored.
    pub fn remove(&mut self, key: &LineKey) {
        self.items.retain(|line| !line.matches(key));
    }

    /// Overwrite the quantity of the line stored under `key`.
    ///
    /// A quantity of zero or less removes the line. Unknown keys are ignored.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: i64) {
        if quantity <= 0 {
            self.remove(key);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.items.iter_mut().find(|line| line.matches(key)) {
            line.quantity = quantity;
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of unit price times quantity across all lines.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, key: &LineKey) -> Option<&CartItem> {
        self.items.iter().find(|line| line.matches(key))
    }

    /// Number of distinct lines.
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
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sneaker(size: &str) -> NewCartItem {
        NewCartItem {
            product_id: ProductId::new("1"),
            name: "Runner".to_string(),
            unit_price: Price::from_cents(8950),
            image: "runner.jpg".to_string(),
            options: vec![size.to_string()],
        }
    }

    fn tee() -> NewCartItem {
        NewCartItem {
            product_id: ProductId::new("2"),
            name: "Tee".to_string(),
            unit_price: Price::from_dollars(20),
            image: String::new(),
            options: Vec::new(),
        }
    }

    #[test]
    fn test_add_same_line_twice_merges() {
        let mut cart = Cart::new();
        cart.add(sneaker("42"));
        cart.add(sneaker("42"));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_different_options_are_separate_lines() {
        let mut cart = Cart::new();
        cart.add(sneaker("42"));
        cart.add(sneaker("43"));
        cart.add(tee());

        assert_eq!(cart.len(), 3);
        let sizes: Vec<_> = cart.items().iter().map(|i| i.options.clone()).collect();
        assert_eq!(sizes, vec![vec!["42"], vec!["43"], Vec::<&str>::new()]);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(sneaker("42"));
        let key = cart.items()[0].key();

        cart.set_quantity(&key, 0);
        assert!(cart.is_empty());
        assert!(cart.get(&key).is_none());
    }

    #[test]
    fn test_set_quantity_negative_removes_line() {
        let mut cart = Cart::new();
        cart.add(tee());
        cart.set_quantity(&LineKey::new(ProductId::new("2"), Vec::new()), -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_overwrites() {
        let mut cart = Cart::new();
        cart.add(sneaker("42"));
        let key = cart.items()[0].key();

        cart.set_quantity(&key, 5);
        assert_eq!(cart.get(&key).unwrap().quantity, 5);
        assert_eq!(cart.total_price(), Price::from_cents(44750));
    }

    #[test]
    fn test_unknown_key_is_noop() {
        let mut cart = Cart::new();
        cart.add(sneaker("42"));
        let other = LineKey::new(ProductId::new("1"), vec!["44".to_string()]);

        cart.set_quantity(&other, 9);
        cart.remove(&other);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_remove_keeps_other_lines_in_order() {
        let mut cart = Cart::new();
        cart.add(sneaker("42"));
        cart.add(tee());
        cart.add(sneaker("43"));

        let middle = cart.items()[1].key();
        cart.remove(&middle);
        let ids: Vec<_> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "1"]);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(sneaker("42"));
        cart.add(tee());
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Price::ZERO);
    }

    #[test]
    fn test_survives_json_roundtrip() {
        let mut cart = Cart::new();
        cart.add(sneaker("42"));
        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }

    proptest! {
        #[test]
        fn total_price_is_sum_of_line_totals(
            lines in prop::collection::vec((0u32..10, 1i64..100_000, 1i64..20), 0..20)
        ) {
            let mut cart = Cart::new();
            // id -> (price of first add, last quantity set)
            let mut model = std::collections::BTreeMap::new();
            for (id, cents, quantity) in &lines {
                let product_id = ProductId::new(id.to_string());
                cart.add(NewCartItem {
                    product_id: product_id.clone(),
                    name: String::new(),
                    unit_price: Price::from_cents(*cents),
                    image: String::new(),
                    options: Vec::new(),
                });
                cart.set_quantity(&LineKey::new(product_id, Vec::new()), *quantity);
                model.entry(*id).or_insert((*cents, 0)).1 = *quantity;
            }

            let expected_cents: i64 = model.values().map(|(cents, qty)| cents * qty).sum();
            let expected_items: i64 = model.values().map(|(_, qty)| qty).sum();
            prop_assert_eq!(cart.len(), model.len());
            prop_assert_eq!(cart.total_price(), Price::from_cents(expected_cents));
            prop_assert_eq!(cart.total_items(), u64::try_from(expected_items).unwrap());
        }
    }
}
