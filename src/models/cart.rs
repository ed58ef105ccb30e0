use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::line_item::LineItem;
use crate::services::pricing::{self, Totals};

/// Inclusive quantity bounds for a single line item.
pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 99;

/// Input for adding a product to a cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLineItem {
    pub product_id: Uuid,
    pub name: String,
    /// Unit price sourced from the catalog at add time; assumed non-negative
    /// (enforced upstream by the catalog boundary).
    pub unit_price: Decimal,
    pub quantity: u32,
    pub note: Option<String>,
    pub prep_minutes: Option<u32>,
}

/// A customer's shopping cart: the only owner of its line items.
///
/// Items keep insertion order for display; totals are order-independent and
/// recomputed through the pricing calculator on every mutation, so the cart
/// never carries stale money. One cart belongs to one session at a time —
/// nothing here is shared or synchronized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
    totals: Totals,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn item(&self, item_id: Uuid) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    pub fn subtotal(&self) -> Decimal {
        self.totals.subtotal
    }

    pub fn tax(&self) -> Decimal {
        self.totals.tax
    }

    pub fn total(&self) -> Decimal {
        self.totals.total
    }

    /// Adds a product to the cart, merging quantities when the same product is
    /// already present. Returns the id of the affected line item.
    ///
    /// The resulting quantity must land within [1, 99]; anything else is
    /// rejected with [`ServiceError::QuantityOutOfRange`] and the cart is left
    /// unchanged — quantities are never silently clamped.
    pub fn add_item(&mut self, input: NewLineItem) -> Result<Uuid, ServiceError> {
        if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&input.quantity) {
            return Err(ServiceError::QuantityOutOfRange(input.quantity));
        }

        let id = if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == input.product_id)
        {
            let merged = existing.quantity + input.quantity;
            if merged > MAX_QUANTITY {
                return Err(ServiceError::QuantityOutOfRange(merged));
            }
            existing.quantity = merged;
            existing.id
        } else {
            let id = Uuid::new_v4();
            self.items.push(LineItem {
                id,
                product_id: input.product_id,
                name: input.name,
                unit_price: input.unit_price,
                quantity: input.quantity,
                note: input.note,
                prep_minutes: input.prep_minutes,
            });
            id
        };

        self.recompute();
        Ok(id)
    }

    /// Sets the quantity of an existing line item.
    ///
    /// A quantity of 0 removes the item (removing the last unit removes the
    /// line); values above 99 are rejected without touching the cart.
    pub fn update_quantity(&mut self, item_id: Uuid, quantity: u32) -> Result<(), ServiceError> {
        if quantity > MAX_QUANTITY {
            return Err(ServiceError::QuantityOutOfRange(quantity));
        }

        let index = self
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| ServiceError::NotFound(format!("Cart item {} not found", item_id)))?;

        if quantity == 0 {
            self.items.remove(index);
        } else {
            self.items[index].quantity = quantity;
        }

        self.recompute();
        Ok(())
    }

    /// Removes a line item entirely.
    pub fn remove_item(&mut self, item_id: Uuid) -> Result<(), ServiceError> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| ServiceError::NotFound(format!("Cart item {} not found", item_id)))?;

        self.items.remove(index);
        self.recompute();
        Ok(())
    }

    /// Empties the cart and resets totals to zero.
    pub fn clear(&mut self) {
        self.items.clear();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.totals = pricing::price_lines(self.items.iter().map(|i| (i.unit_price, i.quantity)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rust_decimal_macros::dec;

    fn arepa(price: Decimal, quantity: u32) -> NewLineItem {
        NewLineItem {
            product_id: Uuid::new_v4(),
            name: "Arepa reina pepiada".to_string(),
            unit_price: price,
            quantity,
            note: None,
            prep_minutes: Some(15),
        }
    }

    #[test]
    fn empty_cart_has_zero_totals() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
        assert_eq!(cart.tax(), Decimal::ZERO);
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn add_item_recomputes_totals() {
        let mut cart = Cart::new();
        cart.add_item(arepa(dec!(10.00), 2)).unwrap();
        cart.add_item(arepa(dec!(5.00), 1)).unwrap();

        assert_eq!(cart.subtotal(), dec!(25.00));
        assert_eq!(cart.tax(), dec!(4.00));
        assert_eq!(cart.total(), dec!(29.00));
    }

    #[test]
    fn add_same_product_merges_quantity() {
        let mut cart = Cart::new();
        let mut input = arepa(dec!(8.00), 2);
        let product_id = input.product_id;
        let first_id = cart.add_item(input.clone()).unwrap();

        input.quantity = 3;
        let second_id = cart.add_item(input).unwrap();

        assert_eq!(first_id, second_id);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].product_id, product_id);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn add_rejects_zero_quantity() {
        let mut cart = Cart::new();
        let result = cart.add_item(arepa(dec!(8.00), 0));
        assert_matches!(result, Err(ServiceError::QuantityOutOfRange(0)));
        assert!(cart.is_empty());
    }

    #[test]
    fn merge_beyond_bound_is_rejected_not_clamped() {
        let mut cart = Cart::new();
        let mut input = arepa(dec!(8.00), 60);
        cart.add_item(input.clone()).unwrap();

        input.quantity = 50;
        let result = cart.add_item(input);

        assert_matches!(result, Err(ServiceError::QuantityOutOfRange(110)));
        // Failed merge leaves the existing line untouched.
        assert_eq!(cart.items()[0].quantity, 60);
        assert_eq!(cart.subtotal(), dec!(480.00));
    }

    #[test]
    fn update_quantity_within_bounds() {
        let mut cart = Cart::new();
        let id = cart.add_item(arepa(dec!(4.00), 1)).unwrap();

        cart.update_quantity(id, 99).unwrap();
        assert_eq!(cart.items()[0].quantity, 99);
        assert_eq!(cart.subtotal(), dec!(396.00));
    }

    #[test]
    fn update_quantity_to_zero_removes_item() {
        let mut cart = Cart::new();
        let id = cart.add_item(arepa(dec!(4.00), 2)).unwrap();

        cart.update_quantity(id, 0).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn update_quantity_above_bound_rejected() {
        let mut cart = Cart::new();
        let id = cart.add_item(arepa(dec!(4.00), 2)).unwrap();

        let result = cart.update_quantity(id, 100);
        assert_matches!(result, Err(ServiceError::QuantityOutOfRange(100)));
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn update_unknown_item_is_not_found() {
        let mut cart = Cart::new();
        cart.add_item(arepa(dec!(4.00), 2)).unwrap();

        let result = cart.update_quantity(Uuid::new_v4(), 3);
        assert_matches!(result, Err(ServiceError::NotFound(_)));
    }

    #[test]
    fn add_then_remove_restores_prior_subtotal() {
        let mut cart = Cart::new();
        cart.add_item(arepa(dec!(12.50), 3)).unwrap();
        let before = cart.subtotal();

        let id = cart.add_item(arepa(dec!(7.25), 4)).unwrap();
        cart.remove_item(id).unwrap();

        assert_eq!(cart.subtotal(), before);
    }

    #[test]
    fn clear_resets_everything() {
        let mut cart = Cart::new();
        cart.add_item(arepa(dec!(12.50), 3)).unwrap();
        cart.add_item(arepa(dec!(7.25), 4)).unwrap();

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
        assert_eq!(cart.total(), Decimal::ZERO);
    }
}
