use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One product entry in a cart.
///
/// The unit price is frozen at add-to-cart time from the external catalog; the
/// core never re-verifies it afterwards. Line items are owned exclusively by a
/// [`Cart`](crate::models::cart::Cart) and mutated only through its operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Identifier unique within the owning cart.
    pub id: Uuid,

    /// Catalog identifier of the product.
    pub product_id: Uuid,

    /// Display name, captured alongside the price.
    pub name: String,

    /// Frozen unit price, non-negative.
    pub unit_price: Decimal,

    /// Units of the product, always within 1..=99.
    pub quantity: u32,

    /// Free-text note for the kitchen ("no onions").
    pub note: Option<String>,

    /// Preparation-time hint in minutes, when the menu provides one.
    pub prep_minutes: Option<u32>,
}

impl LineItem {
    /// Price contribution of this line: unit price × quantity.
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}
