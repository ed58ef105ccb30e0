//! Checkout pricing arithmetic.
//!
//! Pure functions over `(unit price, quantity)` pairs: no side effects, no
//! ordering dependency, identical input always yields identical output.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Sales tax applied to every order. Fixed platform-wide; not configurable.
pub const TAX_RATE: Decimal = dec!(0.16);

/// Derived money for a cart or order: `total = subtotal + tax`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Prices a list of `(unit_price, quantity)` pairs.
///
/// All monetary outputs are rounded to 2 decimal places with standard
/// (midpoint away from zero) rounding. Tax is computed from the rounded
/// subtotal so that `total == subtotal + tax` holds exactly. Inputs are
/// validated upstream to be non-negative, so outputs never go negative.
pub fn price_lines(lines: impl IntoIterator<Item = (Decimal, u32)>) -> Totals {
    let subtotal: Decimal = lines
        .into_iter()
        .map(|(unit_price, quantity)| unit_price * Decimal::from(quantity))
        .sum();
    let subtotal = round_money(subtotal);
    let tax = round_money(subtotal * TAX_RATE);

    Totals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
