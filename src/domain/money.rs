//! Monetary types for price and size representation.

use rust_decimal::Decimal;

/// Probability-denominated price, strictly inside (0, 1) when present.
pub type Price = Decimal;

/// Contract quantity available at a price level.
pub type Volume = Decimal;

/// Basis points per unit (1 bp = 1/10000).
pub const BPS_PER_UNIT: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Check that a price lies strictly between 0 and 1.
#[must_use]
pub fn is_probability(price: Price) -> bool {
    price > Decimal::ZERO && price < Decimal::ONE
}
