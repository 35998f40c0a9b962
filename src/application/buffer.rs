//! Fee and slippage buffer.

use rust_decimal::Decimal;

use crate::domain::{Price, BPS_PER_UNIT};

/// Estimated fees for a hedge: `hedge_cost * buffer_bps / 10000`.
#[must_use]
pub fn apply_buffer(hedge_cost: Price, buffer_bps: u32) -> Price {
    hedge_cost * Decimal::from(buffer_bps) / BPS_PER_UNIT
}
