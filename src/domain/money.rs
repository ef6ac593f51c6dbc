//! Monetary types and conversions between USD amounts and ratios.
//!
//! USD amounts are `Decimal`; percentages, APYs and scores are `f64`.
//! The helpers here are the only places the two meet.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// A USD amount represented as a Decimal for precision.
pub type Usd = Decimal;

/// Convert a USD amount to `f64` for ratio arithmetic.
#[must_use]
pub fn to_f64(amount: Usd) -> f64 {
    amount.to_f64().unwrap_or(0.0)
}

/// Convert a ratio or score to `Decimal`. Non-finite values become zero.
#[must_use]
pub fn from_f64(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// `pct` percent of `amount` (e.g. `percent_of(10000, 30.0) == 3000`).
#[must_use]
pub fn percent_of(amount: Usd, pct: f64) -> Usd {
    amount * from_f64(pct) / Decimal::ONE_HUNDRED
}

/// `part / whole * 100`, or zero when `whole` is not positive.
#[must_use]
pub fn percent(part: Usd, whole: Usd) -> f64 {
    if whole <= Decimal::ZERO {
        return 0.0;
    }
    to_f64(part / whole * Decimal::ONE_HUNDRED)
}

/// Truncate to whole cents, never rounding up.
#[must_use]
pub fn floor_cents(amount: Usd) -> Usd {
    amount.round_dp_with_strategy(2, RoundingStrategy::ToZero)
}
