//! Provides one trait, [DecimalExtensions], which adds percentage arithmetic to [Decimal].

use num_traits::One;
use rust_decimal::Decimal;

/// Extra methods on `Decimal` used when a percentage meets a plain quantity:
///   - `from_percent`, reading a number of percent as a ratio (5 becomes 0.05).
///   - `adjust_by_percent`, raising or lowering a quantity by a percentage of itself. Returns
///     `None` if the result does not fit in a `Decimal`.
pub trait DecimalExtensions {
    fn from_percent(&self) -> Decimal;
    fn adjust_by_percent(&self, percent: Decimal, increase: bool) -> Option<Decimal>;
}

impl DecimalExtensions for Decimal {
    fn from_percent(&self) -> Decimal {
        *self / Decimal::ONE_HUNDRED
    }

    // 200 adjusted by 10 is 220 when increasing and 180 when decreasing
    fn adjust_by_percent(&self, percent: Decimal, increase: bool) -> Option<Decimal> {
        let ratio = percent.from_percent();
        let factor = if increase {
            Decimal::one().checked_add(ratio)?
        } else {
            Decimal::one().checked_sub(ratio)?
        };
        self.checked_mul(factor)
    }
}
