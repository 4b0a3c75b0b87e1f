//! Fixed-point number with 10^-8 precision, the gas and asset amount type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Neg;

const DECIMALS: u64 = 100_000_000;

/// A signed 64-bit integer interpreted as value x 10^-8.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Fixed8(i64);

impl Fixed8 {
    pub const ZERO: Fixed8 = Fixed8(0);
    /// One whole unit (10^8 raw).
    pub const ONE: Fixed8 = Fixed8(DECIMALS as i64);
    pub const MAX: Fixed8 = Fixed8(i64::MAX);

    /// Wraps a raw 10^-8 unit count.
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Converts a whole-unit count; saturates on overflow.
    pub const fn from_units(units: i64) -> Self {
        Self(units.saturating_mul(DECIMALS as i64))
    }

    /// The raw 10^-8 unit count.
    pub const fn raw(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, other: Fixed8) -> Option<Fixed8> {
        self.0.checked_add(other.0).map(Fixed8)
    }

    pub fn checked_sub(self, other: Fixed8) -> Option<Fixed8> {
        self.0.checked_sub(other.0).map(Fixed8)
    }

    pub fn checked_mul_int(self, factor: i64) -> Option<Fixed8> {
        self.0.checked_mul(factor).map(Fixed8)
    }

    pub fn saturating_add(self, other: Fixed8) -> Fixed8 {
        Fixed8(self.0.saturating_add(other.0))
    }
}

impl Neg for Fixed8 {
    type Output = Fixed8;

    fn neg(self) -> Fixed8 {
        Fixed8(-self.0)
    }
}

impl Sum for Fixed8 {
    fn sum<I: Iterator<Item = Fixed8>>(iter: I) -> Fixed8 {
        iter.fold(Fixed8::ZERO, |acc, x| acc.saturating_add(x))
    }
}

impl fmt::Display for Fixed8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let integer = abs / DECIMALS;
        let fraction = abs % DECIMALS;
        if fraction == 0 {
            write!(f, "{sign}{integer}")
        } else {
            let digits = format!("{fraction:08}");
            write!(f, "{sign}{integer}.{}", digits.trim_end_matches('0'))
        }
    }
}

impl fmt::Debug for Fixed8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed8({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_trims_trailing_zeros() {
        assert_eq!(Fixed8::from_raw(100_000_000).to_string(), "1");
        assert_eq!(Fixed8::from_raw(150_000_000).to_string(), "1.5");
        assert_eq!(Fixed8::from_raw(1).to_string(), "0.00000001");
        assert_eq!(Fixed8::from_raw(-10_000).to_string(), "-0.0001");
    }

    #[test]
    fn checked_arithmetic_detects_overflow() {
        assert_eq!(Fixed8::MAX.checked_add(Fixed8::from_raw(1)), None);
        assert_eq!(
            Fixed8::from_units(2).checked_sub(Fixed8::from_units(3)),
            Some(Fixed8::from_units(-1))
        );
    }

    #[test]
    fn from_units_scales() {
        assert_eq!(Fixed8::from_units(3).raw(), 300_000_000);
    }
}
