//! Minor-unit money value type.
//!
//! Amounts are integers in the smallest currency unit (e.g. cents), so the
//! room × nights × participants multiplications in pricing never accumulate
//! binary-float drift. Single-currency by design (multi-currency is a
//! non-goal).

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// A non-negative monetary amount in minor currency units.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    pub const fn minor(&self) -> u64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition; `None` on overflow.
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Checked scalar multiplication; `None` on overflow.
    pub const fn checked_mul(self, factor: u64) -> Option<Money> {
        match self.0.checked_mul(factor) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }
}

impl ValueObject for Money {}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_mul_overflow_is_none() {
        assert_eq!(Money::from_minor(u64::MAX).checked_mul(2), None);
        assert_eq!(
            Money::from_minor(1500).checked_mul(3),
            Some(Money::from_minor(4500))
        );
    }

    #[test]
    fn display_renders_major_and_minor() {
        assert_eq!(Money::from_minor(123_45).to_string(), "123.45");
        assert_eq!(Money::from_minor(5).to_string(), "0.05");
    }
}
