//! Cart quantities submitted from forms.

use core::fmt;
use core::num::IntErrorKind;

use serde::{Deserialize, Serialize};

/// A positive number of units to add to a cart.
///
/// Form input is lenient: anything that does not parse, or parses to less
/// than one, becomes a quantity of one. Anything above [`Quantity::MAX`]
/// (including numbers too large for an `i64`) becomes `MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(i64);

impl Quantity {
    /// The smallest allowed quantity.
    pub const MIN: Self = Self(1);

    /// The largest allowed quantity, both per add and per cart line.
    pub const MAX: Self = Self(999);

    /// Create a quantity, clamping into `MIN..=MAX`.
    #[must_use]
    pub const fn clamped(value: i64) -> Self {
        if value < Self::MIN.0 {
            Self::MIN
        } else if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    /// Parse a quantity from raw form input.
    #[must_use]
    pub fn from_form(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::MIN;
        };
        match raw.trim().parse::<i64>() {
            Ok(value) => Self::clamped(value),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Self::MAX,
            Err(_) => Self::MIN,
        }
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped() {
        assert_eq!(Quantity::clamped(3).get(), 3);
        assert_eq!(Quantity::clamped(1).get(), 1);
        assert_eq!(Quantity::clamped(0).get(), 1);
        assert_eq!(Quantity::clamped(-5).get(), 1);
        assert_eq!(Quantity::clamped(999).get(), 999);
        assert_eq!(Quantity::clamped(1000).get(), 999);
        assert_eq!(Quantity::clamped(i64::MAX).get(), 999);
    }

    #[test]
    fn test_from_form() {
        assert_eq!(Quantity::from_form(Some("2")).get(), 2);
        assert_eq!(Quantity::from_form(Some(" 4 ")).get(), 4);
        assert_eq!(Quantity::from_form(Some("abc")).get(), 1);
        assert_eq!(Quantity::from_form(Some("")).get(), 1);
        assert_eq!(Quantity::from_form(Some("-3")).get(), 1);
        assert_eq!(Quantity::from_form(None).get(), 1);
    }

    #[test]
    fn test_from_form_saturates_large_input() {
        assert_eq!(Quantity::from_form(Some("5000")).get(), 999);
        assert_eq!(Quantity::from_form(Some("9223372036854775807")).get(), 999);
        assert_eq!(Quantity::from_form(Some("99999999999999999999999")).get(), 999);
        assert_eq!(Quantity::from_form(Some("-99999999999999999999999")).get(), 1);
    }
}
