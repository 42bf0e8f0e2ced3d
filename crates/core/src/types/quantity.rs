//! Line quantities.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A line quantity, always at least one.
///
/// ## Examples
///
/// ```
/// use bookstore_cart_core::Quantity;
///
/// assert_eq!(Quantity::parse_lenient(Some("3")).get(), 3);
/// assert_eq!(Quantity::parse_lenient(Some("3.7")).get(), 3);
/// assert_eq!(Quantity::parse_lenient(Some("0")).get(), 1);
/// assert_eq!(Quantity::parse_lenient(None).get(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// The smallest (and default) quantity.
    pub const ONE: Self = Self(1);

    /// Create a quantity, raising zero to one.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        if value == 0 { Self::ONE } else { Self(value) }
    }

    /// Parse the leading integer of a control value.
    ///
    /// Leading whitespace and an optional sign are accepted, digits are read
    /// up to the first non-digit. Missing input, input without leading digits,
    /// and values below one all yield [`Quantity::ONE`]. Values beyond `u32`
    /// saturate.
    #[must_use]
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        raw.and_then(leading_integer)
            .and_then(|n| u32::try_from(n).ok().or((n > 0).then_some(u32::MAX)))
            .map_or(Self::ONE, Self::new)
    }

    /// Get the underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Add another quantity, saturating at `u32::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Number(n) => Self::parse_lenient(Some(&n.to_string())),
            serde_json::Value::String(s) => Self::parse_lenient(Some(&s)),
            _ => Self::ONE,
        })
    }
}

/// Read an optionally signed run of leading digits, saturating at `i64` bounds.
fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, s.get(1..)?),
        Some(b'+') => (false, s.get(1..)?),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(b - b'0'));
    }

    seen.then_some(if negative { -value } else { value })
}
