//! Non-negative decimal prices and their display format.
//!
//! Prices arrive as loosely-typed strings from `data-price` attributes and as
//! JSON numbers from stored carts. Both paths go through [`Price::parse_lenient`],
//! which never fails: anything unusable becomes zero.

use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Quantity;

/// Default currency symbol for displayed amounts.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// A non-negative price in the store's single currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price, clamping negative amounts to zero.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        if amount.is_sign_negative() {
            Self::ZERO
        } else {
            Self(amount.normalize())
        }
    }

    /// Parse the leading decimal number of a string.
    ///
    /// Leading whitespace is skipped and trailing garbage is ignored, so
    /// `"12.50 INR"` is `12.50`. Input with no leading number, or a negative
    /// number, yields zero.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        leading_decimal(raw).map_or(Self::ZERO, Self::new)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, saturating instead of overflowing.
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        let units = Decimal::from(quantity.get());
        Self(self.0.checked_mul(units).unwrap_or(Decimal::MAX))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<u32> for Price {
    fn from(amount: u32) -> Self {
        Self(Decimal::from(amount))
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Number(n) => Self::parse_lenient(&n.to_string()),
            serde_json::Value::String(s) => Self::parse_lenient(&s),
            _ => Self::ZERO,
        })
    }
}

/// Currency display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFormat {
    /// Symbol prefixed to every amount.
    pub symbol: String,
}

impl Default for PriceFormat {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY_SYMBOL)
    }
}

impl PriceFormat {
    /// Create a format with the given currency symbol.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    /// Format a price with exactly two decimal places (e.g. `₹25.00`).
    ///
    /// Midpoints round away from zero.
    #[must_use]
    pub fn format(&self, price: Price) -> String {
        format!("{}{}", self.symbol, two_places(price.amount()))
    }
}

/// Render a decimal with exactly two fractional digits.
fn two_places(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Extract the longest numeric prefix of `raw` and parse it.
fn leading_decimal(raw: &str) -> Option<Decimal> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    let mantissa = s.get(..end)?.trim_end_matches('.');
    let mantissa = mantissa.strip_prefix('+').unwrap_or(mantissa);
    let mantissa = match mantissa.strip_prefix('-') {
        Some(rest) if rest.starts_with('.') => format!("-0{rest}"),
        _ if mantissa.starts_with('.') => format!("0{mantissa}"),
        _ => mantissa.to_string(),
    };

    if let Some(exponent) = exponent_suffix(s.get(end..)?) {
        return Decimal::from_scientific(&format!("{mantissa}e{exponent}")).ok();
    }

    Decimal::from_str(&mantissa).ok()
}

/// Parse an `e`/`E` exponent at the start of `rest`, if one is present.
fn exponent_suffix(rest: &str) -> Option<&str> {
    let after = rest.strip_prefix(['e', 'E'])?;
    let bytes = after.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let sign_len = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if end == sign_len {
        return None;
    }
    after.get(..end)
}
