//! Amount type for whole-unit money values.
//!
//! Amounts are signed: negative values are expenses and positive values are income. There are no
//! minor units.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

/// The currency sign printed after every amount.
pub const CURRENCY: &str = "₴";

/// Represents a signed money amount in whole currency units.
///
/// Stored and serialized as a plain integer. Displayed with a space between thousands and the
/// currency sign after the number.
///
/// ```
/// # use expense_tracker::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::new(-1500);
/// assert_eq!(amount.to_string(), "-1 500 ₴");
/// assert_eq!(Amount::from_str("1 500 ₴").unwrap(), Amount::new(1500));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Creates an expense from a magnitude, i.e. `150` becomes `-150`. The sign of `magnitude` is
    /// ignored.
    pub fn expense(magnitude: i64) -> Self {
        Self(-magnitude.saturating_abs())
    }

    /// Creates income from a magnitude. The sign of `magnitude` is ignored.
    pub fn income(magnitude: i64) -> Self {
        Self(magnitude.saturating_abs())
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// The value as a float, which is what category sums are accumulated in.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_expense(&self) -> bool {
        self.0 < 0
    }

    pub fn is_income(&self) -> bool {
        self.0 > 0
    }
}

/// The largest magnitude an `f64` holds without losing whole units.
const MAX_EXACT_F64: u64 = 1 << 53;

/// Formats a magnitude with a space as the thousands separator.
fn group_thousands(magnitude: u64) -> String {
    if magnitude <= MAX_EXACT_F64 {
        return format_num::format_num!(",.0f", magnitude as f64).replace(',', " ");
    }
    let digits = magnitude.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    grouped
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sign = if self.is_expense() { "-" } else { "" };
        let grouped = group_thousands(self.0.unsigned_abs());
        write!(f, "{sign}{grouped} {CURRENCY}")
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError(ParseIntError);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "invalid amount: {}", self.0)
    }
}

impl Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Accepts an optional sign, spaces or commas between digit groups and an optional trailing
    /// currency sign: `-1 500 ₴`, `1,500`, `150`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let without_currency = trimmed.strip_suffix(CURRENCY).unwrap_or(trimmed);
        let digits: String = without_currency
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .collect();
        let value = digits.parse::<i64>().map_err(AmountError)?;
        Ok(Amount(value))
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for i64 {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}
