//! Currency amounts in integer cents and their display form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A monetary amount stored as cents.
///
/// Amounts are persisted and transmitted in subunits; only the display
/// layer converts to major units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Amount in major units (dollars), e.g. 125000 cents -> 1250.0.
    pub fn to_major_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Money {
    /// en-US style: `$1,250.00`, `-$5.05`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.unsigned_abs();
        let dollars = group_thousands(abs / 100);
        let cents = abs % 100;
        if self.is_negative() {
            write!(f, "-${dollars}.{cents:02}")
        } else {
            write!(f, "${dollars}.{cents:02}")
        }
    }
}

/// Format a subunit amount for display.
pub fn format_currency(cents: i64) -> String {
    Money::from_cents(cents).to_string()
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
