//! Quantity rules and raw input handling for the quantity field.
//!
//! Weighed (`/KG`) products accept one fractional digit; everything else is
//! counted in whole units. Raw keystrokes are sanitized as they arrive and
//! committed into a [`Quantity`] when the field loses focus.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::product::WEIGHED_UNIT;

/// Digits allowed in the whole part of a committed quantity.
pub const MAX_QUANTITY_DIGITS: usize = 9;

/// How many fractional digits a product's quantity may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityRule {
    /// Non-negative integers only.
    Whole,
    /// Non-negative with at most one fractional digit.
    Tenths,
}

impl QuantityRule {
    #[must_use]
    pub fn for_unit(unit_of_measure: &str) -> Self {
        if unit_of_measure == WEIGHED_UNIT {
            Self::Tenths
        } else {
            Self::Whole
        }
    }

    #[must_use]
    pub fn allows_decimal(self) -> bool {
        matches!(self, Self::Tenths)
    }

    /// Input step for the numeric field.
    #[must_use]
    pub fn step(self) -> &'static str {
        match self {
            Self::Whole => "1",
            Self::Tenths => "0.1",
        }
    }

    fn scale(self) -> u32 {
        match self {
            Self::Whole => 0,
            Self::Tenths => 1,
        }
    }

    /// Cleans raw field text while the user is typing.
    ///
    /// - `Tenths`: keep digits and the first `.`, drop later dots, keep at
    ///   most one digit after the dot.
    /// - `Whole`: keep digits only. Signs and dots are dropped.
    #[must_use]
    pub fn sanitize(self, raw: &str) -> String {
        match self {
            Self::Whole => raw.chars().filter(char::is_ascii_digit).collect(),
            Self::Tenths => {
                let mut out = String::with_capacity(raw.len());
                let mut seen_dot = false;
                let mut frac_digits = 0u32;
                for c in raw.chars() {
                    if c == '.' {
                        if !seen_dot {
                            seen_dot = true;
                            out.push(c);
                        }
                    } else if c.is_ascii_digit() {
                        if seen_dot {
                            if frac_digits >= 1 {
                                continue;
                            }
                            frac_digits += 1;
                        }
                        out.push(c);
                    }
                }
                out
            }
        }
    }

    /// Commits field text into a quantity.
    ///
    /// The text is sanitized first, so any raw input is accepted. Leading
    /// zeros are dropped, empty or dot-only text commits as zero, and so does
    /// anything starting with a minus sign. Whole parts longer than
    /// [`MAX_QUANTITY_DIGITS`] commit as [`Quantity::MAX`].
    #[must_use]
    pub fn commit(self, raw: &str) -> Quantity {
        if raw.trim_start().starts_with('-') {
            return Quantity::ZERO;
        }
        let sanitized = self.sanitize(raw);
        let trimmed = sanitized.trim_end_matches('.');
        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        let whole = whole.trim_start_matches('0');
        if whole.len() > MAX_QUANTITY_DIGITS {
            return Quantity::MAX;
        }
        if whole.is_empty() && fraction.is_empty() {
            return Quantity::ZERO;
        }
        let whole = if whole.is_empty() { "0" } else { whole };
        let normalized = if fraction.is_empty() {
            whole.to_string()
        } else {
            format!("{whole}.{fraction}")
        };
        Decimal::from_str(&normalized).map_or(Quantity::ZERO, |value| self.clamp(value))
    }

    /// Brings an arbitrary decimal into range for this rule: negatives become
    /// zero and extra fractional digits are truncated.
    #[must_use]
    pub fn clamp(self, value: Decimal) -> Quantity {
        if value.is_sign_negative() {
            return Quantity::ZERO;
        }
        let truncated = value.round_dp_with_strategy(self.scale(), RoundingStrategy::ToZero);
        Quantity(truncated.normalize())
    }
}

/// A committed quantity. Always non-negative and normalized, so `2.0`
/// displays as `2` and `2.5` as `2.5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Quantity(Decimal);

impl Quantity {
    pub const ZERO: Quantity = Quantity(Decimal::ZERO);
    pub const ONE: Quantity = Quantity(Decimal::ONE);
    /// Largest quantity a field commits to.
    pub const MAX: Quantity = Quantity(Decimal::from_parts(999_999_999, 0, 0, false, 0));

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    #[must_use]
    pub fn value(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}
