//! Price text parsing and money formatting.
//!
//! Sales prices arrive as free-form currency text (`"$2.00"`, `"S$ 1,250.50"`,
//! `""`). Parsing keeps only digits, `.` and `-`, then reads the leading
//! numeric prefix the same way a lenient float parser would: `"1.2.3"` reads
//! as `1.2`, `"abc"` has no number at all.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Parses a currency string into an exact decimal amount.
///
/// Returns `None` when no digit survives stripping (empty, `"abc"`, `"-"`,
/// `"POA"`), which callers treat as "price on request".
#[must_use]
pub fn parse_price(text: &str) -> Option<Decimal> {
    let stripped: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let prefix = numeric_prefix(&stripped)?;
    Decimal::from_str(&prefix).ok()
}

/// Sort key for the `salesPrice` column. Unparsable prices sort as zero.
#[must_use]
pub fn price_sort_key(text: &str) -> Decimal {
    parse_price(text).unwrap_or(Decimal::ZERO)
}

/// Formats an amount as `$X.YY`, rounding half away from zero.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}

/// Extracts `-?digits[.digits]` from the start of `s`, normalised so that
/// `Decimal::from_str` accepts it (`".5"` → `"0.5"`, `"5."` → `"5"`).
fn numeric_prefix(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut idx = 0;
    let negative = bytes.first() == Some(&b'-');
    if negative {
        idx += 1;
    }

    let int_start = idx;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    let int_part = &s[int_start..idx];

    let mut frac_part = "";
    if idx < bytes.len() && bytes[idx] == b'.' {
        let frac_start = idx + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_part = &s[frac_start..end];
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(int_part.len() + frac_part.len() + 3);
    if negative {
        out.push('-');
    }
    out.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    Some(out)
}
