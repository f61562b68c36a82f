//! Pure field normalization: raw site-specific strings to canonical forms.
//!
//! Every brand parser funnels its price and size values through here so the
//! canonical record carries one representation regardless of source markup.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::ScrapeError;

/// Normalizes one raw size token to its canonical numeric string form.
///
/// Strips the men's `M` marker, trims, takes the first segment of
/// multi-format notations (`"M9/W10"` → `"9"`), and removes interior
/// whitespace. The result is accepted only if, after removing at most one
/// decimal point, every remaining character is an ASCII digit.
///
/// Returns `None` for anything else (`"OS"`, `"XL"`, empty); callers skip
/// rejected tokens rather than failing the parse.
#[must_use]
pub fn normalize_size(raw: &str) -> Option<String> {
    let stripped = raw.replace('M', "");
    let first_segment = match stripped.split_once('/') {
        Some((first, _)) => first,
        None => &stripped,
    };
    let token: String = first_segment.chars().filter(|c| !c.is_whitespace()).collect();

    let digits = token.replacen('.', "", 1);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Some(token)
    } else {
        None
    }
}

/// Parses a raw price string to a fixed-point decimal with two fraction
/// digits.
///
/// Currency symbols, thousands separators, and whitespace are discarded;
/// only digits and `.` survive. `"$1,299.00"` parses to exactly `1299.00`.
///
/// # Errors
///
/// Returns [`ScrapeError::InvalidPrice`] when the filtered string does not
/// form a valid number (empty input, multiple decimal points, no digits).
pub fn parse_price(raw: &str) -> Result<Decimal, ScrapeError> {
    let filtered: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let invalid = || ScrapeError::InvalidPrice {
        raw: raw.to_owned(),
    };

    if filtered.is_empty() || !filtered.bytes().any(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let mut price = Decimal::from_str(&filtered).map_err(|_| invalid())?;
    price.rescale(2);
    Ok(price)
}

/// Deduplicates and sorts normalized size tokens in ascending numeric order.
/// Tokens are pre-validated by [`normalize_size`], so every entry parses.
#[must_use]
pub fn sort_sizes(mut sizes: Vec<String>) -> Vec<String> {
    sizes.sort_by(|a, b| {
        let left: f64 = a.parse().unwrap_or(f64::MAX);
        let right: f64 = b.parse().unwrap_or(f64::MAX);
        left.partial_cmp(&right).unwrap_or(Ordering::Equal)
    });
    sizes.dedup();
    sizes
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
