use std::str::FromStr;

use rust_decimal::Decimal;

use super::*;
use crate::error::ScrapeError;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ---------------------------------------------------------------------------
// normalize_size
// ---------------------------------------------------------------------------

#[test]
fn size_strips_mens_marker() {
    assert_eq!(normalize_size("9M").as_deref(), Some("9"));
    assert_eq!(normalize_size("9.5M").as_deref(), Some("9.5"));
}

#[test]
fn size_takes_first_segment_of_multi_format() {
    assert_eq!(normalize_size("M9/W10").as_deref(), Some("9"));
    assert_eq!(normalize_size("9 M / 10.5 W").as_deref(), Some("9"));
}

#[test]
fn size_strips_whitespace() {
    assert_eq!(normalize_size(" 10 M ").as_deref(), Some("10"));
    assert_eq!(normalize_size("1 0").as_deref(), Some("10"));
}

#[test]
fn size_accepts_plain_numeric() {
    assert_eq!(normalize_size("11").as_deref(), Some("11"));
    assert_eq!(normalize_size("11.5").as_deref(), Some("11.5"));
}

#[test]
fn size_rejects_non_numeric_leftovers() {
    assert_eq!(normalize_size("OS"), None);
    assert_eq!(normalize_size("XL"), None);
    assert_eq!(normalize_size("10W"), None);
}

#[test]
fn size_rejects_empty_and_bare_dot() {
    assert_eq!(normalize_size(""), None);
    assert_eq!(normalize_size("."), None);
    assert_eq!(normalize_size("M"), None);
}

#[test]
fn size_rejects_two_decimal_points() {
    assert_eq!(normalize_size("9.5.5"), None);
}

// ---------------------------------------------------------------------------
// parse_price
// ---------------------------------------------------------------------------

#[test]
fn price_plain_decimal() {
    assert_eq!(parse_price("129.99").unwrap(), dec("129.99"));
}

#[test]
fn price_strips_currency_symbol_and_thousands_separator() {
    assert_eq!(parse_price("$1,299.00").unwrap(), dec("1299.00"));
}

#[test]
fn price_strips_whitespace_and_currency_code() {
    assert_eq!(parse_price(" 180 USD ").unwrap(), dec("180.00"));
}

#[test]
fn price_integer_gets_two_fraction_digits() {
    let price = parse_price("180").unwrap();
    assert_eq!(price, dec("180"));
    assert_eq!(price.scale(), 2);
}

#[test]
fn price_empty_is_invalid() {
    assert!(matches!(
        parse_price(""),
        Err(ScrapeError::InvalidPrice { .. })
    ));
}

#[test]
fn price_without_digits_is_invalid() {
    assert!(matches!(
        parse_price("free"),
        Err(ScrapeError::InvalidPrice { raw }) if raw == "free"
    ));
}

#[test]
fn price_with_two_decimal_points_is_invalid() {
    assert!(matches!(
        parse_price("1.299.00"),
        Err(ScrapeError::InvalidPrice { .. })
    ));
}

// ---------------------------------------------------------------------------
// sort_sizes
// ---------------------------------------------------------------------------

#[test]
fn sizes_sorted_numerically_not_lexically() {
    let sorted = sort_sizes(vec![
        "10".to_string(),
        "9.5".to_string(),
        "9".to_string(),
        "11".to_string(),
    ]);
    assert_eq!(sorted, vec!["9", "9.5", "10", "11"]);
}

#[test]
fn sizes_deduplicated() {
    let sorted = sort_sizes(vec!["9".to_string(), "9".to_string(), "10".to_string()]);
    assert_eq!(sorted, vec!["9", "10"]);
}

#[test]
fn sizes_empty_stays_empty() {
    assert!(sort_sizes(Vec::new()).is_empty());
}
