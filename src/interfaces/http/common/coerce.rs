//! Loose-to-strict coercion of client-supplied values
//!
//! Clients send ids, day counts and prices as numbers or strings. These
//! rules turn them into integers and floats without rejecting anything:
//!
//! | input                      | integer                      | float                    |
//! |----------------------------|------------------------------|--------------------------|
//! | JSON number                | truncated toward zero        | as is                    |
//! | string with numeric prefix | prefix, truncated            | prefix                   |
//! | other string               | `0`                          | `0.0`                    |
//! | `true` / `false`           | `1` / `0`                    | `1.0` / `0.0`            |
//! | `null`, array, object      | `0`                          | `0.0`                    |
//!
//! A numeric prefix is optional leading whitespace, an optional sign,
//! digits with an optional fraction, and an optional exponent.

use serde_json::Value;

use crate::domain::PriceEntry;

/// Length of the numeric prefix of `s` (after `start`) and whether it has
/// a fraction or exponent. `None` when there is no digit at all.
fn scan_number(s: &str, start: usize) -> Option<(usize, bool)> {
    let bytes = s.as_bytes();
    let mut i = start;
    let mut is_float = false;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            is_float = true;
            i = j;
        }
    }

    if digits == 0 {
        return None;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            is_float = true;
            i = j;
        }
    }

    Some((i, is_float))
}

fn leading_whitespace(s: &str) -> usize {
    s.len() - s.trim_start().len()
}

fn to_int(number: &str, is_float: bool) -> i64 {
    if !is_float {
        if let Ok(n) = number.parse::<i64>() {
            return n;
        }
    }
    // saturating; NaN is impossible here
    number.parse::<f64>().map(|f| f as i64).unwrap_or(0)
}

/// Whole string is a number, surrounded only by whitespace.
pub fn is_numeric(s: &str) -> bool {
    let start = leading_whitespace(s);
    match scan_number(s, start) {
        Some((end, _)) => s[end..].trim().is_empty(),
        None => false,
    }
}

/// Integer value of a numeric string; `None` when not [`is_numeric`].
pub fn numeric_int(s: &str) -> Option<i64> {
    if !is_numeric(s) {
        return None;
    }
    Some(leading_int(s))
}

/// Integer value of the numeric prefix of `s`, or `0`.
pub fn leading_int(s: &str) -> i64 {
    let start = leading_whitespace(s);
    match scan_number(s, start) {
        Some((end, is_float)) => to_int(&s[start..end], is_float),
        None => 0,
    }
}

/// Float value of the numeric prefix of `s`, or `0.0`.
pub fn leading_float(s: &str) -> f64 {
    let start = leading_whitespace(s);
    match scan_number(s, start) {
        Some((end, _)) => s[start..end].parse().unwrap_or(0.0),
        None => 0.0,
    }
}

pub fn coerce_int(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => leading_int(s),
        Value::Bool(b) => i64::from(*b),
        Value::Null | Value::Array(_) | Value::Object(_) => 0,
    }
}

pub fn coerce_float(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => leading_float(s),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    }
}

/// Entries of a `prices` object in the order they were sent.
///
/// Anything but a JSON object yields no entries.
pub fn price_entries(prices: &Value) -> Vec<PriceEntry> {
    match prices {
        Value::Object(map) => map
            .iter()
            .map(|(day, price)| PriceEntry::new(leading_int(day), coerce_float(price)))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_strings() {
        for s in ["7", " 7", "7 ", "+7", "-3", "7.5", ".5", "5.", "1e3", "1E-2", "\t12\n"] {
            assert!(is_numeric(s), "{s:?} should be numeric");
        }
        for s in ["", " ", "abc", "7abc", "0x1A", "1e", ".", "-", "inf", "NaN", "1 2"] {
            assert!(!is_numeric(s), "{s:?} should not be numeric");
        }
    }

    #[test]
    fn numeric_int_truncates() {
        assert_eq!(numeric_int("7"), Some(7));
        assert_eq!(numeric_int("7.9"), Some(7));
        assert_eq!(numeric_int("0.5"), Some(0));
        assert_eq!(numeric_int("-2.5"), Some(-2));
        assert_eq!(numeric_int("1e3"), Some(1000));
        assert_eq!(numeric_int("abc"), None);
    }

    #[test]
    fn leading_prefixes() {
        assert_eq!(leading_int("12abc"), 12);
        assert_eq!(leading_int("  3 days"), 3);
        assert_eq!(leading_int("abc"), 0);
        assert_eq!(leading_int("99999999999999999999"), i64::MAX);
        assert_eq!(leading_float("45.50 TRY"), 45.5);
        assert_eq!(leading_float("1e2x"), 100.0);
        assert_eq!(leading_float("free"), 0.0);
    }

    #[test]
    fn json_values() {
        assert_eq!(coerce_int(&json!(7)), 7);
        assert_eq!(coerce_int(&json!(7.9)), 7);
        assert_eq!(coerce_int(&json!("7")), 7);
        assert_eq!(coerce_int(&json!("seven")), 0);
        assert_eq!(coerce_int(&json!(true)), 1);
        assert_eq!(coerce_int(&json!(null)), 0);
        assert_eq!(coerce_int(&json!([7])), 0);

        assert_eq!(coerce_float(&json!(45)), 45.0);
        assert_eq!(coerce_float(&json!("90.5")), 90.5);
        assert_eq!(coerce_float(&json!("n/a")), 0.0);
        assert_eq!(coerce_float(&json!(false)), 0.0);
        assert_eq!(coerce_float(&json!({"a": 1})), 0.0);
    }

    #[test]
    fn price_entries_keep_sent_order() {
        let prices: Value = serde_json::from_str(r#"{"7": 90.0, "3": "45", "x": "y"}"#).unwrap();
        assert_eq!(
            price_entries(&prices),
            vec![
                PriceEntry::new(7, 90.0),
                PriceEntry::new(3, 45.0),
                PriceEntry::new(0, 0.0),
            ]
        );
    }

    #[test]
    fn non_object_prices_have_no_entries() {
        assert!(price_entries(&json!([45.0, 90.0])).is_empty());
        assert!(price_entries(&json!("3:45")).is_empty());
        assert!(price_entries(&json!(null)).is_empty());
        assert!(price_entries(&json!({})).is_empty());
    }
}
