//! Best-effort scalar type inference for untyped config values.
//!
//! Both the YAML-subset reader and the struct binder feed raw strings through
//! here. The trial order is a fixed contract: changing it changes which
//! semantic type a value registers as, so it is pinned by tests.

use serde_json::Value;
use std::fmt;

/// A primitive value inferred from a raw string.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Uint(u64),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Infer the best-matching primitive for `raw`.
///
/// Trial order, first full-string parse wins:
/// 1. unsigned integer (base 10) — pure-digit strings always land here
/// 2. boolean — the literal tokens `true`/`false` only (case-insensitive),
///    so `1`/`0` never misclassify as boolean
/// 3. signed integer (base 10)
/// 4. float (f64)
/// 5. fallback: the original string unchanged
pub fn coerce(raw: &str) -> Scalar {
    if let Ok(u) = raw.parse::<u64>() {
        return Scalar::Uint(u);
    }
    if let Some(b) = parse_bool(raw) {
        return Scalar::Bool(b);
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Scalar::Int(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Scalar::Float(f);
    }
    Scalar::Str(raw.to_string())
}

/// Strict boolean grammar shared by the coercer and the binder: the literal
/// tokens `true`/`false`, ASCII case-insensitive, nothing else.
pub fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

impl Scalar {
    /// Convert into a JSON value for the generic decode path.
    pub fn to_value(&self) -> Value {
        match self {
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Uint(u) => Value::from(*u),
            Scalar::Int(i) => Value::from(*i),
            Scalar::Float(f) => Value::from(*f),
            Scalar::Str(s) => Value::String(s.clone()),
        }
    }
}

/// Renders the scalar back to its literal form, so typed YAML values can be
/// re-dispatched through the binder's per-field parsing.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Uint(u) => write!(f, "{}", u),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Str(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_literal() {
        assert_eq!(coerce("true"), Scalar::Bool(true));
        assert_eq!(coerce("False"), Scalar::Bool(false));
        assert_eq!(coerce("TRUE"), Scalar::Bool(true));
    }

    #[test]
    fn test_unsigned_wins_for_digit_strings() {
        assert_eq!(coerce("123"), Scalar::Uint(123));
        assert_eq!(coerce("0"), Scalar::Uint(0));
        // numeric-looking strings never classify as boolean
        assert_eq!(coerce("1"), Scalar::Uint(1));
    }

    #[test]
    fn test_signed_integer() {
        assert_eq!(coerce("-123"), Scalar::Int(-123));
    }

    #[test]
    fn test_float() {
        assert_eq!(coerce("3.14"), Scalar::Float(3.14));
        assert_eq!(coerce("-0.5"), Scalar::Float(-0.5));
    }

    #[test]
    fn test_string_fallback_is_identity() {
        assert_eq!(coerce("hello"), Scalar::Str("hello".to_string()));
        assert_eq!(coerce("1h30m"), Scalar::Str("1h30m".to_string()));
        // partial parses must not win: strict full-string trials only
        assert_eq!(coerce("12abc"), Scalar::Str("12abc".to_string()));
    }

    #[test]
    fn test_display_round_trips_literal_form() {
        assert_eq!(coerce("8080").to_string(), "8080");
        assert_eq!(coerce("true").to_string(), "true");
        assert_eq!(coerce("3.14").to_string(), "3.14");
        assert_eq!(coerce("staging").to_string(), "staging");
    }

    #[test]
    fn test_to_value() {
        assert_eq!(coerce("8080").to_value(), serde_json::json!(8080));
        assert_eq!(coerce("false").to_value(), serde_json::json!(false));
        assert_eq!(coerce("x").to_value(), serde_json::json!("x"));
    }
}
