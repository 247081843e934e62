//! Timestamp and duration parsing for temporal config fields.
//!
//! Timestamps parse against an explicit chrono layout; the fixed
//! [`FALLBACK_LAYOUTS`] search exists only for the binder's opt-in
//! compatibility mode. Durations use the compound `1h30m`-style grammar.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use thiserror::Error;

/// Parse failures for timestamps and durations. Wrapped into
/// [`ConfigError::Bind`](crate::ConfigError::Bind) by the binder.
#[derive(Debug, Error)]
pub enum TimeError {
    #[error("{value:?} does not match layout {layout:?}")]
    Layout { layout: String, value: String },

    #[error("{value:?} does not match any fallback layout")]
    NoLayoutMatched { value: String },

    #[error("invalid duration {value:?}: {reason}")]
    Duration { value: String, reason: String },
}

/// Layouts tried in order by [`parse_timestamp_any`]. The order is part of
/// the contract: the first layout that parses wins.
pub const FALLBACK_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d",
];

/// Parse `raw` against exactly one layout. No fallback search.
///
/// A layout carrying a zone specifier parses as an offset datetime and is
/// converted to UTC. Zoneless layouts are interpreted as UTC: a date-only
/// layout yields midnight of that day.
pub fn parse_timestamp(layout: &str, raw: &str) -> Result<DateTime<Utc>, TimeError> {
    if let Ok(dt) = DateTime::parse_from_str(raw, layout) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, layout) {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, layout) {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(TimeError::Layout {
        layout: layout.to_string(),
        value: raw.to_string(),
    })
}

/// Search [`FALLBACK_LAYOUTS`] in order, first success wins.
///
/// Only used when the binder was explicitly built with layout fallback; the
/// default policy is a mandatory per-field layout, because a silent search
/// can misread ambiguous values.
pub fn parse_timestamp_any(raw: &str) -> Result<DateTime<Utc>, TimeError> {
    for layout in FALLBACK_LAYOUTS {
        if let Ok(ts) = parse_timestamp(layout, raw) {
            return Ok(ts);
        }
    }
    Err(TimeError::NoLayoutMatched {
        value: raw.to_string(),
    })
}

/// Parse a signed compound duration: one or more `<number><unit>` terms,
/// e.g. `1h30m`, `-2.5s`, `150ms`. Units: `ns`, `us`/`µs`, `ms`, `s`, `m`,
/// `h`. Fractional values are allowed per term. A bare `0` needs no unit.
pub fn parse_duration(raw: &str) -> Result<TimeDelta, TimeError> {
    let err = |reason: &str| TimeError::Duration {
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let s = raw.trim();
    let (negative, body) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if body == "0" {
        return Ok(TimeDelta::zero());
    }
    if body.is_empty() {
        return Err(err("empty duration"));
    }

    let mut rest = body;
    let mut total_ns: i128 = 0;
    while !rest.is_empty() {
        let num_end = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        if num_end == 0 {
            return Err(err("expected a number"));
        }
        let number: f64 = rest[..num_end]
            .parse()
            .map_err(|_| err("malformed number"))?;
        rest = &rest[num_end..];

        let (unit_ns, unit_len) = match_unit(rest).ok_or_else(|| err("missing or unknown unit"))?;
        total_ns += (number * unit_ns as f64) as i128;
        rest = &rest[unit_len..];
    }

    if negative {
        total_ns = -total_ns;
    }
    i64::try_from(total_ns)
        .map(TimeDelta::nanoseconds)
        .map_err(|_| err("duration overflows"))
}

/// Longest-match unit lookup: two-byte units before the bare `s`/`m`/`h`.
fn match_unit(s: &str) -> Option<(i64, usize)> {
    const NS: i64 = 1;
    const US: i64 = 1_000;
    const MS: i64 = 1_000_000;
    const SEC: i64 = 1_000_000_000;
    for (literal, nanos) in [
        ("ns", NS),
        ("us", US),
        ("µs", US),
        ("ms", MS),
        ("s", SEC),
        ("m", 60 * SEC),
        ("h", 3600 * SEC),
    ] {
        if s.starts_with(literal) {
            return Some((nanos, literal.len()));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_only_layout_is_utc_midnight() {
        let ts = parse_timestamp("%Y-%m-%d", "2022-01-01").unwrap();
        assert_eq!(ts, "2022-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn test_layout_with_offset_converts_to_utc() {
        let ts = parse_timestamp("%Y-%m-%dT%H:%M:%S%z", "2022-01-01T12:00:00+0200").unwrap();
        assert_eq!(ts, "2022-01-01T10:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn test_layout_mismatch_is_an_error() {
        let err = parse_timestamp("%Y-%m-%d", "01/02/2022").unwrap_err();
        assert!(matches!(err, TimeError::Layout { .. }));
    }

    #[test]
    fn test_fallback_search_order() {
        assert!(parse_timestamp_any("2022-01-01").is_ok());
        assert!(parse_timestamp_any("2022-01-01 08:30:00").is_ok());
        assert!(parse_timestamp_any("2022-01-01T08:30:00+00:00").is_ok());
        assert!(matches!(
            parse_timestamp_any("not a date"),
            Err(TimeError::NoLayoutMatched { .. })
        ));
    }

    #[test]
    fn test_compound_duration() {
        assert_eq!(parse_duration("1h30m").unwrap(), TimeDelta::minutes(90));
        assert_eq!(
            parse_duration("1m30s").unwrap(),
            TimeDelta::seconds(90)
        );
    }

    #[test]
    fn test_fractional_duration() {
        assert_eq!(parse_duration("1.5h").unwrap(), TimeDelta::minutes(90));
        assert_eq!(parse_duration("0.5s").unwrap(), TimeDelta::milliseconds(500));
    }

    #[test]
    fn test_signed_duration() {
        assert_eq!(parse_duration("-90m").unwrap(), TimeDelta::minutes(-90));
        assert_eq!(parse_duration("+10s").unwrap(), TimeDelta::seconds(10));
    }

    #[test]
    fn test_subsecond_units() {
        assert_eq!(parse_duration("150ms").unwrap(), TimeDelta::milliseconds(150));
        assert_eq!(parse_duration("2us").unwrap(), TimeDelta::microseconds(2));
        assert_eq!(parse_duration("7ns").unwrap(), TimeDelta::nanoseconds(7));
    }

    #[test]
    fn test_bare_zero() {
        assert_eq!(parse_duration("0").unwrap(), TimeDelta::zero());
    }

    #[test]
    fn test_bogus_duration_fails() {
        assert!(parse_duration("bogus").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("1x").is_err());
        assert!(parse_duration("h").is_err());
        // a number with no unit is incomplete, except for the bare zero
        assert!(parse_duration("15").is_err());
    }
}
