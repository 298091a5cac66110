//! Command implementations

pub mod create;
pub mod scale;
pub mod target;
pub mod version;

use std::time::Duration;

/// Nanoseconds per duration unit.
const UNITS: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60_000_000_000),
    ("h", 3_600_000_000_000),
];

/// Parse a duration such as `28s`, `1m30s`, `1.5s` or `500ms`. A bare
/// number is seconds.
///
/// # Errors
///
/// Returns a message for clap when a segment has no recognised unit, is not
/// a number, or the total does not fit in 64-bit nanoseconds.
pub fn parse_duration(value: &str) -> Result<Duration, String> {
    let value = value.trim();
    let invalid = || format!("invalid duration '{value}'");
    if value.is_empty() {
        return Err(invalid());
    }
    if value.bytes().all(|b| b.is_ascii_digit()) {
        let secs: u64 = value.parse().map_err(|_| invalid())?;
        return to_duration(u128::from(secs) * 1_000_000_000, value);
    }

    let mut rest = value;
    let mut total: u128 = 0;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);

        let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        let Some(&(_, scale)) = UNITS.iter().find(|(name, _)| *name == unit) else {
            return Err(format!(
                "invalid duration unit in '{value}' (use ns, us, ms, s, m or h)"
            ));
        };

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let mut segment = whole.checked_mul(scale).ok_or_else(invalid)?;
        let mut place = scale;
        for digit in frac.bytes() {
            if !digit.is_ascii_digit() {
                return Err(invalid());
            }
            place /= 10;
            segment = segment.saturating_add(u128::from(digit - b'0') * place);
        }
        total = total.checked_add(segment).ok_or_else(invalid)?;
        rest = tail;
    }
    to_duration(total, value)
}

fn to_duration(nanos: u128, value: &str) -> Result<Duration, String> {
    u64::try_from(nanos)
        .map(Duration::from_nanos)
        .map_err(|_| format!("duration '{value}' is too large"))
}
