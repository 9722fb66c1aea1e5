//! Duration text parsing.
//!
//! Accepts strings such as `"1h 30m 5s"`, `"90s"` or `"2m5s"`. Components
//! must appear in the order hours, minutes, seconds; each one is optional
//! and may be followed by a single space.

use super::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// Units in the order they are matched.
const UNITS: &[(char, u64)] = &[
    ('h', SECONDS_PER_HOUR),
    ('m', SECONDS_PER_MINUTE),
    ('s', 1),
];

/// Parses a duration string into a total number of seconds.
///
/// Matching starts at the first non-whitespace character. Each unit is tried
/// once, in order; a component that does not match is simply absent and the
/// next unit is tried at the same position. Anything after the last matched
/// component is ignored.
///
/// Returns 0 when no component matches. Callers treat 0 as invalid input.
///
/// # Example
///
/// ```rust
/// use timerpal::duration::parse_duration;
///
/// assert_eq!(parse_duration("1h 30m 5s"), 5405);
/// assert_eq!(parse_duration("45s"), 45);
/// assert_eq!(parse_duration("soon"), 0);
/// ```
#[must_use]
pub fn parse_duration(input: &str) -> u64 {
    let mut rest = input.trim_start();
    let mut total: u64 = 0;

    for &(letter, unit_seconds) in UNITS {
        if let Some((value, remaining)) = take_component(rest, letter) {
            total = total.saturating_add(value.saturating_mul(unit_seconds));
            rest = remaining;
        }
    }

    total
}

/// Parses a duration string, returning `None` for zero or unrecognized input.
#[must_use]
pub fn parse_nonzero(input: &str) -> Option<u64> {
    match parse_duration(input) {
        0 => None,
        seconds => Some(seconds),
    }
}

/// Matches `<digits><letter>` with an optional trailing space at the start
/// of `input`.
fn take_component(input: &str, letter: char) -> Option<(u64, &str)> {
    let digits_len = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    if digits_len == 0 {
        return None;
    }

    let (digits, after) = input.split_at(digits_len);
    let after = after.strip_prefix(letter)?;
    let after = after.strip_prefix(' ').unwrap_or(after);

    Some((saturating_parse(digits), after))
}

/// Parses an ASCII digit string, saturating at `u64::MAX`.
fn saturating_parse(digits: &str) -> u64 {
    digits.bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    })
}
