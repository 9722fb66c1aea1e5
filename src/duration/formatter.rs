//! Compact labels for remaining time.

use super::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// Formats seconds as a compact label such as `"1h30m5s"` or `"45s"`.
///
/// Values under a minute always render as seconds (`0` becomes `"0s"`).
/// Larger values list only the non-zero units, so `3605` becomes `"1h5s"`.
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    if seconds < SECONDS_PER_MINUTE {
        return format!("{}s", seconds);
    }

    let mut output = String::new();
    let mut remainder = seconds;

    for (letter, unit_seconds) in [('h', SECONDS_PER_HOUR), ('m', SECONDS_PER_MINUTE), ('s', 1)] {
        let count = remainder / unit_seconds;
        if count > 0 {
            output.push_str(&count.to_string());
            output.push(letter);
            remainder -= count * unit_seconds;
        }
    }

    output
}
