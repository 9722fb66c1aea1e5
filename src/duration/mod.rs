//! Duration text handling.
//!
//! - `parser`: free-form input such as `"1h 30m 5s"` into seconds
//! - `formatter`: remaining seconds into a compact label such as `"1h5s"`
//!
//! Both sides use the same unit letters, so a formatted label parses back to
//! the value it was made from.

mod formatter;
mod parser;

pub use formatter::format_duration;
pub use parser::{parse_duration, parse_nonzero};

/// Seconds in one hour.
pub const SECONDS_PER_HOUR: u64 = 3600;

/// Seconds in one minute.
pub const SECONDS_PER_MINUTE: u64 = 60;
