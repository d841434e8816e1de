use crate::defines::*;
use crate::errors::{Error, Result};

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

/// Compiled once; the pattern is a constant known to be valid.
fn timestamp_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(TIMESTAMP_PATTERN).expect("TIMESTAMP_PATTERN is a valid regex"))
}

/// Current offset of the local timezone, in seconds east of UTC.
pub fn local_offset_seconds() -> i32 {
    Local::now().offset().local_minus_utc()
}

/// Format an offset in seconds as `±HH:MM`.
/// Hours and minutes are both taken from the absolute value so zones west of
/// UTC with a minute component render as e.g. `-03:30`.
pub fn format_utc_offset(offset_seconds: i32) -> String {
    let sign = if offset_seconds < 0 { '-' } else { '+' };
    let abs = offset_seconds.unsigned_abs();
    format!("{}{:02}:{:02}", sign, abs / 3600, abs / 60 % 60)
}

/// Parse local wall-clock `YYYY-MM-DDTHH:MM:SS` into an absolute instant,
/// using the process's current UTC offset.
pub fn normalize(raw: &str) -> Result<DateTime<FixedOffset>> {
    normalize_with_offset(raw, local_offset_seconds())
}

/// Same as `normalize` with an explicit offset in seconds east of UTC.
pub fn normalize_with_offset(raw: &str, offset_seconds: i32) -> Result<DateTime<FixedOffset>> {
    if !timestamp_shape().is_match(raw) || NaiveDateTime::parse_from_str(raw, TIMESTAMP_LAYOUT).is_err() {
        return Err(Error::InvalidTimestamp(raw.to_string()));
    }

    let with_offset = format!("{}{}", raw, format_utc_offset(offset_seconds));
    log::trace!("normalized timestamp {} -> {}", raw, with_offset);

    DateTime::parse_from_str(&with_offset, TIMESTAMP_OFFSET_LAYOUT)
        .map_err(|_| Error::InvalidTimestamp(with_offset))
}

pub fn epoch_millis(ts: &DateTime<FixedOffset>) -> i64 {
    ts.timestamp_millis()
}
