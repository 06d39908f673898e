//! Rendering timestamps the way the audit UI displays them.
//!
//! `time` predicates match against the rendered string rather than the
//! instant, so a mask such as `time={+0500}09:00` finds entries displayed at
//! nine o'clock in UTC+5.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use tracing::debug;

/// Display format: `MMM d, yyyy HH:mm:ss a`.
pub const UI_FORMAT: &str = "%b %-d, %Y %H:%M:%S %p";

/// Parses a zone offset such as `+0500`, `-0330`, `+05:30`, `+5` or `+05`.
///
/// Blank input yields UTC. Input that cannot be parsed also yields UTC, the
/// same outcome as looking up an unknown GMT zone.
pub fn parse_offset(options: &str) -> FixedOffset {
    let trimmed = options.trim();
    if trimmed.is_empty() {
        return utc();
    }
    match try_parse_offset(trimmed) {
        Some(offset) => offset,
        None => {
            debug!(offset = trimmed, "unparseable zone offset, using +0000");
            utc()
        }
    }
}

fn try_parse_offset(input: &str) -> Option<FixedOffset> {
    let (sign, rest) = match input.as_bytes().first()? {
        b'+' => (1, &input[1..]),
        b'-' => (-1, &input[1..]),
        _ => return None,
    };
    if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_digit() || c == ':') {
        return None;
    }

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() <= 2 => (rest, "0"),
        None if rest.len() == 4 => rest.split_at(2),
        None => return None,
    };
    if hours.is_empty() || hours.len() > 2 || minutes.is_empty() || minutes.len() > 2 {
        return None;
    }

    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// Renders an instant in [`UI_FORMAT`] at the given offset.
pub fn format_like_ui(instant: &DateTime<Utc>, offset: FixedOffset) -> String {
    instant.with_timezone(&offset).format(UI_FORMAT).to_string()
}
