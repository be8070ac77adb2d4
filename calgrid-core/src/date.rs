//! Minute-precision wire timestamps.
//!
//! The event server stores naive local wall-clock times as `YYYY-MM-DDTHH:mm`
//! with no offset. Everything sent to it goes through [`to_wire`], which is the
//! only place precision is dropped.

use chrono::{DateTime, Local, NaiveDateTime, Timelike};

use crate::error::{CalGridError, CalGridResult};

/// Format used for `start`/`end` on the wire.
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Formats the server may send back that are more precise than [`WIRE_FORMAT`].
const ACCEPTED_FORMATS: &[&str] = &[
    WIRE_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Drop seconds and sub-second precision.
pub fn truncate_to_minute(instant: NaiveDateTime) -> NaiveDateTime {
    instant
        .with_second(0)
        .and_then(|dt| dt.with_nanosecond(0))
        .unwrap_or(instant)
}

pub fn to_wire(instant: NaiveDateTime) -> String {
    truncate_to_minute(instant).format(WIRE_FORMAT).to_string()
}

/// Like [`to_wire`], falling back to the current local time when no instant is given.
pub fn to_wire_or_now(instant: Option<NaiveDateTime>) -> String {
    to_wire(instant.unwrap_or_else(now))
}

/// Parse a timestamp as returned by the server.
///
/// Accepts the minute format, second/fractional forms, and RFC 3339 strings.
/// Offsets on RFC 3339 input are dropped; the wall-clock part is kept.
pub fn parse_wire(s: &str) -> CalGridResult<NaiveDateTime> {
    let s = s.trim();

    for format in ACCEPTED_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }

    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.naive_local())
        .map_err(|_| CalGridError::InvalidDate(s.to_string()))
}

/// Current local wall-clock time.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
