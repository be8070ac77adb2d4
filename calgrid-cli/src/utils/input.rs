//! Parsing of dates, times and ids given on the command line.

use anyhow::{Result, anyhow};
use calgrid_core::date::parse_wire;
use calgrid_core::event::{Category, EventId};
use chrono::{NaiveDate, NaiveDateTime};

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow!("Could not parse date: \"{}\" (expected YYYY-MM-DD)", input))
}

/// Accepts everything the event server accepts, plus a bare date for midnight.
pub fn parse_datetime(input: &str) -> Result<NaiveDateTime> {
    if let Ok(instant) = parse_wire(input.trim()) {
        return Ok(instant);
    }

    parse_date(input)
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
        .map_err(|_| anyhow!("Could not parse date/time: \"{}\" (expected YYYY-MM-DDTHH:MM)", input))
}

pub fn parse_id(input: &str) -> EventId {
    let Ok(id) = input.trim().parse::<EventId>();
    id
}

pub fn parse_category(input: &str) -> Result<Category> {
    Category::from_tag(input)
        .ok_or_else(|| anyhow!("Unknown category \"{}\". Expected Event or Break", input))
}
