//! JSON shape of events exchanged with the event server.
//!
//! ```json
//! { "id": 1, "title": "Standup", "start": "2024-03-01T09:00", "end": "2024-03-01T09:15",
//!   "category": "Event", "color": { "primary": "#1e90ff", "secondary": "#D1E8FF" } }
//! ```
//!
//! `color` is written on every create/update but ignored on read: it is always
//! recomputed from `category`. A `category` tag calgrid doesn't know is kept
//! as-is in [`Event::extra`] and written back unchanged.

use serde::{Deserialize, Serialize};

use crate::date::{parse_wire, to_wire};
use crate::error::CalGridResult;
use crate::event::{Category, Event, EventColor, EventId};

/// Keys that only exist for presentation and must never be persisted or trusted.
pub const DERIVED_FIELDS: &[&str] = &["color", "draggable", "resizable", "actions"];

const CATEGORY_KEY: &str = "category";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EventId>,
    #[serde(default)]
    pub title: String,
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub color: Option<EventColor>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl WireEvent {
    /// Build the request body for a create/update.
    ///
    /// Dates are truncated to the minute here and nowhere else.
    pub fn from_event(event: &Event, color: EventColor) -> Self {
        let mut extra = event.extra.clone();
        let unknown_tag = match extra.remove(CATEGORY_KEY) {
            Some(serde_json::Value::String(tag)) => Some(tag),
            _ => None,
        };

        WireEvent {
            id: event.id.clone(),
            title: event.title.clone(),
            start: to_wire(event.start),
            end: Some(to_wire(event.end)),
            category: event
                .category
                .map(|c| c.as_str().to_string())
                .or(unknown_tag),
            color: Some(color),
            extra,
        }
    }

    /// Parse a server record. A missing `end` means a zero-length event.
    pub fn into_event(self) -> CalGridResult<Event> {
        let start = parse_wire(&self.start)?;
        let end = match self.end.as_deref() {
            Some(end) => parse_wire(end)?,
            None => start,
        };

        let mut extra = self.extra;
        for key in DERIVED_FIELDS {
            extra.remove(*key);
        }

        let category = match self.category {
            Some(tag) => match Category::from_tag(&tag) {
                Some(category) => Some(category),
                None => {
                    extra.insert(CATEGORY_KEY.to_string(), serde_json::Value::String(tag));
                    None
                }
            },
            None => None,
        };

        Ok(Event {
            id: self.id,
            title: self.title,
            start,
            end,
            category,
            extra,
        })
    }
}

/// Decode a listing from the server one record at a time.
///
/// A record that doesn't have the event shape (no `start`, a non-string date
/// or category, ...) is skipped with a warning instead of failing the listing.
pub fn decode_listing(records: Vec<serde_json::Value>) -> Vec<WireEvent> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.get("id").cloned();
            match serde_json::from_value::<WireEvent>(record) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!(id = ?id, error = %e, "Skipping malformed event record");
                    None
                }
            }
        })
        .collect()
}
