//! Event types shared by the cache, drafts and the gateway.
//!
//! [`Event`] is what gets persisted. [`CalendarEntry`] wraps an event with the
//! presentation state the rendering surface needs (color, drag/resize handles,
//! actions); none of that is ever sent back to the server.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Server-assigned identifier. The event server may hand out numbers or strings.
///
/// Ids compare by their text, so `Int(1)` equals `Str("1")`: an id typed on
/// the command line matches whichever form the server stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Int(i64),
    Str(String),
}

impl PartialEq for EventId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (EventId::Int(a), EventId::Int(b)) => a == b,
            (EventId::Str(a), EventId::Str(b)) => a == b,
            (EventId::Int(n), EventId::Str(s)) | (EventId::Str(s), EventId::Int(n)) => {
                *s == n.to_string()
            }
        }
    }
}

impl Eq for EventId {}

impl Hash for EventId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            EventId::Int(n) => n.to_string().hash(state),
            EventId::Str(s) => s.hash(state),
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EventId::Int(n) => write!(f, "{}", n),
            EventId::Str(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for EventId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => EventId::Int(n),
            Err(_) => EventId::Str(s.to_string()),
        })
    }
}

impl From<i64> for EventId {
    fn from(n: i64) -> Self {
        EventId::Int(n)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        EventId::Str(s.to_string())
    }
}

/// Classification tag that drives the display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Event,
    Break,
}

impl Category {
    /// Parse a tag case-insensitively. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "event" => Some(Category::Event),
            "break" => Some(Category::Break),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Event => "Event",
            Category::Break => "Break",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A primary/secondary color pair, as CSS hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventColor {
    pub primary: String,
    pub secondary: String,
}

impl EventColor {
    pub fn new(primary: &str, secondary: &str) -> Self {
        EventColor {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
        }
    }
}

/// A calendar event as persisted by the event server.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// `None` until the first successful create
    pub id: Option<EventId>,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub category: Option<Category>,

    /// Fields the server sent that calgrid doesn't model.
    /// Preserved so updates don't drop them.
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Event {
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Event {
            id: None,
            title: title.into(),
            start,
            end,
            category: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Whether any part of the event falls on `date`.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        self.start.date() <= date && date <= self.end.date()
    }

    /// Whether the event overlaps the inclusive date range.
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.start.date() <= to && self.end.date() >= from
    }

    pub fn category_or_default(&self) -> Category {
        self.category.unwrap_or_default()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Which edges of an event can be dragged to resize it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resizable {
    pub before_start: bool,
    pub after_end: bool,
}

/// Per-event actions offered by the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventAction {
    Edit,
    Delete,
}

impl EventAction {
    /// Actions attached to every cached event.
    pub const ALL: [EventAction; 2] = [EventAction::Edit, EventAction::Delete];

    pub fn label(&self) -> &'static str {
        match self {
            EventAction::Edit => "Edit",
            EventAction::Delete => "Delete",
        }
    }
}

/// An event decorated with presentation state.
///
/// Built on every cache refresh from the current palette; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEntry {
    pub event: Event,
    pub color: EventColor,
    pub draggable: bool,
    pub resizable: Resizable,
    pub actions: Vec<EventAction>,
}

impl CalendarEntry {
    pub fn id(&self) -> Option<&EventId> {
        self.event.id.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn event_id_parses_numbers_and_strings() {
        assert_eq!("42".parse::<EventId>().unwrap(), EventId::Int(42));
        assert_eq!(
            "a1b2".parse::<EventId>().unwrap(),
            EventId::Str("a1b2".to_string())
        );
        assert_eq!(EventId::Int(7).to_string(), "7");
    }

    #[test]
    fn event_ids_match_across_number_and_string_forms() {
        use std::collections::HashSet;

        assert_eq!(EventId::Int(1), EventId::Str("1".into()));
        assert_eq!(EventId::Str("1".into()), "1".parse::<EventId>().unwrap());
        assert_ne!(EventId::Int(1), EventId::Str("01".into()));
        assert_ne!(EventId::Int(1), EventId::Int(2));

        let ids: HashSet<EventId> = [EventId::Int(5), EventId::Str("5".into())].into();
        assert_eq!(ids.len(), 1);
    }

    #[test]
    fn event_id_serializes_untagged() {
        assert_eq!(serde_json::to_string(&EventId::Int(3)).unwrap(), "3");
        assert_eq!(
            serde_json::from_str::<EventId>("\"x9\"").unwrap(),
            EventId::Str("x9".into())
        );
    }

    #[test]
    fn category_tags_are_case_insensitive() {
        assert_eq!(Category::from_tag("Break"), Some(Category::Break));
        assert_eq!(Category::from_tag(" event "), Some(Category::Event));
        assert_eq!(Category::from_tag("meeting"), None);
    }

    #[test]
    fn multi_day_event_occurs_on_each_day() {
        let event = Event::new("Offsite", dt(1, 9), dt(3, 17));
        assert!(event.occurs_on(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()));
        assert!(event.occurs_on(NaiveDate::from_ymd_opt(2024, 3, 3).unwrap()));
        assert!(!event.occurs_on(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()));
    }
}
