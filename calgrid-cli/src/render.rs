//! Terminal rendering for calgrid types.

use calgrid_core::draft::Draft;
use calgrid_core::event::{CalendarEntry, EventColor};
use calgrid_core::view::{ViewState, is_weekend};
use chrono::{NaiveDate, NaiveDateTime};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventColor {
    /// A block in the category's primary color.
    fn render(&self) -> String {
        match parse_hex(&self.primary) {
            Some((r, g, b)) => "■".truecolor(r, g, b).to_string(),
            None => "■".to_string(),
        }
    }
}

impl Render for CalendarEntry {
    fn render(&self) -> String {
        let event = &self.event;
        let id = event
            .id
            .as_ref()
            .map(|id| format!("#{}", id))
            .unwrap_or_default();

        format!(
            "{} {} {} {}",
            self.color.render(),
            format_span(event.start, event.end),
            event.title,
            id.dimmed()
        )
    }
}

impl Render for ViewState {
    fn render(&self) -> String {
        let (from, to) = self.visible_range();
        let range = if from == to {
            from.format("%a %b %-d %Y").to_string()
        } else {
            format!("{} – {}", from.format("%a %b %-d"), to.format("%a %b %-d %Y"))
        };
        format!("{} {}", range.bold(), format!("({} view)", self.mode).dimmed())
    }
}

impl Render for Draft {
    fn render(&self) -> String {
        let when = match (self.start, self.end) {
            (Some(start), Some(end)) => format_span(start, end),
            (Some(start), None) => start.format("%Y-%m-%d %H:%M").to_string(),
            _ => "no time set".to_string(),
        };
        format!("{} [{}] {}", self.title, self.category, when.dimmed())
    }
}

/// Print entries grouped under a heading per day.
pub fn print_by_day(entries: &[CalendarEntry], today: NaiveDate) {
    let mut current: Option<NaiveDate> = None;

    for entry in entries {
        let date = entry.event.start.date();
        if current != Some(date) {
            if current.is_some() {
                println!();
            }
            let label = format_date_label(date, today);
            if is_weekend(date) {
                println!("{}", label.bold().dimmed());
            } else {
                println!("{}", label.bold());
            }
            current = Some(date);
        }
        println!("  {}", entry.render());
    }
}

/// The entry's actions with the command that performs each, e.g. "Edit: calgrid edit 3".
pub fn render_actions(entry: &CalendarEntry) -> String {
    let id = entry.id().map(|id| id.to_string()).unwrap_or_default();
    entry
        .actions
        .iter()
        .map(|action| {
            format!(
                "{}: calgrid {} {}",
                action.label(),
                action.label().to_lowercase(),
                id
            )
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// "Today", "Tomorrow", "Yesterday" or e.g. "Wed Feb 25".
pub fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

/// "09:00–10:30", with the end date included when the event spans days.
fn format_span(start: NaiveDateTime, end: NaiveDateTime) -> String {
    if start.date() == end.date() {
        format!("{}–{}", start.format("%H:%M"), end.format("%H:%M"))
    } else {
        format!("{}–{}", start.format("%H:%M"), end.format("%b %-d %H:%M"))
    }
}

/// Parse "#rrggbb" (or "rrggbb") into RGB.
fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calgrid_core::cache::EventCache;
    use calgrid_core::classifier::EventClassifier;
    use calgrid_core::event::{Event, EventId};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex("#1e90ff"), Some((0x1e, 0x90, 0xff)));
        assert_eq!(parse_hex("C5C3C3"), Some((0xc5, 0xc3, 0xc3)));
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#zz0000"), None);
    }

    #[test]
    fn actions_name_their_commands() {
        let start = day(1).and_hms_opt(9, 0, 0).unwrap();
        let mut event = Event::new("Standup", start, start);
        event.id = Some(EventId::Int(3));
        let entry = EventCache::decorate(event, &EventClassifier::default());

        assert_eq!(
            render_actions(&entry),
            "Edit: calgrid edit 3  Delete: calgrid delete 3"
        );
    }

    #[test]
    fn relative_day_labels() {
        assert_eq!(format_date_label(day(5), day(5)), "Today");
        assert_eq!(format_date_label(day(6), day(5)), "Tomorrow");
        assert_eq!(format_date_label(day(4), day(5)), "Yesterday");
        assert_eq!(format_date_label(day(8), day(5)), "Fri Mar 8");
    }

    #[test]
    fn spans_across_days_show_the_end_date() {
        let start = day(1).and_hms_opt(22, 0, 0).unwrap();
        assert_eq!(
            format_span(start, day(1).and_hms_opt(23, 30, 0).unwrap()),
            "22:00–23:30"
        );
        assert_eq!(
            format_span(start, day(2).and_hms_opt(1, 0, 0).unwrap()),
            "22:00–Mar 2 01:00"
        );
    }
}
