//! In-process event collection for the current view.
//!
//! The cache is replaced wholesale by [`EventCache::refresh`]; the only
//! incremental edits are the optimistic ones made by the controller while a
//! request is in flight.

use chrono::{NaiveDate, NaiveDateTime};

use crate::classifier::EventClassifier;
use crate::error::CalGridResult;
use crate::event::{CalendarEntry, Event, EventAction, EventId, Resizable};
use crate::gateway::EventGateway;
use crate::wire::WireEvent;

/// Resize handles offered on every event.
pub const RESIZABLE: Resizable = Resizable {
    before_start: true,
    after_end: true,
};

#[derive(Debug, Clone, Default)]
pub struct EventCache {
    entries: Vec<CalendarEntry>,
}

impl EventCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach presentation state to an event.
    pub fn decorate(event: Event, classifier: &EventClassifier) -> CalendarEntry {
        CalendarEntry {
            color: classifier.color_for(event.category),
            draggable: true,
            resizable: RESIZABLE,
            actions: EventAction::ALL.to_vec(),
            event,
        }
    }

    /// Fetch every event from the gateway and replace the cache with it.
    ///
    /// The new list is fully built before it is swapped in, so a failed fetch
    /// leaves the previous contents untouched.
    pub async fn refresh<G: EventGateway + ?Sized>(
        &mut self,
        gateway: &G,
        classifier: &EventClassifier,
    ) -> CalGridResult<()> {
        let records = gateway.get_all().await?;
        let entries = Self::entries_from_wire(records, classifier);

        tracing::debug!(count = entries.len(), "Event cache refreshed");
        self.replace(entries);
        Ok(())
    }

    /// Parse and decorate server records.
    ///
    /// Records with unreadable dates are skipped. An `end` before `start` is
    /// clamped to `start`.
    pub fn entries_from_wire(
        records: Vec<WireEvent>,
        classifier: &EventClassifier,
    ) -> Vec<CalendarEntry> {
        records
            .into_iter()
            .filter_map(|record| {
                let id = record.id.clone();
                match record.into_event() {
                    Ok(event) => Some(event),
                    Err(e) => {
                        tracing::warn!(id = ?id, error = %e, "Skipping event with unreadable dates");
                        None
                    }
                }
            })
            .map(|mut event| {
                if event.end < event.start {
                    tracing::warn!(id = ?event.id, "Event ends before it starts, clamping end");
                    event.end = event.start;
                }
                Self::decorate(event, classifier)
            })
            .collect()
    }

    pub fn replace(&mut self, entries: Vec<CalendarEntry>) {
        self.entries = entries;
    }

    pub fn entries(&self) -> &[CalendarEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &EventId) -> Option<&CalendarEntry> {
        self.entries.iter().find(|e| e.id() == Some(id))
    }

    /// Events touching `date`, earliest first.
    pub fn on_day(&self, date: NaiveDate) -> Vec<CalendarEntry> {
        let mut entries: Vec<CalendarEntry> = self
            .entries
            .iter()
            .filter(|e| e.event.occurs_on(date))
            .cloned()
            .collect();
        sort_by_start(&mut entries);
        entries
    }

    /// Events overlapping the inclusive date range, earliest first.
    pub fn in_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<CalendarEntry> {
        let mut entries: Vec<CalendarEntry> = self
            .entries
            .iter()
            .filter(|e| e.event.overlaps(from, to))
            .cloned()
            .collect();
        sort_by_start(&mut entries);
        entries
    }

    /// Move an event in place. Returns the entry as it was before the move.
    pub fn patch_times(
        &mut self,
        id: &EventId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Option<CalendarEntry> {
        let entry = self.entries.iter_mut().find(|e| e.id() == Some(id))?;
        let previous = entry.clone();
        entry.event.start = start;
        entry.event.end = end;
        Some(previous)
    }

    /// Put a previously patched entry back.
    pub fn restore(&mut self, entry: CalendarEntry) {
        match self.entries.iter_mut().find(|e| e.id() == entry.id()) {
            Some(slot) => *slot = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn remove(&mut self, id: &EventId) -> Option<CalendarEntry> {
        let index = self.entries.iter().position(|e| e.id() == Some(id))?;
        Some(self.entries.remove(index))
    }
}

/// Stable sort by start time.
pub fn sort_by_start(entries: &mut [CalendarEntry]) {
    entries.sort_by_key(|e| e.event.start);
}
