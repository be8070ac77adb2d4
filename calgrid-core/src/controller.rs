//! Calendar state controller.
//!
//! Owns the event cache, the draft form and the view state, and turns
//! rendering-surface intents into gateway calls. After every change a fresh
//! [`CalendarSnapshot`] is published on a watch channel; the surface only ever
//! reads snapshots.
//!
//! Every successful create, update or delete is followed by a full cache
//! refresh. Drag/resize and delete are applied to the cache optimistically
//! before the request is sent; by default a failed request leaves that local
//! change in place until the next refresh.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tokio::sync::watch;

use crate::cache::EventCache;
use crate::classifier::EventClassifier;
use crate::config::CalGridConfig;
use crate::draft::{Draft, DraftForm, Prefill};
use crate::error::{CalGridError, CalGridResult, ValidationError};
use crate::event::{CalendarEntry, Category, EventId};
use crate::gateway::EventGateway;
use crate::view::{ViewMode, ViewState};
use crate::wire::WireEvent;

/// Immutable view of the controller's state for the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarSnapshot {
    pub events: Vec<CalendarEntry>,
    pub view: ViewState,
    pub draft: Option<Draft>,
}

/// What a day-cell click did.
#[derive(Debug, Clone, PartialEq)]
pub enum CellClick {
    /// The day has events, earliest first.
    Events(Vec<CalendarEntry>),
    /// The day was empty; a draft was opened for it.
    DraftOpened,
}

pub struct CalendarController<G> {
    gateway: G,
    classifier: EventClassifier,
    cache: EventCache,
    form: DraftForm,
    view: ViewState,
    rollback_failed_changes: bool,
    snapshots: watch::Sender<CalendarSnapshot>,
}

impl<G: EventGateway> CalendarController<G> {
    pub fn new(gateway: G, classifier: EventClassifier, view: ViewState) -> Self {
        let (snapshots, _) = watch::channel(CalendarSnapshot {
            events: Vec::new(),
            view,
            draft: None,
        });

        CalendarController {
            gateway,
            classifier,
            cache: EventCache::new(),
            form: DraftForm::new(),
            view,
            rollback_failed_changes: false,
            snapshots,
        }
    }

    /// Build a controller anchored on `today` with the configured palette and view.
    pub fn from_config(gateway: G, config: &CalGridConfig, today: NaiveDate) -> Self {
        let view = if config.expand_today {
            ViewState::expanded_on_anchor(config.default_view, today)
        } else {
            ViewState::new(config.default_view, today)
        };

        Self::new(gateway, EventClassifier::new(config.palette.clone()), view)
            .with_rollback(config.rollback_failed_changes)
    }

    /// Undo optimistic cache edits when the gateway rejects them.
    pub fn with_rollback(mut self, enabled: bool) -> Self {
        self.rollback_failed_changes = enabled;
        self
    }

    // SNAPSHOTS:

    pub fn subscribe(&self) -> watch::Receiver<CalendarSnapshot> {
        self.snapshots.subscribe()
    }

    pub fn snapshot(&self) -> CalendarSnapshot {
        CalendarSnapshot {
            events: self.cache.entries().to_vec(),
            view: self.view,
            draft: self.form.draft().cloned(),
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.snapshot());
    }

    pub fn events(&self) -> &[CalendarEntry] {
        self.cache.entries()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.form.draft()
    }

    pub fn classifier(&self) -> &EventClassifier {
        &self.classifier
    }

    /// Events in the current view's date range, earliest first.
    pub fn visible_events(&self) -> Vec<CalendarEntry> {
        let (from, to) = self.view.visible_range();
        self.cache.in_range(from, to)
    }

    /// Events of the expanded day in month view.
    pub fn expanded_events(&self) -> Vec<CalendarEntry> {
        self.view
            .expanded_day()
            .map(|day| self.cache.on_day(day))
            .unwrap_or_default()
    }

    // CACHE:

    /// Replace the cache with the server's current events.
    pub async fn refresh(&mut self) -> CalGridResult<()> {
        self.cache.refresh(&self.gateway, &self.classifier).await?;
        self.publish();
        Ok(())
    }

    /// Refresh following a change the server already accepted.
    async fn refresh_after_save(&mut self, saved: Option<WireEvent>) -> CalGridResult<()> {
        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "Change saved but reloading events failed");
            return Err(CalGridError::RefreshAfterSave {
                saved: saved.map(Box::new),
                source: Box::new(e),
            });
        }
        Ok(())
    }

    // CELL AND GRID INTENTS:

    /// A day cell was clicked.
    ///
    /// In month view this drives the day expansion. An empty day opens a new
    /// draft starting and ending at midnight of that day.
    pub fn cell_clicked(&mut self, date: NaiveDate) -> CellClick {
        let events = self.cache.on_day(date);
        tracing::debug!(%date, count = events.len(), "Day cell clicked");

        if self.view.mode == ViewMode::Month {
            self.view.click_day(date, events.len());
        }

        let outcome = if events.is_empty() {
            self.form
                .start_create(Prefill::at(date.and_time(NaiveTime::MIN)));
            CellClick::DraftOpened
        } else {
            CellClick::Events(events)
        };

        self.publish();
        outcome
    }

    /// An hour segment of the day/week grid was clicked.
    pub fn hour_segment_clicked(&mut self, instant: NaiveDateTime) {
        tracing::debug!(%instant, "Hour segment clicked");
        self.start_create(Prefill::at(instant));
    }

    /// A range was dragged out on the hour grid.
    pub fn drag_create(&mut self, start: NaiveDateTime, end: NaiveDateTime) {
        // Dragging upwards yields a reversed range
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        self.start_create(Prefill::range(start, end));
    }

    /// Explicit "new event" action: an empty form.
    pub fn new_event(&mut self) {
        self.form.start_blank();
        self.publish();
    }

    /// Open a new draft with the given times.
    pub fn start_create(&mut self, prefill: Prefill) {
        self.form.start_create(prefill);
        self.publish();
    }

    // EVENT ACTIONS:

    /// Open the edit form for a cached event.
    pub fn edit_action(&mut self, id: &EventId) -> CalGridResult<&Draft> {
        let entry = self
            .cache
            .get(id)
            .ok_or_else(|| CalGridError::EventNotFound(id.clone()))?;
        self.form.start_edit(&entry.event);
        self.publish();
        self.form.draft().ok_or(CalGridError::NoActiveDraft)
    }

    /// Delete an event.
    ///
    /// It disappears from the cache before the request is sent; a successful
    /// delete is followed by a refresh.
    pub async fn delete_action(&mut self, id: &EventId) -> CalGridResult<()> {
        let removed = self
            .cache
            .remove(id)
            .ok_or_else(|| CalGridError::EventNotFound(id.clone()))?;
        self.publish();

        if let Err(e) = self.gateway.delete(id).await {
            tracing::warn!(%id, error = %e, "Delete failed");
            if self.rollback_failed_changes {
                self.cache.restore(removed);
                self.publish();
            }
            return Err(e);
        }

        tracing::info!(%id, title = %removed.event.title, "Event deleted");
        self.form.reset();
        self.refresh_after_save(None).await
    }

    /// An event was dragged or resized to new times.
    ///
    /// The cache entry moves immediately. The full event is then sent with
    /// its dates normalized and its color recomputed from its category.
    pub async fn event_times_changed(
        &mut self,
        id: &EventId,
        new_start: NaiveDateTime,
        new_end: NaiveDateTime,
    ) -> CalGridResult<()> {
        if new_end < new_start {
            return Err(ValidationError::EndBeforeStart.into());
        }

        self.view.collapse();
        let previous = self
            .cache
            .patch_times(id, new_start, new_end)
            .ok_or_else(|| CalGridError::EventNotFound(id.clone()))?;
        self.publish();

        let mut event = previous.event.clone();
        event.start = new_start;
        event.end = new_end;
        let body = WireEvent::from_event(&event, self.classifier.color_for(event.category));

        let saved = match self.gateway.update(&body).await {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!(%id, error = %e, "Moving event failed");
                if self.rollback_failed_changes {
                    self.cache.restore(previous);
                    self.publish();
                }
                return Err(e);
            }
        };

        tracing::info!(%id, start = %body.start, end = ?body.end, "Event moved");
        self.form.reset();
        self.refresh_after_save(Some(saved)).await
    }

    // DRAFT:

    pub fn set_category(&mut self, category: Category) -> CalGridResult<()> {
        self.form.set_category(category)?;
        self.publish();
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> CalGridResult<()> {
        self.form.set_title(title)?;
        self.publish();
        Ok(())
    }

    pub fn set_start(&mut self, start: NaiveDateTime) -> CalGridResult<()> {
        self.form.set_start(start)?;
        self.publish();
        Ok(())
    }

    pub fn set_end(&mut self, end: NaiveDateTime) -> CalGridResult<()> {
        self.form.set_end(end)?;
        self.publish();
        Ok(())
    }

    /// Save the open draft, then refresh the cache.
    ///
    /// Validation errors leave the form open and make no request. A failed
    /// refresh after a successful save is reported as
    /// [`CalGridError::RefreshAfterSave`] carrying the saved record.
    pub async fn submit_draft(&mut self) -> CalGridResult<WireEvent> {
        let saved = self.form.submit(&self.gateway, &self.classifier).await?;
        self.publish();
        self.refresh_after_save(Some(saved.clone())).await?;
        Ok(saved)
    }

    pub fn cancel_draft(&mut self) {
        self.form.cancel();
        self.publish();
    }

    // VIEW:

    pub fn set_view(&mut self, mode: ViewMode) {
        self.view.set_mode(mode);
        self.publish();
    }

    pub fn previous(&mut self) {
        self.view.previous();
        self.publish();
    }

    pub fn next(&mut self) {
        self.view.next();
        self.publish();
    }

    pub fn today(&mut self) {
        self.go_to(crate::date::now().date());
    }

    pub fn go_to(&mut self, date: NaiveDate) {
        self.view.go_to(date);
        self.publish();
    }
}
