//! The create/edit form.
//!
//! A [`Draft`] holds the editable fields of one event, detached from the cache
//! until it is submitted. Its color is never stored: callers derive it from the
//! category through the classifier.

use chrono::NaiveDateTime;

use crate::classifier::EventClassifier;
use crate::error::{CalGridError, CalGridResult, ValidationError};
use crate::event::{Category, Event, EventColor, EventId};
use crate::gateway::EventGateway;
use crate::wire::WireEvent;

/// Values a new draft is opened with (cell click, drag-create).
#[derive(Debug, Clone, PartialEq)]
pub struct Prefill {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub title: Option<String>,
}

impl Prefill {
    pub fn at(instant: NaiveDateTime) -> Self {
        Prefill {
            start: instant,
            end: instant,
            title: None,
        }
    }

    pub fn range(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Prefill {
            start,
            end,
            title: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Draft {
    pub id: Option<EventId>,
    pub title: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub category: Category,

    /// The edited event had no recognized category and none was picked since.
    /// Saving then leaves the stored tag (or its absence) alone.
    keep_stored_category: bool,

    /// Unmodeled fields of the event being edited
    extra: serde_json::Map<String, serde_json::Value>,
}

impl Draft {
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn color(&self, classifier: &EventClassifier) -> EventColor {
        classifier.color_for(Some(self.category))
    }

    /// Check required fields and build the event to persist.
    pub fn validate(&self) -> Result<Event, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        let start = self.start.ok_or(ValidationError::MissingStart)?;
        let end = self.end.ok_or(ValidationError::MissingEnd)?;
        if end < start {
            return Err(ValidationError::EndBeforeStart);
        }

        Ok(Event {
            id: self.id.clone(),
            title: title.to_string(),
            start,
            end,
            category: (!self.keep_stored_category).then_some(self.category),
            extra: self.extra.clone(),
        })
    }
}

impl From<&Event> for Draft {
    fn from(event: &Event) -> Self {
        Draft {
            id: event.id.clone(),
            title: event.title.clone(),
            start: Some(event.start),
            end: Some(event.end),
            category: event.category_or_default(),
            keep_stored_category: event.category.is_none(),
            extra: event.extra.clone(),
        }
    }
}

/// Holds the draft and whether the edit surface is showing.
#[derive(Debug, Clone, Default)]
pub struct DraftForm {
    draft: Option<Draft>,
}

impl DraftForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    /// Whether the edit surface is open.
    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn start_create(&mut self, prefill: Prefill) -> &Draft {
        self.draft.insert(Draft {
            title: prefill.title.unwrap_or_default(),
            start: Some(prefill.start),
            end: Some(prefill.end),
            ..Draft::default()
        })
    }

    /// Open an empty form with no times filled in.
    pub fn start_blank(&mut self) -> &Draft {
        self.draft.insert(Draft::default())
    }

    pub fn start_edit(&mut self, event: &Event) -> &Draft {
        self.draft.insert(Draft::from(event))
    }

    pub fn set_category(&mut self, category: Category) -> CalGridResult<()> {
        let draft = self.draft_mut()?;
        draft.category = category;
        draft.keep_stored_category = false;
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> CalGridResult<()> {
        self.draft_mut()?.title = title.into();
        Ok(())
    }

    pub fn set_start(&mut self, start: NaiveDateTime) -> CalGridResult<()> {
        self.draft_mut()?.start = Some(start);
        Ok(())
    }

    pub fn set_end(&mut self, end: NaiveDateTime) -> CalGridResult<()> {
        self.draft_mut()?.end = Some(end);
        Ok(())
    }

    /// Validate and persist the draft.
    ///
    /// Creates when the draft has no id, updates otherwise. The draft is only
    /// cleared once the gateway accepted it; on any error the form stays open.
    pub async fn submit<G: EventGateway + ?Sized>(
        &mut self,
        gateway: &G,
        classifier: &EventClassifier,
    ) -> CalGridResult<WireEvent> {
        let draft = self.draft.as_ref().ok_or(CalGridError::NoActiveDraft)?;
        let event = draft.validate()?;
        let body = WireEvent::from_event(&event, classifier.color_for(event.category));

        let saved = if draft.is_new() {
            let saved = gateway.create(&body).await?;
            tracing::info!(id = ?saved.id, title = %event.title, "Event created");
            saved
        } else {
            let saved = gateway.update(&body).await?;
            tracing::info!(id = ?event.id, title = %event.title, "Event updated");
            saved
        };

        self.reset();
        Ok(saved)
    }

    /// Discard the draft without saving.
    pub fn cancel(&mut self) {
        self.reset();
    }

    pub fn reset(&mut self) {
        self.draft = None;
    }

    fn draft_mut(&mut self) -> CalGridResult<&mut Draft> {
        self.draft.as_mut().ok_or(CalGridError::NoActiveDraft)
    }
}
