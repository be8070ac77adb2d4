//! Error types for calgrid.

use thiserror::Error;

use crate::event::EventId;
use crate::wire::WireEvent;

/// Reasons a draft is rejected before any request is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Start time is required")]
    MissingStart,

    #[error("End time is required")]
    MissingEnd,

    #[error("End time must not be before start time")]
    EndBeforeStart,
}

/// Errors that can occur in calgrid operations.
#[derive(Error, Debug)]
pub enum CalGridError {
    #[error("Invalid event: {0}")]
    Validation(#[from] ValidationError),

    #[error("Event server failed to {operation}: {message}")]
    Gateway {
        operation: &'static str,
        message: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server accepted the change but reloading the events afterwards failed.
    #[error("Change was saved but reloading events failed: {source}")]
    RefreshAfterSave {
        /// The record the server returned, when the change produced one
        saved: Option<Box<WireEvent>>,
        source: Box<CalGridError>,
    },

    #[error("No event is being edited")]
    NoActiveDraft,

    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    #[error("Event has not been saved yet")]
    MissingId,

    #[error("Invalid date '{0}'")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CalGridError {
    pub fn gateway(operation: &'static str, message: impl Into<String>) -> Self {
        CalGridError::Gateway {
            operation,
            message: message.into(),
        }
    }

    /// Whether the failure came from the event server rather than local state.
    pub fn is_gateway(&self) -> bool {
        matches!(self, CalGridError::Gateway { .. } | CalGridError::Http(_))
    }
}

/// Result type alias for calgrid operations.
pub type CalGridResult<T> = Result<T, CalGridError>;
