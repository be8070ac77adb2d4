//! Core of calgrid: event state and synchronization.
//!
//! - `controller`: turns calendar intents into cache, draft and view changes plus gateway calls
//! - `cache`, `draft`, `view`, `expansion`: the state it owns
//! - `gateway`: the remote event store, with an HTTP implementation
//! - `date`, `classifier`, `wire`: wire format, minute precision and category colors

pub mod cache;
pub mod classifier;
pub mod config;
pub mod controller;
pub mod date;
pub mod draft;
pub mod error;
pub mod event;
pub mod expansion;
pub mod gateway;
pub mod view;
pub mod wire;

pub use controller::{CalendarController, CalendarSnapshot, CellClick};
pub use error::{CalGridError, CalGridResult, ValidationError};
pub use event::{CalendarEntry, Category, Event, EventColor, EventId};
