//! Remote event store.
//!
//! The controller only talks to the store through [`EventGateway`]. The
//! production implementation is [`HttpGateway`], a JSON REST client.

mod http;
#[cfg(test)]
pub(crate) mod memory;

pub use http::{DEFAULT_SERVER_URL, HttpGateway};

use async_trait::async_trait;

use crate::error::CalGridResult;
use crate::event::EventId;
use crate::wire::WireEvent;

/// CRUD operations against the persistent event store.
#[async_trait]
pub trait EventGateway: Send + Sync {
    async fn get_all(&self) -> CalGridResult<Vec<WireEvent>>;

    async fn get_one(&self, id: &EventId) -> CalGridResult<WireEvent>;

    /// Persist a new event. The returned record carries the assigned id.
    async fn create(&self, event: &WireEvent) -> CalGridResult<WireEvent>;

    /// Replace the stored event with the same id as `event`.
    async fn update(&self, event: &WireEvent) -> CalGridResult<WireEvent>;

    async fn delete(&self, id: &EventId) -> CalGridResult<()>;
}
