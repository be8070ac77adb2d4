//! In-memory gateway used by the controller tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{CalGridError, CalGridResult};
use crate::event::EventId;
use crate::gateway::EventGateway;
use crate::wire::WireEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetAll,
    GetOne(EventId),
    Create(WireEvent),
    Update(WireEvent),
    Delete(EventId),
}

#[derive(Default)]
struct State {
    events: Vec<WireEvent>,
    next_id: i64,
    calls: Vec<Call>,
    failing: HashSet<&'static str>,
}

pub struct MemoryGateway {
    state: Mutex<State>,
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::with_events(Vec::new())
    }
}

impl MemoryGateway {
    pub fn with_events(events: Vec<WireEvent>) -> Self {
        let next_id = events
            .iter()
            .filter_map(|e| match e.id {
                Some(EventId::Int(n)) => Some(n),
                _ => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        MemoryGateway {
            state: Mutex::new(State {
                events,
                next_id,
                ..State::default()
            }),
        }
    }

    /// Make every later call to `operation` ("get_all", "create", ...) fail.
    pub fn fail(&self, operation: &'static str) {
        self.state.lock().unwrap().failing.insert(operation);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls other than list fetches.
    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::GetAll | Call::GetOne(_)))
            .collect()
    }

    pub fn stored(&self) -> Vec<WireEvent> {
        self.state.lock().unwrap().events.clone()
    }

    fn record(&self, call: Call, operation: &'static str) -> CalGridResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.failing.contains(operation) {
            return Err(CalGridError::gateway(operation, "connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl EventGateway for MemoryGateway {
    async fn get_all(&self) -> CalGridResult<Vec<WireEvent>> {
        self.record(Call::GetAll, "get_all")?;
        Ok(self.stored())
    }

    async fn get_one(&self, id: &EventId) -> CalGridResult<WireEvent> {
        self.record(Call::GetOne(id.clone()), "get_one")?;
        self.stored()
            .into_iter()
            .find(|e| e.id.as_ref() == Some(id))
            .ok_or_else(|| CalGridError::gateway("get_one", "HTTP 404"))
    }

    async fn create(&self, event: &WireEvent) -> CalGridResult<WireEvent> {
        self.record(Call::Create(event.clone()), "create")?;
        let mut state = self.state.lock().unwrap();
        let mut stored = event.clone();
        stored.id = Some(EventId::Int(state.next_id));
        state.next_id += 1;
        state.events.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, event: &WireEvent) -> CalGridResult<WireEvent> {
        self.record(Call::Update(event.clone()), "update")?;
        let mut state = self.state.lock().unwrap();
        let slot = state
            .events
            .iter_mut()
            .find(|e| e.id.is_some() && e.id == event.id)
            .ok_or_else(|| CalGridError::gateway("update", "HTTP 404"))?;
        *slot = event.clone();
        Ok(event.clone())
    }

    async fn delete(&self, id: &EventId) -> CalGridResult<()> {
        self.record(Call::Delete(id.clone()), "delete")?;
        let mut state = self.state.lock().unwrap();
        state.events.retain(|e| e.id.as_ref() != Some(id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_start_at_one_whichever_constructor() {
        let body: WireEvent = serde_json::from_value(serde_json::json!({
            "title": "A",
            "start": "2024-03-01T09:00"
        }))
        .unwrap();

        let fresh = MemoryGateway::default().create(&body).await.unwrap();
        let empty = MemoryGateway::with_events(Vec::new())
            .create(&body)
            .await
            .unwrap();

        assert_eq!(fresh.id, Some(EventId::Int(1)));
        assert_eq!(empty.id, fresh.id);
    }
}
