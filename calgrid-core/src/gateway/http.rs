//! JSON REST client for the event server.
//!
//! Routes follow the usual collection layout:
//! `GET /events`, `GET /events/{id}`, `POST /events`, `PUT /events/{id}`,
//! `DELETE /events/{id}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Response;

use crate::error::{CalGridError, CalGridResult};
use crate::event::EventId;
use crate::gateway::EventGateway;
use crate::wire::{WireEvent, decode_listing};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000/events";

/// HTTP client for the event collection at `base_url`.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout: Duration) -> CalGridResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("calgrid/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpGateway {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: &EventId) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

/// Turn a non-2xx response into a gateway error carrying the status and body.
async fn check(resp: Response, operation: &'static str) -> CalGridResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, body.trim())
    };
    Err(CalGridError::gateway(operation, message))
}

#[async_trait]
impl EventGateway for HttpGateway {
    async fn get_all(&self) -> CalGridResult<Vec<WireEvent>> {
        let resp = self.http.get(&self.base_url).send().await?;
        let resp = check(resp, "list events").await?;
        let records: Vec<serde_json::Value> = resp.json().await?;
        Ok(decode_listing(records))
    }

    async fn get_one(&self, id: &EventId) -> CalGridResult<WireEvent> {
        let resp = self.http.get(self.item_url(id)).send().await?;
        let resp = check(resp, "fetch event").await?;
        Ok(resp.json().await?)
    }

    async fn create(&self, event: &WireEvent) -> CalGridResult<WireEvent> {
        let resp = self.http.post(&self.base_url).json(event).send().await?;
        let resp = check(resp, "create event").await?;
        Ok(resp.json().await?)
    }

    async fn update(&self, event: &WireEvent) -> CalGridResult<WireEvent> {
        let id = event.id.as_ref().ok_or(CalGridError::MissingId)?;
        let resp = self.http.put(self.item_url(id)).json(event).send().await?;
        let resp = check(resp, "update event").await?;
        Ok(resp.json().await?)
    }

    async fn delete(&self, id: &EventId) -> CalGridResult<()> {
        let resp = self.http.delete(self.item_url(id)).send().await?;
        check(resp, "delete event").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn gateway(server: &mockito::ServerGuard) -> HttpGateway {
        HttpGateway::new(&format!("{}/events/", server.url()), Duration::from_secs(5)).unwrap()
    }

    fn standup() -> WireEvent {
        WireEvent {
            id: None,
            title: "Standup".into(),
            start: "2024-03-01T09:00".into(),
            end: Some("2024-03-01T09:15".into()),
            category: Some("Event".into()),
            color: None,
            extra: serde_json::Map::new(),
        }
    }

    #[tokio::test]
    async fn get_all_lists_the_collection() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/events")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!([
                    { "id": 1, "title": "A", "start": "2024-03-01T09:00", "end": "2024-03-01T10:00" },
                    { "id": "b", "title": "B", "start": "2024-03-02T09:00", "end": "2024-03-02T10:00" }
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let events = gateway(&server).get_all().await.unwrap();

        mock.assert_async().await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, Some(EventId::Int(1)));
        assert_eq!(events[1].id, Some(EventId::Str("b".into())));
    }

    #[tokio::test]
    async fn get_all_skips_malformed_records() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/events")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!([
                    { "id": 1, "title": "A", "start": "2024-03-01T09:00", "end": "2024-03-01T10:00" },
                    { "id": 2, "title": "B", "start": null },
                    { "id": 3, "title": "C", "start": "2024-03-01T11:00", "category": ["x"] },
                    { "id": "4", "title": "D", "start": "2024-03-02T09:00" }
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let events = gateway(&server).get_all().await.unwrap();

        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "D"]);
    }

    #[tokio::test]
    async fn create_posts_the_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/events")
            .match_body(Matcher::PartialJson(json!({
                "title": "Standup",
                "start": "2024-03-01T09:00"
            })))
            .with_status(201)
            .with_body(
                json!({ "id": 7, "title": "Standup", "start": "2024-03-01T09:00", "end": "2024-03-01T09:15" })
                    .to_string(),
            )
            .create_async()
            .await;

        let created = gateway(&server).create(&standup()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(created.id, Some(EventId::Int(7)));
    }

    #[tokio::test]
    async fn update_puts_to_the_item_route() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/events/7")
            .with_status(200)
            .with_body(
                json!({ "id": 7, "title": "Standup", "start": "2024-03-01T09:30", "end": "2024-03-01T09:45" })
                    .to_string(),
            )
            .create_async()
            .await;

        let mut event = standup();
        event.id = Some(EventId::Int(7));
        gateway(&server).update(&event).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn update_without_id_never_hits_the_server() {
        let server = mockito::Server::new_async().await;
        let result = gateway(&server).update(&standup()).await;
        assert!(matches!(result, Err(CalGridError::MissingId)));
    }

    #[tokio::test]
    async fn delete_hits_the_item_route() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/events/abc")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        gateway(&server)
            .delete(&EventId::Str("abc".into()))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_a_gateway_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/events/404")
            .with_status(404)
            .with_body("Not Found")
            .create_async()
            .await;

        let err = gateway(&server)
            .get_one(&EventId::Int(404))
            .await
            .unwrap_err();

        assert!(err.is_gateway());
        let message = err.to_string();
        assert!(message.contains("404"), "unexpected message: {}", message);
        assert!(message.contains("Not Found"));
    }
}
