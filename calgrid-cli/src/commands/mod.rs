pub mod config;
pub mod day;
pub mod delete;
pub mod edit;
pub mod events;
pub mod move_event;
pub mod new;

use anyhow::{Context, Result};
use calgrid_core::config::CalGridConfig;
use calgrid_core::gateway::HttpGateway;
use calgrid_core::{CalGridError, CalGridResult, CalendarController};
use owo_colors::OwoColorize;

/// Build a controller against the configured server and load its events.
pub async fn connect(config: &CalGridConfig) -> Result<CalendarController<HttpGateway>> {
    let gateway = HttpGateway::new(&config.server_url, config.request_timeout())?;
    let today = calgrid_core::date::now().date();
    let mut controller = CalendarController::from_config(gateway, config, today);

    controller
        .refresh()
        .await
        .with_context(|| format!("Could not load events from {}", config.server_url))?;

    Ok(controller)
}

/// Treat a change the server accepted as done even when reloading afterwards
/// failed. Returns `None` in that case, after warning on stderr.
pub fn persisted<T>(result: CalGridResult<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(CalGridError::RefreshAfterSave { saved, source }) => {
            let id = saved
                .and_then(|s| s.id)
                .map(|id| format!(" #{}", id))
                .unwrap_or_default();
            eprintln!(
                "{}",
                format!("  Saved{}, but reloading events failed: {}", id, source).yellow()
            );
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
