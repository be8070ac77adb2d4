use anyhow::Result;
use calgrid_core::config::CalGridConfig;
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::utils::input::{parse_datetime, parse_id};

/// Same path as dragging or resizing the event on the grid.
pub async fn run(config: &CalGridConfig, id: &str, start: &str, end: &str) -> Result<()> {
    let id = parse_id(id);
    let start = parse_datetime(start)?;
    let end = parse_datetime(end)?;

    let mut controller = super::connect(config).await?;
    super::persisted(controller.event_times_changed(&id, start, end).await)?;

    match controller.events().iter().find(|e| e.id() == Some(&id)) {
        Some(entry) => println!("  {} {}", "Moved:".yellow(), entry.render()),
        None => println!("{}", format!("  Moved #{}", id).yellow()),
    }

    Ok(())
}
