use anyhow::Result;
use calgrid_core::CellClick;
use calgrid_core::config::CalGridConfig;
use calgrid_core::view::ViewMode;
use owo_colors::OwoColorize;

use crate::render::{Render, format_date_label, render_actions};
use crate::utils::input::parse_date;

/// Click a day cell in month view and show what it opens.
pub async fn run(config: &CalGridConfig, date: &str) -> Result<()> {
    let date = parse_date(date)?;
    let mut controller = super::connect(config).await?;
    let today = controller.view().anchor;

    controller.set_view(ViewMode::Month);
    controller.go_to(date);

    println!("{}", format_date_label(date, today).bold());

    match controller.cell_clicked(date) {
        CellClick::Events(entries) => {
            for entry in &entries {
                println!("  {}", entry.render());
                println!("    {}", render_actions(entry).dimmed());
            }
        }
        CellClick::DraftOpened => {
            println!("  {}", "No events".dimmed());
            if let Some(draft) = controller.draft() {
                tracing::debug!(draft = %draft.render(), "Discarding draft for empty day");
            }
            controller.cancel_draft();
        }
    }

    Ok(())
}
