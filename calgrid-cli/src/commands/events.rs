use anyhow::Result;
use calgrid_core::config::CalGridConfig;
use calgrid_core::view::ViewMode;
use owo_colors::OwoColorize;

use crate::render::{Render, print_by_day};
use crate::utils::input::parse_date;

pub async fn run(
    config: &CalGridConfig,
    view: Option<ViewMode>,
    date: Option<&str>,
    offset: i32,
) -> Result<()> {
    let mut controller = super::connect(config).await?;
    let today = controller.view().anchor;

    if let Some(mode) = view {
        controller.set_view(mode);
    }
    if let Some(date) = date {
        controller.go_to(parse_date(date)?);
    }
    for _ in 0..offset.unsigned_abs() {
        if offset < 0 {
            controller.previous();
        } else {
            controller.next();
        }
    }

    println!("{}", controller.view().render());
    println!();

    let events = controller.visible_events();
    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    print_by_day(&events, today);

    let expanded = controller.expanded_events();
    if !expanded.is_empty() {
        println!();
        println!("{}", "Expanded day".bold());
        for entry in &expanded {
            println!("  {}", entry.render());
        }
    }

    Ok(())
}
