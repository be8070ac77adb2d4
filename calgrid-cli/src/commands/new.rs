use anyhow::Result;
use calgrid_core::config::CalGridConfig;
use calgrid_core::draft::Prefill;
use calgrid_core::event::Category;
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::utils::input::parse_datetime;

pub async fn run(
    config: &CalGridConfig,
    title: String,
    start: &str,
    end: Option<&str>,
    is_break: bool,
) -> Result<()> {
    let start = parse_datetime(start)?;
    let end = match end {
        Some(end) => parse_datetime(end)?,
        None => start,
    };

    let mut controller = super::connect(config).await?;
    controller.start_create(Prefill::range(start, end));
    controller.set_title(title)?;
    if is_break {
        controller.set_category(Category::Break)?;
    }

    let draft = controller.draft().map(|d| d.render()).unwrap_or_default();
    let saved = super::persisted(controller.submit_draft().await)?;

    let id = saved
        .and_then(|s| s.id)
        .map(|id| format!(" #{}", id))
        .unwrap_or_default();
    println!("{}{}", format!("  Created: {}", draft).green(), id.dimmed());

    Ok(())
}
