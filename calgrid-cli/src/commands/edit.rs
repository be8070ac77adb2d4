use anyhow::Result;
use calgrid_core::config::CalGridConfig;
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::utils::input::{parse_category, parse_datetime, parse_id};

pub async fn run(
    config: &CalGridConfig,
    id: &str,
    title: Option<String>,
    start: Option<&str>,
    end: Option<&str>,
    category: Option<&str>,
) -> Result<()> {
    let id = parse_id(id);
    let start = start.map(parse_datetime).transpose()?;
    let end = end.map(parse_datetime).transpose()?;
    let category = category.map(parse_category).transpose()?;

    let mut controller = super::connect(config).await?;
    controller.edit_action(&id)?;

    if let Some(title) = title {
        controller.set_title(title)?;
    }
    if let Some(start) = start {
        controller.set_start(start)?;
    }
    if let Some(end) = end {
        controller.set_end(end)?;
    }
    if let Some(category) = category {
        controller.set_category(category)?;
    }

    let draft = controller.draft().map(|d| d.render()).unwrap_or_default();
    super::persisted(controller.submit_draft().await)?;
    println!("{}", format!("  Updated: {}", draft).yellow());

    Ok(())
}
