use anyhow::Result;
use calgrid_core::config::CalGridConfig;
use owo_colors::OwoColorize;

use crate::utils::input::parse_id;

pub async fn run(config: &CalGridConfig, id: &str) -> Result<()> {
    let id = parse_id(id);
    let mut controller = super::connect(config).await?;

    let title = controller
        .events()
        .iter()
        .find(|e| e.id() == Some(&id))
        .map(|e| e.event.title.clone())
        .unwrap_or_default();

    super::persisted(controller.delete_action(&id).await)?;
    println!("{}", format!("  Deleted: {} #{}", title, id).red());

    Ok(())
}
