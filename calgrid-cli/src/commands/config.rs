use anyhow::Result;
use calgrid_core::config::{CalGridConfig, SERVER_URL_ENV};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(config: &CalGridConfig, save: bool) -> Result<()> {
    let config_path = CalGridConfig::config_path()?;

    if save {
        config.save(&config_path)?;
        println!("{}", format!("  Saved {}", config_path.display()).green());
    } else if !config_path.exists() {
        CalGridConfig::create_default_config(&config_path)?;
        println!("{}", format!("  Created {}", config_path.display()).green());
    }

    println!("{}", "Paths".bold());
    println!("  Config:   {}", config_path.display());
    println!();
    println!("{}", "Settings".bold());
    println!(
        "  Server:   {} {}",
        config.server_url,
        format!("(override with {})", SERVER_URL_ENV).dimmed()
    );
    println!("  Timeout:  {}s", config.request_timeout_secs);
    println!("  View:     {}", config.default_view);
    println!("  Expand today:      {}", config.expand_today);
    println!("  Rollback failures: {}", config.rollback_failed_changes);
    println!();
    println!("{}", "Colors".bold());
    println!("  {} Event", config.palette.event.render());
    println!("  {} Break", config.palette.break_time.render());

    Ok(())
}
