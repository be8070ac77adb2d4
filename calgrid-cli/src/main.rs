mod commands;
mod render;
mod utils;

use anyhow::Result;
use calgrid_core::config::CalGridConfig;
use calgrid_core::view::ViewMode;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "calgrid")]
#[command(about = "Browse and edit the events on your calendar server")]
struct Cli {
    /// Event server collection URL (overrides the config file)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Log requests and state changes (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the events visible in a day, week or month view
    Events {
        /// View to show (day, week, month). Defaults to the configured view.
        #[arg(long)]
        view: Option<ViewMode>,

        /// Date the view is anchored on (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// Step the view back or forward by this many periods
        #[arg(long, allow_hyphen_values = true, default_value_t = 0)]
        offset: i32,
    },
    /// Open a day the way the month view does: list its events
    Day {
        /// Day to open (YYYY-MM-DD)
        date: String,
    },
    /// Create an event
    New {
        title: String,

        /// Start time (e.g. "2024-03-01T09:00")
        #[arg(short, long)]
        start: String,

        /// End time. Defaults to the start time.
        #[arg(short, long)]
        end: Option<String>,

        /// Mark the event as a break
        #[arg(long = "break")]
        is_break: bool,
    },
    /// Change an event's title, times or category
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        start: Option<String>,

        #[arg(short, long)]
        end: Option<String>,

        /// "Event" or "Break"
        #[arg(long)]
        category: Option<String>,
    },
    /// Move or resize an event
    Move {
        id: String,

        #[arg(short, long)]
        start: String,

        #[arg(short, long)]
        end: String,
    },
    /// Delete an event
    Delete { id: String },
    /// Show the config file location, creating a default one if missing
    Config {
        /// Write the effective settings (including --server) to the config file
        #[arg(long)]
        save: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = CalGridConfig::load()?;
    if let Some(server) = cli.server {
        config.server_url = server;
    }

    match cli.command {
        Commands::Events { view, date, offset } => {
            commands::events::run(&config, view, date.as_deref(), offset).await
        }
        Commands::Day { date } => commands::day::run(&config, &date).await,
        Commands::New {
            title,
            start,
            end,
            is_break,
        } => commands::new::run(&config, title, &start, end.as_deref(), is_break).await,
        Commands::Edit {
            id,
            title,
            start,
            end,
            category,
        } => {
            commands::edit::run(
                &config,
                &id,
                title,
                start.as_deref(),
                end.as_deref(),
                category.as_deref(),
            )
            .await
        }
        Commands::Move { id, start, end } => {
            commands::move_event::run(&config, &id, &start, &end).await
        }
        Commands::Delete { id } => commands::delete::run(&config, &id).await,
        Commands::Config { save } => commands::config::run(&config, save),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("calgrid_core={0},calgrid={0}", default_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
