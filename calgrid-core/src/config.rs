//! Global calgrid configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::classifier::Palette;
use crate::error::{CalGridError, CalGridResult};
use crate::gateway::DEFAULT_SERVER_URL;
use crate::view::ViewMode;

/// Overrides `server_url` when set.
pub const SERVER_URL_ENV: &str = "CALGRID_SERVER_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Configuration at ~/.config/calgrid/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CalGridConfig {
    /// Event collection endpoint
    #[serde(default = "default_server_url")]
    pub server_url: String,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub default_view: ViewMode,

    /// Open month view with today already expanded
    #[serde(default)]
    pub expand_today: bool,

    /// Undo an optimistic move or delete when the server rejects it.
    /// Off by default: the local change stays visible until the next refresh.
    #[serde(default)]
    pub rollback_failed_changes: bool,

    #[serde(default)]
    pub palette: Palette,
}

impl Default for CalGridConfig {
    fn default() -> Self {
        CalGridConfig {
            server_url: default_server_url(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_view: ViewMode::default(),
            expand_today: false,
            rollback_failed_changes: false,
            palette: Palette::default(),
        }
    }
}

impl CalGridConfig {
    pub fn config_path() -> CalGridResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalGridError::Config("Could not determine config directory".into()))?
            .join("calgrid");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, then apply environment overrides.
    pub fn load() -> CalGridResult<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        if let Ok(url) = std::env::var(SERVER_URL_ENV)
            && !url.trim().is_empty()
        {
            config.server_url = url;
        }
        Ok(config)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> CalGridResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            CalGridError::Config(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    pub fn save(&self, path: &Path) -> CalGridResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CalGridError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| CalGridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalGridResult<()> {
        let palette = Palette::default();
        let contents = format!(
            "\
# calgrid configuration

# Event server collection endpoint (or set {env}):
# server_url = \"{url}\"

# Seconds before a request to the event server is abandoned:
# request_timeout_secs = {timeout}

# View shown on startup: \"day\", \"week\" or \"month\"
# default_view = \"week\"

# Expand today's events when opening month view:
# expand_today = false

# Undo a drag/resize or delete locally if the server rejects it:
# rollback_failed_changes = false

# Category colors:
# [palette.event]
# primary = \"{event_primary}\"
# secondary = \"{event_secondary}\"
#
# [palette.break]
# primary = \"{break_primary}\"
# secondary = \"{break_secondary}\"
",
            env = SERVER_URL_ENV,
            url = DEFAULT_SERVER_URL,
            timeout = DEFAULT_TIMEOUT_SECS,
            event_primary = palette.event.primary,
            event_secondary = palette.event.secondary,
            break_primary = palette.break_time.primary,
            break_secondary = palette.break_time.secondary,
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalGridError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalGridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalGridConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, CalGridConfig::default());
        assert_eq!(config.server_url, "http://localhost:3000/events");
        assert_eq!(config.default_view, ViewMode::Week);
    }

    #[test]
    fn commented_default_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calgrid").join("config.toml");
        CalGridConfig::create_default_config(&path).unwrap();

        let config = CalGridConfig::load_from(&path).unwrap();
        assert_eq!(config, CalGridConfig::default());
    }

    #[test]
    fn overrides_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r##"
server_url = "http://calendar.lan/api/events"
default_view = "month"
expand_today = true
rollback_failed_changes = true

[palette.break]
primary = "#111111"
secondary = "#222222"
"##,
        )
        .unwrap();

        let config = CalGridConfig::load_from(&path).unwrap();
        assert_eq!(config.server_url, "http://calendar.lan/api/events");
        assert_eq!(config.default_view, ViewMode::Month);
        assert!(config.expand_today);
        assert!(config.rollback_failed_changes);
        assert_eq!(config.palette.break_time.primary, "#111111");
        assert_eq!(config.palette.event, Palette::default().event);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn save_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = CalGridConfig {
            expand_today: true,
            ..CalGridConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(CalGridConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn invalid_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_view = \"fortnight\"").unwrap();
        assert!(matches!(
            CalGridConfig::load_from(&path),
            Err(CalGridError::Config(_))
        ));
    }
}
