//! Configuration file support for agora.
//!
//! Configuration is loaded from `~/.config/agora/config.toml` with the
//! following precedence:
//! 1. CLI arguments (highest priority)
//! 2. Configuration file
//! 3. Default values (lowest priority)
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.config/agora/config.toml
//! default_section = "latest"
//! scroll_slack = 40
//!
//! [keybindings]
//! select_down = "ctrl+n"
//! select_up = "ctrl+p"
//! show_search = "ctrl+f"
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::content::Route;
use crate::navigator::DEFAULT_SCROLL_SLACK;

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Section shown on startup
    pub default_section: Option<String>,

    /// Extra scroll margin in rows when following the selection
    pub scroll_slack: Option<i64>,

    /// Chord overrides for the named handler functions
    #[serde(default)]
    pub keybindings: KeyBindings,
}

/// Custom keybinding configuration: handler name -> chord spec.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct KeyBindings {
    #[serde(flatten)]
    pub overrides: HashMap<String, String>,
}

impl Config {
    /// Load configuration from the default config file path.
    ///
    /// Returns default configuration if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("agora")
            .join("config.toml")
    }

    /// Merge with CLI overrides.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn with_overrides(mut self, section: Option<String>, slack: Option<i64>) -> Self {
        if section.is_some() {
            self.default_section = section;
        }
        if slack.is_some() {
            self.scroll_slack = slack;
        }
        self
    }

    /// Section shown on startup; unknown names fall back to home.
    pub fn default_section(&self) -> Route {
        self.default_section
            .as_deref()
            .and_then(Route::from_name)
            .unwrap_or(Route::Home)
    }

    /// Scroll slack in rows.
    pub fn scroll_slack(&self) -> i64 {
        self.scroll_slack.unwrap_or(DEFAULT_SCROLL_SLACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.default_section.is_none());
        assert_eq!(config.default_section(), Route::Home);
        assert_eq!(config.scroll_slack(), DEFAULT_SCROLL_SLACK);
        assert!(config.keybindings.overrides.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
            default_section = "latest"
            scroll_slack = 8

            [keybindings]
            select_down = "ctrl+n"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.default_section(), Route::Latest);
        assert_eq!(config.scroll_slack(), 8);
        assert_eq!(
            config.keybindings.overrides.get("select_down"),
            Some(&"ctrl+n".to_string())
        );
    }

    #[test]
    fn test_cli_overrides_win() {
        let config: Config = toml::from_str(r#"default_section = "latest""#).unwrap();
        let config = config.with_overrides(Some("top".to_string()), Some(4));
        assert_eq!(config.default_section(), Route::Top);
        assert_eq!(config.scroll_slack(), 4);
    }
}
