//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `--config <FILE>` if given, else `$XDG_CONFIG_HOME/foodweb/foodweb.toml`
//! 3. Environment variables: `FOODWEB_*` prefix, `__` between section and key

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::NameMatch;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("environment override: {0}")]
    Env(#[from] config::ConfigError),

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// How the food pyramid at the cursor is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStyle {
    /// Indented `|- name` / `-name` outline
    #[default]
    Outline,
    /// Box-drawing tree
    Tree,
}

impl std::str::FromStr for DisplayStyle {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "outline" => Ok(DisplayStyle::Outline),
            "tree" => Ok(DisplayStyle::Tree),
            _ => Err(SettingsError::InvalidValue {
                key: "display.style".into(),
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TreeConfig {
    /// Match names case-insensitively when removing prey
    pub remove_ignores_case: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            remove_ignores_case: true,
        }
    }
}

impl TreeConfig {
    pub fn removal_match(&self) -> NameMatch {
        if self.remove_ignores_case {
            NameMatch::IgnoreCase
        } else {
            NameMatch::Exact
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    pub style: DisplayStyle,
    /// Indent unit for one outline level
    pub indent: String,
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            style: DisplayStyle::Outline,
            indent: "\t".into(),
            color: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub tree: RawTreeConfig,
    pub display: RawDisplayConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawTreeConfig {
    pub remove_ignores_case: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDisplayConfig {
    pub style: Option<DisplayStyle>,
    pub indent: Option<String>,
    pub color: Option<bool>,
}

/// Unified configuration for foodweb.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub tree: TreeConfig,
    pub display: DisplayConfig,
}

/// Get the XDG config directory for foodweb.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "foodweb").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("foodweb.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            tree: TreeConfig {
                remove_ignores_case: overlay
                    .tree
                    .remove_ignores_case
                    .unwrap_or(self.tree.remove_ignores_case),
            },
            display: DisplayConfig {
                style: overlay.display.style.unwrap_or(self.display.style),
                indent: overlay
                    .display
                    .indent
                    .clone()
                    .unwrap_or_else(|| self.display.indent.clone()),
                color: overlay.display.color.unwrap_or(self.display.color),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// An explicit `config_file` must exist; the global file is optional.
    pub fn load(config_file: Option<&Path>) -> Result<Self, SettingsError> {
        let mut current = Self::default();

        let file = match config_file {
            Some(path) => Some(path.to_path_buf()),
            None => global_config_path().filter(|p| p.exists()),
        };
        if let Some(path) = file {
            debug!(path = %path.display(), "loading config file");
            let raw = load_raw_settings(&path)?;
            current = current.merge_with(&raw);
        }

        Self::apply_env_overrides(current)
    }

    /// Load only defaults and the given file, ignoring the environment.
    pub fn load_file(path: &Path) -> Result<Self, SettingsError> {
        Ok(Self::default().merge_with(&load_raw_settings(path)?))
    }

    /// Apply FOODWEB_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("FOODWEB")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        if let Ok(val) = config.get_bool("tree.remove_ignores_case") {
            settings.tree.remove_ignores_case = val;
        }
        if let Ok(val) = config.get_string("display.style") {
            settings.display.style = val.parse()?;
        }
        if let Ok(val) = config.get_string("display.indent") {
            settings.display.indent = val;
        }
        if let Ok(val) = config.get_bool("display.color") {
            settings.display.color = val;
        }

        Ok(settings)
    }

    /// Effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_removal_ignores_case() {
        let settings = Settings::default();
        assert_eq!(settings.tree.removal_match(), NameMatch::IgnoreCase);
        assert_eq!(settings.display.style, DisplayStyle::Outline);
        assert_eq!(settings.display.indent, "\t");
    }

    #[test]
    fn given_partial_overlay_when_merging_then_unspecified_fields_are_kept() {
        let raw: RawSettings = toml::from_str(
            r#"
[display]
style = "tree"
"#,
        )
        .unwrap();

        let merged = Settings::default().merge_with(&raw);

        assert_eq!(merged.display.style, DisplayStyle::Tree);
        assert!(merged.display.color);
        assert!(merged.tree.remove_ignores_case);
    }

    #[test]
    fn given_unknown_style_when_parsing_then_fails() {
        assert!("fancy".parse::<DisplayStyle>().is_err());
        assert_eq!("TREE".parse::<DisplayStyle>().unwrap(), DisplayStyle::Tree);
    }

    #[test]
    fn given_settings_when_serializing_then_round_trips_through_toml() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back, settings);
    }
}
