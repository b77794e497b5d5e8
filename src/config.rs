//! User configuration loaded from `config.toml`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculator::{FormatOptions, MAX_FRACTION_DIGITS};
use crate::keyboard::{KeyboardLayout, LayoutError};

const APP_DIR: &str = "input-calculator";
const CONFIG_FILE: &str = "config.toml";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub keyboard: KeyboardConfig,
    pub result: ResultConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Key labels per row; the built-in pad when unset.
    pub layout: Option<Vec<Vec<String>>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultConfig {
    pub max_fraction_digits: usize,
}

impl Default for ResultConfig {
    fn default() -> Self {
        Self {
            max_fraction_digits: FormatOptions::default().max_fraction_digits,
        }
    }
}

impl Config {
    /// Default location: `<config dir>/input-calculator/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from the default location.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one
    /// is logged and also yields the defaults.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_or_default(&path),
            None => Self::default(),
        }
    }

    /// Load from `path`, falling back to the defaults when the file is
    /// missing, unreadable or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        Self::load_from(path).unwrap_or_else(|err| {
            warn!("Failed to load config: {:#}", err);
            Self::default()
        })
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn keyboard_layout(&self) -> Result<KeyboardLayout, LayoutError> {
        match &self.keyboard.layout {
            Some(rows) => KeyboardLayout::from_glyph_rows(rows),
            None => Ok(KeyboardLayout::default()),
        }
    }

    /// Result formatting, with `max_fraction_digits` clamped to
    /// [`MAX_FRACTION_DIGITS`].
    pub fn format_options(&self) -> FormatOptions {
        let requested = self.result.max_fraction_digits;
        if requested > MAX_FRACTION_DIGITS {
            warn!(
                requested,
                max = MAX_FRACTION_DIGITS,
                "max_fraction_digits out of range, clamping"
            );
        }
        FormatOptions::new(requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::Key;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.format_options(), FormatOptions::default());
        assert_eq!(config.keyboard_layout(), Ok(KeyboardLayout::default()));
    }

    #[test]
    fn test_custom_layout() {
        let config: Config = toml::from_str(
            r#"
            [keyboard]
            layout = [["1", "2", "3", "+"], ["AC", "0", "back", "="]]
            "#,
        )
        .unwrap();

        let layout = config.keyboard_layout().unwrap();
        assert_eq!(layout.rows().len(), 2);
        assert_eq!(layout.key_at(1, 2), Some(Key::Back));
    }

    #[test]
    fn test_load_from_missing_file() {
        let path = std::env::temp_dir().join("input-calculator-missing/config.toml");
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }

    #[test]
    fn test_fraction_digits_clamped() {
        let config: Config = toml::from_str("[result]\nmax_fraction_digits = 70000\n").unwrap();
        assert_eq!(config.result.max_fraction_digits, 70_000);
        assert_eq!(
            config.format_options(),
            FormatOptions::new(MAX_FRACTION_DIGITS)
        );

        let config: Config = toml::from_str("[result]\nmax_fraction_digits = 17\n").unwrap();
        assert_eq!(config.format_options().max_fraction_digits, 17);
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let dir = std::env::temp_dir().join(format!(
            "input-calculator-fallback-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE);

        assert_eq!(Config::load_or_default(&path), Config::default());

        std::fs::write(&path, "[keyboard\nlayout = 3\n").unwrap();
        assert_eq!(Config::load_or_default(&path), Config::default());

        std::fs::write(&path, "[result]\nmax_fraction_digits = 2\n").unwrap();
        assert_eq!(
            Config::load_or_default(&path).result.max_fraction_digits,
            2
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("input-calculator-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE);
        std::fs::write(&path, "[result]\nmax_fraction_digits = 4\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.result.max_fraction_digits, 4);

        std::fs::write(&path, "[result]\nmax_fraction_digits = \"many\"\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
