//! Shell configuration.
//!
//! Handles loading, validating, and merging a `pnm-shell.toml` file on top
//! of the stock defaults. Every key is optional.
//!
//! ## Configuration Options
//!
//! ```toml
//! [shell]
//! sigil = "$"              # Handle names must start with this character
//! prompt = ""              # Printed before each line when reading a terminal
//!
//! [grayscale]
//! policy = "luma"          # "luma" (0.3R + 0.59G + 0.11B) or "red"
//!
//! [equalize]
//! grayscale_via_luma_chroma = true   # Equalize gray images through Y of YUV
//! roundtrip_policy = "red"           # How the roundtrip comes back to gray
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::GrayPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "pnm-shell.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Command-line surface (handle sigil, prompt).
    pub shell: PromptConfig,
    /// RGB → grayscale conversion for the `g` command.
    pub grayscale: GrayscaleConfig,
    /// Promotion rules for the `z` command.
    pub equalize: EqualizeConfig,
}

impl ShellConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut chars = self.shell.sigil.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() => Ok(()),
            _ => Err(ConfigError::Validation(
                "shell.sigil must be a single non-whitespace character".into(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PromptConfig {
    pub sigil: String,
    pub prompt: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            sigil: "$".to_string(),
            prompt: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GrayscaleConfig {
    pub policy: GrayPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EqualizeConfig {
    /// Route grayscale images through RGB → luma-chroma → RGB instead of
    /// equalizing the gray channel directly.
    pub grayscale_via_luma_chroma: bool,
    /// Policy for the final RGB → grayscale step of that roundtrip.
    pub roundtrip_policy: GrayPolicy,
}

impl Default for EqualizeConfig {
    fn default() -> Self {
        Self {
            grayscale_via_luma_chroma: true,
            roundtrip_policy: GrayPolicy::Red,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(ShellConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Parse an overlay string, merge it onto the defaults, and validate.
pub fn parse_config(content: &str) -> Result<ShellConfig, ConfigError> {
    let overlay: toml::Value = toml::from_str(content)?;
    let merged = merge_toml(stock_defaults_value()?, overlay);
    let config: ShellConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, or the defaults when the file does not exist.
pub fn load_config(path: &Path) -> Result<ShellConfig, ConfigError> {
    if !path.exists() {
        return Ok(ShellConfig::default());
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Returns a fully-commented stock config with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# pnm-shell Configuration
# =======================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Command line
# ---------------------------------------------------------------------------
[shell]
# Every image handle must start with this character, e.g. `$photo`.
sigil = "$"

# Printed before each command when reading from a terminal.
prompt = ""

# ---------------------------------------------------------------------------
# Grayscale conversion (`g` command)
# ---------------------------------------------------------------------------
[grayscale]
# "luma" weights channels 0.3 R + 0.59 G + 0.11 B.
# "red" keeps the red channel only.
policy = "luma"

# ---------------------------------------------------------------------------
# Histogram equalization (`z` command)
# ---------------------------------------------------------------------------
[equalize]
# Equalize grayscale images by promoting them to RGB, then luma-chroma,
# equalizing Y, and converting back. When false the gray channel is
# equalized directly.
grayscale_via_luma_chroma = true

# How the roundtrip above returns to grayscale.
roundtrip_policy = "red"
"##
}
