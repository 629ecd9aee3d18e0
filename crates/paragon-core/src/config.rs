//! Matching configuration for habit learning and name suggestions
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/paragon/config/paragon.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/paragon.toml");

/// Tunables for fuzzy tag suggestion and name autocomplete
#[derive(Debug, Clone, PartialEq)]
pub struct MatchingConfig {
    /// Share of the key length allowed as edit distance for a fuzzy match
    pub fuzzy_distance_ratio: f64,
    /// Branch keys closer than this are accepted immediately
    pub early_accept_distance: usize,
    /// Cap on name suggestions returned per prefix
    pub name_suggestion_limit: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            fuzzy_distance_ratio: 0.15,
            early_accept_distance: 2,
            name_suggestion_limit: 50,
        }
    }
}

impl MatchingConfig {
    /// Load from the override location, falling back to embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load from an explicit path (embedded defaults if the file is missing)
    pub fn load_from(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Maximum accepted edit distance for a key of `key_len` characters
    pub fn max_distance(&self, key_len: usize) -> f64 {
        key_len as f64 * self.fuzzy_distance_ratio
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("paragon").join("config").join("paragon.toml"))
}

fn read_if_exists(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    Ok(Some(fs::read_to_string(path)?))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<MatchingConfig> {
    let content = match override_path {
        Some(path) => read_if_exists(path)?,
        None => match default_config_path() {
            Some(path) => read_if_exists(&path)?,
            None => None,
        },
    };

    parse_config(content.as_deref().unwrap_or(DEFAULT_CONFIG))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    habits: Option<RawHabits>,
    suggestions: Option<RawSuggestions>,
}

#[derive(Debug, Deserialize)]
struct RawHabits {
    fuzzy_distance_ratio: Option<f64>,
    early_accept_distance: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawSuggestions {
    limit: Option<usize>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<MatchingConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::InvalidData(format!("Invalid config TOML: {}", e)))?;

    let mut config = MatchingConfig::default();

    if let Some(habits) = raw.habits {
        if let Some(ratio) = habits.fuzzy_distance_ratio {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(Error::InvalidData(format!(
                    "fuzzy_distance_ratio must be within 0..=1, got {}",
                    ratio
                )));
            }
            config.fuzzy_distance_ratio = ratio;
        }
        if let Some(distance) = habits.early_accept_distance {
            config.early_accept_distance = distance;
        }
    }

    if let Some(limit) = raw.suggestions.and_then(|s| s.limit) {
        config.name_suggestion_limit = limit;
    }

    Ok(config)
}
