// crates/sigil-cli/src/config.rs
//
// CLI configuration: weight and threshold overrides for the scorers.
// Loaded from a TOML file or populated with the engine defaults.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use sigil_match::MatchWeights;
use sigil_score::{FeedWeights, FreshnessConfig, ScoringOptions};

/// Scorer configuration for the CLI.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SigilConfig {
    /// Legitimacy weights, thresholds, and distribution stats.
    #[serde(default)]
    pub scoring: ScoringOptions,

    /// Match dimension weights.
    #[serde(default)]
    pub match_weights: MatchWeights,

    /// Feed blend weights.
    #[serde(default)]
    pub feed_weights: FeedWeights,

    /// Freshness decay configuration.
    #[serde(default)]
    pub freshness: FreshnessConfig,
}

/// Default config location: `~/.sigil/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".sigil")
        .join("config.toml")
}

impl SigilConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: SigilConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from an explicit path (must exist) or fall back to the default
    /// path, using engine defaults when no config file is present.
    pub fn load_or_default(path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default = default_config_path();
                if default.exists() {
                    Self::load(&default.to_string_lossy())
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_fills_engine_defaults() {
        let config: SigilConfig = toml::from_str(
            r#"
            [scoring.weights]
            identity = 0.5

            [feed_weights]
            freshness = 0.2
            "#,
        )
        .unwrap();
        assert!((config.scoring.weights.identity - 0.5).abs() < 1e-9);
        assert!((config.scoring.weights.wallet - 0.23).abs() < 1e-9);
        assert!((config.feed_weights.freshness - 0.2).abs() < 1e-9);
        assert!((config.match_weights.creators - 0.17).abs() < 1e-9);
        assert!((config.freshness.half_life_days - 14.0).abs() < 1e-9);
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let config: SigilConfig = toml::from_str("").unwrap();
        assert!((config.scoring.weights.sum() - 1.0).abs() < 1e-9);
    }
}
