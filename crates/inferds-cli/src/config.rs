//! Demo configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Knobs shared by every demo command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Element count driving each demo workload.
    pub scale: usize,

    /// Seed for the randomized portions of the demos.
    pub seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            scale: 1_000,
            seed: 42,
        }
    }
}

impl DemoConfig {
    /// Load from a TOML file, or fall back to defaults when no path is
    /// given.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(Path::new(path))
            .with_context(|| format!("failed to read config file: {path}"))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file: {path}"))?;
        config.validate()?;
        debug!(scale = config.scale, seed = config.seed, "loaded config");
        Ok(config)
    }

    /// Reject settings the demos cannot run with.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.scale > 0, "scale must be nonzero");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DemoConfig::default();
        assert_eq!(config.scale, 1_000);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: DemoConfig = toml::from_str("scale = 50").unwrap();
        assert_eq!(config.scale, 50);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_validate_rejects_zero_scale() {
        let config = DemoConfig { scale: 0, seed: 1 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_path_uses_defaults() {
        let config = DemoConfig::load(None).unwrap();
        assert_eq!(config.scale, DemoConfig::default().scale);
    }
}
