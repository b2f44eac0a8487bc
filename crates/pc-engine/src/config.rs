use serde::Deserialize;

use pc_core::DEFAULT_CACHE_SIZE;

use crate::error::Result;

/// Engine construction settings.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Reconstruction-tree cache capacity. Clamped to at least 1 by the
    /// cache itself.
    pub cache_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}

impl EngineConfig {
    /// Parse from TOML, e.g. `cache_size = 8`. Missing keys fall back to
    /// defaults; unknown keys are rejected.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cache_size() {
        assert_eq!(EngineConfig::default().cache_size, DEFAULT_CACHE_SIZE);
    }

    #[test]
    fn test_parse_toml() {
        let config = EngineConfig::from_toml_str("cache_size = 8").unwrap();
        assert_eq!(config.cache_size, 8);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(EngineConfig::from_toml_str("cache_sizee = 8").is_err());
    }
}
