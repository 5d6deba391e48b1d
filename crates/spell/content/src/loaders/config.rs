//! Spell configuration loader.

use std::path::Path;

use spell_core::SpellConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for spell configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`SpellConfig::default`].
    pub fn load(path: &Path) -> LoadResult<SpellConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SpellConfig> {
        let config: SpellConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spell config TOML: {}", e))?;

        Ok(config)
    }
}
