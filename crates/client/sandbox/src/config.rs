//! Sandbox configuration read from the process environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use spell_content::{ConfigLoader, FlagsLoader, TargetLoader};
use spell_core::{SpellConfig, StoryFlags, Target};

use crate::scenario;

#[derive(Clone, Debug)]
pub struct SandboxConfig {
    pub spell_config: Option<PathBuf>,
    pub targets: Option<PathBuf>,
    pub flags: Option<PathBuf>,
    pub level: String,
    pub map: String,
    pub tween: Duration,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            spell_config: None,
            targets: None,
            flags: None,
            level: scenario::LEVEL.to_string(),
            map: spell_core::DEFAULT_MAP_NAME.to_string(),
            tween: Duration::from_millis(300),
        }
    }
}

impl SandboxConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `SPELL_CONFIG`: TOML spell configuration
    /// - `SPELL_TARGETS`: RON target records
    /// - `SPELL_FLAGS`: JSON initial story flags
    /// - `SANDBOX_LEVEL` / `SANDBOX_MAP`
    /// - `SANDBOX_TWEEN_MS`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.spell_config = env::var_os("SPELL_CONFIG").map(PathBuf::from);
        config.targets = env::var_os("SPELL_TARGETS").map(PathBuf::from);
        config.flags = env::var_os("SPELL_FLAGS").map(PathBuf::from);

        if let Ok(level) = env::var("SANDBOX_LEVEL") {
            config.level = level;
        }
        if let Ok(map) = env::var("SANDBOX_MAP") {
            config.map = map;
        }
        if let Some(ms) = read_env::<u64>("SANDBOX_TWEEN_MS") {
            config.tween = Duration::from_millis(ms);
        }

        config
    }

    pub fn spell_config(&self) -> Result<SpellConfig> {
        match &self.spell_config {
            Some(path) => ConfigLoader::load(path),
            None => Ok(SpellConfig::default()),
        }
    }

    pub fn targets(&self) -> Result<Vec<Target>> {
        match &self.targets {
            Some(path) => TargetLoader::load(path),
            None => Ok(scenario::garden_targets()),
        }
    }

    pub fn flags(&self) -> Result<StoryFlags> {
        match &self.flags {
            Some(path) => FlagsLoader::load(path),
            None => Ok(scenario::starting_flags()),
        }
    }
}

fn read_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok()?.parse().ok()
}
