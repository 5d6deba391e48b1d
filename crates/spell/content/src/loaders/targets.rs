//! Spellable target loader.
//!
//! Reads the object properties exported from a Tiled object layer and turns
//! them into [`Target`]s. Unknown spell types fail the whole load so that a
//! typo surfaces when the level is opened, not when the player casts.

use std::path::Path;

use spell_core::{Target, TargetProperties};

use crate::loaders::{LoadResult, read_file};

/// Loader for target records from RON files.
pub struct TargetLoader;

impl TargetLoader {
    /// Load targets from a RON file.
    ///
    /// RON format: `Vec<TargetProperties>`
    pub fn load(path: &Path) -> LoadResult<Vec<Target>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<Target>> {
        let records: Vec<TargetProperties> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse target RON: {}", e))?;

        let targets = records
            .into_iter()
            .enumerate()
            .map(|(index, props)| {
                Target::try_from(props)
                    .map_err(|e| anyhow::anyhow!("Invalid target record #{}: {}", index, e))
            })
            .collect::<LoadResult<Vec<_>>>()?;

        tracing::debug!(
            count = targets.len(),
            spellable = targets.iter().filter(|t| t.is_spellable()).count(),
            "loaded targets"
        );

        Ok(targets)
    }
}
