//! World configuration, loadable from JSON

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::placement::{GroupSpec, PlacementConfig};
use crate::spawn::SpawnConfig;
use crate::terrain::HeightfieldParams;

/// Everything a world generation run needs: terrain parameters, placement
/// rules, spawn rules, the scenery group table, and the deterministic seed.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for the deterministic placement stream.
    pub seed: u64,
    pub heightfield: HeightfieldParams,
    pub placement: PlacementConfig,
    pub spawn: SpawnConfig,
    pub groups: Vec<GroupSpec>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            heightfield: HeightfieldParams::default(),
            placement: PlacementConfig::default(),
            spawn: SpawnConfig::default(),
            groups: Vec::new(),
        }
    }
}

impl WorldConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: WorldConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject malformed configuration before the core runs; the generation
    /// and placement paths assume these preconditions hold.
    pub fn validate(&self) -> Result<()> {
        if self.heightfield.size == 0 {
            return Err(Error::Config("heightfield size must be at least 1".into()));
        }
        if self.heightfield.radius < 0.0 {
            return Err(Error::Config("heightfield radius must not be negative".into()));
        }
        if self.placement.spawn_radius <= 0.0 {
            return Err(Error::Config("placement spawn_radius must be positive".into()));
        }
        if self.placement.min_distance < 0.0 {
            return Err(Error::Config("placement min_distance must not be negative".into()));
        }
        for group in &self.groups {
            group.validate()?;
        }
        Ok(())
    }
}
