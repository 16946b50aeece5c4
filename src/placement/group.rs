//! Scenery group specifications

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Generation parameters for one scenery group.
///
/// Group identity is positional: the group's index in the configured table
/// is carried on every record it produces. Variant indices are opaque to
/// the core and resolved to actual assets by the instantiation collaborator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroupSpec {
    pub name: String,
    /// Fewest items attempted per cluster.
    pub min_per_cluster: usize,
    /// Most items attempted per cluster (inclusive).
    pub max_per_cluster: usize,
    /// Planar radius around the cluster center items scatter within.
    pub cluster_radius: f32,
    /// Number of placeable variants in the group's external variant table.
    pub variant_count: usize,
}

impl Default for GroupSpec {
    fn default() -> Self {
        Self {
            name: "group".to_string(),
            min_per_cluster: 3,
            max_per_cluster: 10,
            cluster_radius: 8.0,
            variant_count: 1,
        }
    }
}

impl GroupSpec {
    /// Validate at the configuration boundary, before the core runs.
    pub fn validate(&self) -> Result<()> {
        if self.variant_count == 0 {
            return Err(Error::Config(format!(
                "group '{}' has an empty variant table",
                self.name
            )));
        }
        if self.min_per_cluster > self.max_per_cluster {
            return Err(Error::Config(format!(
                "group '{}': min_per_cluster {} exceeds max_per_cluster {}",
                self.name, self.min_per_cluster, self.max_per_cluster
            )));
        }
        if self.cluster_radius <= 0.0 {
            return Err(Error::Config(format!(
                "group '{}' has non-positive cluster_radius",
                self.name
            )));
        }
        Ok(())
    }
}
