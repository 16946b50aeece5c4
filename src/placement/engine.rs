//! Clustered scatter placement engine

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::group::GroupSpec;
use super::session::{PlacementRecord, PlacementSession};
use crate::terrain::{SlopeOracle, Terrain};

/// Clusters drawn per group, `[MIN_CLUSTERS, MAX_CLUSTERS)`.
const MIN_CLUSTERS: usize = 5;
const MAX_CLUSTERS: usize = 12;

/// Uniform scale band applied to accepted items.
const MIN_SCALE: f32 = 0.8;
const MAX_SCALE: f32 = 1.2;

/// Global placement rules shared by every group.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Planar radius around the terrain center cluster centers sample from.
    pub spawn_radius: f32,
    /// Maximum ground slope (degrees) for cluster centers and items.
    pub max_slope_angle: f32,
    /// Minimum planar distance between any two accepted items in a session.
    pub min_distance: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            spawn_radius: 80.0,
            max_slope_angle: 30.0,
            min_distance: 1.4,
        }
    }
}

/// Seeded, constraint-checked scatter over a generated terrain.
///
/// Rejections are silent: an item or cluster that fails a check simply does
/// not appear, with no retry and no guaranteed minimum yield. Groups and
/// clusters are processed in their configured order, and the crowding check
/// runs against every item accepted so far in the whole session, so the
/// output depends on that order — the deterministic mode relies on it.
pub struct PlacementEngine<'a> {
    terrain: &'a Terrain,
    config: PlacementConfig,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(terrain: &'a Terrain, config: PlacementConfig) -> Self {
        Self { terrain, config }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Deterministic mode: the full record list is a pure function of the
    /// seed, the group table, and the terrain parameters.
    pub fn place_all(&self, groups: &[GroupSpec], seed: u64) -> Vec<PlacementRecord> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.place_all_with_rng(groups, &mut rng)
    }

    /// Interactive mode: same algorithm over a caller-supplied random
    /// source, for when reproducibility is not required.
    pub fn place_all_with_rng<R: Rng>(
        &self,
        groups: &[GroupSpec],
        rng: &mut R,
    ) -> Vec<PlacementRecord> {
        let slope = self.terrain.slope_oracle();
        let mut session = PlacementSession::new();

        for (group_index, group) in groups.iter().enumerate() {
            let before = session.len();
            let cluster_count = rng.gen_range(MIN_CLUSTERS..MAX_CLUSTERS);

            for _ in 0..cluster_count {
                self.place_cluster(group, group_index, &slope, &mut session, rng);
            }

            log::debug!(
                "group '{}': {} clusters, {} items accepted",
                group.name,
                cluster_count,
                session.len() - before
            );
        }

        session.into_records()
    }

    /// One cluster: sample a center near the island middle, gate it on
    /// ground validity and slope, then attempt the per-cluster item count.
    /// A rejected center skips the whole cluster, no retry.
    fn place_cluster<R: Rng>(
        &self,
        group: &GroupSpec,
        group_index: usize,
        slope: &SlopeOracle<'_>,
        session: &mut PlacementSession,
        rng: &mut R,
    ) {
        let planar = self.terrain.center() + random_in_disc(rng, self.config.spawn_radius);
        let Some(center) = self.terrain.ground_at(planar) else {
            return;
        };
        if slope.slope_at_position(center) > self.config.max_slope_angle {
            return;
        }

        // Inclusive upper bound in both modes.
        let count = rng.gen_range(group.min_per_cluster..=group.max_per_cluster);
        for _ in 0..count {
            self.place_item(group, group_index, center, slope, session, rng);
        }
    }

    /// One item candidate around the cluster center. Rejected (silently, no
    /// retry) on missing ground, water, steep slope, or crowding against
    /// any previously accepted position in the session.
    fn place_item<R: Rng>(
        &self,
        group: &GroupSpec,
        group_index: usize,
        cluster_center: Vec3,
        slope: &SlopeOracle<'_>,
        session: &mut PlacementSession,
        rng: &mut R,
    ) {
        let offset = random_in_disc(rng, group.cluster_radius);
        let planar = Vec2::new(cluster_center.x, cluster_center.z) + offset;

        let Some(ground) = self.terrain.ground_at(planar) else {
            return;
        };
        if ground.y < 0.0 {
            // Water exclusion.
            return;
        }
        if slope.slope_at_position(ground) > self.config.max_slope_angle {
            return;
        }
        if session.is_too_close(ground, self.config.min_distance) {
            return;
        }

        session.accept(PlacementRecord {
            position: ground,
            yaw_degrees: rng.gen_range(0.0..360.0),
            scale: rng.gen_range(MIN_SCALE..=MAX_SCALE),
            variant_index: rng.gen_range(0..group.variant_count),
            group_index,
        });
    }
}

/// Random planar offset within a disc: uniform angle, uniform radius.
/// Matches the source distribution (denser toward the center).
pub(crate) fn random_in_disc<R: Rng>(rng: &mut R, radius: f32) -> Vec2 {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let distance = rng.gen_range(0.0..radius);
    Vec2::new(angle.cos(), angle.sin()) * distance
}
