//! World generation pipeline
//!
//! Sequences the full run: heightfield build, deterministic scenery
//! placement, and the batched hand-off to the host's instantiation step.
//! Navigation-mesh readiness is forwarded from an external collaborator —
//! the pipeline only gates on it, it never computes it.

pub mod config;

pub use config::WorldConfig;

use glam::Vec3;
use rand::Rng;

use crate::placement::{PlacementEngine, PlacementRecord};
use crate::scheduler::BatchScheduler;
use crate::spawn::{SpawnPoint, SpawnValidator};
use crate::terrain::Terrain;

/// Where a generation run currently stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WorldStage {
    #[default]
    Idle,
    Terrain,
    Placement,
    Ready,
}

/// Owns one world generation run and its published results.
///
/// `generate` runs to completion — no cancellation semantics. Once it
/// returns, the terrain and record list are read-only; consumers pull
/// instantiation work through a [`BatchScheduler`] at their own pace.
pub struct WorldPipeline {
    config: WorldConfig,
    stage: WorldStage,
    terrain: Option<Terrain>,
    records: Vec<PlacementRecord>,
    nav_ready: bool,
}

impl WorldPipeline {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config,
            stage: WorldStage::Idle,
            terrain: None,
            records: Vec::new(),
            nav_ready: false,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn stage(&self) -> WorldStage {
        self.stage
    }

    /// Run terrain synthesis and deterministic placement to completion.
    pub fn generate(&mut self) {
        self.stage = WorldStage::Terrain;
        let size = self.config.heightfield.size;
        log::info!("generating {size}x{size} heightfield...");
        let terrain = Terrain::generate(self.config.heightfield.clone());
        log::info!(
            "terrain ready: {} vertices, {} triangles",
            terrain.mesh().vertex_count(),
            terrain.mesh().triangle_count()
        );

        self.stage = WorldStage::Placement;
        if self.config.groups.is_empty() {
            log::warn!("no scenery groups configured");
        }
        let engine = PlacementEngine::new(&terrain, self.config.placement.clone());
        self.records = engine.place_all(&self.config.groups, self.config.seed);
        log::info!(
            "placed {} scenery records across {} groups",
            self.records.len(),
            self.config.groups.len()
        );

        self.terrain = Some(terrain);
        self.stage = WorldStage::Ready;
    }

    /// The published terrain; `None` until `generate` has run.
    pub fn terrain(&self) -> Option<&Terrain> {
        self.terrain.as_ref()
    }

    /// The deterministic placement output, in acceptance order.
    pub fn records(&self) -> &[PlacementRecord] {
        &self.records
    }

    /// A scheduler over the record list for the host's instantiation
    /// collaborator, bounded to `batch_size` records per step.
    pub fn instantiation_batches(&self, batch_size: usize) -> BatchScheduler<PlacementRecord> {
        BatchScheduler::new(self.records.clone(), batch_size)
    }

    /// A scheduler over a creature population target; each unit of work is
    /// one spawn slot for the host to fill via `find_creature_spawn`.
    pub fn creature_spawn_batches(&self, population: usize, batch_size: usize) -> BatchScheduler<usize> {
        BatchScheduler::new((0..population).collect(), batch_size)
    }

    /// Forwarded from the external navigation-mesh collaborator.
    pub fn set_nav_ready(&mut self, ready: bool) {
        self.nav_ready = ready;
    }

    pub fn is_nav_ready(&self) -> bool {
        self.nav_ready
    }

    /// Player spawn point; `None` before the terrain exists.
    pub fn find_player_spawn<R: Rng>(&self, rng: &mut R) -> Option<SpawnPoint> {
        let terrain = self.terrain.as_ref()?;
        let validator = SpawnValidator::new(terrain, self.config.spawn.clone());
        Some(validator.find_player_spawn(rng))
    }

    /// Creature spawn point, avoiding placed scenery. Refused until the
    /// navigation oracle reports ready.
    pub fn find_creature_spawn<R: Rng>(&self, rng: &mut R) -> Option<SpawnPoint> {
        if !self.nav_ready {
            return None;
        }
        let terrain = self.terrain.as_ref()?;
        let occupied: Vec<Vec3> = self.records.iter().map(|r| r.position).collect();
        let validator = SpawnValidator::new(terrain, self.config.spawn.clone());
        Some(validator.find_creature_spawn(rng, &occupied))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{GroupSpec, PlacementConfig};
    use crate::spawn::SpawnConfig;
    use crate::terrain::HeightfieldParams;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn small_config() -> WorldConfig {
        WorldConfig {
            seed: 2024,
            heightfield: HeightfieldParams {
                size: 32,
                noise_scale: 0.05,
                height_multiplier: 2.0,
                mountain_height: 4.0,
                radius: 30.0,
            },
            placement: PlacementConfig {
                spawn_radius: 12.0,
                ..Default::default()
            },
            spawn: SpawnConfig {
                creature_spawn_radius: 10.0,
                ..Default::default()
            },
            groups: vec![GroupSpec {
                name: "trees".to_string(),
                min_per_cluster: 2,
                max_per_cluster: 4,
                cluster_radius: 3.0,
                variant_count: 2,
            }],
        }
    }

    #[test]
    fn test_pipeline_stages() {
        let mut pipeline = WorldPipeline::new(small_config());
        assert_eq!(pipeline.stage(), WorldStage::Idle);
        assert!(pipeline.terrain().is_none());

        pipeline.generate();
        assert_eq!(pipeline.stage(), WorldStage::Ready);
        assert!(pipeline.terrain().is_some());
    }

    #[test]
    fn test_pipeline_output_respects_invariants() {
        let mut pipeline = WorldPipeline::new(small_config());
        pipeline.generate();

        let records = pipeline.records();
        assert!(!records.is_empty());

        let min_distance = pipeline.config().placement.min_distance;
        for (i, a) in records.iter().enumerate() {
            assert!(a.position.y >= 0.0);
            for b in &records[i + 1..] {
                let d = Vec2::new(a.position.x, a.position.z)
                    .distance(Vec2::new(b.position.x, b.position.z));
                assert!(d >= min_distance);
            }
        }
    }

    #[test]
    fn test_pipeline_deterministic_across_runs() {
        let mut a = WorldPipeline::new(small_config());
        let mut b = WorldPipeline::new(small_config());
        a.generate();
        b.generate();
        assert_eq!(a.records(), b.records());
    }

    #[test]
    fn test_instantiation_batches_cover_all_records() {
        let mut pipeline = WorldPipeline::new(small_config());
        pipeline.generate();

        let mut scheduler = pipeline.instantiation_batches(10);
        assert_eq!(scheduler.steps_total(), pipeline.records().len().div_ceil(10));

        let mut instantiated = Vec::new();
        scheduler.drain_all(|record| instantiated.push(*record));
        assert_eq!(instantiated.as_slice(), pipeline.records());
    }

    #[test]
    fn test_creature_spawn_batches_cover_population() {
        let mut pipeline = WorldPipeline::new(small_config());
        pipeline.generate();
        pipeline.set_nav_ready(true);
        let mut rng = StdRng::seed_from_u64(11);

        let mut scheduler = pipeline.creature_spawn_batches(5, 2);
        assert_eq!(scheduler.steps_total(), 3);

        let mut spawned = 0;
        while !scheduler.is_finished() {
            scheduler.process_next(|_slot| {
                if pipeline.find_creature_spawn(&mut rng).is_some() {
                    spawned += 1;
                }
            });
        }
        assert_eq!(spawned, 5);
    }

    #[test]
    fn test_creature_spawn_gated_on_nav_readiness() {
        let mut pipeline = WorldPipeline::new(small_config());
        pipeline.generate();
        let mut rng = StdRng::seed_from_u64(5);

        assert!(!pipeline.is_nav_ready());
        assert!(pipeline.find_creature_spawn(&mut rng).is_none());

        pipeline.set_nav_ready(true);
        let spawn = pipeline.find_creature_spawn(&mut rng);
        assert!(spawn.is_some());
    }

    #[test]
    fn test_player_spawn_requires_terrain() {
        let pipeline = WorldPipeline::new(small_config());
        let mut rng = StdRng::seed_from_u64(6);
        assert!(pipeline.find_player_spawn(&mut rng).is_none());

        let mut pipeline = WorldPipeline::new(small_config());
        pipeline.generate();
        let spawn = pipeline.find_player_spawn(&mut rng).unwrap();
        assert!(spawn.validated);
    }
}
