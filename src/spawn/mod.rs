//! Spawn-point search for movable entities
//!
//! Uses the same ground and slope queries as scenery placement, but stops
//! at the first acceptable candidate instead of collecting many. Exhausting
//! the attempt cap falls back to a fixed point at the terrain center.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::placement::engine::random_in_disc;
use crate::terrain::{HEIGHT_FLOOR, Terrain};

/// Role carried on every spawned entity, assigned at construction.
/// Collaborators branch on this tag — never on runtime type names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityRole {
    Player,
    Creature,
    Scenery,
}

/// A resolved spawn point.
#[derive(Clone, Copy, Debug)]
pub struct SpawnPoint {
    pub position: Vec3,
    pub role: EntityRole,
    /// False when the search exhausted its attempts and used the fallback.
    pub validated: bool,
}

/// Planar rectangle candidates are sampled from.
#[derive(Clone, Copy, Debug)]
pub struct SpawnRegion {
    pub min: Vec2,
    pub max: Vec2,
}

impl SpawnRegion {
    /// Central band of the terrain, 20%..80% on both axes.
    pub fn central(terrain_size: usize) -> Self {
        let size = terrain_size as f32;
        Self {
            min: Vec2::splat(size * 0.2),
            max: Vec2::splat(size * 0.8),
        }
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.gen_range(self.min.x..self.max.x),
            rng.gen_range(self.min.y..self.max.y),
        )
    }
}

/// Attempt caps and acceptance thresholds for the spawn searches.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Attempt cap for the player search.
    pub player_attempts: usize,
    /// Player candidates must sit below this slope (degrees).
    pub player_max_slope: f32,
    /// Attempt cap for the creature search.
    pub creature_attempts: usize,
    /// Creature candidates must sit at or below this slope (degrees).
    pub creature_max_slope: f32,
    /// Planar radius around the terrain center creatures sample from.
    pub creature_spawn_radius: f32,
    /// Creature candidates keep at least this planar distance from any
    /// occupied prop position.
    pub prop_clearance: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            player_attempts: 50,
            player_max_slope: 30.0,
            creature_attempts: 20,
            creature_max_slope: 45.0,
            creature_spawn_radius: 50.0,
            prop_clearance: 0.7,
        }
    }
}

/// Finds valid spawn points for player and creature entities.
pub struct SpawnValidator<'a> {
    terrain: &'a Terrain,
    config: SpawnConfig,
}

impl<'a> SpawnValidator<'a> {
    pub fn new(terrain: &'a Terrain, config: SpawnConfig) -> Self {
        Self { terrain, config }
    }

    /// Search the central region for flat-enough ground; the result floats
    /// 2 units above it. Fallback: the terrain center at the noise base
    /// height plus the same offset.
    pub fn find_player_spawn<R: Rng>(&self, rng: &mut R) -> SpawnPoint {
        let region = SpawnRegion::central(self.terrain.grid().size());
        let slope = self.terrain.slope_oracle();

        for _ in 0..self.config.player_attempts {
            let planar = region.sample(rng);
            let Some(ground) = self.terrain.ground_at(planar) else {
                continue;
            };
            if slope.slope_at_position(ground) < self.config.player_max_slope {
                return SpawnPoint {
                    position: ground + Vec3::Y * 2.0,
                    role: EntityRole::Player,
                    validated: true,
                };
            }
        }

        log::warn!(
            "player spawn search exhausted {} attempts, using center fallback",
            self.config.player_attempts
        );
        let center = self.terrain.center();
        SpawnPoint {
            position: Vec3::new(
                center.x,
                self.terrain.params().height_multiplier + 2.0,
                center.y,
            ),
            role: EntityRole::Player,
            validated: false,
        }
    }

    /// Search a disc around the terrain center for ground that is above
    /// water, flat enough, and clear of occupied prop positions. Fallback:
    /// the ground point at the terrain center.
    pub fn find_creature_spawn<R: Rng>(&self, rng: &mut R, occupied: &[Vec3]) -> SpawnPoint {
        let center = self.terrain.center();
        let slope = self.terrain.slope_oracle();

        for _ in 0..self.config.creature_attempts {
            let planar = center + random_in_disc(rng, self.config.creature_spawn_radius);
            let Some(ground) = self.terrain.ground_at(planar) else {
                continue;
            };
            if ground.y < 0.0 {
                continue;
            }
            if slope.slope_at_position(ground) > self.config.creature_max_slope {
                continue;
            }
            if self.near_occupied(ground, occupied) {
                continue;
            }
            return SpawnPoint {
                position: ground,
                role: EntityRole::Creature,
                validated: true,
            };
        }

        log::warn!(
            "creature spawn search exhausted {} attempts, using center fallback",
            self.config.creature_attempts
        );
        let position = self
            .terrain
            .ground_at(center)
            .unwrap_or(Vec3::new(center.x, HEIGHT_FLOOR, center.y));
        SpawnPoint {
            position,
            role: EntityRole::Creature,
            validated: false,
        }
    }

    fn near_occupied(&self, position: Vec3, occupied: &[Vec3]) -> bool {
        let planar = Vec2::new(position.x, position.z);
        occupied
            .iter()
            .any(|p| Vec2::new(p.x, p.z).distance(planar) < self.config.prop_clearance)
    }
}
