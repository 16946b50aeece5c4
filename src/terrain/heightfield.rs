//! Noise-based height grid synthesis
//!
//! Produces the island profile: Perlin base detail, a quadratic mountain
//! rim approaching the island radius, and a hard clamp floor outside it.

use glam::Vec2;
use noise::{NoiseFn, Perlin};
use rayon::prelude::*;

/// Hard floor applied to every sample. Every point outside the island
/// radius resolves to exactly this height, and other components treat it
/// as the canonical ground for invalid terrain.
pub const HEIGHT_FLOOR: f32 = -2.0;

/// Raw height assigned outside the island radius, before the clamp floor.
const OFF_ISLAND_RAW: f32 = -5.0;

/// Parameters controlling heightfield generation
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct HeightfieldParams {
    /// Grid spans `size + 1` samples per axis.
    pub size: usize,
    /// Horizontal noise frequency (smaller = smoother).
    pub noise_scale: f32,
    /// Vertical scale of the noise base.
    pub height_multiplier: f32,
    /// Extra height of the rim mountains at the radius boundary.
    pub mountain_height: f32,
    /// Planar island radius around the grid center.
    pub radius: f32,
}

impl Default for HeightfieldParams {
    fn default() -> Self {
        Self {
            size: 200,
            noise_scale: 0.05,
            height_multiplier: 5.0,
            mountain_height: 15.0,
            radius: 80.0,
        }
    }
}

impl HeightfieldParams {
    /// Planar center of the grid, `(size/2, size/2)`.
    pub fn center(&self) -> Vec2 {
        Vec2::splat(self.size as f32 * 0.5)
    }
}

/// A square `(size+1) x (size+1)` grid of heights, row-major by `(x, z)`
/// with `x` fastest. Immutable once generated for a given parameter set.
pub struct HeightGrid {
    size: usize,
    heights: Vec<f32>,
}

impl HeightGrid {
    /// Generate the grid from parameters.
    ///
    /// Pure function of the parameters: identical inputs always yield an
    /// identical grid. Rows are computed in parallel; every sample is
    /// independent, so the split does not affect the result.
    pub fn generate(params: &HeightfieldParams) -> Self {
        let stride = params.size + 1;
        let perlin = Perlin::new(0);

        let heights: Vec<f32> = (0..stride)
            .into_par_iter()
            .flat_map_iter(|z| {
                let perlin = &perlin;
                (0..stride).map(move |x| sample_height(params, perlin, x, z))
            })
            .collect();

        Self {
            size: params.size,
            heights,
        }
    }

    /// Grid size; valid sample indices are `[0, size]` on both axes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of samples, `(size+1)^2`.
    pub fn sample_count(&self) -> usize {
        self.heights.len()
    }

    /// Height at grid point `(x, z)`. Indices must be in `[0, size]`.
    pub fn height(&self, x: usize, z: usize) -> f32 {
        self.heights[z * (self.size + 1) + x]
    }
}

fn sample_height(params: &HeightfieldParams, noise: &Perlin, x: usize, z: usize) -> f32 {
    let point = Vec2::new(x as f32, z as f32);
    let distance = point.distance(params.center());

    // Perlin output is [-1, 1]; remap to [0, 1] before scaling.
    let n = noise.get([
        (x as f32 * params.noise_scale) as f64,
        (z as f32 * params.noise_scale) as f64,
    ]) as f32;
    let base = (n + 1.0) * 0.5 * params.height_multiplier;

    let raw = if distance > params.radius {
        OFF_ISLAND_RAW
    } else {
        // Quadratic falloff toward the rim: flat until 0.7*radius, then
        // ramping to full mountain height at the boundary.
        let edge = ((distance - params.radius * 0.7) / (params.radius * 0.3)).clamp(0.0, 1.0);
        base + edge * edge * params.mountain_height
    };

    raw.max(HEIGHT_FLOOR)
}
