//! Per-vertex slope queries derived from mesh normals

use glam::Vec3;

use super::mesh::TerrainMesh;

/// Answers "how steep is the ground at point P" from the mesh normals.
///
/// Slope at a point is the slope of the nearest grid vertex, found by a
/// linear scan over all vertices — no interpolation. O(vertex count) per
/// query; acceptable because call volume is bounded by placement and spawn
/// attempt counts, not per-frame rendering. A grid-bucket index would
/// improve the asymptotics without changing the contract.
pub struct SlopeOracle<'a> {
    mesh: &'a TerrainMesh,
}

impl<'a> SlopeOracle<'a> {
    pub fn new(mesh: &'a TerrainMesh) -> Self {
        Self { mesh }
    }

    /// Angle in degrees between the vertex normal and straight up.
    /// Out-of-range indices read as flat (0 degrees).
    pub fn slope_at_vertex(&self, index: usize) -> f32 {
        match self.mesh.normals.get(index) {
            Some(normal) => normal.angle_between(Vec3::Y).to_degrees(),
            None => 0.0,
        }
    }

    /// Slope at a world position via nearest-vertex lookup.
    pub fn slope_at_position(&self, position: Vec3) -> f32 {
        match self.closest_vertex(position) {
            Some(index) => self.slope_at_vertex(index),
            None => 0.0,
        }
    }

    fn closest_vertex(&self, position: Vec3) -> Option<usize> {
        let mut closest = None;
        let mut min_distance = f32::MAX;

        for (index, vertex) in self.mesh.vertices.iter().enumerate() {
            let distance = vertex.distance_squared(position);
            if distance < min_distance {
                min_distance = distance;
                closest = Some(index);
            }
        }

        closest
    }
}
