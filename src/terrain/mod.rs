//! Heightfield terrain: grid synthesis, triangulation, ground and slope queries

pub mod heightfield;
pub mod mesh;
pub mod slope;

pub use heightfield::{HEIGHT_FLOOR, HeightGrid, HeightfieldParams};
pub use mesh::TerrainMesh;
pub use slope::SlopeOracle;

use glam::{Vec2, Vec3};

/// A fully generated terrain: the height grid and its triangulated mesh,
/// published together and read-only afterwards.
///
/// Construction is the hard barrier of the generation pipeline — no ground
/// or slope query exists until `generate` returns.
pub struct Terrain {
    params: HeightfieldParams,
    grid: HeightGrid,
    mesh: TerrainMesh,
}

impl Terrain {
    /// Generate the grid, triangulate it, and publish the result.
    pub fn generate(params: HeightfieldParams) -> Self {
        let grid = HeightGrid::generate(&params);
        let mesh = TerrainMesh::from_grid(&grid);
        Self { params, grid, mesh }
    }

    pub fn params(&self) -> &HeightfieldParams {
        &self.params
    }

    pub fn grid(&self) -> &HeightGrid {
        &self.grid
    }

    /// The triangulated surface, for rendering and collision collaborators.
    pub fn mesh(&self) -> &TerrainMesh {
        &self.mesh
    }

    /// Planar center of the terrain.
    pub fn center(&self) -> Vec2 {
        self.params.center()
    }

    /// A slope oracle over this terrain's mesh normals.
    pub fn slope_oracle(&self) -> SlopeOracle<'_> {
        SlopeOracle::new(&self.mesh)
    }

    /// Ground position under a planar point: the nearest grid vertex, or
    /// `None` when the point lies off the grid. Callers must check before
    /// use — off-grid is not an error, just "no ground".
    pub fn ground_at(&self, planar: Vec2) -> Option<Vec3> {
        let size = self.grid.size() as f32;
        if planar.x < 0.0 || planar.x > size || planar.y < 0.0 || planar.y > size {
            return None;
        }

        let x = planar.x.round() as usize;
        let z = planar.y.round() as usize;
        Some(self.mesh.vertices[z * (self.grid.size() + 1) + x])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_terrain(size: usize) -> Terrain {
        Terrain::generate(HeightfieldParams {
            size,
            noise_scale: 0.0,
            height_multiplier: 0.0,
            mountain_height: 0.0,
            radius: size as f32 * 10.0,
        })
    }

    #[test]
    fn test_ground_at_snaps_to_vertex() {
        let terrain = flat_terrain(8);

        let ground = terrain.ground_at(Vec2::new(3.4, 5.6)).unwrap();
        assert_eq!(ground, Vec3::new(3.0, 0.0, 6.0));

        let corner = terrain.ground_at(Vec2::new(8.0, 8.0)).unwrap();
        assert_eq!(corner, Vec3::new(8.0, 0.0, 8.0));
    }

    #[test]
    fn test_ground_at_off_grid_is_none() {
        let terrain = flat_terrain(8);
        assert!(terrain.ground_at(Vec2::new(-0.1, 4.0)).is_none());
        assert!(terrain.ground_at(Vec2::new(4.0, 8.3)).is_none());
        assert!(terrain.ground_at(Vec2::new(100.0, 100.0)).is_none());
    }

    #[test]
    fn test_ground_matches_grid_height() {
        let terrain = Terrain::generate(HeightfieldParams {
            size: 16,
            ..Default::default()
        });

        for z in 0..=16 {
            for x in 0..=16 {
                let ground = terrain
                    .ground_at(Vec2::new(x as f32, z as f32))
                    .expect("on-grid query");
                assert_eq!(ground.y, terrain.grid().height(x, z));
            }
        }
    }

    #[test]
    fn test_center() {
        let terrain = flat_terrain(8);
        assert_eq!(terrain.center(), Vec2::new(4.0, 4.0));
    }
}
