//! Grid triangulation and vertex-normal reconstruction

use glam::Vec3;

use super::heightfield::HeightGrid;

/// Triangulated terrain surface derived 1:1 from a [`HeightGrid`].
///
/// Vertex `i = z * (size+1) + x` sits at `(x, height(x, z), z)`. Each grid
/// cell contributes two triangles with a fixed winding, `2 * size^2` in
/// total. Normals are area-weighted averages of adjacent face normals and
/// exist only after construction.
pub struct TerrainMesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<u32>,
    pub normals: Vec<Vec3>,
}

impl TerrainMesh {
    /// Triangulate a height grid and reconstruct vertex normals.
    pub fn from_grid(grid: &HeightGrid) -> Self {
        let size = grid.size();
        let stride = size + 1;

        let mut vertices = Vec::with_capacity(stride * stride);
        for z in 0..stride {
            for x in 0..stride {
                vertices.push(Vec3::new(x as f32, grid.height(x, z), z as f32));
            }
        }

        let mut triangles = Vec::with_capacity(size * size * 6);
        for z in 0..size {
            for x in 0..size {
                let v = (z * stride + x) as u32;
                let s = stride as u32;
                triangles.extend_from_slice(&[v, v + s, v + 1, v + 1, v + s, v + s + 1]);
            }
        }

        let normals = compute_normals(&vertices, &triangles);

        Self {
            vertices,
            triangles,
            normals,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }
}

/// Area-weighted vertex normals: each face's unnormalized cross product
/// accumulates into its three corners, then every sum is normalized.
/// Degenerate vertices fall back to straight up.
fn compute_normals(vertices: &[Vec3], triangles: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; vertices.len()];

    for tri in triangles.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let face = (vertices[b] - vertices[a]).cross(vertices[c] - vertices[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }

    for normal in &mut normals {
        *normal = normal.normalize_or(Vec3::Y);
    }

    normals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::heightfield::HeightfieldParams;

    fn flat_grid(size: usize) -> HeightGrid {
        HeightGrid::generate(&HeightfieldParams {
            size,
            noise_scale: 0.0,
            height_multiplier: 0.0,
            mountain_height: 0.0,
            radius: size as f32 * 10.0,
        })
    }

    #[test]
    fn test_triangulation_counts() {
        for size in [1, 4, 16] {
            let mesh = TerrainMesh::from_grid(&flat_grid(size));
            assert_eq!(mesh.vertex_count(), (size + 1) * (size + 1));
            assert_eq!(mesh.triangle_count(), 2 * size * size);
        }
    }

    #[test]
    fn test_unit_grid_two_triangles() {
        let mesh = TerrainMesh::from_grid(&flat_grid(1));
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        for v in &mesh.vertices {
            assert_eq!(v.y, 0.0);
        }
    }

    #[test]
    fn test_vertex_layout_matches_grid() {
        let params = HeightfieldParams {
            size: 8,
            ..Default::default()
        };
        let grid = HeightGrid::generate(&params);
        let mesh = TerrainMesh::from_grid(&grid);

        for z in 0..=8 {
            for x in 0..=8 {
                let v = mesh.vertices[z * 9 + x];
                assert_eq!(v.x, x as f32);
                assert_eq!(v.z, z as f32);
                assert_eq!(v.y, grid.height(x, z));
            }
        }
    }

    #[test]
    fn test_triangle_indices_in_range() {
        let mesh = TerrainMesh::from_grid(&flat_grid(6));
        let count = mesh.vertex_count() as u32;
        for &i in &mesh.triangles {
            assert!(i < count);
        }
    }

    #[test]
    fn test_flat_grid_normals_point_up() {
        let mesh = TerrainMesh::from_grid(&flat_grid(4));
        assert_eq!(mesh.normals.len(), mesh.vertex_count());
        for n in &mesh.normals {
            assert!((*n - Vec3::Y).length() < 1e-5);
        }
    }

    #[test]
    fn test_normals_are_unit_length() {
        let mesh = TerrainMesh::from_grid(&HeightGrid::generate(&HeightfieldParams {
            size: 16,
            ..Default::default()
        }));
        for n in &mesh.normals {
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }
}
