//! Tile geometry and the centered tile lattice.

use bytemuck::{Pod, Zeroable};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::params::{LatticeKey, TerrainShape};

/// Vertex data for one tile (flat position, UV, jitter direction)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct TileVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    /// Two independent components in [-1, 1], scaled by `jitter` in the shader
    pub jitter: [f32; 2],
}

/// Per-instance tile placement (world XZ translation)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TileInstance {
    pub offset: [f32; 2],
}

/// Single horizontal grid mesh shared by every tile of a lattice
pub struct TileGeometry {
    pub vertices: Vec<TileVertex>,
    pub indices: Vec<u32>,
}

impl TileGeometry {
    /// Build the grid with entropy-seeded jitter
    pub fn new(shape: &TerrainShape) -> Self {
        Self::build_with_rng(shape, &mut SmallRng::from_entropy())
    }

    /// Build a `cols x rows` vertex grid spanning `tile_size` on each side.
    ///
    /// The grid lies in the XZ plane centered on the tile origin. `u` runs
    /// 0..1 along +X and `v` runs 1..0 along +Z. Degenerate resolutions
    /// collapse to a single quad.
    pub fn build_with_rng<R: Rng>(shape: &TerrainShape, rng: &mut R) -> Self {
        let segments_x = shape.cols.saturating_sub(1).max(1) as usize;
        let segments_z = shape.rows.saturating_sub(1).max(1) as usize;
        let size = shape.tile_size;
        let half_size = size / 2.0;

        let mut vertices = Vec::with_capacity((segments_x + 1) * (segments_z + 1));
        let mut indices = Vec::with_capacity(segments_x * segments_z * 6);

        // Generate flat XZ plane grid
        for z in 0..=segments_z {
            for x in 0..=segments_x {
                let u = x as f32 / segments_x as f32;
                let t = z as f32 / segments_z as f32;

                vertices.push(TileVertex {
                    position: [u * size - half_size, 0.0, t * size - half_size],
                    uv: [u, 1.0 - t],
                    jitter: [rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0)],
                });
            }
        }

        // Generate triangle indices (counter-clockwise winding)
        for z in 0..segments_z {
            for x in 0..segments_x {
                let top_left = (z * (segments_x + 1) + x) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((z + 1) * (segments_x + 1) + x) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        Self { vertices, indices }
    }
}

/// One lattice placement of the shared tile geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    /// Lattice offset (x, z) before scrolling
    pub base: [f32; 2],
    /// Current render offset (x, z) after scroll wrapping
    pub position: [f32; 2],
}

impl Tile {
    pub fn instance(&self) -> TileInstance {
        TileInstance {
            offset: self.position,
        }
    }
}

/// Base offsets of a lattice centered on the origin.
///
/// Placement `(ix, iz)` sits at `((ix - (nx-1)/2) * size, (iz - (nz-1)/2) * size)`
/// so odd and even tile counts are both centered.
pub fn lattice_offsets(key: &LatticeKey) -> Vec<[f32; 2]> {
    let half_x = (key.tiles_x as f32 - 1.0) * 0.5;
    let half_z = (key.tiles_z as f32 - 1.0) * 0.5;

    let mut offsets = Vec::with_capacity(key.tile_count());
    for ix in 0..key.tiles_x {
        for iz in 0..key.tiles_z {
            offsets.push([
                (ix as f32 - half_x) * key.tile_size,
                (iz as f32 - half_z) * key.tile_size,
            ]);
        }
    }
    offsets
}

/// One lattice generation: shared geometry plus every tile placement.
///
/// A generation is immutable in topology. Structural configuration changes
/// replace it wholesale with a new generation id.
pub struct TileLattice {
    generation: u64,
    key: LatticeKey,
    pub geometry: TileGeometry,
    pub tiles: Vec<Tile>,
}

impl TileLattice {
    pub fn new(shape: &TerrainShape, generation: u64) -> Self {
        Self::from_geometry(shape, TileGeometry::new(shape), generation)
    }

    pub fn from_geometry(shape: &TerrainShape, geometry: TileGeometry, generation: u64) -> Self {
        let key = shape.lattice_key();
        let tiles = lattice_offsets(&key)
            .into_iter()
            .map(|base| Tile {
                base,
                position: base,
            })
            .collect();

        Self {
            generation,
            key,
            geometry,
            tiles,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn key(&self) -> LatticeKey {
        self.key
    }

    /// Instance data for the current tile positions
    pub fn instances(&self) -> Vec<TileInstance> {
        self.tiles.iter().map(Tile::instance).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(cols: u32, rows: u32, tiles_x: u32, tiles_z: u32) -> TerrainShape {
        TerrainShape {
            cols,
            rows,
            tiles_x,
            tiles_z,
            tile_size: 10.0,
            ..TerrainShape::default()
        }
    }

    #[test]
    fn test_tile_geometry_creation() {
        let s = shape(16, 9, 1, 1);
        let geometry = TileGeometry::build_with_rng(&s, &mut SmallRng::seed_from_u64(7));

        // cols x rows vertices, (cols-1) x (rows-1) quads
        assert_eq!(geometry.vertices.len(), 16 * 9);
        assert_eq!(geometry.indices.len(), 15 * 8 * 6);
        assert!(geometry
            .indices
            .iter()
            .all(|&i| (i as usize) < geometry.vertices.len()));
    }

    #[test]
    fn test_grid_spans_tile_and_is_flat() {
        let s = shape(8, 8, 1, 1);
        let geometry = TileGeometry::build_with_rng(&s, &mut SmallRng::seed_from_u64(1));

        let first = geometry.vertices.first().unwrap();
        let last = geometry.vertices.last().unwrap();
        assert_eq!(first.position, [-5.0, 0.0, -5.0]);
        assert_eq!(last.position, [5.0, 0.0, 5.0]);
        assert_eq!(first.uv, [0.0, 1.0]);
        assert_eq!(last.uv, [1.0, 0.0]);
        assert!(geometry.vertices.iter().all(|v| v.position[1] == 0.0));
    }

    #[test]
    fn test_jitter_components_in_unit_range() {
        let s = shape(32, 32, 1, 1);
        let geometry = TileGeometry::build_with_rng(&s, &mut SmallRng::seed_from_u64(3));

        assert!(geometry
            .vertices
            .iter()
            .flat_map(|v| v.jitter)
            .all(|j| (-1.0..=1.0).contains(&j)));

        // Both components vary independently
        let differing = geometry
            .vertices
            .iter()
            .filter(|v| v.jitter[0] != v.jitter[1])
            .count();
        assert!(differing > geometry.vertices.len() / 2);
    }

    #[test]
    fn test_degenerate_resolution_yields_single_quad() {
        let s = shape(0, 1, 1, 1);
        let geometry = TileGeometry::build_with_rng(&s, &mut SmallRng::seed_from_u64(0));
        assert_eq!(geometry.vertices.len(), 4);
        assert_eq!(geometry.indices.len(), 6);
    }

    #[test]
    fn test_lattice_is_centered_for_odd_and_even_counts() {
        let odd = lattice_offsets(&shape(8, 8, 1, 3).lattice_key());
        assert_eq!(odd, vec![[0.0, -10.0], [0.0, 0.0], [0.0, 10.0]]);

        let even = lattice_offsets(&shape(8, 8, 2, 2).lattice_key());
        assert_eq!(
            even,
            vec![[-5.0, -5.0], [-5.0, 5.0], [5.0, -5.0], [5.0, 5.0]]
        );
    }

    #[test]
    fn test_lattice_tiles_share_one_geometry() {
        let s = shape(8, 8, 3, 4);
        let lattice = TileLattice::new(&s, 9);

        assert_eq!(lattice.generation(), 9);
        assert_eq!(lattice.tiles.len(), 12);
        assert_eq!(lattice.instances().len(), 12);
        assert_eq!(lattice.geometry.vertices.len(), 64);
        assert!(lattice.tiles.iter().all(|t| t.position == t.base));
    }
}
