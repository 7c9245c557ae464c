//! Terrain shape parameters: grid resolution, tile lattice, height scaling.

use std::ops::RangeInclusive;

use super::Rgb;

/// Allowed lattice width (tiles along X)
pub const TILES_X_RANGE: RangeInclusive<u32> = 1..=6;

/// Allowed lattice depth (tiles along Z, the scroll axis)
pub const TILES_Z_RANGE: RangeInclusive<u32> = 1..=12;

/// Allowed grid resolution (vertices per tile side)
pub const GRID_RANGE: RangeInclusive<u32> = 8..=600;

/// Smallest usable tile edge (world units)
pub const MIN_TILE_SIZE: f32 = 1e-3;

/// Terrain mesh and lattice parameters
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainShape {
    /// World-unit multiplier applied to the normalized heightmap value
    pub scale: f32,

    /// Edge length of one square tile (world units)
    pub tile_size: f32,

    /// Lattice width in tiles
    pub tiles_x: u32,

    /// Lattice depth in tiles
    pub tiles_z: u32,

    /// Vertices along X of one tile
    pub cols: u32,

    /// Vertices along Z of one tile
    pub rows: u32,

    /// Max XZ displacement of a vertex (world units)
    pub jitter: f32,

    /// Surface color under the bands and contour lines
    pub base_color: Rgb,
}

impl Default for TerrainShape {
    fn default() -> Self {
        Self {
            scale: 1.4,
            tile_size: 11.0,
            tiles_x: 1,
            tiles_z: 3,
            cols: 220,
            rows: 220,
            jitter: 0.08,
            base_color: Rgb::from_hex_or("#0a0a1a", Rgb::BLACK),
        }
    }
}

impl TerrainShape {
    /// Fields that define mesh topology and tile placement
    pub fn lattice_key(&self) -> LatticeKey {
        LatticeKey {
            tile_size: self.tile_size,
            tiles_x: self.tiles_x,
            tiles_z: self.tiles_z,
            cols: self.cols,
            rows: self.rows,
        }
    }

    /// Length of the lattice along the scroll axis (world units)
    pub fn span_z(&self) -> f32 {
        self.tile_size * self.tiles_z as f32
    }

    pub(super) fn clamp_in_place(&mut self) {
        self.tile_size = self.tile_size.max(MIN_TILE_SIZE);
        self.scale = self.scale.max(0.0);
        self.jitter = self.jitter.max(0.0);
        self.tiles_x = self.tiles_x.clamp(*TILES_X_RANGE.start(), *TILES_X_RANGE.end());
        self.tiles_z = self.tiles_z.clamp(*TILES_Z_RANGE.start(), *TILES_Z_RANGE.end());
        self.cols = self.cols.clamp(*GRID_RANGE.start(), *GRID_RANGE.end());
        self.rows = self.rows.clamp(*GRID_RANGE.start(), *GRID_RANGE.end());
    }
}

/// Structural subset of the configuration.
///
/// Two configurations with equal keys share the same geometry and tile
/// layout; any difference requires a full lattice rebuild.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeKey {
    pub tile_size: f32,
    pub tiles_x: u32,
    pub tiles_z: u32,
    pub cols: u32,
    pub rows: u32,
}

impl LatticeKey {
    /// Number of tile placements in the lattice
    pub fn tile_count(&self) -> usize {
        self.tiles_x as usize * self.tiles_z as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_covers_whole_lattice_depth() {
        let shape = TerrainShape {
            tile_size: 10.0,
            tiles_z: 4,
            ..TerrainShape::default()
        };
        assert_eq!(shape.span_z(), 40.0);
    }

    #[test]
    fn test_clamp_bounds_lattice_and_grid() {
        let mut shape = TerrainShape {
            tiles_x: 0,
            tiles_z: 40,
            cols: 2,
            rows: 5000,
            ..TerrainShape::default()
        };
        shape.clamp_in_place();

        assert_eq!(shape.tiles_x, 1);
        assert_eq!(shape.tiles_z, 12);
        assert_eq!(shape.cols, 8);
        assert_eq!(shape.rows, 600);
    }

    #[test]
    fn test_clamp_keeps_tile_size_positive() {
        let mut shape = TerrainShape {
            tile_size: -5.0,
            scale: -2.0,
            jitter: -0.1,
            ..TerrainShape::default()
        };
        shape.clamp_in_place();

        assert_eq!(shape.tile_size, MIN_TILE_SIZE);
        assert_eq!(shape.scale, 0.0);
        assert_eq!(shape.jitter, 0.0);
        assert!(shape.span_z() > 0.0);
    }

    #[test]
    fn test_lattice_key_ignores_height_and_color() {
        let a = TerrainShape::default();
        let b = TerrainShape {
            scale: 5.0,
            jitter: 0.5,
            base_color: Rgb::WHITE,
            ..TerrainShape::default()
        };
        assert_eq!(a.lattice_key(), b.lattice_key());
        assert_eq!(a.lattice_key().tile_count(), 3);
    }
}
