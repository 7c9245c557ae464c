//! Scroll offset and modulo wrapping of tile placements.
//!
//! The lattice never moves as a whole. Every update each tile is shifted
//! back by the wrapped scroll offset and folded into `[-span/2, span/2)`
//! around the lattice center, so a tile leaving the near edge reappears at
//! the far edge and positions stay bounded however long the session runs.

use super::mesh::Tile;
use crate::params::AnimationParams;

/// Accumulated simulated forward motion (world units)
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollState {
    offset: f64,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    /// Advance by `scroll_speed * dt` while animating
    pub fn advance(&mut self, dt_s: f32, animation: &AnimationParams) {
        if animation.animate {
            self.offset += animation.scroll_speed as f64 * dt_s as f64;
        }
    }

    /// Offset folded into `[0, span)`; zero for a degenerate span
    pub fn wrapped(&self, span: f32) -> f32 {
        if !(span > 0.0) {
            return 0.0;
        }

        let o = self.offset.rem_euclid(span as f64) as f32;
        // rem_euclid and the narrowing cast may both round up to `span`
        if o >= span {
            0.0
        } else {
            o
        }
    }

    /// Reposition a lattice of `tiles_z` rows of `tile_size` tiles
    pub fn update_placements(&self, tiles: &mut [Tile], tile_size: f32, tiles_z: u32) {
        self.apply(tiles, tile_size * tiles_z as f32);
    }

    /// Reposition every tile for the current offset
    pub fn apply(&self, tiles: &mut [Tile], span: f32) {
        let o = self.wrapped(span);
        for tile in tiles {
            let z = tile.base[1] - o;
            tile.position = [tile.base[0], wrap_centered(z, span)];
        }
    }
}

/// Fold `z` into `[-span/2, span/2)` around the origin
pub fn wrap_centered(z: f32, span: f32) -> f32 {
    if !(span > 0.0) {
        return z;
    }

    let half = span * 0.5;
    let mut shifted = (z + half).rem_euclid(span);
    if shifted >= span {
        shifted -= span;
    }

    let wrapped = shifted - half;
    if wrapped >= half {
        wrapped - span
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles(bases: &[[f32; 2]]) -> Vec<Tile> {
        bases
            .iter()
            .map(|&base| Tile {
                base,
                position: base,
            })
            .collect()
    }

    #[test]
    fn test_advance_respects_animate_flag() {
        let mut scroll = ScrollState::new();
        let mut animation = AnimationParams {
            animate: true,
            scroll_speed: 2.0,
        };

        scroll.advance(0.5, &animation);
        assert_eq!(scroll.offset(), 1.0);

        animation.animate = false;
        scroll.advance(0.5, &animation);
        assert_eq!(scroll.offset(), 1.0);

        animation.animate = true;
        animation.scroll_speed = -4.0;
        scroll.advance(0.5, &animation);
        assert_eq!(scroll.offset(), -1.0);
    }

    #[test]
    fn test_wrapped_offset_is_non_negative() {
        let mut scroll = ScrollState::new();
        scroll.set_offset(-2.5);
        assert_eq!(scroll.wrapped(10.0), 7.5);

        scroll.set_offset(25.0);
        assert_eq!(scroll.wrapped(10.0), 5.0);

        assert_eq!(scroll.wrapped(0.0), 0.0);
    }

    #[test]
    fn test_wrap_centered_half_open_interval() {
        assert_eq!(wrap_centered(5.0, 10.0), -5.0);
        assert_eq!(wrap_centered(-5.0, 10.0), -5.0);
        assert_eq!(wrap_centered(4.0, 10.0), 4.0);
        assert_eq!(wrap_centered(-16.0, 10.0), 4.0);
        assert_eq!(wrap_centered(1.0, 0.0), 1.0);
    }

    #[test]
    fn test_tiles_stay_within_span_for_any_offset() {
        let tile_size = 11.0;
        let span = tile_size * 3.0;
        let mut lattice = tiles(&[[0.0, -11.0], [0.0, 0.0], [0.0, 11.0]]);

        let mut scroll = ScrollState::new();
        for &offset in &[
            0.0, 0.3, 16.5, 33.0, -0.1, -1.0e3, 1.0e9, -7.77e12, 4.2e15, 123_456.789,
        ] {
            scroll.set_offset(offset);
            scroll.apply(&mut lattice, span);

            let o = scroll.wrapped(span);
            for tile in &lattice {
                let z = tile.position[1];
                assert!(z >= -span / 2.0 && z < span / 2.0, "z={} offset={}", z, offset);
                assert_eq!(tile.position[0], tile.base[0]);

                // Differs from the unwrapped position by whole spans
                let laps = (z - (tile.base[1] - o)) / span;
                assert!((laps - laps.round()).abs() < 1e-4, "laps={}", laps);
            }
        }
    }

    #[test]
    fn test_one_full_span_is_periodic() {
        let mut lattice = tiles(&[[0.0, 0.0]]);
        let mut scroll = ScrollState::new();
        let animation = AnimationParams {
            animate: true,
            scroll_speed: 10.0,
        };

        scroll.update_placements(&mut lattice, 10.0, 1);
        let start = lattice[0].position;

        scroll.advance(0.25, &animation);
        scroll.update_placements(&mut lattice, 10.0, 1);
        assert_ne!(lattice[0].position, start);

        scroll.advance(0.75, &animation);
        scroll.update_placements(&mut lattice, 10.0, 1);
        assert_eq!(scroll.offset(), 10.0);
        assert_eq!(lattice[0].position, start);
    }
}
