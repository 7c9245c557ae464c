//! Terrain orchestrator: decides rebuild vs uniform sync and drives scrolling.

use std::sync::Arc;

use glam::Vec3;
use log::{debug, info};

use super::mesh::TileLattice;
use super::scroll::ScrollState;
use crate::heightmap::HeightSource;
use crate::params::TopoConfig;
use crate::shading::ShadingUniforms;

/// Outcome of [`TerrainTopo::set_config`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigChange {
    Unchanged,
    /// Uniforms refreshed, geometry kept
    Synced,
    /// New lattice generation built
    Rebuilt,
}

/// True when the lattice topology differs between two configurations
pub fn needs_rebuild(prev: &TopoConfig, cur: &TopoConfig) -> bool {
    prev.lattice_key() != cur.lattice_key()
}

/// Owns the configuration, the current lattice generation, the shading
/// uniforms and the height source.
pub struct TerrainTopo {
    config: TopoConfig,
    lattice: Option<TileLattice>,
    uniforms: ShadingUniforms,
    height_source: Arc<HeightSource>,
    height_revision: u64,
    scroll: ScrollState,
    next_generation: u64,
}

impl TerrainTopo {
    /// Build the first lattice generation and sync uniforms
    pub fn new(config: TopoConfig, height_source: Arc<HeightSource>) -> Self {
        let mut topo = Self {
            uniforms: ShadingUniforms::from_config(&config),
            config,
            lattice: None,
            height_source,
            height_revision: 0,
            scroll: ScrollState::new(),
            next_generation: 0,
        };
        topo.rebuild();
        topo
    }

    fn rebuild(&mut self) {
        // Release the previous generation before allocating the next
        self.lattice = None;

        let generation = self.next_generation;
        self.next_generation += 1;

        let mut lattice = TileLattice::new(&self.config.terrain, generation);
        let key = lattice.key();
        self.scroll
            .update_placements(&mut lattice.tiles, key.tile_size, key.tiles_z);

        info!(
            "Built lattice generation {}: {}x{} tiles of {}x{} vertices",
            generation, key.tiles_x, key.tiles_z, key.cols, key.rows
        );
        self.lattice = Some(lattice);
    }

    /// Rebuild when the lattice key changed since `prev`, or after dispose
    pub fn rebuild_if_needed(&mut self, prev: &TopoConfig) -> bool {
        if self.lattice.is_some() && !needs_rebuild(prev, &self.config) {
            return false;
        }
        self.rebuild();
        true
    }

    /// Replace the configuration, rebuilding only for structural changes
    pub fn set_config(&mut self, next: TopoConfig) -> ConfigChange {
        if next == self.config {
            return ConfigChange::Unchanged;
        }

        let prev = std::mem::replace(&mut self.config, next);
        let rebuilt = self.rebuild_if_needed(&prev);
        self.sync_from_config();

        if rebuilt {
            ConfigChange::Rebuilt
        } else {
            ConfigChange::Synced
        }
    }

    pub fn sync_from_config(&mut self) {
        self.uniforms.sync_from_config(&self.config);
        debug!("Synced shading uniforms");
    }

    /// Swap the height field; topology is untouched
    pub fn set_height_source(&mut self, source: Arc<HeightSource>) {
        info!(
            "Height source replaced with '{}' ({}x{})",
            source.label(),
            source.width(),
            source.height()
        );
        self.height_source = source;
        self.height_revision += 1;
    }

    pub fn set_hover_center(&mut self, point: Vec3) {
        self.uniforms.set_hover_center(point);
    }

    /// Per-frame update: advance the scroll offset and re-wrap every tile
    pub fn advance(&mut self, dt_s: f32) {
        self.scroll.advance(dt_s, &self.config.animation);

        if let Some(lattice) = self.lattice.as_mut() {
            let key = lattice.key();
            self.scroll
                .update_placements(&mut lattice.tiles, key.tile_size, key.tiles_z);
        }
    }

    /// Release the current generation. Safe to call more than once.
    pub fn dispose(&mut self) {
        if let Some(lattice) = self.lattice.take() {
            info!("Disposed lattice generation {}", lattice.generation());
        }
    }

    pub fn config(&self) -> &TopoConfig {
        &self.config
    }

    pub fn lattice(&self) -> Option<&TileLattice> {
        self.lattice.as_ref()
    }

    pub fn generation(&self) -> Option<u64> {
        self.lattice.as_ref().map(TileLattice::generation)
    }

    pub fn uniforms(&self) -> &ShadingUniforms {
        &self.uniforms
    }

    pub fn height_source(&self) -> &Arc<HeightSource> {
        &self.height_source
    }

    /// Bumped on every height source swap
    pub fn height_revision(&self) -> u64 {
        self.height_revision
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll.offset()
    }
}
