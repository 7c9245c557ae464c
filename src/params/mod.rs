//! Parameter definitions with units and documented ranges.
//!
//! Every field is user settable (command line, query string, keyboard).
//! Values pass through [`TopoConfig::clamped`] before they reach the
//! terrain core, which does not re-validate them.

mod camera;
pub mod query;
mod render;
mod style;
mod terrain;

// Re-export all types
pub use camera::{AnimationParams, CameraParams, DISTANCE_RANGE, PITCH_RANGE_DEG};
pub use render::RenderConfig;
pub use style::{BandStyle, ContourStyle, HoverParams, MaskParams, Rgb, MIN_MINOR_STEP};
pub use terrain::{
    LatticeKey, TerrainShape, GRID_RANGE, MIN_TILE_SIZE, TILES_X_RANGE, TILES_Z_RANGE,
};

/// Complete configuration snapshot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TopoConfig {
    pub terrain: TerrainShape,
    pub contours: ContourStyle,
    pub bands: BandStyle,
    pub mask: MaskParams,
    pub hover: HoverParams,
    pub camera: CameraParams,
    pub animation: AnimationParams,
}

impl TopoConfig {
    pub fn lattice_key(&self) -> LatticeKey {
        self.terrain.lattice_key()
    }

    /// Pull every field into its documented range
    pub fn clamped(mut self) -> Self {
        self.terrain.clamp_in_place();
        self.contours.clamp_in_place();
        self.bands.clamp_in_place();
        self.mask.clamp_in_place();
        self.hover.clamp_in_place();
        self.camera.pitch_deg = CameraParams::clamp_pitch(self.camera.pitch_deg);
        self.camera.distance = CameraParams::clamp_distance(self.camera.distance);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_survive_clamping() {
        let config = TopoConfig::default();
        assert_eq!(config.clone().clamped(), config);
    }

    #[test]
    fn test_pitch_is_clamped_to_downward_view() {
        let mut config = TopoConfig::default();
        config.camera.pitch_deg = 30.0;
        assert_eq!(config.clamped().camera.pitch_deg, -5.0);
    }
}
