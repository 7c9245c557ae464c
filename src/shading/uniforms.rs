//! Uniform block shared by the CPU shading reference and `topo.wgsl`.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::params::TopoConfig;

/// Shading parameters laid out as the WGSL `Shading` struct.
///
/// Colors and the hover center occupy padded `vec4` slots; booleans are
/// stored as 0.0 / 1.0.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ShadingUniforms {
    pub hover_center: [f32; 4],
    pub base_color: [f32; 4],
    pub line_color: [f32; 4],
    pub low_color: [f32; 4],
    pub mid_color: [f32; 4],
    pub high_color: [f32; 4],

    pub scale: f32,
    pub jitter: f32,
    pub minor_step: f32,
    pub major_every: f32,

    pub width_minor: f32,
    pub width_major: f32,
    pub glow_minor: f32,
    pub glow_major: f32,

    pub mask_radius: f32,
    pub mask_feather: f32,
    pub hover_radius: f32,
    pub hover_strength: f32,

    pub hover_snap: f32,
    pub bands_enabled: f32,
    pub band_steps: f32,
    pub band_strength: f32,
}

fn flag(b: bool) -> f32 {
    if b {
        1.0
    } else {
        0.0
    }
}

impl ShadingUniforms {
    pub fn from_config(config: &TopoConfig) -> Self {
        let mut uniforms = Self::zeroed();
        uniforms.sync_from_config(config);
        uniforms
    }

    /// Copy every shader-visible field out of `config`.
    ///
    /// Touches nothing but this block, so it is safe to call every frame.
    /// The hover center is left alone; it has its own input path.
    pub fn sync_from_config(&mut self, config: &TopoConfig) {
        let terrain = &config.terrain;
        let contours = &config.contours;
        let bands = &config.bands;

        self.scale = terrain.scale;
        self.jitter = terrain.jitter;
        self.base_color = terrain.base_color.to_vec4();

        self.minor_step = contours.minor_step;
        self.major_every = contours.major_every as f32;
        self.width_minor = contours.width_minor;
        self.width_major = contours.width_major;
        self.glow_minor = contours.glow_minor;
        self.glow_major = contours.glow_major;
        self.line_color = contours.line_color.to_vec4();

        self.mask_radius = config.mask.radius;
        self.mask_feather = config.mask.feather;

        self.hover_radius = config.hover.radius;
        self.hover_strength = config.hover.strength;
        self.hover_snap = flag(config.hover.snap);

        self.bands_enabled = flag(bands.enabled);
        self.band_steps = bands.steps as f32;
        self.band_strength = bands.strength;
        self.low_color = bands.low.to_vec4();
        self.mid_color = bands.mid.to_vec4();
        self.high_color = bands.high.to_vec4();
    }

    pub fn set_hover_center(&mut self, point: Vec3) {
        self.hover_center = point.extend(1.0).to_array();
    }

    pub fn hover_center(&self) -> Vec3 {
        Vec3::new(
            self.hover_center[0],
            self.hover_center[1],
            self.hover_center[2],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Rgb;

    #[test]
    fn test_layout_matches_wgsl_struct() {
        // 6 vec4 slots + 16 scalars, 16-byte aligned
        assert_eq!(std::mem::size_of::<ShadingUniforms>(), 160);
        assert_eq!(std::mem::size_of::<ShadingUniforms>() % 16, 0);
    }

    #[test]
    fn test_sync_copies_every_field() {
        let mut config = TopoConfig::default();
        config.terrain.scale = 3.0;
        config.contours.major_every = 4;
        config.contours.line_color = Rgb([0.1, 0.2, 0.3]);
        config.bands.enabled = false;
        config.hover.snap = true;
        config.mask.feather = 0.0;

        let u = ShadingUniforms::from_config(&config);
        assert_eq!(u.scale, 3.0);
        assert_eq!(u.major_every, 4.0);
        assert_eq!(u.line_color, [0.1, 0.2, 0.3, 1.0]);
        assert_eq!(u.bands_enabled, 0.0);
        assert_eq!(u.hover_snap, 1.0);
        assert_eq!(u.mask_feather, 0.0);
        assert_eq!(u.band_steps, 18.0);
    }

    #[test]
    fn test_sync_is_idempotent_and_keeps_hover() {
        let config = TopoConfig::default();
        let mut u = ShadingUniforms::from_config(&config);
        u.set_hover_center(Vec3::new(1.0, 0.0, -2.0));

        let before = u;
        u.sync_from_config(&config);
        u.sync_from_config(&config);

        assert_eq!(u, before);
        assert_eq!(u.hover_center(), Vec3::new(1.0, 0.0, -2.0));
    }
}
