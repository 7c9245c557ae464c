//! Per-vertex and per-pixel shading stages.
//!
//! Each function mirrors one block of `topo.wgsl`. They are pure so every
//! step can be checked with literal inputs.

use glam::{Vec2, Vec3, Vec4};

use super::ShadingUniforms;
use crate::heightmap::HeightSource;
use crate::terrain::TileVertex;

/// Floor for user-controlled step sizes used as divisors
pub const STEP_EPSILON: f32 = 1e-6;

/// Pixels whose mask alpha falls to this value are discarded
pub const DISCARD_ALPHA: f32 = 0.001;

/// Nudges `hWorld / minorStep` past float error just below an integer
const MAJOR_INDEX_BIAS: f32 = 1e-4;

/// Flat brightness lift along contour lines
const LINE_LIFT: f32 = 0.06;

/// Hover glow fades out between `radius` and `radius * HOVER_FADE`
const HOVER_FADE: f32 = 1.25;

/// Hover strength away from minor lines when snapping
const SNAP_FLOOR: f32 = 0.55;

/// Hermite step between two edges.
///
/// Collapsed or inverted edges give a hard step (0 at or below `edge0`,
/// 1 above), so zero widths never divide by zero.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if x <= edge0 {
        0.0
    } else if x >= edge1 {
        1.0
    } else {
        let t = (x - edge0) / (edge1 - edge0);
        t * t * (3.0 - 2.0 * t)
    }
}

/// Floored modulo, sign follows the divisor
pub fn floor_mod(x: f32, m: f32) -> f32 {
    x - m * (x / m).floor()
}

fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

fn mix3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a * (1.0 - t) + b * t
}

fn rgb(slot: [f32; 4]) -> Vec3 {
    Vec3::new(slot[0], slot[1], slot[2])
}

/// Interpolated inputs of the pixel stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelContext {
    pub world_position: Vec3,
    /// Raw heightmap value in [0, 1]
    pub h01: f32,
    /// `h01 * scale`
    pub h_world: f32,
}

impl PixelContext {
    fn world_xz(&self) -> Vec2 {
        Vec2::new(self.world_position.x, self.world_position.z)
    }
}

/// Sample height, jitter XZ, displace Y, then move into the tile's slot
pub fn vertex_stage(
    vertex: &TileVertex,
    tile_offset: [f32; 2],
    height: &HeightSource,
    u: &ShadingUniforms,
) -> PixelContext {
    let h01 = height.sample(Vec2::from_array(vertex.uv));
    let h_world = h01 * u.scale;

    let mut p = Vec3::from_array(vertex.position);
    p.x += vertex.jitter[0] * u.jitter;
    p.z += vertex.jitter[1] * u.jitter;
    p.y += h_world;

    PixelContext {
        world_position: p + Vec3::new(tile_offset[0], 0.0, tile_offset[1]),
        h01,
        h_world,
    }
}

/// Radial visibility; `None` means the pixel is discarded outright
pub fn mask_alpha(world_xz: Vec2, u: &ShadingUniforms) -> Option<f32> {
    let dist = world_xz.length();
    let alpha = 1.0 - smoothstep(u.mask_radius, u.mask_radius + u.mask_feather, dist);
    (alpha > DISCARD_ALPHA).then_some(alpha)
}

/// Quantized band position in [0, 1]
pub fn band_t(h01: f32, band_steps: f32) -> f32 {
    let steps = band_steps.max(2.0);
    let index = (h01 * (steps - 1.0)).floor();
    index / (steps - 1.0)
}

/// Two-segment ramp low -> mid -> high
pub fn topo_ramp(t: f32, low: Vec3, mid: Vec3, high: Vec3) -> Vec3 {
    if t < 0.5 {
        mix3(low, mid, t * 2.0)
    } else {
        mix3(mid, high, (t - 0.5) * 2.0)
    }
}

/// Base color tinted by the hypsometric band of `h01`
pub fn banded_base(h01: f32, u: &ShadingUniforms) -> Vec3 {
    let band = topo_ramp(
        band_t(h01, u.band_steps),
        rgb(u.low_color),
        rgb(u.mid_color),
        rgb(u.high_color),
    );
    let weight = u.band_strength.clamp(0.0, 1.0) * u.bands_enabled;
    mix3(rgb(u.base_color), band, weight)
}

/// Closeness to the nearest multiple of `step`: 1 on the line, 0 beyond `width`
pub fn line_factor(height: f32, step: f32, width: f32) -> f32 {
    let step = step.max(STEP_EPSILON);
    let m = floor_mod(height, step);
    let d = m.min(step - m);
    1.0 - smoothstep(0.0, width, d)
}

/// Contour evaluation at one world height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourSample {
    pub minor_line: f32,
    pub major_line: f32,
    /// 1.0 when the height sits in a major interval, else 0.0
    pub is_major: f32,
    /// Line coverage, major lines winning over minor
    pub intensity: f32,
    pub glow: f32,
}

pub fn contours(h_world: f32, u: &ShadingUniforms) -> ContourSample {
    let minor_step = u.minor_step.max(STEP_EPSILON);
    let major_every = u.major_every.max(1.0);

    let minor_line = line_factor(h_world, minor_step, u.width_minor);

    // Near interval boundaries this can land one interval off; accepted
    let minor_index = (h_world / minor_step + MAJOR_INDEX_BIAS).floor();
    let is_major = if floor_mod(minor_index, major_every) < 0.5 {
        1.0
    } else {
        0.0
    };

    let major_step = (u.minor_step * major_every).max(STEP_EPSILON);
    let major_line = line_factor(h_world, major_step, u.width_major);

    let minor_only = minor_line * (1.0 - is_major);
    ContourSample {
        minor_line,
        major_line,
        is_major,
        intensity: minor_only.max(major_line),
        glow: (u.glow_minor * minor_only).max(u.glow_major * major_line),
    }
}

/// Pointer glow weight at `world_xz`
pub fn hover_term(world_xz: Vec2, minor_line: f32, u: &ShadingUniforms) -> f32 {
    let center = Vec2::new(u.hover_center[0], u.hover_center[2]);
    let dist = world_xz.distance(center);
    let mut hover = 1.0 - smoothstep(u.hover_radius, u.hover_radius * HOVER_FADE, dist);

    if u.hover_snap > 0.5 {
        hover *= mix(SNAP_FLOOR, 1.0, minor_line);
    }
    hover
}

/// Full pixel pipeline: mask, bands, contours, hover, composite
pub fn shade_pixel(ctx: &PixelContext, u: &ShadingUniforms) -> Option<Vec4> {
    let xz = ctx.world_xz();
    let alpha = mask_alpha(xz, u)?;

    let base = banded_base(ctx.h01, u);
    let lines = contours(ctx.h_world, u);
    let hover = hover_term(xz, lines.minor_line, u);

    let line_color = rgb(u.line_color);
    let color = base
        + line_color * lines.glow
        + Vec3::splat(LINE_LIFT) * lines.intensity
        + line_color * (hover * u.hover_strength);

    Some(color.extend(alpha))
}
