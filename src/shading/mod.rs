//! Topographic shading model.
//!
//! [`ShadingUniforms`] is the engine-side copy of every configuration field
//! the shader reads; it is uploaded verbatim as a uniform buffer. The
//! [`stages`] functions are the reference implementation of `topo.wgsl`,
//! one pure function per step of the per-pixel pipeline.

pub mod stages;
mod uniforms;

pub use stages::{
    band_t, banded_base, contours, hover_term, line_factor, mask_alpha, shade_pixel,
    smoothstep, topo_ramp, vertex_stage, ContourSample, PixelContext,
};
pub use uniforms::ShadingUniforms;
