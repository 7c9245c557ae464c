//! Topoterrain library - stylized topographic terrain rendering

pub mod camera;
pub mod cli;
pub mod error;
pub mod heightmap;
pub mod input;
pub mod params;
pub mod rendering;
pub mod shading;
pub mod terrain;
