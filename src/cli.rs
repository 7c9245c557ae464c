//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::params::query::apply_query;
use crate::params::{RenderConfig, TopoConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "topoterrain")]
#[command(about = "Stylized topographic terrain viewer", long_about = None)]
pub struct Args {
    /// Heightmap image (red channel = height); a procedural dome is used until it loads
    #[arg(long, value_name = "PATH", default_value = "assets/heightmap_512x512.png")]
    pub heightmap: PathBuf,

    /// Settings in query-string form, e.g. "scale=2&tilesZ=6&lineColor=%23ff8800"
    #[arg(long, value_name = "QUERY")]
    pub query: Option<String>,

    /// Height multiplier applied to the heightmap
    #[arg(long)]
    pub scale: Option<f32>,

    /// Number of tiles across (1-6)
    #[arg(long)]
    pub tiles_x: Option<u32>,

    /// Number of tiles in depth (1-12)
    #[arg(long)]
    pub tiles_z: Option<u32>,

    /// Vertices per tile side (8-600)
    #[arg(long)]
    pub grid: Option<u32>,

    /// World-height spacing between minor contour lines
    #[arg(long, value_name = "STEP")]
    pub minor: Option<f32>,

    /// Scroll speed (world units per second, signed)
    #[arg(long, allow_hyphen_values = true)]
    pub scroll: Option<f32>,

    /// Start with scrolling paused
    #[arg(long)]
    pub paused: bool,

    /// Disable hypsometric color bands
    #[arg(long)]
    pub no_bands: bool,

    /// Window width (pixels)
    #[arg(long, default_value = "1280")]
    pub width: u32,

    /// Window height (pixels)
    #[arg(long, default_value = "720")]
    pub height: u32,
}

impl Args {
    /// Defaults, then the query string, then typed flags, then safety clamps
    pub fn build_config(&self) -> TopoConfig {
        let mut config = TopoConfig::default();

        if let Some(query) = &self.query {
            apply_query(&mut config, query);
        }

        if let Some(scale) = self.scale.filter(|v| v.is_finite()) {
            config.terrain.scale = scale;
        }
        if let Some(tiles_x) = self.tiles_x {
            config.terrain.tiles_x = tiles_x;
        }
        if let Some(tiles_z) = self.tiles_z {
            config.terrain.tiles_z = tiles_z;
        }
        if let Some(grid) = self.grid {
            config.terrain.cols = grid;
            config.terrain.rows = grid;
        }
        if let Some(minor) = self.minor.filter(|v| v.is_finite()) {
            config.contours.minor_step = minor;
        }
        if let Some(scroll) = self.scroll.filter(|v| v.is_finite()) {
            config.animation.scroll_speed = scroll;
        }
        if self.paused {
            config.animation.animate = false;
        }
        if self.no_bands {
            config.bands.enabled = false;
        }

        config.clamped()
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width.max(1),
            window_height: self.height.max(1),
            ..RenderConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_flags() {
        let args = Args::parse_from(["topoterrain"]);
        assert_eq!(args.heightmap, PathBuf::from("assets/heightmap_512x512.png"));
        assert_eq!(args.build_config(), TopoConfig::default());
        assert_eq!(args.render_config().window_width, 1280);
    }

    #[test]
    fn test_flags_override_query() {
        let args = Args::parse_from([
            "topoterrain",
            "--query",
            "scale=3&tilesZ=5&bands=0",
            "--tiles-z",
            "7",
            "--scroll",
            "-1.5",
        ]);
        let config = args.build_config();

        assert_eq!(config.terrain.scale, 3.0);
        assert_eq!(config.terrain.tiles_z, 7);
        assert!(!config.bands.enabled);
        assert_eq!(config.animation.scroll_speed, -1.5);
    }

    #[test]
    fn test_clamps_apply_last() {
        let args = Args::parse_from(["topoterrain", "--grid", "2", "--tiles-x", "40"]);
        let config = args.build_config();

        assert_eq!(config.terrain.cols, 8);
        assert_eq!(config.terrain.rows, 8);
        assert_eq!(config.terrain.tiles_x, 6);
    }
}
