//! Height source: a wrap-addressed scalar field read from an image's red channel.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use glam::Vec2;
use image::{DynamicImage, ImageFormat};
use log::{info, warn};

use crate::error::{Result, TopoError};

/// Resolution of the procedural fallback dome
pub const DOME_SIZE: u32 = 128;

/// Largest texture edge guaranteed by `wgpu::Limits::default()`
pub const MAX_TEXTURE_DIMENSION: u32 = 8192;

/// RGBA8 height field. Row 0 is `v = 0`, i.e. the bottom edge of a picture.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightSource {
    width: u32,
    height: u32,
    texels: Vec<u8>,
    label: String,
}

impl HeightSource {
    pub fn from_rgba8(
        width: u32,
        height: u32,
        texels: Vec<u8>,
        label: impl Into<String>,
    ) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || texels.len() != expected {
            return Err(TopoError::InvalidHeightmap(format!(
                "{}x{} image with {} bytes of RGBA data",
                width,
                height,
                texels.len()
            )));
        }

        Ok(Self {
            width,
            height,
            texels,
            label: label.into(),
        })
    }

    /// Convert a decoded picture; rows are flipped so `v = 1` is its top edge
    pub fn from_image(image: &DynamicImage, label: impl Into<String>) -> Result<Self> {
        let rgba = image.flipv().to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8(width, height, rgba.into_raw(), label)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let image = image::open(path)?;
        Self::from_image(&image, path.display().to_string())
    }

    /// Radial dome `max(0, 1 - r)` with `r` measured in [-1, 1] texel space
    pub fn dome(size: u32) -> Self {
        let size = size.max(2);
        let mut texels = Vec::with_capacity((size * size * 4) as usize);

        for y in 0..size {
            for x in 0..size {
                let nx = x as f32 / (size - 1) as f32 * 2.0 - 1.0;
                let ny = y as f32 / (size - 1) as f32 * 2.0 - 1.0;
                let v = (1.0 - (nx * nx + ny * ny).sqrt()).max(0.0);
                let g = (v * 255.0).floor() as u8;
                texels.extend_from_slice(&[g, g, g, 255]);
            }
        }

        Self {
            width: size,
            height: size,
            texels,
            label: "procedural dome".to_string(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 rows, ready for texture upload
    pub fn texels(&self) -> &[u8] {
        &self.texels
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether both edges fit in a `max_dimension` texture
    pub fn fits_within(&self, max_dimension: u32) -> bool {
        self.width <= max_dimension && self.height <= max_dimension
    }

    /// Normalized red channel at an integer texel, wrapping on both axes
    pub fn texel(&self, x: i64, y: i64) -> f32 {
        let x = x.rem_euclid(self.width as i64) as usize;
        let y = y.rem_euclid(self.height as i64) as usize;
        self.texels[(y * self.width as usize + x) * 4] as f32 / 255.0
    }

    /// Bilinear sample with repeat addressing, as the GPU sampler does
    pub fn sample(&self, uv: Vec2) -> f32 {
        let fx = uv.x * self.width as f32 - 0.5;
        let fy = uv.y * self.height as f32 - 0.5;
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = fx - x0;
        let ty = fy - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let lerp = |a: f32, b: f32, t: f32| a * (1.0 - t) + b * t;
        let bottom = lerp(self.texel(x0, y0), self.texel(x0 + 1, y0), tx);
        let top = lerp(self.texel(x0, y0 + 1), self.texel(x0 + 1, y0 + 1), tx);
        lerp(bottom, top, ty)
    }
}

/// Whether `path` names an image format the decoder understands
pub fn is_supported_image(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok()
}

struct LoadResult {
    path: PathBuf,
    source: Result<HeightSource>,
}

/// Decodes heightmaps off the render thread.
///
/// Each request runs on its own thread; finished loads are collected by
/// [`HeightmapLoader::poll`] once per frame. Sources larger than the GPU
/// texture limit are dropped there.
pub struct HeightmapLoader {
    sender: Sender<LoadResult>,
    receiver: Receiver<LoadResult>,
    max_dimension: u32,
}

impl HeightmapLoader {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            max_dimension: MAX_TEXTURE_DIMENSION,
        }
    }

    /// Match the texture limit of the device that will upload the sources
    pub fn set_max_dimension(&mut self, max_dimension: u32) {
        self.max_dimension = max_dimension;
    }

    /// Start loading `path`. Returns false if the file is not an image.
    pub fn request(&self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if !is_supported_image(&path) {
            warn!("Ignoring '{}': not a recognised image file", path.display());
            return false;
        }

        let sender = self.sender.clone();
        let spawned = thread::Builder::new()
            .name("heightmap-loader".to_string())
            .spawn(move || {
                let source = HeightSource::load(&path);
                // Receiver is gone only during shutdown
                let _ = sender.send(LoadResult { path, source });
            });

        match spawned {
            Ok(_) => true,
            Err(e) => {
                warn!("Failed to spawn heightmap loader: {}", e);
                false
            }
        }
    }

    /// Drain finished loads without blocking; the most recent success wins
    pub fn poll(&self) -> Option<HeightSource> {
        let mut latest = None;
        while let Ok(result) = self.receiver.try_recv() {
            if let Some(source) = self.accept(result) {
                latest = Some(source);
            }
        }
        latest
    }

    /// Block until one load finishes or `timeout` elapses
    pub fn wait(&self, timeout: Duration) -> Option<HeightSource> {
        self.receiver
            .recv_timeout(timeout)
            .ok()
            .and_then(|result| self.accept(result))
    }

    fn accept(&self, result: LoadResult) -> Option<HeightSource> {
        let max = self.max_dimension;
        let checked = result.source.and_then(|source| {
            if source.fits_within(max) {
                Ok(source)
            } else {
                Err(TopoError::InvalidHeightmap(format!(
                    "{}x{} exceeds the {} texel texture limit",
                    source.width(),
                    source.height(),
                    max
                )))
            }
        });

        match checked {
            Ok(source) => {
                info!(
                    "Loaded heightmap '{}' ({}x{})",
                    source.label(),
                    source.width(),
                    source.height()
                );
                Some(source)
            }
            Err(e) => {
                warn!(
                    "Keeping current heightmap, failed to load '{}': {}",
                    result.path.display(),
                    e
                );
                None
            }
        }
    }
}

impl Default for HeightmapLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("topoterrain-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_dome_peaks_in_the_middle() {
        let dome = HeightSource::dome(DOME_SIZE);
        assert_eq!(dome.width(), 128);
        assert_eq!(dome.texels().len(), 128 * 128 * 4);

        assert!(dome.sample(Vec2::new(0.5, 0.5)) > 0.95);
        assert_eq!(dome.texel(0, 0), 0.0);
        assert_eq!(dome.texel(127, 0), 0.0);
    }

    #[test]
    fn test_sampling_wraps_both_axes() {
        let dome = HeightSource::dome(32);
        for &(u, v) in &[(0.1, 0.2), (0.73, 0.41), (0.5, 0.95)] {
            let a = dome.sample(Vec2::new(u, v));
            let b = dome.sample(Vec2::new(u + 1.0, v - 2.0));
            assert!((a - b).abs() < 1e-3, "{} vs {}", a, b);
        }
        assert_eq!(dome.texel(-1, 0), dome.texel(31, 0));
    }

    #[test]
    fn test_uniform_field_samples_constant() {
        let texels = [200u8, 0, 0, 255].repeat(16);
        let flat = HeightSource::from_rgba8(4, 4, texels, "flat").unwrap();
        let expected = 200.0 / 255.0;
        for &(u, v) in &[(0.0, 0.0), (0.3, 0.9), (-4.2, 7.7)] {
            assert!((flat.sample(Vec2::new(u, v)) - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_rejects_mismatched_buffer() {
        assert!(HeightSource::from_rgba8(4, 4, vec![0; 10], "bad").is_err());
        assert!(HeightSource::from_rgba8(0, 4, vec![], "empty").is_err());
    }

    #[test]
    fn test_picture_top_maps_to_v_one() {
        let mut picture = RgbaImage::new(1, 2);
        picture.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        picture.put_pixel(0, 1, Rgba([0, 0, 0, 255]));

        let source = HeightSource::from_image(&DynamicImage::ImageRgba8(picture), "pic").unwrap();
        assert_eq!(source.texel(0, 0), 0.0);
        assert_eq!(source.texel(0, 1), 1.0);
    }

    #[test]
    fn test_loader_rejects_non_images() {
        let loader = HeightmapLoader::new();
        assert!(!loader.request("notes.txt"));
        assert!(loader.poll().is_none());
    }

    #[test]
    fn test_loader_reports_missing_file_as_none() {
        let loader = HeightmapLoader::new();
        assert!(loader.request(temp_path("missing.png")));
        assert!(loader.wait(Duration::from_secs(5)).is_none());
    }

    #[test]
    fn test_loader_decodes_png() {
        let path = temp_path("ramp.png");
        RgbaImage::from_pixel(8, 4, Rgba([128, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let loader = HeightmapLoader::new();
        assert!(loader.request(path.clone()));
        let source = loader.wait(Duration::from_secs(5)).unwrap();
        assert_eq!((source.width(), source.height()), (8, 4));
        assert!((source.texel(3, 2) - 128.0 / 255.0).abs() < 1e-6);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_fits_within_checks_both_edges() {
        let source = HeightSource::from_rgba8(8, 4, vec![0; 8 * 4 * 4], "wide").unwrap();
        assert!(source.fits_within(8));
        assert!(!source.fits_within(7));
        assert!(HeightSource::dome(DOME_SIZE).fits_within(MAX_TEXTURE_DIMENSION));
    }

    #[test]
    fn test_loader_drops_sources_over_texture_limit() {
        let path = temp_path("oversized.png");
        RgbaImage::from_pixel(8, 4, Rgba([50, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let mut loader = HeightmapLoader::new();
        loader.set_max_dimension(4);
        assert!(loader.request(path.clone()));
        assert!(loader.wait(Duration::from_secs(5)).is_none());

        let _ = std::fs::remove_file(path);
    }
}
