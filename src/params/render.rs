//! Window and frame configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,

    /// Background clear color (linear RGBA)
    pub clear_color: [f64; 4],

    /// Longest frame step fed to the animation (seconds)
    /// Keeps a stalled window from jumping the scroll forward
    pub max_frame_dt_s: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            near_plane: 0.1,
            far_plane: 500.0,
            // #070a0f
            clear_color: [0.0021, 0.0030, 0.0048, 1.0],
            max_frame_dt_s: 0.05,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }

    /// Clamp a wall-clock frame delta to a usable animation step
    pub fn frame_dt(&self, elapsed_s: f32) -> f32 {
        elapsed_s.clamp(0.0, self.max_frame_dt_s)
    }
}
