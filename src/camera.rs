//! Orbit camera: pose from yaw/pitch/height/distance, view-projection and ground picking.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::params::{CameraParams, RenderConfig, TopoConfig};

/// Fraction of the orbit distance added to the eye height per unit of `sin(-pitch)`
const PITCH_LIFT: f32 = 0.15;

/// Look-at target sits this many tiles ahead of the origin (towards -Z)
const TARGET_AHEAD_TILES: f32 = 0.25;

/// Eye position for a camera pose
pub fn eye_position(camera: &CameraParams) -> Vec3 {
    let yaw = camera.yaw_deg.to_radians();
    let pitch = camera.pitch_deg.to_radians();

    Vec3::new(
        yaw.sin() * camera.distance,
        camera.height + (-pitch).sin() * (camera.distance * PITCH_LIFT),
        yaw.cos() * camera.distance,
    )
}

/// Fixed look-at point on the ground plane
pub fn look_target(tile_size: f32) -> Vec3 {
    Vec3::new(0.0, 0.0, -tile_size * TARGET_AHEAD_TILES)
}

/// Cursor position (physical pixels) to normalized device coordinates
pub fn cursor_to_ndc(x: f64, y: f64, width: u32, height: u32) -> Option<Vec2> {
    if width == 0 || height == 0 {
        return None;
    }

    let nx = x / width as f64 * 2.0 - 1.0;
    let ny = 1.0 - y / height as f64 * 2.0;
    Some(Vec2::new(nx as f32, ny as f32))
}

/// World-space ray
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Normalized
    pub dir: Vec3,
}

impl Ray {
    /// Intersection with the horizontal plane `y = plane_y`, if in front of the origin
    pub fn intersect_plane_y(&self, plane_y: f32) -> Option<Vec3> {
        if self.dir.y.abs() < 1e-6 {
            return None;
        }

        let t = (plane_y - self.origin.y) / self.dir.y;
        (t >= 0.0).then(|| self.origin + self.dir * t)
    }
}

/// Camera state derived from the configuration each frame
pub struct CameraSystem {
    eye: Vec3,
    view_proj: Mat4,
    inv_view_proj: Mat4,
}

impl CameraSystem {
    pub fn new(config: &TopoConfig, render_config: &RenderConfig) -> Self {
        let mut camera = Self {
            eye: Vec3::ZERO,
            view_proj: Mat4::IDENTITY,
            inv_view_proj: Mat4::IDENTITY,
        };
        camera.update(config, render_config);
        camera
    }

    /// Recompute pose and matrices from the current configuration
    pub fn update(&mut self, config: &TopoConfig, render_config: &RenderConfig) {
        self.eye = eye_position(&config.camera);
        let target = look_target(config.terrain.tile_size);

        // Always keep Y as up vector (camera never rolls)
        let view = Mat4::look_at_rh(self.eye, target, Vec3::Y);
        let proj = Mat4::perspective_rh(
            config.camera.fov_deg.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane,
            render_config.far_plane,
        );

        self.view_proj = proj * view;
        self.inv_view_proj = self.view_proj.inverse();
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn view_proj(&self) -> Mat4 {
        self.view_proj
    }

    /// World ray through a point in normalized device coordinates
    pub fn ray(&self, ndc: Vec2) -> Ray {
        // wgpu clip space: depth 0 at the near plane, 1 at the far plane
        let near = self.inv_view_proj * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let far = self.inv_view_proj * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);

        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;

        Ray {
            origin: near,
            dir: (far - near).normalize_or_zero(),
        }
    }

    /// Where the ray through `ndc` meets the ground plane `y = 0`
    pub fn ground_point(&self, ndc: Vec2) -> Option<Vec3> {
        self.ray(ndc).intersect_plane_y(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_eye_position() {
        let camera = CameraParams::default();
        let eye = eye_position(&camera);

        // yaw 0 puts the eye on +Z
        assert!(eye.x.abs() < 1e-6);
        assert!((eye.z - 10.0).abs() < 1e-5);

        let lift = (35.0f32).to_radians().sin() * 10.0 * PITCH_LIFT;
        assert!((eye.y - (4.2 + lift)).abs() < 1e-5);
    }

    #[test]
    fn test_yaw_rotates_around_y() {
        let camera = CameraParams {
            yaw_deg: 90.0,
            ..CameraParams::default()
        };
        let eye = eye_position(&camera);
        assert!((eye.x - 10.0).abs() < 1e-5);
        assert!(eye.z.abs() < 1e-5);
    }

    #[test]
    fn test_cursor_to_ndc_corners() {
        assert_eq!(cursor_to_ndc(0.0, 0.0, 200, 100), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(cursor_to_ndc(200.0, 100.0, 200, 100), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(cursor_to_ndc(100.0, 50.0, 200, 100), Some(Vec2::ZERO));
        assert_eq!(cursor_to_ndc(1.0, 1.0, 0, 100), None);
    }

    #[test]
    fn test_screen_center_hits_look_target() {
        let config = TopoConfig::default();
        let camera = CameraSystem::new(&config, &RenderConfig::default());

        let hit = camera.ground_point(Vec2::ZERO).unwrap();
        let target = look_target(config.terrain.tile_size);
        assert!((hit - target).length() < 1e-2, "hit={:?}", hit);
        assert!(hit.y.abs() < 1e-4);
    }

    #[test]
    fn test_ray_above_horizon_misses_ground() {
        let config = TopoConfig::default();
        let camera = CameraSystem::new(&config, &RenderConfig::default());

        // Top edge looks above the horizon with the default pose
        assert!(camera.ground_point(Vec2::new(0.0, 1.0)).is_none());
    }

    #[test]
    fn test_parallel_ray_has_no_intersection() {
        let ray = Ray {
            origin: Vec3::new(0.0, 1.0, 0.0),
            dir: Vec3::X,
        };
        assert_eq!(ray.intersect_plane_y(0.0), None);
    }

    #[test]
    fn test_view_proj_matrix_generation() {
        let camera = CameraSystem::new(&TopoConfig::default(), &RenderConfig::default());

        assert_ne!(camera.view_proj(), Mat4::IDENTITY);
        assert_ne!(camera.view_proj(), Mat4::ZERO);
        assert!(camera.eye().is_finite());
    }
}
