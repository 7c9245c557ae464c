//! Camera pose and scroll animation parameters.

use std::ops::RangeInclusive;

/// Allowed pitch (degrees); the camera always looks down at the terrain
pub const PITCH_RANGE_DEG: RangeInclusive<f32> = -85.0..=-5.0;

/// Allowed orbit distance (world units)
pub const DISTANCE_RANGE: RangeInclusive<f32> = 2.0..=60.0;

/// Orbiting camera pose around the origin
#[derive(Debug, Clone, PartialEq)]
pub struct CameraParams {
    /// Rotation around the vertical axis (degrees)
    pub yaw_deg: f32,

    /// Tilt (degrees, negative = looking down)
    pub pitch_deg: f32,

    /// Vertical field of view (degrees)
    pub fov_deg: f32,

    /// Base eye height above the ground plane (world units)
    pub height: f32,

    /// Horizontal orbit distance from the origin (world units)
    pub distance: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            yaw_deg: 0.0,
            pitch_deg: -35.0,
            fov_deg: 55.0,
            height: 4.2,
            distance: 10.0,
        }
    }
}

impl CameraParams {
    pub fn clamp_pitch(pitch_deg: f32) -> f32 {
        pitch_deg.clamp(*PITCH_RANGE_DEG.start(), *PITCH_RANGE_DEG.end())
    }

    pub fn clamp_distance(distance: f32) -> f32 {
        distance.clamp(*DISTANCE_RANGE.start(), *DISTANCE_RANGE.end())
    }
}

/// Continuous terrain scroll
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationParams {
    pub animate: bool,

    /// Scroll velocity along Z (world units per second, signed)
    pub scroll_speed: f32,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            animate: true,
            scroll_speed: 0.8,
        }
    }
}
