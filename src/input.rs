//! Mouse orbit and keyboard bindings.
//!
//! Both produce a new [`TopoConfig`]; the caller hands it to
//! `TerrainTopo::set_config`, which decides between rebuild and sync.

use winit::event::MouseScrollDelta;
use winit::keyboard::KeyCode;

use crate::params::{CameraParams, TopoConfig};

/// Degrees of yaw/pitch per pixel of drag
pub const ORBIT_DEG_PER_PX: f32 = 0.2;

/// Orbit distance change per wheel notch
pub const ZOOM_STEP: f32 = 0.8;

/// Minor contour spacing factor for `[` and `]`
pub const CONTOUR_STEP_FACTOR: f32 = 1.25;

/// Apply a drag of `dx, dy` pixels to the camera pose
pub fn orbit(camera: &mut CameraParams, dx: f32, dy: f32) {
    camera.yaw_deg += dx * ORBIT_DEG_PER_PX;
    camera.pitch_deg = CameraParams::clamp_pitch(camera.pitch_deg + dy * ORBIT_DEG_PER_PX);
}

/// Step the orbit distance by the sign of `delta` (positive moves away)
pub fn zoom(camera: &mut CameraParams, delta: f32) {
    if delta == 0.0 || !delta.is_finite() {
        return;
    }
    camera.distance = CameraParams::clamp_distance(camera.distance + delta.signum() * ZOOM_STEP);
}

/// Wheel delta with "scroll towards the user" positive
pub fn wheel_delta(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y,
        MouseScrollDelta::PixelDelta(p) => -(p.y as f32),
    }
}

/// Left-button drag tracking
#[derive(Debug, Default)]
pub struct OrbitController {
    dragging: bool,
    last_cursor: Option<(f64, f64)>,
}

impl OrbitController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_dragging(&mut self, pressed: bool) {
        self.dragging = pressed;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Track the cursor; returns true when a drag moved the camera
    pub fn cursor_moved(&mut self, x: f64, y: f64, camera: &mut CameraParams) -> bool {
        let last = self.last_cursor.replace((x, y));
        if !self.dragging {
            return false;
        }

        match last {
            Some((lx, ly)) => {
                orbit(camera, (x - lx) as f32, (y - ly) as f32);
                true
            }
            None => false,
        }
    }

    pub fn cursor_left(&mut self) {
        self.last_cursor = None;
        self.dragging = false;
    }
}

/// Keyboard shortcuts standing in for a control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ToggleAnimate,
    ToggleBands,
    ToggleHoverSnap,
    MoreTilesZ,
    FewerTilesZ,
    MoreTilesX,
    FewerTilesX,
    SparserContours,
    DenserContours,
    Reset,
    Quit,
}

impl KeyAction {
    pub fn from_key(key: KeyCode) -> Option<Self> {
        let action = match key {
            KeyCode::Space => KeyAction::ToggleAnimate,
            KeyCode::KeyB => KeyAction::ToggleBands,
            KeyCode::KeyH => KeyAction::ToggleHoverSnap,
            KeyCode::ArrowUp => KeyAction::MoreTilesZ,
            KeyCode::ArrowDown => KeyAction::FewerTilesZ,
            KeyCode::ArrowRight => KeyAction::MoreTilesX,
            KeyCode::ArrowLeft => KeyAction::FewerTilesX,
            KeyCode::BracketLeft => KeyAction::SparserContours,
            KeyCode::BracketRight => KeyAction::DenserContours,
            KeyCode::KeyR => KeyAction::Reset,
            KeyCode::Escape => KeyAction::Quit,
            _ => return None,
        };
        Some(action)
    }

    /// Configuration after this action, clamped. `None` for [`KeyAction::Quit`].
    pub fn apply(self, current: &TopoConfig, launch: &TopoConfig) -> Option<TopoConfig> {
        let mut next = current.clone();

        match self {
            KeyAction::ToggleAnimate => next.animation.animate = !next.animation.animate,
            KeyAction::ToggleBands => next.bands.enabled = !next.bands.enabled,
            KeyAction::ToggleHoverSnap => next.hover.snap = !next.hover.snap,
            KeyAction::MoreTilesZ => next.terrain.tiles_z += 1,
            KeyAction::FewerTilesZ => next.terrain.tiles_z = next.terrain.tiles_z.saturating_sub(1),
            KeyAction::MoreTilesX => next.terrain.tiles_x += 1,
            KeyAction::FewerTilesX => next.terrain.tiles_x = next.terrain.tiles_x.saturating_sub(1),
            KeyAction::SparserContours => next.contours.minor_step *= CONTOUR_STEP_FACTOR,
            KeyAction::DenserContours => next.contours.minor_step /= CONTOUR_STEP_FACTOR,
            KeyAction::Reset => next = launch.clone(),
            KeyAction::Quit => return None,
        }

        Some(next.clamped())
    }
}
