//! Renderer configuration.

use glam::Vec3;

use crate::color::Color;
use crate::error::ErrorPolicy;
use crate::geometry::models::MODEL_COLOR;

/// Scene constants: camera rig, projection volume and object placement.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Orbit radius around the origin.
    pub camera_distance: f32,
    /// Eye height above the ground plane.
    pub camera_height: f32,

    /// Vertical half-extent of the near plane. The horizontal half-extent is
    /// this times the surface aspect ratio.
    pub frustum_half_height: f32,
    pub near: f32,
    pub far: f32,

    /// World offsets of the ship instances, drawn in order.
    pub ship_offsets: Vec<Vec3>,

    pub clear_color: Color,
    /// Clear value of the depth buffer.
    pub clear_depth: f32,
    /// Constant color bound to every drawable.
    pub model_color: Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera_distance: 20.0,
            camera_height: 8.0,
            frustum_half_height: 0.5,
            near: 1.0,
            far: 100.0,
            ship_offsets: vec![Vec3::new(0.0, 0.0, 4.0), Vec3::new(0.0, 0.0, -4.0)],
            clear_color: Color::black(),
            clear_depth: 1.0,
            model_color: Color::from_array(MODEL_COLOR),
        }
    }
}

/// Top-level renderer configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RendererConfig {
    pub scene: SceneConfig,
    /// Applied at every graphics error check.
    pub error_policy: ErrorPolicy,
}
