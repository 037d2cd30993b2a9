use rts_engine::camera::CameraControl;
use rts_engine::input::{InputFrame, InputState, Key, MouseButton};

/// Maps pointer drags and arrow keys onto the shared camera angles.
///
/// Horizontal motion turns `rotation_y` (the orbit angle); vertical motion
/// turns `rotation_x`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitController {
    /// Drag sensitivity in radians per logical pixel.
    pub radians_per_pixel: f32,
    /// Arrow key speed in radians per second.
    pub key_speed: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self {
            radians_per_pixel: 0.01,
            key_speed: 1.5,
        }
    }
}

impl OrbitController {
    /// Angle change `(rotation_x, rotation_y)` for one frame of input.
    pub fn deltas(&self, input: &InputState, frame: &InputFrame, dt: f32) -> (f32, f32) {
        let mut dx = 0.0;
        let mut dy = 0.0;

        if input.button_down(MouseButton::Left) {
            let (px, py) = frame.pointer_delta;
            dy += px * self.radians_per_pixel;
            dx += py * self.radians_per_pixel;
        }

        let step = self.key_speed * dt;
        if input.key_down(Key::ArrowLeft) {
            dy -= step;
        }
        if input.key_down(Key::ArrowRight) {
            dy += step;
        }
        if input.key_down(Key::ArrowUp) {
            dx += step;
        }
        if input.key_down(Key::ArrowDown) {
            dx -= step;
        }

        (dx, dy)
    }

    /// Applies this frame's input to `camera`. `R` resets both angles.
    pub fn update(&self, camera: &CameraControl, input: &InputState, frame: &InputFrame, dt: f32) {
        if frame.keys_pressed.contains(&Key::R) {
            camera.set_rotation_x(0.0);
            camera.set_rotation_y(0.0);
            return;
        }

        let (dx, dy) = self.deltas(input, frame, dt);
        if dx != 0.0 || dy != 0.0 {
            camera.rotate_by(dx, dy);
            log::trace!(
                "camera angles ({:.3}, {:.3})",
                camera.rotation_x(),
                camera.rotation_y()
            );
        }
    }
}
