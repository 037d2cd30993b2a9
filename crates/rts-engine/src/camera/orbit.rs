use glam::{Mat4, Vec3};

/// Camera circling the origin on a horizontal ring.
///
/// The eye sits at `(distance·cos θ, height, distance·sin θ)` and always looks
/// at the origin with +Y up.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitCamera {
    pub distance: f32,
    pub height: f32,
}

impl OrbitCamera {
    pub const TARGET: Vec3 = Vec3::ZERO;
    pub const UP: Vec3 = Vec3::Y;

    #[inline]
    pub const fn new(distance: f32, height: f32) -> Self {
        Self { distance, height }
    }

    /// Eye position for orbit angle `angle_y` (radians).
    pub fn eye(&self, angle_y: f32) -> Vec3 {
        let (sin, cos) = angle_y.sin_cos();
        Vec3::new(self.distance * cos, self.height, self.distance * sin)
    }

    /// Right-handed look-at view matrix for `angle_y`.
    pub fn view(&self, angle_y: f32) -> Mat4 {
        Mat4::look_at_rh(self.eye(angle_y), Self::TARGET, Self::UP)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(20.0, 8.0)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn eye_at_zero_angle() {
        let eye = OrbitCamera::default().eye(0.0);
        assert!(eye.abs_diff_eq(Vec3::new(20.0, 8.0, 0.0), EPS), "{eye}");
    }

    #[test]
    fn eye_at_quarter_turn() {
        let eye = OrbitCamera::default().eye(FRAC_PI_2);
        assert!(eye.abs_diff_eq(Vec3::new(0.0, 8.0, 20.0), EPS), "{eye}");
    }

    #[test]
    fn view_maps_origin_onto_forward_axis() {
        let cam = OrbitCamera::default();
        for angle in [0.0, 0.7, FRAC_PI_2, 3.0] {
            let view = cam.view(angle);
            let origin = view.transform_point3(Vec3::ZERO);
            let dist = cam.eye(angle).length();
            // Right-handed view space looks down -Z.
            assert!(
                origin.abs_diff_eq(Vec3::new(0.0, 0.0, -dist), EPS),
                "angle {angle}: {origin}"
            );
        }
    }

    #[test]
    fn view_places_eye_at_view_origin() {
        let cam = OrbitCamera::default();
        let eye = cam.eye(1.1);
        let v = cam.view(1.1).transform_point3(eye);
        assert!(v.abs_diff_eq(Vec3::ZERO, EPS), "{v}");
    }
}
