use glam::{Mat4, Vec4};

/// Off-axis perspective volume.
///
/// Extents are on the near plane. [`Frustum::matrix`] produces a right-handed
/// projection with zero-to-one clip depth (wgpu convention).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Frustum {
    /// Symmetric frustum for a surface of `width × height` pixels.
    ///
    /// The vertical half-extent is `half_height`; the horizontal one is
    /// `half_height · width / height`. Returns `None` for an empty surface.
    pub fn for_surface(width: u32, height: u32, half_height: f32, near: f32, far: f32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let aspect = width as f32 / height as f32;
        let half_width = half_height * aspect;

        Some(Self {
            left: -half_width,
            right: half_width,
            bottom: -half_height,
            top: half_height,
            near,
            far,
        })
    }

    /// Projection matrix for this volume.
    pub fn matrix(&self) -> Mat4 {
        let Self { left: l, right: r, bottom: b, top: t, near: n, far: f } = *self;

        let rw = 1.0 / (r - l);
        let rh = 1.0 / (t - b);
        let rd = 1.0 / (f - n);

        Mat4::from_cols(
            Vec4::new(2.0 * n * rw, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 * n * rh, 0.0, 0.0),
            Vec4::new((r + l) * rw, (t + b) * rh, -f * rd, -1.0),
            Vec4::new(0.0, 0.0, -f * n * rd, 0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    const EPS: f32 = 1e-4;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn extents_for_800x600() {
        let f = Frustum::for_surface(800, 600, 0.5, 1.0, 100.0).unwrap();
        assert!(approx(f.left, -0.6667), "{f:?}");
        assert!(approx(f.right, 0.6667), "{f:?}");
        assert!(approx(f.bottom, -0.5));
        assert!(approx(f.top, 0.5));
        assert_eq!(f.near, 1.0);
        assert_eq!(f.far, 100.0);
    }

    #[test]
    fn empty_surface_has_no_frustum() {
        assert!(Frustum::for_surface(0, 600, 0.5, 1.0, 100.0).is_none());
        assert!(Frustum::for_surface(800, 0, 0.5, 1.0, 100.0).is_none());
    }

    #[test]
    fn symmetric_frustum_matches_perspective() {
        let f = Frustum::for_surface(800, 600, 0.5, 1.0, 100.0).unwrap();
        // tan(fov/2) = half_height / near
        let fov_y = 2.0 * (0.5_f32 / 1.0).atan();
        let expected = Mat4::perspective_rh(fov_y, 800.0 / 600.0, 1.0, 100.0);
        assert!(f.matrix().abs_diff_eq(expected, 1e-5), "{:?}", f.matrix());
    }

    #[test]
    fn near_and_far_map_to_depth_range() {
        let m = Frustum::for_surface(640, 480, 0.5, 1.0, 100.0).unwrap().matrix();
        let near = m.project_point3(Vec3::new(0.0, 0.0, -1.0));
        let far = m.project_point3(Vec3::new(0.0, 0.0, -100.0));
        assert!(approx(near.z, 0.0), "{near}");
        assert!(approx(far.z, 1.0), "{far}");
    }

    #[test]
    fn near_plane_corner_maps_to_clip_corner() {
        let f = Frustum::for_surface(1000, 500, 0.5, 1.0, 100.0).unwrap();
        let p = f.matrix().project_point3(Vec3::new(f.right, f.top, -f.near));
        assert!(approx(p.x, 1.0) && approx(p.y, 1.0), "{p}");
    }
}
