use glam::{Mat4, Vec3};

use crate::camera::{CameraControl, Frustum, OrbitCamera};
use crate::config::SceneConfig;

use super::{DrawList, DrawableId};

/// Where a drawable instance sits in the world.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Placement {
    pub drawable: DrawableId,
    /// `None` draws with the bare view-projection.
    pub translation: Option<Vec3>,
}

impl Placement {
    #[inline]
    pub const fn at_origin(drawable: DrawableId) -> Self {
        Self { drawable, translation: None }
    }

    #[inline]
    pub const fn translated(drawable: DrawableId, offset: Vec3) -> Self {
        Self { drawable, translation: Some(offset) }
    }
}

/// Per-frame transform composition.
///
/// Owns the projection (updated on resize) and the view (updated every
/// frame), and turns the placement list into a [`DrawList`].
#[derive(Debug)]
pub struct FrameComposer {
    camera: OrbitCamera,
    half_height: f32,
    near: f32,
    far: f32,

    frustum: Option<Frustum>,
    projection: Mat4,
    view: Mat4,

    placements: Vec<Placement>,
    draw_list: DrawList,
}

impl FrameComposer {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            camera: OrbitCamera::new(config.camera_distance, config.camera_height),
            half_height: config.frustum_half_height,
            near: config.near,
            far: config.far,
            frustum: None,
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            placements: Vec::new(),
            draw_list: DrawList::new(),
        }
    }

    /// Replaces the instances drawn each frame.
    pub fn set_placements(&mut self, placements: Vec<Placement>) {
        self.placements = placements;
    }

    #[inline]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Recomputes the projection for a new surface size.
    ///
    /// Returns `false` (projection unchanged) for an empty surface.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let Some(frustum) =
            Frustum::for_surface(width, height, self.half_height, self.near, self.far)
        else {
            return false;
        };

        self.projection = frustum.matrix();
        self.frustum = Some(frustum);
        true
    }

    /// Current projection volume; `None` until the first non-empty resize.
    #[inline]
    pub fn frustum(&self) -> Option<Frustum> {
        self.frustum
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// View matrix of the most recent [`compose`](Self::compose).
    #[inline]
    pub fn view(&self) -> Mat4 {
        self.view
    }

    #[inline]
    pub fn camera(&self) -> OrbitCamera {
        self.camera
    }

    /// Builds this frame's draw list from the current camera angle.
    pub fn compose(&mut self, control: &CameraControl) -> &DrawList {
        self.view = self.camera.view(control.rotation_y());
        let view_projection = self.projection * self.view;

        self.draw_list.clear();
        for p in &self.placements {
            let mvp = match p.translation {
                None => view_projection,
                Some(offset) => {
                    let model_view = self.view * Mat4::from_translation(offset);
                    self.projection * model_view
                }
            };
            self.draw_list.push(p.drawable, mvp);
        }

        log::trace!("composed {} draw(s)", self.draw_list.len());
        &self.draw_list
    }

    #[inline]
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::scene::standard_scene;

    fn composer_800x600() -> (FrameComposer, crate::scene::StandardScene) {
        let config = SceneConfig::default();
        let scene = standard_scene(&config).unwrap();
        let mut composer = FrameComposer::new(&config);
        composer.set_placements(scene.placements.clone());
        assert!(composer.resize(800, 600));
        (composer, scene)
    }

    #[test]
    fn one_frame_is_three_draws() {
        let (mut composer, scene) = composer_800x600();
        let list = composer.compose(&CameraControl::default());

        let counts: Vec<usize> = list
            .iter()
            .map(|cmd| scene.drawables.get(cmd.drawable).unwrap().mesh().index_count())
            .collect();
        assert_eq!(counts, vec![132, 18, 18]);

        let ids: Vec<DrawableId> = list.iter().map(|c| c.drawable).collect();
        assert_eq!(ids, vec![scene.tree, scene.ship, scene.ship]);
    }

    #[test]
    fn tree_mvp_is_projection_times_view() {
        let (mut composer, _) = composer_800x600();
        let control = CameraControl::new(0.0, 0.6);
        let list = composer.compose(&control);
        let tree = list.items()[0];

        let proj = Frustum::for_surface(800, 600, 0.5, 1.0, 100.0).unwrap().matrix();
        let view = OrbitCamera::default().view(0.6);
        assert_eq!(tree.mvp, proj * view);
    }

    #[test]
    fn ship_mvps_are_offset_along_z() {
        let (mut composer, _) = composer_800x600();
        let control = CameraControl::new(0.0, FRAC_PI_2);
        let items = composer.compose(&control).items().to_vec();

        let proj = composer.projection();
        let view = composer.view();
        let plus = proj * (view * Mat4::from_translation(Vec3::new(0.0, 0.0, 4.0)));
        let minus = proj * (view * Mat4::from_translation(Vec3::new(0.0, 0.0, -4.0)));

        assert_eq!(items[1].mvp, plus);
        assert_eq!(items[2].mvp, minus);
        assert!(items[1].mvp.abs_diff_eq(items[0].mvp * Mat4::from_translation(Vec3::Z * 4.0), 1e-4));
    }

    #[test]
    fn rotation_x_does_not_affect_frame() {
        let (mut composer, _) = composer_800x600();
        let a = composer.compose(&CameraControl::new(0.0, 1.0)).items().to_vec();
        let b = composer.compose(&CameraControl::new(2.5, 1.0)).items().to_vec();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_resize_keeps_previous_projection() {
        let (mut composer, _) = composer_800x600();
        let before = composer.projection();
        assert!(!composer.resize(0, 600));
        assert_eq!(composer.projection(), before);
        assert!(composer.frustum().is_some());
    }

    #[test]
    fn compose_reuses_list() {
        let (mut composer, _) = composer_800x600();
        let control = CameraControl::default();
        composer.compose(&control);
        composer.compose(&control);
        assert_eq!(composer.draw_list().len(), 3);
    }
}
