//! The demo renderer: surface lifecycle hooks over the standard scene.

use std::sync::Arc;

use anyhow::Result;

use crate::camera::CameraControl;
use crate::config::RendererConfig;
use crate::core::{App, AppControl, FrameCtx};
use crate::error::GraphicsError;
use crate::render::{GpuScene, RenderCtx};
use crate::scene::{standard_scene, DrawableSet, FrameComposer};

/// Draws the tree and the ships from the shared camera angle.
///
/// CPU state (drawables, composer) survives surface loss; GPU state is
/// dropped and rebuilt by every `on_surface_created`.
pub struct SceneRenderer {
    config: RendererConfig,
    camera: Arc<CameraControl>,
    drawables: DrawableSet,
    composer: FrameComposer,
    gpu: Option<GpuScene>,
}

impl SceneRenderer {
    pub fn new(config: RendererConfig, camera: Arc<CameraControl>) -> Self {
        let composer = FrameComposer::new(&config.scene);
        Self {
            config,
            camera,
            drawables: DrawableSet::new(),
            composer,
            gpu: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    #[inline]
    pub fn camera(&self) -> &Arc<CameraControl> {
        &self.camera
    }

    #[inline]
    pub fn composer(&self) -> &FrameComposer {
        &self.composer
    }

    #[inline]
    pub fn drawables(&self) -> &DrawableSet {
        &self.drawables
    }

    /// Whether GPU resources exist for the current surface.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.gpu.is_some()
    }

    /// Rebuilds the CPU side of the scene: meshes, program and placements.
    pub fn prepare(&mut self) -> Result<(), GraphicsError> {
        let scene = standard_scene(&self.config.scene)?;
        self.drawables = scene.drawables;
        self.composer.set_placements(scene.placements);
        Ok(())
    }
}

impl App for SceneRenderer {
    fn on_surface_created(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        // Resources of a previous surface belong to a dead device.
        self.gpu = None;

        let built = self
            .prepare()
            .and_then(|()| GpuScene::new(ctx, &self.drawables));
        let scene = self.config.error_policy.apply(built)?;

        log::info!(
            "scene built: {} drawable(s), {} pipeline(s)",
            scene.drawable_count(),
            scene.program_count()
        );
        self.gpu = Some(scene);
        Ok(())
    }

    fn on_surface_changed(&mut self, _ctx: &RenderCtx<'_>, width: u32, height: u32) {
        if self.composer.resize(width, height) {
            log::info!("viewport {width}x{height}, frustum {:?}", self.composer.frustum());
        } else {
            log::debug!("ignoring empty surface {width}x{height}");
        }
    }

    fn on_draw_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(scene) = self.gpu.as_mut() else {
            return AppControl::Continue;
        };

        let list = self.composer.compose(&self.camera);
        let scene_config = &self.config.scene;

        let result = ctx.render(
            scene_config.clear_color,
            scene_config.clear_depth,
            |rctx, target| scene.execute(rctx, target, list),
        );

        match self.config.error_policy.apply(result) {
            Ok(control) => control,
            Err(e) => {
                log::error!("frame {} failed: {e}", ctx.time.frame_index);
                AppControl::Exit
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraControl;

    fn renderer() -> SceneRenderer {
        SceneRenderer::new(RendererConfig::default(), Arc::new(CameraControl::new(0.0, 0.0)))
    }

    #[test]
    fn prepare_builds_standard_scene() {
        let mut r = renderer();
        assert!(r.drawables().is_empty());

        r.prepare().unwrap();
        assert_eq!(r.drawables().len(), 2);
        assert_eq!(r.composer().placements().len(), 3);
        assert!(!r.is_ready());
    }

    #[test]
    fn prepare_is_idempotent() {
        let mut r = renderer();
        r.prepare().unwrap();
        r.prepare().unwrap();
        assert_eq!(r.drawables().len(), 2);
        assert_eq!(r.composer().placements().len(), 3);
    }

    #[test]
    fn camera_is_shared_with_caller() {
        let camera = Arc::new(CameraControl::new(0.0, 0.0));
        let r = SceneRenderer::new(RendererConfig::default(), Arc::clone(&camera));

        camera.set_rotation_y(1.25);
        assert_eq!(r.camera().rotation_y(), 1.25);
    }
}
