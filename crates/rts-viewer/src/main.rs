mod controller;

use std::sync::Arc;

use anyhow::Result;

use rts_engine::camera::CameraControl;
use rts_engine::config::RendererConfig;
use rts_engine::core::{App, AppControl, FrameCtx};
use rts_engine::device::GpuInit;
use rts_engine::input::Key;
use rts_engine::logging::{init_logging, LoggingConfig};
use rts_engine::render::RenderCtx;
use rts_engine::window::{Runtime, RuntimeConfig};
use rts_engine::SceneRenderer;

use controller::OrbitController;

/// Scene renderer plus the input that steers its camera.
struct ViewerApp {
    renderer: SceneRenderer,
    camera: Arc<CameraControl>,
    controller: OrbitController,
}

impl App for ViewerApp {
    fn on_surface_created(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        self.renderer.on_surface_created(ctx)
    }

    fn on_surface_changed(&mut self, ctx: &RenderCtx<'_>, width: u32, height: u32) {
        self.renderer.on_surface_changed(ctx, width, height);
    }

    fn on_draw_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.keys_pressed.contains(&Key::Escape) {
            return AppControl::Exit;
        }

        self.controller
            .update(&self.camera, ctx.input, ctx.input_frame, ctx.time.dt);

        self.renderer.on_draw_frame(ctx)
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let camera = Arc::new(CameraControl::new(0.0, 0.0));
    let app = ViewerApp {
        renderer: SceneRenderer::new(RendererConfig::default(), Arc::clone(&camera)),
        camera,
        controller: OrbitController::default(),
    };

    log::info!("drag or use the arrow keys to orbit; R resets, Esc quits");
    Runtime::run(RuntimeConfig::default(), GpuInit::default(), app)
}
