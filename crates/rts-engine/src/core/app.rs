use winit::event::WindowEvent;

use crate::render::RenderCtx;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Surface lifecycle contract implemented by renderers.
///
/// The runtime calls the hooks sequentially on its own thread, always in
/// `created -> changed -> draw*` order. `on_surface_created` runs again
/// whenever the surface is recreated (e.g. after a suspend/resume cycle);
/// every GPU resource from the previous surface is gone by then.
pub trait App {
    /// A new surface and device exist; (re)create all GPU resources.
    fn on_surface_created(&mut self, ctx: &RenderCtx<'_>) -> anyhow::Result<()>;

    /// The surface has a new non-empty size in physical pixels.
    fn on_surface_changed(&mut self, ctx: &RenderCtx<'_>, width: u32, height: u32);

    /// Called for window events before the runtime handles them.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per redraw.
    fn on_draw_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
