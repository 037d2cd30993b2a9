use crate::render::RenderTarget;

/// One acquired swapchain image and the encoder recording into it.
///
/// Short-lived: the next image cannot be acquired while this one is held.
/// [`Gpu::submit`](super::Gpu::submit) consumes it and presents.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl GpuFrame {
    /// Borrows the frame as a draw target sharing `depth_view`.
    pub fn target<'a>(&'a mut self, depth_view: &'a wgpu::TextureView) -> RenderTarget<'a> {
        RenderTarget::new(&mut self.encoder, &self.view, depth_view)
    }
}
