use std::sync::Arc;

use crate::error::GraphicsError;
use crate::scene::{DrawList, DrawableSet};
use crate::shader::ShaderProgram;

use super::{GpuDrawable, GpuMesh, GpuProgram, RenderCtx, RenderTarget, UniformArena};

/// GPU resources for a [`DrawableSet`] and the executor for its draw lists.
///
/// Drawables sharing one `Arc<ShaderProgram>` share one pipeline. Everything
/// is released when the scene is dropped.
pub struct GpuScene {
    programs: Vec<GpuProgram>,
    drawables: Vec<GpuDrawable>,
    uniforms: UniformArena,
}

impl GpuScene {
    /// Uploads every drawable and builds its pipeline.
    ///
    /// Device errors raised while creating resources are reported through
    /// `ctx.errors` as a single check.
    pub fn new(ctx: &RenderCtx<'_>, set: &DrawableSet) -> Result<Self, GraphicsError> {
        let uniforms = UniformArena::new(ctx);
        let mut sources: Vec<Arc<ShaderProgram>> = Vec::new();
        let mut programs = Vec::new();
        let mut drawables = Vec::with_capacity(set.len());

        for (id, drawable) in set.iter() {
            debug_assert_eq!(id.0, drawables.len());

            let program = match sources.iter().position(|p| Arc::ptr_eq(p, drawable.program())) {
                Some(index) => index,
                None => {
                    programs.push(GpuProgram::new(ctx, drawable.program(), &uniforms)?);
                    sources.push(Arc::clone(drawable.program()));
                    programs.len() - 1
                }
            };

            let mesh = GpuMesh::new(ctx, drawable.name(), drawable.mesh());
            drawables.push(GpuDrawable::new(
                drawable.name(),
                program,
                mesh,
                drawable.color(),
            ));
        }

        ctx.errors.check("create scene resources")?;

        log::info!(
            "gpu scene ready: {} drawable(s), {} pipeline(s)",
            drawables.len(),
            programs.len()
        );

        Ok(Self {
            programs,
            drawables,
            uniforms,
        })
    }

    #[inline]
    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    #[inline]
    pub fn drawable_count(&self) -> usize {
        self.drawables.len()
    }

    /// Records `list` into `target` in list order.
    ///
    /// Color and depth are loaded, not cleared; the caller clears them first.
    pub fn execute(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        list: &DrawList,
    ) -> Result<(), GraphicsError> {
        if list.is_empty() {
            return Ok(());
        }

        if self.uniforms.ensure_capacity(ctx, list.len())? {
            for program in &mut self.programs {
                program.rebind_uniforms(ctx, &self.uniforms);
            }
        }

        // One slot per command; unknown drawables keep an unused slot.
        let mut offsets = Vec::with_capacity(list.len());
        for (slot, cmd) in list.iter().enumerate() {
            let offset = match self.drawables.get(cmd.drawable.0) {
                Some(drawable) => self.uniforms.write(ctx.queue, slot, cmd.mvp, drawable.color())?,
                None => 0,
            };
            offsets.push(offset);
        }

        let mut pass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("rts scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for (cmd, &offset) in list.iter().zip(&offsets) {
            let Some(drawable) = self.drawables.get(cmd.drawable.0) else {
                log::warn!("draw list references unknown drawable {:?}", cmd.drawable);
                continue;
            };
            let program = &self.programs[drawable.program_index()];
            drawable.draw(&mut pass, program, &program.dynamic_offsets(offset));
        }

        log::trace!("recorded {} draw(s)", list.len());
        Ok(())
    }
}
