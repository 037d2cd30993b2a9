use crate::color::Color;

use super::{GpuMesh, GpuProgram};

/// A mesh bound to a program and a fill color, ready to draw.
pub struct GpuDrawable {
    name: String,
    program: usize,
    mesh: GpuMesh,
    color: Color,
}

impl GpuDrawable {
    pub fn new(name: impl Into<String>, program: usize, mesh: GpuMesh, color: Color) -> Self {
        Self {
            name: name.into(),
            program,
            mesh,
            color,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index of this drawable's program in the owning scene.
    #[inline]
    pub fn program_index(&self) -> usize {
        self.program
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn mesh(&self) -> &GpuMesh {
        &self.mesh
    }

    /// Records one indexed draw of the whole mesh.
    ///
    /// Binds everything it uses; nothing is assumed about earlier pass state.
    /// The MVP and color for this draw must already be written at `offsets`.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, program: &GpuProgram, offsets: &[u32]) {
        pass.set_pipeline(program.pipeline());
        pass.set_bind_group(0, program.bind_group(), offsets);
        pass.set_vertex_buffer(0, self.mesh.vertex_buffer().slice(..));
        pass.set_index_buffer(self.mesh.index_buffer().slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.mesh.index_count(), 0, 0..1);
    }
}
