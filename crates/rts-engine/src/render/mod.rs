//! GPU rendering subsystem.
//!
//! Consumes `scene` draw lists and issues GPU commands via wgpu.
//! `GpuScene` owns every GPU resource it creates (pipelines, buffers, bind
//! groups); dropping it releases them.
//!
//! Convention:
//! - meshes are in model space, transformed by a per-draw MVP uniform;
//! - depth uses the zero-to-one clip range, compared with `Less`.

mod ctx;
mod drawable;
mod mesh;
mod program;
mod scene;
mod uniforms;

pub use ctx::{RenderCtx, RenderTarget};
pub use drawable::GpuDrawable;
pub use mesh::GpuMesh;
pub use program::GpuProgram;
pub use scene::GpuScene;
pub use uniforms::{ColorUniform, MvpUniform, UniformArena};
