//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain) and its depth target
//! - collecting device errors for `GraphicsErrorCheck`
//! - acquiring frames and providing encoders/views for rendering

mod depth;
mod diagnostics;
mod frame;
mod gpu;
mod init;
mod surface;

pub use depth::DepthTarget;
pub use diagnostics::{ErrorSink, GraphicsErrorCheck};
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
