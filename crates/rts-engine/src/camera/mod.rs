//! Camera state and projection.
//!
//! `CameraControl` is the only state shared with other threads; everything
//! else is owned by the render loop.

mod control;
mod orbit;
mod projection;

pub use control::{AngleCell, CameraControl};
pub use orbit::OrbitCamera;
pub use projection::Frustum;
