//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - hold the CPU-side drawables (mesh + program + color)
//! - compose per-frame transforms into renderer-agnostic draw commands
//!
//! Nothing here touches the GPU; `render` consumes the draw list.

mod cmd;
mod composer;
mod drawable;
mod list;
mod standard;

pub use cmd::DrawCmd;
pub use composer::{FrameComposer, Placement};
pub use drawable::{Drawable, DrawableId, DrawableSet};
pub use list::DrawList;
pub use standard::{standard_scene, StandardScene};
