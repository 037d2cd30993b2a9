//! RTS demo engine crate.
//!
//! Static meshes drawn through a linked shader program from an orbiting
//! camera, on top of a winit + wgpu runtime with explicit surface lifecycle
//! hooks.

pub mod camera;
pub mod color;
pub mod config;
pub mod core;
pub mod device;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod render;
pub mod renderer;
pub mod scene;
pub mod shader;
pub mod time;
pub mod window;

pub use renderer::SceneRenderer;
