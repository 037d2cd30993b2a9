//! Shader programs.
//!
//! A program is two WGSL stage sources compiled and linked on the CPU with
//! `naga` before any GPU pipeline exists. Linking also reflects the named
//! interface (`vPosition`, `vColor`, `uMVPMatrix`) so renderers never look
//! names up per draw.

mod program;
mod source;

pub use program::{ProgramInterface, ShaderProgram, UniformBinding};
pub use source::ShaderSource;

/// Vertex attribute carrying the model-space position.
pub const POSITION_ATTRIBUTE: &str = "vPosition";

/// Uniform holding the constant RGBA color.
pub const COLOR_UNIFORM: &str = "vColor";

/// Uniform holding the combined model-view-projection matrix.
pub const MVP_UNIFORM: &str = "uMVPMatrix";
