use crate::error::ShaderStage;

/// WGSL source for one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub stage: ShaderStage,
    pub entry_point: String,
    pub code: String,
}

impl ShaderSource {
    pub fn new(stage: ShaderStage, entry_point: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            stage,
            entry_point: entry_point.into(),
            code: code.into(),
        }
    }

    pub fn vertex(entry_point: impl Into<String>, code: impl Into<String>) -> Self {
        Self::new(ShaderStage::Vertex, entry_point, code)
    }

    pub fn fragment(entry_point: impl Into<String>, code: impl Into<String>) -> Self {
        Self::new(ShaderStage::Fragment, entry_point, code)
    }

    /// Pass-through transform vertex stage.
    pub fn passthrough_vertex() -> Self {
        Self::vertex("vs_main", include_str!("shaders/passthrough.vert.wgsl"))
    }

    /// Position-as-color fragment stage.
    pub fn position_color_fragment() -> Self {
        Self::fragment("fs_main", include_str!("shaders/position_color.frag.wgsl"))
    }
}
