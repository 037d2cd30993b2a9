use std::fmt;

/// Shader pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Validation failure while building a [`StaticMesh`](crate::geometry::StaticMesh).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The index array is empty.
    Empty,
    /// The index count is not a multiple of three.
    PartialTriangle { index_count: usize },
    /// An index refers past the end of the position array.
    IndexOutOfRange {
        /// Offset of the offending entry in the index array.
        position: usize,
        index: u16,
        vertex_count: usize,
    },
    /// More vertices than a 16-bit index can address.
    TooManyVertices { vertex_count: usize },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::Empty => f.write_str("mesh has no triangles"),
            MeshError::PartialTriangle { index_count } => {
                write!(f, "index count {index_count} is not a multiple of 3")
            }
            MeshError::IndexOutOfRange { position, index, vertex_count } => write!(
                f,
                "index {index} at position {position} is out of range for {vertex_count} vertices"
            ),
            MeshError::TooManyVertices { vertex_count } => {
                write!(f, "{vertex_count} vertices cannot be addressed by u16 indices")
            }
        }
    }
}

impl std::error::Error for MeshError {}

/// Errors surfaced by the graphics layer.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphicsError {
    /// A shader stage failed to parse or validate.
    ShaderCompile {
        label: String,
        stage: ShaderStage,
        log: String,
    },
    /// Compiled stages could not be combined into a program.
    ProgramLink { label: String, log: String },
    /// The device reported errors since the last check.
    Api {
        operation: String,
        errors: Vec<String>,
    },
    /// Mesh data failed validation.
    Mesh(MeshError),
    /// More draws in one frame than per-draw uniform slots can address.
    UniformCapacity { slots: usize, max_slots: usize },
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphicsError::ShaderCompile { label, stage, log } => {
                write!(f, "{stage} shader of '{label}' failed to compile:\n{log}")
            }
            GraphicsError::ProgramLink { label, log } => {
                write!(f, "program '{label}' failed to link: {log}")
            }
            GraphicsError::Api { operation, errors } => {
                write!(f, "{operation}: {} graphics error(s)", errors.len())?;
                for e in errors {
                    write!(f, "\n  {e}")?;
                }
                Ok(())
            }
            GraphicsError::Mesh(e) => write!(f, "invalid mesh: {e}"),
            GraphicsError::UniformCapacity { slots, max_slots } => {
                write!(f, "{slots} draws exceed the {max_slots} uniform slots available")
            }
        }
    }
}

impl std::error::Error for GraphicsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GraphicsError::Mesh(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MeshError> for GraphicsError {
    fn from(e: MeshError) -> Self {
        GraphicsError::Mesh(e)
    }
}

/// What to do when a graphics check reports an error.
///
/// Decided once per renderer and applied at every check site.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ErrorPolicy {
    /// Log and abort the render thread.
    #[default]
    Abort,
    /// Return the error to the caller.
    Propagate,
}

impl ErrorPolicy {
    /// Applies the policy to a check result.
    ///
    /// # Panics
    /// Panics on `Err` under [`ErrorPolicy::Abort`].
    pub fn apply<T>(self, result: Result<T, GraphicsError>) -> Result<T, GraphicsError> {
        match (self, result) {
            (_, Ok(v)) => Ok(v),
            (ErrorPolicy::Propagate, Err(e)) => Err(e),
            (ErrorPolicy::Abort, Err(e)) => {
                log::error!("fatal graphics error: {e}");
                panic!("fatal graphics error: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn propagate_returns_error() {
        let err = GraphicsError::ProgramLink { label: "p".into(), log: "nope".into() };
        let out: Result<(), _> = ErrorPolicy::Propagate.apply(Err(err.clone()));
        assert_eq!(out, Err(err));
    }

    #[test]
    fn abort_passes_ok_through() {
        assert_eq!(ErrorPolicy::Abort.apply(Ok(7)), Ok(7));
    }

    #[test]
    #[should_panic(expected = "fatal graphics error")]
    fn abort_panics_on_error() {
        let err = GraphicsError::Api { operation: "draw".into(), errors: vec!["boom".into()] };
        let _ = ErrorPolicy::Abort.apply::<()>(Err(err));
    }

    #[test]
    fn api_error_lists_every_code() {
        let err = GraphicsError::Api {
            operation: "create pipeline".into(),
            errors: vec!["first".into(), "second".into()],
        };
        let s = err.to_string();
        assert!(s.starts_with("create pipeline: 2 graphics error(s)"));
        assert!(s.contains("\n  first") && s.contains("\n  second"));
    }
}
