use naga::valid::{Capabilities, ValidationFlags, Validator};

use crate::error::{GraphicsError, ShaderStage};

use super::{ShaderSource, COLOR_UNIFORM, MVP_UNIFORM, POSITION_ATTRIBUTE};

/// Bind location of a uniform.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UniformBinding {
    pub group: u32,
    pub binding: u32,
}

/// Locations resolved by name at link time.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ProgramInterface {
    /// `@location` of the `vPosition` vertex input.
    pub position_location: u32,
    /// Binding of the `vColor` uniform.
    pub color: UniformBinding,
    /// Binding of the `uMVPMatrix` uniform.
    pub mvp: UniformBinding,
}

/// A compiled and linked vertex + fragment pair.
///
/// Both stages are known-valid WGSL and agree on their inter-stage interface.
#[derive(Debug, Clone)]
pub struct ShaderProgram {
    label: String,
    vertex: ShaderSource,
    fragment: ShaderSource,
    interface: ProgramInterface,
}

impl ShaderProgram {
    /// Compiles both stages and links them.
    ///
    /// Compile status is checked per stage, link status once; the compiler or
    /// linker diagnostic becomes the error detail.
    pub fn link(
        label: impl Into<String>,
        vertex: &ShaderSource,
        fragment: &ShaderSource,
    ) -> Result<Self, GraphicsError> {
        let label = label.into();

        let vs = compile(&label, vertex, ShaderStage::Vertex)?;
        let fs = compile(&label, fragment, ShaderStage::Fragment)?;

        let interface = link_stages(&vs, vertex, &fs, fragment).map_err(|log| {
            GraphicsError::ProgramLink {
                label: label.clone(),
                log,
            }
        })?;

        log::debug!("linked shader program '{label}': {interface:?}");

        Ok(Self {
            label,
            vertex: vertex.clone(),
            fragment: fragment.clone(),
            interface,
        })
    }

    /// Links the built-in pass-through / position-color pair.
    pub fn passthrough(label: impl Into<String>) -> Result<Self, GraphicsError> {
        Self::link(
            label,
            &ShaderSource::passthrough_vertex(),
            &ShaderSource::position_color_fragment(),
        )
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn vertex(&self) -> &ShaderSource {
        &self.vertex
    }

    #[inline]
    pub fn fragment(&self) -> &ShaderSource {
        &self.fragment
    }

    #[inline]
    pub fn interface(&self) -> ProgramInterface {
        self.interface
    }
}

fn compile(
    label: &str,
    source: &ShaderSource,
    expected: ShaderStage,
) -> Result<naga::Module, GraphicsError> {
    let fail = |log: String| GraphicsError::ShaderCompile {
        label: label.to_string(),
        stage: expected,
        log,
    };

    if source.stage != expected {
        return Err(fail(format!(
            "expected {expected} stage source, got {} stage",
            source.stage
        )));
    }

    let module = naga::front::wgsl::parse_str(&source.code)
        .map_err(|e| fail(e.emit_to_string(&source.code)))?;

    Validator::new(ValidationFlags::all(), Capabilities::default())
        .validate(&module)
        .map_err(|e| fail(e.emit_to_string(&source.code)))?;

    Ok(module)
}

fn link_stages(
    vs: &naga::Module,
    vertex: &ShaderSource,
    fs: &naga::Module,
    fragment: &ShaderSource,
) -> Result<ProgramInterface, String> {
    let vs_entry = entry_point(vs, vertex)?;
    let fs_entry = entry_point(fs, fragment)?;

    // Every fragment input must be written by the vertex stage.
    let mut outputs = Vec::new();
    if let Some(result) = &vs_entry.function.result {
        collect_locations(vs, result.ty, result.binding.as_ref(), &mut outputs);
    }
    let mut inputs = Vec::new();
    for arg in &fs_entry.function.arguments {
        collect_locations(fs, arg.ty, arg.binding.as_ref(), &mut inputs);
    }
    if let Some(missing) = inputs.iter().find(|loc| !outputs.contains(loc)) {
        return Err(format!(
            "fragment input @location({missing}) is not written by vertex entry point '{}'",
            vertex.entry_point
        ));
    }

    let position_location = find_input_location(vs, &vs_entry.function.arguments, POSITION_ATTRIBUTE)
        .ok_or_else(|| format!("vertex attribute '{POSITION_ATTRIBUTE}' not found"))?;

    let color = find_uniform(&[vs, fs], COLOR_UNIFORM)?;
    let mvp = find_uniform(&[vs, fs], MVP_UNIFORM)?;

    if color.group != mvp.group {
        return Err(format!(
            "'{COLOR_UNIFORM}' and '{MVP_UNIFORM}' must share a bind group (got {} and {})",
            color.group, mvp.group
        ));
    }
    if color.binding == mvp.binding {
        return Err(format!(
            "'{COLOR_UNIFORM}' and '{MVP_UNIFORM}' share binding {}",
            color.binding
        ));
    }

    Ok(ProgramInterface {
        position_location,
        color,
        mvp,
    })
}

fn entry_point<'m>(
    module: &'m naga::Module,
    source: &ShaderSource,
) -> Result<&'m naga::EntryPoint, String> {
    let stage = match source.stage {
        ShaderStage::Vertex => naga::ShaderStage::Vertex,
        ShaderStage::Fragment => naga::ShaderStage::Fragment,
    };

    module
        .entry_points
        .iter()
        .find(|ep| ep.name == source.entry_point && ep.stage == stage)
        .ok_or_else(|| {
            format!(
                "no {} entry point named '{}'",
                source.stage, source.entry_point
            )
        })
}

/// Flattens user-defined `@location`s of a value, descending into structs.
fn collect_locations(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut Vec<u32>,
) {
    match binding {
        Some(naga::Binding::Location { location, .. }) => out.push(*location),
        Some(naga::Binding::BuiltIn(_)) => {}
        None => {
            if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for m in members {
                    collect_locations(module, m.ty, m.binding.as_ref(), out);
                }
            }
        }
    }
}

fn find_input_location(
    module: &naga::Module,
    arguments: &[naga::FunctionArgument],
    name: &str,
) -> Option<u32> {
    arguments.iter().find_map(|arg| match &arg.binding {
        Some(naga::Binding::Location { location, .. }) if arg.name.as_deref() == Some(name) => {
            Some(*location)
        }
        Some(_) => None,
        None => match &module.types[arg.ty].inner {
            naga::TypeInner::Struct { members, .. } => members.iter().find_map(|m| {
                match &m.binding {
                    Some(naga::Binding::Location { location, .. })
                        if m.name.as_deref() == Some(name) =>
                    {
                        Some(*location)
                    }
                    _ => None,
                }
            }),
            _ => None,
        },
    })
}

fn find_uniform(modules: &[&naga::Module], name: &str) -> Result<UniformBinding, String> {
    let mut found: Option<UniformBinding> = None;

    for module in modules {
        for (_, var) in module.global_variables.iter() {
            if var.name.as_deref() != Some(name) || var.space != naga::AddressSpace::Uniform {
                continue;
            }
            let Some(rb) = &var.binding else { continue };
            let b = UniformBinding {
                group: rb.group,
                binding: rb.binding,
            };
            match found {
                Some(prev) if prev != b => {
                    return Err(format!(
                        "uniform '{name}' declared with conflicting bindings {prev:?} and {b:?}"
                    ));
                }
                _ => found = Some(b),
            }
        }
    }

    found.ok_or_else(|| format!("uniform '{name}' not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VS_NO_POSITION: &str = r#"
@group(0) @binding(0) var<uniform> uMVPMatrix: mat4x4<f32>;
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) pos: vec4<f32>,
};
@vertex
fn vs_main(@location(0) corner: vec3<f32>) -> VertexOutput {
    var out: VertexOutput;
    out.pos = vec4<f32>(corner, 1.0);
    out.clip_position = uMVPMatrix * out.pos;
    return out;
}
"#;

    const FS_READS_LOCATION_1: &str = r#"
@group(0) @binding(1) var<uniform> vColor: vec4<f32>;
@fragment
fn fs_main(@location(1) tint: vec4<f32>) -> @location(0) vec4<f32> {
    return tint;
}
"#;

    const FS_WITHOUT_COLOR: &str = r#"
@fragment
fn fs_main(@location(0) pos: vec4<f32>) -> @location(0) vec4<f32> {
    return pos;
}
"#;

    #[test]
    fn builtin_program_links_and_reflects_names() {
        let program = ShaderProgram::passthrough("ship").unwrap();
        let iface = program.interface();
        assert_eq!(iface.position_location, 0);
        assert_eq!(iface.mvp, UniformBinding { group: 0, binding: 0 });
        assert_eq!(iface.color, UniformBinding { group: 0, binding: 1 });
        assert_eq!(program.label(), "ship");
    }

    #[test]
    fn syntax_error_fails_compile_with_log() {
        let bad = ShaderSource::vertex("vs_main", "fn vs_main( -> {");
        let err = ShaderProgram::link("bad", &bad, &ShaderSource::position_color_fragment())
            .unwrap_err();
        match err {
            GraphicsError::ShaderCompile { stage, log, .. } => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert!(!log.is_empty());
            }
            other => panic!("expected compile error, got {other:?}"),
        }
    }

    #[test]
    fn type_error_fails_fragment_compile() {
        let bad = ShaderSource::fragment(
            "fs_main",
            "@fragment fn fs_main() -> @location(0) vec4<f32> { return 1.0; }",
        );
        let err = ShaderProgram::link("bad", &ShaderSource::passthrough_vertex(), &bad)
            .unwrap_err();
        assert!(matches!(
            err,
            GraphicsError::ShaderCompile { stage: ShaderStage::Fragment, .. }
        ));
    }

    #[test]
    fn stage_mismatch_is_a_compile_error() {
        let vs = ShaderSource::passthrough_vertex();
        let err = ShaderProgram::link("swapped", &vs, &vs).unwrap_err();
        assert!(matches!(
            err,
            GraphicsError::ShaderCompile { stage: ShaderStage::Fragment, .. }
        ));
    }

    #[test]
    fn missing_entry_point_fails_link() {
        let fs = ShaderSource::fragment(
            "main",
            include_str!("shaders/position_color.frag.wgsl"),
        );
        let err = ShaderProgram::link("p", &ShaderSource::passthrough_vertex(), &fs).unwrap_err();
        match err {
            GraphicsError::ProgramLink { log, .. } => assert!(log.contains("'main'")),
            other => panic!("expected link error, got {other:?}"),
        }
    }

    #[test]
    fn unmatched_varying_fails_link() {
        let fs = ShaderSource::fragment("fs_main", FS_READS_LOCATION_1);
        let err = ShaderProgram::link("p", &ShaderSource::passthrough_vertex(), &fs).unwrap_err();
        match err {
            GraphicsError::ProgramLink { log, .. } => assert!(log.contains("@location(1)")),
            other => panic!("expected link error, got {other:?}"),
        }
    }

    #[test]
    fn missing_position_attribute_fails_link() {
        let vs = ShaderSource::vertex("vs_main", VS_NO_POSITION);
        let err = ShaderProgram::link("p", &vs, &ShaderSource::position_color_fragment())
            .unwrap_err();
        match err {
            GraphicsError::ProgramLink { log, .. } => assert!(log.contains("vPosition")),
            other => panic!("expected link error, got {other:?}"),
        }
    }

    #[test]
    fn missing_color_uniform_fails_link() {
        let fs = ShaderSource::fragment("fs_main", FS_WITHOUT_COLOR);
        let err = ShaderProgram::link("p", &ShaderSource::passthrough_vertex(), &fs).unwrap_err();
        match err {
            GraphicsError::ProgramLink { log, .. } => assert!(log.contains("vColor")),
            other => panic!("expected link error, got {other:?}"),
        }
    }
}
