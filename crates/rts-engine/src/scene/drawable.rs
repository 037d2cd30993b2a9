use std::sync::Arc;

use crate::color::Color;
use crate::geometry::StaticMesh;
use crate::shader::ShaderProgram;

/// Index of a drawable inside its [`DrawableSet`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct DrawableId(pub usize);

/// A static mesh drawn with one program and one constant color.
///
/// Immutable after construction. Meshes and programs are shared by `Arc`,
/// so several drawables may reuse the same linked program.
#[derive(Debug, Clone)]
pub struct Drawable {
    name: String,
    mesh: Arc<StaticMesh>,
    program: Arc<ShaderProgram>,
    color: Color,
}

impl Drawable {
    pub fn new(
        name: impl Into<String>,
        mesh: Arc<StaticMesh>,
        program: Arc<ShaderProgram>,
        color: Color,
    ) -> Self {
        Self {
            name: name.into(),
            mesh,
            program,
            color,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn mesh(&self) -> &Arc<StaticMesh> {
        &self.mesh
    }

    #[inline]
    pub fn program(&self) -> &Arc<ShaderProgram> {
        &self.program
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }
}

/// Flat, append-only collection of drawables.
#[derive(Debug, Default, Clone)]
pub struct DrawableSet {
    items: Vec<Drawable>,
}

impl DrawableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, drawable: Drawable) -> DrawableId {
        let id = DrawableId(self.items.len());
        self.items.push(drawable);
        id
    }

    #[inline]
    pub fn get(&self, id: DrawableId) -> Option<&Drawable> {
        self.items.get(id.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DrawableId, &Drawable)> {
        self.items.iter().enumerate().map(|(i, d)| (DrawableId(i), d))
    }
}
