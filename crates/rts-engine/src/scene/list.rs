use glam::Mat4;

use super::{DrawCmd, DrawableId};

/// Recorded draw stream for a frame.
///
/// Commands execute in insertion order. Depth testing makes the final image
/// independent of that order except for exact depth ties.
///
/// `clear()` keeps capacity, so steady-state frames do not allocate.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawCmd>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn push(&mut self, drawable: DrawableId, mvp: Mat4) {
        self.items.push(DrawCmd::new(drawable, mvp));
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &DrawCmd> {
        self.items.iter()
    }
}
