use glam::Mat4;

use super::DrawableId;

/// One indexed draw of a drawable with a fully composed transform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCmd {
    pub drawable: DrawableId,
    /// Model-view-projection matrix uploaded as `uMVPMatrix`.
    pub mvp: Mat4,
}

impl DrawCmd {
    #[inline]
    pub const fn new(drawable: DrawableId, mvp: Mat4) -> Self {
        Self { drawable, mvp }
    }
}
