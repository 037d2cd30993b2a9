use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::color::Color;
use crate::error::GraphicsError;

use super::RenderCtx;

/// Column-major model-view-projection matrix, as read by the vertex stage.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MvpUniform {
    pub matrix: [[f32; 4]; 4],
}

impl MvpUniform {
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    #[inline]
    pub fn new(mvp: Mat4) -> Self {
        Self {
            matrix: mvp.to_cols_array_2d(),
        }
    }
}

/// Straight RGBA color uniform.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ColorUniform {
    pub rgba: [f32; 4],
}

impl ColorUniform {
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    #[inline]
    pub fn new(color: Color) -> Self {
        Self {
            rgba: color.to_array(),
        }
    }
}

/// Rounds `size` up to the device's dynamic-offset alignment.
pub(crate) fn slot_stride(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

/// Dynamic offset of `slot`, or `None` when it does not fit a `u32`.
pub(crate) fn slot_offset(slot: usize, stride: u64) -> Option<u32> {
    u64::try_from(slot)
        .ok()
        .and_then(|s| s.checked_mul(stride))
        .and_then(|offset| u32::try_from(offset).ok())
}

/// Most slots a buffer can hold: every offset must fit a `u32` and the whole
/// buffer must fit `max_buffer_size`.
pub(crate) fn max_slots(stride: u64, max_buffer_size: u64) -> usize {
    let stride = stride.max(1);
    let by_offset = u64::from(u32::MAX) / stride + 1;
    let by_size = max_buffer_size / stride;
    usize::try_from(by_offset.min(by_size)).unwrap_or(usize::MAX)
}

/// Capacity to grow to for `slots` draws, or `None` when `current` suffices.
pub(crate) fn grown_capacity(
    current: usize,
    slots: usize,
    max_slots: usize,
) -> Result<Option<usize>, GraphicsError> {
    if slots <= current {
        return Ok(None);
    }
    if slots > max_slots {
        return Err(GraphicsError::UniformCapacity { slots, max_slots });
    }
    Ok(Some(slots.next_power_of_two().min(max_slots)))
}

/// Per-draw uniform storage.
///
/// Two buffers (MVP and color) indexed by the same slot. Each draw in a frame
/// takes one slot and binds it with dynamic offsets, so every draw sees its
/// own values even though all writes land before the single submit.
pub struct UniformArena {
    stride: u64,
    capacity: usize,
    max_slots: usize,
    mvp: wgpu::Buffer,
    color: wgpu::Buffer,
}

impl UniformArena {
    const MIN_SLOTS: usize = 4;

    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let alignment = u64::from(ctx.device.limits().min_uniform_buffer_offset_alignment);
        let stride = slot_stride(MvpUniform::SIZE.max(ColorUniform::SIZE), alignment);
        let max_slots = max_slots(stride, ctx.device.limits().max_buffer_size);
        let capacity = Self::MIN_SLOTS.min(max_slots);
        let (mvp, color) = Self::create_buffers(ctx, stride, capacity);

        Self {
            stride,
            capacity,
            max_slots,
            mvp,
            color,
        }
    }

    #[inline]
    pub fn stride(&self) -> u64 {
        self.stride
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn mvp_buffer(&self) -> &wgpu::Buffer {
        &self.mvp
    }

    #[inline]
    pub fn color_buffer(&self) -> &wgpu::Buffer {
        &self.color
    }

    /// Dynamic offset of `slot`; `None` past the current capacity.
    #[inline]
    pub fn offset(&self, slot: usize) -> Option<u32> {
        if slot >= self.capacity {
            return None;
        }
        slot_offset(slot, self.stride)
    }

    /// Grows the buffers to hold at least `slots` entries.
    ///
    /// Returns `Ok(true)` when the buffers were replaced; bind groups
    /// referencing the old buffers must be rebuilt. Fails when `slots`
    /// exceeds what the device can address.
    pub fn ensure_capacity(&mut self, ctx: &RenderCtx<'_>, slots: usize) -> Result<bool, GraphicsError> {
        let Some(capacity) = grown_capacity(self.capacity, slots, self.max_slots)? else {
            return Ok(false);
        };

        let (mvp, color) = Self::create_buffers(ctx, self.stride, capacity);
        self.mvp = mvp;
        self.color = color;
        self.capacity = capacity;

        log::debug!("uniform arena grown to {capacity} slots");
        Ok(true)
    }

    /// Writes the uniforms of one draw into `slot` and returns its offset.
    pub fn write(
        &self,
        queue: &wgpu::Queue,
        slot: usize,
        mvp: Mat4,
        color: Color,
    ) -> Result<u32, GraphicsError> {
        let dynamic = self.offset(slot).ok_or(GraphicsError::UniformCapacity {
            slots: slot.saturating_add(1),
            max_slots: self.capacity,
        })?;
        let offset = u64::from(dynamic);
        queue.write_buffer(&self.mvp, offset, bytemuck::bytes_of(&MvpUniform::new(mvp)));
        queue.write_buffer(&self.color, offset, bytemuck::bytes_of(&ColorUniform::new(color)));
        Ok(dynamic)
    }

    fn create_buffers(ctx: &RenderCtx<'_>, stride: u64, capacity: usize) -> (wgpu::Buffer, wgpu::Buffer) {
        let size = stride * capacity as u64;
        let create = |label| {
            ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        (create("rts mvp ubo"), create("rts color ubo"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_match_shader_types() {
        assert_eq!(MvpUniform::SIZE, 64);
        assert_eq!(ColorUniform::SIZE, 16);
    }

    #[test]
    fn stride_rounds_up_to_alignment() {
        assert_eq!(slot_stride(64, 256), 256);
        assert_eq!(slot_stride(300, 256), 512);
        assert_eq!(slot_stride(64, 64), 64);
        assert_eq!(slot_stride(16, 0), 16);
    }

    #[test]
    fn offsets_past_u32_are_rejected() {
        assert_eq!(slot_offset(3, 256), Some(768));
        assert_eq!(slot_offset(16_777_215, 256), Some(u32::MAX - 255));
        assert_eq!(slot_offset(16_777_216, 256), None);
        assert_eq!(slot_offset(usize::MAX, 256), None);
    }

    #[test]
    fn slot_limit_honors_offsets_and_buffer_size() {
        // Buffer size is the tighter bound.
        assert_eq!(max_slots(256, 1 << 28), 1 << 20);
        // Offsets are the tighter bound: the last slot starts at u32::MAX - 255.
        assert_eq!(max_slots(256, u64::MAX), 16_777_216);
        // Every slot within the limit has a valid offset.
        let n = max_slots(256, u64::MAX);
        assert!(slot_offset(n - 1, 256).is_some());
    }

    #[test]
    fn growth_is_reported_only_when_buffers_change() {
        assert_eq!(grown_capacity(4, 3, 64).unwrap(), None);
        assert_eq!(grown_capacity(4, 4, 64).unwrap(), None);
        assert_eq!(grown_capacity(4, 5, 64).unwrap(), Some(8));
        assert_eq!(grown_capacity(4, 40, 48).unwrap(), Some(48));
        assert_eq!(
            grown_capacity(4, 49, 48).unwrap_err(),
            GraphicsError::UniformCapacity { slots: 49, max_slots: 48 }
        );
    }

    #[test]
    fn mvp_uniform_is_column_major() {
        let m = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let u = MvpUniform::new(m);
        assert_eq!(u.matrix[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
