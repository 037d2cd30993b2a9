use std::sync::atomic::{AtomicU32, Ordering};

/// Single-value cell holding an `f32` angle.
///
/// One writer, one reader; the reader observes the most recently completed
/// write. There is no ordering between separate cells.
#[derive(Debug, Default)]
pub struct AngleCell {
    bits: AtomicU32,
}

impl AngleCell {
    pub fn new(radians: f32) -> Self {
        Self {
            bits: AtomicU32::new(radians.to_bits()),
        }
    }

    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }

    #[inline]
    pub fn set(&self, radians: f32) {
        self.bits.store(radians.to_bits(), Ordering::Release);
    }

    /// Adds `delta` to the stored angle.
    ///
    /// Only valid for the single writer; concurrent writers may lose updates.
    #[inline]
    pub fn add(&self, delta: f32) {
        self.set(self.get() + delta);
    }
}

/// Externally driven camera angles, in radians.
///
/// Typically held in an `Arc` shared between the input side and the render
/// loop. `rotation_y` drives the orbit; `rotation_x` is stored for hosts that
/// track it but is not read by the frame composer.
#[derive(Debug, Default)]
pub struct CameraControl {
    rotation_x: AngleCell,
    rotation_y: AngleCell,
}

impl CameraControl {
    pub fn new(rotation_x: f32, rotation_y: f32) -> Self {
        Self {
            rotation_x: AngleCell::new(rotation_x),
            rotation_y: AngleCell::new(rotation_y),
        }
    }

    #[inline]
    pub fn rotation_x(&self) -> f32 {
        self.rotation_x.get()
    }

    #[inline]
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y.get()
    }

    #[inline]
    pub fn set_rotation_x(&self, radians: f32) {
        self.rotation_x.set(radians);
    }

    #[inline]
    pub fn set_rotation_y(&self, radians: f32) {
        self.rotation_y.set(radians);
    }

    /// Adds deltas to both angles (single writer only).
    pub fn rotate_by(&self, dx: f32, dy: f32) {
        self.rotation_x.add(dx);
        self.rotation_y.add(dy);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn cell_round_trips_exact_bits() {
        let cell = AngleCell::new(0.0);
        for v in [1.25_f32, -3.5, f32::MIN_POSITIVE, -0.0] {
            cell.set(v);
            assert_eq!(cell.get().to_bits(), v.to_bits());
        }
    }

    #[test]
    fn default_angles_are_zero() {
        let cam = CameraControl::default();
        assert_eq!(cam.rotation_x(), 0.0);
        assert_eq!(cam.rotation_y(), 0.0);
    }

    #[test]
    fn rotate_by_accumulates() {
        let cam = CameraControl::new(0.5, 1.0);
        cam.rotate_by(0.25, -0.5);
        assert_eq!(cam.rotation_x(), 0.75);
        assert_eq!(cam.rotation_y(), 0.5);
    }

    #[test]
    fn last_write_is_visible_across_threads() {
        let cam = Arc::new(CameraControl::default());
        let writer = {
            let cam = Arc::clone(&cam);
            thread::spawn(move || {
                for i in 0..=1000 {
                    cam.set_rotation_y(i as f32);
                }
            })
        };
        writer.join().unwrap();
        assert_eq!(cam.rotation_y(), 1000.0);
    }
}
