use winit::dpi::PhysicalSize;

/// What the frame loop should do after a failed surface acquire.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The swapchain was rebuilt; the next frame can render.
    Reconfigured,
    /// Transient; drop this frame only.
    SkipFrame,
    /// Unrecoverable; the runtime should exit.
    Fatal,
}

impl SurfaceErrorAction {
    /// Classifies `err`. Lost and outdated surfaces need a reconfigure, which
    /// is only possible for a non-empty `size`.
    pub fn classify(err: &wgpu::SurfaceError, size: PhysicalSize<u32>) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated if !is_empty(size) => {
                SurfaceErrorAction::Reconfigured
            }
            wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
            _ => SurfaceErrorAction::SkipFrame,
        }
    }
}

#[inline]
pub(crate) fn is_empty(size: PhysicalSize<u32>) -> bool {
    size.width == 0 || size.height == 0
}

/// Picks the swapchain format: the first sRGB 8-bit format when preferred,
/// otherwise the first linear format the surface lists.
pub(crate) fn pick_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    const SRGB: [wgpu::TextureFormat; 2] = [
        wgpu::TextureFormat::Bgra8UnormSrgb,
        wgpu::TextureFormat::Rgba8UnormSrgb,
    ];

    let preferred = if prefer_srgb {
        SRGB.into_iter().find(|f| formats.contains(f))
    } else {
        formats.iter().copied().find(|f| !f.is_srgb())
    };
    preferred.or_else(|| formats.first().copied())
}

/// Honors `requested` only when the surface supports it.
pub(crate) fn pick_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

#[cfg(test)]
mod tests {
    use wgpu::{CompositeAlphaMode, SurfaceError, TextureFormat};

    use super::*;

    #[test]
    fn srgb_is_preferred_when_listed() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(pick_format(&formats, true), Some(TextureFormat::Bgra8UnormSrgb));
        assert_eq!(pick_format(&formats, false), Some(TextureFormat::Bgra8Unorm));
        assert_eq!(pick_format(&[], true), None);
    }

    #[test]
    fn default_init_skips_srgb_formats_listed_first() {
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
        let init = crate::device::GpuInit::default();
        assert!(!init.prefer_srgb);
        assert_eq!(pick_format(&formats, init.prefer_srgb), Some(TextureFormat::Bgra8Unorm));
        assert_eq!(
            pick_format(&[TextureFormat::Rgba8UnormSrgb], init.prefer_srgb),
            Some(TextureFormat::Rgba8UnormSrgb)
        );
    }

    #[test]
    fn unsupported_alpha_mode_falls_back() {
        let supported = [CompositeAlphaMode::Opaque];
        assert_eq!(
            pick_alpha_mode(&supported, Some(CompositeAlphaMode::PreMultiplied)),
            CompositeAlphaMode::Opaque
        );
        assert_eq!(pick_alpha_mode(&[], None), CompositeAlphaMode::Auto);
    }

    #[test]
    fn surface_errors_map_to_actions() {
        let live = PhysicalSize::new(800, 600);
        let empty = PhysicalSize::new(0, 600);

        assert_eq!(
            SurfaceErrorAction::classify(&SurfaceError::Lost, live),
            SurfaceErrorAction::Reconfigured
        );
        assert_eq!(
            SurfaceErrorAction::classify(&SurfaceError::Outdated, empty),
            SurfaceErrorAction::SkipFrame
        );
        assert_eq!(
            SurfaceErrorAction::classify(&SurfaceError::Timeout, live),
            SurfaceErrorAction::SkipFrame
        );
        assert_eq!(
            SurfaceErrorAction::classify(&SurfaceError::OutOfMemory, live),
            SurfaceErrorAction::Fatal
        );
    }
}
