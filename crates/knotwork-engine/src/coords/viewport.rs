/// Viewport size in logical pixels.
///
/// Uploaded to every renderer's uniform buffer and used by the vertex shaders
/// to map logical pixels to NDC.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Size as a shader-ready pair, never smaller than one pixel per axis.
    #[inline]
    pub fn as_uniform(self) -> [f32; 2] {
        [self.width.max(1.0), self.height.max(1.0)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimized_window_uploads_one_pixel() {
        let vp = Viewport::new(0.0, 0.0);
        assert!(!vp.is_valid());
        assert_eq!(vp.as_uniform(), [1.0, 1.0]);
    }

    #[test]
    fn regular_size_passes_through() {
        assert_eq!(Viewport::new(800.0, 600.0).as_uniform(), [800.0, 600.0]);
    }
}
