use super::Vec2;

/// Viewport size in logical pixels.
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

    /// Converts a window-space displacement (pixels, +Y down) into a clip-space
    /// displacement (+Y up).
    ///
    /// Returns zero for an invalid (e.g. minimized) viewport.
    pub fn pixels_to_ndc(self, delta: Vec2) -> Vec2 {
        if !self.is_valid() {
            return Vec2::zero();
        }
        Vec2::new(delta.x * 2.0 / self.width, -delta.y * 2.0 / self.height)
    }
}
