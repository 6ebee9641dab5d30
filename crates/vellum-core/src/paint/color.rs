/// Straight-alpha RGBA color.
///
/// Channels are normalized to `[0, 1]` by convention. No gamma or color space is
/// implied; backends decide how to interpret the values.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    /// Opaque black.
    #[inline]
    fn default() -> Self {
        Self::black()
    }
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    #[inline]
    pub const fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Creates a color from 8-bit channels (`0`–`255`).
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Multiplies alpha by `opacity` (clamped to [0, 1]).
    #[inline]
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self { a: self.a * opacity.clamp(0.0, 1.0), ..self }
    }

    /// Channel-wise linear interpolation, `t = 0` yields `self`.
    #[inline]
    pub fn lerp(self, other: Color, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

impl From<[f32; 4]> for Color {
    #[inline]
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Color> for [f32; 4] {
    #[inline]
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_opacity_scales_alpha() {
        let c = Color::new(0.2, 0.4, 0.6, 0.5).with_opacity(0.5);
        assert_eq!(c, Color::new(0.2, 0.4, 0.6, 0.25));
    }

    #[test]
    fn with_opacity_clamps_factor() {
        let c = Color::new(1.0, 0.0, 0.0, 0.8);
        assert_eq!(c.with_opacity(4.0).a, 0.8);
        assert_eq!(c.with_opacity(-1.0).a, 0.0);
    }

    #[test]
    fn from_u8_normalizes() {
        assert_eq!(Color::from_u8(255, 0, 255, 0), Color::new(1.0, 0.0, 1.0, 0.0));
    }
}
