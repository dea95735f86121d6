//! Animatable property values.

use glam::Vec4;

/// A packed `0xAARRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Argb(pub u32);

impl Argb {
    /// Pack four channels into a color.
    #[must_use]
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(
            (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32,
        )
    }

    /// Channels as `(a, r, g, b)` in 0..=255.
    #[must_use]
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(
            ((self.0 >> 24) & 0xff) as f32,
            ((self.0 >> 16) & 0xff) as f32,
            ((self.0 >> 8) & 0xff) as f32,
            (self.0 & 0xff) as f32,
        )
    }

    /// Repack `(a, r, g, b)` channels, rounding and clamping each.
    #[must_use]
    pub fn from_vec4(channels: Vec4) -> Self {
        let c = channels.round().clamp(Vec4::ZERO, Vec4::splat(255.0));
        Self::new(c.x as u8, c.y as u8, c.z as u8, c.w as u8)
    }

    /// Per-channel linear interpolation.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::from_vec4(self.to_vec4().lerp(other.to_vec4(), t))
    }
}

/// The kind of an [`AnimatedValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Floating-point value.
    Float,
    /// Integer value.
    Integer,
    /// ARGB color value.
    Color,
}

/// A value a property can be animated to or through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatedValue {
    /// Floating-point value (alpha, translation, scale).
    Float(f32),
    /// Integer value. Treated as packed ARGB when a component is flagged
    /// as a color.
    Integer(i32),
    /// ARGB color value.
    Color(Argb),
}

impl AnimatedValue {
    /// Kind tag of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Float(_) => ValueKind::Float,
            Self::Integer(_) => ValueKind::Integer,
            Self::Color(_) => ValueKind::Color,
        }
    }

    /// Numeric view of the value.
    #[must_use]
    pub fn as_f32(&self) -> f32 {
        match *self {
            Self::Float(v) => v,
            Self::Integer(v) => v as f32,
            Self::Color(c) => c.0 as f32,
        }
    }

    /// Color view of the value. Integers are reinterpreted as packed ARGB.
    #[must_use]
    pub fn as_argb(&self) -> Argb {
        match *self {
            Self::Float(v) => Argb(v.max(0.0) as u32),
            Self::Integer(v) => Argb(v as u32),
            Self::Color(c) => c,
        }
    }
}

impl From<f32> for AnimatedValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<i32> for AnimatedValue {
    fn from(v: i32) -> Self {
        Self::Integer(v)
    }
}

impl From<Argb> for AnimatedValue {
    fn from(c: Argb) -> Self {
        Self::Color(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_pack_unpack() {
        let c = Argb::new(0xff, 0x10, 0x20, 0x30);
        assert_eq!(c.0, 0xff10_2030);
        assert_eq!(Argb::from_vec4(c.to_vec4()), c);
    }

    #[test]
    fn test_argb_lerp_midpoint() {
        let black = Argb::new(255, 0, 0, 0);
        let white = Argb::new(255, 254, 254, 254);
        assert_eq!(black.lerp(white, 0.5), Argb::new(255, 127, 127, 127));
    }

    #[test]
    fn test_integer_reinterpreted_as_color() {
        let v = AnimatedValue::Integer(0xff00_ff00_u32 as i32);
        assert_eq!(v.as_argb(), Argb::new(0xff, 0, 0xff, 0));
        assert_eq!(v.kind(), ValueKind::Integer);
    }
}
