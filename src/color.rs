//! RGBA colors and color scaling.

use bytemuck::{Pod, Zeroable};

/// 8-bit color with a straight, non-premultiplied, alpha channel.
///
/// Memory layout matches the `Rgba8UnormSrgb` texture format so a slice of pixels can be uploaded to the GPU directly.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, `0` is fully transparent.
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);
    /// Opaque red.
    pub const RED: Self = Self::rgb(0xFF, 0, 0);
    /// Opaque green.
    pub const GREEN: Self = Self::rgb(0, 0xFF, 0);

    /// Create a color from all channels.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xFF)
    }

    /// Convert from a packed `0xAARRGGBB` value.
    #[inline]
    #[must_use]
    pub const fn from_argb(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();

        Self { r, g, b, a }
    }

    /// Whether any part of the color is visible.
    #[inline]
    #[must_use]
    pub const fn is_visible(self) -> bool {
        self.a > 0
    }

    /// Composite this color on top of `dst` with the "source over" operator.
    #[inline]
    #[must_use]
    pub fn blend_over(self, dst: Self) -> Self {
        match self.a {
            // Nothing to draw
            0 => dst,
            // Fully replaces what's below
            0xFF => self,
            _ => {
                let src_a = f32::from(self.a) / 255.0;
                let dst_a = f32::from(dst.a) / 255.0;
                let out_a = (1.0 - src_a).mul_add(dst_a, src_a);

                let channel = |src: u8, dst: u8| {
                    let blended = (f32::from(dst) * dst_a)
                        .mul_add(1.0 - src_a, f32::from(src) * src_a)
                        / out_a;

                    blended.round().clamp(0.0, 255.0) as u8
                };

                Self {
                    r: channel(self.r, dst.r),
                    g: channel(self.g, dst.g),
                    b: channel(self.b, dst.b),
                    a: (out_a * 255.0).round() as u8,
                }
            }
        }
    }
}

/// Multiplier for every channel of a color, applied when drawing images.
///
/// Drawing a white image with a scale created from a color results in an image with that color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    /// Red multiplier.
    pub r: f32,
    /// Green multiplier.
    pub g: f32,
    /// Blue multiplier.
    pub b: f32,
    /// Alpha multiplier.
    pub a: f32,
}

impl ColorScale {
    /// Leaves colors untouched.
    pub const IDENTITY: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Create from the multipliers for each channel.
    #[inline]
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Multiply a color with this scale.
    #[inline]
    #[must_use]
    pub fn apply(self, color: Rgba) -> Rgba {
        let scale = |channel: u8, factor: f32| {
            (f32::from(channel) * factor).round().clamp(0.0, 255.0) as u8
        };

        Rgba {
            r: scale(color.r, self.r),
            g: scale(color.g, self.g),
            b: scale(color.b, self.b),
            a: scale(color.a, self.a),
        }
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Rgba> for ColorScale {
    fn from(color: Rgba) -> Self {
        Self {
            r: f32::from(color.r) / 255.0,
            g: f32::from(color.g) / 255.0,
            b: f32::from(color.b) / 255.0,
            a: f32::from(color.a) / 255.0,
        }
    }
}
