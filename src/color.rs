//! RGBA8 pixel color and the channel storage policy.
//!
//! Lighting produces unclamped intensities, so scaling a color can leave the
//! `0..=255` channel range. Every scaled channel goes through
//! [`Color::scaled`]: the product is computed in `f32`, clamped to
//! `[0, 255]` and truncated toward zero. NaN stores as 0.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

pub const BLACK: Color = Color::rgb(0, 0, 0);
pub const WHITE: Color = Color::rgb(255, 255, 255);

impl Default for Color {
    fn default() -> Self {
        BLACK
    }
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Multiplies r, g and b by `factor`, saturating at the channel bounds.
    /// Alpha is left untouched.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            r: scale_channel(self.r, factor),
            g: scale_channel(self.g, factor),
            b: scale_channel(self.b, factor),
            a: self.a,
        }
    }

    /// Packs into a `0xAARRGGBB` word, the layout of SDL's ARGB8888 format.
    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

#[inline]
fn scale_channel(channel: u8, factor: f32) -> u8 {
    let value = channel as f32 * factor;
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0) as u8
}
