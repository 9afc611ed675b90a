//! Vector and color primitives
//!
//! Vectors are nalgebra's `Vector3<f32>`/`Point3<f32>`; addition, subtraction,
//! scaling, division, `dot` and `magnitude` all come from there. This module adds
//! the 8-bit RGBA color type and its lighting scale.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Direction or offset in scene space
pub type Vec3 = Vector3<f32>;

/// Position in scene space
pub type Point = Point3<f32>;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Scale the color channels by a lighting factor.
    ///
    /// Each of r, g, b becomes `clamp(channel * t, 0, 255)` truncated toward zero.
    /// Alpha is left alone so lit surfaces stay opaque. Negative or NaN factors
    /// give black.
    pub fn scale(self, t: f32) -> Self {
        // `as u8` saturates and maps NaN to 0.
        let channel = |c: u8| (c as f32 * t).clamp(0.0, 255.0) as u8;
        Self {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
            a: self.a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Pack as `0x00RRGGBB`, the layout framebuffer windows expect
    pub fn to_packed_rgb(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Rec. 601 luma in 0.0..=1.0
    pub fn luminance(self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}
