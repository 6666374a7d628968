use bevy::color::{ColorToPacked, Srgba};
use serde::{Deserialize, Serialize};

use crate::GalaxyError;

/// Plain RGB triple used for the radial color ramp.
///
/// Channels are nominally in `[0, 1]` but nothing here clamps them: a mix factor above 1
/// extrapolates past the outer color and the result is stored as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GalaxyColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl GalaxyColor {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Accepts `#rrggbb`, `rrggbb`, `#rgb` and `rgb`. Components are used as-is, no
    /// sRGB to linear conversion is applied.
    pub fn from_hex(hex: &str) -> Result<Self, GalaxyError> {
        let srgba = Srgba::hex(hex.trim())
            .map_err(|err| GalaxyError::invalid("color", format!("`{hex}` is not a hex color ({err})")))?;
        Ok(Self::rgb(srgba.red, srgba.green, srgba.blue))
    }

    pub fn to_hex(&self) -> String {
        let [r, g, b] = Srgba::rgb(self.r, self.g, self.b).to_u8_array_no_alpha();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }

    /// `self + (other - self) * t` per channel, with `t` left unclamped.
    pub fn lerp_unclamped(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl TryFrom<String> for GalaxyColor {
    type Error = GalaxyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<GalaxyColor> for String {
    fn from(color: GalaxyColor) -> Self {
        color.to_hex()
    }
}
