use serde::{Deserialize, Serialize};

use crate::foundation::error::{CalError, CalResult};

/// Straight-alpha RGBA8 color.
///
/// Config files spell colors as packed ARGB hex (`"FF2E5AA2"`), plain RGB hex
/// (`"#2E5AA2"`) or component arrays (`[46, 90, 162]`, `[46, 90, 162, 255]`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque color from components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from all four components.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The `(r, g, b)` triple, dropping alpha.
    pub fn to_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Premultiplied `[r, g, b, a]`.
    pub fn to_premul(self) -> [u8; 4] {
        crate::foundation::math::premul_rgba8([self.r, self.g, self.b, self.a])
    }

    /// Serialize as packed `AARRGGBB` hex, upper case, no prefix.
    pub fn to_argb_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }

    /// SVG `rgb(r, g, b)` paint value. Alpha is emitted separately as an opacity attribute.
    pub fn to_svg_rgb(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// SVG opacity in `0..=1`.
    pub fn svg_opacity(self) -> f32 {
        f32::from(self.a) / 255.0
    }
}

/// Parse `AARRGGBB` (8 digits) or `RRGGBB` (6 digits, opaque), with optional `#` prefix.
pub fn parse_argb_hex(s: &str) -> CalResult<Rgba8> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> CalResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| CalError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    if !s.is_ascii() {
        return Err(CalError::validation("hex color must be ASCII"));
    }
    match s.len() {
        6 => Ok(Rgba8::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Rgba8::rgba(
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
            hex_byte(&s[0..2])?,
        )),
        _ => Err(CalError::validation(
            "hex color must be AARRGGBB or RRGGBB (case-insensitive)",
        )),
    }
}

/// The `(r, g, b)` triple of an ARGB hex string.
pub fn argb_hex_to_rgb(s: &str) -> CalResult<[u8; 3]> {
    parse_argb_hex(s).map(Rgba8::to_rgb)
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_argb_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_argb_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Rgba8::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Rgba8::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "color array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
