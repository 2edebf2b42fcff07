use image::{ImageBuffer, Rgba, RgbaImage};

use crate::foundation::error::{CalError, CalResult};
use crate::foundation::math::unpremul_rgba8;

/// A rendered cell as RGBA8 pixels.
///
/// Backends produce **premultiplied alpha**; the flag makes it explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellBitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl CellBitmap {
    /// Wrap premultiplied bytes, checking the buffer length.
    pub fn from_premul(width: u32, height: u32, data: Vec<u8>) -> CalResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| CalError::raster("bitmap size overflows"))?;
        if data.len() != expected {
            return Err(CalError::raster(format!(
                "bitmap buffer is {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
            premultiplied: true,
        })
    }

    /// Pixel at `(x, y)`, as stored.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    /// Straight-alpha copy for encoding.
    pub fn to_rgba_image(&self) -> CalResult<RgbaImage> {
        let data = if self.premultiplied {
            self.data
                .chunks_exact(4)
                .flat_map(|px| unpremul_rgba8([px[0], px[1], px[2], px[3]]))
                .collect()
        } else {
            self.data.clone()
        };
        RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| CalError::raster("bitmap buffer does not match its size"))
    }

    /// Resample a supersampled premultiplied bitmap down to `width x height` (triangle filter).
    pub fn downsample(&self, width: u32, height: u32) -> CalResult<Self> {
        if (width, height) == (self.width, self.height) {
            return Ok(self.clone());
        }
        if width == 0 || height == 0 {
            return Err(CalError::raster("downsample target must be non-zero"));
        }
        let src: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_raw(self.width, self.height, self.data.clone())
                .ok_or_else(|| CalError::raster("bitmap buffer does not match its size"))?;
        let out = image::imageops::resize(&src, width, height, image::imageops::FilterType::Triangle);
        Ok(Self {
            width,
            height,
            data: out.into_raw(),
            premultiplied: self.premultiplied,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/bitmap.rs"]
mod tests;
