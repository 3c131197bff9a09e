use serde::{Deserialize, Serialize};

/// Borrowed view over an interleaved 8-bit RGB buffer.
#[derive(Clone, Copy, Debug)]
pub struct RgbRasterView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major RGB, len = 3*w*h
}

/// Owned interleaved 8-bit RGB raster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbRaster {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RasterError {
    #[error("invalid raster dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },
    #[error("invalid rgb buffer length (expected {expected} bytes, got {got})")]
    BufferLength { expected: usize, got: usize },
}

impl<'a> RgbRasterView<'a> {
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = 3 * (y * self.width + x);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

impl RgbRaster {
    /// Raster filled with a single color.
    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(3 * width * height);
        for _ in 0..width * height {
            data.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Take ownership of a raw interleaved buffer, validating its length.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions { width, height });
        }
        let expected = 3usize
            .checked_mul(width)
            .and_then(|n| n.checked_mul(height))
            .ok_or(RasterError::InvalidDimensions { width, height })?;
        if data.len() != expected {
            return Err(RasterError::BufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn view(&self) -> RgbRasterView<'_> {
        RgbRasterView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        self.view().pixel(x, y)
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let i = 3 * (y * self.width + x);
        self.data[i..i + 3].copy_from_slice(&rgb);
    }

    /// Paint an axis-aligned rectangle; coordinates are clipped to the raster.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, rgb: [u8; 3]) {
        for y in y0..y1.min(self.height) {
            for x in x0..x1.min(self.width) {
                self.set_pixel(x, y, rgb);
            }
        }
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

#[inline]
fn sample_channel(src: &RgbRasterView<'_>, x: f32, y: f32, ch: usize) -> f32 {
    let max_x = (src.width - 1) as i64;
    let max_y = (src.height - 1) as i64;
    let x0 = (x.floor() as i64).clamp(0, max_x);
    let y0 = (y.floor() as i64).clamp(0, max_y);
    let x1 = (x0 + 1).clamp(0, max_x);
    let y1 = (y0 + 1).clamp(0, max_y);
    let fx = (x - x0 as f32).clamp(0.0, 1.0);
    let fy = (y - y0 as f32).clamp(0.0, 1.0);

    let at = |px: i64, py: i64| -> f32 {
        src.data[3 * (py as usize * src.width + px as usize) + ch] as f32
    };

    let a = at(x0, y0) + fx * (at(x1, y0) - at(x0, y0));
    let b = at(x0, y1) + fx * (at(x1, y1) - at(x0, y1));
    a + fy * (b - a)
}

/// Bilinear resize to `out_width` x `out_height`, clamping samples at the
/// borders. Pixel centers are aligned the way OpenCV's linear resize aligns
/// them.
pub fn resize_bilinear(
    src: &RgbRasterView<'_>,
    out_width: usize,
    out_height: usize,
) -> Result<RgbRaster, RasterError> {
    if src.width == 0 || src.height == 0 {
        return Err(RasterError::InvalidDimensions {
            width: src.width,
            height: src.height,
        });
    }
    if out_width == 0 || out_height == 0 {
        return Err(RasterError::InvalidDimensions {
            width: out_width,
            height: out_height,
        });
    }

    let sx = src.width as f32 / out_width as f32;
    let sy = src.height as f32 / out_height as f32;

    let mut data = vec![0u8; 3 * out_width * out_height];
    for oy in 0..out_height {
        let y = (oy as f32 + 0.5) * sy - 0.5;
        for ox in 0..out_width {
            let x = (ox as f32 + 0.5) * sx - 0.5;
            let i = 3 * (oy * out_width + ox);
            for ch in 0..3 {
                data[i + ch] = sample_channel(src, x, y, ch).round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    Ok(RgbRaster {
        width: out_width,
        height: out_height,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_rejects_bad_lengths() {
        assert_eq!(
            RgbRaster::from_raw(2, 2, vec![0u8; 11]),
            Err(RasterError::BufferLength {
                expected: 12,
                got: 11
            })
        );
        assert_eq!(
            RgbRaster::from_raw(0, 4, Vec::new()),
            Err(RasterError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
    }

    #[test]
    fn pixel_accessors_agree() {
        let mut img = RgbRaster::filled(3, 2, [1, 2, 3]);
        img.set_pixel(2, 1, [9, 8, 7]);
        assert_eq!(img.pixel(0, 0), [1, 2, 3]);
        assert_eq!(img.view().pixel(2, 1), [9, 8, 7]);
    }

    #[test]
    fn resize_of_uniform_image_stays_uniform() {
        let img = RgbRaster::filled(10, 10, [120, 45, 200]);
        let out = resize_bilinear(&img.view(), 4, 7).unwrap();
        assert_eq!(out.width, 4);
        assert_eq!(out.height, 7);
        for y in 0..7 {
            for x in 0..4 {
                assert_eq!(out.pixel(x, y), [120, 45, 200]);
            }
        }
    }

    #[test]
    fn resize_rejects_empty_output() {
        let img = RgbRaster::filled(4, 4, [0, 0, 0]);
        assert!(resize_bilinear(&img.view(), 0, 4).is_err());
    }
}
