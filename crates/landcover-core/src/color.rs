//! RGB to HSV / luma conversion.
//!
//! HSV uses the OpenCV byte convention (hue in `0..=179` half-degrees,
//! saturation and value in `0..=255`) because every band threshold in the
//! classifier is defined in that space.

use crate::raster::RgbRasterView;

/// Convert one RGB pixel to HSV bytes.
#[inline]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let rf = r as f32;
    let gf = g as f32;
    let bf = b as f32;

    let v = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = v - min;

    let s = if v > 0.0 { 255.0 * delta / v } else { 0.0 };

    let h = if delta > 0.0 {
        let deg = if v == rf {
            60.0 * (gf - bf) / delta
        } else if v == gf {
            120.0 + 60.0 * (bf - rf) / delta
        } else {
            240.0 + 60.0 * (rf - gf) / delta
        };
        let deg = if deg < 0.0 { deg + 360.0 } else { deg };
        deg / 2.0
    } else {
        0.0
    };

    let h = h.round();
    // 359.x° rounds up to the 180 bucket; wrap back to red.
    let h = if h >= 180.0 { 0.0 } else { h };

    [h as u8, s.round() as u8, v as u8]
}

/// Rec. 601 luma of one RGB pixel.
#[inline]
pub fn rgb_to_luma(r: u8, g: u8, b: u8) -> u8 {
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32).round() as u8
}

/// Per-pixel HSV plane for a whole raster, row-major.
pub fn hsv_planes(src: &RgbRasterView<'_>) -> Vec<[u8; 3]> {
    src.data
        .chunks_exact(3)
        .map(|p| rgb_to_hsv(p[0], p[1], p[2]))
        .collect()
}

/// Per-pixel luma plane for a whole raster, row-major.
pub fn luma_plane(src: &RgbRasterView<'_>) -> Vec<u8> {
    src.data
        .chunks_exact(3)
        .map(|p| rgb_to_luma(p[0], p[1], p[2]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_color_anchors() {
        assert_eq!(rgb_to_hsv(255, 0, 0), [0, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 255, 0), [60, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 0, 255), [120, 255, 255]);
    }

    #[test]
    fn neutral_pixels_have_zero_saturation() {
        assert_eq!(rgb_to_hsv(0, 0, 0), [0, 0, 0]);
        assert_eq!(rgb_to_hsv(255, 255, 255), [0, 0, 255]);
        assert_eq!(rgb_to_hsv(128, 128, 128), [0, 0, 128]);
    }

    #[test]
    fn dark_green_lands_in_the_green_hue_band() {
        // G max: H = (120 + 60*(B-R)/delta) / 2
        let [h, s, v] = rgb_to_hsv(30, 120, 40);
        assert_eq!(h, 63);
        assert_eq!(s, 191);
        assert_eq!(v, 120);
    }

    #[test]
    fn near_red_wraps_into_bucket_zero() {
        // hue just below 360° must not produce the out-of-range 180 bucket
        let [h, _, _] = rgb_to_hsv(255, 0, 1);
        assert_eq!(h, 0);
    }

    #[test]
    fn luma_matches_rec601_weights() {
        assert_eq!(rgb_to_luma(255, 255, 255), 255);
        assert_eq!(rgb_to_luma(0, 0, 0), 0);
        assert_eq!(rgb_to_luma(255, 0, 0), 76);
        assert_eq!(rgb_to_luma(0, 255, 0), 150);
    }

    #[test]
    fn planes_cover_every_pixel() {
        let raster = crate::RgbRaster::filled(5, 3, [10, 200, 30]);
        let hsv = hsv_planes(&raster.view());
        let luma = luma_plane(&raster.view());
        assert_eq!(hsv.len(), 15);
        assert_eq!(luma.len(), 15);
        assert!(hsv.iter().all(|&p| p == hsv[0]));
    }
}
