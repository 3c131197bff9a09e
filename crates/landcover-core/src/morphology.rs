//! Binary morphology with a fixed 3×3 square structuring element.
//!
//! Border convention matches the usual constant-border defaults: erosion
//! treats out-of-bounds neighbors as set (no shrink at the frame), dilation
//! treats them as clear (no growth from outside the frame). Opening is
//! therefore anti-extensive: it never adds a pixel that was not already set.

use crate::mask::Mask;

/// Erode with a 3×3 square: a pixel survives iff it and all in-bounds
/// neighbors are set.
pub fn erode_3x3(mask: &Mask) -> Mask {
    let (w, h) = (mask.width, mask.height);
    Mask::from_fn(w, h, |x, y| {
        if !mask.get(x, y) {
            return false;
        }
        neighborhood(x, y, w, h).all(|(nx, ny)| mask.get(nx, ny))
    })
}

/// Dilate with a 3×3 square: a pixel is set iff any in-bounds neighbor
/// (including itself) is set.
pub fn dilate_3x3(mask: &Mask) -> Mask {
    let (w, h) = (mask.width, mask.height);
    Mask::from_fn(w, h, |x, y| {
        mask.get(x, y) || neighborhood(x, y, w, h).any(|(nx, ny)| mask.get(nx, ny))
    })
}

/// Morphological opening: erosion followed by dilation. Removes speckles
/// smaller than the structuring element while keeping larger regions intact.
pub fn open_3x3(mask: &Mask) -> Mask {
    dilate_3x3(&erode_3x3(mask))
}

#[inline]
fn neighborhood(x: usize, y: usize, w: usize, h: usize) -> impl Iterator<Item = (usize, usize)> {
    let x = x as i64;
    let y = y as i64;
    (-1..=1).flat_map(move |dy| {
        (-1..=1).filter_map(move |dx| {
            let (nx, ny) = (x + dx, y + dy);
            (nx >= 0 && ny >= 0 && nx < w as i64 && ny < h as i64)
                .then(|| (nx as usize, ny as usize))
        })
    })
}
