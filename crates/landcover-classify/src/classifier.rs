use landcover_core::{hsv_planes, open_3x3, Category, CategoryMap, Mask, RgbRasterView};

use crate::bands::band_mask;
use crate::exclusion::apply_exclusions;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors returned by the classifier.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("invalid image dimensions (width={width}, height={height})")]
    InvalidImage { width: usize, height: usize },
    #[error("invalid rgb buffer length (expected {expected} bytes, got {got})")]
    InvalidBuffer { expected: usize, got: usize },
}

/// Categories whose masks get morphological opening after the exclusion
/// pass. WATER, WETLAND, and SOIL are left un-denoised; the asymmetry is
/// part of the output contract.
pub const DENOISED: [Category; 5] = [
    Category::Building,
    Category::Road,
    Category::Forest,
    Category::Tree,
    Category::Grass,
];

/// Classify an RGB raster into per-category binary masks.
///
/// Every returned mask has the input's dimensions. Masks of different
/// categories are pairwise disjoint after the exclusion pass, except for
/// the documented WETLAND/WATER residual overlaps; a pixel may belong to
/// no category at all.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(img), fields(width = img.width, height = img.height))
)]
pub fn classify(img: &RgbRasterView<'_>) -> Result<CategoryMap<Mask>, ClassifyError> {
    let (w, h) = (img.width, img.height);
    if w == 0 || h == 0 {
        return Err(ClassifyError::InvalidImage {
            width: w,
            height: h,
        });
    }
    let expected = 3 * w * h;
    if img.data.len() != expected {
        return Err(ClassifyError::InvalidBuffer {
            expected,
            got: img.data.len(),
        });
    }

    let hsv = hsv_planes(img);
    let mut masks = band_masks(&hsv, w, h);

    apply_exclusions(&mut masks);

    for c in DENOISED {
        masks[c] = open_3x3(&masks[c]);
    }

    log::debug!("classified {w}x{h} raster");
    Ok(masks)
}

#[cfg(not(feature = "rayon"))]
fn band_masks(hsv: &[[u8; 3]], w: usize, h: usize) -> CategoryMap<Mask> {
    CategoryMap::from_fn(|c| band_mask(hsv, w, h, c))
}

// Band predicates only read the shared HSV plane and each write their own
// mask, so the per-category fan-out needs no synchronization.
#[cfg(feature = "rayon")]
fn band_masks(hsv: &[[u8; 3]], w: usize, h: usize) -> CategoryMap<Mask> {
    let mut masks = CategoryMap::from_fn(|_| Mask::new(0, 0));
    masks
        .as_mut_slice()
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, slot)| *slot = band_mask(hsv, w, h, Category::ALL[i]));
    masks
}
