use landcover_core::{Category, CategoryMap, Mask, RgbRaster, RgbRasterView};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Back-to-front paint order for the overlay.
///
/// Masks are pairwise disjoint after classification, but the explicit order
/// stays as a correctness guard for the documented residual overlaps:
/// whatever is painted later wins the pixel.
pub const COMPOSITE_ORDER: [Category; 8] = [
    Category::Soil,
    Category::Grass,
    Category::Wetland,
    Category::Tree,
    Category::Forest,
    Category::Water,
    Category::Road,
    Category::Building,
];

/// Errors returned by the overlay compositor.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum OverlayError {
    #[error("blend factor must be in (0, 1], got {0}")]
    InvalidAlpha(f32),
    #[error("mask dimensions {mask_width}x{mask_height} do not match image {width}x{height}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        mask_width: usize,
        mask_height: usize,
    },
}

/// Alpha-blend each category's display color onto a copy of the source
/// image at every masked pixel, in [`COMPOSITE_ORDER`].
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(img, masks), fields(width = img.width, height = img.height))
)]
pub fn overlay(
    img: &RgbRasterView<'_>,
    masks: &CategoryMap<Mask>,
    alpha: f32,
) -> Result<RgbRaster, OverlayError> {
    if !(alpha > 0.0 && alpha <= 1.0) {
        return Err(OverlayError::InvalidAlpha(alpha));
    }
    for (_, mask) in masks.iter() {
        if (mask.width, mask.height) != (img.width, img.height) {
            return Err(OverlayError::DimensionMismatch {
                width: img.width,
                height: img.height,
                mask_width: mask.width,
                mask_height: mask.height,
            });
        }
    }

    let mut out = RgbRaster {
        width: img.width,
        height: img.height,
        data: img.data.to_vec(),
    };

    for category in COMPOSITE_ORDER {
        let mask = &masks[category];
        let color = category.display_color();
        for (i, &m) in mask.data.iter().enumerate() {
            if m == 0 {
                continue;
            }
            let base = 3 * i;
            for ch in 0..3 {
                let blended =
                    out.data[base + ch] as f32 * (1.0 - alpha) + color[ch] as f32 * alpha;
                out.data[base + ch] = blended.clamp(0.0, 255.0) as u8;
            }
        }
    }

    Ok(out)
}

/// One legend row: the category, its wire label, and its display color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct LegendEntry {
    pub category: Category,
    pub label: &'static str,
    pub color: [u8; 3],
}

/// Legend data for downstream renderers, in canonical category order.
/// Rendering the key strip (fonts, layout, localized labels) is UI
/// territory and stays out of this crate.
pub fn legend() -> [LegendEntry; 8] {
    Category::ALL.map(|category| LegendEntry {
        category,
        label: category.label(),
        color: category.display_color(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_masks(width: usize, height: usize, set: &[Category]) -> CategoryMap<Mask> {
        CategoryMap::from_fn(|c| {
            if set.contains(&c) {
                Mask::from_fn(width, height, |_, _| true)
            } else {
                Mask::new(width, height)
            }
        })
    }

    #[test]
    fn full_alpha_paints_the_display_color() {
        let img = RgbRaster::filled(2, 2, [10, 10, 10]);
        let masks = solid_masks(2, 2, &[Category::Water]);
        let out = overlay(&img.view(), &masks, 1.0).unwrap();
        assert_eq!(out.pixel(0, 0), Category::Water.display_color());
    }

    #[test]
    fn half_alpha_blends_and_truncates() {
        let img = RgbRaster::filled(1, 1, [100, 100, 100]);
        let masks = solid_masks(1, 1, &[Category::Road]);
        let out = overlay(&img.view(), &masks, 0.5).unwrap();
        // (100*0.5 + 64*0.5) = 82
        assert_eq!(out.pixel(0, 0), [82, 82, 82]);
    }

    #[test]
    fn unmasked_pixels_are_untouched() {
        let img = RgbRaster::filled(2, 1, [7, 8, 9]);
        let mut masks = solid_masks(2, 1, &[]);
        masks[Category::Grass].set(0, 0, true);
        let out = overlay(&img.view(), &masks, 0.5).unwrap();
        assert_eq!(out.pixel(1, 0), [7, 8, 9]);
        assert_ne!(out.pixel(0, 0), [7, 8, 9]);
    }

    #[test]
    fn later_categories_overpaint_earlier_ones() {
        // residual overlap: the same pixel in both SOIL and BUILDING
        let img = RgbRaster::filled(1, 1, [0, 0, 0]);
        let masks = solid_masks(1, 1, &[Category::Soil, Category::Building]);
        let out = overlay(&img.view(), &masks, 1.0).unwrap();
        assert_eq!(out.pixel(0, 0), Category::Building.display_color());
    }

    #[test]
    fn alpha_outside_unit_interval_is_rejected() {
        let img = RgbRaster::filled(1, 1, [0, 0, 0]);
        let masks = solid_masks(1, 1, &[]);
        assert_eq!(
            overlay(&img.view(), &masks, 0.0),
            Err(OverlayError::InvalidAlpha(0.0))
        );
        assert!(overlay(&img.view(), &masks, 1.5).is_err());
    }

    #[test]
    fn mismatched_mask_dimensions_are_rejected() {
        let img = RgbRaster::filled(2, 2, [0, 0, 0]);
        let masks = solid_masks(3, 2, &[]);
        assert!(matches!(
            overlay(&img.view(), &masks, 0.5),
            Err(OverlayError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn legend_covers_every_category_once() {
        let entries = legend();
        assert_eq!(entries.len(), 8);
        for (entry, category) in entries.iter().zip(Category::ALL) {
            assert_eq!(entry.category, category);
            assert_eq!(entry.color, category.display_color());
            assert_eq!(entry.label, category.label());
        }
    }
}
