use landcover_core::{Category, CategoryMap, Mask};
use serde::{Deserialize, Serialize};

/// Fraction of image pixels belonging to one category.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoverageRatio {
    pub ratio: f64,
    pub percent: f64,
}

/// Per-category coverage map. Invariant: the ratios sum to at most 1,
/// with equality only when every pixel was classified.
pub type RatioMap = CategoryMap<CoverageRatio>;

/// Coverage plus absolute area when the total park area is known.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AreaBreakdown {
    pub ratio: f64,
    pub percent: f64,
    pub area_m2: Option<f64>,
}

pub type AreaMap = CategoryMap<AreaBreakdown>;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum AreaError {
    /// The mask set covers zero pixels. With the closed category map an
    /// empty mapping cannot exist, so this is the remaining degenerate
    /// form of that invariant violation.
    #[error("mask set covers zero pixels")]
    EmptyMaskSet,
}

/// Per-category pixel ratios over the total pixel count.
///
/// The total is taken from one mask's dimensions; the classifier
/// guarantees all masks share them.
pub fn pixel_ratios(masks: &CategoryMap<Mask>) -> Result<RatioMap, AreaError> {
    let total = masks[Category::Building].pixel_count();
    if total == 0 {
        return Err(AreaError::EmptyMaskSet);
    }
    Ok(CategoryMap::from_fn(|c| {
        let ratio = masks[c].count_nonzero() as f64 / total as f64;
        CoverageRatio {
            ratio,
            percent: ratio * 100.0,
        }
    }))
}

/// Absolute areas from ratios and an optional total park area.
///
/// A missing or non-positive total yields `area_m2 = None` for every
/// category; there is no partial computation.
pub fn areas(ratios: &RatioMap, total_area_m2: Option<f64>) -> AreaMap {
    let total = total_area_m2.filter(|a| a.is_finite() && *a > 0.0);
    CategoryMap::from_fn(|c| {
        let r = ratios[c];
        AreaBreakdown {
            ratio: r.ratio,
            percent: r.percent,
            area_m2: total.map(|t| t * r.ratio),
        }
    })
}

/// Default tolerance for [`validate_ratio_sum`].
pub const RATIO_SUM_TOLERANCE: f64 = 0.01;

/// True iff the ratios sum to 1 within `tolerance`.
///
/// A false result is a data-quality signal, not a failure: unclassified
/// background pixels legitimately pull the sum below 1.
pub fn validate_ratio_sum(ratios: &RatioMap, tolerance: f64) -> bool {
    let sum: f64 = ratios.iter().map(|(_, r)| r.ratio).sum();
    (sum - 1.0).abs() <= tolerance
}

/// Combined known area of the non-hardscape categories (everything except
/// BUILDING and ROAD), or `None` when no area information is available.
pub fn vegetated_area_m2(areas: &AreaMap) -> Option<f64> {
    const VEGETATED: [Category; 6] = [
        Category::Water,
        Category::Forest,
        Category::Tree,
        Category::Grass,
        Category::Wetland,
        Category::Soil,
    ];

    let mut sum = 0.0;
    let mut any = false;
    for c in VEGETATED {
        if let Some(a) = areas[c].area_m2 {
            sum += a;
            any = true;
        }
    }
    any.then_some(sum)
}
