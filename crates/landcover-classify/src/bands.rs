//! Per-category HSV band predicates.
//!
//! Bounds are inclusive and use the OpenCV byte convention (H `0..=179`,
//! S/V `0..=255`). A category with several bands takes their union.

use landcover_core::{Category, Mask};

/// Inclusive range predicate over the three HSV channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HsvRange {
    pub lo: [u8; 3],
    pub hi: [u8; 3],
}

impl HsvRange {
    pub const fn new(lo: [u8; 3], hi: [u8; 3]) -> Self {
        Self { lo, hi }
    }

    /// True iff every channel falls inside the inclusive bounds.
    #[inline]
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| self.lo[i] <= hsv[i] && hsv[i] <= self.hi[i])
    }
}

// Bright neutral surfaces plus cyan reflective roofing.
const BUILDING_BANDS: [HsvRange; 2] = [
    HsvRange::new([0, 0, 180], [180, 50, 255]),
    HsvRange::new([80, 100, 100], [100, 255, 255]),
];
// Dark neutral surfaces, any hue.
const ROAD_BANDS: [HsvRange; 1] = [HsvRange::new([0, 0, 0], [180, 50, 100])];
const WATER_BANDS: [HsvRange; 1] = [HsvRange::new([90, 80, 50], [130, 255, 200])];
// Dense dark green.
const FOREST_BANDS: [HsvRange; 1] = [HsvRange::new([35, 70, 30], [85, 255, 150])];
// Same hue family as forest, brighter and less saturated.
const TREE_BANDS: [HsvRange; 1] = [HsvRange::new([30, 40, 40], [85, 180, 200])];
const GRASS_BANDS: [HsvRange; 1] = [HsvRange::new([25, 30, 100], [85, 200, 255])];
// Dark teal.
const WETLAND_BANDS: [HsvRange; 1] = [HsvRange::new([80, 30, 20], [100, 150, 100])];
// Brown and beige bare ground.
const SOIL_BANDS: [HsvRange; 1] = [HsvRange::new([10, 20, 80], [30, 150, 200])];

/// Band predicates for one category.
pub fn bands(category: Category) -> &'static [HsvRange] {
    match category {
        Category::Building => &BUILDING_BANDS,
        Category::Road => &ROAD_BANDS,
        Category::Water => &WATER_BANDS,
        Category::Forest => &FOREST_BANDS,
        Category::Tree => &TREE_BANDS,
        Category::Grass => &GRASS_BANDS,
        Category::Wetland => &WETLAND_BANDS,
        Category::Soil => &SOIL_BANDS,
    }
}

/// Union of the category's band predicates over a precomputed HSV plane.
pub(crate) fn band_mask(
    hsv: &[[u8; 3]],
    width: usize,
    height: usize,
    category: Category,
) -> Mask {
    let ranges = bands(category);
    Mask::from_fn(width, height, |x, y| {
        let p = hsv[y * width + x];
        ranges.iter().any(|r| r.contains(p))
    })
}
