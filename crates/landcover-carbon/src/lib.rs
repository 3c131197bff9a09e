//! Area and carbon-absorption estimation for classified land cover.
//!
//! The pipeline here is a pure numeric fold: mask pixel counts become
//! normalized ratios, ratios become absolute areas when a total park area
//! is known, and a per-category coefficient table turns areas into an
//! annual CO₂-absorption estimate.

mod area;
mod coefficients;
mod estimator;

pub use area::{
    areas, pixel_ratios, validate_ratio_sum, vegetated_area_m2, AreaBreakdown, AreaError, AreaMap,
    CoverageRatio, RatioMap, RATIO_SUM_TOLERANCE,
};
pub use coefficients::{CoefficientEntry, CoefficientError, CoefficientTable};
pub use estimator::{CarbonEstimate, CarbonEstimator};
