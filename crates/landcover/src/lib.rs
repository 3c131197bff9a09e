//! High-level facade crate for the `landcover-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the underlying pipeline crates
//! - an end-to-end [`analyze`](analyze::analyze) helper running
//!   classify → ratios → areas → carbon → overlay in one call
//! - JSON analysis reports for downstream chart/report renderers
//! - (feature `image`) adapters between `image::RgbImage` and the
//!   workspace raster types, plus the canonical-resolution preprocessor
//!
//! ## Quickstart
//!
//! ```no_run
//! use landcover::analyze::{analyze, AnalyzeOptions};
//! use landcover::carbon::CarbonEstimator;
//! use landcover::imgio;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = imgio::load_rgb("park.jpg")?;
//! let raster = imgio::preprocess(&img)?;
//!
//! let estimator = CarbonEstimator::from_csv("testdata/carbon_coefficients.csv")?;
//! let options = AnalyzeOptions {
//!     total_area_m2: Some(150_000.0),
//!     ..AnalyzeOptions::default()
//! };
//!
//! let analysis = analyze(&raster.view(), &estimator, &options)?;
//! println!("total: {:?} tCO2/yr", analysis.carbon.total_tco2_yr);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `landcover::core`: rasters, masks, color spaces, the `Category` enum.
//! - `landcover::classify`: band predicates, exclusion rules, overlay.
//! - `landcover::carbon`: ratios, areas, coefficient table, estimator.
//! - `landcover::analyze`: the end-to-end pipeline.
//! - `landcover::report`: serializable analysis reports.
//! - `landcover::imgio` (feature `image`): `image` crate bridging.

pub use landcover_carbon as carbon;
pub use landcover_classify as classify;
pub use landcover_core as core;

pub use landcover_carbon::{AreaBreakdown, AreaMap, CarbonEstimate, CoverageRatio, RatioMap};
pub use landcover_core::{Category, CategoryMap, Mask, RgbRaster, RgbRasterView};

pub mod analyze;
pub mod report;

#[cfg(feature = "image")]
pub mod imgio;
