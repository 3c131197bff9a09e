//! End-to-end analysis: classify → ratios → areas → carbon → overlay.

use landcover_carbon::{
    areas, pixel_ratios, validate_ratio_sum, AreaError, AreaMap, CarbonEstimate, CarbonEstimator,
    RatioMap, RATIO_SUM_TOLERANCE,
};
use landcover_classify::{classify, overlay, ClassifyError, OverlayError};
use landcover_core::{CategoryMap, Mask, RgbRaster, RgbRasterView};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors surfaced by the end-to-end pipeline.
#[derive(thiserror::Error, Debug)]
pub enum AnalyzeError {
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error(transparent)]
    Overlay(#[from] OverlayError),
    #[error(transparent)]
    Area(#[from] AreaError),
}

/// Caller-supplied knobs for one analysis run.
#[derive(Clone, Copy, Debug)]
pub struct AnalyzeOptions {
    /// Known total park area; `None` degrades areas and the carbon total
    /// to `None` without failing.
    pub total_area_m2: Option<f64>,
    /// Overlay blend factor.
    pub alpha: f32,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            total_area_m2: None,
            alpha: 0.5,
        }
    }
}

/// Everything one analysis run produces. Owned by the run; nothing is
/// shared or mutated across runs.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub width: usize,
    pub height: usize,
    pub masks: CategoryMap<Mask>,
    pub ratios: RatioMap,
    pub areas: AreaMap,
    /// False when unclassified background pulled the ratio sum away
    /// from 1; a data-quality signal, not an error.
    pub ratio_sum_ok: bool,
    pub carbon: CarbonEstimate,
    pub overlay: RgbRaster,
}

/// Run the full pipeline on an RGB raster.
///
/// The estimator is the only shared input; everything else is computed
/// fresh for this run.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(img, estimator, options), fields(width = img.width, height = img.height))
)]
pub fn analyze(
    img: &RgbRasterView<'_>,
    estimator: &CarbonEstimator,
    options: &AnalyzeOptions,
) -> Result<Analysis, AnalyzeError> {
    let masks = classify(img)?;
    let ratios = pixel_ratios(&masks)?;
    let ratio_sum_ok = validate_ratio_sum(&ratios, RATIO_SUM_TOLERANCE);
    if !ratio_sum_ok {
        log::debug!("ratio sum off unity: unclassified background present");
    }
    let area_map = areas(&ratios, options.total_area_m2);
    let carbon = estimator.estimate(&area_map);
    let painted = overlay(img, &masks, options.alpha)?;

    Ok(Analysis {
        width: img.width,
        height: img.height,
        masks,
        ratios,
        areas: area_map,
        ratio_sum_ok,
        carbon,
        overlay: painted,
    })
}
