use std::collections::BTreeMap;

use landcover_core::Category;
use serde::{Deserialize, Serialize};

use crate::area::AreaMap;
use crate::coefficients::{CoefficientEntry, CoefficientError, CoefficientTable};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Annual CO₂-absorption estimate for one analysis.
///
/// `total_tco2_yr` is `None` when no area information was available;
/// `by_type` and `coefficients_used` only carry categories that had both a
/// known area and a coefficient row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarbonEstimate {
    /// Metric tons of CO₂ per year, rounded to 2 decimals.
    pub total_tco2_yr: Option<f64>,
    pub by_type: BTreeMap<Category, f64>,
    pub coefficients_used: BTreeMap<Category, CoefficientEntry>,
}

impl CarbonEstimate {
    fn no_area() -> Self {
        Self {
            total_tco2_yr: None,
            by_type: BTreeMap::new(),
            coefficients_used: BTreeMap::new(),
        }
    }
}

/// Applies a coefficient table to area maps. The table is loaded once at
/// construction and shared read-only across analyses.
#[derive(Clone, Debug)]
pub struct CarbonEstimator {
    table: CoefficientTable,
}

impl CarbonEstimator {
    pub fn new(table: CoefficientTable) -> Self {
        Self { table }
    }

    /// Convenience constructor: load the coefficient CSV and build the
    /// estimator. Fails if the table is absent or malformed.
    pub fn from_csv(path: impl AsRef<std::path::Path>) -> Result<Self, CoefficientError> {
        Ok(Self::new(CoefficientTable::load_csv(path)?))
    }

    pub fn table(&self) -> &CoefficientTable {
        &self.table
    }

    /// Fold `area_m2 × coefficient` over the categories.
    ///
    /// Categories without a coefficient row are skipped silently; partial
    /// coverage is by design (hardscape typically has no coefficient).
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self, areas)))]
    pub fn estimate(&self, areas: &AreaMap) -> CarbonEstimate {
        if Category::ALL.iter().all(|&c| areas[c].area_m2.is_none()) {
            return CarbonEstimate::no_area();
        }

        let mut total_kg = 0.0;
        let mut by_type = BTreeMap::new();
        let mut coefficients_used = BTreeMap::new();

        for &category in &Category::ALL {
            let Some(entry) = self.table.get(category) else {
                continue;
            };
            let Some(area_m2) = areas[category].area_m2 else {
                continue;
            };

            let carbon_kg = area_m2 * entry.coef_kgco2_m2_yr;
            total_kg += carbon_kg;
            by_type.insert(category, carbon_kg / 1000.0);
            coefficients_used.insert(category, entry.clone());
        }

        CarbonEstimate {
            total_tco2_yr: Some(round2(total_kg / 1000.0)),
            by_type,
            coefficients_used,
        }
    }
}

#[inline]
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
