//! Serializable analysis reports.
//!
//! The report is the contract consumed by the excluded UI, chart, and
//! document renderers: the area breakdown, the carbon estimate, and the
//! park metadata, as pretty JSON on disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use landcover_carbon::{AreaBreakdown, CarbonEstimate};
use landcover_core::Category;
use serde::{Deserialize, Serialize};

use crate::analyze::Analysis;

#[derive(thiserror::Error, Debug)]
pub enum ReportIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Caller-supplied park metadata carried through to the report.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParkInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub total_area_m2: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,
}

/// One analysis run, flattened for persistence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub park: ParkInfo,
    pub image_width: usize,
    pub image_height: usize,
    pub segmentation: BTreeMap<Category, AreaBreakdown>,
    pub ratio_sum_ok: bool,
    pub carbon: CarbonEstimate,
    #[serde(default)]
    pub overlay_path: Option<String>,
}

impl AnalysisReport {
    /// Build a report from a finished analysis.
    pub fn new(park: ParkInfo, analysis: &Analysis) -> Self {
        Self {
            park,
            image_width: analysis.width,
            image_height: analysis.height,
            segmentation: analysis
                .areas
                .iter()
                .map(|(category, breakdown)| (category, *breakdown))
                .collect(),
            ratio_sum_ok: analysis.ratio_sum_ok,
            carbon: analysis.carbon.clone(),
            overlay_path: None,
        }
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ReportIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ReportIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
