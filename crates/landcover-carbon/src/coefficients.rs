//! CSV-backed carbon coefficient table.
//!
//! Expected columns: `vegetation_type` (a category wire name),
//! `coef_kgco2_m2_yr` (positive), `source_name`, `version`. The table is
//! loaded once and shared read-only across analyses.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use landcover_core::Category;
use serde::{Deserialize, Serialize};

/// Coefficient record for one category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoefficientEntry {
    /// kg CO₂ absorbed per m² per year.
    pub coef_kgco2_m2_yr: f64,
    pub source_name: String,
    pub version: String,
}

#[derive(Debug, Deserialize)]
struct CoefficientRow {
    vegetation_type: String,
    coef_kgco2_m2_yr: f64,
    source_name: String,
    version: String,
}

/// Errors raised while loading the coefficient table.
#[derive(thiserror::Error, Debug)]
pub enum CoefficientError {
    #[error("coefficient table not found: {0}")]
    NotFound(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("non-positive coefficient {value} for {category}")]
    InvalidCoefficient { category: Category, value: f64 },
}

/// Category → coefficient mapping. Categories without a row are treated as
/// zero-coefficient by the estimator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoefficientTable {
    entries: BTreeMap<Category, CoefficientEntry>,
}

impl CoefficientTable {
    /// Load the table from a CSV file.
    ///
    /// Rows whose `vegetation_type` names no known category are skipped
    /// with a warning so newer tables stay loadable; a later duplicate row
    /// for the same category replaces the earlier one.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self, CoefficientError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CoefficientError::NotFound(path.to_path_buf()));
        }

        let mut reader = csv::Reader::from_path(path)?;
        let mut entries = BTreeMap::new();
        for row in reader.deserialize() {
            let row: CoefficientRow = row?;
            let category = match row.vegetation_type.parse::<Category>() {
                Ok(c) => c,
                Err(err) => {
                    log::warn!("skipping coefficient row: {err}");
                    continue;
                }
            };
            if !(row.coef_kgco2_m2_yr > 0.0) {
                return Err(CoefficientError::InvalidCoefficient {
                    category,
                    value: row.coef_kgco2_m2_yr,
                });
            }
            entries.insert(
                category,
                CoefficientEntry {
                    coef_kgco2_m2_yr: row.coef_kgco2_m2_yr,
                    source_name: row.source_name,
                    version: row.version,
                },
            );
        }

        log::debug!("loaded {} carbon coefficients from {}", entries.len(), path.display());
        Ok(Self { entries })
    }

    /// Build a table programmatically (tests, embedded defaults).
    pub fn from_entries(entries: impl IntoIterator<Item = (Category, CoefficientEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, category: Category) -> Option<&CoefficientEntry> {
        self.entries.get(&category)
    }

    pub fn entries(&self) -> &BTreeMap<Category, CoefficientEntry> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
