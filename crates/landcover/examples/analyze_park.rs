use std::{env, fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use landcover::analyze::{analyze, AnalyzeOptions};
use landcover::carbon::CarbonEstimator;
use landcover::imgio;
use landcover::report::{AnalysisReport, ParkInfo};

#[cfg(not(feature = "tracing"))]
use std::str::FromStr;

#[cfg(not(feature = "tracing"))]
use log::{info, LevelFilter};

#[cfg(feature = "tracing")]
use tracing::info;

#[cfg(feature = "tracing")]
use landcover::core::init_tracing;
#[cfg(not(feature = "tracing"))]
use landcover::core::init_with_level;

#[derive(Debug, Deserialize)]
struct ExampleConfig {
    image_path: String,
    coefficients_path: String,
    #[serde(default)]
    park: ParkInfo,
    #[serde(default)]
    overlay_path: Option<String>,
    #[serde(default)]
    report_path: Option<String>,
    #[serde(default = "default_alpha")]
    alpha: f32,
}

fn default_alpha() -> f32 {
    0.5
}

#[derive(Debug, Serialize)]
struct ExampleSummary {
    config_path: String,
    total_tco2_yr: Option<f64>,
    ratio_sum_ok: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(not(feature = "tracing"))]
    init_with_level(LevelFilter::from_str("info").unwrap_or(LevelFilter::Info))?;

    #[cfg(feature = "tracing")]
    init_tracing(false);

    run()
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info"))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = parse_config_path();
    let cfg: ExampleConfig = serde_json::from_str(&fs::read_to_string(&config_path)?)?;

    let estimator = CarbonEstimator::from_csv(&cfg.coefficients_path)?;
    let img = imgio::load_rgb(&cfg.image_path)?;
    let raster = imgio::preprocess(&img)?;
    info!("analyzing {} at {}x{}", cfg.image_path, raster.width, raster.height);

    let options = AnalyzeOptions {
        total_area_m2: cfg.park.total_area_m2,
        alpha: cfg.alpha,
    };
    let analysis = analyze(&raster.view(), &estimator, &options)?;

    for (category, breakdown) in analysis.areas.iter() {
        info!("{category:>8}: {:6.2}%", breakdown.percent);
    }

    let mut report = AnalysisReport::new(cfg.park, &analysis);
    if let Some(overlay_path) = &cfg.overlay_path {
        imgio::to_image(&analysis.overlay)?.save(overlay_path)?;
        info!("wrote overlay to {overlay_path}");
        report.overlay_path = Some(overlay_path.clone());
    }

    let report_path = cfg
        .report_path
        .unwrap_or_else(|| "tmpdata/analyze_park_report.json".to_owned());
    if let Some(parent) = PathBuf::from(&report_path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    report.write_json(&report_path)?;
    info!("wrote report JSON to {report_path}");

    let summary = ExampleSummary {
        config_path: config_path.to_string_lossy().into_owned(),
        total_tco2_yr: analysis.carbon.total_tco2_yr,
        ratio_sum_ok: analysis.ratio_sum_ok,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn parse_config_path() -> PathBuf {
    env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("testdata/analyze_park_config.json"))
}
