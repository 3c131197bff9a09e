use std::path::{Path, PathBuf};

use clap::Parser;
use log::{info, warn};

#[cfg(not(feature = "tracing"))]
use log::LevelFilter;
#[cfg(not(feature = "tracing"))]
use std::str::FromStr;

use landcover::analyze::{analyze, AnalyzeOptions};
use landcover::carbon::CarbonEstimator;
use landcover::imgio;
use landcover::report::{AnalysisReport, ParkInfo};

#[cfg(feature = "tracing")]
use landcover::core::init_tracing;
#[cfg(not(feature = "tracing"))]
use landcover::core::init_with_level;

/// Estimate the land-cover breakdown and annual carbon absorption of a
/// park from one aerial photograph.
#[derive(Parser, Debug)]
#[command(name = "landcover", version, about)]
struct Cli {
    /// Aerial photograph to analyze.
    image: PathBuf,

    /// Carbon coefficient CSV (vegetation_type, coef_kgco2_m2_yr, source_name, version).
    #[arg(long, default_value = "testdata/carbon_coefficients.csv")]
    coefficients: PathBuf,

    /// Known total park area in m²; omit to skip area and carbon totals.
    #[arg(long)]
    total_area_m2: Option<f64>,

    /// Park name recorded in the report.
    #[arg(long)]
    park_name: Option<String>,

    /// Park location recorded in the report.
    #[arg(long)]
    location: Option<String>,

    /// Free-form note recorded in the report.
    #[arg(long)]
    note: Option<String>,

    /// Overlay blend factor in (0, 1].
    #[arg(long, default_value_t = 0.5)]
    alpha: f32,

    /// Skip the resize to the canonical working resolution.
    #[arg(long)]
    no_resize: bool,

    /// Where to write the overlay image.
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Where to write the JSON report.
    #[arg(long, default_value = "landcover_report.json")]
    report: PathBuf,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    #[cfg(not(feature = "tracing"))]
    init_with_level(LevelFilter::from_str(&cli.log_level).unwrap_or(LevelFilter::Info))?;

    #[cfg(feature = "tracing")]
    init_tracing(false);

    run(cli)
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip(cli)))]
fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let estimator = CarbonEstimator::from_csv(&cli.coefficients)?;
    info!(
        "loaded {} carbon coefficients from {}",
        estimator.table().len(),
        cli.coefficients.display()
    );

    let img = imgio::load_rgb(&cli.image)?;
    let raster = if cli.no_resize {
        let view = imgio::rgb_view(&img);
        landcover::RgbRaster {
            width: view.width,
            height: view.height,
            data: view.data.to_vec(),
        }
    } else {
        imgio::preprocess(&img)?
    };
    info!(
        "analyzing {} at {}x{}",
        cli.image.display(),
        raster.width,
        raster.height
    );

    let options = AnalyzeOptions {
        total_area_m2: cli.total_area_m2,
        alpha: cli.alpha,
    };
    let analysis = analyze(&raster.view(), &estimator, &options)?;

    if !analysis.ratio_sum_ok {
        warn!("classified ratios do not sum to 1; part of the image is unclassified background");
    }

    for (category, breakdown) in analysis.areas.iter() {
        match breakdown.area_m2 {
            Some(area) => info!("{category:>8}: {:6.2}% ({area:.0} m2)", breakdown.percent),
            None => info!("{category:>8}: {:6.2}%", breakdown.percent),
        }
    }
    match analysis.carbon.total_tco2_yr {
        Some(total) => info!("estimated absorption: {total} tCO2/yr"),
        None => warn!("no total area supplied; carbon estimate unavailable"),
    }

    let mut report = AnalysisReport::new(
        ParkInfo {
            name: cli.park_name.clone(),
            location: cli.location.clone(),
            total_area_m2: cli.total_area_m2,
            note: cli.note.clone(),
        },
        &analysis,
    );

    if let Some(overlay_path) = &cli.overlay {
        ensure_parent_dir(overlay_path)?;
        imgio::to_image(&analysis.overlay)?.save(overlay_path)?;
        info!("wrote overlay to {}", overlay_path.display());
        report.overlay_path = Some(overlay_path.to_string_lossy().into_owned());
    }

    ensure_parent_dir(&cli.report)?;
    report.write_json(&cli.report)?;
    info!("wrote report JSON to {}", cli.report.display());

    Ok(())
}

fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
