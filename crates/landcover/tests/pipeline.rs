use approx::assert_abs_diff_eq;
use std::io::Write;

use landcover::analyze::{analyze, AnalyzeOptions};
use landcover::carbon::{CarbonEstimator, CoefficientTable};
use landcover::report::{AnalysisReport, ParkInfo};
use landcover::{Category, RgbRaster};

const DARK_GREEN: [u8; 3] = [30, 120, 40]; // forest band only
const SATURATED_RED: [u8; 3] = [200, 30, 30]; // matches no band

/// 100x100 image whose top 30 rows match the forest band and nothing else.
fn forest_30pct_image() -> RgbRaster {
    let mut img = RgbRaster::filled(100, 100, SATURATED_RED);
    img.fill_rect(0, 0, 100, 30, DARK_GREEN);
    img
}

fn coefficients_csv(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn forest_estimator() -> CarbonEstimator {
    let file = coefficients_csv(
        "vegetation_type,coef_kgco2_m2_yr,source_name,version\n\
         FOREST,10.0,NIFS,2019\n\
         GRASS,0.35,NIFS,2019\n",
    );
    CarbonEstimator::from_csv(file.path()).unwrap()
}

#[test]
fn thirty_percent_forest_with_known_total_area() {
    let img = forest_30pct_image();
    let options = AnalyzeOptions {
        total_area_m2: Some(10_000.0),
        ..AnalyzeOptions::default()
    };
    let analysis = analyze(&img.view(), &forest_estimator(), &options).unwrap();

    assert_abs_diff_eq!(analysis.ratios[Category::Forest].ratio, 0.30, epsilon = 1e-12);
    assert_abs_diff_eq!(
        analysis.areas[Category::Forest].area_m2.unwrap(),
        3_000.0,
        epsilon = 1e-9
    );
    assert_eq!(analysis.carbon.total_tco2_yr, Some(30.0));
    assert_abs_diff_eq!(
        analysis.carbon.by_type[&Category::Forest],
        30.0,
        epsilon = 1e-9
    );

    // 70% of the image is unclassified background
    assert!(!analysis.ratio_sum_ok);
    for c in Category::ALL {
        if c != Category::Forest {
            assert_eq!(analysis.ratios[c].ratio, 0.0, "unexpected {c} pixels");
        }
    }
}

#[test]
fn omitted_total_area_propagates_null() {
    let img = forest_30pct_image();
    let analysis = analyze(
        &img.view(),
        &forest_estimator(),
        &AnalyzeOptions::default(),
    )
    .unwrap();

    assert!(Category::ALL
        .iter()
        .all(|&c| analysis.areas[c].area_m2.is_none()));
    assert_eq!(analysis.carbon.total_tco2_yr, None);
    assert!(analysis.carbon.by_type.is_empty());
}

#[test]
fn missing_forest_coefficient_drops_forest_from_the_estimate() {
    let file = coefficients_csv(
        "vegetation_type,coef_kgco2_m2_yr,source_name,version\n\
         GRASS,0.35,NIFS,2019\n",
    );
    let estimator = CarbonEstimator::from_csv(file.path()).unwrap();

    let img = forest_30pct_image();
    let options = AnalyzeOptions {
        total_area_m2: Some(10_000.0),
        ..AnalyzeOptions::default()
    };
    let analysis = analyze(&img.view(), &estimator, &options).unwrap();

    assert!(!analysis.carbon.by_type.contains_key(&Category::Forest));
    assert_eq!(analysis.carbon.total_tco2_yr, Some(0.0));
}

#[test]
fn masks_partition_the_classified_pixels() {
    let img = forest_30pct_image();
    let analysis = analyze(
        &img.view(),
        &forest_estimator(),
        &AnalyzeOptions::default(),
    )
    .unwrap();

    for (i, &a) in Category::ALL.iter().enumerate() {
        for &b in &Category::ALL[i + 1..] {
            assert!(
                !analysis.masks[a].overlaps(&analysis.masks[b]),
                "masks for {a} and {b} overlap"
            );
        }
    }

    let sum: f64 = Category::ALL
        .iter()
        .map(|&c| analysis.ratios[c].ratio)
        .sum();
    assert!((0.0..=1.0).contains(&sum));
}

#[test]
fn overlay_keeps_dimensions_and_paints_forest() {
    let img = forest_30pct_image();
    let analysis = analyze(
        &img.view(),
        &forest_estimator(),
        &AnalyzeOptions {
            total_area_m2: None,
            alpha: 1.0,
        },
    )
    .unwrap();

    assert_eq!(
        (analysis.overlay.width, analysis.overlay.height),
        (100, 100)
    );
    assert_eq!(analysis.overlay.pixel(50, 10), Category::Forest.display_color());
    // background pixels are untouched
    assert_eq!(analysis.overlay.pixel(50, 90), SATURATED_RED);
}

#[test]
fn report_round_trips_a_real_analysis() {
    let img = forest_30pct_image();
    let options = AnalyzeOptions {
        total_area_m2: Some(10_000.0),
        ..AnalyzeOptions::default()
    };
    let analysis = analyze(&img.view(), &forest_estimator(), &options).unwrap();

    let park = ParkInfo {
        name: Some("Test Park".to_owned()),
        location: None,
        total_area_m2: options.total_area_m2,
        note: Some("synthetic".to_owned()),
    };
    let report = AnalysisReport::new(park, &analysis);

    let file = tempfile::NamedTempFile::new().unwrap();
    report.write_json(file.path()).unwrap();
    let loaded = AnalysisReport::load_json(file.path()).unwrap();

    assert_eq!(loaded, report);
    assert_eq!(loaded.carbon.total_tco2_yr, Some(30.0));
    assert_abs_diff_eq!(
        loaded.segmentation[&Category::Forest].area_m2.unwrap(),
        3_000.0,
        epsilon = 1e-9
    );
}

#[test]
fn estimator_construction_fails_without_a_table() {
    let err = CarbonEstimator::from_csv("definitely/not/here.csv").unwrap_err();
    assert!(err.to_string().contains("not found"));
    // a programmatic empty table is still a valid estimator
    let estimator = CarbonEstimator::new(CoefficientTable::default());
    assert!(estimator.table().is_empty());
}
