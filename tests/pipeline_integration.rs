/// Integration tests for the full evaluation chain.
///
/// These exercise the library the way the batch evaluator uses it:
/// parse a logger CSV export, run the series with QC fallback and the
/// one-hour sensitivity baseline threading, and check the scores and
/// categories that come out the other end. No network, no filesystem.

use seepmon_service::ingest::timeseries::parse_timeseries_csv;
use seepmon_service::model::{RiskCategory, SeepError, SensorReading, SoilReference, Wall};
use seepmon_service::pipeline::{self, PipelineConfig};
use seepmon_service::qc::QcPolicy;
use seepmon_service::risk;
use seepmon_service::soils::DEFAULT_REFERENCE;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Steady-wetting series: theta rises 0.005 per 15-minute step from 0.30,
/// with one glitched row (east channel out of range) at step 6.
fn wetting_csv() -> String {
    let mut csv = String::from(
        "timestamp,north_sensor,south_sensor,east_sensor,west_sensor,forecast_24h_mm\n",
    );
    for i in 0..10 {
        let theta = 0.30 + 0.005 * i as f64;
        let east = if i == 6 { 1.6 } else { theta };
        csv.push_str(&format!(
            "2026-04-12T{:02}:{:02}:00,{:.3},{:.3},{:.3},{:.3},30.0\n",
            i / 4,
            (i % 4) * 15,
            theta,
            theta,
            east,
            theta
        ));
    }
    csv
}

// ---------------------------------------------------------------------------
// Worked example from the model documentation
// ---------------------------------------------------------------------------

#[test]
fn test_worked_example_end_to_end() {
    // S_now = 0.6, S_1h_ago = 0.5, forecast 50 mm against a 25 mm 2-year
    // depth: ratio 2.0 caps the storm factor at 1.5, the hour's rise of
    // 0.1 saturates sensitivity at 1.0, base risk is 35, so
    // internal = 35 × (1 + 1.5) = 87.5 → Severe.
    let batch = [SensorReading::uniform(0.34)]; // S = 0.6 under the default soil

    let record = pipeline::evaluate_timestep(
        "maple_street_12",
        "2026-04-12T06:00:00",
        &batch,
        None,
        &DEFAULT_REFERENCE,
        Some(0.5),
        50.0,
        25.0,
        QcPolicy::MedianOfValid,
    )
    .expect("evaluation should succeed");

    assert!((record.components.base_risk - 35.0).abs() < 1e-9);
    assert!((record.components.storm_factor - 1.5).abs() < 1e-12);
    assert!((record.components.sensitivity - 1.0).abs() < 1e-12);
    assert!((record.score.internal - 87.5).abs() < 1e-9);
    assert!((record.score.displayed - 87.5).abs() < 1e-9);
    assert_eq!(record.category, RiskCategory::Severe);
}

// ---------------------------------------------------------------------------
// CSV → series → scores
// ---------------------------------------------------------------------------

#[test]
fn test_series_from_csv_recovers_glitched_row_via_fallback() {
    let rows = parse_timeseries_csv(&wetting_csv()).expect("CSV should parse");
    assert_eq!(rows.len(), 10);

    let outcome = pipeline::run_series(
        "test_site",
        &rows,
        &DEFAULT_REFERENCE,
        25.0,
        0.0,
        &PipelineConfig::default(),
    );

    // The glitched row falls back to the previous cleaned reading rather
    // than being skipped or scored from a bad channel.
    assert_eq!(outcome.skipped, 0);
    assert_eq!(outcome.records.len(), 10);

    let glitched = &outcome.records[6];
    let before = &outcome.records[5];
    assert_eq!(glitched.cleaned, before.cleaned);
}

#[test]
fn test_series_scores_rise_with_steady_wetting() {
    let rows = parse_timeseries_csv(&wetting_csv()).expect("CSV should parse");
    let outcome = pipeline::run_series(
        "test_site",
        &rows,
        &DEFAULT_REFERENCE,
        25.0,
        0.0,
        &PipelineConfig::default(),
    );

    let first = outcome.records.first().unwrap();
    let last = outcome.records.last().unwrap();
    assert!(
        last.score.displayed > first.score.displayed,
        "steady wetting must not lower the displayed score ({} -> {})",
        first.score.displayed,
        last.score.displayed
    );
}

#[test]
fn test_uniform_reading_has_no_asymmetry_and_north_tie_break() {
    let csv = "timestamp,north_sensor,south_sensor,east_sensor,west_sensor\n\
               2026-04-12T00:00:00,0.32,0.32,0.32,0.32\n";
    let rows = parse_timeseries_csv(csv).unwrap();
    let outcome = pipeline::run_series(
        "test_site",
        &rows,
        &DEFAULT_REFERENCE,
        25.0,
        0.0,
        &PipelineConfig::default(),
    );

    let record = &outcome.records[0];
    assert_eq!(record.features.sat_asymmetry, 0.0);
    assert_eq!(record.features.wettest_side, Wall::North);
}

// ---------------------------------------------------------------------------
// Error propagation
// ---------------------------------------------------------------------------

#[test]
fn test_all_invalid_series_scores_nothing() {
    let csv = "timestamp,north_sensor,south_sensor,east_sensor,west_sensor\n\
               2026-04-12T00:00:00,1.5,0.3,0.3,0.3\n\
               2026-04-12T00:15:00,0.3,nan,0.3,0.3\n";
    let rows = parse_timeseries_csv(csv).unwrap();

    let outcome = pipeline::run_series(
        "test_site",
        &rows,
        &DEFAULT_REFERENCE,
        25.0,
        0.0,
        &PipelineConfig::default(),
    );

    assert_eq!(outcome.records.len(), 0);
    assert_eq!(outcome.skipped, 2);
}

#[test]
fn test_invalid_idf_baseline_never_produces_a_score() {
    let batch = [SensorReading::uniform(0.34)];
    let result = pipeline::evaluate_timestep(
        "test_site",
        "t",
        &batch,
        None,
        &DEFAULT_REFERENCE,
        None,
        50.0,
        -5.0,
        QcPolicy::MedianOfValid,
    );
    assert!(matches!(result, Err(SeepError::InvalidReference(_))));
}

// ---------------------------------------------------------------------------
// Component properties driven through the public compose API
// ---------------------------------------------------------------------------

#[test]
fn test_soil_reference_changes_the_score_for_the_same_theta() {
    // 0.42 m³/m³ is above nominal saturation for sand but barely past
    // field capacity for clay; the score must reflect the soil, not just
    // the raw reading.
    let clay = SoilReference { field_capacity_vwc: 0.35, saturation_vwc: 0.48 };
    let sand = SoilReference { field_capacity_vwc: 0.10, saturation_vwc: 0.38 };

    let batch = [SensorReading::uniform(0.42)];

    let in_clay = pipeline::evaluate_timestep(
        "s", "t", &batch, None, &clay, None, 0.0, 25.0, QcPolicy::MedianOfValid,
    )
    .unwrap();
    let in_sand = pipeline::evaluate_timestep(
        "s", "t", &batch, None, &sand, None, 0.0, 25.0, QcPolicy::MedianOfValid,
    )
    .unwrap();

    assert!(in_clay.features.sat_avg < 1.0 && in_sand.features.sat_avg > 1.0);
    assert!(in_clay.score.displayed < in_sand.score.displayed);
}

#[test]
fn test_displayed_score_bounded_over_a_sweep() {
    for theta in [0.0, 0.1, 0.25, 0.3, 0.34, 0.38, 0.4, 0.7, 1.0] {
        for forecast in [0.0, 10.0, 40.0, 120.0] {
            let batch = [SensorReading::uniform(theta)];
            let record = pipeline::evaluate_timestep(
                "s", "t", &batch, None, &DEFAULT_REFERENCE, Some(0.0), forecast, 25.0,
                QcPolicy::MedianOfValid,
            )
            .unwrap();

            assert!(record.score.internal >= 0.0);
            assert!((0.0..=100.0).contains(&record.score.displayed));
            assert_eq!(record.category, risk::categorize(record.score.displayed));
        }
    }
}
