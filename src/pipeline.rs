/// Per-timestep risk evaluation and the series runner.
///
/// `evaluate_timestep` is one pass through the core chain:
///
/// ```text
/// QC/smoothing → normalization → feature extraction
///     → (base, storm, sensitivity) → composition → category
/// ```
///
/// `run_series` drives that pass over a parsed timeseries, making the two
/// sequencing dependencies explicit rather than hidden state:
/// - `previous_valid` — the last successfully cleaned reading, threaded
///   forward as QC's sanctioned fallback.
/// - the sat_avg history — source of the "saturation one hour ago" input
///   to the sensitivity component.
///
/// A timestep whose evaluation fails is skipped and counted; the pipeline
/// never emits a score computed from partial or guessed inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::features;
use crate::ingest::timeseries::TimestepRow;
use crate::model::{
    RiskCategory, RiskScore, SaturationMap, SeepError, SensorReading, SoilReference,
};
use crate::normalize;
use crate::qc::{self, QcPolicy};
use crate::risk::{self, RiskComponents};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Pipeline configuration.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// How QC combines valid readings within a batch.
    pub qc_policy: QcPolicy,

    /// Timesteps per hour in the input series (default: 4, 15-minute data).
    /// Sets how far back the sensitivity component looks.
    pub steps_per_hour: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            qc_policy: QcPolicy::MedianOfValid,
            steps_per_hour: 4,
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation record
// ---------------------------------------------------------------------------

/// Everything one evaluation produced, kept together for the sink and the
/// endpoint: cleaned reading, saturation, features, the three component
/// scores, both risk scores, and the category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub site_code: String,
    /// Timestep timestamp as logged by the sensor export.
    pub timestamp: String,
    pub cleaned: SensorReading,
    pub saturation: SaturationMap,
    pub features: crate::model::FeatureSet,
    pub components: RiskComponents,
    pub score: RiskScore,
    pub category: RiskCategory,
    /// When this service performed the evaluation.
    pub evaluated_at: DateTime<Utc>,
}

/// Result of running a full series for one site.
#[derive(Debug)]
pub struct SeriesOutcome {
    pub records: Vec<EvaluationRecord>,
    /// Timesteps skipped because evaluation failed (QC exhausted, bad
    /// reference data, ...). Skipped steps are never scored.
    pub skipped: usize,
}

// ---------------------------------------------------------------------------
// Single-timestep evaluation
// ---------------------------------------------------------------------------

/// Evaluates one timestep from a batch of concurrent raw readings.
///
/// `saturation_1h_ago` is the site's sat_avg from one hour earlier; `None`
/// (no history yet, e.g. the first hour of a series) evaluates with zero
/// sensitivity — the current average is used as its own baseline.
///
/// # Errors
/// Any core error (`NoValidReading`, `InvalidReference`, ...) aborts the
/// timestep; nothing is scored.
pub fn evaluate_timestep(
    site_code: &str,
    timestamp: &str,
    batch: &[SensorReading],
    previous_valid: Option<&SensorReading>,
    soil: &SoilReference,
    saturation_1h_ago: Option<f64>,
    forecast_24h_mm: f64,
    idf_24h_2yr_mm: f64,
    qc_policy: QcPolicy,
) -> Result<EvaluationRecord, SeepError> {
    let cleaned = qc::clean(batch, previous_valid, qc_policy)?;
    let saturation = normalize::normalize(&cleaned, soil);

    let sat_avg = saturation.values().iter().sum::<f64>() / 4.0;
    let baseline_1h = saturation_1h_ago.unwrap_or(sat_avg);

    let features = features::extract(&saturation, baseline_1h, forecast_24h_mm, idf_24h_2yr_mm);

    let (components, score) = risk::compose(
        features.sat_avg,
        features.saturation_1h_ago,
        features.forecast_24h_mm,
        features.idf_24h_2yr_mm,
    )?;

    Ok(EvaluationRecord {
        site_code: site_code.to_string(),
        timestamp: timestamp.to_string(),
        cleaned,
        saturation,
        features,
        components,
        score,
        category: risk::categorize(score.displayed),
        evaluated_at: Utc::now(),
    })
}

// ---------------------------------------------------------------------------
// Series runner
// ---------------------------------------------------------------------------

/// Runs the evaluation chain over a parsed timeseries for one site.
///
/// `fallback_forecast_mm` is used for rows whose export lacks an archived
/// forecast column (typically a live Open-Meteo value fetched once per run).
pub fn run_series(
    site_code: &str,
    rows: &[TimestepRow],
    soil: &SoilReference,
    idf_24h_2yr_mm: f64,
    fallback_forecast_mm: f64,
    config: &PipelineConfig,
) -> SeriesOutcome {
    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;

    let mut previous_valid: Option<SensorReading> = None;
    // sat_avg of each successful evaluation, oldest first.
    let mut history: Vec<f64> = Vec::with_capacity(rows.len());

    for row in rows {
        let saturation_1h_ago = if history.len() >= config.steps_per_hour {
            Some(history[history.len() - config.steps_per_hour])
        } else {
            None
        };

        let forecast = row.forecast_24h_mm.unwrap_or(fallback_forecast_mm);

        // Logger exports carry one reading per timestep; a batch source
        // would pass several here.
        let batch = [row.reading];

        match evaluate_timestep(
            site_code,
            &row.timestamp,
            &batch,
            previous_valid.as_ref(),
            soil,
            saturation_1h_ago,
            forecast,
            idf_24h_2yr_mm,
            config.qc_policy,
        ) {
            Ok(record) => {
                previous_valid = Some(record.cleaned);
                history.push(record.features.sat_avg);
                records.push(record);
            }
            Err(e) => {
                eprintln!("  ⚠ {} {}: skipped ({})", site_code, row.timestamp, e);
                skipped += 1;
            }
        }
    }

    SeriesOutcome { records, skipped }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
