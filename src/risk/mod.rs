/// Seepage risk model: component scores, multiplicative composition, and
/// user-facing category mapping.
///
/// Submodules:
/// - `soil_saturation` — base risk [0, 100] from the saturation index alone.
/// - `storm_severity` — storm factor [0, 1.5] from forecast / IDF ratio.
/// - `site_sensitivity` — sensitivity factor [0, 1] from the last hour's rise.
///
/// Composition:
///
/// ```text
/// amplification = 1 + sensitivity × storm
/// internal      = base × amplification
/// displayed     = clamp(internal, 0, 100)
/// ```
///
/// The multiplicative form gives the documented behavior: dry soil stays
/// low-risk under any storm; wet soil under a small storm is scored mostly
/// by saturation; wet + reactive + severe storm compounds, and `internal`
/// may exceed 100 (extreme conditions) while `displayed` is clamped for
/// category mapping.
///
/// Everything here is pure and synchronous; all inputs arrive as explicit
/// arguments and nothing is cached between evaluations.

pub mod site_sensitivity;
pub mod soil_saturation;
pub mod storm_severity;

use crate::model::{RiskCategory, RiskScore, SeepError};

// ---------------------------------------------------------------------------
// Component breakdown
// ---------------------------------------------------------------------------

/// The three component scores, preserved for reporting alongside the final
/// risk score (the sink and endpoint expose them per evaluation).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RiskComponents {
    /// Soil-saturation base risk [0, 100].
    pub base_risk: f64,
    /// Storm-severity factor [0, 1.5].
    pub storm_factor: f64,
    /// Site-sensitivity factor [0, 1].
    pub sensitivity: f64,
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// Composes the three components into internal/displayed risk scores.
///
/// # Errors
/// `SeepError::InvalidReference` — propagated from the storm component when
/// the IDF baseline is zero or negative. Nothing is scored in that case.
pub fn compose(
    saturation_now: f64,
    saturation_1h_ago: f64,
    forecast_24h_mm: f64,
    idf_24h_2yr_mm: f64,
) -> Result<(RiskComponents, RiskScore), SeepError> {
    let base_risk = soil_saturation::base_risk(saturation_now);
    let storm_factor = storm_severity::storm_factor(forecast_24h_mm, idf_24h_2yr_mm)?;
    let sensitivity = site_sensitivity::sensitivity_index(saturation_now, saturation_1h_ago);

    let amplification = 1.0 + sensitivity * storm_factor;
    let internal = base_risk * amplification;
    let displayed = internal.clamp(0.0, 100.0);

    Ok((
        RiskComponents { base_risk, storm_factor, sensitivity },
        RiskScore { internal, displayed },
    ))
}

// ---------------------------------------------------------------------------
// Category mapping
// ---------------------------------------------------------------------------

/// Buckets a displayed score into the user-facing category.
///
/// Boundaries are half-open on the low end of each bucket: a score of
/// exactly 30 is Moderate, 60 is High, 80 is Severe.
pub fn categorize(displayed_score: f64) -> RiskCategory {
    if displayed_score < 30.0 {
        RiskCategory::Low
    } else if displayed_score < 60.0 {
        RiskCategory::Moderate
    } else if displayed_score < 80.0 {
        RiskCategory::High
    } else {
        RiskCategory::Severe
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
