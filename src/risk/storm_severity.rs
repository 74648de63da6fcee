/// Storm-severity risk component.
///
/// Expresses the incoming storm relative to the local climate: the ratio of
/// forecast 24 h rainfall to the 24 h / 2-year IDF design depth. A given
/// depth that is routine in one climate can be a 2-year event in another,
/// so the raw depth is never used directly.
///
/// Piecewise-linear mapping of the ratio onto a factor in [0, 1.5]:
/// - ratio ≤ 0.3 → 0 (small event, negligible extra risk)
/// - 0.3 < ratio ≤ 1.0 → (ratio − 0.3) / 0.7 onto [0, 1]
/// - ratio > 1.0 → ratio capped at 1.5, (ratio − 1.0) / 0.5 onto [1.0, 1.5]

use crate::model::SeepError;

/// Ratio below which a storm adds no risk.
const RATIO_FLOOR: f64 = 0.3;

/// Ratio cap; storms beyond 1.5× the 2-year depth saturate the factor.
const RATIO_CAP: f64 = 1.5;

/// Dimensionless storm factor in [0, 1.5].
///
/// # Errors
/// `SeepError::InvalidReference` if the IDF baseline is zero or negative —
/// the ratio is undefined and the caller must not have let that through.
pub fn storm_factor(forecast_24h_mm: f64, idf_24h_2yr_mm: f64) -> Result<f64, SeepError> {
    if idf_24h_2yr_mm <= 0.0 {
        return Err(SeepError::InvalidReference(idf_24h_2yr_mm));
    }

    let ratio = forecast_24h_mm / idf_24h_2yr_mm;

    if ratio <= RATIO_FLOOR {
        return Ok(0.0);
    }

    if ratio <= 1.0 {
        // [0.3, 1.0] → [0, 1]
        return Ok((ratio - RATIO_FLOOR) / (1.0 - RATIO_FLOOR));
    }

    // [1.0, 1.5] → [1.0, 1.5]
    let ratio_capped = ratio.min(RATIO_CAP);
    Ok(1.0 + (ratio_capped - 1.0) / (RATIO_CAP - 1.0) * 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_storm_contributes_nothing() {
        // ratio 0.2 and the 0.3 boundary itself both map to zero.
        assert_eq!(storm_factor(5.0, 25.0).unwrap(), 0.0);
        assert_eq!(storm_factor(7.5, 25.0).unwrap(), 0.0);
    }

    #[test]
    fn test_two_year_storm_maps_to_one() {
        assert!((storm_factor(25.0, 25.0).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_midrange_is_linear() {
        // ratio 0.65 is the midpoint of [0.3, 1.0] → factor 0.5.
        assert!((storm_factor(16.25, 25.0).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_extreme_storm_saturates_at_one_point_five() {
        // ratio 1.5 exactly, and anything beyond, both give 1.5.
        assert!((storm_factor(37.5, 25.0).unwrap() - 1.5).abs() < 1e-12);
        assert!((storm_factor(200.0, 25.0).unwrap() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_boost_segment_continuous_at_ratio_one() {
        let below = storm_factor(25.0, 25.0).unwrap();
        let above = storm_factor(25.0 + 1e-6, 25.0).unwrap();
        assert!((below - above).abs() < 1e-5);
    }

    #[test]
    fn test_zero_or_negative_idf_baseline_is_an_error() {
        assert_eq!(
            storm_factor(10.0, 0.0),
            Err(SeepError::InvalidReference(0.0))
        );
        assert_eq!(
            storm_factor(10.0, -3.0),
            Err(SeepError::InvalidReference(-3.0))
        );
    }
}
