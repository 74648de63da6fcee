/// Soil-saturation base risk component.
///
/// Maps the current saturation index S to a base risk score in [0, 100].
/// This is the foundation the storm/sensitivity amplification multiplies;
/// the 70-point ceiling of the moderate segment leaves headroom for it.
///
/// Piecewise-linear, continuous at every breakpoint:
/// - S ≤ 0.2 → 0 (soil too dry to sustain seepage pressure)
/// - 0.2 < S ≤ 1.0 → (S − 0.2) / 0.8 mapped onto [0, 70]
/// - S > 1.0 → S capped at 1.5, (S − 1.0) / 0.5 mapped onto [70, 100]

/// Dry threshold below which base risk is zero.
const S_DRY: f64 = 0.2;

/// Cap on the very-wet segment so this component alone stays bounded.
const S_CAP: f64 = 1.5;

/// Base risk score [0, 100] from saturation alone.
pub fn base_risk(saturation: f64) -> f64 {
    let s = saturation;

    if s <= S_DRY {
        return 0.0;
    }

    if s <= 1.0 {
        // [0.2, 1.0] → [0, 70]
        let fraction = (s - S_DRY) / (1.0 - S_DRY);
        return fraction * 70.0;
    }

    // Above nominal saturation: [1.0, 1.5] → [70, 100]
    let s_capped = s.min(S_CAP);
    let fraction = (s_capped - 1.0) / (S_CAP - 1.0);
    70.0 + fraction * 30.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_soil_scores_zero() {
        assert_eq!(base_risk(-0.5), 0.0);
        assert_eq!(base_risk(0.0), 0.0);
        assert_eq!(base_risk(0.2), 0.0);
    }

    #[test]
    fn test_moderate_segment_is_linear_to_seventy() {
        // Midpoint of [0.2, 1.0] lands at 35.
        assert!((base_risk(0.6) - 35.0).abs() < 1e-9);
        assert!((base_risk(1.0) - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_continuous_at_nominal_saturation() {
        let below = base_risk(1.0);
        let above = base_risk(1.0 + 1e-9);
        assert!((below - above).abs() < 1e-6);
    }

    #[test]
    fn test_very_wet_segment_reaches_hundred_and_caps() {
        assert!((base_risk(1.25) - 85.0).abs() < 1e-9);
        assert_eq!(base_risk(1.5), 100.0);
        assert_eq!(base_risk(3.0), 100.0);
    }

    #[test]
    fn test_monotonically_non_decreasing() {
        let mut prev = base_risk(-1.0);
        let mut s = -1.0;
        while s <= 2.0 {
            let current = base_risk(s);
            assert!(
                current >= prev - 1e-12,
                "base_risk decreased at S={}: {} -> {}",
                s,
                prev,
                current
            );
            prev = current;
            s += 0.01;
        }
    }
}
