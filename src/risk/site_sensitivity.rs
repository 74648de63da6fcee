/// Site-sensitivity risk component.
///
/// Measures how fast local soil saturation has risen over the last hour —
/// a reactive site (sandy backfill, poor drainage, roof runoff pooling)
/// wets up quickly when rain arrives, and its risk should amplify more
/// than a sluggish site under the same storm.
///
/// ΔS = max(0, S_now − S_1h_ago); only wetting counts, drying is ignored.
/// The index is ΔS / 0.1 clamped to [0, 1], where 0.1 is the reference
/// "highly reactive" one-hour rise.

/// One-hour saturation rise regarded as fully reactive.
const DELTA_S_REF: f64 = 0.1;

/// Sensitivity index in [0, 1].
pub fn sensitivity_index(saturation_now: f64, saturation_1h_ago: f64) -> f64 {
    let delta = (saturation_now - saturation_1h_ago).max(0.0);
    (delta / DELTA_S_REF).clamp(0.0, 1.0)
}
