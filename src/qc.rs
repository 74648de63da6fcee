/// Batch quality control and smoothing for raw sensor readings.
///
/// Multiple readings can arrive within the same 15-minute window. This
/// module reduces such a batch to exactly one trusted `SensorReading`:
///
/// 1. Validate each reading (all four values finite, within [0, 1]).
///    A reading with any bad channel is rejected whole — we never salvage
///    individual channels from a failed reading.
/// 2. Combine the survivors according to the configured `QcPolicy`.
/// 3. If nothing survives, fall back to the caller-supplied previous valid
///    reading, or fail with `NoValidReading`.
///
/// Pure functions throughout; the previous-valid fallback is an explicit
/// input, not carried state, so the sequencing dependency between timesteps
/// stays visible at the call site.

use crate::model::{SeepError, SensorReading, Wall};

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// How to combine the readings that pass basic QC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QcPolicy {
    /// Per-wall median across all passing readings. Robust to one noisy
    /// channel inside an otherwise good batch. Authoritative policy.
    #[default]
    MedianOfValid,
    /// First passing reading wins, in batch order. Retained for
    /// compatibility with the earlier single-reading pipeline.
    FirstValid,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Basic QC for a single reading: every wall value must be finite and lie
/// within [0, 1] as fractional volumetric water content.
pub fn passes_basic_qc(reading: &SensorReading) -> bool {
    reading
        .values()
        .iter()
        .all(|v| v.is_finite() && (0.0..=1.0).contains(v))
}

// ---------------------------------------------------------------------------
// Cleaning
// ---------------------------------------------------------------------------

/// Reduces a batch of concurrent readings to one cleaned reading.
///
/// # Errors
/// `SeepError::NoValidReading` — the batch is empty or fully invalid and
/// `previous_valid` is `None`.
pub fn clean(
    batch: &[SensorReading],
    previous_valid: Option<&SensorReading>,
    policy: QcPolicy,
) -> Result<SensorReading, SeepError> {
    let valid: Vec<&SensorReading> = batch.iter().filter(|r| passes_basic_qc(r)).collect();

    if valid.is_empty() {
        return match previous_valid {
            Some(prev) => Ok(*prev),
            None => Err(SeepError::NoValidReading),
        };
    }

    match policy {
        QcPolicy::FirstValid => Ok(*valid[0]),
        QcPolicy::MedianOfValid => Ok(SensorReading {
            north: median_of(&valid, Wall::North),
            south: median_of(&valid, Wall::South),
            east: median_of(&valid, Wall::East),
            west: median_of(&valid, Wall::West),
        }),
    }
}

/// Median of one wall's values across the valid readings.
/// `readings` is non-empty by the time this is called.
fn median_of(readings: &[&SensorReading], wall: Wall) -> f64 {
    let mut values: Vec<f64> = readings.iter().map(|r| r.get(wall)).collect();
    values.sort_by(|a, b| a.partial_cmp(b).expect("QC-validated values are ordered"));

    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
