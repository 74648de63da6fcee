/// Feature extraction: one timestep's saturation map → the scalar bundle
/// consumed by the risk model.
///
/// The extractor derives perimeter statistics (average, max/min, asymmetry,
/// wettest side) and passes the rainfall context through untouched. It
/// performs no lookups of its own — forecast depth and the IDF baseline are
/// supplied by the ingest collaborators, the 1h-ago saturation by the
/// series runner. Deterministic and pure.

use crate::model::{FeatureSet, SaturationMap, Wall};

/// Builds the feature bundle for one evaluation.
///
/// `wettest_side` is the wall attaining the maximum saturation; ties break
/// to the first wall in canonical order (north, south, east, west).
pub fn extract(
    saturation: &SaturationMap,
    saturation_1h_ago: f64,
    forecast_24h_mm: f64,
    idf_24h_2yr_mm: f64,
) -> FeatureSet {
    let values = saturation.values();

    let sat_avg = values.iter().sum::<f64>() / values.len() as f64;

    let mut wettest_side = Wall::North;
    let mut max_sat = saturation.get(Wall::North);
    let mut min_sat = max_sat;

    for wall in Wall::ALL {
        let s = saturation.get(wall);
        // Strict > keeps the earliest wall on exact ties.
        if s > max_sat {
            max_sat = s;
            wettest_side = wall;
        }
        if s < min_sat {
            min_sat = s;
        }
    }

    FeatureSet {
        sat_avg,
        max_sat,
        min_sat,
        sat_asymmetry: max_sat - min_sat,
        wettest_side,
        forecast_24h_mm,
        idf_24h_2yr_mm,
        saturation_1h_ago,
    }
}
