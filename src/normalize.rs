/// Saturation normalization: raw volumetric water content → saturation index.
///
/// For each wall, S = (θ − θ_fc) / (θ_sat − θ_fc) against the soil-specific
/// reference points. S = 0 at field capacity, S = 1 at saturation.
///
/// S is NOT clamped here. Out-of-range values are meaningful downstream:
/// S < 0 is drier than field capacity, S > 1 wetter than the nominal
/// saturation point (pooling, or a soil preset that doesn't match the site).
/// How to interpret them is the risk model's decision, not the normalizer's.

use crate::model::{SaturationMap, SensorReading, SoilReference};

/// Converts one cleaned reading into a per-wall saturation map.
pub fn normalize(reading: &SensorReading, soil: &SoilReference) -> SaturationMap {
    let span = soil.saturation_vwc - soil.field_capacity_vwc;

    let index = |vwc: f64| (vwc - soil.field_capacity_vwc) / span;

    SaturationMap {
        north: index(reading.north),
        south: index(reading.south),
        east: index(reading.east),
        west: index(reading.west),
    }
}
