/// Core data types for the basement seepage risk service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic beyond simple accessors — no I/O, no scoring.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sensor positions
// ---------------------------------------------------------------------------

/// The four foundation walls instrumented with soil-moisture sensors.
///
/// The sensor set is small and fixed, so readings are modeled as one field
/// per wall rather than an open-ended map — a missing channel is a compile
/// error instead of a runtime lookup failure. `Wall::ALL` defines the
/// canonical ordering used for iteration and for deterministic tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wall {
    North,
    South,
    East,
    West,
}

impl Wall {
    /// Canonical wall ordering: north, south, east, west.
    pub const ALL: [Wall; 4] = [Wall::North, Wall::South, Wall::East, Wall::West];

    pub fn as_str(&self) -> &'static str {
        match self {
            Wall::North => "north",
            Wall::South => "south",
            Wall::East => "east",
            Wall::West => "west",
        }
    }
}

impl std::fmt::Display for Wall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Reading types
// ---------------------------------------------------------------------------

/// One raw soil-moisture reading: fractional volumetric water content
/// (m³/m³) at each foundation wall, nominally in [0, 1].
///
/// Several of these may arrive within the same 15-minute window (a batch);
/// `qc::clean` reduces a batch to exactly one trusted reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl SensorReading {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self { north, south, east, west }
    }

    /// Uniform value on all four walls. Test and fixture convenience.
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn get(&self, wall: Wall) -> f64 {
        match wall {
            Wall::North => self.north,
            Wall::South => self.south,
            Wall::East => self.east,
            Wall::West => self.west,
        }
    }

    /// Values in canonical wall order.
    pub fn values(&self) -> [f64; 4] {
        [self.north, self.south, self.east, self.west]
    }
}

/// Normalized saturation index per wall: S = (θ − θ_fc) / (θ_sat − θ_fc).
///
/// Deliberately NOT clamped — S < 0 means drier than field capacity, S > 1
/// wetter than nominal saturation (pooling, or soil preset mismatch). The
/// risk components decide how to interpret out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaturationMap {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl SaturationMap {
    pub fn get(&self, wall: Wall) -> f64 {
        match wall {
            Wall::North => self.north,
            Wall::South => self.south,
            Wall::East => self.east,
            Wall::West => self.west,
        }
    }

    /// Values in canonical wall order.
    pub fn values(&self) -> [f64; 4] {
        [self.north, self.south, self.east, self.west]
    }
}

// ---------------------------------------------------------------------------
// Soil reference
// ---------------------------------------------------------------------------

/// Soil water reference points for one soil type, as fractional volumetric
/// water content. Invariant: `field_capacity_vwc < saturation_vwc`.
///
/// Supplied by the `soils` registry (soils.toml or the built-in default);
/// immutable for the duration of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilReference {
    /// Water content after free drainage — the saturation index floor (S = 0).
    pub field_capacity_vwc: f64,
    /// Water content with essentially all pore space filled — the ceiling (S = 1).
    pub saturation_vwc: f64,
}

// ---------------------------------------------------------------------------
// Derived features
// ---------------------------------------------------------------------------

/// Scalar features derived from one timestep's saturation map plus rainfall
/// context supplied by external collaborators. Built fresh per evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Mean saturation index across the four walls.
    pub sat_avg: f64,
    /// Maximum per-wall saturation index.
    pub max_sat: f64,
    /// Minimum per-wall saturation index.
    pub min_sat: f64,
    /// max_sat − min_sat.
    pub sat_asymmetry: f64,
    /// Wall attaining max_sat (first in canonical order on ties).
    pub wettest_side: Wall,
    /// Forecast rainfall depth over the next 24 h [mm].
    pub forecast_24h_mm: f64,
    /// 24 h / 2-year design storm depth at this location [mm].
    pub idf_24h_2yr_mm: f64,
    /// sat_avg observed one hour earlier.
    pub saturation_1h_ago: f64,
}

// ---------------------------------------------------------------------------
// Risk outputs
// ---------------------------------------------------------------------------

/// The pair of risk scores produced by the composer.
///
/// `internal` is the raw hazard index: ≥ 0, intentionally unbounded above
/// (values over 100 represent compounding extreme conditions). `displayed`
/// is clamped to [0, 100] for the user-facing category mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    pub internal: f64,
    pub displayed: f64,
}

/// User-facing risk categories, in ascending order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
    Severe,
}

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Moderate => "Moderate",
            RiskCategory::High => "High",
            RiskCategory::Severe => "Severe",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise while evaluating seepage risk or fetching the
/// external inputs it depends on.
///
/// Core functions fail fast and surface these to the immediate caller; the
/// only sanctioned recovery path is QC's explicit `previous_valid` fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum SeepError {
    /// Every reading in the QC batch failed validation and no previous
    /// valid reading was available to fall back on.
    NoValidReading,
    /// A required sensor column was absent at the serialization boundary.
    MissingSensorKey(String),
    /// The soil-type identifier has no entry in the soil reference registry.
    UnknownSoilType(String),
    /// The IDF baseline depth was zero or negative; the storm severity
    /// ratio is undefined.
    InvalidReference(f64),
    /// No IDF curve parameters exist for the snapped grid coordinate.
    LocationNotFound(String),
    /// Non-2xx HTTP response from an external API.
    HttpError(u16),
    /// A response body or data file could not be parsed.
    ParseError(String),
}

impl std::fmt::Display for SeepError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeepError::NoValidReading => {
                write!(f, "All readings in batch failed QC and no previous valid reading available")
            }
            SeepError::MissingSensorKey(key) => write!(f, "Missing sensor column: {}", key),
            SeepError::UnknownSoilType(soil) => write!(f, "Unknown soil type: {}", soil),
            SeepError::InvalidReference(v) => {
                write!(f, "Invalid IDF reference depth: {} mm (must be > 0)", v)
            }
            SeepError::LocationNotFound(coord) => {
                write!(f, "No IDF curve parameters for coordinate: {}", coord)
            }
            SeepError::HttpError(code) => write!(f, "HTTP error: {}", code),
            SeepError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for SeepError {}
