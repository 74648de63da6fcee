/// Soil reference registry — parses soils.toml.
///
/// Maps a soil-type identifier to its water reference points (field
/// capacity and saturation, as fractional volumetric water content). This
/// is the single source of truth for soil parameters: normalization must
/// never substitute a default for an unrecognized soil type — an unknown
/// identifier is an explicit `UnknownSoilType` error.
///
/// Sites with no soil type configured use `DEFAULT_REFERENCE`, a loamy
/// preset matching the original sensor deployment.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::model::{SeepError, SoilReference};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Loamy default used when a site declares no soil type.
pub const DEFAULT_REFERENCE: SoilReference = SoilReference {
    field_capacity_vwc: 0.25,
    saturation_vwc: 0.40,
};

// ---------------------------------------------------------------------------
// TOML configuration structures
// ---------------------------------------------------------------------------

/// Single soil type entry from soils.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct SoilConfig {
    pub soil_type: String,
    pub field_capacity_vwc: f64,
    pub saturation_vwc: f64,
    pub description: String,
}

/// Root configuration structure for TOML parsing.
#[derive(Debug, Deserialize)]
struct SoilRegistryFile {
    soil: Vec<SoilConfig>,
}

impl From<&SoilConfig> for SoilReference {
    fn from(config: &SoilConfig) -> Self {
        SoilReference {
            field_capacity_vwc: config.field_capacity_vwc,
            saturation_vwc: config.saturation_vwc,
        }
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// In-memory soil registry keyed by soil type.
#[derive(Debug, Clone)]
pub struct SoilRegistry {
    soils: HashMap<String, SoilReference>,
}

impl SoilRegistry {
    /// Loads the registry from a soils.toml file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path.as_ref())?;
        let file: SoilRegistryFile = toml::from_str(&contents)?;

        for soil in &file.soil {
            if soil.field_capacity_vwc >= soil.saturation_vwc {
                return Err(format!(
                    "soil '{}': field capacity ({}) must be below saturation ({})",
                    soil.soil_type, soil.field_capacity_vwc, soil.saturation_vwc
                )
                .into());
            }
        }

        Ok(Self {
            soils: file
                .soil
                .iter()
                .map(|s| (s.soil_type.clone(), SoilReference::from(s)))
                .collect(),
        })
    }

    /// Loads from the default location (soils.toml in the working directory).
    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load("soils.toml")
    }

    /// Looks up the reference points for a soil type.
    ///
    /// # Errors
    /// `SeepError::UnknownSoilType` — the identifier is not in the registry.
    /// No default is substituted.
    pub fn find(&self, soil_type: &str) -> Result<SoilReference, SeepError> {
        self.soils
            .get(soil_type)
            .copied()
            .ok_or_else(|| SeepError::UnknownSoilType(soil_type.to_string()))
    }

    /// Resolves an optional per-site soil type: configured type if present
    /// (which must exist in the registry), loamy default otherwise.
    pub fn resolve(&self, soil_type: Option<&str>) -> Result<SoilReference, SeepError> {
        match soil_type {
            Some(name) => self.find(name),
            None => Ok(DEFAULT_REFERENCE),
        }
    }

    pub fn len(&self) -> usize {
        self.soils.len()
    }

    pub fn is_empty(&self) -> bool {
        self.soils.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
