/// Monitored-site registry — parses sites.toml.
///
/// Separates site metadata (location, soil type, data paths, IDF override)
/// from code, so adding a house or adjusting its soil preset never requires
/// recompiling the service.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;

// ---------------------------------------------------------------------------
// TOML configuration structures
// ---------------------------------------------------------------------------

/// Metadata for one monitored house, loaded from sites.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Short stable identifier, e.g. "maple_street_12".
    pub site_code: String,
    pub name: String,
    pub description: String,

    // Geographic location (drives forecast and IDF lookups)
    pub latitude: f64,
    pub longitude: f64,

    /// Soil type key into soils.toml. Omitted means the loamy default.
    pub soil_type: Option<String>,

    /// Fixed 24 h / 2-year design storm depth [mm]. When set, the live MTO
    /// IDF lookup is skipped for this site.
    pub idf_24h_2yr_mm: Option<f64>,

    /// Sensor timeseries CSV for batch evaluation runs.
    pub timeseries_csv: String,
}

/// Root configuration structure for TOML parsing.
#[derive(Debug, Deserialize)]
struct SiteRegistry {
    site: Vec<SiteConfig>,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Loads the site registry from sites.toml.
///
/// # Panics
/// Panics if the configuration file is missing, malformed, or empty. This
/// is intentional — the service cannot operate without site metadata.
///
/// # File Location
/// Expects `sites.toml` in the current working directory (project root when
/// running via `cargo run`).
pub fn load_sites() -> Vec<SiteConfig> {
    let config_path = "sites.toml";

    let contents = fs::read_to_string(config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path, e));

    let registry: SiteRegistry = toml::from_str(&contents)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", config_path, e));

    if registry.site.is_empty() {
        panic!("{} contains no sites", config_path);
    }

    registry.site
}

/// Loads the site registry as a lookup map keyed by site code.
pub fn load_sites_map() -> HashMap<String, SiteConfig> {
    load_sites()
        .into_iter()
        .map(|s| (s.site_code.clone(), s))
        .collect()
}

/// Finds a single site by code.
pub fn find_site(site_code: &str) -> Option<SiteConfig> {
    load_sites().into_iter().find(|s| s.site_code == site_code)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
