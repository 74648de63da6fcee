/// seepmon_service: basement seepage flood-risk monitoring service.
///
/// # Module structure
///
/// ```text
/// seepmon_service
/// ├── model      — shared data types (Wall, SensorReading, RiskScore, SeepError, …)
/// ├── qc         — batch quality control and smoothing (median / first-valid)
/// ├── normalize  — raw moisture → saturation index against soil references
/// ├── features   — perimeter statistics + rainfall context bundle
/// ├── risk       — component scores, multiplicative composition, categories
/// │   ├── soil_saturation  — base risk from the saturation index
/// │   ├── storm_severity   — forecast / IDF ratio factor
/// │   └── site_sensitivity — one-hour wetting-rate factor
/// ├── soils      — soil reference registry (soils.toml + loamy default)
/// ├── sites      — monitored-site registry (sites.toml)
/// ├── ingest
/// │   ├── forecast — Open-Meteo 24 h precipitation client
/// │   ├── idf      — MTO IDF curve client (grid snapping + XML parameters)
/// │   ├── timeseries — sensor logger CSV parsing
/// │   └── fixtures (test only) — representative API payloads
/// ├── pipeline   — per-timestep evaluation + series runner
/// ├── sink       — results CSV writer
/// └── endpoint   — JSON API serving the latest evaluation per site
/// ```

/// Public modules
pub mod endpoint;
pub mod features;
pub mod ingest;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod qc;
pub mod risk;
pub mod sink;
pub mod sites;
pub mod soils;
