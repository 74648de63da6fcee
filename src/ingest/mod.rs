/// Data ingestion: clients and parsers for the external collaborators.
///
/// Submodules:
/// - `forecast` — Open-Meteo hourly precipitation → next-24h depth [mm].
/// - `idf` — MTO IDF curves: grid snapping, XML parameter extraction,
///   design storm depth.
/// - `timeseries` — sensor logger CSV export parsing.
/// - `fixtures` (test only) — representative payloads for each source.
///
/// Each external source gets its own file; new sources (e.g. a second
/// forecast provider) get a new file here rather than growing an existing
/// one.

pub mod fixtures;
pub mod forecast;
pub mod idf;
pub mod timeseries;
