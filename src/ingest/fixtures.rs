/// Test fixtures: representative payloads from the external data sources.
///
/// These are structurally complete but truncated to the minimum needed to
/// exercise the parsers:
/// - Open-Meteo hourly forecast JSON (parallel time/precipitation arrays)
/// - MTO IDF XML (per-latitude file with coord/period elements carrying
///   the `a`/`b` curve parameters as attributes)
/// - Sensor logger CSV export (one row per 15-minute timestep)

/// Open-Meteo GEM forecast, 26 forecast hours. The first 24 hours contain
/// one 6-hour storm totalling 18.0 mm (2.5 + 5 × 3.1); hours 25–26 carry
/// 9.9 mm each and must be excluded by the 24-hour cut-off.
#[cfg(test)]
pub(crate) fn fixture_open_meteo_json() -> &'static str {
    r#"{
      "latitude": 43.68,
      "longitude": -79.41,
      "generationtime_ms": 0.35,
      "timezone": "UTC",
      "hourly_units": { "time": "iso8601", "precipitation": "mm" },
      "hourly": {
        "time": [
          "2026-08-27T00:00", "2026-08-27T01:00", "2026-08-27T02:00", "2026-08-27T03:00",
          "2026-08-27T04:00", "2026-08-27T05:00", "2026-08-27T06:00", "2026-08-27T07:00",
          "2026-08-27T08:00", "2026-08-27T09:00", "2026-08-27T10:00", "2026-08-27T11:00",
          "2026-08-27T12:00", "2026-08-27T13:00", "2026-08-27T14:00", "2026-08-27T15:00",
          "2026-08-27T16:00", "2026-08-27T17:00", "2026-08-27T18:00", "2026-08-27T19:00",
          "2026-08-27T20:00", "2026-08-27T21:00", "2026-08-27T22:00", "2026-08-27T23:00",
          "2026-08-28T00:00", "2026-08-28T01:00"
        ],
        "precipitation": [
          0.0, 0.0, 0.0, 0.0,
          0.0, 0.0, 2.5, 3.1,
          3.1, 3.1, 3.1, 3.1,
          0.0, 0.0, 0.0, 0.0,
          0.0, 0.0, 0.0, 0.0,
          0.0, 0.0, 0.0, 0.0,
          9.9, 9.9
        ]
      }
    }"#
}

/// MTO IDF XML file for snapped latitude 43.679167, holding two grid cells
/// along that latitude. Attribute layout matches the production files:
/// one `<coord>` per cell, one `<period>` per return period.
#[cfg(test)]
pub(crate) fn fixture_mto_idf_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<idf lat="43.679167">
  <coord id="43.679167,-79.412500">
    <period id="2" a="24.688" b="-0.738"/>
    <period id="5" a="33.075" b="-0.742"/>
    <period id="10" a="38.629" b="-0.744"/>
    <period id="25" a="45.645" b="-0.746"/>
    <period id="50" a="50.849" b="-0.747"/>
  </coord>
  <coord id="43.679167,-79.429167">
    <period id="2" a="24.901" b="-0.739"/>
    <period id="5" a="33.362" b="-0.743"/>
  </coord>
</idf>"#
}

/// Sensor logger CSV export: six 15-minute timesteps with an archived
/// forecast column. The 01:00 row carries an out-of-range east channel
/// (sensor glitch) so QC fallback paths can be exercised end to end.
#[cfg(test)]
pub(crate) fn fixture_timeseries_csv() -> &'static str {
    "timestamp,north_sensor,south_sensor,east_sensor,west_sensor,forecast_24h_mm\n\
     2026-04-12T00:00:00,0.27,0.26,0.28,0.27,12.0\n\
     2026-04-12T00:15:00,0.28,0.27,0.28,0.28,12.0\n\
     2026-04-12T00:30:00,0.29,0.28,0.29,0.28,14.5\n\
     2026-04-12T00:45:00,0.30,0.29,0.30,0.29,14.5\n\
     2026-04-12T01:00:00,0.31,0.30,1.45,0.30,16.0\n\
     2026-04-12T01:15:00,0.32,0.31,0.32,0.31,16.0\n"
}
