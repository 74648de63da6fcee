/// Sensor timeseries CSV parsing.
///
/// Batch evaluation runs read per-site CSV exports of the logger data:
///
///   timestamp,north_sensor,south_sensor,east_sensor,west_sensor[,forecast_24h_mm]
///
/// One row per 15-minute timestep. The optional forecast column carries the
/// archived 24 h forecast depth valid at that timestep; when absent, the
/// caller supplies a live forecast instead.
///
/// Column resolution is by header name, not position. A missing required
/// column fails the whole file with `MissingSensorKey` — the parser never
/// fabricates a channel. Unparseable numeric fields become NaN and are left
/// for QC to reject, so range/validity policy lives in one place.

use crate::model::{SeepError, SensorReading};

/// Required sensor columns, in canonical wall order.
const SENSOR_COLUMNS: [&str; 4] = ["north_sensor", "south_sensor", "east_sensor", "west_sensor"];

/// One parsed timestep row.
#[derive(Debug, Clone, PartialEq)]
pub struct TimestepRow {
    /// Timestamp string as logged (ISO 8601 expected, not validated here).
    pub timestamp: String,
    pub reading: SensorReading,
    /// Archived forecast depth [mm], if the export includes the column.
    pub forecast_24h_mm: Option<f64>,
}

/// Parses a full timeseries CSV document.
///
/// # Errors
/// - `SeepError::MissingSensorKey` — a required column is absent from the
///   header (the `timestamp` column counts as required).
/// - `SeepError::ParseError` — empty document.
pub fn parse_timeseries_csv(csv: &str) -> Result<Vec<TimestepRow>, SeepError> {
    let mut lines = csv.lines();

    let header = lines
        .next()
        .ok_or_else(|| SeepError::ParseError("Empty timeseries CSV".to_string()))?;
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();

    let column_index = |name: &str| -> Result<usize, SeepError> {
        columns
            .iter()
            .position(|c| *c == name)
            .ok_or_else(|| SeepError::MissingSensorKey(name.to_string()))
    };

    let timestamp_idx = column_index("timestamp")?;
    let mut sensor_idx = [0usize; 4];
    for (slot, name) in sensor_idx.iter_mut().zip(SENSOR_COLUMNS) {
        *slot = column_index(name)?;
    }
    let forecast_idx = columns.iter().position(|c| *c == "forecast_24h_mm");

    let mut rows = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();

        // Absent or garbled fields become NaN; QC rejects the reading.
        let field = |idx: usize| -> f64 {
            fields
                .get(idx)
                .and_then(|v| v.parse().ok())
                .unwrap_or(f64::NAN)
        };

        rows.push(TimestepRow {
            timestamp: fields
                .get(timestamp_idx)
                .map(|s| s.to_string())
                .unwrap_or_default(),
            reading: SensorReading {
                north: field(sensor_idx[0]),
                south: field(sensor_idx[1]),
                east: field(sensor_idx[2]),
                west: field(sensor_idx[3]),
            },
            forecast_24h_mm: forecast_idx.map(field),
        });
    }

    Ok(rows)
}
