/// Results sink: persists evaluation records to CSV.
///
/// One row per evaluated timestep, carrying the full chain for inspection:
/// cleaned reading, per-wall saturation, features, the three component
/// scores, both risk scores, and the category. Downstream analysis and
/// plotting read these files; the endpoint serves the same records as JSON.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::pipeline::EvaluationRecord;

/// Column header, kept in one place so writer and tests cannot drift.
pub const RESULTS_HEADER: &str = "timestamp,north,south,east,west,\
sat_north,sat_south,sat_east,sat_west,\
sat_avg,max_sat,sat_asymmetry,wettest_side,\
forecast_24h_mm,idf_24h_2yr_mm,\
base_risk,storm_factor,sensitivity,\
risk_internal,risk_displayed,category";

/// Writes all records for one site to a results CSV, creating parent
/// directories as needed. Overwrites any previous run's file.
pub fn write_results_csv<P: AsRef<Path>>(
    path: P,
    records: &[EvaluationRecord],
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(path.as_ref())?;
    writeln!(file, "{}", RESULTS_HEADER)?;

    for record in records {
        writeln!(file, "{}", format_record(record))?;
    }

    Ok(())
}

/// Formats one record as a CSV row matching `RESULTS_HEADER`.
pub fn format_record(record: &EvaluationRecord) -> String {
    let r = &record.cleaned;
    let s = &record.saturation;
    let f = &record.features;
    let c = &record.components;

    format!(
        "{},{},{},{},{},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{},{:.2},{:.2},{:.4},{:.4},{:.4},{:.4},{:.4},{}",
        record.timestamp,
        r.north,
        r.south,
        r.east,
        r.west,
        s.north,
        s.south,
        s.east,
        s.west,
        f.sat_avg,
        f.max_sat,
        f.sat_asymmetry,
        f.wettest_side,
        f.forecast_24h_mm,
        f.idf_24h_2yr_mm,
        c.base_risk,
        c.storm_factor,
        c.sensitivity,
        record.score.internal,
        record.score.displayed,
        record.category,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SensorReading;
    use crate::pipeline::evaluate_timestep;
    use crate::qc::QcPolicy;
    use crate::soils::DEFAULT_REFERENCE;

    fn sample_record() -> EvaluationRecord {
        let batch = [SensorReading::uniform(0.34)];
        evaluate_timestep(
            "maple_street_12",
            "2026-04-12T06:00:00",
            &batch,
            None,
            &DEFAULT_REFERENCE,
            Some(0.5),
            50.0,
            25.0,
            QcPolicy::MedianOfValid,
        )
        .unwrap()
    }

    #[test]
    fn test_row_column_count_matches_header() {
        let row = format_record(&sample_record());
        assert_eq!(
            row.split(',').count(),
            RESULTS_HEADER.split(',').count(),
            "row and header must have the same number of columns"
        );
    }

    #[test]
    fn test_row_carries_category_and_scores() {
        let row = format_record(&sample_record());
        assert!(row.ends_with("Severe"));
        assert!(row.contains("87.5000"));
    }

    #[test]
    fn test_write_results_creates_file_with_all_rows() {
        let dir = std::env::temp_dir().join("seepmon_sink_test");
        let path = dir.join("results.csv");

        let records = vec![sample_record(), sample_record()];
        write_results_csv(&path, &records).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3, "header plus one line per record");
        assert_eq!(lines[0], RESULTS_HEADER);
    }
}
