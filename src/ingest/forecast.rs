/// Open-Meteo forecast API client.
///
/// Retrieves hourly precipitation from the Open-Meteo GEM (Canadian model)
/// endpoint and reduces it to the single number the risk model needs: total
/// rainfall depth over the next 24 hours, in mm.
///
/// API documentation: https://open-meteo.com/en/docs

use serde::Deserialize;

use crate::model::SeepError;

const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Forecast hours summed into the headline depth.
const FORECAST_HORIZON_HOURS: usize = 24;

// ============================================================================
// Open-Meteo API Response Structures
// ============================================================================

/// Top-level forecast response (only the fields we consume).
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub hourly: HourlyBlock,
}

/// Parallel arrays of timestamps and hourly precipitation depths.
#[derive(Debug, Deserialize)]
pub struct HourlyBlock {
    pub time: Vec<String>,
    pub precipitation: Vec<f64>,
}

// ============================================================================
// URL construction
// ============================================================================

/// Builds the forecast request URL for a location.
///
/// Requests two forecast days so the response always covers a full 24-hour
/// window from the first forecast hour, regardless of request time of day.
pub fn build_forecast_url(latitude: f64, longitude: f64) -> String {
    format!(
        "{}?latitude={}&longitude={}&hourly=precipitation&models=gem_seamless&forecast_days=2&timezone=UTC",
        OPEN_METEO_BASE_URL, latitude, longitude
    )
}

// ============================================================================
// API client
// ============================================================================

/// Fetches the total forecast precipitation over the next 24 hours [mm].
pub fn fetch_forecast_24h(
    client: &reqwest::blocking::Client,
    latitude: f64,
    longitude: f64,
) -> Result<f64, SeepError> {
    let url = build_forecast_url(latitude, longitude);

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .map_err(|e| SeepError::ParseError(format!("Open-Meteo request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(SeepError::HttpError(response.status().as_u16()));
    }

    let body = response
        .text()
        .map_err(|e| SeepError::ParseError(format!("Open-Meteo body read failed: {}", e)))?;

    parse_forecast_24h(&body)
}

// ============================================================================
// Response parsing
// ============================================================================

/// Parses a forecast response body and sums the first 24 forecast hours.
///
/// # Errors
/// `SeepError::ParseError` — malformed JSON, mismatched arrays, or fewer
/// than 24 forecast hours in the response.
pub fn parse_forecast_24h(json: &str) -> Result<f64, SeepError> {
    let response: ForecastResponse = serde_json::from_str(json)
        .map_err(|e| SeepError::ParseError(format!("Open-Meteo JSON deserialization failed: {}", e)))?;

    let hourly = &response.hourly;

    if hourly.time.len() != hourly.precipitation.len() {
        return Err(SeepError::ParseError(format!(
            "Hourly arrays misaligned: {} timestamps vs {} precipitation values",
            hourly.time.len(),
            hourly.precipitation.len()
        )));
    }

    if hourly.precipitation.len() < FORECAST_HORIZON_HOURS {
        return Err(SeepError::ParseError(format!(
            "Forecast too short: {} hours, need {}",
            hourly.precipitation.len(),
            FORECAST_HORIZON_HOURS
        )));
    }

    Ok(sum_next_24h(&hourly.precipitation))
}

/// Sums exactly the first 24 hourly depths, rounded to 2 decimals.
/// Hours beyond the horizon are deliberately excluded.
pub fn sum_next_24h(hourly_mm: &[f64]) -> f64 {
    let total: f64 = hourly_mm.iter().take(FORECAST_HORIZON_HOURS).sum();
    (total * 100.0).round() / 100.0
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::fixture_open_meteo_json;

    #[test]
    fn test_url_includes_location_and_gem_model() {
        let url = build_forecast_url(43.6765, -79.4115);
        assert!(url.contains("latitude=43.6765"));
        assert!(url.contains("longitude=-79.4115"));
        assert!(url.contains("models=gem_seamless"));
        assert!(url.contains("hourly=precipitation"));
    }

    #[test]
    fn test_sum_cuts_off_after_twenty_four_hours() {
        // 48 hourly values: 1 mm each for the first day, 10 mm each for the
        // second. Only the first day may count.
        let mut hourly = vec![1.0; 24];
        hourly.extend(vec![10.0; 24]);
        assert_eq!(sum_next_24h(&hourly), 24.0);
    }

    #[test]
    fn test_sum_rounds_to_two_decimals() {
        let hourly = vec![0.1004; 24];
        assert_eq!(sum_next_24h(&hourly), 2.41);
    }

    #[test]
    fn test_parse_fixture_response() {
        let total = parse_forecast_24h(fixture_open_meteo_json()).unwrap();
        // Fixture: 6 wet hours (2.5 + 5×3.1) in the first 24, dry after.
        assert!((total - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_forecast_is_a_parse_error() {
        let json = r#"{"hourly": {"time": ["2026-08-27T00:00"], "precipitation": [1.0]}}"#;
        assert!(matches!(
            parse_forecast_24h(json),
            Err(SeepError::ParseError(_))
        ));
    }

    #[test]
    fn test_misaligned_arrays_are_a_parse_error() {
        let json = r#"{"hourly": {"time": ["2026-08-27T00:00", "2026-08-27T01:00"], "precipitation": [1.0]}}"#;
        assert!(matches!(
            parse_forecast_24h(json),
            Err(SeepError::ParseError(_))
        ));
    }
}
