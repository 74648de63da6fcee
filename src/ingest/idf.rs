/// MTO IDF curve client.
///
/// The Ontario Ministry of Transportation publishes
/// intensity-duration-frequency curve parameters on a 30-arc-second grid,
/// one XML file per snapped latitude:
///   https://idfcurves.mto.gov.on.ca/data_xml/{lat}.xml
///
/// Each file holds `<coord id="{lat},{lon}">` elements, one per grid cell
/// along that latitude, each containing `<period id="{years}" a=".." b="..">`
/// entries. The design storm depth follows from the curve parameters:
///
/// ```text
/// depth_mm = a × duration_hours^(b + 1)
/// ```
///
/// Coordinates must be snapped with the same rounding the MTO site uses or
/// the coord id will not match anything — see `to_grid_coordinate`.
///
/// The XML is scanned with a small attribute matcher rather than a full XML
/// parser; the format is machine-generated, flat, and attribute-only.

use crate::model::SeepError;

const MTO_XML_BASE_URL: &str = "https://idfcurves.mto.gov.on.ca/data_xml/";

// ============================================================================
// Grid snapping
// ============================================================================

/// Snaps a decimal coordinate to the MTO 30-arc-second grid.
///
/// Reproduces the rounding of the MTO site's own `toGridCoordinate()`:
/// split into degrees/minutes/seconds, then bucket the seconds — under 30"
/// snaps to the 15" cell center (+1/240°), otherwise to the 45" center
/// (+1/80°). Sign is preserved and the result is fixed to 6 decimals.
pub fn to_grid_coordinate(coord: f64) -> f64 {
    let negative = coord < 0.0;
    let abs = coord.abs();

    let d = abs.trunc();
    let minutes_float = (abs - d) * 60.0;
    let m = minutes_float.trunc();
    let seconds_float = (minutes_float - m) * 60.0;
    let s = seconds_float.trunc();

    let snapped = if s < 30.0 {
        d + m / 60.0 + 1.0 / 240.0
    } else {
        d + m / 60.0 + 1.0 / 80.0
    };

    let signed = if negative { -snapped } else { snapped };

    // Fix to 6 decimals to match the ids used in the XML files.
    (signed * 1_000_000.0).round() / 1_000_000.0
}

/// Formats a snapped coordinate the way the XML files key it.
pub fn format_grid_coordinate(coord: f64) -> String {
    format!("{:.6}", coord)
}

// ============================================================================
// Curve evaluation
// ============================================================================

/// Rainfall depth [mm] from curve parameters for a storm duration in hours.
pub fn depth_from_curve(a: f64, b: f64, duration_hours: f64) -> f64 {
    let depth = a * duration_hours.powf(b + 1.0);
    (depth * 100.0).round() / 100.0
}

// ============================================================================
// XML parameter extraction
// ============================================================================

/// Extracts the `(a, b)` curve parameters for a coord id and return period
/// from an MTO XML document.
///
/// # Errors
/// - `SeepError::LocationNotFound` — no matching coord element, or the
///   coord exists but lacks the requested return period.
/// - `SeepError::ParseError` — structurally broken XML or non-numeric
///   attribute values.
pub fn parse_curve_parameters(
    xml: &str,
    coord_id: &str,
    return_period_years: u32,
) -> Result<(f64, f64), SeepError> {
    let period_id = return_period_years.to_string();

    let mut rest = xml;
    while let Some(start) = rest.find("<coord") {
        let element = &rest[start..];
        let tag_end = element
            .find('>')
            .ok_or_else(|| SeepError::ParseError("Unterminated <coord> tag".to_string()))?;

        if attribute_value(&element[..tag_end], "id").as_deref() == Some(coord_id) {
            let body_end = element.find("</coord>").unwrap_or(element.len());
            return parse_period_parameters(&element[tag_end..body_end], coord_id, &period_id);
        }

        rest = &element[tag_end..];
    }

    Err(SeepError::LocationNotFound(coord_id.to_string()))
}

/// Finds the `<period>` with the requested id inside one coord body and
/// reads its `a`/`b` attributes.
fn parse_period_parameters(
    coord_body: &str,
    coord_id: &str,
    period_id: &str,
) -> Result<(f64, f64), SeepError> {
    let mut rest = coord_body;
    while let Some(start) = rest.find("<period") {
        let element = &rest[start..];
        let tag_end = element
            .find('>')
            .ok_or_else(|| SeepError::ParseError("Unterminated <period> tag".to_string()))?;
        let tag = &element[..tag_end];

        if attribute_value(tag, "id").as_deref() == Some(period_id) {
            let a = numeric_attribute(tag, "a")?;
            let b = numeric_attribute(tag, "b")?;
            return Ok((a, b));
        }

        rest = &element[tag_end..];
    }

    Err(SeepError::LocationNotFound(format!(
        "{} (no {}-year period)",
        coord_id, period_id
    )))
}

/// Reads `name="value"` (or single-quoted) from inside one tag.
fn attribute_value(tag: &str, name: &str) -> Option<String> {
    for quote in ['"', '\''] {
        let pattern = format!("{}={}", name, quote);
        if let Some(start) = tag.find(&pattern) {
            let value_start = start + pattern.len();
            let value_end = tag[value_start..].find(quote)?;
            return Some(tag[value_start..value_start + value_end].to_string());
        }
    }
    None
}

fn numeric_attribute(tag: &str, name: &str) -> Result<f64, SeepError> {
    let raw = attribute_value(tag, name)
        .ok_or_else(|| SeepError::ParseError(format!("Missing '{}' attribute on <period>", name)))?;
    raw.parse()
        .map_err(|_| SeepError::ParseError(format!("Non-numeric '{}' attribute: {}", name, raw)))
}

// ============================================================================
// API client
// ============================================================================

/// Builds the XML file URL for a snapped latitude.
pub fn build_idf_url(grid_latitude: f64) -> String {
    format!("{}{}.xml", MTO_XML_BASE_URL, format_grid_coordinate(grid_latitude))
}

/// Fetches the design storm depth [mm] for a location, duration, and
/// return period.
///
/// Latitude is snapped once to select the XML file and the lat/lon pair is
/// snapped independently to form the lookup key within it.
pub fn fetch_idf_depth(
    client: &reqwest::blocking::Client,
    latitude: f64,
    longitude: f64,
    duration_hours: f64,
    return_period_years: u32,
) -> Result<f64, SeepError> {
    let grid_lat = to_grid_coordinate(latitude);
    let grid_lon = to_grid_coordinate(longitude);

    let url = build_idf_url(grid_lat);

    let response = client
        .get(&url)
        .send()
        .map_err(|e| SeepError::ParseError(format!("MTO IDF request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(SeepError::HttpError(response.status().as_u16()));
    }

    let body = response
        .text()
        .map_err(|e| SeepError::ParseError(format!("MTO IDF body read failed: {}", e)))?;

    let coord_id = format!(
        "{},{}",
        format_grid_coordinate(grid_lat),
        format_grid_coordinate(grid_lon)
    );

    let (a, b) = parse_curve_parameters(&body, &coord_id, return_period_years)?;
    Ok(depth_from_curve(a, b, duration_hours))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::fixture_mto_idf_xml;

    // --- Grid snapping -----------------------------------------------------

    #[test]
    fn test_snap_seconds_above_thirty_to_upper_bucket() {
        // 43.6765° = 43° 40' 35.4" → 43 + 40/60 + 1/80
        assert_eq!(to_grid_coordinate(43.6765), 43.679167);
    }

    #[test]
    fn test_snap_seconds_below_thirty_to_lower_bucket() {
        // 45.4215° = 45° 25' 17.4" → 45 + 25/60 + 1/240
        assert_eq!(to_grid_coordinate(45.4215), 45.420833);
    }

    #[test]
    fn test_snap_preserves_sign_for_western_longitudes() {
        // -79.4115° → snapped magnitude 79.4125
        assert_eq!(to_grid_coordinate(-79.4115), -79.4125);
    }

    #[test]
    fn test_grid_coordinate_formatting_is_six_decimals() {
        assert_eq!(format_grid_coordinate(-79.4125), "-79.412500");
        assert_eq!(format_grid_coordinate(43.679167), "43.679167");
    }

    // --- Curve evaluation --------------------------------------------------

    #[test]
    fn test_depth_formula() {
        // a=10, b=-0.5: depth = 10 × t^0.5; t=4 → 20 mm.
        assert_eq!(depth_from_curve(10.0, -0.5, 4.0), 20.0);
    }

    #[test]
    fn test_depth_rounds_to_two_decimals() {
        let depth = depth_from_curve(24.688, -0.738, 24.0);
        assert_eq!(depth, (depth * 100.0).round() / 100.0);
    }

    // --- XML extraction ----------------------------------------------------

    #[test]
    fn test_extract_parameters_for_known_coord_and_period() {
        let (a, b) =
            parse_curve_parameters(fixture_mto_idf_xml(), "43.679167,-79.412500", 2).unwrap();
        assert!((a - 24.688).abs() < 1e-9);
        assert!((b - (-0.738)).abs() < 1e-9);
    }

    #[test]
    fn test_extract_skips_other_coords_in_same_file() {
        // The fixture holds two coords; the second must be reachable.
        let (a, _) =
            parse_curve_parameters(fixture_mto_idf_xml(), "43.679167,-79.429167", 2).unwrap();
        assert!((a - 24.901).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_coord_is_location_not_found() {
        let result = parse_curve_parameters(fixture_mto_idf_xml(), "50.000000,-90.000000", 2);
        assert_eq!(
            result,
            Err(SeepError::LocationNotFound("50.000000,-90.000000".to_string()))
        );
    }

    #[test]
    fn test_missing_return_period_is_location_not_found() {
        let result = parse_curve_parameters(fixture_mto_idf_xml(), "43.679167,-79.412500", 100);
        assert!(matches!(result, Err(SeepError::LocationNotFound(_))));
    }

    #[test]
    fn test_url_uses_snapped_latitude_only() {
        let url = build_idf_url(43.679167);
        assert_eq!(url, "https://idfcurves.mto.gov.on.ca/data_xml/43.679167.xml");
    }
}
