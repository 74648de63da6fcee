/// HTTP endpoint for querying evaluation results.
///
/// Provides a simple REST API for external tools (dashboards, notification
/// glue) to query the latest risk evaluation per site.
///
/// Endpoints:
/// - GET /site/{site_code} - Latest evaluation record for a site
/// - GET /sites - Latest record for every evaluated site
/// - GET /health - Service health check
///
/// The store holds only the most recent record per site; the full history
/// lives in the results CSVs written by the sink.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::pipeline::EvaluationRecord;

// ---------------------------------------------------------------------------
// Latest-evaluation store
// ---------------------------------------------------------------------------

/// Shared latest-record store, cloned into the evaluation threads and the
/// server loop.
pub type EvaluationStore = Arc<Mutex<HashMap<String, EvaluationRecord>>>;

pub fn new_store() -> EvaluationStore {
    Arc::new(Mutex::new(HashMap::new()))
}

/// Publishes the latest record for a site, replacing any earlier one.
pub fn publish(store: &EvaluationStore, record: EvaluationRecord) {
    let mut latest = store.lock().expect("evaluation store poisoned");
    latest.insert(record.site_code.clone(), record);
}

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// Starts the endpoint server on the given port. Blocks serving requests.
pub fn start_endpoint_server(port: u16, store: EvaluationStore) -> Result<(), String> {
    let server = tiny_http::Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| format!("Failed to start HTTP server: {}", e))?;

    println!("📡 HTTP endpoint listening on http://0.0.0.0:{}", port);
    println!("   GET /site/{{site_code}} - Latest evaluation for a site");
    println!("   GET /sites - Latest evaluation for all sites");
    println!("   GET /health - Service health check\n");

    for request in server.incoming_requests() {
        let url = request.url();

        let response = if url == "/health" {
            handle_health(&store)
        } else if url == "/sites" {
            handle_all_sites(&store)
        } else if url.starts_with("/site/") {
            let site_code = url.trim_start_matches("/site/");
            handle_site_query(&store, site_code)
        } else {
            create_response(
                404,
                serde_json::json!({
                    "error": "Not found",
                    "available_endpoints": ["/health", "/sites", "/site/{site_code}"]
                }),
            )
        };

        if let Err(e) = request.respond(response) {
            eprintln!("Failed to send response: {}", e);
        }
    }

    Ok(())
}

/// Handle /health endpoint
fn handle_health(store: &EvaluationStore) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let sites_evaluated = store.lock().map(|s| s.len()).unwrap_or(0);
    create_response(
        200,
        serde_json::json!({
            "status": "ok",
            "service": "seepmon_service",
            "version": "0.1.0",
            "sites_evaluated": sites_evaluated
        }),
    )
}

/// Handle /sites endpoint
fn handle_all_sites(store: &EvaluationStore) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let latest = store.lock().expect("evaluation store poisoned");
    let records: Vec<&EvaluationRecord> = latest.values().collect();
    match serde_json::to_value(&records) {
        Ok(json) => create_response(200, json),
        Err(e) => create_response(500, serde_json::json!({ "error": e.to_string() })),
    }
}

/// Handle /site/{site_code} endpoint
fn handle_site_query(
    store: &EvaluationStore,
    site_code: &str,
) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let latest = store.lock().expect("evaluation store poisoned");

    match latest.get(site_code) {
        Some(record) => match serde_json::to_value(record) {
            Ok(json) => create_response(200, json),
            Err(e) => create_response(500, serde_json::json!({ "error": e.to_string() })),
        },
        None => create_response(
            404,
            serde_json::json!({
                "error": "No evaluation for site",
                "site_code": site_code
            }),
        ),
    }
}

/// Create HTTP response with JSON body
fn create_response(status_code: u16, json: serde_json::Value) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let body = serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string());
    let bytes = body.into_bytes();

    tiny_http::Response::from_data(bytes)
        .with_status_code(tiny_http::StatusCode::from(status_code))
        .with_header(
            tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                .expect("static header is valid"),
        )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SensorReading;
    use crate::pipeline::evaluate_timestep;
    use crate::qc::QcPolicy;
    use crate::soils::DEFAULT_REFERENCE;

    fn record_for(site_code: &str, theta: f64) -> EvaluationRecord {
        let batch = [SensorReading::uniform(theta)];
        evaluate_timestep(
            site_code,
            "2026-04-12T06:00:00",
            &batch,
            None,
            &DEFAULT_REFERENCE,
            None,
            10.0,
            25.0,
            QcPolicy::MedianOfValid,
        )
        .unwrap()
    }

    #[test]
    fn test_publish_keeps_latest_record_per_site() {
        let store = new_store();
        publish(&store, record_for("a", 0.30));
        publish(&store, record_for("a", 0.35));
        publish(&store, record_for("b", 0.28));

        let latest = store.lock().unwrap();
        assert_eq!(latest.len(), 2);
        assert!((latest["a"].cleaned.north - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_records_serialize_for_the_wire() {
        let record = record_for("a", 0.34);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["site_code"], "a");
        assert!(json["score"]["displayed"].is_number());
        assert_eq!(json["category"], "Moderate");
    }
}
