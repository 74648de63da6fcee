//! Seepage Risk Monitoring Service - Batch Evaluator
//!
//! Evaluates basement seepage risk for every configured site:
//! 1. Loads the site and soil registries (sites.toml, soils.toml)
//! 2. Resolves each site's rainfall context (archived CSV column, or live
//!    Open-Meteo / MTO IDF lookups with --live)
//! 3. Runs the QC → normalize → features → risk chain over each site's
//!    sensor timeseries, one thread-pool job per site
//! 4. Writes per-site results CSVs and optionally serves the latest
//!    evaluation per site over HTTP
//!
//! Usage:
//!   cargo run --release                    # Evaluate all sites, write CSVs
//!   cargo run --release -- --live          # Fetch forecast/IDF from the APIs
//!   cargo run --release -- --endpoint 8080 # Also serve results on port 8080

use std::env;
use std::fs;
use std::sync::mpsc;

use threadpool::ThreadPool;

use seepmon_service::endpoint;
use seepmon_service::ingest::{forecast, idf, timeseries};
use seepmon_service::pipeline::{self, PipelineConfig};
use seepmon_service::sink;
use seepmon_service::sites::{self, SiteConfig};
use seepmon_service::soils::SoilRegistry;

/// Storm duration and return period for the IDF baseline.
const IDF_DURATION_HOURS: f64 = 24.0;
const IDF_RETURN_PERIOD_YEARS: u32 = 2;

fn main() {
    println!("🏠 Seepage Risk Monitoring Service");
    println!("===================================\n");

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    let mut endpoint_port: Option<u16> = None;
    let mut live_lookups = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--endpoint" => {
                if i + 1 < args.len() {
                    endpoint_port = args[i + 1].parse().ok();
                    i += 2;
                } else {
                    eprintln!("Error: --endpoint requires a port number");
                    std::process::exit(1);
                }
            }
            "--live" => {
                live_lookups = true;
                i += 1;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!("Usage: {} [--live] [--endpoint PORT]", args[0]);
                std::process::exit(1);
            }
        }
    }

    // Load registries
    println!("📋 Loading registries...");
    let site_list = sites::load_sites();
    let soil_registry = match SoilRegistry::load_default() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("\n❌ Failed to load soils.toml: {}\n", e);
            std::process::exit(1);
        }
    };
    println!(
        "✓ {} site(s), {} soil preset(s)\n",
        site_list.len(),
        soil_registry.len()
    );

    let store = endpoint::new_store();
    let config = PipelineConfig::default();

    // Evaluate sites in parallel — each evaluation pass is independent.
    let pool = ThreadPool::new(site_list.len().min(4));
    let (tx, rx) = mpsc::channel();
    let site_count = site_list.len();

    for site in site_list {
        let tx = tx.clone();
        let store = store.clone();
        let soil_registry = soil_registry.clone();

        pool.execute(move || {
            let summary = evaluate_site(&site, &soil_registry, &store, live_lookups, &config);
            tx.send((site.site_code.clone(), summary))
                .expect("main thread receiver dropped");
        });
    }
    drop(tx);

    let mut failures = 0;
    for (site_code, summary) in rx.iter().take(site_count) {
        match summary {
            Ok((evaluated, skipped)) => {
                println!(
                    "✓ {} — {} timestep(s) evaluated, {} skipped",
                    site_code, evaluated, skipped
                );
            }
            Err(e) => {
                eprintln!("❌ {} — {}", site_code, e);
                failures += 1;
            }
        }
    }
    pool.join();

    if failures > 0 {
        eprintln!("\n⚠ {} site(s) failed", failures);
    }

    // Optionally serve the latest evaluations
    if let Some(port) = endpoint_port {
        if let Err(e) = endpoint::start_endpoint_server(port, store) {
            eprintln!("❌ Endpoint failed: {}", e);
            std::process::exit(1);
        }
    } else if failures > 0 {
        std::process::exit(1);
    }
}

/// Evaluates one site end to end: resolve context, run the series, write
/// the results CSV, publish the latest record.
///
/// Returns (evaluated, skipped) timestep counts.
fn evaluate_site(
    site: &SiteConfig,
    soil_registry: &SoilRegistry,
    store: &endpoint::EvaluationStore,
    live_lookups: bool,
    config: &PipelineConfig,
) -> Result<(usize, usize), Box<dyn std::error::Error + Send + Sync>> {
    let soil = soil_registry.resolve(site.soil_type.as_deref())?;

    let csv = fs::read_to_string(&site.timeseries_csv)
        .map_err(|e| format!("cannot read {}: {}", site.timeseries_csv, e))?;
    let rows = timeseries::parse_timeseries_csv(&csv)?;

    let http = reqwest::blocking::Client::new();

    // IDF baseline: per-site override wins; otherwise a live MTO lookup.
    let idf_24h_2yr_mm = match site.idf_24h_2yr_mm {
        Some(depth) => depth,
        None if live_lookups => idf::fetch_idf_depth(
            &http,
            site.latitude,
            site.longitude,
            IDF_DURATION_HOURS,
            IDF_RETURN_PERIOD_YEARS,
        )?,
        None => {
            return Err(format!(
                "{}: no idf_24h_2yr_mm override configured; run with --live",
                site.site_code
            )
            .into());
        }
    };

    // Forecast fallback for rows without an archived forecast column.
    let fallback_forecast_mm = if live_lookups {
        forecast::fetch_forecast_24h(&http, site.latitude, site.longitude)?
    } else {
        0.0
    };

    let outcome = pipeline::run_series(
        &site.site_code,
        &rows,
        &soil,
        idf_24h_2yr_mm,
        fallback_forecast_mm,
        config,
    );

    let results_path = format!("data/results/{}_results.csv", site.site_code);
    sink::write_results_csv(&results_path, &outcome.records)?;

    if let Some(latest) = outcome.records.last() {
        endpoint::publish(store, latest.clone());
    }

    Ok((outcome.records.len(), outcome.skipped))
}
