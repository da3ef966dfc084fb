//! WASM bindings for lavalo-engine.
//!
//! Exposes the time grid and the availability projection to JavaScript via
//! `wasm-bindgen`. All complex types cross the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p lavalo-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/lavalo-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/lavalo_engine_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use lavalo_engine::availability::{local_today, project_availability, to_json};
use lavalo_engine::{ApiError, BusinessHours, EngineConfig, EngineError, Reservation, Slot};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts RFC 3339 (e.g., "2026-03-16T08:00:00-03:00") and naive time
/// (e.g., "2026-03-16T08:00:00"), which is interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| format!("Invalid datetime '{}': {}", s, e))
}

fn parse_config(json: Option<&str>) -> Result<EngineConfig, String> {
    match json {
        Some(raw) if !raw.trim().is_empty() => {
            serde_json::from_str(raw).map_err(|e| format!("Invalid config JSON: {}", e))
        }
        _ => Ok(EngineConfig::default()),
    }
}

/// Engine errors are thrown as the `ApiError` JSON body (`code`, `message`,
/// `details`) so callers can tell "no slots" (404) apart from bad input (400).
fn engine_error(err: &EngineError) -> String {
    serde_json::to_string(&ApiError::from(err)).unwrap_or_else(|_| err.to_string())
}

/// Pure-Rust body of [`compute_availability`], kept free of `JsValue` so it
/// runs on native targets too.
fn compute(
    slots_json: &str,
    reservations_json: &str,
    now: &str,
    config_json: Option<&str>,
) -> Result<String, String> {
    let slots: Vec<Slot> =
        serde_json::from_str(slots_json).map_err(|e| format!("Invalid slots JSON: {}", e))?;
    let reservations: Vec<Reservation> = serde_json::from_str(reservations_json)
        .map_err(|e| format!("Invalid reservations JSON: {}", e))?;
    let now = parse_datetime(now)?;
    let config = parse_config(config_json)?;

    config.validate().map_err(|e| engine_error(&e))?;
    let today = local_today(now, config.timezone);
    project_availability(&slots, &reservations, today, &config)
        .and_then(|projection| to_json(&projection, false))
        .map_err(|e| engine_error(&e))
}

fn grid(start_hour: u32, end_hour: u32, step_minutes: u32) -> Result<String, String> {
    let hours =
        BusinessHours::new(start_hour, end_hour, step_minutes).map_err(|e| engine_error(&e))?;
    let labels = lavalo_engine::generate_time_grid(&hours);
    serde_json::to_string(&labels).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute slot and hour availability for the local day of `now` and the
/// following `days_ahead` days.
///
/// # Arguments
/// - `slots_json` -- JSON array of `{id, label, is_available}` objects
/// - `reservations_json` -- JSON array of `{id, slot_id, start_time, status}`
///   objects; reservations are assumed to lie within the window already
/// - `now` -- reference instant, ISO 8601
/// - `config_json` -- optional engine config (`business_hours`, `days_ahead`,
///   `timezone`); defaults apply to missing fields
///
/// Returns the projection as a JSON object keyed by `YYYY-MM-DD`.
#[wasm_bindgen(js_name = "computeAvailability")]
pub fn compute_availability(
    slots_json: &str,
    reservations_json: &str,
    now: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    compute(slots_json, reservations_json, now, config_json.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}

/// Generate the `HH:MM` labels for one business day as a JSON array.
#[wasm_bindgen(js_name = "generateTimeGrid")]
pub fn generate_time_grid(
    start_hour: u32,
    end_hour: u32,
    step_minutes: u32,
) -> Result<String, JsValue> {
    grid(start_hour, end_hour, step_minutes).map_err(|e| JsValue::from_str(&e))
}
