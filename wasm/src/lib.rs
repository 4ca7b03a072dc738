//! WebAssembly module for the Crop Cycle Manager
//!
//! Provides client-side computation for:
//! - Crop cycle indicators (same calculator as the server)
//! - Harvest unit conversion
//! - Machinery depreciation and improvement balances
//! - Offline data validation

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::assets::{annual_depreciation, balance_due};
use shared::indicators::calculate_indicators;

fn to_decimal(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

fn parse_list<T: serde::de::DeserializeOwned>(name: &str, json: &str) -> Result<Vec<T>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", name, e))
}

/// Indicators as a JSON string; `safra_json` may be `null`
fn indicators_json(
    safra_json: &str,
    operations_json: &str,
    costs_json: &str,
    harvests_json: &str,
    safras_json: &str,
) -> Result<String, String> {
    let safra: Option<Safra> =
        serde_json::from_str(safra_json).map_err(|e| format!("Invalid safra JSON: {}", e))?;
    let operations: Vec<FieldOperation> = parse_list("operations", operations_json)?;
    let costs: Vec<Cost> = parse_list("costs", costs_json)?;
    let harvests: Vec<Harvest> = parse_list("harvests", harvests_json)?;
    let safras: Vec<Safra> = parse_list("safras", safras_json)?;

    let indicators = calculate_indicators(safra.as_ref(), &operations, &costs, &harvests, &safras);
    serde_json::to_string(&indicators).map_err(|e| format!("Serialization error: {}", e))
}

/// Calculate crop cycle indicators from JSON collections
#[wasm_bindgen]
pub fn calculate_safra_indicators(
    safra_json: &str,
    operations_json: &str,
    costs_json: &str,
    harvests_json: &str,
    safras_json: &str,
) -> Result<String, JsValue> {
    indicators_json(safra_json, operations_json, costs_json, harvests_json, safras_json)
        .map_err(|e| JsValue::from_str(&e))
}

/// Same as [`calculate_safra_indicators`] but returns a JavaScript object
#[wasm_bindgen]
pub fn calculate_safra_indicators_object(
    safra_json: &str,
    operations_json: &str,
    costs_json: &str,
    harvests_json: &str,
    safras_json: &str,
) -> Result<JsValue, JsValue> {
    let json = calculate_safra_indicators(
        safra_json,
        operations_json,
        costs_json,
        harvests_json,
        safras_json,
    )?;
    js_sys::JSON::parse(&json)
}

/// Convert a harvested quantity to 60 kg sacks; unknown units give 0
#[wasm_bindgen]
pub fn convert_to_sacks(quantity: f64, unit: &str) -> f64 {
    match HarvestUnit::from_str(unit) {
        Ok(unit) => to_f64(unit.to_sacks(to_decimal(quantity))),
        Err(e) => {
            warn(&e.to_string());
            0.0
        }
    }
}

/// Straight-line yearly depreciation of a machine
#[wasm_bindgen]
pub fn calculate_annual_depreciation(
    acquisition_value: f64,
    lifespan_years: u32,
    residual_percentage: f64,
) -> f64 {
    to_f64(annual_depreciation(
        to_decimal(acquisition_value),
        lifespan_years,
        to_decimal(residual_percentage),
    ))
}

/// Amount still owed on an improvement
#[wasm_bindgen]
pub fn calculate_installment_balance(total_value: f64, paid: u32, count: u32) -> f64 {
    if validate_installments(paid, count).is_err() {
        warn("Invalid installment counters");
        return 0.0;
    }
    to_f64(balance_due(to_decimal(total_value), paid, count))
}

/// Validate a crop cycle area in hectares
#[wasm_bindgen]
pub fn validate_safra_area(area: f64) -> bool {
    validate_area(to_decimal(area)).is_ok()
}
