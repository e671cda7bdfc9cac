use serde::Serialize;
use wasm_bindgen::prelude::*;

use climsim_core::energy::{EnergyMix, EnergyPreset, EnergySector, EnergySource};
use climsim_core::globe::{generate, CityPoint};
use climsim_core::projection::{project, ClimateSeries};
use climsim_core::risk::{score, RiskLevels};
use climsim_core::{ClimateError, ClimateResult, Dashboard, DashboardState, DashboardView, ScenarioKey};

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&format!("Serialization failed: {e}")))
}

fn js_err(e: ClimateError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_mix(mix_json: &str) -> ClimateResult<EnergyMix> {
    let mix: EnergyMix = serde_json::from_str(mix_json)
        .map_err(|e| ClimateError::InvalidState(format!("Invalid energy mix: {e}")))?;
    mix.validate()?;
    Ok(mix)
}

// ── Plain-Rust entry points (shared by the exports and native tests) ──────────

pub fn derive_view(state_json: &str) -> ClimateResult<DashboardView> {
    let state = DashboardState::from_json(state_json)?;
    Ok(Dashboard::new().derive(&state))
}

pub fn project_series(scenario: &str, mix_json: &str) -> ClimateResult<ClimateSeries> {
    let key: ScenarioKey = scenario.parse()?;
    Ok(project(key, &parse_mix(mix_json)?))
}

pub fn city_points(scenario: &str, year: i32) -> ClimateResult<Vec<CityPoint>> {
    Ok(generate(scenario.parse()?, year))
}

/// `key` names either a source (`solar`, `wind`, ...) or a sector (`renewable`).
pub fn rebalance(mix_json: &str, key: &str, value: f64) -> ClimateResult<EnergyMix> {
    let mix = parse_mix(mix_json)?;
    match key.parse::<EnergySource>() {
        Ok(source) => mix.rebalance(source, value),
        Err(_) => mix.rebalance_sector(key.parse::<EnergySector>()?, value),
    }
}

pub fn preset(name: &str) -> ClimateResult<EnergyMix> {
    Ok(name.parse::<EnergyPreset>()?.mix())
}

// ── wasm exports ──────────────────────────────────────────────────────────────

/// Derive every dashboard dataset from a state JSON
/// (`{"scenario", "year", "energy_mix", "smoothing_window"}`, all optional).
#[wasm_bindgen(js_name = deriveDashboard)]
pub fn derive_dashboard(state_json: &str) -> Result<JsValue, JsValue> {
    to_js(&derive_view(state_json).map_err(js_err)?)
}

#[wasm_bindgen(js_name = projectClimate)]
pub fn project_climate(scenario: &str, mix_json: &str) -> Result<JsValue, JsValue> {
    to_js(&project_series(scenario, mix_json).map_err(js_err)?)
}

#[wasm_bindgen(js_name = riskLevels)]
pub fn risk_levels(temperature: f64, co2: f64) -> Result<JsValue, JsValue> {
    let levels: RiskLevels = score(temperature, co2);
    to_js(&levels)
}

#[wasm_bindgen(js_name = globePoints)]
pub fn globe_points(scenario: &str, year: i32) -> Result<JsValue, JsValue> {
    to_js(&city_points(scenario, year).map_err(js_err)?)
}

#[wasm_bindgen(js_name = rebalanceMix)]
pub fn rebalance_mix(mix_json: &str, key: &str, value: f64) -> Result<JsValue, JsValue> {
    to_js(&rebalance(mix_json, key, value).map_err(js_err)?)
}

#[wasm_bindgen(js_name = presetMix)]
pub fn preset_mix(name: &str) -> Result<JsValue, JsValue> {
    to_js(&preset(name).map_err(js_err)?)
}
