//! Dashboard orchestrator: explicit input state in, every derived dataset out.
//!
//! [`DashboardState`] is the whole of the user's selection. Edits return a new
//! state; [`Dashboard::derive`] recomputes everything from scratch.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::energy::{CarbonIntensity, EnergyMix, EnergyPreset, EnergySector, EnergySource};
use crate::error::{ClimateError, ClimateResult};
use crate::globe::{generate, CityPoint};
use crate::impacts::{disaster_outlook, economic_impact, DisasterOutlook, EconomicImpact};
use crate::projection::{project, ClimateSeries, SmoothedSeries, DEFAULT_SMOOTHING_WINDOW};
use crate::regions::{aggregate, default_regions, RegionMap, RegionSummary};
use crate::risk::{score_year, RiskBand, RiskLevels};
use crate::scenario::{ScenarioKey, BASE_YEAR};

/// Largest distance of the mix total from 100 before a warning is logged.
const MIX_TOTAL_TOLERANCE: f64 = 2.0;

// ── State ─────────────────────────────────────────────────────────────────────

/// User selection. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardState {
    pub scenario: ScenarioKey,
    pub year: i32,
    pub energy_mix: EnergyMix,
    /// Trailing window for the smoothed chart series.
    pub smoothing_window: usize,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            scenario: ScenarioKey::Moderate,
            year: BASE_YEAR,
            energy_mix: EnergyMix::default(),
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
        }
    }
}

impl DashboardState {
    /// Missing fields take their defaults. A scenario name that does not
    /// parse is reported as [`ClimateError::UnknownScenario`].
    pub fn from_json(json: &str) -> ClimateResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ClimateError::InvalidState(e.to_string()))?;
        if let Some(name) = value.get("scenario").and_then(serde_json::Value::as_str) {
            name.parse::<ScenarioKey>()?;
        }
        let state: Self =
            serde_json::from_value(value).map_err(|e| ClimateError::InvalidState(e.to_string()))?;
        state.validate()?;
        Ok(state)
    }

    /// Every share must be a finite percentage. A total away from 100 is
    /// accepted (mixes set directly are not renormalized) but logged.
    pub fn validate(&self) -> ClimateResult<()> {
        self.energy_mix.validate()?;
        let total = self.energy_mix.total();
        if (total - 100.0).abs() > MIX_TOTAL_TOLERANCE {
            warn!("energy mix sums to {total:.1}%, not 100%");
        }
        Ok(())
    }

    pub fn with_scenario(self, scenario: ScenarioKey) -> Self {
        Self { scenario, ..self }
    }

    pub fn with_year(self, year: i32) -> Self {
        Self { year, ..self }
    }

    pub fn with_preset(self, preset: EnergyPreset) -> Self {
        Self { energy_mix: preset.mix(), ..self }
    }

    pub fn with_source(self, source: EnergySource, value: f64) -> ClimateResult<Self> {
        let energy_mix = self.energy_mix.rebalance(source, value)?;
        Ok(Self { energy_mix, ..self })
    }

    pub fn with_sector(self, sector: EnergySector, value: f64) -> ClimateResult<Self> {
        let energy_mix = self.energy_mix.rebalance_sector(sector, value)?;
        Ok(Self { energy_mix, ..self })
    }

    pub fn with_smoothing_window(self, smoothing_window: usize) -> Self {
        Self { smoothing_window, ..self }
    }
}

// ── View ──────────────────────────────────────────────────────────────────────

/// Everything the presentation layer reads for one state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub state: DashboardState,
    pub series: ClimateSeries,
    pub smoothed: SmoothedSeries,
    /// Warming at the selected year; 0 when the year is off the projection grid.
    pub current_temperature: f64,
    pub current_co2: Option<f64>,
    pub sea_level_rise_m: f64,
    pub risk_levels: RiskLevels,
    pub risk_band: RiskBand,
    pub globe: Vec<CityPoint>,
    pub regions: Vec<RegionSummary>,
    pub disasters: Vec<DisasterOutlook>,
    pub economic: EconomicImpact,
    pub carbon_intensity: CarbonIntensity,
}

// ── Orchestrator ──────────────────────────────────────────────────────────────

/// Runs every derivation for a [`DashboardState`].
///
/// Holds only the static region grouping; no state survives between calls.
pub struct Dashboard {
    regions: RegionMap,
}

impl Dashboard {
    pub fn new() -> Self {
        Self { regions: default_regions() }
    }

    pub fn with_regions(regions: RegionMap) -> Self {
        Self { regions }
    }

    pub fn regions(&self) -> &RegionMap {
        &self.regions
    }

    /// Derivation order:
    ///   1. Climate projection
    ///   2. Selected-year lookup and risk scoring
    ///   3. Globe points and regional aggregation
    ///   4. Impact cards and mix intensity
    pub fn derive(&self, state: &DashboardState) -> DashboardView {
        let DashboardState { scenario, year, energy_mix, smoothing_window } = state;

        // ── 1. Projection ───────────────────────────────────────────────────
        let series = project(*scenario, energy_mix);
        let smoothed = series.moving_average(*smoothing_window);

        // ── 2. Selected year ────────────────────────────────────────────────
        let point = series.point_at(*year);
        if point.is_none() {
            warn!(
                "year {year} is not on the projection grid ({}..={}); year-based values are zeroed",
                series.years.first().copied().unwrap_or(BASE_YEAR),
                series.years.last().copied().unwrap_or(BASE_YEAR),
            );
        }
        let current_temperature = point.map_or(0.0, |p| p.temperature);
        let risk_levels = score_year(&series, *year);

        // ── 3. Map data ─────────────────────────────────────────────────────
        let globe = generate(*scenario, *year);
        let regions = aggregate(&globe, &self.regions);

        // ── 4. Impacts ──────────────────────────────────────────────────────
        let disasters = disaster_outlook(current_temperature);
        let economic = economic_impact(current_temperature);
        let carbon_intensity = energy_mix.carbon_intensity();

        debug!(
            "derived dashboard for {scenario} {year}: {current_temperature:.2} °C, max risk {:.0}%",
            risk_levels.max()
        );

        DashboardView {
            state: state.clone(),
            smoothed,
            current_temperature,
            current_co2: point.map(|p| p.co2),
            sea_level_rise_m: scenario.scenario().sea_level_rise_m(*year),
            risk_levels,
            risk_band: risk_levels.band(),
            globe,
            regions,
            disasters,
            economic,
            carbon_intensity,
            series,
        }
    }
}

impl Default for Dashboard {
    fn default() -> Self { Self::new() }
}
