//! Hazard risk levels derived from temperature and CO₂.
//!
//! `base = temperature / 5 °C × 100` (5 °C of warming is full risk) and
//! `co2_factor = (co2 − 420) / 200`. Each hazard weights both terms:
//!
//! | hazard   | base × | co2_factor × |
//! |----------|--------|--------------|
//! | drought  | 1.20   | 20           |
//! | flooding | 1.10   | 15           |
//! | fires    | 1.30   | 25           |
//! | storms   | 1.15   | 18           |
//!
//! Results are rounded and clamped to 0-100.

use serde::{Deserialize, Serialize};

use crate::projection::{ClimateSeries, BASELINE_CO2_PPM};

/// Warming at which the base risk reaches 100 %.
const FULL_RISK_WARMING_C: f64 = 5.0;
/// CO₂ excess (ppm) that contributes one full `co2_factor`.
const CO2_FACTOR_SPAN_PPM: f64 = 200.0;

/// Per-hazard risk percentages, each in 0-100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskLevels {
    pub drought: f64,
    pub flooding: f64,
    pub fires: f64,
    pub storms: f64,
}

impl RiskLevels {
    /// Highest of the four hazards.
    pub fn max(&self) -> f64 {
        self.drought.max(self.flooding).max(self.fires).max(self.storms)
    }

    pub fn band(&self) -> RiskBand {
        RiskBand::from_percent(self.max())
    }
}

/// Colour bucket for a risk percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Elevated,
    High,
    Severe,
}

impl RiskBand {
    pub fn from_percent(risk: f64) -> Self {
        if risk > 75.0 {
            RiskBand::Severe
        } else if risk > 50.0 {
            RiskBand::High
        } else if risk > 25.0 {
            RiskBand::Elevated
        } else {
            RiskBand::Low
        }
    }
}

fn weighted(base: f64, co2_factor: f64, base_weight: f64, co2_weight: f64) -> f64 {
    (base * base_weight + co2_factor * co2_weight).round().clamp(0.0, 100.0)
}

/// Score a single (temperature, CO₂) pair.
pub fn score(temperature: f64, co2: f64) -> RiskLevels {
    let base = temperature / FULL_RISK_WARMING_C * 100.0;
    let co2_factor = (co2 - BASELINE_CO2_PPM) / CO2_FACTOR_SPAN_PPM;

    RiskLevels {
        drought:  weighted(base, co2_factor, 1.20, 20.0),
        flooding: weighted(base, co2_factor, 1.10, 15.0),
        fires:    weighted(base, co2_factor, 1.30, 25.0),
        storms:   weighted(base, co2_factor, 1.15, 18.0),
    }
}

/// Score the entry for `year`; all zeros when the year is not in the series.
pub fn score_year(series: &ClimateSeries, year: i32) -> RiskLevels {
    match series.point_at(year) {
        Some(p) => score(p.temperature, p.co2),
        None => {
            log::debug!("year {year} not in series; risk levels default to zero");
            RiskLevels::default()
        }
    }
}
