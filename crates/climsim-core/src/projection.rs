//! Climate projection: scenario + energy mix → yearly temperature and CO₂ series.
//!
//! CO₂ follows a linear pathway from the 420 ppm baseline to the scenario's
//! total increase, shifted by the energy mix (−0.5 ppm per renewable percent,
//! +0.5 ppm per fossil percent). Temperature is the CO₂ anomaly per 100 ppm
//! scaled by the scenario multiplier. Anomalies below baseline are not
//! amplified, which keeps the scenarios ordered for every mix.

use serde::{Deserialize, Serialize};

use crate::energy::EnergyMix;
use crate::error::{ClimateError, ClimateResult};
use crate::round_to;
use crate::scenario::{ScenarioKey, BASE_YEAR};

/// Atmospheric CO₂ at the start of every projection, in ppm.
pub const BASELINE_CO2_PPM: f64 = 420.0;
pub const END_YEAR: i32 = 2100;
pub const YEAR_STEP: i32 = 5;

/// Default trailing window for [`ClimateSeries::moving_average`].
pub const DEFAULT_SMOOTHING_WINDOW: usize = 20;

/// Energy-mix CO₂ offset in ppm per percentage point.
const RENEWABLE_PPM_PER_PCT: f64 = -0.5;
const FOSSIL_PPM_PER_PCT: f64 = 0.5;

// ── Year range ────────────────────────────────────────────────────────────────

/// Inclusive, stepped range of projection years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    start: i32,
    end: i32,
    step: i32,
}

impl Default for YearRange {
    fn default() -> Self {
        Self { start: BASE_YEAR, end: END_YEAR, step: YEAR_STEP }
    }
}

impl YearRange {
    /// Rejects a non-positive step or an end before the start.
    pub fn new(start: i32, end: i32, step: i32) -> ClimateResult<Self> {
        if step <= 0 || end < start {
            return Err(ClimateError::InvalidYearRange { start, end, step });
        }
        Ok(Self { start, end, step })
    }

    pub fn start(&self) -> i32 { self.start }
    pub fn end(&self) -> i32 { self.end }
    pub fn step(&self) -> i32 { self.step }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        (self.start..=self.end).step_by(self.step as usize)
    }

    pub fn len(&self) -> usize {
        ((i64::from(self.end) - i64::from(self.start)) / i64::from(self.step)) as usize + 1
    }

    /// Always false: a valid range holds at least its start year.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Position of `year` within the range, 0 at `start` and 1 at `end`.
    fn progress(&self, year: i32) -> f64 {
        let span = f64::from(self.end) - f64::from(self.start);
        if span == 0.0 {
            0.0
        } else {
            (f64::from(year) - f64::from(self.start)) / span
        }
    }
}

// ── Series ────────────────────────────────────────────────────────────────────

/// Parallel per-year temperature (°C above baseline) and CO₂ (ppm) sequences.
///
/// `years`, `temperature` and `co2` always have equal length and `years` is
/// strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateSeries {
    pub years: Vec<i32>,
    pub temperature: Vec<f64>,
    pub co2: Vec<f64>,
}

/// One row of a [`ClimateSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClimatePoint {
    pub year: i32,
    pub temperature: f64,
    pub co2: f64,
}

/// Trailing-window means of a series, aligned with its years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmoothedSeries {
    pub window: usize,
    pub temperature: Vec<f64>,
    pub co2: Vec<f64>,
}

impl ClimateSeries {
    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn index_of(&self, year: i32) -> Option<usize> {
        self.years.iter().position(|&y| y == year)
    }

    pub fn point_at(&self, year: i32) -> Option<ClimatePoint> {
        self.index_of(year).map(|i| ClimatePoint {
            year,
            temperature: self.temperature[i],
            co2: self.co2[i],
        })
    }

    pub fn temperature_at(&self, year: i32) -> Option<f64> {
        self.index_of(year).map(|i| self.temperature[i])
    }

    pub fn co2_at(&self, year: i32) -> Option<f64> {
        self.index_of(year).map(|i| self.co2[i])
    }

    pub fn points(&self) -> impl Iterator<Item = ClimatePoint> + '_ {
        self.years
            .iter()
            .zip(&self.temperature)
            .zip(&self.co2)
            .map(|((&year, &temperature), &co2)| ClimatePoint { year, temperature, co2 })
    }

    /// Trailing moving average over up to `window` entries ending at each
    /// index, rounded to two decimals. A window of 0 is treated as 1.
    pub fn moving_average(&self, window: usize) -> SmoothedSeries {
        let window = window.max(1);
        SmoothedSeries {
            window,
            temperature: trailing_mean(&self.temperature, window),
            co2: trailing_mean(&self.co2, window),
        }
    }
}

fn trailing_mean(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| {
            let from = (i + 1).saturating_sub(window);
            let slice = &values[from..=i];
            round_to(slice.iter().sum::<f64>() / slice.len() as f64, 2)
        })
        .collect()
}

// ── Projection ────────────────────────────────────────────────────────────────

/// Project the default range (2025-2100, 5-year steps).
pub fn project(scenario: ScenarioKey, mix: &EnergyMix) -> ClimateSeries {
    project_range(scenario, mix, YearRange::default())
}

/// Project an arbitrary validated year range.
///
/// CO₂ is rounded to whole ppm and temperature to 0.01 °C; both are derived
/// from the unrounded CO₂ value. Values are not clamped and may fall below
/// baseline for renewable-dominant mixes.
pub fn project_range(scenario: ScenarioKey, mix: &EnergyMix, range: YearRange) -> ClimateSeries {
    let s = scenario.scenario();
    let mix_offset = RENEWABLE_PPM_PER_PCT * mix.renewable() + FOSSIL_PPM_PER_PCT * mix.fossil;

    let mut years = Vec::with_capacity(range.len());
    let mut temperature = Vec::with_capacity(range.len());
    let mut co2 = Vec::with_capacity(range.len());

    for year in range.years() {
        let co2_ppm = BASELINE_CO2_PPM + range.progress(year) * s.co2_increase + mix_offset;
        let anomaly = (co2_ppm - BASELINE_CO2_PPM) / 100.0;
        let warming = if anomaly >= 0.0 {
            anomaly * s.temperature_multiplier
        } else {
            anomaly
        };

        years.push(year);
        co2.push(co2_ppm.round());
        temperature.push(round_to(warming, 2));
    }

    log::debug!(
        "projected {scenario} over {}..={} step {} ({} points)",
        range.start, range.end, range.step, years.len()
    );

    ClimateSeries { years, temperature, co2 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Every renewable/fossil split on a 10-point grid with nuclear filling the rest.
    fn mix_grid() -> Vec<EnergyMix> {
        let mut mixes = Vec::new();
        for renewable in (0..=100).step_by(10) {
            for fossil in (0..=(100 - renewable)).step_by(10) {
                let r = renewable as f64;
                let f = fossil as f64;
                mixes.push(EnergyMix::new(r * 0.4, r * 0.4, r * 0.2, 100.0 - r - f, f));
            }
        }
        mixes
    }

    #[test]
    fn default_range_has_sixteen_strictly_increasing_years() {
        for scenario in ScenarioKey::ALL {
            for mix in mix_grid() {
                let series = project(scenario, &mix);
                assert_eq!(series.years.len(), 16);
                assert_eq!(series.temperature.len(), 16);
                assert_eq!(series.co2.len(), 16);
                assert_eq!(series.years.first(), Some(&2025));
                assert_eq!(series.years.last(), Some(&2100));
                assert!(series.years.windows(2).all(|w| w[1] - w[0] == 5));
            }
        }
    }

    #[test]
    fn scenarios_are_ordered_at_every_year_for_every_mix() {
        for mix in mix_grid() {
            let opt = project(ScenarioKey::Optimistic, &mix);
            let mdr = project(ScenarioKey::Moderate, &mix);
            let pes = project(ScenarioKey::Pessimistic, &mix);
            for i in 0..opt.len() {
                assert!(
                    pes.temperature[i] >= mdr.temperature[i]
                        && mdr.temperature[i] >= opt.temperature[i],
                    "year {} mix {mix:?}: pes={} mod={} opt={}",
                    opt.years[i], pes.temperature[i], mdr.temperature[i], opt.temperature[i]
                );
            }
        }
    }

    #[test]
    fn moderate_default_mix_reference_values() {
        // renewable 30, fossil 60 → +15 ppm offset.
        let series = project(ScenarioKey::Moderate, &EnergyMix::default());
        assert_eq!(series.co2[0], 435.0);
        assert_relative_eq!(series.temperature[0], 0.18, epsilon = 1e-9);
        assert_eq!(series.co2_at(2100), Some(515.0));
        assert_relative_eq!(series.temperature_at(2100).unwrap(), 1.14, epsilon = 1e-9);
    }

    #[test]
    fn renewable_dominant_mix_can_go_below_baseline() {
        let all_renewable = EnergyMix::new(40.0, 40.0, 20.0, 0.0, 0.0);
        let series = project(ScenarioKey::Optimistic, &all_renewable);
        assert_eq!(series.co2[0], 370.0);
        assert_relative_eq!(series.temperature[0], -0.5, epsilon = 1e-9);
    }

    #[test]
    fn projection_is_deterministic() {
        let mix = EnergyMix::new(10.0, 15.0, 5.0, 25.0, 45.0);
        let a = project(ScenarioKey::Pessimistic, &mix);
        let b = project(ScenarioKey::Pessimistic, &mix);
        assert_eq!(a, b);
        for (x, y) in a.temperature.iter().zip(&b.temperature) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn custom_range_and_single_year() {
        let range = YearRange::new(2030, 2050, 10).unwrap();
        let series = project_range(ScenarioKey::Moderate, &EnergyMix::default(), range);
        assert_eq!(series.years, vec![2030, 2040, 2050]);

        let single = YearRange::new(2040, 2040, 5).unwrap();
        assert_eq!(single.len(), 1);
        let series = project_range(ScenarioKey::Moderate, &EnergyMix::default(), single);
        assert_eq!(series.years, vec![2040]);
        assert!(series.temperature[0].is_finite());
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        assert_eq!(
            YearRange::new(2025, 2100, 0),
            Err(ClimateError::InvalidYearRange { start: 2025, end: 2100, step: 0 })
        );
        assert!(YearRange::new(2100, 2025, 5).is_err());
        assert!(YearRange::new(2025, 2100, -5).is_err());
    }

    #[test]
    fn lookups_miss_for_off_grid_years() {
        let series = project(ScenarioKey::Moderate, &EnergyMix::default());
        assert_eq!(series.index_of(2027), None);
        assert_eq!(series.temperature_at(1990), None);
        assert_eq!(series.point_at(2050).map(|p| p.year), Some(2050));
        assert_eq!(series.points().count(), series.len());
    }

    #[test]
    fn moving_average_trails_the_series() {
        let series = ClimateSeries {
            years: vec![2025, 2030, 2035, 2040],
            temperature: vec![1.0, 2.0, 3.0, 6.0],
            co2: vec![420.0, 430.0, 440.0, 450.0],
        };
        let ma = series.moving_average(2);
        assert_eq!(ma.temperature, vec![1.0, 1.5, 2.5, 4.5]);
        assert_eq!(ma.co2, vec![420.0, 425.0, 435.0, 445.0]);

        let identity = series.moving_average(0);
        assert_eq!(identity.window, 1);
        assert_eq!(identity.temperature, series.temperature);

        // Window longer than the series: running mean from the start.
        let long = series.moving_average(DEFAULT_SMOOTHING_WINDOW);
        assert_eq!(long.temperature, vec![1.0, 1.5, 2.0, 3.0]);
    }
}
