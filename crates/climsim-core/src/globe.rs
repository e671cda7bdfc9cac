//! Per-city warming points for the map and globe views.
//!
//! For each city: `(year − 2025) × warming rate`, amplified toward the poles
//! by `1 + |lat|/90 × (polar_amplification − 1)`, scaled by the city's static
//! regional factor and clamped at zero.

use serde::{Deserialize, Serialize};

use crate::coords::LatLon;
use crate::scenario::{years_since_base, ScenarioKey};

/// A static map location with its local climate sensitivity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub label: &'static str,
    pub position: LatLon,
    /// Multiplier on the scenario warming for this location.
    pub regional_factor: f64,
}

impl City {
    pub const fn new(label: &'static str, lat: f64, lng: f64, regional_factor: f64) -> Self {
        Self { label, position: LatLon::new(lat, lng), regional_factor }
    }
}

/// Continental interiors warm faster than coastal and southern-hemisphere cities.
pub static CITIES: [City; 10] = [
    City::new("Berlin",    52.5200,   13.4050, 1.05),
    City::new("Paris",     48.8566,    2.3522, 1.00),
    City::new("London",    51.5074,   -0.1278, 0.95),
    City::new("New York",  40.7128,  -74.0060, 1.00),
    City::new("Tokyo",     35.6762,  139.6503, 0.95),
    City::new("Beijing",   39.9042,  116.4074, 1.10),
    City::new("Moscow",    55.7558,   37.6173, 1.15),
    City::new("Sydney",   -33.8688,  151.2093, 0.90),
    City::new("Rio",      -22.9068,  -43.1729, 0.85),
    City::new("Cape Town",-33.9249,   18.4241, 0.90),
];

/// A city with its derived warming for one (scenario, year).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityPoint {
    pub label: String,
    pub lat: f64,
    pub lng: f64,
    pub regional_factor: f64,
    /// Warming since 2025 in °C, never negative.
    pub value: f64,
    /// ± band from the scenario's regional variability, never negative.
    pub spread: f64,
}

impl CityPoint {
    pub fn band(&self) -> TemperatureBand {
        TemperatureBand::from_celsius(self.value)
    }
}

/// Colour bucket for a warming value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureBand {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl TemperatureBand {
    pub fn from_celsius(value: f64) -> Self {
        if value >= 4.0 {
            TemperatureBand::VeryHigh
        } else if value >= 3.0 {
            TemperatureBand::High
        } else if value >= 2.0 {
            TemperatureBand::Medium
        } else if value >= 1.0 {
            TemperatureBand::Low
        } else {
            TemperatureBand::VeryLow
        }
    }
}

/// Points for the built-in city list.
pub fn generate(scenario: ScenarioKey, year: i32) -> Vec<CityPoint> {
    generate_for(&CITIES, scenario, year)
}

/// Points for an arbitrary city list, in input order.
pub fn generate_for(cities: &[City], scenario: ScenarioKey, year: i32) -> Vec<CityPoint> {
    let s = scenario.scenario();
    let ramp = years_since_base(year) * s.temp_rate_per_year;

    cities
        .iter()
        .map(|city| {
            let polar = 1.0 + city.position.polar_fraction() * (s.polar_amplification - 1.0);
            let value = (ramp * polar * city.regional_factor).max(0.0);
            CityPoint {
                label: city.label.to_string(),
                lat: city.position.lat,
                lng: city.position.lon,
                regional_factor: city.regional_factor,
                value,
                spread: value * s.variability,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::BASE_YEAR;

    #[test]
    fn base_year_is_zero_everywhere() {
        for scenario in ScenarioKey::ALL {
            for p in generate(scenario, BASE_YEAR) {
                assert_eq!(p.value, 0.0, "{scenario} {}: {}", p.label, p.value);
                assert_eq!(p.spread, 0.0);
            }
        }
    }

    #[test]
    fn years_before_base_clamp_to_zero() {
        for p in generate(ScenarioKey::Pessimistic, 2000) {
            assert_eq!(p.value, 0.0, "{} went negative", p.label);
        }
    }

    #[test]
    fn higher_latitude_warms_more_for_equal_factor() {
        let cities = [
            City::new("Equator", 0.0, 0.0, 1.0),
            City::new("Mid", 45.0, 0.0, 1.0),
            City::new("South", -60.0, 0.0, 1.0),
            City::new("Pole", 89.0, 0.0, 1.0),
        ];
        let pts = generate_for(&cities, ScenarioKey::Moderate, 2100);
        for w in pts.windows(2) {
            assert!(
                w[1].value > w[0].value,
                "{} ({}) should exceed {} ({})",
                w[1].label, w[1].value, w[0].label, w[0].value
            );
        }
        // 75 years × 0.035 °C at the equator.
        assert!((pts[0].value - 2.625).abs() < 1e-9, "equator {}", pts[0].value);
    }

    #[test]
    fn moderate_2100_berlin_reference() {
        let berlin = generate(ScenarioKey::Moderate, 2100)
            .into_iter()
            .find(|p| p.label == "Berlin")
            .unwrap();
        let expected = 75.0 * 0.035 * (1.0 + 52.52 / 90.0 * 0.5) * 1.05;
        assert!((berlin.value - expected).abs() < 1e-9, "{} vs {expected}", berlin.value);
        assert!((berlin.spread - expected * 0.4).abs() < 1e-9);
        assert_eq!(berlin.band(), TemperatureBand::High);
    }

    #[test]
    fn output_follows_city_order_and_is_deterministic() {
        let a = generate(ScenarioKey::Optimistic, 2060);
        let b = generate(ScenarioKey::Optimistic, 2060);
        assert_eq!(a, b);
        let labels: Vec<&str> = a.iter().map(|p| p.label.as_str()).collect();
        let expected: Vec<&str> = CITIES.iter().map(|c| c.label).collect();
        assert_eq!(labels, expected);
    }

    #[test]
    fn coordinates_are_in_range() {
        for c in &CITIES {
            assert!(c.position.is_valid(), "{} at {:?}", c.label, c.position);
            assert!(c.regional_factor > 0.0);
        }
    }

    #[test]
    fn temperature_bands() {
        assert_eq!(TemperatureBand::from_celsius(0.5), TemperatureBand::VeryLow);
        assert_eq!(TemperatureBand::from_celsius(1.0), TemperatureBand::Low);
        assert_eq!(TemperatureBand::from_celsius(2.9), TemperatureBand::Medium);
        assert_eq!(TemperatureBand::from_celsius(3.0), TemperatureBand::High);
        assert_eq!(TemperatureBand::from_celsius(4.2), TemperatureBand::VeryHigh);
    }

    #[test]
    fn extreme_years_stay_finite_and_clamped() {
        for p in generate(ScenarioKey::Pessimistic, i32::MIN) {
            assert_eq!(p.value, 0.0, "{}", p.label);
            assert_eq!(p.spread, 0.0);
        }
        for p in generate(ScenarioKey::Optimistic, i32::MAX) {
            assert!(p.value.is_finite() && p.value > 0.0, "{}: {}", p.label, p.value);
        }
    }
}
