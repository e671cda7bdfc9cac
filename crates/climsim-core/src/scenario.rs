//! Static scenario catalog.
//!
//! Three fixed climate trajectories. Every rate below is a constant of the
//! catalog; nothing here is mutated after startup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClimateError;

/// First year of every projection and the zero point of the globe warming ramp.
pub const BASE_YEAR: i32 = 2025;

/// Identifier of a named climate trajectory.
///
/// Deserialization goes through [`FromStr`], so JSON accepts the same
/// spellings as the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ScenarioKey {
    Optimistic,
    #[default]
    Moderate,
    Pessimistic,
}

impl ScenarioKey {
    /// All scenarios, ordered from least to most warming.
    pub const ALL: [ScenarioKey; 3] = [
        ScenarioKey::Optimistic,
        ScenarioKey::Moderate,
        ScenarioKey::Pessimistic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScenarioKey::Optimistic  => "optimistic",
            ScenarioKey::Moderate    => "moderate",
            ScenarioKey::Pessimistic => "pessimistic",
        }
    }

    /// Constants for this scenario.
    pub fn scenario(self) -> &'static Scenario {
        match self {
            ScenarioKey::Optimistic  => &CATALOG[0],
            ScenarioKey::Moderate    => &CATALOG[1],
            ScenarioKey::Pessimistic => &CATALOG[2],
        }
    }
}

impl fmt::Display for ScenarioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioKey {
    type Err = ClimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "optimistic"  => Ok(ScenarioKey::Optimistic),
            "moderate"    => Ok(ScenarioKey::Moderate),
            "pessimistic" => Ok(ScenarioKey::Pessimistic),
            _ => Err(ClimateError::UnknownScenario(s.to_string())),
        }
    }
}

impl TryFrom<String> for ScenarioKey {
    type Error = ClimateError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Rate constants of one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scenario {
    pub key: ScenarioKey,
    /// Globe warming ramp in °C per year since [`BASE_YEAR`].
    pub temp_rate_per_year: f64,
    /// CO₂ increase in ppm accumulated over the full projection range.
    pub co2_increase: f64,
    /// Warming per 100 ppm of CO₂ above baseline.
    pub temperature_multiplier: f64,
    /// Warming factor at the poles relative to the equator (≥ 1).
    pub polar_amplification: f64,
    /// Fractional spread of regional warming around the point value.
    pub variability: f64,
    /// Sea-level rise in metres per century.
    pub sea_level_rise_per_century: f64,
}

impl Scenario {
    /// Sea-level rise in metres relative to [`BASE_YEAR`]. Never negative.
    pub fn sea_level_rise_m(&self, year: i32) -> f64 {
        let centuries = years_since_base(year) / 100.0;
        (centuries * self.sea_level_rise_per_century).max(0.0)
    }
}

/// Signed years from [`BASE_YEAR`] to `year`, computed in `f64` so no `i32`
/// year can overflow.
pub fn years_since_base(year: i32) -> f64 {
    f64::from(year) - f64::from(BASE_YEAR)
}

static CATALOG: [Scenario; 3] = [
    Scenario {
        key: ScenarioKey::Optimistic,
        temp_rate_per_year: 0.02,
        co2_increase: 30.0,
        temperature_multiplier: 0.8,
        polar_amplification: 1.2,
        variability: 0.3,
        sea_level_rise_per_century: 0.3,
    },
    Scenario {
        key: ScenarioKey::Moderate,
        temp_rate_per_year: 0.035,
        co2_increase: 80.0,
        temperature_multiplier: 1.2,
        polar_amplification: 1.5,
        variability: 0.4,
        sea_level_rise_per_century: 0.5,
    },
    Scenario {
        key: ScenarioKey::Pessimistic,
        temp_rate_per_year: 0.055,
        co2_increase: 150.0,
        temperature_multiplier: 1.5,
        polar_amplification: 2.0,
        variability: 0.5,
        sea_level_rise_per_century: 1.0,
    },
];

/// The full catalog, ordered as [`ScenarioKey::ALL`].
pub fn catalog() -> &'static [Scenario] {
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn catalog_entries_match_their_keys() {
        for key in ScenarioKey::ALL {
            assert_eq!(key.scenario().key, key, "catalog slot for {key} holds the wrong scenario");
        }
        assert_eq!(catalog().len(), 3);
    }

    #[test]
    fn rates_increase_with_severity() {
        for pair in ScenarioKey::ALL.windows(2) {
            let (lo, hi) = (pair[0].scenario(), pair[1].scenario());
            assert!(lo.temp_rate_per_year < hi.temp_rate_per_year);
            assert!(lo.co2_increase < hi.co2_increase);
            assert!(lo.temperature_multiplier < hi.temperature_multiplier);
            assert!(lo.polar_amplification < hi.polar_amplification);
            assert!(lo.sea_level_rise_per_century < hi.sea_level_rise_per_century);
        }
    }

    #[test]
    fn polar_amplification_is_at_least_one() {
        for s in catalog() {
            assert!(s.polar_amplification >= 1.0, "{}: {}", s.key, s.polar_amplification);
        }
    }

    #[test]
    fn parse_accepts_known_keys_case_insensitively() {
        assert_eq!("optimistic".parse::<ScenarioKey>(), Ok(ScenarioKey::Optimistic));
        assert_eq!(" Moderate ".parse::<ScenarioKey>(), Ok(ScenarioKey::Moderate));
        assert_eq!("PESSIMISTIC".parse::<ScenarioKey>(), Ok(ScenarioKey::Pessimistic));
    }

    #[test]
    fn parse_rejects_unknown_key() {
        let err = "apocalyptic".parse::<ScenarioKey>().unwrap_err();
        assert_eq!(err, ClimateError::UnknownScenario("apocalyptic".into()));
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&ScenarioKey::Pessimistic).unwrap();
        assert_eq!(json, "\"pessimistic\"");
        let back: ScenarioKey = serde_json::from_str("\"optimistic\"").unwrap();
        assert_eq!(back, ScenarioKey::Optimistic);
        let back: ScenarioKey = serde_json::from_str("\" Moderate\"").unwrap();
        assert_eq!(back, ScenarioKey::Moderate);
        let err = serde_json::from_str::<ScenarioKey>("\"doom\"").unwrap_err();
        assert!(err.to_string().contains("Unknown scenario 'doom'"), "{err}");
    }

    #[test]
    fn sea_level_rise_is_linear_and_non_negative() {
        let moderate = ScenarioKey::Moderate.scenario();
        assert_relative_eq!(moderate.sea_level_rise_m(2125), 0.5, epsilon = 1e-12);
        assert_relative_eq!(moderate.sea_level_rise_m(2075), 0.25, epsilon = 1e-12);
        assert_eq!(moderate.sea_level_rise_m(BASE_YEAR), 0.0);
        assert_eq!(moderate.sea_level_rise_m(2000), 0.0);
    }

    #[test]
    fn extreme_years_do_not_overflow() {
        let pessimistic = ScenarioKey::Pessimistic.scenario();
        assert_eq!(pessimistic.sea_level_rise_m(i32::MIN), 0.0);
        let far = pessimistic.sea_level_rise_m(i32::MAX);
        assert!(far.is_finite() && far > 0.0, "{far}");
        assert_eq!(years_since_base(i32::MIN), f64::from(i32::MIN) - 2025.0);
    }
}
