//! Temperature-driven impact cards: disaster outlook and economic/social impact.
//!
//! Every score is `round(temperature × weight)` clamped to 0-100, where
//! `temperature` is the projected warming for the selected year.

use serde::Serialize;

fn percent(temperature: f64, weight: f64) -> f64 {
    (temperature * weight).round().clamp(0.0, 100.0)
}

// ── Disasters ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisasterKind {
    HeatWave,
    Flood,
    Storm,
    Drought,
}

impl DisasterKind {
    pub const ALL: [DisasterKind; 4] = [
        DisasterKind::HeatWave,
        DisasterKind::Flood,
        DisasterKind::Storm,
        DisasterKind::Drought,
    ];

    /// (probability weight, severity weight) per °C.
    fn weights(self) -> (f64, f64) {
        match self {
            DisasterKind::HeatWave => (20.0, 15.0),
            DisasterKind::Flood    => (15.0, 18.0),
            DisasterKind::Storm    => (12.0, 16.0),
            DisasterKind::Drought  => (18.0, 20.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisasterOutlook {
    pub kind: DisasterKind,
    /// Likelihood in percent.
    pub probability: f64,
    /// Intensity in percent.
    pub severity: f64,
}

/// Outlook for every disaster kind, in [`DisasterKind::ALL`] order.
pub fn disaster_outlook(temperature: f64) -> Vec<DisasterOutlook> {
    DisasterKind::ALL
        .iter()
        .map(|&kind| {
            let (p, s) = kind.weights();
            DisasterOutlook {
                kind,
                probability: percent(temperature, p),
                severity: percent(temperature, s),
            }
        })
        .collect()
}

// ── Economy ───────────────────────────────────────────────────────────────────

/// Economic and social impact indicators in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EconomicImpact {
    pub economic_growth: f64,
    pub population_affected: f64,
    pub gdp_impact: f64,
    pub agricultural_loss: f64,
    pub water_scarcity: f64,
    pub disaster_risk: f64,
}

pub fn economic_impact(temperature: f64) -> EconomicImpact {
    EconomicImpact {
        economic_growth:     percent(temperature, 15.0),
        population_affected: percent(temperature, 12.0),
        gdp_impact:          percent(temperature, 18.0),
        agricultural_loss:   percent(temperature, 20.0),
        water_scarcity:      percent(temperature, 16.0),
        disaster_risk:       percent(temperature, 22.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_warming_has_no_impact() {
        assert_eq!(economic_impact(0.0), EconomicImpact::default());
        for d in disaster_outlook(0.0) {
            assert_eq!((d.probability, d.severity), (0.0, 0.0), "{:?}", d.kind);
        }
    }

    #[test]
    fn reference_values_at_two_degrees() {
        let e = economic_impact(2.0);
        assert_eq!(e.economic_growth, 30.0);
        assert_eq!(e.population_affected, 24.0);
        assert_eq!(e.gdp_impact, 36.0);
        assert_eq!(e.agricultural_loss, 40.0);
        assert_eq!(e.water_scarcity, 32.0);
        assert_eq!(e.disaster_risk, 44.0);

        let d = disaster_outlook(2.0);
        assert_eq!(d.len(), 4);
        assert_eq!(d[0].kind, DisasterKind::HeatWave);
        assert_eq!((d[0].probability, d[0].severity), (40.0, 30.0));
        assert_eq!((d[3].probability, d[3].severity), (36.0, 40.0));
    }

    #[test]
    fn scores_clamp_to_percent_range() {
        let hot = economic_impact(9.0);
        assert_eq!(hot.disaster_risk, 100.0);
        assert_eq!(hot.population_affected, 100.0);
        for d in disaster_outlook(50.0) {
            assert_eq!(d.probability, 100.0);
            assert_eq!(d.severity, 100.0);
        }
        let cool = economic_impact(-0.5);
        assert_eq!(cool.gdp_impact, 0.0);
        for d in disaster_outlook(-1.0) {
            assert!(d.probability >= 0.0 && d.severity >= 0.0);
        }
    }
}
