//! Deterministic calculation core for the climate scenario dashboard.
//!
//! Pipeline for one input change:
//!   scenario + energy mix → projection → selected-year risk →
//!   globe points → regional aggregates → impact cards.
//!
//! Every function here is pure. Presentation layers (the wasm binding, the
//! CLI) hold a [`dashboard::DashboardState`] and call [`dashboard::Dashboard::derive`]
//! after each edit.

pub mod coords;
pub mod dashboard;
pub mod energy;
pub mod error;
pub mod globe;
pub mod impacts;
pub mod projection;
pub mod regions;
pub mod risk;
pub mod scenario;

pub use dashboard::{Dashboard, DashboardState, DashboardView};
pub use energy::{EnergyMix, EnergyPreset, EnergySector, EnergySource, SectorMix};
pub use error::{ClimateError, ClimateResult};
pub use projection::{project, ClimateSeries};
pub use scenario::ScenarioKey;

/// Round half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::round_to;

    #[test]
    fn round_to_two_places() {
        assert_eq!(round_to(1.234, 2), 1.23);
        assert_eq!(round_to(-0.456, 2), -0.46);
        assert_eq!(round_to(2.0, 2), 2.0);
    }
}
