//! Energy mix records, presets, proportional rebalancing and carbon intensity.
//!
//! The five-source [`EnergyMix`] is the primary record. The three-sector
//! [`SectorMix`] (renewable / fossil / nuclear) is derived from it by summing
//! solar, wind and hydro, and can also be edited on its own.

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ClimateError, ClimateResult};

// ── Keys ──────────────────────────────────────────────────────────────────────

/// A single generation source in the detailed mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergySource {
    Solar,
    Wind,
    Hydro,
    Nuclear,
    Fossil,
}

impl EnergySource {
    /// Field order of [`EnergyMix`]; rebalancing visits sources in this order.
    pub const ALL: [EnergySource; 5] = [
        EnergySource::Solar,
        EnergySource::Wind,
        EnergySource::Hydro,
        EnergySource::Nuclear,
        EnergySource::Fossil,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EnergySource::Solar   => "solar",
            EnergySource::Wind    => "wind",
            EnergySource::Hydro   => "hydro",
            EnergySource::Nuclear => "nuclear",
            EnergySource::Fossil  => "fossil",
        }
    }

    pub fn is_renewable(self) -> bool {
        matches!(self, EnergySource::Solar | EnergySource::Wind | EnergySource::Hydro)
    }

    /// CO₂-equivalent units emitted per full share of the mix.
    pub fn carbon_factor(self) -> f64 {
        match self {
            EnergySource::Solar   =>  0.1,
            EnergySource::Wind    =>  0.1,
            EnergySource::Hydro   =>  0.2,
            EnergySource::Nuclear =>  0.5,
            EnergySource::Fossil  => 10.0,
        }
    }

    fn index(self) -> usize {
        match self {
            EnergySource::Solar   => 0,
            EnergySource::Wind    => 1,
            EnergySource::Hydro   => 2,
            EnergySource::Nuclear => 3,
            EnergySource::Fossil  => 4,
        }
    }
}

impl fmt::Display for EnergySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergySource {
    type Err = ClimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        EnergySource::ALL
            .into_iter()
            .find(|src| src.as_str() == key)
            .ok_or_else(|| ClimateError::UnknownEnergySource(s.to_string()))
    }
}

/// A coarse energy sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergySector {
    Renewable,
    Fossil,
    Nuclear,
}

impl EnergySector {
    pub const ALL: [EnergySector; 3] = [
        EnergySector::Renewable,
        EnergySector::Fossil,
        EnergySector::Nuclear,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EnergySector::Renewable => "renewable",
            EnergySector::Fossil    => "fossil",
            EnergySector::Nuclear   => "nuclear",
        }
    }

    fn index(self) -> usize {
        match self {
            EnergySector::Renewable => 0,
            EnergySector::Fossil    => 1,
            EnergySector::Nuclear   => 2,
        }
    }
}

impl fmt::Display for EnergySector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergySector {
    type Err = ClimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        EnergySector::ALL
            .into_iter()
            .find(|sector| sector.as_str() == key)
            .ok_or_else(|| ClimateError::UnknownEnergySource(s.to_string()))
    }
}

// ── Sector mix ────────────────────────────────────────────────────────────────

/// Three-sector mix in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorMix {
    pub renewable: f64,
    pub fossil: f64,
    pub nuclear: f64,
}

impl Default for SectorMix {
    fn default() -> Self {
        Self { renewable: 30.0, fossil: 60.0, nuclear: 10.0 }
    }
}

impl SectorMix {
    pub fn new(renewable: f64, fossil: f64, nuclear: f64) -> Self {
        Self { renewable, fossil, nuclear }
    }

    pub fn get(&self, sector: EnergySector) -> f64 {
        self.to_array()[sector.index()]
    }

    pub fn total(&self) -> f64 {
        self.renewable + self.fossil + self.nuclear
    }

    /// Set `sector` to `value` and shift the difference onto the other two
    /// sectors in proportion to their current shares.
    pub fn rebalance(&self, sector: EnergySector, value: f64) -> ClimateResult<Self> {
        check_percentage(sector.as_str(), value)?;
        let next = Self::from_array(rebalance_shares(self.to_array(), sector.index(), value));
        debug!("rebalanced sector {sector} to {value}: {next:?}");
        Ok(next)
    }

    fn to_array(self) -> [f64; 3] {
        [self.renewable, self.fossil, self.nuclear]
    }

    fn from_array(a: [f64; 3]) -> Self {
        Self { renewable: a[0], fossil: a[1], nuclear: a[2] }
    }
}

// ── Detailed mix ──────────────────────────────────────────────────────────────

/// Five-source mix in percent. Deserializes from either the five-source
/// shape or the three-sector shape (`{renewable, fossil, nuclear}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "MixRepr")]
pub struct EnergyMix {
    pub solar: f64,
    pub wind: f64,
    pub hydro: f64,
    pub nuclear: f64,
    pub fossil: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MixRepr {
    Detailed {
        solar: f64,
        wind: f64,
        hydro: f64,
        nuclear: f64,
        fossil: f64,
    },
    Sectors(SectorMix),
}

impl From<MixRepr> for EnergyMix {
    fn from(repr: MixRepr) -> Self {
        match repr {
            MixRepr::Detailed { solar, wind, hydro, nuclear, fossil } => {
                Self { solar, wind, hydro, nuclear, fossil }
            }
            MixRepr::Sectors(sectors) => Self::from(sectors),
        }
    }
}

impl From<SectorMix> for EnergyMix {
    /// Splits the renewable share across solar, wind and hydro in a 2:2:1 ratio.
    fn from(s: SectorMix) -> Self {
        Self {
            solar: s.renewable * 2.0 / 5.0,
            wind: s.renewable * 2.0 / 5.0,
            hydro: s.renewable / 5.0,
            nuclear: s.nuclear,
            fossil: s.fossil,
        }
    }
}

impl Default for EnergyMix {
    fn default() -> Self {
        Self::from(SectorMix::default())
    }
}

impl EnergyMix {
    pub fn new(solar: f64, wind: f64, hydro: f64, nuclear: f64, fossil: f64) -> Self {
        Self { solar, wind, hydro, nuclear, fossil }
    }

    pub fn get(&self, source: EnergySource) -> f64 {
        self.to_array()[source.index()]
    }

    /// Combined solar, wind and hydro share.
    pub fn renewable(&self) -> f64 {
        self.solar + self.wind + self.hydro
    }

    pub fn total(&self) -> f64 {
        self.to_array().iter().sum()
    }

    /// Every share must be a finite percentage in `[0, 100]`. The total is
    /// not checked.
    pub fn validate(&self) -> ClimateResult<()> {
        for source in EnergySource::ALL {
            check_percentage(source.as_str(), self.get(source))?;
        }
        Ok(())
    }

    pub fn sectors(&self) -> SectorMix {
        SectorMix {
            renewable: self.renewable(),
            fossil: self.fossil,
            nuclear: self.nuclear,
        }
    }

    /// Set `source` to `value` and shift the difference onto the other four
    /// sources in proportion to their current shares.
    pub fn rebalance(&self, source: EnergySource, value: f64) -> ClimateResult<Self> {
        check_percentage(source.as_str(), value)?;
        let next = Self::from_array(rebalance_shares(self.to_array(), source.index(), value));
        debug!("rebalanced source {source} to {value}: {next:?}");
        Ok(next)
    }

    /// Apply a sector-level edit. The renewable sector keeps its internal
    /// solar/wind/hydro proportions (2:2:1 when it was empty).
    pub fn rebalance_sector(&self, sector: EnergySector, value: f64) -> ClimateResult<Self> {
        let next = self.sectors().rebalance(sector, value)?;
        let renewable = self.renewable();
        let (solar, wind, hydro) = if renewable > 0.0 {
            let scale = next.renewable / renewable;
            (self.solar * scale, self.wind * scale, self.hydro * scale)
        } else {
            let split = EnergyMix::from(next);
            (split.solar, split.wind, split.hydro)
        };
        Ok(Self { solar, wind, hydro, nuclear: next.nuclear, fossil: next.fossil })
    }

    /// Weighted carbon intensity of the mix.
    pub fn carbon_intensity(&self) -> CarbonIntensity {
        let value: f64 = EnergySource::ALL
            .iter()
            .map(|&src| self.get(src) / 100.0 * src.carbon_factor())
            .sum();
        CarbonIntensity::from_value(value)
    }

    fn to_array(self) -> [f64; 5] {
        [self.solar, self.wind, self.hydro, self.nuclear, self.fossil]
    }

    fn from_array(a: [f64; 5]) -> Self {
        Self { solar: a[0], wind: a[1], hydro: a[2], nuclear: a[3], fossil: a[4] }
    }
}

// ── Presets ───────────────────────────────────────────────────────────────────

/// One-click mixes offered next to the scenario selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyPreset {
    Renewable,
    Mixed,
    Fossil,
}

impl EnergyPreset {
    pub fn sectors(self) -> SectorMix {
        match self {
            EnergyPreset::Renewable => SectorMix::new(80.0, 10.0, 10.0),
            EnergyPreset::Mixed     => SectorMix::new(40.0, 40.0, 20.0),
            EnergyPreset::Fossil    => SectorMix::new(20.0, 70.0, 10.0),
        }
    }

    pub fn mix(self) -> EnergyMix {
        EnergyMix::from(self.sectors())
    }
}

impl FromStr for EnergyPreset {
    type Err = ClimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "renewable" => Ok(EnergyPreset::Renewable),
            "mixed"     => Ok(EnergyPreset::Mixed),
            "fossil"    => Ok(EnergyPreset::Fossil),
            _ => Err(ClimateError::UnknownPreset(s.to_string())),
        }
    }
}

// ── Carbon intensity ──────────────────────────────────────────────────────────

/// Gauge scale: an intensity of 8 fills the gauge.
const INTENSITY_GAUGE_MAX: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityBand {
    Low,
    Elevated,
    High,
}

/// Carbon intensity of a mix with its display band and gauge fill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CarbonIntensity {
    /// CO₂-equivalent units.
    pub value: f64,
    pub band: IntensityBand,
    /// Gauge fill in percent, 0-100.
    pub gauge_percent: f64,
}

impl CarbonIntensity {
    fn from_value(value: f64) -> Self {
        let band = if value > 4.0 {
            IntensityBand::High
        } else if value > 2.0 {
            IntensityBand::Elevated
        } else {
            IntensityBand::Low
        };
        let gauge_percent = (value / INTENSITY_GAUGE_MAX * 100.0).clamp(0.0, 100.0);
        Self { value, band, gauge_percent }
    }
}

// ── Rebalancing ───────────────────────────────────────────────────────────────

fn check_percentage(name: &str, value: f64) -> ClimateResult<()> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(ClimateError::PercentageOutOfRange { source_name: name.to_string(), value })
    }
}

/// Proportional redistribution over a fixed set of shares.
///
/// `shares[changed]` becomes `value`; every other share moves by
/// `delta × share / others_total`, floored at 0 and rounded to a whole
/// percent. The last non-zero other share is computed from the remaining
/// target instead, so independent rounding does not change the total.
/// When all other shares are already 0 nothing is redistributed.
pub fn rebalance_shares<const N: usize>(shares: [f64; N], changed: usize, value: f64) -> [f64; N] {
    let delta = value - shares[changed];
    let others_total: f64 = shares
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != changed)
        .map(|(_, &v)| v)
        .sum();

    let mut next = shares;
    next[changed] = value;
    if others_total <= 0.0 {
        return next;
    }

    let target = (others_total - delta).max(0.0);
    let absorber = (0..N).rev().find(|&i| i != changed && shares[i] > 0.0);

    let mut assigned = 0.0;
    for i in 0..N {
        if i == changed || Some(i) == absorber {
            continue;
        }
        let proportion = shares[i] / others_total;
        let v = (shares[i] - delta * proportion).max(0.0).round();
        next[i] = v;
        assigned += v;
    }
    if let Some(i) = absorber {
        next[i] = (target - assigned).max(0.0).round();
    }
    next
}
