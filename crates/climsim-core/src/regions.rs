//! Macro-region grouping of city points.

use serde::{Deserialize, Serialize};

use crate::globe::{CityPoint, TemperatureBand};

/// A named set of city labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub cities: Vec<String>,
}

impl Region {
    pub fn new(name: impl Into<String>, cities: &[&str]) -> Self {
        Self {
            name: name.into(),
            cities: cities.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.cities.iter().any(|c| c == label)
    }
}

/// Ordered region → cities mapping. Aggregation preserves insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionMap {
    regions: Vec<Region>,
}

impl RegionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a region; a repeated name replaces the earlier entry in place.
    pub fn insert(&mut self, region: Region) {
        match self.regions.iter_mut().find(|r| r.name == region.name) {
            Some(existing) => *existing = region,
            None => self.regions.push(region),
        }
    }

    pub fn with(mut self, name: &str, cities: &[&str]) -> Self {
        self.insert(Region::new(name, cities));
        self
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Grouping of the built-in city list.
pub fn default_regions() -> RegionMap {
    RegionMap::new()
        .with("Northern Europe", &["Berlin", "London", "Moscow"])
        .with("Southern Europe", &["Paris"])
        .with("North America", &["New York"])
        .with("Asia", &["Tokyo", "Beijing"])
        .with("Southern Hemisphere", &["Sydney", "Rio", "Cape Town"])
}

/// Mean warming of one region with the points that contributed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSummary {
    pub region: String,
    /// Mean of member values; 0 when no city matched.
    pub average_value: f64,
    pub members: Vec<CityPoint>,
}

impl RegionSummary {
    pub fn band(&self) -> TemperatureBand {
        TemperatureBand::from_celsius(self.average_value)
    }
}

/// Average `points` per region, in region insertion order.
pub fn aggregate(points: &[CityPoint], regions: &RegionMap) -> Vec<RegionSummary> {
    regions
        .regions()
        .iter()
        .map(|region| {
            let members: Vec<CityPoint> = points
                .iter()
                .filter(|p| region.contains(&p.label))
                .cloned()
                .collect();
            let average_value = if members.is_empty() {
                0.0
            } else {
                members.iter().map(|p| p.value).sum::<f64>() / members.len() as f64
            };
            RegionSummary { region: region.name.clone(), average_value, members }
        })
        .collect()
}
