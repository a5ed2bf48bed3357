use std::fmt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use super::validation::ValidationErrors;

/// Distance of a district from the ocean.
///
/// Serialized as the exact, case-sensitive labels used by the training data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OceanProximity {
    #[serde(rename = "NEAR BAY")]
    NearBay,
    #[serde(rename = "<1H OCEAN")]
    LessThanOneHourOcean,
    #[serde(rename = "INLAND")]
    Inland,
    #[serde(rename = "NEAR OCEAN")]
    NearOcean,
    #[serde(rename = "ISLAND")]
    Island,
}

impl OceanProximity {
    /// Every category, in declaration order
    pub const ALL: [OceanProximity; 5] = [
        OceanProximity::NearBay,
        OceanProximity::LessThanOneHourOcean,
        OceanProximity::Inland,
        OceanProximity::NearOcean,
        OceanProximity::Island,
    ];

    /// The wire label for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            OceanProximity::NearBay => "NEAR BAY",
            OceanProximity::LessThanOneHourOcean => "<1H OCEAN",
            OceanProximity::Inland => "INLAND",
            OceanProximity::NearOcean => "NEAR OCEAN",
            OceanProximity::Island => "ISLAND",
        }
    }

    /// Look up a category by its exact wire label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == label)
    }
}

impl fmt::Display for OceanProximity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// # HousingFeatures
///
/// The nine attributes describing one housing district.
///
/// ## Invariants
///
/// * every measurement other than `longitude` and `latitude` is finite and `>= 0`
/// * coordinates are finite, with no range constraint
/// * `ocean_proximity` is one of the five [`OceanProximity`] categories
///
/// Instances are produced by [`HousingFeatures::validate`]. Deserializing routes through
/// the same validation, so an invalid value cannot be constructed from JSON either.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct HousingFeatures {
    pub(super) longitude: f64,
    pub(super) latitude: f64,
    pub(super) housing_median_age: f64,
    pub(super) total_rooms: f64,
    pub(super) total_bedrooms: f64,
    pub(super) population: f64,
    pub(super) households: f64,
    pub(super) median_income: f64,
    pub(super) ocean_proximity: OceanProximity,
}

impl HousingFeatures {
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn housing_median_age(&self) -> f64 {
        self.housing_median_age
    }

    pub fn total_rooms(&self) -> f64 {
        self.total_rooms
    }

    pub fn total_bedrooms(&self) -> f64 {
        self.total_bedrooms
    }

    pub fn population(&self) -> f64 {
        self.population
    }

    pub fn households(&self) -> f64 {
        self.households
    }

    pub fn median_income(&self) -> f64 {
        self.median_income
    }

    pub fn ocean_proximity(&self) -> OceanProximity {
        self.ocean_proximity
    }
}

impl TryFrom<Value> for HousingFeatures {
    type Error = ValidationErrors;

    fn try_from(payload: Value) -> Result<Self, Self::Error> {
        Self::validate(&payload)
    }
}
