//! # Building Parameters
//!
//! `BuildingParameters` is the validated input to the estimator: footprint,
//! floor count, occupancy type, concrete grade, unit prices and labor rates.
//! It serializes with the camelCase field names used on the wire.
//!
//! Values of this type are normally produced by
//! [`crate::validation::BuildingRequest::validate`]. Deserializing it
//! directly skips validation; in that case an unknown concrete grade falls
//! back to M25.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "length": 20.0,
//!   "width": 15.0,
//!   "floors": 3,
//!   "buildingType": "Residential",
//!   "concreteGrade": "M25",
//!   "unit": "metric",
//!   "materialPrices": { "cement": 6000, "sand": 1800, "aggregate": 1600, "steel": 55, "water": 50 },
//!   "laborCosts": { "dailyWage": 500, "productivityRate": 1, "projectDuration": 180 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::materials::{deserialize_grade_or_default, ConcreteGrade};
use crate::units::UnitSystem;

/// Building occupancy type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingType {
    Residential,
    Commercial,
    Industrial,
}

impl BuildingType {
    /// All building types for selection lists
    pub const ALL: [BuildingType; 3] = [
        BuildingType::Residential,
        BuildingType::Commercial,
        BuildingType::Industrial,
    ];

    /// Name as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            BuildingType::Residential => "Residential",
            BuildingType::Commercial => "Commercial",
            BuildingType::Industrial => "Industrial",
        }
    }

    /// Wire names of every type, for error messages
    pub fn names() -> [&'static str; 3] {
        Self::ALL.map(|t| t.name())
    }

    /// Exact lookup by wire name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Parse from loose user input ("res", "commercial", "I")
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "residential" | "res" | "r" => Some(BuildingType::Residential),
            "commercial" | "com" | "c" => Some(BuildingType::Commercial),
            "industrial" | "ind" | "i" => Some(BuildingType::Industrial),
            _ => None,
        }
    }
}

impl std::fmt::Display for BuildingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Unit prices for materials, in the user's currency.
///
/// Missing fields take their default price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialPrices {
    /// Cement, per tonne
    pub cement: f64,
    /// Sand (fine aggregate), per tonne
    pub sand: f64,
    /// Coarse aggregate, per tonne
    pub aggregate: f64,
    /// Reinforcing steel, per kg
    pub steel: f64,
    /// Water, per m³
    pub water: f64,
}

impl Default for MaterialPrices {
    /// Typical Indian market prices (INR)
    fn default() -> Self {
        MaterialPrices {
            cement: 6000.0,
            sand: 1800.0,
            aggregate: 1600.0,
            steel: 55.0,
            water: 50.0,
        }
    }
}

/// Labor rates and schedule.
///
/// Missing fields take their default value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LaborCosts {
    /// Wage per laborer per day
    pub daily_wage: f64,
    /// Floor area one laborer completes per day (m²/day)
    pub productivity_rate: f64,
    /// Planned project duration (days)
    pub project_duration: f64,
}

impl Default for LaborCosts {
    fn default() -> Self {
        LaborCosts {
            daily_wage: 500.0,
            productivity_rate: 1.0,
            project_duration: 180.0,
        }
    }
}

/// Validated input to [`crate::calculations::estimate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingParameters {
    /// Building length, in `unit`
    pub length: f64,
    /// Building width, in `unit`
    pub width: f64,
    /// Number of floors
    pub floors: u32,
    /// Occupancy type
    pub building_type: BuildingType,
    /// Concrete grade (unknown codes fall back to M25 when deserialized)
    #[serde(deserialize_with = "deserialize_grade_or_default")]
    pub concrete_grade: ConcreteGrade,
    /// Unit system of `length` and `width`
    #[serde(default)]
    pub unit: UnitSystem,
    /// Material unit prices
    #[serde(default)]
    pub material_prices: MaterialPrices,
    /// Labor rates
    #[serde(default)]
    pub labor_costs: LaborCosts,
}

impl BuildingParameters {
    /// Create parameters in metric units with default prices and labor rates.
    ///
    /// # Example
    ///
    /// ```rust
    /// use calc_core::building::{BuildingParameters, BuildingType};
    /// use calc_core::materials::ConcreteGrade;
    ///
    /// let params = BuildingParameters::new(20.0, 15.0, 3, BuildingType::Residential, ConcreteGrade::M25);
    /// assert_eq!(params.material_prices.cement, 6000.0);
    /// ```
    pub fn new(
        length: f64,
        width: f64,
        floors: u32,
        building_type: BuildingType,
        concrete_grade: ConcreteGrade,
    ) -> Self {
        BuildingParameters {
            length,
            width,
            floors,
            building_type,
            concrete_grade,
            unit: UnitSystem::Metric,
            material_prices: MaterialPrices::default(),
            labor_costs: LaborCosts::default(),
        }
    }

    /// Builder: set the unit system
    pub fn with_unit(mut self, unit: UnitSystem) -> Self {
        self.unit = unit;
        self
    }

    /// Builder: set material prices
    pub fn with_material_prices(mut self, prices: MaterialPrices) -> Self {
        self.material_prices = prices;
        self
    }

    /// Builder: set labor costs
    pub fn with_labor_costs(mut self, labor: LaborCosts) -> Self {
        self.labor_costs = labor;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_building_type_names() {
        assert_eq!(BuildingType::names(), ["Residential", "Commercial", "Industrial"]);
        assert_eq!(BuildingType::from_name("Commercial"), Some(BuildingType::Commercial));
        assert_eq!(BuildingType::from_name("Hospital"), None);
        assert_eq!(BuildingType::from_str_flexible(" IND "), Some(BuildingType::Industrial));
    }

    #[test]
    fn test_wire_field_names() {
        let params = BuildingParameters::new(20.0, 15.0, 3, BuildingType::Residential, ConcreteGrade::M25);
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["buildingType"], "Residential");
        assert_eq!(json["concreteGrade"], "M25");
        assert_eq!(json["unit"], "metric");
        assert_eq!(json["laborCosts"]["dailyWage"], 500.0);
        assert_eq!(json["materialPrices"]["aggregate"], 1600.0);
    }

    #[test]
    fn test_defaults_when_optional_blocks_missing() {
        let json = r#"{
            "length": 10, "width": 8, "floors": 2,
            "buildingType": "Industrial", "concreteGrade": "M30"
        }"#;
        let params: BuildingParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.unit, UnitSystem::Metric);
        assert_eq!(params.material_prices, MaterialPrices::default());
        assert_eq!(params.labor_costs, LaborCosts::default());
    }

    #[test]
    fn test_unknown_grade_falls_back() {
        let json = r#"{
            "length": 10, "width": 8, "floors": 2,
            "buildingType": "Residential", "concreteGrade": "M100"
        }"#;
        let params: BuildingParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.concrete_grade, ConcreteGrade::M25);
    }
}
