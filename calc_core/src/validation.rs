//! # Boundary Validation
//!
//! Requests arrive as loosely typed JSON. [`BuildingRequest`] accepts any
//! subset of the fields so that a missing value can be reported by name
//! instead of as a generic parse failure. [`BuildingRequest::validate`]
//! produces [`BuildingParameters`] the estimator can use without further
//! checks.
//!
//! ## Checks (in order)
//!
//! 1. `length`, `width`, `floors`, `buildingType`, `concreteGrade` present
//!    (an empty string counts as missing)
//! 2. `length`, `width`, `floors` positive and finite
//! 3. `floors` a whole number
//! 4. `buildingType` one of Residential / Commercial / Industrial
//! 5. `concreteGrade` one of M15..M40. The estimator would fall back to M25,
//!    but an unknown grade is still rejected here.
//! 6. material prices non-negative and finite
//! 7. labor rates positive and finite (they are divisors)
//!
//! ## Example
//!
//! ```rust
//! use calc_core::validation::BuildingRequest;
//!
//! let request: BuildingRequest = serde_json::from_str(
//!     r#"{"length": 20, "width": 15, "floors": 3,
//!         "buildingType": "Hospital", "concreteGrade": "M25"}"#,
//! ).unwrap();
//!
//! let err = request.validate().unwrap_err();
//! assert!(err.is_validation_error());
//! ```

use serde::{Deserialize, Serialize};

use crate::building::{BuildingParameters, BuildingType, LaborCosts, MaterialPrices};
use crate::errors::{CalcError, CalcResult};
use crate::materials::ConcreteGrade;
use crate::units::UnitSystem;

/// Unvalidated estimate request, as posted by a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingRequest {
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub floors: Option<f64>,
    pub building_type: Option<String>,
    pub concrete_grade: Option<String>,
    pub unit: Option<UnitSystem>,
    pub material_prices: Option<MaterialPrices>,
    pub labor_costs: Option<LaborCosts>,
}

impl BuildingRequest {
    /// Validate and convert into estimator input.
    pub fn validate(self) -> CalcResult<BuildingParameters> {
        let length = required("length", self.length)?;
        let width = required("width", self.width)?;
        let floors = required("floors", self.floors)?;
        let building_type = required_text("buildingType", self.building_type)?;
        let concrete_grade = required_text("concreteGrade", self.concrete_grade)?;

        positive("length", length)?;
        positive("width", width)?;
        positive("floors", floors)?;
        if floors.fract() != 0.0 || floors > u32::MAX as f64 {
            return Err(CalcError::invalid_input(
                "floors",
                floors.to_string(),
                "Floors must be a whole number",
            ));
        }

        let building_type = BuildingType::from_name(&building_type).ok_or_else(|| {
            CalcError::unrecognized_value("buildingType", &building_type, &BuildingType::names())
        })?;
        let concrete_grade = ConcreteGrade::from_code(&concrete_grade).ok_or_else(|| {
            CalcError::unrecognized_value("concreteGrade", &concrete_grade, &ConcreteGrade::codes())
        })?;

        let material_prices = self.material_prices.unwrap_or_default();
        validate_prices(&material_prices)?;

        let labor_costs = self.labor_costs.unwrap_or_default();
        validate_labor(&labor_costs)?;

        Ok(BuildingParameters {
            length,
            width,
            floors: floors as u32,
            building_type,
            concrete_grade,
            unit: self.unit.unwrap_or_default(),
            material_prices,
            labor_costs,
        })
    }
}

impl From<BuildingParameters> for BuildingRequest {
    fn from(params: BuildingParameters) -> Self {
        BuildingRequest {
            length: Some(params.length),
            width: Some(params.width),
            floors: Some(params.floors as f64),
            building_type: Some(params.building_type.name().to_string()),
            concrete_grade: Some(params.concrete_grade.code().to_string()),
            unit: Some(params.unit),
            material_prices: Some(params.material_prices),
            labor_costs: Some(params.labor_costs),
        }
    }
}

fn required(field: &str, value: Option<f64>) -> CalcResult<f64> {
    value.ok_or_else(|| CalcError::missing_field(field))
}

fn required_text(field: &str, value: Option<String>) -> CalcResult<String> {
    match value {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(CalcError::missing_field(field)),
    }
}

fn positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Length, width, and floors must be positive numbers",
        ));
    }
    Ok(())
}

fn validate_prices(prices: &MaterialPrices) -> CalcResult<()> {
    let fields = [
        ("materialPrices.cement", prices.cement),
        ("materialPrices.sand", prices.sand),
        ("materialPrices.aggregate", prices.aggregate),
        ("materialPrices.steel", prices.steel),
        ("materialPrices.water", prices.water),
    ];
    for (field, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(CalcError::invalid_input(
                field,
                value.to_string(),
                "Price cannot be negative",
            ));
        }
    }
    Ok(())
}

fn validate_labor(labor: &LaborCosts) -> CalcResult<()> {
    let fields = [
        ("laborCosts.dailyWage", labor.daily_wage),
        ("laborCosts.productivityRate", labor.productivity_rate),
        ("laborCosts.projectDuration", labor.project_duration),
    ];
    for (field, value) in fields {
        if !value.is_finite() || value <= 0.0 {
            return Err(CalcError::invalid_input(
                field,
                value.to_string(),
                "Labor rates must be positive",
            ));
        }
    }
    Ok(())
}
