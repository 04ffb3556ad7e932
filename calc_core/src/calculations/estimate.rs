//! # Building Material Estimate
//!
//! Turns [`BuildingParameters`] into quantities, costs and labor for a
//! reinforced-concrete building. The computation is a fixed sequence of
//! closed-form expressions: no iteration, no I/O, no failure modes for
//! validated input.
//!
//! ## Steps
//!
//! 1. Normalize length and width to meters (the only unit-dependent step)
//! 2. Lay out the beam/column grid ([`StructuralGrid`])
//! 3. Compute element volumes ([`ConcreteVolumes`])
//! 4. Split the volume into mix ingredients and reinforcement
//! 5. Price materials and labor
//! 6. Attach code references and sustainability suggestions
//!
//! ## Example
//!
//! ```rust
//! use calc_core::building::{BuildingParameters, BuildingType};
//! use calc_core::calculations::estimate;
//! use calc_core::materials::ConcreteGrade;
//!
//! let params = BuildingParameters::new(20.0, 15.0, 3, BuildingType::Residential, ConcreteGrade::M25);
//! let result = estimate(&params);
//!
//! assert_eq!(result.dimensions.building_height, 9.0);
//! assert_eq!(result.structural_details.num_beams, 20);
//! ```

use serde::{Deserialize, Serialize};

use crate::building::{BuildingParameters, BuildingType};
use crate::materials::{reinforcement_mass_kg, MixDesign};

use super::framing::{
    building_height_m, ConcreteVolumes, StructuralGrid, BEAM_DEPTH_M, BEAM_WIDTH_M, GRID_SPACING_M,
};
use super::labor::{estimate_labor, LaborEstimate};
use super::sustainability::sustainability_suggestions;

/// Code cited for structural assumptions
pub const CONCRETE_DESIGN_CODE: &str = "IS 456:2000";

/// Code cited for mix proportions
pub const MIX_DESIGN_CODE: &str = "IS 10262:2019";

// ============================================================================
// Result Types
// ============================================================================

/// Building dimensions after unit normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    /// Length (m)
    pub length: f64,
    /// Width (m)
    pub width: f64,
    /// Number of floors
    pub floors: u32,
    /// Floors x 3 m
    pub building_height: f64,
}

/// Slab system label. Derived from the building type, not from span ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlabType {
    #[serde(rename = "One-way slab")]
    OneWay,
    #[serde(rename = "Two-way slab")]
    TwoWay,
}

impl SlabType {
    /// Commercial and industrial floors get two-way slabs
    pub fn for_building(building_type: BuildingType) -> Self {
        match building_type {
            BuildingType::Commercial | BuildingType::Industrial => SlabType::TwoWay,
            BuildingType::Residential => SlabType::OneWay,
        }
    }

    /// Display label ("One-way slab")
    pub fn label(&self) -> &'static str {
        match self {
            SlabType::OneWay => "One-way slab",
            SlabType::TwoWay => "Two-way slab",
        }
    }
}

impl std::fmt::Display for SlabType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Frame summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralDetails {
    /// Columns over all floors
    pub num_columns: u64,
    /// Beams (per floor-height unit)
    pub num_beams: u64,
    /// Grid spacing (m)
    pub beam_spacing: f64,
    /// One-way or two-way
    pub slab_type: SlabType,
    /// Simplified proxy (kN): strength x beams x beam section x 1000.
    /// Not a capacity check.
    pub load_bearing_capacity: f64,
}

/// Material quantities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialQuantities {
    /// Concrete (m³)
    pub total_concrete_volume: f64,
    /// Cement (t)
    pub cement: f64,
    /// Water (m³)
    pub water: f64,
    /// Sand (t)
    pub sand: f64,
    /// Coarse aggregate (t)
    pub aggregate: f64,
    /// Reinforcing steel (kg)
    pub steel: f64,
}

impl MaterialQuantities {
    /// Split a concrete volume into mix ingredients and reinforcement
    pub fn from_volume(total_concrete_volume: f64, mix: &MixDesign) -> Self {
        MaterialQuantities {
            total_concrete_volume,
            cement: total_concrete_volume * mix.cement / 1000.0,
            water: total_concrete_volume * mix.water / 1000.0,
            sand: total_concrete_volume * mix.fine_aggregate / 1000.0,
            aggregate: total_concrete_volume * mix.coarse_aggregate / 1000.0,
            steel: reinforcement_mass_kg(total_concrete_volume),
        }
    }
}

/// Cost breakdown, in the currency of the input prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub cement: f64,
    pub sand: f64,
    pub aggregate: f64,
    pub steel: f64,
    pub water: f64,
    pub labor: f64,
    /// Sum of the six items above
    pub total: f64,
}

/// Codes the estimate loosely follows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeReferences {
    pub concrete_design: String,
    pub mix_design: String,
}

impl Default for CodeReferences {
    fn default() -> Self {
        CodeReferences {
            concrete_design: CONCRETE_DESIGN_CODE.to_string(),
            mix_design: MIX_DESIGN_CODE.to_string(),
        }
    }
}

/// Complete estimate.
///
/// Deserializable so that clients can post a previous result back for
/// report rendering or email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    pub dimensions: Dimensions,
    pub structural_details: StructuralDetails,
    pub mix_design: MixDesign,
    pub quantities: MaterialQuantities,
    pub costs: CostBreakdown,
    pub labor: LaborEstimate,
    #[serde(rename = "isCodeReferences")]
    pub code_references: CodeReferences,
    pub sustainability_suggestions: Vec<String>,
}

// ============================================================================
// Estimator
// ============================================================================

/// Estimate materials, costs and labor for a building.
///
/// Total over validated input: never fails and never panics when length,
/// width, floors and the labor rates are positive.
pub fn estimate(params: &BuildingParameters) -> EstimationResult {
    let length_m = params.unit.to_meters(params.length).value();
    let width_m = params.unit.to_meters(params.width).value();
    let floors = params.floors;

    let grid = StructuralGrid::layout(length_m, width_m, floors);
    let volumes = ConcreteVolumes::compute(length_m, width_m, floors, &grid);

    let mix_design = params.concrete_grade.mix_design();
    let quantities = MaterialQuantities::from_volume(volumes.total(), &mix_design);

    let load_bearing_capacity =
        mix_design.strength * grid.num_beams as f64 * BEAM_WIDTH_M * BEAM_DEPTH_M * 1000.0;

    let labor = estimate_labor(length_m, width_m, floors, &params.labor_costs);

    let prices = &params.material_prices;
    let cement = quantities.cement * prices.cement;
    let sand = quantities.sand * prices.sand;
    let aggregate = quantities.aggregate * prices.aggregate;
    let steel = quantities.steel * prices.steel;
    let water = quantities.water * prices.water;
    let costs = CostBreakdown {
        cement,
        sand,
        aggregate,
        steel,
        water,
        labor: labor.total_labor_cost,
        total: cement + sand + aggregate + steel + water + labor.total_labor_cost,
    };

    EstimationResult {
        dimensions: Dimensions {
            length: length_m,
            width: width_m,
            floors,
            building_height: building_height_m(floors),
        },
        structural_details: StructuralDetails {
            num_columns: grid.num_columns,
            num_beams: grid.num_beams,
            beam_spacing: GRID_SPACING_M,
            slab_type: SlabType::for_building(params.building_type),
            load_bearing_capacity,
        },
        mix_design,
        quantities,
        costs,
        labor,
        code_references: CodeReferences::default(),
        sustainability_suggestions: sustainability_suggestions(params.building_type),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::{LaborCosts, MaterialPrices};
    use crate::calculations::sustainability::SUPPLEMENTARY_CEMENTITIOUS_TIP;
    use crate::materials::ConcreteGrade;
    use crate::units::UnitSystem;
    use crate::validation::BuildingRequest;
    use pretty_assertions::assert_eq;

    fn reference_building() -> BuildingParameters {
        BuildingParameters::new(20.0, 15.0, 3, BuildingType::Residential, ConcreteGrade::M25)
    }

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-9 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_reference_building_dimensions() {
        let result = estimate(&reference_building());
        assert_eq!(result.dimensions.length, 20.0);
        assert_eq!(result.dimensions.width, 15.0);
        assert_eq!(result.dimensions.floors, 3);
        assert_eq!(result.dimensions.building_height, 9.0);
    }

    #[test]
    fn test_reference_building_structure() {
        let result = estimate(&reference_building());
        let s = result.structural_details;
        assert_eq!(s.num_beams, 20);
        assert_eq!(s.num_columns, 93);
        assert_eq!(s.beam_spacing, 5.0);
        assert_eq!(s.slab_type, SlabType::OneWay);
        // 25 * 20 * 0.25 * 0.4 * 1000
        assert_close(s.load_bearing_capacity, 50_000.0);
    }

    #[test]
    fn test_reference_building_quantities() {
        let q = estimate(&reference_building()).quantities;
        assert_close(q.total_concrete_volume, 581.61);
        assert_close(q.cement, 581.61 * 0.360);
        assert_close(q.water, 581.61 * 0.165);
        assert_close(q.sand, 581.61 * 0.680);
        assert_close(q.aggregate, 581.61 * 1.265);
        assert_close(q.steel, 581.61 * 78.5);
    }

    #[test]
    fn test_reference_building_costs() {
        let result = estimate(&reference_building());
        let q = result.quantities;
        let c = result.costs;
        assert_close(c.cement, q.cement * 6000.0);
        assert_close(c.sand, q.sand * 1800.0);
        assert_close(c.aggregate, q.aggregate * 1600.0);
        assert_close(c.steel, q.steel * 55.0);
        assert_close(c.water, q.water * 50.0);
        assert_eq!(c.labor, 450_000.0);
        assert_close(c.total, c.cement + c.sand + c.aggregate + c.steel + c.water + c.labor);
    }

    #[test]
    fn test_reference_building_suggestions() {
        let result = estimate(&reference_building());
        assert_eq!(result.sustainability_suggestions.len(), 3);
        assert_eq!(result.sustainability_suggestions[2], SUPPLEMENTARY_CEMENTITIOUS_TIP);
        assert!(result.sustainability_suggestions[0].contains("recycled concrete"));
    }

    #[test]
    fn test_commercial_two_way_slab() {
        let mut params = reference_building();
        params.building_type = BuildingType::Commercial;
        let result = estimate(&params);
        assert_eq!(result.structural_details.slab_type, SlabType::TwoWay);
        assert_eq!(result.sustainability_suggestions.len(), 3);
        assert!(result.sustainability_suggestions[0].contains("solar panels"));
        assert!(result.sustainability_suggestions[1].contains("low-VOC"));
    }

    #[test]
    fn test_industrial_two_way_slab() {
        let mut params = reference_building();
        params.building_type = BuildingType::Industrial;
        assert_eq!(estimate(&params).structural_details.slab_type, SlabType::TwoWay);
    }

    #[test]
    fn test_imperial_matches_converted_metric() {
        let imperial = BuildingParameters::new(65.0, 50.0, 2, BuildingType::Commercial, ConcreteGrade::M30)
            .with_unit(UnitSystem::Imperial);
        let metric = BuildingParameters::new(
            65.0 * 0.3048,
            50.0 * 0.3048,
            2,
            BuildingType::Commercial,
            ConcreteGrade::M30,
        );
        assert_eq!(estimate(&imperial), estimate(&metric));
    }

    #[test]
    fn test_grade_selects_mix() {
        let mut params = reference_building();
        params.concrete_grade = ConcreteGrade::M40;
        let result = estimate(&params);
        assert_eq!(result.mix_design, ConcreteGrade::M40.mix_design());
        // 40 * 20 * 0.25 * 0.4 * 1000
        assert_close(result.structural_details.load_bearing_capacity, 80_000.0);
    }

    #[test]
    fn test_unknown_grade_from_json_uses_m25_mix() {
        let json = r#"{
            "length": 20, "width": 15, "floors": 3,
            "buildingType": "Residential", "concreteGrade": "M27"
        }"#;
        let params: BuildingParameters = serde_json::from_str(json).unwrap();
        assert_eq!(estimate(&params).mix_design, estimate(&reference_building()).mix_design);
    }

    #[test]
    fn test_zero_prices_leave_only_labor() {
        let params = reference_building().with_material_prices(MaterialPrices {
            cement: 0.0,
            sand: 0.0,
            aggregate: 0.0,
            steel: 0.0,
            water: 0.0,
        });
        let costs = estimate(&params).costs;
        assert_eq!(costs.cement + costs.sand + costs.aggregate + costs.steel + costs.water, 0.0);
        assert_eq!(costs.total, costs.labor);
    }

    #[test]
    fn test_custom_labor_rates() {
        let params = reference_building().with_labor_costs(LaborCosts {
            daily_wage: 700.0,
            productivity_rate: 5.0,
            project_duration: 60.0,
        });
        let labor = estimate(&params).labor;
        // 900 / 5 = 180 days; 180 / 60 = 3 laborers
        assert_eq!(labor.labor_days_required, 180.0);
        assert_eq!(labor.number_of_laborers, 3);
        assert_eq!(labor.total_labor_cost, 3.0 * 700.0 * 60.0);
    }

    #[test]
    fn test_large_validated_inputs_estimate() {
        let footprint = BuildingRequest {
            length: Some(1e6),
            width: Some(1e6),
            floors: Some(1.0),
            building_type: Some("Industrial".to_string()),
            concrete_grade: Some("M40".to_string()),
            ..BuildingRequest::default()
        };
        let result = estimate(&footprint.validate().unwrap());
        assert_eq!(result.structural_details.num_beams, 200_001 * 200_001);
        assert!(result.costs.total.is_finite());

        let tower = BuildingRequest {
            length: Some(1.0),
            width: Some(1.0),
            floors: Some(2e9),
            building_type: Some("Residential".to_string()),
            concrete_grade: Some("M25".to_string()),
            ..BuildingRequest::default()
        };
        let result = estimate(&tower.validate().unwrap());
        assert_eq!(result.dimensions.floors, 2_000_000_000);
        assert_eq!(result.structural_details.num_columns, 8_000_000_000);
        // 2e9 m² at 1 m²/day over 180 days
        assert_eq!(result.labor.number_of_laborers, 11_111_112);
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(estimate(&reference_building())).unwrap();
        assert_eq!(json["dimensions"]["buildingHeight"], 9.0);
        assert_eq!(json["structuralDetails"]["slabType"], "One-way slab");
        assert_eq!(json["structuralDetails"]["numColumns"], 93);
        assert_eq!(json["isCodeReferences"]["concreteDesign"], "IS 456:2000");
        assert_eq!(json["isCodeReferences"]["mixDesign"], "IS 10262:2019");
        assert_eq!(json["mixDesign"]["waterCementRatio"], 0.46);
        assert!(json["quantities"].get("totalConcreteVolume").is_some());
        assert!(json["labor"].get("numberOfLaborers").is_some());
        assert_eq!(json["sustainabilitySuggestions"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_result_can_be_posted_back() {
        let result = estimate(&reference_building());
        let json = serde_json::to_string(&result).unwrap();
        let parsed: EstimationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.structural_details.slab_type, SlabType::OneWay);
        assert_eq!(parsed.code_references, CodeReferences::default());
        assert_eq!(parsed.sustainability_suggestions, result.sustainability_suggestions);
        assert_close(parsed.costs.total, result.costs.total);
    }
}
