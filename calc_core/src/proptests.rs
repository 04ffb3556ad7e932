//! Property tests for the estimator.

use proptest::prelude::*;

use crate::building::{BuildingParameters, BuildingType};
use crate::calculations::framing::{ConcreteVolumes, StructuralGrid};
use crate::calculations::{estimate, MaterialQuantities};
use crate::materials::ConcreteGrade;
use crate::units::UnitSystem;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

fn building_type() -> impl Strategy<Value = BuildingType> {
    prop::sample::select(BuildingType::ALL.to_vec())
}

fn grade() -> impl Strategy<Value = ConcreteGrade> {
    prop::sample::select(ConcreteGrade::ALL.to_vec())
}

proptest! {
    /// Total volume is the sum of the element volumes and is positive
    #[test]
    fn total_volume_is_sum_of_terms(
        length in 0.5f64..500.0,
        width in 0.5f64..500.0,
        floors in 1u32..60,
    ) {
        let grid = StructuralGrid::layout(length, width, floors);
        let v = ConcreteVolumes::compute(length, width, floors, &grid);
        let sum = v.beams + v.columns + v.slabs + v.walls + v.foundation;
        prop_assert!(close(v.total(), sum));
        prop_assert!(v.total() > 0.0);

        let params = BuildingParameters::new(length, width, floors, BuildingType::Residential, ConcreteGrade::M25);
        prop_assert!(close(estimate(&params).quantities.total_concrete_volume, sum));
    }

    /// Quantities are non-negative and linear in volume
    #[test]
    fn quantities_scale_linearly(
        volume in 0.1f64..10_000.0,
        factor in 0.1f64..20.0,
        grade in grade(),
    ) {
        let mix = grade.mix_design();
        let base = MaterialQuantities::from_volume(volume, &mix);
        let scaled = MaterialQuantities::from_volume(volume * factor, &mix);

        for q in [base.cement, base.water, base.sand, base.aggregate, base.steel] {
            prop_assert!(q >= 0.0);
        }
        prop_assert!(close(scaled.cement, base.cement * factor));
        prop_assert!(close(scaled.water, base.water * factor));
        prop_assert!(close(scaled.sand, base.sand * factor));
        prop_assert!(close(scaled.aggregate, base.aggregate * factor));
        prop_assert!(close(scaled.steel, base.steel * factor));
    }

    /// Imperial input equals metric input after conversion
    #[test]
    fn imperial_equals_converted_metric(
        length in 1.0f64..1500.0,
        width in 1.0f64..1500.0,
        floors in 1u32..30,
        building_type in building_type(),
        grade in grade(),
    ) {
        let imperial = BuildingParameters::new(length, width, floors, building_type, grade)
            .with_unit(UnitSystem::Imperial);
        let metric = BuildingParameters::new(length * 0.3048, width * 0.3048, floors, building_type, grade);
        prop_assert_eq!(estimate(&imperial), estimate(&metric));
    }

    /// Unknown grade strings fall back to the M25 mix
    #[test]
    fn unknown_grade_uses_m25(code in "[A-Za-z0-9]{0,6}") {
        prop_assume!(ConcreteGrade::from_code(&code).is_none());
        prop_assert_eq!(
            ConcreteGrade::from_code_or_default(&code).mix_design(),
            ConcreteGrade::M25.mix_design()
        );
    }

    /// Adding a floor increases volume, columns and total cost
    #[test]
    fn more_floors_cost_more(
        length in 1.0f64..200.0,
        width in 1.0f64..200.0,
        floors in 1u32..40,
        building_type in building_type(),
        grade in grade(),
    ) {
        let lower = estimate(&BuildingParameters::new(length, width, floors, building_type, grade));
        let upper = estimate(&BuildingParameters::new(length, width, floors + 1, building_type, grade));

        prop_assert!(upper.quantities.total_concrete_volume > lower.quantities.total_concrete_volume);
        prop_assert!(upper.structural_details.num_columns > lower.structural_details.num_columns);
        prop_assert!(upper.costs.total > lower.costs.total);
    }

    /// Total cost is the sum of its parts
    #[test]
    fn total_cost_is_sum_of_parts(
        length in 0.5f64..500.0,
        width in 0.5f64..500.0,
        floors in 1u32..60,
        building_type in building_type(),
        grade in grade(),
    ) {
        let c = estimate(&BuildingParameters::new(length, width, floors, building_type, grade)).costs;
        let sum = c.cement + c.sand + c.aggregate + c.steel + c.water + c.labor;
        prop_assert!(close(c.total, sum));
        prop_assert!(c.total > 0.0);
    }
}
