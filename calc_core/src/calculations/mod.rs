//! # Estimation Calculations
//!
//! The estimator follows the same pattern as any calculation in this crate:
//!
//! - input: [`crate::building::BuildingParameters`] (JSON-serializable)
//! - output: [`EstimationResult`] (JSON-serializable)
//! - [`estimate`] - pure function from one to the other
//!
//! ## Modules
//!
//! - [`framing`] - beam/column grid and concrete volumes
//! - [`labor`] - crew size and labor cost
//! - [`sustainability`] - building-type specific suggestions
//! - [`estimate`](mod@estimate) - the full estimate and its result types

pub mod estimate;
pub mod framing;
pub mod labor;
pub mod sustainability;

// Re-export commonly used types
pub use estimate::{
    estimate, CodeReferences, CostBreakdown, Dimensions, EstimationResult, MaterialQuantities,
    SlabType, StructuralDetails,
};
pub use framing::{ConcreteVolumes, StructuralGrid};
pub use labor::LaborEstimate;
