//! # calc_core - Building Material Estimation Engine
//!
//! `calc_core` estimates concrete volumes, material quantities, costs and
//! labor for a reinforced-concrete building from its footprint, floor count,
//! occupancy type and concrete grade. All inputs and outputs are
//! JSON-serializable with camelCase field names.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: the estimator is a pure function
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Validate at the boundary**: loosely typed requests become typed
//!   parameters once, in [`validation`]
//! - **Rich Errors**: structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::validation::BuildingRequest;
//! use calc_core::calculations::estimate;
//!
//! let request: BuildingRequest = serde_json::from_str(
//!     r#"{"length": 20, "width": 15, "floors": 3,
//!         "buildingType": "Residential", "concreteGrade": "M25"}"#,
//! ).unwrap();
//!
//! let params = request.validate().unwrap();
//! let result = estimate(&params);
//! assert_eq!(result.structural_details.num_columns, 93);
//! ```
//!
//! ## Modules
//!
//! - [`building`] - estimator input: dimensions, type, prices, labor rates
//! - [`validation`] - request validation
//! - [`calculations`] - the estimator and its result types
//! - [`materials`] - concrete grades, mix designs, reinforcement
//! - [`equations`] - formula registry for report appendices
//! - [`report`] - presentation model shared by PDF, email and terminal
//! - [`pdf`] - Typst PDF rendering
//! - [`units`] - unit systems and length wrappers
//! - [`errors`] - structured error types

pub mod building;
pub mod calculations;
pub mod equations;
pub mod errors;
pub mod materials;
pub mod pdf;
pub mod report;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use building::{BuildingParameters, BuildingType, LaborCosts, MaterialPrices};
pub use calculations::{estimate, EstimationResult};
pub use errors::{CalcError, CalcResult};
pub use materials::{ConcreteGrade, MixDesign};
pub use report::Report;
pub use units::UnitSystem;
pub use validation::BuildingRequest;

#[cfg(test)]
mod proptests;
