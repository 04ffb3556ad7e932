//! # Estimating Formulas
//!
//! Metadata for every formula used by the estimator, kept in one place so
//! reports can cite the code clause or state the assumption behind each
//! number.
//!
//! ## Modules
//!
//! - [`registry`] - formula metadata and the "Formulas Used" appendix
//!
//! ## References
//!
//! - IS 456:2000: Plain and Reinforced Concrete, Code of Practice
//! - IS 10262:2019: Concrete Mix Proportioning, Guidelines

pub mod registry;

pub use registry::{
    generate_appendix_typst, CodeReference, Formula, FormulaCategory, FormulaMetadata, Variable,
    ALL_FORMULAS,
};
