//! # Materials Database
//!
//! Constant material data used by the estimator.
//!
//! - **Concrete**: grade designations and their mix designs (IS 10262:2019)
//! - **Steel**: reinforcement ratio and density (IS 456:2000, simplified)
//!
//! ## Example
//!
//! ```rust
//! use calc_core::materials::ConcreteGrade;
//!
//! let mix = ConcreteGrade::M25.mix_design();
//! println!("{} kg cement per m³, w/c = {}", mix.cement, mix.water_cement_ratio);
//!
//! // Unknown codes fall back to M25
//! assert_eq!(ConcreteGrade::from_code_or_default("M99"), ConcreteGrade::M25);
//! ```

pub mod concrete;
pub mod steel;

pub use concrete::{deserialize_grade_or_default, ConcreteGrade, MixDesign};
pub use steel::{reinforcement_mass_kg, REINFORCEMENT_RATIO, STEEL_DENSITY_KG_PER_M3};
