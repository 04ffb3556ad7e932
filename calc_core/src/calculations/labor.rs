//! # Labor Estimate
//!
//! Crew size from total floor area, productivity and the planned duration.
//! The crew is rounded up to whole laborers and paid for the full duration,
//! so the labor cost steps rather than scaling smoothly with area.

use serde::{Deserialize, Serialize};

use crate::building::LaborCosts;

/// Labor requirements.
///
/// ## JSON Example
///
/// ```json
/// {
///   "numberOfLaborers": 5,
///   "laborDaysRequired": 900.0,
///   "totalLaborCost": 450000.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborEstimate {
    /// Crew size needed to finish within the project duration
    pub number_of_laborers: u64,
    /// Laborer-days of work (total area / productivity)
    pub labor_days_required: f64,
    /// Crew size x daily wage x project duration
    pub total_labor_cost: f64,
}

/// Estimate labor for a footprint in meters.
///
/// `rates.productivity_rate` and `rates.project_duration` must be positive;
/// the boundary validator guarantees that. The crew size saturates at
/// `u64::MAX`.
pub fn estimate_labor(length_m: f64, width_m: f64, floors: u32, rates: &LaborCosts) -> LaborEstimate {
    let total_area = length_m * width_m * floors as f64;
    let labor_days_required = total_area / rates.productivity_rate;
    let number_of_laborers = (labor_days_required / rates.project_duration).ceil() as u64;
    let total_labor_cost = number_of_laborers as f64 * rates.daily_wage * rates.project_duration;

    LaborEstimate {
        number_of_laborers,
        labor_days_required,
        total_labor_cost,
    }
}
