//! # Unit Types
//!
//! Lightweight wrappers for the lengths a user can enter. Dimensions arrive
//! either in meters or in feet; the estimator converts them once, at the top
//! of the computation, and every formula after that works in SI units
//! (meters, cubic meters, kilograms, tonnes).
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{Feet, Meters, UnitSystem};
//!
//! let length: Meters = Feet(100.0).into();
//! assert!((length.0 - 30.48).abs() < 1e-9);
//!
//! assert_eq!(UnitSystem::Metric.to_meters(12.0), Meters(12.0));
//! ```

use serde::{Deserialize, Serialize};

/// Meters per international foot
pub const METERS_PER_FOOT: f64 = 0.3048;

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

impl From<Feet> for Meters {
    fn from(ft: Feet) -> Self {
        Meters(ft.0 * METERS_PER_FOOT)
    }
}

impl Meters {
    /// Raw value in meters
    pub fn value(self) -> f64 {
        self.0
    }
}

// ============================================================================
// Unit System
// ============================================================================

/// Unit system the user entered length and width in.
///
/// Serializes as `"metric"` / `"imperial"`. Only length and width are
/// affected; prices and labor rates are always per SI unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Meters
    #[default]
    Metric,
    /// Feet
    Imperial,
}

impl UnitSystem {
    /// Convert a length entered in this unit system to meters
    pub fn to_meters(self, value: f64) -> Meters {
        match self {
            UnitSystem::Metric => Meters(value),
            UnitSystem::Imperial => Feet(value).into(),
        }
    }

    /// Short length symbol ("m" or "ft")
    pub fn length_symbol(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "m",
            UnitSystem::Imperial => "ft",
        }
    }

    /// Parse from user input ("m", "metric", "ft", "imperial", ...)
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "m" | "meters" | "si" => Some(UnitSystem::Metric),
            "imperial" | "ft" | "feet" | "us" => Some(UnitSystem::Imperial),
            _ => None,
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitSystem::Metric => write!(f, "metric"),
            UnitSystem::Imperial => write!(f, "imperial"),
        }
    }
}
