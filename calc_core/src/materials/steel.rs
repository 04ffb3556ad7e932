//! Reinforcing Steel
//!
//! Reinforcement is estimated as a fixed fraction of the concrete volume.
//! This is a rule of thumb loosely following IS 456:2000, not a bar
//! schedule.

/// Density of reinforcing steel (kg/m³)
pub const STEEL_DENSITY_KG_PER_M3: f64 = 7850.0;

/// Reinforcement volume as a fraction of concrete volume (1%)
pub const REINFORCEMENT_RATIO: f64 = 0.01;

/// Mass of reinforcing steel (kg) for a given concrete volume (m³).
pub fn reinforcement_mass_kg(concrete_volume_m3: f64) -> f64 {
    concrete_volume_m3 * REINFORCEMENT_RATIO * STEEL_DENSITY_KG_PER_M3
}
