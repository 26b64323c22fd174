//! Physical constants and numeric defaults.
//!
//! The constants are fixed for the lifetime of the process and are not
//! configurable. Defaults for the radius sweep match the ground-station
//! analyzer the estimators were calibrated against.

/// Physical constants used by the estimators.
pub mod constants {
    /// Newtonian gravitational constant, m³·kg⁻¹·s⁻².
    pub const GRAVITATIONAL_CONSTANT: f64 = 6.674e-11;

    /// Ideal gas constant, J·mol⁻¹·K⁻¹.
    pub const GAS_CONSTANT: f64 = 8.3144598;

    /// Default distance between two consecutive candidate radii, in metres.
    pub const DEFAULT_RADIUS_STEP: f64 = 3333.0;

    /// Default exclusive upper bound of the radius sweep, in metres.
    pub const DEFAULT_MAX_RADIUS: f64 = 1e8;

    /// Number of trailing pressure readings used for the ground reference.
    pub const GROUND_PRESSURE_WINDOW: usize = 6;
}

/// Squares a value.
#[inline]
pub fn square(value: f64) -> f64 {
    value * value
}

/// Gravitational acceleration at `altitude` above a body of `radius` and `mass`.
///
/// This is Newton's law `g = G·M/(r + h)²`.
#[inline]
pub fn surface_gravity(radius: f64, mass: f64, altitude: f64) -> f64 {
    constants::GRAVITATIONAL_CONSTANT * mass / square(radius + altitude)
}
