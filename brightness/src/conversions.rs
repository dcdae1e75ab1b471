//! Radiometric constants and intensity to magnitude conversion.
//!
//! Intensities throughout this crate are irradiances at the observer in
//! W/m². The magnitude scale is anchored on the Sun: an irradiance equal to
//! the solar constant corresponds to the Sun's apparent AB magnitude, and
//! every factor of 100 fainter adds 5 magnitudes.

/// Mean solar irradiance at 1 AU (W/m²)
pub const SUN_INTENSITY: f64 = 1361.0;

/// Apparent AB magnitude of the Sun as seen from Earth
pub const SUN_AB_MAGNITUDE: f64 = -26.74;

/// Mean Earth radius (m)
pub const EARTH_RADIUS: f64 = 6.371e6;

/// Faintest magnitude reported; anything dimmer is treated as invisible.
pub const MAGNITUDE_CEILING: f64 = 12.5;

/// Irradiance (W/m²) corresponding to AB magnitude zero.
pub fn ab_zero_point_intensity() -> f64 {
    SUN_INTENSITY * 10f64.powf(SUN_AB_MAGNITUDE / 2.5)
}

/// Convert an irradiance at the observer into an AB magnitude.
///
/// Uses `m = -2.5 log10(I / I0)` with `I0` from [`ab_zero_point_intensity`].
/// Zero or negative intensities, and any intensity fainter than
/// [`MAGNITUDE_CEILING`], return the ceiling. Non-finite input is passed
/// through so callers can detect it.
pub fn intensity_to_ab_mag(intensity: f64) -> f64 {
    if intensity.is_nan() {
        return f64::NAN;
    }
    if intensity <= 0.0 {
        return MAGNITUDE_CEILING;
    }
    let magnitude = -2.5 * (intensity / ab_zero_point_intensity()).log10();
    magnitude.min(MAGNITUDE_CEILING)
}

/// Convert an AB magnitude back to irradiance at the observer (W/m²).
pub fn ab_mag_to_intensity(magnitude: f64) -> f64 {
    ab_zero_point_intensity() * 10f64.powf(-magnitude / 2.5)
}
