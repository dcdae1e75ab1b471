//! Apparent brightness of solar-powered satellites as seen by a ground
//! observer.
//!
//! Given an orbital height, the satellite and Sun directions in the
//! observer's horizontal coordinates and an electrical power budget, the
//! [`BrightnessEstimator`] sizes the solar array, scatters sunlight (and
//! optionally Earthshine) off the satellite surfaces and reports the
//! irradiance at the observer together with its AB magnitude.
//!
//! ```no_run
//! use brightness::calculate_brightness;
//!
//! let result = calculate_brightness(
//!     550e3, 45.0, 270.0, -15.0, 270.0, 100.0, false, true, false, 151, None,
//! )?;
//! println!("{:.2} mag from {:.2} m^2", result.ab_magnitude, result.area.value);
//! # Ok::<(), brightness::BrightnessError>(())
//! ```

pub mod brdf;
pub mod conversions;
pub mod earthshine;
pub mod estimator;
pub mod geometry;
pub mod model_config;
pub mod satellite;
pub mod shared_args;

pub use brdf::{Lambertian, Phong, ReflectanceModel};
pub use conversions::{ab_mag_to_intensity, intensity_to_ab_mag, MAGNITUDE_CEILING};
pub use estimator::{
    calculate_brightness, BrightnessError, BrightnessEstimator, BrightnessResult,
    ReflectionOptions,
};
pub use geometry::{HorizontalCoordinates, ViewingGeometry};
pub use model_config::SatelliteModelConfig;
pub use satellite::{power_to_area, PowerBudget, PowerMode, SatelliteModel, Surface};
