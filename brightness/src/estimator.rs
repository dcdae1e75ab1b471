//! Apparent brightness of a satellite for a given viewing geometry and power
//! budget.
//!
//! The estimate sums up to two reflected-light contributions at the observer:
//!
//! 1. **Direct**: sunlight scattered by each satellite surface that faces both
//!    the Sun and the observer, skipped while the satellite is in the Earth's
//!    shadow.
//! 2. **Earthshine**: sunlight scattered first by the Earth, then by the
//!    satellite (see [`crate::earthshine`]).
//!
//! Both fall off with the square of the observer-satellite distance. The total
//! irradiance is converted to an AB magnitude with
//! [`intensity_to_ab_mag`].
//!
//! Inputs are validated before any physics runs:
//! - height: finite and positive
//! - satellite altitude: within `[0°, 90°]`
//! - Sun altitude: within `[-90°, 90°]`
//! - azimuths: finite (any value, wrapped modulo 360°)
//! - power: finite and positive
//! - Earth panel density: at least 1, with `density²` representable

use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use shared::units::{AngleExt, Area, AreaExt, Length, LengthExt, PowerExt};
use thiserror::Error;

use crate::brdf::{Phong, ReflectanceModel};
use crate::conversions::{intensity_to_ab_mag, SUN_INTENSITY};
use crate::earthshine::{earthshine_intensity, DEFAULT_EARTH_PANEL_DENSITY};
use crate::geometry::{HorizontalCoordinates, Scene, ViewingGeometry};
use crate::model_config::SatelliteModelConfig;
use crate::satellite::{OrientedSurface, PowerBudget, PowerMode};

/// Errors returned by brightness estimation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BrightnessError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("invalid power budget: {0}")]
    InvalidPower(String),

    #[error("invalid reflection options: {0}")]
    InvalidOptions(String),

    #[error("numerical instability: {0}")]
    NumericalInstability(String),
}

pub type Result<T> = std::result::Result<T, BrightnessError>;

/// Which light paths to include and how to evaluate Earthshine.
#[derive(Debug, Clone)]
pub struct ReflectionOptions {
    /// Include sunlight reflected directly off the satellite
    pub include_sun: bool,
    /// Include sunlight reflected off the Earth and then the satellite
    pub include_earthshine: bool,
    /// Grid cells along each axis of the Earth grid
    pub earth_panel_density: usize,
    /// Reflectance of the Earth's surface
    pub earth_brdf: Arc<dyn ReflectanceModel>,
}

impl Default for ReflectionOptions {
    fn default() -> Self {
        Self {
            include_sun: true,
            include_earthshine: false,
            earth_panel_density: DEFAULT_EARTH_PANEL_DENSITY,
            earth_brdf: Arc::new(Phong::earth()),
        }
    }
}

impl ReflectionOptions {
    pub fn with_sun(mut self, include: bool) -> Self {
        self.include_sun = include;
        self
    }

    pub fn with_earthshine(mut self, include: bool) -> Self {
        self.include_earthshine = include;
        self
    }

    pub fn with_earth_panel_density(mut self, density: usize) -> Self {
        self.earth_panel_density = density;
        self
    }

    pub fn with_earth_brdf(mut self, brdf: Arc<dyn ReflectanceModel>) -> Self {
        self.earth_brdf = brdf;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.earth_panel_density == 0 {
            return Err(BrightnessError::InvalidOptions(
                "earth panel density must be at least 1".to_string(),
            ));
        }
        if self.earth_panel_density.checked_mul(self.earth_panel_density).is_none() {
            return Err(BrightnessError::InvalidOptions(format!(
                "earth panel density {} overflows the grid size",
                self.earth_panel_density
            )));
        }
        Ok(())
    }
}

/// Outcome of one brightness estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrightnessResult {
    /// Irradiance at the observer (W/m²)
    pub intensity: f64,
    /// AB magnitude; lower is brighter
    pub ab_magnitude: f64,
    /// Solar array area used (serialized in m²)
    pub area: Area,
    pub power_type: PowerMode,
}

/// Brightness calculator for one satellite design.
#[derive(Debug, Clone, Default)]
pub struct BrightnessEstimator {
    options: ReflectionOptions,
    model: SatelliteModelConfig,
}

impl BrightnessEstimator {
    pub fn new(options: ReflectionOptions) -> Self {
        Self {
            options,
            model: SatelliteModelConfig::default(),
        }
    }

    /// Replace the reference bus with a custom surface model.
    pub fn with_model(mut self, model: SatelliteModelConfig) -> Self {
        self.model = model;
        self
    }

    pub fn options(&self) -> &ReflectionOptions {
        &self.options
    }

    pub fn model(&self) -> &SatelliteModelConfig {
        &self.model
    }

    /// Estimate the brightness of the satellite for one observation.
    pub fn estimate(&self, geometry: &ViewingGeometry, budget: PowerBudget) -> Result<BrightnessResult> {
        validate_geometry(geometry)?;
        validate_budget(&budget)?;
        self.options.validate()?;

        let scene = geometry.scene();
        if !scene.slant_range.is_finite() || scene.slant_range <= 0.0 {
            return Err(BrightnessError::NumericalInstability(format!(
                "degenerate slant range {} m",
                scene.slant_range
            )));
        }

        let area = budget.panel_area();
        let satellite = self.model.build(area);
        let surfaces = satellite.oriented(&scene.body);

        let mut intensity = 0.0;
        if self.options.include_sun {
            if scene.satellite_sunlit() {
                intensity += direct_intensity(&scene, &surfaces);
            } else {
                log::debug!("satellite is in the Earth's shadow; no direct reflection");
            }
        }
        if self.options.include_earthshine {
            intensity += earthshine_intensity(
                &scene,
                &surfaces,
                self.options.earth_panel_density,
                self.options.earth_brdf.as_ref(),
            );
        }

        if !intensity.is_finite() || intensity < 0.0 {
            return Err(BrightnessError::NumericalInstability(format!(
                "intensity evaluated to {intensity}"
            )));
        }

        let ab_magnitude = intensity_to_ab_mag(intensity);
        log::debug!(
            "range {:.1} km, area {:.2} m^2 ({}): intensity {:.3e} W/m^2, magnitude {:.2}",
            scene.slant_range / 1e3,
            area.as_square_meters(),
            budget.mode,
            intensity,
            ab_magnitude
        );

        Ok(BrightnessResult {
            intensity,
            ab_magnitude,
            area,
            power_type: budget.mode,
        })
    }

    /// Estimate brightness along a set of satellite positions sharing one
    /// height and Sun position, e.g. a pass across the sky.
    ///
    /// Positions are evaluated in parallel; results keep the input order. The
    /// first invalid position aborts the whole track.
    pub fn estimate_track(
        &self,
        height: Length,
        positions: &[HorizontalCoordinates],
        sun: HorizontalCoordinates,
        budget: PowerBudget,
    ) -> Result<Vec<BrightnessResult>> {
        positions
            .par_iter()
            .map(|position| self.estimate(&ViewingGeometry::new(height, *position, sun), budget))
            .collect()
    }
}

/// Irradiance at the observer (W/m²) from sunlight reflected directly by
/// `surfaces`. Assumes the satellite is sunlit.
pub fn direct_intensity(scene: &Scene, surfaces: &[OrientedSurface<'_>]) -> f64 {
    let to_observer = scene.to_observer();
    let scattered: f64 = surfaces
        .iter()
        .map(|surface| surface.scattering(&scene.to_sun, &to_observer))
        .sum();
    SUN_INTENSITY * scattered / (scene.slant_range * scene.slant_range)
}

/// One-call brightness estimate with plain numeric inputs.
///
/// Heights are meters, angles degrees, power kilowatts. `earth_brdf` of
/// `None` selects [`Phong::earth`].
#[allow(clippy::too_many_arguments)]
pub fn calculate_brightness(
    sat_height_m: f64,
    sat_altitude_deg: f64,
    sat_azimuth_deg: f64,
    sun_altitude_deg: f64,
    sun_azimuth_deg: f64,
    power_kw: f64,
    continuous: bool,
    include_sun: bool,
    include_earthshine: bool,
    earth_panel_density: usize,
    earth_brdf: Option<Arc<dyn ReflectanceModel>>,
) -> Result<BrightnessResult> {
    let mut options = ReflectionOptions::default()
        .with_sun(include_sun)
        .with_earthshine(include_earthshine)
        .with_earth_panel_density(earth_panel_density);
    if let Some(brdf) = earth_brdf {
        options = options.with_earth_brdf(brdf);
    }

    let geometry = ViewingGeometry::new(
        Length::from_meters(sat_height_m),
        HorizontalCoordinates::from_degrees(sat_altitude_deg, sat_azimuth_deg),
        HorizontalCoordinates::from_degrees(sun_altitude_deg, sun_azimuth_deg),
    );
    let budget = PowerBudget::from_kilowatts(power_kw, continuous);

    BrightnessEstimator::new(options).estimate(&geometry, budget)
}

fn validate_geometry(geometry: &ViewingGeometry) -> Result<()> {
    let height_m = geometry.height.as_meters();
    if !(height_m.is_finite() && height_m > 0.0) {
        return Err(BrightnessError::InvalidGeometry(format!(
            "satellite height must be positive, got {height_m} m"
        )));
    }
    check_direction("satellite", &geometry.satellite, 0.0)?;
    check_direction("sun", &geometry.sun, -90.0)
}

fn check_direction(name: &str, direction: &HorizontalCoordinates, min_altitude_deg: f64) -> Result<()> {
    let altitude = direction.altitude().as_degrees();
    let azimuth = direction.azimuth().as_degrees();
    if !azimuth.is_finite() {
        return Err(BrightnessError::InvalidGeometry(format!(
            "{name} azimuth must be finite, got {azimuth}"
        )));
    }
    if !(min_altitude_deg..=90.0).contains(&altitude) {
        return Err(BrightnessError::InvalidGeometry(format!(
            "{name} altitude must be within [{min_altitude_deg}, 90] degrees, got {altitude}"
        )));
    }
    Ok(())
}

fn validate_budget(budget: &PowerBudget) -> Result<()> {
    let kw = budget.power.as_kilowatts();
    if !(kw.is_finite() && kw > 0.0) {
        return Err(BrightnessError::InvalidPower(format!(
            "power requirement must be positive, got {kw} kW"
        )));
    }
    Ok(())
}
