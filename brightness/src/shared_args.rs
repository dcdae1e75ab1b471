use std::sync::Arc;

use clap::Parser;
use shared::units::{Length, LengthExt};

use crate::brdf::{Lambertian, Phong, ReflectanceModel};
use crate::earthshine::DEFAULT_EARTH_PANEL_DENSITY;
use crate::estimator::ReflectionOptions;
use crate::geometry::{HorizontalCoordinates, ViewingGeometry};
use crate::satellite::PowerBudget;

/// Parse an Earth reflectance override: "phong:kd,ks,n" or "lambert:albedo"
fn parse_earth_brdf(s: &str) -> Result<EarthBrdfArg, String> {
    let (kind, params) = s
        .split_once(':')
        .ok_or_else(|| "Earth BRDF must be 'phong:kd,ks,n' or 'lambert:albedo'".to_string())?;

    let values = params
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| format!("Invalid BRDF coefficient '{}'", v.trim()))
        })
        .collect::<Result<Vec<f64>, String>>()?;
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err("BRDF coefficients must be finite and non-negative".to_string());
    }

    match (kind.trim().to_lowercase().as_str(), values.as_slice()) {
        ("phong", [kd, ks, n]) => Ok(EarthBrdfArg::Phong(Phong::new(*kd, *ks, *n))),
        ("lambert", [albedo]) => Ok(EarthBrdfArg::Lambert(Lambertian::new(*albedo))),
        ("phong", _) => Err("Phong BRDF needs three coefficients: kd,ks,n".to_string()),
        ("lambert", _) => Err("Lambertian BRDF needs one coefficient: albedo".to_string()),
        (other, _) => Err(format!("Unknown BRDF kind '{other}'")),
    }
}

/// Earth surface reflectance selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EarthBrdfArg {
    Phong(Phong),
    Lambert(Lambertian),
}

impl EarthBrdfArg {
    pub fn to_model(self) -> Arc<dyn ReflectanceModel> {
        match self {
            EarthBrdfArg::Phong(model) => Arc::new(model),
            EarthBrdfArg::Lambert(model) => Arc::new(model),
        }
    }
}

/// Observation, power and reflection arguments shared by brightness tools
#[derive(Parser, Debug, Clone)]
pub struct SharedBrightnessArgs {
    /// Satellite height above the Earth's surface in kilometers
    #[arg(long, default_value_t = 550.0)]
    pub height_km: f64,

    /// Satellite altitude above the horizon in degrees (0 to 90)
    #[arg(long, default_value_t = 45.0, allow_negative_numbers = true)]
    pub sat_alt: f64,

    /// Satellite azimuth in degrees (0 north, 90 east)
    #[arg(long, default_value_t = 270.0, allow_negative_numbers = true)]
    pub sat_az: f64,

    /// Sun altitude in degrees, negative below the horizon
    #[arg(long, default_value_t = -15.0, allow_negative_numbers = true)]
    pub sun_alt: f64,

    /// Sun azimuth in degrees
    #[arg(long, default_value_t = 270.0, allow_negative_numbers = true)]
    pub sun_az: f64,

    /// Electrical power requirement in kilowatts
    #[arg(long, default_value_t = 100.0)]
    pub power_kw: f64,

    /// Size the solar array for continuous power (doubles the area)
    #[arg(long, default_value_t = false)]
    pub continuous: bool,

    /// Exclude sunlight reflected directly off the satellite
    #[arg(long, default_value_t = false)]
    pub no_sun: bool,

    /// Include sunlight reflected off the Earth onto the satellite
    #[arg(long, default_value_t = false)]
    pub earthshine: bool,

    /// Earth grid cells per axis for earthshine
    #[arg(long, default_value_t = DEFAULT_EARTH_PANEL_DENSITY)]
    pub earth_panel_density: usize,

    /// Earth reflectance override (format: "phong:kd,ks,n" or "lambert:albedo")
    #[arg(long, value_parser = parse_earth_brdf)]
    pub earth_brdf: Option<EarthBrdfArg>,
}

impl SharedBrightnessArgs {
    pub fn height(&self) -> Length {
        Length::from_kilometers(self.height_km)
    }

    pub fn sun(&self) -> HorizontalCoordinates {
        HorizontalCoordinates::from_degrees(self.sun_alt, self.sun_az)
    }

    /// Viewing geometry with the satellite at `sat_alt` degrees.
    pub fn geometry_at(&self, sat_alt: f64) -> ViewingGeometry {
        ViewingGeometry::new(
            self.height(),
            HorizontalCoordinates::from_degrees(sat_alt, self.sat_az),
            self.sun(),
        )
    }

    pub fn geometry(&self) -> ViewingGeometry {
        self.geometry_at(self.sat_alt)
    }

    pub fn budget(&self) -> PowerBudget {
        PowerBudget::from_kilowatts(self.power_kw, self.continuous)
    }

    pub fn reflection_options(&self) -> ReflectionOptions {
        let options = ReflectionOptions::default()
            .with_sun(!self.no_sun)
            .with_earthshine(self.earthshine)
            .with_earth_panel_density(self.earth_panel_density);
        match self.earth_brdf {
            Some(brdf) => options.with_earth_brdf(brdf.to_model()),
            None => options,
        }
    }
}
