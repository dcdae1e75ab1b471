//! Satellite surface model and solar array sizing.
//!
//! A satellite is a set of flat, one-sided reflecting [`Surface`]s whose
//! normals are fixed in the body frame (see [`crate::geometry`]). The default
//! model is a small nadir-facing bus plus a solar array whose area follows from
//! the electrical power budget.

use std::fmt;
use std::sync::Arc;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use shared::units::{Area, AreaExt, Power, PowerExt};

use crate::brdf::{Phong, ReflectanceModel};
use crate::geometry::BodyFrame;

/// Area of one reference solar panel (m²)
pub const BASE_PANEL_AREA_M2: f64 = 104.96;

/// Power delivered by one reference solar panel (kW)
pub const BASE_PANEL_POWER_KW: f64 = 25.0;

/// Area of the nadir-facing bus underside (m²)
pub const CHASSIS_AREA_M2: f64 = 3.9;

/// Body-frame normal of the nadir-facing bus panel
pub const CHASSIS_NORMAL: [f64; 3] = [0.0, 0.0, -1.0];

/// Body-frame normal of the solar array (faces the Sun's azimuth)
pub const SOLAR_ARRAY_NORMAL: [f64; 3] = [0.0, 1.0, 0.0];

/// How the solar array is sized relative to the power requirement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerMode {
    /// Array sized for the requirement while illuminated
    #[default]
    Instantaneous,
    /// Array sized to also cover eclipse periods (double area)
    Continuous,
}

impl PowerMode {
    pub fn from_continuous(continuous: bool) -> Self {
        if continuous {
            PowerMode::Continuous
        } else {
            PowerMode::Instantaneous
        }
    }

    /// Panel area multiplier for this mode.
    pub fn area_factor(&self) -> f64 {
        match self {
            PowerMode::Instantaneous => 1.0,
            PowerMode::Continuous => 2.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PowerMode::Instantaneous => "instantaneous",
            PowerMode::Continuous => "continuous",
        }
    }
}

impl fmt::Display for PowerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Electrical power requirement together with its sizing mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerBudget {
    pub power: Power,
    pub mode: PowerMode,
}

impl PowerBudget {
    pub fn new(power: Power, mode: PowerMode) -> Self {
        Self { power, mode }
    }

    pub fn from_kilowatts(kw: f64, continuous: bool) -> Self {
        Self::new(Power::from_kilowatts(kw), PowerMode::from_continuous(continuous))
    }

    /// Solar array area needed for this budget.
    pub fn panel_area(&self) -> Area {
        power_to_area(self.power, self.mode)
    }
}

/// Solar array area needed to deliver `power` in the given `mode`.
///
/// One reference panel of [`BASE_PANEL_AREA_M2`] delivers
/// [`BASE_PANEL_POWER_KW`]; continuous operation doubles the area.
pub fn power_to_area(power: Power, mode: PowerMode) -> Area {
    let panels = power.as_kilowatts() / BASE_PANEL_POWER_KW;
    Area::from_square_meters(panels * BASE_PANEL_AREA_M2 * mode.area_factor())
}

/// A flat, one-sided reflecting surface on the satellite.
#[derive(Debug, Clone)]
pub struct Surface {
    pub area: Area,
    /// Unit normal in the body frame
    pub normal: Vector3<f64>,
    pub brdf: Arc<dyn ReflectanceModel>,
}

impl Surface {
    pub fn new(area: Area, normal: Vector3<f64>, brdf: Arc<dyn ReflectanceModel>) -> Self {
        Self {
            area,
            normal: normal.normalize(),
            brdf,
        }
    }

    /// The reference bus underside.
    pub fn chassis() -> Self {
        Self::new(
            Area::from_square_meters(CHASSIS_AREA_M2),
            Vector3::from(CHASSIS_NORMAL),
            Arc::new(Phong::chassis()),
        )
    }

    /// A solar array of the given area using the reference cell BRDF.
    pub fn solar_array(area: Area) -> Self {
        Self::new(
            area,
            Vector3::from(SOLAR_ARRAY_NORMAL),
            Arc::new(Phong::solar_array()),
        )
    }
}

/// A surface with its normal rotated into the observer frame.
#[derive(Debug, Clone, Copy)]
pub struct OrientedSurface<'a> {
    pub surface: &'a Surface,
    pub normal: Vector3<f64>,
}

impl OrientedSurface<'_> {
    /// Effective scattering cross-section `A·f·cosθi·cosθo` (m² sr⁻¹) for
    /// light arriving from `incoming` and leaving toward `outgoing`.
    ///
    /// Zero when either direction is behind the surface.
    pub fn scattering(&self, incoming: &Vector3<f64>, outgoing: &Vector3<f64>) -> f64 {
        let cos_in = self.normal.dot(incoming);
        let cos_out = self.normal.dot(outgoing);
        if cos_in <= 0.0 || cos_out <= 0.0 {
            return 0.0;
        }
        let brdf = self.surface.brdf.reflectance(incoming, outgoing, &self.normal);
        self.surface.area.as_square_meters() * brdf * cos_in * cos_out
    }
}

/// Collection of reflecting surfaces making up one satellite.
#[derive(Debug, Clone, Default)]
pub struct SatelliteModel {
    surfaces: Vec<Surface>,
}

impl SatelliteModel {
    pub fn new(surfaces: Vec<Surface>) -> Self {
        Self { surfaces }
    }

    /// The reference bus without any solar array.
    pub fn reference_bus() -> Self {
        Self::new(vec![Surface::chassis()])
    }

    /// Reference bus plus a solar array sized for `budget`.
    pub fn with_solar_array(budget: &PowerBudget) -> Self {
        Self::reference_bus().with_surface(Surface::solar_array(budget.panel_area()))
    }

    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surfaces.push(surface);
        self
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Total reflecting area across all surfaces.
    pub fn total_area(&self) -> Area {
        let m2 = self.surfaces.iter().map(|s| s.area.as_square_meters()).sum();
        Area::from_square_meters(m2)
    }

    /// Rotate every surface normal into the observer frame.
    pub fn oriented(&self, body: &BodyFrame) -> Vec<OrientedSurface<'_>> {
        self.surfaces
            .iter()
            .map(|surface| OrientedSurface {
                surface,
                normal: body.to_observer(&surface.normal),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_power_to_area() {
        let area = power_to_area(Power::from_kilowatts(100.0), PowerMode::Instantaneous);
        assert_relative_eq!(area.as_square_meters(), 419.84, epsilon = 1e-9);

        let area = power_to_area(Power::from_kilowatts(100.0), PowerMode::Continuous);
        assert_relative_eq!(area.as_square_meters(), 839.68, epsilon = 1e-9);
    }

    #[test]
    fn test_continuous_doubles_area() {
        for kw in [1.0, 12.5, 30.0, 250.0] {
            let instantaneous = PowerBudget::from_kilowatts(kw, false).panel_area();
            let continuous = PowerBudget::from_kilowatts(kw, true).panel_area();
            assert_eq!(
                continuous.as_square_meters(),
                2.0 * instantaneous.as_square_meters()
            );
        }
    }

    #[test]
    fn test_area_is_linear_in_power() {
        for continuous in [false, true] {
            let one = PowerBudget::from_kilowatts(40.0, continuous).panel_area();
            let two = PowerBudget::from_kilowatts(80.0, continuous).panel_area();
            assert_relative_eq!(
                two.as_square_meters(),
                2.0 * one.as_square_meters(),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_power_mode_labels() {
        assert_eq!(PowerMode::from_continuous(false).label(), "instantaneous");
        assert_eq!(PowerMode::from_continuous(true).to_string(), "continuous");
        assert_eq!(PowerMode::default(), PowerMode::Instantaneous);
    }

    #[test]
    fn test_model_with_solar_array() {
        let model = SatelliteModel::with_solar_array(&PowerBudget::from_kilowatts(25.0, false));
        assert_eq!(model.surfaces().len(), 2);
        assert_relative_eq!(
            model.total_area().as_square_meters(),
            CHASSIS_AREA_M2 + BASE_PANEL_AREA_M2,
            epsilon = 1e-9
        );
        assert_relative_eq!(model.surfaces()[1].normal, Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_surface_normal_is_normalized() {
        let surface = Surface::new(
            Area::from_square_meters(1.0),
            Vector3::new(0.0, 3.0, 4.0),
            Arc::new(Phong::chassis()),
        );
        assert_relative_eq!(surface.normal.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scattering_requires_both_sides_in_front() {
        let surface = Surface::chassis();
        let oriented = OrientedSurface {
            surface: &surface,
            normal: Vector3::new(0.0, 0.0, 1.0),
        };
        let above = Vector3::new(0.0, 0.6, 0.8);
        let below = Vector3::new(0.0, 0.6, -0.8);

        assert!(oriented.scattering(&above, &above) > 0.0);
        assert_eq!(oriented.scattering(&below, &above), 0.0);
        assert_eq!(oriented.scattering(&above, &below), 0.0);
    }

    #[test]
    fn test_scattering_scales_with_area() {
        let small = Surface::solar_array(Area::from_square_meters(10.0));
        let large = Surface::solar_array(Area::from_square_meters(20.0));
        let normal = Vector3::new(0.0, 0.0, 1.0);
        let incoming = Vector3::new(0.6, 0.0, 0.8);
        let outgoing = Vector3::new(-0.6, 0.0, 0.8);

        let a = OrientedSurface { surface: &small, normal }.scattering(&incoming, &outgoing);
        let b = OrientedSurface { surface: &large, normal }.scattering(&incoming, &outgoing);
        assert_relative_eq!(b, 2.0 * a, max_relative = 1e-12);
    }
}
