//! Earthshine: sunlight scattered off the Earth onto the satellite.
//!
//! The part of the Earth visible from the satellite is a spherical cap around
//! the sub-satellite point, bounded by the geocentric angle
//! `γmax = acos(R / (R + h))`. The cap is flattened with an azimuthal
//! equidistant projection centred on the sub-satellite point and sampled on a
//! `density × density` grid of cell centres spanning `[-γmax, γmax]²`. Cells
//! outside the cap are skipped; each remaining cell is an Earth panel with
//! area `R² · sin(γ)/γ · Δ²`.
//!
//! Every sunlit panel scatters sunlight toward the satellite through the Earth
//! BRDF. That light is then scattered by the satellite surfaces toward the
//! observer exactly like direct sunlight, so the cost is
//! `O(density² × surfaces)`.

use nalgebra::Vector3;

use crate::brdf::ReflectanceModel;
use crate::conversions::{EARTH_RADIUS, SUN_INTENSITY};
use crate::geometry::Scene;
use crate::satellite::OrientedSurface;

/// Default number of grid cells along each axis of the Earth grid
pub const DEFAULT_EARTH_PANEL_DENSITY: usize = 151;

/// One patch of the Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarthPanel {
    /// Outward unit normal, which is also the geocentric direction
    pub normal: Vector3<f64>,
    /// Panel area (m²)
    pub area: f64,
}

impl EarthPanel {
    /// Panel centre relative to the Earth's centre (m)
    pub fn position(&self) -> Vector3<f64> {
        self.normal * EARTH_RADIUS
    }
}

/// Sample the Earth cap visible from a satellite at `satellite_geocentric`.
///
/// `x_axis`/`y_axis` span the satellite's local horizontal plane and fix the
/// orientation of the grid; only their directions matter. Panels are produced
/// lazily, so memory use does not grow with `density`.
pub fn visible_earth_panels(
    satellite_geocentric: &Vector3<f64>,
    x_axis: &Vector3<f64>,
    y_axis: &Vector3<f64>,
    density: usize,
) -> impl Iterator<Item = EarthPanel> {
    let zenith = satellite_geocentric.normalize();
    let max_angle = (EARTH_RADIUS / satellite_geocentric.norm()).acos();
    let step = 2.0 * max_angle / density.max(1) as f64;
    let cell_area = EARTH_RADIUS * EARTH_RADIUS * step * step;
    let (x_axis, y_axis) = (*x_axis, *y_axis);
    let cell_center = move |k: usize| -max_angle + (k as f64 + 0.5) * step;

    (0..density)
        .flat_map(move |i| (0..density).map(move |j| (cell_center(i), cell_center(j))))
        .filter_map(move |(a, b)| {
            let angle = a.hypot(b);
            if angle >= max_angle {
                return None;
            }

            let (normal, stretch) = if angle < 1e-12 {
                (zenith, 1.0)
            } else {
                let bearing = b.atan2(a);
                let horizontal = x_axis * bearing.cos() + y_axis * bearing.sin();
                (
                    zenith * angle.cos() + horizontal * angle.sin(),
                    angle.sin() / angle,
                )
            };

            Some(EarthPanel {
                normal,
                area: cell_area * stretch,
            })
        })
}

/// Total visible cap area implied by a panel set (m²).
pub fn total_panel_area(panels: impl IntoIterator<Item = EarthPanel>) -> f64 {
    panels.into_iter().map(|p| p.area).sum()
}

/// Irradiance at the observer (W/m²) from Earthshine reflected by `surfaces`.
pub fn earthshine_intensity(
    scene: &Scene,
    surfaces: &[OrientedSurface<'_>],
    density: usize,
    earth_brdf: &dyn ReflectanceModel,
) -> f64 {
    let panels = visible_earth_panels(
        &scene.satellite_geocentric,
        &scene.body.x,
        &scene.body.y,
        density,
    );
    let to_observer = scene.to_observer();

    let mut panel_count = 0usize;
    let mut scattered = 0.0;
    for panel in panels {
        panel_count += 1;
        let cos_sun = panel.normal.dot(&scene.to_sun);
        if cos_sun <= 0.0 {
            continue;
        }

        let offset = scene.satellite_geocentric - panel.position();
        let distance = offset.norm();
        let toward_satellite = offset / distance;
        let cos_view = panel.normal.dot(&toward_satellite);
        if cos_view <= 0.0 {
            continue;
        }

        let radiance = SUN_INTENSITY
            * earth_brdf.reflectance(&scene.to_sun, &toward_satellite, &panel.normal)
            * cos_sun;
        let irradiance = radiance * panel.area * cos_view / (distance * distance);

        let toward_panel = -toward_satellite;
        for surface in surfaces {
            scattered += irradiance * surface.scattering(&toward_panel, &to_observer);
        }
    }

    log::debug!(
        "earthshine over {} panels at density {}: {:.3e} W/m^2 before range falloff",
        panel_count,
        density,
        scattered
    );

    scattered / (scene.slant_range * scene.slant_range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brdf::Phong;
    use crate::geometry::{HorizontalCoordinates, ViewingGeometry};
    use crate::satellite::{PowerBudget, SatelliteModel};
    use approx::assert_relative_eq;
    use shared::units::{Length, LengthExt};

    fn reference_scene() -> Scene {
        ViewingGeometry::new(
            Length::from_kilometers(550.0),
            HorizontalCoordinates::from_degrees(45.0, 270.0),
            HorizontalCoordinates::from_degrees(-15.0, 270.0),
        )
        .scene()
    }

    fn cap_area(height_m: f64) -> f64 {
        let max_angle = (EARTH_RADIUS / (EARTH_RADIUS + height_m)).acos();
        2.0 * std::f64::consts::PI * EARTH_RADIUS * EARTH_RADIUS * (1.0 - max_angle.cos())
    }

    #[test]
    fn test_panel_area_matches_cap() {
        let scene = reference_scene();
        let panels = visible_earth_panels(
            &scene.satellite_geocentric,
            &scene.body.x,
            &scene.body.y,
            301,
        );
        assert_relative_eq!(
            total_panel_area(panels),
            cap_area(550e3),
            max_relative = 1e-2
        );
    }

    #[test]
    fn test_panels_are_visible_from_satellite() {
        let scene = reference_scene();
        let panels = visible_earth_panels(
            &scene.satellite_geocentric,
            &scene.body.x,
            &scene.body.y,
            41,
        )
        .collect::<Vec<_>>();
        assert!(!panels.is_empty());
        for panel in &panels {
            assert_relative_eq!(panel.normal.norm(), 1.0, epsilon = 1e-12);
            let toward_satellite = scene.satellite_geocentric - panel.position();
            assert!(panel.normal.dot(&toward_satellite) > 0.0);
        }
    }

    #[test]
    fn test_zero_density_has_no_panels() {
        let scene = reference_scene();
        let mut panels =
            visible_earth_panels(&scene.satellite_geocentric, &scene.body.x, &scene.body.y, 0);
        assert!(panels.next().is_none());
    }

    #[test]
    fn test_single_cell_is_sub_satellite_point() {
        let scene = reference_scene();
        let panels: Vec<_> =
            visible_earth_panels(&scene.satellite_geocentric, &scene.body.x, &scene.body.y, 1)
                .collect();
        assert_eq!(panels.len(), 1);
        assert_relative_eq!(panels[0].normal, scene.body.z, epsilon = 1e-12);
    }

    #[test]
    fn test_huge_density_is_streamed() {
        let scene = reference_scene();
        let mut panels = visible_earth_panels(
            &scene.satellite_geocentric,
            &scene.body.x,
            &scene.body.y,
            1 << 20,
        );
        let first = panels.next().unwrap();
        assert_relative_eq!(first.normal.norm(), 1.0, epsilon = 1e-12);
        assert!(first.area > 0.0);
    }

    #[test]
    fn test_earthshine_positive_at_dusk() {
        let scene = reference_scene();
        let model = SatelliteModel::with_solar_array(&PowerBudget::from_kilowatts(100.0, false));
        let oriented = model.oriented(&scene.body);
        let intensity = earthshine_intensity(&scene, &oriented, 51, &Phong::earth());
        assert!(intensity > 0.0);
        assert!(intensity.is_finite());
    }

    #[test]
    fn test_earthshine_converges_with_density() {
        let scene = reference_scene();
        let model = SatelliteModel::with_solar_array(&PowerBudget::from_kilowatts(100.0, false));
        let oriented = model.oriented(&scene.body);
        let earth = Phong::earth();

        let coarse = earthshine_intensity(&scene, &oriented, 101, &earth);
        let default = earthshine_intensity(&scene, &oriented, DEFAULT_EARTH_PANEL_DENSITY, &earth);
        let fine = earthshine_intensity(&scene, &oriented, 201, &earth);

        assert_relative_eq!(coarse, default, max_relative = 1e-3);
        assert_relative_eq!(fine, default, max_relative = 1e-3);
    }

    #[test]
    fn test_dark_earth_gives_no_earthshine() {
        // Sun straight below the observer's feet: the visible cap is night side
        let scene = ViewingGeometry::new(
            Length::from_kilometers(550.0),
            HorizontalCoordinates::from_degrees(90.0, 0.0),
            HorizontalCoordinates::from_degrees(-90.0, 0.0),
        )
        .scene();
        let model = SatelliteModel::with_solar_array(&PowerBudget::from_kilowatts(100.0, false));
        let oriented = model.oriented(&scene.body);
        let intensity = earthshine_intensity(&scene, &oriented, 51, &Phong::earth());
        assert_eq!(intensity, 0.0);
    }
}
