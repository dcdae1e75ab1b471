//! Observer-centred viewing geometry.
//!
//! All vectors live in the observer's local frame: +x east, +y north, +z up,
//! with the observer on the surface of a spherical Earth whose centre sits at
//! `(0, 0, -EARTH_RADIUS)`. The Sun is treated as infinitely distant, so only
//! its direction matters.
//!
//! The satellite carries its own *body frame*:
//! - **z**: geocentric zenith at the satellite (away from Earth)
//! - **y**: the Sun's direction projected onto the satellite's local horizon
//! - **x**: `y × z`, completing a right-handed set
//!
//! Satellite surface normals are expressed in this body frame, so a panel with
//! normal `[0, 1, 0]` always faces the Sun's azimuth and `[0, 0, -1]` faces
//! nadir.

use nalgebra::Vector3;
use shared::units::{Angle, AngleExt, Length, LengthExt};

use crate::conversions::EARTH_RADIUS;

/// Below this length a projected vector is treated as zero.
const DEGENERATE_NORM: f64 = 1e-12;

/// A direction seen from the observer: altitude above the horizon and compass
/// azimuth (0° north, 90° east).
///
/// The azimuth is wrapped into `[0°, 360°)` on construction, so directions
/// whose azimuths differ by whole turns compare equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalCoordinates {
    altitude: Angle,
    azimuth: Angle,
}

impl HorizontalCoordinates {
    /// Create coordinates from typed angles.
    pub fn new(altitude: Angle, azimuth: Angle) -> Self {
        Self::from_degrees(altitude.as_degrees(), azimuth.as_degrees())
    }

    /// Create coordinates from altitude and azimuth in degrees.
    pub fn from_degrees(altitude_deg: f64, azimuth_deg: f64) -> Self {
        let mut azimuth_deg = azimuth_deg.rem_euclid(360.0);
        // Tiny negative inputs round up to a full turn
        if azimuth_deg >= 360.0 {
            azimuth_deg = 0.0;
        }
        Self {
            altitude: Angle::from_degrees(altitude_deg),
            azimuth: Angle::from_degrees(azimuth_deg),
        }
    }

    /// Altitude above the horizon
    pub fn altitude(&self) -> Angle {
        self.altitude
    }

    /// Azimuth in `[0°, 360°)`
    pub fn azimuth(&self) -> Angle {
        self.azimuth
    }

    /// Unit vector pointing along this direction in the observer frame.
    pub fn unit_vector(&self) -> Vector3<f64> {
        let alt = self.altitude.as_radians();
        let az = self.azimuth.as_radians();
        Vector3::new(alt.cos() * az.sin(), alt.cos() * az.cos(), alt.sin())
    }
}

/// Satellite and Sun positions for a single observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewingGeometry {
    /// Satellite height above the Earth's surface
    pub height: Length,
    /// Direction from the observer to the satellite
    pub satellite: HorizontalCoordinates,
    /// Direction from the observer to the Sun
    pub sun: HorizontalCoordinates,
}

impl ViewingGeometry {
    pub fn new(height: Length, satellite: HorizontalCoordinates, sun: HorizontalCoordinates) -> Self {
        Self {
            height,
            satellite,
            sun,
        }
    }

    /// Resolve the geometry into observer-frame vectors and the body frame.
    pub fn scene(&self) -> Scene {
        let to_satellite = self.satellite.unit_vector();
        let to_sun = self.sun.unit_vector();
        let range = slant_range(self.height.as_meters(), self.satellite.altitude.as_radians());

        let earth_center = Vector3::new(0.0, 0.0, -EARTH_RADIUS);
        let satellite_geocentric = to_satellite * range - earth_center;
        let body = BodyFrame::new(&satellite_geocentric, &to_sun);

        Scene {
            to_satellite,
            to_sun,
            slant_range: range,
            satellite_geocentric,
            body,
        }
    }
}

/// Distance (m) from the observer to a satellite at `height_m` above the
/// surface, seen at `altitude_rad` above the horizon.
///
/// Solves `|d·u + R·ẑ| = R + h` for the positive root `d`.
pub fn slant_range(height_m: f64, altitude_rad: f64) -> f64 {
    let r_sin = EARTH_RADIUS * altitude_rad.sin();
    let orbit_radius = EARTH_RADIUS + height_m;
    -r_sin + (r_sin * r_sin + orbit_radius * orbit_radius - EARTH_RADIUS * EARTH_RADIUS).sqrt()
}

/// Whether a point (geocentric, m) sees the Sun, using a cylindrical Earth
/// shadow.
pub fn is_sunlit(geocentric: &Vector3<f64>, to_sun: &Vector3<f64>) -> bool {
    let along_sun = geocentric.dot(to_sun);
    if along_sun >= 0.0 {
        return true;
    }
    (geocentric - to_sun * along_sun).norm() > EARTH_RADIUS
}

/// Orthonormal satellite body frame expressed in observer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyFrame {
    pub x: Vector3<f64>,
    pub y: Vector3<f64>,
    pub z: Vector3<f64>,
}

impl BodyFrame {
    /// Build the body frame for a satellite at `geocentric` with the Sun
    /// along `to_sun`.
    pub fn new(geocentric: &Vector3<f64>, to_sun: &Vector3<f64>) -> Self {
        let z = geocentric.normalize();
        let mut horizontal = to_sun - z * to_sun.dot(&z);
        if horizontal.norm() < DEGENERATE_NORM {
            // Sun at the satellite's zenith or nadir: any horizontal works
            let east = Vector3::new(1.0, 0.0, 0.0);
            let reference = if z.cross(&east).norm() < DEGENERATE_NORM {
                Vector3::new(0.0, 1.0, 0.0)
            } else {
                east
            };
            horizontal = z.cross(&reference);
        }
        let y = horizontal.normalize();
        let x = y.cross(&z);
        Self { x, y, z }
    }

    /// Rotate a body-frame vector into the observer frame.
    pub fn to_observer(&self, body: &Vector3<f64>) -> Vector3<f64> {
        self.x * body.x + self.y * body.y + self.z * body.z
    }
}

/// Observer-frame vectors for one observation.
#[derive(Debug, Clone, Copy)]
pub struct Scene {
    /// Unit vector from observer to satellite
    pub to_satellite: Vector3<f64>,
    /// Unit vector toward the Sun
    pub to_sun: Vector3<f64>,
    /// Observer to satellite distance (m)
    pub slant_range: f64,
    /// Satellite position relative to the Earth's centre (m)
    pub satellite_geocentric: Vector3<f64>,
    pub body: BodyFrame,
}

impl Scene {
    /// Unit vector from the satellite back to the observer.
    pub fn to_observer(&self) -> Vector3<f64> {
        -self.to_satellite
    }

    /// Whether the satellite is outside the Earth's shadow.
    pub fn satellite_sunlit(&self) -> bool {
        is_sunlit(&self.satellite_geocentric, &self.to_sun)
    }
}
