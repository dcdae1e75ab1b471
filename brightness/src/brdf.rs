//! Bidirectional reflectance distribution functions.
//!
//! A [`ReflectanceModel`] answers one question: given light arriving from one
//! direction, how much radiance leaves toward another direction, per unit
//! irradiance? All vectors are unit vectors pointing *away* from the surface:
//! `incoming` toward the light source, `outgoing` toward the viewer.
//!
//! Models are shared across threads and across surfaces, so they are
//! `Send + Sync` and usually held behind an `Arc`.

use std::f64::consts::PI;
use std::fmt::Debug;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Capability to evaluate a BRDF (units: sr⁻¹).
pub trait ReflectanceModel: Debug + Send + Sync {
    /// Reflectance for light from `incoming` scattered toward `outgoing` off a
    /// surface with unit `normal`.
    fn reflectance(
        &self,
        incoming: &Vector3<f64>,
        outgoing: &Vector3<f64>,
        normal: &Vector3<f64>,
    ) -> f64;
}

/// Mirror `incoming` about `normal`.
pub fn specular_direction(incoming: &Vector3<f64>, normal: &Vector3<f64>) -> Vector3<f64> {
    normal * (2.0 * incoming.dot(normal)) - incoming
}

/// Normalized Phong model: a diffuse floor plus a specular lobe.
///
/// `f = Kd/π + Ks·(n + 2)/(2π)·cos^n(α)` where `α` is the angle between the
/// outgoing direction and the mirror direction. Lobes behind the mirror
/// direction are clipped to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Phong {
    /// Diffuse coefficient
    pub kd: f64,
    /// Specular coefficient
    pub ks: f64,
    /// Specular exponent; larger is glossier
    pub n: f64,
}

impl Phong {
    pub fn new(kd: f64, ks: f64, n: f64) -> Self {
        Self { kd, ks, n }
    }

    /// Default model for the Earth's surface as seen from orbit.
    pub fn earth() -> Self {
        Self::new(0.2, 0.2, 300.0)
    }

    /// Satellite bus underside.
    pub fn chassis() -> Self {
        Self::new(0.15, 0.20, 8.0)
    }

    /// Solar cells: dark and glossy.
    ///
    /// A Phong fit standing in for a lab-measured binomial solar-cell BRDF;
    /// the coefficients are calibrated together with [`Phong::chassis`].
    pub fn solar_array() -> Self {
        Self::new(0.05, 0.30, 20.0)
    }
}

impl ReflectanceModel for Phong {
    fn reflectance(
        &self,
        incoming: &Vector3<f64>,
        outgoing: &Vector3<f64>,
        normal: &Vector3<f64>,
    ) -> f64 {
        let mirror = specular_direction(incoming, normal);
        let cos_alpha = mirror.dot(outgoing).max(0.0);
        self.kd / PI + self.ks * (self.n + 2.0) / (2.0 * PI) * cos_alpha.powf(self.n)
    }
}

/// Ideal diffuse reflector with the given albedo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lambertian {
    pub albedo: f64,
}

impl Lambertian {
    pub fn new(albedo: f64) -> Self {
        Self { albedo }
    }
}

impl ReflectanceModel for Lambertian {
    fn reflectance(&self, _: &Vector3<f64>, _: &Vector3<f64>, _: &Vector3<f64>) -> f64 {
        self.albedo / PI
    }
}
