//! JSON description of a satellite surface model.
//!
//! The bus surfaces are fixed; the solar array is appended at estimate time
//! because its area depends on the power budget. A file looks like:
//!
//! ```json
//! {
//!   "bus": [
//!     { "area_m2": 3.9, "normal": [0.0, 0.0, -1.0],
//!       "brdf": { "kd": 0.15, "ks": 0.2, "n": 8.0 } }
//!   ],
//!   "solar_array_brdf": { "kd": 0.05, "ks": 0.3, "n": 20.0 }
//! }
//! ```

use std::io;
use std::path::Path;
use std::sync::Arc;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use shared::units::{Area, AreaExt};

use crate::brdf::Phong;
use crate::satellite::{
    SatelliteModel, Surface, CHASSIS_AREA_M2, CHASSIS_NORMAL, SOLAR_ARRAY_NORMAL,
};

/// One fixed bus surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    pub area_m2: f64,
    /// Body-frame normal; normalized when the model is built
    pub normal: [f64; 3],
    pub brdf: Phong,
}

impl SurfaceConfig {
    fn to_surface(&self) -> Surface {
        Surface::new(
            Area::from_square_meters(self.area_m2),
            Vector3::from(self.normal),
            Arc::new(self.brdf),
        )
    }
}

/// Bus surfaces plus the BRDF used for the power-sized solar array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteModelConfig {
    pub bus: Vec<SurfaceConfig>,
    pub solar_array_brdf: Phong,
}

impl Default for SatelliteModelConfig {
    fn default() -> Self {
        Self {
            bus: vec![SurfaceConfig {
                area_m2: CHASSIS_AREA_M2,
                normal: CHASSIS_NORMAL,
                brdf: Phong::chassis(),
            }],
            solar_array_brdf: Phong::solar_array(),
        }
    }
}

impl SatelliteModelConfig {
    /// Check areas, normals and BRDF coefficients.
    pub fn validate(&self) -> Result<(), String> {
        for (index, surface) in self.bus.iter().enumerate() {
            if !(surface.area_m2.is_finite() && surface.area_m2 > 0.0) {
                return Err(format!(
                    "bus surface {index}: area must be positive, got {}",
                    surface.area_m2
                ));
            }
            let normal = Vector3::from(surface.normal);
            if !(normal.iter().all(|c| c.is_finite()) && normal.norm() > 0.0) {
                return Err(format!("bus surface {index}: normal must be non-zero"));
            }
            validate_brdf(&surface.brdf).map_err(|e| format!("bus surface {index}: {e}"))?;
        }
        validate_brdf(&self.solar_array_brdf).map_err(|e| format!("solar array: {e}"))
    }

    /// Build the satellite with a solar array of `array_area`.
    pub fn build(&self, array_area: Area) -> SatelliteModel {
        let surfaces = self.bus.iter().map(SurfaceConfig::to_surface).collect();
        SatelliteModel::new(surfaces).with_surface(Surface::new(
            array_area,
            Vector3::from(SOLAR_ARRAY_NORMAL),
            Arc::new(self.solar_array_brdf),
        ))
    }

    /// Save to a pretty-printed JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }

    /// Load from a JSON file and validate it
    pub fn load_from_file(path: &Path) -> Result<Self, io::Error> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        config
            .validate()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }
}

fn validate_brdf(brdf: &Phong) -> Result<(), String> {
    let coefficients = [brdf.kd, brdf.ks, brdf.n];
    if coefficients.iter().any(|c| !c.is_finite() || *c < 0.0) {
        return Err(format!(
            "BRDF coefficients must be finite and non-negative, got kd={} ks={} n={}",
            brdf.kd, brdf.ks, brdf.n
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("brightness_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_default_matches_reference_model() {
        let area = Area::from_square_meters(419.84);
        let from_config = SatelliteModelConfig::default().build(area);
        let reference = SatelliteModel::reference_bus().with_surface(Surface::solar_array(area));

        assert_eq!(from_config.surfaces().len(), reference.surfaces().len());
        for (a, b) in from_config.surfaces().iter().zip(reference.surfaces()) {
            assert_eq!(a.area, b.area);
            assert_relative_eq!(a.normal, b.normal, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("model.json");
        let mut config = SatelliteModelConfig::default();
        config.bus.push(SurfaceConfig {
            area_m2: 1.5,
            normal: [1.0, 0.0, 0.0],
            brdf: Phong::new(0.3, 0.0, 1.0),
        });

        config.save_to_file(&path).unwrap();
        let loaded = SatelliteModelConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_parse_documented_layout() {
        let json = r#"{
            "bus": [
                { "area_m2": 3.9, "normal": [0.0, 0.0, -1.0],
                  "brdf": { "kd": 0.15, "ks": 0.2, "n": 8.0 } }
            ],
            "solar_array_brdf": { "kd": 0.05, "ks": 0.3, "n": 20.0 }
        }"#;
        let config: SatelliteModelConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, SatelliteModelConfig::default());
    }

    #[test]
    fn test_invalid_files_are_rejected() {
        let path = temp_path("bad_model.json");
        let mut config = SatelliteModelConfig::default();
        config.bus[0].area_m2 = -1.0;
        config.save_to_file(&path).unwrap();

        let err = SatelliteModelConfig::load_from_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("area must be positive"));
    }

    #[test]
    fn test_validate_rejects_zero_normal_and_negative_brdf() {
        let mut config = SatelliteModelConfig::default();
        config.bus[0].normal = [0.0, 0.0, 0.0];
        assert!(config.validate().is_err());

        let mut config = SatelliteModelConfig::default();
        config.solar_array_brdf.ks = -0.1;
        let err = config.validate().unwrap_err();
        assert!(err.starts_with("solar array"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = SatelliteModelConfig::load_from_file(&temp_path("missing.json")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
