//! Type-safe physical units for satellite brightness calculations
//!
//! Strongly-typed quantities built on the `uom` crate so that orbital heights,
//! viewing angles, power budgets and panel areas cannot be mixed up at call
//! sites. Each quantity gets a small extension trait with the constructors and
//! accessors used throughout the brightness code.

use uom::si::angle::{degree, radian};
use uom::si::area::{square_centimeter, square_meter};
use uom::si::length::{kilometer, meter};
use uom::si::power::{kilowatt, watt};

/// Distance, e.g. orbital height or slant range
pub type Length = uom::si::f64::Length;

/// Plane angle, e.g. altitude or azimuth in horizontal coordinates
pub type Angle = uom::si::f64::Angle;

/// Electrical power, e.g. a solar array power budget
pub type Power = uom::si::f64::Power;

/// Surface area, e.g. a reflecting panel
pub type Area = uom::si::f64::Area;

/// Extension trait for length conversions used by orbital geometry
pub trait LengthExt {
    /// Create length from meters
    fn from_meters(m: f64) -> Self;

    /// Get length in meters
    fn as_meters(&self) -> f64;

    /// Create length from kilometers (orbital heights)
    fn from_kilometers(km: f64) -> Self;

    /// Get length in kilometers
    fn as_kilometers(&self) -> f64;
}

/// Extension trait for angle conversions
pub trait AngleExt {
    /// Create angle from degrees
    fn from_degrees(deg: f64) -> Self;

    /// Get angle in degrees
    fn as_degrees(&self) -> f64;

    /// Create angle from radians
    fn from_radians(rad: f64) -> Self;

    /// Get angle in radians
    fn as_radians(&self) -> f64;
}

/// Extension trait for power conversions
pub trait PowerExt {
    /// Create power from kilowatts
    fn from_kilowatts(kw: f64) -> Self;

    /// Get power in kilowatts
    fn as_kilowatts(&self) -> f64;

    /// Create power from watts
    fn from_watts(w: f64) -> Self;

    /// Get power in watts
    fn as_watts(&self) -> f64;
}

/// Extension trait for area conversions
pub trait AreaExt {
    /// Create area from square meters
    fn from_square_meters(m2: f64) -> Self;

    /// Get area in square meters
    fn as_square_meters(&self) -> f64;

    /// Get area in square centimeters
    fn as_square_centimeters(&self) -> f64;
}

impl LengthExt for Length {
    fn from_meters(m: f64) -> Self {
        Length::new::<meter>(m)
    }

    fn as_meters(&self) -> f64 {
        self.get::<meter>()
    }

    fn from_kilometers(km: f64) -> Self {
        Length::new::<kilometer>(km)
    }

    fn as_kilometers(&self) -> f64 {
        self.get::<kilometer>()
    }
}

impl AngleExt for Angle {
    fn from_degrees(deg: f64) -> Self {
        Angle::new::<degree>(deg)
    }

    fn as_degrees(&self) -> f64 {
        self.get::<degree>()
    }

    fn from_radians(rad: f64) -> Self {
        Angle::new::<radian>(rad)
    }

    fn as_radians(&self) -> f64 {
        self.get::<radian>()
    }
}

impl PowerExt for Power {
    fn from_kilowatts(kw: f64) -> Self {
        Power::new::<kilowatt>(kw)
    }

    fn as_kilowatts(&self) -> f64 {
        self.get::<kilowatt>()
    }

    fn from_watts(w: f64) -> Self {
        Power::new::<watt>(w)
    }

    fn as_watts(&self) -> f64 {
        self.get::<watt>()
    }
}

impl AreaExt for Area {
    fn from_square_meters(m2: f64) -> Self {
        Area::new::<square_meter>(m2)
    }

    fn as_square_meters(&self) -> f64 {
        self.get::<square_meter>()
    }

    fn as_square_centimeters(&self) -> f64 {
        self.get::<square_centimeter>()
    }
}
