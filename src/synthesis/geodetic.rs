use crate::utils::constants::{WGS84_A2, WGS84_B2};

/// A point on the sphere the harmonic synthesis works on, together with the rotation that
/// takes geocentric north/down components back into the caller's frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocentricPosition {
    pub cos_colatitude: f64, // ct in igrf13syn
    pub sin_colatitude: f64, // st in igrf13syn
    pub radius: f64,         // r in igrf13syn, km
    pub cos_rotation: f64,   // cd in igrf13syn
    pub sin_rotation: f64,   // sd in igrf13syn
}

impl GeocentricPosition {
    /// Geocentric input, used as given: identity rotation.
    pub fn geocentric(colatitude: f64, radius: f64) -> GeocentricPosition {
        GeocentricPosition {
            cos_colatitude: colatitude.cos(),
            sin_colatitude: colatitude.sin(),
            radius,
            cos_rotation: 1.0,
            sin_rotation: 0.0,
        }
    }

    /// Converts geodetic colatitude (radians) and height above the WGS84 spheroid (km).
    pub fn geodetic(colatitude: f64, altitude: f64) -> GeocentricPosition {
        let ct = colatitude.cos();
        let st = colatitude.sin();
        let one = WGS84_A2 * st * st;
        let two = WGS84_B2 * ct * ct;
        let three = one + two;
        let rho = three.sqrt();
        let radius =
            (altitude * (altitude + 2.0 * rho) + (WGS84_A2 * one + WGS84_B2 * two) / three).sqrt();
        let cd = (altitude + rho) / radius;
        let sd = (WGS84_A2 - WGS84_B2) / rho * ct * st / radius;

        GeocentricPosition {
            cos_colatitude: ct * cd - st * sd,
            sin_colatitude: st * cd + ct * sd,
            radius,
            cos_rotation: cd,
            sin_rotation: sd,
        }
    }

    /// Geocentric colatitude, radians
    pub fn colatitude(&self) -> f64 {
        self.sin_colatitude.atan2(self.cos_colatitude)
    }

    /// Geocentric minus geodetic colatitude, radians
    pub fn correction(&self) -> f64 {
        self.sin_rotation.atan2(self.cos_rotation)
    }
}

/// Converts geodetic colatitude `theta` (radians) and altitude (km) into
/// (geocentric colatitude, correction, geocentric radius).
pub fn geodetic_to_geocentric(theta: f64, altitude: f64) -> (f64, f64, f64) {
    let position = GeocentricPosition::geodetic(theta, altitude);
    (position.colatitude(), position.correction(), position.radius)
}
