//! Declination, inclination and horizontal intensity derived from the field vector.
use crate::synthesis::field::MagneticField;
use crate::utils::constants::RAD_TO_DEG;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeomagneticElements {
    pub declination: f64, // D, degrees, positive east
    pub inclination: f64, // I, degrees, positive down
    pub horizontal: f64,  // H, nT
    pub x: f64,           // north, nT
    pub y: f64,           // east, nT
    pub z: f64,           // vertical, nT, positive down
    pub total: f64,       // F, nT
}

impl GeomagneticElements {
    pub fn from_field(field: &MagneticField) -> GeomagneticElements {
        let horizontal = (field.x * field.x + field.y * field.y).sqrt();
        GeomagneticElements {
            declination: RAD_TO_DEG * field.y.atan2(field.x),
            inclination: RAD_TO_DEG * field.z.atan2(horizontal),
            horizontal,
            x: field.x,
            y: field.y,
            z: field.z,
            total: field.f,
        }
    }

    /// (D, I, H, X, Y, Z, F)
    pub fn as_tuple(&self) -> (f64, f64, f64, f64, f64, f64, f64) {
        (
            self.declination,
            self.inclination,
            self.horizontal,
            self.x,
            self.y,
            self.z,
            self.total,
        )
    }
}

/// Annual rates of the geomagnetic elements; degrees/year for angles, nT/year otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeomagneticVariation {
    pub declination: f64,
    pub inclination: f64,
    pub horizontal: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub total: f64,
}

impl GeomagneticVariation {
    /// Rates at the midpoint of two fields synthesized one year before and one year after.
    pub fn from_fields(before: &MagneticField, after: &MagneticField) -> GeomagneticVariation {
        let mid = MagneticField::mean(before, after);
        let rate = MagneticField::half_difference(after, before);
        let h = (mid.x * mid.x + mid.y * mid.y).sqrt();
        let dh = (mid.x * rate.x + mid.y * rate.y) / h;

        GeomagneticVariation {
            declination: RAD_TO_DEG * (mid.x * rate.y - mid.y * rate.x) / (h * h),
            inclination: RAD_TO_DEG * (h * rate.z - mid.z * dh) / (mid.f * mid.f),
            horizontal: dh,
            x: rate.x,
            y: rate.y,
            z: rate.z,
            total: (h * dh + mid.z * rate.z) / mid.f,
        }
    }

    /// (dD, dI, dH, dX, dY, dZ, dF)
    pub fn as_tuple(&self) -> (f64, f64, f64, f64, f64, f64, f64) {
        (
            self.declination,
            self.inclination,
            self.horizontal,
            self.x,
            self.y,
            self.z,
            self.total,
        )
    }
}
