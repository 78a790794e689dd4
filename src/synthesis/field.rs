/// Magnetic field vector in the caller's frame: north, east, vertical (positive down) and
/// total intensity. nT, or nT/year for secular variation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MagneticField {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub f: f64,
}

impl MagneticField {
    /// Legacy "invalid date" signal: f = 1.0, x = y = z = 0.0
    pub const OUT_OF_RANGE: MagneticField = MagneticField {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        f: 1.0,
    };

    /// Builds a field from its components, deriving the total intensity.
    pub fn from_components(x: f64, y: f64, z: f64) -> MagneticField {
        MagneticField {
            x,
            y,
            z,
            f: (x * x + y * y + z * z).sqrt(),
        }
    }

    pub fn is_out_of_range(&self) -> bool {
        *self == MagneticField::OUT_OF_RANGE
    }

    /// Component-wise half difference, `(later - earlier) / 2`. Used for annual rates from
    /// syntheses one year either side of an instant.
    pub fn half_difference(later: &MagneticField, earlier: &MagneticField) -> MagneticField {
        MagneticField {
            x: (later.x - earlier.x) / 2.0,
            y: (later.y - earlier.y) / 2.0,
            z: (later.z - earlier.z) / 2.0,
            f: (later.f - earlier.f) / 2.0,
        }
    }

    /// Component-wise mean of two fields.
    pub fn mean(a: &MagneticField, b: &MagneticField) -> MagneticField {
        MagneticField {
            x: (a.x + b.x) / 2.0,
            y: (a.y + b.y) / 2.0,
            z: (a.z + b.z) / 2.0,
            f: (a.f + b.f) / 2.0,
        }
    }

    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.z, self.f)
    }
}

impl From<MagneticField> for [f64; 4] {
    fn from(field: MagneticField) -> Self {
        [field.x, field.y, field.z, field.f]
    }
}
