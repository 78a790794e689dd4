//! Entry points tying the coefficient table to the synthesis.
use crate::coeffs::epoch::EpochParameters;
use crate::coeffs::gauss::GaussCoefficients;
use crate::coeffs::table::CoefficientTable;
use crate::elements::{GeomagneticElements, GeomagneticVariation};
use crate::error::IgrfError;
use crate::synthesis::field::MagneticField;
use crate::synthesis::geodetic::GeocentricPosition;
use crate::synthesis::harmonic::synthesize_field;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::path::Path;
use tracing::debug;

type Result<T> = std::result::Result<T, IgrfError>;

/// How altitude and latitude of a point are to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSystem {
    /// Latitude on the WGS84 spheroid, altitude in km above it (itype 1)
    Geodetic,
    /// Latitude on a sphere, distance from the centre of the Earth in km (itype 2)
    Geocentric,
}

impl TryFrom<i32> for CoordinateSystem {
    type Error = IgrfError;

    fn try_from(itype: i32) -> Result<Self> {
        match itype {
            1 => Ok(CoordinateSystem::Geodetic),
            2 => Ok(CoordinateSystem::Geocentric),
            x => Err(IgrfError::InvalidCoordinateSystem(x)),
        }
    }
}

impl From<CoordinateSystem> for i32 {
    fn from(system: CoordinateSystem) -> Self {
        match system {
            CoordinateSystem::Geodetic => 1,
            CoordinateSystem::Geocentric => 2,
        }
    }
}

/// One place and time to evaluate the model at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialPoint {
    pub year: f64,                // decimal year
    pub system: CoordinateSystem, // itype
    pub altitude: f64,            // km; height if geodetic, radius if geocentric
    pub latitude: f64,            // degrees north
    pub longitude: f64,           // degrees east
}

impl SpatialPoint {
    pub fn new(
        year: f64,
        system: CoordinateSystem,
        altitude: f64,
        latitude: f64,
        longitude: f64,
    ) -> SpatialPoint {
        SpatialPoint {
            year,
            system,
            altitude,
            latitude,
            longitude,
        }
    }

    /// Position on the synthesis sphere. Radii that are not positive (a geocentric radius of
    /// 0, or a geodetic depth past the centre) are rejected.
    fn position(&self) -> Result<GeocentricPosition> {
        let colatitude = (90.0 - self.latitude).to_radians();
        let position = match self.system {
            CoordinateSystem::Geodetic => GeocentricPosition::geodetic(colatitude, self.altitude),
            CoordinateSystem::Geocentric => {
                GeocentricPosition::geocentric(colatitude, self.altitude)
            }
        };
        if !(position.radius.is_finite() && position.radius > 0.0) {
            Err(IgrfError::InvalidRadius(position.radius))?
        }
        Ok(position)
    }
}

/// The IGRF model over a loaded coefficient table. Cloning shares the table.
#[derive(Debug, Clone)]
pub struct Igrf {
    table: CoefficientTable,
}

impl Igrf {
    pub fn new(table: CoefficientTable) -> Igrf {
        Igrf { table }
    }

    /// Loads the model from an IGRF coefficient file.
    ///
    /// # Errors
    /// Will return `Err` if the file cannot be read or parsed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Igrf> {
        Ok(Igrf::new(CoefficientTable::from_path(path)?))
    }

    pub fn table(&self) -> &CoefficientTable {
        &self.table
    }

    /// Gauss coefficients interpolated to `year`.
    ///
    /// # Errors
    /// Will return `Err` if `year` is outside 1900.0 ..= 2030.0 or the table is too short.
    pub fn coefficients(&self, year: f64) -> Result<GaussCoefficients> {
        let epoch = EpochParameters::resolve(year)?;
        GaussCoefficients::synthesize(&epoch, &self.table)
    }

    /// Main field at a point: north, east, down and total intensity in nT.
    ///
    /// # Errors
    /// Will return `Err` if `year` is outside 1900.0 ..= 2030.0 or the table is too short.
    pub fn synthesize(
        &self,
        year: f64,
        system: CoordinateSystem,
        altitude: f64,
        latitude: f64,
        longitude: f64,
    ) -> Result<MagneticField> {
        self.synthesize_point(&SpatialPoint::new(
            year, system, altitude, latitude, longitude,
        ))
    }

    /// See [`Igrf::synthesize`].
    pub fn synthesize_point(&self, point: &SpatialPoint) -> Result<MagneticField> {
        let coeffs = self.coefficients(point.year)?;
        let position = point.position()?;
        Ok(synthesize_field(&coeffs, &position, point.longitude.to_radians()))
    }

    /// Tuple form mirroring `igrf13syn`: `itype` 2 is geocentric, anything else geodetic.
    /// Years outside 1900.0 ..= 2030.0 give `(0.0, 0.0, 0.0, 1.0)` instead of an error.
    ///
    /// # Errors
    /// Will return `Err` for every failure other than the year, such as a table too short
    /// for the requested epoch or a radius that is not positive.
    pub fn synthesize_legacy(
        &self,
        year: f64,
        itype: i32,
        altitude: f64,
        latitude: f64,
        longitude: f64,
    ) -> Result<(f64, f64, f64, f64)> {
        let system = if itype == 2 {
            CoordinateSystem::Geocentric
        } else {
            CoordinateSystem::Geodetic
        };
        let field = self.synthesize(year, system, altitude, latitude, longitude);
        Ok(out_of_range_as_sentinel(field)?.as_tuple())
    }

    /// Annual rate of change, `(field(year + 1) - field(year - 1)) / 2`, in nT/year.
    ///
    /// # Errors
    /// Will return `Err` if either `year - 1` or `year + 1` is outside the model's span.
    pub fn secular_variation(
        &self,
        year: f64,
        system: CoordinateSystem,
        altitude: f64,
        latitude: f64,
        longitude: f64,
    ) -> Result<MagneticField> {
        let before = self.synthesize(year - 1.0, system, altitude, latitude, longitude)?;
        let after = self.synthesize(year + 1.0, system, altitude, latitude, longitude)?;
        Ok(MagneticField::half_difference(&after, &before))
    }

    /// Declination, inclination, horizontal intensity and the field components for a
    /// geodetic position (altitude in km above the spheroid).
    ///
    /// # Errors
    /// Will return `Err` if `year` is outside the model's span.
    pub fn value(
        &self,
        latitude: f64,
        longitude: f64,
        altitude: f64,
        year: f64,
    ) -> Result<GeomagneticElements> {
        let field = self.synthesize(
            year,
            CoordinateSystem::Geodetic,
            altitude,
            latitude,
            longitude,
        )?;
        Ok(GeomagneticElements::from_field(&field))
    }

    /// Annual variation of the geomagnetic elements at a geodetic position.
    ///
    /// # Errors
    /// Will return `Err` if `year - 1` or `year + 1` is outside the model's span.
    pub fn variation(
        &self,
        latitude: f64,
        longitude: f64,
        altitude: f64,
        year: f64,
    ) -> Result<GeomagneticVariation> {
        let system = CoordinateSystem::Geodetic;
        let before = self.synthesize(year - 1.0, system, altitude, latitude, longitude)?;
        let after = self.synthesize(year + 1.0, system, altitude, latitude, longitude)?;
        Ok(GeomagneticVariation::from_fields(&before, &after))
    }

    /// Evaluates every point in order. A failing point does not stop the others.
    pub fn synthesize_batch(&self, points: &[SpatialPoint]) -> Vec<Result<MagneticField>> {
        points.iter().map(|p| self.synthesize_point(p)).collect()
    }

    /// Evaluates every point in parallel, returning results in input order.
    pub fn par_synthesize_batch(&self, points: &[SpatialPoint]) -> Vec<Result<MagneticField>> {
        debug!(points = points.len(), "parallel synthesis");
        points.par_iter().map(|p| self.synthesize_point(p)).collect()
    }

    /// Evaluates many positions at a single year in parallel, interpolating the coefficients
    /// once. Each position is `(altitude, latitude, longitude)`.
    ///
    /// # Errors
    /// Will return `Err` if `year` is outside the model's span or any position has a radius
    /// that is not positive.
    pub fn par_synthesize_year(
        &self,
        year: f64,
        system: CoordinateSystem,
        positions: &[(f64, f64, f64)],
    ) -> Result<Vec<MagneticField>> {
        let coeffs = self.coefficients(year)?;
        debug!(year, points = positions.len(), "parallel synthesis");
        positions
            .par_iter()
            .map(|&(altitude, latitude, longitude)| {
                let point = SpatialPoint::new(year, system, altitude, latitude, longitude);
                Ok(synthesize_field(
                    &coeffs,
                    &point.position()?,
                    longitude.to_radians(),
                ))
            })
            .collect()
    }
}

/// Replaces a `YearOutOfRange` failure with [`MagneticField::OUT_OF_RANGE`], leaving every
/// other error in place.
pub(crate) fn out_of_range_as_sentinel(field: Result<MagneticField>) -> Result<MagneticField> {
    match field {
        Err(IgrfError::YearOutOfRange(_)) => Ok(MagneticField::OUT_OF_RANGE),
        other => other,
    }
}
