//! Python bindings, built with the `python` feature.
use crate::igrf::{out_of_range_as_sentinel, CoordinateSystem, Igrf, SpatialPoint};
use crate::synthesis::geodetic::geodetic_to_geocentric;
use itertools::izip;
use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray2, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::path::PathBuf;

type Field7 = (f64, f64, f64, f64, f64, f64, f64);

/// IGRF model loaded from a coefficient file.
#[pyclass(name = "Igrf", frozen)]
struct PyIgrf {
    model: Igrf,
}

#[pymethods]
impl PyIgrf {
    #[new]
    #[pyo3(text_signature = "(coeffs_file: str, /)")]
    fn new(coeffs_file: PathBuf) -> PyResult<Self> {
        Ok(PyIgrf {
            model: Igrf::from_path(coeffs_file)?,
        })
    }

    /// Returns (x, y, z, f) in nT. Out-of-range years give (0, 0, 0, 1); other failures
    /// raise `ValueError`.
    #[pyo3(text_signature = "(self, year, itype, alt, lat, elong, /)")]
    fn get_syn(
        &self,
        year: f64,
        itype: i32,
        alt: f64,
        lat: f64,
        elong: f64,
    ) -> PyResult<(f64, f64, f64, f64)> {
        Ok(self.model.synthesize_legacy(year, itype, alt, lat, elong)?)
    }

    /// Returns (D, I, H, X, Y, Z, F) for a geodetic position.
    #[pyo3(signature = (lat, lon, alt = 0.0, year = 2005.0))]
    fn get_value(&self, lat: f64, lon: f64, alt: f64, year: f64) -> PyResult<Field7> {
        Ok(self.model.value(lat, lon, alt, year)?.as_tuple())
    }

    /// Returns the annual variation (dD, dI, dH, dX, dY, dZ, dF) for a geodetic position.
    #[pyo3(signature = (lat, lon, alt = 0.0, year = 2005.0))]
    fn get_variation(&self, lat: f64, lon: f64, alt: f64, year: f64) -> PyResult<Field7> {
        Ok(self.model.variation(lat, lon, alt, year)?.as_tuple())
    }

    /// Synthesizes equally sized arrays of points in parallel into an (N, 4) array of
    /// x, y, z, f. Out-of-range years give rows of (0, 0, 0, 1); any other failing point
    /// raises `ValueError`.
    #[pyo3(text_signature = "(self, years, itype, alts, lats, elongs, /)")]
    fn get_syn_array<'py>(
        &self,
        py: Python<'py>,
        years: PyReadonlyArray1<'py, f64>,
        itype: i32,
        alts: PyReadonlyArray1<'py, f64>,
        lats: PyReadonlyArray1<'py, f64>,
        elongs: PyReadonlyArray1<'py, f64>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let system = CoordinateSystem::try_from(itype)?;
        let (years, alts, lats, elongs) = (
            years.as_slice()?,
            alts.as_slice()?,
            lats.as_slice()?,
            elongs.as_slice()?,
        );
        let n = years.len();
        if alts.len() != n || lats.len() != n || elongs.len() != n {
            Err(PyValueError::new_err("All input arrays must have the same length"))?
        }
        let points: Vec<SpatialPoint> = izip!(years, alts, lats, elongs)
            .map(|(&year, &alt, &lat, &lon)| SpatialPoint::new(year, system, alt, lat, lon))
            .collect();

        let model = &self.model;
        let fields = py.allow_threads(|| model.par_synthesize_batch(&points));
        let mut flat = Vec::with_capacity(4 * n);
        for res in fields {
            flat.extend(<[f64; 4]>::from(out_of_range_as_sentinel(res)?));
        }
        let array = Array2::from_shape_vec((n, 4), flat)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(array.into_pyarray_bound(py))
    }
}

/// Converts geodetic colatitude (radians) and altitude (km) into
/// (geocentric colatitude, correction, radius).
#[pyfunction]
#[pyo3(name = "geodetic2geocentric")]
#[pyo3(text_signature = "(theta: float, alt: float, /)")]
fn geodetic_to_geocentric_py(theta: f64, alt: f64) -> (f64, f64, f64) {
    geodetic_to_geocentric(theta, alt)
}

/// IGRF-13 geomagnetic field synthesis.
#[pymodule]
fn igrfsyn(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyIgrf>()?;
    m.add_function(wrap_pyfunction!(geodetic_to_geocentric_py, m)?)?;
    Ok(())
}
