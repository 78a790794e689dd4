use thiserror::Error;

/// Enum of the possible error variants that may be encountered
#[derive(Error, Debug)]
pub enum IgrfError {
    /// The requested decimal year is outside of the model's span
    #[error("Will not work with a date of {0}. Date must be in the range 1900.0 <= year <= 2030.0")]
    YearOutOfRange(f64),

    /// Legacy coordinate flag other than 1 (geodetic) or 2 (geocentric)
    #[error("Invalid coordinate system {0}, expected 1 (geodetic) or 2 (geocentric)")]
    InvalidCoordinateSystem(i32),

    /// The point resolves to a geocentric radius that is not a positive number of km
    #[error("Invalid geocentric radius {0} km, must be positive")]
    InvalidRadius(f64),

    /// Unable to read the coefficient file
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// A coefficient line could not be parsed
    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The coefficient file parsed, but does not describe a usable table
    #[error("{0}")]
    MalformedTable(String),

    /// The table ends before the coefficients needed for the requested epoch
    #[error("Coefficient index {index} is out of bounds for a table of length {len}")]
    TableTooShort { index: usize, len: usize },
}

#[cfg(feature = "python")]
impl From<IgrfError> for pyo3::PyErr {
    fn from(value: IgrfError) -> Self {
        let msg = value.to_string();
        pyo3::exceptions::PyValueError::new_err(msg)
    }
}
