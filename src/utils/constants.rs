/// Conventional IGRF reference radius, km. Not the mean Earth radius (6371.0 km).
pub const REFERENCE_RADIUS_KM: f64 = 6371.2;

/// WGS84 semi-major axis squared, km^2
pub const WGS84_A2: f64 = 40_680_631.6;
/// WGS84 semi-minor axis squared, km^2
pub const WGS84_B2: f64 = 40_408_296.0;

pub const FIRST_YEAR: f64 = 1900.0;
pub const LAST_YEAR: f64 = 2030.0;
/// End of the publication window; later years are extrapolated with reduced accuracy
pub const RECOMMENDED_LAST_YEAR: f64 = 2025.0;

/// First year of the degree-13 main-field models
pub const DEGREE_13_START: f64 = 1995.0;
/// Last main-field epoch, extrapolated forward with secular variation
pub const FINAL_EPOCH: f64 = 2020.0;

/// Number of five-yearly models limited to degree 10 (1900 - 1990)
pub const DEGREE_10_EPOCHS: usize = 19;
/// Coefficients per degree-10 model
pub const DEGREE_10_BLOCK: usize = 120;
/// Coefficients per degree-13 model
pub const DEGREE_13_BLOCK: usize = 195;
/// Pointer to the first coefficient of the final main-field model
pub const FINAL_EPOCH_OFFSET: usize = 3060 + DEGREE_13_BLOCK;

pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;
