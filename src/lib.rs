//! The International Geomagnetic Reference Field (IGRF-13).
//!
//! Computes the main geomagnetic field between 1900.0 and 2030.0 from a table of published
//! Gauss coefficients:
//!
//! ```no_run
//! use igrfsyn::{CoordinateSystem, Igrf};
//!
//! let model = Igrf::from_path("igrf13coeffs.txt")?;
//! let field = model.synthesize(1999.0, CoordinateSystem::Geodetic, 300.0, 40.0, 116.0)?;
//! println!("X {} Y {} Z {} F {}", field.x, field.y, field.z, field.f);
//! # Ok::<(), igrfsyn::error::IgrfError>(())
//! ```
pub mod coeffs;
pub mod elements;
pub mod error;
pub mod igrf;
#[cfg(feature = "python")]
mod python;
pub mod synthesis;
pub mod utils;

pub use crate::coeffs::table::CoefficientTable;
pub use crate::elements::{GeomagneticElements, GeomagneticVariation};
pub use crate::igrf::{CoordinateSystem, Igrf, SpatialPoint};
pub use crate::synthesis::field::MagneticField;
