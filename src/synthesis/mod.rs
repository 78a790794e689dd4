//! Evaluation of the field from a set of Gauss coefficients.
pub mod field;
pub mod geodetic;
pub mod harmonic;
