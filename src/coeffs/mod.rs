//! Coefficient storage and time interpolation.
pub mod epoch;
pub mod gauss;
pub mod table;
