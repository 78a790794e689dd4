use crate::error::IgrfError;
use crate::utils::constants::{
    DEGREE_10_BLOCK, DEGREE_10_EPOCHS, DEGREE_13_BLOCK, DEGREE_13_START, FINAL_EPOCH, FINAL_EPOCH_OFFSET,
    FIRST_YEAR, LAST_YEAR, RECOMMENDED_LAST_YEAR,
};
use tracing::warn;

type Result<T> = std::result::Result<T, IgrfError>;

/// Where in the coefficient table a year's models live, and how to blend them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochParameters {
    pub max_degree: usize,        // nmx in igrf13syn
    pub base_offset: usize,       // ll in igrf13syn
    pub block_size: usize,        // nc in igrf13syn
    pub time_fraction: f64,       // t in igrf13syn
    pub complement_fraction: f64, // tc in igrf13syn
}

impl EpochParameters {
    /// Resolves the interpolation (or, past 2020, extrapolation) parameters for `year`.
    ///
    /// # Errors
    /// Will return `Err` if `year` is outside 1900.0 ..= 2030.0.
    pub fn resolve(year: f64) -> Result<EpochParameters> {
        if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
            Err(IgrfError::YearOutOfRange(year))?
        }
        if year > RECOMMENDED_LAST_YEAR {
            warn!(
                year,
                "This version of the IGRF is intended for use up to {RECOMMENDED_LAST_YEAR}. \
                 Values will be computed but may be of reduced accuracy"
            );
        }

        if year >= FINAL_EPOCH {
            // main field plus secular variation times years since the last epoch
            return Ok(EpochParameters::with_degree(
                13,
                FINAL_EPOCH_OFFSET,
                year - FINAL_EPOCH,
                1.0,
            ));
        }

        let t = 0.2 * (year - FIRST_YEAR);
        let epoch_index = t as usize;
        let time_fraction = t - epoch_index as f64;
        let complement_fraction = 1.0 - time_fraction;

        if year < DEGREE_13_START {
            // models before 1995.0 only extend to degree 10
            Ok(EpochParameters::with_degree(
                10,
                DEGREE_10_BLOCK * epoch_index,
                time_fraction,
                complement_fraction,
            ))
        } else {
            let epoch_index = (0.2 * (year - DEGREE_13_START)) as usize;
            Ok(EpochParameters::with_degree(
                13,
                DEGREE_10_BLOCK * DEGREE_10_EPOCHS + DEGREE_13_BLOCK * epoch_index,
                time_fraction,
                complement_fraction,
            ))
        }
    }

    fn with_degree(
        max_degree: usize,
        base_offset: usize,
        time_fraction: f64,
        complement_fraction: f64,
    ) -> EpochParameters {
        EpochParameters {
            max_degree,
            base_offset,
            block_size: max_degree * (max_degree + 2),
            time_fraction,
            complement_fraction,
        }
    }
}
