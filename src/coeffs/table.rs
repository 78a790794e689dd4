//! Flat table of historical Gauss coefficients.
use crate::error::IgrfError;
use crate::utils::constants::{DEGREE_10_BLOCK, DEGREE_10_EPOCHS};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

type Result<T> = std::result::Result<T, IgrfError>;

/// Immutable, column-major sequence of every published coefficient, epoch after epoch,
/// followed by a single `0.0` sentinel. Clones share the same storage.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientTable {
    values: Arc<[f64]>,
}

impl CoefficientTable {
    /// Builds a table from an already flattened coefficient sequence. The trailing sentinel
    /// is appended here and must not be part of `values`.
    pub fn from_values(mut values: Vec<f64>) -> CoefficientTable {
        values.push(0.0);
        CoefficientTable {
            values: values.into(),
        }
    }

    /// Loads a table from an IGRF coefficient file such as `igrf13coeffs.txt`.
    ///
    /// # Errors
    /// Will return `Err` if the file cannot be read or does not hold a rectangular block of
    /// `g`/`h` coefficient rows.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<CoefficientTable> {
        let file = File::open(path)?;
        CoefficientTable::from_reader(file)
    }

    /// Loads a table from any source of IGRF coefficient text.
    ///
    /// # Errors
    /// See [`CoefficientTable::from_path`].
    pub fn from_reader<R: Read>(reader: R) -> Result<CoefficientTable> {
        let mut rows: Vec<Vec<f64>> = vec![];
        for (i, line) in BufReader::new(reader).lines().enumerate() {
            if let Some(row) = parse_line(&line?, i + 1)? {
                rows.push(row);
            }
        }
        CoefficientTable::from_rows(rows)
    }

    /// Parses IGRF coefficient text held in memory.
    ///
    /// # Errors
    /// See [`CoefficientTable::from_path`].
    pub fn parse_str(text: &str) -> Result<CoefficientTable> {
        let mut rows: Vec<Vec<f64>> = vec![];
        for (i, line) in text.lines().enumerate() {
            if let Some(row) = parse_line(line, i + 1)? {
                rows.push(row);
            }
        }
        CoefficientTable::from_rows(rows)
    }

    /// Transposes per-coefficient time series into per-epoch blocks. The 19 degree-10
    /// epochs keep only their first 120 values, the zero padding of degrees 11-13 is dropped.
    fn from_rows(rows: Vec<Vec<f64>>) -> Result<CoefficientTable> {
        let num_epochs = match rows.first() {
            Some(r) => r.len(),
            None => Err(IgrfError::MalformedTable(
                "No g/h coefficient lines found".to_string(),
            ))?,
        };
        if let Some(pos) = rows.iter().position(|r| r.len() != num_epochs) {
            Err(IgrfError::MalformedTable(format!(
                "Coefficient row {} has {} epochs, expected {}",
                pos + 1,
                rows[pos].len(),
                num_epochs
            )))?
        }

        let mut values = Vec::with_capacity(rows.len() * num_epochs + 1);
        for epoch in 0..num_epochs {
            let stop = if epoch < DEGREE_10_EPOCHS {
                DEGREE_10_BLOCK.min(rows.len())
            } else {
                rows.len()
            };
            values.extend(rows[..stop].iter().map(|r| r[epoch]));
        }
        debug!(
            rows = rows.len(),
            epochs = num_epochs,
            values = values.len(),
            "loaded coefficient table"
        );
        Ok(CoefficientTable::from_values(values))
    }

    /// Number of stored values, sentinel included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Bounds-checked read.
    pub fn get(&self, index: usize) -> Result<f64> {
        self.values
            .get(index)
            .copied()
            .ok_or(IgrfError::TableTooShort {
                index,
                len: self.values.len(),
            })
    }
}

/// Returns the coefficient series on a `g `/`h ` line, or `None` for any other line.
fn parse_line(line: &str, line_num: usize) -> Result<Option<Vec<f64>>> {
    if !(line.starts_with("g ") || line.starts_with("h ")) {
        return Ok(None);
    }
    let row = line
        .split_whitespace()
        .skip(3)
        .map(|token| {
            token.parse::<f64>().map_err(|e| IgrfError::Parse {
                line: line_num,
                message: format!("Unable to read coefficient '{token}': {e}"),
            })
        })
        .collect::<Result<Vec<f64>>>()?;
    Ok(Some(row))
}
