use crate::coeffs::epoch::EpochParameters;
use crate::coeffs::table::CoefficientTable;
use crate::error::IgrfError;

type Result<T> = std::result::Result<T, IgrfError>;

/// Reads blended coefficients from the table in serialization order. The degree-0 slot
/// has no storage, so the walk begins directly at the epoch's base offset.
struct TableCursor<'a> {
    table: &'a CoefficientTable,
    epoch: &'a EpochParameters,
    position: usize,
}

impl<'a> TableCursor<'a> {
    fn new(table: &'a CoefficientTable, epoch: &'a EpochParameters) -> TableCursor<'a> {
        TableCursor {
            table,
            epoch,
            position: epoch.base_offset,
        }
    }

    /// Blends the current entry with its counterpart one block later and advances.
    fn next_blended(&mut self) -> Result<f64> {
        let current = self.table.get(self.position)?;
        let next = self.table.get(self.position + self.epoch.block_size)?;
        self.position += 1;
        Ok(self.epoch.complement_fraction * current + self.epoch.time_fraction * next)
    }
}

/// Gauss coefficients of the main field at one instant, indexed by degree and order.
/// `g[0][0]` and the zonal `h[n][0]` terms do not exist; their slots hold `0.0` and the
/// public accessors report them as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussCoefficients {
    max_degree: usize,
    g: Vec<Vec<f64>>,
    h: Vec<Vec<f64>>,
}

impl GaussCoefficients {
    /// Interpolates (or extrapolates) the coefficients for an epoch out of the flat table.
    ///
    /// # Errors
    /// Will return `Err` if the table is too short for the requested epoch.
    pub fn synthesize(
        epoch: &EpochParameters,
        table: &CoefficientTable,
    ) -> Result<GaussCoefficients> {
        let mut cursor = TableCursor::new(table, epoch);
        let mut g = Vec::with_capacity(epoch.max_degree + 1);
        let mut h = Vec::with_capacity(epoch.max_degree + 1);
        g.push(vec![0.0]);
        h.push(vec![0.0]);

        for n in 1..=epoch.max_degree {
            let mut g_n = Vec::with_capacity(n + 1);
            let mut h_n = Vec::with_capacity(n + 1);
            // zonal term first, then a (g, h) pair per order
            g_n.push(cursor.next_blended()?);
            h_n.push(0.0);
            for _ in 1..=n {
                g_n.push(cursor.next_blended()?);
                h_n.push(cursor.next_blended()?);
            }
            g.push(g_n);
            h.push(h_n);
        }
        debug_assert_eq!(
            cursor.position,
            epoch.base_offset + epoch.block_size,
            "coefficient walk must consume exactly one block"
        );

        Ok(GaussCoefficients {
            max_degree: epoch.max_degree,
            g,
            h,
        })
    }

    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    /// Number of degrees held, including degree 0.
    pub fn num_degrees(&self) -> usize {
        self.max_degree + 1
    }

    /// `g(n, m)`, or `None` for `g(0, 0)` and orders outside the model.
    pub fn g(&self, n: usize, m: usize) -> Option<f64> {
        if n == 0 {
            return None;
        }
        self.g.get(n).and_then(|row| row.get(m)).copied()
    }

    /// `h(n, m)`, or `None` for the zonal `m == 0` terms and orders outside the model.
    pub fn h(&self, n: usize, m: usize) -> Option<f64> {
        if m == 0 {
            return None;
        }
        self.h.get(n).and_then(|row| row.get(m)).copied()
    }

    /// `(g, h)` of a term the synthesis walk visits, `1 <= n <= max_degree`, `m <= n`.
    /// The zonal `h` reads as `0.0`.
    pub(crate) fn term(&self, n: usize, m: usize) -> (f64, f64) {
        (self.g[n][m], self.h[n][m])
    }
}
