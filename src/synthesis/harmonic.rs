//! Spherical-harmonic synthesis with Schmidt quasi-normalized Legendre functions.
//!
//! Terms are visited in the same order the coefficients are serialized: degree by degree,
//! order 0 first. `k` is the 1-based linear index of `(n, m)` in that order, so `(0, 0)` is 1,
//! `(1, 0)` is 2 and `(1, 1)` is 3. The Legendre values of `(n, m)` live at `p[k - 1]`, their
//! colatitude derivatives at `q[k - 1]`.
use crate::coeffs::gauss::GaussCoefficients;
use crate::synthesis::field::MagneticField;
use crate::synthesis::geodetic::GeocentricPosition;
use crate::utils::constants::REFERENCE_RADIUS_KM;

/// Position of the walk over `(n, m)` pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
struct HarmonicIndex {
    n: usize,
    m: usize,
    k: usize,
}

impl HarmonicIndex {
    /// The walk starts one past `(0, 0)`, with `m` already beyond `n`.
    fn start() -> HarmonicIndex {
        HarmonicIndex { n: 0, m: 1, k: 2 }
    }

    /// Wraps to the zonal term of the next degree once the order passes the degree.
    /// Returns `true` when a new degree was entered.
    fn enter_degree(&mut self) -> bool {
        if self.n < self.m {
            self.m = 0;
            self.n += 1;
            true
        } else {
            false
        }
    }

    fn advance(&mut self) {
        self.m += 1;
        self.k += 1;
    }

    /// Linear index of `(n - 1, m)`.
    fn previous_degree(&self) -> usize {
        self.k - self.n
    }

    /// Linear index of `(n - 2, m)`. Only meaningful for `m <= n - 2`; otherwise the
    /// recursion weights it by zero.
    fn second_previous_degree(&self) -> usize {
        self.previous_degree() + 1 - self.n
    }

    /// Linear index of `(n - 1, m - 1)`.
    fn previous_sectoral(&self) -> usize {
        self.k - self.n - 1
    }
}

/// Sums the field of `coeffs` at `position`, east longitude in radians, and rotates it
/// back into the caller's frame.
pub fn synthesize_field(
    coeffs: &GaussCoefficients,
    position: &GeocentricPosition,
    longitude: f64,
) -> MagneticField {
    let max_degree = coeffs.max_degree();
    let kmax = (max_degree + 1) * (max_degree + 2) / 2;
    let ct = position.cos_colatitude;
    let st = position.sin_colatitude;

    let mut p = vec![0.0; kmax + 1];
    let mut q = vec![0.0; kmax + 1];
    let mut cl = vec![0.0; max_degree.max(1)];
    let mut sl = vec![0.0; max_degree.max(1)];
    p[0] = 1.0;
    p[2] = st;
    q[0] = 0.0;
    q[2] = ct;
    cl[0] = longitude.cos();
    sl[0] = longitude.sin();

    let ratio = REFERENCE_RADIUS_KM / position.radius;
    let mut rr = ratio * ratio;
    let mut x = 0.0;
    let mut y = 0.0;
    let mut z = 0.0;

    let mut idx = HarmonicIndex::start();
    while idx.k <= kmax {
        if idx.enter_degree() {
            rr *= ratio;
        }
        let HarmonicIndex { n, m, k } = idx;
        debug_assert!(m <= n && n <= max_degree && k <= kmax, "walk out of bounds: {idx:?}");
        let fn_ = n as f64;
        let gn = fn_ - 1.0;
        let fm = m as f64;

        if m != n {
            let gmm = fm * fm;
            let one = (fn_ * fn_ - gmm).sqrt();
            let two = (gn * gn - gmm).sqrt() / one;
            let three = (fn_ + gn) / one;
            let i = idx.previous_degree();
            let j = idx.second_previous_degree();
            p[k - 1] = three * ct * p[i - 1] - two * p[j - 1];
            q[k - 1] = three * (ct * q[i - 1] - st * p[i - 1]) - two * q[j - 1];
        } else if k != 3 {
            let one = (1.0 - 0.5 / fm).sqrt();
            let j = idx.previous_sectoral();
            p[k - 1] = one * st * p[j - 1];
            q[k - 1] = one * (st * q[j - 1] + ct * p[j - 1]);
            cl[m - 1] = cl[m - 2] * cl[0] - sl[m - 2] * sl[0];
            sl[m - 1] = sl[m - 2] * cl[0] + cl[m - 2] * sl[0];
        }

        let (g, h) = coeffs.term(n, m);
        let one = g * rr;
        if m == 0 {
            x += one * q[k - 1];
            z -= (fn_ + 1.0) * one * p[k - 1];
        } else {
            let two = h * rr;
            let three = one * cl[m - 1] + two * sl[m - 1];
            x += three * q[k - 1];
            z -= (fn_ + 1.0) * three * p[k - 1];
            // exact comparison: only a true pole takes the alternate east component
            if st == 0.0 {
                y += (one * sl[m - 1] - two * cl[m - 1]) * q[k - 1] * ct;
            } else {
                y += (one * sl[m - 1] - two * cl[m - 1]) * fm * p[k - 1] / st;
            }
        }
        idx.advance();
    }

    let cd = position.cos_rotation;
    let sd = position.sin_rotation;
    let x_geocentric = x;
    let x = x * cd + z * sd;
    let z = z * cd - x_geocentric * sd;
    MagneticField::from_components(x, y, z)
}
