//! Not-a-knot cubic spline.
//!
//! The third derivative is continuous across the second and the second-to-last
//! knots, so four samples of a cubic reproduce that cubic exactly. Outside the
//! sampled range the end polynomials are continued and a warning is logged.

use gauss_quad::GaussLegendre;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::{WingBoxError, WingBoxResult};

/// Gauss-Legendre points per segment; three points integrate a cubic exactly.
const QUADRATURE_ORDER: usize = 3;

/// Relative slack before an evaluation counts as extrapolation
const RANGE_TOLERANCE: f64 = 1e-9;

/// Interpolating cubic spline over strictly increasing abscissae.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    /// Second derivative at each knot
    m: Vec<f64>,
}

impl CubicSpline {
    /// Fit a not-a-knot spline through `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`WingBoxError::LengthMismatch`] when the arrays differ in length,
    /// [`WingBoxError::InvalidInput`] for fewer than four points, non-finite
    /// values or abscissae that are not strictly increasing.
    pub fn new(x: &[f64], y: &[f64]) -> WingBoxResult<Self> {
        if x.len() != y.len() {
            return Err(WingBoxError::length_mismatch("spline.y", x.len(), y.len()));
        }
        let n = x.len();
        if n < 4 {
            return Err(WingBoxError::invalid_input(
                "spline.x",
                n.to_string(),
                "A cubic spline needs at least 4 points",
            ));
        }
        if let Some(i) = x.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(WingBoxError::invalid_input(
                "spline.x",
                format!("{} -> {}", x[i], x[i + 1]),
                "Abscissae must be strictly increasing",
            ));
        }
        if let Some(i) = y.iter().position(|v| !v.is_finite()) {
            return Err(WingBoxError::invalid_input(
                "spline.y",
                y[i].to_string(),
                format!("Sample {i} is not finite"),
            ));
        }

        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
        let slope: Vec<f64> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();

        // Unknowns M_1..M_{n-2}; M_0 and M_{n-1} are eliminated by the
        // not-a-knot conditions, which keeps the system tridiagonal.
        let k = n - 2;
        let mut sub = vec![0.0; k];
        let mut diag = vec![0.0; k];
        let mut sup = vec![0.0; k];
        let mut rhs = vec![0.0; k];
        for r in 0..k {
            let i = r + 1;
            sub[r] = h[i - 1];
            diag[r] = 2.0 * (h[i - 1] + h[i]);
            sup[r] = h[i];
            rhs[r] = 6.0 * (slope[i] - slope[i - 1]);
        }

        let (h0, h1) = (h[0], h[1]);
        diag[0] = 3.0 * h0 + 2.0 * h1 + h0 * h0 / h1;
        sup[0] = h1 - h0 * h0 / h1;

        let (a, b) = (h[n - 3], h[n - 2]);
        sub[k - 1] = a - b * b / a;
        diag[k - 1] = 2.0 * a + 3.0 * b + b * b / a;

        let interior = solve_tridiagonal(&sub, &diag, &sup, &rhs)?;

        let mut m = Vec::with_capacity(n);
        m.push(interior[0] + h0 / h1 * (interior[0] - interior[1]));
        m.extend_from_slice(&interior);
        m.push(interior[k - 1] + b / a * (interior[k - 1] - interior[k - 2]));

        Ok(CubicSpline {
            x: x.to_vec(),
            y: y.to_vec(),
            m,
        })
    }

    /// Sampled abscissae
    pub fn knots(&self) -> &[f64] {
        &self.x
    }

    /// Sampled ordinates
    pub fn values(&self) -> &[f64] {
        &self.y
    }

    /// Whether `x` lies inside the sampled range
    pub fn contains(&self, x: f64) -> bool {
        let lo = self.x[0];
        let hi = self.x[self.x.len() - 1];
        let slack = RANGE_TOLERANCE * (hi - lo);
        x >= lo - slack && x <= hi + slack
    }

    /// Segment index for `x`, clamped to the end segments.
    fn segment(&self, x: f64) -> usize {
        let last = self.x.len() - 2;
        self.x.partition_point(|&xi| xi <= x).saturating_sub(1).min(last)
    }

    /// Evaluate the spline at `x`.
    ///
    /// Outside the sampled range the end polynomial is continued; the result
    /// is not guaranteed accurate there and a warning is logged.
    pub fn evaluate(&self, x: f64) -> f64 {
        if !self.contains(x) {
            warn!(
                "spline evaluated at {x} outside sampled range [{}, {}]; extrapolating",
                self.x[0],
                self.x[self.x.len() - 1]
            );
        }
        self.evaluate_in_segment(self.segment(x), x)
    }

    fn evaluate_in_segment(&self, i: usize, x: f64) -> f64 {
        let h = self.x[i + 1] - self.x[i];
        let t0 = x - self.x[i];
        let t1 = self.x[i + 1] - x;
        self.m[i] * t1.powi(3) / (6.0 * h)
            + self.m[i + 1] * t0.powi(3) / (6.0 * h)
            + (self.y[i] / h - self.m[i] * h / 6.0) * t1
            + (self.y[i + 1] / h - self.m[i + 1] * h / 6.0) * t0
    }

    /// Closed-form integral of segment `i` (between knots `i` and `i + 1`).
    pub fn segment_integral_exact(&self, i: usize) -> f64 {
        let h = self.x[i + 1] - self.x[i];
        h * (self.y[i] + self.y[i + 1]) / 2.0 - h.powi(3) * (self.m[i] + self.m[i + 1]) / 24.0
    }

    /// Integral over every segment by Gauss-Legendre quadrature, root to tip.
    pub fn segment_integrals(&self) -> WingBoxResult<Vec<f64>> {
        let rule = gauss_rule()?;
        Ok((0..self.x.len() - 1)
            .map(|i| {
                rule.integrate(self.x[i], self.x[i + 1], |x| {
                    self.evaluate_in_segment(i, x)
                })
            })
            .collect())
    }

    /// Integral of the spline from `a` to `b`.
    pub fn integrate(&self, a: f64, b: f64) -> WingBoxResult<f64> {
        if a == b {
            return Ok(0.0);
        }
        if b < a {
            return self.integrate(b, a).map(|v| -v);
        }
        if !self.contains(a) || !self.contains(b) {
            warn!(
                "spline integrated over [{a}, {b}] beyond sampled range [{}, {}]",
                self.x[0],
                self.x[self.x.len() - 1]
            );
        }
        let rule = gauss_rule()?;
        let first = self.segment(a);
        let last = self.segment(b);
        let mut total = 0.0;
        for i in first..=last {
            let lo = if i == first { a } else { self.x[i] };
            let hi = if i == last { b } else { self.x[i + 1] };
            if hi > lo {
                total += rule.integrate(lo, hi, |x| self.evaluate_in_segment(i, x));
            }
        }
        Ok(total)
    }
}

fn gauss_rule() -> WingBoxResult<GaussLegendre> {
    GaussLegendre::new(QUADRATURE_ORDER)
        .map_err(|e| WingBoxError::internal(format!("Gauss-Legendre rule: {e:?}")))
}

/// Thomas algorithm for a tridiagonal system.
fn solve_tridiagonal(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    rhs: &[f64],
) -> WingBoxResult<Vec<f64>> {
    let n = diag.len();
    let mut c = vec![0.0; n];
    let mut d = vec![0.0; n];

    let mut pivot = diag[0];
    if pivot == 0.0 {
        return Err(WingBoxError::internal("Singular spline system"));
    }
    c[0] = sup[0] / pivot;
    d[0] = rhs[0] / pivot;
    for i in 1..n {
        pivot = diag[i] - sub[i] * c[i - 1];
        if pivot == 0.0 || !pivot.is_finite() {
            return Err(WingBoxError::internal("Singular spline system"));
        }
        c[i] = sup[i] / pivot;
        d[i] = (rhs[i] - sub[i] * d[i - 1]) / pivot;
    }

    let mut out = vec![0.0; n];
    out[n - 1] = d[n - 1];
    for i in (0..n - 1).rev() {
        out[i] = d[i] - c[i] * out[i + 1];
    }
    Ok(out)
}
