//! Tip-to-root accumulation.
//!
//! A cantilever carries everything outboard of a station, so shear, moment,
//! torque and the beam integrals all run from the free tip toward the root.
//! Every one of them goes through the functions here.

use super::spline::CubicSpline;
use crate::errors::WingBoxResult;

/// Boundary condition applied after a tip-to-root pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Value at the tip is zero (shear, moment, torque)
    FreeTip,
    /// Shift the profile so the root value is exactly zero (slope, deflection, twist)
    ClampedRoot,
}

impl Boundary {
    /// Apply the boundary condition to a raw tip-anchored profile.
    pub fn apply(self, mut values: Vec<f64>) -> Vec<f64> {
        let root = match (self, values.first()) {
            (Boundary::ClampedRoot, Some(&root)) => root,
            _ => return values,
        };
        for v in values.iter_mut() {
            *v -= root;
        }
        values
    }
}

/// Suffix sums: `out[i] = Σ_{j >= i} increments[j]`.
pub fn tip_to_root_sum(increments: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; increments.len()];
    let mut acc = 0.0;
    for (slot, inc) in out.iter_mut().zip(increments.iter()).rev() {
        acc += inc;
        *slot = acc;
    }
    out
}

/// Rectangle-rule tip-to-root integral of station values with spacing `step`.
pub fn tip_to_root_integral(integrand: &[f64], step: f64, boundary: Boundary) -> Vec<f64> {
    let increments: Vec<f64> = integrand.iter().map(|v| v * step).collect();
    boundary.apply(tip_to_root_sum(&increments))
}

/// Exact integral of a spline from each knot to the last knot.
///
/// `out[i] = ∫_{x_i}^{x_tip} s(x) dx`, accumulated segment by segment from the
/// tip, then passed through `boundary`.
pub fn tip_to_root_spline(spline: &CubicSpline, boundary: Boundary) -> WingBoxResult<Vec<f64>> {
    let segments = spline.segment_integrals()?;
    let mut raw = tip_to_root_sum(&segments);
    raw.push(0.0);
    Ok(boundary.apply(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_suffix_sum() {
        assert_eq!(tip_to_root_sum(&[1.0, 2.0, 3.0]), vec![6.0, 5.0, 3.0]);
        assert!(tip_to_root_sum(&[]).is_empty());
    }

    #[test]
    fn test_rectangle_integral_free_tip() {
        let out = tip_to_root_integral(&[1.0, 1.0, 1.0, 1.0], 0.5, Boundary::FreeTip);
        assert_eq!(out, vec![2.0, 1.5, 1.0, 0.5]);
    }

    #[test]
    fn test_clamped_root_is_exactly_zero() {
        let out = tip_to_root_integral(&[0.3, 1.7, 2.9, 4.1], 0.1, Boundary::ClampedRoot);
        assert_eq!(out[0], 0.0);
        assert!(out[3] < 0.0);
    }

    #[test]
    fn test_spline_integral_of_linear_function() {
        // f(x) = 2x on [0, 3]: ∫_{x_i}^{3} 2x dx = 9 - x_i²
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [0.0, 2.0, 4.0, 6.0];
        let spline = CubicSpline::new(&x, &y).unwrap();
        let raw = tip_to_root_spline(&spline, Boundary::FreeTip).unwrap();
        for (xi, r) in x.iter().zip(raw.iter()) {
            assert_abs_diff_eq!(*r, 9.0 - xi * xi, epsilon = 1e-12);
        }
        assert_eq!(raw[3], 0.0);

        let clamped = tip_to_root_spline(&spline, Boundary::ClampedRoot).unwrap();
        assert_eq!(clamped[0], 0.0);
        assert_abs_diff_eq!(clamped[2], -4.0, epsilon = 1e-12);

    }
}
