//! # Cantilever Beam Response
//!
//! Slope, deflection and twist of the clamped-free wing box from its internal
//! moment and torque.
//!
//! ## Method
//!
//! Curvature κ = M/(E·I) and twist rate ϑ = T/(G·J) are known at the
//! stations. Each is interpolated with a not-a-knot cubic spline and
//! integrated exactly per segment from every station to the tip; the root
//! value is then subtracted so the clamped root stays at zero:
//!
//! - slope θ(y) = ∫ᵧᴸ κ − ∫₀ᴸ κ = −∫₀ʸ κ
//! - deflection v(y) = −∫₀ʸ θ
//! - twist φ(y) = −∫₀ʸ ϑ
//!
//! With the load sign convention of [`crate::loads::internal`], a lifting wing
//! has negative M, positive slope and negative v. Root values are exactly
//! zero.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{WingBoxError, WingBoxResult};
use crate::materials::Material;
use crate::math::{tip_to_root_spline, Boundary, CubicSpline};

/// Slope, deflection and twist at every station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamResponse {
    /// Bending curvature M/(EI) (1/m)
    pub curvature_per_m: Vec<f64>,
    /// Twist rate T/(GJ) (rad/m)
    pub twist_rate_rad_per_m: Vec<f64>,
    /// Bending slope dv/dy (rad)
    pub slope_rad: Vec<f64>,
    /// Vertical deflection, positive with the loads (down) (m)
    pub deflection_m: Vec<f64>,
    /// Torsional twist (rad)
    pub twist_rad: Vec<f64>,
}

impl BeamResponse {
    /// Integrate moment and torque over stations at `y_m`.
    ///
    /// # Errors
    ///
    /// [`WingBoxError::LengthMismatch`] if any array differs in length from
    /// `y_m`, [`WingBoxError::NumericDegeneracy`] if a curvature or twist rate
    /// is not finite.
    pub fn solve(
        y_m: &[f64],
        bending_moment_nm: &[f64],
        moment_of_inertia_m4: &[f64],
        torque_nm: &[f64],
        torsional_constant_m4: &[f64],
        material: &Material,
    ) -> WingBoxResult<Self> {
        let n = y_m.len();
        for (field, len) in [
            ("bending_moment_nm", bending_moment_nm.len()),
            ("moment_of_inertia_m4", moment_of_inertia_m4.len()),
            ("torque_nm", torque_nm.len()),
            ("torsional_constant_m4", torsional_constant_m4.len()),
        ] {
            if len != n {
                return Err(WingBoxError::length_mismatch(field, n, len));
            }
        }

        let curvature = ratio_per_station(
            "curvature",
            bending_moment_nm,
            moment_of_inertia_m4,
            |i| material.bending_stiffness(i),
        )?;
        let twist_rate = ratio_per_station(
            "twist_rate",
            torque_nm,
            torsional_constant_m4,
            |j| material.torsional_stiffness(j),
        )?;

        let clamped = |values: &[f64]| -> WingBoxResult<Vec<f64>> {
            tip_to_root_spline(&CubicSpline::new(y_m, values)?, Boundary::ClampedRoot)
        };
        let slope = clamped(&curvature)?;
        let deflection = clamped(&slope)?;
        let twist = clamped(&twist_rate)?;

        debug!(
            "beam response: tip slope {:.5} rad, tip deflection {:.4} m, tip twist {:.5} rad",
            slope[n - 1],
            deflection[n - 1],
            twist[n - 1]
        );

        Ok(BeamResponse {
            curvature_per_m: curvature,
            twist_rate_rad_per_m: twist_rate,
            slope_rad: slope,
            deflection_m: deflection,
            twist_rad: twist,
        })
    }

    /// Largest deflection magnitude (m)
    pub fn max_deflection_m(&self) -> f64 {
        max_abs(&self.deflection_m)
    }

    /// Largest twist magnitude (rad)
    pub fn max_twist_rad(&self) -> f64 {
        max_abs(&self.twist_rad)
    }

    /// Deflection at the tip (m)
    pub fn tip_deflection_m(&self) -> f64 {
        self.deflection_m.last().copied().unwrap_or(0.0)
    }
}

/// `load / stiffness(property)` at every station.
fn ratio_per_station(
    quantity: &str,
    load: &[f64],
    property: &[f64],
    stiffness: impl Fn(f64) -> f64,
) -> WingBoxResult<Vec<f64>> {
    load.iter()
        .zip(property.iter())
        .enumerate()
        .map(|(station, (&l, &p))| {
            let value = l / stiffness(p);
            if value.is_finite() {
                Ok(value)
            } else {
                Err(WingBoxError::numeric_degeneracy(quantity, station, value))
            }
        })
        .collect()
}

fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc.max(v.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn stations(n: usize, length: f64) -> Vec<f64> {
        (0..n).map(|i| length * i as f64 / (n - 1) as f64).collect()
    }

    fn unit_material() -> Material {
        Material::new("unit", 1.0, 1.0, 1.0)
    }

    #[test]
    fn test_constant_curvature_gives_parabola() {
        let y = stations(9, 4.0);
        let n = y.len();
        // M = -2 (lifting), EI = 1: θ = 2y, v = -y²
        let response = BeamResponse::solve(
            &y,
            &vec![-2.0; n],
            &vec![1.0; n],
            &vec![0.0; n],
            &vec![1.0; n],
            &unit_material(),
        )
        .unwrap();

        for (i, yi) in y.iter().enumerate() {
            assert_relative_eq!(response.slope_rad[i], 2.0 * yi, epsilon = 1e-9);
            assert_relative_eq!(response.deflection_m[i], -yi * yi, epsilon = 1e-9);
        }
        assert_relative_eq!(response.max_deflection_m(), 16.0, epsilon = 1e-9);
        assert_eq!(response.tip_deflection_m(), response.deflection_m[n - 1]);
    }

    #[test]
    fn test_tip_load_matches_cantilever_formula() {
        // Tip load P on a uniform cantilever: M(y) = -P(L - y) for upward P.
        let length = 3.0;
        let y = stations(31, length);
        let n = y.len();
        let p = 10.0;
        let ei = 200.0;
        let moment: Vec<f64> = y.iter().map(|yi| -p * (length - yi)).collect();
        let material = Material::new("test", ei, 1.0, 1.0);

        let response = BeamResponse::solve(
            &y,
            &moment,
            &vec![1.0; n],
            &vec![0.0; n],
            &vec![1.0; n],
            &material,
        )
        .unwrap();

        // |δ| = P L³ / 3EI, against the load direction
        assert_relative_eq!(
            response.tip_deflection_m(),
            -p * length.powi(3) / (3.0 * ei),
            max_relative = 1e-10
        );
    }

    #[test]
    fn test_constant_torque_gives_linear_twist() {
        let y = stations(6, 5.0);
        let n = y.len();
        let material = Material::new("test", 1.0, 4.0, 1.0);
        let response = BeamResponse::solve(
            &y,
            &vec![0.0; n],
            &vec![1.0; n],
            &vec![8.0; n],
            &vec![0.5; n],
            &material,
        )
        .unwrap();
        // ϑ = 8 / (4 · 0.5) = 4 rad/m, φ = -4y
        assert_relative_eq!(response.twist_rad[n - 1], -20.0, epsilon = 1e-9);
        assert_relative_eq!(response.max_twist_rad(), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_each_pass_is_a_clamped_tip_to_root_integral() {
        let y = stations(6, 5.0);
        let n = y.len();
        let response = BeamResponse::solve(
            &y,
            &vec![-2.0; n],
            &vec![1.0; n],
            &vec![4.0; n],
            &vec![1.0; n],
            &unit_material(),
        )
        .unwrap();

        let pass = |values: &[f64]| {
            tip_to_root_spline(&CubicSpline::new(&y, values).unwrap(), Boundary::ClampedRoot)
                .unwrap()
        };
        let slope = pass(&vec![-2.0; n]);
        let deflection = pass(&slope);
        let twist = pass(&vec![4.0; n]);

        assert_eq!(response.slope_rad, slope);
        assert_eq!(response.deflection_m, deflection);
        assert_eq!(response.twist_rad, twist);
        assert_relative_eq!(response.tip_deflection_m(), -25.0, epsilon = 1e-9);
        assert_relative_eq!(response.twist_rad[n - 1], -20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_root_values_are_exactly_zero() {
        let y = stations(12, 2.0);
        let moment: Vec<f64> = y.iter().map(|v| (v * 1.3).sin() - 0.4).collect();
        let torque: Vec<f64> = y.iter().map(|v| v.cos()).collect();
        let stiff: Vec<f64> = y.iter().map(|v| 1.0 + v).collect();
        let response =
            BeamResponse::solve(&y, &moment, &stiff, &torque, &stiff, &unit_material()).unwrap();
        assert_eq!(response.slope_rad[0], 0.0);
        assert_eq!(response.deflection_m[0], 0.0);
        assert_eq!(response.twist_rad[0], 0.0);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let y = stations(5, 1.0);
        let err = BeamResponse::solve(
            &y,
            &[0.0; 4],
            &[1.0; 5],
            &[0.0; 5],
            &[1.0; 5],
            &unit_material(),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "LENGTH_MISMATCH");
    }
}
