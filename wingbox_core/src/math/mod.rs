//! # Numerics
//!
//! Interpolation and integration along the span.
//!
//! - [`spline`] - not-a-knot cubic spline through station samples
//! - [`integrate`] - tip-to-root accumulation shared by the load and beam passes

pub mod integrate;
pub mod spline;

pub use integrate::{tip_to_root_integral, tip_to_root_spline, tip_to_root_sum, Boundary};
pub use spline::CubicSpline;

/// Round to a fixed number of decimals (used to reproduce legacy load tables).
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}
