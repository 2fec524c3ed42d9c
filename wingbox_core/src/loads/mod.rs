//! # Load Case
//!
//! External loading of the half wing: the spanwise aerodynamic lift and
//! pitching-moment tables, the manoeuvre load factor, structural self-weight,
//! a concentrated point load and the engine mount.
//!
//! # Overview
//!
//! - [`LoadCase`] - lift and pitching-moment tables plus everything applied on top
//! - [`FlightCondition`] - load factor and flight speed
//! - [`LoadModel`] - self-weight coefficient, lift moment arm, legacy rounding
//! - [`PointLoad`] - single concentrated vertical load
//! - [`EngineMount`] - engine thrust and weight, smeared into a torque window
//! - [`internal`] - shear, bending moment and torque from a load case
//!
//! The lift and pitching-moment tables are sampled at equally spaced stations
//! from root to tip; their length fixes the station count of the whole run.
//!
//! # Example
//!
//! ```
//! use wingbox_core::loads::{LoadCase, PointLoad};
//!
//! let lift = vec![1000.0; 20];
//! let pitching = vec![0.0; 20];
//! let mut case = LoadCase::new(lift, pitching);
//! case.point_load = PointLoad::none();
//!
//! assert_eq!(case.station_count(), 20);
//! assert!(case.validate().is_ok());
//! ```

pub mod internal;

pub use internal::InternalLoads;

use serde::{Deserialize, Serialize};

use crate::errors::{require_fraction, require_positive, WingBoxError, WingBoxResult};
use crate::geometry::MIN_STATIONS;

/// Standard gravity (m/s²)
pub const GRAVITY_M_S2: f64 = 9.81;

/// Load factor and flight speed of the design point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightCondition {
    /// Manoeuvre load factor n applied to the lift table
    pub load_factor: f64,
    /// True airspeed of the design point (m/s)
    pub flight_speed_m_s: f64,
}

impl Default for FlightCondition {
    fn default() -> Self {
        FlightCondition {
            load_factor: 3.75,
            flight_speed_m_s: 228.31,
        }
    }
}

/// How the distributed loads are built from the tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadModel {
    /// Self-weight per unit span per metre of chord (N/m²); w(y) = k·c(y)
    pub self_weight_per_chord_n_per_m2: f64,
    /// Chordwise lever arm of the lift about the box, as a chord fraction
    pub lift_arm_chord_fraction: f64,
    /// Round distributed terms to this many decimals before accumulating
    #[serde(default)]
    pub rounding_decimals: Option<u32>,
}

impl Default for LoadModel {
    fn default() -> Self {
        LoadModel {
            self_weight_per_chord_n_per_m2: 391.2366,
            lift_arm_chord_fraction: 0.15,
            rounding_decimals: None,
        }
    }
}

/// Concentrated vertical load, positive downward (N).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLoad {
    /// Spanwise fraction of the half span
    pub span_fraction: f64,
    /// Magnitude (N), positive acting with gravity
    pub magnitude_n: f64,
}

impl PointLoad {
    /// No point load
    pub fn none() -> Self {
        PointLoad {
            span_fraction: 0.0,
            magnitude_n: 0.0,
        }
    }
}

impl Default for PointLoad {
    fn default() -> Self {
        PointLoad {
            span_fraction: 0.35,
            magnitude_n: 20267.0,
        }
    }
}

/// Wing-mounted engine.
///
/// Thrust acts below the box and the engine weight forward of it; together
/// they give a concentrated torque τ = T·k_T·z − W·x, spread over a window
/// of stations around the mount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineMount {
    /// Maximum thrust (N)
    pub thrust_n: f64,
    /// Fraction of maximum thrust at the design point
    pub thrust_factor: f64,
    /// Installed engine weight (N)
    pub weight_n: f64,
    /// Vertical offset of the thrust line from the box (m)
    pub vertical_offset_m: f64,
    /// Horizontal offset of the engine centre of gravity ahead of the lift line (m)
    pub horizontal_offset_m: f64,
    /// Spanwise fraction of the half span
    pub span_fraction: f64,
    /// Half width of the torque window, as a fraction of the station count
    pub window_half_width_fraction: f64,
}

impl EngineMount {
    /// No engine
    pub fn none() -> Self {
        EngineMount {
            thrust_n: 0.0,
            weight_n: 0.0,
            ..EngineMount::default()
        }
    }

    /// Concentrated engine torque (N·m) for the local chord at the mount.
    pub fn torque_nm(&self, chord_at_mount_m: f64, lift_arm_chord_fraction: f64) -> f64 {
        let lever = self.horizontal_offset_m + lift_arm_chord_fraction * chord_at_mount_m;
        self.thrust_n * self.thrust_factor * self.vertical_offset_m - self.weight_n * lever
    }
}

impl Default for EngineMount {
    fn default() -> Self {
        EngineMount {
            thrust_n: 21244.0,
            thrust_factor: 0.8765588,
            // engine plus half the pylon mass
            weight_n: (2066.0 + 872.57 / 2.0) * GRAVITY_M_S2,
            vertical_offset_m: 0.7149,
            horizontal_offset_m: 0.4661,
            span_fraction: 0.35,
            window_half_width_fraction: 0.020833,
        }
    }
}

/// Complete external loading of the half wing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCase {
    /// Lift per unit span at each station, root to tip (N/m), before the load factor
    pub lift_n_per_m: Vec<f64>,
    /// Aerodynamic pitching moment per unit span at each station (N·m/m)
    pub pitching_moment_nm_per_m: Vec<f64>,
    #[serde(default)]
    pub flight: FlightCondition,
    #[serde(default)]
    pub model: LoadModel,
    #[serde(default)]
    pub point_load: PointLoad,
    #[serde(default)]
    pub engine: EngineMount,
}

impl LoadCase {
    /// Load case with the reference flight condition, point load and engine.
    pub fn new(lift_n_per_m: Vec<f64>, pitching_moment_nm_per_m: Vec<f64>) -> Self {
        LoadCase {
            lift_n_per_m,
            pitching_moment_nm_per_m,
            flight: FlightCondition::default(),
            model: LoadModel::default(),
            point_load: PointLoad::default(),
            engine: EngineMount::default(),
        }
    }

    /// Set the load factor
    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.flight.load_factor = load_factor;
        self
    }

    /// Number of stations fixed by the lift table
    pub fn station_count(&self) -> usize {
        self.lift_n_per_m.len()
    }

    /// Validate tables and scalars.
    ///
    /// Point-load and engine positions are not range-checked: a position off
    /// the grid simply contributes nothing.
    pub fn validate(&self) -> WingBoxResult<()> {
        let n = self.lift_n_per_m.len();
        if n < MIN_STATIONS {
            return Err(WingBoxError::invalid_input(
                "load_case.lift_n_per_m",
                format!("{n} stations"),
                format!("At least {MIN_STATIONS} stations are required"),
            ));
        }
        if self.pitching_moment_nm_per_m.len() != n {
            return Err(WingBoxError::length_mismatch(
                "load_case.pitching_moment_nm_per_m",
                n,
                self.pitching_moment_nm_per_m.len(),
            ));
        }
        require_finite_table("load_case.lift_n_per_m", &self.lift_n_per_m)?;
        require_finite_table(
            "load_case.pitching_moment_nm_per_m",
            &self.pitching_moment_nm_per_m,
        )?;

        require_finite("flight.load_factor", self.flight.load_factor)?;
        require_positive("flight.flight_speed_m_s", self.flight.flight_speed_m_s)?;

        require_finite(
            "model.self_weight_per_chord_n_per_m2",
            self.model.self_weight_per_chord_n_per_m2,
        )?;
        require_fraction(
            "model.lift_arm_chord_fraction",
            self.model.lift_arm_chord_fraction,
        )?;

        require_finite("point_load.span_fraction", self.point_load.span_fraction)?;
        require_finite("point_load.magnitude_n", self.point_load.magnitude_n)?;

        let e = &self.engine;
        require_finite("engine.thrust_n", e.thrust_n)?;
        require_finite("engine.thrust_factor", e.thrust_factor)?;
        require_finite("engine.weight_n", e.weight_n)?;
        require_finite("engine.vertical_offset_m", e.vertical_offset_m)?;
        require_finite("engine.horizontal_offset_m", e.horizontal_offset_m)?;
        require_finite("engine.span_fraction", e.span_fraction)?;
        require_positive(
            "engine.window_half_width_fraction",
            e.window_half_width_fraction,
        )?;
        Ok(())
    }
}

fn require_finite(field: &str, value: f64) -> WingBoxResult<()> {
    if !value.is_finite() {
        return Err(WingBoxError::invalid_input(
            field,
            value.to_string(),
            "Must be finite",
        ));
    }
    Ok(())
}

fn require_finite_table(field: &str, values: &[f64]) -> WingBoxResult<()> {
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        return Err(WingBoxError::invalid_input(
            format!("{field}[{i}]"),
            values[i].to_string(),
            "Must be finite",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch() {
        let case = LoadCase::new(vec![1.0; 10], vec![0.0; 9]);
        let err = case.validate().unwrap_err();
        assert_eq!(
            err,
            WingBoxError::length_mismatch("load_case.pitching_moment_nm_per_m", 10, 9)
        );
    }

    #[test]
    fn test_too_few_stations() {
        let case = LoadCase::new(vec![1.0; 3], vec![0.0; 3]);
        assert_eq!(case.validate().unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_non_finite_table_entry() {
        let mut lift = vec![1.0; 8];
        lift[5] = f64::INFINITY;
        let err = LoadCase::new(lift, vec![0.0; 8]).validate().unwrap_err();
        assert!(err.to_string().contains("lift_n_per_m[5]"));
    }

    #[test]
    fn test_engine_torque() {
        let engine = EngineMount {
            thrust_n: 1000.0,
            thrust_factor: 0.5,
            weight_n: 100.0,
            vertical_offset_m: 2.0,
            horizontal_offset_m: 1.0,
            span_fraction: 0.35,
            window_half_width_fraction: 0.02,
        };
        // 1000·0.5·2 − 100·(1 + 0.15·2)
        assert!((engine.torque_nm(2.0, 0.15) - 870.0).abs() < 1e-9);
        assert_eq!(EngineMount::none().torque_nm(2.0, 0.15), 0.0);
    }

    #[test]
    fn test_scalar_defaults_from_json() {
        let json = r#"{ "lift_n_per_m": [1, 2, 3, 4], "pitching_moment_nm_per_m": [0, 0, 0, 0] }"#;
        let case: LoadCase = serde_json::from_str(json).unwrap();
        assert_eq!(case.flight.load_factor, 3.75);
        assert_eq!(case.point_load.magnitude_n, 20267.0);
        assert_eq!(case.model.rounding_decimals, None);
        assert!(case.validate().is_ok());
    }
}
