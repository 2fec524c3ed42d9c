//! Internal shear, bending moment and torque along the half span.
//!
//! Everything is integrated from the free tip toward the root, so the value at
//! a station is the resultant of the loads outboard of it.
//!
//! Sign convention: distributed and point loads are positive downward (with
//! gravity). Scaled lift enters with a negative sign, so a net-lifting wing
//! has negative shear and moment.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::LoadCase;
use crate::errors::{WingBoxError, WingBoxResult};
use crate::geometry::{StationGrid, WingPlanform};
use crate::math::{round_to, tip_to_root_integral, tip_to_root_sum, Boundary};

/// Internal loads at every station, root to tip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalLoads {
    /// Lift × load factor, root forced to zero (N/m)
    pub scaled_lift_n_per_m: Vec<f64>,
    /// Structural self-weight, zero at root and tip (N/m)
    pub self_weight_n_per_m: Vec<f64>,
    /// Concentrated loads lumped onto stations (N)
    pub point_loads_n: Vec<f64>,
    /// Vertical shear (N)
    pub shear_n: Vec<f64>,
    /// Bending moment (N·m)
    pub bending_moment_nm: Vec<f64>,
    /// Distributed torque, engine window included (N·m/m)
    pub torque_rate_nm_per_m: Vec<f64>,
    /// Torque (N·m)
    pub torque_nm: Vec<f64>,
    /// Loads that were dropped because they fell off the grid
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<String>,
}

impl InternalLoads {
    /// Solve for shear, moment and torque on `grid`.
    ///
    /// The load case is expected to be validated already.
    pub fn solve(
        grid: &StationGrid,
        planform: &WingPlanform,
        load_case: &LoadCase,
    ) -> WingBoxResult<Self> {
        let n = grid.len();
        for (field, len) in [
            ("load_case.lift_n_per_m", load_case.lift_n_per_m.len()),
            (
                "load_case.pitching_moment_nm_per_m",
                load_case.pitching_moment_nm_per_m.len(),
            ),
        ] {
            if len != n {
                return Err(WingBoxError::length_mismatch(field, n, len));
            }
        }
        let h = grid.step();
        let round = |v: f64| match load_case.model.rounding_decimals {
            Some(decimals) => round_to(v, decimals),
            None => v,
        };

        let scaled_lift = scaled_lift(load_case);
        let self_weight = self_weight(grid, planform, load_case.model.self_weight_per_chord_n_per_m2);

        let mut diagnostics = Vec::new();
        let mut point_loads = vec![0.0; n];
        let point = &load_case.point_load;
        if point.magnitude_n != 0.0 {
            match grid.nearest_index(point.span_fraction) {
                Some(i) => point_loads[i] += point.magnitude_n,
                None => {
                    let note = format!(
                        "point load at span fraction {} is off the grid; ignored",
                        point.span_fraction
                    );
                    warn!("{note}");
                    diagnostics.push(note);
                }
            }
        }

        // Shear_i = Σ_{j>=i} (q_j·h + P_j)
        let shear_increments: Vec<f64> = (0..n)
            .map(|j| round(self_weight[j] - scaled_lift[j]) * h + point_loads[j])
            .collect();
        let shear = tip_to_root_sum(&shear_increments);
        let bending_moment = tip_to_root_integral(&shear, h, Boundary::FreeTip);

        let mut torque_rate: Vec<f64> = (0..n)
            .map(|i| {
                let chord = planform.chord_at(grid.y(i));
                round(
                    scaled_lift[i] * load_case.model.lift_arm_chord_fraction * chord
                        + load_case.pitching_moment_nm_per_m[i],
                )
            })
            .collect();
        if let Some(note) = apply_engine_window(&mut torque_rate, grid, planform, load_case) {
            warn!("{note}");
            diagnostics.push(note);
        }
        let torque = tip_to_root_integral(&torque_rate, h, Boundary::FreeTip);

        debug!(
            "internal loads: root shear {:.1} N, root moment {:.1} N·m, root torque {:.1} N·m",
            shear[0], bending_moment[0], torque[0]
        );

        Ok(InternalLoads {
            scaled_lift_n_per_m: scaled_lift,
            self_weight_n_per_m: self_weight,
            point_loads_n: point_loads,
            shear_n: shear,
            bending_moment_nm: bending_moment,
            torque_rate_nm_per_m: torque_rate,
            torque_nm: torque,
            diagnostics,
        })
    }

    /// Number of stations
    pub fn len(&self) -> usize {
        self.shear_n.len()
    }

    /// True if there are no stations
    pub fn is_empty(&self) -> bool {
        self.shear_n.is_empty()
    }
}

/// Lift × load factor; the root station carries none.
fn scaled_lift(load_case: &LoadCase) -> Vec<f64> {
    let factor = load_case.flight.load_factor;
    let mut lift: Vec<f64> = load_case.lift_n_per_m.iter().map(|l| l * factor).collect();
    if let Some(root) = lift.first_mut() {
        *root = 0.0;
    }
    lift
}

/// w(y) = k·c(y), zero at the root and the tip.
fn self_weight(grid: &StationGrid, planform: &WingPlanform, per_chord: f64) -> Vec<f64> {
    let n = grid.len();
    (0..n)
        .map(|i| {
            if i == 0 || i + 1 == n {
                0.0
            } else {
                per_chord * planform.chord_at(grid.y(i))
            }
        })
        .collect()
}

/// Spread the concentrated engine torque over the stations within
/// `window_half_width_fraction · N` of the mount, at τ / (n_window · h) each.
///
/// Returns a note when the window holds no station.
fn apply_engine_window(
    torque_rate: &mut [f64],
    grid: &StationGrid,
    planform: &WingPlanform,
    load_case: &LoadCase,
) -> Option<String> {
    let engine = &load_case.engine;
    let n = grid.len() as f64;
    let chord_at_mount = planform.chord_at(engine.span_fraction * planform.half_span_m());
    let torque = engine.torque_nm(chord_at_mount, load_case.model.lift_arm_chord_fraction);
    if torque == 0.0 {
        return None;
    }

    let centre = (engine.span_fraction * n).round();
    let half_width = engine.window_half_width_fraction * n;
    let window: Vec<usize> = (0..torque_rate.len())
        .filter(|&i| (i as f64 - centre).abs() < half_width)
        .collect();

    if window.is_empty() {
        return Some(format!(
            "engine torque window around station {centre} is empty; engine torque ignored"
        ));
    }

    let rate = torque / (window.len() as f64 * grid.step());
    for i in window {
        torque_rate[i] += rate;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{EngineMount, LoadModel, PointLoad};
    use approx::assert_relative_eq;

    fn bare_case(n: usize, lift: f64) -> LoadCase {
        let mut case = LoadCase::new(vec![lift; n], vec![0.0; n]);
        case.flight.load_factor = 1.0;
        case.model = LoadModel {
            self_weight_per_chord_n_per_m2: 0.0,
            ..LoadModel::default()
        };
        case.point_load = PointLoad::none();
        case.engine = EngineMount::none();
        case
    }

    fn setup(n: usize) -> (StationGrid, WingPlanform) {
        let planform = WingPlanform::default();
        (StationGrid::new(planform.half_span_m(), n).unwrap(), planform)
    }

    #[test]
    fn test_zero_loads() {
        let (grid, planform) = setup(20);
        let loads = InternalLoads::solve(&grid, &planform, &bare_case(20, 0.0)).unwrap();
        assert!(loads.shear_n.iter().all(|&v| v == 0.0));
        assert!(loads.bending_moment_nm.iter().all(|&v| v == 0.0));
        assert!(loads.torque_nm.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_uniform_lift_shear_and_moment() {
        let (grid, planform) = setup(11);
        let h = grid.step();
        let loads = InternalLoads::solve(&grid, &planform, &bare_case(11, 100.0)).unwrap();

        // root lift zeroed: stations 1..=10 carry 100 N/m each
        assert_relative_eq!(loads.shear_n[0], -100.0 * 10.0 * h, max_relative = 1e-12);
        assert_relative_eq!(loads.shear_n[10], -100.0 * h, max_relative = 1e-12);
        let expected_root_moment: f64 = loads.shear_n.iter().map(|s| s * h).sum();
        assert_relative_eq!(loads.bending_moment_nm[0], expected_root_moment, max_relative = 1e-12);
        assert!(loads.bending_moment_nm[0] < 0.0);
    }

    #[test]
    fn test_self_weight_zero_at_ends() {
        let (grid, planform) = setup(10);
        let loads = InternalLoads::solve(&grid, &planform, &LoadCase::new(vec![0.0; 10], vec![0.0; 10]))
            .unwrap();
        assert_eq!(loads.self_weight_n_per_m[0], 0.0);
        assert_eq!(loads.self_weight_n_per_m[9], 0.0);
        assert!(loads.self_weight_n_per_m[1] > loads.self_weight_n_per_m[8]);
    }

    #[test]
    fn test_point_load_lands_on_nearest_station() {
        let (grid, planform) = setup(21);
        let mut case = bare_case(21, 0.0);
        case.point_load = PointLoad {
            span_fraction: 0.35,
            magnitude_n: 500.0,
        };
        let loads = InternalLoads::solve(&grid, &planform, &case).unwrap();
        assert_eq!(loads.point_loads_n[7], 500.0);
        assert_eq!(loads.shear_n[0], 500.0);
        assert_eq!(loads.shear_n[7], 500.0);
        assert_eq!(loads.shear_n[8], 0.0);
    }

    #[test]
    fn test_off_grid_point_load_contributes_nothing() {
        let (grid, planform) = setup(21);
        let mut case = bare_case(21, 0.0);
        case.point_load = PointLoad {
            span_fraction: 1.5,
            magnitude_n: 500.0,
        };
        let loads = InternalLoads::solve(&grid, &planform, &case).unwrap();
        assert!(loads.shear_n.iter().all(|&v| v == 0.0));
        assert_eq!(loads.diagnostics.len(), 1);
    }

    #[test]
    fn test_engine_window_integrates_to_torque() {
        let (grid, planform) = setup(500);
        let mut case = bare_case(500, 0.0);
        case.engine = EngineMount::default();
        let loads = InternalLoads::solve(&grid, &planform, &case).unwrap();

        let chord = planform.chord_at(0.35 * planform.half_span_m());
        let expected = case.engine.torque_nm(chord, 0.15);
        assert_relative_eq!(loads.torque_nm[0], expected, max_relative = 1e-9);

        let loaded = loads.torque_rate_nm_per_m.iter().filter(|&&r| r != 0.0).count();
        assert_eq!(loaded, 21);
        // outboard of the window nothing is carried
        assert_eq!(loads.torque_nm[499], 0.0);
    }

    #[test]
    fn test_engine_window_off_grid() {
        let (grid, planform) = setup(50);
        let mut case = bare_case(50, 0.0);
        case.engine = EngineMount {
            span_fraction: 3.0,
            ..EngineMount::default()
        };
        let loads = InternalLoads::solve(&grid, &planform, &case).unwrap();
        assert!(loads.torque_nm.iter().all(|&v| v == 0.0));
        assert!(loads.diagnostics[0].contains("engine"));
    }

    #[test]
    fn test_engine_window_clipped_at_tip() {
        let (grid, planform) = setup(50);
        let mut case = bare_case(50, 0.0);
        case.engine = EngineMount {
            span_fraction: 1.0,
            ..EngineMount::default()
        };
        let loads = InternalLoads::solve(&grid, &planform, &case).unwrap();

        // window 50 ± 1.04 keeps only the tip station inside the grid
        let loaded: Vec<usize> = (0..50)
            .filter(|&i| loads.torque_rate_nm_per_m[i] != 0.0)
            .collect();
        assert_eq!(loaded, vec![49]);

        let expected = case.engine.torque_nm(planform.tip_chord_m, 0.15);
        assert_relative_eq!(loads.torque_nm[0], expected, max_relative = 1e-9);
        assert!(loads.diagnostics.is_empty());
    }

    #[test]
    fn test_lift_torque_uses_chord_arm() {
        let (grid, planform) = setup(5);
        let loads = InternalLoads::solve(&grid, &planform, &bare_case(5, 10.0)).unwrap();
        let tip_chord = planform.chord_at(grid.y(4));
        assert_relative_eq!(
            loads.torque_rate_nm_per_m[4],
            10.0 * 0.15 * tip_chord,
            max_relative = 1e-12
        );
        assert_eq!(loads.torque_rate_nm_per_m[0], 0.0);
    }

    #[test]
    fn test_rounding_of_distributed_terms() {
        let (grid, planform) = setup(6);
        let mut case = bare_case(6, 1.23456);
        case.model.rounding_decimals = Some(2);
        let loads = InternalLoads::solve(&grid, &planform, &case).unwrap();
        let h = grid.step();
        assert_relative_eq!(loads.shear_n[5], -1.23 * h, max_relative = 1e-12);
    }
}
