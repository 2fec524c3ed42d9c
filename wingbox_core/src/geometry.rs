//! # Wing Geometry
//!
//! Planform, spar layout and sheet thicknesses of the wing box, plus the
//! spanwise station grid every per-station array is indexed by.
//!
//! Chordwise spar positions and spar heights are fractions of the local
//! chord, so the whole box scales with the linear taper from root to tip.
//!
//! ## Example
//!
//! ```rust
//! use wingbox_core::geometry::{StationGrid, WingPlanform};
//!
//! let planform = WingPlanform::default();
//! let grid = StationGrid::new(planform.half_span_m(), 5).unwrap();
//!
//! assert_eq!(grid.y(0), 0.0);
//! assert!((grid.y(4) - planform.half_span_m()).abs() < 1e-12);
//! assert!((planform.chord_at(0.0) - planform.root_chord_m).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_fraction, require_positive, WingBoxError, WingBoxResult};

/// Minimum stations needed for cubic interpolation along the span
pub const MIN_STATIONS: usize = 4;

/// Trapezoidal wing planform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WingPlanform {
    /// Root chord (m)
    pub root_chord_m: f64,
    /// Tip chord (m)
    pub tip_chord_m: f64,
    /// Full wing span, tip to tip (m)
    pub span_m: f64,
}

impl WingPlanform {
    /// Half span b/2 (m); the beam length from root to tip
    pub fn half_span_m(&self) -> f64 {
        self.span_m / 2.0
    }

    /// Chord at spanwise position `y` (m from root), linear taper
    pub fn chord_at(&self, y_m: f64) -> f64 {
        let fraction = y_m / self.half_span_m();
        self.root_chord_m + (self.tip_chord_m - self.root_chord_m) * fraction
    }

    /// Validate planform dimensions.
    pub fn validate(&self) -> WingBoxResult<()> {
        require_positive("planform.root_chord_m", self.root_chord_m)?;
        require_positive("planform.tip_chord_m", self.tip_chord_m)?;
        require_positive("planform.span_m", self.span_m)?;
        Ok(())
    }
}

impl Default for WingPlanform {
    fn default() -> Self {
        WingPlanform {
            root_chord_m: 3.6956,
            tip_chord_m: 1.1071,
            span_m: 24.0137,
        }
    }
}

/// Spar positions and heights as fractions of the local chord.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SparLayout {
    /// Front spar chordwise position (fraction of chord)
    pub front_spar_x: f64,
    /// Rear spar chordwise position (fraction of chord)
    pub rear_spar_x: f64,
    /// Front spar height (fraction of chord)
    pub front_spar_height: f64,
    /// Rear spar height (fraction of chord)
    pub rear_spar_height: f64,
}

impl SparLayout {
    /// Validate spar fractions.
    pub fn validate(&self) -> WingBoxResult<()> {
        require_fraction("spars.front_spar_x", self.front_spar_x)?;
        require_fraction("spars.rear_spar_x", self.rear_spar_x)?;
        if self.rear_spar_x <= self.front_spar_x {
            return Err(WingBoxError::invalid_input(
                "spars.rear_spar_x",
                self.rear_spar_x.to_string(),
                format!(
                    "Rear spar must lie aft of the front spar ({})",
                    self.front_spar_x
                ),
            ));
        }
        require_positive("spars.front_spar_height", self.front_spar_height)?;
        require_positive("spars.rear_spar_height", self.rear_spar_height)?;
        require_fraction("spars.front_spar_height", self.front_spar_height)?;
        require_fraction("spars.rear_spar_height", self.rear_spar_height)?;
        Ok(())
    }
}

impl Default for SparLayout {
    fn default() -> Self {
        SparLayout {
            front_spar_x: 0.20,
            rear_spar_x: 0.60,
            front_spar_height: 0.0908,
            rear_spar_height: 0.0804,
        }
    }
}

/// Sheet thicknesses: one for the spar webs, one for the top and bottom skins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetThickness {
    /// Spar web thickness (m)
    pub t_sheet_spar_m: f64,
    /// Top and bottom skin thickness (m)
    pub t_sheet_hor_m: f64,
}

impl SheetThickness {
    /// Validate thicknesses.
    pub fn validate(&self) -> WingBoxResult<()> {
        require_positive("thickness.t_sheet_spar_m", self.t_sheet_spar_m)?;
        require_positive("thickness.t_sheet_hor_m", self.t_sheet_hor_m)?;
        Ok(())
    }
}

impl Default for SheetThickness {
    fn default() -> Self {
        SheetThickness {
            t_sheet_spar_m: 0.0005,
            t_sheet_hor_m: 0.0085,
        }
    }
}

/// Equally spaced stations from the root (index 0) to the tip (last index).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationGrid {
    half_span_m: f64,
    count: usize,
}

impl StationGrid {
    /// Create a grid of `count` stations over `[0, half_span_m]`.
    ///
    /// # Errors
    ///
    /// [`WingBoxError::InvalidInput`] for fewer than [`MIN_STATIONS`] stations
    /// or a non-positive half span.
    pub fn new(half_span_m: f64, count: usize) -> WingBoxResult<Self> {
        require_positive("half_span_m", half_span_m)?;
        if count < MIN_STATIONS {
            return Err(WingBoxError::invalid_input(
                "station_count",
                count.to_string(),
                format!("At least {MIN_STATIONS} stations are required"),
            ));
        }
        Ok(StationGrid { half_span_m, count })
    }

    /// Number of stations
    pub fn len(&self) -> usize {
        self.count
    }

    /// Always false: a grid has at least [`MIN_STATIONS`] stations
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Half span covered by the grid (m)
    pub fn half_span_m(&self) -> f64 {
        self.half_span_m
    }

    /// Station spacing h (m)
    pub fn step(&self) -> f64 {
        self.half_span_m / (self.count - 1) as f64
    }

    /// Spanwise fraction of station `i`, exactly `i / (N - 1)`
    pub fn fraction(&self, i: usize) -> f64 {
        i as f64 / (self.count - 1) as f64
    }

    /// Spanwise position of station `i` (m from root)
    pub fn y(&self, i: usize) -> f64 {
        if i + 1 == self.count {
            self.half_span_m
        } else {
            self.step() * i as f64
        }
    }

    /// All station positions, root to tip
    pub fn positions(&self) -> Vec<f64> {
        (0..self.count).map(|i| self.y(i)).collect()
    }

    /// Station nearest to a spanwise fraction, if it lies on the grid.
    ///
    /// Uses `round(fraction * (N - 1))`; fractions mapping past the tip give `None`.
    pub fn nearest_index(&self, fraction: f64) -> Option<usize> {
        let raw = (fraction * (self.count - 1) as f64).round();
        if raw.is_finite() && raw >= 0.0 && (raw as usize) < self.count {
            Some(raw as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chord_taper() {
        let planform = WingPlanform::default();
        let tip = planform.chord_at(planform.half_span_m());
        assert!((tip - planform.tip_chord_m).abs() < 1e-12);
        let mid = planform.chord_at(planform.half_span_m() / 2.0);
        assert!((mid - (planform.root_chord_m + planform.tip_chord_m) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_grid_spacing() {
        let grid = StationGrid::new(10.0, 11).unwrap();
        assert_eq!(grid.step(), 1.0);
        assert_eq!(grid.y(10), 10.0);
        assert_eq!(grid.fraction(5), 0.5);
        assert_eq!(grid.positions().len(), 11);
    }

    #[test]
    fn test_grid_rejects_too_few_stations() {
        assert!(StationGrid::new(10.0, 3).is_err());
        assert!(StationGrid::new(0.0, 10).is_err());
    }

    #[test]
    fn test_nearest_index() {
        let grid = StationGrid::new(10.0, 11).unwrap();
        assert_eq!(grid.nearest_index(0.35), Some(4));
        assert_eq!(grid.nearest_index(1.0), Some(10));
        assert_eq!(grid.nearest_index(1.2), None);
        assert_eq!(grid.nearest_index(-0.5), None);
    }

    #[test]
    fn test_spar_order_validation() {
        let mut spars = SparLayout::default();
        assert!(spars.validate().is_ok());
        spars.rear_spar_x = 0.1;
        assert!(spars.validate().is_err());
    }

    #[test]
    fn test_thickness_validation() {
        let thickness = SheetThickness {
            t_sheet_spar_m: 0.0,
            t_sheet_hor_m: 0.0085,
        };
        assert!(thickness.validate().is_err());
    }
}
