//! # Section Properties
//!
//! Neutral axis, bending moment of inertia, enclosed area and torsional
//! constant of the stiffened box at every station, plus the structural mass
//! of the half wing.
//!
//! Stringers are lumped: top stringers sit at the top-skin centroid, bottom
//! stringers at the bottom-skin centroid, each treated as a square block of
//! its own area about its centroid. Their area is subtracted from the area
//! enclosed by the skin mid-lines.
//!
//! ## Example
//!
//! ```rust
//! use wingbox_core::geometry::{SheetThickness, SparLayout, WingPlanform, StationGrid};
//! use wingbox_core::properties::SectionDistribution;
//! use wingbox_core::stringers::StringerLayout;
//!
//! let planform = WingPlanform::default();
//! let grid = StationGrid::new(planform.half_span_m(), 50).unwrap();
//! let sections = SectionDistribution::compute(
//!     &grid,
//!     &planform,
//!     &SparLayout::default(),
//!     &SheetThickness::default(),
//!     &StringerLayout::default(),
//! ).unwrap();
//!
//! // The box tapers, so the root is stiffer than the tip.
//! let inertia = sections.moment_of_inertia();
//! assert!(inertia[0] > inertia[49]);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{WingBoxError, WingBoxResult};
use crate::geometry::{SheetThickness, SparLayout, StationGrid, WingPlanform};
use crate::math::CubicSpline;
use crate::section::{SectionGeometry, Wall};
use crate::stringers::{StringerCounts, StringerLayout};

// ============================================================================
// Per-station properties
// ============================================================================

/// Section properties at one station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    /// Spanwise position (m from root)
    pub y_m: f64,
    /// Wall geometry at this station
    pub geometry: SectionGeometry,
    /// Stringers present at this station
    pub counts: StringerCounts,
    /// Neutral-axis height above the front-spar bottom (m)
    pub neutral_axis_z_m: f64,
    /// Bending moment of inertia about the neutral axis (m⁴)
    pub moment_of_inertia_m4: f64,
    /// Area enclosed by the cell, net of stringer area (m²)
    pub enclosed_area_m2: f64,
    /// Torsional constant 4A²/∮ds/t (m⁴)
    pub torsional_constant_m4: f64,
}

impl SectionProperties {
    /// Compute the properties of one section.
    ///
    /// # Errors
    ///
    /// [`WingBoxError::NumericDegeneracy`] when I, the enclosed area or J is
    /// not strictly positive and finite (e.g. more stringer area than cell).
    pub fn compute(
        station: usize,
        y_m: f64,
        geometry: SectionGeometry,
        counts: StringerCounts,
        stringer_area_m2: f64,
    ) -> WingBoxResult<Self> {
        let walls = geometry.walls();
        let a_s = stringer_area_m2;
        let n_top = counts.top as f64;
        let n_bot = counts.bottom as f64;
        let z_top = geometry.top_skin.centroid_z_m;
        let z_bot = geometry.bottom_skin.centroid_z_m;

        let wall_area: f64 = walls.iter().map(Wall::area_m2).sum();
        let wall_moment: f64 = walls.iter().map(|w| w.area_m2() * w.centroid_z_m).sum();
        let total_area = wall_area + (n_top + n_bot) * a_s;
        let neutral_axis = (wall_moment + a_s * (n_top * z_top + n_bot * z_bot)) / total_area;

        let parallel_axis = |area: f64, z: f64| area * (z - neutral_axis).powi(2);
        let theta = geometry.bottom_skin_angle_rad();

        let top = &geometry.top_skin;
        let bottom = &geometry.bottom_skin;
        let i_top = top.length_m * top.thickness_m.powi(3) / 12.0;
        let i_bottom = bottom.length_m * bottom.thickness_m.powi(3) / 12.0 * theta.cos().powi(2)
            + bottom.thickness_m * bottom.length_m.powi(3) / 12.0 * theta.sin().powi(2);
        let i_web = |w: &Wall| w.thickness_m * w.length_m.powi(3) / 12.0;
        let i_stringer = |n: f64, z: f64| n * (a_s * a_s / 12.0 + parallel_axis(a_s, z));

        let inertia = i_top
            + i_bottom
            + i_web(&geometry.rear_spar)
            + i_web(&geometry.front_spar)
            + walls
                .iter()
                .map(|w| parallel_axis(w.area_m2(), w.centroid_z_m))
                .sum::<f64>()
            + i_stringer(n_top, z_top)
            + i_stringer(n_bot, z_bot);

        let enclosed_area = geometry.cell_area_m2() - a_s * (n_top + n_bot);
        let torsional_constant = 4.0 * enclosed_area * enclosed_area / geometry.ds_over_t();

        require_nondegenerate("moment_of_inertia", station, inertia)?;
        require_nondegenerate("enclosed_area", station, enclosed_area)?;
        require_nondegenerate("torsional_constant", station, torsional_constant)?;

        Ok(SectionProperties {
            y_m,
            geometry,
            counts,
            neutral_axis_z_m: neutral_axis,
            moment_of_inertia_m4: inertia,
            enclosed_area_m2: enclosed_area,
            torsional_constant_m4: torsional_constant,
        })
    }
}

fn require_nondegenerate(quantity: &str, station: usize, value: f64) -> WingBoxResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(WingBoxError::numeric_degeneracy(quantity, station, value));
    }
    Ok(())
}

// ============================================================================
// Spanwise distribution
// ============================================================================

/// Section properties at every station, with continuous I(y) and J(y).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDistribution {
    stations: Vec<SectionProperties>,
    inertia: CubicSpline,
    torsion: CubicSpline,
}

impl SectionDistribution {
    /// Compute properties at every station of `grid`.
    pub fn compute(
        grid: &StationGrid,
        planform: &WingPlanform,
        spars: &SparLayout,
        thickness: &SheetThickness,
        stringers: &StringerLayout,
    ) -> WingBoxResult<Self> {
        let a_s = stringers.stringer.area_m2();
        let stations = (0..grid.len())
            .map(|i| {
                let y = grid.y(i);
                let geometry = SectionGeometry::at(y, planform, spars, thickness);
                let counts = stringers.counts_at(grid.fraction(i));
                SectionProperties::compute(i, y, geometry, counts, a_s)
            })
            .collect::<WingBoxResult<Vec<_>>>()?;

        let y = grid.positions();
        let inertia_values: Vec<f64> = stations.iter().map(|s| s.moment_of_inertia_m4).collect();
        let torsion_values: Vec<f64> = stations.iter().map(|s| s.torsional_constant_m4).collect();

        debug!(
            "section properties: I root {:.4e} tip {:.4e} m4, J root {:.4e} tip {:.4e} m4",
            inertia_values[0],
            inertia_values[inertia_values.len() - 1],
            torsion_values[0],
            torsion_values[torsion_values.len() - 1],
        );

        Ok(SectionDistribution {
            inertia: CubicSpline::new(&y, &inertia_values)?,
            torsion: CubicSpline::new(&y, &torsion_values)?,
            stations,
        })
    }

    /// Per-station properties, root to tip
    pub fn stations(&self) -> &[SectionProperties] {
        &self.stations
    }

    /// I at every station (m⁴)
    pub fn moment_of_inertia(&self) -> Vec<f64> {
        self.stations.iter().map(|s| s.moment_of_inertia_m4).collect()
    }

    /// J at every station (m⁴)
    pub fn torsional_constant(&self) -> Vec<f64> {
        self.stations.iter().map(|s| s.torsional_constant_m4).collect()
    }

    /// Neutral-axis height at every station (m)
    pub fn neutral_axis(&self) -> Vec<f64> {
        self.stations.iter().map(|s| s.neutral_axis_z_m).collect()
    }

    /// Net enclosed area at every station (m²)
    pub fn enclosed_area(&self) -> Vec<f64> {
        self.stations.iter().map(|s| s.enclosed_area_m2).collect()
    }

    /// Interpolated I at an arbitrary spanwise position (m⁴)
    pub fn inertia_at(&self, y_m: f64) -> f64 {
        self.inertia.evaluate(y_m)
    }

    /// Interpolated J at an arbitrary spanwise position (m⁴)
    pub fn torsional_constant_at(&self, y_m: f64) -> f64 {
        self.torsion.evaluate(y_m)
    }

    /// Σ over stations of (top + bottom) stringer counts
    pub fn stringer_station_sum(&self) -> usize {
        self.stations.iter().map(|s| s.counts.total()).sum()
    }
}

// ============================================================================
// Mass
// ============================================================================

/// Structural mass of the half wing, by component (kg).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MassBreakdown {
    pub top_skin_kg: f64,
    pub rear_spar_kg: f64,
    pub bottom_skin_kg: f64,
    pub front_spar_kg: f64,
    pub stringers_kg: f64,
}

impl MassBreakdown {
    /// Mass from root/tip wall geometry and the stringer count summed over stations.
    ///
    /// Each wall is a linearly tapered plate of mean length (L_root + L_tip)/2.
    /// Each station carries its stringers over a length (b/2)/N.
    pub fn compute(
        root: &SectionGeometry,
        tip: &SectionGeometry,
        half_span_m: f64,
        density_kg_m3: f64,
        stringer_area_m2: f64,
        stringer_station_sum: usize,
        station_count: usize,
    ) -> Self {
        let plate = |r: &Wall, t: &Wall| {
            0.5 * (r.length_m + t.length_m) * r.thickness_m * half_span_m * density_kg_m3
        };
        let stringer_length = half_span_m / station_count as f64;

        MassBreakdown {
            top_skin_kg: plate(&root.top_skin, &tip.top_skin),
            rear_spar_kg: plate(&root.rear_spar, &tip.rear_spar),
            bottom_skin_kg: plate(&root.bottom_skin, &tip.bottom_skin),
            front_spar_kg: plate(&root.front_spar, &tip.front_spar),
            stringers_kg: stringer_station_sum as f64
                * stringer_length
                * stringer_area_m2
                * density_kg_m3,
        }
    }

    /// Sheet mass (skins and webs)
    pub fn sheet_kg(&self) -> f64 {
        self.top_skin_kg + self.rear_spar_kg + self.bottom_skin_kg + self.front_spar_kg
    }

    /// Total half-wing box mass
    pub fn total_kg(&self) -> f64 {
        self.sheet_kg() + self.stringers_kg
    }
}
