//! # Section Geometry
//!
//! Thin-wall geometry of the single-cell wing box at one spanwise station.
//!
//! The cell is a quadrilateral of four walls, walked in order:
//!
//! ```text
//!   front spar top  ___________________  rear spar top
//!                  |        I          |
//!              IV  |                   | II
//!                  |                   |
//!   front spar bot |___                |  rear spar bot
//!                       ‾‾‾‾‾‾‾‾---___ |
//!                            III
//! ```
//!
//! - I   top skin, horizontal, at the height of the front spar
//! - II  rear spar web
//! - III bottom skin, slanted between the unequal spar bottoms
//! - IV  front spar web
//!
//! Heights are measured from the bottom of the front spar.

use serde::{Deserialize, Serialize};

use crate::geometry::{SheetThickness, SparLayout, WingPlanform};

/// One straight wall of the cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    /// Developed length (m)
    pub length_m: f64,
    /// Sheet thickness (m)
    pub thickness_m: f64,
    /// Centroid height above the front-spar bottom (m)
    pub centroid_z_m: f64,
}

impl Wall {
    /// Cross-sectional area (m²)
    pub fn area_m2(&self) -> f64 {
        self.length_m * self.thickness_m
    }

    /// Contribution to the shear-flow line integral ∮ds/t
    pub fn ds_over_t(&self) -> f64 {
        self.length_m / self.thickness_m
    }
}

/// Four-wall geometry of the box at one station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionGeometry {
    /// Local chord (m)
    pub chord_m: f64,
    /// Top skin (wall I)
    pub top_skin: Wall,
    /// Rear spar web (wall II)
    pub rear_spar: Wall,
    /// Slanted bottom skin (wall III)
    pub bottom_skin: Wall,
    /// Front spar web (wall IV)
    pub front_spar: Wall,
}

impl SectionGeometry {
    /// Geometry at spanwise position `y_m`.
    pub fn at(
        y_m: f64,
        planform: &WingPlanform,
        spars: &SparLayout,
        thickness: &SheetThickness,
    ) -> Self {
        let chord = planform.chord_at(y_m);
        SectionGeometry::for_chord(chord, spars, thickness)
    }

    /// Geometry for a given local chord.
    pub fn for_chord(chord_m: f64, spars: &SparLayout, thickness: &SheetThickness) -> Self {
        let l_top = (spars.rear_spar_x - spars.front_spar_x) * chord_m;
        let l_rear = spars.rear_spar_height * chord_m;
        let l_front = spars.front_spar_height * chord_m;
        let l_bottom = ((l_front - l_rear).powi(2) + l_top.powi(2)).sqrt();

        SectionGeometry {
            chord_m,
            top_skin: Wall {
                length_m: l_top,
                thickness_m: thickness.t_sheet_hor_m,
                centroid_z_m: l_front,
            },
            rear_spar: Wall {
                length_m: l_rear,
                thickness_m: thickness.t_sheet_spar_m,
                centroid_z_m: l_front - 0.5 * l_rear,
            },
            bottom_skin: Wall {
                length_m: l_bottom,
                thickness_m: thickness.t_sheet_hor_m,
                centroid_z_m: 0.5 * (l_front - l_rear),
            },
            front_spar: Wall {
                length_m: l_front,
                thickness_m: thickness.t_sheet_spar_m,
                centroid_z_m: 0.5 * l_front,
            },
        }
    }

    /// Walls in cell order I, II, III, IV
    pub fn walls(&self) -> [Wall; 4] {
        [self.top_skin, self.rear_spar, self.bottom_skin, self.front_spar]
    }

    /// Height drop of the bottom skin from front spar to rear spar (m)
    pub fn spar_height_difference_m(&self) -> f64 {
        self.front_spar.length_m - self.rear_spar.length_m
    }

    /// Inclination of the bottom skin to the chord line (rad)
    pub fn bottom_skin_angle_rad(&self) -> f64 {
        self.spar_height_difference_m().atan2(self.top_skin.length_m)
    }

    /// Area enclosed by the skin mid-lines (trapezoid), before stringers (m²)
    pub fn cell_area_m2(&self) -> f64 {
        self.top_skin.length_m * self.rear_spar.length_m
            + 0.5 * self.spar_height_difference_m() * self.top_skin.length_m
    }

    /// ∮ds/t around the cell
    pub fn ds_over_t(&self) -> f64 {
        self.walls().iter().map(Wall::ds_over_t).sum()
    }

    /// Total sheet area of the four walls (m²)
    pub fn sheet_area_m2(&self) -> f64 {
        self.walls().iter().map(Wall::area_m2).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_section() -> SectionGeometry {
        let spars = SparLayout {
            front_spar_x: 0.2,
            rear_spar_x: 0.6,
            front_spar_height: 0.1,
            rear_spar_height: 0.07,
        };
        let thickness = SheetThickness {
            t_sheet_spar_m: 0.001,
            t_sheet_hor_m: 0.002,
        };
        SectionGeometry::for_chord(1.0, &spars, &thickness)
    }

    #[test]
    fn test_wall_lengths() {
        let s = unit_section();
        assert!((s.top_skin.length_m - 0.4).abs() < 1e-12);
        assert!((s.rear_spar.length_m - 0.07).abs() < 1e-12);
        assert!((s.front_spar.length_m - 0.1).abs() < 1e-12);
        // hypotenuse of 0.03 and 0.4
        assert!((s.bottom_skin.length_m - (0.03f64.powi(2) + 0.16).sqrt()).abs() < 1e-12);
        assert!(s.bottom_skin.length_m >= s.top_skin.length_m);
    }

    #[test]
    fn test_centroids() {
        let s = unit_section();
        assert!((s.top_skin.centroid_z_m - 0.1).abs() < 1e-12);
        assert!((s.rear_spar.centroid_z_m - 0.065).abs() < 1e-12);
        assert!((s.bottom_skin.centroid_z_m - 0.015).abs() < 1e-12);
        assert!((s.front_spar.centroid_z_m - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_cell_area_is_trapezoid() {
        let s = unit_section();
        let trapezoid = 0.4 * (0.1 + 0.07) / 2.0;
        assert!((s.cell_area_m2() - trapezoid).abs() < 1e-12);
    }

    #[test]
    fn test_ds_over_t() {
        let s = unit_section();
        let expected = (0.4 + s.bottom_skin.length_m) / 0.002 + (0.07 + 0.1) / 0.001;
        assert!((s.ds_over_t() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_bottom_skin_angle() {
        let s = unit_section();
        assert!((s.bottom_skin_angle_rad() - (0.03f64 / 0.4).atan()).abs() < 1e-12);
    }

    #[test]
    fn test_taper_scales_linearly() {
        let planform = WingPlanform::default();
        let spars = SparLayout::default();
        let thickness = SheetThickness::default();
        let root = SectionGeometry::at(0.0, &planform, &spars, &thickness);
        let tip = SectionGeometry::at(planform.half_span_m(), &planform, &spars, &thickness);
        let ratio = planform.tip_chord_m / planform.root_chord_m;
        assert!((tip.top_skin.length_m / root.top_skin.length_m - ratio).abs() < 1e-12);
    }
}
