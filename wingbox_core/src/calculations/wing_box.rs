//! # Wing-Box Analysis
//!
//! Full analysis of one wing-box design under one load case: section
//! properties at every station, internal loads, slope, deflection and twist,
//! structural mass, and a scalar summary.
//!
//! ## Assumptions
//!
//! - Cantilever: clamped at the root, free at the tip
//! - Linear taper, box dimensions proportional to the local chord
//! - Single closed cell of four flat walls; stringers lumped on the skins
//! - Linear elastic, small deflections
//!
//! ## Example
//!
//! ```rust
//! use wingbox_core::calculations::wing_box::{calculate, WingBoxInput};
//! use wingbox_core::loads::LoadCase;
//!
//! let n = 100;
//! let lift = (0..n).map(|i| 20_000.0 * (1.0 - i as f64 / n as f64)).collect();
//! let input = WingBoxInput::reference("Baseline", LoadCase::new(lift, vec![0.0; n]));
//!
//! let result = calculate(&input).unwrap();
//!
//! assert_eq!(result.deflection_m()[0], 0.0);
//! println!("Mass: {:.1} kg", result.summary.total_mass_kg);
//! println!("Max deflection: {:.1} % span", result.summary.max_deflection_pct_span);
//! println!("Max twist: {:.2} deg", result.summary.max_twist_deg.value());
//! ```

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::beam_response::BeamResponse;
use crate::errors::{WingBoxError, WingBoxResult};
use crate::geometry::{SheetThickness, SparLayout, StationGrid, WingPlanform};
use crate::loads::{InternalLoads, LoadCase};
use crate::materials::Material;
use crate::properties::{MassBreakdown, SectionDistribution};
use crate::section::SectionGeometry;
use crate::stringers::{StringerCounts, StringerLayout};
use crate::units::{Degrees, Meters, Radians};

/// Complete description of a wing-box design and the load case it is checked under.
///
/// Geometry, material and stringer fields default to the reference design
/// when omitted from JSON; the load case is always required.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Thin skins",
///   "thickness": { "t_sheet_spar_m": 0.0005, "t_sheet_hor_m": 0.006 },
///   "load_case": {
///     "lift_n_per_m": [0, 9000, 8500, 7000, 4000, 0],
///     "pitching_moment_nm_per_m": [0, -900, -850, -700, -400, 0]
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WingBoxInput {
    /// User label for this design
    pub label: String,
    #[serde(default)]
    pub planform: WingPlanform,
    #[serde(default)]
    pub spars: SparLayout,
    #[serde(default)]
    pub thickness: SheetThickness,
    #[serde(default)]
    pub material: Material,
    #[serde(default)]
    pub stringers: StringerLayout,
    pub load_case: LoadCase,
}

impl WingBoxInput {
    /// Reference design under the given load case.
    pub fn reference(label: impl Into<String>, load_case: LoadCase) -> Self {
        WingBoxInput {
            label: label.into(),
            planform: WingPlanform::default(),
            spars: SparLayout::default(),
            thickness: SheetThickness::default(),
            material: Material::default(),
            stringers: StringerLayout::default(),
            load_case,
        }
    }

    /// Validate every part of the input. Runs before any computation.
    pub fn validate(&self) -> WingBoxResult<()> {
        self.planform.validate()?;
        self.spars.validate()?;
        self.thickness.validate()?;
        self.material.validate()?;
        self.stringers.validate()?;
        self.load_case.validate()?;
        Ok(())
    }

    /// Station grid fixed by the lift table length and the half span.
    pub fn station_grid(&self) -> WingBoxResult<StationGrid> {
        StationGrid::new(self.planform.half_span_m(), self.load_case.station_count())
    }
}

/// Scalar results for comparing designs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponseSummary {
    /// Half-wing structural mass (kg)
    pub total_mass_kg: f64,
    /// Largest |v| along the span
    pub max_deflection_m: Meters,
    /// Largest |v| as a percentage of the full span
    pub max_deflection_pct_span: f64,
    /// Largest |φ| along the span
    pub max_twist_deg: Degrees,
    /// Deflection at the tip
    pub tip_deflection_m: Meters,
    /// Twist at the tip
    pub tip_twist_deg: Degrees,
    /// Load factor the case was run at
    pub load_factor: f64,
}

/// Per-station section data, root to tip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionArrays {
    pub chord_m: Vec<f64>,
    pub neutral_axis_z_m: Vec<f64>,
    pub moment_of_inertia_m4: Vec<f64>,
    pub enclosed_area_m2: Vec<f64>,
    pub torsional_constant_m4: Vec<f64>,
    pub stringer_counts: Vec<StringerCounts>,
}

impl SectionArrays {
    fn from_distribution(sections: &SectionDistribution) -> Self {
        let stations = sections.stations();
        SectionArrays {
            chord_m: stations.iter().map(|s| s.geometry.chord_m).collect(),
            neutral_axis_z_m: sections.neutral_axis(),
            moment_of_inertia_m4: sections.moment_of_inertia(),
            enclosed_area_m2: sections.enclosed_area(),
            torsional_constant_m4: sections.torsional_constant(),
            stringer_counts: stations.iter().map(|s| s.counts).collect(),
        }
    }
}

/// Results of a wing-box analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WingBoxAnalysis {
    /// Label of the analysed design
    pub label: String,
    /// Station positions (m from root)
    pub y_m: Vec<f64>,
    pub sections: SectionArrays,
    pub loads: InternalLoads,
    pub response: BeamResponse,
    pub mass: MassBreakdown,
    pub summary: ResponseSummary,
    /// Non-fatal warnings raised during the run
    #[serde(default)]
    pub diagnostics: Vec<String>,
}

impl WingBoxAnalysis {
    /// Number of stations
    pub fn station_count(&self) -> usize {
        self.y_m.len()
    }

    /// Deflection at every station (m)
    pub fn deflection_m(&self) -> &[f64] {
        &self.response.deflection_m
    }

    /// Twist at every station (rad)
    pub fn twist_rad(&self) -> &[f64] {
        &self.response.twist_rad
    }
}

/// Analyse a wing-box design.
///
/// # Errors
///
/// Configuration errors from [`WingBoxInput::validate`] are returned before any
/// computation; [`WingBoxError::NumericDegeneracy`] aborts the run when a
/// section property or beam quantity is not usable.
pub fn calculate(input: &WingBoxInput) -> WingBoxResult<WingBoxAnalysis> {
    input.validate()?;
    info!(
        "analysing '{}' at n = {} over {} stations",
        input.label,
        input.load_case.flight.load_factor,
        input.load_case.station_count()
    );

    let grid = input.station_grid()?;
    let y = grid.positions();

    let sections = SectionDistribution::compute(
        &grid,
        &input.planform,
        &input.spars,
        &input.thickness,
        &input.stringers,
    )?;

    let loads = InternalLoads::solve(&grid, &input.planform, &input.load_case)?;

    let response = BeamResponse::solve(
        &y,
        &loads.bending_moment_nm,
        &sections.moment_of_inertia(),
        &loads.torque_nm,
        &sections.torsional_constant(),
        &input.material,
    )?;

    let mass = half_wing_mass(input, &sections, grid.len());
    debug!("mass breakdown: {mass:?}");

    let max_deflection = response.max_deflection_m();
    let summary = ResponseSummary {
        total_mass_kg: mass.total_kg(),
        max_deflection_m: Meters(max_deflection),
        max_deflection_pct_span: max_deflection / input.planform.span_m * 100.0,
        max_twist_deg: Radians(response.max_twist_rad()).into(),
        tip_deflection_m: Meters(response.tip_deflection_m()),
        tip_twist_deg: Radians(response.twist_rad.last().copied().unwrap_or(0.0)).into(),
        load_factor: input.load_case.flight.load_factor,
    };

    if !summary.max_deflection_pct_span.is_finite() || !summary.max_twist_deg.0.is_finite() {
        return Err(WingBoxError::internal("Summary is not finite"));
    }

    info!(
        "'{}': mass {:.1} kg, max deflection {:.3} m ({:.2} % span), max twist {:.3} deg",
        input.label,
        summary.total_mass_kg,
        max_deflection,
        summary.max_deflection_pct_span,
        summary.max_twist_deg.0
    );

    let diagnostics = loads.diagnostics.clone();

    Ok(WingBoxAnalysis {
        label: input.label.clone(),
        y_m: y,
        sections: SectionArrays::from_distribution(&sections),
        loads,
        response,
        mass,
        summary,
        diagnostics,
    })
}

fn half_wing_mass(
    input: &WingBoxInput,
    sections: &SectionDistribution,
    stations: usize,
) -> MassBreakdown {
    let half_span = input.planform.half_span_m();
    let root = SectionGeometry::at(0.0, &input.planform, &input.spars, &input.thickness);
    let tip = SectionGeometry::at(half_span, &input.planform, &input.spars, &input.thickness);
    MassBreakdown::compute(
        &root,
        &tip,
        half_span,
        input.material.density_kg_m3,
        input.stringers.stringer.area_m2(),
        sections.stringer_station_sum(),
        stations,
    )
}
