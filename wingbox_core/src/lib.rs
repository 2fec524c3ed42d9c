//! # wingbox_core - Wing-Box Deflection and Twist Engine
//!
//! `wingbox_core` computes the bending deflection and torsional twist of a
//! tapered, stringer-stiffened, single-cell wing box cantilevered from the
//! fuselage. It is meant for preliminary sizing: change the skin thickness
//! or the stringer schedule, rerun, compare mass, peak deflection and peak
//! twist.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: one immutable [`WingBoxInput`] in, one [`WingBoxAnalysis`] out
//! - **JSON-First**: every input and result implements Serialize/Deserialize
//! - **Rich Errors**: configuration problems are rejected before any numerics
//! - **No I/O**: files, printing and the bundled load tables live in the CLI
//!
//! ## Quick Start
//!
//! ```rust
//! use wingbox_core::{calculate, LoadCase, WingBoxInput};
//!
//! let n = 60;
//! let lift: Vec<f64> = (0..n).map(|i| 25_000.0 * (1.0 - i as f64 / (n - 1) as f64)).collect();
//! let input = WingBoxInput::reference("Baseline", LoadCase::new(lift, vec![0.0; n]));
//!
//! let analysis = calculate(&input).unwrap();
//! assert_eq!(analysis.deflection_m()[0], 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - planform, spar layout, sheet thicknesses, station grid
//! - [`stringers`] - stringer section and spanwise schedules
//! - [`section`] - four-wall section geometry at a station
//! - [`properties`] - neutral axis, I, J, enclosed area, mass
//! - [`loads`] - load case and internal shear, moment, torque
//! - [`calculations`] - beam response and the full pipeline
//! - [`math`] - cubic spline and tip-to-root integration
//! - [`materials`] - material presets
//! - [`units`] - unit newtypes used in summaries
//! - [`errors`] - structured error types

pub mod calculations;
pub mod errors;
pub mod geometry;
pub mod loads;
pub mod materials;
pub mod math;
pub mod properties;
pub mod section;
pub mod stringers;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, ResponseSummary, WingBoxAnalysis, WingBoxInput};
pub use errors::{WingBoxError, WingBoxResult};
pub use loads::LoadCase;
pub use materials::Material;
pub use stringers::{StringerLayout, StringerSchedule};
