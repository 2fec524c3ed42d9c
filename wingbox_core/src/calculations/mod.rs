//! # Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - input parameters (JSON-serializable)
//! - `*Analysis` / `*Response` - results (JSON-serializable)
//! - `calculate(input) -> WingBoxResult<...>` - pure calculation function
//!
//! ## Available Calculations
//!
//! - [`wing_box`] - full pipeline: sections, loads, response, mass, summary
//! - [`beam_response`] - slope, deflection and twist from moment and torque

pub mod beam_response;
pub mod wing_box;

pub use beam_response::BeamResponse;
pub use wing_box::{calculate, ResponseSummary, SectionArrays, WingBoxAnalysis, WingBoxInput};
