//! Bundled reference load tables.
//!
//! 500-station lift and pitching-moment distributions of the reference
//! aircraft at its design point, embedded at build time and parsed once.

use once_cell::sync::Lazy;
use serde::Deserialize;
use wingbox_core::calculations::wing_box::WingBoxInput;
use wingbox_core::errors::{WingBoxError, WingBoxResult};
use wingbox_core::loads::LoadCase;

const REFERENCE_LOADS_JSON: &str = include_str!("../data/reference_loads.json");

#[derive(Debug, Deserialize)]
struct ReferenceTables {
    lift_n_per_m: Vec<f64>,
    pitching_moment_nm_per_m: Vec<f64>,
}

static REFERENCE_TABLES: Lazy<WingBoxResult<ReferenceTables>> = Lazy::new(|| {
    serde_json::from_str(REFERENCE_LOADS_JSON).map_err(|e| WingBoxError::SerializationError {
        reason: format!("bundled reference loads: {e}"),
    })
});

/// Reference load case: bundled tables with the reference flight condition,
/// point load and engine.
pub fn reference_load_case() -> WingBoxResult<LoadCase> {
    let tables = REFERENCE_TABLES.as_ref().map_err(Clone::clone)?;
    Ok(LoadCase::new(
        tables.lift_n_per_m.clone(),
        tables.pitching_moment_nm_per_m.clone(),
    ))
}

/// Reference design under the reference load case.
pub fn reference_design() -> WingBoxResult<WingBoxInput> {
    Ok(WingBoxInput::reference("Reference", reference_load_case()?))
}
