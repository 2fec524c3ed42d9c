//! # Design Studies
//!
//! A `DesignStudy` holds several candidate wing-box designs so they can be
//! run and compared side by side. Studies serialize to `.wbs` files as
//! human-readable JSON.
//!
//! ```text
//! DesignStudy
//! ├── meta: StudyMetadata (version, engineer, title, timestamps)
//! └── designs: HashMap<Uuid, WingBoxInput>
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wingbox_core::calculations::wing_box::{calculate, WingBoxAnalysis, WingBoxInput};
use wingbox_core::errors::WingBoxResult;

/// Current schema version for .wbs files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root container written to `.wbs` files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignStudy {
    pub meta: StudyMetadata,

    /// Candidate designs, keyed by UUID
    pub designs: HashMap<Uuid, WingBoxInput>,
}

/// Study header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,
    /// Responsible engineer
    pub engineer: String,
    /// Study title
    pub title: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl DesignStudy {
    /// Create an empty study.
    pub fn new(engineer: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        DesignStudy {
            meta: StudyMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                title: title.into(),
                created: now,
                modified: now,
            },
            designs: HashMap::new(),
        }
    }

    /// Add a design; returns the UUID assigned to it.
    pub fn add_design(&mut self, design: WingBoxInput) -> Uuid {
        let id = Uuid::new_v4();
        self.designs.insert(id, design);
        self.touch();
        id
    }

    /// Remove a design by UUID.
    pub fn remove_design(&mut self, id: &Uuid) -> Option<WingBoxInput> {
        let design = self.designs.remove(id);
        if design.is_some() {
            self.touch();
        }
        design
    }

    /// Get a design by UUID.
    pub fn get_design(&self, id: &Uuid) -> Option<&WingBoxInput> {
        self.designs.get(id)
    }

    pub fn design_count(&self) -> usize {
        self.designs.len()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Designs ordered by label, then UUID, for stable output.
    pub fn designs_by_label(&self) -> Vec<(&Uuid, &WingBoxInput)> {
        let mut designs: Vec<_> = self.designs.iter().collect();
        designs.sort_by(|a, b| a.1.label.cmp(&b.1.label).then(a.0.cmp(b.0)));
        designs
    }

    /// Run every design. A failing design does not stop the others.
    pub fn run_all(&self) -> Vec<(Uuid, String, WingBoxResult<WingBoxAnalysis>)> {
        self.designs_by_label()
            .into_iter()
            .map(|(id, design)| (*id, design.label.clone(), calculate(design)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wingbox_core::loads::LoadCase;

    fn design(label: &str) -> WingBoxInput {
        let n = 40;
        let lift = (0..n).map(|i| 20_000.0 * (1.0 - i as f64 / n as f64)).collect();
        WingBoxInput::reference(label, LoadCase::new(lift, vec![0.0; n]))
    }

    #[test]
    fn test_study_creation() {
        let study = DesignStudy::new("A. Engineer", "Rib spacing trade");
        assert_eq!(study.meta.version, SCHEMA_VERSION);
        assert_eq!(study.meta.title, "Rib spacing trade");
        assert_eq!(study.design_count(), 0);
    }

    #[test]
    fn test_add_remove_design() {
        let mut study = DesignStudy::new("Engineer", "Study");
        let id = study.add_design(design("B"));
        assert!(study.get_design(&id).is_some());
        assert!(study.meta.modified >= study.meta.created);

        assert!(study.remove_design(&id).is_some());
        assert!(study.remove_design(&id).is_none());
        assert_eq!(study.design_count(), 0);
    }

    #[test]
    fn test_run_all_sorted_by_label() {
        let mut study = DesignStudy::new("Engineer", "Study");
        study.add_design(design("thick"));
        study.add_design(design("baseline"));
        let mut broken = design("broken");
        broken.thickness.t_sheet_spar_m = 0.0;
        study.add_design(broken);

        let results = study.run_all();
        let labels: Vec<&str> = results.iter().map(|(_, l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["baseline", "broken", "thick"]);
        assert!(results[0].2.is_ok());
        assert!(results[1].2.is_err());
    }

    #[test]
    fn test_study_serialization() {
        let mut study = DesignStudy::new("Jane", "Skins");
        let id = study.add_design(design("baseline"));
        let json = serde_json::to_string_pretty(&study).unwrap();
        assert!(json.contains("Skins"));

        let roundtrip: DesignStudy = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.get_design(&id).map(|d| d.label.as_str()), Some("baseline"));
    }
}
