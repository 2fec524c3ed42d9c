//! # Stringer Layout
//!
//! Spanwise stringer schedules for the top and bottom skins.
//!
//! A schedule is a list of spanwise breakpoints (fractions of the half span),
//! each carrying a *pattern*: the chordwise locations of the stringers that run
//! up to that breakpoint. A zero entry means "no stringer in this slot". The
//! count at a spanwise fraction `f` is read from the first breakpoint `>= f`
//! (hold-to-next); past the last breakpoint the last pattern holds.
//!
//! ## Example
//!
//! ```rust
//! use wingbox_core::stringers::StringerSchedule;
//!
//! // Rows are stringer slots, columns are breakpoints.
//! let schedule = StringerSchedule::from_location_table(
//!     vec![0.5, 1.0],
//!     vec![vec![0.1, 0.1], vec![0.35, 0.0]],
//! ).unwrap();
//!
//! assert_eq!(schedule.count_at(0.3), 2);
//! assert_eq!(schedule.count_at(0.6), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, WingBoxError, WingBoxResult};

/// Serialized forms a stringer schedule can be written in.
///
/// `location_table` is the hand-written layout: one row per stringer slot,
/// one column per breakpoint. `pairs` lists the pattern of each breakpoint
/// directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum StringerScheduleSpec {
    /// One pattern per breakpoint
    Pairs {
        breakpoints: Vec<f64>,
        patterns: Vec<Vec<f64>>,
    },
    /// One row per stringer slot, one column per breakpoint
    LocationTable {
        breakpoints: Vec<f64>,
        locations: Vec<Vec<f64>>,
    },
}

/// Hold-to-next step schedule of stringer patterns.
///
/// Always valid once constructed: breakpoints are finite and strictly
/// increasing, every breakpoint has a pattern, all patterns share one width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StringerScheduleSpec", into = "StringerScheduleSpec")]
pub struct StringerSchedule {
    breakpoints: Vec<f64>,
    patterns: Vec<Vec<f64>>,
    counts: Vec<usize>,
}

impl StringerSchedule {
    /// Build a schedule from (breakpoint, pattern) pairs.
    ///
    /// # Errors
    ///
    /// [`WingBoxError::InvalidSchedule`] when the schedule is empty, the
    /// breakpoints are not strictly increasing or not finite, or the patterns
    /// differ in width or count.
    pub fn new(breakpoints: Vec<f64>, patterns: Vec<Vec<f64>>) -> WingBoxResult<Self> {
        if breakpoints.is_empty() {
            return Err(WingBoxError::invalid_schedule(
                "stringer schedule",
                "At least one breakpoint is required",
            ));
        }
        if patterns.len() != breakpoints.len() {
            return Err(WingBoxError::invalid_schedule(
                "stringer schedule",
                format!(
                    "{} breakpoints but {} patterns",
                    breakpoints.len(),
                    patterns.len()
                ),
            ));
        }
        if let Some(bad) = breakpoints.iter().find(|b| !b.is_finite()) {
            return Err(WingBoxError::invalid_schedule(
                "stringer schedule",
                format!("Breakpoint {bad} is not finite"),
            ));
        }
        if let Some(pair) = breakpoints.windows(2).find(|w| w[1] <= w[0]) {
            return Err(WingBoxError::invalid_schedule(
                "stringer schedule",
                format!(
                    "Breakpoints must be strictly increasing ({} followed by {})",
                    pair[0], pair[1]
                ),
            ));
        }
        let width = patterns[0].len();
        if let Some(row) = patterns.iter().position(|p| p.len() != width) {
            return Err(WingBoxError::invalid_schedule(
                "stringer schedule",
                format!(
                    "Pattern {} has {} slots, expected {}",
                    row,
                    patterns[row].len(),
                    width
                ),
            ));
        }

        let counts = patterns
            .iter()
            .map(|p| p.iter().filter(|&&loc| loc != 0.0).count())
            .collect();

        Ok(StringerSchedule {
            breakpoints,
            patterns,
            counts,
        })
    }

    /// Build a schedule from a location table (rows = stringer slots,
    /// columns = breakpoints).
    pub fn from_location_table(
        breakpoints: Vec<f64>,
        locations: Vec<Vec<f64>>,
    ) -> WingBoxResult<Self> {
        if let Some(row) = locations.iter().position(|r| r.len() != breakpoints.len()) {
            return Err(WingBoxError::invalid_schedule(
                "stringer schedule",
                format!(
                    "Location row {} has {} columns, expected one per breakpoint ({})",
                    row,
                    locations[row].len(),
                    breakpoints.len()
                ),
            ));
        }
        let patterns = (0..breakpoints.len())
            .map(|k| locations.iter().map(|row| row[k]).collect())
            .collect();
        StringerSchedule::new(breakpoints, patterns)
    }

    /// Uniform schedule: the same number of stringers along the whole span.
    pub fn uniform(count: usize) -> Self {
        let pattern = vec![1.0; count];
        StringerSchedule {
            breakpoints: vec![1.0],
            counts: vec![count],
            patterns: vec![pattern],
        }
    }

    /// Index of the breakpoint that governs `fraction` (hold-to-next, flat
    /// extrapolation past the last breakpoint).
    fn governing_index(&self, fraction: f64) -> usize {
        let next = self.breakpoints.partition_point(|&b| b < fraction);
        next.min(self.breakpoints.len() - 1)
    }

    /// Number of stringers present at a spanwise fraction.
    pub fn count_at(&self, fraction: f64) -> usize {
        self.counts[self.governing_index(fraction)]
    }

    /// Chordwise stringer pattern in force at a spanwise fraction.
    pub fn pattern_at(&self, fraction: f64) -> &[f64] {
        &self.patterns[self.governing_index(fraction)]
    }

    /// Spanwise breakpoints
    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    /// Largest stringer count anywhere along the span
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

impl TryFrom<StringerScheduleSpec> for StringerSchedule {
    type Error = WingBoxError;

    fn try_from(form: StringerScheduleSpec) -> Result<Self, Self::Error> {
        match form {
            StringerScheduleSpec::Pairs {
                breakpoints,
                patterns,
            } => StringerSchedule::new(breakpoints, patterns),
            StringerScheduleSpec::LocationTable {
                breakpoints,
                locations,
            } => StringerSchedule::from_location_table(breakpoints, locations),
        }
    }
}

impl From<StringerSchedule> for StringerScheduleSpec {
    fn from(schedule: StringerSchedule) -> Self {
        StringerScheduleSpec::Pairs {
            breakpoints: schedule.breakpoints,
            patterns: schedule.patterns,
        }
    }
}

/// Hat-section stringer geometry.
///
/// ```text
///        crown
///      <----->
///      ______         ^
///     |      |        | height
///  ___|      |___     v
///  <-->
///  flange
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HatStringer {
    /// Sheet thickness (m)
    pub thickness_m: f64,
    /// Height of the hat (m)
    pub height_m: f64,
    /// Width of each side flange (m)
    pub flange_width_m: f64,
    /// Width of the crown (m)
    pub crown_width_m: f64,
}

impl HatStringer {
    /// Cross-sectional area, corners counted once: t(2h + 2w_f + w_c) - 4t²
    pub fn area_m2(&self) -> f64 {
        let t = self.thickness_m;
        t * (2.0 * self.height_m + 2.0 * self.flange_width_m + self.crown_width_m) - 4.0 * t * t
    }

    /// Validate stringer dimensions.
    pub fn validate(&self) -> WingBoxResult<()> {
        require_positive("stringer.thickness_m", self.thickness_m)?;
        require_positive("stringer.height_m", self.height_m)?;
        require_positive("stringer.flange_width_m", self.flange_width_m)?;
        require_positive("stringer.crown_width_m", self.crown_width_m)?;
        require_positive("stringer.area_m2", self.area_m2())?;
        Ok(())
    }
}

impl Default for HatStringer {
    fn default() -> Self {
        HatStringer {
            thickness_m: 0.002,
            height_m: 0.05,
            flange_width_m: 0.01,
            crown_width_m: 0.05,
        }
    }
}

/// Stringer counts at one station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StringerCounts {
    /// Stringers on the top skin
    pub top: usize,
    /// Stringers on the bottom skin
    pub bottom: usize,
}

impl StringerCounts {
    /// Total stringers in the section
    pub fn total(&self) -> usize {
        self.top + self.bottom
    }
}

/// Top and bottom schedules plus the stringer section they place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringerLayout {
    /// Stringer section used on both skins
    #[serde(default)]
    pub stringer: HatStringer,
    /// Top skin schedule
    pub top: StringerSchedule,
    /// Bottom skin schedule
    pub bottom: StringerSchedule,
}

impl StringerLayout {
    /// Stringer counts at a spanwise fraction of the half span.
    pub fn counts_at(&self, fraction: f64) -> StringerCounts {
        StringerCounts {
            top: self.top.count_at(fraction),
            bottom: self.bottom.count_at(fraction),
        }
    }

    /// Validate the stringer section. Schedules validate on construction.
    pub fn validate(&self) -> WingBoxResult<()> {
        self.stringer.validate()
    }
}

impl Default for StringerLayout {
    fn default() -> Self {
        // Infallible literals; the reference layout.
        let top = StringerSchedule {
            breakpoints: vec![0.5, 1.0],
            patterns: vec![vec![0.1, 0.35, 0.6, 1.0], vec![0.1, 0.0, 0.0, 1.0]],
            counts: vec![4, 2],
        };
        let bottom = StringerSchedule {
            breakpoints: vec![0.4, 0.6, 1.0],
            patterns: vec![
                vec![0.1, 0.35, 0.65, 1.0],
                vec![0.1, 0.0, 0.0, 1.0],
                vec![0.1, 0.0, 0.0, 1.0],
            ],
            counts: vec![4, 2, 2],
        };
        StringerLayout {
            stringer: HatStringer::default(),
            top,
            bottom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_step() -> StringerSchedule {
        StringerSchedule::from_location_table(
            vec![0.5, 1.0],
            vec![vec![0.1, 0.1], vec![0.35, 0.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_hold_to_next_lookup() {
        let schedule = two_step();
        assert_eq!(schedule.count_at(0.3), 2);
        assert_eq!(schedule.count_at(0.6), 1);
    }

    #[test]
    fn test_exact_breakpoint_uses_its_own_pattern() {
        let schedule = two_step();
        assert_eq!(schedule.count_at(0.5), 2);
        assert_eq!(schedule.count_at(0.5 + 1e-12), 1);
        assert_eq!(schedule.count_at(1.0), 1);
    }

    #[test]
    fn test_flat_extrapolation() {
        let schedule = two_step();
        assert_eq!(schedule.count_at(0.0), 2);
        assert_eq!(schedule.count_at(-0.2), 2);
        assert_eq!(schedule.count_at(1.7), 1);
    }

    #[test]
    fn test_non_increasing_breakpoints_rejected() {
        let err = StringerSchedule::new(vec![0.5, 0.5], vec![vec![1.0], vec![1.0]]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SCHEDULE");

        let err = StringerSchedule::new(vec![0.6, 0.4], vec![vec![1.0], vec![1.0]]).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_ragged_table_rejected() {
        let result =
            StringerSchedule::from_location_table(vec![0.5, 1.0], vec![vec![0.1], vec![0.3, 0.0]]);
        assert!(result.is_err());
        assert!(StringerSchedule::new(vec![], vec![]).is_err());
    }

    #[test]
    fn test_reference_layout_counts() {
        let layout = StringerLayout::default();
        assert_eq!(layout.counts_at(0.2), StringerCounts { top: 4, bottom: 4 });
        assert_eq!(layout.counts_at(0.45), StringerCounts { top: 4, bottom: 2 });
        assert_eq!(layout.counts_at(0.8), StringerCounts { top: 2, bottom: 2 });
        assert_eq!(layout.top.max_count(), 4);
    }

    #[test]
    fn test_hat_stringer_area() {
        // 0.002 * (0.1 + 0.02 + 0.05) - 4 * 0.002² = 3.24e-4
        let area = HatStringer::default().area_m2();
        assert!((area - 3.24e-4).abs() < 1e-12);
    }

    #[test]
    fn test_schedule_json_forms() {
        let table = r#"{ "format": "location_table", "breakpoints": [0.5, 1.0],
                         "locations": [[0.1, 0.1], [0.35, 0.0]] }"#;
        let schedule: StringerSchedule = serde_json::from_str(table).unwrap();
        assert_eq!(schedule, two_step());

        let json = serde_json::to_string(&schedule).unwrap();
        assert!(json.contains("\"pairs\""));
        let roundtrip: StringerSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.count_at(0.3), 2);

        let bad = r#"{ "format": "pairs", "breakpoints": [1.0, 0.5], "patterns": [[1.0], [1.0]] }"#;
        assert!(serde_json::from_str::<StringerSchedule>(bad).is_err());
    }
}
