//! Text reports for the terminal.

use std::fmt::Write;

use wingbox_core::calculations::wing_box::{ResponseSummary, WingBoxAnalysis};
use wingbox_core::errors::WingBoxResult;
use wingbox_core::units::Millimeters;

const RULE: &str = "═══════════════════════════════════════════════";

/// Summary of one analysis: mass breakdown, peak deflection, peak twist.
pub fn render_summary(analysis: &WingBoxAnalysis) -> String {
    let s = &analysis.summary;
    let m = &analysis.mass;
    let mut out = String::new();

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "  WING BOX: {}", analysis.label);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Stations:  {} over {:.3} m half span (n = {})",
        analysis.station_count(),
        analysis.y_m.last().copied().unwrap_or(0.0),
        s.load_factor
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Mass (half wing):");
    let _ = writeln!(out, "  Top skin     {:>9.1} kg", m.top_skin_kg);
    let _ = writeln!(out, "  Bottom skin  {:>9.1} kg", m.bottom_skin_kg);
    let _ = writeln!(out, "  Front spar   {:>9.1} kg", m.front_spar_kg);
    let _ = writeln!(out, "  Rear spar    {:>9.1} kg", m.rear_spar_kg);
    let _ = writeln!(out, "  Stringers    {:>9.1} kg", m.stringers_kg);
    let _ = writeln!(out, "  Total        {:>9.1} kg", s.total_mass_kg);
    let _ = writeln!(out);
    let _ = writeln!(out, "Response:");
    let _ = writeln!(
        out,
        "  max |v|  = {:.1} mm ({:.2} % of span)",
        Millimeters::from(s.max_deflection_m).value(),
        s.max_deflection_pct_span
    );
    let _ = writeln!(
        out,
        "  tip v    = {:.1} mm",
        Millimeters::from(s.tip_deflection_m).value()
    );
    let _ = writeln!(out, "  max |φ|  = {:.3} deg", s.max_twist_deg.value());
    let _ = writeln!(out, "  tip φ    = {:.3} deg", s.tip_twist_deg.value());

    if let (Some(shear), Some(moment), Some(torque)) = (
        analysis.loads.shear_n.first(),
        analysis.loads.bending_moment_nm.first(),
        analysis.loads.torque_nm.first(),
    ) {
        let _ = writeln!(out);
        let _ = writeln!(out, "Root loads:");
        let _ = writeln!(out, "  V = {:.1} kN", shear / 1e3);
        let _ = writeln!(out, "  M = {:.1} kN·m", moment / 1e3);
        let _ = writeln!(out, "  T = {:.1} kN·m", torque / 1e3);
    }

    if !analysis.diagnostics.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Warnings:");
        for note in &analysis.diagnostics {
            let _ = writeln!(out, "  - {note}");
        }
    }
    let _ = writeln!(out, "{RULE}");
    out
}

/// Side-by-side comparison of study designs.
pub fn render_comparison(rows: &[(String, WingBoxResult<ResponseSummary>)]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24} {:>10} {:>12} {:>9} {:>11}",
        "Design", "Mass kg", "max |v| mm", "% span", "max |φ| deg"
    );
    for (label, summary) in rows {
        match summary {
            Ok(s) => {
                let _ = writeln!(
                    out,
                    "{:<24} {:>10.1} {:>12.1} {:>9.2} {:>11.3}",
                    label,
                    s.total_mass_kg,
                    Millimeters::from(s.max_deflection_m).value(),
                    s.max_deflection_pct_span,
                    s.max_twist_deg.value()
                );
            }
            Err(e) => {
                let _ = writeln!(out, "{:<24} [{}] {}", label, e.error_code(), e);
            }
        }
    }
    out
}

/// Lightest design that ran successfully.
pub fn lightest(rows: &[(String, WingBoxResult<ResponseSummary>)]) -> Option<&str> {
    rows.iter()
        .filter_map(|(label, s)| s.as_ref().ok().map(|s| (label, s.total_mass_kg)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(label, _)| label.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wingbox_core::errors::WingBoxError;
    use wingbox_core::units::{Degrees, Meters};

    fn summary(mass: f64) -> ResponseSummary {
        ResponseSummary {
            total_mass_kg: mass,
            max_deflection_m: Meters(1.5),
            max_deflection_pct_span: 6.25,
            max_twist_deg: Degrees(2.0),
            tip_deflection_m: Meters(1.5),
            tip_twist_deg: Degrees(-2.0),
            load_factor: 3.75,
        }
    }

    #[test]
    fn test_summary_report() {
        use wingbox_core::calculations::wing_box::{calculate, WingBoxInput};
        use wingbox_core::loads::LoadCase;

        let n = 30;
        let lift = (0..n).map(|i| 15_000.0 * (1.0 - i as f64 / n as f64)).collect();
        let input = WingBoxInput::reference("Report", LoadCase::new(lift, vec![0.0; n]));
        let text = render_summary(&calculate(&input).unwrap());

        assert!(text.contains("WING BOX: Report"));
        assert!(text.contains("Stringers"));
        assert!(text.contains("Root loads"));
        assert!(!text.contains("Warnings"));
    }

    #[test]
    fn test_comparison_table() {
        let rows = vec![
            ("baseline".to_string(), Ok(summary(800.0))),
            (
                "broken".to_string(),
                Err(WingBoxError::invalid_input("t", "0", "Must be positive")),
            ),
        ];
        let table = render_comparison(&rows);
        assert!(table.contains("baseline"));
        assert!(table.contains("1500.0"));
        assert!(table.contains("INVALID_INPUT"));
    }

    #[test]
    fn test_lightest() {
        let rows = vec![
            ("heavy".to_string(), Ok(summary(900.0))),
            ("light".to_string(), Ok(summary(700.0))),
            (
                "failed".to_string(),
                Err(WingBoxError::internal("boom")),
            ),
        ];
        assert_eq!(lightest(&rows), Some("light"));
        assert_eq!(lightest(&[]), None);
    }
}
