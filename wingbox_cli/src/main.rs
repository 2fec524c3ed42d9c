//! # Wingbox CLI
//!
//! Command-line front end for `wingbox_core`.
//!
//! ```text
//! wingbox run <design.json> [--loads <loads.json>] [--json <out.json>]
//! wingbox reference
//! wingbox study new <file.wbs> <engineer> <title>
//! wingbox study add <file.wbs> <design.json> [--loads <loads.json>]
//! wingbox study show <file.wbs> <uuid>
//! wingbox study remove <file.wbs> <uuid>
//! wingbox study run <file.wbs>
//! ```
//!
//! A design file is a `WingBoxInput` in JSON; any field with a reference
//! value may be left out. Without a `load_case` (and without `--loads`) the
//! bundled reference load tables are used. Set `RUST_LOG=debug` for the
//! per-stage log.

mod file_io;
mod reference;
mod report;
mod study;

use std::path::Path;
use std::process::ExitCode;

use log::info;
use uuid::Uuid;
use wingbox_core::calculations::wing_box::{calculate, WingBoxInput};
use wingbox_core::errors::{WingBoxError, WingBoxResult};
use wingbox_core::loads::LoadCase;

use crate::file_io::{
    current_user, load_study, load_study_with_lock_check, read_json, save_study, write_json,
    FileLock,
};
use crate::study::DesignStudy;

const USAGE: &str = "\
usage:
  wingbox run <design.json> [--loads <loads.json>] [--json <out.json>]
  wingbox reference
  wingbox study new <file.wbs> <engineer> <title>
  wingbox study add <file.wbs> <design.json> [--loads <loads.json>]
  wingbox study show <file.wbs> <uuid>
  wingbox study remove <file.wbs> <uuid>
  wingbox study run <file.wbs>";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match dispatch(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!("{json}");
            }
            ExitCode::FAILURE
        }
    }
}

fn dispatch(args: &[String]) -> WingBoxResult<()> {
    let words: Vec<&str> = args.iter().map(String::as_str).collect();
    match words.as_slice() {
        ["run", design, rest @ ..] => {
            let options = Options::parse(rest)?;
            run(Path::new(design), &options)
        }
        ["reference"] => {
            let design = reference::reference_design()?;
            println!("{}", to_pretty_json(&design)?);
            Ok(())
        }
        ["study", "new", file, engineer, title] => study_new(Path::new(file), engineer, title),
        ["study", "add", file, design, rest @ ..] => {
            let options = Options::parse(rest)?;
            study_add(Path::new(file), Path::new(design), &options)
        }
        ["study", "show", file, id] => study_show(Path::new(file), &parse_id(id)?),
        ["study", "remove", file, id] => study_remove(Path::new(file), &parse_id(id)?),
        ["study", "run", file] => study_run(Path::new(file)),
        _ => Err(usage_error(args)),
    }
}

fn usage_error(args: &[String]) -> WingBoxError {
    WingBoxError::invalid_input("arguments", args.join(" "), USAGE)
}

fn parse_id(raw: &str) -> WingBoxResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|e| WingBoxError::invalid_input("design id", raw, e.to_string()))
}

fn design_not_found(path: &Path, id: &Uuid) -> WingBoxError {
    WingBoxError::invalid_input(
        "design id",
        id.to_string(),
        format!("No such design in {}", path.display()),
    )
}

/// `--loads` and `--json` flags.
#[derive(Debug, Default, PartialEq)]
struct Options<'a> {
    loads: Option<&'a str>,
    json_out: Option<&'a str>,
}

impl<'a> Options<'a> {
    fn parse(rest: &[&'a str]) -> WingBoxResult<Self> {
        let mut options = Options::default();
        let mut iter = rest.iter();
        while let Some(flag) = iter.next() {
            let value = iter.next().copied();
            match (*flag, value) {
                ("--loads", Some(path)) => options.loads = Some(path),
                ("--json", Some(path)) => options.json_out = Some(path),
                _ => {
                    return Err(WingBoxError::invalid_input(
                        "arguments",
                        flag.to_string(),
                        format!("Unknown or incomplete option\n{USAGE}"),
                    ))
                }
            }
        }
        Ok(options)
    }
}

/// Read a design file, filling in the load case from `--loads` or the bundled tables.
fn load_design(path: &Path, loads: Option<&str>) -> WingBoxResult<WingBoxInput> {
    let mut value: serde_json::Value = read_json(path)?;
    let object = value.as_object_mut().ok_or_else(|| WingBoxError::SerializationError {
        reason: format!("{} must contain a JSON object", path.display()),
    })?;

    let load_case = match loads {
        Some(loads_path) => Some(read_json::<LoadCase>(Path::new(loads_path))?),
        None if !object.contains_key("load_case") => Some(reference::reference_load_case()?),
        None => None,
    };
    if let Some(case) = load_case {
        let case_value = serde_json::to_value(case).map_err(|e| WingBoxError::SerializationError {
            reason: e.to_string(),
        })?;
        object.insert("load_case".to_string(), case_value);
    }
    if !object.contains_key("label") {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "design".to_string());
        object.insert("label".to_string(), serde_json::Value::String(stem));
    }

    serde_json::from_value(value).map_err(|e| WingBoxError::SerializationError {
        reason: format!("Invalid design in {}: {}", path.display(), e),
    })
}

fn run(design_path: &Path, options: &Options) -> WingBoxResult<()> {
    let design = load_design(design_path, options.loads)?;
    let analysis = calculate(&design)?;
    print!("{}", report::render_summary(&analysis));

    if let Some(out) = options.json_out {
        write_json(&analysis, Path::new(out))?;
        println!("Results written to {out}");
    }
    Ok(())
}

fn study_new(path: &Path, engineer: &str, title: &str) -> WingBoxResult<()> {
    if path.exists() {
        return Err(WingBoxError::file_error(
            "create study",
            path.display().to_string(),
            "File already exists",
        ));
    }
    let lock = FileLock::acquire(path, current_user())?;
    save_study(&DesignStudy::new(engineer, title), path)?;
    info!("created {} as {}", path.display(), lock.info.user_id);
    println!("Created study '{}' at {}", title, path.display());
    Ok(())
}

fn study_add(path: &Path, design_path: &Path, options: &Options) -> WingBoxResult<()> {
    let design = load_design(design_path, options.loads)?;
    design.validate()?;

    let lock = FileLock::acquire(path, current_user())?;
    let mut study = load_study(path)?;
    let label = design.label.clone();
    let id = study.add_design(design);
    save_study(&study, path)?;
    info!("{} added '{label}' to {}", lock.info.user_id, path.display());
    println!("Added '{label}' as {id}");
    Ok(())
}

fn study_show(path: &Path, id: &Uuid) -> WingBoxResult<()> {
    let (study, _lock_info) = load_study_with_lock_check(path)?;
    let design = study.get_design(id).ok_or_else(|| design_not_found(path, id))?;
    println!("{}", to_pretty_json(design)?);
    Ok(())
}

fn study_remove(path: &Path, id: &Uuid) -> WingBoxResult<()> {
    let lock = FileLock::acquire(path, current_user())?;
    let mut study = load_study(path)?;
    let design = study.remove_design(id).ok_or_else(|| design_not_found(path, id))?;
    save_study(&study, path)?;
    info!("{} removed '{}' from {}", lock.info.user_id, design.label, path.display());
    println!("Removed '{}' ({id})", design.label);
    Ok(())
}

fn study_run(path: &Path) -> WingBoxResult<()> {
    let (study, _lock_info) = load_study_with_lock_check(path)?;
    println!(
        "{} ({} designs, engineer {}, modified {})",
        study.meta.title,
        study.design_count(),
        study.meta.engineer,
        study.meta.modified.format("%Y-%m-%d %H:%M UTC")
    );
    println!();

    let rows: Vec<_> = study
        .run_all()
        .into_iter()
        .map(|(_, label, result)| (label, result.map(|analysis| analysis.summary)))
        .collect();
    print!("{}", report::render_comparison(&rows));
    if let Some(label) = report::lightest(&rows) {
        println!();
        println!("Lightest: {label}");
    }
    Ok(())
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> WingBoxResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| WingBoxError::SerializationError {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        temp_dir().join(format!("wingbox_cli_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_options_parse() {
        let opts = Options::parse(&["--loads", "l.json", "--json", "o.json"]).unwrap();
        assert_eq!(opts.loads, Some("l.json"));
        assert_eq!(opts.json_out, Some("o.json"));
        assert!(Options::parse(&["--json"]).is_err());
        assert!(Options::parse(&["--bogus", "x"]).is_err());
    }

    #[test]
    fn test_unknown_command_is_usage_error() {
        let err = dispatch(&["fly".to_string()]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_design_without_loads_uses_reference_tables() {
        let path = temp_path("thin.json");
        fs::write(&path, r#"{ "thickness": { "t_sheet_spar_m": 0.0005, "t_sheet_hor_m": 0.006 } }"#)
            .unwrap();
        let design = load_design(&path, None).unwrap();
        assert_eq!(design.load_case.station_count(), 500);
        assert_eq!(design.thickness.t_sheet_hor_m, 0.006);
        assert!(design.label.starts_with("wingbox_cli_"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_loads_flag_overrides_design_loads() {
        let design_path = temp_path("design.json");
        let loads_path = temp_path("loads.json");
        fs::write(&design_path, r#"{ "label": "custom" }"#).unwrap();
        fs::write(
            &loads_path,
            r#"{ "lift_n_per_m": [0, 100, 80, 50, 0], "pitching_moment_nm_per_m": [0, 0, 0, 0, 0] }"#,
        )
        .unwrap();

        let design = load_design(&design_path, loads_path.to_str()).unwrap();
        assert_eq!(design.label, "custom");
        assert_eq!(design.load_case.station_count(), 5);

        let _ = fs::remove_file(&design_path);
        let _ = fs::remove_file(&loads_path);
    }

    #[test]
    fn test_study_workflow() {
        let study_path = temp_path("workflow.wbs");
        let design_path = temp_path("candidate.json");
        let _ = fs::remove_file(&study_path);
        fs::write(&design_path, r#"{ "label": "candidate" }"#).unwrap();

        study_new(&study_path, "Tester", "Workflow").unwrap();
        assert!(study_new(&study_path, "Tester", "Again").is_err());
        study_add(&study_path, &design_path, &Options::default()).unwrap();

        let study = load_study(&study_path).unwrap();
        assert_eq!(study.design_count(), 1);
        assert!(FileLock::check(&study_path).is_none());
        study_run(&study_path).unwrap();

        let _ = fs::remove_file(&study_path);
        let _ = fs::remove_file(&design_path);
    }

    #[test]
    fn test_study_add_waits_for_lock_holder() {
        let study_path = temp_path("held.wbs");
        let design_path = temp_path("late.json");
        let _ = fs::remove_file(&study_path);
        fs::write(&design_path, r#"{ "label": "late" }"#).unwrap();
        save_study(&DesignStudy::new("Tester", "Held"), &study_path).unwrap();

        let holder = FileLock::acquire(&study_path, "someone else").unwrap();
        let err = study_add(&study_path, &design_path, &Options::default()).unwrap_err();
        assert_eq!(err.error_code(), "FILE_LOCKED");
        assert_eq!(load_study(&study_path).unwrap().design_count(), 0);

        drop(holder);
        study_add(&study_path, &design_path, &Options::default()).unwrap();
        assert_eq!(load_study(&study_path).unwrap().design_count(), 1);

        let _ = fs::remove_file(&study_path);
        let _ = fs::remove_file(&design_path);
    }

    #[test]
    fn test_study_show_and_remove() {
        let study_path = temp_path("remove.wbs");
        let _ = fs::remove_file(&study_path);
        let mut study = DesignStudy::new("Tester", "Remove");
        let id = study.add_design(reference::reference_design().unwrap());
        save_study(&study, &study_path).unwrap();

        study_show(&study_path, &id).unwrap();
        study_remove(&study_path, &id).unwrap();
        assert_eq!(load_study(&study_path).unwrap().design_count(), 0);

        let err = study_remove(&study_path, &id).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(FileLock::check(&study_path).is_none());
        assert!(parse_id("not-a-uuid").is_err());

        let _ = fs::remove_file(&study_path);
    }
}
