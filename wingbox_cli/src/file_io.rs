//! # File I/O
//!
//! Study files and JSON inputs/outputs:
//! - **Atomic saves**: write to `<name>.<ext>.tmp`, fsync, rename over the target
//! - **File locking**: `<name>.<ext>.lock` holds an OS lock plus who took it
//! - **Version validation**: study files must match the schema major version
//!
//! Study files use the `.wbs` extension and contain JSON.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wingbox_core::errors::{WingBoxError, WingBoxResult};

use crate::study::{DesignStudy, SCHEMA_VERSION};

/// Hours after which a lock is considered abandoned
const STALE_LOCK_HOURS: i64 = 24;

/// Lock metadata stored in `.lock` files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier
    pub user_id: String,
    /// Machine where the lock was taken
    pub machine: String,
    /// Process holding the lock
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }
}

/// Login name of the user running this process.
pub fn current_user() -> String {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| "unknown".to_string())
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

/// Exclusive lock on a study file, released on drop.
///
/// Holds an fs2 OS lock on the lock file and records [`LockInfo`] in it so
/// other users can see who has the study open.
pub struct FileLock {
    lock_path: PathBuf,
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire the lock for `path`.
    ///
    /// # Errors
    ///
    /// [`WingBoxError::FileLocked`] if a live lock is held elsewhere.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> WingBoxResult<Self> {
        let lock_path = sibling_path(path, "lock");
        let info = LockInfo::new(user_id);

        if let Some(existing) = FileLock::check(path) {
            return Err(WingBoxError::file_locked(
                path.display().to_string(),
                format!("{} ({})", existing.user_id, existing.machine),
                existing.locked_at.to_rfc3339(),
            ));
        }

        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| file_error("create lock", &lock_path, e))?;

        lock_file.try_lock_exclusive().map_err(|_| {
            WingBoxError::file_locked(
                path.display().to_string(),
                "another process".to_string(),
                "unknown".to_string(),
            )
        })?;

        let lock_json = to_json(&info)?;
        lock_file
            .write_all(lock_json.as_bytes())
            .map_err(|e| file_error("write lock", &lock_path, e))?;
        lock_file
            .sync_all()
            .map_err(|e| file_error("sync lock", &lock_path, e))?;

        debug!("locked {}", path.display());
        Ok(FileLock {
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Who holds a live lock on `path`, if anyone.
    pub fn check(path: &Path) -> Option<LockInfo> {
        let lock_path = sibling_path(path, "lock");
        if !lock_path.exists() {
            return None;
        }
        read_json::<LockInfo>(&lock_path)
            .ok()
            .filter(|info| !is_lock_stale(info))
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// `study.wbs` -> `study.wbs.<suffix>`
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut sibling = path.to_path_buf();
    let extension = sibling
        .extension()
        .map(|e| format!("{}.{suffix}", e.to_string_lossy()))
        .unwrap_or_else(|| suffix.to_string());
    sibling.set_extension(extension);
    sibling
}

fn is_lock_stale(info: &LockInfo) -> bool {
    if hostname().as_deref() == Some(info.machine.as_str()) {
        #[cfg(unix)]
        {
            if fs::metadata(format!("/proc/{}", info.pid)).is_err() {
                return true;
            }
        }
    }
    (Utc::now() - info.locked_at).num_hours() > STALE_LOCK_HOURS
}

fn file_error(operation: &str, path: &Path, e: std::io::Error) -> WingBoxError {
    WingBoxError::file_error(operation, path.display().to_string(), e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> WingBoxResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| WingBoxError::SerializationError {
        reason: e.to_string(),
    })
}

/// Write any serializable value as pretty JSON, atomically.
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> WingBoxResult<()> {
    let json = to_json(value)?;
    let tmp_path = sibling_path(path, "tmp");

    let mut tmp_file =
        File::create(&tmp_path).map_err(|e| file_error("create temp file", &tmp_path, e))?;
    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| file_error("write temp file", &tmp_path, e))?;
    tmp_file
        .sync_all()
        .map_err(|e| file_error("sync temp file", &tmp_path, e))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        file_error("rename to final", path, e)
    })?;
    debug!("wrote {}", path.display());
    Ok(())
}

/// Read and parse a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> WingBoxResult<T> {
    let mut contents = String::new();
    File::open(path)
        .and_then(|mut file| file.read_to_string(&mut contents))
        .map_err(|e| file_error("read", path, e))?;
    serde_json::from_str(&contents).map_err(|e| WingBoxError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// Save a study atomically.
pub fn save_study(study: &DesignStudy, path: &Path) -> WingBoxResult<()> {
    write_json(study, path)
}

/// Load a study and check its schema version.
pub fn load_study(path: &Path) -> WingBoxResult<DesignStudy> {
    let study: DesignStudy = read_json(path)?;
    validate_version(&study.meta.version)?;
    Ok(study)
}

/// Load a study and report whether someone else holds its lock.
pub fn load_study_with_lock_check(path: &Path) -> WingBoxResult<(DesignStudy, Option<LockInfo>)> {
    let study = load_study(path)?;
    let lock = FileLock::check(path);
    if let Some(info) = &lock {
        warn!(
            "{} is locked by {} on {}; opened read-only",
            path.display(),
            info.user_id,
            info.machine
        );
    }
    Ok((study, lock))
}

/// Major versions must match; on 0.x the file's minor may not be newer.
fn validate_version(file_version: &str) -> WingBoxResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file = parse(file_version);
    let current = parse(SCHEMA_VERSION);
    let mismatch = || WingBoxError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    match (file.as_slice(), current.as_slice()) {
        ([file_major, ..], [current_major, ..]) if file_major != current_major => Err(mismatch()),
        ([0, file_minor, ..], [0, current_minor, ..]) if file_minor > current_minor => {
            Err(mismatch())
        }
        ([_, ..], [_, ..]) => Ok(()),
        _ => Err(mismatch()),
    }
}
