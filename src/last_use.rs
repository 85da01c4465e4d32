use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Duration, Local};
use walkdir::WalkDir;

use crate::adapters::registry::extract_quoted_path;
use crate::model::{AppRecord, Platform};

/// How far in the past the "no data at all" sentinel sits.
pub const UNKNOWN_IDLE_DAYS: i64 = 365;

/// At most this many executable candidates are probed for an access time.
const MAX_CANDIDATES: usize = 3;

/// Infer a best-guess last-used timestamp for a record.
///
/// Ordered fallback chain, first tier that yields a value wins:
/// executable access times, install-directory mtime, install date, and
/// finally a far-past sentinel so the scorer never sees "no data".
pub fn resolve_last_used(record: &AppRecord, now: DateTime<Local>) -> DateTime<Local> {
    let tiers: [&dyn Fn() -> Option<DateTime<Local>>; 3] = [
        &|| newest_executable_access(record),
        &|| install_dir_mtime(record),
        &|| record.install_date,
    ];

    for tier in tiers {
        if let Some(timestamp) = tier() {
            return timestamp;
        }
    }

    now - Duration::days(UNKNOWN_IDLE_DAYS)
}

fn newest_executable_access(record: &AppRecord) -> Option<DateTime<Local>> {
    let candidates = find_executables(record);
    candidates
        .iter()
        .take(MAX_CANDIDATES)
        .filter_map(|path| access_time(path))
        .max()
}

fn install_dir_mtime(record: &AppRecord) -> Option<DateTime<Local>> {
    if record.install_location.is_empty() {
        return None;
    }
    let path = Path::new(&record.install_location);
    if !path.exists() {
        return None;
    }
    let metadata = fs::metadata(path).ok()?;
    metadata.modified().ok().map(to_local)
}

/// Locate candidate executables for a record, platform-specific heuristic.
fn find_executables(record: &AppRecord) -> Vec<PathBuf> {
    match record.source_platform {
        Platform::Windows => windows_executables(record),
        Platform::Macos => macos_executables(record),
        // Package-managed apps have no single obvious binary to probe;
        // resolution falls through to the later tiers.
        Platform::Linux => Vec::new(),
    }
}

fn windows_executables(record: &AppRecord) -> Vec<PathBuf> {
    let mut executables = Vec::new();

    if !record.icon_path.is_empty() {
        let icon = Path::new(&record.icon_path);
        if icon.exists() && record.icon_path.to_lowercase().ends_with(".exe") {
            executables.push(icon.to_path_buf());
        }
    }

    if let Some(exe) = extract_quoted_path(&record.removal_command) {
        let exe = Path::new(&exe);
        if exe.exists() {
            executables.push(exe.to_path_buf());
        }
    }

    if record.install_location.is_empty() {
        return executables;
    }
    let install_dir = Path::new(&record.install_location);
    if !install_dir.exists() {
        return executables;
    }

    let conventional = [
        format!("{}.exe", record.name.replace(' ', "")),
        "main.exe".to_string(),
        "app.exe".to_string(),
        "program.exe".to_string(),
    ];
    for candidate in &conventional {
        let path = install_dir.join(candidate);
        if path.exists() {
            executables.push(path);
            break;
        }
    }

    if executables.is_empty()
        && let Some(first) = first_exe_in_tree(install_dir)
    {
        executables.push(first);
    }

    executables
}

fn macos_executables(record: &AppRecord) -> Vec<PathBuf> {
    if record.install_location.is_empty() {
        return Vec::new();
    }
    let macos_dir = Path::new(&record.install_location).join("Contents").join("MacOS");
    let Ok(entries) = fs::read_dir(&macos_dir) else {
        return Vec::new();
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_file() {
            return vec![path];
        }
    }
    Vec::new()
}

fn first_exe_in_tree(root: &Path) -> Option<PathBuf> {
    for entry in WalkDir::new(root).into_iter().flatten() {
        if entry.file_type().is_file()
            && entry.file_name().to_string_lossy().to_lowercase().ends_with(".exe")
        {
            return Some(entry.into_path());
        }
    }
    None
}

fn access_time(path: &Path) -> Option<DateTime<Local>> {
    let metadata = fs::metadata(path).ok()?;
    metadata.accessed().ok().map(to_local)
}

fn to_local(time: SystemTime) -> DateTime<Local> {
    DateTime::<Local>::from(time)
}
