use std::fs;
use std::path::{Path, PathBuf};

use dirs_next as dirs;

use crate::model::{MacNative, NativeApp};
use crate::size::estimate_size;

/// Well-known application directories on macOS: the system-wide folder and
/// the per-user one.
pub fn default_roots() -> Vec<PathBuf> {
    let mut roots = vec![PathBuf::from("/Applications")];
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join("Applications"));
    }
    roots
}

/// Scan application directories for top-level `.app` bundles.
pub fn enumerate(verbose: bool) -> Vec<NativeApp> {
    scan_roots(&default_roots(), verbose)
}

pub fn scan_roots(roots: &[PathBuf], verbose: bool) -> Vec<NativeApp> {
    let mut apps = Vec::new();
    for root in roots {
        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(err) => {
                if verbose {
                    eprintln!("Skipping {}: {}", root.display(), err);
                }
                continue;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let is_bundle = path.is_dir()
                && path.extension().map(|ext| ext == "app").unwrap_or(false);
            if !is_bundle {
                continue;
            }

            if let Some(raw) = read_bundle(&path) {
                apps.push(NativeApp::Macos(raw));
            }
        }
    }
    apps
}

fn read_bundle(bundle_path: &Path) -> Option<MacNative> {
    let name = bundle_path.file_stem()?.to_string_lossy().to_string();
    if name.is_empty() {
        return None;
    }

    let (version, bundle_id) = read_info_plist(bundle_path);
    let size_bytes = estimate_size(bundle_path);

    Some(MacNative { name, bundle_path: bundle_path.to_path_buf(), size_bytes, version, bundle_id })
}

#[cfg(target_os = "macos")]
fn read_info_plist(bundle_path: &Path) -> (String, String) {
    let plist_path = bundle_path.join("Contents").join("Info.plist");
    let Ok(value) = plist::Value::from_file(&plist_path) else {
        return (String::new(), String::new());
    };
    let Some(dict) = value.as_dictionary() else {
        return (String::new(), String::new());
    };

    let string_key = |key: &str| {
        dict.get(key).and_then(|v| v.as_string()).unwrap_or_default().to_string()
    };
    (string_key("CFBundleShortVersionString"), string_key("CFBundleIdentifier"))
}

#[cfg(not(target_os = "macos"))]
fn read_info_plist(_bundle_path: &Path) -> (String, String) {
    (String::new(), String::new())
}
