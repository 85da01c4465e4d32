use std::collections::HashMap;
use std::path::Path;

use crate::model::{AppRecord, NativeApp, Platform};

/// Records smaller than this are treated as placeholder or shortcut-only
/// registrations and dropped.
pub const MIN_APP_SIZE_BYTES: u64 = 1024;

/// Name fragments of system components, updates, and runtimes that should
/// never be surfaced as removal candidates. Matched case-insensitively as
/// substrings; deliberately conservative.
const WINDOWS_SYSTEM_COMPONENTS: &[&str] = &[
    "Microsoft Visual C++",
    "Windows Driver Package",
    "Hotfix",
    "Update for Microsoft",
    "Security Update for Microsoft",
    "Service Pack",
    "Definition Update",
    "Language Pack",
    "Windows Setup",
    "Microsoft .NET Framework",
    "Microsoft ASP.NET",
    "Microsoft SQL Server",
    "Microsoft Silverlight",
    "Microsoft OneDrive",
    "Microsoft Edge",
    "Windows App Runtime",
];

fn deny_list(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Windows => WINDOWS_SYSTEM_COMPONENTS,
        // Bundles and packages do not double-register hotfix noise.
        Platform::Macos | Platform::Linux => &[],
    }
}

/// Map an adapter-native record onto the canonical shape, defaulting every
/// absent field (empty string for text, 0 for size, `None` for dates).
pub fn normalize(native: NativeApp) -> AppRecord {
    match native {
        NativeApp::Windows(raw) => {
            let mut record = AppRecord::new(raw.name, Platform::Windows);
            record.install_location = raw.install_location;
            record.size_bytes = raw.size_bytes;
            record.install_date = raw.install_date;
            record.removal_command = raw.uninstall_string;
            record.icon_path = raw.icon_path;
            record.publisher = raw.publisher;
            record.version = raw.version;
            record.provenance = raw.registry_path;
            record
        }
        NativeApp::Macos(raw) => {
            let mut record = AppRecord::new(raw.name, Platform::Macos);
            record.install_location = raw.bundle_path.display().to_string();
            record.size_bytes = raw.size_bytes;
            record.removal_command = format!("rm -rf '{}'", raw.bundle_path.display());
            record.version = raw.version;
            // The bundle identifier is diagnostic, not a vendor name.
            record.provenance = if raw.bundle_id.is_empty() {
                raw.bundle_path.display().to_string()
            } else {
                format!("{} ({})", raw.bundle_path.display(), raw.bundle_id)
            };
            record
        }
        NativeApp::Linux(raw) => {
            let mut record = AppRecord::new(raw.name.clone(), Platform::Linux);
            record.size_bytes = raw.size_bytes;
            record.removal_command = raw.remove_command;
            record.version = raw.version;
            record.provenance = format!("{}:{}", raw.manager, raw.name);
            record
        }
    }
}

/// Collapse records that share a display name. Applies only to the Windows
/// registry family, where the same program registers in several hives;
/// last-seen wins. Other platforms pass through untouched.
pub fn dedup_by_name(records: Vec<AppRecord>) -> Vec<AppRecord> {
    let mut kept: Vec<AppRecord> = Vec::with_capacity(records.len());
    let mut seen: HashMap<String, usize> = HashMap::new();

    for record in records {
        if record.source_platform != Platform::Windows {
            kept.push(record);
            continue;
        }
        match seen.get(&record.name) {
            Some(&index) => kept[index] = record,
            None => {
                seen.insert(record.name.clone(), kept.len());
                kept.push(record);
            }
        }
    }
    kept
}

/// Is this record a genuine, removable, user-facing application?
pub fn is_valid(record: &AppRecord) -> bool {
    let name = record.name.trim();
    if name.is_empty() {
        return false;
    }

    let lower = name.to_lowercase();
    if deny_list(record.source_platform)
        .iter()
        .any(|fragment| lower.contains(&fragment.to_lowercase()))
    {
        return false;
    }

    // A record the user could neither remove nor verify is useless.
    let has_removal = record.has_removal_command();
    let has_location = !record.install_location.trim().is_empty()
        && Path::new(&record.install_location).exists();
    if !has_removal && !has_location {
        return false;
    }

    if record.size_bytes < MIN_APP_SIZE_BYTES {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LinuxNative, MacNative, WindowsNative};
    use std::path::PathBuf;

    fn windows_record(name: &str) -> AppRecord {
        let mut record = AppRecord::new(name.to_string(), Platform::Windows);
        record.removal_command = "uninstall.exe".to_string();
        record.size_bytes = 50 * 1024 * 1024;
        record
    }

    #[test]
    fn whitespace_only_names_are_invalid() {
        assert!(!is_valid(&windows_record("   ")));
        assert!(!is_valid(&windows_record("")));
        assert!(is_valid(&windows_record("Blender")));
    }

    #[test]
    fn system_component_fragments_are_denied() {
        assert!(!is_valid(&windows_record("Microsoft Visual C++ 2015 Redistributable")));
        assert!(!is_valid(&windows_record("Security Update for Microsoft Office")));
        assert!(!is_valid(&windows_record("hotfix KB123456")));
    }

    #[test]
    fn deny_list_is_windows_only() {
        let mut record = AppRecord::new("Hotfix Manager".to_string(), Platform::Linux);
        record.removal_command = "sudo apt remove hotfix-manager".to_string();
        record.size_bytes = 5 * 1024 * 1024;
        assert!(is_valid(&record));
    }

    #[test]
    fn records_without_removal_path_or_location_are_invalid() {
        let mut record = AppRecord::new("Orphan".to_string(), Platform::Windows);
        record.size_bytes = 10 * 1024 * 1024;
        assert!(!is_valid(&record));

        record.install_location = "/definitely/not/here".to_string();
        assert!(!is_valid(&record));

        record.removal_command = "uninstall.exe".to_string();
        assert!(is_valid(&record));
    }

    #[test]
    fn an_existing_install_location_substitutes_for_a_removal_command() {
        let dir = tempfile::tempdir().unwrap();
        let mut record = AppRecord::new("Verifiable".to_string(), Platform::Windows);
        record.install_location = dir.path().display().to_string();
        record.size_bytes = 10 * 1024 * 1024;
        assert!(is_valid(&record));
    }

    #[test]
    fn tiny_registrations_are_invalid() {
        let mut record = windows_record("Shortcut Only");
        record.size_bytes = 1023;
        assert!(!is_valid(&record));
        record.size_bytes = 1024;
        assert!(is_valid(&record));
    }

    #[test]
    fn dedup_collapses_windows_names_last_seen_wins() {
        let mut first = windows_record("Steam");
        first.provenance = "HKLM".to_string();
        let mut second = windows_record("Steam");
        second.provenance = "HKCU".to_string();
        let other = windows_record("Blender");

        let deduped = dedup_by_name(vec![first, second, other]);
        assert_eq!(deduped.len(), 2);
        let steam = deduped.iter().find(|r| r.name == "Steam").unwrap();
        assert_eq!(steam.provenance, "HKCU");
    }

    #[test]
    fn dedup_leaves_other_platforms_alone() {
        let a = AppRecord::new("tool".to_string(), Platform::Linux);
        let b = AppRecord::new("tool".to_string(), Platform::Linux);
        assert_eq!(dedup_by_name(vec![a, b]).len(), 2);
    }

    #[test]
    fn windows_native_maps_every_field() {
        let raw = WindowsNative {
            name: "Steam".to_string(),
            install_location: r"C:\Games\Steam".to_string(),
            size_bytes: 4096,
            install_date: None,
            uninstall_string: r#""C:\Games\Steam\unins.exe""#.to_string(),
            icon_path: r"C:\Games\Steam\steam.exe".to_string(),
            publisher: "Valve".to_string(),
            version: "1.0".to_string(),
            registry_path: r"HKLM\...\Steam".to_string(),
        };
        let record = normalize(NativeApp::Windows(raw));
        assert_eq!(record.source_platform, Platform::Windows);
        assert_eq!(record.name, "Steam");
        assert_eq!(record.publisher, "Valve");
        assert_eq!(record.removal_command, r#""C:\Games\Steam\unins.exe""#);
        assert_eq!(record.provenance, r"HKLM\...\Steam");
    }

    #[test]
    fn mac_native_synthesizes_a_delete_command() {
        let raw = MacNative {
            name: "Notes".to_string(),
            bundle_path: PathBuf::from("/Applications/Notes.app"),
            size_bytes: 2048,
            version: "2.1".to_string(),
            bundle_id: "com.example.notes".to_string(),
        };
        let record = normalize(NativeApp::Macos(raw));
        assert_eq!(record.removal_command, "rm -rf '/Applications/Notes.app'");
        assert_eq!(record.install_location, "/Applications/Notes.app");
        assert_eq!(record.source_platform, Platform::Macos);
        assert_eq!(record.provenance, "/Applications/Notes.app (com.example.notes)");
        // The vendor field stays empty; bundles carry no publisher string.
        assert!(record.publisher.is_empty());
    }

    #[test]
    fn mac_native_without_bundle_id_keeps_plain_path_provenance() {
        let raw = MacNative {
            name: "Bare".to_string(),
            bundle_path: PathBuf::from("/Applications/Bare.app"),
            size_bytes: 2048,
            version: String::new(),
            bundle_id: String::new(),
        };
        let record = normalize(NativeApp::Macos(raw));
        assert_eq!(record.provenance, "/Applications/Bare.app");
    }

    #[test]
    fn linux_native_carries_manager_provenance() {
        let raw = LinuxNative {
            name: "curl".to_string(),
            version: "8.5.0".to_string(),
            size_bytes: 0,
            remove_command: "sudo apt remove curl".to_string(),
            manager: "dpkg".to_string(),
        };
        let record = normalize(NativeApp::Linux(raw));
        assert_eq!(record.provenance, "dpkg:curl");
        assert!(record.install_location.is_empty());
    }
}
