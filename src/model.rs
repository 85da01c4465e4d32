use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::Serialize;

/// Operating-system family a record was discovered on. Fixed by the adapter
/// that produced the record and never changed downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Macos,
    Linux,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Macos => "macos",
            Platform::Linux => "linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tri-state recommendation produced by the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    SafeToRemove,
    Consider,
    LikelyNeeded,
}

impl Verdict {
    pub fn display_name(&self) -> &'static str {
        match self {
            Verdict::SafeToRemove => "safe to remove",
            Verdict::Consider => "consider",
            Verdict::LikelyNeeded => "likely needed",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Raw record produced by the Windows registry adapter.
#[derive(Debug, Clone, Default)]
pub struct WindowsNative {
    pub name: String,
    pub install_location: String,
    pub size_bytes: u64,
    pub install_date: Option<DateTime<Local>>,
    pub uninstall_string: String,
    pub icon_path: String,
    pub publisher: String,
    pub version: String,
    /// Registry key path this entry was read from.
    pub registry_path: String,
}

/// Raw record produced by the macOS application-bundle adapter.
#[derive(Debug, Clone, Default)]
pub struct MacNative {
    pub name: String,
    pub bundle_path: PathBuf,
    pub size_bytes: u64,
    pub version: String,
    pub bundle_id: String,
}

/// Raw record produced by the Linux package-manager adapter.
#[derive(Debug, Clone, Default)]
pub struct LinuxNative {
    pub name: String,
    pub version: String,
    pub size_bytes: u64,
    pub remove_command: String,
    /// Name of the package manager that listed this package.
    pub manager: String,
}

/// Closed set of adapter-native shapes, unified by the normalizer.
#[derive(Debug, Clone)]
pub enum NativeApp {
    Windows(WindowsNative),
    Macos(MacNative),
    Linux(LinuxNative),
}

impl NativeApp {
    pub fn platform(&self) -> Platform {
        match self {
            NativeApp::Windows(_) => Platform::Windows,
            NativeApp::Macos(_) => Platform::Macos,
            NativeApp::Linux(_) => Platform::Linux,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            NativeApp::Windows(raw) => &raw.name,
            NativeApp::Macos(raw) => &raw.name,
            NativeApp::Linux(raw) => &raw.name,
        }
    }
}

/// Canonical, normalized representation of one discovered application.
#[derive(Debug, Clone, Serialize)]
pub struct AppRecord {
    pub name: String,
    pub install_location: String,
    pub size_bytes: u64,
    pub install_date: Option<DateTime<Local>>,
    pub removal_command: String,
    pub icon_path: String,
    pub publisher: String,
    pub version: String,
    pub source_platform: Platform,
    /// Where the record came from (registry key, bundle path, package name).
    pub provenance: String,

    // Set by the last-use resolver and the scorer, never by an adapter.
    pub last_used_at: Option<DateTime<Local>>,
    pub days_idle: u64,
    pub size_gb: f64,
    pub score: f64,
    pub verdict: Option<Verdict>,
}

impl AppRecord {
    pub fn new(name: String, source_platform: Platform) -> Self {
        AppRecord {
            name,
            install_location: String::new(),
            size_bytes: 0,
            install_date: None,
            removal_command: String::new(),
            icon_path: String::new(),
            publisher: String::new(),
            version: String::new(),
            source_platform,
            provenance: String::new(),
            last_used_at: None,
            days_idle: 0,
            size_gb: 0.0,
            score: 0.0,
            verdict: None,
        }
    }

    pub fn has_removal_command(&self) -> bool {
        !self.removal_command.trim().is_empty()
    }
}

/// Result of one full scan, sorted by score (highest first).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub records: Vec<AppRecord>,
}

impl ScanReport {
    pub fn new(mut records: Vec<AppRecord>) -> Self {
        records.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        Self { records }
    }

    pub fn total_size(&self) -> u64 {
        self.records.iter().map(|record| record.size_bytes).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&AppRecord> {
        self.records.iter().find(|record| record.name.eq_ignore_ascii_case(name))
    }

    pub fn verdict_count(&self, verdict: Verdict) -> usize {
        self.records.iter().filter(|record| record.verdict == Some(verdict)).count()
    }
}
