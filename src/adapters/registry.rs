use chrono::{DateTime, Local, NaiveDate, TimeZone};

/// Extract the first double-quoted substring out of an uninstall command,
/// e.g. `"C:\Program Files\Foo\unins.exe" /SILENT` -> the exe path.
pub fn extract_quoted_path(command: &str) -> Option<String> {
    let start = command.find('"')?;
    let rest = &command[start + 1..];
    let end = rest.find('"')?;
    let path = &rest[..end];
    if path.is_empty() { None } else { Some(path.to_string()) }
}

/// Parse a registry `InstallDate` value. Only the 8-digit `YYYYMMDD` form is
/// accepted; anything else is treated as absent.
pub fn parse_install_date(value: &str) -> Option<DateTime<Local>> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let date = NaiveDate::parse_from_str(value, "%Y%m%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Local.from_local_datetime(&midnight).single()
}

#[cfg(windows)]
mod windows {
    use std::path::Path;

    use winreg::RegKey;
    use winreg::enums::{
        HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ, KEY_WOW64_32KEY, KEY_WOW64_64KEY,
    };

    use super::{extract_quoted_path, parse_install_date};
    use crate::model::{NativeApp, WindowsNative};

    const UNINSTALL_SUBKEY: &str = r"SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall";

    /// Enumerate installed programs from the per-machine (64-bit and 32-bit
    /// views) and per-user uninstall trees. A root that cannot be opened
    /// yields zero records; a subkey that cannot be read is skipped.
    pub fn enumerate(verbose: bool) -> Vec<NativeApp> {
        let roots = [
            ("HKLM (64-bit)", HKEY_LOCAL_MACHINE, KEY_READ | KEY_WOW64_64KEY),
            ("HKLM (32-bit)", HKEY_LOCAL_MACHINE, KEY_READ | KEY_WOW64_32KEY),
            ("HKCU", HKEY_CURRENT_USER, KEY_READ),
        ];

        let mut apps = Vec::new();
        for (label, hive, flags) in roots {
            match RegKey::predef(hive).open_subkey_with_flags(UNINSTALL_SUBKEY, flags) {
                Ok(root) => {
                    let found = scan_uninstall_root(&root, label, verbose);
                    if verbose {
                        eprintln!("{label}: {} entries", found.len());
                    }
                    apps.extend(found);
                }
                Err(err) => {
                    if verbose {
                        eprintln!("Skipping {label}: {err}");
                    }
                }
            }
        }
        apps
    }

    fn scan_uninstall_root(root: &RegKey, label: &str, verbose: bool) -> Vec<NativeApp> {
        let mut apps = Vec::new();
        for key_name in root.enum_keys().flatten() {
            let subkey = match root.open_subkey(&key_name) {
                Ok(subkey) => subkey,
                Err(err) => {
                    if verbose {
                        eprintln!("Skipping {label}\\{key_name}: {err}");
                    }
                    continue;
                }
            };

            let registry_path = format!("{label}\\{UNINSTALL_SUBKEY}\\{key_name}");
            if let Some(raw) = read_entry(&subkey, registry_path) {
                apps.push(NativeApp::Windows(raw));
            }
        }
        apps
    }

    fn read_entry(key: &RegKey, registry_path: String) -> Option<WindowsNative> {
        // No display name means this is not a user-facing registration.
        let name: String = key.get_value("DisplayName").ok()?;

        let uninstall_string: String = key
            .get_value("UninstallString")
            .or_else(|_| key.get_value("QuietUninstallString"))
            .unwrap_or_default();

        let install_location = key
            .get_value::<String, _>("InstallLocation")
            .ok()
            .filter(|location| !location.is_empty() && Path::new(location).exists())
            .or_else(|| {
                // Fall back to the directory of the quoted uninstaller path.
                let exe = extract_quoted_path(&uninstall_string)?;
                let parent = Path::new(&exe).parent()?;
                Some(parent.display().to_string())
            })
            .unwrap_or_default();

        let install_date = key
            .get_value::<String, _>("InstallDate")
            .ok()
            .and_then(|value| parse_install_date(&value));

        // EstimatedSize is recorded in kilobytes.
        let size_bytes = key
            .get_value::<u32, _>("EstimatedSize")
            .map(|kb| u64::from(kb) * 1024)
            .unwrap_or(0);

        Some(WindowsNative {
            name,
            install_location,
            size_bytes,
            install_date,
            uninstall_string,
            icon_path: key.get_value("DisplayIcon").unwrap_or_default(),
            publisher: key.get_value("Publisher").unwrap_or_default(),
            version: key.get_value("DisplayVersion").unwrap_or_default(),
            registry_path,
        })
    }
}

#[cfg(windows)]
pub use windows::enumerate;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn quoted_path_is_extracted() {
        let command = r#""C:\Program Files\Foo\unins000.exe" /SILENT"#;
        assert_eq!(
            extract_quoted_path(command).as_deref(),
            Some(r"C:\Program Files\Foo\unins000.exe")
        );
    }

    #[test]
    fn unquoted_command_yields_nothing() {
        assert_eq!(extract_quoted_path(r"C:\Foo\unins.exe /S"), None);
        assert_eq!(extract_quoted_path(""), None);
        assert_eq!(extract_quoted_path(r#""" /S"#), None);
    }

    #[test]
    fn eight_digit_dates_parse() {
        let date = parse_install_date("20240315").expect("valid date");
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 15));
    }

    #[test]
    fn malformed_dates_are_absent() {
        assert!(parse_install_date("2024-03-15").is_none());
        assert!(parse_install_date("202403").is_none());
        assert!(parse_install_date("2024031x").is_none());
        assert!(parse_install_date("99999999").is_none());
        assert!(parse_install_date("").is_none());
    }
}
