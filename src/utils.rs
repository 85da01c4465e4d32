use std::path::{Path, PathBuf};

use byte_unit::{Byte, UnitType};
use dirs_next as dirs;

/// Format bytes into a human-readable string.
pub fn format_bytes(size: u64) -> String {
    if size == 0 {
        "0 B".to_string()
    } else {
        let adjusted = Byte::from_u64(size).get_appropriate_unit(UnitType::Decimal);
        format!("{adjusted:#.2}")
    }
}

/// Replace the home directory prefix with `~` to make output easier to read.
pub fn display_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        let mut display = PathBuf::from("~");
        display.push(stripped);
        return display.display().to_string();
    }

    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bytes_formats_plainly() {
        assert_eq!(format_bytes(0), "0 B");
    }

    #[test]
    fn large_sizes_pick_a_bigger_unit() {
        let formatted = format_bytes(3 * 1024 * 1024 * 1024);
        assert!(formatted.contains("GB"), "unexpected format: {formatted}");
    }
}
