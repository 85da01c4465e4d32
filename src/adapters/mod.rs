use crate::model::NativeApp;

pub mod bundle;
pub mod packages;
pub mod registry;

/// Enumerate raw application records from the current platform's native
/// metadata source. Enumeration failures inside an adapter are recovered
/// locally (logged under `verbose`) and surface only as fewer records.
pub fn enumerate_native(verbose: bool) -> Vec<NativeApp> {
    #[cfg(windows)]
    {
        registry::enumerate(verbose)
    }
    #[cfg(target_os = "macos")]
    {
        bundle::enumerate(verbose)
    }
    #[cfg(not(any(windows, target_os = "macos")))]
    {
        packages::enumerate(verbose)
    }
}
