//! Version and help output.

/// Version string from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One-line description printed by `--help`.
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Text printed by `--version`.
pub fn version_line() -> String {
    format!("device-tray {}", VERSION)
}

/// Text printed by `--help`.
pub fn help_line() -> String {
    format!("device-tray: {}", DESCRIPTION)
}
