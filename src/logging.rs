//! Log setup for the binary.
//!
//! Logs go to stderr and, when a log directory can be created, to
//! `device-tray.log` inside it. The filter comes from `DEVICE_TRAY_LOG`
//! (same syntax as `RUST_LOG`) and defaults to `info`.

use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "DEVICE_TRAY_LOG";

/// Name of the log file inside [`log_dir`].
pub const LOG_FILE: &str = "device-tray.log";

const APP_DIR: &str = "DeviceTray";

/// Platform log directory for the agent.
///
/// `%LocalAppData%` on Windows, `~/Library/Logs` on macOS and the XDG state
/// directory elsewhere.
pub fn log_dir() -> Option<PathBuf> {
    let base = if cfg!(windows) {
        dirs::data_local_dir()
    } else if cfg!(target_os = "macos") {
        dirs::home_dir().map(|home| home.join("Library").join("Logs"))
    } else {
        dirs::state_dir().or_else(|| dirs::home_dir().map(|home| home.join(".local").join("state")))
    };
    base.map(|dir| dir.join(APP_DIR))
}

fn open_log_file() -> Result<(PathBuf, File), String> {
    let dir = log_dir().ok_or_else(|| "no log directory for this platform".to_string())?;
    fs::create_dir_all(&dir).map_err(|e| format!("create {}: {}", dir.display(), e))?;

    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("open {}: {}", path.display(), e))?;
    Ok((path, file))
}

/// Install the global subscriber. Returns the log file path, if any.
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init() -> Option<PathBuf> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let (path, file_layer, file_error) = match open_log_file() {
        Ok((path, file)) => {
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file));
            (Some(path), Some(layer), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .try_init()
        .is_ok();

    if let Some(e) = file_error {
        tracing::error!("file logging disabled: {}", e);
    }
    if installed {
        path
    } else {
        None
    }
}
