//! Display surface that logs menu updates.
//!
//! Used by the headless binary in place of a real tray.

use std::sync::{Mutex, PoisonError};

use tracing::info;

use crate::traits::DisplaySurface;

#[derive(Debug, Default)]
struct MenuSnapshot {
    label: String,
    device_enabled: bool,
    transparency_enabled: bool,
}

/// Logs each distinct menu change at `info`.
#[derive(Debug, Default)]
pub struct LogSurface {
    menu: Mutex<MenuSnapshot>,
}

impl LogSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current label, as last set.
    pub fn label(&self) -> String {
        self.menu
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .label
            .clone()
    }
}

impl DisplaySurface for LogSurface {
    fn set_device_label(&self, label: &str) {
        let mut menu = self.menu.lock().unwrap_or_else(PoisonError::into_inner);
        if menu.label != label {
            info!(label, "menu label updated");
            menu.label = label.to_string();
        }
    }

    fn set_device_enabled(&self, enabled: bool) {
        let mut menu = self.menu.lock().unwrap_or_else(PoisonError::into_inner);
        if menu.device_enabled != enabled {
            info!(enabled, "my device item toggled");
            menu.device_enabled = enabled;
        }
    }

    fn set_transparency_enabled(&self, enabled: bool) {
        let mut menu = self.menu.lock().unwrap_or_else(PoisonError::into_inner);
        if menu.transparency_enabled != enabled {
            info!(enabled, "transparency item toggled");
            menu.transparency_enabled = enabled;
        }
    }
}
