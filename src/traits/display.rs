//! Display surface trait.

/// Outbound events to the tray menu.
///
/// Every call is idempotent: re-sending the same label or flag is harmless.
/// Calls are made while the reconciler holds its state lock, so
/// implementations must not block or call back into the reconciler.
pub trait DisplaySurface: Send + Sync {
    fn set_device_label(&self, label: &str);

    fn set_device_enabled(&self, enabled: bool);

    fn set_transparency_enabled(&self, enabled: bool);
}
