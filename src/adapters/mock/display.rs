//! Display surface that records every event.

use std::sync::{Arc, Mutex};

use crate::traits::DisplaySurface;

/// One outbound display event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    Label(String),
    DeviceEnabled(bool),
    TransparencyEnabled(bool),
}

/// Records display events for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    events: Arc<Mutex<Vec<DisplayEvent>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DisplayEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Every label set so far, in order.
    pub fn labels(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                DisplayEvent::Label(label) => Some(label.clone()),
                _ => None,
            })
            .collect()
    }

    /// The most recent label.
    pub fn label(&self) -> Option<String> {
        self.labels().pop()
    }

    pub fn device_enabled(&self) -> bool {
        self.last_flag(|event| match event {
            DisplayEvent::DeviceEnabled(enabled) => Some(*enabled),
            _ => None,
        })
    }

    pub fn transparency_enabled(&self) -> bool {
        self.last_flag(|event| match event {
            DisplayEvent::TransparencyEnabled(enabled) => Some(*enabled),
            _ => None,
        })
    }

    fn last_flag(&self, pick: impl Fn(&DisplayEvent) -> Option<bool>) -> bool {
        self.events
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(pick)
            .unwrap_or(false)
    }

    fn push(&self, event: DisplayEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl DisplaySurface for RecordingSurface {
    fn set_device_label(&self, label: &str) {
        self.push(DisplayEvent::Label(label.to_string()));
    }

    fn set_device_enabled(&self, enabled: bool) {
        self.push(DisplayEvent::DeviceEnabled(enabled));
    }

    fn set_transparency_enabled(&self, enabled: bool) {
        self.push(DisplayEvent::TransparencyEnabled(enabled));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_surface_latest_values() {
        let surface = RecordingSurface::new();
        assert_eq!(surface.label(), None);
        assert!(!surface.device_enabled());

        surface.set_device_label("Connecting...");
        surface.set_device_enabled(true);
        surface.set_device_label("My device");
        surface.set_device_enabled(false);
        surface.set_transparency_enabled(true);

        assert_eq!(surface.labels(), vec!["Connecting...", "My device"]);
        assert_eq!(surface.label().as_deref(), Some("My device"));
        assert!(!surface.device_enabled());
        assert!(surface.transparency_enabled());
        assert_eq!(surface.events().len(), 5);
    }
}
