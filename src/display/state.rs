//! Projection of reconciliation state onto the tray menu.

use std::fmt;

use super::label::{LabelStyle, CONNECTING_LABEL};
use crate::reconciler::ReconciliationState;
use crate::traits::DisplaySurface;

/// The two clickable menu items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItem {
    MyDevice,
    Transparency,
}

impl MenuItem {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuItem::MyDevice => "my_device",
            MenuItem::Transparency => "transparency",
        }
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the menu currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pub label: String,
    pub device_enabled: bool,
    pub transparency_enabled: bool,
}

impl DisplayState {
    /// Render `state` in the given label style.
    ///
    /// Both connecting states disable the items; any authenticated state
    /// enables them. The count is shown only when entitled.
    pub fn project(state: &ReconciliationState, style: LabelStyle) -> Self {
        match state {
            ReconciliationState::Unauthenticated | ReconciliationState::Authenticating => Self {
                label: CONNECTING_LABEL.to_string(),
                device_enabled: false,
                transparency_enabled: false,
            },
            ReconciliationState::Authenticated {
                failure_count,
                entitled,
            } => {
                let shown = if *entitled { *failure_count } else { None };
                Self {
                    label: style.device_label(shown),
                    device_enabled: true,
                    transparency_enabled: true,
                }
            }
        }
    }

    pub fn is_enabled(&self, item: MenuItem) -> bool {
        match item {
            MenuItem::MyDevice => self.device_enabled,
            MenuItem::Transparency => self.transparency_enabled,
        }
    }

    /// Push every field to `surface`.
    pub fn push_all(&self, surface: &dyn DisplaySurface) {
        surface.set_device_label(&self.label);
        surface.set_device_enabled(self.device_enabled);
        surface.set_transparency_enabled(self.transparency_enabled);
    }

    /// Push only the fields that differ from `previous`.
    pub fn push_changes(&self, previous: &DisplayState, surface: &dyn DisplaySurface) {
        if self.label != previous.label {
            surface.set_device_label(&self.label);
        }
        if self.device_enabled != previous.device_enabled {
            surface.set_device_enabled(self.device_enabled);
        }
        if self.transparency_enabled != previous.transparency_enabled {
            surface.set_transparency_enabled(self.transparency_enabled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{DisplayEvent, RecordingSurface};

    fn authenticated(failure_count: Option<u32>, entitled: bool) -> ReconciliationState {
        ReconciliationState::Authenticated {
            failure_count,
            entitled,
        }
    }

    #[test]
    fn test_connecting_disables_items() {
        for state in [
            ReconciliationState::Unauthenticated,
            ReconciliationState::Authenticating,
        ] {
            let display = DisplayState::project(&state, LabelStyle::Emoji);
            assert_eq!(display.label, "Connecting...");
            assert!(!display.is_enabled(MenuItem::MyDevice));
            assert!(!display.is_enabled(MenuItem::Transparency));
        }
    }

    #[test]
    fn test_authenticated_enables_items() {
        let display = DisplayState::project(&authenticated(Some(3), true), LabelStyle::Emoji);
        assert_eq!(display.label, "🔴 My device (3)");
        assert!(display.device_enabled);
        assert!(display.transparency_enabled);
    }

    #[test]
    fn test_not_entitled_suppresses_count() {
        for style in [LabelStyle::Emoji, LabelStyle::Text] {
            let display = DisplayState::project(&authenticated(Some(5), false), style);
            assert_eq!(display.label, "My device");
            assert!(display.device_enabled);
        }
    }

    #[test]
    fn test_push_changes_only_sends_diff() {
        let surface = RecordingSurface::new();
        let connecting =
            DisplayState::project(&ReconciliationState::Unauthenticated, LabelStyle::Text);
        let authenticating =
            DisplayState::project(&ReconciliationState::Authenticating, LabelStyle::Text);
        let ready = DisplayState::project(&authenticated(Some(1), true), LabelStyle::Text);

        authenticating.push_changes(&connecting, &surface);
        assert!(surface.events().is_empty());

        ready.push_changes(&authenticating, &surface);
        assert_eq!(
            surface.events(),
            vec![
                DisplayEvent::Label("My device (1 issue)".to_string()),
                DisplayEvent::DeviceEnabled(true),
                DisplayEvent::TransparencyEnabled(true),
            ]
        );
    }

    #[test]
    fn test_push_all_sends_every_field() {
        let surface = RecordingSurface::new();
        DisplayState::project(&ReconciliationState::Unauthenticated, LabelStyle::Emoji)
            .push_all(&surface);
        assert_eq!(surface.events().len(), 3);
        assert_eq!(surface.label().as_deref(), Some("Connecting..."));
    }
}
