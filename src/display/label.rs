//! Menu label rendering.

use std::fmt;
use std::str::FromStr;

/// Label shown while no episode has succeeded.
pub const CONNECTING_LABEL: &str = "Connecting...";

/// Base text of the device item.
pub const DEVICE_LABEL: &str = "My device";

/// How the device item reports failing policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// Colored status mark: "🟢 My device", "🔴 My device (2)".
    Emoji,
    /// Plain text: "My device (2 issues)".
    Text,
}

impl LabelStyle {
    /// Text on Windows, emoji elsewhere.
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            LabelStyle::Text
        } else {
            LabelStyle::Emoji
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelStyle::Emoji => "emoji",
            LabelStyle::Text => "text",
        }
    }

    /// Label for an authenticated device.
    ///
    /// `failing` is `None` when the count is unknown or suppressed; the
    /// label then carries no status mark at all.
    pub fn device_label(&self, failing: Option<u32>) -> String {
        let Some(count) = failing else {
            return DEVICE_LABEL.to_string();
        };

        match (self, count) {
            (LabelStyle::Emoji, 0) => format!("🟢 {}", DEVICE_LABEL),
            (LabelStyle::Emoji, n) => format!("🔴 {} ({})", DEVICE_LABEL, n),
            (LabelStyle::Text, 0) => DEVICE_LABEL.to_string(),
            (LabelStyle::Text, 1) => format!("{} (1 issue)", DEVICE_LABEL),
            (LabelStyle::Text, n) => format!("{} ({} issues)", DEVICE_LABEL, n),
        }
    }
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self::platform_default()
    }
}

impl fmt::Display for LabelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "emoji" => Ok(LabelStyle::Emoji),
            "text" => Ok(LabelStyle::Text),
            other => Err(format!("expected 'emoji' or 'text', got '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emoji_labels() {
        let style = LabelStyle::Emoji;
        assert_eq!(style.device_label(Some(0)), "🟢 My device");
        assert_eq!(style.device_label(Some(3)), "🔴 My device (3)");
        assert_eq!(style.device_label(None), "My device");
    }

    #[test]
    fn test_text_labels() {
        let style = LabelStyle::Text;
        assert_eq!(style.device_label(Some(0)), "My device");
        assert_eq!(style.device_label(Some(1)), "My device (1 issue)");
        assert_eq!(style.device_label(Some(7)), "My device (7 issues)");
        assert_eq!(style.device_label(None), "My device");
    }

    #[test]
    fn test_parse_style() {
        assert_eq!("emoji".parse::<LabelStyle>(), Ok(LabelStyle::Emoji));
        assert_eq!(" TEXT ".parse::<LabelStyle>(), Ok(LabelStyle::Text));
        assert!("fancy".parse::<LabelStyle>().is_err());
    }

    #[test]
    fn test_platform_default() {
        #[cfg(windows)]
        assert_eq!(LabelStyle::default(), LabelStyle::Text);
        #[cfg(not(windows))]
        assert_eq!(LabelStyle::default(), LabelStyle::Emoji);
    }
}
