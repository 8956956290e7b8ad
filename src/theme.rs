//! Theme preference persistence.
//!
//! The preference lives in its own `theme` slot next to the task collection
//! and is consumed only by the TUI palette; task state never depends on it.

use std::fs;
use std::io;
use std::path::Path;

use crate::fields::ThemeMode;

/// File name of the theme preference slot inside the data directory.
pub const THEME_SLOT: &str = "theme.json";

/// Load the stored theme preference, defaulting to `system` when the slot is
/// missing or unparseable.
pub fn load_theme(data_dir: &Path) -> ThemeMode {
    let path = data_dir.join(THEME_SLOT);
    match fs::read_to_string(&path) {
        Ok(buf) => serde_json::from_str(&buf).unwrap_or(ThemeMode::System),
        Err(_) => ThemeMode::System,
    }
}

/// Persist the theme preference.
pub fn save_theme(data_dir: &Path, mode: ThemeMode) -> io::Result<()> {
    let data = serde_json::to_string(&mode).unwrap();
    fs::write(data_dir.join(THEME_SLOT), data)
}

impl ThemeMode {
    /// Cycle through in the order the TUI's theme key uses.
    pub fn next(self) -> ThemeMode {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::System,
            ThemeMode::System => ThemeMode::Light,
        }
    }
}

/// Format a theme mode for display.
pub fn format_theme(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Light => "light",
        ThemeMode::Dark => "dark",
        ThemeMode::System => "system",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_theme(dir.path()), ThemeMode::System);

        save_theme(dir.path(), ThemeMode::Dark).unwrap();
        assert_eq!(load_theme(dir.path()), ThemeMode::Dark);
    }

    #[test]
    fn test_theme_slot_is_a_plain_json_string() {
        let dir = tempfile::tempdir().unwrap();
        save_theme(dir.path(), ThemeMode::Light).unwrap();
        let raw = fs::read_to_string(dir.path().join(THEME_SLOT)).unwrap();
        assert_eq!(raw, "\"light\"");
    }

    #[test]
    fn test_corrupt_theme_slot_falls_back_to_system() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(THEME_SLOT), "neon").unwrap();
        assert_eq!(load_theme(dir.path()), ThemeMode::System);
    }
}
