//! Color palettes for the terminal user interface.

use ratatui::style::Color;

use crate::fields::ThemeMode;

// The four accents mirror the board columns:
// To Do blue, In Progress yellow, Done green, Frozen cyan.

/// Accent color for each board column, indexed by column order.
pub const COLUMN_ACCENTS: [Color; 4] = [
    Color::Blue,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
];

/// Resolved colors for one theme mode.
pub struct Palette {
    pub base_fg: Color,
    pub base_bg: Color,
    pub card_bg: Color,
    pub selected_fg: Color,
}

/// Resolve the palette for a theme preference.
/// `System` leaves foreground/background at the terminal defaults.
pub fn palette_for(mode: ThemeMode) -> Palette {
    match mode {
        ThemeMode::Light => Palette {
            base_fg: Color::Black,
            base_bg: Color::White,
            card_bg: Color::Gray,
            selected_fg: Color::White,
        },
        ThemeMode::Dark => Palette {
            base_fg: Color::White,
            base_bg: Color::Black,
            card_bg: Color::DarkGray,
            selected_fg: Color::Black,
        },
        ThemeMode::System => Palette {
            base_fg: Color::Reset,
            base_bg: Color::Reset,
            card_bg: Color::DarkGray,
            selected_fg: Color::Black,
        },
    }
}
