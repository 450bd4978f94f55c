//! Palette and semantic styling for the widget.

use ratatui::style::{Color, Modifier, Style};

// ── Palette ───────────────────────────────────────────────────────────

pub const FOREGROUND: Color = Color::Rgb(205, 214, 244); // #cdd6f4
pub const MUTED: Color = Color::Rgb(127, 132, 156); // #7f849c
pub const ACCENT: Color = Color::Rgb(137, 220, 235); // #89dceb
pub const BORDER: Color = Color::Rgb(88, 91, 112); // #585b70

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for the widget block.
pub fn title_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Widget border.
pub fn border_default() -> Style {
    Style::default().fg(BORDER)
}

/// Counter cell text.
pub fn counter_style() -> Style {
    Style::default().fg(FOREGROUND)
}

/// Dimmed key hints in the status bar.
pub fn key_hint() -> Style {
    Style::default().fg(MUTED)
}

/// Highlighted key in the status bar.
pub fn key_hint_key() -> Style {
    Style::default().fg(ACCENT)
}
