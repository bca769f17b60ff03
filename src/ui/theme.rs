//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Deep violet of the hero and the "how we see" section.
pub const ABYSS: Color = Color::Rgb(0x1B, 0x0D, 0x39);
/// Navy of the technology and environment sections.
pub const DEEP: Color = Color::Rgb(0x0A, 0x1E, 0x3A);
/// Solid navigation background once the page is scrolled.
pub const NAV_SOLID: Color = Color::Rgb(0x00, 0x1A, 0x33);
pub const FOAM: Color = Color::Rgb(0xE9, 0xF3, 0xF4);
pub const GLOW: Color = Color::Rgb(0x54, 0xD1, 0xE8);
pub const MUTED: Color = Color::Rgb(0x7A, 0x8C, 0xA3);

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── sections ───────────────────────────────────────────────
    pub fn abyss() -> Style {
        Style::default().bg(ABYSS).fg(FOAM)
    }

    pub fn deep() -> Style {
        Style::default().bg(DEEP).fg(FOAM)
    }

    pub fn heading_style() -> Style {
        Style::default().fg(FOAM).add_modifier(Modifier::BOLD)
    }

    pub fn body_style() -> Style {
        Style::default().fg(FOAM)
    }

    pub fn muted_style() -> Style {
        Style::default().fg(MUTED)
    }

    pub fn accent_style() -> Style {
        Style::default().fg(GLOW).add_modifier(Modifier::BOLD)
    }

    /// Not yet revealed: barely there.
    pub fn hidden_style() -> Style {
        Style::default().fg(MUTED).add_modifier(Modifier::DIM)
    }

    pub fn active_style() -> Style {
        Style::default()
            .fg(ABYSS)
            .bg(GLOW)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_style() -> Style {
        Style::default()
            .fg(GLOW)
            .bg(NAV_SOLID)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn nav_transparent() -> Style {
        Style::default().fg(FOAM)
    }

    pub fn nav_solid() -> Style {
        Style::default().bg(NAV_SOLID).fg(FOAM)
    }

    pub fn border_style() -> Style {
        Style::default().fg(MUTED)
    }

    pub fn card_border_hover() -> Style {
        Style::default().fg(GLOW)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(NAV_SOLID).fg(FOAM)
    }

    pub fn backdrop_style() -> Style {
        Style::default().bg(Color::Black).fg(MUTED)
    }
}
