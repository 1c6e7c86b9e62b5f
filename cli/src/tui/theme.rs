//! Colors and styles of the interactive view.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

// ── Palette ─────────────────────────────────────────────────────────────────

/// Outline of unselected regions.
pub const REGION: Color = Color::Rgb(0x00, 0x96, 0x88);
/// Outline of the selected region.
pub const SELECTED: Color = Color::Rgb(0xFF, 0x7F, 0x50);
/// Rubber band while drawing a new region.
pub const DRAWING: Color = Color::Rgb(0x42, 0xA5, 0xF5);

/// Background around the page.
pub const BG_BASE: Color = Color::Rgb(0x0A, 0x19, 0x19);

pub const TEXT: Color = Color::Rgb(0xE0, 0xE0, 0xE0);
pub const TEXT_MUTED: Color = Color::Rgb(0x80, 0x80, 0x80);
pub const TEXT_DIM: Color = Color::Rgb(0x50, 0x50, 0x50);

pub const ERROR: Color = Color::Rgb(0xEF, 0x53, 0x50);
pub const SUCCESS: Color = Color::Rgb(0x66, 0xBB, 0x6A);
pub const INFO: Color = Color::Rgb(0x42, 0xA5, 0xF5);

// ── Style helpers ───────────────────────────────────────────────────────────

pub fn title() -> Style {
    Style::default().fg(SELECTED).add_modifier(Modifier::BOLD)
}

/// Key names in the help and status bar.
pub fn key() -> Style {
    Style::default().fg(REGION).add_modifier(Modifier::BOLD)
}

pub fn key_hint() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(SELECTED)
        .add_modifier(Modifier::BOLD)
}

/// Badge shown while regions have unsaved edits.
pub fn modified_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(REGION)
        .add_modifier(Modifier::BOLD)
}

/// Greyscale pixel of a page preview.
pub fn gray(level: u8) -> Color {
    Color::Rgb(level, level, level)
}

// ── Block builders ──────────────────────────────────────────────────────────

pub fn block(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(TEXT_DIM))
}

/// Bordered popup in the given accent color.
pub fn popup(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}
