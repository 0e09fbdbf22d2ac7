//! Centralized color theme for the dashboard.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

use crate::core::threat::{Glyph, Severity};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Cyan: primary accent, focused borders, header shield.
pub const PRIMARY: Color = Color::Rgb(0x22, 0xD3, 0xEE);
/// Light cyan: hints, secondary focus.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x67, 0xE8, 0xF9);

// ── Backgrounds ─────────────────────────────────────────────────────────────

/// Near-black navy: base background.
pub const BG_BASE: Color = Color::Rgb(0x0B, 0x12, 0x20);
/// Surface: badges, elevated rows.
pub const BG_SURFACE: Color = Color::Rgb(0x1E, 0x29, 0x3B);

// ── Text ────────────────────────────────────────────────────────────────────

/// Primary text.
pub const TEXT: Color = Color::Rgb(0xE2, 0xE8, 0xF0);
/// Muted text: secondary labels.
pub const TEXT_MUTED: Color = Color::Rgb(0x94, 0xA3, 0xB8);
/// Dim text: borders, faint hints.
pub const TEXT_DIM: Color = Color::Rgb(0x47, 0x55, 0x69);

// ── Severity tiers ──────────────────────────────────────────────────────────

pub const CRITICAL: Color = Color::Rgb(0xEF, 0x44, 0x44);
pub const HIGH: Color = Color::Rgb(0xF9, 0x73, 0x16);
pub const MEDIUM: Color = Color::Rgb(0xEA, 0xB3, 0x08);
pub const LOW: Color = Color::Rgb(0x3B, 0x82, 0xF6);
pub const SAFE: Color = Color::Rgb(0x22, 0xC5, 0x5E);

// ── Semantic ────────────────────────────────────────────────────────────────

pub const ERROR: Color = CRITICAL;
pub const SUCCESS: Color = SAFE;
pub const WARNING: Color = HIGH;
pub const INFO: Color = LOW;

// ── Icons ───────────────────────────────────────────────────────────────────

pub const ICON_SHIELD: &str = "⛨";
pub const ICON_ALERT: &str = "⚠";
pub const ICON_TRENDING: &str = "↗";
pub const ICON_EYE: &str = "◉";
pub const ICON_ACTIVITY: &str = "∿";
pub const ICON_SERVER: &str = "▤";
pub const ICON_LOCK: &str = "⚿";

/// Terminal symbol for a feed glyph.
pub fn glyph_symbol(glyph: Glyph) -> &'static str {
    match glyph {
        Glyph::Bug => "☣",
        Glyph::Zap => "ϟ",
        Glyph::Network => "⇄",
        Glyph::Shield => ICON_SHIELD,
        Glyph::Activity => ICON_ACTIVITY,
    }
}

/// Color for a severity tier.
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Critical => CRITICAL,
        Severity::High => HIGH,
        Severity::Medium => MEDIUM,
        Severity::Low => LOW,
        Severity::Safe => SAFE,
    }
}

// ── Style helpers ───────────────────────────────────────────────────────────

/// Accent bold text (titles, active items).
pub fn title() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

/// Focused border style.
pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

/// Unfocused border style.
pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Muted label text.
pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

/// Dim text for faint items.
pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Key hint style (e.g., "q:quit").
pub fn key_hint() -> Style {
    Style::default().fg(PRIMARY_LIGHT).add_modifier(Modifier::BOLD)
}

/// Outlined severity badge, e.g. ` CRITICAL `.
pub fn severity_badge(severity: Severity) -> Style {
    Style::default()
        .fg(severity_color(severity))
        .add_modifier(Modifier::BOLD)
}

/// Secondary badge (model label).
pub fn secondary_badge() -> Style {
    Style::default().fg(TEXT).bg(BG_SURFACE)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(PRIMARY)
        .add_modifier(Modifier::BOLD)
}

// ── Block builders ──────────────────────────────────────────────────────────

/// A bordered block with focused styling.
pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_focused())
}
