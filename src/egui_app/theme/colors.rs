//! Color Palettes
//!
//! Indigo-accented light theme and a slate dark theme.

use eframe::egui::Color32;

use crate::egui_app::types::ThemePreference;

/// Every color the views draw with, for one theme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color32,
    pub panel: Color32,
    pub top_bar: Color32,
    pub card: Color32,
    pub card_border: Color32,
    pub text: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub accent_text: Color32,
    pub danger: Color32,
    pub success: Color32,
}

pub const LIGHT: Palette = Palette {
    background: Color32::from_rgb(0xEE, 0xF2, 0xFF),
    panel: Color32::from_rgb(0xFF, 0xFF, 0xFF),
    top_bar: Color32::from_rgb(0xE0, 0xE7, 0xFF),
    card: Color32::from_rgb(0xEE, 0xF2, 0xFF),
    card_border: Color32::from_rgb(0xC7, 0xD2, 0xFE),
    text: Color32::from_rgb(0x37, 0x41, 0x51),
    text_muted: Color32::from_rgb(0x6B, 0x72, 0x80),
    accent: Color32::from_rgb(0x63, 0x66, 0xF1),
    accent_text: Color32::from_rgb(0x43, 0x38, 0xCA),
    danger: Color32::from_rgb(0xEF, 0x44, 0x44),
    success: Color32::from_rgb(0x16, 0xA3, 0x4A),
};

pub const DARK: Palette = Palette {
    background: Color32::from_rgb(0x11, 0x18, 0x27),
    panel: Color32::from_rgb(0x1F, 0x29, 0x37),
    top_bar: Color32::from_rgb(0x11, 0x18, 0x27),
    card: Color32::from_rgb(0x1F, 0x29, 0x37),
    card_border: Color32::from_rgb(0x37, 0x41, 0x51),
    text: Color32::from_rgb(0xD1, 0xD5, 0xDB),
    text_muted: Color32::from_rgb(0x9C, 0xA3, 0xAF),
    accent: Color32::from_rgb(0x63, 0x66, 0xF1),
    accent_text: Color32::from_rgb(0x81, 0x8C, 0xF8),
    danger: Color32::from_rgb(0xF8, 0x71, 0x71),
    success: Color32::from_rgb(0x4A, 0xDE, 0x80),
};

pub fn palette(theme: ThemePreference) -> Palette {
    match theme {
        ThemePreference::Light => LIGHT,
        ThemePreference::Dark => DARK,
    }
}
