//! # Theme
//!
//! Terminal palette derived from the brand tokens (primary `#131CC3`,
//! secondary `#FFF200`, grays `#D9D9D9`/`#737373`).

use ratatui::style::{Color, Modifier, Style};

use crate::api::ResourceKind;
use crate::core::prefs::{BACKGROUND_COUNT, Preferences, ThemeMode};

pub const PRIMARY: Color = Color::Rgb(0x13, 0x1C, 0xC3);
pub const SECONDARY: Color = Color::Rgb(0xFF, 0xF2, 0x00);
pub const GRAY_LIGHT: Color = Color::Rgb(0xD9, 0xD9, 0xD9);
pub const GRAY_MEDIUM: Color = Color::Rgb(0x73, 0x73, 0x73);
const WHITE: Color = Color::Rgb(0xFF, 0xFF, 0xFF);
const INK: Color = Color::Rgb(0x0F, 0x17, 0x2A);

/// Page backgrounds for light mode: yellow wash, blue-white, blue-yellow, plain.
const LIGHT_BACKGROUNDS: [Color; BACKGROUND_COUNT] = [
    Color::Rgb(0xFF, 0xFB, 0xCC),
    Color::Rgb(0xE8, 0xEA, 0xFB),
    Color::Rgb(0xF3, 0xF1, 0xD6),
    WHITE,
];

const DARK_BACKGROUNDS: [Color; BACKGROUND_COUNT] = [
    Color::Rgb(0x0F, 0x17, 0x2A),
    Color::Rgb(0x0B, 0x0F, 0x3D),
    Color::Rgb(0x1E, 0x1B, 0x0A),
    Color::Rgb(0x11, 0x11, 0x11),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    pub primary: Color,
    pub highlight: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_prefs(prefs: &Preferences) -> Self {
        let background = prefs.background_index();
        match prefs.theme {
            ThemeMode::Light => Self {
                background: LIGHT_BACKGROUNDS[background],
                surface: WHITE,
                text: INK,
                muted: GRAY_MEDIUM,
                primary: PRIMARY,
                highlight: SECONDARY,
                error: Color::Rgb(0xDC, 0x26, 0x26),
            },
            ThemeMode::Dark => Self {
                background: DARK_BACKGROUNDS[background],
                surface: Color::Rgb(0x1E, 0x29, 0x3B),
                text: Color::Rgb(0xF1, 0xF5, 0xF9),
                muted: GRAY_LIGHT,
                primary: Color::Rgb(0x81, 0x8C, 0xF8),
                highlight: SECONDARY,
                error: Color::Rgb(0xF8, 0x71, 0x71),
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn heading(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Tab accent per resource kind: blue lessons, orange controls, red exams.
    pub fn accent(&self, kind: ResourceKind) -> Color {
        match kind {
            ResourceKind::Cours => self.primary,
            ResourceKind::Controls => Color::Rgb(0xF9, 0x73, 0x16),
            ResourceKind::Efm => Color::Rgb(0xE1, 0x1D, 0x48),
        }
    }
}
