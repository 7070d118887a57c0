//! Palette and role-to-style resolution
//!
//! Components never pick colours themselves: they name a [`Role`] and the
//! [`Palette`] resolves it to a [`Style`].

use ratatui::style::{Color, Modifier, Style};

/// Black tone family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlackTones {
    pub black: Color,
    pub dark: Color,
    pub light: Color,
}

/// White/grey tone family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhiteTones {
    pub grey: Color,
    pub light: Color,
    /// Idle navigation link
    pub darker: Color,
    /// Hovered navigation link
    pub lighter: Color,
}

/// Application palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub red: Color,
    pub black: BlackTones,
    pub white: WhiteTones,
}

impl Default for Palette {
    fn default() -> Self {
        Self::NOMFLIX
    }
}

/// Component roles that need a colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    PageBackground,
    Text,
    Dimmed,
    Title,
    Logo,
    NavLink,
    NavLinkHover,
    ActiveMarker,
    SearchIcon,
    SearchInput,
    SearchInputBorder,
    SearchPlaceholder,
    Selected,
    Year,
    Badge,
    Loading,
    Error,
    StatusBar,
    Keybind,
}

impl Palette {
    pub const NOMFLIX: Palette = Palette {
        red: Color::Rgb(0xe5, 0x10, 0x13),
        black: BlackTones {
            black: Color::Rgb(0x14, 0x14, 0x14),
            dark: Color::Rgb(0x18, 0x18, 0x18),
            light: Color::Rgb(0x2f, 0x2f, 0x2f),
        },
        white: WhiteTones {
            grey: Color::Rgb(0xe5, 0xe5, 0xe5),
            light: Color::Rgb(0xff, 0xff, 0xff),
            darker: Color::Rgb(0xe5, 0xe5, 0xe5),
            lighter: Color::Rgb(0xff, 0xff, 0xff),
        },
    };

    /// Search input fill: rgba(24,24,24,0.8) over the bar
    pub const INPUT_BACKGROUND: Color = Color::Rgb(0x18, 0x18, 0x18);

    /// Resolve a component role to a concrete style
    pub fn style(&self, role: Role) -> Style {
        match role {
            Role::PageBackground => Style::default().bg(self.black.black),
            Role::Text => Style::default().fg(self.white.grey),
            Role::Dimmed => Style::default().fg(self.black.light),
            Role::Title => Style::default()
                .fg(self.white.light)
                .add_modifier(Modifier::BOLD),
            Role::Logo => Style::default().fg(self.red).add_modifier(Modifier::BOLD),
            Role::NavLink => Style::default().fg(self.white.darker),
            Role::NavLinkHover => Style::default().fg(self.white.lighter),
            Role::ActiveMarker => Style::default().fg(self.red),
            Role::SearchIcon => Style::default().fg(self.white.light),
            Role::SearchInput => Style::default()
                .fg(self.white.grey)
                .bg(Self::INPUT_BACKGROUND),
            Role::SearchInputBorder => Style::default().fg(self.white.grey),
            Role::SearchPlaceholder => Style::default()
                .fg(self.black.light)
                .bg(Self::INPUT_BACKGROUND),
            Role::Selected => Style::default()
                .fg(self.white.light)
                .bg(self.red)
                .add_modifier(Modifier::BOLD),
            Role::Year => Style::default().fg(self.white.darker),
            Role::Badge => Style::default().fg(self.red),
            Role::Loading => Style::default()
                .fg(self.red)
                .add_modifier(Modifier::BOLD),
            Role::Error => Style::default()
                .fg(self.red)
                .add_modifier(Modifier::BOLD),
            Role::StatusBar => Style::default().fg(self.white.grey).bg(self.black.dark),
            Role::Keybind => Style::default().fg(self.red),
        }
    }

    /// Foreground colour of a role
    pub fn fg(&self, role: Role) -> Color {
        self.style(role).fg.unwrap_or(self.white.grey)
    }

    /// Rating colour: brand red for strong ratings, grey otherwise
    pub fn rating(&self, vote: f32) -> Style {
        if vote >= 7.0 {
            Style::default().fg(self.red)
        } else {
            self.style(Role::Year)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COLOR UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Linearly interpolate between two RGB colours, `t` clamped to [0, 1].
/// Non-RGB inputs snap to whichever end `t` is closer to.
pub fn blend(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (color_to_rgb(from), color_to_rgb(to)) {
        (Some(a), Some(b)) => {
            let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
            Color::Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
        }
        _ if t < 0.5 => from,
        _ => to,
    }
}

/// Calculate relative luminance for a color (used in contrast ratio)
/// Formula: https://www.w3.org/TR/WCAG20/#relativeluminancedef
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
}

/// Contrast ratio between 1 (same colour) and 21 (black/white)
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG AA for normal text (>= 4.5:1)
pub fn meets_wcag_aa(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 4.5
}

/// WCAG AA for large text (>= 3:1)
pub fn meets_wcag_aa_large(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 3.0
}

/// Extract RGB tuple from ratatui Color (only works for Rgb variant)
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}
