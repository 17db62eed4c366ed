//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.
//! Severity colors are fixed across themes.

use groundwater_types::Severity;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::settings::ThemeChoice;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Globe limb and atmosphere halo.
    pub atmosphere: Color,
    /// Latitude/longitude grid lines.
    pub graticule: Color,
    /// Continent outlines.
    pub land: Color,
    /// Location label next to the selected marker.
    pub label: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            border: Color::Gray,
            atmosphere: Color::Rgb(0x44, 0x88, 0xff),
            graticule: Color::Rgb(0x1e, 0x3a, 0x5f),
            land: Color::Rgb(0x4a, 0x6f, 0x8a),
            label: Color::White,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            border: Color::DarkGray,
            atmosphere: Color::Rgb(0x25, 0x63, 0xeb),
            graticule: Color::Rgb(0xbf, 0xd4, 0xea),
            land: Color::Rgb(0x64, 0x74, 0x8b),
            label: Color::Black,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Resolve a configured theme choice.
    pub fn from_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Auto => Self::auto_detect(),
            ThemeChoice::Dark => Self::dark(),
            ThemeChoice::Light => Self::light(),
        }
    }

    /// Marker color for a severity.
    pub fn severity_color(&self, severity: Severity) -> Color {
        let (r, g, b) = severity.rgb();
        Color::Rgb(r, g, b)
    }

    /// Get style for a severity
    pub fn status_style(&self, severity: Severity) -> Style {
        let style = Style::default().fg(self.severity_color(severity));
        match severity {
            Severity::Critical => style.add_modifier(Modifier::BOLD),
            Severity::Moderate | Severity::Normal => style,
        }
    }
}
