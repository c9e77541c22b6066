//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection. Status
//! colours are fixed lookups keyed by the status enums.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::{OverallStatus, Severity, UptimeLevel};
use crate::source::ServiceState;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for operational services and healthy bars.
    pub up: Color,
    /// Color for degraded services and bars.
    pub degraded: Color,
    /// Color for services that are down.
    pub down: Color,
    /// Color for unknown status and days without data.
    pub muted: Color,
    /// Color for borders and separators.
    pub border: Color,
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
            up: Color::Green,
            degraded: Color::Yellow,
            down: Color::Red,
            muted: Color::DarkGray,
            border: Color::Gray,
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
            up: Color::Green,
            degraded: Color::Yellow,
            down: Color::Red,
            muted: Color::Gray,
            border: Color::DarkGray,
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

    /// Style for a single service's state.
    pub fn state_style(&self, state: ServiceState) -> Style {
        match state {
            ServiceState::Up => Style::default().fg(self.up),
            ServiceState::Degraded => Style::default().fg(self.degraded),
            ServiceState::Down => Style::default().fg(self.down).add_modifier(Modifier::BOLD),
        }
    }

    /// Style for the overall banner.
    pub fn overall_style(&self, status: OverallStatus) -> Style {
        match status {
            OverallStatus::Up => Style::default().fg(self.up),
            OverallStatus::Degraded => Style::default().fg(self.degraded),
            OverallStatus::Down => Style::default().fg(self.down).add_modifier(Modifier::BOLD),
            OverallStatus::Unknown => Style::default().fg(self.muted),
        }
    }

    /// Style for an incident severity dot.
    pub fn severity_style(&self, severity: Severity) -> Style {
        match severity {
            Severity::Down => Style::default().fg(self.down),
            Severity::Degraded => Style::default().fg(self.degraded),
            Severity::Unknown => Style::default().fg(self.muted),
        }
    }

    /// Style for one day in an uptime strip.
    pub fn level_style(&self, level: UptimeLevel) -> Style {
        match level {
            UptimeLevel::Up => Style::default().fg(self.up),
            UptimeLevel::Degraded => Style::default().fg(self.degraded),
            UptimeLevel::Down => Style::default().fg(self.down),
            UptimeLevel::NoData => Style::default().fg(self.muted),
        }
    }
}

/// Glyph drawn for one day in an uptime strip.
pub fn level_symbol(level: UptimeLevel) -> char {
    match level {
        UptimeLevel::NoData => '░',
        UptimeLevel::Up | UptimeLevel::Degraded | UptimeLevel::Down => '█',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_lookups_are_distinct() {
        let theme = Theme::dark();
        assert_ne!(
            theme.state_style(ServiceState::Up),
            theme.state_style(ServiceState::Degraded)
        );
        assert_eq!(
            theme.overall_style(OverallStatus::Down).fg,
            theme.state_style(ServiceState::Down).fg
        );
        assert_eq!(theme.level_style(UptimeLevel::NoData).fg, Some(theme.muted));
        assert_eq!(theme.severity_style(Severity::Unknown).fg, Some(theme.muted));
    }

    #[test]
    fn test_level_symbol() {
        assert_eq!(level_symbol(UptimeLevel::NoData), '░');
        assert_eq!(level_symbol(UptimeLevel::Down), '█');
    }
}
