//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status banner, status bar,
//! and help overlay.

use chrono::Utc;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::{App, View, LOAD_ERROR_MESSAGE};
use crate::data::format::relative_time;
use crate::source::ServiceState;

/// Render the header bar with per-state service counts.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        let line = Line::from(vec![
            Span::styled(" STATUSBOARD ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let overall = data.overall_status();
    let up = data.count(ServiceState::Up);
    let degraded = data.count(ServiceState::Degraded);
    let down = data.count(ServiceState::Down);

    let count_span = |n: usize, state: ServiceState| {
        if n > 0 {
            Span::styled(n.to_string(), app.theme.state_style(state))
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        }
    };

    let line = Line::from(vec![
        Span::styled(" ● ", app.theme.overall_style(overall)),
        Span::styled("STATUSBOARD ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        count_span(up, ServiceState::Up),
        Span::raw(" up "),
        count_span(degraded, ServiceState::Degraded),
        Span::raw(" degraded "),
        count_span(down, ServiceState::Down),
        Span::raw(" down │ "),
        Span::styled(
            data.services.len().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" services"),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![Line::from(" 1:Services "), Line::from(" 2:Incidents ")];

    let selected = match app.current_view {
        View::Services => 0,
        View::Incidents => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the overall status banner, or the error banner after a failed cycle.
pub fn render_banner(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type);

    if app.has_error() {
        let cause = app.load_error.as_deref().unwrap_or_default();
        let lines = vec![Line::from(vec![
            Span::styled(
                format!(" ✖ {} ", LOAD_ERROR_MESSAGE),
                Style::default().fg(app.theme.down).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("({}) ", cause), Style::default().add_modifier(Modifier::DIM)),
            Span::styled("r:retry", Style::default().fg(app.theme.highlight)),
        ])];
        let paragraph = Paragraph::new(lines)
            .block(block.border_style(Style::default().fg(app.theme.down)))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let Some(ref data) = app.data else {
        let paragraph = Paragraph::new(" Loading status...")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block.border_style(Style::default().fg(app.theme.border)));
        frame.render_widget(paragraph, area);
        return;
    };

    let overall = data.overall_status();
    let style = app.theme.overall_style(overall);
    let checked = app
        .last_refreshed
        .map(|t| relative_time(t, Utc::now()))
        .unwrap_or_else(|| "never".to_string());

    let line = Line::from(vec![
        Span::styled(format!(" ● {}", overall.label()), style.add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("   Last checked {}", checked),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block.border_style(style));
    frame.render_widget(paragraph, area);
}

/// Render the status bar at the bottom.
///
/// Shows the data source, refresh state and available controls, or a
/// temporary status message.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.current_view {
        View::Services => "↑↓:select Enter:detail Tab:switch r:refresh ?:help q:quit",
        View::Incidents => "↑↓:select Tab:switch r:refresh ?:help q:quit",
    };

    let status = if app.is_loading() {
        format!(" {} | Loading... | q:quit", app.source_description())
    } else {
        format!(
            " {} > {} | {}",
            app.source_description(),
            app.current_view.label(),
            controls
        )
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// A full-width band of `height` rows centred vertically in `area`.
///
/// Shrinks to fit terminals shorter than `height`.
pub fn centered_band(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let y = area.y + (area.height / 2).saturating_sub(height / 2).min(area.height - height);
    Rect::new(area.x, y, area.width, height)
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(title, Style::default().add_modifier(Modifier::BOLD))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  Tab         Next view"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Service detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        section(" General"),
        Line::from("  r         Refresh now / retry"),
        Line::from("  e         Export to JSON"),
        Line::from("  ?         Toggle help"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 20u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
