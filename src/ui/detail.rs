//! Detail overlay rendering.
//!
//! Displays a modal overlay with every aggregation window for the selected
//! service.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use super::services::{axis_label, uptime_strip};
use crate::app::App;
use crate::data::format::{format_date, format_response_time, format_uptime};
use crate::source::Window;

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 18;

/// Render the service detail as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Skip rendering if terminal is too small for the overlay
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(card) = app.selected_service() else {
        return;
    };
    let service = &card.service;

    let overlay_width = (area.width * 90 / 100).clamp(MIN_OVERLAY_WIDTH, 110);
    let overlay_height = (area.height * 80 / 100).clamp(MIN_OVERLAY_HEIGHT, 24);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Length(6), // Service info
        Constraint::Length(9), // Windows table
        Constraint::Min(3),    // Uptime strip
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    // ===== HEADER SECTION =====
    let style = app.theme.state_style(service.status);
    let dim = Style::default().add_modifier(Modifier::DIM);

    let header_lines = vec![
        Line::from(vec![
            Span::styled(" ● ", style),
            Span::styled(service.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(service.status.label(), style.add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![Span::styled(" URL:  ", dim), Span::raw(service.url.clone())]),
        Line::from(vec![Span::styled(" Slug: ", dim), Span::raw(service.slug.clone())]),
        Line::from(vec![
            Span::styled(" Icon: ", dim),
            Span::raw(service.icon.clone().unwrap_or_else(|| "-".to_string())),
        ]),
    ];

    let header = Paragraph::new(header_lines).block(
        Block::default()
            .title(" Service Detail ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.highlight)),
    );
    frame.render_widget(header, chunks[0]);

    // ===== WINDOWS TABLE =====
    let table_header = Row::new(vec![
        Cell::from("Window"),
        Cell::from("Uptime"),
        Cell::from("Avg response"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = Window::ALL
        .iter()
        .map(|&window| {
            Row::new(vec![
                Cell::from(window.label()),
                Cell::from(format_uptime(service.uptime_for(window))),
                Cell::from(format_response_time(service.response_time_for(window))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Fill(1),
        ],
    )
    .header(table_header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );
    frame.render_widget(table, chunks[1]);

    // ===== UPTIME STRIP =====
    let strip_width = chunks[2].width.saturating_sub(2) as usize;
    let shown_days = strip_width.min(card.daily.len());
    let shown = &card.daily[card.daily.len() - shown_days..];
    let range = match (shown.first(), shown.last()) {
        (Some(first), Some(last)) => format!("{} - {}", format_date(first.date), format_date(last.date)),
        _ => "no days".to_string(),
    };
    let strip = Paragraph::new(vec![
        uptime_strip(&card.daily, shown_days, &app.theme),
        Line::from(Span::styled(axis_label(shown_days, shown_days), dim)),
    ])
    .block(
        Block::default()
            .title(format!(" Daily uptime, {} ", range))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );
    frame.render_widget(strip, chunks[2]);

    // ===== FOOTER =====
    let footer = Paragraph::new(Line::from(vec![Span::styled(" Press Esc to close ", dim)]));
    frame.render_widget(footer, chunks[3]);
}
