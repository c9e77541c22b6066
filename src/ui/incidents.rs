//! Incident timeline rendering.

use chrono::Utc;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::format::{format_date_long, relative_time};

/// Render the Recent Incidents view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let incidents = app.visible_incidents();

    let block = Block::default()
        .title(format!(" Recent Incidents ({}) ", incidents.len()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if incidents.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  No incidents in the last {} days", app.options.incident_days),
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let now = Utc::now();
    let items: Vec<ListItem> = incidents
        .iter()
        .map(|entry| {
            let incident = &entry.incident;
            let mut title = vec![
                Span::styled(" ● ", app.theme.severity_style(entry.severity)),
                Span::styled(
                    incident.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ];
            if incident.is_resolved() {
                title.push(Span::styled(" Resolved", Style::default().fg(app.theme.up)));
            }

            let when = Line::from(Span::styled(
                format!(
                    "   {} · {}",
                    format_date_long(incident.created_at.date_naive()),
                    relative_time(incident.created_at, now)
                ),
                Style::default().add_modifier(Modifier::DIM),
            ));

            ListItem::new(vec![Line::from(title), when])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(app.theme.selected);

    let mut state = ListState::default();
    state.select(Some(app.selected_incident_index.min(incidents.len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}
