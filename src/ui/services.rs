//! Services view rendering.
//!
//! One row per service: status, average response time, monthly uptime and a
//! strip with one cell per day of the uptime window.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::theme::{level_symbol, Theme};
use crate::app::App;
use crate::data::format::{format_response_time, format_uptime};
use crate::data::DailyUptime;

/// Columns taken by everything except the uptime strip, borders included.
const FIXED_COLUMNS_WIDTH: u16 = 56;

/// Render the Services view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Min(3),    // Table
        Constraint::Length(1), // Day axis
    ])
    .split(area);

    let strip_width = chunks[0].width.saturating_sub(FIXED_COLUMNS_WIDTH).max(1) as usize;
    let shown_days = strip_width.min(app.options.window_days);

    let header = Row::new(vec![
        Cell::from("Service"),
        Cell::from("Status"),
        Cell::from("Response"),
        Cell::from("Uptime 30d"),
        Cell::from(format!("Last {} days", shown_days)),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = data
        .services
        .iter()
        .map(|card| {
            let s = &card.service;
            let style = app.theme.state_style(s.status);
            Row::new(vec![
                Cell::from(Line::from(vec![
                    Span::styled("● ", style),
                    Span::raw(s.name.clone()),
                ])),
                Cell::from(s.status.label()).style(style),
                Cell::from(format_response_time(s.time)),
                Cell::from(format_uptime(&s.uptime_month)),
                Cell::from(uptime_strip(&card.daily, shown_days, &app.theme)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(20), // Service
        Constraint::Length(12), // Status
        Constraint::Length(9),  // Response
        Constraint::Length(10), // Uptime
        Constraint::Fill(1),    // Strip
    ];

    let selected = data.services.len().checked_sub(1).map(|max| app.selected_service_index.min(max));
    let position_info = selected
        .map(|i| format!(" [{}/{}]", i + 1, data.services.len()))
        .unwrap_or_default();

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" Services ({}){} ", data.services.len(), position_info))
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(selected);
    frame.render_stateful_widget(table, chunks[0], &mut state);

    let axis = Paragraph::new(axis_label(shown_days, strip_width))
        .style(Style::default().add_modifier(Modifier::DIM));
    let axis_area = Rect {
        x: chunks[1].x + chunks[1].width.saturating_sub(strip_width as u16 + 1),
        width: (strip_width as u16).min(chunks[1].width),
        ..chunks[1]
    };
    frame.render_widget(axis, axis_area);
}

/// The last `days` entries of `daily` as coloured cells, oldest first.
pub fn uptime_strip(daily: &[DailyUptime], days: usize, theme: &Theme) -> Line<'static> {
    let start = daily.len().saturating_sub(days);
    let spans: Vec<Span> = daily[start..]
        .iter()
        .map(|day| {
            let level = day.level();
            Span::styled(level_symbol(level).to_string(), theme.level_style(level))
        })
        .collect();
    Line::from(spans)
}

/// "N days ago" on the left, "Today" on the right, padded to `width`.
pub fn axis_label(days: usize, width: usize) -> String {
    let left = format!("{} days ago", days);
    let right = "Today";
    let gap = width.saturating_sub(left.len() + right.len()).max(1);
    format!("{}{}{}", left, " ".repeat(gap), right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn days(values: &[Option<f64>]) -> Vec<DailyUptime> {
        let start = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &uptime)| DailyUptime {
                date: start + chrono::Duration::days(i as i64),
                uptime,
            })
            .collect()
    }

    #[test]
    fn test_uptime_strip_takes_latest_days() {
        let theme = Theme::dark();
        let daily = days(&[None, Some(100.0), Some(97.0), Some(50.0)]);

        let line = uptime_strip(&daily, 3, &theme);
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[0].style.fg, Some(theme.up));
        assert_eq!(line.spans[1].style.fg, Some(theme.degraded));
        assert_eq!(line.spans[2].style.fg, Some(theme.down));

        let all = uptime_strip(&daily, 10, &theme);
        assert_eq!(all.spans.len(), 4);
        assert_eq!(all.spans[0].content, "░");
    }

    #[test]
    fn test_axis_label() {
        assert_eq!(axis_label(90, 20), "90 days ago    Today");
        // Never collapses the gap entirely
        assert_eq!(axis_label(90, 5), "90 days ago Today");
    }
}
