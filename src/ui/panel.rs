//! Side panel rendering.
//!
//! Three stacked cards: severity overview of the visible set, the water-level
//! range filter, and details of the selected point.

use groundwater_types::{MonitoringPoint, Severity};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::filter::{LEVEL_CEILING, LEVEL_FLOOR};

/// Width of the side panel, in columns.
pub const PANEL_WIDTH: u16 = 34;

/// Render the side panel.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(7), // Overview
        Constraint::Length(6), // Filters
        Constraint::Min(6),    // Details
    ])
    .split(area);

    render_overview(frame, app, chunks[0]);
    render_filters(frame, app, chunks[1]);
    render_details(frame, app, chunks[2]);
}

fn card<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

fn render_overview(frame: &mut Frame, app: &App, area: Rect) {
    let block = card(app, " Data Overview ");

    let Some(ref data) = app.data else {
        let text = Paragraph::new(Line::from(Span::styled(
            " Waiting for data...",
            Style::default().add_modifier(Modifier::DIM),
        )))
        .block(block);
        frame.render_widget(text, area);
        return;
    };

    let counts = app.counts();
    let mut lines: Vec<Line> = Severity::ALL
        .iter()
        .map(|&severity| {
            Line::from(vec![
                Span::styled(" ● ", app.theme.status_style(severity)),
                Span::raw(format!("{:<10}", severity.label())),
                Span::styled(
                    format!("{:>6}", counts.get(severity)),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(" {} of {} points visible", counts.total(), data.len()),
        Style::default().add_modifier(Modifier::DIM),
    )));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_filters(frame: &mut Frame, app: &App, area: Rect) {
    let block = card(app, " Filters ");
    let inner_width = block.inner(area).width.saturating_sub(2) as usize;

    let lines = vec![
        Line::from(vec![
            Span::raw(" Water level: "),
            Span::styled(
                app.range.to_string(),
                Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!(" {}", range_bar(app.range.min(), app.range.max(), inner_width)),
            Style::default().fg(app.theme.highlight),
        )),
        Line::from(Span::styled(
            " [ ] min  { } max  r reset",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let block = card(app, " Point Details ");

    let Some(point) = app.selected_point() else {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                " Click a marker or press Enter",
                Style::default().add_modifier(Modifier::DIM),
            )),
            Line::from(Span::styled(
                " on a table row to see details",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let hidden = !app.range.contains(point.water_level);
    let mut lines = detail_lines(app, point);
    if hidden {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Hidden by the current range",
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        )));
    }

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn detail_lines<'a>(app: &App, point: &'a MonitoringPoint) -> Vec<Line<'a>> {
    let severity = point.severity();
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(format!(" {}", point.location), bold)),
        Line::from(Span::styled(
            format!(" {}", point.id),
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(""),
        field("Water Level", format!("{:.1}m", point.water_level)),
        field("Quality Index", format!("{:.0}/100", point.quality_index)),
        Line::from(vec![
            Span::raw(format!(" {:<14}", "Status")),
            Span::styled(severity.label(), app.theme.status_style(severity)),
        ]),
        field("Last Updated", point.last_updated.format("%Y-%m-%d").to_string()),
    ];

    if let Some(temperature) = point.temperature {
        lines.push(field("Temperature", format!("{:.1}°C", temperature)));
    }
    if let Some(ph) = point.ph {
        lines.push(field("pH Level", format!("{:.1}", ph)));
    }
    if !point.contaminants.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Contaminants Detected",
            app.theme.status_style(Severity::Critical),
        )));
        for contaminant in &point.contaminants {
            lines.push(Line::from(format!("  • {}", contaminant)));
        }
    }

    lines
}

fn field(name: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!(" {:<14}", name)),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
    ])
}

/// Draw `[min, max]` as a bar of `width` cells over the full level scale.
pub fn range_bar(min: f64, max: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let span = LEVEL_CEILING - LEVEL_FLOOR;
    let cell = |level: f64| {
        let fraction = ((level - LEVEL_FLOOR) / span).clamp(0.0, 1.0);
        ((fraction * (width - 1) as f64).round() as usize).min(width - 1)
    };
    let (start, end) = (cell(min), cell(max));
    (0..width)
        .map(|i| if (start..=end).contains(&i) { '━' } else { '─' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bar() {
        assert_eq!(range_bar(0.0, 100.0, 5), "━━━━━");
        assert_eq!(range_bar(0.0, 50.0, 5), "━━━──");
        assert_eq!(range_bar(100.0, 100.0, 5), "────━");
        assert_eq!(range_bar(0.0, 100.0, 0), "");
    }
}
