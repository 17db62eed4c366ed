//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use groundwater_types::Severity;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};

/// Render the header bar with the severity overview of the visible set.
///
/// Displays: worst-severity indicator, counts by severity, visible/total.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Span::styled(
        "GROUNDWATER MONITOR ",
        Style::default().add_modifier(Modifier::BOLD),
    );

    let Some(ref data) = app.data else {
        let line = Line::from(vec![Span::raw(" "), title, Span::raw("| Loading...")]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let counts = app.counts();
    let indicator_style = counts
        .worst()
        .map(|s| app.theme.status_style(s))
        .unwrap_or_else(|| Style::default().add_modifier(Modifier::DIM));

    let count_span = |severity: Severity| {
        let n = counts.get(severity);
        if n > 0 {
            Span::styled(n.to_string(), app.theme.status_style(severity))
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        }
    };

    let mut spans = vec![
        Span::styled(" ● ", indicator_style),
        title,
        Span::raw("│ "),
        count_span(Severity::Critical),
        Span::raw(" critical "),
        count_span(Severity::Moderate),
        Span::raw(" moderate "),
        count_span(Severity::Normal),
        Span::raw(" normal │ "),
        Span::styled(
            format!("{}/{}", counts.total(), data.len()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" points"),
    ];
    if !app.range.is_full() {
        spans.push(Span::raw(format!(" │ {}", app.range)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Titles of the tab bar, in view order.
pub const TAB_TITLES: [&str; 2] = [" 1:Globe ", " 2:Table "];

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = TAB_TITLES.iter().map(|t| Line::from(*t)).collect();

    let selected = match app.current_view {
        View::Globe => 0,
        View::Table => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// The view whose tab covers `column`, if any.
///
/// Mirrors the tab bar layout: each title is wrapped in one column of
/// padding on either side, and tabs are separated by a one-column divider.
pub fn tab_at(column: u16) -> Option<View> {
    let mut start = 0u16;
    for (title, view) in TAB_TITLES.iter().zip([View::Globe, View::Table]) {
        let end = start + title.chars().count() as u16 + 2;
        if (start..end).contains(&column) {
            return Some(view);
        }
        start = end + 1;
    }
    None
}

/// Render the status bar at the bottom.
///
/// Shows: source, time since data arrived, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if app.data.is_some() {
        let elapsed = app.loaded_at.map(|t| t.elapsed().as_secs_f64()).unwrap_or(0.0);

        let controls = match app.current_view {
            View::Globe => "←→↑↓:rotate +/-:zoom space:spin click:select [ ]{ }:range ?:help q:quit",
            View::Table => {
                if app.filter_active {
                    "Type to search | Enter:apply Esc:cancel"
                } else {
                    "/:search s:sort S:reverse Enter:select Esc:clear ?:help q:quit"
                }
            }
        };

        let warning = app
            .load_error
            .as_deref()
            .map(|e| format!(" | Error: {}", e))
            .unwrap_or_default();

        format!(
            " {} | Loaded {:.0}s ago{} | {}",
            app.source_description(),
            elapsed,
            warning,
            controls,
        )
    } else if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit", err)
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |name: &'static str| {
        Line::from(vec![Span::styled(
            name,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Globe"),
        Line::from("  ←/→ h/l     Rotate"),
        Line::from("  ↑/↓ k/j     Tilt"),
        Line::from("  +/-         Zoom in/out"),
        Line::from("  Space       Pause/resume spin"),
        Line::from("  Click       Select marker"),
        Line::from(""),
        section(" Table"),
        Line::from("  ↑/↓ j/k     Navigate rows"),
        Line::from("  PgUp/PgDn   Jump 10 rows"),
        Line::from("  Enter       Select point"),
        Line::from("  /  c        Search, clear search"),
        Line::from("  s  S        Sort column, direction"),
        Line::from(""),
        section(" Filters"),
        Line::from("  [  ]        Lower/raise minimum"),
        Line::from("  {  }        Lower/raise maximum"),
        Line::from("  r           Reset filters"),
        Line::from(""),
        section(" General"),
        Line::from("  Tab 1 2     Switch views"),
        Line::from("  Esc         Clear selection"),
        Line::from("  e           Export to JSON"),
        Line::from("  q           Quit"),
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
    let help_height = 32u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_hit_testing() {
        assert_eq!(tab_at(0), Some(View::Globe));
        assert_eq!(tab_at(10), Some(View::Globe));
        // Divider between the tabs
        assert_eq!(tab_at(11), None);
        assert_eq!(tab_at(12), Some(View::Table));
        assert_eq!(tab_at(22), Some(View::Table));
        assert_eq!(tab_at(23), None);
    }
}
