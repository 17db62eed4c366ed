//! Points table rendering.
//!
//! Lists the visible monitoring points (range filter plus text search) in a
//! sortable table. The highlighted row and the selected point are separate:
//! Enter or a click turns the highlighted row into the selection.

use groundwater_types::MonitoringPoint;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;

/// Column to sort by in the points table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    /// Sort by point id.
    #[default]
    Id,
    Location,
    WaterLevel,
    Quality,
    /// Sort by severity, normal first when ascending.
    Severity,
}

impl SortColumn {
    /// Cycle to the next sort column.
    pub fn next(self) -> Self {
        match self {
            SortColumn::Id => SortColumn::Location,
            SortColumn::Location => SortColumn::WaterLevel,
            SortColumn::WaterLevel => SortColumn::Quality,
            SortColumn::Quality => SortColumn::Severity,
            SortColumn::Severity => SortColumn::Id,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Location => "location",
            SortColumn::WaterLevel => "level",
            SortColumn::Quality => "quality",
            SortColumn::Severity => "status",
        }
    }
}

/// Render the points table.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    app.table_area = block.inner(area);

    if app.data.is_none() {
        frame.render_widget(block.title(" Points "), area);
        return;
    }

    let points = app.table_points();
    let visible_total = app.visible_points().len();

    let header = Row::new(vec![
        Cell::from(format_header("Id", SortColumn::Id, app)),
        Cell::from(format_header("Location", SortColumn::Location, app)),
        Cell::from(format_header("Level (m)", SortColumn::WaterLevel, app)),
        Cell::from(format_header("Quality", SortColumn::Quality, app)),
        Cell::from(format_header("Status", SortColumn::Severity, app)),
    ])
    .height(1)
    .style(app.theme.header);

    let selected_id = app.selected_id.as_deref();
    let rows: Vec<Row> = points
        .iter()
        .map(|p| {
            let severity = p.severity();
            let marker = if Some(p.id.as_str()) == selected_id { "◆ " } else { "  " };
            Row::new(vec![
                Cell::from(format!("{}{}", marker, p.id)),
                Cell::from(p.location.clone()),
                Cell::from(format!("{:.1}", p.water_level)),
                Cell::from(format!("{:.0}", p.quality_index)),
                Cell::from(severity.label()).style(app.theme.status_style(severity)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Fill(3),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(9),
    ];

    let selected_visual_index = app.table_index.min(points.len().saturating_sub(1));

    let sort_dir = if app.sort_ascending { "↑" } else { "↓" };

    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };

    let position_info = if !points.is_empty() {
        format!(" [{}/{}]", selected_visual_index + 1, points.len())
    } else {
        String::new()
    };

    let title = format!(
        " Points ({}/{}) [s:sort {}{}]{}{} ",
        points.len(),
        visible_total,
        app.sort_column.label(),
        sort_dir,
        filter_info,
        position_info
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(block.title(title))
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default().with_offset(app.table_offset);
    if !points.is_empty() {
        state.select(Some(selected_visual_index));
    }

    frame.render_stateful_widget(table, area, &mut state);
    app.table_offset = state.offset();
}

fn format_header(name: &str, col: SortColumn, app: &App) -> Span<'static> {
    if app.sort_column == col {
        let arrow = if app.sort_ascending { "↑" } else { "↓" };
        Span::styled(format!("{}{}", name, arrow), Style::default().add_modifier(Modifier::UNDERLINED))
    } else {
        Span::raw(name.to_string())
    }
}

/// Sort points by the given column and direction, id breaking ties.
pub fn sort_points(points: &mut [&MonitoringPoint], column: SortColumn, ascending: bool) {
    points.sort_by(|a, b| {
        let primary = match column {
            SortColumn::Id => a.id.cmp(&b.id),
            SortColumn::Location => a.location.cmp(&b.location),
            SortColumn::WaterLevel => a.water_level.total_cmp(&b.water_level),
            SortColumn::Quality => a.quality_index.total_cmp(&b.quality_index),
            SortColumn::Severity => a.severity().cmp(&b.severity()),
        };

        let primary = if ascending {
            primary
        } else {
            primary.reverse()
        };

        if primary == std::cmp::Ordering::Equal {
            a.id.cmp(&b.id)
        } else {
            primary
        }
    });
}
