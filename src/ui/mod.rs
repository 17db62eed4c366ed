//! Terminal UI rendering using ratatui.
//!
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`globe`]: Rotating globe canvas with severity-colored markers
//! - [`table`]: Sortable, searchable table of the visible points
//! - [`panel`]: Side panel (overview, range filter, point details)
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├─────────────────────────┬────────────┤
//! │                         │ Overview   │
//! │ View Content            │ Filters    │
//! │ (globe/table::render)   │ Details    │
//! │                         │ (panel)    │
//! ├─────────────────────────┴────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top:
//!    - common::render_help
//! ```

pub mod common;
pub mod globe;
pub mod panel;
pub mod table;
pub mod theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

pub use table::SortColumn;
pub use theme::Theme;

use crate::app::{App, View};

/// Minimum terminal width for a usable display.
pub const MIN_WIDTH: u16 = 70;
/// Minimum terminal height for a usable display.
pub const MIN_HEIGHT: u16 = 20;

/// Row of the tab bar.
pub const TABS_ROW: u16 = 1;

/// Draw a full frame.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5)
            .intersection(area);
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(1), // Tabs
        Constraint::Min(8),    // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    let content = Layout::horizontal([
        Constraint::Min(30),
        Constraint::Length(panel::PANEL_WIDTH),
    ])
    .split(chunks[2]);

    common::render_header(frame, app, chunks[0]);
    common::render_tabs(frame, app, chunks[1]);

    match app.current_view {
        View::Globe => globe::render(frame, app, content[0]),
        View::Table => table::render(frame, app, content[0]),
    }
    panel::render(frame, app, content[1]);

    common::render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Settings, ThemeChoice};
    use crate::source::GeneratedSource;
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        let settings = Settings {
            theme: ThemeChoice::Dark,
            ..Settings::default()
        };
        App::new(Box::new(GeneratedSource::new(50, Some(3))), &settings)
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_draw_loading_state() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Loading groundwater data..."));
        assert!(app.globe_area.width > 0);
    }

    #[test]
    fn test_draw_both_views_with_data() {
        let mut app = app();
        app.reload_data().unwrap();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| draw(f, &mut app)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Data Overview"));
        assert!(text.contains("50/50"));

        app.set_view(View::Table);
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("gw-0000"));
        assert!(app.table_area.height > 0);
    }

    #[test]
    fn test_draw_too_small() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        assert!(buffer_text(&terminal).contains("Terminal too small"));
    }
}
