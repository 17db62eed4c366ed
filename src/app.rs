//! Application state and navigation logic.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use groundwater_types::{Dataset, MonitoringPoint};
use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::data::export::write_export;
use crate::data::scene::{pick_marker, Viewport};
use crate::data::{filter_points, matches_search, Camera, SeverityCounts, WaterLevelRange};
use crate::settings::Settings;
use crate::source::DataSource;
use crate::ui::table::{sort_points, SortColumn};
use crate::ui::Theme;

/// Default path for in-app exports.
pub const EXPORT_PATH: &str = "groundwater_export.json";

/// Click tolerance around a marker, in canvas units.
const PICK_RADIUS: f64 = 2.0;

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Rotating globe with point markers.
    Globe,
    /// Sortable table of the visible points.
    Table,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Globe => View::Table,
            View::Table => View::Globe,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        // Two views, so both directions agree
        self.next()
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Globe => "Globe",
            View::Table => "Table",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub data: Option<Dataset>,
    pub loaded_at: Option<Instant>,
    pub load_error: Option<String>,

    // Filtering and selection
    pub range: WaterLevelRange,
    pub range_step: f64,
    pub selected_id: Option<String>,

    // Table navigation
    pub table_index: usize,
    pub table_offset: usize,
    pub sort_column: SortColumn,
    pub sort_ascending: bool,

    // Search/filter
    pub filter_text: String,
    pub filter_active: bool,

    // Globe
    pub camera: Camera,
    /// Seconds of animation time, drives the pulse.
    pub animation_secs: f64,

    // Screen areas from the last draw, used for mouse hit testing
    pub globe_area: Rect,
    pub table_area: Rect,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the given data source and settings.
    pub fn new(source: Box<dyn DataSource>, settings: &Settings) -> Self {
        Self {
            running: true,
            current_view: View::Globe,
            show_help: false,
            source,
            data: None,
            loaded_at: None,
            load_error: None,
            range: WaterLevelRange::full(),
            range_step: settings.range_step,
            selected_id: None,
            table_index: 0,
            table_offset: 0,
            sort_column: SortColumn::default(),
            sort_ascending: true,
            filter_text: String::new(),
            filter_active: false,
            camera: Camera::new(settings.rotation_speed),
            animation_secs: 0.0,
            globe_area: Rect::default(),
            table_area: Rect::default(),
            theme: Theme::from_choice(settings.theme),
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the data source for new data.
    ///
    /// Returns Ok(true) if new data was received, Ok(false) otherwise. Source
    /// errors are kept in `load_error` for display.
    pub fn reload_data(&mut self) -> Result<bool> {
        if let Some(dataset) = self.source.poll() {
            info!(points = dataset.len(), source = self.source.description(), "dataset received");

            // A selection that no longer exists is dropped
            if let Some(ref id) = self.selected_id {
                if dataset.get(id).is_none() {
                    debug!(id = %id, "selected point missing from new dataset");
                    self.selected_id = None;
                }
            }

            self.data = Some(dataset);
            self.loaded_at = Some(Instant::now());
            self.load_error = None;
            self.clamp_table_index();
            return Ok(true);
        }

        self.load_error = self.source.error().map(str::to_string);
        Ok(false)
    }

    /// Advance animation state by `elapsed`.
    pub fn tick(&mut self, elapsed: Duration) {
        self.camera.advance(elapsed);
        self.animation_secs += elapsed.as_secs_f64();
    }

    /// True until the first dataset arrives or the source fails.
    pub fn is_loading(&self) -> bool {
        self.data.is_none() && self.load_error.is_none()
    }

    /// Points whose water level lies within the current range.
    pub fn visible_points(&self) -> Vec<&MonitoringPoint> {
        match self.data {
            Some(ref data) => filter_points(&data.points, &self.range),
            None => Vec::new(),
        }
    }

    /// Visible points narrowed by the search text, in table order.
    pub fn table_points(&self) -> Vec<&MonitoringPoint> {
        let mut points: Vec<&MonitoringPoint> = self
            .visible_points()
            .into_iter()
            .filter(|p| matches_search(p, &self.filter_text))
            .collect();
        sort_points(&mut points, self.sort_column, self.sort_ascending);
        points
    }

    /// Severity counts over the visible points.
    pub fn counts(&self) -> SeverityCounts {
        SeverityCounts::from_points(self.visible_points())
    }

    /// The selected point, even if the current range hides it.
    pub fn selected_point(&self) -> Option<&MonitoringPoint> {
        let id = self.selected_id.as_deref()?;
        self.data.as_ref()?.get(id)
    }

    /// Select a point by id.
    pub fn select_point(&mut self, id: &str) {
        debug!(id, "point selected");
        self.selected_id = Some(id.to_string());
    }

    pub fn clear_selection(&mut self) {
        self.selected_id = None;
    }

    /// Restore the full range, clear the search and the selection.
    pub fn reset_filters(&mut self) {
        self.range = WaterLevelRange::full();
        self.filter_text.clear();
        self.filter_active = false;
        self.selected_id = None;
        self.table_index = 0;
        self.table_offset = 0;
    }

    /// Move the lower range bound by `steps` range steps.
    pub fn shift_range_min(&mut self, steps: f64) {
        self.range.shift_min(steps * self.range_step);
        self.clamp_table_index();
    }

    /// Move the upper range bound by `steps` range steps.
    pub fn shift_range_max(&mut self, steps: f64) {
        self.range.shift_max(steps * self.range_step);
        self.clamp_table_index();
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move the table highlight down by n rows.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.table_points().len().saturating_sub(1);
        self.table_index = (self.table_index + n).min(max);
    }

    /// Move the table highlight up by n rows.
    pub fn select_prev_n(&mut self, n: usize) {
        self.table_index = self.table_index.saturating_sub(n);
    }

    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Jump to the first row.
    pub fn select_first(&mut self) {
        self.table_index = 0;
    }

    /// Jump to the last row.
    pub fn select_last(&mut self) {
        self.table_index = self.table_points().len().saturating_sub(1);
    }

    fn clamp_table_index(&mut self) {
        let max = self.table_points().len().saturating_sub(1);
        self.table_index = self.table_index.min(max);
    }

    /// Select the point on the highlighted table row.
    pub fn select_table_row(&mut self) {
        let id = self.table_points().get(self.table_index).map(|p| p.id.clone());
        if let Some(id) = id {
            self.select_point(&id);
        }
    }

    /// Handle a click at a terminal cell inside the table.
    ///
    /// Returns true if a row was hit.
    pub fn click_table(&mut self, column: u16, row: u16) -> bool {
        let area = self.table_area;
        // First inner row is the table header
        let first_row = area.y + 1;
        if !area.contains((column, row).into()) || row < first_row {
            return false;
        }
        let index = self.table_offset + (row - first_row) as usize;
        if index >= self.table_points().len() {
            return false;
        }
        self.table_index = index;
        self.select_table_row();
        true
    }

    /// Handle a click at a terminal cell inside the globe.
    ///
    /// Selects the nearest front-facing marker within reach and returns true,
    /// or leaves the selection unchanged and returns false.
    pub fn click_globe(&mut self, column: u16, row: u16) -> bool {
        let area = self.globe_area;
        if !area.contains((column, row).into()) {
            return false;
        }

        let viewport = Viewport::new(area.width, area.height, &self.camera);
        let target = viewport.cell_center(column - area.x, row - area.y);
        let points = self.visible_points();
        let hit = pick_marker(&points, &self.camera, &viewport, target, PICK_RADIUS)
            .map(|i| points[i].id.clone());

        match hit {
            Some(id) => {
                self.select_point(&id);
                true
            }
            None => false,
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Cycle to the next sort column.
    pub fn cycle_sort(&mut self) {
        self.sort_column = self.sort_column.next();
    }

    /// Toggle sort direction between ascending and descending.
    pub fn toggle_sort_direction(&mut self) {
        self.sort_ascending = !self.sort_ascending;
    }

    /// Enter filter input mode (starts capturing keystrokes for search).
    pub fn start_filter(&mut self) {
        self.filter_active = true;
    }

    /// Exit filter input mode without clearing the filter text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    /// Clear the filter text and exit filter mode.
    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
        self.clamp_table_index();
    }

    /// Append a character to the filter text.
    pub fn filter_push(&mut self, c: char) {
        self.filter_text.push(c);
        self.clamp_table_index();
    }

    /// Remove the last character from the filter text.
    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
        self.clamp_table_index();
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the visible points to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        if self.data.is_none() {
            bail!("No data to export");
        }
        let points = self.visible_points();
        write_export(path, &points, &self.range)?;
        info!(path = %path.display(), points = points.len(), "exported visible points");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ThemeChoice;
    use crate::source::ChannelSource;
    use groundwater_types::Severity;

    fn settings() -> Settings {
        Settings {
            theme: ThemeChoice::Dark,
            ..Settings::default()
        }
    }

    fn point(id: &str, lat: f64, lon: f64, wl: f64) -> MonitoringPoint {
        MonitoringPoint::builder(id)
            .position(lat, lon)
            .water_level(wl)
            .quality_index(90.0)
            .location(format!("Basin {}, Somewhere", id))
            .build()
    }

    /// App with four points loaded; the last faces the viewer at the center.
    fn loaded_app() -> App {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source), &settings());
        tx.send(Dataset::new(vec![
            point("gw-0000", 10.0, 20.0, 5.0),
            point("gw-0001", -30.0, 100.0, 35.0),
            point("gw-0002", 45.0, -120.0, 80.0),
            point("gw-0003", 0.0, -90.0, 95.0),
        ]))
        .unwrap();
        assert!(app.reload_data().unwrap());
        app
    }

    #[test]
    fn test_loading_until_data_arrives() {
        let (_tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source), &settings());
        assert!(app.is_loading());
        assert!(!app.reload_data().unwrap());
        assert!(app.visible_points().is_empty());
        assert_eq!(app.counts().total(), 0);
    }

    #[test]
    fn test_source_error_is_reported() {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source), &settings());
        drop(tx);
        assert!(!app.reload_data().unwrap());
        assert!(app.load_error.is_some());
        assert!(!app.is_loading());
    }

    #[test]
    fn test_range_narrows_visible_points_and_counts() {
        let mut app = loaded_app();
        assert_eq!(app.visible_points().len(), 4);

        app.range = WaterLevelRange::new(30.0, 90.0);
        let ids: Vec<&str> = app.visible_points().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["gw-0001", "gw-0002"]);

        let counts = app.counts();
        assert_eq!(counts.get(Severity::Moderate), 1);
        assert_eq!(counts.get(Severity::Normal), 1);
        assert_eq!(counts.get(Severity::Critical), 0);
    }

    #[test]
    fn test_range_steps() {
        let mut app = loaded_app();
        app.range_step = 5.0;
        app.shift_range_min(2.0);
        app.shift_range_max(-1.0);
        assert_eq!(app.range, WaterLevelRange::new(10.0, 95.0));

        // Bounds never cross
        app.shift_range_min(100.0);
        assert_eq!(app.range.min(), 95.0);
    }

    #[test]
    fn test_reset_restores_full_set_and_clears_selection() {
        let mut app = loaded_app();
        app.select_point("gw-0002");
        app.range = WaterLevelRange::new(50.0, 60.0);
        app.filter_text = "basin".to_string();
        assert!(app.visible_points().is_empty());

        app.reset_filters();

        assert!(app.range.is_full());
        assert!(app.filter_text.is_empty());
        assert!(app.selected_id.is_none());
        assert_eq!(app.visible_points().len(), 4);
    }

    #[test]
    fn test_selection_survives_filter_changes() {
        let mut app = loaded_app();
        app.select_point("gw-0000");
        app.range = WaterLevelRange::new(50.0, 100.0);

        let selected = app.selected_point().unwrap();
        assert_eq!(selected.id, "gw-0000");
        assert!(!app.range.contains(selected.water_level));
    }

    #[test]
    fn test_table_search_sort_and_select() {
        let mut app = loaded_app();
        app.filter_text = "GW-000".to_string();
        app.sort_column = SortColumn::WaterLevel;
        app.sort_ascending = false;

        let ids: Vec<&str> = app.table_points().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["gw-0003", "gw-0002", "gw-0001", "gw-0000"]);

        app.select_next_n(10);
        assert_eq!(app.table_index, 3);
        app.select_table_row();
        assert_eq!(app.selected_id.as_deref(), Some("gw-0000"));

        app.filter_push('3');
        assert_eq!(app.table_points().len(), 1);
        assert_eq!(app.table_index, 0);
    }

    #[test]
    fn test_click_table_row() {
        let mut app = loaded_app();
        app.table_area = Rect::new(1, 3, 60, 10);

        // Header row does nothing
        assert!(!app.click_table(5, 3));
        assert!(app.click_table(5, 5));
        assert_eq!(app.selected_id.as_deref(), Some("gw-0001"));

        // Below the last row
        assert!(!app.click_table(5, 9));
    }

    #[test]
    fn test_click_globe_picks_front_marker() {
        let mut app = loaded_app();
        app.globe_area = Rect::new(0, 2, 80, 40);

        // Center cell of the globe area, where gw-0003 faces the viewer
        assert!(app.click_globe(40, 22));
        assert_eq!(app.selected_id.as_deref(), Some("gw-0003"));

        // Empty corner leaves the selection alone
        assert!(!app.click_globe(1, 3));
        assert_eq!(app.selected_id.as_deref(), Some("gw-0003"));

        // Hidden by the range, so not clickable
        app.clear_selection();
        app.range = WaterLevelRange::new(0.0, 50.0);
        assert!(!app.click_globe(40, 22));
    }

    #[test]
    fn test_reset_shows_every_point_of_an_off_scale_dataset() {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source), &settings());
        tx.send(Dataset::new(vec![
            point("gw-0000", 0.0, 0.0, 150.0),
            point("gw-0001", 10.0, 10.0, -3.0),
            point("gw-0002", 20.0, 20.0, 40.0),
        ]))
        .unwrap();
        app.reload_data().unwrap();

        app.shift_range_min(5.0);
        assert_eq!(app.visible_points().len(), 1);

        app.reset_filters();
        let total = app.data.as_ref().map(Dataset::len).unwrap();
        assert_eq!(app.visible_points().len(), total);
        assert_eq!(app.counts().total(), total);
    }

    #[test]
    fn test_new_dataset_drops_missing_selection() {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source), &settings());
        tx.send(Dataset::new(vec![point("gw-0000", 0.0, 0.0, 50.0)])).unwrap();
        app.reload_data().unwrap();
        app.select_point("gw-0000");

        tx.send(Dataset::new(vec![point("gw-0009", 0.0, 0.0, 50.0)])).unwrap();
        app.reload_data().unwrap();
        assert!(app.selected_id.is_none());
    }

    #[test]
    fn test_tick_advances_spin_and_pulse() {
        let mut app = loaded_app();
        app.tick(Duration::from_secs(1));
        assert!((app.camera.rotation - app.camera.rotation_speed).abs() < 1e-9);
        assert!((app.animation_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_export_visible_points() {
        let mut app = loaded_app();
        app.range = WaterLevelRange::new(0.0, 40.0);
        let file = tempfile::NamedTempFile::new().unwrap();
        app.export_state(file.path()).unwrap();

        let exported = Dataset::load(file.path()).unwrap();
        assert_eq!(exported.len(), 2);
    }

    #[test]
    fn test_export_without_data_fails() {
        let (_tx, source) = ChannelSource::create("test");
        let app = App::new(Box::new(source), &settings());
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(app.export_state(file.path()).is_err());
    }
}
