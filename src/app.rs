//! Application state and navigation logic.

use anyhow::Result;

use crate::data::{DeviceView, FleetData, History, Thresholds};
use crate::source::DataSource;
use crate::ui::fleet::{sort_devices_by, FleetSortColumn};
use crate::ui::Theme;

/// The current view/tab in the TUI.
///
/// Buoy inspection is shown as an overlay (controlled by
/// `App::show_detail_overlay`) rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Alert banner, sensor overview cards and trend charts.
    Overview,
    /// Status card for every buoy.
    Fleet,
    /// Placeholder network map.
    Map,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Overview => View::Fleet,
            View::Fleet => View::Map,
            View::Map => View::Overview,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Overview => View::Map,
            View::Fleet => View::Overview,
            View::Map => View::Fleet,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Fleet => "Buoys",
            View::Map => "Map",
        }
    }
}

/// Called with the buoy id whenever a buoy is inspected.
pub type InspectHandler = Box<dyn FnMut(&str) + Send>;

fn log_inspect(device_id: &str) {
    tracing::info!(device_id, "inspecting buoy");
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub data: Option<FleetData>,
    pub history: History,
    pub load_error: Option<String>,
    pub thresholds: Thresholds,

    // Selection: visual row in the Buoys view, snapshot order in the Map view
    pub selected_index: usize,
    /// First visible row of the buoy table, kept between frames
    pub fleet_table_offset: usize,

    // Sorting (Buoys view)
    pub sort_column: FleetSortColumn,
    pub sort_ascending: bool,

    // Search/filter
    pub filter_text: String,
    pub filter_active: bool,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, std::time::Instant)>,

    on_inspect: InspectHandler,
}

impl App {
    /// Create a new App with the given data source and thresholds.
    ///
    /// The theme is picked from the terminal background.
    pub fn new(source: Box<dyn DataSource>, thresholds: Thresholds) -> Self {
        Self::with_theme(source, thresholds, Theme::auto_detect())
    }

    /// Create a new App with an explicit theme.
    pub fn with_theme(source: Box<dyn DataSource>, thresholds: Thresholds, theme: Theme) -> Self {
        Self {
            running: true,
            current_view: View::Overview,
            show_help: false,
            show_detail_overlay: false,
            source,
            data: None,
            history: History::new(),
            load_error: None,
            thresholds,
            selected_index: 0,
            fleet_table_offset: 0,
            sort_column: FleetSortColumn::default(),
            sort_ascending: true,
            filter_text: String::new(),
            filter_active: false,
            theme,
            status_message: None,
            on_inspect: Box::new(log_inspect),
        }
    }

    /// Replace the handler invoked when a buoy is inspected.
    ///
    /// The default handler only logs the buoy id.
    pub fn with_inspect_handler<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.on_inspect = Box::new(handler);
        self
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, std::time::Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the data source for new data.
    ///
    /// Returns Ok(true) if new data was received, Ok(false) otherwise.
    pub fn reload_data(&mut self) -> Result<bool> {
        let Some(snapshot) = self.source.poll() else {
            if let Some(err) = self.source.error() {
                self.load_error = Some(err.to_string());
            }
            return Ok(false);
        };

        let data = FleetData::from_snapshot(snapshot, &self.thresholds);
        tracing::debug!(buoys = data.devices.len(), "fleet data updated");

        self.history.record(&data);
        self.data = Some(data);
        self.load_error = None;
        self.clamp_selection();
        Ok(true)
    }

    fn clamp_selection(&mut self) {
        let count = self.selectable_count();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.set_view(self.current_view.next());
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.set_view(self.current_view.prev());
    }

    /// Switch to a specific view.
    ///
    /// The Buoys and Map views index buoys differently, so the selection
    /// is reset.
    pub fn set_view(&mut self, view: View) {
        if view != self.current_view {
            self.current_view = view;
            self.selected_index = 0;
        }
    }

    /// Number of rows the current view can select.
    fn selectable_count(&self) -> usize {
        match self.current_view {
            View::Overview => 0,
            View::Fleet => self.visible_devices().len(),
            View::Map => self.data.as_ref().map_or(0, |d| d.devices.len()),
        }
    }

    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.selectable_count().saturating_sub(1);
        self.selected_index = (self.selected_index + n).min(max);
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_index = self.selected_index.saturating_sub(n);
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.selectable_count().saturating_sub(1);
    }

    /// Buoys shown in the Buoys view, filtered and sorted, with their
    /// index in the snapshot.
    pub fn visible_devices(&self) -> Vec<(usize, &DeviceView)> {
        let Some(ref data) = self.data else {
            return Vec::new();
        };

        let mut devices: Vec<(usize, &DeviceView)> =
            data.devices.iter().enumerate().filter(|(_, d)| self.matches_filter(d)).collect();
        sort_devices_by(&mut devices, self.sort_column, self.sort_ascending);
        devices
    }

    /// The buoy under the cursor in the current view.
    pub fn selected_device(&self) -> Option<&DeviceView> {
        let data = self.data.as_ref()?;
        match self.current_view {
            View::Overview => None,
            View::Fleet => self.visible_devices().get(self.selected_index).map(|(_, d)| *d),
            View::Map => data.devices.get(self.selected_index),
        }
    }

    /// Inspect the selected buoy: notify the inspect handler and open the
    /// detail overlay.
    pub fn inspect_selected(&mut self) {
        let Some(id) = self.selected_device().map(|d| d.id().to_string()) else {
            return;
        };
        (self.on_inspect)(&id);
        self.show_detail_overlay = true;
    }

    /// Navigate back: close overlay first, then return to the overview.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
            return;
        }
        self.set_view(View::Overview);
    }

    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Cycle to the next sort column in the Buoys view.
    pub fn cycle_sort(&mut self) {
        if self.current_view == View::Fleet {
            self.sort_column = self.sort_column.next();
        }
    }

    /// Toggle sort direction between ascending and descending.
    pub fn toggle_sort_direction(&mut self) {
        if self.current_view == View::Fleet {
            self.sort_ascending = !self.sort_ascending;
        }
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
    }

    pub fn filter_push(&mut self, c: char) {
        self.filter_text.push(c);
        self.clamp_selection();
    }

    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
    }

    /// Check if a buoy's id or name matches the current filter.
    pub fn matches_filter(&self, device: &DeviceView) -> bool {
        if self.filter_text.is_empty() {
            return true;
        }
        let search = self.filter_text.to_lowercase();
        device.id().to_lowercase().contains(&search)
            || device.name().to_lowercase().contains(&search)
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export current state to a file.
    pub fn export_state(&self, path: &std::path::Path) -> Result<()> {
        let Some(ref data) = self.data else {
            anyhow::bail!("No data to export");
        };
        crate::export::write_export(data, Some(&self.history), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crate::data::DeviceStatus;
    use crate::source::{FileSource, StaticSource};

    fn app() -> App {
        let mut app =
            App::with_theme(Box::new(StaticSource::mock()), Thresholds::default(), Theme::dark());
        assert!(app.reload_data().unwrap());
        app
    }

    #[test]
    fn test_view_cycle() {
        assert_eq!(View::Overview.next(), View::Fleet);
        assert_eq!(View::Map.next(), View::Overview);
        assert_eq!(View::Overview.prev(), View::Map);
        assert_eq!(View::Fleet.label(), "Buoys");
    }

    #[test]
    fn test_source_error_shown_after_first_failed_poll() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("missing.json"));
        let mut app = App::with_theme(Box::new(source), Thresholds::default(), Theme::dark());

        assert!(!app.reload_data().unwrap());
        let error = app.load_error.as_deref().unwrap();
        assert!(error.starts_with("Read error:"));
    }

    #[test]
    fn test_reload_records_history() {
        let mut app = app();
        assert_eq!(app.history.len("BOY-001"), 1);
        // Static source has nothing new
        assert!(!app.reload_data().unwrap());
        assert_eq!(app.source_description(), "built-in mock fleet");
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut app = app();
        app.set_view(View::Fleet);
        app.select_next_n(100);
        assert_eq!(app.selected_index, 4);
        app.select_prev_n(100);
        assert_eq!(app.selected_index, 0);
        app.select_last();
        assert_eq!(app.selected_index, 4);

        app.set_view(View::Overview);
        app.select_next();
        assert_eq!(app.selected_index, 0);
        assert!(app.selected_device().is_none());
    }

    #[test]
    fn test_filter_by_name_or_id() {
        let mut app = app();
        app.set_view(View::Fleet);
        for c in "arctic".chars() {
            app.filter_push(c);
        }
        let visible = app.visible_devices();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].1.id(), "BOY-003");

        app.clear_filter();
        for c in "boy-00".chars() {
            app.filter_push(c);
        }
        assert_eq!(app.visible_devices().len(), 5);
    }

    #[test]
    fn test_sort_by_battery_descending() {
        let mut app = app();
        app.set_view(View::Fleet);
        app.cycle_sort(); // Status
        app.cycle_sort(); // Battery
        assert_eq!(app.sort_column, FleetSortColumn::Battery);
        app.toggle_sort_direction();

        let ids: Vec<_> = app.visible_devices().iter().map(|(_, d)| d.id().to_string()).collect();
        assert_eq!(ids, vec!["BOY-001", "BOY-004", "BOY-005", "BOY-002", "BOY-003"]);
    }

    #[test]
    fn test_sort_by_status_groups_severity() {
        let mut app = app();
        app.set_view(View::Fleet);
        app.cycle_sort();
        let statuses: Vec<_> = app.visible_devices().iter().map(|(_, d)| d.status()).collect();
        assert_eq!(
            statuses,
            vec![
                DeviceStatus::Online,
                DeviceStatus::Online,
                DeviceStatus::Online,
                DeviceStatus::Warning,
                DeviceStatus::Offline
            ]
        );
    }

    #[test]
    fn test_inspect_bubbles_selected_id() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut app = app().with_inspect_handler(move |id| sink.lock().unwrap().push(id.to_string()));

        // Nothing selectable on the overview
        app.inspect_selected();
        assert!(seen.lock().unwrap().is_empty());
        assert!(!app.show_detail_overlay);

        app.set_view(View::Map);
        app.select_next();
        app.inspect_selected();
        assert_eq!(*seen.lock().unwrap(), vec!["BOY-002".to_string()]);
        assert!(app.show_detail_overlay);

        app.go_back();
        assert!(!app.show_detail_overlay);
        assert_eq!(app.current_view, View::Map);
        app.go_back();
        assert_eq!(app.current_view, View::Overview);
    }

    #[test]
    fn test_export_requires_data() {
        let app = App::with_theme(
            Box::new(StaticSource::mock()),
            Thresholds::default(),
            Theme::dark(),
        );
        let dir = tempfile::tempdir().unwrap();
        assert!(app.export_state(&dir.path().join("out.json")).is_err());
    }
}
