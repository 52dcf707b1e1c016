//! Buoys view rendering.
//!
//! A sortable table of every buoy with tiered battery and signal meters,
//! and a status card for the selected buoy underneath.

use std::cmp::Ordering;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::{fill_ratio, DeviceView};
use crate::ui::common::{format_percent, meter};

/// Column to sort by in the Buoys view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FleetSortColumn {
    /// Sort by buoy id.
    #[default]
    Id,
    /// Sort by status severity.
    Status,
    /// Sort by battery percentage.
    Battery,
    /// Sort by signal percentage.
    Signal,
}

impl FleetSortColumn {
    /// Cycle to the next sort column.
    pub fn next(self) -> Self {
        match self {
            FleetSortColumn::Id => FleetSortColumn::Status,
            FleetSortColumn::Status => FleetSortColumn::Battery,
            FleetSortColumn::Battery => FleetSortColumn::Signal,
            FleetSortColumn::Signal => FleetSortColumn::Id,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FleetSortColumn::Id => "id",
            FleetSortColumn::Status => "status",
            FleetSortColumn::Battery => "battery",
            FleetSortColumn::Signal => "signal",
        }
    }
}

/// Sort buoys by the given column and direction.
///
/// Ties are broken by id so the order is stable across reloads.
pub fn sort_devices_by(
    devices: &mut [(usize, &DeviceView)],
    column: FleetSortColumn,
    ascending: bool,
) {
    devices.sort_by(|a, b| {
        let primary = match column {
            FleetSortColumn::Id => a.1.id().cmp(b.1.id()),
            FleetSortColumn::Status => a.1.status().cmp(&b.1.status()),
            FleetSortColumn::Battery => a.1.record.battery.total_cmp(&b.1.record.battery),
            FleetSortColumn::Signal => a.1.record.signal.total_cmp(&b.1.record.signal),
        };

        let primary = if ascending {
            primary
        } else {
            primary.reverse()
        };

        if primary == Ordering::Equal {
            a.1.id().cmp(b.1.id())
        } else {
            primary
        }
    });
}

/// Render the Buoys view.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let devices = app.visible_devices();
    let Some(ref data) = app.data else {
        return;
    };

    let chunks = Layout::vertical([Constraint::Min(5), Constraint::Length(8)]).split(area);

    let header = Row::new(vec![
        Cell::from(format_header("Buoy", FleetSortColumn::Id, app)),
        Cell::from("Name"),
        Cell::from(format_header("Status", FleetSortColumn::Status, app)),
        Cell::from(format_header("Battery", FleetSortColumn::Battery, app)),
        Cell::from(format_header("Signal", FleetSortColumn::Signal, app)),
        Cell::from("Updated"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = devices
        .iter()
        .map(|(_, d)| {
            let display = d.display;
            Row::new(vec![
                Cell::from(d.id().to_string()),
                Cell::from(d.name().to_string()),
                Cell::from(Line::from(vec![
                    Span::styled("● ", app.theme.tier_style(display.indicator)),
                    Span::styled(display.label, app.theme.status_style(d.status())),
                ])),
                Cell::from(metric_cell(d.record.battery))
                    .style(app.theme.tier_style(d.battery_tier)),
                Cell::from(metric_cell(d.record.signal)).style(app.theme.tier_style(d.signal_tier)),
                Cell::from(d.record.last_update.clone()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(9),
        Constraint::Fill(2),
        Constraint::Length(11),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Length(12),
    ];

    let selected_visual_index = app.selected_index.min(devices.len().saturating_sub(1));

    let sort_dir = if app.sort_ascending { "↑" } else { "↓" };

    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };

    let position_info = if !devices.is_empty() {
        format!(" [{}/{}]", selected_visual_index + 1, devices.len())
    } else {
        String::new()
    };

    let title = format!(
        " Buoy Network Status ({}/{}) [s:sort {}{}]{}{} ",
        devices.len(),
        data.devices.len(),
        app.sort_column.label(),
        sort_dir,
        filter_info,
        position_info
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default()
        .with_offset(app.fleet_table_offset)
        .with_selected(Some(selected_visual_index));
    frame.render_stateful_widget(table, chunks[0], &mut state);

    if let Some((_, device)) = devices.get(selected_visual_index) {
        render_card(frame, app, device, chunks[1]);
    }

    // Mouse clicks map screen rows through this offset
    app.fleet_table_offset = state.offset();
}

/// Status card for one buoy: battery and signal gauges plus readings.
fn render_card(frame: &mut Frame, app: &App, device: &DeviceView, area: Rect) {
    let record = &device.record;

    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(format!(" {} ", record.name), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("[{}] ", device.display.label),
                app.theme.status_style(record.status),
            ),
        ]))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(1), // Location
        Constraint::Length(1), // Battery
        Constraint::Length(1), // Signal
        Constraint::Length(1), // Readings
        Constraint::Min(0),    // Footer
    ])
    .split(inner);

    let location = Paragraph::new(format!(
        " ⌖ {:.4}, {:.4}",
        record.location.lat, record.location.lng
    ))
    .style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(location, rows[0]);

    let battery = Gauge::default()
        .gauge_style(app.theme.gauge_style(device.battery_tier))
        .label(format!("Battery {}", format_percent(record.battery)))
        .ratio(fill_ratio(record.battery));
    frame.render_widget(battery, rows[1]);

    let signal = Gauge::default()
        .gauge_style(app.theme.gauge_style(device.signal_tier))
        .label(format!("Signal  {}", format_percent(record.signal)))
        .ratio(fill_ratio(record.signal));
    frame.render_widget(signal, rows[2]);

    let sensors = &record.sensors;
    let readings = Paragraph::new(format!(
        " Temp: {}°C   Humidity: {}%   Wave: {}m   Wind: {} km/h",
        sensors.temperature, sensors.humidity, sensors.wave_height, sensors.wind_speed
    ));
    frame.render_widget(readings, rows[3]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" Updated: {}", record.last_update),
            Style::default().add_modifier(Modifier::DIM),
        ),
        Span::styled("   Enter:inspect", Style::default().fg(app.theme.highlight)),
    ]));
    frame.render_widget(footer, rows[4]);
}

fn metric_cell(percent: f64) -> String {
    format!("{:>4} {}", format_percent(percent), meter(fill_ratio(percent), 8))
}

fn format_header(name: &str, col: FleetSortColumn, app: &App) -> Span<'static> {
    if app.sort_column == col {
        let arrow = if app.sort_ascending { "↑" } else { "↓" };
        Span::raw(format!("{}{}", name, arrow))
    } else {
        Span::raw(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{mock, FleetData, Thresholds};

    #[test]
    fn test_sort_column_cycle() {
        let mut col = FleetSortColumn::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(col.label());
            col = col.next();
        }
        assert_eq!(seen, vec!["id", "status", "battery", "signal"]);
        assert_eq!(col, FleetSortColumn::Id);
    }

    #[test]
    fn test_sort_by_signal_breaks_ties_by_id() {
        let mut snapshot = mock::fleet_snapshot();
        snapshot.buoys[0].signal = 50.0;
        snapshot.buoys[1].signal = 50.0;
        let data = FleetData::from_snapshot(snapshot, &Thresholds::default());

        let mut devices: Vec<_> = data.devices.iter().enumerate().rev().collect();
        sort_devices_by(&mut devices, FleetSortColumn::Signal, false);
        let ids: Vec<_> = devices.iter().map(|(_, d)| d.id()).collect();
        assert_eq!(ids, vec!["BOY-004", "BOY-001", "BOY-002", "BOY-005", "BOY-003"]);
    }

    #[test]
    fn test_metric_cell() {
        assert_eq!(metric_cell(50.0), " 50% ████░░░░");
    }
}
