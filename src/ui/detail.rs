//! Buoy detail rendering.
//!
//! Displays a modal overlay with sensor readings, condition indicators and
//! battery history for the inspected buoy. The Map view reuses the same
//! lines in its side panel.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::data::{DeviceRecord, DeviceView, SensorCondition, Tier};
use crate::ui::common::{format_percent, sparkline};

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 16;
/// Battery readings shown in the history sparkline.
const SPARKLINE_WIDTH: usize = 12;

/// One row of the sensor table.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorRow {
    /// Key into [`DeviceRecord::conditions`].
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
}

/// Sensor rows for a buoy, in display order.
///
/// The gyroscope row only appears when the buoy reports one.
pub fn sensor_rows(record: &DeviceRecord) -> Vec<SensorRow> {
    let s = &record.sensors;
    let mut rows = vec![
        SensorRow {
            key: "temperature",
            label: "Temperature",
            value: format!("{}°C", s.temperature),
        },
        SensorRow {
            key: "humidity",
            label: "Humidity",
            value: format!("{}%", s.humidity),
        },
        SensorRow {
            key: "wave_height",
            label: "Wave Height",
            value: format!("{}m", s.wave_height),
        },
        SensorRow {
            key: "wind_speed",
            label: "Wind Speed",
            value: format!("{} km/h", s.wind_speed),
        },
    ];
    if let Some(gyro) = s.gyroscope {
        rows.push(SensorRow {
            key: "gyroscope",
            label: "Gyroscope",
            value: format!("{}°/s", gyro),
        });
    }
    rows.push(SensorRow {
        key: "battery",
        label: "Battery",
        value: format_percent(record.battery),
    });
    rows
}

fn condition_span(app: &App, condition: Option<&SensorCondition>) -> Span<'static> {
    match condition {
        Some(c) => Span::styled(format!("● {}", c.label()), app.theme.tier_style(c.tier())),
        None => Span::styled("-", Style::default().add_modifier(Modifier::DIM)),
    }
}

/// Text lines describing a buoy: location, deployment and sensors.
pub fn device_lines(app: &App, device: &DeviceView) -> Vec<Line<'static>> {
    let record = &device.record;
    let dim = Style::default().add_modifier(Modifier::DIM);
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![Span::styled(" ID:      ", dim), Span::raw(record.id.clone())]),
        Line::from(vec![
            Span::styled(" ⌖        ", dim),
            Span::raw(format!("{:.4}, {:.4}", record.location.lat, record.location.lng)),
        ]),
    ];

    if let Some(ref deployment) = record.deployment {
        lines.push(Line::from(vec![
            Span::styled(" Depth:   ", dim),
            Span::raw(deployment.depth.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::styled(" Deployed:", dim),
            Span::raw(format!(" {}", deployment.deployed)),
        ]));
        lines.push(Line::from(vec![
            Span::styled(" Serviced:", dim),
            Span::raw(format!(" {}", deployment.last_maintenance)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Sensor Readings", bold)));
    for row in sensor_rows(record) {
        lines.push(Line::from(vec![
            Span::raw(format!(" {:<12}", row.label)),
            Span::styled(format!("{:<10}", row.value), bold),
            condition_span(app, record.conditions.get(row.key)),
        ]));
    }

    lines
}

/// Render the buoy detail as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Skip rendering if terminal is too small for the overlay
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(device) = app.selected_device() else {
        return;
    };
    let record = &device.record;

    let overlay_width = (area.width * 90 / 100).clamp(MIN_OVERLAY_WIDTH, 90);
    let overlay_height = (area.height * 90 / 100).clamp(MIN_OVERLAY_HEIGHT, 30);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Length(6), // Header
        Constraint::Min(8),    // Sensors
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    // Header
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let battery_trend = app.history.battery_trend(device.id());
    let signal_trend = app.history.signal_trend(device.id());

    let mut location = vec![Span::raw(format!(
        " ⌖ {:.4}, {:.4}",
        record.location.lat, record.location.lng
    ))];
    if let Some(ref deployment) = record.deployment {
        location.push(Span::styled(
            format!(
                "   Depth {}  Deployed {}  Serviced {}",
                deployment.depth, deployment.deployed, deployment.last_maintenance
            ),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }

    let header_lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", record.name), bold),
            Span::styled(
                format!("[{} {}]", device.status().symbol(), device.display.label),
                app.theme.status_style(device.status()).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}  Updated {}", record.id, record.last_update),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]),
        Line::from(location),
        Line::from(""),
        Line::from(vec![
            Span::raw(" Battery "),
            Span::styled(format_percent(record.battery), app.theme.tier_style(device.battery_tier)),
            Span::raw(" "),
            Span::styled(
                sparkline(&app.history.battery_sparkline(device.id()), SPARKLINE_WIDTH),
                app.theme.tier_style(device.battery_tier),
            ),
            Span::styled(
                format!(" {}", battery_trend.label()),
                app.theme.trend_style(battery_trend.direction),
            ),
            Span::raw("    Signal "),
            Span::styled(format_percent(record.signal), app.theme.tier_style(device.signal_tier)),
            Span::styled(
                format!(" {}", signal_trend.label()),
                app.theme.trend_style(signal_trend.direction),
            ),
        ]),
    ];

    let header_block = Block::default()
        .title(" Buoy Detail ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));
    frame.render_widget(Paragraph::new(header_lines).block(header_block), chunks[0]);

    // Sensors
    let sensor_header = Row::new(vec![
        Cell::from("Sensor"),
        Cell::from("Reading"),
        Cell::from("Condition"),
    ])
    .height(1)
    .style(app.theme.header);

    let mut sensor_rows_out: Vec<Row> = sensor_rows(record)
        .into_iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.label),
                Cell::from(row.value),
                Cell::from(condition_span(app, record.conditions.get(row.key))),
            ])
        })
        .collect();
    sensor_rows_out.push(Row::new(vec![
        Cell::from("Signal"),
        Cell::from(format_percent(record.signal)),
        Cell::from(Span::styled(
            format!("● {}", tier_label(device.signal_tier)),
            app.theme.tier_style(device.signal_tier),
        )),
    ]));

    let widths = [Constraint::Fill(2), Constraint::Fill(2), Constraint::Fill(1)];
    let table = Table::new(sensor_rows_out, widths).header(sensor_header).block(
        Block::default()
            .title(" Sensor Readings ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );
    frame.render_widget(table, chunks[1]);

    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " ↑/↓: previous/next buoy   Esc: close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[2]);
}

fn tier_label(tier: Tier) -> &'static str {
    match tier {
        Tier::Green => "good",
        Tier::Yellow => "fair",
        Tier::Red => "poor",
    }
}
