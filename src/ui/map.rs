//! Map view rendering.
//!
//! A placeholder network map: markers are spread by list position with a
//! status legend, and the selected buoy's details sit alongside.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::{marker_position, DeviceStatus, DeviceView};
use crate::ui::detail::device_lines;

/// Render the Map view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        return;
    };

    let chunks = Layout::horizontal([Constraint::Fill(2), Constraint::Fill(1)]).split(area);

    let block = Block::default()
        .title(format!(" Network Overview ({} buoys) ", data.devices.len()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
        .style(Style::default().bg(app.theme.water));
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);

    for (index, device) in data.devices.iter().enumerate() {
        render_marker(frame, app, device, index, inner);
    }
    render_legend(frame, app, inner);

    render_selected(frame, app, chunks[1]);
}

fn render_marker(frame: &mut Frame, app: &App, device: &DeviceView, index: usize, inner: Rect) {
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let (x, y) = marker_position(index).to_cell(inner.width, inner.height);
    let selected = index == app.selected_index;

    let dot_style = app.theme.tier_style(device.display.indicator).add_modifier(Modifier::BOLD);
    let label_style = if selected {
        app.theme.selected
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::styled(if selected { "◉ " } else { "● " }, dot_style),
        Span::styled(device.id().to_string(), label_style),
    ];
    if selected {
        spans.push(Span::styled(format!(" {}", device.name()), label_style));
    }

    let line = Line::from(spans);
    let width = (line.width() as u16).min(inner.width - x);
    let marker_area = Rect::new(inner.x + x, inner.y + y, width, 1);
    frame.render_widget(Paragraph::new(line), marker_area);
}

fn render_legend(frame: &mut Frame, app: &App, inner: Rect) {
    let mut lines = vec![Line::from(Span::styled(
        "Buoy Status",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for status in DeviceStatus::ALL {
        let display = status.display();
        lines.push(Line::from(vec![
            Span::styled("● ", app.theme.tier_style(display.indicator)),
            Span::raw(display.label),
        ]));
    }

    let height = (lines.len() as u16).min(inner.height);
    let width = 13u16.min(inner.width);
    let legend_area = Rect::new(inner.x, inner.y + inner.height - height, width, height);
    frame.render_widget(Paragraph::new(lines), legend_area);
}

fn render_selected(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let Some(device) = app.selected_device() else {
        frame.render_widget(
            Paragraph::new(" No buoy selected")
                .style(Style::default().add_modifier(Modifier::DIM))
                .block(block.title(" Buoy ")),
            area,
        );
        return;
    };

    let title = Line::from(vec![
        Span::styled(format!(" ⚓ {} ", device.name()), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("[{}] ", device.display.label), app.theme.status_style(device.status())),
    ]);

    let mut lines = device_lines(app, device);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Enter: view detailed analytics",
        Style::default().fg(app.theme.highlight),
    )));

    frame.render_widget(Paragraph::new(lines).block(block.title(title)), area);
}
