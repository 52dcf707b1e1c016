//! Overview rendering.
//!
//! Alert banner on top, a grid of sensor overview cards, and one chart
//! per time series with its derived trend in the title.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::{Alert, ChartKind, ChartView, SensorCard};
use crate::ui::common::meter;

/// Cards per row in the sensor grid.
const CARDS_PER_ROW: usize = 3;
/// Fill shown on online cards.
const ONLINE_PROGRESS: f64 = 0.85;

/// Render the Overview.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        return;
    };

    let card_rows = data.cards.len().div_ceil(CARDS_PER_ROW) as u16;
    let alert_height = if data.alerts.is_empty() {
        0
    } else {
        data.alerts.len() as u16 * 2 + 2
    };

    let chunks = Layout::vertical([
        Constraint::Length(alert_height),
        Constraint::Length(card_rows * 5),
        Constraint::Min(6),
    ])
    .split(area);

    if !data.alerts.is_empty() {
        render_alerts(frame, app, &data.alerts, chunks[0]);
    }
    render_cards(frame, app, &data.cards, chunks[1]);
    render_charts(frame, app, &data.charts, chunks[2]);
}

fn render_alerts(frame: &mut Frame, app: &App, alerts: &[Alert], area: Rect) {
    let warning = Style::default().fg(app.theme.caution);
    let lines: Vec<Line> = alerts
        .iter()
        .flat_map(|alert| {
            [
                Line::from(Span::styled(
                    format!("⚠ {}", alert.title),
                    warning.add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("  {}", alert.message),
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ]
        })
        .collect();

    let block = Block::default()
        .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
        .border_type(app.theme.border_type)
        .border_style(warning);

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_cards(frame: &mut Frame, app: &App, cards: &[SensorCard], area: Rect) {
    if cards.is_empty() {
        return;
    }

    let rows = Layout::vertical(vec![
        Constraint::Length(5);
        cards.len().div_ceil(CARDS_PER_ROW)
    ])
    .split(area);

    for (row_area, row_cards) in rows.iter().zip(cards.chunks(CARDS_PER_ROW)) {
        let cols = Layout::horizontal(vec![Constraint::Ratio(1, CARDS_PER_ROW as u32); CARDS_PER_ROW])
            .split(*row_area);
        for (card_area, card) in cols.iter().zip(row_cards) {
            render_card(frame, app, card, *card_area);
        }
    }
}

fn render_card(frame: &mut Frame, app: &App, card: &SensorCard, area: Rect) {
    let status_dot = Span::styled("● ", app.theme.tier_style(card.status.display().indicator));

    let block = Block::default()
        .title(Line::from(vec![Span::raw(format!(" {} ", card.title)), status_dot]))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let mut value_line = vec![Span::styled(
        format!(" {}", card.value),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(ref unit) = card.unit {
        value_line.push(Span::styled(
            format!(" {}", unit),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }

    let mut detail_line = Vec::new();
    if let Some((direction, text)) = card.trend_badge() {
        detail_line.push(Span::styled(
            format!(" {} {}", direction.arrow(), text),
            app.theme.trend_style(direction),
        ));
    }
    if let Some(ref id) = card.device_id {
        detail_line.push(Span::styled(
            format!("  [{}]", id),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }

    let mut lines = vec![Line::from(value_line), Line::from(detail_line)];
    if card.shows_progress() {
        let width = area.width.saturating_sub(4) as usize;
        lines.push(Line::from(Span::styled(
            format!(" {}", meter(ONLINE_PROGRESS, width)),
            Style::default().fg(app.theme.highlight),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_charts(frame: &mut Frame, app: &App, charts: &[ChartView], area: Rect) {
    if charts.is_empty() {
        return;
    }

    let cols = Layout::horizontal(vec![Constraint::Ratio(1, charts.len() as u32); charts.len()])
        .split(area);
    for (chart_area, chart) in cols.iter().zip(charts) {
        render_chart(frame, app, chart, *chart_area);
    }
}

/// Points for a series: x is the sample index.
fn chart_points(chart: &ChartView) -> Vec<(f64, f64)> {
    chart.series.samples.iter().enumerate().map(|(i, s)| (i as f64, s.value)).collect()
}

/// Y bounds with a little headroom so the line never touches the border.
fn y_bounds(points: &[(f64, f64)]) -> [f64; 2] {
    let min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let pad = ((max - min) * 0.1).max(0.1);
    [min - pad, max + pad]
}

fn render_chart(frame: &mut Frame, app: &App, chart: &ChartView, area: Rect) {
    let series = &chart.series;
    let trend = chart.trend;

    let title = Line::from(vec![
        Span::styled(format!(" {} ", series.title), app.theme.header),
        Span::styled(format!("{} ", trend.label()), app.theme.trend_style(trend.direction)),
    ]);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let points = chart_points(chart);
    if points.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new("  No samples").style(Style::default().add_modifier(Modifier::DIM)),
            inner,
        );
        return;
    }

    let color = app.theme.highlight;
    let mut datasets = Vec::new();
    if series.kind == ChartKind::Area {
        datasets.push(
            Dataset::default()
                .marker(Marker::HalfBlock)
                .graph_type(GraphType::Bar)
                .style(Style::default().fg(app.theme.water))
                .data(&points),
        );
    }
    datasets.push(
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color))
            .data(&points),
    );

    let [y_min, y_max] = y_bounds(&points);
    let x_max = (points.len().saturating_sub(1)).max(1) as f64;
    let samples = &series.samples;
    let x_labels: Vec<Span> = [samples.first(), samples.get(samples.len() / 2), samples.last()]
        .into_iter()
        .flatten()
        .map(|s| Span::raw(s.time.clone()))
        .collect();
    let y_labels = vec![
        Span::raw(format!("{:.1}{}", y_min, series.unit)),
        Span::raw(format!("{:.1}{}", y_max, series.unit)),
    ];

    let widget = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .labels(x_labels)
                .style(Style::default().fg(app.theme.border)),
        )
        .y_axis(
            Axis::default()
                .bounds([y_min, y_max])
                .labels(y_labels)
                .style(Style::default().fg(app.theme.border)),
        );

    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{mock, FleetData, Thresholds};

    #[test]
    fn test_chart_points_follow_sample_order() {
        let data = FleetData::from_snapshot(mock::fleet_snapshot(), &Thresholds::default());
        let points = chart_points(&data.charts[1]);
        assert_eq!(points.len(), 6);
        assert_eq!(points[0], (0.0, 1.2));
        assert_eq!(points[5], (5.0, 1.6));
    }

    #[test]
    fn test_y_bounds() {
        assert_eq!(y_bounds(&[]), [0.0, 1.0]);
        let [lo, hi] = y_bounds(&[(0.0, 5.0), (1.0, 5.0)]);
        assert!(lo < 5.0 && hi > 5.0);
    }
}
