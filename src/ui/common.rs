//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, help overlay
//! and a few text helpers.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::{DeviceStatus, Tier};

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the header bar with the fleet overview.
///
/// Displays: overall indicator, buoys online, counts by status, data age.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Span::styled(" OceanWatch ", Style::default().add_modifier(Modifier::BOLD));

    let Some(ref data) = app.data else {
        let line = Line::from(vec![title, Span::raw("| Loading...")]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let counts = data.status_counts();
    let total = data.devices.len();

    let overall = if counts.offline > 0 {
        Tier::Red
    } else if counts.warning > 0 {
        Tier::Yellow
    } else {
        Tier::Green
    };

    let count_span = |n: usize, status: DeviceStatus| {
        if n > 0 {
            Span::styled(n.to_string(), app.theme.status_style(status))
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        }
    };

    let line = Line::from(vec![
        Span::styled(" ≈ ", app.theme.tier_style(overall)),
        title,
        Span::styled("Marine IoT Dashboard ", Style::default().add_modifier(Modifier::DIM)),
        Span::raw("│ "),
        Span::styled(
            format!("{}/{}", counts.online, total),
            Style::default().fg(app.theme.good).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" buoys online │ "),
        count_span(counts.warning, DeviceStatus::Warning),
        Span::raw(" warn "),
        count_span(counts.offline, DeviceStatus::Offline),
        Span::raw(" offline │ "),
        Span::styled(
            format!("updated {}s ago", data.last_updated.elapsed().as_secs()),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Overview "),
        Line::from(" 2:Buoys "),
        Line::from(" 3:Map "),
    ];

    let selected = match app.current_view {
        View::Overview => 0,
        View::Fleet => 1,
        View::Map => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: data source, time since last update, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit r:retry", err)
    } else if let Some(ref data) = app.data {
        let elapsed = data.last_updated.elapsed();

        let controls = match app.current_view {
            View::Overview => "Tab:switch r:reload e:export ?:help q:quit",
            View::Fleet => {
                if app.filter_active {
                    "Type to search | Enter:apply Esc:cancel"
                } else {
                    "/:search s:sort S:reverse Enter:inspect ?:help q:quit"
                }
            }
            View::Map => "↑↓:select Enter:inspect Tab:switch ?:help q:quit",
        };

        format!(
            " {} | {} | Updated {:.1}s ago | {}",
            app.current_view.label(),
            app.source_description(),
            elapsed.as_secs_f64(),
            controls,
        )
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |name: &'static str| {
        Line::from(vec![Span::styled(name, Style::default().add_modifier(Modifier::BOLD))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  1/2/3       Jump to view"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Inspect buoy"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        section(" Buoys"),
        Line::from("  /         Start filter/search"),
        Line::from("  c         Clear filter"),
        Line::from("  s         Cycle sort column"),
        Line::from("  S         Toggle sort direction"),
        Line::from(""),
        section(" General"),
        Line::from("  r         Reload data"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
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

    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 25u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

/// Percentage as shown on cards: `87%`, `45.5%`.
pub fn format_percent(percent: f64) -> String {
    format!("{}%", percent)
}

/// A text progress bar `width` cells wide.
pub fn meter(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width - filled));
    bar
}

/// Render 0-7 levels as sparkline characters, keeping the last `width`.
pub fn sparkline(levels: &[u8], width: usize) -> String {
    if levels.is_empty() {
        return " ".repeat(width);
    }
    let skip = levels.len().saturating_sub(width);
    levels[skip..].iter().map(|&v| SPARKLINE_CHARS[v.min(7) as usize]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(87.0), "87%");
        assert_eq!(format_percent(45.5), "45.5%");
    }

    #[test]
    fn test_meter() {
        assert_eq!(meter(0.0, 4), "░░░░");
        assert_eq!(meter(0.87, 10), "█████████░");
        assert_eq!(meter(2.0, 3), "███");
        assert_eq!(meter(f64::NAN, 3).chars().count(), 3);
    }

    #[test]
    fn test_sparkline_keeps_latest() {
        assert_eq!(sparkline(&[], 3), "   ");
        assert_eq!(sparkline(&[0, 1, 7, 9], 3), "▂██");
    }
}
