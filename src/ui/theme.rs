//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::{BadgeVariant, DeviceStatus, Tier, TrendDirection};

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for the green tier.
    pub good: Color,
    /// Color for the yellow tier.
    pub caution: Color,
    /// Color for the red tier.
    pub bad: Color,
    /// Water color used behind the map.
    pub water: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Unfilled part of gauges.
    pub track: Color,
    /// Style for header rows and titles.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            good: Color::Green,
            caution: Color::Yellow,
            bad: Color::Red,
            water: Color::Blue,
            border: Color::Gray,
            track: Color::DarkGray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            good: Color::Green,
            caution: Color::Yellow,
            bad: Color::Red,
            water: Color::LightBlue,
            border: Color::DarkGray,
            track: Color::Gray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn tier_color(&self, tier: Tier) -> Color {
        match tier {
            Tier::Green => self.good,
            Tier::Yellow => self.caution,
            Tier::Red => self.bad,
        }
    }

    pub fn tier_style(&self, tier: Tier) -> Style {
        Style::default().fg(self.tier_color(tier))
    }

    /// Style for a status label: indicator color plus badge emphasis.
    pub fn status_style(&self, status: DeviceStatus) -> Style {
        let display = status.display();
        let style = self.tier_style(display.indicator);
        match display.badge {
            BadgeVariant::Default => style,
            BadgeVariant::Secondary => style.add_modifier(Modifier::ITALIC),
            BadgeVariant::Destructive => style.add_modifier(Modifier::BOLD),
        }
    }

    pub fn trend_style(&self, direction: TrendDirection) -> Style {
        self.tier_style(direction.tier()).add_modifier(Modifier::BOLD)
    }

    /// Gauge style for a tiered metric.
    pub fn gauge_style(&self, tier: Tier) -> Style {
        Style::default().fg(self.tier_color(tier)).bg(self.track)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_colors() {
        let theme = Theme::dark();
        assert_eq!(theme.tier_color(Tier::Green), Color::Green);
        assert_eq!(theme.tier_color(Tier::Yellow), Color::Yellow);
        assert_eq!(theme.tier_color(Tier::Red), Color::Red);
    }

    #[test]
    fn test_status_style_follows_badge() {
        let theme = Theme::dark();
        let offline = theme.status_style(DeviceStatus::Offline);
        assert_eq!(offline.fg, Some(Color::Red));
        assert!(offline.add_modifier.contains(Modifier::BOLD));

        let online = theme.status_style(DeviceStatus::Online);
        assert_eq!(online.fg, Some(Color::Green));
        assert!(online.add_modifier.is_empty());
    }

    #[test]
    fn test_trend_style() {
        let theme = Theme::light();
        assert_eq!(theme.trend_style(TrendDirection::Down).fg, Some(Color::Red));
        assert_eq!(theme.trend_style(TrendDirection::Stable).fg, Some(Color::Yellow));
    }
}
