//! Terminal rendering with ratatui.
//!
//! One module per view ([`overview`], [`fleet`], [`map`]), the inspect
//! overlay in [`detail`], and shared bars and overlays in [`common`].

pub mod common;
pub mod detail;
pub mod fleet;
pub mod map;
pub mod overview;
pub mod theme;

pub use theme::Theme;

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::app::{App, View};
    use crate::data::Thresholds;
    use crate::source::StaticSource;

    fn app() -> App {
        let mut app =
            App::with_theme(Box::new(StaticSource::mock()), Thresholds::default(), Theme::dark());
        app.reload_data().unwrap();
        app
    }

    fn render_to_text(app: &mut App) -> String {
        render_sized(app, 120, 40)
    }

    fn render_sized(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                match app.current_view {
                    View::Overview => overview::render(frame, app, area),
                    View::Fleet => fleet::render(frame, app, area),
                    View::Map => map::render(frame, app, area),
                }
                if app.show_detail_overlay {
                    detail::render_overlay(frame, app, area);
                }
            })
            .unwrap();
        terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_views_render_fleet() {
        let mut app = app();

        let overview = render_to_text(&mut app);
        assert!(overview.contains("Weather Alert"));
        assert!(overview.contains("↗"));

        app.set_view(View::Fleet);
        let fleet = render_to_text(&mut app);
        assert!(fleet.contains("Atlantic Pioneer"));
        assert!(fleet.contains("BOY-005"));

        app.set_view(View::Map);
        let map = render_to_text(&mut app);
        assert!(map.contains("Buoy Status"));
        assert!(map.contains("BOY-003"));
    }

    #[test]
    fn test_short_table_scrolls_and_keeps_offset() {
        let mut app = app();
        app.set_view(View::Fleet);
        app.select_last();

        // Table area of 5 rows leaves room for two buoys
        let text = render_sized(&mut app, 120, 13);
        assert!(text.contains("BOY-005"));
        assert!(!text.contains("BOY-001"));
        assert_eq!(app.fleet_table_offset, 3);

        app.select_prev();
        render_sized(&mut app, 120, 13);
        assert_eq!(app.fleet_table_offset, 3);
    }

    #[test]
    fn test_inspect_overlay_renders_selected_buoy() {
        let mut app = app();
        app.set_view(View::Map);
        app.select_next();
        app.inspect_selected();

        let text = render_to_text(&mut app);
        assert!(text.contains("Buoy Detail"));
        assert!(text.contains("Pacific Guardian"));
        assert!(text.contains("Wave Height"));
    }
}
