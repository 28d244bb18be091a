use crate::library::{MapHandle, MarkerHandle, PopupHandle};
use crate::poi::LatLng;
use crate::terminal::{TerminalMarker, TerminalSession};

/// Application state
pub struct App {
    pub session: TerminalSession,
    /// Initial view, restored by `reset_view`
    home: (LatLng, u8),
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    /// Whether the left button moved since it went down
    dragged: bool,
    /// Index into `session.markers` for keyboard selection
    pub selected: Option<usize>,
}

/// Convert terminal coords to map cell coords (1 cell border offset)
fn to_map_cell(col: u16, row: u16) -> (u16, u16) {
    (col.saturating_sub(1), row.saturating_sub(1))
}

impl App {
    pub fn new(session: TerminalSession) -> Self {
        let home = (session.map.center(), session.map.zoom());
        Self {
            session,
            home,
            should_quit: false,
            last_mouse: None,
            dragged: false,
            selected: None,
        }
    }

    /// Pan the map by dots
    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.session.map.pan(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.session.map.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.session.map.zoom_out();
    }

    /// Zoom in towards a screen position (terminal column/row)
    pub fn zoom_in_at(&mut self, col: u16, row: u16) {
        let (c, r) = to_map_cell(col, row);
        self.session.map.zoom_in_at(c, r);
    }

    /// Zoom out from a screen position (terminal column/row)
    pub fn zoom_out_at(&mut self, col: u16, row: u16) {
        let (c, r) = to_map_cell(col, row);
        self.session.map.zoom_out_at(c, r);
    }

    /// Back to the initial center and zoom
    pub fn reset_view(&mut self) {
        let (center, zoom) = self.home;
        self.session.map.pan_to(center);
        self.session.map.set_zoom(zoom);
    }

    /// Select the next marker (wraps)
    pub fn select_next(&mut self) {
        let count = self.session.markers.len();
        if count == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % count,
            None => 0,
        });
    }

    /// Select the previous marker (wraps)
    pub fn select_prev(&mut self) {
        let count = self.session.markers.len();
        if count == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        });
    }

    pub fn selected_marker(&self) -> Option<TerminalMarker> {
        self.selected
            .and_then(|i| self.session.markers.get(i))
            .cloned()
    }

    /// Click the selected marker as if with the mouse
    pub fn click_selected(&mut self) -> bool {
        match self.selected_marker() {
            Some(marker) => {
                marker.click();
                true
            }
            None => false,
        }
    }

    pub fn close_popup(&mut self) {
        self.session.popup.close();
    }

    /// Left button down
    pub fn press(&mut self, col: u16, row: u16) {
        self.last_mouse = Some((col, row));
        self.dragged = false;
    }

    /// Handle mouse drag
    pub fn handle_drag(&mut self, x: u16, y: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            // One cell is 2x4 dots
            let dx = (last_x as i32 - x as i32) * 2;
            let dy = (last_y as i32 - y as i32) * 4;
            if dx != 0 || dy != 0 {
                self.dragged = true;
                self.pan(dx, dy);
            }
        }
        self.last_mouse = Some((x, y));
    }

    /// Left button up. A release without drag is a click; returns whether
    /// it hit a marker.
    pub fn release(&mut self, col: u16, row: u16) -> bool {
        let was_drag = self.dragged;
        self.last_mouse = None;
        self.dragged = false;
        if was_drag {
            return false;
        }

        let (c, r) = to_map_cell(col, row);
        let Some(marker) = self.session.map.marker_at(c, r) else {
            return false;
        };
        self.selected = self.session.markers.iter().position(|m| m.same(&marker));
        marker.click();
        true
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn zoom_level(&self) -> String {
        self.session.map.zoom().to_string()
    }

    /// Current center coordinates as a string
    pub fn center_coords(&self) -> String {
        let center = self.session.map.center();
        format!(
            "{:.4}°{}, {:.4}°{}",
            center.lat.abs(),
            if center.lat >= 0.0 { "N" } else { "S" },
            center.lng.abs(),
            if center.lng >= 0.0 { "E" } else { "W" }
        )
    }

    /// Title of the selected marker, else of the open popup
    pub fn selected_title(&self) -> Option<String> {
        self.selected_marker()
            .map(|m| m.title())
            .or_else(|| self.session.popup.is_open().then(|| self.session.popup.content()).flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::init::init_map;
    use crate::terminal::{TerminalHost, MAP_CONTAINER};

    fn app() -> App {
        let host = TerminalHost::new("/nonexistent/charger-map-data");
        let session = init_map(&host, MAP_CONTAINER, &MapConfig::default()).unwrap();
        session.map.set_viewport_size(120, 40);
        App::new(session)
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = app();
        app.select_prev();
        assert_eq!(app.selected, Some(4));
        app.select_next();
        assert_eq!(app.selected, Some(0));
    }

    #[test]
    fn test_enter_clicks_selected() {
        let mut app = app();
        assert!(!app.click_selected());
        app.select_next();
        app.select_next();
        assert!(app.click_selected());
        let marker = &app.session.markers[1];
        assert_eq!(app.session.popup.content(), Some(marker.title()));
        assert_eq!(app.session.map.zoom(), 20);
    }

    #[test]
    fn test_release_without_drag_clicks_marker() {
        let mut app = app();
        let rect = app.session.map.pin_rect(&app.session.markers[2]).unwrap();
        // Terminal coords include the border
        let (col, row) = (rect.stem.0 as u16 + 1, rect.stem.1 as u16 + 1);
        app.press(col, row);
        assert!(app.release(col, row));
        assert_eq!(app.selected, Some(2));
        assert!(app.session.popup.is_open());
    }

    #[test]
    fn test_drag_pans_instead_of_clicking() {
        let mut app = app();
        let before = app.session.map.center();
        app.press(10, 10);
        app.handle_drag(14, 10);
        assert!(!app.release(14, 10));
        assert!(app.session.map.center().lng < before.lng);
        assert!(!app.session.popup.is_open());
    }

    #[test]
    fn test_reset_and_close() {
        let mut app = app();
        app.select_next();
        app.click_selected();
        app.close_popup();
        assert!(!app.session.popup.is_open());
        app.reset_view();
        assert_eq!(app.session.map.zoom(), 11);
        assert_eq!(app.session.map.center(), LatLng::new(41.6938, 44.8015));
    }
}
