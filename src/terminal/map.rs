use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use crate::error::MapError;
use crate::library::{MapHandle, MapOptions, MapsLibrary, MarkerHandle};
use crate::map::{BaseLayers, MapStyle, Viewport};
use crate::poi::LatLng;

use super::marker::{CellRect, TerminalMarker};
use super::popup::TerminalPopup;

/// What the popup shows while open
#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    pub content: String,
    pub anchor: LatLng,
}

/// Everything needed to draw one map
pub struct MapState {
    pub style: MapStyle,
    pub viewport: Viewport,
    pub layers: Arc<BaseLayers>,
    pub markers: Vec<TerminalMarker>,
    pub popup: Option<PopupView>,
}

impl MapState {
    /// Map area size in cells
    pub fn size(&self) -> (u16, u16) {
        (
            (self.viewport.width / 2) as u16,
            (self.viewport.height / 4) as u16,
        )
    }

    /// Cell containing a geographic position
    pub fn anchor_cell(&self, position: LatLng) -> (i32, i32) {
        let (px, py) = self.viewport.project(position.lng, position.lat);
        (px.div_euclid(2), py.div_euclid(4))
    }

    /// Markers from bottom to top: ascending stacking order, creation
    /// order among equals
    pub fn draw_order(&self) -> Vec<TerminalMarker> {
        let mut markers = self.markers.clone();
        markers.sort_by_key(|m| m.z_index());
        markers
    }

    /// Cells covered by a marker's pin, if any of them is on screen
    pub fn pin_rect(&self, marker: &TerminalMarker) -> Option<CellRect> {
        let rect = marker.pin().footprint(self.anchor_cell(marker.position()));
        let (cols, rows) = self.size();
        let visible = rect.x + i32::from(rect.width) > 0
            && rect.x < i32::from(cols)
            && rect.y + i32::from(rect.height) > 0
            && rect.y < i32::from(rows);
        visible.then_some(rect)
    }
}

/// Shared handle to a terminal map
#[derive(Clone)]
pub struct TerminalMap(Rc<RefCell<MapState>>);

impl TerminalMap {
    pub fn view(&self) -> Ref<'_, MapState> {
        self.0.borrow()
    }

    pub(super) fn add_marker(&self, marker: TerminalMarker) {
        self.0.borrow_mut().markers.push(marker);
    }

    pub(super) fn set_popup(&self, popup: Option<PopupView>) {
        self.0.borrow_mut().popup = popup;
    }

    /// Resize to a map area of `cols` x `rows` cells
    pub fn set_viewport_size(&self, cols: u16, rows: u16) {
        let mut state = self.0.borrow_mut();
        state.viewport.width = usize::from(cols) * 2;
        state.viewport.height = usize::from(rows) * 4;
    }

    /// Pan by a dot delta
    pub fn pan(&self, dx: i32, dy: i32) {
        self.0.borrow_mut().viewport.pan(dx, dy);
    }

    pub fn zoom_in(&self) {
        self.0.borrow_mut().viewport.zoom_in();
    }

    pub fn zoom_out(&self) {
        self.0.borrow_mut().viewport.zoom_out();
    }

    /// Zoom in keeping the cell under the cursor in place
    pub fn zoom_in_at(&self, col: u16, row: u16) {
        let (px, py) = cell_center(col, row);
        self.0.borrow_mut().viewport.zoom_in_at(px, py);
    }

    /// Zoom out keeping the cell under the cursor in place
    pub fn zoom_out_at(&self, col: u16, row: u16) {
        let (px, py) = cell_center(col, row);
        self.0.borrow_mut().viewport.zoom_out_at(px, py);
    }

    pub fn pin_rect(&self, marker: &TerminalMarker) -> Option<CellRect> {
        self.view().pin_rect(marker)
    }

    /// Top-most marker whose pin covers the cell
    pub fn marker_at(&self, col: u16, row: u16) -> Option<TerminalMarker> {
        let state = self.view();
        let hit = state.draw_order().into_iter().rev().find(|marker| {
            state
                .pin_rect(marker)
                .is_some_and(|rect| rect.contains(i32::from(col), i32::from(row)))
        });
        hit
    }

    /// Click a cell of the map area. Returns whether a marker was hit.
    pub fn click_at(&self, col: u16, row: u16) -> bool {
        // The state borrow must end before listeners mutate the map
        let hit = self.marker_at(col, row);
        match hit {
            Some(marker) => {
                marker.click();
                true
            }
            None => false,
        }
    }
}

fn cell_center(col: u16, row: u16) -> (i32, i32) {
    (i32::from(col) * 2 + 1, i32::from(row) * 4 + 2)
}

impl MapHandle for TerminalMap {
    fn pan_to(&self, position: LatLng) {
        self.0.borrow_mut().viewport.set_center(position.lng, position.lat);
    }

    fn set_zoom(&self, zoom: u8) {
        self.0.borrow_mut().viewport.set_zoom(zoom);
    }

    fn center(&self) -> LatLng {
        let state = self.view();
        LatLng::new(state.viewport.center_lat, state.viewport.center_lon)
    }

    fn zoom(&self) -> u8 {
        self.view().viewport.zoom
    }
}

/// The `maps` library
pub struct TerminalMaps {
    containers: Vec<String>,
    layers: Arc<BaseLayers>,
}

impl TerminalMaps {
    pub fn new(containers: Vec<String>, layers: Arc<BaseLayers>) -> Self {
        Self { containers, layers }
    }
}

impl MapsLibrary for TerminalMaps {
    type Map = TerminalMap;
    type Popup = TerminalPopup;

    fn create_map(&self, container: &str, options: &MapOptions<'_>) -> Result<TerminalMap, MapError> {
        if !self.containers.iter().any(|c| c == container) {
            return Err(MapError::MissingContainer(container.to_string()));
        }

        let style = MapStyle::by_id(options.style_id).unwrap_or_else(|| {
            log::warn!("unknown map style '{}', using default", options.style_id);
            MapStyle::default()
        });

        let state = MapState {
            style,
            viewport: Viewport::new(options.center.lng, options.center.lat, options.zoom, 0, 0),
            layers: self.layers.clone(),
            markers: Vec::new(),
            popup: None,
        };
        Ok(TerminalMap(Rc::new(RefCell::new(state))))
    }

    fn create_popup(&self) -> TerminalPopup {
        TerminalPopup::default()
    }
}
