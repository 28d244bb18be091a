//! Terminal mapping host: maps drawn with Braille characters, glyph pins
//! and a popup box, all rendered by `ui`.

mod map;
mod marker;
mod popup;

pub use map::{MapState, PopupView, TerminalMap, TerminalMaps};
pub use marker::{CellRect, TerminalMarker, TerminalMarkers, TerminalPin};
pub use popup::TerminalPopup;

use std::path::PathBuf;
use std::sync::Arc;

use crate::data;
use crate::error::MapError;
use crate::init::HostSession;
use crate::library::{LibraryHost, LibraryName};

/// Container id of the single map area in the terminal layout
pub const MAP_CONTAINER: &str = "map";

pub type TerminalSession = HostSession<TerminalHost>;

/// Host that renders into the terminal
pub struct TerminalHost {
    data_dir: PathBuf,
    containers: Vec<String>,
}

impl TerminalHost {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            containers: vec![MAP_CONTAINER.to_string()],
        }
    }
}

impl LibraryHost for TerminalHost {
    type Maps = TerminalMaps;
    type Markers = TerminalMarkers;

    fn import_maps(&self) -> Result<TerminalMaps, MapError> {
        if self.data_dir.exists() && !self.data_dir.is_dir() {
            return Err(MapError::LibraryUnavailable {
                library: LibraryName::Maps,
                reason: format!("{} is not a directory", self.data_dir.display()),
            });
        }
        let layers = data::load_base_layers(&self.data_dir);
        if layers.is_empty() {
            log::info!("no base layers in {}, drawing graticule only", self.data_dir.display());
        }
        Ok(TerminalMaps::new(self.containers.clone(), Arc::new(layers)))
    }

    fn import_marker(&self) -> Result<TerminalMarkers, MapError> {
        Ok(TerminalMarkers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::init::init_map;
    use crate::library::{MapHandle, MarkerHandle, PopupHandle};
    use crate::poi::{LatLng, Poi};

    fn session() -> TerminalSession {
        let host = TerminalHost::new("/nonexistent/charger-map-data");
        let session = init_map(&host, MAP_CONTAINER, &MapConfig::default()).unwrap();
        session.map.set_viewport_size(120, 40);
        session
    }

    #[test]
    fn test_init_registers_markers_on_map() {
        let session = session();
        assert_eq!(session.map.view().markers.len(), 5);
        assert_eq!(session.map.zoom(), 11);
        assert_eq!(session.map.center(), LatLng::new(41.6938, 44.8015));
        assert_eq!(session.map.view().style.name, "solar");
    }

    #[test]
    fn test_unknown_container() {
        let host = TerminalHost::new("/nonexistent/charger-map-data");
        let err = init_map(&host, "sidebar", &MapConfig::default()).err().unwrap();
        assert!(matches!(err, MapError::MissingContainer(_)));
    }

    #[test]
    fn test_data_path_must_be_directory() {
        let file = std::env::temp_dir().join(format!("charger-map-file-{}", std::process::id()));
        std::fs::write(&file, "x").unwrap();
        let err = init_map(&TerminalHost::new(&file), MAP_CONTAINER, &MapConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, MapError::LibraryUnavailable { library: LibraryName::Maps, .. }));
        std::fs::remove_file(&file).unwrap();
    }

    #[test]
    fn test_click_on_pin_opens_popup() {
        let session = session();
        let target = &session.markers[3];
        let rect = session.map.pin_rect(target).unwrap();

        // Pin stem is the anchor cell
        assert!(session.map.click_at(rect.stem.0 as u16, rect.stem.1 as u16));
        assert_eq!(session.map.center(), target.position());
        assert_eq!(session.map.zoom(), 20);
        assert!(session.popup.is_open());
        assert_eq!(session.popup.content(), Some(target.title()));
        assert_eq!(
            session.map.view().popup.as_ref().map(|p| p.content.clone()),
            Some(target.title())
        );
    }

    #[test]
    fn test_click_on_empty_map_hits_nothing() {
        let session = session();
        assert!(!session.map.click_at(0, 0));
        assert!(!session.popup.is_open());
        assert_eq!(session.map.zoom(), 11);
    }

    #[test]
    fn test_overlapping_pins_top_most_wins() {
        let session = session();
        // Old Tbilisi (z=2) and Gudiashvili street (z=1) are 60 m apart and
        // share a cell at zoom 11
        let upper = &session.markers[3];
        let lower = &session.markers[4];
        let upper_rect = session.map.pin_rect(upper).unwrap();
        let lower_rect = session.map.pin_rect(lower).unwrap();
        assert_eq!(upper_rect.stem, lower_rect.stem);

        session.map.click_at(upper_rect.stem.0 as u16, upper_rect.stem.1 as u16);
        assert_eq!(session.popup.content(), Some(upper.title()));
    }

    #[test]
    fn test_empty_title_still_shown() {
        let host = TerminalHost::new("/nonexistent/charger-map-data");
        let config = MapConfig {
            pois: vec![Poi::new("", 41.7, 44.8, 1)],
            ..MapConfig::default()
        };
        let session = init_map(&host, MAP_CONTAINER, &config).unwrap();
        assert_eq!(session.popup.content(), None);

        session.markers[0].click();
        assert!(session.popup.is_open());
        assert_eq!(session.popup.content(), Some(String::new()));
        assert_eq!(
            session.map.view().popup.as_ref().map(|p| p.content.clone()),
            Some(String::new())
        );
    }

    #[test]
    fn test_popup_close_clears_view() {
        let session = session();
        session.markers[0].click();
        assert!(session.map.view().popup.is_some());
        session.popup.close();
        assert!(session.map.view().popup.is_none());
        assert!(!session.popup.is_open());
    }
}
