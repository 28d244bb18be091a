//! Map initialization: build the map, then one pin marker per POI.

use crate::config::MapConfig;
use crate::error::MapError;
use crate::glyph::Glyph;
use crate::library::{
    import_libraries, LibraryHost, MapHandle, MapOf, MapOptions, MapsLibrary, MarkerHandle,
    MarkerLibrary, MarkerOf, MarkerOptions, PinOptions, PopupHandle, PopupOf,
};

/// Handles created by initialization. The host keeps these alive for as
/// long as the map is shown.
pub struct MapSession<M, P, K> {
    pub map: M,
    pub popup: P,
    pub markers: Vec<K>,
}

pub type HostSession<H> = MapSession<MapOf<H>, PopupOf<H>, MarkerOf<H>>;

/// Render a map into `container` and populate it with the configured POIs.
///
/// Coordinates are validated before anything is created, so a bad row
/// leaves nothing half-rendered.
pub fn init_map<H: LibraryHost>(
    host: &H,
    container: &str,
    config: &MapConfig,
) -> Result<HostSession<H>, MapError> {
    config.validate()?;

    let (maps, markers) = import_libraries(host)?;
    let popup = maps.create_popup();
    let map = maps.create_map(
        container,
        &MapOptions {
            style_id: config.style_id,
            zoom: config.zoom,
            center: config.center,
        },
    )?;
    log::info!(
        "map created in '{}' (style {}, zoom {})",
        container,
        config.style_id,
        config.zoom
    );

    let markers = set_markers(&markers, &map, &popup, config)?;
    log::info!("{} markers placed", markers.len());

    Ok(MapSession { map, popup, markers })
}

/// Create one marker per POI, in order, and wire its click listeners:
/// first pan/zoom to the marker, then show its title in the shared popup.
pub fn set_markers<M, P, L>(
    library: &L,
    map: &M,
    popup: &P,
    config: &MapConfig,
) -> Result<Vec<L::Marker>, MapError>
where
    M: MapHandle,
    P: PopupHandle<M>,
    L: MarkerLibrary<M>,
{
    let style = &config.pin;
    let mut markers = Vec::with_capacity(config.pois.len());

    for poi in &config.pois {
        let glyph = Glyph::parse(style.glyph_svg)?;
        let pin = library.build_pin(PinOptions {
            glyph,
            glyph_color: style.glyph_color,
            background: style.background,
            border_color: style.border_color,
            height: style.height,
        });

        let position = poi.position()?;
        let marker = library.create_marker(MarkerOptions {
            position,
            map,
            content: pin,
            title: poi.name,
            z_index: poi.z_index,
        })?;

        let zoom_map = map.clone();
        let click_zoom = config.click_zoom;
        marker.add_click_listener(Box::new(move |_| {
            zoom_map.pan_to(position);
            zoom_map.set_zoom(click_zoom);
        }));

        let popup_map = map.clone();
        let popup = popup.clone();
        let title = marker.title();
        marker.add_click_listener(Box::new(move |event| {
            popup.close();
            popup.set_content(&title);
            popup.open(&popup_map, event.position);
        }));

        log::debug!("marker '{}' at ({}, {}) z={}", poi.name, position.lat, position.lng, poi.z_index);
        markers.push(marker);
    }

    Ok(markers)
}
