//! Capabilities a mapping host provides to the initializer.
//!
//! The initializer only talks to these traits. A host hands out two
//! libraries, `maps` (map and popup constructors) and `marker` (pin builder
//! and marker constructor); their handles are cheap clones sharing state.

use std::fmt;

use crate::config::Rgb;
use crate::error::MapError;
use crate::glyph::Glyph;
use crate::poi::LatLng;

/// Names a host library can be imported by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryName {
    Maps,
    Marker,
}

impl LibraryName {
    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryName::Maps => "maps",
            LibraryName::Marker => "marker",
        }
    }
}

impl fmt::Display for LibraryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivered to click listeners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    /// Position of the clicked marker
    pub position: LatLng,
}

pub type ClickHandler = Box<dyn Fn(&ClickEvent)>;

/// Initial view of a new map
#[derive(Debug, Clone, Copy)]
pub struct MapOptions<'a> {
    pub style_id: &'a str,
    pub zoom: u8,
    pub center: LatLng,
}

/// Appearance of a pin icon
#[derive(Debug, Clone)]
pub struct PinOptions {
    pub glyph: Glyph,
    pub glyph_color: Rgb,
    pub background: Rgb,
    pub border_color: Rgb,
    /// Height in host units (terminal rows for the terminal host)
    pub height: u16,
}

/// Everything a marker binds together
pub struct MarkerOptions<'a, M, P> {
    pub position: LatLng,
    pub map: &'a M,
    pub content: P,
    pub title: &'a str,
    pub z_index: i32,
}

pub trait MapHandle: Clone + 'static {
    fn pan_to(&self, position: LatLng);
    fn set_zoom(&self, zoom: u8);
    fn center(&self) -> LatLng;
    fn zoom(&self) -> u8;
}

pub trait MarkerHandle: Clone + 'static {
    fn position(&self) -> LatLng;
    fn title(&self) -> String;
    fn z_index(&self) -> i32;
    /// Listeners fire in registration order
    fn add_click_listener(&self, handler: ClickHandler);
}

/// The shared information popup. Opening it again moves it; there is
/// never more than one visible.
pub trait PopupHandle<M>: Clone + 'static {
    fn close(&self);
    fn set_content(&self, content: &str);
    fn open(&self, map: &M, anchor: LatLng);
    fn is_open(&self) -> bool;
    fn content(&self) -> Option<String>;
}

/// Map and popup constructors
pub trait MapsLibrary {
    type Map: MapHandle;
    type Popup: PopupHandle<Self::Map>;

    fn create_map(&self, container: &str, options: &MapOptions<'_>) -> Result<Self::Map, MapError>;
    fn create_popup(&self) -> Self::Popup;
}

/// Pin builder and marker constructor for maps of type `M`
pub trait MarkerLibrary<M: MapHandle> {
    type Pin;
    type Marker: MarkerHandle;

    fn build_pin(&self, options: PinOptions) -> Self::Pin;
    fn create_marker(&self, options: MarkerOptions<'_, M, Self::Pin>) -> Result<Self::Marker, MapError>;
}

/// Entry point of a mapping backend
pub trait LibraryHost: Sync {
    type Maps: MapsLibrary + Send;
    type Markers: MarkerLibrary<<Self::Maps as MapsLibrary>::Map> + Send;

    fn import_maps(&self) -> Result<Self::Maps, MapError>;
    fn import_marker(&self) -> Result<Self::Markers, MapError>;
}

pub type MapOf<H> = <<H as LibraryHost>::Maps as MapsLibrary>::Map;
pub type PopupOf<H> = <<H as LibraryHost>::Maps as MapsLibrary>::Popup;
pub type MarkerOf<H> = <<H as LibraryHost>::Markers as MarkerLibrary<MapOf<H>>>::Marker;

/// Import both libraries concurrently; fails if either import fails
pub fn import_libraries<H: LibraryHost>(host: &H) -> Result<(H::Maps, H::Markers), MapError> {
    let (maps, markers) = rayon::join(|| host.import_maps(), || host.import_marker());
    Ok((maps?, markers?))
}
