//! Literal configuration: map style, initial view, pin style and the
//! charger locations. Nothing here is read from the environment.

use crate::error::MapError;
use crate::glyph::Glyph;
use crate::poi::{LatLng, Poi};

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Charger pump glyph with a lightning bolt cut out of the body
pub const CHARGER_GLYPH_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" height="3em" viewBox="0 0 500 500"><!--! Font Awesome Free 6.4.0 by @fontawesome - https://fontawesome.com License - https://fontawesome.com/license (Commercial License) Copyright 2023 Fonticons, Inc. --><path d="M96 0C60.7 0 32 28.7 32 64V448c-17.7 0-32 14.3-32 32s14.3 32 32 32H320c17.7 0 32-14.3 32-32s-14.3-32-32-32V304h16c22.1 0 40 17.9 40 40v32c0 39.8 32.2 72 72 72s72-32.2 72-72V252.3c32.5-10.2 56-40.5 56-76.3V144c0-8.8-7.2-16-16-16H544V80c0-8.8-7.2-16-16-16s-16 7.2-16 16v48H480V80c0-8.8-7.2-16-16-16s-16 7.2-16 16v48H432c-8.8 0-16 7.2-16 16v32c0 35.8 23.5 66.1 56 76.3V376c0 13.3-10.7 24-24 24s-24-10.7-24-24V344c0-48.6-39.4-88-88-88H320V64c0-35.3-28.7-64-64-64H96zM216.9 82.7c6 4 8.5 11.5 6.3 18.3l-25 74.9H256c6.7 0 12.7 4.2 15 10.4s.5 13.3-4.6 17.7l-112 96c-5.5 4.7-13.4 5.1-19.3 1.1s-8.5-11.5-6.3-18.3l25-74.9H96c-6.7 0-12.7-4.2-15-10.4s-.5-13.3 4.6-17.7l112-96c5.5-4.7 13.4-5.1 19.3-1.1z"/></svg>"#;

/// Solar auto-charger stations in Tbilisi
pub const CHARGERS: &[Poi] = &[
    Poi::new("(Solar Auto Charger) Kerchi Street", 41.7899406, 44.8024076, 4),
    Poi::new("(Solar Auto Charger) Kerchi Street 2", 41.79238, 44.800502, 5),
    Poi::new("(Solar Auto Charger) Queen Tamar Ave", 41.718503, 44.792097, 3),
    Poi::new("(Solar Auto Charger) Old Tbilisi", 41.697579, 44.799303, 2),
    Poi::new("(Solar Auto Charger) Gudiashvili street", 41.697596, 44.800044, 1),
];

/// Style of every pin
#[derive(Debug, Clone)]
pub struct PinStyle {
    pub glyph_svg: &'static str,
    pub glyph_color: Rgb,
    pub background: Rgb,
    pub border_color: Rgb,
    /// Pin body height in terminal rows
    pub height: u16,
}

/// Everything the initializer needs
#[derive(Debug, Clone)]
pub struct MapConfig {
    pub style_id: &'static str,
    pub zoom: u8,
    pub center: LatLng,
    /// Zoom applied when a marker is clicked
    pub click_zoom: u8,
    pub pin: PinStyle,
    pub pois: Vec<Poi>,
}

impl MapConfig {
    pub fn tbilisi_chargers() -> Self {
        Self {
            style_id: "9bd92426168a314",
            zoom: 11,
            center: LatLng::new(41.6938, 44.8015),
            click_zoom: 20,
            pin: PinStyle {
                glyph_svg: CHARGER_GLYPH_SVG,
                glyph_color: Rgb(0xff, 0x83, 0x00),
                background: Rgb(0xff, 0xd5, 0x14),
                border_color: Rgb(0xff, 0x83, 0x00),
                height: 2,
            },
            pois: CHARGERS.to_vec(),
        }
    }

    /// Check the pin glyph and every POI coordinate before anything is
    /// rendered
    pub fn validate(&self) -> Result<(), MapError> {
        Glyph::parse(self.pin.glyph_svg)?;
        for poi in &self.pois {
            poi.position()?;
        }
        Ok(())
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::tbilisi_chargers()
    }
}
