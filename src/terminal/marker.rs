use std::cell::RefCell;
use std::rc::Rc;

use ratatui::style::Color;

use crate::braille::BrailleCanvas;
use crate::config::Rgb;
use crate::error::MapError;
use crate::library::{ClickEvent, ClickHandler, MarkerHandle, MarkerLibrary, MarkerOptions, PinOptions};
use crate::poi::LatLng;

use super::map::TerminalMap;

fn to_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

/// Cells covered by a pin, relative to the map area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
    /// Cell pointing at the marker position
    pub stem: (i32, i32),
}

impl CellRect {
    pub fn contains(&self, col: i32, row: i32) -> bool {
        col >= self.x
            && col < self.x + i32::from(self.width)
            && row >= self.y
            && row < self.y + i32::from(self.height)
    }
}

/// Rasterized pin: a bordered glyph body above a stem
///
/// ```text
/// ▕⣿⣿⣿⣿⣿▏
/// ▕⣿⣿⣿⣿⣿▏
///    ▼
/// ```
pub struct TerminalPin {
    pub glyph: BrailleCanvas,
    pub glyph_color: Color,
    pub background: Color,
    pub border: Color,
}

impl TerminalPin {
    pub fn new(options: PinOptions) -> Self {
        let rows = options.height.max(1);
        let cols = options.glyph.columns_for(rows);
        Self {
            glyph: options.glyph.rasterize(usize::from(cols), usize::from(rows)),
            glyph_color: to_color(options.glyph_color),
            background: to_color(options.background),
            border: to_color(options.border_color),
        }
    }

    /// Width including the two border columns
    pub fn width(&self) -> u16 {
        cells(self.glyph.width()).saturating_add(2)
    }

    /// Height including the stem row
    pub fn height(&self) -> u16 {
        cells(self.glyph.height()).saturating_add(1)
    }

    /// Cells covered when the stem sits on `anchor`
    pub fn footprint(&self, anchor: (i32, i32)) -> CellRect {
        let width = self.width();
        let height = self.height();
        CellRect {
            x: anchor.0 - i32::from(width / 2),
            y: anchor.1 - i32::from(height - 1),
            width,
            height,
            stem: anchor,
        }
    }
}

fn cells(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

struct MarkerInner {
    position: LatLng,
    title: String,
    z_index: i32,
    pin: TerminalPin,
    listeners: RefCell<Vec<ClickHandler>>,
}

#[derive(Clone)]
pub struct TerminalMarker(Rc<MarkerInner>);

impl TerminalMarker {
    pub fn pin(&self) -> &TerminalPin {
        &self.0.pin
    }

    /// Fire every click listener in registration order
    pub fn click(&self) {
        let event = ClickEvent {
            position: self.0.position,
        };
        log::debug!("click on '{}'", self.0.title);
        for listener in self.0.listeners.borrow().iter() {
            listener(&event);
        }
    }

    pub fn same(&self, other: &TerminalMarker) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl MarkerHandle for TerminalMarker {
    fn position(&self) -> LatLng {
        self.0.position
    }

    fn title(&self) -> String {
        self.0.title.clone()
    }

    fn z_index(&self) -> i32 {
        self.0.z_index
    }

    fn add_click_listener(&self, handler: ClickHandler) {
        self.0.listeners.borrow_mut().push(handler);
    }
}

/// The `marker` library
pub struct TerminalMarkers;

impl MarkerLibrary<TerminalMap> for TerminalMarkers {
    type Pin = TerminalPin;
    type Marker = TerminalMarker;

    fn build_pin(&self, options: PinOptions) -> TerminalPin {
        TerminalPin::new(options)
    }

    fn create_marker(
        &self,
        options: MarkerOptions<'_, TerminalMap, TerminalPin>,
    ) -> Result<TerminalMarker, MapError> {
        if !options.position.is_valid() {
            return Err(MapError::InvalidCoordinate {
                name: options.title.to_string(),
                lat: options.position.lat,
                lng: options.position.lng,
            });
        }
        let marker = TerminalMarker(Rc::new(MarkerInner {
            position: options.position,
            title: options.title.to_string(),
            z_index: options.z_index,
            pin: options.content,
            listeners: RefCell::new(Vec::new()),
        }));
        options.map.add_marker(marker.clone());
        Ok(marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::glyph::Glyph;

    fn pin_with(svg: &str, height: u16) -> TerminalPin {
        let style = MapConfig::default().pin;
        TerminalPin::new(PinOptions {
            glyph: Glyph::parse(svg).unwrap(),
            glyph_color: style.glyph_color,
            background: style.background,
            border_color: style.border_color,
            height,
        })
    }

    fn pin() -> TerminalPin {
        let style = MapConfig::default().pin;
        pin_with(style.glyph_svg, style.height)
    }

    #[test]
    fn test_pin_size() {
        let pin = pin();
        assert_eq!(pin.width(), 7);
        assert_eq!(pin.height(), 3);
        assert_eq!(pin.glyph_color, Color::Rgb(0xff, 0x83, 0x00));
        assert_eq!(pin.background, Color::Rgb(0xff, 0xd5, 0x14));
    }

    #[test]
    fn test_footprint_centered_over_stem() {
        let rect = pin().footprint((10, 5));
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (7, 3, 7, 3));
        assert!(rect.contains(10, 5));
        assert!(rect.contains(7, 3));
        assert!(rect.contains(13, 4));
        assert!(!rect.contains(14, 4));
        assert!(!rect.contains(10, 6));
    }

    #[test]
    fn test_very_wide_glyph_saturates() {
        // A 100000:1 strip needs more columns than a terminal row can hold
        let pin = pin_with(r#"<svg><path d="M0 0H100000V1H0Z"/></svg>"#, 1);
        assert_eq!(pin.glyph.width(), usize::from(u16::MAX));
        assert_eq!(pin.width(), u16::MAX);
        assert_eq!(pin.height(), 2);

        let rect = pin.footprint((0, 0));
        assert_eq!(rect.width, u16::MAX);
        assert!(rect.contains(0, 0));
    }
}
