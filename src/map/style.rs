use ratatui::style::Color;

/// Colors for each map layer
#[derive(Debug, Clone, PartialEq)]
pub struct MapStyle {
    pub name: &'static str,
    pub graticule: Color,
    pub water: Color,
    pub boundaries: Color,
    pub roads: Color,
    pub frame: Color,
}

impl MapStyle {
    pub const DEFAULT: MapStyle = MapStyle {
        name: "default",
        graticule: Color::DarkGray,
        water: Color::Cyan,
        boundaries: Color::Yellow,
        roads: Color::White,
        frame: Color::DarkGray,
    };

    /// Warm style for the charger map
    pub const SOLAR: MapStyle = MapStyle {
        name: "solar",
        graticule: Color::Rgb(0x4a, 0x3f, 0x2a),
        water: Color::Rgb(0x4f, 0x9d, 0xd8),
        boundaries: Color::Rgb(0xc9, 0xa2, 0x27),
        roads: Color::Rgb(0xd8, 0xd2, 0xc4),
        frame: Color::Rgb(0xff, 0x83, 0x00),
    };

    /// Look up a style by its map style id
    pub fn by_id(style_id: &str) -> Option<MapStyle> {
        match style_id {
            "9bd92426168a314" => Some(Self::SOLAR),
            "default" | "" => Some(Self::DEFAULT),
            _ => None,
        }
    }
}

impl Default for MapStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_ids() {
        assert_eq!(MapStyle::by_id("9bd92426168a314").map(|s| s.name), Some("solar"));
        assert_eq!(MapStyle::by_id("").map(|s| s.name), Some("default"));
        assert!(MapStyle::by_id("nope").is_none());
    }
}
