mod geometry;
mod layers;
mod projection;
mod style;

pub use geometry::{draw_line, LineString};
pub use layers::{BaseLayers, Layer, MapLayers};
pub use projection::{Viewport, MAX_ZOOM, MIN_ZOOM};
pub use style::MapStyle;
