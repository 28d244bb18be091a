use crate::braille::BrailleCanvas;
use crate::map::geometry::{draw_linestring, LineString};
use crate::map::projection::Viewport;

/// Target spacing of graticule lines in dots
const GRATICULE_SPACING_DOTS: f64 = 48.0;

/// Which base layer a line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Water,
    Boundaries,
    Roads,
}

/// Base map geometry drawn under the markers
#[derive(Debug, Default, Clone)]
pub struct BaseLayers {
    pub water: Vec<LineString>,
    pub boundaries: Vec<LineString>,
    pub roads: Vec<LineString>,
}

/// One canvas per layer, so each can be colored separately
pub struct MapLayers {
    pub graticule: BrailleCanvas,
    pub water: BrailleCanvas,
    pub boundaries: BrailleCanvas,
    pub roads: BrailleCanvas,
}

impl BaseLayers {
    pub fn add(&mut self, layer: Layer, line: LineString) {
        match layer {
            Layer::Water => self.water.push(line),
            Layer::Boundaries => self.boundaries.push(line),
            Layer::Roads => self.roads.push(line),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.water.is_empty() && self.boundaries.is_empty() && self.roads.is_empty()
    }

    /// Rasterize every layer for a `cols` x `rows` cell area
    pub fn render(&self, cols: usize, rows: usize, viewport: &Viewport) -> MapLayers {
        let mut layers = MapLayers {
            graticule: BrailleCanvas::new(cols, rows),
            water: BrailleCanvas::new(cols, rows),
            boundaries: BrailleCanvas::new(cols, rows),
            roads: BrailleCanvas::new(cols, rows),
        };

        draw_graticule(&mut layers.graticule, viewport);
        for (lines, canvas) in [
            (&self.water, &mut layers.water),
            (&self.boundaries, &mut layers.boundaries),
            (&self.roads, &mut layers.roads),
        ] {
            for line in lines {
                draw_linestring(canvas, line, viewport);
            }
        }

        layers
    }
}

/// Round a spacing in degrees up to 1, 2 or 5 times a power of ten
pub fn graticule_step(degrees: f64) -> f64 {
    if degrees <= 0.0 || !degrees.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powf(degrees.log10().floor());
    let normalized = degrees / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Dotted latitude/longitude lines at a zoom-dependent spacing
fn draw_graticule(canvas: &mut BrailleCanvas, viewport: &Viewport) {
    let step = graticule_step(GRATICULE_SPACING_DOTS * viewport.degrees_per_dot());
    let (west, north) = viewport.unproject(0, 0);
    let (east, south) = viewport.unproject(viewport.width as i32, viewport.height as i32);

    let mut lon = (west / step).ceil() * step;
    while lon <= east {
        let (x, _) = viewport.project(lon, viewport.center_lat);
        for y in (0..viewport.height as i32).step_by(2) {
            canvas.set_pixel_signed(x, y);
        }
        lon += step;
    }

    let mut lat = (south / step).ceil() * step;
    while lat <= north {
        let (_, y) = viewport.project(viewport.center_lon, lat);
        for x in (0..viewport.width as i32).step_by(2) {
            canvas.set_pixel_signed(x, y);
        }
        lat += step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graticule_step() {
        for (degrees, expected) in [(0.7, 1.0), (1.5, 2.0), (3.0, 5.0), (7.0, 10.0), (0.013, 0.02)] {
            assert!((graticule_step(degrees) - expected).abs() < 1e-9, "{degrees}");
        }
    }

    #[test]
    fn test_render_draws_layers_separately() {
        let viewport = Viewport::new(44.8, 41.7, 11, 40, 16);
        let mut base = BaseLayers::default();
        base.add(Layer::Roads, vec![(44.7, 41.7), (44.9, 41.7)]);

        let layers = base.render(20, 4, &viewport);
        let (_, y) = viewport.project(44.8, 41.7);
        assert!(layers.roads.is_set(20, y as usize));
        assert!(!layers.water.is_set(20, y as usize));
        assert!(!base.is_empty());
    }

    #[test]
    fn test_graticule_is_drawn() {
        let viewport = Viewport::new(44.8, 41.7, 11, 80, 40);
        let layers = BaseLayers::default().render(40, 10, &viewport);
        let any = (0..80).any(|x| (0..40).any(|y| layers.graticule.is_set(x, y)));
        assert!(any);
    }
}
