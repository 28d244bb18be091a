//! Inline SVG glyphs for pin icons.
//!
//! Glyphs are parsed with `usvg` and rendered with `resvg` into a pixmap of
//! one pixel per Braille dot; a dot is lit where the pixel is mostly opaque.

use std::borrow::Cow;

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;

use crate::braille::BrailleCanvas;
use crate::error::GlyphError;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Alpha above which a rendered pixel lights its dot
const ALPHA_THRESHOLD: u8 = 127;

/// Axis-aligned bounds in the document's user units, after the `viewBox`
/// and any transforms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A parsed, renderable glyph
#[derive(Debug, Clone)]
pub struct Glyph {
    tree: usvg::Tree,
    bounds: Bounds,
}

impl Glyph {
    /// Parse an SVG document into a glyph
    pub fn parse(svg: &str) -> Result<Self, GlyphError> {
        let svg = with_svg_namespace(svg);
        let tree = usvg::Tree::from_str(&svg, &usvg::Options::default())
            .map_err(|e| GlyphError::Svg(e.to_string()))?;

        if !tree.root().has_children() {
            return Err(GlyphError::NoPaths);
        }
        let rect = tree.root().abs_bounding_box();
        let bounds = Bounds {
            min_x: f64::from(rect.left()),
            min_y: f64::from(rect.top()),
            max_x: f64::from(rect.right()),
            max_y: f64::from(rect.bottom()),
        };
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Err(GlyphError::NoPaths);
        }

        Ok(Self { tree, bounds })
    }

    /// Bounds of the drawn outline with transforms applied. Icon glyphs
    /// often overflow their `viewBox`, so rendering fits these instead.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Width over height of the drawn outline
    pub fn aspect(&self) -> f64 {
        self.bounds.width() / self.bounds.height()
    }

    /// Terminal columns needed to show the glyph at `rows` rows without
    /// distortion
    pub fn columns_for(&self, rows: u16) -> u16 {
        let dots_wide = self.aspect() * f64::from(rows) * 4.0;
        ((dots_wide / 2.0).ceil() as u16).max(1)
    }

    /// Rasterize into a Braille canvas of `cols` x `rows` cells, scaled
    /// uniformly and centered.
    pub fn rasterize(&self, cols: usize, rows: usize) -> BrailleCanvas {
        let mut canvas = BrailleCanvas::new(cols, rows);
        let dots_w = cols * 2;
        let dots_h = rows * 4;
        let Some(mut pixmap) = Pixmap::new(dots_w as u32, dots_h as u32) else {
            return canvas;
        };

        let b = self.bounds;
        let scale = (dots_w as f64 / b.width()).min(dots_h as f64 / b.height());
        let tx = (dots_w as f64 - b.width() * scale) / 2.0 - b.min_x * scale;
        let ty = (dots_h as f64 - b.height() * scale) / 2.0 - b.min_y * scale;
        let transform = Transform::from_row(
            scale as f32,
            0.0,
            0.0,
            scale as f32,
            tx as f32,
            ty as f32,
        );
        resvg::render(&self.tree, transform, &mut pixmap.as_mut());

        for (i, pixel) in pixmap.pixels().iter().enumerate() {
            if pixel.alpha() > ALPHA_THRESHOLD {
                canvas.set_pixel(i % dots_w, i / dots_w);
            }
        }
        canvas
    }
}

/// Inline markup often leaves out the SVG namespace, which the parser
/// needs to recognize any element
fn with_svg_namespace(svg: &str) -> Cow<'_, str> {
    if svg.contains("xmlns=") {
        Cow::Borrowed(svg)
    } else {
        Cow::Owned(svg.replacen("<svg", &format!(r#"<svg xmlns="{SVG_NS}""#), 1))
    }
}
