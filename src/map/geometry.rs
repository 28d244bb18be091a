use crate::braille::BrailleCanvas;
use crate::map::projection::Viewport;

/// A geographic line (sequence of lon/lat coordinates)
pub type LineString = Vec<(f64, f64)>;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.set_pixel_signed(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Project and draw a linestring, skipping segments outside the viewport
/// or long enough to be antimeridian wraps
pub fn draw_linestring(canvas: &mut BrailleCanvas, line: &[(f64, f64)], viewport: &Viewport) {
    if line.len() < 2 {
        return;
    }

    let mut prev: Option<(i32, i32)> = None;

    for &(lon, lat) in line {
        let p = viewport.project(lon, lat);

        if let Some(q) = prev {
            let span = viewport.width.max(viewport.height) as i64 * 4;
            let dist = (i64::from(p.0) - i64::from(q.0)).abs() + (i64::from(p.1) - i64::from(q.1)).abs();
            if dist < span && viewport.line_might_be_visible(q, p) {
                draw_line(canvas, q.0, q.1, p.0, p.1);
            }
        }

        prev = Some(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0);
        assert_eq!(canvas.row_to_string(0), "⠉⠉⠉⠉⠉");
    }

    #[test]
    fn test_vertical_line() {
        let mut canvas = BrailleCanvas::new(1, 2);
        draw_line(&mut canvas, 0, 0, 0, 7);
        assert_eq!(canvas.row_to_string(0), "⡇");
        assert_eq!(canvas.row_to_string(1), "⡇");
    }

    #[test]
    fn test_linestring_through_center() {
        let viewport = Viewport::new(0.0, 0.0, 2, 20, 8);
        let mut canvas = BrailleCanvas::new(10, 2);
        draw_linestring(&mut canvas, &[(-10.0, 0.0), (10.0, 0.0)], &viewport);
        let (_, y) = viewport.project(0.0, 0.0);
        assert!(canvas.is_set(10, y as usize));
    }
}
