use std::f64::consts::PI;

/// Braille dots per Web-Mercator tile edge. A Braille dot is much coarser
/// than a screen pixel, so tiles are small to show a comparable area.
pub const TILE_DOTS: f64 = 64.0;
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 22;

/// Viewport representing the visible map area and zoom level
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Center longitude (-180 to 180)
    pub center_lon: f64,
    /// Center latitude (-85 to 85)
    pub center_lat: f64,
    /// Web-Mercator zoom level
    pub zoom: u8,
    /// Canvas width in dots
    pub width: usize,
    /// Canvas height in dots
    pub height: usize,
}

/// Normalized Web-Mercator coordinates in [0, 1)
fn mercator(lon: f64, lat: f64) -> (f64, f64) {
    let x = (lon + 180.0) / 360.0;
    let lat_rad = lat.clamp(-85.0511, 85.0511) * PI / 180.0;
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0;
    (x, y)
}

impl Viewport {
    pub fn new(center_lon: f64, center_lat: f64, zoom: u8, width: usize, height: usize) -> Self {
        Self {
            center_lon,
            center_lat,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            width,
            height,
        }
    }

    /// World width in dots at the current zoom
    fn world_dots(&self) -> f64 {
        TILE_DOTS * 2f64.powi(i32::from(self.zoom))
    }

    /// Degrees of longitude covered by one dot
    pub fn degrees_per_dot(&self) -> f64 {
        360.0 / self.world_dots()
    }

    pub fn set_center(&mut self, lon: f64, lat: f64) {
        self.center_lon = lon;
        self.center_lat = lat.clamp(-85.0, 85.0);
    }

    pub fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Pan the viewport by dot delta
    pub fn pan(&mut self, dx: i32, dy: i32) {
        let (lon, lat) = self.unproject_f(
            self.width as f64 / 2.0 + dx as f64,
            self.height as f64 / 2.0 + dy as f64,
        );

        // Wrap longitude
        let lon = if lon > 180.0 {
            lon - 360.0
        } else if lon < -180.0 {
            lon + 360.0
        } else {
            lon
        };

        self.set_center(lon, lat);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom.saturating_add(1));
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom.saturating_sub(1));
    }

    /// Zoom in towards a specific dot location
    pub fn zoom_in_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, self.zoom.saturating_add(1));
    }

    /// Zoom out from a specific dot location
    pub fn zoom_out_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, self.zoom.saturating_sub(1));
    }

    /// Change zoom keeping the location under (px, py) in place
    fn zoom_at(&mut self, px: i32, py: i32, zoom: u8) {
        let (lon, lat) = self.unproject(px, py);
        self.set_zoom(zoom);

        let (new_px, new_py) = self.project(lon, lat);
        self.pan(new_px - px, new_py - py);
    }

    /// Unproject dot coordinates back to geographic coordinates (lon, lat)
    pub fn unproject(&self, px: i32, py: i32) -> (f64, f64) {
        self.unproject_f(px as f64, py as f64)
    }

    fn unproject_f(&self, px: f64, py: f64) -> (f64, f64) {
        let scale = self.world_dots();
        let (center_x, center_y) = mercator(self.center_lon, self.center_lat);

        let x = (px - self.width as f64 / 2.0) / scale + center_x;
        let y = (py - self.height as f64 / 2.0) / scale + center_y;

        let lon = x * 360.0 - 180.0;
        let lat_rad = (PI * (1.0 - 2.0 * y)).sinh().atan();
        let lat = lat_rad * 180.0 / PI;

        (lon, lat)
    }

    /// Project a geographic coordinate (lon, lat) to dot coordinates
    pub fn project(&self, lon: f64, lat: f64) -> (i32, i32) {
        let (x, y) = mercator(lon, lat);
        let (center_x, center_y) = mercator(self.center_lon, self.center_lat);
        let scale = self.world_dots();

        let px = ((x - center_x) * scale + self.width as f64 / 2.0).round() as i32;
        let py = ((y - center_y) * scale + self.height as f64 / 2.0).round() as i32;

        (px, py)
    }

    /// Check if a projected point is visible in the viewport
    pub fn is_visible(&self, px: i32, py: i32) -> bool {
        px >= 0 && px < self.width as i32 && py >= 0 && py < self.height as i32
    }

    /// Check if a line segment might be visible (rough bounding box check)
    pub fn line_might_be_visible(&self, p1: (i32, i32), p2: (i32, i32)) -> bool {
        let min_x = p1.0.min(p2.0);
        let max_x = p1.0.max(p2.0);
        let min_y = p1.1.min(p2.1);
        let max_y = p1.1.max(p2.1);

        max_x >= 0
            && min_x < self.width as i32
            && max_y >= 0
            && min_y < self.height as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_center() {
        let vp = Viewport::new(44.8015, 41.6938, 11, 100, 80);
        assert_eq!(vp.project(44.8015, 41.6938), (50, 40));
    }

    #[test]
    fn test_unproject_inverts_project() {
        let vp = Viewport::new(44.8015, 41.6938, 14, 200, 120);
        let (px, py) = vp.project(44.80, 41.70);
        let (lon, lat) = vp.unproject(px, py);
        let tolerance = vp.degrees_per_dot();
        assert!((lon - 44.80).abs() < tolerance);
        assert!((lat - 41.70).abs() < tolerance);
    }

    #[test]
    fn test_pan_moves_east() {
        let mut vp = Viewport::new(0.0, 0.0, 3, 100, 100);
        vp.pan(10, 0);
        assert!(vp.center_lon > 0.0);
        assert!(vp.center_lat.abs() < 1e-9);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut vp = Viewport::new(0.0, 0.0, 22, 100, 100);
        vp.zoom_in();
        assert_eq!(vp.zoom, MAX_ZOOM);
        vp.set_zoom(0);
        vp.zoom_out();
        assert_eq!(vp.zoom, MIN_ZOOM);
    }

    #[test]
    fn test_zoom_at_keeps_point_under_cursor() {
        let mut vp = Viewport::new(44.8, 41.7, 12, 200, 160);
        let before = vp.unproject(150, 40);
        vp.zoom_in_at(150, 40);
        assert_eq!(vp.zoom, 13);
        let after = vp.unproject(150, 40);
        let tolerance = 2.0 * vp.degrees_per_dot();
        assert!((before.0 - after.0).abs() < tolerance);
        assert!((before.1 - after.1).abs() < tolerance * 2.0);
    }
}
