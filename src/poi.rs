use crate::error::MapError;

/// A geographic position in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both components are finite and inside the WGS84 ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// A named point of interest shown as one marker.
///
/// `z_index` is the stacking order: when pins overlap, the higher value is
/// drawn on top and receives the click.
#[derive(Debug, Clone, PartialEq)]
pub struct Poi {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub z_index: i32,
}

impl Poi {
    pub const fn new(name: &'static str, lat: f64, lng: f64, z_index: i32) -> Self {
        Self { name, lat, lng, z_index }
    }

    /// Validated position of this POI
    pub fn position(&self) -> Result<LatLng, MapError> {
        let position = LatLng::new(self.lat, self.lng);
        if position.is_valid() {
            Ok(position)
        } else {
            Err(MapError::InvalidCoordinate {
                name: self.name.to_string(),
                lat: self.lat,
                lng: self.lng,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_position() {
        let poi = Poi::new("Old Tbilisi", 41.697579, 44.799303, 2);
        assert_eq!(poi.position().unwrap(), LatLng::new(41.697579, 44.799303));
    }

    #[test]
    fn test_out_of_range_latitude() {
        let poi = Poi::new("Nowhere", 91.0, 0.0, 1);
        assert!(matches!(
            poi.position(),
            Err(MapError::InvalidCoordinate { ref name, .. }) if name == "Nowhere"
        ));
    }

    #[test]
    fn test_nan_is_invalid() {
        assert!(!LatLng::new(f64::NAN, 10.0).is_valid());
        assert!(!LatLng::new(10.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_range_edges_are_valid() {
        assert!(LatLng::new(-90.0, 180.0).is_valid());
        assert!(LatLng::new(90.0, -180.0).is_valid());
    }
}
