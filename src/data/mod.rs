use crate::map::{BaseLayers, Layer};
use anyhow::Result;
use geojson::{GeoJson, Geometry, Value};
use std::fs;
use std::path::Path;

/// Base-layer files looked up in the data directory
pub const LAYER_FILES: [(&str, Layer); 3] = [
    ("water.json", Layer::Water),
    ("boundaries.json", Layer::Boundaries),
    ("roads.json", Layer::Roads),
];

/// Load whatever base-layer GeoJSON exists in `data_dir`. Missing or
/// unreadable files are skipped.
pub fn load_base_layers(data_dir: &Path) -> BaseLayers {
    let mut layers = BaseLayers::default();

    for (filename, layer) in LAYER_FILES {
        let path = data_dir.join(filename);
        if !path.exists() {
            log::debug!("no {} layer at {}", filename, path.display());
            continue;
        }
        match load_lines(&path, |line| layers.add(layer, line)) {
            Ok(count) => log::info!("loaded {} lines from {}", count, path.display()),
            Err(e) => log::warn!("failed to load {}: {}", path.display(), e),
        }
    }

    layers
}

/// Parse a GeoJSON file and feed its lines to `add_line`
fn load_lines<F>(path: &Path, mut add_line: F) -> Result<usize>
where
    F: FnMut(Vec<(f64, f64)>),
{
    let content = fs::read_to_string(path)?;
    let geojson: GeoJson = content.parse()?;
    let mut count = 0;
    process_geojson_lines(&geojson, |line| {
        count += 1;
        add_line(line);
    });
    Ok(count)
}

/// Process GeoJSON and extract line features
fn process_geojson_lines<F>(geojson: &GeoJson, mut add_line: F)
where
    F: FnMut(Vec<(f64, f64)>),
{
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in &fc.features {
                if let Some(ref geometry) = feature.geometry {
                    process_geometry_lines(geometry, &mut add_line);
                }
            }
        }
        GeoJson::Feature(f) => {
            if let Some(ref geometry) = f.geometry {
                process_geometry_lines(geometry, &mut add_line);
            }
        }
        GeoJson::Geometry(geometry) => {
            process_geometry_lines(geometry, &mut add_line);
        }
    }
}

fn to_line(coords: &[Vec<f64>]) -> Vec<(f64, f64)> {
    coords
        .iter()
        .filter(|c| c.len() >= 2)
        .map(|c| (c[0], c[1]))
        .collect()
}

fn process_geometry_lines<F>(geometry: &Geometry, add_line: &mut F)
where
    F: FnMut(Vec<(f64, f64)>),
{
    match &geometry.value {
        Value::LineString(coords) => add_line(to_line(coords)),
        Value::MultiLineString(lines) => {
            for coords in lines {
                add_line(to_line(coords));
            }
        }
        // Every ring is drawn: lakes and islands matter at city zoom
        Value::Polygon(rings) => {
            for ring in rings {
                add_line(to_line(ring));
            }
        }
        Value::MultiPolygon(polygons) => {
            for ring in polygons.iter().flatten() {
                add_line(to_line(ring));
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                process_geometry_lines(g, add_line);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RIVER: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"name": "Mtkvari"},
                "geometry": {"type": "LineString", "coordinates": [[44.78, 41.68], [44.80, 41.70], [44.81, 41.73]]}
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": {"type": "Polygon", "coordinates": [
                    [[44.70, 41.60], [44.90, 41.60], [44.90, 41.80], [44.70, 41.60]],
                    [[44.75, 41.65], [44.80, 41.65], [44.80, 41.70], [44.75, 41.65]]
                ]}
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": {"type": "Point", "coordinates": [44.8, 41.7]}
            }
        ]
    }"#;

    #[test]
    fn test_extracts_lines_and_rings() {
        let geojson: GeoJson = RIVER.parse().unwrap();
        let mut lines = Vec::new();
        process_geojson_lines(&geojson, |line| lines.push(line));
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0][1], (44.80, 41.70));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = std::env::temp_dir().join(format!("charger-map-data-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("water.json"), RIVER).unwrap();
        fs::write(dir.join("roads.json"), "not json").unwrap();

        let layers = load_base_layers(&dir);
        assert_eq!(layers.water.len(), 3);
        assert!(layers.roads.is_empty());
        assert!(layers.boundaries.is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }
}
