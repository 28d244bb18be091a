use charger_map::config::CHARGER_GLYPH_SVG;
use charger_map::glyph::Glyph;
use charger_map::map::{BaseLayers, Layer, Viewport};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn glyph(c: &mut Criterion) {
    c.bench_function("glyph_parse", |b| {
        b.iter(|| Glyph::parse(black_box(CHARGER_GLYPH_SVG)))
    });

    let glyph = Glyph::parse(CHARGER_GLYPH_SVG).unwrap();
    c.bench_function("glyph_rasterize_5x2", |b| {
        b.iter(|| black_box(&glyph).rasterize(5, 2))
    });
}

fn projection(c: &mut Criterion) {
    let viewport = Viewport::new(44.8015, 41.6938, 11, 240, 160);
    c.bench_function("viewport_project", |b| {
        b.iter(|| viewport.project(black_box(44.8024076), black_box(41.7899406)))
    });
}

fn layers(c: &mut Criterion) {
    // A coarse grid of roads around the city center
    let mut base = BaseLayers::default();
    for i in 0..50 {
        let offset = f64::from(i) * 0.004;
        base.add(
            Layer::Roads,
            vec![(44.70 + offset, 41.60), (44.70 + offset, 41.80)],
        );
        base.add(
            Layer::Roads,
            vec![(44.70, 41.60 + offset), (44.90, 41.60 + offset)],
        );
    }
    let viewport = Viewport::new(44.8015, 41.6938, 11, 240, 160);
    c.bench_function("base_layers_render", |b| {
        b.iter(|| base.render(120, 40, black_box(&viewport)))
    });
}

criterion_group!(benches, glyph, projection, layers);
criterion_main!(benches);
