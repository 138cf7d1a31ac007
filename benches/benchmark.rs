use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hardiness_map::grid::RasterGrid;
use hardiness_map::processing::Colorizer;

/// Benchmark the percentile stretch and colormap on a county-sized grid
fn benchmark_colorize(c: &mut Criterion) {
    // Roughly the Idaho extent at 800m cells
    let size = (1024, 1024);
    let nodata = -32000.0;
    let mut data = vec![0.0f64; size.0 * size.1];

    // Temperatures between -30 and 15 with a no-data margin
    for (i, value) in data.iter_mut().enumerate() {
        let (col, row) = (i % size.0, i / size.0);
        *value = if col < 64 || row < 64 {
            nodata
        } else {
            -30.0 + ((col * 7 + row * 13) % 450) as f64 / 10.0
        };
    }

    let grid = RasterGrid::new(size.0, size.1, data, [-117.25, 0.008, 0.0, 49.0, 0.0, -0.008], nodata);
    let colorizer = Colorizer::jet(2.0, 98.0);

    c.bench_function("colorize_1024", |b| b.iter(|| colorizer.colorize(black_box(&grid))));
}

criterion_group!(benches, benchmark_colorize);
criterion_main!(benches);
