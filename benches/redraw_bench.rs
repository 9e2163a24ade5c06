use criterion::{Criterion, criterion_group, criterion_main};
use raster_chart::Chart;
use raster_chart::core::{ScaleParams, compute_parameters};
use raster_chart::interaction::find_nearest;
use raster_chart::render::{DrawStyle, RecordingRenderer};
use std::hint::black_box;

fn samples(count: usize) -> (Vec<f64>, Vec<f64>) {
    let xs: Vec<f64> = (0..count).map(|i| i as f64 * 0.01).collect();
    let ys: Vec<f64> = xs.iter().map(|x| (x * 3.0).sin() * 100.0).collect();
    (xs, ys)
}

fn bench_autoscale_4k(c: &mut Criterion) {
    let (_, ys) = samples(4_000);
    c.bench_function("autoscale_4k", |b| {
        b.iter(|| compute_parameters(black_box(&ys)).expect("non-empty"))
    });
}

fn bench_find_nearest_4k(c: &mut Criterion) {
    let (xs, _) = samples(4_000);
    let params = ScaleParams {
        ratio_x: 1_820.0 / 39.99,
        ratio_y: 1.0,
        y_offset: 0.0,
        height: 980.0,
        margin: 50.0,
    };
    c.bench_function("find_nearest_4k", |b| {
        b.iter(|| find_nearest(black_box(&xs), &params, black_box(911.5)))
    });
}

fn bench_redraw(c: &mut Criterion, name: &str, style: DrawStyle) {
    let (xs, ys) = samples(4_000);
    let mut chart =
        Chart::new(RecordingRenderer::default(), 1920, 1080, style).expect("chart init");
    chart.set_data(xs, ys).expect("valid series");
    chart.set_autoscale_y(true);
    chart.on_drag(900.0, 400.0);

    c.bench_function(name, |b| {
        b.iter(|| {
            chart.redraw(1920, 1080).expect("redraw");
        })
    });
}

fn bench_redraw_line_4k(c: &mut Criterion) {
    bench_redraw(c, "redraw_line_4k", DrawStyle::Line);
}

fn bench_redraw_bar_4k(c: &mut Criterion) {
    bench_redraw(c, "redraw_bar_4k", DrawStyle::Bar);
}

criterion_group!(
    benches,
    bench_autoscale_4k,
    bench_find_nearest_4k,
    bench_redraw_line_4k,
    bench_redraw_bar_4k
);
criterion_main!(benches);
