use approx::assert_relative_eq;
use raster_chart::api::format_compact;
use raster_chart::render::{DrawStyle, RecordingRenderer};
use raster_chart::{Chart, ChartConfig};

fn chart() -> Chart<RecordingRenderer> {
    let mut chart =
        Chart::new(RecordingRenderer::default(), 640, 480, DrawStyle::Line).expect("chart init");
    chart
        .set_data(vec![0.0, 5.0, 10.0], vec![0.0, 100.0, 50.0])
        .expect("set data");
    chart
}

#[test]
fn redraw_emits_vertical_and_horizontal_labels() {
    let mut chart = chart();
    chart.redraw(640, 480).expect("redraw");

    let texts: Vec<_> = chart.renderer().texts().collect();
    // 2 * 480 / 100 vertical labels and 640 / 100 - 1 horizontal ones.
    assert_eq!(texts.len(), 9 + 5);

    let vertical: Vec<_> = texts
        .iter()
        .filter(|(_, x, _)| (*x - 50.0 / 6.0).abs() < 1e-9)
        .collect();
    assert_eq!(vertical.len(), 9);
    let horizontal: Vec<_> = texts.iter().filter(|(_, _, y)| *y == 455.0).collect();
    assert_eq!(horizontal.len(), 5);
}

#[test]
fn labels_track_the_series_scale() {
    let chart = chart();
    let layout = chart
        .frame_layout()
        .expect("layout")
        .expect("data is set");
    let ticks = chart.pipeline().ticks(&layout);

    let zero = ticks
        .vertical
        .iter()
        .find(|tick| tick.value == 0.0)
        .expect("zero tick");
    assert_relative_eq!(zero.position.y, layout.baseline_y());

    for tick in &ticks.horizontal {
        assert_relative_eq!(tick.position.x, layout.scale.canvas_x(tick.value));
    }
}

#[test]
fn default_axis_labels_use_two_significant_digits() {
    let chart = chart();
    let layout = chart.frame_layout().expect("layout").expect("data is set");
    let ticks = chart.pipeline().ticks(&layout);

    let step = 380.0 / 9.0;
    let top = ticks.vertical.last().expect("top tick");
    assert_eq!(top.text, format_compact(4.0 * step, 2));
    assert_eq!(top.text, "1.7e+02");
}

#[test]
fn configured_digits_change_label_precision() {
    let mut config = ChartConfig::default();
    config.axis_label_significant_digits = 4;
    let mut chart = Chart::with_config(
        RecordingRenderer::default(),
        640,
        480,
        DrawStyle::Line,
        config,
    )
    .expect("chart init");
    chart
        .set_data(vec![0.0, 10.0], vec![0.0, 1.0])
        .expect("set data");
    let layout = chart.frame_layout().expect("layout").expect("data is set");
    let ticks = chart.pipeline().ticks(&layout);
    assert_eq!(ticks.horizontal[0].text, "1.667");
}

#[test]
fn pluggable_axis_formatter_applies_to_both_axes() {
    let mut chart = chart();
    chart.set_axis_label_formatter(|value| format!("[{value:.1}]"));
    chart.redraw(640, 480).expect("redraw");
    assert!(
        chart
            .renderer()
            .texts()
            .all(|(text, _, _)| text.starts_with('[') && text.ends_with(']'))
    );
}

#[test]
fn zero_margin_produces_no_ticks() {
    let config = ChartConfig::default().with_margin(0.0);
    let mut chart = Chart::with_config(
        RecordingRenderer::default(),
        300,
        300,
        DrawStyle::Bar,
        config,
    )
    .expect("chart init");
    chart
        .set_data(vec![0.0, 1.0], vec![1.0, 2.0])
        .expect("set data");
    chart.redraw(300, 300).expect("redraw");
    assert_eq!(chart.renderer().texts().count(), 0);
}
