use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use raster_chart::render::{ChartTheme, DrawCommand, DrawStyle, FontHandle, RecordingRenderer};
use raster_chart::{Chart, ChartError};

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("raster-chart-{}-{name}", std::process::id()))
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn cursor_box(renderer: &RecordingRenderer) -> (f64, f64, f64, f64) {
    let cursor_box = ChartTheme::default().cursor_box;
    renderer
        .paints()
        .filter_map(|command| match command {
            DrawCommand::Fill { color, path } if *color == cursor_box => path.rects().next(),
            _ => None,
        })
        .last()
        .expect("cursor box")
}

fn chart_with_cursor(font: FontHandle) -> Chart<RecordingRenderer> {
    let mut chart = Chart::new(RecordingRenderer::default(), 640, 480, DrawStyle::Line)
        .expect("chart init")
        .with_font(font);
    chart
        .set_data(vec![0.0, 1.0, 2.0, 3.0], vec![10.0, 20.0, 30.0, 40.0])
        .expect("set data");
    chart.on_drag(240.0, 200.0);
    chart.redraw(640, 480).expect("redraw");
    chart
}

#[test]
fn missing_font_file_is_an_io_error() {
    let path = scratch_path("missing.ttf");
    let err = FontHandle::load(&path, 12.0).expect_err("missing file must fail");
    match err {
        ChartError::FontIo {
            path: reported,
            source,
        } => {
            assert_eq!(reported, path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn garbage_font_file_is_a_format_error() {
    let path = scratch_path("garbage.ttf");
    std::fs::write(&path, b"definitely not a font").expect("write scratch file");
    let result = FontHandle::load(&path, 12.0);
    let _ = std::fs::remove_file(&path);

    let err = result.expect_err("garbage must fail");
    assert!(matches!(err, ChartError::FontFormat { .. }));
    assert!(err.to_string().contains("garbage.ttf"));
}

#[test]
fn loads_font_file_from_disk() {
    let font = FontHandle::load(fixture("DejaVuSans.ttf"), 12.0).expect("load fixture");
    assert_eq!(font.points(), 12.0);
    assert!(font.measure("42").width > 0.0);
}

#[test]
fn loaded_font_sizes_the_cursor_box() {
    let font = FontHandle::load(fixture("DejaVuSans.ttf"), 14.0).expect("load fixture");
    let extent = font.measure("1, 20");
    let chart = chart_with_cursor(font);

    assert!(
        chart
            .renderer()
            .last_commands()
            .iter()
            .any(|command| matches!(command, DrawCommand::SetFontFace { points } if *points == 14.0))
    );
    let rect = cursor_box(chart.renderer());
    assert_relative_eq!(rect.0, 240.0 - extent.width / 4.0);
    assert_relative_eq!(rect.1, 200.0 - extent.height * 1.5);
    assert_relative_eq!(rect.2, extent.width * 1.5);
    assert_relative_eq!(rect.3, extent.height * 2.0);
}

#[test]
fn cursor_box_follows_the_face_not_just_the_size() {
    let sans = FontHandle::load(fixture("DejaVuSans.ttf"), 12.0).expect("load fixture");
    let mono = FontHandle::load(fixture("DejaVuSansMono.ttf"), 12.0).expect("load fixture");

    let sans_box = cursor_box(chart_with_cursor(sans).renderer());
    let mono_box = cursor_box(chart_with_cursor(mono).renderer());
    assert!(sans_box.2 < mono_box.2, "{sans_box:?} vs {mono_box:?}");
}
