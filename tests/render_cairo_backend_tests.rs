#![cfg(feature = "cairo-backend")]

use salary_dash::api::{HistogramChart, HistogramConfig, ParallelChart, ParallelConfig, remote_ratio_palette};
use salary_dash::core::Record;
use salary_dash::render::{CairoRenderer, CategoryPalette, Renderer};
use salary_dash::{Dashboard, DashboardConfig, DashError};

fn records() -> Vec<Record> {
    vec![
        Record::new(100_000.0, 2021, "EN", "S")
            .with_location("US", "US")
            .with_remote_ratio(0.0),
        Record::new(200_000.0, 2022, "SE", "L")
            .with_location("DE", "DE")
            .with_remote_ratio(100.0),
    ]
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, DashError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_histogram_primitives() {
    let palette = CategoryPalette::experience_levels().expect("palette");
    let frame = HistogramChart::new(&records(), palette, HistogramConfig::default()).frame();

    let mut renderer = CairoRenderer::new(700, 450).expect("renderer");
    renderer.render(&frame).expect("render");
    let stats = renderer.last_stats();
    assert_eq!(stats.rects_drawn, frame.rects.len());
    assert_eq!(stats.texts_drawn, frame.texts.len());
}

#[test]
fn cairo_renderer_skips_hidden_parallel_lines() {
    let records = records();
    let palette = remote_ratio_palette(&records).expect("palette");
    let mut chart = ParallelChart::new(&records, palette, ParallelConfig::default());
    chart.set_brush(0, Some((0.0, 100.0)));
    let frame = chart.frame();

    let mut renderer = CairoRenderer::new(1400, 500).expect("renderer");
    renderer.render(&frame).expect("render");
    assert_eq!(renderer.last_stats().polylines_drawn, 1);
}

#[test]
fn dashboard_writes_png_files() {
    let dashboard = Dashboard::from_records(records(), DashboardConfig::default()).expect("dashboard");
    let dir = std::env::temp_dir().join(format!("salary-dash-png-{}", std::process::id()));
    let written = dashboard.write_png(&dir).expect("png export");
    assert_eq!(written.len(), 3);
    for path in &written {
        let bytes = std::fs::read(path).expect("readable");
        assert_eq!(&bytes[..4], b"\x89PNG");
    }
    std::fs::remove_dir_all(&dir).expect("cleanup");
}
