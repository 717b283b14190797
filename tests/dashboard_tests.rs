use std::path::PathBuf;
use std::time::Duration;

use salary_dash::api::{
    DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1, DashboardSnapshot, MAX_BIN_COUNT, PlaybackState,
};
use salary_dash::core::{Record, Viewport};
use salary_dash::render::NullRenderer;
use salary_dash::{Dashboard, DashboardConfig, DashError};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/ds_salaries_sample.csv");

fn dashboard() -> Dashboard {
    Dashboard::load(FIXTURE, DashboardConfig::default()).expect("fixture dashboard")
}

fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("salary-dash-{name}-{}", std::process::id()))
}

#[test]
fn fixture_builds_all_three_charts() {
    let dashboard = dashboard();
    assert_eq!(dashboard.records().len(), 9);
    let report = dashboard.load_report().expect("loaded from file");
    assert_eq!((report.rows_read, report.rows_kept), (11, 9));

    assert_eq!(dashboard.line().years(), [2020, 2021, 2022]);
    assert_eq!(dashboard.line().current_year(), Some(2020));
    assert_eq!(dashboard.parallel().line_count(), 9);
    assert_eq!(dashboard.histogram().levels(), ["MI", "SE", "EN", "EX"]);

    let mut renderer = NullRenderer::default();
    dashboard
        .render_with(&mut renderer)
        .expect("every frame validates");
}

#[test]
fn missing_file_is_a_csv_error() {
    let err = Dashboard::load("no/such/file.csv", DashboardConfig::default())
        .expect_err("missing file");
    assert!(matches!(err, DashError::Csv(_)), "unexpected error: {err}");
}

#[test]
fn advancing_the_dashboard_drives_playback() {
    let mut dashboard = dashboard();
    assert!(dashboard.line_mut().play());
    assert_eq!(dashboard.advance(Duration::from_millis(4_000)), 2);
    assert_eq!(dashboard.line().current_year(), Some(2022));

    dashboard.dispose();
    assert!(!dashboard.line().is_playing());
    assert_eq!(dashboard.advance(Duration::from_millis(4_000)), 0);
}

#[test]
fn svg_documents_carry_keyed_marks() {
    let mut dashboard = dashboard();
    dashboard.line_mut().settle();
    dashboard.parallel_mut().set_brush(0, Some((0.0, 100.0)));
    let segment = dashboard
        .histogram()
        .segments()
        .iter()
        .position(|s| s.count() > 0)
        .expect("non-empty segment");
    let count = dashboard
        .histogram_mut()
        .reveal_count(segment)
        .expect("segment exists")
        .count;
    let documents = dashboard.render_svg().expect("svg");

    assert!(documents.histogram.starts_with("<svg"));
    assert!(documents.histogram.contains(r#"data-key="legend-EN""#));
    assert!(documents.histogram.contains(&format!(r#"font-weight="bold">{count}</text>"#)));
    assert!(documents.line.contains(r#"data-key="L-2020""#));
    assert!(documents.parallel.contains(r#"data-key="brush-0""#));
    assert!(documents.parallel.contains("display:none"));
}

#[test]
fn write_svg_creates_one_file_per_chart() {
    let dir = scratch_dir("svg");
    let written = dashboard().write_svg(&dir).expect("write svg");
    let names: Vec<String> = written
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["histogram.svg", "line.svg", "parallel.svg"]);
    for path in &written {
        let body = std::fs::read_to_string(path).expect("readable");
        assert!(body.ends_with("</svg>"), "{} is truncated", path.display());
    }
    std::fs::remove_dir_all(&dir).expect("cleanup");
}

#[test]
fn snapshot_contract_round_trips() {
    let mut dashboard = dashboard();
    dashboard.line_mut().show_year(2021).expect("known year");
    dashboard.line_mut().settle();
    dashboard.parallel_mut().set_brush(0, Some((100.0, 300.0)));

    let snapshot = dashboard.snapshot();
    assert_eq!(snapshot.record_count, 9);
    assert_eq!(snapshot.line.current_year, Some(2021));
    assert_eq!(snapshot.line.playback, PlaybackState::Stopped { year_index: 1 });
    assert_eq!(snapshot.parallel.dimensions.len(), 4);
    assert!(snapshot.parallel.brushes[0].is_some());

    let json = snapshot.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains(&format!(
        "\"schema_version\": {DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1}"
    )));
    let restored = DashboardSnapshot::from_json_compat_str(&json).expect("parse");
    assert_eq!(restored.record_count, snapshot.record_count);
    assert_eq!(restored.load_report, snapshot.load_report);
    assert_eq!(restored.line.years, snapshot.line.years);
    assert_eq!(restored.line.playback, snapshot.line.playback);
    assert_eq!(restored.histogram.levels, snapshot.histogram.levels);
    assert_eq!(restored.parallel.visible_count, snapshot.parallel.visible_count);
}

#[test]
fn snapshot_rejects_unknown_schema_version() {
    let json = dashboard()
        .snapshot()
        .to_json_contract_v1_pretty()
        .expect("serialize")
        .replacen("\"schema_version\": 1", "\"schema_version\": 99", 1);
    let err = DashboardSnapshot::from_json_compat_str(&json).expect_err("version 99");
    assert!(err.to_string().contains("unsupported snapshot schema version"));
}

#[test]
fn partial_config_fills_defaults() {
    let config = DashboardConfig::from_json_str(r#"{"line": {"play_interval_ms": 500}}"#)
        .expect("partial config");
    assert_eq!(config.line.play_interval(), Duration::from_millis(500));
    assert_eq!(config.histogram, DashboardConfig::default().histogram);

    let json = config.to_json_pretty().expect("serialize");
    assert_eq!(DashboardConfig::from_json_str(&json).expect("reparse"), config);
}

#[test]
fn invalid_configs_are_rejected() {
    for input in [
        r#"{"histogram": {"bin_count": 0}}"#,
        r#"{"line": {"play_interval_ms": 0}}"#,
        r#"{"parallel": {"line_opacity": 1.5}}"#,
        r#"{"parallel": {"dimensions": []}}"#,
        r#"{"parallel": {"dimensions": [{"field": "company_size", "kind": "linear"}]}}"#,
    ] {
        let err = DashboardConfig::from_json_str(input).expect_err(input);
        assert!(matches!(err, DashError::InvalidData(_)), "{input}: {err}");
    }
}

#[test]
fn bin_count_is_capped() {
    let mut config = DashboardConfig::default();
    config.histogram.bin_count = MAX_BIN_COUNT;
    assert!(config.validate().is_ok());

    let err = DashboardConfig::from_json_str(r#"{"histogram": {"bin_count": 1000000000}}"#)
        .expect_err("absurd bin count");
    assert!(matches!(err, DashError::InvalidData(_)), "{err}");
}

#[test]
fn zero_sized_viewport_fails_construction() {
    let mut config = DashboardConfig::default();
    config.line.layout.viewport = Viewport::new(0, 450);
    let err = Dashboard::from_records(Vec::new(), config).expect_err("zero width");
    assert!(matches!(err, DashError::InvalidViewport { .. }));
}

#[test]
fn empty_dataset_still_renders() {
    let dashboard =
        Dashboard::from_records(Vec::<Record>::new(), DashboardConfig::default()).expect("empty");
    assert!(dashboard.load_report().is_none());
    let mut renderer = NullRenderer::default();
    dashboard.render_with(&mut renderer).expect("chrome only");
}
