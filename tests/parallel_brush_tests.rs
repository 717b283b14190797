use salary_dash::api::{
    DimensionScale, DimensionSpec, ParallelChart, ParallelConfig, remote_ratio_palette,
};
use salary_dash::core::{Record, RecordField};
use salary_dash::render::{NullRenderer, RectFill, Renderer};

fn records() -> Vec<Record> {
    vec![
        Record::new(50_000.0, 2021, "EN", "S")
            .with_location("US", "US")
            .with_remote_ratio(0.0),
        Record::new(100_000.0, 2021, "MI", "M")
            .with_location("DE", "DE")
            .with_remote_ratio(50.0),
        Record::new(150_000.0, 2022, "SE", "L")
            .with_location("US", "GB")
            .with_remote_ratio(100.0),
    ]
}

fn chart_with(records: &[Record], config: ParallelConfig) -> ParallelChart {
    let palette = remote_ratio_palette(records).expect("palette");
    ParallelChart::new(records, palette, config)
}

fn chart(records: &[Record]) -> ParallelChart {
    chart_with(records, ParallelConfig::default())
}

fn visible(chart: &ParallelChart) -> Vec<usize> {
    (0..chart.line_count())
        .filter(|&line| chart.is_visible(line))
        .collect()
}

fn point_position(chart: &ParallelChart, axis: usize, category: &str) -> f64 {
    match &chart.dimensions()[axis].scale {
        DimensionScale::Point(scale) => scale.position(category).expect("known category"),
        DimensionScale::Linear(_) => panic!("axis {axis} is linear"),
    }
}

#[test]
fn axes_are_spread_with_unit_padding() {
    let chart = chart(&records());
    let xs: Vec<f64> = (0..4).map(|axis| chart.axis_x(axis).expect("axis")).collect();
    assert_eq!(xs, vec![280.0, 560.0, 840.0, 1_120.0]);
    let names: Vec<&str> = chart.dimensions().iter().map(|d| d.name()).collect();
    assert_eq!(
        names,
        vec!["salary_in_usd", "company_location", "employee_residence", "company_size"]
    );
}

#[test]
fn no_brush_shows_every_line() {
    let chart = chart(&records());
    assert_eq!(chart.visible_count(), 3);
    assert_eq!(chart.brushes().active_count(), 0);
}

#[test]
fn brushes_combine_by_conjunction() {
    let mut chart = chart(&records());
    assert!(chart.set_brush(0, Some((150.0, 250.0))));
    assert_eq!(visible(&chart), vec![1]);

    let large = point_position(&chart, 3, "L");
    chart.set_brush(3, Some((large - 5.0, large + 5.0)));
    assert!(visible(&chart).is_empty());

    chart.clear_brush(0);
    assert_eq!(visible(&chart), vec![2]);

    chart.clear_all_brushes();
    assert_eq!(chart.visible_count(), 3);
}

#[test]
fn linear_selection_edges_are_inclusive() {
    let mut chart = chart(&records());
    chart.set_brush(0, Some((200.0, 300.0)));
    assert_eq!(visible(&chart), vec![1]);
}

#[test]
fn point_selection_edges_are_inclusive() {
    let mut chart = chart(&records());
    let medium = point_position(&chart, 3, "M");
    chart.set_brush(3, Some((medium, medium + 10.0)));
    assert_eq!(visible(&chart), vec![1]);

    let us = point_position(&chart, 1, "US");
    chart.clear_all_brushes();
    chart.set_brush(1, Some((us - 1.0, us)));
    assert_eq!(visible(&chart), vec![0, 2]);
}

#[test]
fn setting_an_unknown_axis_is_ignored() {
    let mut chart = chart(&records());
    assert!(!chart.set_brush(9, Some((0.0, 10.0))));
    assert_eq!(chart.visible_count(), 3);
}

#[test]
fn pointer_drag_brushes_live() {
    let mut chart = chart(&records());
    let top = chart.plot_area().top;
    let x = chart.axis_x(0).expect("axis") + chart.plot_area().left;

    assert_eq!(chart.pointer_down(x + 4.0, top + 150.0), Some(0));
    assert_eq!(chart.pointer_drag(top + 250.0), Some(0));
    assert_eq!(visible(&chart), vec![1]);

    assert_eq!(chart.pointer_up(top + 250.0), Some(0));
    let selection = chart.brushes().selection(0).expect("selection");
    assert_eq!((selection.y0, selection.y1), (150.0, 250.0));
    assert_eq!(chart.pointer_drag(top + 300.0), None, "drag ended");
}

#[test]
fn pointer_away_from_axes_starts_nothing() {
    let mut chart = chart(&records());
    let top = chart.plot_area().top;
    assert_eq!(chart.brush_axis_at(420.0, top + 100.0), None);
    assert_eq!(chart.pointer_down(420.0, top + 100.0), None);
    assert_eq!(chart.brush_axis_at(280.0, 5.0), None, "above the plot");
}

#[test]
fn click_without_drag_clears_the_brush() {
    let mut chart = chart(&records());
    chart.set_brush(0, Some((150.0, 250.0)));
    let top = chart.plot_area().top;
    chart.pointer_down(280.0, top + 350.0);
    chart.pointer_up(top + 350.0);
    assert_eq!(chart.brushes().selection(0), None);
    assert_eq!(chart.visible_count(), 3);
}

#[test]
fn remote_ratio_can_be_an_axis() {
    let mut records = records();
    records.push(Record::new(80_000.0, 2022, "EN", "S").with_remote_ratio(f64::NAN));
    let config = ParallelConfig {
        dimensions: vec![
            DimensionSpec::linear(RecordField::RemoteRatio),
            DimensionSpec::point(RecordField::CompanySize),
        ],
        ..ParallelConfig::default()
    };
    let mut chart = chart_with(&records, config);
    chart.set_brush(0, Some((0.0, 200.0)));
    assert_eq!(visible(&chart), vec![1, 2], "missing ratios never match");

    let frame = chart.frame();
    assert!(frame.find_polyline("record-3").is_none());
    assert!(frame.find_polyline("record-0").is_some());
}

#[test]
fn chart_outlives_the_borrowed_records() {
    let (mut parallel, expected) = {
        let records = records();
        let built = chart(&records);
        let expected: Vec<Vec<f64>> = records
            .iter()
            .map(|record| built.dimensions().iter().map(|d| d.pixel(record)).collect())
            .collect();
        (built, expected)
    };
    for (line, ys) in expected.iter().enumerate() {
        let path = parallel.line_path(line).expect("line");
        let path_ys: Vec<f64> = path.iter().map(|&(_, y)| y).collect();
        assert_eq!(&path_ys, ys);
        assert_eq!(path[0].0, 280.0);
    }

    let us = point_position(&parallel, 1, "US");
    parallel.set_brush(1, Some((us - 1.0, us + 1.0)));
    assert_eq!(visible(&parallel), vec![0, 2]);
}

#[test]
fn line_colors_follow_remote_ratio() {
    let mut records = records();
    records.push(Record::new(80_000.0, 2022, "EN", "S").with_remote_ratio(f64::NAN));
    let chart = chart(&records);
    let palette = chart.palette();
    assert_eq!(palette.domain(), (0.0, 100.0));
    assert_eq!(chart.line_color(0), Some(palette.interpolate(0.0)));
    assert_eq!(chart.line_color(2), Some(palette.interpolate(1.0)));
    assert_eq!(chart.line_color(3), Some(palette.unknown()));
}

#[test]
fn frame_marks_hidden_lines_and_draws_brush_and_legend() {
    let mut chart = chart(&records());
    chart.set_brush(0, Some((150.0, 250.0)));
    let frame = chart.frame();

    assert_eq!(frame.polylines.len(), 3);
    let flags: Vec<bool> = frame.polylines.iter().map(|line| line.visible).collect();
    assert_eq!(flags, vec![false, true, false]);
    assert!(frame.polylines.iter().all(|line| line.color.alpha == 0.3));

    let brush = frame.find_rect("brush-0").expect("brush rect");
    assert_eq!((brush.width, brush.height), (20.0, 100.0));

    let legend = frame.find_rect("legend-gradient").expect("legend");
    match &legend.fill {
        RectFill::HorizontalGradient(stops) => assert_eq!(stops.len(), 11),
        other => panic!("unexpected legend fill: {other:?}"),
    }
    assert_eq!((legend.x, legend.y), (600.0, 470.0));
    for text in ["Remote Ratio", "0.00", "100.00", "company_size"] {
        assert!(frame.texts.iter().any(|t| t.text == text), "missing {text}");
    }

    NullRenderer::default().render(&frame).expect("frame validates");
}

#[test]
fn empty_dataset_draws_axes_only() {
    let chart = chart(&[]);
    let frame = chart.frame();
    assert!(frame.polylines.is_empty());
    assert_eq!(chart.visible_count(), 0);
    NullRenderer::default().render(&frame).expect("frame validates");
}
