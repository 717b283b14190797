use approx::{assert_abs_diff_eq, assert_relative_eq};
use salary_dash::DashError;
use salary_dash::core::ticks::{format_tick, nice_domain, tick_increment, ticks};
use salary_dash::core::{LinearScale, PointScale, extent};

#[test]
fn linear_scale_extrapolates_without_clamping() {
    let scale = LinearScale::new((0.0, 100.0), (0.0, 500.0));
    assert_eq!(scale.map(50.0), 250.0);
    assert_eq!(scale.map(150.0), 750.0);
    assert_eq!(scale.map(-20.0), -100.0);
}

#[test]
fn linear_scale_inverts_reversed_ranges() {
    let scale = LinearScale::new((0.0, 200_000.0), (400.0, 0.0));
    assert_eq!(scale.map(0.0), 400.0);
    assert_eq!(scale.map(200_000.0), 0.0);
    assert_relative_eq!(scale.invert(100.0), 150_000.0);
    assert_relative_eq!(scale.invert(scale.map(12_345.0)), 12_345.0, max_relative = 1e-12);
}

#[test]
fn nan_domain_propagates_instead_of_panicking() {
    let scale = LinearScale::from_extent(Vec::<f64>::new(), (0.0, 100.0));
    assert!(scale.map(1.0).is_nan());
    assert!(scale.ticks(10).is_empty());
}

#[test]
fn nice_extends_domain_to_round_values() {
    let scale = LinearScale::new((0.0, 147_500.0), (400.0, 0.0)).nice(10);
    assert_eq!(scale.domain(), (0.0, 160_000.0));
    assert_eq!(scale.range(), (400.0, 0.0));
    assert_eq!(nice_domain(0.13, 0.97, 10), (0.1, 1.0));
}

#[test]
fn tick_ladder_uses_one_two_five_steps() {
    assert_eq!(tick_increment(0.0, 10.0, 10), 1.0);
    assert_eq!(tick_increment(0.0, 100.0, 10), 10.0);
    assert_eq!(tick_increment(0.0, 45.0, 10), 5.0);
    assert_eq!(tick_increment(0.0, 1.0, 5), -5.0);
    assert_eq!(ticks(2020.0, 2023.0, 3), vec![2020.0, 2021.0, 2022.0, 2023.0]);
}

#[test]
fn descending_ticks_keep_input_order() {
    assert_eq!(ticks(10.0, 0.0, 2), vec![10.0, 5.0, 0.0]);
}

#[test]
fn tick_labels_group_thousands() {
    assert_eq!(format_tick(150_000.0, 50_000.0), "150,000");
    assert_eq!(format_tick(0.25, 0.05), "0.25");
    assert_eq!(format_tick(-0.0, 1.0), "0");
}

#[test]
fn point_scale_spaces_categories_with_padding() {
    let scale = PointScale::new("company_size", ["L", "S", "M"], (100.0, 0.0), 0.5);
    assert_eq!(scale.len(), 3);
    assert_abs_diff_eq!(scale.step(), 100.0 / 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(scale.position("L").expect("L"), 83.333_333, epsilon = 1e-5);
    assert_abs_diff_eq!(scale.position("S").expect("S"), 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(scale.position("M").expect("M"), 16.666_667, epsilon = 1e-5);
}

#[test]
fn point_scale_deduplicates_in_first_seen_order() {
    let scale = PointScale::new("loc", ["US", "DE", "US", "JP", "DE"], (0.0, 40.0), 0.0);
    let domain: Vec<&str> = scale.domain().collect();
    assert_eq!(domain, vec!["US", "DE", "JP"]);
    assert_eq!(scale.position("US"), Some(0.0));
    assert_eq!(scale.position("JP"), Some(40.0));
}

#[test]
fn axis_placement_with_unit_padding() {
    let axes = PointScale::new("dimension", ["a", "b", "c", "d"], (0.0, 1_000.0), 1.0);
    let positions: Vec<f64> = axes.positions().map(|(_, x)| x).collect();
    assert_eq!(positions, vec![200.0, 400.0, 600.0, 800.0]);
}

#[test]
fn unknown_category_is_a_typed_error() {
    let scale = PointScale::new("company_size", ["S", "M", "L"], (0.0, 10.0), 0.5);
    assert_eq!(scale.position("XL"), None);
    let err = scale.try_position("XL").expect_err("XL is not in the domain");
    match err {
        DashError::UnknownCategory {
            dimension,
            category,
        } => {
            assert_eq!(dimension, "company_size");
            assert_eq!(category, "XL");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn extent_skips_non_finite_values() {
    assert_eq!(extent([3.0, f64::NAN, -1.0, f64::INFINITY, 7.0]), Some((-1.0, 7.0)));
    assert_eq!(extent([f64::NAN]), None);
}
