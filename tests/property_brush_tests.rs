use proptest::prelude::*;
use salary_dash::api::{ParallelChart, ParallelConfig, remote_ratio_palette};
use salary_dash::core::Record;

const SIZES: [&str; 3] = ["S", "M", "L"];
const COUNTRIES: [&str; 4] = ["US", "DE", "GB", "IN"];

fn records_from(rows: &[(f64, usize, usize, f64)]) -> Vec<Record> {
    rows.iter()
        .map(|&(salary, size, country, remote)| {
            Record::new(salary, 2021, "SE", SIZES[size])
                .with_location(COUNTRIES[country], COUNTRIES[(country + 1) % 4])
                .with_remote_ratio(remote)
        })
        .collect()
}

fn chart(records: &[Record]) -> ParallelChart {
    let palette = remote_ratio_palette(records).expect("palette");
    ParallelChart::new(records, palette, ParallelConfig::default())
}

fn visible(chart: &ParallelChart) -> Vec<bool> {
    (0..chart.line_count()).map(|line| chart.is_visible(line)).collect()
}

proptest! {
    #[test]
    fn combined_brushes_are_the_intersection_of_single_brushes(
        rows in proptest::collection::vec(
            (1_000.0f64..400_000.0, 0usize..3, 0usize..4, 0.0f64..100.0),
            1..64
        ),
        salary_range in (0.0f64..400.0, 0.0f64..400.0),
        size_range in (0.0f64..400.0, 0.0f64..400.0)
    ) {
        let records = records_from(&rows);

        let mut salary_only = chart(&records);
        salary_only.set_brush(0, Some(salary_range));
        let mut size_only = chart(&records);
        size_only.set_brush(3, Some(size_range));
        let mut both = chart(&records);
        both.set_brush(0, Some(salary_range));
        both.set_brush(3, Some(size_range));

        let expected: Vec<bool> = visible(&salary_only)
            .into_iter()
            .zip(visible(&size_only))
            .map(|(a, b)| a && b)
            .collect();
        prop_assert_eq!(visible(&both), expected);
        prop_assert!(both.visible_count() <= salary_only.visible_count());

        both.clear_all_brushes();
        prop_assert_eq!(both.visible_count(), records.len());
    }

    #[test]
    fn salary_brush_matches_the_pixel_band(
        rows in proptest::collection::vec(
            (1_000.0f64..400_000.0, 0usize..3, 0usize..4, 0.0f64..100.0),
            1..64
        ),
        y0 in 0.0f64..390.0,
        height in 1.0f64..200.0
    ) {
        let records = records_from(&rows);
        let low = records.iter().map(|r| r.salary_in_usd).fold(f64::INFINITY, f64::min);
        let high = records.iter().map(|r| r.salary_in_usd).fold(f64::NEG_INFINITY, f64::max);
        prop_assume!(high - low > 1.0);

        let mut chart = chart(&records);
        let y1 = (y0 + height).min(400.0);
        chart.set_brush(0, Some((y0, y1)));

        for (line, record) in records.iter().enumerate() {
            let y = chart.dimensions()[0].pixel(record);
            let strictly_inside = y > y0 + 1e-6 && y < y1 - 1e-6;
            let clearly_outside = y < y0 - 1e-6 || y > y1 + 1e-6;
            if strictly_inside {
                prop_assert!(chart.is_visible(line));
            }
            if clearly_outside {
                prop_assert!(!chart.is_visible(line));
            }
        }
    }
}
