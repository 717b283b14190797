use proptest::prelude::*;
use salary_dash::core::{
    EXPERIENCE_LEVELS, Record, aggregate_counts, aggregate_means, experience_levels,
    salary_thresholds, stack_bins,
};

fn records_from(rows: &[(f64, usize, i32)]) -> Vec<Record> {
    rows.iter()
        .map(|&(salary, level, year)| {
            Record::new(salary, year, EXPERIENCE_LEVELS[level], ["S", "M", "L"][level % 3])
        })
        .collect()
}

proptest! {
    #[test]
    fn every_salary_lands_in_exactly_one_bin(
        rows in proptest::collection::vec((0.0f64..500_000.0, 0usize..4, 2020i32..2024), 1..128),
        bin_count in 1usize..40
    ) {
        let records = records_from(&rows);
        let max = records.iter().map(|r| r.salary_in_usd).fold(0.0, f64::max);
        let bins = aggregate_counts(&records, (0.0, max), &salary_thresholds(max, bin_count));

        prop_assert!(!bins.is_empty());
        prop_assert_eq!(bins.iter().map(|bin| bin.total()).sum::<usize>(), records.len());
        prop_assert_eq!(bins[0].x0, 0.0);
        prop_assert_eq!(bins[bins.len() - 1].x1, max);
        for pair in bins.windows(2) {
            prop_assert_eq!(pair[0].x1, pair[1].x0);
            prop_assert!(pair[0].x0 <= pair[0].x1);
        }
        for record in &records {
            let salary = record.salary_in_usd;
            let last = bins.len() - 1;
            let holders = bins
                .iter()
                .enumerate()
                .filter(|(index, bin)| {
                    salary >= bin.x0 && (salary < bin.x1 || (*index == last && salary <= bin.x1))
                })
                .count();
            prop_assert!(holders >= 1, "salary {} has no bucket", salary);
        }
    }

    #[test]
    fn stacked_tops_equal_bin_totals(
        rows in proptest::collection::vec((0.0f64..300_000.0, 0usize..4, 2020i32..2024), 1..96)
    ) {
        let records = records_from(&rows);
        let max = records.iter().map(|r| r.salary_in_usd).fold(0.0, f64::max);
        let bins = aggregate_counts(&records, (0.0, max), &salary_thresholds(max, 20));
        let levels = experience_levels(&records);
        let segments = stack_bins(&bins, &levels);

        prop_assert_eq!(segments.len(), bins.len() * levels.len());
        for (index, bin) in bins.iter().enumerate() {
            let top = segments
                .iter()
                .filter(|segment| segment.bin_index == index)
                .map(|segment| segment.y1)
                .fold(0.0, f64::max);
            prop_assert_eq!(top, bin.total() as f64);
        }
    }

    #[test]
    fn means_stay_within_group_extremes(
        rows in proptest::collection::vec((1.0f64..500_000.0, 0usize..4, 2020i32..2024), 1..96)
    ) {
        let records = records_from(&rows);
        for group in aggregate_means(&records) {
            let mut previous_year = i32::MIN;
            for point in &group.points {
                prop_assert!(point.work_year > previous_year);
                previous_year = point.work_year;

                let salaries: Vec<f64> = records
                    .iter()
                    .filter(|r| r.company_size == group.company_size && r.work_year == Some(point.work_year))
                    .map(|r| r.salary_in_usd)
                    .collect();
                let low = salaries.iter().copied().fold(f64::INFINITY, f64::min);
                let high = salaries.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                prop_assert!(point.mean_salary >= low - 1e-6 && point.mean_salary <= high + 1e-6);
            }
        }
    }
}
