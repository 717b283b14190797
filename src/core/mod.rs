pub mod aggregate;
pub mod record;
pub mod scale;
pub mod ticks;
pub mod types;

pub use aggregate::{
    Bin, DEFAULT_BIN_COUNT, StackedSegment, YearGroup, YearPoint, aggregate_counts,
    aggregate_means, distinct_years, experience_levels, salary_thresholds, stack_bins,
};
pub use record::{COMPANY_SIZES, EXPERIENCE_LEVELS, Record, RecordField, company_size_label};
pub use scale::{LinearScale, PointScale, extent};
pub use types::{Margins, PlotArea, Viewport};
