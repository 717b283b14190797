mod config;
mod dashboard;
pub mod histogram_chart;
pub mod line_chart;
pub mod parallel_chart;
pub mod playback;
mod snapshot;
pub mod transition;

pub use config::{
    ChartLayout, DashboardConfig, DimensionKind, DimensionSpec, HistogramConfig,
    LineChartConfig, MAX_BIN_COUNT, ParallelConfig,
};
pub use dashboard::{Dashboard, DashboardFrames, SvgDocuments, remote_ratio_palette};
pub use histogram_chart::{BarLabel, HistogramChart};
pub use line_chart::{LineChart, PointKey, PointMark, format_salary};
pub use parallel_chart::{Dimension, DimensionScale, ParallelChart};
pub use playback::{Playback, PlaybackControls, PlaybackState, TimerHandle};
pub use snapshot::{
    DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1, DashboardSnapshot, DashboardSnapshotJsonContractV1,
    HistogramSnapshot, LineChartSnapshot, ParallelSnapshot, PointSnapshot,
};
pub use transition::{AnimatedMarks, ExitAction, Interpolate, KeyDiff, MarkPhase, Tween, diff_keys};
