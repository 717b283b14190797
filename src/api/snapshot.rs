use serde::{Deserialize, Serialize};

use crate::api::histogram_chart::BarLabel;
use crate::api::playback::{PlaybackControls, PlaybackState};
use crate::api::Dashboard;
use crate::core::{Bin, YearGroup};
use crate::data::LoadReport;
use crate::error::{DashError, DashResult};
use crate::interaction::{BrushSelection, Tooltip};

pub const DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramSnapshot {
    pub levels: Vec<String>,
    pub bins: Vec<Bin>,
    pub label: Option<BarLabel>,
    pub hovered_segment: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSnapshot {
    pub key: String,
    pub x: f64,
    pub y: f64,
    pub exiting: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartSnapshot {
    pub years: Vec<i32>,
    pub current_year: Option<i32>,
    pub clock_ms: u64,
    pub playback: PlaybackState,
    pub controls: PlaybackControls,
    pub groups: Vec<YearGroup>,
    pub points: Vec<PointSnapshot>,
    pub tooltip: Tooltip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallelSnapshot {
    pub dimensions: Vec<String>,
    pub brushes: Vec<Option<BrushSelection>>,
    pub line_count: usize,
    pub visible_count: usize,
}

/// Serializable view of the whole dashboard state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub record_count: usize,
    pub load_report: Option<LoadReport>,
    pub histogram: HistogramSnapshot,
    pub line: LineChartSnapshot,
    pub parallel: ParallelSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: DashboardSnapshot,
}

impl Dashboard {
    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        let histogram = self.histogram();
        let line = self.line();
        let parallel = self.parallel();
        let brushes = parallel.brushes();

        DashboardSnapshot {
            record_count: self.records().len(),
            load_report: self.load_report(),
            histogram: HistogramSnapshot {
                levels: histogram.levels().to_vec(),
                bins: histogram.bins().to_vec(),
                label: histogram.label().cloned(),
                hovered_segment: histogram.hovered(),
            },
            line: LineChartSnapshot {
                years: line.years().to_vec(),
                current_year: line.current_year(),
                clock_ms: u64::try_from(line.clock().as_millis()).unwrap_or(u64::MAX),
                playback: line.playback_state(),
                controls: line.controls(),
                groups: line.groups().to_vec(),
                points: line
                    .point_marks()
                    .into_iter()
                    .map(|mark| PointSnapshot {
                        key: mark.key.to_string(),
                        x: mark.x,
                        y: mark.y,
                        exiting: mark.exiting,
                    })
                    .collect(),
                tooltip: line.tooltip().clone(),
            },
            parallel: ParallelSnapshot {
                dimensions: parallel
                    .dimensions()
                    .iter()
                    .map(|dimension| dimension.name().to_owned())
                    .collect(),
                brushes: (0..brushes.axis_count())
                    .map(|axis| brushes.selection(axis))
                    .collect(),
                line_count: parallel.line_count(),
                visible_count: parallel.visible_count(),
            },
        }
    }
}

impl DashboardSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> DashResult<String> {
        let payload = DashboardSnapshotJsonContractV1 {
            schema_version: DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            DashError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a v1 contract payload.
    pub fn from_json_compat_str(input: &str) -> DashResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<DashboardSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: DashboardSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            DashError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(DashError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
