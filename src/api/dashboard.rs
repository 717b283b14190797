use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::api::{
    DashboardConfig, HistogramChart, LineChart, ParallelChart,
};
use crate::core::{Record, extent};
use crate::data::{LoadReport, load_dataset};
use crate::error::DashResult;
use crate::render::{CategoryPalette, RenderFrame, Renderer, SequentialPalette, SvgRenderer};

/// Frames for the three charts, in canvas order.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardFrames {
    pub histogram: RenderFrame,
    pub line: RenderFrame,
    pub parallel: RenderFrame,
}

impl DashboardFrames {
    /// `(file stem, frame)` pairs in canvas order.
    #[must_use]
    pub fn named(&self) -> [(&'static str, &RenderFrame); 3] {
        [
            ("histogram", &self.histogram),
            ("line", &self.line),
            ("parallel", &self.parallel),
        ]
    }
}

/// Standalone SVG documents for the three charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocuments {
    pub histogram: String,
    pub line: String,
    pub parallel: String,
}

/// Viridis ramp over the remote-ratio extent of `records`.
pub fn remote_ratio_palette(records: &[Record]) -> DashResult<SequentialPalette> {
    let domain = extent(records.iter().map(|record| record.remote_ratio))
        .unwrap_or((f64::NAN, f64::NAN));
    SequentialPalette::viridis(domain)
}

/// Owns the record set, the shared palettes and the three chart views.
#[derive(Debug, Clone)]
pub struct Dashboard {
    config: DashboardConfig,
    records: Vec<Record>,
    load_report: Option<LoadReport>,
    histogram: HistogramChart,
    line: LineChart,
    parallel: ParallelChart,
}

impl Dashboard {
    /// Loads the CSV at `path` and builds every chart.
    pub fn load(path: impl AsRef<Path>, config: DashboardConfig) -> DashResult<Self> {
        let dataset = load_dataset(path)?;
        let mut dashboard = Self::from_records(dataset.records, config)?;
        dashboard.load_report = Some(dataset.report);
        Ok(dashboard)
    }

    pub fn from_records(records: Vec<Record>, config: DashboardConfig) -> DashResult<Self> {
        config.validate()?;

        let experience = CategoryPalette::experience_levels()?;
        let sizes = CategoryPalette::company_sizes()?;
        let remote = remote_ratio_palette(&records)?;

        let histogram = HistogramChart::new(&records, experience, config.histogram);
        let line = LineChart::new(&records, sizes, config.line);
        let parallel = ParallelChart::new(&records, remote, config.parallel.clone());
        info!(records = records.len(), "dashboard ready");

        Ok(Self {
            config,
            records,
            load_report: None,
            histogram,
            line,
            parallel,
        })
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Row accounting when the dashboard came from a file.
    #[must_use]
    pub fn load_report(&self) -> Option<LoadReport> {
        self.load_report
    }

    #[must_use]
    pub fn histogram(&self) -> &HistogramChart {
        &self.histogram
    }

    pub fn histogram_mut(&mut self) -> &mut HistogramChart {
        &mut self.histogram
    }

    #[must_use]
    pub fn line(&self) -> &LineChart {
        &self.line
    }

    pub fn line_mut(&mut self) -> &mut LineChart {
        &mut self.line
    }

    #[must_use]
    pub fn parallel(&self) -> &ParallelChart {
        &self.parallel
    }

    pub fn parallel_mut(&mut self) -> &mut ParallelChart {
        &mut self.parallel
    }

    /// Advances the shared clock; only the line chart animates.
    pub fn advance(&mut self, dt: Duration) -> usize {
        self.line.advance(dt)
    }

    /// Stops playback for good.
    pub fn dispose(&mut self) {
        self.line.dispose();
    }

    #[must_use]
    pub fn frames(&self) -> DashboardFrames {
        DashboardFrames {
            histogram: self.histogram.frame(),
            line: self.line.frame(),
            parallel: self.parallel.frame(),
        }
    }

    /// Draws every frame with `renderer`, in canvas order.
    pub fn render_with<R: Renderer>(&self, renderer: &mut R) -> DashResult<()> {
        let frames = self.frames();
        for (_, frame) in frames.named() {
            renderer.render(frame)?;
        }
        Ok(())
    }

    pub fn render_svg(&self) -> DashResult<SvgDocuments> {
        let frames = self.frames();
        let render = |frame: &RenderFrame| -> DashResult<String> {
            let mut renderer = SvgRenderer::new();
            renderer.render(frame)?;
            Ok(renderer.into_document())
        };
        Ok(SvgDocuments {
            histogram: render(&frames.histogram)?,
            line: render(&frames.line)?,
            parallel: render(&frames.parallel)?,
        })
    }

    /// Writes `histogram.svg`, `line.svg` and `parallel.svg` into `dir`,
    /// creating it if needed. Returns the written paths.
    pub fn write_svg(&self, dir: impl AsRef<Path>) -> DashResult<Vec<PathBuf>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let documents = self.render_svg()?;
        let mut written = Vec::with_capacity(3);
        for (stem, document) in [
            ("histogram", &documents.histogram),
            ("line", &documents.line),
            ("parallel", &documents.parallel),
        ] {
            let path = dir.join(format!("{stem}.svg"));
            std::fs::write(&path, document)?;
            debug!(path = %path.display(), bytes = document.len(), "svg written");
            written.push(path);
        }
        Ok(written)
    }

    /// PNG counterpart of [`Dashboard::write_svg`].
    #[cfg(feature = "cairo-backend")]
    pub fn write_png(&self, dir: impl AsRef<Path>) -> DashResult<Vec<PathBuf>> {
        use crate::render::CairoRenderer;

        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let frames = self.frames();
        let mut written = Vec::with_capacity(3);
        for (stem, frame) in frames.named() {
            let size = |value: u32| i32::try_from(value).unwrap_or(i32::MAX);
            let mut renderer =
                CairoRenderer::new(size(frame.viewport.width), size(frame.viewport.height))?;
            renderer.render(frame)?;
            let path = dir.join(format!("{stem}.png"));
            renderer.write_png(&path)?;
            written.push(path);
        }
        Ok(written)
    }
}
