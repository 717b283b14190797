//! salary-dash: headless engine for a three-chart salary dashboard.
//!
//! Records load from CSV, aggregate into histogram bins and per-year means,
//! and render through backend-agnostic frames. Interaction (hover, clicks,
//! brushing, playback) is driven by explicit calls from the host.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{Dashboard, DashboardConfig};
pub use error::{DashError, DashResult};
