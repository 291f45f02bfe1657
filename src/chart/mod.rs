//! Severity chart: projects the chronological series onto a plot area.
//!
//! Geometry is computed here and kept renderer-neutral; `svg` turns a
//! [`RenderedChart`] into markup. The renderer is only reached through
//! [`render_graph`], which answers an empty log with a [`NoDataNotice`].

mod svg;

pub use svg::ChartTheme;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::journal::{SeriesPoint, SymptomLog};

pub const CHART_TITLE: &str = "Symptom Severity Over Time";
pub const X_AXIS_LABEL: &str = "Date";
pub const Y_AXIS_LABEL: &str = "Severity";
pub const NO_DATA_MESSAGE: &str = "No symptom logs available to display.";

/// Pixels between a point and its symptom annotation.
pub const ANNOTATION_OFFSET: f64 = 7.0;

/// Maximum number of labelled date ticks on the x axis.
const MAX_X_TICKS: usize = 12;

/// Default severity axis, widened when entries fall outside it.
const Y_AXIS_FLOOR: i32 = 0;
const Y_AXIS_CEIL: i32 = 10;

/// Overall size and margins of the chart, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        // 2:1, matching a 12x6 inch figure
        Self {
            width: 960.0,
            height: 480.0,
            margin_left: 60.0,
            margin_right: 30.0,
            margin_top: 45.0,
            margin_bottom: 70.0,
        }
    }
}

impl ChartLayout {
    pub fn plot_width(&self) -> f64 {
        (self.width - self.margin_left - self.margin_right).max(1.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - self.margin_top - self.margin_bottom).max(1.0)
    }
}

/// A plotted entry in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub date: NaiveDate,
    pub severity: i32,
    pub label: String,
    pub label_x: f64,
    pub label_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub position: f64,
    pub label: String,
}

/// Everything needed to draw the severity chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub layout: ChartLayout,
    pub points: Vec<PlotPoint>,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
    pub y_min: i32,
    pub y_max: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoDataNotice {
    pub message: String,
}

impl Default for NoDataNotice {
    fn default() -> Self {
        Self {
            message: NO_DATA_MESSAGE.to_string(),
        }
    }
}

/// Result of a graph request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphOutcome {
    Chart(RenderedChart),
    NoData(NoDataNotice),
}

/// Renders the log's chronological series, or a notice when it is empty.
pub fn render_graph(log: &SymptomLog, layout: &ChartLayout) -> GraphOutcome {
    if log.is_empty() {
        tracing::debug!("Graph requested with no entries");
        return GraphOutcome::NoData(NoDataNotice::default());
    }
    match RenderedChart::from_series(&log.chronological_series(), layout) {
        Some(chart) => GraphOutcome::Chart(chart),
        None => GraphOutcome::NoData(NoDataNotice::default()),
    }
}

impl RenderedChart {
    /// Projects a date-sorted series. Returns `None` for an empty series.
    pub fn from_series(series: &[SeriesPoint], layout: &ChartLayout) -> Option<Self> {
        let first = series.first()?;
        let last = series.last()?;

        let plot_w = layout.plot_width();
        let plot_h = layout.plot_height();
        // keep end points and their labels off the axes
        let pad = plot_w * 0.04;

        let span_days = (last.date - first.date).num_days();
        let x_for = |date: NaiveDate| -> f64 {
            if span_days <= 0 {
                layout.margin_left + plot_w / 2.0
            } else {
                let frac = (date - first.date).num_days() as f64 / span_days as f64;
                layout.margin_left + pad + frac * (plot_w - 2.0 * pad)
            }
        };

        let y_min = series
            .iter()
            .map(|p| p.severity.value())
            .min()
            .map_or(Y_AXIS_FLOOR, |v| v.min(Y_AXIS_FLOOR));
        let y_max = series
            .iter()
            .map(|p| p.severity.value())
            .max()
            .map_or(Y_AXIS_CEIL, |v| v.max(Y_AXIS_CEIL));
        let y_range = (i64::from(y_max) - i64::from(y_min)).max(1) as f64;
        let y_for = |severity: i32| -> f64 {
            let frac = (i64::from(severity) - i64::from(y_min)) as f64 / y_range;
            layout.margin_top + plot_h - frac * plot_h
        };

        let points = series
            .iter()
            .map(|p| {
                let x = x_for(p.date);
                let y = y_for(p.severity.value());
                PlotPoint {
                    x,
                    y,
                    date: p.date,
                    severity: p.severity.value(),
                    label: p.symptom.clone(),
                    label_x: x,
                    label_y: y - ANNOTATION_OFFSET,
                }
            })
            .collect();

        let mut dates: Vec<NaiveDate> = series.iter().map(|p| p.date).collect();
        dates.dedup();
        let stride = dates.len().div_ceil(MAX_X_TICKS).max(1);
        let x_ticks = dates
            .iter()
            .step_by(stride)
            .map(|d| AxisTick {
                position: x_for(*d),
                label: d.format("%m/%d").to_string(),
            })
            .collect();

        let y_step = severity_step(y_min, y_max);
        let y_ticks = (i64::from(y_min)..=i64::from(y_max))
            .step_by(y_step)
            .map(|v| AxisTick {
                position: y_for(v as i32),
                label: v.to_string(),
            })
            .collect();

        Some(Self {
            title: CHART_TITLE.to_string(),
            x_label: X_AXIS_LABEL.to_string(),
            y_label: Y_AXIS_LABEL.to_string(),
            layout: *layout,
            points,
            x_ticks,
            y_ticks,
            y_min,
            y_max,
        })
    }

    /// Polyline through the points in series order.
    pub fn to_svg_path(&self) -> String {
        let mut path = String::new();
        for (i, point) in self.points.iter().enumerate() {
            if i == 0 {
                path.push_str(&format!("M {:.1} {:.1}", point.x, point.y));
            } else {
                path.push_str(&format!(" L {:.1} {:.1}", point.x, point.y));
            }
        }
        path
    }
}

/// Tick spacing giving roughly five severity gridlines.
fn severity_step(y_min: i32, y_max: i32) -> usize {
    let range = (i64::from(y_max) - i64::from(y_min)).max(1);
    let step = (range + 4) / 5;
    usize::try_from(step).unwrap_or(usize::MAX).max(1)
}
