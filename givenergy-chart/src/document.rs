//! Typed ECharts configuration document.
//!
//! Only the options the power-flow chart uses are modeled. Field names
//! serialize in camelCase to match ECharts.

#![allow(missing_docs)]

use serde::Serialize;

// ============================================================================
// Document
// ============================================================================

/// The complete chart configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDocument {
    pub legend: Legend,
    pub grid: GridLayout,
    pub x_axis: TimeAxis,
    pub y_axis: Vec<ValueAxis>,
    pub series: Vec<LineSeries>,
}

impl ChartDocument {
    /// Looks up a series by its legend name.
    pub fn series_named(&self, name: &str) -> Option<&LineSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    /// The power axis (index 0).
    pub fn power_axis(&self) -> Option<&ValueAxis> {
        self.y_axis.first()
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Legend listing every series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    pub data: Vec<String>,
    pub item_style: ItemStyle,
}

/// Legend icon style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemStyle {
    pub opacity: u8,
}

/// Plot area margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridLayout {
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

// ============================================================================
// Axes
// ============================================================================

/// The time x-axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeAxis {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub axis_label: AxisLabel,
    pub position: &'static str,
    pub axis_line: AxisLine,
    pub axis_tick: AxisTick,
    pub split_line: SplitLine,
}

/// A value y-axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueAxis {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    pub split_line: SplitLine,
}

/// Axis label formatting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabel {
    pub formatter: &'static str,
}

/// Axis baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLine {
    pub on_zero: bool,
}

/// Axis ticks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisTick {
    pub show: bool,
    pub line_style: LineStyle,
}

/// Grid lines drawn across the plot.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_style: Option<LineStyle>,
}

// ============================================================================
// Lines
// ============================================================================

/// Stroke style of a line.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LineStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<LineType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

impl LineStyle {
    /// A style with only a dash type.
    pub fn of_type(kind: LineType) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }
}

/// Dash pattern: a named ECharts style or explicit dash/gap lengths.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LineType {
    Named(&'static str),
    Pattern(Vec<u32>),
}

/// One line series of `[timestamp_ms, value]` points.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSeries {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub show_symbol: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis_index: Option<u8>,
    pub data: Vec<(i64, f64)>,
    pub line_style: LineStyle,
}
