//! Readings to chart document.
//!
//! The builder is a pure transform: the same readings and options always
//! produce the same document.

use givenergy_core::Reading;
use tracing::{debug, instrument};

use crate::document::{
    AxisLabel, AxisLine, AxisTick, ChartDocument, GridLayout, ItemStyle, Legend, LineSeries,
    LineStyle, LineType, SplitLine, TimeAxis, ValueAxis,
};
use crate::error::ChartError;

/// Color of axis split lines.
const SPLIT_LINE_COLOR: &str = "#000";

/// Dotted split-line pattern.
const SPLIT_LINE_DASH: [u32; 2] = [1, 8];

/// X-axis label format.
const TIME_LABEL_FORMAT: &str = "{dd}/{MM} {HH}:{mm}";

// ============================================================================
// Series Kind
// ============================================================================

/// The five plotted series, in legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    /// House consumption.
    Consumption,
    /// Battery charge (negative) or discharge (positive).
    Battery,
    /// PV generation.
    Solar,
    /// Grid import or export.
    Grid,
    /// Battery state of charge, on the second axis.
    BatteryPercent,
}

impl SeriesKind {
    /// Returns all series in legend order.
    pub fn all() -> &'static [SeriesKind] {
        &[
            Self::Consumption,
            Self::Battery,
            Self::Solar,
            Self::Grid,
            Self::BatteryPercent,
        ]
    }

    /// Legend name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Consumption => "Consumption",
            Self::Battery => "Battery",
            Self::Solar => "Solar",
            Self::Grid => "Grid",
            Self::BatteryPercent => "Battery %",
        }
    }

    /// Dash style distinguishing the series in monochrome output.
    pub fn line_type(&self) -> LineType {
        match self {
            Self::Consumption => LineType::Named("solid"),
            Self::Battery => LineType::Named("dotted"),
            Self::Solar => LineType::Pattern(vec![8, 4, 2, 4]),
            Self::Grid => LineType::Named("dashed"),
            Self::BatteryPercent => LineType::Pattern(vec![8, 4, 4, 4]),
        }
    }

    /// Index of the y-axis, when not the default power axis.
    pub fn axis_index(&self) -> Option<u8> {
        match self {
            Self::BatteryPercent => Some(1),
            _ => None,
        }
    }

    /// This series' value in a reading.
    pub fn value(&self, reading: &Reading) -> f64 {
        let power = &reading.power;
        match self {
            Self::Consumption => power.consumption.power,
            Self::Battery => power.battery.power,
            Self::Solar => power.solar.power,
            Self::Grid => power.grid.power,
            Self::BatteryPercent => power.battery.percent,
        }
    }
}

// ============================================================================
// Power Axis Range
// ============================================================================

/// Bounds of the power axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    /// Lower bound in watts.
    pub min: f64,
    /// Upper bound in watts.
    pub max: f64,
}

impl AxisRange {
    /// Clamps each bound to `±limit` independently.
    ///
    /// A bound already inside the limit is left alone, so clamping never
    /// widens the range.
    pub fn clamp_to(self, limit: f64) -> Self {
        Self {
            min: if self.min < -limit { -limit } else { self.min },
            max: if self.max > limit { limit } else { self.max },
        }
    }
}

/// Min and max over every power value, clamped by `limit` when given.
///
/// Returns `None` when there are no readings. Battery percentage is on its
/// own axis and does not contribute.
pub fn power_axis_range(readings: &[Reading], limit: Option<f64>) -> Option<AxisRange> {
    let raw = readings
        .iter()
        .flat_map(Reading::power_values)
        .fold(None, |range: Option<AxisRange>, value| {
            Some(match range {
                None => AxisRange { min: value, max: value },
                Some(r) => AxisRange {
                    min: r.min.min(value),
                    max: r.max.max(value),
                },
            })
        })?;

    Some(match limit {
        Some(limit) => raw.clamp_to(limit),
        None => raw,
    })
}

// ============================================================================
// Chart Builder
// ============================================================================

/// Builds the chart document from merged readings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartBuilder {
    max_axis_power: Option<f64>,
}

impl ChartBuilder {
    /// Creates a builder with no axis limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the power axis limit. Zero means unset.
    pub fn max_axis_power(mut self, limit: Option<f64>) -> Self {
        self.max_axis_power = limit.filter(|l| *l != 0.0);
        self
    }

    /// Builds the document.
    ///
    /// # Errors
    ///
    /// Returns `ChartError::Reading` if any reading's time is not a valid
    /// RFC 3339 timestamp.
    #[instrument(skip(self, readings), fields(readings = readings.len()))]
    pub fn build(&self, readings: &[Reading]) -> Result<ChartDocument, ChartError> {
        let times = readings
            .iter()
            .map(Reading::timestamp_millis)
            .collect::<Result<Vec<_>, _>>()?;

        let range = power_axis_range(readings, self.max_axis_power);
        debug!(?range, limit = ?self.max_axis_power, "Power axis range");

        let series = SeriesKind::all()
            .iter()
            .map(|kind| LineSeries {
                name: kind.name().to_string(),
                kind: "line",
                show_symbol: false,
                y_axis_index: kind.axis_index(),
                data: times
                    .iter()
                    .zip(readings)
                    .map(|(t, r)| (*t, kind.value(r)))
                    .collect(),
                line_style: LineStyle::of_type(kind.line_type()),
            })
            .collect();

        Ok(ChartDocument {
            legend: Legend {
                data: SeriesKind::all().iter().map(|k| k.name().to_string()).collect(),
                item_style: ItemStyle { opacity: 0 },
            },
            grid: GridLayout {
                bottom: 30,
                left: 70,
                right: 50,
            },
            x_axis: time_axis(),
            y_axis: vec![power_axis(range), percent_axis()],
            series,
        })
    }
}

fn dotted_split_line() -> LineStyle {
    LineStyle {
        color: Some(SPLIT_LINE_COLOR),
        kind: Some(LineType::Pattern(SPLIT_LINE_DASH.to_vec())),
        width: None,
    }
}

fn time_axis() -> TimeAxis {
    TimeAxis {
        kind: "time",
        axis_label: AxisLabel {
            formatter: TIME_LABEL_FORMAT,
        },
        position: "bottom",
        axis_line: AxisLine { on_zero: false },
        axis_tick: AxisTick {
            show: true,
            line_style: LineStyle {
                width: Some(1),
                ..LineStyle::default()
            },
        },
        split_line: SplitLine {
            show: Some(true),
            line_style: Some(dotted_split_line()),
        },
    }
}

fn power_axis(range: Option<AxisRange>) -> ValueAxis {
    ValueAxis {
        kind: "value",
        name: "Power (W)".to_string(),
        max: range.map(|r| r.max),
        min: range.map(|r| r.min),
        split_line: SplitLine {
            show: None,
            line_style: Some(dotted_split_line()),
        },
    }
}

fn percent_axis() -> ValueAxis {
    ValueAxis {
        kind: "value",
        name: "Battery %".to_string(),
        max: None,
        min: None,
        split_line: SplitLine {
            show: Some(false),
            line_style: None,
        },
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use givenergy_core::BatteryFlow;

    fn reading(time: &str, solar: f64, grid: f64, battery: f64, consumption: f64) -> Reading {
        Reading::new(time, solar, grid, BatteryFlow::new(battery, 42.0), consumption)
    }

    #[test]
    fn test_axis_clamps_only_the_exceeding_side() {
        let readings = vec![
            reading("2024-05-01T00:00:00Z", 800.0, -300.0, 0.0, 200.0),
            reading("2024-05-01T00:05:00Z", 100.0, 50.0, -100.0, 250.0),
        ];

        let range = power_axis_range(&readings, Some(500.0)).unwrap();
        assert_eq!(range, AxisRange { min: -300.0, max: 500.0 });

        let range = power_axis_range(&readings, Some(200.0)).unwrap();
        assert_eq!(range, AxisRange { min: -200.0, max: 200.0 });
    }

    #[test]
    fn test_axis_limit_never_widens() {
        let readings = vec![reading("2024-05-01T00:00:00Z", 120.0, -40.0, 0.0, 80.0)];
        let range = power_axis_range(&readings, Some(5000.0)).unwrap();
        assert_eq!(range, AxisRange { min: -40.0, max: 120.0 });
    }

    #[test]
    fn test_axis_ignores_battery_percent() {
        let readings = vec![reading("2024-05-01T00:00:00Z", 10.0, 0.0, 0.0, 20.0)];
        let range = power_axis_range(&readings, None).unwrap();
        assert_eq!(range.max, 20.0);
    }

    #[test]
    fn test_empty_readings_have_no_bounds() {
        assert!(power_axis_range(&[], Some(500.0)).is_none());

        let doc = ChartBuilder::new().build(&[]).unwrap();
        let axis = doc.power_axis().unwrap();
        assert!(axis.min.is_none() && axis.max.is_none());
        assert_eq!(doc.series.len(), 5);
        assert!(doc.series.iter().all(|s| s.data.is_empty()));
    }

    #[test]
    fn test_zero_limit_is_unset() {
        let readings = vec![reading("2024-05-01T00:00:00Z", 800.0, -300.0, 0.0, 0.0)];
        let doc = ChartBuilder::new().max_axis_power(Some(0.0)).build(&readings).unwrap();
        assert_eq!(doc.power_axis().unwrap().max, Some(800.0));
    }

    #[test]
    fn test_series_order_and_styles() {
        let doc = ChartBuilder::new().build(&[]).unwrap();
        let names: Vec<_> = doc.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Consumption", "Battery", "Solar", "Grid", "Battery %"]);
        assert_eq!(doc.legend.data, names);

        assert_eq!(
            doc.series_named("Solar").unwrap().line_style.kind,
            Some(LineType::Pattern(vec![8, 4, 2, 4]))
        );
        let percent = doc.series_named("Battery %").unwrap();
        assert_eq!(percent.y_axis_index, Some(1));
        assert!(doc.series[..4].iter().all(|s| s.y_axis_index.is_none()));
    }

    #[test]
    fn test_points_align_with_readings() {
        let readings = vec![
            reading("2024-05-01T00:00:00Z", 1.0, 2.0, 3.0, 4.0),
            reading("2024-05-01T00:05:00Z", 5.0, 6.0, 7.0, 8.0),
        ];
        let doc = ChartBuilder::new().build(&readings).unwrap();

        let t0 = 1_714_521_600_000_i64;
        assert_eq!(
            doc.series_named("Consumption").unwrap().data,
            vec![(t0, 4.0), (t0 + 300_000, 8.0)]
        );
        assert_eq!(doc.series_named("Grid").unwrap().data[1], (t0 + 300_000, 6.0));
        assert_eq!(doc.series_named("Battery %").unwrap().data[0], (t0, 42.0));
    }

    #[test]
    fn test_bad_timestamp_fails_build() {
        let readings = vec![reading("not a time", 0.0, 0.0, 0.0, 0.0)];
        assert!(matches!(
            ChartBuilder::new().build(&readings),
            Err(ChartError::Reading(_))
        ));
    }

    #[test]
    fn test_serialized_shape() {
        let readings = vec![reading("2024-05-01T00:00:00Z", 800.0, -300.0, 0.0, 100.0)];
        let doc = ChartBuilder::new().max_axis_power(Some(500.0)).build(&readings).unwrap();
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["legend"]["itemStyle"]["opacity"], 0);
        assert_eq!(json["grid"], serde_json::json!({"bottom": 30, "left": 70, "right": 50}));
        assert_eq!(json["xAxis"]["type"], "time");
        assert_eq!(json["xAxis"]["axisLabel"]["formatter"], "{dd}/{MM} {HH}:{mm}");
        assert_eq!(json["xAxis"]["axisLine"]["onZero"], false);
        assert_eq!(json["xAxis"]["splitLine"]["lineStyle"]["type"], serde_json::json!([1, 8]));
        assert_eq!(json["yAxis"][0]["max"].as_f64(), Some(500.0));
        assert_eq!(json["yAxis"][0]["min"].as_f64(), Some(-300.0));
        assert_eq!(json["yAxis"][1]["splitLine"], serde_json::json!({"show": false}));
        assert!(json["yAxis"][1].get("min").is_none());
        assert_eq!(json["series"][0]["showSymbol"], false);
        assert_eq!(json["series"][0]["lineStyle"]["type"], "solid");
        assert_eq!(json["series"][4]["yAxisIndex"], 1);
        assert!(json["series"][0].get("yAxisIndex").is_none());
        assert_eq!(json["series"][0]["data"][0][0], 1_714_521_600_000_i64);
    }
}
