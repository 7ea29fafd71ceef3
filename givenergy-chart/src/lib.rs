// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `GivEnergy` Chart
//!
//! Turns merged power-flow readings into an ECharts configuration.
//!
//! - [`ChartBuilder`] - Readings to [`ChartDocument`], with optional axis clamp
//! - [`retain_recent`] - Drops readings older than a time window
//! - [`Theme`] - Named style override documents
//!
//! ## Example
//!
//! ```ignore
//! use givenergy_chart::{retain_recent, ChartBuilder, Theme};
//!
//! let readings = retain_recent(readings, 6.0, chrono::Utc::now())?;
//! let chart = ChartBuilder::new().max_axis_power(Some(5000.0)).build(&readings)?;
//! let theme = Theme::from_name(Some("monochrome")).overrides();
//! ```

pub mod builder;
pub mod document;
pub mod error;
pub mod filter;
pub mod theme;

pub use builder::{power_axis_range, AxisRange, ChartBuilder, SeriesKind};
pub use document::{ChartDocument, LineSeries, LineStyle, LineType, ValueAxis};
pub use error::ChartError;
pub use filter::retain_recent;
pub use theme::Theme;
