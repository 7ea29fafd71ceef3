// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `GivEnergy` Core
//!
//! Core types and models shared by the `GivEnergy` chart crates.
//!
//! ## Key Types
//!
//! ### Readings
//! - [`Reading`] - One timestamped power-flow sample
//! - [`PowerFlows`] - The power values carried by a reading
//!
//! ### Pagination
//! - [`PageResponse`] - One page of the data-points endpoint
//! - [`PageMeta`] - Page-count pagination metadata
//! - [`PageLinks`] - Cursor pagination links
//!
//! ### Plugin Surface
//! - [`PluginInput`] - The single input object
//! - [`PluginOutput`] - The single output object

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Readings
    BatteryFlow,
    PowerFlow,
    PowerFlows,
    Reading,
    // Pagination
    PageLinks,
    PageMeta,
    PageResponse,
    // Plugin surface
    PluginInput,
    PluginOutput,
};
