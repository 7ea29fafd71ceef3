// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `GivEnergy` Plugin
//!
//! Single input object in, single output object out:
//!
//! 1. **Credentials**: token and inverter id from the input, else the host
//!    environment
//! 2. **Fetch**: yesterday and today, every page, merged in order
//! 3. **Chart**: optional time window, axis clamp and theme
//!
//! The host (HTTP, environment, log sink) is injected through
//! [`FetchContext`](givenergy_fetch::FetchContext).

pub mod error;
pub mod runner;

pub use error::PluginError;
pub use runner::{ChartOutput, ChartPlugin};

// Input/output objects
pub use givenergy_core::{PluginInput, PluginOutput};
