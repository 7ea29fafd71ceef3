//! Domain models for the `GivEnergy` chart plugin.
//!
//! ## Submodules
//!
//! - [`reading`] - Power-flow samples (Reading, PowerFlows)
//! - [`page`] - Paginated API responses (PageResponse, PageMeta, PageLinks)
//! - [`io`] - Plugin input and output objects

mod io;
mod page;
mod reading;

// Re-export everything at the models level
pub use io::{PluginInput, PluginOutput};
pub use page::{PageLinks, PageMeta, PageResponse};
pub use reading::{BatteryFlow, PowerFlow, PowerFlows, Reading};

#[cfg(test)]
mod serde_tests;
