// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `GivEnergy` Fetch
//!
//! Host APIs and pagination strategies for the `GivEnergy` data-points
//! endpoint.
//!
//! ## Host APIs
//!
//! The [`host`] module abstracts everything the runtime provides:
//!
//! - [`host::HostApi`] - HTTP, environment lookup and the host log
//! - [`host::http`] - reqwest-backed host with a domain allowlist
//!
//! ## Fetch Pipeline
//!
//! - [`strategy::PageStrategy`] - Trait for per-day pagination
//! - [`strategy::ParallelPages`] - Page-count pagination with fan-out
//! - [`strategy::CursorPages`] - Cursor pagination
//! - [`pipeline::DayRangeFetcher`] - Fetches yesterday and today
//! - [`context::FetchContext`] - Provides access to the host and settings
//!
//! ## Example
//!
//! ```ignore
//! use givenergy_fetch::{Credentials, DayRange, DayRangeFetcher, FetchContext};
//!
//! let ctx = FetchContext::builder().build()?;
//! let creds = Credentials::resolve(None, None, ctx.host.as_ref())?;
//! let range = DayRange::ending_at(chrono::Utc::now(), ctx.zone()?)?;
//!
//! let outcome = DayRangeFetcher::for_mode(ctx.settings.pagination)
//!     .fetch(&ctx, creds.inverter_id(), range, &creds.request_options())
//!     .await?;
//! ```

// Core modules
pub mod calendar;
pub mod context;
pub mod credentials;
pub mod error;
pub mod host;
pub mod pipeline;
pub mod strategy;

#[cfg(test)]
mod testing;

// Re-export key types at crate root

// Errors
pub use error::{CredentialError, FetchError, RequestError};

// Host APIs
pub use host::{HostApi, HostResponse, HttpHost, RequestOptions};

// Strategy & Pipeline
pub use calendar::{ActiveZone, DayRange};
pub use context::{FetchContext, FetchContextBuilder, FetchSettings};
pub use credentials::Credentials;
pub use pipeline::{DayRangeFetcher, RangeOutcome};
pub use strategy::{CursorPages, DayQuery, PageStrategy, PaginationMode, ParallelPages};
