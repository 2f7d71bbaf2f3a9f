//! `launchdash` - An interactive dashboard over historical launch records
//!
//! This library loads a launch dataset once, filters it by launch site and
//! payload mass, and builds the pie and scatter chart specifications that the
//! dashboard page renders. The HTTP server and CLI sit on top.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod chart;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod logging;
pub mod record;
pub mod server;

pub use catalog::{SiteCatalog, SiteSelection, ALL_SENTINEL};
pub use chart::{PieSpec, ScatterSpec};
pub use config::Config;
pub use dashboard::{Dashboard, DashboardView};
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use filter::{FilterSelection, PayloadRange};
pub use logging::init_logging;
pub use record::{LaunchRecord, Outcome};
