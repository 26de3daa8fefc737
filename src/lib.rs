//! Native host for the catalog dashboard.
//!
//! Wires the `compute` controller to a reqwest transport and a local store so
//! the dashboard's data flow can run outside the browser.

pub mod config;
pub mod http;
pub mod session;
pub mod telemetry;

pub use crate::config::{ConfigError, DashboardConfig};
pub use crate::http::HttpTransport;
pub use session::DashboardSession;

#[cfg(test)]
mod test_utils;
