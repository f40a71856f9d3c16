//! `helmwatch` - Terminal monitoring dashboard for a helmet-detection
//! door access system.
//!
//! This library provides the polling clients (status service, log service,
//! Open-Meteo weather), the WMO condition lookup tables, and the ratatui
//! rendering for the dashboard binary.

pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod logs;
pub mod poller;
pub mod status;
pub mod ui;
pub mod weather;
pub mod wmo;

// Re-export core types for public API
pub use app::{App, AppState};
pub use config::HelmwatchConfig;
pub use error::HelmwatchError;
pub use logs::{LogEntry, LogsClient, LogsPage, Pagination};
pub use poller::{DashboardSource, DemoSource, LiveSource};
pub use status::{HardwareStatus, ServerStatus, StatusClient, StatusLevel};
pub use weather::WeatherSnapshot;
pub use wmo::ConditionGroup;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
