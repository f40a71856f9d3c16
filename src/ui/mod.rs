//! UI module - TUI rendering components.
//!
//! The UI follows a component-based layout mirroring the dashboard page:
//! - `layout.rs`: Main layout orchestration
//! - `header.rs`: Title + Server/Hardware status pills
//! - `log_table.rs`: Paginated access-log table
//! - `weather_panel.rs`: Clock, date, and current weather

mod header;
mod layout;
mod log_table;
mod weather_panel;

pub use layout::render;
