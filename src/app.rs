//! Shared dashboard state, updated by the pollers and read by the renderer.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::HelmwatchError;
use crate::logs::{LogsPage, PAGE_SIZES, Pagination};
use crate::status::{HardwareStatus, ServerStatus, StatusLevel};
use crate::weather::WeatherSnapshot;

/// Application view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Main dashboard view.
    #[default]
    Dashboard,
    /// Quitting.
    Quit,
}

/// Main application model.
pub struct App {
    /// Current application state/view.
    pub state: AppState,
    /// Server pill state.
    pub server: StatusLevel,
    /// Last server sample, kept across failures.
    pub server_sample: Option<ServerStatus>,
    /// Hardware pill state.
    pub hardware: StatusLevel,
    /// Last hardware sample, kept across failures.
    pub hardware_sample: Option<HardwareStatus>,
    /// Current weather snapshot, if one has arrived.
    pub weather: Option<WeatherSnapshot>,
    /// Weather fetch error to display in the panel.
    pub weather_error: Option<HelmwatchError>,
    /// Current log page, if one has arrived.
    pub logs: Option<LogsPage>,
    /// Log fetch error replacing the table body.
    pub logs_error: Option<HelmwatchError>,
    /// Requested page (1-based).
    pub page: u32,
    /// Requested page size.
    pub limit: u32,
    /// Timestamp of the last successful log fetch; drives the countdown.
    pub logs_fetched_at: Option<DateTime<Utc>>,
    /// Log refresh cadence.
    pub logs_interval: Duration,
    /// Set by `r` or page navigation; the log poller consumes it to fetch
    /// out of cadence.
    pub refresh_requested: bool,
}

impl App {
    #[must_use]
    pub fn new(logs_interval: Duration) -> Self {
        Self {
            state: AppState::Dashboard,
            server: StatusLevel::Idle,
            server_sample: None,
            hardware: StatusLevel::Idle,
            hardware_sample: None,
            weather: None,
            weather_error: None,
            logs: None,
            logs_error: None,
            page: 1,
            limit: 10,
            logs_fetched_at: None,
            logs_interval,
            refresh_requested: false,
        }
    }

    /// Handle keyboard input.
    pub fn handle_key(&mut self, key: char) {
        match key {
            'q' | 'Q' => self.state = AppState::Quit,
            'n' | 'N' => self.next_page(),
            'p' | 'P' => self.prev_page(),
            '+' => self.cycle_limit(1),
            '-' => self.cycle_limit(-1),
            'r' | 'R' => self.refresh_requested = true,
            _ => {}
        }
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.state == AppState::Quit
    }

    /// Total pages for the current data, 1 before any fetch.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.logs
            .as_ref()
            .map_or(1, |page| page.pagination.total_pages.max(1))
    }

    /// Advance one page; never past the last.
    pub fn next_page(&mut self) {
        if self.page < self.total_pages() {
            self.page += 1;
            self.refresh_requested = true;
        }
    }

    /// Go back one page; never below 1.
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
            self.refresh_requested = true;
        }
    }

    /// Step the page size through the offered sizes and reset to page 1.
    pub fn cycle_limit(&mut self, step: i32) {
        let current = PAGE_SIZES
            .iter()
            .position(|&s| s == self.limit)
            .unwrap_or(1);
        let next = current.saturating_add_signed(step as isize);
        if next < PAGE_SIZES.len() && PAGE_SIZES[next] != self.limit {
            self.limit = PAGE_SIZES[next];
            self.page = 1;
            self.refresh_requested = true;
        }
    }

    /// Record a successful log fetch.
    pub fn apply_logs(&mut self, page: LogsPage, now: DateTime<Utc>) {
        // The service may have shrunk while we were on a late page.
        let total_pages = Pagination::pages_for(page.pagination.total, page.pagination.limit);
        if self.page > total_pages {
            self.page = total_pages;
        }
        self.logs = Some(page);
        self.logs_error = None;
        self.logs_fetched_at = Some(now);
    }

    /// Record a failed log fetch.
    pub fn apply_logs_error(&mut self, error: HelmwatchError) {
        self.logs_error = Some(error);
    }

    /// Record a server status poll outcome.
    pub fn apply_server(&mut self, sample: Option<ServerStatus>) {
        self.server = StatusLevel::from_sample(sample.as_ref().map(|s| s.is_online));
        if sample.is_some() {
            self.server_sample = sample;
        }
    }

    /// Record a hardware status poll outcome.
    pub fn apply_hardware(&mut self, sample: Option<HardwareStatus>) {
        self.hardware = StatusLevel::from_sample(sample.as_ref().map(|s| s.is_online));
        if sample.is_some() {
            self.hardware_sample = sample;
        }
    }

    /// Record a weather poll outcome.
    pub fn apply_weather(&mut self, result: Result<WeatherSnapshot, HelmwatchError>) {
        match result {
            Ok(snapshot) => {
                self.weather = Some(snapshot);
                self.weather_error = None;
            }
            Err(error) => self.weather_error = Some(error),
        }
    }

    /// Seconds until the next scheduled log refresh, for the countdown badge.
    #[must_use]
    pub fn refresh_countdown(&self, now: DateTime<Utc>) -> u64 {
        let Some(fetched_at) = self.logs_fetched_at else {
            return self.logs_interval.as_secs();
        };
        let elapsed_ms = (now - fetched_at).num_milliseconds().max(0) as u64;
        let interval_ms = self.logs_interval.as_millis() as u64;
        interval_ms.saturating_sub(elapsed_ms).div_ceil(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::LogEntry;
    use chrono::TimeZone;

    fn page_of(total: u32, limit: u32, page: u32) -> LogsPage {
        LogsPage {
            data: vec![LogEntry {
                id: "log-01".into(),
                image: None,
                is_open: true,
                created_at: "2026-08-30T09:12:45Z".into(),
            }],
            pagination: Pagination {
                page,
                limit,
                total,
                total_pages: Pagination::pages_for(total, limit),
            },
        }
    }

    fn app_with_logs(total: u32, limit: u32) -> App {
        let mut app = App::new(Duration::from_secs(3));
        app.limit = limit;
        app.apply_logs(page_of(total, limit, 1), Utc::now());
        app
    }

    #[test]
    fn test_next_page_stops_at_total_pages() {
        let mut app = app_with_logs(47, 10);
        assert_eq!(app.total_pages(), 5);
        for _ in 0..10 {
            app.next_page();
        }
        assert_eq!(app.page, 5);
    }

    #[test]
    fn test_prev_page_stops_at_one() {
        let mut app = app_with_logs(47, 10);
        app.prev_page();
        assert_eq!(app.page, 1);
        app.next_page();
        app.prev_page();
        assert_eq!(app.page, 1);
    }

    #[test]
    fn test_page_navigation_requests_refresh() {
        let mut app = app_with_logs(47, 10);
        app.refresh_requested = false;
        app.next_page();
        assert!(app.refresh_requested);
    }

    #[test]
    fn test_cycle_limit_resets_page() {
        let mut app = app_with_logs(200, 10);
        app.page = 4;
        app.cycle_limit(1);
        assert_eq!(app.limit, 20);
        assert_eq!(app.page, 1);
    }

    #[test]
    fn test_cycle_limit_clamps_at_ends() {
        let mut app = App::new(Duration::from_secs(3));
        app.limit = 5;
        app.cycle_limit(-1);
        assert_eq!(app.limit, 5);

        app.limit = 50;
        app.cycle_limit(1);
        assert_eq!(app.limit, 50);
    }

    #[test]
    fn test_apply_logs_clamps_page_when_table_shrinks() {
        let mut app = app_with_logs(47, 10);
        app.page = 5;
        app.apply_logs(page_of(12, 10, 5), Utc::now());
        assert_eq!(app.page, 2);
    }

    #[test]
    fn test_status_pills() {
        let mut app = App::new(Duration::from_secs(3));
        assert_eq!(app.server, StatusLevel::Idle);

        app.apply_server(Some(ServerStatus {
            is_online: true,
            timestamp: None,
            uptime: None,
        }));
        assert_eq!(app.server, StatusLevel::Success);

        // Fetch failure flips the pill but keeps the last sample
        app.apply_server(None);
        assert_eq!(app.server, StatusLevel::Error);
        assert!(app.server_sample.is_some());

        app.apply_hardware(Some(HardwareStatus {
            is_online: false,
            timestamp: None,
            temperature: Some(41.5),
        }));
        assert_eq!(app.hardware, StatusLevel::Error);
    }

    #[test]
    fn test_refresh_countdown() {
        let mut app = App::new(Duration::from_secs(3));
        let t0 = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();

        // No fetch yet: full interval
        assert_eq!(app.refresh_countdown(t0), 3);

        app.apply_logs(page_of(47, 10, 1), t0);
        assert_eq!(app.refresh_countdown(t0 + chrono::Duration::milliseconds(500)), 3);
        assert_eq!(app.refresh_countdown(t0 + chrono::Duration::milliseconds(2100)), 1);
        assert_eq!(app.refresh_countdown(t0 + chrono::Duration::seconds(3)), 0);
        assert_eq!(app.refresh_countdown(t0 + chrono::Duration::seconds(30)), 0);
    }

    #[test]
    fn test_quit_key() {
        let mut app = App::new(Duration::from_secs(3));
        app.handle_key('q');
        assert!(app.should_quit());
    }
}
