//! Background polling tasks feeding the shared [`App`] state.
//!
//! Cadence per widget: status pills 5 s, log table 3 s, weather 60 s. The log
//! poller also wakes early when the UI requests an out-of-cadence fetch (page
//! navigation, page-size change, `r`).

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use reqwest_middleware::ClientWithMiddleware;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::app::App;
use crate::config::{HelmwatchConfig, WeatherConfig};
use crate::error::HelmwatchError;
use crate::logs::{LogEntry, LogsClient, LogsPage, Pagination};
use crate::status::{HardwareStatus, ServerStatus, StatusClient};
use crate::weather::{self, WeatherSnapshot};

/// How often the log poller re-checks whether a fetch is due. Short enough
/// that page navigation feels immediate.
const LOG_WAKE: Duration = Duration::from_millis(250);

/// Everything the dashboard reads from remote services, behind one seam so
/// demo mode can feed the same pollers without a network.
#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn server_status(&self) -> Result<ServerStatus>;
    async fn hardware_status(&self) -> Result<HardwareStatus>;
    async fn logs(&self, page: u32, limit: u32) -> Result<LogsPage>;
    async fn weather(&self) -> Result<WeatherSnapshot>;
}

/// Live source backed by the status/log service and Open-Meteo.
pub struct LiveSource {
    status: StatusClient,
    logs: LogsClient,
    http: ClientWithMiddleware,
    weather_config: WeatherConfig,
    weather_ttl: Duration,
}

impl LiveSource {
    #[must_use]
    pub fn new(client: ClientWithMiddleware, config: &HelmwatchConfig) -> Self {
        Self {
            status: StatusClient::new(client.clone(), config.api.base_url.clone()),
            logs: LogsClient::new(client.clone(), config.api.base_url.clone()),
            http: client,
            weather_config: config.weather.clone(),
            weather_ttl: Duration::from_secs(config.cache.ttl_seconds),
        }
    }
}

#[async_trait]
impl DashboardSource for LiveSource {
    async fn server_status(&self) -> Result<ServerStatus> {
        self.status.server_status().await
    }

    async fn hardware_status(&self) -> Result<HardwareStatus> {
        self.status.hardware_status().await
    }

    async fn logs(&self, page: u32, limit: u32) -> Result<LogsPage> {
        self.logs.fetch_page(page, limit).await
    }

    async fn weather(&self) -> Result<WeatherSnapshot> {
        weather::current_snapshot(&self.http, &self.weather_config, self.weather_ttl).await
    }
}

/// Fabricated data for development against a backend that is not running.
pub struct DemoSource {
    total_logs: u32,
    started_at: chrono::DateTime<Utc>,
}

impl DemoSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            // Matches the pagination example everyone knows: 47 entries.
            total_logs: 47,
            started_at: Utc::now(),
        }
    }
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DashboardSource for DemoSource {
    async fn server_status(&self) -> Result<ServerStatus> {
        Ok(ServerStatus {
            is_online: true,
            timestamp: Some(Utc::now().to_rfc3339()),
            uptime: Some(86_400.0),
        })
    }

    async fn hardware_status(&self) -> Result<HardwareStatus> {
        Ok(HardwareStatus {
            is_online: true,
            timestamp: Some(Utc::now().to_rfc3339()),
            temperature: Some(41.5),
        })
    }

    async fn logs(&self, page: u32, limit: u32) -> Result<LogsPage> {
        let total = self.total_logs;
        let total_pages = Pagination::pages_for(total, limit);
        let page = page.clamp(1, total_pages);

        let first = (page - 1) * limit;
        let last = (first + limit).min(total);
        let data = (first..last)
            .map(|i| LogEntry {
                id: format!("demo-{:03}", i + 1),
                // Every third event has no captured frame
                image: if i % 3 == 2 {
                    None
                } else {
                    Some(format!("/uploads/demo-{:03}.jpg", i + 1))
                },
                is_open: i % 2 == 0,
                created_at: (self.started_at - chrono::Duration::minutes(i64::from(i) * 7))
                    .to_rfc3339(),
            })
            .collect();

        Ok(LogsPage {
            data,
            pagination: Pagination {
                page,
                limit,
                total,
                total_pages,
            },
        })
    }

    async fn weather(&self) -> Result<WeatherSnapshot> {
        Ok(WeatherSnapshot {
            temperature: 31.4,
            temperature_unit: "°C".to_string(),
            humidity: 66.0,
            wind_speed: 9.7,
            wind_speed_unit: "km/h".to_string(),
            weather_code: 80,
            sample_time: Utc::now().format("%Y-%m-%dT%H:%M").to_string(),
            is_night: false,
        })
    }
}

/// Spawn the three polling tasks. The handles are detached at exit along
/// with the runtime; nothing needs explicit cancellation.
pub fn spawn(
    source: Arc<dyn DashboardSource>,
    app: Arc<Mutex<App>>,
    config: &HelmwatchConfig,
) -> Vec<JoinHandle<()>> {
    vec![
        spawn_status_poller(
            source.clone(),
            app.clone(),
            Duration::from_secs(config.poll.status_seconds),
        ),
        spawn_log_poller(source.clone(), app.clone()),
        spawn_weather_poller(
            source,
            app,
            Duration::from_secs(config.poll.weather_seconds),
        ),
    ]
}

fn spawn_status_poller(
    source: Arc<dyn DashboardSource>,
    app: Arc<Mutex<App>>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;

            let server = match source.server_status().await {
                Ok(status) => Some(status),
                Err(e) => {
                    warn!("Server status poll failed: {e:#}");
                    None
                }
            };
            let hardware = match source.hardware_status().await {
                Ok(status) => Some(status),
                Err(e) => {
                    warn!("Hardware status poll failed: {e:#}");
                    None
                }
            };

            let mut app = app.lock().await;
            app.apply_server(server);
            app.apply_hardware(hardware);
        }
    })
}

fn spawn_log_poller(source: Arc<dyn DashboardSource>, app: Arc<Mutex<App>>) -> JoinHandle<()> {
    tokio::spawn(async move {
        // Cadence is attempt-based, so a failing backend is retried once per
        // interval rather than on every wake. `logs_fetched_at` stays
        // success-only because it drives the countdown badge.
        let mut last_attempt: Option<chrono::DateTime<Utc>> = None;
        loop {
            let (due, page, limit) = {
                let mut app = app.lock().await;
                let now = Utc::now();
                let due = app.refresh_requested
                    || last_attempt.is_none_or(|at| {
                        (now - at).to_std().unwrap_or_default() >= app.logs_interval
                    });
                app.refresh_requested = false;
                (due, app.page, app.limit)
            };

            if due {
                last_attempt = Some(Utc::now());
                match source.logs(page, limit).await {
                    Ok(logs_page) => {
                        let mut app = app.lock().await;
                        app.apply_logs(logs_page, Utc::now());
                    }
                    Err(e) => {
                        warn!("Log poll failed: {e:#}");
                        let mut app = app.lock().await;
                        app.apply_logs_error(HelmwatchError::api(format!("{e:#}")));
                    }
                }
            }

            tokio::time::sleep(LOG_WAKE).await;
        }
    })
}

fn spawn_weather_poller(
    source: Arc<dyn DashboardSource>,
    app: Arc<Mutex<App>>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;

            let result = source.weather().await.map_err(|e| {
                warn!("Weather poll failed: {e:#}");
                HelmwatchError::api(format!("{e:#}"))
            });

            let mut app = app.lock().await;
            app.apply_weather(result);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Source where every call fails, counting log fetch attempts.
    #[derive(Default)]
    struct DownSource {
        log_calls: AtomicU32,
    }

    #[async_trait]
    impl DashboardSource for DownSource {
        async fn server_status(&self) -> Result<ServerStatus> {
            Err(anyhow!("connection refused"))
        }

        async fn hardware_status(&self) -> Result<HardwareStatus> {
            Err(anyhow!("connection refused"))
        }

        async fn logs(&self, _page: u32, _limit: u32) -> Result<LogsPage> {
            self.log_calls.fetch_add(1, Ordering::SeqCst);
            Err(anyhow!("connection refused"))
        }

        async fn weather(&self) -> Result<WeatherSnapshot> {
            Err(anyhow!("connection refused"))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_log_poller_keeps_cadence_while_backend_down() {
        let source = Arc::new(DownSource::default());
        let app = Arc::new(Mutex::new(App::new(Duration::from_secs(3))));

        let handle = spawn_log_poller(source.clone(), app.clone());

        // Paused time fast-forwards through eight wakes while almost no wall
        // clock passes, so only the first attempt is due.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(source.log_calls.load(Ordering::SeqCst), 1);
        assert!(matches!(
            app.lock().await.logs_error,
            Some(HelmwatchError::Api { .. })
        ));

        // A manual refresh still fetches out of cadence.
        app.lock().await.refresh_requested = true;
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(source.log_calls.load(Ordering::SeqCst), 2);

        handle.abort();
    }

    #[tokio::test]
    async fn test_demo_source_pagination() {
        let source = DemoSource::new();

        let first = source.logs(1, 10).await.unwrap();
        assert_eq!(first.data.len(), 10);
        assert_eq!(first.pagination.total, 47);
        assert_eq!(first.pagination.total_pages, 5);

        let last = source.logs(5, 10).await.unwrap();
        assert_eq!(last.data.len(), 7);

        // Out-of-range page clamps rather than returning an empty page
        let clamped = source.logs(9, 10).await.unwrap();
        assert_eq!(clamped.pagination.page, 5);
    }

    #[tokio::test]
    async fn test_demo_source_entry_shape() {
        let source = DemoSource::new();
        let page = source.logs(1, 5).await.unwrap();

        assert_eq!(page.data[0].id, "demo-001");
        assert!(page.data[0].image.is_some());
        assert!(page.data[2].image.is_none());
        assert!(page.data[0].is_open);
        assert!(!page.data[1].is_open);
    }

    #[tokio::test]
    async fn test_demo_source_status_and_weather() {
        let source = DemoSource::new();
        assert!(source.server_status().await.unwrap().is_online);
        assert!(source.hardware_status().await.unwrap().is_online);

        let weather = source.weather().await.unwrap();
        assert_eq!(weather.label(), "Rain showers");
        assert_eq!(weather.glyph(), "☀⛆");
    }

    #[tokio::test]
    async fn test_pollers_feed_app_state() {
        let source: Arc<dyn DashboardSource> = Arc::new(DemoSource::new());
        let app = Arc::new(Mutex::new(App::new(Duration::from_secs(3))));
        let config = HelmwatchConfig::default();

        let handles = spawn(source, app.clone(), &config);

        // Intervals tick immediately; give the tasks a moment to run.
        tokio::time::sleep(Duration::from_millis(200)).await;

        let app = app.lock().await;
        assert_eq!(app.server, crate::status::StatusLevel::Success);
        assert!(app.weather.is_some());
        assert!(app.logs.is_some());
        assert_eq!(app.total_pages(), 5);

        for handle in handles {
            handle.abort();
        }
    }
}
