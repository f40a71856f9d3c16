//! Weather widget data: cache-backed Open-Meteo polling and day/night
//! detection for icon selection.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};
use sunrise::{Coordinates, SolarDay, SolarEvent};

use crate::config::WeatherConfig;
use crate::{cache, wmo};

pub mod open_meteo;

pub use open_meteo::ForecastResponse;

/// The shape the weather panel renders: the current sample plus the unit
/// labels and the icon inputs derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Current temperature
    pub temperature: f32,
    /// Unit label from the API, e.g. `"°C"`
    pub temperature_unit: String,
    /// Relative humidity in percent
    pub humidity: f32,
    /// Wind speed
    pub wind_speed: f32,
    /// Unit label from the API, e.g. `"km/h"`
    pub wind_speed_unit: String,
    /// WMO weather code of the current sample
    pub weather_code: u8,
    /// Local ISO8601 time of the sample, rendered on the update badge
    pub sample_time: String,
    /// Whether the site is currently between sunset and sunrise
    pub is_night: bool,
}

impl WeatherSnapshot {
    /// Build a snapshot from a forecast response.
    #[must_use]
    pub fn from_response(response: &ForecastResponse, is_night: bool) -> Self {
        Self {
            temperature: response.current.temperature_2m,
            temperature_unit: response.current_units.temperature_2m.clone(),
            humidity: response.current.relative_humidity_2m,
            wind_speed: response.current.wind_speed_10m,
            wind_speed_unit: response.current_units.wind_speed_10m.clone(),
            weather_code: response.current.weather_code,
            sample_time: response.current.time.clone(),
            is_night,
        }
    }

    /// Terminal glyph for the current condition.
    #[must_use]
    pub fn glyph(&self) -> &'static str {
        wmo::glyph_for_code(self.weather_code, self.is_night)
    }

    /// Condition group label, e.g. "Rain showers".
    #[must_use]
    pub fn label(&self) -> &'static str {
        wmo::label_for_code(self.weather_code)
    }

    /// Fine-grained description, e.g. "Moderate rain showers".
    #[must_use]
    pub fn description(&self) -> &'static str {
        wmo::describe_code(self.weather_code)
    }

    /// Format temperature with the API's unit label.
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}{}", self.temperature, self.temperature_unit)
    }
}

/// Sunrise and sunset (UTC) at the configured site for a date. Errors on a
/// polar day or night, where one of the events does not happen.
pub fn sunrise_sunset(
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let coordinates = Coordinates::new(latitude, longitude)
        .with_context(|| format!("Invalid coordinates: lat={latitude}, lng={longitude}"))?;

    let solar_day = SolarDay::new(coordinates, date);
    let sunrise = solar_day
        .event_time(SolarEvent::Sunrise)
        .with_context(|| format!("No sunrise at lat={latitude} on {date}"))?;
    let sunset = solar_day
        .event_time(SolarEvent::Sunset)
        .with_context(|| format!("No sunset at lat={latitude} on {date}"))?;

    Ok((sunrise, sunset))
}

/// Whether `now` falls outside daylight at the configured site. Errors,
/// including the polar case where an event is missing, degrade to `false`
/// so the widget still renders a day icon.
#[must_use]
pub fn is_night_at(latitude: f64, longitude: f64, now: DateTime<Utc>) -> bool {
    match sunrise_sunset(latitude, longitude, now.date_naive()) {
        Ok((sunrise, sunset)) => now < sunrise || now > sunset,
        Err(_) => false,
    }
}

/// Cache key for one site, rounded so nearby float noise shares an entry.
fn cache_key(config: &WeatherConfig) -> String {
    format!("weather:{:.2}:{:.2}", config.latitude, config.longitude)
}

/// Current conditions for the configured site, served from the TTL cache
/// when the last sample is still inside the staleness window.
pub async fn current_snapshot(
    client: &ClientWithMiddleware,
    config: &WeatherConfig,
    ttl: Duration,
) -> Result<WeatherSnapshot> {
    let key = cache_key(config);

    let response = if let Some(cached) = cached_response(&key).await {
        tracing::debug!("Weather served from cache");
        cached
    } else {
        let fetched = open_meteo::fetch_forecast(client, config).await?;
        store_response(&key, &fetched, ttl).await;
        fetched
    };

    let is_night = is_night_at(config.latitude, config.longitude, Utc::now());
    Ok(WeatherSnapshot::from_response(&response, is_night))
}

/// Cache read that treats any failure, including an unopened cache
/// database, as a miss.
async fn cached_response(key: &str) -> Option<ForecastResponse> {
    match cache::get::<ForecastResponse>(key).await {
        Ok(cached) => cached,
        Err(e) => {
            tracing::debug!("Weather cache read failed, fetching fresh: {e:#}");
            None
        }
    }
}

/// Cache write that logs and moves on when the cache is unavailable.
async fn store_response(key: &str, response: &ForecastResponse, ttl: Duration) {
    if let Err(e) = cache::put(key, response.clone(), ttl).await {
        tracing::debug!("Weather cache write failed: {e:#}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_response() -> ForecastResponse {
        serde_json::from_str(
            r#"{
                "latitude": 13.75, "longitude": 100.75, "generationtime_ms": 0.2,
                "utc_offset_seconds": 25200, "timezone": "Asia/Bangkok",
                "timezone_abbreviation": "GMT+7", "elevation": 3.0,
                "current_units": {
                    "time": "iso8601", "interval": "seconds", "temperature_2m": "°C",
                    "relative_humidity_2m": "%", "weather_code": "wmo code",
                    "wind_speed_10m": "km/h"
                },
                "current": {
                    "time": "2026-08-30T14:30", "interval": 900, "temperature_2m": 31.4,
                    "relative_humidity_2m": 66.0, "weather_code": 0, "wind_speed_10m": 9.7
                },
                "hourly_units": {
                    "time": "iso8601", "temperature_2m": "°C",
                    "relative_humidity_2m": "%", "precipitation_probability": "%"
                },
                "hourly": {
                    "time": [], "temperature_2m": [], "relative_humidity_2m": [],
                    "precipitation_probability": []
                },
                "daily_units": {
                    "time": "iso8601", "temperature_2m_max": "°C",
                    "temperature_2m_min": "°C", "precipitation_probability_max": "%"
                },
                "daily": {
                    "time": [], "temperature_2m_max": [], "temperature_2m_min": [],
                    "precipitation_probability_max": []
                }
            }"#,
        )
        .expect("sample response should parse")
    }

    #[test]
    fn test_snapshot_from_response() {
        let snapshot = WeatherSnapshot::from_response(&sample_response(), false);
        assert_eq!(snapshot.weather_code, 0);
        assert_eq!(snapshot.label(), "Clear sky");
        assert_eq!(snapshot.glyph(), "☀");
        assert_eq!(snapshot.format_temperature(), "31.4°C");
        assert_eq!(snapshot.sample_time, "2026-08-30T14:30");
    }

    #[test]
    fn test_snapshot_night_selects_night_glyph() {
        let snapshot = WeatherSnapshot::from_response(&sample_response(), true);
        assert_eq!(snapshot.glyph(), "☾");
        // Label does not vary with day/night
        assert_eq!(snapshot.label(), "Clear sky");
    }

    #[test]
    fn test_is_night_at_bangkok() {
        // 18:00 UTC is 01:00 in Bangkok, well after sunset
        let night = Utc.with_ymd_and_hms(2026, 8, 30, 18, 0, 0).unwrap();
        assert!(is_night_at(13.73, 100.75, night));

        // 05:00 UTC is midday in Bangkok
        let day = Utc.with_ymd_and_hms(2026, 8, 30, 5, 0, 0).unwrap();
        assert!(!is_night_at(13.73, 100.75, day));
    }

    #[test]
    fn test_sunrise_sunset_present_at_tropics() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let (sunrise, sunset) = sunrise_sunset(13.73, 100.75, date).unwrap();
        assert!(sunrise < sunset);
    }

    #[test]
    fn test_sunrise_sunset_errors_during_polar_night() {
        // Svalbard in late December: the sun never rises
        let date = NaiveDate::from_ymd_opt(2026, 12, 21).unwrap();
        assert!(sunrise_sunset(78.22, 15.65, date).is_err());
    }

    #[test]
    fn test_is_night_at_degrades_to_day_during_polar_night() {
        let noon = Utc.with_ymd_and_hms(2026, 12, 21, 12, 0, 0).unwrap();
        assert!(!is_night_at(78.22, 15.65, noon));
    }

    #[tokio::test]
    async fn test_cached_response_treats_unopened_cache_as_miss() {
        // No cache::init in this process, so reads hit the uninitialized
        // global and must fall through to a fetch rather than error.
        assert!(cached_response("weather:13.73:100.75").await.is_none());
    }

    #[tokio::test]
    async fn test_store_response_tolerates_unopened_cache() {
        store_response(
            "weather:13.73:100.75",
            &sample_response(),
            Duration::from_secs(60),
        )
        .await;
    }

    #[test]
    fn test_cache_key_rounds_coordinates() {
        let config = WeatherConfig {
            latitude: 13.7312,
            longitude: 100.7489,
            ..WeatherConfig::default()
        };
        assert_eq!(cache_key(&config), "weather:13.73:100.75");
    }
}
