//! Open-Meteo forecast API client.
//!
//! Response structures mirror the documented forecast schema, including the
//! `*_units` blocks: the dashboard renders unit labels verbatim next to the
//! values rather than hardcoding them.

use anyhow::{Context, Result};
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::WeatherConfig;

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,weather_code,wind_speed_10m";
const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,precipitation_probability";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_probability_max";

/// Forecast response from the Open-Meteo API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub generationtime_ms: f64,
    pub utc_offset_seconds: i64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub elevation: f64,
    pub current_units: CurrentUnits,
    pub current: CurrentData,
    pub hourly_units: HourlyUnits,
    pub hourly: HourlyData,
    pub daily_units: DailyUnits,
    pub daily: DailyData,
}

/// Unit labels for the current block, e.g. `"°C"`, `"%"`, `"km/h"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUnits {
    pub time: String,
    pub interval: String,
    pub temperature_2m: String,
    pub relative_humidity_2m: String,
    pub weather_code: String,
    pub wind_speed_10m: String,
}

/// Current weather sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentData {
    /// ISO8601 local time of the sample
    pub time: String,
    /// Sampling interval in seconds
    pub interval: u32,
    pub temperature_2m: f32,
    pub relative_humidity_2m: f32,
    /// WMO weather code
    pub weather_code: u8,
    pub wind_speed_10m: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyUnits {
    pub time: String,
    pub temperature_2m: String,
    pub relative_humidity_2m: String,
    pub precipitation_probability: String,
}

/// Hour-by-hour series; all vectors are index-aligned with `time`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyData {
    pub time: Vec<String>,
    pub temperature_2m: Vec<f32>,
    pub relative_humidity_2m: Vec<f32>,
    pub precipitation_probability: Vec<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyUnits {
    pub time: String,
    pub temperature_2m_max: String,
    pub temperature_2m_min: String,
    pub precipitation_probability_max: String,
}

/// Per-day series; `time` entries are `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyData {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<f32>,
    pub temperature_2m_min: Vec<f32>,
    pub precipitation_probability_max: Vec<f32>,
}

/// Build the forecast request URL for a configured location.
fn forecast_url(config: &WeatherConfig) -> String {
    format!(
        "{}/forecast?latitude={}&longitude={}&current={}&hourly={}&daily={}&timezone={}",
        config.base_url,
        config.latitude,
        config.longitude,
        CURRENT_FIELDS,
        HOURLY_FIELDS,
        DAILY_FIELDS,
        urlencoding::encode(&config.timezone)
    )
}

/// Fetch the forecast for the configured location.
pub async fn fetch_forecast(
    client: &ClientWithMiddleware,
    config: &WeatherConfig,
) -> Result<ForecastResponse> {
    let url = forecast_url(config);
    debug!("Open-Meteo request URL: {}", url);

    let response = client
        .get(&url)
        .send()
        .await
        .with_context(|| "Open-Meteo forecast request failed")?;

    let forecast: ForecastResponse = response
        .error_for_status()
        .with_context(|| "Open-Meteo forecast request rejected")?
        .json()
        .await
        .with_context(|| "Failed to parse Open-Meteo forecast response")?;

    Ok(forecast)
}
