//! Status service client: the Server and Hardware pills in the header.

use anyhow::{Context, Result};
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};

/// Backend server status payload from `GET /api/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    pub is_online: bool,
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Server uptime in seconds
    #[serde(default)]
    pub uptime: Option<f64>,
}

impl ServerStatus {
    /// Uptime as a short human-readable string, e.g. `"1d 2h"`.
    #[must_use]
    pub fn format_uptime(&self) -> Option<String> {
        self.uptime.map(format_duration_secs)
    }
}

/// Hardware (door controller) status payload from `GET /api/hardware/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareStatus {
    pub is_online: bool,
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Controller temperature in Celsius
    #[serde(default)]
    pub temperature: Option<f64>,
}

impl HardwareStatus {
    /// Controller temperature as shown next to the pill.
    #[must_use]
    pub fn format_temperature(&self) -> Option<String> {
        self.temperature.map(|t| format!("{t:.1}°C"))
    }
}

/// `86400.0` → `"1d 0h"`, `7500.0` → `"2h 5m"`, `45.0` → `"45s"`.
fn format_duration_secs(secs: f64) -> String {
    let secs = secs.max(0.0) as u64;
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        format!("{secs}s")
    }
}

/// Render state of a header pill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLevel {
    /// Last check succeeded and reported online
    Success,
    /// Last check failed or reported offline
    Error,
    /// No sample yet
    #[default]
    Idle,
}

impl StatusLevel {
    /// Collapse a poll outcome into a pill state. `None` means the fetch
    /// itself failed.
    #[must_use]
    pub fn from_sample(is_online: Option<bool>) -> Self {
        match is_online {
            Some(true) => Self::Success,
            Some(false) | None => Self::Error,
        }
    }

    /// Short text shown next to the pill glyph.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "ONLINE",
            Self::Error => "OFFLINE",
            Self::Idle => "…",
        }
    }
}

/// Client for the status endpoints of the helmet-detection backend.
#[derive(Clone)]
pub struct StatusClient {
    client: ClientWithMiddleware,
    base_url: String,
}

impl StatusClient {
    #[must_use]
    pub fn new(client: ClientWithMiddleware, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch backend server status.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn server_status(&self) -> Result<ServerStatus> {
        let url = format!("{}/api/status", self.base_url);
        let status = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| "Status request failed")?
            .error_for_status()
            .with_context(|| "Status request rejected")?
            .json()
            .await
            .with_context(|| "Failed to parse status response")?;
        Ok(status)
    }

    /// Fetch hardware controller status.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn hardware_status(&self) -> Result<HardwareStatus> {
        let url = format!("{}/api/hardware/status", self.base_url);
        let status = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| "Hardware status request failed")?
            .error_for_status()
            .with_context(|| "Hardware status request rejected")?
            .json()
            .await
            .with_context(|| "Failed to parse hardware status response")?;
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_status_parses_full_payload() {
        let status: ServerStatus = serde_json::from_str(
            r#"{"isOnline": true, "timestamp": "2026-08-30T10:00:00Z", "uptime": 86400.5}"#,
        )
        .unwrap();
        assert!(status.is_online);
        assert_eq!(status.uptime, Some(86400.5));
    }

    #[test]
    fn test_optional_fields_default() {
        let status: ServerStatus = serde_json::from_str(r#"{"isOnline": false}"#).unwrap();
        assert!(!status.is_online);
        assert!(status.timestamp.is_none());
        assert!(status.uptime.is_none());

        let hw: HardwareStatus = serde_json::from_str(r#"{"isOnline": true}"#).unwrap();
        assert!(hw.is_online);
        assert!(hw.temperature.is_none());
    }

    #[test]
    fn test_format_uptime() {
        let status = |uptime| ServerStatus {
            is_online: true,
            timestamp: None,
            uptime,
        };
        assert_eq!(status(None).format_uptime(), None);
        assert_eq!(status(Some(45.0)).format_uptime().unwrap(), "45s");
        assert_eq!(status(Some(305.0)).format_uptime().unwrap(), "5m");
        assert_eq!(status(Some(7_500.0)).format_uptime().unwrap(), "2h 5m");
        assert_eq!(status(Some(90_000.0)).format_uptime().unwrap(), "1d 1h");
        assert_eq!(status(Some(-3.0)).format_uptime().unwrap(), "0s");
    }

    #[test]
    fn test_format_temperature() {
        let hw = HardwareStatus {
            is_online: true,
            timestamp: None,
            temperature: Some(41.52),
        };
        assert_eq!(hw.format_temperature().unwrap(), "41.5°C");
    }

    #[test]
    fn test_status_level_from_sample() {
        assert_eq!(StatusLevel::from_sample(Some(true)), StatusLevel::Success);
        assert_eq!(StatusLevel::from_sample(Some(false)), StatusLevel::Error);
        assert_eq!(StatusLevel::from_sample(None), StatusLevel::Error);
        assert_eq!(StatusLevel::default(), StatusLevel::Idle);
    }
}
