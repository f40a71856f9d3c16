//! Error types and handling for the `helmwatch` dashboard

use thiserror::Error;

/// Main error type for the `helmwatch` application
#[derive(Error, Debug)]
pub enum HelmwatchError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Status/log service or weather API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Terminal setup/teardown errors
    #[error("Terminal error: {source}")]
    Terminal {
        #[from]
        source: std::io::Error,
    },
}

impl HelmwatchError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message, suitable for the widgets. The
    /// full chain goes to the log file instead.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            HelmwatchError::Config { .. } => {
                "Configuration error. Please check your config file and endpoint URLs.".to_string()
            }
            HelmwatchError::Api { .. } => {
                "Unable to reach the monitoring services. Please check your internet connection."
                    .to_string()
            }
            HelmwatchError::Terminal { .. } => {
                "Terminal operation failed. Try running in a regular terminal emulator.".to_string()
            }
        }
    }
}
