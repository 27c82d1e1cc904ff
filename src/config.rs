use std::path::Path;

use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the timetable provider.
    #[serde(default = "Config::default_provider_url")]
    pub provider_url: String,
    /// Bind address of the control-plane listener.
    #[serde(default = "Config::default_listen_addr")]
    pub listen_addr: String,
    /// Seconds slept after each fetch attempt, failed ones included.
    #[serde(default = "Config::default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Milliseconds between presented frames.
    #[serde(default = "Config::default_render_tick_ms")]
    pub render_tick_ms: u64,
    /// Startup brightness, 0-100.
    #[serde(default = "Config::default_brightness")]
    pub brightness: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider_url: Self::default_provider_url(),
            listen_addr: Self::default_listen_addr(),
            poll_interval_secs: Self::default_poll_interval_secs(),
            render_tick_ms: Self::default_render_tick_ms(),
            brightness: Self::default_brightness(),
        }
    }
}

impl Config {
    fn default_provider_url() -> String {
        "http://10.0.0.164:3000".to_string()
    }
    fn default_listen_addr() -> String {
        "0.0.0.0:8080".to_string()
    }
    fn default_poll_interval_secs() -> u64 {
        30
    }
    fn default_render_tick_ms() -> u64 {
        1000
    }
    fn default_brightness() -> u8 {
        80
    }

    /// Load from a YAML file. A missing file means defaults; the daemon has
    /// to come up on a freshly flashed device with no config present.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path.as_ref()) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.as_ref().display(), "Config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::ReadError(e.to_string())),
        };

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.brightness > 100 {
            return Err(ConfigError::InvalidBrightness(self.brightness));
        }
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidInterval);
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse config: {0}")]
    ParseError(String),
    #[error("Brightness {0} outside 0-100")]
    InvalidBrightness(u8),
    #[error("Poll interval must be at least one second")]
    InvalidInterval,
}
