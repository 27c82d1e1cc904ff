use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimetableError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Provider returned status {0}")]
    Status(u16),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A single upcoming departure on a trip.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Departure {
    /// Per-departure direction override; rarely set by the provider.
    #[serde(default)]
    pub direction: Option<String>,
    /// Minutes until departure, 0 meaning "departing now".
    pub countdown: i32,
    pub real_time: bool,
    pub late: bool,
    pub traffic_jam: bool,
}

/// A line serving the station, with its upcoming departures in provider order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Trip {
    pub line: String,
    pub direction: String,
    pub foot_minutes_to_station: i32,
    pub departures: Vec<Departure>,
}

/// One complete fetch from the provider. Never mutated in place; the poller
/// replaces the whole snapshot on each successful fetch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Timetable {
    pub trips: Vec<Trip>,
    /// Advisory text from the provider. Parsed but not currently rendered.
    #[serde(default)]
    pub message: Option<String>,
}

/// HTTP client for the remote timetable provider.
pub struct TimetableClient {
    client: Client,
    base_url: String,
}

impl TimetableClient {
    pub fn new(base_url: &str) -> Result<Self, TimetableError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| TimetableError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch and parse the current timetable. Any non-success status counts
    /// as a fetch failure.
    pub async fn fetch(&self) -> Result<Timetable, TimetableError> {
        let url = format!("{}/timetable", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TimetableError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TimetableError::Status(response.status().as_u16()));
        }

        response
            .json::<Timetable>()
            .await
            .map_err(|e| TimetableError::Parse(e.to_string()))
    }
}
