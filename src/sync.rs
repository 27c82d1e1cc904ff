use std::time::Duration;

use tracing::{error, info};

use crate::providers::timetable::TimetableClient;
use crate::state::StateHandle;

/// Background poller that keeps the published timetable snapshot fresh.
///
/// Cadence is fixed-delay: the full interval is slept after every attempt,
/// failed ones included. No backoff, no jitter.
pub struct Poller {
    client: TimetableClient,
    state: StateHandle,
    interval: Duration,
}

impl Poller {
    pub fn new(client: TimetableClient, state: StateHandle, interval: Duration) -> Self {
        Self {
            client,
            state,
            interval,
        }
    }

    pub async fn run(self) {
        info!(interval_secs = self.interval.as_secs(), "Starting timetable poller");

        loop {
            self.poll_once().await;
            tokio::time::sleep(self.interval).await;
        }
    }

    /// One fetch attempt. Success publishes a fresh snapshot; failure is
    /// logged and leaves the previous snapshot (or "no data yet") in place.
    /// The render path never sees a fetch failure as an error.
    pub async fn poll_once(&self) {
        match self.client.fetch().await {
            Ok(timetable) => {
                info!(trips = timetable.trips.len(), "Fetched timetable");
                self.state.publish_timetable(timetable);
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch timetable, keeping previous snapshot");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;

    use crate::state::SharedState;

    const FIXTURE: &str = r#"{
        "trips": [
            {
                "line": "U1",
                "direction": "Airport",
                "foot_minutes_to_station": 6,
                "departures": [
                    {"countdown": 4, "real_time": true, "late": false, "traffic_jam": false}
                ]
            }
        ]
    }"#;

    /// Serve `app` on a loopback port and return its base URL.
    async fn spawn_provider(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn successful_fetch_publishes_snapshot() {
        let app = Router::new().route(
            "/timetable",
            get(|| async {
                (
                    [("content-type", "application/json")],
                    FIXTURE,
                )
            }),
        );
        let base_url = spawn_provider(app).await;

        let state = Arc::new(SharedState::new(80));
        let poller = Poller::new(
            TimetableClient::new(&base_url).unwrap(),
            state.clone(),
            Duration::from_secs(30),
        );

        poller.poll_once().await;

        let snapshot = state.timetable().expect("snapshot published");
        assert_eq!(snapshot.trips[0].line, "U1");
        assert!(state.last_fetch().is_some());
    }

    #[tokio::test]
    async fn error_status_keeps_previous_snapshot() {
        let app = Router::new().route(
            "/timetable",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base_url = spawn_provider(app).await;

        let state = Arc::new(SharedState::new(80));
        let poller = Poller::new(
            TimetableClient::new(&base_url).unwrap(),
            state.clone(),
            Duration::from_secs(30),
        );

        // Seed a previous snapshot, then fail a fetch.
        let previous: crate::providers::timetable::Timetable =
            serde_json::from_str(FIXTURE).unwrap();
        state.publish_timetable(previous.clone());

        poller.poll_once().await;

        assert_eq!(*state.timetable().unwrap(), previous);
    }

    #[tokio::test]
    async fn malformed_payload_keeps_previous_snapshot() {
        let app = Router::new().route("/timetable", get(|| async { "not json at all" }));
        let base_url = spawn_provider(app).await;

        let state = Arc::new(SharedState::new(80));
        let poller = Poller::new(
            TimetableClient::new(&base_url).unwrap(),
            state.clone(),
            Duration::from_secs(30),
        );

        poller.poll_once().await;
        assert!(state.timetable().is_none());
    }

    #[tokio::test]
    async fn unreachable_provider_leaves_no_data_state() {
        // Grab a port that nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let state = Arc::new(SharedState::new(80));
        let poller = Poller::new(
            TimetableClient::new(&format!("http://{}", addr)).unwrap(),
            state.clone(),
            Duration::from_secs(30),
        );

        poller.poll_once().await;
        assert!(state.timetable().is_none());
    }
}
