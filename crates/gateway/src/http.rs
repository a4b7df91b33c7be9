//! Read-only HTTP view of the capture slot for downstream consumers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::capture::{Capture, CaptureStats, Received};

#[derive(Debug, Serialize, PartialEq)]
pub struct ReadingView {
    pub location_id: u8,
    pub temperature: f32,
    pub humidity: f32,
    pub pressure: f32,
    pub valid: bool,
    pub from: String,
}

impl From<Received> for ReadingView {
    fn from(received: Received) -> Self {
        let reading = received.reading;
        Self {
            location_id: reading.location_id,
            temperature: reading.temperature,
            humidity: reading.humidity,
            pressure: reading.pressure,
            valid: reading.is_valid(),
            from: received.from.to_string(),
        }
    }
}

pub fn router(capture: Arc<Capture>) -> Router {
    Router::new()
        .route("/reading", get(reading))
        .route("/stats", get(stats))
        .with_state(capture)
}

async fn reading(State(capture): State<Arc<Capture>>) -> Result<Json<ReadingView>, StatusCode> {
    capture
        .latest()
        .map(|received| Json(received.into()))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn stats(State(capture): State<Arc<Capture>>) -> Json<CaptureStats> {
    Json(capture.stats())
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use protocol::{encode, PeerAddress, SensorReading};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    async fn fetch(app: Router, uri: &str) -> (StatusCode, Option<Value>) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).ok())
    }

    const NODE: PeerAddress = PeerAddress::new(0xd8, 0xbf, 0xc0, 0xc7, 0xb4, 0x00);

    #[tokio::test]
    async fn not_found_before_first_reading() {
        let capture = Arc::new(Capture::new());
        let response = reading(State(capture)).await;
        assert_eq!(response.unwrap_err(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn serves_latest_reading() {
        let capture = Arc::new(Capture::new());
        capture
            .on_datagram(NODE, &encode(&SensorReading::new(1, 23.5, 51.5, 1008.0)))
            .unwrap();

        let Json(view) = reading(State(capture.clone())).await.unwrap();
        assert_eq!(
            view,
            ReadingView {
                location_id: 1,
                temperature: 23.5,
                humidity: 51.5,
                pressure: 1008.0,
                valid: true,
                from: NODE.to_string(),
            }
        );

        let Json(counters) = stats(State(capture)).await;
        assert_eq!(counters.accepted, 1);
        assert_eq!(counters.rejected, 0);
    }

    #[test]
    fn failed_sample_serializes_as_invalid() {
        let view = ReadingView::from(Received {
            reading: SensorReading::invalid(4),
            from: NODE,
        });

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["valid"], false);
        assert!(json["temperature"].is_null());
        assert_eq!(json["location_id"], 4);
    }

    #[tokio::test]
    async fn routes_serve_the_slot_and_counters() {
        let capture = Arc::new(Capture::new());
        let app = router(capture.clone());

        let (status, _) = fetch(app.clone(), "/reading").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        capture
            .on_datagram(NODE, &encode(&SensorReading::new(2, 22.0, 50.0, 1009.0)))
            .unwrap();
        capture.on_datagram(NODE, &[0; 11]).unwrap_err();

        let (status, body) = fetch(app.clone(), "/reading").await;
        assert_eq!(status, StatusCode::OK);
        let body = body.unwrap();
        assert_eq!(body["location_id"], 2);
        assert_eq!(body["valid"], true);
        assert_eq!(body["from"], NODE.to_string());

        let (status, body) = fetch(app.clone(), "/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.unwrap(), serde_json::json!({ "accepted": 1, "rejected": 1 }));

        let (status, _) = fetch(app, "/readings").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
