use crate::infra::{AppState, PredictionResponse, PredictionState};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use flight_risk::error::AppError;
use flight_risk::prediction::{FlightSubmission, ReferenceTables};
use serde_json::json;
use tracing::{info, warn};

pub(crate) fn with_prediction_routes(state: PredictionState) -> Router {
    Router::new()
        .route("/api/v1/predictions", post(prediction_endpoint))
        .route("/api/v1/reference", get(reference_endpoint))
        .with_state(state)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn prediction_endpoint(
    State(state): State<PredictionState>,
    Json(submission): Json<FlightSubmission>,
) -> Result<Json<PredictionResponse>, AppError> {
    let validated = submission.validate().map_err(|err| {
        warn!(%err, "rejected flight submission");
        AppError::from(err)
    })?;

    let mut rng = state.rng();
    let prediction = state.estimator.predict(&validated.attributes, &mut rng);

    info!(
        route = %validated.summary.route,
        flight = %validated.summary.flight_number,
        probability = prediction.delay_probability,
        risk_level = prediction.risk_level.label(),
        "delay prediction served"
    );

    Ok(Json(PredictionResponse {
        flight: validated.summary,
        prediction,
    }))
}

pub(crate) async fn reference_endpoint(
    State(state): State<PredictionState>,
) -> Json<&'static ReferenceTables> {
    Json(state.estimator.tables())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use flight_risk::prediction::RiskLevel;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn submission() -> FlightSubmission {
        FlightSubmission {
            airline: "Alaska Airlines".to_string(),
            flight_number: None,
            origin: "PHX".to_string(),
            destination: "LAS".to_string(),
            departure_date: "2025-10-15".to_string(),
            departure_time: "10:00".to_string(),
            aircraft_type: "Boeing 787".to_string(),
            season: "Fall".to_string(),
        }
    }

    #[tokio::test]
    async fn prediction_endpoint_returns_summary_and_prediction() {
        let state = PredictionState::new(Some(11));

        let Json(body) = prediction_endpoint(State(state), Json(submission()))
            .await
            .expect("prediction builds");

        assert_eq!(body.flight.route, "PHX → LAS");
        assert_eq!(body.flight.flight_number, "N/A");
        assert!(body.prediction.delay_probability > 0.32);
        assert!(body.prediction.delay_probability <= 0.95);
        assert_eq!(
            body.prediction.risk_level,
            RiskLevel::from_probability(body.prediction.delay_probability)
        );
        assert!(body
            .prediction
            .factors
            .contains(&"Modern aircraft with high reliability".to_string()));
    }

    #[tokio::test]
    async fn seeded_state_repeats_predictions() {
        let state = PredictionState::new(Some(99));

        let Json(first) = prediction_endpoint(State(state.clone()), Json(submission()))
            .await
            .expect("prediction builds");
        let Json(second) = prediction_endpoint(State(state), Json(submission()))
            .await
            .expect("prediction builds");

        assert_eq!(first.prediction, second.prediction);
    }

    #[tokio::test]
    async fn prediction_endpoint_rejects_missing_fields() {
        let mut incomplete = submission();
        incomplete.departure_time = " ".to_string();

        let err = prediction_endpoint(State(PredictionState::default()), Json(incomplete))
            .await
            .expect_err("departure time is required");

        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn router_serves_predictions_over_http() {
        let app = with_prediction_routes(PredictionState::new(Some(5)));
        let payload = serde_json::to_vec(&submission()).expect("serializes");

        let response = app
            .oneshot(
                Request::post("/api/v1/predictions")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["flight"]["airline"], "Alaska Airlines");
        assert!(body["prediction"]["delayProbability"].is_number());
        assert!(body["prediction"]["factors"].is_array());
    }

    #[tokio::test]
    async fn router_rejects_incomplete_submissions() {
        let app = with_prediction_routes(PredictionState::default());
        let payload = json!({ "airline": "Delta Air Lines", "origin": "ATL" });

        let response = app
            .oneshot(
                Request::post("/api/v1/predictions")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .contains("destination"));
    }

    #[tokio::test]
    async fn reference_endpoint_lists_tables() {
        let Json(tables) = reference_endpoint(State(PredictionState::default())).await;
        assert_eq!(tables.airport_risk.get("ORD"), Some(&0.35));
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };

        let response = readiness_endpoint(Extension(state.clone()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        state
            .readiness
            .store(true, std::sync::atomic::Ordering::Release);
        let response = readiness_endpoint(Extension(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
