use flight_risk::prediction::{DelayRiskEstimator, FlightSummary, PredictionResult};
use metrics_exporter_prometheus::PrometheusHandle;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Shared handle for prediction handlers. Each request builds its own RNG.
#[derive(Clone, Default)]
pub(crate) struct PredictionState {
    pub(crate) estimator: DelayRiskEstimator,
    pub(crate) seed: Option<u64>,
}

impl PredictionState {
    pub(crate) fn new(seed: Option<u64>) -> Self {
        Self {
            estimator: DelayRiskEstimator::new(),
            seed,
        }
    }

    pub(crate) fn rng(&self) -> StdRng {
        request_rng(self.seed)
    }
}

pub(crate) fn request_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PredictionResponse {
    pub(crate) flight: FlightSummary,
    pub(crate) prediction: PredictionResult,
}
