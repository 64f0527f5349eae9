//! Rule-based flight delay risk estimation.
//!
//! The estimator walks a fixed sequence of factors (carrier, airports, departure window,
//! season, aircraft, weather, weekday) over a running risk value, caps it, and derives the
//! traveller-facing prediction. The only nondeterminism is the caller-supplied random source.

mod domain;
mod rules;
mod tables;

#[cfg(test)]
mod tests;

pub use domain::{
    FlightAttributes, FlightSubmission, FlightSummary, PredictionResult, RiskLevel, Season,
    SubmissionError, ValidatedFlight,
};
pub use tables::{ReferenceTables, TimeOfDay, AIRCRAFT_TYPES};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

const MAX_DELAY_PROBABILITY: f64 = 0.95;
const DELAY_THRESHOLD: f64 = 0.4;
const BASE_DELAY_MINUTES: f64 = 15.0;
const DELAY_MINUTES_PER_PROBABILITY: f64 = 60.0;
const DELAY_JITTER_MINUTES: f64 = 30.0;
const CONFIDENCE_FLOOR: f64 = 0.75;
const CONFIDENCE_SPAN: f64 = 0.2;
const MAX_FACTORS: usize = 4;
const FALLBACK_FACTOR: &str = "Standard operational conditions";

/// Input dimension a component adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactorKind {
    Airline,
    Origin,
    Destination,
    TimeOfDay,
    Season,
    Aircraft,
    Weather,
    DayOfWeek,
}

/// How a component moved the running risk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorEffect {
    Added(f64),
    Scaled(f64),
}

impl FactorEffect {
    pub fn apply(self, risk: f64) -> f64 {
        match self {
            FactorEffect::Added(amount) => risk + amount,
            FactorEffect::Scaled(factor) => risk * factor,
        }
    }
}

/// Discrete adjustment to the running risk, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskComponent {
    pub factor: RiskFactorKind,
    pub effect: FactorEffect,
    pub note: Option<String>,
}

/// Prediction plus the full adjustment trail that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub prediction: PredictionResult,
    pub components: Vec<RiskComponent>,
    pub uncapped_risk: f64,
}

/// Stateless estimator over the process-wide reference tables.
#[derive(Debug, Clone, Copy)]
pub struct DelayRiskEstimator {
    tables: &'static ReferenceTables,
}

impl Default for DelayRiskEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayRiskEstimator {
    pub fn new() -> Self {
        Self {
            tables: ReferenceTables::standard(),
        }
    }

    pub fn tables(&self) -> &'static ReferenceTables {
        self.tables
    }

    pub fn predict<R: Rng + ?Sized>(
        &self,
        attributes: &FlightAttributes,
        rng: &mut R,
    ) -> PredictionResult {
        self.assess(attributes, rng).prediction
    }

    /// Scores the flight and keeps every intermediate adjustment.
    ///
    /// Draws from `rng` in a fixed order: weather, then the delay jitter (only
    /// when the flight is predicted late), then confidence.
    pub fn assess<R: Rng + ?Sized>(
        &self,
        attributes: &FlightAttributes,
        rng: &mut R,
    ) -> RiskAssessment {
        let (components, uncapped_risk) = rules::score_attributes(attributes, self.tables, rng);

        let delay_probability = uncapped_risk.min(MAX_DELAY_PROBABILITY);
        let is_delayed = delay_probability > DELAY_THRESHOLD;
        let estimated_delay = if is_delayed {
            let minutes = BASE_DELAY_MINUTES
                + delay_probability * DELAY_MINUTES_PER_PROBABILITY
                + rng.gen::<f64>() * DELAY_JITTER_MINUTES;
            minutes.round() as u32
        } else {
            0
        };
        let risk_level = RiskLevel::from_probability(delay_probability);
        let confidence = CONFIDENCE_FLOOR + rng.gen::<f64>() * CONFIDENCE_SPAN;

        let mut factors: Vec<String> = components
            .iter()
            .filter_map(|component| component.note.clone())
            .take(MAX_FACTORS)
            .collect();
        if factors.is_empty() {
            factors.push(FALLBACK_FACTOR.to_string());
        }

        debug!(
            airline = %attributes.airline,
            origin = %attributes.origin_code,
            destination = %attributes.destination_code,
            uncapped_risk,
            delay_probability,
            risk_level = risk_level.label(),
            "flight delay risk assessed"
        );

        RiskAssessment {
            prediction: PredictionResult {
                delay_probability,
                is_delayed,
                estimated_delay,
                confidence,
                risk_level,
                factors,
            },
            components,
            uncapped_risk,
        }
    }
}
