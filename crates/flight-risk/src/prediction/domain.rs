use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Travel season selected for the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Exact match on the capitalised season name, as offered in the form.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|season| season.label() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

/// Trip attributes consumed by the estimator. Fields are taken as entered;
/// unknown categories fall back to neutral defaults during scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightAttributes {
    pub airline: String,
    pub origin_code: String,
    pub destination_code: String,
    pub departure_date: NaiveDate,
    pub departure_time: String,
    pub aircraft_type: String,
    pub season: String,
}

/// Coarse bucketing of the delay probability for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_probability(probability: f64) -> Self {
        if probability < 0.3 {
            Self::Low
        } else if probability < 0.6 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    pub fn badge(&self) -> String {
        format!("{} RISK", self.label().to_ascii_uppercase())
    }
}

/// Estimator output handed back to the caller for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub delay_probability: f64,
    pub is_delayed: bool,
    pub estimated_delay: u32,
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub factors: Vec<String>,
}

impl PredictionResult {
    pub fn probability_percent(&self) -> u32 {
        (self.delay_probability * 100.0).round() as u32
    }

    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }

    pub fn summary(&self) -> String {
        if self.is_delayed {
            format!(
                "{} risk: {}% chance of delay, about {} min expected",
                self.risk_level.label(),
                self.probability_percent(),
                self.estimated_delay
            )
        } else {
            format!(
                "{} risk: {}% chance of delay, expected on time",
                self.risk_level.label(),
                self.probability_percent()
            )
        }
    }
}

/// Raw trip details as submitted by a traveller. Every field may be blank;
/// [`FlightSubmission::validate`] enforces the required ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlightSubmission {
    pub airline: String,
    pub flight_number: Option<String>,
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub departure_time: String,
    pub aircraft_type: String,
    pub season: String,
}

/// Display header for a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSummary {
    pub airline: String,
    pub flight_number: String,
    pub route: String,
}

/// A submission that passed intake checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedFlight {
    pub summary: FlightSummary,
    pub attributes: FlightAttributes,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("missing required field `{field}`: please fill in all required flight details")]
    MissingField { field: &'static str },
    #[error("departure date '{value}' is not a YYYY-MM-DD calendar date")]
    InvalidDate { value: String },
}

impl FlightSubmission {
    pub fn validate(self) -> Result<ValidatedFlight, SubmissionError> {
        let required = [
            ("airline", &self.airline),
            ("origin", &self.origin),
            ("destination", &self.destination),
            ("departureDate", &self.departure_date),
            ("departureTime", &self.departure_time),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(SubmissionError::MissingField { field: *field });
        }

        let departure_date = NaiveDate::parse_from_str(self.departure_date.trim(), "%Y-%m-%d")
            .map_err(|_| SubmissionError::InvalidDate {
                value: self.departure_date.clone(),
            })?;

        let airline = self.airline.trim().to_string();
        let origin_code = self.origin.trim().to_ascii_uppercase();
        let destination_code = self.destination.trim().to_ascii_uppercase();
        let flight_number = self
            .flight_number
            .as_deref()
            .map(str::trim)
            .filter(|number| !number.is_empty())
            .unwrap_or("N/A")
            .to_string();

        Ok(ValidatedFlight {
            summary: FlightSummary {
                airline: airline.clone(),
                flight_number,
                route: format!("{origin_code} → {destination_code}"),
            },
            attributes: FlightAttributes {
                airline,
                origin_code,
                destination_code,
                departure_date,
                departure_time: self.departure_time.trim().to_string(),
                aircraft_type: self.aircraft_type,
                season: self.season,
            },
        })
    }
}
