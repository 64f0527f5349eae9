use super::common::*;
use crate::prediction::{FlightSubmission, RiskLevel, Season, SubmissionError};

fn submission() -> FlightSubmission {
    FlightSubmission {
        airline: "Alaska Airlines".to_string(),
        flight_number: Some("AS 1234".to_string()),
        origin: "phx".to_string(),
        destination: " las ".to_string(),
        departure_date: "2025-10-15".to_string(),
        departure_time: "10:00".to_string(),
        aircraft_type: "Boeing 787".to_string(),
        season: "Fall".to_string(),
    }
}

#[test]
fn validated_submission_matches_attribute_fixture() {
    let validated = submission().validate().expect("submission is complete");

    assert_eq!(validated.attributes, alaska_midweek());
    assert_eq!(validated.summary.airline, "Alaska Airlines");
    assert_eq!(validated.summary.flight_number, "AS 1234");
    assert_eq!(validated.summary.route, "PHX → LAS");
}

#[test]
fn blank_required_fields_are_rejected_in_form_order() {
    let mut incomplete = submission();
    incomplete.destination = "  ".to_string();
    incomplete.departure_time = String::new();

    let err = incomplete.validate().expect_err("destination is blank");

    assert_eq!(
        err,
        SubmissionError::MissingField {
            field: "destination"
        }
    );
    assert!(err
        .to_string()
        .contains("please fill in all required flight details"));
}

#[test]
fn optional_fields_may_be_blank() {
    let mut minimal = submission();
    minimal.flight_number = None;
    minimal.aircraft_type = String::new();
    minimal.season = String::new();

    let validated = minimal.validate().expect("optional fields are optional");

    assert_eq!(validated.summary.flight_number, "N/A");
    assert!(validated.attributes.aircraft_type.is_empty());
}

#[test]
fn unparseable_dates_are_rejected() {
    let mut bad_date = submission();
    bad_date.departure_date = "15/10/2025".to_string();

    match bad_date.validate() {
        Err(SubmissionError::InvalidDate { value }) => assert_eq!(value, "15/10/2025"),
        other => panic!("expected invalid date, got {other:?}"),
    }
}

#[test]
fn submission_accepts_camel_case_json() {
    let payload = r#"{
        "airline": "Delta Air Lines",
        "origin": "ATL",
        "destination": "SEA",
        "departureDate": "2025-10-18",
        "departureTime": "08:30"
    }"#;

    let submission: FlightSubmission = serde_json::from_str(payload).expect("payload parses");

    assert_eq!(submission.departure_time, "08:30");
    assert!(submission.flight_number.is_none());
    assert!(submission.season.is_empty());
}

#[test]
fn season_names_must_match_exactly() {
    assert_eq!(Season::parse("Winter"), Some(Season::Winter));
    assert_eq!(Season::parse("Fall"), Some(Season::Fall));
    assert_eq!(Season::parse("winter"), None);
    assert_eq!(Season::parse("WINTER"), None);
    assert_eq!(Season::parse(" Fall "), None);
    assert_eq!(Season::parse("Autumn"), None);
}

#[test]
fn risk_levels_partition_probability_range() {
    assert_eq!(RiskLevel::from_probability(0.0), RiskLevel::Low);
    assert_eq!(RiskLevel::from_probability(0.2999), RiskLevel::Low);
    assert_eq!(RiskLevel::from_probability(0.3), RiskLevel::Medium);
    assert_eq!(RiskLevel::from_probability(0.5999), RiskLevel::Medium);
    assert_eq!(RiskLevel::from_probability(0.6), RiskLevel::High);
    assert_eq!(RiskLevel::from_probability(0.95), RiskLevel::High);
    assert_eq!(RiskLevel::High.badge(), "HIGH RISK");
}

#[test]
fn prediction_serializes_with_camel_case_keys() {
    let estimator = crate::prediction::DelayRiskEstimator::new();
    let prediction = estimator.predict(&alaska_midweek(), &mut floor_rng());

    let json = serde_json::to_value(&prediction).expect("serializes");

    assert_eq!(json["isDelayed"], false);
    assert_eq!(json["estimatedDelay"], 0);
    assert_eq!(json["riskLevel"], "medium");
    assert_eq!(prediction.probability_percent(), 33);
    assert_eq!(prediction.confidence_percent(), 75);
    assert_eq!(
        prediction.summary(),
        "medium risk: 33% chance of delay, expected on time"
    );
}
