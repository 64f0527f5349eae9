use chrono::NaiveDate;
use rand::rngs::mock::StepRng;

use crate::prediction::FlightAttributes;

/// Every draw is exactly 0.0.
pub(super) fn floor_rng() -> StepRng {
    StepRng::new(0, 0)
}

/// Every draw sits just below 1.0.
pub(super) fn ceiling_rng() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn wednesday() -> NaiveDate {
    date(2025, 10, 15)
}

pub(super) fn attributes(
    airline: &str,
    origin: &str,
    destination: &str,
    departure_time: &str,
) -> FlightAttributes {
    FlightAttributes {
        airline: airline.to_string(),
        origin_code: origin.to_string(),
        destination_code: destination.to_string(),
        departure_date: wednesday(),
        departure_time: departure_time.to_string(),
        aircraft_type: "Boeing 737".to_string(),
        season: "Spring".to_string(),
    }
}

/// Alaska PHX -> LAS on a Wednesday morning in the fall on a 787.
pub(super) fn alaska_midweek() -> FlightAttributes {
    FlightAttributes {
        aircraft_type: "Boeing 787".to_string(),
        season: "Fall".to_string(),
        ..attributes("Alaska Airlines", "PHX", "LAS", "10:00")
    }
}

/// Spirit ORD -> EWR on a Friday evening rush in winter on a regional jet.
pub(super) fn spirit_winter_friday() -> FlightAttributes {
    FlightAttributes {
        departure_date: date(2025, 10, 17),
        aircraft_type: "Regional Jet".to_string(),
        season: "Winter".to_string(),
        ..attributes("Spirit Airlines", "ORD", "EWR", "17:30")
    }
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
