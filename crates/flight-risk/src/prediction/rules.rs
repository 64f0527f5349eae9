use chrono::{Datelike, Weekday};
use rand::Rng;

use super::domain::{FlightAttributes, Season};
use super::tables::{ReferenceTables, TimeOfDay, DEFAULT_AIRLINE_RELIABILITY, DEFAULT_AIRPORT_RISK};
use super::{FactorEffect, RiskComponent, RiskFactorKind};

pub(crate) const BASELINE_RISK: f64 = 0.15;
const AIRLINE_WEIGHT: f64 = 0.5;
const DESTINATION_WEIGHT: f64 = 0.5;
const PEAK_THRESHOLD: f64 = 1.1;
const OFF_PEAK_THRESHOLD: f64 = 0.9;
const MODERN_AIRCRAFT_FACTOR: f64 = 0.9;
const REGIONAL_AIRCRAFT_FACTOR: f64 = 1.15;
const WEATHER_SPAN: f64 = 0.3;
const WEATHER_NOTE_THRESHOLD: f64 = 0.2;
const WEEKEND_FACTOR: f64 = 0.85;
const BUSY_WEEKDAY_FACTOR: f64 = 1.15;

/// Reliability grouping inferred from the free-text aircraft description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AircraftCategory {
    Modern,
    Regional,
    Standard,
}

impl AircraftCategory {
    pub(crate) fn classify(aircraft_type: &str) -> Self {
        if aircraft_type.contains("787") || aircraft_type.contains("A350") {
            Self::Modern
        } else if aircraft_type.contains("Regional") {
            Self::Regional
        } else {
            Self::Standard
        }
    }
}

/// Applies every factor in its fixed order and returns the audit trail with
/// the uncapped running risk. Consumes exactly one draw from `rng`.
pub(crate) fn score_attributes<R: Rng + ?Sized>(
    attributes: &FlightAttributes,
    tables: &ReferenceTables,
    rng: &mut R,
) -> (Vec<RiskComponent>, f64) {
    let mut components = Vec::with_capacity(8);
    let mut risk = BASELINE_RISK;

    let mut apply = |factor: RiskFactorKind, effect: FactorEffect, note: Option<String>| {
        risk = effect.apply(risk);
        components.push(RiskComponent {
            factor,
            effect,
            note,
        });
    };

    let reliability = tables
        .airline_reliability(&attributes.airline)
        .unwrap_or(DEFAULT_AIRLINE_RELIABILITY);
    apply(
        RiskFactorKind::Airline,
        FactorEffect::Added((1.0 - reliability) * AIRLINE_WEIGHT),
        (reliability < DEFAULT_AIRLINE_RELIABILITY)
            .then(|| format!("{} has higher historical delay rates", attributes.airline)),
    );

    let origin_risk = tables
        .airport_risk(&attributes.origin_code)
        .unwrap_or(DEFAULT_AIRPORT_RISK);
    apply(
        RiskFactorKind::Origin,
        FactorEffect::Added(origin_risk),
        (origin_risk > DEFAULT_AIRPORT_RISK).then(|| {
            format!(
                "{} airport experiences frequent delays",
                airport_label(&attributes.origin_code)
            )
        }),
    );

    let destination_risk = tables
        .airport_risk(&attributes.destination_code)
        .unwrap_or(DEFAULT_AIRPORT_RISK);
    apply(
        RiskFactorKind::Destination,
        FactorEffect::Added(destination_risk * DESTINATION_WEIGHT),
        (destination_risk > DEFAULT_AIRPORT_RISK).then(|| {
            format!(
                "{} airport has congestion issues",
                airport_label(&attributes.destination_code)
            )
        }),
    );

    let bucket = TimeOfDay::from_departure_time(&attributes.departure_time);
    let time_factor = tables.time_of_day_factor(bucket);
    let time_note = if time_factor > PEAK_THRESHOLD {
        Some("Peak travel time increases delay probability".to_string())
    } else if time_factor < OFF_PEAK_THRESHOLD {
        Some("Off-peak departure time reduces delay risk".to_string())
    } else {
        None
    };
    apply(
        RiskFactorKind::TimeOfDay,
        FactorEffect::Scaled(time_factor),
        time_note,
    );

    let season = Season::parse(&attributes.season);
    let season_factor = tables.season_factor(season);
    apply(
        RiskFactorKind::Season,
        FactorEffect::Scaled(season_factor),
        season
            .filter(|_| season_factor > PEAK_THRESHOLD)
            .map(|season| format!("{} weather patterns increase delays", season.label())),
    );

    let category = AircraftCategory::classify(&attributes.aircraft_type);
    let (aircraft_factor, aircraft_note) = match category {
        AircraftCategory::Modern => (
            MODERN_AIRCRAFT_FACTOR,
            Some("Modern aircraft with high reliability"),
        ),
        AircraftCategory::Regional => (
            REGIONAL_AIRCRAFT_FACTOR,
            Some("Regional aircraft more susceptible to weather delays"),
        ),
        AircraftCategory::Standard => (1.0, None),
    };
    apply(
        RiskFactorKind::Aircraft,
        FactorEffect::Scaled(aircraft_factor),
        aircraft_note.map(str::to_string),
    );

    let weather = rng.gen::<f64>() * WEATHER_SPAN;
    apply(
        RiskFactorKind::Weather,
        FactorEffect::Added(weather),
        (weather > WEATHER_NOTE_THRESHOLD)
            .then(|| "Current weather conditions may cause delays".to_string()),
    );

    let (weekday_factor, weekday_note) = match attributes.departure_date.weekday() {
        Weekday::Sat | Weekday::Sun => (
            WEEKEND_FACTOR,
            Some("Weekend departure typically has fewer delays"),
        ),
        Weekday::Mon | Weekday::Fri => (
            BUSY_WEEKDAY_FACTOR,
            Some("Monday/Friday departures have higher delay rates"),
        ),
        _ => (1.0, None),
    };
    apply(
        RiskFactorKind::DayOfWeek,
        FactorEffect::Scaled(weekday_factor),
        weekday_note.map(str::to_string),
    );

    (components, risk)
}

fn airport_label(code: &str) -> String {
    code.to_ascii_uppercase()
}
