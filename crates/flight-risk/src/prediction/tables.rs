use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::domain::Season;

pub(crate) const DEFAULT_AIRLINE_RELIABILITY: f64 = 0.75;
pub(crate) const DEFAULT_AIRPORT_RISK: f64 = 0.25;
pub(crate) const NEUTRAL_SEASON_FACTOR: f64 = 1.0;

/// Aircraft offered to travellers when they describe their flight.
pub const AIRCRAFT_TYPES: [&str; 8] = [
    "Boeing 737",
    "Boeing 777",
    "Boeing 787",
    "Airbus A320",
    "Airbus A330",
    "Airbus A350",
    "Embraer E-Jet",
    "Regional Jet",
];

/// Departure windows used to scale the running risk by local hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    EarlyMorning,
    Morning,
    Midday,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn from_hour(hour: i64) -> Self {
        match hour {
            5..=7 => Self::EarlyMorning,
            8..=10 => Self::Morning,
            11..=13 => Self::Midday,
            14..=17 => Self::Afternoon,
            18..=20 => Self::Evening,
            _ => Self::Night,
        }
    }

    /// Buckets an `HH:MM` string. Anything without a leading hour lands in
    /// [`TimeOfDay::Night`].
    pub fn from_departure_time(time: &str) -> Self {
        departure_hour(time)
            .map(Self::from_hour)
            .unwrap_or(Self::Night)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeOfDay::EarlyMorning => "early morning",
            TimeOfDay::Morning => "morning",
            TimeOfDay::Midday => "midday",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }
}

/// Reads the hour component the way a lenient form field would: leading
/// whitespace and a sign are accepted, trailing junk after the digits is not
/// an error.
fn departure_hour(time: &str) -> Option<i64> {
    let head = time.split(':').next()?.trim_start();
    let (negative, digits) = match head.as_bytes().first() {
        Some(b'-') => (true, &head[1..]),
        Some(b'+') => (false, &head[1..]),
        _ => (false, head),
    };

    let end = digits
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(digits.len());
    let hour = digits[..end].parse::<i64>().ok()?;

    Some(if negative { -hour } else { hour })
}

/// Static lookup tables backing every estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceTables {
    pub airline_reliability: BTreeMap<String, f64>,
    pub airport_risk: BTreeMap<String, f64>,
    pub season_factors: BTreeMap<Season, f64>,
    pub time_of_day_factors: BTreeMap<TimeOfDay, f64>,
    pub aircraft_types: Vec<String>,
}

impl ReferenceTables {
    /// Process-wide tables, built on first use and never mutated afterwards.
    pub fn standard() -> &'static ReferenceTables {
        static TABLES: OnceLock<ReferenceTables> = OnceLock::new();
        TABLES.get_or_init(Self::build)
    }

    fn build() -> Self {
        let airline_reliability = [
            ("Delta Air Lines", 0.85),
            ("American Airlines", 0.78),
            ("United Airlines", 0.76),
            ("Southwest Airlines", 0.82),
            ("JetBlue Airways", 0.80),
            ("Alaska Airlines", 0.88),
            ("Spirit Airlines", 0.65),
            ("Frontier Airlines", 0.68),
        ]
        .into_iter()
        .map(|(name, score)| (name.to_string(), score))
        .collect();

        let airport_risk = [
            ("JFK", 0.30),
            ("LAX", 0.25),
            ("ORD", 0.35),
            ("ATL", 0.28),
            ("DFW", 0.22),
            ("DEN", 0.20),
            ("LAS", 0.18),
            ("PHX", 0.15),
            ("MIA", 0.32),
            ("SEA", 0.24),
            ("SFO", 0.29),
            ("BOS", 0.26),
            ("EWR", 0.33),
            ("CLT", 0.19),
            ("MCO", 0.21),
        ]
        .into_iter()
        .map(|(code, risk)| (code.to_string(), risk))
        .collect();

        let season_factors = BTreeMap::from([
            (Season::Winter, 1.4),
            (Season::Summer, 1.2),
            (Season::Spring, 1.0),
            (Season::Fall, 0.9),
        ]);

        let time_of_day_factors = BTreeMap::from([
            (TimeOfDay::EarlyMorning, 0.8),
            (TimeOfDay::Morning, 0.9),
            (TimeOfDay::Midday, 1.0),
            (TimeOfDay::Afternoon, 1.2),
            (TimeOfDay::Evening, 1.3),
            (TimeOfDay::Night, 0.7),
        ]);

        Self {
            airline_reliability,
            airport_risk,
            season_factors,
            time_of_day_factors,
            aircraft_types: AIRCRAFT_TYPES.iter().map(|name| name.to_string()).collect(),
        }
    }

    /// Exact match on the carrier name.
    pub fn airline_reliability(&self, airline: &str) -> Option<f64> {
        self.airline_reliability.get(airline).copied()
    }

    pub fn airport_risk(&self, code: &str) -> Option<f64> {
        self.airport_risk.get(&code.to_ascii_uppercase()).copied()
    }

    pub fn season_factor(&self, season: Option<Season>) -> f64 {
        season
            .and_then(|season| self.season_factors.get(&season).copied())
            .unwrap_or(NEUTRAL_SEASON_FACTOR)
    }

    pub fn time_of_day_factor(&self, bucket: TimeOfDay) -> f64 {
        self.time_of_day_factors
            .get(&bucket)
            .copied()
            .unwrap_or(1.0)
    }
}
