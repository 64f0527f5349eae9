use crate::infra::{request_rng, PredictionResponse};
use clap::Args;
use flight_risk::error::AppError;
use flight_risk::prediction::{
    DelayRiskEstimator, FactorEffect, FlightSubmission, FlightSummary, RiskAssessment,
};

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// Operating airline, e.g. "Delta Air Lines"
    #[arg(long)]
    pub(crate) airline: String,
    /// Flight number shown in the report header
    #[arg(long)]
    pub(crate) flight_number: Option<String>,
    /// Origin airport code
    #[arg(long)]
    pub(crate) origin: String,
    /// Destination airport code
    #[arg(long)]
    pub(crate) destination: String,
    /// Departure date (YYYY-MM-DD)
    #[arg(long)]
    pub(crate) date: String,
    /// Local departure time (HH:MM)
    #[arg(long)]
    pub(crate) time: String,
    /// Aircraft type, e.g. "Boeing 787"
    #[arg(long, default_value = "")]
    pub(crate) aircraft: String,
    /// Travel season (Spring, Summer, Fall, Winter)
    #[arg(long, default_value = "")]
    pub(crate) season: String,
    /// Seed the random source for a reproducible estimate
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Print the response payload as JSON
    #[arg(long)]
    pub(crate) json: bool,
    /// Include every adjustment applied to the running risk
    #[arg(long)]
    pub(crate) explain: bool,
}

pub(crate) fn run_prediction(args: PredictArgs) -> Result<(), AppError> {
    let PredictArgs {
        airline,
        flight_number,
        origin,
        destination,
        date,
        time,
        aircraft,
        season,
        seed,
        json,
        explain,
    } = args;

    let submission = FlightSubmission {
        airline,
        flight_number,
        origin,
        destination,
        departure_date: date,
        departure_time: time,
        aircraft_type: aircraft,
        season,
    };
    let validated = submission.validate()?;

    let estimator = DelayRiskEstimator::new();
    let assessment = estimator.assess(&validated.attributes, &mut request_rng(seed));

    if json {
        let response = PredictionResponse {
            flight: validated.summary,
            prediction: assessment.prediction,
        };
        println!("{}", render_json(&response)?);
    } else {
        println!(
            "{}",
            render_prediction(&validated.summary, &assessment, explain)
        );
    }

    Ok(())
}

pub(crate) fn render_prediction(
    summary: &FlightSummary,
    assessment: &RiskAssessment,
    explain: bool,
) -> String {
    let prediction = &assessment.prediction;
    let mut lines = vec![
        "Flight delay prediction".to_string(),
        format!(
            "Flight {} ({}) {}",
            summary.flight_number, summary.airline, summary.route
        ),
        String::new(),
        prediction.risk_level.badge(),
        format!("- Delay probability: {}%", prediction.probability_percent()),
    ];

    if prediction.is_delayed {
        lines.push(format!(
            "- Expected delay: {} minutes",
            prediction.estimated_delay
        ));
    } else {
        lines.push("- Expected delay: none, likely on time".to_string());
    }
    lines.push(format!("- Confidence: {}%", prediction.confidence_percent()));

    lines.push(String::new());
    lines.push("Key factors".to_string());
    lines.extend(prediction.factors.iter().map(|factor| format!("- {factor}")));

    if explain {
        lines.push(String::new());
        lines.push(format!(
            "Adjustment trail (uncapped {:.3})",
            assessment.uncapped_risk
        ));
        for component in &assessment.components {
            let effect = match component.effect {
                FactorEffect::Added(amount) => format!("+{amount:.3}"),
                FactorEffect::Scaled(factor) => format!("x{factor:.2}"),
            };
            let note = component.note.as_deref().unwrap_or("no note");
            lines.push(format!("- {:?}: {} ({})", component.factor, effect, note));
        }
    }

    lines.join("\n")
}

pub(crate) fn render_json(response: &PredictionResponse) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(response)?)
}
