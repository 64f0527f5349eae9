mod cli;
mod infra;
mod predict;
mod routes;
mod server;

use flight_risk::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
