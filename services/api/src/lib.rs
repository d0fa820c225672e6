mod cli;
mod infra;
mod routes;
mod server;

use applicant_ai::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
