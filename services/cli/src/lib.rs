mod cli;
mod enrich;
mod infra;
mod presets;
mod render;

use lead_signals::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
