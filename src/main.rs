use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use delivery_dispatch_sim::cli::{self, Session};
use delivery_dispatch_sim::config::Config;
use delivery_dispatch_sim::error::AppError;
use delivery_dispatch_sim::state::AppState;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut state = AppState::new(config);
    let mut session = Session::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());

    tracing::info!(
        restaurants = state.system.restaurants().len(),
        drivers = state.system.agents().len(),
        "simulation started"
    );

    if let Err(err) = cli::run(&mut state, &mut session).await {
        tracing::error!(error = %err, "simulation aborted");
        return Err(err);
    }

    Ok(())
}
