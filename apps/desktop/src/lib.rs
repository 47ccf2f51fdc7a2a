pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod logging;
pub mod login_item;
pub mod providers;
pub mod secrets;
pub mod state;

use cli::Cli;
use config::AppConfig;
use state::AppState;

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    logging::init(cli.verbose);

    let config = AppConfig::from_env();
    tracing::debug!(?config, "loaded configuration");

    let state = AppState::open(config)?;
    cli::execute(cli.command, &state).await
}
