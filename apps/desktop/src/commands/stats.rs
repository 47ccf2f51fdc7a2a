//! Statistics commands.

use crate::db::StatsRepository;
use crate::state::AppState;
use typer_core::types::UsageStats;

use super::CommandError;

/// Get running usage totals.
pub fn get_usage_stats(state: &AppState) -> Result<UsageStats, CommandError> {
    let repo = state.repository.lock().expect("repository lock");
    repo.get_usage_stats().map_err(Into::into)
}

/// Zero all usage totals.
pub fn reset_usage_stats(state: &AppState) -> Result<(), CommandError> {
    let repo = state.repository.lock().expect("repository lock");
    repo.reset_usage_stats()?;
    tracing::info!("usage stats reset");
    Ok(())
}
