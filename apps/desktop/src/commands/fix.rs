//! The fix command: correct text through a provider and diff the result.

use crate::db::{SettingsRepository, StatsRepository};
use crate::providers::build_provider;
use crate::state::AppState;
use typer_core::diff::{char_count, count_changed_words, tokenize, TextDiff};
use typer_core::types::{ProviderKind, UsageStats};

use super::CommandError;

#[derive(Debug, serde::Serialize)]
pub struct FixResponse {
    /// Provider output with surrounding whitespace trimmed.
    pub corrected: String,
    pub provider: ProviderKind,
    pub model: String,
    /// Untrimmed input against the corrected text, for display.
    pub diff: TextDiff,
    /// Changed words credited to usage statistics for this fix.
    pub words_changed: usize,
    /// Totals after this fix was recorded.
    pub usage: UsageStats,
}

/// Correct `input` with the default provider, or `provider_override` if given.
///
/// Only one fix may run per state; overlapping calls are rejected rather than queued.
pub async fn fix_text(
    input: &str,
    provider_override: Option<ProviderKind>,
    state: &AppState,
) -> Result<FixResponse, CommandError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CommandError::new("Nothing to fix: the input is empty."));
    }

    let _guard = state
        .begin_fix()
        .ok_or_else(|| CommandError::new("A fix is already in progress."))?;

    let settings = {
        let repo = state.repository.lock().expect("repository lock");
        repo.get_settings()?
    };

    let kind = provider_override.unwrap_or(settings.default_provider);
    let model = settings.model_for(kind).to_string();
    let api_key = state.secrets.get(kind.api_key_name())?;
    let provider = build_provider(kind, api_key, &model, &state.config)?;

    let chars = char_count(trimmed);
    tracing::info!(
        provider = kind.as_str(),
        model = %model,
        chars,
        "fixing text"
    );

    let corrected = provider
        .correct(trimmed, &settings.custom_prompt)
        .await
        .map_err(|e| {
            tracing::warn!(provider = kind.as_str(), error = %e, "correction failed");
            e
        })?;
    let corrected = corrected.trim().to_string();

    let diff = TextDiff::compute(input, &corrected);
    let words_changed = count_changed_words(&tokenize(trimmed), &tokenize(&corrected));

    let usage = {
        let repo = state.repository.lock().expect("repository lock");
        repo.record_fix(chars, words_changed)?
    };

    tracing::info!(
        provider = kind.as_str(),
        words_changed,
        total_fixes = usage.total_fixes,
        "fix complete"
    );

    Ok(FixResponse {
        corrected,
        provider: kind,
        model,
        diff,
        words_changed,
        usage,
    })
}
