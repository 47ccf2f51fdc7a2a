//! Command-line front-end.
//!
//! Supports:
//! - Fixing text from an argument or stdin, with changed words highlighted
//! - Viewing and editing settings and API keys
//! - Viewing and resetting usage statistics

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::io::{self, IsTerminal, Read};
use typer_core::types::{ProviderKind, Theme};

use crate::commands;
use crate::state::AppState;

/// Fix grammar and clarity with an LLM and see what changed
#[derive(Parser, Debug)]
#[command(name = "typer", version, about = "Fix grammar and clarity with an LLM")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Correct text and show a word diff
    Fix {
        /// Text to fix (read from stdin when omitted)
        text: Option<String>,

        /// Use this provider instead of the default
        #[arg(long, value_name = "PROVIDER")]
        provider: Option<ProviderKind>,

        /// Print without highlighting
        #[arg(long)]
        plain: bool,
    },

    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Show usage statistics
    Stats {
        /// Reset all counters to zero
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print all settings
    Show,
    /// Set the default provider (grok or gemini)
    Provider { provider: ProviderKind },
    /// Set the model used for a provider
    Model { provider: ProviderKind, model: String },
    /// Set the instruction prompt (empty restores the default)
    Prompt { prompt: String },
    /// Set the theme (system, light or dark)
    Theme { theme: Theme },
    /// Set the display font size
    FontSize { size: u32 },
    /// Store an API key (omit KEY to clear it)
    ApiKey {
        provider: ProviderKind,
        key: Option<String>,
    },
    /// Enable or disable launch at login
    LaunchAtLogin { state: Toggle },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Toggle {
    On,
    Off,
}

/// Run a parsed command against `state`.
pub async fn execute(command: Command, state: &AppState) -> anyhow::Result<()> {
    match command {
        Command::Fix {
            text,
            provider,
            plain,
        } => {
            let input = match text {
                Some(text) => text,
                None => read_stdin()?,
            };
            if plain || !io::stdout().is_terminal() {
                colored::control::set_override(false);
            }

            let response = commands::fix_text(&input, provider, state).await?;
            println!("{}", response.diff.render(|w| w.black().on_green().to_string()));
            eprintln!(
                "{} word(s) changed - {} ({})",
                response.words_changed,
                response.provider.display_name(),
                response.model
            );
        }
        Command::Settings { action } => run_settings(action, state)?,
        Command::Stats { reset } => {
            if reset {
                commands::reset_usage_stats(state)?;
                println!("Usage statistics reset.");
            } else {
                let stats = commands::get_usage_stats(state)?;
                println!("Fixes:              {}", stats.total_fixes);
                println!("Characters fixed:   {}", stats.characters_fixed);
                println!("Words changed:      {}", stats.words_changed);
                if let Some(at) = stats.last_fixed_at {
                    println!("Last fix:           {}", at.to_rfc3339());
                }
            }
        }
    }
    Ok(())
}

fn run_settings(action: SettingsAction, state: &AppState) -> anyhow::Result<()> {
    match action {
        SettingsAction::Show => {
            let settings = commands::get_settings(state)?;
            println!(
                "Default provider:   {}",
                settings.default_provider.display_name()
            );
            for provider in ProviderKind::ALL {
                println!(
                    "{:<20}{} (available: {})",
                    format!("{} model:", provider.name()),
                    settings.model_for(provider),
                    provider.models().join(", ")
                );
            }
            for status in commands::get_api_key_status(state)? {
                println!(
                    "{:<20}{}",
                    format!("{} API key:", status.provider.name()),
                    if status.configured { "set" } else { "not set" }
                );
            }
            println!("Theme:              {}", settings.theme.as_str());
            println!("Font size:          {}", settings.font_size);
            println!(
                "Launch at login:    {}",
                if commands::get_launch_at_login(state) { "on" } else { "off" }
            );
            println!("Prompt:             {}", settings.custom_prompt);
        }
        SettingsAction::Provider { provider } => {
            commands::set_default_provider(provider, state)?;
            println!("Default provider set to {}.", provider.display_name());
        }
        SettingsAction::Model { provider, model } => {
            commands::set_model(provider, &model, state)?;
            println!("{} model set to {}.", provider.name(), model);
        }
        SettingsAction::Prompt { prompt } => {
            let settings = commands::set_prompt(&prompt, state)?;
            println!("Prompt set to: {}", settings.custom_prompt);
        }
        SettingsAction::Theme { theme } => {
            commands::set_theme(theme, state)?;
            println!("Theme set to {}.", theme.as_str());
        }
        SettingsAction::FontSize { size } => {
            commands::set_font_size(size, state)?;
            println!("Font size set to {}.", size);
        }
        SettingsAction::ApiKey { provider, key } => {
            let key = key.unwrap_or_default();
            commands::set_api_key(provider, &key, state)?;
            if key.trim().is_empty() {
                println!("{} API key cleared.", provider.name());
            } else {
                println!("{} API key saved.", provider.name());
            }
        }
        SettingsAction::LaunchAtLogin { state: toggle } => {
            let enabled =
                commands::set_launch_at_login(matches!(toggle, Toggle::On), state)?;
            println!("Launch at login {}.", if enabled { "enabled" } else { "disabled" });
        }
    }
    Ok(())
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read text from stdin")?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fix_with_provider() {
        let cli = Cli::try_parse_from(["typer", "fix", "hello wrld", "--provider", "gemini"]).unwrap();
        match cli.command {
            Command::Fix { text, provider, plain } => {
                assert_eq!(text.as_deref(), Some("hello wrld"));
                assert_eq!(provider, Some(ProviderKind::Gemini));
                assert!(!plain);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_provider() {
        assert!(Cli::try_parse_from(["typer", "settings", "provider", "openai"]).is_err());
    }

    #[test]
    fn test_parse_settings_and_verbosity() {
        let cli = Cli::try_parse_from(["typer", "-vv", "settings", "theme", "dark"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Command::Settings {
                action: SettingsAction::Theme { theme: Theme::Dark }
            }
        ));
    }

    #[test]
    fn test_parse_api_key_clear() {
        let cli = Cli::try_parse_from(["typer", "settings", "api-key", "grok"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Settings {
                action: SettingsAction::ApiKey { provider: ProviderKind::Grok, key: None }
            }
        ));
    }
}
