//! Core types for the Typer application.

use crate::error::{Result, ValueError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Instruction sent to the provider ahead of the user's text.
pub const DEFAULT_PROMPT: &str =
    "Rewrite to fix grammar and improve clarity. Please only return the fixed text and nothing else:";

pub const DEFAULT_FONT_SIZE: u32 = 14;
pub const MIN_FONT_SIZE: u32 = 9;
pub const MAX_FONT_SIZE: u32 = 32;

const GROK_MODELS: &[&str] = &["grok-4-1-fast-non-reasoning", "grok-3-mini"];
const GEMINI_MODELS: &[&str] = &["gemini-2.5-flash", "gemini-2.0-flash", "gemini-2.5-flash-lite"];

/// LLM provider used for corrections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Grok,
    Gemini,
}

impl Default for ProviderKind {
    fn default() -> Self {
        Self::Grok
    }
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [Self::Grok, Self::Gemini];

    /// Stable identifier used in storage and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grok => "grok",
            Self::Gemini => "gemini",
        }
    }

    /// Short name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Grok => "Grok",
            Self::Gemini => "Gemini",
        }
    }

    /// Human-readable label including the vendor.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Grok => "Grok (xAI)",
            Self::Gemini => "Gemini (Google)",
        }
    }

    /// Models offered for this provider, default first.
    pub fn models(&self) -> &'static [&'static str] {
        match self {
            Self::Grok => GROK_MODELS,
            Self::Gemini => GEMINI_MODELS,
        }
    }

    pub fn default_model(&self) -> &'static str {
        self.models()[0]
    }

    /// Secret store key holding this provider's API key.
    pub fn api_key_name(&self) -> &'static str {
        match self {
            Self::Grok => "grok_api_key",
            Self::Gemini => "gemini_api_key",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "grok" => Ok(Self::Grok),
            "gemini" => Ok(Self::Gemini),
            other => Err(ValueError::UnknownProvider(other.to_string())),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Appearance preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    System,
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Self::System
    }
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "system" => Ok(Self::System),
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ValueError::UnknownTheme(other.to_string())),
        }
    }
}

/// User preferences. API keys are kept out of this struct and live in a secret store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub default_provider: ProviderKind,
    pub grok_model: String,
    pub gemini_model: String,
    pub custom_prompt: String,
    pub theme: Theme,
    pub font_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_provider: ProviderKind::default(),
            grok_model: ProviderKind::Grok.default_model().to_string(),
            gemini_model: ProviderKind::Gemini.default_model().to_string(),
            custom_prompt: DEFAULT_PROMPT.to_string(),
            theme: Theme::default(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl Settings {
    /// Model configured for a provider.
    pub fn model_for(&self, provider: ProviderKind) -> &str {
        match provider {
            ProviderKind::Grok => &self.grok_model,
            ProviderKind::Gemini => &self.gemini_model,
        }
    }

    /// Select a model from the provider's catalogue.
    pub fn set_model(&mut self, provider: ProviderKind, model: &str) -> Result<()> {
        if !provider.models().iter().any(|m| *m == model) {
            return Err(ValueError::UnknownModel {
                provider: provider.as_str().to_string(),
                model: model.to_string(),
            });
        }

        match provider {
            ProviderKind::Grok => self.grok_model = model.to_string(),
            ProviderKind::Gemini => self.gemini_model = model.to_string(),
        }
        Ok(())
    }

    pub fn set_font_size(&mut self, size: u32) -> Result<()> {
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size) {
            return Err(ValueError::InvalidFontSize {
                size,
                min: MIN_FONT_SIZE,
                max: MAX_FONT_SIZE,
            });
        }
        self.font_size = size;
        Ok(())
    }
}

/// Running totals across all fixes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    pub total_fixes: u64,
    pub characters_fixed: u64,
    pub words_changed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_fixed_at: Option<DateTime<Utc>>,
}
