//! Core text-correction library shared by the Typer front-ends.
//!
//! Provides:
//! - Word-level diff between an original text and its corrected rewrite (LCS alignment)
//! - Changed-word counting for usage statistics
//! - Shared types (ProviderKind, Settings, UsageStats, etc.)

pub mod diff;
pub mod error;
pub mod types;

pub use diff::{
    annotate, char_count, compute_alignment, count_changed_words, tokenize, AnnotatedToken, TextDiff,
    TokenStatus,
};
pub use error::{Result, ValueError};
pub use types::{ProviderKind, Settings, Theme, UsageStats, DEFAULT_PROMPT};
