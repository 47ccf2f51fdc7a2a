//! SQLite schema definitions.

/// Current schema version for migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema for the local SQLite database.
pub const SCHEMA: &str = r#"
-- User preferences, one row per key
CREATE TABLE IF NOT EXISTS preferences (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

-- Running usage totals
CREATE TABLE IF NOT EXISTS usage_stats (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    total_fixes INTEGER NOT NULL DEFAULT 0,
    characters_fixed INTEGER NOT NULL DEFAULT 0,
    words_changed INTEGER NOT NULL DEFAULT 0,
    last_fixed_at TEXT
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);
"#;

/// Initialize usage totals if not exists.
pub const INIT_USAGE_STATS: &str = r#"
INSERT OR IGNORE INTO usage_stats (id) VALUES (1);
"#;

/// Preference keys.
pub mod keys {
    pub const DEFAULT_PROVIDER: &str = "default_provider";
    pub const GROK_MODEL: &str = "grok_model";
    pub const GEMINI_MODEL: &str = "gemini_model";
    pub const CUSTOM_PROMPT: &str = "custom_prompt";
    pub const THEME: &str = "theme";
    pub const FONT_SIZE: &str = "font_size";
    pub const LAUNCH_AT_LOGIN: &str = "launch_at_login";
}
