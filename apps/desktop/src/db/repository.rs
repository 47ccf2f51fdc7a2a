//! Repository pattern for database access.

use crate::db::error::DbError;
use crate::db::schema::{self, keys};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use typer_core::types::{ProviderKind, Settings, Theme, UsageStats, MAX_FONT_SIZE, MIN_FONT_SIZE};

type Result<T> = std::result::Result<T, DbError>;

/// Repository for raw key-value preferences.
pub trait PreferenceRepository {
    fn get_preference(&self, key: &str) -> Result<Option<String>>;
    fn set_preference(&self, key: &str, value: &str) -> Result<()>;
    fn delete_preference(&self, key: &str) -> Result<()>;
}

/// Repository for typed user settings.
pub trait SettingsRepository {
    fn get_settings(&self) -> Result<Settings>;
    fn save_settings(&self, settings: &Settings) -> Result<()>;
}

/// Repository for usage statistics.
pub trait StatsRepository {
    fn get_usage_stats(&self) -> Result<UsageStats>;
    /// Add one fix to the running totals and return the new totals.
    fn record_fix(&self, characters: usize, words_changed: usize) -> Result<UsageStats>;
    fn reset_usage_stats(&self) -> Result<()>;
}

/// SQLite implementation of repositories.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(schema::SCHEMA)?;
        self.conn.execute_batch(schema::INIT_USAGE_STATS)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![schema::SCHEMA_VERSION],
        )?;
        Ok(())
    }

    fn parse_preference<T, F>(&self, key: &str, parse: F) -> Result<Option<T>>
    where
        F: FnOnce(&str) -> Option<T>,
    {
        let Some(raw) = self.get_preference(key)? else {
            return Ok(None);
        };

        let parsed = parse(&raw);
        if parsed.is_none() {
            tracing::warn!(key, value = %raw, "ignoring invalid stored preference");
        }
        Ok(parsed)
    }
}

impl PreferenceRepository for SqliteRepository {
    fn get_preference(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    fn set_preference(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO preferences (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn delete_preference(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM preferences WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl SettingsRepository for SqliteRepository {
    fn get_settings(&self) -> Result<Settings> {
        let defaults = Settings::default();

        let default_provider = self
            .parse_preference(keys::DEFAULT_PROVIDER, |s| s.parse::<ProviderKind>().ok())?
            .unwrap_or(defaults.default_provider);
        let grok_model = self
            .parse_preference(keys::GROK_MODEL, |s| known_model(ProviderKind::Grok, s))?
            .unwrap_or(defaults.grok_model);
        let gemini_model = self
            .parse_preference(keys::GEMINI_MODEL, |s| known_model(ProviderKind::Gemini, s))?
            .unwrap_or(defaults.gemini_model);
        // An empty prompt is a legitimate user choice
        let custom_prompt = self
            .get_preference(keys::CUSTOM_PROMPT)?
            .unwrap_or(defaults.custom_prompt);
        let theme = self
            .parse_preference(keys::THEME, |s| s.parse::<Theme>().ok())?
            .unwrap_or(defaults.theme);
        let font_size = self
            .parse_preference(keys::FONT_SIZE, |s| {
                s.parse::<u32>()
                    .ok()
                    .filter(|size| (MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(size))
            })?
            .unwrap_or(defaults.font_size);

        Ok(Settings {
            default_provider,
            grok_model,
            gemini_model,
            custom_prompt,
            theme,
            font_size,
        })
    }

    fn save_settings(&self, settings: &Settings) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let font_size = settings.font_size.to_string();

        let entries = [
            (keys::DEFAULT_PROVIDER, settings.default_provider.as_str()),
            (keys::GROK_MODEL, settings.grok_model.as_str()),
            (keys::GEMINI_MODEL, settings.gemini_model.as_str()),
            (keys::CUSTOM_PROMPT, settings.custom_prompt.as_str()),
            (keys::THEME, settings.theme.as_str()),
            (keys::FONT_SIZE, font_size.as_str()),
        ];

        for (key, value) in entries {
            tx.execute(
                "INSERT INTO preferences (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )?;
        }

        tx.commit()?;
        Ok(())
    }
}

impl StatsRepository for SqliteRepository {
    fn get_usage_stats(&self) -> Result<UsageStats> {
        let (total_fixes, characters_fixed, words_changed, last_fixed_at) = self.conn.query_row(
            "SELECT total_fixes, characters_fixed, words_changed, last_fixed_at FROM usage_stats WHERE id = 1",
            [],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            },
        )?;

        let last_fixed_at = last_fixed_at
            .map(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| DbError::InvalidData(format!("last_fixed_at {s:?}: {e}")))
            })
            .transpose()?;

        Ok(UsageStats {
            total_fixes: to_count(total_fixes)?,
            characters_fixed: to_count(characters_fixed)?,
            words_changed: to_count(words_changed)?,
            last_fixed_at,
        })
    }

    fn record_fix(&self, characters: usize, words_changed: usize) -> Result<UsageStats> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "UPDATE usage_stats SET total_fixes = total_fixes + 1, characters_fixed = characters_fixed + ?1, words_changed = words_changed + ?2, last_fixed_at = ?3 WHERE id = 1",
            params![from_count(characters)?, from_count(words_changed)?, now],
        )?;
        self.get_usage_stats()
    }

    fn reset_usage_stats(&self) -> Result<()> {
        self.conn.execute(
            "UPDATE usage_stats SET total_fixes = 0, characters_fixed = 0, words_changed = 0, last_fixed_at = NULL WHERE id = 1",
            [],
        )?;
        Ok(())
    }
}

fn known_model(provider: ProviderKind, s: &str) -> Option<String> {
    provider
        .models()
        .iter()
        .any(|m| *m == s)
        .then(|| s.to_string())
}

fn to_count(value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| DbError::InvalidData(format!("negative counter: {value}")))
}

fn from_count(value: usize) -> Result<i64> {
    i64::try_from(value).map_err(|_| DbError::InvalidData(format!("counter overflow: {value}")))
}
