//! Local SQLite storage for preferences and usage statistics.

pub mod error;
pub mod repository;
pub mod schema;

pub use error::DbError;
pub use repository::{PreferenceRepository, SettingsRepository, SqliteRepository, StatsRepository};
