//! Launch-at-login control.

use crate::db::{DbError, PreferenceRepository, SqliteRepository};
use crate::db::schema::keys;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoginItemError {
    #[error("failed to persist login item preference: {0}")]
    Db(#[from] DbError),
}

/// Registers or unregisters the app as a login item.
pub trait LoginItemController: Send + Sync {
    fn is_enabled(&self) -> bool;
    /// No-op when the item is already in the requested state.
    fn set_enabled(&self, enabled: bool) -> Result<(), LoginItemError>;
}

/// Login item tracked as a stored preference, for platforms without a
/// registration API the app can call. A launcher reads the flag.
pub struct PreferenceLoginItem {
    repository: Arc<Mutex<SqliteRepository>>,
}

impl PreferenceLoginItem {
    pub fn new(repository: Arc<Mutex<SqliteRepository>>) -> Self {
        Self { repository }
    }
}

fn stored_flag(repo: &SqliteRepository) -> Result<bool, DbError> {
    Ok(repo.get_preference(keys::LAUNCH_AT_LOGIN)?.as_deref() == Some("true"))
}

impl LoginItemController for PreferenceLoginItem {
    fn is_enabled(&self) -> bool {
        let repo = self.repository.lock().expect("repository lock");
        stored_flag(&repo).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read login item preference");
            false
        })
    }

    fn set_enabled(&self, enabled: bool) -> Result<(), LoginItemError> {
        // Check and write under the same lock
        let repo = self.repository.lock().expect("repository lock");
        if stored_flag(&repo)? == enabled {
            return Ok(());
        }

        if enabled {
            repo.set_preference(keys::LAUNCH_AT_LOGIN, "true")?;
        } else {
            repo.delete_preference(keys::LAUNCH_AT_LOGIN)?;
        }
        tracing::info!(enabled, "updated launch at login");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_idempotent() {
        let repo = Arc::new(Mutex::new(SqliteRepository::open_in_memory().unwrap()));
        let item = PreferenceLoginItem::new(repo.clone());
        assert!(!item.is_enabled());

        item.set_enabled(true).unwrap();
        item.set_enabled(true).unwrap();
        assert!(item.is_enabled());

        item.set_enabled(false).unwrap();
        assert!(!item.is_enabled());
        assert_eq!(
            repo.lock().unwrap().get_preference(keys::LAUNCH_AT_LOGIN).unwrap(),
            None
        );
    }

    #[test]
    fn test_unreadable_preference_is_an_error_when_setting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typer.db");
        let repo = Arc::new(Mutex::new(SqliteRepository::open(&path).unwrap()));
        let item = PreferenceLoginItem::new(repo);

        rusqlite::Connection::open(&path)
            .unwrap()
            .execute_batch("DROP TABLE preferences")
            .unwrap();

        // Reads degrade to "off", but a write must not pretend it succeeded
        assert!(!item.is_enabled());
        assert!(matches!(item.set_enabled(false), Err(LoginItemError::Db(_))));
        assert!(item.set_enabled(true).is_err());
    }

    #[test]
    fn test_concurrent_toggles_settle_on_a_stored_state() {
        let repo = Arc::new(Mutex::new(SqliteRepository::open_in_memory().unwrap()));
        let item = Arc::new(PreferenceLoginItem::new(repo.clone()));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let item = item.clone();
                std::thread::spawn(move || item.set_enabled(i % 2 == 0))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        let stored = repo.lock().unwrap().get_preference(keys::LAUNCH_AT_LOGIN).unwrap();
        assert_eq!(stored.is_some(), item.is_enabled());
    }
}
