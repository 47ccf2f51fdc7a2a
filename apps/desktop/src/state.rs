//! Application state.

use crate::config::{AppConfig, SecretBackend};
use crate::db::{DbError, SqliteRepository};
use crate::login_item::{LoginItemController, PreferenceLoginItem};
use crate::secrets::{KeyringSecretStore, MemorySecretStore, SecretStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// State shared by every command. Owned by the front-end and passed by reference.
pub struct AppState {
    pub config: AppConfig,
    pub repository: Arc<Mutex<SqliteRepository>>,
    pub secrets: Arc<dyn SecretStore>,
    pub login_item: Box<dyn LoginItemController>,
    fix_in_flight: AtomicBool,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        repository: SqliteRepository,
        secrets: Arc<dyn SecretStore>,
    ) -> Self {
        let repository = Arc::new(Mutex::new(repository));
        let login_item = Box::new(PreferenceLoginItem::new(repository.clone()));
        Self {
            config,
            repository,
            secrets,
            login_item,
            fix_in_flight: AtomicBool::new(false),
        }
    }

    /// Open the on-disk database and the configured secret store.
    pub fn open(config: AppConfig) -> Result<Self, DbError> {
        std::fs::create_dir_all(&config.data_dir)?;
        let db_path = config.db_path();
        tracing::info!(path = %db_path.display(), "opening database");
        let repository = SqliteRepository::open(&db_path)?;

        let secrets: Arc<dyn SecretStore> = match config.secret_backend {
            SecretBackend::Keyring => Arc::new(KeyringSecretStore::default()),
            SecretBackend::Memory => {
                tracing::warn!("using in-memory secret store; keys set now will not persist");
                Arc::new(MemorySecretStore::with_entries(config.env_api_keys.clone()))
            }
        };

        Ok(Self::new(config, repository, secrets))
    }

    /// Replace the login item controller.
    pub fn with_login_item(mut self, controller: Box<dyn LoginItemController>) -> Self {
        self.login_item = controller;
        self
    }

    /// Claim the single fix slot. Returns `None` while another fix is running.
    pub(crate) fn begin_fix(&self) -> Option<FixGuard<'_>> {
        self.fix_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FixGuard {
                flag: &self.fix_in_flight,
            })
    }

    pub fn is_fixing(&self) -> bool {
        self.fix_in_flight.load(Ordering::Acquire)
    }
}

/// Releases the fix slot when dropped.
pub(crate) struct FixGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for FixGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
