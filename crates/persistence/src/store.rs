//! Usage ledger storage backends

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use tempfile::NamedTempFile;

use crate::error::PersistenceError;
use crate::ledger::UsageLedger;

/// Load/save of the single usage ledger
///
/// Implementations only need whole-ledger reads and writes; serialization of
/// concurrent read-modify-write cycles is the tracker's job.
#[async_trait]
pub trait UsageStore: Send + Sync {
    /// Current ledger, or an empty one if nothing was stored yet
    async fn load(&self) -> Result<UsageLedger, PersistenceError>;

    /// Replace the stored ledger
    async fn save(&self, ledger: &UsageLedger) -> Result<(), PersistenceError>;

    /// Backend label for logs and health output
    fn backend_name(&self) -> &'static str;
}

/// Pretty-printed JSON file, replaced atomically on every save
#[derive(Debug, Clone)]
pub struct FileUsageStore {
    path: PathBuf,
}

impl FileUsageStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), PersistenceError> {
        use std::io::Write;

        let parent_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent_dir)?;

        let mut temp_file = NamedTempFile::new_in(parent_dir)?;
        temp_file.write_all(contents)?;
        temp_file.as_file().sync_all()?;
        temp_file
            .persist(path)
            .map_err(|e| PersistenceError::Io(e.error))?;
        Ok(())
    }
}

#[async_trait]
impl UsageStore for FileUsageStore {
    async fn load(&self) -> Result<UsageLedger, PersistenceError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No usage file yet, starting empty ledger");
                Ok(UsageLedger::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, ledger: &UsageLedger) -> Result<(), PersistenceError> {
        let contents = serde_json::to_vec_pretty(ledger)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::write_atomic(&path, &contents))
            .await
            .map_err(|e| PersistenceError::Io(std::io::Error::other(e)))?
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

/// Ledger held in process memory
#[derive(Debug, Default)]
pub struct InMemoryUsageStore {
    ledger: Mutex<UsageLedger>,
}

impl InMemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing ledger
    pub fn with_ledger(ledger: UsageLedger) -> Self {
        Self {
            ledger: Mutex::new(ledger),
        }
    }
}

#[async_trait]
impl UsageStore for InMemoryUsageStore {
    async fn load(&self) -> Result<UsageLedger, PersistenceError> {
        Ok(self.ledger.lock().clone())
    }

    async fn save(&self, ledger: &UsageLedger) -> Result<(), PersistenceError> {
        *self.ledger.lock() = ledger.clone();
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
