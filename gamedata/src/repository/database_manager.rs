use std::path::PathBuf;
use std::sync::Arc;

use crate::error::GameDataError;
use crate::repository::csv_table_repo::CsvTableRepository;
use crate::repository::database::GameDatabase;
use crate::repository::memory_table_repo::MemoryTableRepository;
use crate::repository::table_repository::TableRepository;

/// Represents parameters for selecting where the game data tables live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// One CSV file per table in the given directory
    CsvDirectory { path: PathBuf },

    /// Tables kept entirely in memory
    InMemory,
}

pub struct DatabaseManager {
    repository: Arc<dyn TableRepository>,
}

impl DatabaseManager {
    /// Creates a new `DatabaseManager` based on the provided configuration.
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        let repository: Arc<dyn TableRepository> = match config {
            StoreConfig::CsvDirectory { path } => Arc::new(CsvTableRepository::new(path.clone())),
            StoreConfig::InMemory => Arc::new(MemoryTableRepository::new()),
        };
        Self { repository }
    }

    /// Provide access to the shared repository.
    #[must_use]
    pub fn repository(&self) -> Arc<dyn TableRepository> {
        self.repository.clone()
    }

    /// Loads every table through the repository
    ///
    /// # Errors
    /// Fails if any of the tables cannot be read.
    pub fn open_database(&self) -> Result<GameDatabase, GameDataError> {
        GameDatabase::open(self.repository())
    }
}
