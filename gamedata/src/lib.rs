//! Game data for ClawWorld: CSV backed tables, record editors for every keyed table and
//! the map editor.
use crate::error::GameDataError;
use config::AppConfiguration;
use editor::{EditorKind, RecordEditor};
use log::{debug, info};
use map::MapEditor;
use repository::database::GameDatabase;
use repository::database_manager::{DatabaseManager, StoreConfig};
use std::path::{Path, PathBuf};

pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod map;
pub mod repository;
pub mod schema;
pub mod types;

pub struct ApplicationRuntime {
    config: AppConfiguration,
    data_dir: Option<PathBuf>,
    database: GameDatabase,
}

impl ApplicationRuntime {
    /// Creates a runtime reading the data directory named in the configuration file.
    ///
    /// # Errors
    /// * The configuration file cannot be read or created
    /// * One of the tables cannot be loaded
    pub fn new() -> Result<Self, GameDataError> {
        ApplicationRuntimeBuilder::new().build()
    }

    #[must_use]
    pub fn config(&self) -> &AppConfiguration {
        &self.config
    }

    /// Directory holding the CSV files, `None` when the tables live in memory
    #[must_use]
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    #[must_use]
    pub fn database(&self) -> &GameDatabase {
        &self.database
    }

    pub fn database_mut(&mut self) -> &mut GameDatabase {
        &mut self.database
    }

    #[must_use]
    pub fn editor(&self, kind: EditorKind) -> RecordEditor {
        RecordEditor::new(kind)
    }

    #[must_use]
    pub fn map_editor(&self) -> MapEditor {
        MapEditor::new()
    }

    /// Throws away unsaved changes in every editor and reads all tables again.
    ///
    /// # Errors
    /// Fails if any table cannot be read.
    pub fn refresh_all(&mut self) -> Result<(), GameDataError> {
        self.database.reload()
    }

    /// Writes every table.
    ///
    /// # Errors
    /// Stops at the first table which cannot be written.
    pub fn save_all(&self) -> Result<(), GameDataError> {
        self.database.save_all()?;
        info!("All game data saved");
        Ok(())
    }
}

/// Assembles an [`ApplicationRuntime`].
///
/// ```rust,ignore
/// let runtime = ApplicationRuntimeBuilder::new()
///     .with_data_dir("src/main/resources/data")
///     .build()?;
/// ```
#[derive(Default)]
pub struct ApplicationRuntimeBuilder {
    data_dir: Option<PathBuf>,
    in_memory: bool,
    configuration: Option<AppConfiguration>,
}

impl ApplicationRuntimeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the tables from `data_dir` instead of the configured directory
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    /// Keeps all tables in memory; nothing touches the disk
    #[must_use]
    pub fn use_in_memory_store(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Uses `configuration` rather than the configuration file
    #[must_use]
    pub fn with_configuration(mut self, configuration: AppConfiguration) -> Self {
        self.configuration = Some(configuration);
        self
    }

    /// # Errors
    /// * The configuration file cannot be read or created
    /// * One of the tables cannot be loaded
    pub fn build(self) -> Result<ApplicationRuntime, GameDataError> {
        let config = match self.configuration {
            Some(config) => config,
            None if self.in_memory => AppConfiguration::default(),
            None => config::load_or_create()?,
        };

        let (store, data_dir) = if self.in_memory {
            (StoreConfig::InMemory, None)
        } else {
            let path = self
                .data_dir
                .unwrap_or_else(|| PathBuf::from(&config.data.data_dir));
            (StoreConfig::CsvDirectory { path: path.clone() }, Some(path))
        };
        debug!("Opening game data with {store:?}");

        let database = DatabaseManager::new(&store).open_database()?;
        Ok(ApplicationRuntime {
            config,
            data_dir,
            database,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>(_: T) {}

    #[test]
    fn in_memory_runtime_starts_empty() -> Result<(), GameDataError> {
        let runtime = ApplicationRuntimeBuilder::new().use_in_memory_store().build()?;
        assert!(runtime.data_dir().is_none());
        assert!(runtime.editor(EditorKind::Enemy).records(runtime.database()).is_empty());
        assert_send_sync(runtime);
        Ok(())
    }
}
