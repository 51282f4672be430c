use gamedata::{config::AppConfiguration, error::GameDataError, ApplicationRuntime, ApplicationRuntimeBuilder};
use std::path::Path;
use tempfile::TempDir;

use crate::test_helpers::fixtures::write_sample_data;

/// Creates a runtime with every table kept in memory
pub fn create_test_runtime() -> Result<ApplicationRuntime, GameDataError> {
    ApplicationRuntimeBuilder::new()
        .use_in_memory_store()
        .with_configuration(AppConfiguration::default())
        .build()
}

/// Opens the CSV files in `data_dir` without consulting the configuration file
pub fn open_runtime(data_dir: &Path) -> Result<ApplicationRuntime, GameDataError> {
    ApplicationRuntimeBuilder::new()
        .with_configuration(AppConfiguration::default())
        .with_data_dir(data_dir)
        .build()
}

/// Copies the sample data into a fresh temporary directory and opens it.
/// The directory is removed when the returned `TempDir` is dropped.
pub fn create_sample_runtime() -> Result<(TempDir, ApplicationRuntime), GameDataError> {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir()?;
    write_sample_data(dir.path())?;
    let runtime = open_runtime(dir.path())?;
    Ok((dir, runtime))
}
