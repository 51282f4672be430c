use std::{io, path::PathBuf};

use thiserror::Error;

#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug)]
pub enum GameDataError {
    #[error("Unable to load the application configuration file {path:?}")]
    ApplicationConfig { path: PathBuf, source: io::Error },
    #[error("Unable to parse contents of {path}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Unable to create configuration file {path}")]
    ConfigFileCreation { path: PathBuf },
    #[error("Unable to remove configuration file {path:?}")]
    ConfigFileRemoval { path: PathBuf, source: io::Error },
    #[error("Unable to read {path}: {reason}")]
    ReadTable { path: PathBuf, reason: String },
    #[error("Unable to write {path}: {reason}")]
    WriteTable { path: PathBuf, reason: String },
    #[error("Please enter {0}")]
    MissingField(String),
    #[error("{label} '{id}' already exists")]
    DuplicateId { label: String, id: String },
    #[error("{label} '{id}' not found")]
    NotFound { label: String, id: String },
    #[error("'{value}' is not a valid value for {field}, expected one of: {allowed}")]
    InvalidValue {
        field: String,
        value: String,
        allowed: String,
    },
    #[error("Could not make sense of input: {0}")]
    BadInput(String),
    #[error("Cell ({x}, {y}) is outside map {map_id}")]
    OutOfBounds { map_id: String, x: i64, y: i64 },
    #[error("Directory creation failed")]
    CreateDir(#[from] io::Error),
}

impl From<csv::Error> for GameDataError {
    fn from(err: csv::Error) -> Self {
        GameDataError::BadInput(format!("CSV error {err}"))
    }
}
