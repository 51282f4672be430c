use crate::error::GameDataError;
use anyhow::Result;
use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Location of the game data relative to the root of the game repository
pub const DEFAULT_DATA_DIR: &str = "src/main/resources/data";
pub const DEFAULT_IMAGE_HOST: &str = "https://api.vectorengine.ai";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-3.1-flash-image-preview";
pub const DEFAULT_ASPECT_RATIO: &str = "1:1";
pub const DEFAULT_IMAGE_SIZE: &str = "0.5K";

/// Application configuration struct
/// Holds where the game data lives and how to reach the image generation service
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct AppConfiguration {
    #[serde(default)]
    pub data: DataConfiguration,

    /// Older configuration files may lack the `image` section altogether
    #[serde(default)]
    pub image: ImageConfiguration,
}

/// Holds the configuration for the `data` section of the Toml file
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct DataConfiguration {
    /// Directory holding the CSV files
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for DataConfiguration {
    fn default() -> Self {
        DataConfiguration {
            data_dir: default_data_dir(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct ImageConfiguration {
    #[serde(default = "default_image_host")]
    pub host: String,
    #[serde(default = "default_image_model")]
    pub model: String,
    /// File holding the bearer token, nothing else
    #[serde(default = "default_token_file")]
    pub token_file: String,
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    #[serde(default = "default_image_size")]
    pub image_size: String,
    /// Where generated images are written unless an explicit path is given
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ImageConfiguration {
    fn default() -> Self {
        ImageConfiguration {
            host: default_image_host(),
            model: default_image_model(),
            token_file: default_token_file(),
            aspect_ratio: default_aspect_ratio(),
            image_size: default_image_size(),
            output_dir: default_output_dir(),
        }
    }
}

/// Filename holding the application configuration parameters
#[must_use]
pub fn configuration_file() -> PathBuf {
    project_dirs().map_or_else(
        || PathBuf::from("clawedit.toml"),
        |dirs| dirs.preference_dir().join("clawedit.toml"),
    )
}

/// Loads the configuration file.
///
/// # Errors
/// Fails if the file cannot be read or is not valid TOML.
pub fn load() -> Result<AppConfiguration, GameDataError> {
    read(&configuration_file())
}

/// Loads the configuration file, writing one with default values first if there is none.
///
/// # Errors
/// Fails if the file cannot be read, parsed or created.
pub fn load_or_create() -> Result<AppConfiguration, GameDataError> {
    let path = configuration_file();
    if !path.exists() {
        debug!("No configuration in {}, creating one with defaults", path.display());
        let cfg = AppConfiguration::default();
        create_configuration_file(&cfg, &path)
            .map_err(|_src_err| GameDataError::ConfigFileCreation { path: path.clone() })?;
        return Ok(cfg);
    }
    read(&path)
}

#[allow(clippy::missing_errors_doc)]
pub fn save(cfg: &AppConfiguration) -> Result<()> {
    create_configuration_file(cfg, &configuration_file())
}

/// Deletes the configuration file.
///
/// # Errors
/// `ConfigFileRemoval` if there is no file or it cannot be deleted.
pub fn remove() -> Result<(), GameDataError> {
    remove_file(&configuration_file())
}

fn remove_file(path: &Path) -> Result<(), GameDataError> {
    fs::remove_file(path).map_err(|source| GameDataError::ConfigFileRemoval {
        path: path.to_path_buf(),
        source,
    })
}

#[allow(clippy::missing_errors_doc)]
pub fn application_config_to_string(cfg: &AppConfiguration) -> Result<String> {
    Ok(toml::to_string::<AppConfiguration>(cfg)?)
}

fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}

fn default_image_host() -> String {
    DEFAULT_IMAGE_HOST.to_string()
}

fn default_image_model() -> String {
    DEFAULT_IMAGE_MODEL.to_string()
}

fn default_token_file() -> String {
    project_dirs()
        .map_or_else(
            || PathBuf::from("image_token.txt"),
            |dirs| dirs.preference_dir().join("image_token.txt"),
        )
        .to_string_lossy()
        .to_string()
}

fn default_aspect_ratio() -> String {
    DEFAULT_ASPECT_RATIO.to_string()
}

fn default_image_size() -> String {
    DEFAULT_IMAGE_SIZE.to_string()
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "clawworld", "clawedit")
}

/// Reads the `Application` configuration struct from the supplied TOML file
fn read(path: &Path) -> Result<AppConfiguration, GameDataError> {
    let mut file = File::open(path).map_err(|source| GameDataError::ApplicationConfig {
        path: path.into(),
        source,
    })?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|source| GameDataError::ApplicationConfig {
            path: path.into(),
            source,
        })?;
    toml::from_str::<AppConfiguration>(&contents).map_err(|source| GameDataError::TomlParse {
        path: path.into(),
        source,
    })
}

fn create_configuration_file(cfg: &AppConfiguration, path: &Path) -> Result<()> {
    if let Some(directory) = path.parent() {
        if !directory.as_os_str().is_empty() && !directory.try_exists()? {
            fs::create_dir_all(directory)?;
        }
    }

    let mut file = File::create(path)?;
    let toml = application_config_to_string(cfg)?;
    file.write_all(toml.as_bytes())?;

    Ok(())
}
