use gamedata::config;
use gamedata::error::GameDataError;

use crate::cli::{ConfigCommand, UpdateConfiguration};

fn list() -> Result<(), GameDataError> {
    println!(
        "Configuration file {}:\n",
        config::configuration_file().to_string_lossy()
    );

    let Ok(app_config) = config::load() else {
        println!("Config file does not exist or is empty. Use 'clawedit config update' to create it");
        return Ok(());
    };
    let toml_as_string = config::application_config_to_string(&app_config)
        .map_err(|e| GameDataError::BadInput(format!("Unable to format the configuration: {e}")))?;
    println!("{toml_as_string}");
    Ok(())
}

fn update(update: UpdateConfiguration) -> Result<(), GameDataError> {
    let mut app_config = config::load_or_create()?;
    if let Some(data) = update.data {
        app_config.data.data_dir = data;
    }
    if let Some(host) = update.image_host {
        app_config.image.host = host;
    }
    if let Some(model) = update.image_model {
        app_config.image.model = model;
    }
    if let Some(token_file) = update.token_file {
        app_config.image.token_file = token_file;
    }
    if let Some(aspect_ratio) = update.aspect_ratio {
        app_config.image.aspect_ratio = aspect_ratio;
    }
    if let Some(image_size) = update.image_size {
        app_config.image.image_size = image_size;
    }
    if let Some(output_dir) = update.output_dir {
        app_config.image.output_dir = output_dir;
    }
    config::save(&app_config).map_err(|_| GameDataError::ConfigFileCreation {
        path: config::configuration_file(),
    })?;
    println!(
        "Configuration saved to {}",
        config::configuration_file().to_string_lossy()
    );
    Ok(())
}

pub fn execute(cmd: ConfigCommand) -> Result<(), GameDataError> {
    match cmd {
        ConfigCommand::List => list(),
        ConfigCommand::Update(cfg) => update(cfg),
        ConfigCommand::Remove => {
            config::remove()?;
            println!(
                "Configuration file {} removed",
                config::configuration_file().to_string_lossy()
            );
            Ok(())
        }
    }
}
