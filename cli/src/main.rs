//! # The ClawWorld game data editor
//!
//! A command-line tool for the CSV tables of ClawWorld. Supports creating, changing and
//! deleting enemies, items, equipment, NPCs, chests, gifts, skills, roles, terrain types
//! and maps, as well as generating artwork from a text prompt.
//!
//! ## Configuration
//! By default the tables are read from `src/main/resources/data`. Point the tool at
//! another directory with:
//! ```bash
//! clawedit config update --data ../clawworld/src/main/resources/data
//! ```
//!
//! ## Usage Examples
//!
//! ### Records
//! ```bash
//! clawedit record enemy new slime_king -n "Slime King"
//! clawedit record enemy set slime_king level=12 tier=ELITE
//! clawedit record enemy link slime_king potion dropRate=0.25 rarity=RARE
//! clawedit record chest new old_chest --chest-type LARGE --respawn 600
//! ```
//!
//! ### Maps
//! ```bash
//! clawedit map new dark_forest -n "Dark Forest" --width 20 --height 15 --unsafe-area
//! clawedit map paint dark_forest 3 4 WATER
//! clawedit map place dark_forest 5 5 enemy slime
//! clawedit map show dark_forest
//! ```
//!
//! ### Images
//! The token of the image service is read from the configured token file.
//! ```bash
//! clawedit image "a pixel art slime, green, cute" --ratio 1:1 -o slime.png
//! ```
//!
use clap::Parser;
use cli::{Command, LogLevel, Opts};
use commands::{configuration, image, map, record};
use env_logger::Env;
use gamedata::config;
use gamedata::error::GameDataError;
use gamedata::{ApplicationRuntime, ApplicationRuntimeBuilder};
use log::debug;
use std::env;
use std::fs::File;
use std::path::PathBuf;
use std::process::exit;

mod cli;
mod commands;

#[tokio::main]
async fn main() {
    let opts: Opts = Opts::parse();

    configure_logging(&opts); // Handles the -v option

    let result = match opts.cmd {
        Command::Record(cmd) => record::execute(&mut get_runtime(opts.data_dir), cmd),
        Command::Map(cmd) => map::execute(&mut get_runtime(opts.data_dir), cmd),
        Command::Image(cmd) => {
            let app_config = match config::load_or_create() {
                Ok(app_config) => app_config,
                Err(e) => {
                    eprintln!("ERROR: Unable to load the configuration: {e}");
                    exit(1);
                }
            };
            match image::execute(&app_config, cmd).await {
                Ok(path) => {
                    println!("Image saved to {}", path.display());
                    Ok(())
                }
                Err(e) => {
                    eprintln!("ERROR: Image generation failed: {e}");
                    exit(1);
                }
            }
        }
        Command::Config(cfg) => configuration::execute(cfg.cmd),
    };

    if let Err(e) = result {
        eprintln!("ERROR: {e}");
        exit(1);
    }
}

/// Loads the configuration and every table
fn get_runtime(data_dir: Option<PathBuf>) -> ApplicationRuntime {
    let mut builder = ApplicationRuntimeBuilder::new();
    if let Some(data_dir) = data_dir {
        builder = builder.with_data_dir(data_dir);
    }
    match builder.build() {
        Ok(runtime) => runtime,
        Err(err) => {
            match err {
                GameDataError::ApplicationConfig { .. } | GameDataError::TomlParse { .. } => {
                    eprintln!(
                        "Unable to read the configuration file {}: {err}",
                        config::configuration_file().to_string_lossy()
                    );
                    eprintln!("Use 'clawedit config update' to fix it");
                }
                _ => {
                    eprintln!("Failed to load the game data: '{err}'");
                }
            }

            exit(1);
        }
    }
}

fn configure_logging(opts: &Opts) {
    let mut tmp_dir = env::temp_dir();
    tmp_dir.push("clawedit.log");

    if opts.verbosity.is_some() {
        println!("Logging to {}", &tmp_dir.to_string_lossy());
    }

    // If nothing else was specified in RUST_LOG, use 'warn'
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(
        opts.verbosity.map_or("warn", |lvl| match lvl {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }),
    ));
    match File::create(&tmp_dir) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => eprintln!("Can't create {}: {e}, logging to stderr", tmp_dir.display()),
    }
    builder.init();
    debug!("Logging started");
}
