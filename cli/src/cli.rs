use std::fmt::{self, Formatter};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use gamedata::constants::EntityType;
use gamedata::editor::EditorKind;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub(crate) enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Parser)]
/// ClawWorld game data editor - create, change and delete the records of the game's CSV tables
///
/// Every command loads the tables from the data directory, applies the change and writes the
/// affected tables back before exiting.
///
/// Map coordinates are cell indices with (0, 0) in the bottom left corner.
/// Fields are given as `column=value`, i.e. `level=5 tier=ELITE`.
///
#[command(author, version, about)] // Read from Cargo.toml
pub(crate) struct Opts {
    #[command(subcommand)]
    pub cmd: Command,

    #[arg(global = true, short, long)]
    pub verbosity: Option<LogLevel>,

    /// Directory holding the CSV files, overrides the configuration file
    #[arg(global = true, long)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Enemies, items, equipment, NPCs, chests, gifts, skills, roles and terrain types
    Record(Record),
    /// Maps, their terrain, entities and waypoints
    Map(Map),
    /// Generate an image from a text prompt
    Image(Image),
    /// Subcommands for configuration
    Config(Config),
}

/// Command line names of the record editors
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub(crate) enum EditorArg {
    Enemy,
    Item,
    Equipment,
    Npc,
    Chest,
    Gift,
    Skill,
    Role,
    Terrain,
}

impl From<EditorArg> for EditorKind {
    fn from(arg: EditorArg) -> Self {
        match arg {
            EditorArg::Enemy => EditorKind::Enemy,
            EditorArg::Item => EditorKind::Item,
            EditorArg::Equipment => EditorKind::Equipment,
            EditorArg::Npc => EditorKind::Npc,
            EditorArg::Chest => EditorKind::Chest,
            EditorArg::Gift => EditorKind::Gift,
            EditorArg::Skill => EditorKind::Skill,
            EditorArg::Role => EditorKind::Role,
            EditorArg::Terrain => EditorKind::Terrain,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub(crate) enum EntityArg {
    Waypoint,
    Npc,
    Enemy,
    Campfire,
    ChestSmall,
    ChestLarge,
}

impl From<EntityArg> for EntityType {
    fn from(arg: EntityArg) -> Self {
        match arg {
            EntityArg::Waypoint => EntityType::Waypoint,
            EntityArg::Npc => EntityType::Npc,
            EntityArg::Enemy => EntityType::Enemy,
            EntityArg::Campfire => EntityType::Campfire,
            EntityArg::ChestSmall => EntityType::ChestSmall,
            EntityArg::ChestLarge => EntityType::ChestLarge,
        }
    }
}

#[derive(Args)]
pub(crate) struct Record {
    /// Which editor to use
    #[arg(value_enum)]
    pub editor: EditorArg,
    #[command(subcommand)]
    pub cmd: RecordCommand,
}

#[derive(Subcommand)]
pub(crate) enum RecordCommand {
    /// List all records as `id - name`
    List,
    /// Show every field of a record and its linked entries
    Show { id: String },
    /// Create a record from the editor's defaults
    New(NewRecordArgs),
    /// Change fields of a record: `column=value ...`
    Set {
        id: String,
        #[arg(required = true, num_args(1..))]
        fields: Vec<String>,
    },
    /// Delete a record together with its loot, stock, contents or skills
    Delete { id: String },
    /// Add or replace a linked entry (loot, shop item, gift content or role skill)
    Link {
        id: String,
        /// Item, equipment or skill id
        item: String,
        /// Extra columns of the link, i.e. `dropRate=0.3 rarity=RARE`
        fields: Vec<String>,
    },
    /// Remove a linked entry
    Unlink { id: String, item: String },
    /// List the ids which can be linked
    Options,
}

#[derive(Args)]
pub(crate) struct NewRecordArgs {
    pub id: String,
    #[arg(short, long, default_value = "")]
    pub name: String,
    #[arg(short, long)]
    pub description: Option<String>,
    /// Chests only: SMALL or LARGE
    #[arg(long)]
    pub chest_type: Option<String>,
    /// Chests only, used for LARGE chests
    #[arg(long)]
    pub respawn: Option<String>,
}

#[derive(Args)]
pub(crate) struct Map {
    #[command(subcommand)]
    pub cmd: MapCommand,
}

#[derive(Subcommand)]
pub(crate) enum MapCommand {
    /// List all maps
    List,
    /// Print a map: terrain initials, entity glyphs or counts
    Show { map: String },
    /// Create a map
    New(NewMapArgs),
    /// Change properties of a map: `name=... width=... isSafe=false ...`
    Set {
        map: String,
        #[arg(required = true, num_args(1..))]
        fields: Vec<String>,
    },
    /// Delete a map with its terrain, entities and waypoints
    Delete { map: String },
    /// Set the terrain of a single cell
    Paint {
        map: String,
        x: i64,
        y: i64,
        terrain: String,
    },
    /// Place an entity on a cell
    Place {
        map: String,
        x: i64,
        y: i64,
        #[arg(value_enum)]
        entity_type: EntityArg,
        entity_id: String,
    },
    /// Show terrain and entities of a cell
    Cell { map: String, x: i64, y: i64 },
    /// Remove entities from a cell
    Remove {
        map: String,
        x: i64,
        y: i64,
        /// Position of the entity as listed by `map cell`
        #[arg(short, long, conflicts_with = "all")]
        index: Option<usize>,
        /// Remove every entity on the cell
        #[arg(short, long)]
        all: bool,
    },
    /// List the ids which can be placed for an entity type
    Options {
        #[arg(value_enum)]
        entity_type: EntityArg,
    },
    /// Register a waypoint on a map
    Waypoint(NewWaypointArgs),
    /// Replace the connections of a waypoint
    Connect {
        waypoint: String,
        /// Waypoints reachable from this one, none to clear
        targets: Vec<String>,
    },
}

#[derive(Args)]
pub(crate) struct NewMapArgs {
    pub id: String,
    #[arg(short, long, default_value = "")]
    pub name: String,
    #[arg(short, long, default_value = "")]
    pub description: String,
    #[arg(long, default_value = "10")]
    pub width: String,
    #[arg(long, default_value = "10")]
    pub height: String,
    #[arg(long, default_value = "1")]
    pub level: String,
    /// Mark the map as a combat area
    #[arg(long)]
    pub unsafe_area: bool,
    #[arg(long, default_value = "GRASS")]
    pub terrain: String,
}

#[derive(Args)]
pub(crate) struct NewWaypointArgs {
    pub id: String,
    pub map: String,
    pub x: i64,
    pub y: i64,
    #[arg(short, long, default_value = "")]
    pub name: String,
    #[arg(short, long, default_value = "")]
    pub description: String,
}

#[derive(Args)]
pub(crate) struct Image {
    /// Description of the image
    pub prompt: String,
    /// Output file, default is generated_<timestamp>.png in the configured output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Aspect ratio, i.e. 1:1, 9:16 or 16:9
    #[arg(long)]
    pub ratio: Option<String>,
    /// Image size, i.e. 0.5K or 1K
    #[arg(long)]
    pub size: Option<String>,
}

#[derive(Args)]
pub(crate) struct Config {
    #[command(subcommand)]
    pub cmd: ConfigCommand,
}

/// Create, modify or list the configuration file.
#[derive(Subcommand, Clone)]
pub(crate) enum ConfigCommand {
    /// Update the configuration file, creating it if needed
    Update(UpdateConfiguration),
    /// write current configuration to standard output
    List,
    /// Remove the current configuration
    Remove,
}

#[derive(Args, Clone)]
pub(crate) struct UpdateConfiguration {
    /// Directory holding the game's CSV files
    #[arg(long, value_name = "DIR")]
    pub data: Option<String>,
    /// Base URL of the image service
    #[arg(long)]
    pub image_host: Option<String>,
    #[arg(long)]
    pub image_model: Option<String>,
    /// File holding the image service token
    #[arg(long)]
    pub token_file: Option<String>,
    #[arg(long)]
    pub aspect_ratio: Option<String>,
    #[arg(long)]
    pub image_size: Option<String>,
    /// Where generated images are written
    #[arg(long)]
    pub output_dir: Option<String>,
}
