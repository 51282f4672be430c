//! Fixed vocabularies of the game data and the terrain palette derived from the
//! terrain type table.
use std::collections::{HashMap, HashSet};
use std::fmt::{self, Formatter};
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::GameDataError;
use crate::schema::TableKind;
use crate::types::Table;

pub const ENEMY_TIERS: &[&str] = &["NORMAL", "ELITE", "MAP_BOSS", "SERVER_BOSS"];

pub const ITEM_TYPES: &[&str] = &["CONSUMABLE", "MATERIAL", "SKILL_BOOK", "GIFT"];

pub const ITEM_EFFECTS: &[&str] = &[
    "HEAL_HP",
    "HEAL_MP",
    "LEARN_SKILL",
    "RESET_ATTRIBUTES",
    "OPEN_GIFT",
    "NONE",
];

pub const EQUIPMENT_SLOTS: &[&str] = &[
    "HEAD",
    "CHEST",
    "LEGS",
    "FEET",
    "LEFT_HAND",
    "RIGHT_HAND",
    "ACCESSORY1",
    "ACCESSORY2",
];

pub const RARITIES: &[&str] = &["COMMON", "EXCELLENT", "RARE", "EPIC", "LEGENDARY", "MYTHIC"];

pub const TARGET_TYPES: &[&str] = &["ENEMY_SINGLE", "ENEMY_ALL", "ALLY_SINGLE", "ALLY_ALL", "SELF"];

pub const DAMAGE_TYPES: &[&str] = &["PHYSICAL", "MAGICAL", "NONE"];

pub const CHEST_TYPES: &[&str] = &["SMALL", "LARGE"];

pub const BOOLEANS: &[&str] = &["true", "false"];

/// Used when a map row has no default terrain
pub const DEFAULT_TERRAIN: &str = "GRASS";

/// Colour of cells whose terrain has no configured colour
pub const UNKNOWN_COLOR: &str = "#FFFFFF";

#[must_use]
pub fn rarity_color(rarity: &str) -> &'static str {
    match rarity {
        "COMMON" => "#FFFFFF",
        "EXCELLENT" => "#00FF00",
        "RARE" => "#0000FF",
        "EPIC" => "#800080",
        "LEGENDARY" => "#FFA500",
        "MYTHIC" => "#FF0000",
        _ => UNKNOWN_COLOR,
    }
}

/// Kinds of things which may be placed on a map cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Waypoint,
    Npc,
    Enemy,
    Campfire,
    ChestSmall,
    ChestLarge,
}

impl EntityType {
    pub const ALL: [EntityType; 6] = [
        EntityType::Waypoint,
        EntityType::Npc,
        EntityType::Enemy,
        EntityType::Campfire,
        EntityType::ChestSmall,
        EntityType::ChestLarge,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Waypoint => "WAYPOINT",
            EntityType::Npc => "NPC",
            EntityType::Enemy => "ENEMY",
            EntityType::Campfire => "CAMPFIRE",
            EntityType::ChestSmall => "CHEST_SMALL",
            EntityType::ChestLarge => "CHEST_LARGE",
        }
    }

    /// Marker colour on the map canvas
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            EntityType::Waypoint => "#FFD700",
            EntityType::Npc => "#00FF00",
            EntityType::Enemy => "#FF0000",
            EntityType::Campfire => "#FF4500",
            EntityType::ChestSmall => "#8B4513",
            EntityType::ChestLarge => "#DAA520",
        }
    }

    /// Single character used by the text renderings of a map
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            EntityType::Waypoint => 'W',
            EntityType::Npc => 'N',
            EntityType::Enemy => 'E',
            EntityType::Campfire => 'F',
            EntityType::ChestSmall => 'c',
            EntityType::ChestLarge => 'C',
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = GameDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameDataError::InvalidValue {
                field: "entityType".into(),
                value: s.to_string(),
                allowed: EntityType::ALL
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

lazy_static! {
    static ref COLOR_RE: Regex =
        Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").expect("valid colour regex");
}

/// Is `color` written as `#RGB` or `#RRGGBB`?
#[must_use]
pub fn is_valid_color(color: &str) -> bool {
    COLOR_RE.is_match(color)
}

/// Converts a `#RGB` or `#RRGGBB` colour into its components
#[must_use]
pub fn parse_color(color: &str) -> Option<(u8, u8, u8)> {
    if !is_valid_color(color) {
        return None;
    }
    let hex = &color[1..];
    if hex.len() == 3 {
        let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
        Some((digit(0)?, digit(1)?, digit(2)?))
    } else {
        let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some((pair(0)?, pair(2)?, pair(4)?))
    }
}

/// Terrain types known to the game, built from the terrain type table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerrainPalette {
    pub types: Vec<String>,
    pub passable: HashSet<String>,
    pub colors: HashMap<String, String>,
}

impl TerrainPalette {
    #[must_use]
    pub fn from_table(table: &Table) -> Self {
        debug_assert_eq!(table.kind, TableKind::TerrainTypes);
        let mut palette = TerrainPalette::default();
        for row in &table.rows {
            let id = row.id().to_string();
            if row.get_bool("passable", true) {
                palette.passable.insert(id.clone());
            }
            if !row.get("color").is_empty() {
                palette.colors.insert(id.clone(), row.get("color").to_string());
            }
            palette.types.push(id);
        }
        palette
    }

    #[must_use]
    pub fn contains(&self, terrain: &str) -> bool {
        self.types.iter().any(|t| t == terrain)
    }

    #[must_use]
    pub fn is_passable(&self, terrain: &str) -> bool {
        self.passable.contains(terrain)
    }

    #[must_use]
    pub fn color_of(&self, terrain: &str) -> &str {
        self.colors.get(terrain).map_or(UNKNOWN_COLOR, String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Row;

    #[test]
    fn entity_type_parses_case_insensitively() {
        assert_eq!("chest_large".parse::<EntityType>().ok(), Some(EntityType::ChestLarge));
        assert!("DRAGON".parse::<EntityType>().is_err());
    }

    #[test]
    fn every_rarity_has_a_parsable_color() {
        for rarity in RARITIES {
            assert!(parse_color(rarity_color(rarity)).is_some(), "{rarity}");
        }
        assert_eq!(rarity_color("MYTHIC"), "#FF0000");
        assert_eq!(rarity_color("SHINY"), UNKNOWN_COLOR);
    }

    #[test]
    fn colors_are_validated() {
        assert!(is_valid_color("#90EE90"));
        assert!(is_valid_color("#fff"));
        assert!(!is_valid_color("green"));
        assert!(!is_valid_color("#12345"));
        assert_eq!(parse_color("#1E90FF"), Some((0x1E, 0x90, 0xFF)));
        assert_eq!(parse_color("#f0a"), Some((0xFF, 0x00, 0xAA)));
    }

    #[test]
    fn palette_defaults_to_passable() {
        let mut table = Table::empty(TableKind::TerrainTypes);
        table.push(Row::from_pairs([("id", "GRASS"), ("color", "#90EE90")]));
        table.push(Row::from_pairs([("id", "WATER"), ("passable", "FALSE")]));

        let palette = TerrainPalette::from_table(&table);
        assert_eq!(palette.types, vec!["GRASS", "WATER"]);
        assert!(palette.is_passable("GRASS"));
        assert!(!palette.is_passable("WATER"));
        assert_eq!(palette.color_of("WATER"), UNKNOWN_COLOR);
        assert_eq!(palette.color_of("GRASS"), "#90EE90");
    }
}
