//! Definitions of the game data tables: file names and the column sets used when a file
//! is missing or has no header.
use std::fmt::{self, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableKind {
    Maps,
    MapTerrain,
    MapEntities,
    Waypoints,
    TerrainTypes,
    Enemies,
    EnemyLoot,
    Items,
    Equipment,
    Npcs,
    NpcShopItems,
    Chests,
    ChestLoot,
    GiftLoot,
    Skills,
    Roles,
    RoleSkills,
}

impl TableKind {
    pub const ALL: [TableKind; 17] = [
        TableKind::Maps,
        TableKind::MapTerrain,
        TableKind::MapEntities,
        TableKind::Waypoints,
        TableKind::TerrainTypes,
        TableKind::Enemies,
        TableKind::EnemyLoot,
        TableKind::Items,
        TableKind::Equipment,
        TableKind::Npcs,
        TableKind::NpcShopItems,
        TableKind::Chests,
        TableKind::ChestLoot,
        TableKind::GiftLoot,
        TableKind::Skills,
        TableKind::Roles,
        TableKind::RoleSkills,
    ];

    /// Position of `self` in [`TableKind::ALL`]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            TableKind::Maps => "maps.csv",
            TableKind::MapTerrain => "map_terrain.csv",
            TableKind::MapEntities => "map_entities.csv",
            TableKind::Waypoints => "waypoints.csv",
            TableKind::TerrainTypes => "terrain_types.csv",
            TableKind::Enemies => "enemies.csv",
            TableKind::EnemyLoot => "enemy_loot.csv",
            TableKind::Items => "items.csv",
            TableKind::Equipment => "equipment.csv",
            TableKind::Npcs => "npcs.csv",
            TableKind::NpcShopItems => "npc_shop_items.csv",
            TableKind::Chests => "chests.csv",
            TableKind::ChestLoot => "chest_loot.csv",
            TableKind::GiftLoot => "gift_loot.csv",
            TableKind::Skills => "skills.csv",
            TableKind::Roles => "roles.csv",
            TableKind::RoleSkills => "role_skills.csv",
        }
    }

    /// Columns written when the file on disk does not provide a header
    #[must_use]
    pub fn default_columns(self) -> &'static [&'static str] {
        match self {
            TableKind::Maps => &[
                "id",
                "name",
                "description",
                "width",
                "height",
                "isSafe",
                "recommendedLevel",
                "defaultTerrain",
            ],
            TableKind::MapTerrain => &["mapId", "x1", "y1", "x2", "y2", "terrainTypes"],
            TableKind::MapEntities => &["mapId", "x", "y", "entityType", "entityId", "instanceId"],
            TableKind::Waypoints => &[
                "id",
                "mapId",
                "name",
                "description",
                "x",
                "y",
                "connectedWaypointIds",
            ],
            TableKind::TerrainTypes => &["id", "name", "icon", "passable", "color"],
            TableKind::Enemies => &[
                "id",
                "name",
                "description",
                "level",
                "tier",
                "health",
                "mana",
                "physicalAttack",
                "physicalDefense",
                "magicAttack",
                "magicDefense",
                "speed",
                "critRate",
                "critDamage",
                "hitRate",
                "dodgeRate",
                "skills",
                "expMin",
                "expMax",
                "goldMin",
                "goldMax",
                "respawnSeconds",
                "walkSprite",
                "portrait",
            ],
            TableKind::EnemyLoot => &["enemyId", "itemId", "rarity", "dropRate"],
            TableKind::Items => &[
                "id",
                "name",
                "description",
                "type",
                "maxStack",
                "basePrice",
                "effect",
                "effectValue",
                "icon",
            ],
            TableKind::Equipment => &[
                "id",
                "name",
                "description",
                "basePrice",
                "slot",
                "rarity",
                "strength",
                "agility",
                "intelligence",
                "vitality",
                "physicalAttack",
                "physicalDefense",
                "magicAttack",
                "magicDefense",
                "speed",
                "critRate",
                "critDamage",
                "hitRate",
                "dodgeRate",
                "icon",
            ],
            TableKind::Npcs => &[
                "id",
                "name",
                "description",
                "hasShop",
                "hasDialogue",
                "dialogues",
                "shopGold",
                "shopRefreshSeconds",
                "priceMultiplier",
                "walkSprite",
                "portrait",
            ],
            TableKind::NpcShopItems => &["npcId", "itemId", "quantity"],
            TableKind::Chests => &["id", "name", "description", "type", "respawnSeconds", "icon"],
            TableKind::ChestLoot => &[
                "chestId",
                "itemId",
                "rarity",
                "dropRate",
                "minQuantity",
                "maxQuantity",
            ],
            TableKind::GiftLoot => &["giftId", "itemId", "rarity", "quantity"],
            TableKind::Skills => &[
                "id",
                "name",
                "description",
                "targetType",
                "damageType",
                "manaCost",
                "cooldown",
                "damageMultiplier",
                "vfx",
            ],
            TableKind::Roles => &[
                "id",
                "name",
                "description",
                "baseHealth",
                "baseMana",
                "basePhysicalAttack",
                "basePhysicalDefense",
                "baseMagicAttack",
                "baseMagicDefense",
                "baseSpeed",
                "baseCritRate",
                "baseCritDamage",
                "baseHitRate",
                "baseDodgeRate",
                "healthPerLevel",
                "manaPerLevel",
                "physicalAttackPerLevel",
                "physicalDefensePerLevel",
                "magicAttackPerLevel",
                "magicDefensePerLevel",
                "speedPerLevel",
                "critRatePerLevel",
                "critDamagePerLevel",
                "hitRatePerLevel",
                "dodgeRatePerLevel",
                "walkSprite",
                "portrait",
            ],
            TableKind::RoleSkills => &["roleId", "skillId", "learnLevel"],
        }
    }

    #[must_use]
    pub fn default_column_names(self) -> Vec<String> {
        self.default_columns()
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}
