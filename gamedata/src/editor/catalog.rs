//! Per-editor configuration: new-row templates, fields restricted to a fixed set of
//! values and the dependent link tables.
use crate::constants::{
    BOOLEANS, CHEST_TYPES, DAMAGE_TYPES, ENEMY_TIERS, EQUIPMENT_SLOTS, ITEM_EFFECTS, ITEM_TYPES,
    RARITIES, TARGET_TYPES,
};
use crate::editor::EditorKind;
use crate::schema::TableKind;

/// Describes a join table hanging off the rows of an editor's primary table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSpec {
    pub table: TableKind,
    /// Column holding the id of the owning row
    pub parent_column: &'static str,
    /// Column holding the id of the linked item, equipment or skill
    pub item_column: &'static str,
    pub label: &'static str,
    /// Remaining columns and the values used when none are given
    pub defaults: &'static [(&'static str, &'static str)],
    pub choices: &'static [(&'static str, &'static [&'static str])],
}

const LOOT_CHOICES: &[(&str, &[&str])] = &[("rarity", RARITIES)];

pub(crate) fn link_spec(kind: EditorKind) -> Option<LinkSpec> {
    match kind {
        EditorKind::Enemy => Some(LinkSpec {
            table: TableKind::EnemyLoot,
            parent_column: "enemyId",
            item_column: "itemId",
            label: "loot",
            defaults: &[("rarity", "COMMON"), ("dropRate", "0.5")],
            choices: LOOT_CHOICES,
        }),
        EditorKind::Npc => Some(LinkSpec {
            table: TableKind::NpcShopItems,
            parent_column: "npcId",
            item_column: "itemId",
            label: "shop item",
            defaults: &[("quantity", "1")],
            choices: &[],
        }),
        EditorKind::Chest => Some(LinkSpec {
            table: TableKind::ChestLoot,
            parent_column: "chestId",
            item_column: "itemId",
            label: "loot",
            defaults: &[
                ("rarity", "COMMON"),
                ("dropRate", "0.5"),
                ("minQuantity", "1"),
                ("maxQuantity", "1"),
            ],
            choices: LOOT_CHOICES,
        }),
        EditorKind::Gift => Some(LinkSpec {
            table: TableKind::GiftLoot,
            parent_column: "giftId",
            item_column: "itemId",
            label: "content",
            defaults: &[("rarity", "COMMON"), ("quantity", "1")],
            choices: LOOT_CHOICES,
        }),
        EditorKind::Role => Some(LinkSpec {
            table: TableKind::RoleSkills,
            parent_column: "roleId",
            item_column: "skillId",
            label: "skill",
            defaults: &[("learnLevel", "1")],
            choices: &[],
        }),
        EditorKind::Item | EditorKind::Equipment | EditorKind::Skill | EditorKind::Terrain => None,
    }
}

pub(crate) fn choice_fields(kind: EditorKind) -> &'static [(&'static str, &'static [&'static str])] {
    match kind {
        EditorKind::Enemy => &[("tier", ENEMY_TIERS)],
        EditorKind::Item => &[("type", ITEM_TYPES), ("effect", ITEM_EFFECTS)],
        EditorKind::Equipment => &[("slot", EQUIPMENT_SLOTS), ("rarity", RARITIES)],
        EditorKind::Npc => &[("hasShop", BOOLEANS), ("hasDialogue", BOOLEANS)],
        EditorKind::Chest => &[("type", CHEST_TYPES)],
        EditorKind::Gift => &[],
        EditorKind::Skill => &[("targetType", TARGET_TYPES), ("damageType", DAMAGE_TYPES)],
        EditorKind::Role => &[],
        EditorKind::Terrain => &[("passable", BOOLEANS)],
    }
}

/// Values of a freshly created row, apart from `id` and `name`
pub(crate) fn new_row_defaults(kind: EditorKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        EditorKind::Enemy => &[
            ("description", ""),
            ("level", "1"),
            ("tier", "NORMAL"),
            ("health", "100"),
            ("mana", "50"),
            ("physicalAttack", "10"),
            ("physicalDefense", "5"),
            ("magicAttack", "5"),
            ("magicDefense", "5"),
            ("speed", "100"),
            ("critRate", "0.05"),
            ("critDamage", "1.5"),
            ("hitRate", "0.9"),
            ("dodgeRate", "0.05"),
            ("skills", "normal_attack"),
            ("expMin", "10"),
            ("expMax", "15"),
            ("goldMin", "5"),
            ("goldMax", "10"),
            ("respawnSeconds", "60"),
            ("walkSprite", ""),
            ("portrait", ""),
        ],
        EditorKind::Item => &[
            ("description", ""),
            ("type", "CONSUMABLE"),
            ("maxStack", "99"),
            ("basePrice", "10"),
            ("effect", "NONE"),
            ("effectValue", "0"),
            ("icon", ""),
        ],
        EditorKind::Equipment => &[
            ("description", ""),
            ("basePrice", "100"),
            ("slot", "RIGHT_HAND"),
            ("rarity", "COMMON"),
            ("strength", "0"),
            ("agility", "0"),
            ("intelligence", "0"),
            ("vitality", "0"),
            ("physicalAttack", "0"),
            ("physicalDefense", "0"),
            ("magicAttack", "0"),
            ("magicDefense", "0"),
            ("speed", "0"),
            ("critRate", "0"),
            ("critDamage", "0"),
            ("hitRate", "0"),
            ("dodgeRate", "0"),
            ("icon", ""),
        ],
        EditorKind::Npc => &[
            ("description", ""),
            ("hasShop", "false"),
            ("hasDialogue", "true"),
            ("dialogues", "你好，旅行者！"),
            ("shopGold", "1000"),
            ("shopRefreshSeconds", "3600"),
            ("priceMultiplier", "1.0"),
            ("walkSprite", ""),
            ("portrait", ""),
        ],
        EditorKind::Chest => &[
            ("description", "一个宝箱"),
            ("type", "SMALL"),
            ("respawnSeconds", "0"),
            ("icon", ""),
        ],
        EditorKind::Gift => &[
            ("description", "一个礼包"),
            ("type", "GIFT"),
            ("maxStack", "1"),
            ("basePrice", "0"),
            ("effect", "OPEN_GIFT"),
            ("effectValue", ""),
        ],
        EditorKind::Skill => &[
            ("description", ""),
            ("targetType", "ENEMY_SINGLE"),
            ("damageType", "PHYSICAL"),
            ("manaCost", "10"),
            ("cooldown", "0"),
            ("damageMultiplier", "1.0"),
            ("vfx", ""),
        ],
        EditorKind::Role => &[
            ("description", ""),
            ("walkSprite", ""),
            ("portrait", ""),
            ("baseHealth", "100"),
            ("baseMana", "50"),
            ("basePhysicalAttack", "10"),
            ("basePhysicalDefense", "5"),
            ("baseMagicAttack", "5"),
            ("baseMagicDefense", "5"),
            ("baseSpeed", "100"),
            ("baseCritRate", "0.05"),
            ("baseCritDamage", "1.5"),
            ("baseHitRate", "0.9"),
            ("baseDodgeRate", "0.05"),
            ("healthPerLevel", "10"),
            ("manaPerLevel", "5"),
            ("physicalAttackPerLevel", "2"),
            ("physicalDefensePerLevel", "1"),
            ("magicAttackPerLevel", "1"),
            ("magicDefensePerLevel", "1"),
            ("speedPerLevel", "1"),
        ],
        EditorKind::Terrain => &[("icon", ""), ("passable", "true"), ("color", "#FFFFFF")],
    }
}

/// Fields a gift row always carries, whatever the user typed
pub(crate) const GIFT_FIXED_FIELDS: &[(&str, &str)] = &[
    ("type", "GIFT"),
    ("effect", "OPEN_GIFT"),
    ("maxStack", "1"),
    ("effectValue", ""),
];

pub(crate) const GIFT_DEFAULT_NAME: &str = "新礼包";
