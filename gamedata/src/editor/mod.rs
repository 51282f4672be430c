//! Record editors for the keyed game data tables.
//!
//! Every editor follows the same cycle: list the rows of its table, pick one by id,
//! change some of its fields, and write the table back to disk. The differences between
//! the editors (default values, restricted fields, dependent tables) live in [`catalog`].
//!
//! ```rust,ignore
//! let editor = RecordEditor::new(EditorKind::Enemy);
//! editor.create(&mut db, &NewRecord::new("slime", "Slime"))?;
//! editor.update(&mut db, "slime", &[("level".into(), "3".into())])?;
//! editor.upsert_link(&mut db, "slime", "gel", &[])?;
//! editor.save(&db)?;
//! ```
use std::fmt::{self, Formatter};
use std::str::FromStr;

use log::{debug, info};

use crate::constants::{is_valid_color, CHEST_TYPES};
use crate::error::GameDataError;
use crate::repository::database::GameDatabase;
use crate::schema::TableKind;
use crate::types::Row;

pub mod catalog;
pub mod link;

pub use catalog::LinkSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorKind {
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

impl EditorKind {
    pub const ALL: [EditorKind; 9] = [
        EditorKind::Enemy,
        EditorKind::Item,
        EditorKind::Equipment,
        EditorKind::Npc,
        EditorKind::Chest,
        EditorKind::Gift,
        EditorKind::Skill,
        EditorKind::Role,
        EditorKind::Terrain,
    ];

    /// Table holding the rows listed by this editor
    #[must_use]
    pub fn primary_table(self) -> TableKind {
        match self {
            EditorKind::Enemy => TableKind::Enemies,
            EditorKind::Item | EditorKind::Gift => TableKind::Items,
            EditorKind::Equipment => TableKind::Equipment,
            EditorKind::Npc => TableKind::Npcs,
            EditorKind::Chest => TableKind::Chests,
            EditorKind::Skill => TableKind::Skills,
            EditorKind::Role => TableKind::Roles,
            EditorKind::Terrain => TableKind::TerrainTypes,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EditorKind::Enemy => "enemy",
            EditorKind::Item => "item",
            EditorKind::Equipment => "equipment",
            EditorKind::Npc => "npc",
            EditorKind::Chest => "chest",
            EditorKind::Gift => "gift",
            EditorKind::Skill => "skill",
            EditorKind::Role => "role",
            EditorKind::Terrain => "terrain",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            EditorKind::Enemy => "Enemies",
            EditorKind::Item => "Items",
            EditorKind::Equipment => "Equipment",
            EditorKind::Npc => "NPCs",
            EditorKind::Chest => "Chests",
            EditorKind::Gift => "Gifts",
            EditorKind::Skill => "Skills",
            EditorKind::Role => "Roles",
            EditorKind::Terrain => "Terrain",
        }
    }

    #[must_use]
    pub fn link(self) -> Option<LinkSpec> {
        catalog::link_spec(self)
    }

    /// Tables written when the editor saves
    #[must_use]
    pub fn tables(self) -> Vec<TableKind> {
        let mut tables = vec![self.primary_table()];
        if let Some(link) = self.link() {
            tables.push(link.table);
        }
        tables
    }

    /// Allowed values of `field`, if it is restricted
    #[must_use]
    pub fn choices(self, field: &str) -> Option<&'static [&'static str]> {
        catalog::choice_fields(self)
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, values)| *values)
    }
}

impl fmt::Display for EditorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for EditorKind {
    type Err = GameDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EditorKind::ALL
            .iter()
            .copied()
            .find(|k| k.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameDataError::BadInput(format!("unknown editor '{s}'")))
    }
}

/// What the user supplies when creating a row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecord {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Chests only: `SMALL` or `LARGE`
    pub chest_type: Option<String>,
    /// Chests only: kept for `LARGE` chests
    pub respawn_seconds: Option<String>,
}

impl NewRecord {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        NewRecord {
            id: id.into(),
            name: name.into(),
            ..NewRecord::default()
        }
    }
}

/// Create, update and delete operations shared by all record editors
#[derive(Debug, Clone, Copy)]
pub struct RecordEditor {
    kind: EditorKind,
}

impl RecordEditor {
    #[must_use]
    pub fn new(kind: EditorKind) -> Self {
        RecordEditor { kind }
    }

    #[must_use]
    pub fn kind(&self) -> EditorKind {
        self.kind
    }

    fn is_listed(&self, row: &Row) -> bool {
        match self.kind {
            EditorKind::Gift => row.get("type") == "GIFT",
            _ => true,
        }
    }

    /// Rows shown in the editor's list, in file order
    #[must_use]
    pub fn records<'d>(&self, db: &'d GameDatabase) -> Vec<&'d Row> {
        db.table(self.kind.primary_table())
            .rows
            .iter()
            .filter(|r| self.is_listed(r))
            .collect()
    }

    /// One line per listed row: `id - name`, prefixed by the size for chests
    #[must_use]
    pub fn labels(&self, db: &GameDatabase) -> Vec<String> {
        self.records(db)
            .into_iter()
            .map(|r| match self.kind {
                EditorKind::Chest => format!("[{}] {} - {}", r.get("type"), r.id(), r.get("name")),
                _ => format!("{} - {}", r.id(), r.get("name")),
            })
            .collect()
    }

    #[must_use]
    pub fn get<'d>(&self, db: &'d GameDatabase, id: &str) -> Option<&'d Row> {
        db.table(self.kind.primary_table())
            .find(id)
            .filter(|r| self.is_listed(r))
    }

    /// Columns of the primary table, in file order
    #[must_use]
    pub fn columns<'d>(&self, db: &'d GameDatabase) -> &'d [String] {
        &db.table(self.kind.primary_table()).columns
    }

    fn not_found(&self, id: &str) -> GameDataError {
        GameDataError::NotFound {
            label: self.kind.label().to_string(),
            id: id.to_string(),
        }
    }

    /// Adds a row built from the editor's defaults.
    ///
    /// # Errors
    /// * `MissingField` if the id is blank
    /// * `DuplicateId` if the id is already used in the primary table
    /// * `InvalidValue` for an unknown chest type
    pub fn create(&self, db: &mut GameDatabase, new: &NewRecord) -> Result<Row, GameDataError> {
        let mut id = new.id.trim().to_string();
        if self.kind == EditorKind::Terrain {
            id = id.to_uppercase();
        }
        if id.is_empty() {
            return Err(GameDataError::MissingField(format!("{} id", self.kind.label())));
        }

        let table = db.table_mut(self.kind.primary_table());
        if table.contains_id(&id) {
            return Err(GameDataError::DuplicateId {
                label: self.kind.label().to_string(),
                id,
            });
        }

        let mut row = Row::new();
        row.set("id", id.as_str());
        row.set("name", new.name.as_str());
        for (column, value) in catalog::new_row_defaults(self.kind) {
            row.set(*column, *value);
        }
        if let Some(description) = &new.description {
            row.set("description", description.as_str());
        }

        match self.kind {
            EditorKind::Chest => {
                let chest_type = new.chest_type.as_deref().unwrap_or("SMALL").to_uppercase();
                check_choice("type", &chest_type, CHEST_TYPES)?;
                let respawn = if chest_type == "LARGE" {
                    new.respawn_seconds.clone().unwrap_or_else(|| "0".to_string())
                } else {
                    "0".to_string()
                };
                row.set("type", chest_type);
                row.set("respawnSeconds", respawn);
            }
            EditorKind::Gift => {
                if new.name.trim().is_empty() {
                    row.set("name", catalog::GIFT_DEFAULT_NAME);
                }
                if new.description.as_deref().is_some_and(|d| d.trim().is_empty()) {
                    if let Some((_, d)) = catalog::new_row_defaults(self.kind)
                        .iter()
                        .find(|(c, _)| *c == "description")
                    {
                        row.set("description", *d);
                    }
                }
            }
            _ => {}
        }

        table.push(row.clone());
        info!("Created {} {}", self.kind.label(), id);
        Ok(row)
    }

    /// Writes `fields` into the row identified by `id`.
    ///
    /// # Errors
    /// * `NotFound` if no listed row has the id
    /// * `BadInput` when trying to change the id or a column the table does not have
    /// * `InvalidValue` when a restricted field gets a value outside its set
    pub fn update(
        &self,
        db: &mut GameDatabase,
        id: &str,
        fields: &[(String, String)],
    ) -> Result<(), GameDataError> {
        if self.get(db, id).is_none() {
            return Err(self.not_found(id));
        }

        let columns = self.columns(db).to_vec();
        for (field, value) in fields {
            if field == "id" {
                return Err(GameDataError::BadInput(format!(
                    "the id of {} '{id}' cannot be changed",
                    self.kind.label()
                )));
            }
            if !columns.iter().any(|c| c == field) {
                return Err(GameDataError::BadInput(format!(
                    "{} has no field '{field}'",
                    self.kind.primary_table()
                )));
            }
            if let Some(allowed) = self.kind.choices(field) {
                check_choice(field, value, allowed)?;
            }
            if self.kind == EditorKind::Terrain && field == "color" && !is_valid_color(value) {
                return Err(GameDataError::InvalidValue {
                    field: field.clone(),
                    value: value.clone(),
                    allowed: "#RGB or #RRGGBB".to_string(),
                });
            }
        }

        let row = db
            .table_mut(self.kind.primary_table())
            .find_mut(id)
            .ok_or_else(|| self.not_found(id))?;
        for (field, value) in fields {
            row.set(field.as_str(), value.as_str());
        }
        if self.kind == EditorKind::Gift {
            for (field, value) in catalog::GIFT_FIXED_FIELDS {
                row.set(*field, *value);
            }
        }
        debug!("Updated {} fields of {} {id}", fields.len(), self.kind.label());
        Ok(())
    }

    /// Removes the row and every link row owned by it.
    ///
    /// # Errors
    /// `NotFound` if no listed row has the id.
    pub fn delete(&self, db: &mut GameDatabase, id: &str) -> Result<(), GameDataError> {
        if self.get(db, id).is_none() {
            return Err(self.not_found(id));
        }
        db.table_mut(self.kind.primary_table())
            .remove_where(|r| r.id() == id);

        if let Some(link) = self.kind.link() {
            let removed = db
                .table_mut(link.table)
                .remove_where(|r| r.get(link.parent_column) == id);
            debug!("Removed {removed} rows from {} owned by {id}", link.table);
        }
        info!("Deleted {} {id}", self.kind.label());
        Ok(())
    }

    /// Writes the primary table and the link table, if any.
    ///
    /// # Errors
    /// Fails if any of the tables cannot be written.
    pub fn save(&self, db: &GameDatabase) -> Result<(), GameDataError> {
        db.save(&self.kind.tables())?;
        info!("{} data saved", self.kind.title());
        Ok(())
    }
}

pub(crate) fn check_choice(field: &str, value: &str, allowed: &[&str]) -> Result<(), GameDataError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(GameDataError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            allowed: allowed.join(", "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryTableRepository;
    use std::sync::Arc;

    fn empty_db() -> GameDatabase {
        GameDatabase::open(Arc::new(MemoryTableRepository::new())).expect("in-memory database")
    }

    #[test]
    fn blank_id_is_rejected() {
        let mut db = empty_db();
        let editor = RecordEditor::new(EditorKind::Skill);
        let err = editor.create(&mut db, &NewRecord::new("   ", "Nothing"));
        assert!(matches!(err, Err(GameDataError::MissingField(_))));
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut db = empty_db();
        let editor = RecordEditor::new(EditorKind::Item);
        editor
            .create(&mut db, &NewRecord::new("potion", "Potion"))
            .expect("first create");
        let err = editor.create(&mut db, &NewRecord::new(" potion ", "Potion again"));
        assert!(matches!(err, Err(GameDataError::DuplicateId { .. })));
        assert_eq!(editor.records(&db).len(), 1);
    }

    #[test]
    fn new_rows_get_defaults() {
        let mut db = empty_db();
        let row = RecordEditor::new(EditorKind::Enemy)
            .create(&mut db, &NewRecord::new("slime", "Slime"))
            .expect("create");
        assert_eq!(row.get("tier"), "NORMAL");
        assert_eq!(row.get("skills"), "normal_attack");
        assert_eq!(row.get("respawnSeconds"), "60");
    }

    #[test]
    fn terrain_ids_are_upper_cased() {
        let mut db = empty_db();
        let editor = RecordEditor::new(EditorKind::Terrain);
        let row = editor
            .create(&mut db, &NewRecord::new("lava", "岩浆"))
            .expect("create");
        assert_eq!(row.id(), "LAVA");
        assert_eq!(row.get("color"), "#FFFFFF");
        assert!(matches!(
            editor.create(&mut db, &NewRecord::new("LAVA", "")),
            Err(GameDataError::DuplicateId { .. })
        ));
    }

    #[test]
    fn small_chests_never_respawn() {
        let mut db = empty_db();
        let editor = RecordEditor::new(EditorKind::Chest);
        let small = editor
            .create(
                &mut db,
                &NewRecord {
                    chest_type: Some("small".into()),
                    respawn_seconds: Some("300".into()),
                    ..NewRecord::new("box", "Box")
                },
            )
            .expect("small chest");
        let large = editor
            .create(
                &mut db,
                &NewRecord {
                    chest_type: Some("LARGE".into()),
                    respawn_seconds: Some("300".into()),
                    ..NewRecord::new("vault", "Vault")
                },
            )
            .expect("large chest");
        assert_eq!(small.get("respawnSeconds"), "0");
        assert_eq!(large.get("respawnSeconds"), "300");
        assert_eq!(editor.labels(&db)[1], "[LARGE] vault - Vault");
    }

    #[test]
    fn restricted_fields_are_validated() {
        let mut db = empty_db();
        let editor = RecordEditor::new(EditorKind::Equipment);
        editor
            .create(&mut db, &NewRecord::new("sword", "Sword"))
            .expect("create");

        let bad = editor.update(&mut db, "sword", &[("slot".into(), "TAIL".into())]);
        assert!(matches!(bad, Err(GameDataError::InvalidValue { .. })));

        editor
            .update(&mut db, "sword", &[("slot".into(), "LEFT_HAND".into())])
            .expect("valid slot");
        assert_eq!(editor.get(&db, "sword").map(|r| r.get("slot")), Some("LEFT_HAND"));
    }

    #[test]
    fn id_and_unknown_columns_cannot_be_updated() {
        let mut db = empty_db();
        let editor = RecordEditor::new(EditorKind::Skill);
        editor
            .create(&mut db, &NewRecord::new("fireball", "Fireball"))
            .expect("create");
        assert!(editor
            .update(&mut db, "fireball", &[("id".into(), "ice".into())])
            .is_err());
        assert!(editor
            .update(&mut db, "fireball", &[("colour".into(), "red".into())])
            .is_err());
        assert!(matches!(
            editor.update(&mut db, "nothing", &[]),
            Err(GameDataError::NotFound { .. })
        ));
    }

    #[test]
    fn gifts_live_among_items() {
        let mut db = empty_db();
        RecordEditor::new(EditorKind::Item)
            .create(&mut db, &NewRecord::new("potion", "Potion"))
            .expect("item");
        let gifts = RecordEditor::new(EditorKind::Gift);
        let gift = gifts
            .create(&mut db, &NewRecord::new("starter_pack", ""))
            .expect("gift");
        assert_eq!(gift.get("name"), catalog::GIFT_DEFAULT_NAME);
        assert_eq!(gift.get("effect"), "OPEN_GIFT");

        assert!(matches!(
            gifts.create(&mut db, &NewRecord::new("potion", "Not a gift")),
            Err(GameDataError::DuplicateId { .. })
        ));
        assert_eq!(gifts.records(&db).len(), 1);
        assert!(gifts.get(&db, "potion").is_none());

        gifts
            .update(
                &mut db,
                "starter_pack",
                &[("type".into(), "MATERIAL".into()), ("name".into(), "Starter".into())],
            )
            .expect("update gift");
        let row = gifts.get(&db, "starter_pack").expect("still a gift");
        assert_eq!(row.get("type"), "GIFT");
        assert_eq!(row.get("name"), "Starter");
    }

    #[test]
    fn terrain_color_must_be_hex() {
        let mut db = empty_db();
        let editor = RecordEditor::new(EditorKind::Terrain);
        editor
            .create(&mut db, &NewRecord::new("SAND", "沙地"))
            .expect("create");
        assert!(editor
            .update(&mut db, "SAND", &[("color".into(), "yellow".into())])
            .is_err());
        editor
            .update(&mut db, "SAND", &[("color".into(), "#F4A460".into())])
            .expect("hex colour");
    }

    #[test]
    fn editor_kind_parses_from_label() {
        assert_eq!("NPC".parse::<EditorKind>().ok(), Some(EditorKind::Npc));
        assert!("map".parse::<EditorKind>().is_err());
    }
}
