//! Editing of the join tables owned by enemies, NPCs, chests, gifts and roles
//! (loot, shop stock, gift contents and learnable skills).
use log::debug;

use crate::editor::{check_choice, EditorKind, LinkSpec, RecordEditor};
use crate::error::GameDataError;
use crate::repository::database::GameDatabase;
use crate::schema::TableKind;
use crate::types::Row;

impl RecordEditor {
    fn link_spec(&self) -> Result<LinkSpec, GameDataError> {
        self.kind().link().ok_or_else(|| {
            GameDataError::BadInput(format!("{} rows have no linked entries", self.kind()))
        })
    }

    /// Link rows owned by `id`
    ///
    /// # Errors
    /// `BadInput` if this editor has no link table.
    pub fn links<'d>(&self, db: &'d GameDatabase, id: &str) -> Result<Vec<&'d Row>, GameDataError> {
        let link = self.link_spec()?;
        Ok(db
            .table(link.table)
            .rows
            .iter()
            .filter(|r| r.get(link.parent_column) == id)
            .collect())
    }

    /// Ids which may be linked: skills for roles, otherwise items and equipment.
    /// Gift contents never include other gifts.
    #[must_use]
    pub fn link_options(&self, db: &GameDatabase) -> Vec<String> {
        match self.kind() {
            EditorKind::Role => db.table(TableKind::Skills).ids(),
            EditorKind::Gift => db
                .table(TableKind::Items)
                .rows
                .iter()
                .filter(|r| r.get("type") != "GIFT")
                .map(|r| r.id().to_string())
                .chain(db.table(TableKind::Equipment).ids())
                .collect(),
            _ => db
                .table(TableKind::Items)
                .ids()
                .into_iter()
                .chain(db.table(TableKind::Equipment).ids())
                .collect(),
        }
    }

    /// Adds the link `(id, item_id)`, replacing an existing one for the same pair.
    /// Columns missing from `fields` get their default values.
    ///
    /// # Errors
    /// * `NotFound` for an unknown owner
    /// * `MissingField` for a blank item id
    /// * `InvalidValue` for an item which cannot be linked or a restricted field
    ///   with a value outside its set
    pub fn upsert_link(
        &self,
        db: &mut GameDatabase,
        id: &str,
        item_id: &str,
        fields: &[(String, String)],
    ) -> Result<Row, GameDataError> {
        let link = self.link_spec()?;
        if self.get(db, id).is_none() {
            return Err(GameDataError::NotFound {
                label: self.kind().label().to_string(),
                id: id.to_string(),
            });
        }
        let item_id = item_id.trim();
        if item_id.is_empty() {
            return Err(GameDataError::MissingField(link.item_column.to_string()));
        }
        let options = self.link_options(db);
        if !options.iter().any(|o| o == item_id) {
            return Err(GameDataError::InvalidValue {
                field: link.item_column.to_string(),
                value: item_id.to_string(),
                allowed: options.join(", "),
            });
        }

        let mut row = Row::new();
        row.set(link.parent_column, id);
        row.set(link.item_column, item_id);
        for (column, value) in link.defaults {
            row.set(*column, *value);
        }
        for (field, value) in fields {
            if !link.defaults.iter().any(|(c, _)| *c == field.as_str()) {
                return Err(GameDataError::BadInput(format!(
                    "{} has no field '{field}'",
                    link.table
                )));
            }
            if let Some((_, allowed)) = link.choices.iter().find(|(c, _)| *c == field.as_str()) {
                check_choice(field, value, allowed)?;
            }
            row.set(field.as_str(), value.as_str());
        }

        let table = db.table_mut(link.table);
        table.remove_where(|r| r.get(link.parent_column) == id && r.get(link.item_column) == item_id);
        table.push(row.clone());
        debug!("Linked {item_id} to {} {id}", self.kind());
        Ok(row)
    }

    /// Removes the link `(id, item_id)`.
    ///
    /// # Errors
    /// `NotFound` if there is no such link.
    pub fn remove_link(
        &self,
        db: &mut GameDatabase,
        id: &str,
        item_id: &str,
    ) -> Result<(), GameDataError> {
        let link = self.link_spec()?;
        let removed = db
            .table_mut(link.table)
            .remove_where(|r| r.get(link.parent_column) == id && r.get(link.item_column) == item_id);
        if removed == 0 {
            return Err(GameDataError::NotFound {
                label: link.label.to_string(),
                id: format!("{id}/{item_id}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::NewRecord;
    use crate::repository::MemoryTableRepository;
    use std::sync::Arc;

    fn db_with_items() -> GameDatabase {
        let mut db =
            GameDatabase::open(Arc::new(MemoryTableRepository::new())).expect("in-memory database");
        let items = RecordEditor::new(EditorKind::Item);
        items.create(&mut db, &NewRecord::new("gel", "Gel")).expect("gel");
        items.create(&mut db, &NewRecord::new("coin", "Coin")).expect("coin");
        RecordEditor::new(EditorKind::Equipment)
            .create(&mut db, &NewRecord::new("sword", "Sword"))
            .expect("sword");
        db
    }

    #[test]
    fn upsert_replaces_existing_pair() {
        let mut db = db_with_items();
        let enemies = RecordEditor::new(EditorKind::Enemy);
        enemies.create(&mut db, &NewRecord::new("slime", "Slime")).expect("slime");

        enemies.upsert_link(&mut db, "slime", "gel", &[]).expect("first");
        enemies
            .upsert_link(&mut db, "slime", "gel", &[("dropRate".into(), "0.9".into())])
            .expect("second");
        enemies.upsert_link(&mut db, "slime", "sword", &[]).expect("sword");

        let links = enemies.links(&db, "slime").expect("links");
        assert_eq!(links.len(), 2);
        let gel = links.iter().find(|r| r.get("itemId") == "gel").expect("gel link");
        assert_eq!(gel.get("dropRate"), "0.9");
        assert_eq!(gel.get("rarity"), "COMMON");
    }

    #[test]
    fn unknown_items_and_bad_rarity_are_rejected() {
        let mut db = db_with_items();
        let chests = RecordEditor::new(EditorKind::Chest);
        chests.create(&mut db, &NewRecord::new("box", "Box")).expect("box");

        assert!(matches!(
            chests.upsert_link(&mut db, "box", "dragon_egg", &[]),
            Err(GameDataError::InvalidValue { .. })
        ));
        assert!(matches!(
            chests.upsert_link(&mut db, "box", "", &[]),
            Err(GameDataError::MissingField(_))
        ));
        assert!(chests
            .upsert_link(&mut db, "box", "coin", &[("rarity".into(), "SHINY".into())])
            .is_err());
        assert!(chests.links(&db, "box").expect("links").is_empty());
    }

    #[test]
    fn gift_contents_exclude_gifts() {
        let mut db = db_with_items();
        let gifts = RecordEditor::new(EditorKind::Gift);
        gifts.create(&mut db, &NewRecord::new("pack", "Pack")).expect("pack");

        let options = gifts.link_options(&db);
        assert!(options.contains(&"gel".to_string()));
        assert!(options.contains(&"sword".to_string()));
        assert!(!options.contains(&"pack".to_string()));
        assert!(gifts.upsert_link(&mut db, "pack", "pack", &[]).is_err());
    }

    #[test]
    fn roles_link_skills() {
        let mut db = db_with_items();
        RecordEditor::new(EditorKind::Skill)
            .create(&mut db, &NewRecord::new("slash", "Slash"))
            .expect("skill");
        let roles = RecordEditor::new(EditorKind::Role);
        roles.create(&mut db, &NewRecord::new("WARRIOR", "战士")).expect("role");

        assert_eq!(roles.link_options(&db), vec!["slash".to_string()]);
        let row = roles
            .upsert_link(&mut db, "WARRIOR", "slash", &[("learnLevel".into(), "5".into())])
            .expect("link");
        assert_eq!(row.get("skillId"), "slash");
        assert_eq!(row.get("learnLevel"), "5");
    }

    #[test]
    fn remove_link_reports_missing_pair() {
        let mut db = db_with_items();
        let npcs = RecordEditor::new(EditorKind::Npc);
        npcs.create(&mut db, &NewRecord::new("merchant", "Tom")).expect("npc");
        npcs.upsert_link(&mut db, "merchant", "coin", &[]).expect("stock");

        npcs.remove_link(&mut db, "merchant", "coin").expect("remove");
        assert!(matches!(
            npcs.remove_link(&mut db, "merchant", "coin"),
            Err(GameDataError::NotFound { .. })
        ));
    }

    #[test]
    fn editors_without_links_say_so() {
        let db = db_with_items();
        assert!(RecordEditor::new(EditorKind::Item).links(&db, "gel").is_err());
    }
}
