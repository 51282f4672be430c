use std::sync::Arc;

use log::{debug, info};

use crate::error::GameDataError;
use crate::repository::table_repository::TableRepository;
use crate::schema::TableKind;
use crate::types::Table;

/// Every game data table, loaded in full and edited in memory until saved
pub struct GameDatabase {
    repository: Arc<dyn TableRepository>,
    tables: Vec<Table>,
}

impl GameDatabase {
    /// Loads all tables from `repository`.
    ///
    /// # Errors
    /// Returns the first error reported by the repository.
    pub fn open(repository: Arc<dyn TableRepository>) -> Result<Self, GameDataError> {
        let tables = Self::load_all(repository.as_ref())?;
        Ok(GameDatabase { repository, tables })
    }

    fn load_all(repository: &dyn TableRepository) -> Result<Vec<Table>, GameDataError> {
        TableKind::ALL
            .iter()
            .map(|kind| repository.load(*kind))
            .collect()
    }

    #[must_use]
    pub fn table(&self, kind: TableKind) -> &Table {
        &self.tables[kind.index()]
    }

    pub fn table_mut(&mut self, kind: TableKind) -> &mut Table {
        &mut self.tables[kind.index()]
    }

    /// Discards every unsaved change and reads all tables again.
    ///
    /// # Errors
    /// Fails if any table cannot be read, in which case the current contents are kept.
    pub fn reload(&mut self) -> Result<(), GameDataError> {
        self.tables = Self::load_all(self.repository.as_ref())?;
        info!("All tables reloaded");
        Ok(())
    }

    /// Reloads the listed tables only.
    ///
    /// # Errors
    /// Fails if any of the tables cannot be read.
    pub fn reload_tables(&mut self, kinds: &[TableKind]) -> Result<(), GameDataError> {
        for kind in kinds {
            self.tables[kind.index()] = self.repository.load(*kind)?;
        }
        Ok(())
    }

    /// Writes the listed tables through the repository.
    ///
    /// # Errors
    /// Stops at the first table which cannot be written.
    pub fn save(&self, kinds: &[TableKind]) -> Result<(), GameDataError> {
        for kind in kinds {
            debug!("Saving {kind}");
            self.repository.save(self.table(*kind))?;
        }
        Ok(())
    }

    /// Writes every table.
    ///
    /// # Errors
    /// Stops at the first table which cannot be written.
    pub fn save_all(&self) -> Result<(), GameDataError> {
        self.save(&TableKind::ALL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::table_repository::MockTableRepository;
    use crate::types::Row;
    use mockall::predicate::eq;

    #[test]
    fn open_loads_every_table() -> Result<(), GameDataError> {
        let mut repo = MockTableRepository::new();
        repo.expect_load()
            .times(TableKind::ALL.len())
            .returning(|kind| Ok(Table::empty(kind)));

        let db = GameDatabase::open(Arc::new(repo))?;
        assert_eq!(db.table(TableKind::Roles).kind, TableKind::Roles);
        Ok(())
    }

    #[test]
    fn save_writes_only_requested_tables() -> Result<(), GameDataError> {
        let mut repo = MockTableRepository::new();
        repo.expect_load().returning(|kind| Ok(Table::empty(kind)));
        repo.expect_save()
            .withf(|t: &Table| t.kind == TableKind::Enemies || t.kind == TableKind::EnemyLoot)
            .times(2)
            .returning(|_| Ok(()));

        let mut db = GameDatabase::open(Arc::new(repo))?;
        db.table_mut(TableKind::Enemies)
            .push(Row::from_pairs([("id", "slime")]));
        db.save(&[TableKind::Enemies, TableKind::EnemyLoot])
    }

    #[test]
    fn failing_load_is_reported() {
        let mut repo = MockTableRepository::new();
        repo.expect_load()
            .with(eq(TableKind::Maps))
            .returning(|_| Err(GameDataError::BadInput("broken".into())));

        assert!(GameDatabase::open(Arc::new(repo)).is_err());
    }
}
