use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::GameDataError;
use crate::repository::table_repository::TableRepository;
use crate::schema::TableKind;
use crate::types::Table;

/// Keeps the tables in process memory, which is quite useful for tests
#[derive(Default)]
pub struct MemoryTableRepository {
    tables: Mutex<HashMap<TableKind, Table>>,
}

impl MemoryTableRepository {
    #[must_use]
    pub fn new() -> Self {
        MemoryTableRepository::default()
    }

    /// Creates a repository pre-populated with `tables`
    #[must_use]
    pub fn with_tables(tables: Vec<Table>) -> Self {
        MemoryTableRepository {
            tables: Mutex::new(tables.into_iter().map(|t| (t.kind, t)).collect()),
        }
    }
}

impl TableRepository for MemoryTableRepository {
    fn load(&self, kind: TableKind) -> Result<Table, GameDataError> {
        let tables = self
            .tables
            .lock()
            .map_err(|_| GameDataError::BadInput("table store mutex poisoned".into()))?;
        Ok(tables
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| Table::empty(kind)))
    }

    fn save(&self, table: &Table) -> Result<(), GameDataError> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| GameDataError::BadInput("table store mutex poisoned".into()))?;
        tables.insert(table.kind, table.clone());
        Ok(())
    }
}
