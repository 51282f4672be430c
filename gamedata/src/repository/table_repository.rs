use crate::error::GameDataError;
use crate::schema::TableKind;
use crate::types::Table;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
pub trait TableRepository: Send + Sync {
    /// Reads every row of the table identified by `kind`.
    ///
    /// A table which has never been written yields an empty `Table` carrying the
    /// default column set of `kind`.
    ///
    /// # Errors
    /// Returns a `GameDataError` if the underlying storage cannot be read or parsed.
    fn load(&self, kind: TableKind) -> Result<Table, GameDataError>;

    /// Replaces the stored contents of `table.kind` with `table`.
    ///
    /// # Errors
    /// Returns a `GameDataError` if the underlying storage cannot be written.
    fn save(&self, table: &Table) -> Result<(), GameDataError>;
}
