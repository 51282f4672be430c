use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use csv::{Reader, ReaderBuilder, Trim, Writer, WriterBuilder};
use log::debug;

use crate::error::GameDataError;
use crate::repository::table_repository::TableRepository;
use crate::schema::TableKind;
use crate::types::{Row, Table};

const CSV_DELIMITER: u8 = b',';

/// Stores every table as a comma separated file with a header line in `data_dir`
#[allow(clippy::module_name_repetitions)]
pub struct CsvTableRepository {
    data_dir: PathBuf,
}

impl CsvTableRepository {
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        CsvTableRepository { data_dir }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    #[must_use]
    pub fn path_of(&self, kind: TableKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }

    /// Ensures we always create the CSV writer with the same delimiter
    fn create_csv_writer<W: io::Write>(file: W) -> Writer<W> {
        WriterBuilder::new()
            .delimiter(CSV_DELIMITER)
            .has_headers(false)
            .from_writer(file)
    }

    /// Ensures we always create CSV readers with our standard delimiter
    fn create_csv_reader<R: io::Read>(rdr: R) -> Reader<R> {
        ReaderBuilder::new()
            .delimiter(CSV_DELIMITER)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(rdr)
    }

    fn read_table(path: &Path, kind: TableKind) -> Result<Table, csv::Error> {
        let file = File::open(path)?;
        let mut rdr = Self::create_csv_reader(file);

        let header: Vec<String> = rdr.headers()?.iter().map(ToString::to_string).collect();
        if header.iter().all(String::is_empty) {
            debug!("{} has no header, using default columns", path.to_string_lossy());
            return Ok(Table::empty(kind));
        }

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            rows.push(Row::from_pairs(
                header.iter().cloned().zip(record.iter().map(ToString::to_string)),
            ));
        }

        Ok(Table {
            kind,
            columns: header,
            rows,
        })
    }

    fn write_table(path: &Path, table: &Table) -> Result<(), csv::Error> {
        let file = File::create(path)?;
        let mut csv_writer = Self::create_csv_writer(file);

        csv_writer.write_record(&table.columns)?;
        for row in &table.rows {
            csv_writer.write_record(table.columns.iter().map(|c| row.get(c)))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl TableRepository for CsvTableRepository {
    fn load(&self, kind: TableKind) -> Result<Table, GameDataError> {
        let path = self.path_of(kind);
        if !path.try_exists()? {
            debug!(
                "File {} does not exist, starting with an empty table",
                path.to_string_lossy()
            );
            return Ok(Table::empty(kind));
        }

        let table = Self::read_table(&path, kind).map_err(|e| GameDataError::ReadTable {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        debug!("Loaded {} rows from {}", table.len(), path.to_string_lossy());
        Ok(table)
    }

    fn save(&self, table: &Table) -> Result<(), GameDataError> {
        if !self.data_dir.try_exists()? {
            debug!(
                "Creating all intermittent directories for {}",
                self.data_dir.to_string_lossy()
            );
            fs::create_dir_all(&self.data_dir)?;
        }

        let path = self.path_of(table.kind);
        Self::write_table(&path, table).map_err(|e| GameDataError::WriteTable {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        debug!("Wrote {} rows to {}", table.len(), path.to_string_lossy());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn setup() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn write_file(dir: &Path, kind: TableKind, contents: &str) {
        let mut file = File::create(dir.join(kind.file_name())).expect("Unable to create file");
        file.write_all(contents.as_bytes())
            .expect("Unable to write file");
    }

    #[test]
    fn missing_file_yields_default_columns() -> Result<(), GameDataError> {
        setup();
        let dir = tempfile::tempdir()?;
        let repo = CsvTableRepository::new(dir.path().to_path_buf());

        let table = repo.load(TableKind::ChestLoot)?;
        assert!(table.is_empty());
        assert_eq!(table.columns, TableKind::ChestLoot.default_column_names());
        Ok(())
    }

    #[test]
    fn empty_file_yields_default_columns() -> Result<(), GameDataError> {
        setup();
        let dir = tempfile::tempdir()?;
        write_file(dir.path(), TableKind::Skills, "");
        let repo = CsvTableRepository::new(dir.path().to_path_buf());

        let table = repo.load(TableKind::Skills)?;
        assert!(table.is_empty());
        assert_eq!(table.columns[0], "id");
        Ok(())
    }

    #[test]
    fn header_from_file_is_kept_on_save() -> Result<(), GameDataError> {
        setup();
        let dir = tempfile::tempdir()?;
        write_file(
            dir.path(),
            TableKind::TerrainTypes,
            "id, name ,passable,color\nGRASS,草地,true,#90EE90\nWATER, 水 ,false,#1E90FF\n",
        );
        let repo = CsvTableRepository::new(dir.path().to_path_buf());

        let table = repo.load(TableKind::TerrainTypes)?;
        assert_eq!(table.columns, vec!["id", "name", "passable", "color"]);
        assert_eq!(table.find("WATER").map(|r| r.get("name")), Some("水"));

        repo.save(&table)?;
        let written = fs::read_to_string(repo.path_of(TableKind::TerrainTypes))?;
        assert!(written.starts_with("id,name,passable,color\n"));
        assert!(!written.contains("icon"));
        Ok(())
    }

    #[test]
    fn quoted_fields_round_trip() -> Result<(), GameDataError> {
        setup();
        let dir = tempfile::tempdir()?;
        let repo = CsvTableRepository::new(dir.path().join("nested").join("data"));

        let mut table = Table::empty(TableKind::Npcs);
        table.push(Row::from_pairs([
            ("id", "merchant"),
            ("name", "Old Tom"),
            ("dialogues", "Hello, traveller!;Come again"),
        ]));
        repo.save(&table)?;

        let reloaded = repo.load(TableKind::Npcs)?;
        let row = reloaded.find("merchant").expect("merchant row");
        assert_eq!(row.get("dialogues"), "Hello, traveller!;Come again");
        assert_eq!(row.get("shopGold"), "");
        Ok(())
    }

    #[test]
    fn short_records_are_tolerated() -> Result<(), GameDataError> {
        setup();
        let dir = tempfile::tempdir()?;
        write_file(dir.path(), TableKind::RoleSkills, "roleId,skillId,learnLevel\nWARRIOR,slash\n");
        let repo = CsvTableRepository::new(dir.path().to_path_buf());

        let table = repo.load(TableKind::RoleSkills)?;
        assert_eq!(table.rows[0].get("skillId"), "slash");
        assert_eq!(table.rows[0].get("learnLevel"), "");
        Ok(())
    }
}
