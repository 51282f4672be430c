use std::collections::BTreeMap;

use crate::schema::TableKind;

/// A single record of a game data table. Every value is kept as text, exactly as it
/// appears in the data file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: BTreeMap<String, String>,
}

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Row::default()
    }

    /// Builds a row from `(column, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Row {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of `column`, or the empty string if the row has no such field
    #[must_use]
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map_or("", String::as_str)
    }

    #[must_use]
    pub fn has(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    #[must_use]
    pub fn id(&self) -> &str {
        self.get("id")
    }

    /// Integer value of `column`; empty or malformed values yield `None`
    #[must_use]
    pub fn get_i64(&self, column: &str) -> Option<i64> {
        self.get(column).trim().parse().ok()
    }

    /// Booleans are stored as `true`/`false`, compared case-insensitively
    #[must_use]
    pub fn get_bool(&self, column: &str, default: bool) -> bool {
        let value = self.get(column);
        if value.is_empty() {
            default
        } else {
            value.eq_ignore_ascii_case("true") || value == "1"
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// All rows of one data file together with its column set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub kind: TableKind,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// An empty table using the hardcoded column set of `kind`
    #[must_use]
    pub fn empty(kind: TableKind) -> Self {
        Table {
            kind,
            columns: kind.default_column_names(),
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.id() == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Row> {
        self.rows.iter_mut().find(|r| r.id() == id)
    }

    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.id() == id)
    }

    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Removes every row matching `predicate` and returns how many were removed
    pub fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Row) -> bool,
    {
        let before = self.rows.len();
        self.rows.retain(|r| !predicate(r));
        before - self.rows.len()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.id().to_string()).collect()
    }
}
