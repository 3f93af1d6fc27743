//! The assembled star schema: nine named tables.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;

use crate::table::TableName;

/// A named set of star-schema tables.
///
/// Produced whole by the schema assembler. Tables can also be inserted or
/// removed by hand, which is how reloaded or partial schemas reach the
/// validator.
#[derive(Debug, Clone, Default)]
pub struct StarSchema {
    tables: BTreeMap<TableName, DataFrame>,
}

impl StarSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: TableName, data: DataFrame) -> Option<DataFrame> {
        self.tables.insert(name, data)
    }

    pub fn remove(&mut self, name: TableName) -> Option<DataFrame> {
        self.tables.remove(&name)
    }

    pub fn get(&self, name: TableName) -> Option<&DataFrame> {
        self.tables.get(&name)
    }

    pub fn contains(&self, name: TableName) -> bool {
        self.tables.contains_key(&name)
    }

    /// Whether all nine tables are present.
    pub fn is_complete(&self) -> bool {
        TableName::ALL.iter().all(|name| self.contains(*name))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Tables in catalog order (dimensions first).
    pub fn iter(&self) -> impl Iterator<Item = (TableName, &DataFrame)> {
        self.tables.iter().map(|(name, data)| (*name, data))
    }

    /// Row count per table, keyed by persisted table name.
    pub fn row_counts(&self) -> BTreeMap<&'static str, usize> {
        self.iter()
            .map(|(name, data)| (name.as_str(), data.height()))
            .collect()
    }
}

impl FromIterator<(TableName, DataFrame)> for StarSchema {
    fn from_iter<I: IntoIterator<Item = (TableName, DataFrame)>>(iter: I) -> Self {
        Self {
            tables: iter.into_iter().collect(),
        }
    }
}
