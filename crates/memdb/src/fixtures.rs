//! 种子数据
//!
//! JSON 格式，顶层键为表名、值为记录数组。表名必须是已知表，否则解析失败。

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};
use crate::record::Record;
use crate::table::Table;

const BUILTIN_FIXTURES: &str = include_str!("../fixtures/seed.json");

/// 按表分组的种子记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fixtures {
    tables: BTreeMap<Table, Vec<Record>>,
}

impl Fixtures {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| QueryError::FixtureIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// 随 crate 一起发布的演示数据
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_FIXTURES)
    }

    pub fn with_table<I>(mut self, table: Table, rows: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        self.tables.entry(table).or_default().extend(rows);
        self
    }

    pub fn rows(&self, table: Table) -> &[Record] {
        self.tables.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total_rows(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    pub fn into_tables(self) -> impl Iterator<Item = (Table, Vec<Record>)> {
        self.tables.into_iter()
    }
}
