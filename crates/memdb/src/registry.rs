//! 数据表注册表
//!
//! 持有 表 -> 有序记录序列 的映射，是所有查询与变更共享的唯一数据源。

use std::collections::HashMap;

use serde_json::Value;

use crate::record::Record;
use crate::table::Table;

/// 表注册表
///
/// 每张已知表都有一个序列（可能为空），记录顺序即插入顺序。
#[derive(Debug, Default)]
pub struct TableRegistry {
    tables: HashMap<Table, Vec<Record>>,
}

impl TableRegistry {
    /// 创建所有表均为空的注册表
    pub fn new() -> Self {
        Self {
            tables: Table::ALL.into_iter().map(|t| (t, Vec::new())).collect(),
        }
    }

    /// 表的当前记录
    pub fn rows(&self, table: Table) -> &[Record] {
        self.tables.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rows_mut(&mut self, table: Table) -> &mut Vec<Record> {
        self.tables.entry(table).or_default()
    }

    /// 追加种子记录，保持原有顺序
    pub fn seed<I>(&mut self, table: Table, rows: I)
    where
        I: IntoIterator<Item = Record>,
    {
        self.rows_mut(table).extend(rows);
    }

    /// 查找第一条 `field == value` 的记录
    pub fn find_by(&self, table: Table, field: &str, value: &Value) -> Option<&Record> {
        self.rows(table)
            .iter()
            .find(|record| record.get(field) == Some(value))
    }

    pub fn len(&self, table: Table) -> usize {
        self.rows(table).len()
    }

    pub fn total_rows(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    /// 清空所有表
    pub fn clear(&mut self) {
        self.tables.values_mut().for_each(Vec::clear);
    }
}
