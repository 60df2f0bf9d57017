//! 变更执行器
//!
//! 支持两种模式，对调用方暴露完全相同的方法契约：
//!
//! - [`MutationMode::Persistent`]：真实写入注册表，插入追加、更新原地修改、
//!   删除返回实际删除条数、增减量基于当前值计算
//! - [`MutationMode::Simulated`]：只构造"看起来像"写入结果的记录，不修改存储；
//!   删除固定返回 1，增减量返回固定值 [`SIMULATED_COUNTER_VALUE`]

use std::str::FromStr;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use uuid::Uuid;

use crate::error::QueryError;
use crate::filter::{Predicate, matches_all};
use crate::record::Record;
use crate::registry::TableRegistry;
use crate::table::Table;

/// 模拟模式下 increment/decrement 返回的固定值
pub const SIMULATED_COUNTER_VALUE: i64 = 100;

/// 变更模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationMode {
    #[default]
    Persistent,
    Simulated,
}

impl MutationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Persistent => "persistent",
            Self::Simulated => "simulated",
        }
    }
}

impl FromStr for MutationMode {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "persistent" => Ok(Self::Persistent),
            "simulated" => Ok(Self::Simulated),
            _ => Err(QueryError::InvalidMutationMode(s.to_string())),
        }
    }
}

/// 生成进程内唯一、按时间有序的 ID
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}

/// 当前时间（RFC 3339，毫秒精度）
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 针对单张表的一次变更
pub(crate) struct MutationExecutor<'a> {
    registry: &'a mut TableRegistry,
    table: Table,
    mode: MutationMode,
}

impl<'a> MutationExecutor<'a> {
    pub(crate) fn new(registry: &'a mut TableRegistry, table: Table, mode: MutationMode) -> Self {
        Self {
            registry,
            table,
            mode,
        }
    }

    /// 插入一条记录，调用方提供的 `id` 优先于生成的 ID
    pub(crate) fn insert(self, data: Record) -> Record {
        let mut row = Record::new();
        row.set("id", generate_id());
        row.merge(&data);

        if self.mode == MutationMode::Persistent {
            self.registry.rows_mut(self.table).push(row.clone());
        }
        row
    }

    /// 更新满足谓词的记录并刷新 `updated_at`
    ///
    /// 主键不可更新，`data` 中的 `id` 会被丢弃。
    pub(crate) fn update(self, predicates: &[Predicate], mut data: Record) -> Vec<Record> {
        let now = timestamp();
        data.remove("id");

        match self.mode {
            MutationMode::Simulated => {
                let mut row = data;
                row.set("updated_at", now);
                vec![row]
            }
            MutationMode::Persistent => self
                .registry
                .rows_mut(self.table)
                .iter_mut()
                .filter(|row| matches_all(row, predicates))
                .map(|row| {
                    row.merge(&data);
                    row.set("updated_at", now.clone());
                    row.clone()
                })
                .collect(),
        }
    }

    /// 删除满足谓词的记录，返回删除条数
    pub(crate) fn delete(self, predicates: &[Predicate]) -> usize {
        match self.mode {
            MutationMode::Simulated => 1,
            MutationMode::Persistent => {
                let rows = self.registry.rows_mut(self.table);
                let before = rows.len();
                rows.retain(|row| !matches_all(row, predicates));
                before - rows.len()
            }
        }
    }

    /// 对满足谓词的记录的数值字段加上 `delta`
    ///
    /// 字段缺失或不是数值时按 0 计算。
    pub(crate) fn step(self, predicates: &[Predicate], field: &str, delta: i64) -> Vec<Record> {
        match self.mode {
            MutationMode::Simulated => {
                let mut row = Record::new();
                row.set(field, SIMULATED_COUNTER_VALUE);
                vec![row]
            }
            MutationMode::Persistent => self
                .registry
                .rows_mut(self.table)
                .iter_mut()
                .filter(|row| matches_all(row, predicates))
                .map(|row| {
                    let next = add_numeric(row.get(field), delta);
                    row.set(field, next);
                    row.clone()
                })
                .collect(),
        }
    }
}

fn add_numeric(current: Option<&Value>, delta: i64) -> Value {
    if let Some(n) = current.and_then(Value::as_i64) {
        return Value::from(n.saturating_add(delta));
    }
    match current.and_then(Value::as_f64) {
        Some(f) => Number::from_f64(f + delta as f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::from(delta)),
        None => Value::from(delta),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> TableRegistry {
        let mut registry = TableRegistry::new();
        registry.seed(
            Table::Users,
            vec![
                Record::from(json!({"id": "U1", "name": "A", "points": 150})),
                Record::from(json!({"id": "U2", "name": "B", "points": 1.5})),
                Record::from(json!({"id": "U3", "name": "C", "points": "n/a"})),
            ],
        );
        registry
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(
            "Simulated".parse::<MutationMode>().unwrap(),
            MutationMode::Simulated
        );
        assert_eq!(
            "persistent".parse::<MutationMode>().unwrap(),
            MutationMode::Persistent
        );
        assert!("memory".parse::<MutationMode>().is_err());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_add_numeric() {
        assert_eq!(add_numeric(Some(&json!(150)), 50), json!(200));
        assert_eq!(add_numeric(Some(&json!(1.5)), 1), json!(2.5));
        assert_eq!(add_numeric(Some(&json!("n/a")), 7), json!(7));
        assert_eq!(add_numeric(None, -3), json!(-3));
    }

    #[test]
    fn test_persistent_step_only_touches_matches() {
        let mut registry = registry();
        let rows = MutationExecutor::new(&mut registry, Table::Users, MutationMode::Persistent)
            .step(&[Predicate::eq("id", "U1")], "points", 50);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_i64("points"), Some(200));
        assert_eq!(registry.rows(Table::Users)[0].get_i64("points"), Some(200));
        assert_eq!(registry.rows(Table::Users)[1].get("points"), Some(&json!(1.5)));
    }

    #[test]
    fn test_simulated_mode_leaves_storage_untouched() {
        let mut registry = registry();

        let inserted = MutationExecutor::new(&mut registry, Table::Users, MutationMode::Simulated)
            .insert(Record::from(json!({"name": "D"})));
        assert!(inserted.get_str("id").is_some());

        let updated = MutationExecutor::new(&mut registry, Table::Users, MutationMode::Simulated)
            .update(&[Predicate::eq("id", "U404")], Record::from(json!({"name": "X"})));
        assert_eq!(updated.len(), 1);
        assert!(updated[0].contains("updated_at"));

        let deleted = MutationExecutor::new(&mut registry, Table::Users, MutationMode::Simulated)
            .delete(&[]);
        assert_eq!(deleted, 1);

        assert_eq!(registry.len(Table::Users), 3);
        assert_eq!(registry.rows(Table::Users)[0].get_str("name"), Some("A"));
    }
}
