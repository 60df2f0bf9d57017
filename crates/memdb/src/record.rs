//! 记录（行）类型
//!
//! 一条记录就是字段名到 JSON 值的映射，同一张表的记录不要求字段一致。

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 数据表中的一行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// 读取字段，支持 `table.field` 形式的限定名
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(column_name(field))
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(Value::as_i64)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(column_name(field))
    }

    /// 写入字段，限定名只保留列名部分
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let key = match field.rsplit_once('.') {
            Some((_, column)) => column.to_string(),
            None => field,
        };
        self.0.insert(key, value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(column_name(field))
    }

    /// 用 `other` 的字段覆盖当前记录的同名字段
    pub fn merge(&mut self, other: &Record) {
        for (field, value) in &other.0 {
            self.0.insert(column_name(field).to_string(), value.clone());
        }
    }

    /// 按字段列表投影，未出现在记录中的字段直接跳过
    pub fn project(&self, fields: &[String]) -> Record {
        fields
            .iter()
            .filter_map(|field| {
                let column = column_name(field);
                self.0
                    .get(column)
                    .map(|value| (column.to_string(), value.clone()))
            })
            .collect()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// 反序列化为强类型实体
    pub fn into_typed<T: DeserializeOwned>(self) -> serde_json::Result<T> {
        serde_json::from_value(self.into_value())
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// 非对象类型的 JSON 值转换为空记录
impl From<Value> for Record {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::new(),
        }
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// 去掉 `wallet_passes.company_id` 这类限定名的表前缀
pub(crate) fn column_name(field: &str) -> &str {
    field.rsplit_once('.').map_or(field, |(_, column)| column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_qualified_field_access() {
        let record = Record::from(json!({"company_id": "C1"}));
        assert_eq!(record.get_str("wallet_passes.company_id"), Some("C1"));
        assert!(record.contains("company_id"));
        assert!(record.get("missing").is_none());
    }

    #[test]
    fn test_merge_overwrites() {
        let mut record = Record::from(json!({"name": "A", "points": 1}));
        record.merge(&Record::from(json!({"points": 5, "email": "a@example.com"})));
        assert_eq!(record.get_i64("points"), Some(5));
        assert_eq!(record.get_str("email"), Some("a@example.com"));
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_qualified_names_write_to_column() {
        let mut record = Record::from(json!({"id": "U1", "points": 150}));
        record.set("users.points", 200);
        record.merge(&Record::from(json!({"users.name": "Alice"})));

        assert_eq!(record, Record::from(json!({"id": "U1", "points": 200, "name": "Alice"})));
    }

    #[test]
    fn test_project_skips_missing_fields() {
        let record = Record::from(json!({"id": "U1", "name": "A", "points": 3}));
        let projected = record.project(&["users.id".to_string(), "nickname".to_string()]);
        assert_eq!(projected, Record::from(json!({"id": "U1"})));
    }

    #[test]
    fn test_non_object_value_is_empty_record() {
        assert!(Record::from(json!([1, 2])).is_empty());
    }
}
