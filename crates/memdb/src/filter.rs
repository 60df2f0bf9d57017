//! 谓词过滤
//!
//! 只支持等值条件，多个条件之间为 AND 关系。比较是严格的：
//! 不做类型转换，缺失字段不等于任何值（包括 null）。

use serde_json::Value;

use crate::record::Record;

/// 等值谓词 `field = value`
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    field: String,
    value: Value,
}

impl Predicate {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn matches(&self, record: &Record) -> bool {
        record.get(&self.field) == Some(&self.value)
    }
}

/// 记录是否满足全部谓词，遇到第一个不满足的即返回
pub fn matches_all(record: &Record, predicates: &[Predicate]) -> bool {
    predicates.iter().all(|p| p.matches(record))
}

/// 保留满足全部谓词的记录，顺序不变
pub fn apply(rows: Vec<Record>, predicates: &[Predicate]) -> Vec<Record> {
    if predicates.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|record| matches_all(record, predicates))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows() -> Vec<Record> {
        vec![
            Record::from(json!({"id": "U1", "name": "A", "points": 10, "active": true})),
            Record::from(json!({"id": "U2", "name": "B", "points": 10, "active": false})),
            Record::from(json!({"id": "U3", "name": "A", "points": 20, "active": true})),
            Record::from(json!({"id": "U4", "name": null})),
        ]
    }

    fn ids(rows: &[Record]) -> Vec<&str> {
        rows.iter().filter_map(|r| r.get_str("id")).collect()
    }

    #[test]
    fn test_no_predicates_keeps_everything() {
        assert_eq!(apply(rows(), &[]).len(), 4);
    }

    #[test]
    fn test_conjunction_equals_intersection() {
        let by_name = Predicate::eq("name", "A");
        let by_points = Predicate::eq("points", 10);

        let combined = apply(rows(), &[by_name.clone(), by_points.clone()]);
        let reversed = apply(rows(), &[by_points.clone(), by_name.clone()]);
        let sequential = apply(apply(rows(), &[by_name]), &[by_points]);

        assert_eq!(ids(&combined), vec!["U1"]);
        assert_eq!(combined, reversed);
        assert_eq!(combined, sequential);
    }

    #[test]
    fn test_strict_equality_without_coercion() {
        assert!(apply(rows(), &[Predicate::eq("points", "10")]).is_empty());
        assert!(apply(rows(), &[Predicate::eq("points", 10.0)]).is_empty());
        assert!(apply(rows(), &[Predicate::eq("active", "true")]).is_empty());
        assert_eq!(apply(rows(), &[Predicate::eq("active", true)]).len(), 2);
    }

    #[test]
    fn test_missing_field_never_matches_null() {
        let matched = apply(rows(), &[Predicate::eq("name", Value::Null)]);
        assert_eq!(ids(&matched), vec!["U4"]);
        assert!(apply(rows(), &[Predicate::eq("nickname", Value::Null)]).is_empty());
    }

    #[test]
    fn test_qualified_field_name() {
        let matched = apply(rows(), &[Predicate::eq("users.id", "U3")]);
        assert_eq!(ids(&matched), vec!["U3"]);
    }
}
