//! 排序
//!
//! 单一排序字段，稳定排序。跨类型比较顺序：缺失 < null < bool < 数值 < 字符串 < 数组 < 对象。

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::QueryError;
use crate::record::Record;

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl FromStr for Direction {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(QueryError::InvalidDirection(s.to_string())),
        }
    }
}

/// 排序规格
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

pub fn sort(rows: &mut [Record], order: &OrderBy) {
    rows.sort_by(|a, b| {
        let ordering = compare_values(a.get(&order.field), b.get(&order.field));
        match order.direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    });
}

fn rank(value: Option<&Value>) -> u8 {
    match value {
        None => 0,
        Some(Value::Null) => 1,
        Some(Value::Bool(_)) => 2,
        Some(Value::Number(_)) => 3,
        Some(Value::String(_)) => 4,
        Some(Value::Array(_)) => 5,
        Some(Value::Object(_)) => 6,
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
        },
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(rows: &[Record]) -> Vec<&str> {
        rows.iter().filter_map(|r| r.get_str("id")).collect()
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("ASC".parse::<Direction>().unwrap(), Direction::Asc);
        assert_eq!("desc".parse::<Direction>().unwrap(), Direction::Desc);
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    fn test_sort_numbers_and_missing() {
        let mut rows = vec![
            Record::from(json!({"id": "a", "points": 30})),
            Record::from(json!({"id": "b"})),
            Record::from(json!({"id": "c", "points": 5})),
            Record::from(json!({"id": "d", "points": 12.5})),
        ];

        sort(&mut rows, &OrderBy::new("points", Direction::Asc));
        assert_eq!(ids(&rows), vec!["b", "c", "d", "a"]);

        sort(&mut rows, &OrderBy::new("points", Direction::Desc));
        assert_eq!(ids(&rows), vec!["a", "d", "c", "b"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut rows = vec![
            Record::from(json!({"id": "1", "name": "B"})),
            Record::from(json!({"id": "2", "name": "A"})),
            Record::from(json!({"id": "3", "name": "B"})),
            Record::from(json!({"id": "4", "name": "A"})),
        ];
        sort(&mut rows, &OrderBy::new("name", Direction::Asc));
        assert_eq!(ids(&rows), vec!["2", "4", "1", "3"]);
    }
}
