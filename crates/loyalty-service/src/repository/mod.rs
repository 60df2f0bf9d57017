//! 数据访问层
//!
//! 仓储接口定义在 [`traits`]，实现基于内存查询引擎 [`loyalty_memdb::Database`]。
//! 外部 camelCase 字段名在这一层转换为存储字段名：请求 DTO 反序列化时接受
//! camelCase，序列化为记录时输出 snake_case。

mod company;
mod loyalty_program;
mod traits;
mod user;
mod wallet_pass;

pub use company::CompanyRepository;
pub use loyalty_program::LoyaltyProgramRepository;
pub use traits::{
    CompanyRepositoryTrait, LoyaltyProgramRepositoryTrait, UserRepositoryTrait,
    WalletPassRepositoryTrait,
};
pub use user::UserRepository;
pub use wallet_pass::WalletPassRepository;

#[cfg(test)]
pub use traits::{
    MockCompanyRepositoryTrait, MockLoyaltyProgramRepositoryTrait, MockUserRepositoryTrait,
    MockWalletPassRepositoryTrait,
};

use loyalty_memdb::{QueryBuilder, Record, timestamp};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{Result, ServiceError};

/// 把请求 DTO 转换为存储记录
fn to_record<T: Serialize>(value: &T) -> Result<Record> {
    Ok(Record::from(serde_json::to_value(value)?))
}

/// 新记录补上创建与更新时间
fn with_timestamps(mut record: Record) -> Record {
    let now = timestamp();
    record.set("created_at", now.clone());
    record.set("updated_at", now);
    record
}

/// 过滤参数中每个出现的字段都转换为一个等值谓词
fn apply_filter<F: Serialize>(mut query: QueryBuilder, filter: &F) -> Result<QueryBuilder> {
    for (field, value) in to_record(filter)?.into_inner() {
        query = query.where_eq(field, value);
    }
    Ok(query)
}

fn into_model<T: DeserializeOwned>(record: Record) -> Result<T> {
    Ok(record.into_typed()?)
}

fn into_models<T: DeserializeOwned>(records: Vec<Record>) -> Result<Vec<T>> {
    records.into_iter().map(into_model).collect()
}

/// 变更返回的记录覆盖到变更前的记录上
///
/// 模拟模式下返回的记录只包含本次变更的字段。
fn merge_returned<T: DeserializeOwned>(mut existing: Record, returned: Option<Record>) -> Result<T> {
    if let Some(returned) = returned {
        existing.merge(&returned);
    }
    into_model(existing)
}

fn inserted(returned: Option<Record>) -> Result<Record> {
    returned.ok_or_else(|| ServiceError::Internal("插入操作没有返回记录".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::LoyaltyProgramFilter;
    use loyalty_memdb::{Database, Table};
    use serde_json::json;

    #[test]
    fn test_apply_filter_translates_fields_to_predicates() {
        let db = Database::default();
        let filter = LoyaltyProgramFilter {
            company_id: Some("c1".to_string()),
            is_active: Some(true),
        };

        let query = apply_filter(db.open(Table::LoyaltyPrograms), &filter).unwrap();
        let fields: Vec<&str> = query.predicates().iter().map(|p| p.field()).collect();

        assert_eq!(fields.len(), 2);
        assert!(fields.contains(&"company_id"));
        assert!(fields.contains(&"is_active"));
    }

    #[test]
    fn test_empty_filter_adds_no_predicates() {
        let db = Database::default();
        let query = apply_filter(db.open(Table::Users), &LoyaltyProgramFilter::default()).unwrap();
        assert!(query.predicates().is_empty());
    }

    #[test]
    fn test_merge_returned_keeps_unchanged_fields() {
        let existing = Record::from(json!({"id": "u1", "name": "Alice", "email": "a@example.com", "points": 5}));
        let returned = Record::from(json!({"points": 100}));

        let user: crate::models::User = merge_returned(existing, Some(returned)).unwrap();
        assert_eq!(user.name, "Alice");
        assert_eq!(user.points, 100);
    }
}
