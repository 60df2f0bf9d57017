//! 内存关系查询引擎
//!
//! 用进程内集合模拟流式 SQL 查询构建器（选择、过滤、关联、排序、带返回值的变更），
//! 使上层服务无需真实的关系数据库即可运行和测试。
//!
//! ## 模块结构
//!
//! - `table` / `record`: 表枚举与记录类型
//! - `registry`: 表注册表，持有全部数据
//! - `builder`: 查询构建器与延迟执行
//! - `filter`: 等值谓词过滤
//! - `join`: 声明式关联解析
//! - `order`: 排序
//! - `mutation`: 插入、更新、删除、增减量
//! - `fixtures`: 种子数据
//!
//! ## 使用示例
//!
//! ```rust
//! use loyalty_memdb::{Database, Direction, Table};
//! use serde_json::json;
//!
//! let db = Database::default();
//! let user = db
//!     .open(Table::Users)
//!     .insert(json!({"name": "Alice", "points": 0}))
//!     .returning_one()
//!     .unwrap();
//!
//! let rows = db
//!     .open(Table::Users)
//!     .where_eq("id", user.get("id").cloned().unwrap())
//!     .order_by("name", Direction::Asc)
//!     .fetch();
//! assert_eq!(rows.len(), 1);
//! ```

pub mod builder;
pub mod database;
pub mod error;
pub mod filter;
pub mod fixtures;
pub mod join;
pub mod mutation;
pub mod order;
pub mod record;
pub mod registry;
pub mod table;

pub use builder::{DeleteQuery, MutationResult, QueryBuilder};
pub use database::Database;
pub use error::{QueryError, Result};
pub use filter::Predicate;
pub use fixtures::Fixtures;
pub use join::{JoinClause, JoinKind, RELATIONSHIPS, Relationship};
pub use mutation::{MutationMode, SIMULATED_COUNTER_VALUE, generate_id, timestamp};
pub use order::{Direction, OrderBy};
pub use record::Record;
pub use registry::TableRegistry;
pub use table::Table;
