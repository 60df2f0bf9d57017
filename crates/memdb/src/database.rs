//! 数据库句柄
//!
//! [`Database`] 是显式构造的存储值，克隆代价很低（共享同一个注册表），
//! 通过引用或应用状态传递给需要它的组件；最后一个句柄被 drop 时数据随之释放。
//!
//! 引擎内部不做并发控制之外的事情：每次读取或变更都在持有注册表锁的情况下
//! 一次性执行完毕，锁就是多个调用方之间唯一的串行化点。

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, info, instrument};

use crate::builder::QueryBuilder;
use crate::error::Result;
use crate::fixtures::Fixtures;
use crate::mutation::MutationMode;
use crate::record::Record;
use crate::registry::TableRegistry;
use crate::table::Table;

/// 内存数据库
#[derive(Debug, Clone)]
pub struct Database {
    registry: Arc<Mutex<TableRegistry>>,
    mode: MutationMode,
}

impl Default for Database {
    fn default() -> Self {
        Self::new(MutationMode::default())
    }
}

impl Database {
    /// 创建空数据库
    pub fn new(mode: MutationMode) -> Self {
        Self::with_registry(TableRegistry::new(), mode)
    }

    pub fn with_registry(registry: TableRegistry, mode: MutationMode) -> Self {
        Self {
            registry: Arc::new(Mutex::new(registry)),
            mode,
        }
    }

    pub fn mode(&self) -> MutationMode {
        self.mode
    }

    /// 打开一张表，返回绑定到实时数据的查询构建器
    pub fn open(&self, table: Table) -> QueryBuilder {
        QueryBuilder::new(self.clone(), table)
    }

    /// 按表名打开，未知表名返回 [`QueryError::UnknownTable`](crate::QueryError::UnknownTable)
    pub fn open_named(&self, name: &str) -> Result<QueryBuilder> {
        Ok(self.open(name.parse()?))
    }

    /// 直接追加记录，不经过变更模式
    pub fn seed<I>(&self, table: Table, rows: I)
    where
        I: IntoIterator<Item = Record>,
    {
        self.registry.lock().seed(table, rows);
    }

    /// 载入整套种子数据，返回载入的记录数
    #[instrument(skip(self, fixtures))]
    pub fn seed_fixtures(&self, fixtures: Fixtures) -> usize {
        let mut registry = self.registry.lock();
        let mut total = 0;
        for (table, rows) in fixtures.into_tables() {
            total += rows.len();
            debug!(table = %table, rows = rows.len(), "载入种子数据");
            registry.seed(table, rows);
        }
        info!(rows = total, "种子数据载入完成");
        total
    }

    /// 原始语句探针，仅用于模拟连通性检查，总是返回空结果集
    #[instrument(skip(self))]
    pub fn raw(&self, sql: &str) -> Result<Vec<Record>> {
        debug!(sql, "内存模式下忽略原始语句");
        Ok(Vec::new())
    }

    pub fn table_len(&self, table: Table) -> usize {
        self.registry.lock().len(table)
    }

    /// 表当前数据的拷贝，不经过关联与过滤
    pub fn snapshot(&self, table: Table) -> Vec<Record> {
        self.registry.lock().rows(table).to_vec()
    }

    pub fn clear(&self) {
        self.registry.lock().clear();
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, TableRegistry> {
        self.registry.lock()
    }
}
