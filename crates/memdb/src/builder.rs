//! 查询构建器
//!
//! 每次调用 [`Database::open`](crate::Database::open) 得到一个新的构建器，链式配置后：
//!
//! - 作为读取消费：`.await`、[`QueryBuilder::fetch`]、[`QueryBuilder::first`] 或
//!   [`QueryBuilder::map_rows`]，此时才按 关联 -> 过滤 -> 排序 -> 投影 的顺序求值
//! - 调用变更方法：立即执行，结果通过 [`MutationResult::returning`] 取出

use std::future::{IntoFuture, Ready};

use serde_json::Value;
use tracing::debug;

use crate::database::Database;
use crate::filter::{self, Predicate};
use crate::join::{self, JoinClause, JoinKind};
use crate::mutation::MutationExecutor;
use crate::order::{self, Direction, OrderBy};
use crate::record::Record;
use crate::registry::TableRegistry;
use crate::table::Table;

/// 针对单张表的待执行查询
#[must_use = "查询构建器在被消费之前不会执行"]
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    db: Database,
    table: Table,
    columns: Vec<String>,
    predicates: Vec<Predicate>,
    joins: Vec<JoinClause>,
    order: Option<OrderBy>,
}

impl QueryBuilder {
    pub(crate) fn new(db: Database, table: Table) -> Self {
        Self {
            db,
            table,
            columns: Vec::new(),
            predicates: Vec::new(),
            joins: Vec::new(),
            order: None,
        }
    }

    pub fn table(&self) -> Table {
        self.table
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn joins(&self) -> &[JoinClause] {
        &self.joins
    }

    // ==================== 配置 ====================

    /// 指定返回字段，空列表或 `*` 表示全部字段
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = fields
            .into_iter()
            .map(Into::into)
            .filter(|field| field != "*")
            .collect();
        self
    }

    /// 追加等值条件，多次调用之间为 AND
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.predicates.push(Predicate::eq(field, value));
        self
    }

    pub fn join(self, table: Table) -> Self {
        self.push_join(table, JoinKind::Inner)
    }

    pub fn left_join(self, table: Table) -> Self {
        self.push_join(table, JoinKind::Left)
    }

    fn push_join(mut self, table: Table, kind: JoinKind) -> Self {
        self.joins.push(JoinClause { table, kind });
        self
    }

    /// 设置排序，后一次调用覆盖前一次
    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order = Some(OrderBy::new(field, direction));
        self
    }

    // ==================== 读取 ====================

    /// 立即求值并返回结果集
    pub fn fetch(self) -> Vec<Record> {
        let rows = {
            let registry = self.db.lock();
            self.resolve(&registry)
        };

        metrics::counter!("memdb_reads_total", "table" => self.table.as_str()).increment(1);
        debug!(
            table = %self.table,
            predicates = self.predicates.len(),
            joins = self.joins.len(),
            rows = rows.len(),
            "查询完成"
        );
        rows
    }

    pub fn first(self) -> Option<Record> {
        self.fetch().into_iter().next()
    }

    pub fn count(self) -> usize {
        self.fetch().len()
    }

    /// 求值后把结果集交给 `f`，`f` 的返回值即为最终结果
    pub fn map_rows<F, R>(self, f: F) -> R
    where
        F: FnOnce(Vec<Record>) -> R,
    {
        f(self.fetch())
    }

    fn resolve(&self, registry: &TableRegistry) -> Vec<Record> {
        let source = registry.rows(self.table);
        let joined = join::resolve(registry, self.table, source, &self.joins);
        let mut rows = filter::apply(joined, &self.predicates);

        if let Some(order) = &self.order {
            order::sort(&mut rows, order);
        }

        if self.columns.is_empty() {
            rows
        } else {
            rows.iter().map(|row| row.project(&self.columns)).collect()
        }
    }

    // ==================== 变更 ====================

    pub fn insert(self, data: impl Into<Record>) -> MutationResult {
        let row = self.mutate("insert", |executor, _| executor.insert(data.into()));
        MutationResult::new(vec![row])
    }

    pub fn update(self, data: impl Into<Record>) -> MutationResult {
        let rows = self.mutate("update", |executor, predicates| {
            executor.update(predicates, data.into())
        });
        MutationResult::new(rows)
    }

    pub fn increment(self, field: &str, amount: i64) -> MutationResult {
        let rows = self.mutate("increment", |executor, predicates| {
            executor.step(predicates, field, amount)
        });
        MutationResult::new(rows)
    }

    pub fn decrement(self, field: &str, amount: i64) -> MutationResult {
        let rows = self.mutate("decrement", |executor, predicates| {
            executor.step(predicates, field, amount.saturating_neg())
        });
        MutationResult::new(rows)
    }

    /// 可继续配置条件的删除
    pub fn delete(self) -> DeleteQuery {
        DeleteQuery { query: self }
    }

    /// 立即删除并返回删除条数
    pub fn del(self) -> usize {
        self.delete().execute()
    }

    fn mutate<T>(
        &self,
        op: &'static str,
        f: impl FnOnce(MutationExecutor<'_>, &[Predicate]) -> T,
    ) -> T {
        let result = {
            let mut registry = self.db.lock();
            let executor = MutationExecutor::new(&mut registry, self.table, self.db.mode());
            f(executor, &self.predicates)
        };

        metrics::counter!("memdb_mutations_total", "table" => self.table.as_str(), "op" => op)
            .increment(1);
        debug!(table = %self.table, op, mode = self.db.mode().as_str(), "变更完成");
        result
    }
}

/// `.await` 一个构建器即执行读取
impl IntoFuture for QueryBuilder {
    type Output = Vec<Record>;
    type IntoFuture = Ready<Vec<Record>>;

    fn into_future(self) -> Self::IntoFuture {
        std::future::ready(self.fetch())
    }
}

/// 删除查询
#[must_use = "删除在调用 execute 之前不会执行"]
#[derive(Debug, Clone)]
pub struct DeleteQuery {
    query: QueryBuilder,
}

impl DeleteQuery {
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query = self.query.where_eq(field, value);
        self
    }

    /// 执行删除，返回删除条数
    pub fn execute(self) -> usize {
        self.query
            .mutate("delete", |executor, predicates| executor.delete(predicates))
    }
}

/// 变更结果
#[must_use = "变更结果需要通过 returning 取出"]
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    rows: Vec<Record>,
}

impl MutationResult {
    fn new(rows: Vec<Record>) -> Self {
        Self { rows }
    }

    pub fn rows_affected(&self) -> usize {
        self.rows.len()
    }

    pub fn returning(self) -> Vec<Record> {
        self.rows
    }

    pub fn returning_one(self) -> Option<Record> {
        self.rows.into_iter().next()
    }
}
