//! 商户仓储

use async_trait::async_trait;
use loyalty_memdb::{Database, Direction, Table};
use tracing::debug;

use super::{apply_filter, into_model, into_models, merge_returned, to_record, with_timestamps};
use super::{CompanyRepositoryTrait, inserted};
use crate::dto::{CompanyFilter, CreateCompanyRequest, UpdateCompanyRequest};
use crate::error::Result;
use crate::models::Company;

/// 基于内存查询引擎的商户仓储
#[derive(Clone)]
pub struct CompanyRepository {
    db: Database,
}

impl CompanyRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CompanyRepositoryTrait for CompanyRepository {
    async fn list(&self, filter: &CompanyFilter) -> Result<Vec<Company>> {
        let rows = apply_filter(self.db.open(Table::Companies), filter)?
            .order_by("name", Direction::Asc)
            .await;
        into_models(rows)
    }

    async fn get(&self, id: &str) -> Result<Option<Company>> {
        self.db
            .open(Table::Companies)
            .where_eq("id", id)
            .first()
            .map(into_model)
            .transpose()
    }

    async fn create(&self, req: &CreateCompanyRequest) -> Result<Company> {
        let data = with_timestamps(to_record(req)?);
        let row = inserted(self.db.open(Table::Companies).insert(data).returning_one())?;
        debug!(company_id = ?row.get_str("id"), "商户记录已写入");
        into_model(row)
    }

    async fn update(&self, id: &str, req: &UpdateCompanyRequest) -> Result<Option<Company>> {
        let Some(existing) = self.db.open(Table::Companies).where_eq("id", id).first() else {
            return Ok(None);
        };

        let returned = self
            .db
            .open(Table::Companies)
            .where_eq("id", id)
            .update(to_record(req)?)
            .returning_one();

        merge_returned(existing, returned).map(Some)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let removed = self
            .db
            .open(Table::Companies)
            .delete()
            .where_eq("id", id)
            .execute();
        Ok(removed > 0)
    }
}
