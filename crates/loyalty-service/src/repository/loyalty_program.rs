//! 会员计划仓储
//!
//! 计划列表与详情关联 companies 带出商户名称；成员查询关联 users。

use async_trait::async_trait;
use loyalty_memdb::{Database, Direction, Record, Table, timestamp};
use serde_json::json;

use super::{
    LoyaltyProgramRepositoryTrait, apply_filter, inserted, into_model, into_models,
    merge_returned, to_record, with_timestamps,
};
use crate::dto::{CreateLoyaltyProgramRequest, LoyaltyProgramFilter, UpdateLoyaltyProgramRequest};
use crate::error::Result;
use crate::models::{LoyaltyProgram, Membership};

#[derive(Clone)]
pub struct LoyaltyProgramRepository {
    db: Database,
}

impl LoyaltyProgramRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LoyaltyProgramRepositoryTrait for LoyaltyProgramRepository {
    async fn list(&self, filter: &LoyaltyProgramFilter) -> Result<Vec<LoyaltyProgram>> {
        let query = self
            .db
            .open(Table::LoyaltyPrograms)
            .left_join(Table::Companies);
        let rows = apply_filter(query, filter)?.await;
        into_models(rows)
    }

    async fn get(&self, id: &str) -> Result<Option<LoyaltyProgram>> {
        self.db
            .open(Table::LoyaltyPrograms)
            .left_join(Table::Companies)
            .where_eq("loyalty_programs.id", id)
            .first()
            .map(into_model)
            .transpose()
    }

    async fn create(&self, req: &CreateLoyaltyProgramRequest) -> Result<LoyaltyProgram> {
        let data = with_timestamps(to_record(req)?);
        let row = inserted(self.db.open(Table::LoyaltyPrograms).insert(data).returning_one())?;
        into_model(row)
    }

    async fn update(
        &self,
        id: &str,
        req: &UpdateLoyaltyProgramRequest,
    ) -> Result<Option<LoyaltyProgram>> {
        let Some(existing) = self
            .db
            .open(Table::LoyaltyPrograms)
            .where_eq("id", id)
            .first()
        else {
            return Ok(None);
        };

        let returned = self
            .db
            .open(Table::LoyaltyPrograms)
            .where_eq("id", id)
            .update(to_record(req)?)
            .returning_one();

        merge_returned(existing, returned).map(Some)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.db.open(Table::LoyaltyPrograms).where_eq("id", id).del() > 0)
    }

    async fn list_members(&self, program_id: &str) -> Result<Vec<Membership>> {
        let rows = self
            .db
            .open(Table::LoyaltyProgramUsers)
            .left_join(Table::Users)
            .where_eq("loyalty_program_id", program_id)
            .order_by("joined_at", Direction::Asc)
            .await;
        into_models(rows)
    }

    async fn find_membership(&self, program_id: &str, user_id: &str) -> Result<Option<Membership>> {
        self.db
            .open(Table::LoyaltyProgramUsers)
            .where_eq("loyalty_program_id", program_id)
            .where_eq("user_id", user_id)
            .first()
            .map(into_model)
            .transpose()
    }

    async fn enroll(&self, program_id: &str, user_id: &str) -> Result<Membership> {
        let data = Record::from(json!({
            "loyalty_program_id": program_id,
            "user_id": user_id,
            "points": 0,
            "joined_at": timestamp(),
        }));
        let row = inserted(
            self.db
                .open(Table::LoyaltyProgramUsers)
                .insert(data)
                .returning_one(),
        )?;
        into_model(row)
    }

    async fn unenroll(&self, program_id: &str, user_id: &str) -> Result<usize> {
        Ok(self
            .db
            .open(Table::LoyaltyProgramUsers)
            .delete()
            .where_eq("loyalty_program_id", program_id)
            .where_eq("user_id", user_id)
            .execute())
    }
}
