//! 卡券仓储
//!
//! 读取时关联 companies 与 loyalty_programs，两次关联互不影响。

use async_trait::async_trait;
use loyalty_memdb::{Database, QueryBuilder, Table};

use super::{
    WalletPassRepositoryTrait, apply_filter, inserted, into_model, into_models, merge_returned,
    to_record, with_timestamps,
};
use crate::dto::{CreateWalletPassRequest, UpdateWalletPassRequest, WalletPassFilter};
use crate::error::Result;
use crate::models::WalletPass;

#[derive(Clone)]
pub struct WalletPassRepository {
    db: Database,
}

impl WalletPassRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn enriched(&self) -> QueryBuilder {
        self.db
            .open(Table::WalletPasses)
            .left_join(Table::Companies)
            .left_join(Table::LoyaltyPrograms)
    }
}

#[async_trait]
impl WalletPassRepositoryTrait for WalletPassRepository {
    async fn list(&self, filter: &WalletPassFilter) -> Result<Vec<WalletPass>> {
        let rows = apply_filter(self.enriched(), filter)?.await;
        into_models(rows)
    }

    async fn get(&self, id: &str) -> Result<Option<WalletPass>> {
        self.enriched()
            .where_eq("wallet_passes.id", id)
            .first()
            .map(into_model)
            .transpose()
    }

    async fn create(&self, req: &CreateWalletPassRequest) -> Result<WalletPass> {
        let data = with_timestamps(to_record(req)?);
        let row = inserted(self.db.open(Table::WalletPasses).insert(data).returning_one())?;
        into_model(row)
    }

    async fn update(&self, id: &str, req: &UpdateWalletPassRequest) -> Result<Option<WalletPass>> {
        let Some(existing) = self.db.open(Table::WalletPasses).where_eq("id", id).first() else {
            return Ok(None);
        };

        let returned = self
            .db
            .open(Table::WalletPasses)
            .where_eq("id", id)
            .update(to_record(req)?)
            .returning_one();

        merge_returned(existing, returned).map(Some)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.db.open(Table::WalletPasses).where_eq("id", id).del() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loyalty_memdb::{Fixtures, MutationMode};

    const BLUE_BOTTLE: &str = "c0a8f3e2-0001-4000-8000-000000000001";

    fn seeded_repo() -> WalletPassRepository {
        let db = Database::new(MutationMode::Persistent);
        db.seed_fixtures(Fixtures::builtin().unwrap());
        WalletPassRepository::new(db)
    }

    fn create_request(company_id: &str, serial: &str) -> CreateWalletPassRequest {
        CreateWalletPassRequest {
            company_id: company_id.to_string(),
            loyalty_program_id: None,
            serial_number: serial.to_string(),
            pass_type: "storeCard".to_string(),
            background_color: Some("#1d1d1f".to_string()),
            foreground_color: None,
            barcode_message: None,
        }
    }

    #[tokio::test]
    async fn test_list_carries_company_and_program_names() {
        let repo = seeded_repo();
        let filter = WalletPassFilter {
            company_id: Some(BLUE_BOTTLE.to_string()),
            ..Default::default()
        };

        let passes = repo.list(&filter).await.unwrap();
        assert_eq!(passes.len(), 1);
        assert_eq!(passes[0].serial_number, "BB-0001");
        assert_eq!(passes[0].company_name.as_deref(), Some("Blue Bottle Coffee"));
        assert_eq!(passes[0].loyalty_program_name.as_deref(), Some("Coffee Stamps"));
    }

    #[tokio::test]
    async fn test_pass_without_program_keeps_company_name() {
        let repo = seeded_repo();
        let created = repo.create(&create_request(BLUE_BOTTLE, "BB-0099")).await.unwrap();

        let found = repo.get(&created.id).await.unwrap().unwrap();
        assert_eq!(found.company_name.as_deref(), Some("Blue Bottle Coffee"));
        assert!(found.loyalty_program_name.is_none());
    }

    #[tokio::test]
    async fn test_dangling_company_still_listed() {
        let repo = seeded_repo();
        let created = repo.create(&create_request("ghost", "GH-0001")).await.unwrap();

        let found = repo.get(&created.id).await.unwrap().unwrap();
        assert_eq!(found.company_id, "ghost");
        assert!(found.company_name.is_none());
    }

    #[tokio::test]
    async fn test_update_then_delete() {
        let repo = seeded_repo();
        let created = repo.create(&create_request(BLUE_BOTTLE, "BB-0100")).await.unwrap();

        let req = UpdateWalletPassRequest {
            barcode_message: Some("BB-0100-QR".to_string()),
            ..Default::default()
        };
        let updated = repo.update(&created.id, &req).await.unwrap().unwrap();
        assert_eq!(updated.barcode_message.as_deref(), Some("BB-0100-QR"));
        assert_eq!(updated.serial_number, "BB-0100");

        assert!(repo.delete(&created.id).await.unwrap());
        assert!(repo.get(&created.id).await.unwrap().is_none());
    }
}
