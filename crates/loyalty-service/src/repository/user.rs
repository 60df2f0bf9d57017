//! 用户仓储

use async_trait::async_trait;
use loyalty_memdb::{Database, Direction, Record, Table, timestamp};
use serde_json::json;
use tracing::debug;

use super::{
    UserRepositoryTrait, apply_filter, inserted, into_model, into_models, merge_returned,
    to_record, with_timestamps,
};
use crate::dto::{CreateUserRequest, UpdateUserRequest, UserFilter};
use crate::error::Result;
use crate::models::{Membership, User, UserWalletPass};

#[derive(Clone)]
pub struct UserRepository {
    db: Database,
}

impl UserRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn find(&self, id: &str) -> Option<Record> {
        self.db.open(Table::Users).where_eq("id", id).first()
    }

    /// 积分增减
    ///
    /// 模拟模式下返回的固定积分覆盖在原记录上，内存表不变。
    fn change_points(&self, id: &str, delta: i64) -> Result<Option<User>> {
        let Some(existing) = self.find(id) else {
            return Ok(None);
        };

        let query = self.db.open(Table::Users).where_eq("id", id);
        let result = if delta >= 0 {
            query.increment("points", delta)
        } else {
            query.decrement("points", -delta)
        };

        let returned = result.returning_one();
        debug!(user_id = %id, delta, "用户积分已变更");
        merge_returned(existing, returned).map(Some)
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>> {
        let rows = apply_filter(self.db.open(Table::Users), filter)?.await;
        into_models(rows)
    }

    async fn get(&self, id: &str) -> Result<Option<User>> {
        self.find(id).map(into_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.db
            .open(Table::Users)
            .where_eq("email", email)
            .first()
            .map(into_model)
            .transpose()
    }

    async fn create(&self, req: &CreateUserRequest) -> Result<User> {
        let data = with_timestamps(to_record(req)?);
        let row = inserted(self.db.open(Table::Users).insert(data).returning_one())?;
        into_model(row)
    }

    async fn update(&self, id: &str, req: &UpdateUserRequest) -> Result<Option<User>> {
        let Some(existing) = self.find(id) else {
            return Ok(None);
        };

        let returned = self
            .db
            .open(Table::Users)
            .where_eq("id", id)
            .update(to_record(req)?)
            .returning_one();

        merge_returned(existing, returned).map(Some)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.db.open(Table::Users).delete().where_eq("id", id).execute() > 0)
    }

    async fn add_points(&self, id: &str, amount: i64) -> Result<Option<User>> {
        self.change_points(id, amount)
    }

    async fn deduct_points(&self, id: &str, amount: i64) -> Result<Option<User>> {
        self.change_points(id, -amount)
    }

    async fn list_memberships(&self, user_id: &str) -> Result<Vec<Membership>> {
        let rows = self
            .db
            .open(Table::LoyaltyProgramUsers)
            .left_join(Table::LoyaltyPrograms)
            .where_eq("user_id", user_id)
            .order_by("joined_at", Direction::Asc)
            .await;
        into_models(rows)
    }

    async fn list_wallet_passes(&self, user_id: &str) -> Result<Vec<UserWalletPass>> {
        let rows = self
            .db
            .open(Table::UserWalletPasses)
            .left_join(Table::WalletPasses)
            .where_eq("user_id", user_id)
            .await;
        into_models(rows)
    }

    async fn find_wallet_pass(
        &self,
        user_id: &str,
        wallet_pass_id: &str,
    ) -> Result<Option<UserWalletPass>> {
        self.db
            .open(Table::UserWalletPasses)
            .where_eq("user_id", user_id)
            .where_eq("wallet_pass_id", wallet_pass_id)
            .first()
            .map(into_model)
            .transpose()
    }

    async fn assign_wallet_pass(&self, user_id: &str, wallet_pass_id: &str) -> Result<UserWalletPass> {
        let data = Record::from(json!({
            "user_id": user_id,
            "wallet_pass_id": wallet_pass_id,
            "created_at": timestamp(),
        }));
        let row = inserted(
            self.db
                .open(Table::UserWalletPasses)
                .insert(data)
                .returning_one(),
        )?;
        into_model(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::Fake;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use loyalty_memdb::{Fixtures, MutationMode, SIMULATED_COUNTER_VALUE};

    const ALICE: &str = "7e1f9a10-0003-4000-8000-000000000001";

    fn seeded_repo(mode: MutationMode) -> UserRepository {
        let db = Database::new(mode);
        db.seed_fixtures(Fixtures::builtin().unwrap());
        UserRepository::new(db)
    }

    fn random_user() -> CreateUserRequest {
        CreateUserRequest {
            name: Name().fake(),
            email: SafeEmail().fake(),
            phone: None,
            points: 0,
        }
    }

    #[tokio::test]
    async fn test_create_then_find_by_id_and_email() {
        let repo = UserRepository::new(Database::default());
        let req = random_user();

        let created = repo.create(&req).await.unwrap();
        assert_eq!(created.points, 0);

        let by_id = repo.get(&created.id).await.unwrap().unwrap();
        assert_eq!(by_id, created);

        let by_email = repo.find_by_email(&req.email).await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);
    }

    #[tokio::test]
    async fn test_find_by_email_on_empty_table() {
        let repo = UserRepository::new(Database::default());
        assert!(repo.find_by_email("x@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_points_add_and_deduct() {
        let repo = seeded_repo(MutationMode::Persistent);

        let user = repo.add_points(ALICE, 50).await.unwrap().unwrap();
        assert_eq!(user.points, 200);

        let user = repo.deduct_points(ALICE, 30).await.unwrap().unwrap();
        assert_eq!(user.points, 170);
        assert_eq!(repo.get(ALICE).await.unwrap().unwrap().points, 170);
    }

    #[tokio::test]
    async fn test_points_simulated_returns_canned_value() {
        let repo = seeded_repo(MutationMode::Simulated);

        let user = repo.add_points(ALICE, 50).await.unwrap().unwrap();
        assert_eq!(user.points, SIMULATED_COUNTER_VALUE);
        assert_eq!(user.name, "Alice Chen");
        assert_eq!(repo.get(ALICE).await.unwrap().unwrap().points, 150);
    }

    #[tokio::test]
    async fn test_points_on_missing_user() {
        let repo = seeded_repo(MutationMode::Persistent);
        assert!(repo.add_points("missing", 10).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memberships_and_wallet_passes_are_enriched() {
        let repo = seeded_repo(MutationMode::Persistent);

        let memberships = repo.list_memberships(ALICE).await.unwrap();
        assert_eq!(memberships.len(), 1);
        assert_eq!(memberships[0].loyalty_program_name.as_deref(), Some("Coffee Stamps"));

        let passes = repo.list_wallet_passes(ALICE).await.unwrap();
        assert_eq!(passes.len(), 1);
        assert_eq!(passes[0].serial_number.as_deref(), Some("BB-0001"));
    }

    #[tokio::test]
    async fn test_assign_wallet_pass() {
        let repo = seeded_repo(MutationMode::Persistent);
        let held = repo
            .assign_wallet_pass(ALICE, "9d3e5b21-0004-4000-8000-000000000002")
            .await
            .unwrap();
        assert_eq!(held.user_id, ALICE);

        assert_eq!(repo.list_wallet_passes(ALICE).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_find_wallet_pass() {
        let repo = seeded_repo(MutationMode::Persistent);
        let held = repo
            .find_wallet_pass(ALICE, "9d3e5b21-0004-4000-8000-000000000001")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(held.user_id, ALICE);

        assert!(
            repo.find_wallet_pass(ALICE, "9d3e5b21-0004-4000-8000-000000000002")
                .await
                .unwrap()
                .is_none()
        );
    }
}
