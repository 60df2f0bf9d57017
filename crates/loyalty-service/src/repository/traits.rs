//! 仓储 Trait 定义
//!
//! handler 依赖这些接口而非具体实现，测试中可以替换为 mock

use async_trait::async_trait;

use crate::dto::{
    CompanyFilter, CreateCompanyRequest, CreateLoyaltyProgramRequest, CreateUserRequest,
    CreateWalletPassRequest, LoyaltyProgramFilter, UpdateCompanyRequest,
    UpdateLoyaltyProgramRequest, UpdateUserRequest, UpdateWalletPassRequest, UserFilter,
    WalletPassFilter,
};
use crate::error::Result;
use crate::models::{Company, LoyaltyProgram, Membership, User, UserWalletPass, WalletPass};

/// 商户仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRepositoryTrait: Send + Sync {
    async fn list(&self, filter: &CompanyFilter) -> Result<Vec<Company>>;
    async fn get(&self, id: &str) -> Result<Option<Company>>;
    async fn create(&self, req: &CreateCompanyRequest) -> Result<Company>;
    async fn update(&self, id: &str, req: &UpdateCompanyRequest) -> Result<Option<Company>>;
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// 会员计划仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoyaltyProgramRepositoryTrait: Send + Sync {
    async fn list(&self, filter: &LoyaltyProgramFilter) -> Result<Vec<LoyaltyProgram>>;
    async fn get(&self, id: &str) -> Result<Option<LoyaltyProgram>>;
    async fn create(&self, req: &CreateLoyaltyProgramRequest) -> Result<LoyaltyProgram>;
    async fn update(
        &self,
        id: &str,
        req: &UpdateLoyaltyProgramRequest,
    ) -> Result<Option<LoyaltyProgram>>;
    async fn delete(&self, id: &str) -> Result<bool>;

    // 成员
    async fn list_members(&self, program_id: &str) -> Result<Vec<Membership>>;
    async fn find_membership(&self, program_id: &str, user_id: &str) -> Result<Option<Membership>>;
    async fn enroll(&self, program_id: &str, user_id: &str) -> Result<Membership>;
    async fn unenroll(&self, program_id: &str, user_id: &str) -> Result<usize>;
}

/// 用户仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>>;
    async fn get(&self, id: &str) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn create(&self, req: &CreateUserRequest) -> Result<User>;
    async fn update(&self, id: &str, req: &UpdateUserRequest) -> Result<Option<User>>;
    async fn delete(&self, id: &str) -> Result<bool>;

    // 积分
    async fn add_points(&self, id: &str, amount: i64) -> Result<Option<User>>;
    async fn deduct_points(&self, id: &str, amount: i64) -> Result<Option<User>>;

    // 关联
    async fn list_memberships(&self, user_id: &str) -> Result<Vec<Membership>>;
    async fn list_wallet_passes(&self, user_id: &str) -> Result<Vec<UserWalletPass>>;
    async fn find_wallet_pass(
        &self,
        user_id: &str,
        wallet_pass_id: &str,
    ) -> Result<Option<UserWalletPass>>;
    async fn assign_wallet_pass(&self, user_id: &str, wallet_pass_id: &str) -> Result<UserWalletPass>;
}

/// 卡券仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletPassRepositoryTrait: Send + Sync {
    async fn list(&self, filter: &WalletPassFilter) -> Result<Vec<WalletPass>>;
    async fn get(&self, id: &str) -> Result<Option<WalletPass>>;
    async fn create(&self, req: &CreateWalletPassRequest) -> Result<WalletPass>;
    async fn update(&self, id: &str, req: &UpdateWalletPassRequest) -> Result<Option<WalletPass>>;
    async fn delete(&self, id: &str) -> Result<bool>;
}
