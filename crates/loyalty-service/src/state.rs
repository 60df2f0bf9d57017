//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use loyalty_memdb::Database;
use tokio::sync::Mutex;

use crate::repository::{
    CompanyRepository, CompanyRepositoryTrait, LoyaltyProgramRepository,
    LoyaltyProgramRepositoryTrait, UserRepository, UserRepositoryTrait, WalletPassRepository,
    WalletPassRepositoryTrait,
};

/// Axum 应用共享状态
///
/// 所有仓储共享同一个 [`Database`] 句柄，单次读写在其内部串行执行。
/// 先检查再写入的业务操作（积分兑换、邮箱查重、加入计划、发放卡券）
/// 需要持有 `write_lock` 完成整个过程。
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub write_lock: Arc<Mutex<()>>,
    pub companies: Arc<dyn CompanyRepositoryTrait>,
    pub loyalty_programs: Arc<dyn LoyaltyProgramRepositoryTrait>,
    pub users: Arc<dyn UserRepositoryTrait>,
    pub wallet_passes: Arc<dyn WalletPassRepositoryTrait>,
}

impl AppState {
    /// 基于内存数据库创建应用状态
    pub fn new(db: Database) -> Self {
        Self {
            companies: Arc::new(CompanyRepository::new(db.clone())),
            loyalty_programs: Arc::new(LoyaltyProgramRepository::new(db.clone())),
            users: Arc::new(UserRepository::new(db.clone())),
            wallet_passes: Arc::new(WalletPassRepository::new(db.clone())),
            write_lock: Arc::new(Mutex::new(())),
            db,
        }
    }
}
