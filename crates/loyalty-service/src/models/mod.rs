//! 领域模型
//!
//! 模型从内存表记录（snake_case 存储字段名）反序列化，序列化输出 camelCase 供 API 返回。

mod company;
mod loyalty_program;
mod membership;
mod user;
mod wallet_pass;

pub use company::Company;
pub use loyalty_program::LoyaltyProgram;
pub use membership::{Membership, UserWalletPass};
pub use user::User;
pub use wallet_pass::WalletPass;
