//! API 处理器模块
//!
//! 每个子模块对应一类资源的 REST 端点

pub mod company;
pub mod health;
pub mod loyalty_program;
pub mod user;
pub mod wallet_pass;
