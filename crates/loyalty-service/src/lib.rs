//! 会员卡后台服务
//!
//! 基于内存查询引擎提供商户、会员计划、用户与电子卡券的 REST API。
//!
//! ## 模块结构
//!
//! - `dto`: 请求/响应数据传输对象
//! - `error`: 错误类型与 JSON 错误响应
//! - `handlers`: API 处理器
//! - `models`: 领域模型
//! - `repository`: 数据访问层（外部字段名到存储字段名的转换在此完成）
//! - `routes`: 路由配置
//! - `state`: 应用状态

pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod state;

pub use error::{Result, ServiceError};
pub use state::AppState;
