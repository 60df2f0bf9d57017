//! DTO 模块
//!
//! 包含所有请求和响应的数据传输对象

pub mod request;
pub mod response;

pub use request::{
    AssignWalletPassRequest, CompanyFilter, CreateCompanyRequest, CreateLoyaltyProgramRequest,
    CreateUserRequest, CreateWalletPassRequest, EnrollUserRequest, LoyaltyProgramFilter,
    PointsRequest, UpdateCompanyRequest, UpdateLoyaltyProgramRequest, UpdateUserRequest,
    UpdateWalletPassRequest, UserFilter, WalletPassFilter,
};

pub use response::{ApiResponse, DeletedResponse};
