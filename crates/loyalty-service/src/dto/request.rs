//! 请求 DTO 定义
//!
//! 请求体和查询参数按 camelCase 反序列化；序列化时使用存储字段名（snake_case），
//! 仓储层据此把请求转换为内存表记录，`None` 字段不参与写入。

use serde::{Deserialize, Serialize};
use validator::Validate;

// ==================== 商户 ====================

/// 创建商户请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct CreateCompanyRequest {
    #[validate(length(min = 1, max = 100, message = "商户名称长度必须在1-100个字符之间"))]
    pub name: String,
    #[validate(email(message = "管理员邮箱格式不正确"))]
    pub admin_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[validate(url(message = "Logo 地址必须是合法 URL"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// 更新商户请求
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct UpdateCompanyRequest {
    #[validate(length(min = 1, max = 100, message = "商户名称长度必须在1-100个字符之间"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(email(message = "管理员邮箱格式不正确"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[validate(url(message = "Logo 地址必须是合法 URL"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// 商户列表过滤参数
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct CompanyFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_email: Option<String>,
}

// ==================== 会员计划 ====================

/// 创建会员计划请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct CreateLoyaltyProgramRequest {
    #[validate(length(min = 1, message = "商户 ID 不能为空"))]
    pub company_id: String,
    #[validate(length(min = 1, max = 100, message = "计划名称长度必须在1-100个字符之间"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(range(min = 0, message = "每次到店积分不能为负"))]
    #[serde(default)]
    pub points_per_visit: i64,
    #[validate(range(min = 1, message = "兑奖门槛必须大于0"))]
    pub reward_threshold: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward_description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// 更新会员计划请求
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct UpdateLoyaltyProgramRequest {
    #[validate(length(min = 1, max = 100, message = "计划名称长度必须在1-100个字符之间"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(range(min = 0, message = "每次到店积分不能为负"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_per_visit: Option<i64>,
    #[validate(range(min = 1, message = "兑奖门槛必须大于0"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward_threshold: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// 会员计划列表过滤参数
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct LoyaltyProgramFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// 加入会员计划请求
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EnrollUserRequest {
    #[validate(length(min = 1, message = "用户 ID 不能为空"))]
    pub user_id: String,
}

// ==================== 用户 ====================

/// 创建用户请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100, message = "用户名长度必须在1-100个字符之间"))]
    pub name: String,
    #[validate(email(message = "邮箱格式不正确"))]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[validate(range(min = 0, message = "初始积分不能为负"))]
    #[serde(default)]
    pub points: i64,
}

/// 更新用户请求
///
/// 积分只能通过积分接口变更。
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "用户名长度必须在1-100个字符之间"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(email(message = "邮箱格式不正确"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// 用户列表过滤参数
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// 积分变动请求
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PointsRequest {
    #[validate(range(min = 1, message = "积分数量必须大于0"))]
    pub amount: i64,
}

/// 为用户发放卡券请求
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignWalletPassRequest {
    #[validate(length(min = 1, message = "卡券 ID 不能为空"))]
    pub wallet_pass_id: String,
}

// ==================== 卡券 ====================

/// 创建卡券请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct CreateWalletPassRequest {
    #[validate(length(min = 1, message = "商户 ID 不能为空"))]
    pub company_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loyalty_program_id: Option<String>,
    #[validate(length(min = 1, max = 64, message = "序列号长度必须在1-64个字符之间"))]
    pub serial_number: String,
    #[validate(length(min = 1, max = 32, message = "卡券类型长度必须在1-32个字符之间"))]
    pub pass_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode_message: Option<String>,
}

/// 更新卡券请求
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct UpdateWalletPassRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loyalty_program_id: Option<String>,
    #[validate(length(min = 1, max = 32, message = "卡券类型长度必须在1-32个字符之间"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode_message: Option<String>,
}

/// 卡券列表过滤参数
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct WalletPassFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loyalty_program_id: Option<String>,
}
