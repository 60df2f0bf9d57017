use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 会员计划
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct LoyaltyProgram {
    pub id: String,
    pub company_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub points_per_visit: i64,
    #[serde(default)]
    pub reward_threshold: i64,
    #[serde(default)]
    pub reward_description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// 关联 companies 后得到的商户名称
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

fn default_active() -> bool {
    true
}
