//! 关联表模型：会员计划成员、用户持有的卡券

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 用户加入会员计划的记录（loyalty_program_users）
///
/// 关联字段只在对应的关联查询里出现。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Membership {
    pub id: String,
    pub loyalty_program_id: String,
    pub user_id: String,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,

    // users
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,

    // loyalty_programs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loyalty_program_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
}

/// 用户持有的卡券（user_wallet_passes）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct UserWalletPass {
    pub id: String,
    pub user_id: String,
    pub wallet_pass_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    // wallet_passes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_membership_from_storage_row() {
        let row = json!({
            "id": "m1",
            "loyalty_program_id": "p1",
            "user_id": "u1",
            "points": 30,
            "joined_at": "2024-03-01T12:00:00.000Z",
            "user_name": "Alice"
        });

        let membership: Membership = serde_json::from_value(row).unwrap();
        assert_eq!(membership.points, 30);
        assert_eq!(membership.user_name.as_deref(), Some("Alice"));
        assert!(membership.user_email.is_none());

        let out = serde_json::to_value(&membership).unwrap();
        assert_eq!(out["loyaltyProgramId"], "p1");
        assert_eq!(out["userName"], "Alice");
        assert!(out.get("userEmail").is_none());
    }

    #[test]
    fn test_user_wallet_pass_without_join() {
        let row = json!({"id": "x", "user_id": "u1", "wallet_pass_id": "w1"});
        let held: UserWalletPass = serde_json::from_value(row).unwrap();
        assert!(held.serial_number.is_none());
        assert!(held.created_at.is_none());
    }
}
