//! 数据表枚举
//!
//! 引擎只认识固定的一组表，字符串表名在边界处解析，未知表名直接拒绝。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// 已知数据表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Companies,
    LoyaltyPrograms,
    Users,
    WalletPasses,
    /// 会员与忠诚度计划的多对多关联
    LoyaltyProgramUsers,
    /// 用户与钱包卡券的多对多关联
    UserWalletPasses,
}

impl Table {
    pub const ALL: [Table; 6] = [
        Table::Companies,
        Table::LoyaltyPrograms,
        Table::Users,
        Table::WalletPasses,
        Table::LoyaltyProgramUsers,
        Table::UserWalletPasses,
    ];

    /// 存储层使用的表名
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Companies => "companies",
            Self::LoyaltyPrograms => "loyalty_programs",
            Self::Users => "users",
            Self::WalletPasses => "wallet_passes",
            Self::LoyaltyProgramUsers => "loyalty_program_users",
            Self::UserWalletPasses => "user_wallet_passes",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Table {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|table| table.as_str() == s)
            .ok_or_else(|| QueryError::UnknownTable(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tables() {
        for table in Table::ALL {
            assert_eq!(table.as_str().parse::<Table>().unwrap(), table);
        }
    }

    #[test]
    fn test_parse_unknown_table() {
        let err = "orders".parse::<Table>().unwrap_err();
        assert!(matches!(err, QueryError::UnknownTable(name) if name == "orders"));
    }

    #[test]
    fn test_serde_uses_storage_names() {
        let json = serde_json::to_string(&Table::LoyaltyProgramUsers).unwrap();
        assert_eq!(json, "\"loyalty_program_users\"");
    }
}
