//! 关联解析
//!
//! 关联关系由静态的关系表声明（源表、外键、目标表、目标键、别名字段），
//! 解析器按关系表通用地查找，新增关联只需要在 [`RELATIONSHIPS`] 中追加一项。
//!
//! 语义约定：
//! - 每条源记录在目标表中至多匹配一条记录
//! - 未匹配时保留源记录原样（无论声明的是 inner 还是 left，都按外连接处理）
//! - 同一构建器上的多个关联彼此独立，都基于源记录自身的外键解析，不会链式传递

use tracing::warn;

use crate::record::Record;
use crate::registry::TableRegistry;
use crate::table::Table;

/// 关联类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

/// 构建器上声明的一次关联
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinClause {
    pub table: Table,
    pub kind: JoinKind,
}

/// 表间关联关系
#[derive(Debug)]
pub struct Relationship {
    pub source: Table,
    pub foreign_key: &'static str,
    pub target: Table,
    pub target_key: &'static str,
    /// (目标表字段, 合并到源记录时使用的别名)
    pub aliases: &'static [(&'static str, &'static str)],
}

pub static RELATIONSHIPS: &[Relationship] = &[
    Relationship {
        source: Table::WalletPasses,
        foreign_key: "company_id",
        target: Table::Companies,
        target_key: "id",
        aliases: &[("name", "company_name")],
    },
    Relationship {
        source: Table::WalletPasses,
        foreign_key: "loyalty_program_id",
        target: Table::LoyaltyPrograms,
        target_key: "id",
        aliases: &[("name", "loyalty_program_name")],
    },
    Relationship {
        source: Table::LoyaltyPrograms,
        foreign_key: "company_id",
        target: Table::Companies,
        target_key: "id",
        aliases: &[("name", "company_name")],
    },
    Relationship {
        source: Table::LoyaltyProgramUsers,
        foreign_key: "user_id",
        target: Table::Users,
        target_key: "id",
        aliases: &[("name", "user_name"), ("email", "user_email")],
    },
    Relationship {
        source: Table::LoyaltyProgramUsers,
        foreign_key: "loyalty_program_id",
        target: Table::LoyaltyPrograms,
        target_key: "id",
        aliases: &[("name", "loyalty_program_name"), ("company_id", "company_id")],
    },
    Relationship {
        source: Table::UserWalletPasses,
        foreign_key: "wallet_pass_id",
        target: Table::WalletPasses,
        target_key: "id",
        aliases: &[
            ("serial_number", "serial_number"),
            ("pass_type", "pass_type"),
            ("company_id", "company_id"),
        ],
    },
    Relationship {
        source: Table::UserWalletPasses,
        foreign_key: "user_id",
        target: Table::Users,
        target_key: "id",
        aliases: &[("name", "user_name")],
    },
];

impl Relationship {
    /// 查找 source -> target 的关联关系
    pub fn find(source: Table, target: Table) -> Option<&'static Relationship> {
        RELATIONSHIPS
            .iter()
            .find(|r| r.source == source && r.target == target)
    }

    /// 用 `original` 的外键查找目标记录，并把别名字段合并进 `enriched`
    ///
    /// 已存在于 `enriched` 的字段不会被覆盖。返回是否匹配到目标记录。
    fn enrich(&self, original: &Record, enriched: &mut Record, registry: &TableRegistry) -> bool {
        let Some(key) = original.get(self.foreign_key).filter(|v| !v.is_null()) else {
            return false;
        };
        let Some(target) = registry.find_by(self.target, self.target_key, key) else {
            return false;
        };

        for (field, alias) in self.aliases {
            if enriched.contains(alias) {
                continue;
            }
            if let Some(value) = target.get(field) {
                enriched.set(*alias, value.clone());
            }
        }
        true
    }
}

/// 按声明顺序对每条源记录应用所有关联
pub fn resolve(
    registry: &TableRegistry,
    source: Table,
    rows: &[Record],
    joins: &[JoinClause],
) -> Vec<Record> {
    let relationships: Vec<&Relationship> = joins
        .iter()
        .filter_map(|join| {
            let relationship = Relationship::find(source, join.table);
            if relationship.is_none() {
                warn!(
                    source = %source,
                    target = %join.table,
                    kind = ?join.kind,
                    "未声明的关联关系，忽略该关联"
                );
            }
            relationship
        })
        .collect();

    if relationships.is_empty() {
        return rows.to_vec();
    }

    rows.iter()
        .map(|original| {
            let mut enriched = original.clone();
            for relationship in &relationships {
                relationship.enrich(original, &mut enriched, registry);
            }
            enriched
        })
        .collect()
}
