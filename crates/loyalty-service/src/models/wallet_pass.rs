use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 电子钱包卡券
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct WalletPass {
    pub id: String,
    pub company_id: String,
    #[serde(default)]
    pub loyalty_program_id: Option<String>,
    pub serial_number: String,
    pub pass_type: String,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub foreground_color: Option<String>,
    #[serde(default)]
    pub barcode_message: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loyalty_program_name: Option<String>,
}
