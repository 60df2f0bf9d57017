//! 健康检查

use axum::{Json, extract::State};
use loyalty_memdb::Table;
use serde_json::{Value, json};
use tracing::warn;

use crate::state::AppState;

/// 存活探针：服务进程正常即返回 ok
///
/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "loyalty-service"
    }))
}

/// 就绪探针：执行一次连通性探测并报告各表记录数
///
/// GET /ready
pub async fn readiness_check(State(state): State<AppState>) -> Json<Value> {
    let storage_ok = match state.db.raw("SELECT 1") {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "连通性探测失败");
            false
        }
    };

    let tables: serde_json::Map<String, Value> = Table::ALL
        .iter()
        .map(|table| (table.to_string(), json!(state.db.table_len(*table))))
        .collect();

    Json(json!({
        "status": if storage_ok { "ok" } else { "degraded" },
        "service": "loyalty-service",
        "mutationMode": state.db.mode().as_str(),
        "checks": {
            "storage": if storage_ok { "ok" } else { "fail" }
        },
        "tables": tables
    }))
}
