//! 卡券 API 处理器

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::info;
use validator::Validate;

use crate::{
    dto::{
        ApiResponse, CreateWalletPassRequest, DeletedResponse, UpdateWalletPassRequest,
        WalletPassFilter,
    },
    error::ServiceError,
    models::WalletPass,
    state::AppState,
};

/// 创建卡券
///
/// POST /api/wallet-passes
pub async fn create_wallet_pass(
    State(state): State<AppState>,
    Json(req): Json<CreateWalletPassRequest>,
) -> Result<Json<ApiResponse<WalletPass>>, ServiceError> {
    req.validate()?;

    if state.companies.get(&req.company_id).await?.is_none() {
        return Err(ServiceError::CompanyNotFound(req.company_id));
    }
    if let Some(program_id) = &req.loyalty_program_id {
        if state.loyalty_programs.get(program_id).await?.is_none() {
            return Err(ServiceError::LoyaltyProgramNotFound(program_id.clone()));
        }
    }

    let pass = state.wallet_passes.create(&req).await?;

    info!(
        wallet_pass_id = %pass.id,
        serial_number = %pass.serial_number,
        "Wallet pass created"
    );

    Ok(Json(ApiResponse::success(pass)))
}

/// 获取卡券列表（带商户与计划名称）
///
/// GET /api/wallet-passes?companyId=&loyaltyProgramId=
pub async fn list_wallet_passes(
    State(state): State<AppState>,
    Query(filter): Query<WalletPassFilter>,
) -> Result<Json<ApiResponse<Vec<WalletPass>>>, ServiceError> {
    let passes = state.wallet_passes.list(&filter).await?;
    Ok(Json(ApiResponse::success(passes)))
}

/// 获取卡券详情
///
/// GET /api/wallet-passes/{id}
pub async fn get_wallet_pass(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<WalletPass>>, ServiceError> {
    let pass = state
        .wallet_passes
        .get(&id)
        .await?
        .ok_or(ServiceError::WalletPassNotFound(id))?;

    Ok(Json(ApiResponse::success(pass)))
}

/// 更新卡券
///
/// PUT /api/wallet-passes/{id}
pub async fn update_wallet_pass(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateWalletPassRequest>,
) -> Result<Json<ApiResponse<WalletPass>>, ServiceError> {
    req.validate()?;

    if let Some(program_id) = &req.loyalty_program_id {
        if state.loyalty_programs.get(program_id).await?.is_none() {
            return Err(ServiceError::LoyaltyProgramNotFound(program_id.clone()));
        }
    }

    let pass = state
        .wallet_passes
        .update(&id, &req)
        .await?
        .ok_or_else(|| ServiceError::WalletPassNotFound(id.clone()))?;

    info!(wallet_pass_id = %id, "Wallet pass updated");

    Ok(Json(ApiResponse::success(pass)))
}

/// 删除卡券
///
/// DELETE /api/wallet-passes/{id}
pub async fn delete_wallet_pass(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ServiceError> {
    if state.wallet_passes.get(&id).await?.is_none() {
        return Err(ServiceError::WalletPassNotFound(id));
    }

    state.wallet_passes.delete(&id).await?;

    info!(wallet_pass_id = %id, "Wallet pass deleted");

    Ok(Json(ApiResponse::success(DeletedResponse::success(id))))
}
