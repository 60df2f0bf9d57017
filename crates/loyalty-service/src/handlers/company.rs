//! 商户管理 API 处理器
//!
//! 实现商户的 CRUD 操作，以及按商户查询会员计划和卡券

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::info;
use validator::Validate;

use crate::{
    dto::{
        ApiResponse, CompanyFilter, CreateCompanyRequest, DeletedResponse, LoyaltyProgramFilter,
        UpdateCompanyRequest, WalletPassFilter,
    },
    error::ServiceError,
    models::{Company, LoyaltyProgram, WalletPass},
    state::AppState,
};

/// 创建商户
///
/// POST /api/companies
pub async fn create_company(
    State(state): State<AppState>,
    Json(req): Json<CreateCompanyRequest>,
) -> Result<Json<ApiResponse<Company>>, ServiceError> {
    req.validate()?;

    let company = state.companies.create(&req).await?;

    info!(company_id = %company.id, name = %company.name, "Company created");

    Ok(Json(ApiResponse::success(company)))
}

/// 获取商户列表
///
/// GET /api/companies?name=&adminEmail=
pub async fn list_companies(
    State(state): State<AppState>,
    Query(filter): Query<CompanyFilter>,
) -> Result<Json<ApiResponse<Vec<Company>>>, ServiceError> {
    let companies = state.companies.list(&filter).await?;
    Ok(Json(ApiResponse::success(companies)))
}

/// 获取商户详情
///
/// GET /api/companies/{id}
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Company>>, ServiceError> {
    let company = state
        .companies
        .get(&id)
        .await?
        .ok_or(ServiceError::CompanyNotFound(id))?;

    Ok(Json(ApiResponse::success(company)))
}

/// 更新商户
///
/// PUT /api/companies/{id}
pub async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCompanyRequest>,
) -> Result<Json<ApiResponse<Company>>, ServiceError> {
    req.validate()?;

    let company = state
        .companies
        .update(&id, &req)
        .await?
        .ok_or_else(|| ServiceError::CompanyNotFound(id.clone()))?;

    info!(company_id = %id, "Company updated");

    Ok(Json(ApiResponse::success(company)))
}

/// 删除商户
///
/// DELETE /api/companies/{id}
pub async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ServiceError> {
    // 模拟模式下删除总是报告成功，所以先确认存在
    if state.companies.get(&id).await?.is_none() {
        return Err(ServiceError::CompanyNotFound(id));
    }

    state.companies.delete(&id).await?;

    info!(company_id = %id, "Company deleted");

    Ok(Json(ApiResponse::success(DeletedResponse::success(id))))
}

/// 获取商户的会员计划
///
/// GET /api/companies/{id}/loyalty-programs
pub async fn list_company_loyalty_programs(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<LoyaltyProgram>>>, ServiceError> {
    if state.companies.get(&id).await?.is_none() {
        return Err(ServiceError::CompanyNotFound(id));
    }

    let filter = LoyaltyProgramFilter {
        company_id: Some(id),
        ..Default::default()
    };
    let programs = state.loyalty_programs.list(&filter).await?;

    Ok(Json(ApiResponse::success(programs)))
}

/// 获取商户的卡券
///
/// GET /api/companies/{id}/wallet-passes
pub async fn list_company_wallet_passes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<WalletPass>>>, ServiceError> {
    if state.companies.get(&id).await?.is_none() {
        return Err(ServiceError::CompanyNotFound(id));
    }

    let filter = WalletPassFilter {
        company_id: Some(id),
        ..Default::default()
    };
    let passes = state.wallet_passes.list(&filter).await?;

    Ok(Json(ApiResponse::success(passes)))
}
