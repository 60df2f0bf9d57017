//! 会员计划 API 处理器
//!
//! 实现会员计划的 CRUD 操作以及成员加入/退出

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::info;
use validator::Validate;

use crate::{
    dto::{
        ApiResponse, CreateLoyaltyProgramRequest, DeletedResponse, EnrollUserRequest,
        LoyaltyProgramFilter, UpdateLoyaltyProgramRequest,
    },
    error::ServiceError,
    models::{LoyaltyProgram, Membership},
    state::AppState,
};

/// 创建会员计划
///
/// POST /api/loyalty-programs
pub async fn create_loyalty_program(
    State(state): State<AppState>,
    Json(req): Json<CreateLoyaltyProgramRequest>,
) -> Result<Json<ApiResponse<LoyaltyProgram>>, ServiceError> {
    req.validate()?;

    if state.companies.get(&req.company_id).await?.is_none() {
        return Err(ServiceError::CompanyNotFound(req.company_id));
    }

    let program = state.loyalty_programs.create(&req).await?;

    info!(
        program_id = %program.id,
        company_id = %program.company_id,
        "Loyalty program created"
    );

    Ok(Json(ApiResponse::success(program)))
}

/// 获取会员计划列表（带商户名称）
///
/// GET /api/loyalty-programs?companyId=&isActive=
pub async fn list_loyalty_programs(
    State(state): State<AppState>,
    Query(filter): Query<LoyaltyProgramFilter>,
) -> Result<Json<ApiResponse<Vec<LoyaltyProgram>>>, ServiceError> {
    let programs = state.loyalty_programs.list(&filter).await?;
    Ok(Json(ApiResponse::success(programs)))
}

/// 获取会员计划详情
///
/// GET /api/loyalty-programs/{id}
pub async fn get_loyalty_program(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<LoyaltyProgram>>, ServiceError> {
    let program = state
        .loyalty_programs
        .get(&id)
        .await?
        .ok_or(ServiceError::LoyaltyProgramNotFound(id))?;

    Ok(Json(ApiResponse::success(program)))
}

/// 更新会员计划
///
/// PUT /api/loyalty-programs/{id}
pub async fn update_loyalty_program(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateLoyaltyProgramRequest>,
) -> Result<Json<ApiResponse<LoyaltyProgram>>, ServiceError> {
    req.validate()?;

    let program = state
        .loyalty_programs
        .update(&id, &req)
        .await?
        .ok_or_else(|| ServiceError::LoyaltyProgramNotFound(id.clone()))?;

    info!(program_id = %id, "Loyalty program updated");

    Ok(Json(ApiResponse::success(program)))
}

/// 删除会员计划
///
/// DELETE /api/loyalty-programs/{id}
pub async fn delete_loyalty_program(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ServiceError> {
    if state.loyalty_programs.get(&id).await?.is_none() {
        return Err(ServiceError::LoyaltyProgramNotFound(id));
    }

    state.loyalty_programs.delete(&id).await?;

    info!(program_id = %id, "Loyalty program deleted");

    Ok(Json(ApiResponse::success(DeletedResponse::success(id))))
}

/// 获取会员计划成员（带用户名与邮箱）
///
/// GET /api/loyalty-programs/{id}/users
pub async fn list_program_users(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Membership>>>, ServiceError> {
    if state.loyalty_programs.get(&id).await?.is_none() {
        return Err(ServiceError::LoyaltyProgramNotFound(id));
    }

    let members = state.loyalty_programs.list_members(&id).await?;
    Ok(Json(ApiResponse::success(members)))
}

/// 用户加入会员计划
///
/// POST /api/loyalty-programs/{id}/users
pub async fn enroll_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<EnrollUserRequest>,
) -> Result<Json<ApiResponse<Membership>>, ServiceError> {
    req.validate()?;

    if state.loyalty_programs.get(&id).await?.is_none() {
        return Err(ServiceError::LoyaltyProgramNotFound(id));
    }
    if state.users.get(&req.user_id).await?.is_none() {
        return Err(ServiceError::UserNotFound(req.user_id));
    }

    let _guard = state.write_lock.lock().await;
    if state
        .loyalty_programs
        .find_membership(&id, &req.user_id)
        .await?
        .is_some()
    {
        return Err(ServiceError::AlreadyEnrolled {
            program_id: id,
            user_id: req.user_id,
        });
    }

    let membership = state.loyalty_programs.enroll(&id, &req.user_id).await?;

    info!(program_id = %id, user_id = %req.user_id, "User enrolled");

    Ok(Json(ApiResponse::success(membership)))
}

/// 用户退出会员计划
///
/// DELETE /api/loyalty-programs/{id}/users/{user_id}
pub async fn unenroll_user(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ServiceError> {
    let removed = state.loyalty_programs.unenroll(&id, &user_id).await?;
    if removed == 0 {
        return Err(ServiceError::MembershipNotFound {
            program_id: id,
            user_id,
        });
    }

    info!(program_id = %id, user_id = %user_id, "User unenrolled");

    Ok(Json(ApiResponse::success(DeletedResponse::success(user_id))))
}
