//! 用户 API 处理器
//!
//! 实现用户 CRUD、积分增减，以及用户的会员计划和卡券

use axum::{
    Json,
    extract::{Path, Query, State},
};
use loyalty_shared::observability::metrics;
use tracing::info;
use validator::Validate;

use crate::{
    dto::{
        ApiResponse, AssignWalletPassRequest, CreateUserRequest, DeletedResponse, PointsRequest,
        UpdateUserRequest, UserFilter,
    },
    error::ServiceError,
    models::{Membership, User, UserWalletPass},
    state::AppState,
};

/// 创建用户
///
/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<User>>, ServiceError> {
    req.validate()?;

    let _guard = state.write_lock.lock().await;
    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(ServiceError::DuplicateEmail(req.email));
    }

    let user = state.users.create(&req).await?;

    info!(user_id = %user.id, "User created");

    Ok(Json(ApiResponse::success(user)))
}

/// 获取用户列表
///
/// GET /api/users?email=
pub async fn list_users(
    State(state): State<AppState>,
    Query(filter): Query<UserFilter>,
) -> Result<Json<ApiResponse<Vec<User>>>, ServiceError> {
    let users = state.users.list(&filter).await?;
    Ok(Json(ApiResponse::success(users)))
}

/// 获取用户详情
///
/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<User>>, ServiceError> {
    let user = state
        .users
        .get(&id)
        .await?
        .ok_or(ServiceError::UserNotFound(id))?;

    Ok(Json(ApiResponse::success(user)))
}

/// 更新用户
///
/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<User>>, ServiceError> {
    req.validate()?;

    let _guard = state.write_lock.lock().await;
    // 邮箱不能与其他用户重复
    if let Some(email) = &req.email {
        if let Some(other) = state.users.find_by_email(email).await? {
            if other.id != id {
                return Err(ServiceError::DuplicateEmail(email.clone()));
            }
        }
    }

    let user = state
        .users
        .update(&id, &req)
        .await?
        .ok_or_else(|| ServiceError::UserNotFound(id.clone()))?;

    info!(user_id = %id, "User updated");

    Ok(Json(ApiResponse::success(user)))
}

/// 删除用户
///
/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ServiceError> {
    if state.users.get(&id).await?.is_none() {
        return Err(ServiceError::UserNotFound(id));
    }

    state.users.delete(&id).await?;

    info!(user_id = %id, "User deleted");

    Ok(Json(ApiResponse::success(DeletedResponse::success(id))))
}

/// 增加积分
///
/// POST /api/users/{id}/points/add
pub async fn add_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<PointsRequest>,
) -> Result<Json<ApiResponse<User>>, ServiceError> {
    req.validate()?;

    let user = state
        .users
        .add_points(&id, req.amount)
        .await?
        .ok_or_else(|| ServiceError::UserNotFound(id.clone()))?;

    metrics::record_points_change("add", req.amount);
    info!(user_id = %id, amount = req.amount, balance = user.points, "Points added");

    Ok(Json(ApiResponse::success(user)))
}

/// 兑换（扣减）积分，余额不足时拒绝
///
/// POST /api/users/{id}/points/redeem
pub async fn redeem_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<PointsRequest>,
) -> Result<Json<ApiResponse<User>>, ServiceError> {
    req.validate()?;

    // 余额检查与扣减之间不能插入其他兑换
    let _guard = state.write_lock.lock().await;
    let current = state
        .users
        .get(&id)
        .await?
        .ok_or_else(|| ServiceError::UserNotFound(id.clone()))?;

    if current.points < req.amount {
        return Err(ServiceError::InsufficientPoints {
            available: current.points,
            requested: req.amount,
        });
    }

    let user = state
        .users
        .deduct_points(&id, req.amount)
        .await?
        .ok_or_else(|| ServiceError::UserNotFound(id.clone()))?;

    metrics::record_points_change("redeem", req.amount);
    info!(user_id = %id, amount = req.amount, balance = user.points, "Points redeemed");

    Ok(Json(ApiResponse::success(user)))
}

/// 获取用户加入的会员计划
///
/// GET /api/users/{id}/loyalty-programs
pub async fn list_user_loyalty_programs(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Membership>>>, ServiceError> {
    if state.users.get(&id).await?.is_none() {
        return Err(ServiceError::UserNotFound(id));
    }

    let memberships = state.users.list_memberships(&id).await?;
    Ok(Json(ApiResponse::success(memberships)))
}

/// 获取用户持有的卡券（带序列号与类型）
///
/// GET /api/users/{id}/wallet-passes
pub async fn list_user_wallet_passes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<UserWalletPass>>>, ServiceError> {
    if state.users.get(&id).await?.is_none() {
        return Err(ServiceError::UserNotFound(id));
    }

    let passes = state.users.list_wallet_passes(&id).await?;
    Ok(Json(ApiResponse::success(passes)))
}

/// 为用户发放卡券
///
/// POST /api/users/{id}/wallet-passes
pub async fn assign_wallet_pass(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AssignWalletPassRequest>,
) -> Result<Json<ApiResponse<UserWalletPass>>, ServiceError> {
    req.validate()?;

    if state.users.get(&id).await?.is_none() {
        return Err(ServiceError::UserNotFound(id));
    }
    if state.wallet_passes.get(&req.wallet_pass_id).await?.is_none() {
        return Err(ServiceError::WalletPassNotFound(req.wallet_pass_id));
    }

    let _guard = state.write_lock.lock().await;
    if state
        .users
        .find_wallet_pass(&id, &req.wallet_pass_id)
        .await?
        .is_some()
    {
        return Err(ServiceError::WalletPassAlreadyAssigned {
            user_id: id,
            wallet_pass_id: req.wallet_pass_id,
        });
    }

    let held = state
        .users
        .assign_wallet_pass(&id, &req.wallet_pass_id)
        .await?;

    info!(user_id = %id, wallet_pass_id = %req.wallet_pass_id, "Wallet pass assigned");

    Ok(Json(ApiResponse::success(held)))
}
