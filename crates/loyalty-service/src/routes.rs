//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use loyalty_shared::observability::middleware as obs_middleware;

use crate::{handlers, state::AppState};

/// 商户路由
fn company_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/companies",
            get(handlers::company::list_companies).post(handlers::company::create_company),
        )
        .route(
            "/companies/{id}",
            get(handlers::company::get_company)
                .put(handlers::company::update_company)
                .delete(handlers::company::delete_company),
        )
        .route(
            "/companies/{id}/loyalty-programs",
            get(handlers::company::list_company_loyalty_programs),
        )
        .route(
            "/companies/{id}/wallet-passes",
            get(handlers::company::list_company_wallet_passes),
        )
}

/// 会员计划路由，包含成员管理
fn loyalty_program_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/loyalty-programs",
            get(handlers::loyalty_program::list_loyalty_programs)
                .post(handlers::loyalty_program::create_loyalty_program),
        )
        .route(
            "/loyalty-programs/{id}",
            get(handlers::loyalty_program::get_loyalty_program)
                .put(handlers::loyalty_program::update_loyalty_program)
                .delete(handlers::loyalty_program::delete_loyalty_program),
        )
        .route(
            "/loyalty-programs/{id}/users",
            get(handlers::loyalty_program::list_program_users)
                .post(handlers::loyalty_program::enroll_user),
        )
        .route(
            "/loyalty-programs/{id}/users/{user_id}",
            delete(handlers::loyalty_program::unenroll_user),
        )
}

/// 用户路由，包含积分与卡券
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::user::list_users).post(handlers::user::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
        .route("/users/{id}/points/add", post(handlers::user::add_points))
        .route(
            "/users/{id}/points/redeem",
            post(handlers::user::redeem_points),
        )
        .route(
            "/users/{id}/loyalty-programs",
            get(handlers::user::list_user_loyalty_programs),
        )
        .route(
            "/users/{id}/wallet-passes",
            get(handlers::user::list_user_wallet_passes).post(handlers::user::assign_wallet_pass),
        )
}

/// 卡券路由
fn wallet_pass_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/wallet-passes",
            get(handlers::wallet_pass::list_wallet_passes)
                .post(handlers::wallet_pass::create_wallet_pass),
        )
        .route(
            "/wallet-passes/{id}",
            get(handlers::wallet_pass::get_wallet_pass)
                .put(handlers::wallet_pass::update_wallet_pass)
                .delete(handlers::wallet_pass::delete_wallet_pass),
        )
}

/// 构建 /api 下的全部业务路由
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(company_routes())
        .merge(loyalty_program_routes())
        .merge(user_routes())
        .merge(wallet_pass_routes())
}

/// 构建完整应用：业务路由、健康检查与可观测性中间件
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
        .with_state(state)
}
