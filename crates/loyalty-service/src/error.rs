//! 服务错误类型定义
//!
//! 所有 handler 和仓储统一返回 [`ServiceError`]，通过 `IntoResponse` 转换为 JSON 信封

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use loyalty_memdb::QueryError;
use serde_json::json;

/// 服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    // 验证错误
    #[error("参数验证失败: {0}")]
    Validation(String),

    // 资源不存在
    #[error("公司不存在: {0}")]
    CompanyNotFound(String),
    #[error("会员计划不存在: {0}")]
    LoyaltyProgramNotFound(String),
    #[error("用户不存在: {0}")]
    UserNotFound(String),
    #[error("电子卡券不存在: {0}")]
    WalletPassNotFound(String),
    #[error("用户 {user_id} 未加入会员计划 {program_id}")]
    MembershipNotFound { program_id: String, user_id: String },

    // 业务冲突
    #[error("邮箱已被使用: {0}")]
    DuplicateEmail(String),
    #[error("用户 {user_id} 已加入会员计划 {program_id}")]
    AlreadyEnrolled { program_id: String, user_id: String },
    #[error("用户 {user_id} 已持有卡券 {wallet_pass_id}")]
    WalletPassAlreadyAssigned { user_id: String, wallet_pass_id: String },
    #[error("积分不足: 当前 {available}，需要 {requested}")]
    InsufficientPoints { available: i64, requested: i64 },

    // 系统错误
    #[error("查询引擎错误: {0}")]
    Query(#[from] QueryError),
    #[error("内部错误: {0}")]
    Internal(String),
}

impl ServiceError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,

            Self::CompanyNotFound(_)
            | Self::LoyaltyProgramNotFound(_)
            | Self::UserNotFound(_)
            | Self::WalletPassNotFound(_)
            | Self::MembershipNotFound { .. } => StatusCode::NOT_FOUND,

            Self::DuplicateEmail(_)
            | Self::AlreadyEnrolled { .. }
            | Self::WalletPassAlreadyAssigned { .. }
            | Self::InsufficientPoints { .. } => StatusCode::CONFLICT,

            Self::Query(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::CompanyNotFound(_) => "COMPANY_NOT_FOUND",
            Self::LoyaltyProgramNotFound(_) => "LOYALTY_PROGRAM_NOT_FOUND",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::WalletPassNotFound(_) => "WALLET_PASS_NOT_FOUND",
            Self::MembershipNotFound { .. } => "MEMBERSHIP_NOT_FOUND",
            Self::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            Self::AlreadyEnrolled { .. } => "ALREADY_ENROLLED",
            Self::WalletPassAlreadyAssigned { .. } => "WALLET_PASS_ALREADY_ASSIGNED",
            Self::InsufficientPoints { .. } => "INSUFFICIENT_POINTS",
            Self::Query(_) => "QUERY_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志
        let message = match &self {
            Self::Query(e) => {
                tracing::error!(error = %e, "查询引擎调用失败");
                "服务内部错误，请稍后重试".to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 记录与模型互转失败
impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("记录转换失败: {}", err))
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn all_error_variants() -> Vec<(ServiceError, StatusCode, &'static str)> {
        vec![
            (ServiceError::Validation("name is required".into()), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            (ServiceError::CompanyNotFound("c1".into()), StatusCode::NOT_FOUND, "COMPANY_NOT_FOUND"),
            (ServiceError::LoyaltyProgramNotFound("p1".into()), StatusCode::NOT_FOUND, "LOYALTY_PROGRAM_NOT_FOUND"),
            (ServiceError::UserNotFound("u1".into()), StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
            (ServiceError::WalletPassNotFound("w1".into()), StatusCode::NOT_FOUND, "WALLET_PASS_NOT_FOUND"),
            (
                ServiceError::MembershipNotFound { program_id: "p1".into(), user_id: "u1".into() },
                StatusCode::NOT_FOUND,
                "MEMBERSHIP_NOT_FOUND",
            ),
            (ServiceError::DuplicateEmail("a@example.com".into()), StatusCode::CONFLICT, "DUPLICATE_EMAIL"),
            (
                ServiceError::AlreadyEnrolled { program_id: "p1".into(), user_id: "u1".into() },
                StatusCode::CONFLICT,
                "ALREADY_ENROLLED",
            ),
            (
                ServiceError::WalletPassAlreadyAssigned { user_id: "u1".into(), wallet_pass_id: "w1".into() },
                StatusCode::CONFLICT,
                "WALLET_PASS_ALREADY_ASSIGNED",
            ),
            (
                ServiceError::InsufficientPoints { available: 10, requested: 20 },
                StatusCode::CONFLICT,
                "INSUFFICIENT_POINTS",
            ),
            (
                ServiceError::Query(QueryError::UnknownTable("accounts".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
                "QUERY_ERROR",
            ),
            (ServiceError::Internal("oops".into()), StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        ]
    }

    #[test]
    fn test_all_variants_status_and_code() {
        for (error, expected_status, expected_code) in all_error_variants() {
            assert_eq!(error.status_code(), expected_status, "状态码不匹配: {expected_code}");
            assert_eq!(error.error_code(), expected_code);
        }
    }

    #[test]
    fn test_display_contains_context() {
        assert!(ServiceError::UserNotFound("u-42".into()).to_string().contains("u-42"));
        let err = ServiceError::InsufficientPoints { available: 10, requested: 25 };
        let msg = err.to_string();
        assert!(msg.contains("10") && msg.contains("25"));
    }

    #[tokio::test]
    async fn test_into_response_hides_internal_details() {
        let response = ServiceError::Internal("secret stack".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("读取响应体失败");
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).expect("响应体不是合法 JSON");

        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert!(!body["message"].as_str().unwrap().contains("secret"));
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_into_response_not_found_keeps_message() {
        let response = ServiceError::CompanyNotFound("c-9".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert!(body["message"].as_str().unwrap().contains("c-9"));
    }
}
