//! HTTP 错误响应辅助函数
//!
//! 所有错误返回统一的 `{"error": ..., "code": ...}`：
//! - 400 INVALID.REQUEST：参数或请求体非法
//! - 404 RESOURCE.NOT_FOUND：资源不存在
//! - 500 INTERNAL.ERROR：存储不可用或记录无法编解码

use api_contract::{ErrorBody, INTERNAL_ERROR, INVALID_REQUEST, RESOURCE_NOT_FOUND};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fleet_repository::RepositoryError;
use tracing::error;

/// 错误请求响应
pub fn bad_request_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody::new(INVALID_REQUEST, message)),
    )
        .into_response()
}

/// 资源未找到错误响应
pub fn not_found_error(message: impl Into<String>) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new(RESOURCE_NOT_FOUND, message)),
    )
        .into_response()
}

/// 内部错误响应
pub fn internal_error(message: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new(INTERNAL_ERROR, message)),
    )
        .into_response()
}

/// 请求体无法解析（JSON 语法错误、字段类型不符、缺少 Content-Type）
pub fn json_rejection_error(rejection: JsonRejection) -> Response {
    bad_request_error(rejection.body_text())
}

/// 仓储错误映射为 HTTP 响应
pub fn repository_error(err: RepositoryError) -> Response {
    match err {
        RepositoryError::Validation(message) => bad_request_error(message),
        RepositoryError::NotFound(message) => not_found_error(message),
        err @ (RepositoryError::Store(_)
        | RepositoryError::Decode(_)
        | RepositoryError::Encode(_)) => {
            error!(target: "fleet.api", error = %err, "repository_failed");
            internal_error(err.to_string())
        }
    }
}

/// 201 Created + JSON 实体
pub fn created<T: serde::Serialize>(value: T) -> Response {
    (StatusCode::CREATED, Json(value)).into_response()
}

/// 200 OK + JSON 实体
pub fn ok<T: serde::Serialize>(value: T) -> Response {
    (StatusCode::OK, Json(value)).into_response()
}
