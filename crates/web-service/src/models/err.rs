use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use color_eyre::eyre::Error;
use database::DatabaseError;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// 使用 [`thiserror`] 定义错误类型
/// 方便根据类型转换为相应的http错误码
#[derive(Error, Debug)]
pub enum AppError {
    /// 数据验证错误，这种错误通常都是用户参数不正确导致的，所以需要转换为422
    #[error(transparent)]
    ValidationFailed(#[from] ValidationErrors),

    /// 违反业务规则（例如修改已关闭的项目），转换为400
    #[error("{0}")]
    BadRequest(String),

    /// 未登录或token无效
    #[error("Unauthorized")]
    Unauthorized,

    /// 已登录但权限不足
    #[error("Forbidden")]
    Forbidden,

    /// 资源不存在
    #[error("{0} not found")]
    NotFound(String),

    /// 仓库层数据库错误
    #[error(transparent)]
    RepositoryError(DatabaseError),

    /// 其他类型错误
    #[error(transparent)]
    InternalError(#[from] Error),
}

impl AppError {
    pub fn bad_request<T: ToString>(msg: T) -> Self {
        Self::BadRequest(msg.to_string())
    }
}

/// 仓库层的业务错误在这里就转换为对应的变体，方便上层按变体匹配
impl From<DatabaseError> for AppError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(what) => AppError::NotFound(what),
            other if other.is_not_found() => AppError::NotFound("Record".to_string()),
            DatabaseError::ValidationError(msg) => AppError::BadRequest(msg),
            other => AppError::RepositoryError(other),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RepositoryError(_) | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            AppError::ValidationFailed(err) => (status, format!("Validate failed: {err}")).into_response(),
            AppError::RepositoryError(err) => {
                error!("❌ 数据库错误: {err}");
                (status, format!("Repository error: {err}")).into_response()
            }
            AppError::InternalError(err) => {
                error!("❌ 内部错误: {err:?}");
                (status, format!("Something went wrong: {err}")).into_response()
            }
            other => (status, other.to_string()).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DatabaseError::not_found("Charity project 7"), StatusCode::NOT_FOUND)]
    #[case(DatabaseError::SqlxError(sqlx::Error::RowNotFound), StatusCode::NOT_FOUND)]
    #[case(DatabaseError::validation("closed"), StatusCode::BAD_REQUEST)]
    #[case(DatabaseError::connection("refused"), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(DatabaseError::SqlxError(sqlx::Error::PoolTimedOut), StatusCode::INTERNAL_SERVER_ERROR)]
    fn database_errors_map_to_status(#[case] err: DatabaseError, #[case] expected: StatusCode) {
        assert_eq!(AppError::from(err).into_response().status(), expected);
    }

    #[test]
    fn auth_errors_map_to_status() {
        assert_eq!(AppError::Unauthorized.into_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn validation_errors_are_unprocessable() {
        let err = AppError::from(ValidationErrors::new());
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
