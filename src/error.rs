use thiserror::Error;

// =========================================================
// 错误种类枚举
// =========================================================

/// 错误种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 请求未能发出或连接中断
    Network,
    /// 服务端返回非成功状态码
    Status,
    /// 单资源查询返回 404
    NotFound,
    /// 响应体无法解析，或请求体无法序列化
    Parse,
    /// 图片被拒绝或图床返回失败
    Upload,
    /// 运行时配置缺失
    Config,
}

impl ApiErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiErrorKind::Network => "NETWORK_ERROR",
            ApiErrorKind::Status => "API_ERROR",
            ApiErrorKind::NotFound => "RESOURCE_NOT_FOUND",
            ApiErrorKind::Parse => "PARSE_ERROR",
            ApiErrorKind::Upload => "UPLOAD_ERROR",
            ApiErrorKind::Config => "CONFIG_ERROR",
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// API 层错误
///
/// `message` 面向用户，页面直接显示在表单或页面级错误区域。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    /// 仅 `Status` / `NotFound` 携带
    pub status: Option<u16>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    // --- Convenience constructors ---

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(code),
            ..Self::new(ApiErrorKind::Status, message)
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: Some(404),
            ..Self::new(ApiErrorKind::NotFound, message)
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Parse, message)
    }

    pub fn upload(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Upload, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Config, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ApiErrorKind::NotFound
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::parse(e.to_string())
    }
}

impl From<khelmela_shared::validation::ImageRejection> for ApiError {
    fn from(rejection: khelmela_shared::validation::ImageRejection) -> Self {
        ApiError::upload(rejection.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use khelmela_shared::validation::ImageRejection;

    #[test]
    fn test_display_is_user_message() {
        let err = ApiError::status(500, "Email already registered");
        assert_eq!(err.to_string(), "Email already registered");
        assert_eq!(err.status, Some(500));
        assert_eq!(err.kind.as_str(), "API_ERROR");
    }

    #[test]
    fn test_conversions() {
        let err: ApiError = serde_json::from_str::<u32>("x").unwrap_err().into();
        assert_eq!(err.kind, ApiErrorKind::Parse);

        let err: ApiError = ImageRejection::TooLarge.into();
        assert_eq!(err.kind, ApiErrorKind::Upload);
        assert_eq!(err.message, "Image must be smaller than 5MB");

        assert!(ApiError::not_found("gone").is_not_found());
    }
}
