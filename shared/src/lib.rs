use serde::{Deserialize, Serialize};

pub mod access;
pub mod blog;
pub mod date;
pub mod form;
pub mod pagination;
pub mod protocol;
pub mod route;
pub mod sanitize;
pub mod serde_helper;
pub mod session;
pub mod tournament;
pub mod validation;

pub use access::{Access, resolve_access};
pub use blog::{BlogPage, BlogPayload, BlogPost};
pub use pagination::{Pager, Pagination};
pub use route::{AppRoute, Page};
pub use session::{Session, SessionWriter};
pub use tournament::{Team, Tournament, TournamentStatus};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// LocalStorage 中保存会话的键
pub const SESSION_STORAGE_KEY: &str = "khelmela_session";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
/// 博客列表每页条数
pub const BLOG_PAGE_LIMIT: u32 = 7;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 用户角色
///
/// 后端用 `admin` 字段表示角色，取值可能是 "admin" / "user"，
/// 也可能是布尔值，统一由 [`serde_helper::role_field`] 解析。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("admin") {
            Some(Role::Admin)
        } else if raw.eq_ignore_ascii_case("user") {
            Some(Role::User)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// 登录成功后后端返回的用户信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        deserialize_with = "serde_helper::string_or_number"
    )]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub token: String,
    #[serde(rename = "admin", default, with = "serde_helper::role_field")]
    pub role: Option<Role>,
    #[serde(
        rename = "profilePhoto",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar_url: Option<String>,
    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helper::lenient_datetime"
    )]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl AuthUser {
    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// 头像占位用的首字母缩写，如 "Alex Johnson" -> "AJ"
    pub fn initials(&self) -> String {
        let initials: String = self
            .username
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() {
            "?".to_string()
        } else {
            initials
        }
    }
}

/// 首页统计数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    #[serde(default)]
    pub label: String,
    #[serde(default, deserialize_with = "serde_helper::string_or_number")]
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "profilePhoto", skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
}

/// 后端的错误响应体
///
/// 不同接口使用 `message` 或 `errorMsg`，两者都接受。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "errorMsg", default)]
    pub error_msg: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message
            .into_iter()
            .chain(self.error_msg)
            .find(|m| !m.trim().is_empty())
    }
}
