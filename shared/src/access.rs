//! 访问级别（能力解析）
//!
//! 角色判断只在这里做一次：路由表和各页面的权限检查都消费 [`Access`]，
//! 不再在视图里比较角色字面量。

use crate::Role;

/// 访问级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Access {
    /// 未登录或令牌缺失
    #[default]
    Visitor,
    User,
    Admin,
}

/// **核心能力解析：角色 + 令牌 -> 访问级别**
///
/// 管理员判断优先于普通用户判断；没有有效令牌时无论角色如何都按访客处理，
/// 以防存储中残留过期的角色。
pub fn resolve_access(role: Option<Role>, token: Option<&str>) -> Access {
    let has_token = token.is_some_and(|t| !t.trim().is_empty());
    match role {
        Some(Role::Admin) if has_token => Access::Admin,
        Some(Role::User) if has_token => Access::User,
        _ => Access::Visitor,
    }
}

impl Access {
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Access::Visitor)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Access::Admin)
    }

    /// 是否可以撰写博客
    pub fn can_create_blog(&self) -> bool {
        self.is_authenticated()
    }

    pub fn can_edit_blog(&self) -> bool {
        self.is_admin()
    }

    pub fn can_delete_blog(&self) -> bool {
        self.is_admin()
    }

    /// 是否可以为他人创建账号（注册页仅对管理员开放）
    pub fn can_create_accounts(&self) -> bool {
        self.is_admin()
    }

    pub fn can_view_profile(&self) -> bool {
        self.is_authenticated()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Access::Visitor => "visitor",
            Access::User => "user",
            Access::Admin => "admin",
        }
    }
}
