//! 会话模型
//!
//! `is_logged_in` 不单独存储，而是由用户和令牌推导，
//! 因此 "已登录 当且仅当 有用户且令牌非空" 永远成立。

use serde::{Deserialize, Serialize};
use std::cell::RefCell;

use crate::access::{Access, resolve_access};
use crate::AuthUser;

/// 当前会话
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    user: Option<AuthUser>,
}

impl Session {
    /// 从登录结果创建会话，令牌为空时返回未登录会话
    pub fn with_user(user: AuthUser) -> Self {
        let mut session = Self::default();
        session.login(user);
        session
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.as_ref().is_some_and(AuthUser::has_token)
    }

    pub fn token(&self) -> Option<&str> {
        self.user
            .as_ref()
            .map(|u| u.token.as_str())
            .filter(|t| !t.trim().is_empty())
    }

    pub fn access(&self) -> Access {
        let role = self.user.as_ref().and_then(|u| u.role);
        resolve_access(role, self.token())
    }

    /// 登录
    ///
    /// 令牌为空的用户会被拒绝，会话保持未登录，返回 `false`。
    pub fn login(&mut self, user: AuthUser) -> bool {
        if !user.has_token() {
            log::warn!("Refusing session login for '{}': empty token", user.username);
            self.user = None;
            return false;
        }
        self.user = Some(user);
        true
    }

    pub fn logout(&mut self) {
        self.user = None;
    }

    // =========================================================
    // 持久化 (Persistence)
    // =========================================================

    /// 序列化为持久化字符串，未登录时返回 `None`（表示应清除存储）
    pub fn to_storage(&self) -> Option<String> {
        if !self.is_logged_in() {
            return None;
        }
        serde_json::to_string(self).ok()
    }

    /// 从持久化字符串恢复
    ///
    /// 数据缺失、损坏或令牌为空时都恢复为未登录会话。
    pub fn from_storage(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match serde_json::from_str::<Session>(raw) {
            Ok(session) => match session.user {
                Some(user) => Self::with_user(user),
                None => Self::default(),
            },
            Err(e) => {
                log::warn!("Discarding unreadable persisted session: {}", e);
                Self::default()
            }
        }
    }
}

/// 会话写入契约
///
/// 任何消费者都可以登录/注销；真正的信任边界在后端 API。
pub trait SessionWriter {
    /// 返回是否登录成功（空令牌会被拒绝）
    fn login(&self, user: AuthUser) -> bool;
    fn logout(&self);
}

impl SessionWriter for RefCell<Session> {
    fn login(&self, user: AuthUser) -> bool {
        self.borrow_mut().login(user)
    }

    fn logout(&self) {
        self.borrow_mut().logout();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    fn user(token: &str, role: Option<Role>) -> AuthUser {
        AuthUser {
            id: "u1".into(),
            username: "Alex".into(),
            email: "alex@example.com".into(),
            token: token.into(),
            role,
            avatar_url: None,
            created_at: None,
        }
    }

    #[test]
    fn test_logged_in_iff_user_with_token() {
        let mut session = Session::default();
        assert!(!session.is_logged_in());
        assert!(session.user().is_none());

        assert!(session.login(user("t", Some(Role::User))));
        assert!(session.is_logged_in());
        assert!(session.user().is_some());

        assert!(!session.login(user("", Some(Role::User))));
        assert!(!session.is_logged_in());
        assert!(session.user().is_none());

        session.login(user("t", None));
        session.logout();
        assert!(!session.is_logged_in());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_access_follows_role_and_token() {
        assert_eq!(Session::with_user(user("t", Some(Role::Admin))).access(), Access::Admin);
        assert_eq!(Session::with_user(user("t", Some(Role::User))).access(), Access::User);
        assert_eq!(Session::with_user(user("t", None)).access(), Access::Visitor);
        assert_eq!(Session::default().access(), Access::Visitor);
    }

    #[test]
    fn test_storage_round_trip() {
        let session = Session::with_user(user("t", Some(Role::Admin)));
        let raw = session.to_storage().unwrap();
        let restored = Session::from_storage(Some(&raw));
        assert_eq!(restored, session);
        assert_eq!(restored.access(), Access::Admin);
    }

    #[test]
    fn test_storage_recovers_from_bad_data() {
        assert_eq!(Session::from_storage(None), Session::default());
        assert_eq!(Session::from_storage(Some("{not json")), Session::default());

        // 存储中残留的管理员角色但令牌为空
        let stale = r#"{"user":{"_id":"u1","username":"x","token":"","admin":"admin"}}"#;
        let restored = Session::from_storage(Some(stale));
        assert!(!restored.is_logged_in());
        assert_eq!(restored.access(), Access::Visitor);

        assert!(Session::default().to_storage().is_none());
    }

    #[test]
    fn test_refcell_writer() {
        let cell = RefCell::new(Session::default());
        assert!(SessionWriter::login(&cell, user("t", Some(Role::User))));
        assert!(cell.borrow().is_logged_in());
        SessionWriter::logout(&cell);
        assert!(!cell.borrow().is_logged_in());
    }
}
