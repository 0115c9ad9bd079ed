//! 会话上下文
//!
//! 在应用根部提供，所有组件通过 [`use_session`] 读取。
//! 登录 / 登出经由 [`SessionWriter`] 写入并同步到 LocalStorage，
//! 路由服务只拿到派生出的访问级别信号。

use leptos::prelude::*;

use khelmela_shared::{Access, AuthUser, Session, SessionWriter};

use crate::web::LocalStorage;

/// 会话上下文
#[derive(Clone, Copy)]
pub struct SessionContext(RwSignal<Session>);

impl SessionContext {
    /// 从 LocalStorage 恢复会话
    pub fn restore() -> Self {
        let session = LocalStorage::load_session();
        if let Some(user) = session.user() {
            log::info!("Restored session for {}", user.username);
        }
        Self(RwSignal::new(session))
    }

    pub fn is_logged_in(&self) -> bool {
        self.0.with(Session::is_logged_in)
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.0.with(|s| s.user().cloned())
    }

    pub fn access(&self) -> Access {
        self.0.with(Session::access)
    }

    /// 访问级别信号（用于路由服务注入）
    pub fn access_signal(&self) -> Signal<Access> {
        let session = self.0;
        Signal::derive(move || session.with(Session::access))
    }

    /// 当前令牌（不追踪，供请求使用）
    pub fn token(&self) -> Option<String> {
        self.0.with_untracked(|s| s.token().map(str::to_string))
    }

    fn persist(&self) {
        self.0.with_untracked(LocalStorage::save_session);
    }
}

impl SessionWriter for SessionContext {
    fn login(&self, user: AuthUser) -> bool {
        let accepted = self.0.try_update(|s| s.login(user)).unwrap_or(false);
        if accepted {
            self.persist();
        }
        accepted
    }

    fn logout(&self) {
        self.0.update(Session::logout);
        self.persist();
        log::info!("Logged out");
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}
