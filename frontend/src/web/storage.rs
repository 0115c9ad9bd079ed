//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 提供简洁的本地存储接口，会话持久化也在这里完成。

use khelmela_shared::{SESSION_STORAGE_KEY, Session};

/// 本地存储操作封装
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 获取存储的字符串值，键不存在或存储不可用时返回 `None`
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 设置存储值，返回是否成功
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// 删除存储的键值对，返回是否成功
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }

    // =========================================================
    // 会话
    // =========================================================

    /// 读取上次保存的会话，损坏的数据按未登录处理
    pub fn load_session() -> Session {
        Session::from_storage(Self::get(SESSION_STORAGE_KEY).as_deref())
    }

    /// 保存会话；未登录的会话直接清除存储
    pub fn save_session(session: &Session) {
        let saved = match session.to_storage() {
            Some(raw) => Self::set(SESSION_STORAGE_KEY, &raw),
            None => Self::delete(SESSION_STORAGE_KEY),
        };
        if !saved {
            log::warn!("Session could not be persisted to LocalStorage");
        }
    }
}
