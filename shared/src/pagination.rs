//! 博客列表分页
//!
//! 分页状态只属于博客列表页，[`Pager`] 负责页码切换的守卫。

use serde::{Deserialize, Serialize};

use crate::BLOG_PAGE_LIMIT;

/// 后端返回的分页信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub total: u32,
    pub total_pages: u32,
    pub limit: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            total: 0,
            total_pages: 1,
            limit: BLOG_PAGE_LIMIT,
            has_next_page: false,
            has_prev_page: false,
        }
    }
}

/// 当前页码 + 最近一次的分页信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: u32,
    info: Pagination,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            current: 1,
            info: Pagination::default(),
        }
    }
}

impl Pager {
    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn info(&self) -> &Pagination {
        &self.info
    }

    /// 是否第一页（首篇文章作为特色卡片展示）
    pub fn is_first_page(&self) -> bool {
        self.current == 1
    }

    /// 记录最新的分页信息
    pub fn apply(&mut self, info: Pagination) {
        self.info = info;
    }

    /// 跳转到指定页
    ///
    /// 超出 `1..=total_pages` 的请求不做任何事，返回 `false`。
    pub fn go_to(&mut self, page: u32) -> bool {
        if page < 1 || page > self.info.total_pages.max(1) || page == self.current {
            return false;
        }
        self.current = page;
        true
    }

    pub fn can_next(&self) -> bool {
        self.info.has_next_page
    }

    pub fn can_prev(&self) -> bool {
        self.info.has_prev_page
    }

    pub fn next(&mut self) -> bool {
        self.can_next() && self.go_to(self.current + 1)
    }

    pub fn prev(&mut self) -> bool {
        self.can_prev() && self.current > 1 && self.go_to(self.current - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(total_pages: u32, has_next: bool, has_prev: bool) -> Pagination {
        Pagination {
            total: total_pages * BLOG_PAGE_LIMIT,
            total_pages,
            limit: BLOG_PAGE_LIMIT,
            has_next_page: has_next,
            has_prev_page: has_prev,
        }
    }

    #[test]
    fn test_go_to_out_of_range_is_noop() {
        let mut pager = Pager::default();
        pager.apply(info(3, true, false));
        assert!(!pager.go_to(4));
        assert!(!pager.go_to(0));
        assert_eq!(pager.current(), 1);
        assert!(pager.go_to(3));
        assert_eq!(pager.current(), 3);
    }

    #[test]
    fn test_flags_gate_buttons() {
        let mut pager = Pager::default();
        pager.apply(info(3, false, false));
        assert!(!pager.can_next());
        assert!(!pager.next());
        assert_eq!(pager.current(), 1);

        pager.apply(info(3, true, false));
        assert!(pager.next());
        assert_eq!(pager.current(), 2);
        assert!(!pager.prev());

        pager.apply(info(3, true, true));
        assert!(pager.prev());
        assert!(pager.is_first_page());
    }

    #[test]
    fn test_pagination_defaults_when_fields_missing() {
        let p: Pagination = serde_json::from_str(r#"{"total":3}"#).unwrap();
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.limit, BLOG_PAGE_LIMIT);
        assert!(!p.has_next_page);
    }
}
