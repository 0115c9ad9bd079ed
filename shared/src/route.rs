//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 三张路由表（访客 / 用户 / 管理员）由 [`Access`] 选择。

use std::fmt::Display;

use crate::access::Access;

/// 页面种类（路由表中的目标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Login,
    Signup,
    Blog,
    BlogPost,
    BlogCreator,
    EditBlog,
    Profile,
    Tournaments,
    TournamentDetail,
}

/// 路由表中的一项：路径模式 -> 页面
///
/// 模式中以 `:` 开头的段匹配任意非空段，例如 `/blog-page/:id`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub pattern: &'static str,
    pub page: Page,
}

const fn entry(pattern: &'static str, page: Page) -> RouteEntry {
    RouteEntry { pattern, page }
}

// =========================================================
// 路由表 (Route Tables)
// =========================================================

pub const VISITOR_ROUTES: &[RouteEntry] = &[
    entry("/", Page::Home),
    entry("/login", Page::Login),
    entry("/blog", Page::Blog),
    entry("/blog-page", Page::Blog),
    entry("/blog-page/:id", Page::BlogPost),
    entry("/tournaments", Page::Tournaments),
    entry("/tournaments/:id", Page::TournamentDetail),
];

pub const USER_ROUTES: &[RouteEntry] = &[
    entry("/", Page::Home),
    entry("/blog", Page::Blog),
    entry("/blog-page/:id", Page::BlogPost),
    entry("/blog-creator", Page::BlogCreator),
    entry("/profile", Page::Profile),
    entry("/tournaments", Page::Tournaments),
    entry("/tournaments/:id", Page::TournamentDetail),
];

pub const ADMIN_ROUTES: &[RouteEntry] = &[
    entry("/", Page::Home),
    entry("/signup", Page::Signup),
    entry("/blog", Page::Blog),
    entry("/blog-page/:id", Page::BlogPost),
    entry("/blog-creator", Page::BlogCreator),
    entry("/edit-blog/:id", Page::EditBlog),
    entry("/profile", Page::Profile),
    entry("/tournaments", Page::Tournaments),
    entry("/tournaments/:id", Page::TournamentDetail),
];

/// 按访问级别选择路由表
pub fn routes_for(access: Access) -> &'static [RouteEntry] {
    match access {
        Access::Admin => ADMIN_ROUTES,
        Access::User => USER_ROUTES,
        Access::Visitor => VISITOR_ROUTES,
    }
}

/// 当前访问级别的路由表是否提供该页面（用于决定是否显示导航链接）
pub fn offers(access: Access, page: Page) -> bool {
    routes_for(access).iter().any(|e| e.page == page)
}

/// 去掉查询串、片段和末尾斜杠
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// 按模式匹配路径，成功时返回捕获的参数（最多一个）
fn match_pattern<'a>(pattern: &str, path: &'a str) -> Option<Option<&'a str>> {
    let mut pattern_segs = pattern.split('/');
    let mut path_segs = path.split('/');
    let mut param = None;
    loop {
        match (pattern_segs.next(), path_segs.next()) {
            (None, None) => return Some(param),
            (Some(p), Some(s)) if p.starts_with(':') => {
                if s.is_empty() {
                    return None;
                }
                param = Some(s);
            }
            (Some(p), Some(s)) if p == s => {}
            _ => return None,
        }
    }
}

// =========================================================
// AppRoute - 解析后的路由
// =========================================================

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Home,
    Login,
    Signup,
    Blog,
    BlogPost(String),
    BlogCreator,
    EditBlog(String),
    Profile,
    Tournaments,
    TournamentDetail(String),
    /// 页面未找到（或当前访问级别无权访问）
    NotFound,
}

impl AppRoute {
    /// **核心路由选择：路径 + 访问级别 -> 路由**
    ///
    /// 当前路由表中不存在的路径一律解析为 `NotFound`。
    pub fn resolve(path: &str, access: Access) -> Self {
        let path = normalize_path(path);
        routes_for(access)
            .iter()
            .find_map(|e| match_pattern(e.pattern, path).map(|param| (e.page, param)))
            .map(|(page, param)| Self::from_page(page, param.unwrap_or_default()))
            .unwrap_or(Self::NotFound)
    }

    fn from_page(page: Page, param: &str) -> Self {
        match page {
            Page::Home => Self::Home,
            Page::Login => Self::Login,
            Page::Signup => Self::Signup,
            Page::Blog => Self::Blog,
            Page::BlogPost => Self::BlogPost(param.to_string()),
            Page::BlogCreator => Self::BlogCreator,
            Page::EditBlog => Self::EditBlog(param.to_string()),
            Page::Profile => Self::Profile,
            Page::Tournaments => Self::Tournaments,
            Page::TournamentDetail => Self::TournamentDetail(param.to_string()),
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Signup => "/signup".to_string(),
            Self::Blog => "/blog".to_string(),
            Self::BlogPost(id) => format!("/blog-page/{id}"),
            Self::BlogCreator => "/blog-creator".to_string(),
            Self::EditBlog(id) => format!("/edit-blog/{id}"),
            Self::Profile => "/profile".to_string(),
            Self::Tournaments => "/tournaments".to_string(),
            Self::TournamentDetail(id) => format!("/tournaments/{id}"),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// 文档标题
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "KhelMela",
            Self::Login => "Login | KhelMela",
            Self::Signup => "Create Account | KhelMela",
            Self::Blog | Self::BlogPost(_) => "Blog | KhelMela",
            Self::BlogCreator => "Create Blog | KhelMela",
            Self::EditBlog(_) => "Edit Blog | KhelMela",
            Self::Profile => "Profile | KhelMela",
            Self::Tournaments | Self::TournamentDetail(_) => "Tournaments | KhelMela",
            Self::NotFound => "Page Not Found | KhelMela",
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Role, resolve_access};

    #[test]
    fn test_table_selection_follows_access() {
        let admin = resolve_access(Some(Role::Admin), Some("t"));
        let user = resolve_access(Some(Role::User), Some("t"));
        let stale_admin = resolve_access(Some(Role::Admin), Some(""));
        let anonymous = resolve_access(None, None);

        assert_eq!(routes_for(admin), ADMIN_ROUTES);
        assert_eq!(routes_for(user), USER_ROUTES);
        assert_eq!(routes_for(stale_admin), VISITOR_ROUTES);
        assert_eq!(routes_for(anonymous), VISITOR_ROUTES);
    }

    #[test]
    fn test_resolve_per_table() {
        assert_eq!(AppRoute::resolve("/login", Access::Visitor), AppRoute::Login);
        assert_eq!(AppRoute::resolve("/login", Access::User), AppRoute::NotFound);
        assert_eq!(AppRoute::resolve("/signup", Access::User), AppRoute::NotFound);
        assert_eq!(AppRoute::resolve("/signup", Access::Admin), AppRoute::Signup);
        assert_eq!(AppRoute::resolve("/blog-creator", Access::Visitor), AppRoute::NotFound);
        assert_eq!(AppRoute::resolve("/blog-creator", Access::User), AppRoute::BlogCreator);
        assert_eq!(
            AppRoute::resolve("/edit-blog/42", Access::Admin),
            AppRoute::EditBlog("42".into())
        );
        assert_eq!(AppRoute::resolve("/edit-blog/42", Access::User), AppRoute::NotFound);
        assert_eq!(AppRoute::resolve("/profile", Access::Visitor), AppRoute::NotFound);
        assert_eq!(AppRoute::resolve("/blog-page", Access::Visitor), AppRoute::Blog);
    }

    #[test]
    fn test_resolve_normalizes_path() {
        assert_eq!(
            AppRoute::resolve("/tournaments/7/?tab=teams#rules", Access::Visitor),
            AppRoute::TournamentDetail("7".into())
        );
        assert_eq!(AppRoute::resolve("/blog/", Access::User), AppRoute::Blog);
        assert_eq!(AppRoute::resolve("", Access::Visitor), AppRoute::Home);
        assert_eq!(AppRoute::resolve("/blog-page//", Access::Visitor), AppRoute::Blog);
        assert_eq!(AppRoute::resolve("/nowhere", Access::Admin), AppRoute::NotFound);
        assert_eq!(AppRoute::resolve("/tournaments/1/2", Access::Admin), AppRoute::NotFound);
    }

    #[test]
    fn test_to_path_resolves_back() {
        for route in [
            AppRoute::Home,
            AppRoute::Blog,
            AppRoute::BlogPost("abc".into()),
            AppRoute::EditBlog("abc".into()),
            AppRoute::Signup,
            AppRoute::TournamentDetail("9".into()),
        ] {
            assert_eq!(AppRoute::resolve(&route.to_path(), Access::Admin), route);
        }
    }

    #[test]
    fn test_offers() {
        assert!(offers(Access::Visitor, Page::Login));
        assert!(!offers(Access::Admin, Page::Login));
        assert!(offers(Access::Admin, Page::Signup));
        assert!(!offers(Access::User, Page::Signup));
    }
}
