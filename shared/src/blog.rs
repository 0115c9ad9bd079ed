//! 博客模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;
use crate::serde_helper;

/// 博客分类 (id, 展示名)
pub const BLOG_CATEGORIES: &[(&str, &str)] = &[
    ("games", "General Games"),
    ("pubg", "PUBG"),
    ("freefire", "Free Fire"),
];

pub const DEFAULT_BLOG_CATEGORY: &str = "games";

pub fn is_blog_category(id: &str) -> bool {
    BLOG_CATEGORIES.iter().any(|(c, _)| *c == id)
}

pub fn category_label(id: &str) -> &str {
    BLOG_CATEGORIES
        .iter()
        .find(|(c, _)| *c == id)
        .map(|(_, label)| *label)
        .unwrap_or(id)
}

/// 博客文章
///
/// 列表接口给出 `id`，详情接口给出 `_id`，两者都保留，通过 [`BlogPost::id`] 读取。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helper::opt_string_or_number"
    )]
    pub id: Option<String>,
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helper::opt_string_or_number"
    )]
    pub object_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(
        rename = "user_id",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helper::opt_string_or_number"
    )]
    pub author_id: Option<String>,
    #[serde(rename = "user_name", default)]
    pub author_name: Option<String>,
    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_helper::lenient_datetime"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl BlogPost {
    /// 文章 id，优先 `id`，其次 `_id`
    pub fn id(&self) -> Option<&str> {
        [self.id.as_deref(), self.object_id.as_deref()]
            .into_iter()
            .flatten()
            .find(|id| !id.is_empty())
    }

    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("Untitled Post")
    }

    pub fn display_author(&self) -> &str {
        self.author_name
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or("Anonymous")
    }

    pub fn category_label(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(category_label)
    }

    /// 以当前文章为基础构造更新请求体
    pub fn to_payload(&self) -> BlogPayload {
        BlogPayload {
            title: self.title.clone().unwrap_or_default(),
            description: self.description.clone(),
            content: self.content.clone().unwrap_or_default(),
            image: self.image.clone().unwrap_or_default(),
            category: self
                .category
                .clone()
                .unwrap_or_else(|| DEFAULT_BLOG_CATEGORY.to_string()),
            user_id: self.author_id.clone(),
            user_name: self.display_author().to_string(),
        }
    }
}

/// 创建 / 更新博客的请求体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogPayload {
    pub title: String,
    /// 段落 HTML
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    pub image: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub user_name: String,
}

/// 分页列表响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogPage {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub blogs: Vec<BlogPost>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl BlogPage {
    /// 本地移除一篇文章（删除成功后使用）
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.blogs.len();
        self.blogs.retain(|post| post.id() != Some(id));
        let removed = self.blogs.len() != before;
        if removed {
            self.pagination.total = self.pagination.total.saturating_sub(1);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_either_field() {
        let listed: BlogPost = serde_json::from_str(r#"{"id":"a1","description":""}"#).unwrap();
        assert_eq!(listed.id(), Some("a1"));

        let detail: BlogPost =
            serde_json::from_str(r#"{"_id":"b2","id":"","description":"x"}"#).unwrap();
        assert_eq!(detail.id(), Some("b2"));

        let numeric: BlogPost = serde_json::from_str(r#"{"id":7}"#).unwrap();
        assert_eq!(numeric.id(), Some("7"));
    }

    #[test]
    fn test_display_defaults() {
        let post: BlogPost = serde_json::from_str(r#"{"_id":"x","title":"  "}"#).unwrap();
        assert_eq!(post.display_title(), "Untitled Post");
        assert_eq!(post.display_author(), "Anonymous");
        assert_eq!(post.category_label(), None);
        assert!(post.created_at.is_none());
    }

    #[test]
    fn test_blog_page_parse_and_remove() {
        let mut page: BlogPage = serde_json::from_str(
            r#"{
                "success": true,
                "blogs": [
                    {"id":"1","title":"One","description":"<p>a</p>","user_name":"Sita","createdAt":"2025-02-01T10:00:00Z","category":"pubg"},
                    {"id":"2","title":"Two","description":"b"}
                ],
                "pagination": {"total":9,"totalPages":2,"limit":7,"hasNextPage":true,"hasPrevPage":false}
            }"#,
        )
        .unwrap();
        assert!(page.success);
        assert_eq!(page.blogs[0].category_label(), Some("PUBG"));
        assert_eq!(page.pagination.total_pages, 2);

        assert!(page.remove("1"));
        assert!(!page.remove("missing"));
        assert_eq!(page.blogs.len(), 1);
        assert_eq!(page.pagination.total, 8);
    }

    #[test]
    fn test_payload_shape() {
        let payload = BlogPayload {
            title: "T".into(),
            description: "<p>d</p>".into(),
            image: "https://x/y.png".into(),
            category: "games".into(),
            user_id: Some("u1".into()),
            user_name: "Alex".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["user_id"], "u1");
        assert_eq!(json["user_name"], "Alex");
        assert!(json.get("content").is_none());
    }
}
