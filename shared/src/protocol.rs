use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use crate::blog::{BlogPage, BlogPayload, BlogPost};
use crate::tournament::Tournament;
use crate::{AuthUser, LoginRequest, RegisterRequest, Stat};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Message shown when the server fails without giving one.
    const FAILURE: &'static str;

    /// The URL path, including any query string.
    fn path(&self) -> String;

    /// JSON body, if the endpoint takes one.
    fn body(&self) -> serde_json::Result<Option<String>> {
        Ok(None)
    }

    /// Whether a 404 means "this resource does not exist".
    fn is_single_resource(&self) -> bool {
        false
    }
}

/// Acknowledgement-only responses: the body (if any) is ignored.
pub type Ack = IgnoredAny;

/// Percent-encodes a single path segment.
pub fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

// =========================================================
// Tournaments
// =========================================================

/// List all tournaments
#[derive(Debug, Clone, Copy, Default)]
pub struct ListTournaments;

impl ApiRequest for ListTournaments {
    type Response = Vec<Tournament>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const FAILURE: &'static str = "Failed to load tournaments";

    fn path(&self) -> String {
        "/api/tournaments".to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FeaturedTournaments;

impl ApiRequest for FeaturedTournaments {
    type Response = Vec<Tournament>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const FAILURE: &'static str = "Failed to load featured tournaments";

    fn path(&self) -> String {
        "/api/tournaments/featured".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct GetTournament {
    pub id: String,
}

impl ApiRequest for GetTournament {
    type Response = Tournament;
    const METHOD: HttpMethod = HttpMethod::Get;
    const FAILURE: &'static str = "Failed to load tournament";

    fn path(&self) -> String {
        format!("/api/tournaments/{}", encode_segment(&self.id))
    }

    fn is_single_resource(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GetStats;

impl ApiRequest for GetStats {
    type Response = Vec<Stat>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const FAILURE: &'static str = "Failed to load stats";

    fn path(&self) -> String {
        "/api/stats".to_string()
    }
}

// =========================================================
// Blogs
// =========================================================

/// One page of blog posts
#[derive(Debug, Clone, Copy)]
pub struct ListBlogs {
    pub page: u32,
    pub limit: u32,
}

impl ApiRequest for ListBlogs {
    type Response = BlogPage;
    const METHOD: HttpMethod = HttpMethod::Get;
    const FAILURE: &'static str = "Failed to load blog posts";

    fn path(&self) -> String {
        format!("/api/blogs?page={}&limit={}", self.page, self.limit)
    }
}

#[derive(Debug, Clone)]
pub struct GetBlog {
    pub id: String,
}

impl ApiRequest for GetBlog {
    type Response = BlogPost;
    const METHOD: HttpMethod = HttpMethod::Get;
    const FAILURE: &'static str = "Failed to fetch post";

    fn path(&self) -> String {
        format!("/api/blogs/{}", encode_segment(&self.id))
    }

    fn is_single_resource(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone)]
pub struct CreateBlog(pub BlogPayload);

impl ApiRequest for CreateBlog {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    const FAILURE: &'static str = "Failed to create blog post";

    fn path(&self) -> String {
        "/api/blogs".to_string()
    }

    fn body(&self) -> serde_json::Result<Option<String>> {
        serde_json::to_string(&self.0).map(Some)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateBlog {
    pub id: String,
    pub payload: BlogPayload,
}

impl ApiRequest for UpdateBlog {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Put;
    const FAILURE: &'static str = "Failed to update post";

    fn path(&self) -> String {
        format!("/api/blogs/{}", encode_segment(&self.id))
    }

    fn body(&self) -> serde_json::Result<Option<String>> {
        serde_json::to_string(&self.payload).map(Some)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteBlog {
    pub id: String,
}

impl ApiRequest for DeleteBlog {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const FAILURE: &'static str = "Failed to delete post";

    fn path(&self) -> String {
        format!("/api/blogs/{}", encode_segment(&self.id))
    }
}

// =========================================================
// Accounts
// =========================================================

impl ApiRequest for LoginRequest {
    type Response = AuthUser;
    const METHOD: HttpMethod = HttpMethod::Post;
    const FAILURE: &'static str = "Login failed";

    fn path(&self) -> String {
        "/api/login".to_string()
    }

    fn body(&self) -> serde_json::Result<Option<String>> {
        serde_json::to_string(self).map(Some)
    }
}

impl ApiRequest for RegisterRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    const FAILURE: &'static str = "Registration failed";

    fn path(&self) -> String {
        "/api/register".to_string()
    }

    fn body(&self) -> serde_json::Result<Option<String>> {
        serde_json::to_string(self).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(ListBlogs { page: 2, limit: 7 }.path(), "/api/blogs?page=2&limit=7");
        assert_eq!(GetBlog { id: "a b/c".into() }.path(), "/api/blogs/a%20b%2Fc");
        assert_eq!(FeaturedTournaments.path(), "/api/tournaments/featured");
        assert!(GetTournament { id: "1".into() }.is_single_resource());
        assert!(!ListTournaments.is_single_resource());
    }

    #[test]
    fn test_bodies() {
        assert!(ListTournaments.body().unwrap().is_none());
        let login = LoginRequest {
            email: "a@b.co".into(),
            password: "secret".into(),
        };
        let body = login.body().unwrap().unwrap();
        assert_eq!(body, r#"{"email":"a@b.co","password":"secret"}"#);

        let register = RegisterRequest {
            username: "Sita".into(),
            email: "s@k.com".into(),
            password: "12345678".into(),
            profile_photo: None,
        };
        assert!(!register.body().unwrap().unwrap().contains("profilePhoto"));
    }
}
