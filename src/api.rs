use khelmela_shared::protocol::{
    ApiRequest, CreateBlog, DeleteBlog, FeaturedTournaments, GetBlog, GetStats, GetTournament,
    ListBlogs, ListTournaments, UpdateBlog,
};
use khelmela_shared::{
    AuthUser, BlogPage, BlogPayload, BlogPost, ErrorBody, HEADER_AUTHORIZATION, LoginRequest,
    RegisterRequest, Stat, Tournament,
};

use crate::config::RuntimeConfig;
use crate::error::{ApiError, ApiResult};
use crate::request::{HttpClient, HttpRequest, HttpResponse};

// =========================================================
// 业务网关: KhelMela API
// =========================================================

/// 后端 API 客户端
///
/// 接受任何实现了 [`HttpClient`] 的客户端，从而解耦具体的 HTTP 实现。
pub struct KhelMelaApi<'a, C: HttpClient> {
    client: &'a C,
    config: RuntimeConfig,
    token: Option<String>,
}

impl<'a, C: HttpClient> KhelMelaApi<'a, C> {
    pub fn new(client: &'a C, config: &RuntimeConfig) -> Self {
        Self {
            client,
            config: config.clone(),
            token: None,
        }
    }

    /// 附带登录令牌，空令牌会被忽略
    pub fn with_token(mut self, token: Option<&str>) -> Self {
        self.token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self
    }

    /// **统一调用约定**
    ///
    /// - 非 2xx：解析错误体取 `message` / `errorMsg`，否则使用接口的默认文案
    /// - 单资源接口的 404：`NotFound`
    /// - 网络或解析失败：保留底层错误信息
    pub async fn call<R: ApiRequest>(&self, request: &R) -> ApiResult<R::Response> {
        let path = request.path();
        let url = self.config.api_url(&path);
        let mut req = HttpRequest::new(&url, R::METHOD);
        if let Some(token) = &self.token {
            req = req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {token}"));
        }
        if let Some(body) = request.body()? {
            req = req
                .with_header("Content-Type", "application/json")
                .with_json(body);
        }

        log::debug!("{} {}", R::METHOD.as_str(), path);
        let resp = self.client.send(req).await.inspect_err(|e| {
            log::error!("{} {} failed: {}", R::METHOD.as_str(), path, e);
        })?;

        if !resp.is_success() {
            let err = failure(&resp, R::FAILURE, request.is_single_resource());
            log::warn!(
                "{} {} -> {}: {}",
                R::METHOD.as_str(),
                path,
                resp.status,
                err.message
            );
            return Err(err);
        }
        resp.json()
    }

    // --- Tournaments ---

    pub async fn tournaments(&self) -> ApiResult<Vec<Tournament>> {
        self.call(&ListTournaments).await
    }

    pub async fn featured_tournaments(&self) -> ApiResult<Vec<Tournament>> {
        self.call(&FeaturedTournaments).await
    }

    pub async fn tournament(&self, id: &str) -> ApiResult<Tournament> {
        self.call(&GetTournament { id: id.to_string() }).await
    }

    pub async fn stats(&self) -> ApiResult<Vec<Stat>> {
        self.call(&GetStats).await
    }

    /// 首页数据：精选赛事与统计并发请求，各自独立成败
    pub async fn home_overview(&self) -> (ApiResult<Vec<Tournament>>, ApiResult<Vec<Stat>>) {
        futures::future::join(self.featured_tournaments(), self.stats()).await
    }

    // --- Blogs ---

    pub async fn blogs(&self, page: u32, limit: u32) -> ApiResult<BlogPage> {
        self.call(&ListBlogs { page, limit }).await
    }

    pub async fn blog(&self, id: &str) -> ApiResult<BlogPost> {
        self.call(&GetBlog { id: id.to_string() }).await
    }

    pub async fn create_blog(&self, payload: BlogPayload) -> ApiResult<()> {
        self.call(&CreateBlog(payload)).await.map(drop)
    }

    pub async fn update_blog(&self, id: &str, payload: BlogPayload) -> ApiResult<()> {
        let request = UpdateBlog {
            id: id.to_string(),
            payload,
        };
        self.call(&request).await.map(drop)
    }

    pub async fn delete_blog(&self, id: &str) -> ApiResult<()> {
        self.call(&DeleteBlog { id: id.to_string() }).await.map(drop)
    }

    // --- Accounts ---

    pub async fn login(&self, request: LoginRequest) -> ApiResult<AuthUser> {
        let user = self.call(&request).await?;
        log::info!("Logged in as {}", user.username);
        Ok(user)
    }

    pub async fn register(&self, request: RegisterRequest) -> ApiResult<()> {
        self.call(&request).await.map(drop)
    }
}

/// 非成功响应 -> 错误
fn failure(resp: &HttpResponse, default_message: &str, single_resource: bool) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(&resp.body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| default_message.to_string());
    if resp.status == 404 && single_resource {
        ApiError::not_found(message)
    } else {
        ApiError::status(resp.status, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;
    use crate::request::{HttpMethod, MockHttpClient};
    use serde_json::json;

    const BASE: &str = "https://api.test";

    fn config() -> RuntimeConfig {
        RuntimeConfig {
            api_base_url: BASE.into(),
            ..RuntimeConfig::default()
        }
    }

    #[tokio::test]
    async fn test_error_message_from_body() {
        let client = MockHttpClient::new();
        client.mock_response(
            "https://api.test/api/login",
            401,
            json!({ "message": "Invalid credentials" }),
        );
        let api = KhelMelaApi::new(&client, &config());
        let err = api
            .login(LoginRequest {
                email: "a@b.co".into(),
                password: "secret".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Status);
        assert_eq!(err.status, Some(401));
        assert_eq!(err.message, "Invalid credentials");
    }

    #[tokio::test]
    async fn test_error_msg_field_and_default() {
        let client = MockHttpClient::new();
        client.mock_response(
            "https://api.test/api/register",
            400,
            json!({ "errorMsg": "Email taken" }),
        );
        client.mock_raw("https://api.test/api/blogs", 500, "");
        let api = KhelMelaApi::new(&client, &config());

        let err = api
            .register(RegisterRequest {
                username: "s".into(),
                email: "s@k.com".into(),
                password: "12345678".into(),
                profile_photo: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.message, "Email taken");

        let err = api.create_blog(BlogPayload::default()).await.unwrap_err();
        assert_eq!(err.message, "Failed to create blog post");
        assert_eq!(err.status, Some(500));
    }

    #[tokio::test]
    async fn test_single_blog_404_is_not_found() {
        let client = MockHttpClient::new();
        client.mock_response("https://api.test/api/blogs/missing", 404, json!({}));
        let api = KhelMelaApi::new(&client, &config());
        let err = api.blog("missing").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.message, "Failed to fetch post");

        // 删除接口的 404 只是普通失败
        let err = api.delete_blog("missing").await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Status);
    }

    #[tokio::test]
    async fn test_network_error_keeps_message() {
        let client = MockHttpClient::new();
        client.mock_network_error("https://api.test/api/stats", "Failed to fetch");
        let api = KhelMelaApi::new(&client, &config());
        let err = api.stats().await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Network);
        assert_eq!(err.message, "Failed to fetch");
    }

    #[tokio::test]
    async fn test_bearer_token_only_when_present() {
        let client = MockHttpClient::new();
        client.mock_raw("https://api.test/api/blogs/7", 200, "");
        let api = KhelMelaApi::new(&client, &config());
        api.delete_blog("7").await.unwrap();

        let api = api.with_token(Some("abc"));
        api.delete_blog("7").await.unwrap();

        let sent = client.sent_to("https://api.test/api/blogs/7");
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].header(HEADER_AUTHORIZATION), None);
        assert_eq!(sent[1].header(HEADER_AUTHORIZATION), Some("Bearer abc"));
        assert_eq!(sent[1].method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn test_list_and_parse() {
        let client = MockHttpClient::new();
        client.mock_response(
            "https://api.test/api/blogs?page=2&limit=7",
            200,
            json!({
                "success": true,
                "blogs": [{ "id": "b1", "title": "Hello", "description": "<p>x</p>" }],
                "pagination": { "total": 8, "totalPages": 2, "limit": 7, "hasNextPage": false, "hasPrevPage": true }
            }),
        );
        client.mock_response(
            "https://api.test/api/tournaments/featured",
            200,
            json!([{ "id": 1, "name": "Cup", "status": "upcoming", "maxTeams": 8, "registeredTeams": 2 }]),
        );
        let api = KhelMelaApi::new(&client, &config());

        let page = api.blogs(2, 7).await.unwrap();
        assert_eq!(page.blogs[0].id(), Some("b1"));
        assert!(page.pagination.has_prev_page);

        let featured = api.featured_tournaments().await.unwrap();
        assert_eq!(featured[0].slots_left(), 6);
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_parse_error() {
        let client = MockHttpClient::new();
        client.mock_raw("https://api.test/api/tournaments", 200, "<html>oops</html>");
        let api = KhelMelaApi::new(&client, &config());
        let err = api.tournaments().await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Parse);
    }

    #[tokio::test]
    async fn test_home_overview_fails_independently() {
        let client = MockHttpClient::new();
        client.mock_response(
            "https://api.test/api/tournaments/featured",
            200,
            json!([{ "id": 3, "name": "Clash Night", "status": "ongoing", "maxTeams": 4, "registeredTeams": 4 }]),
        );
        client.mock_network_error("https://api.test/api/stats", "connection reset");
        let api = KhelMelaApi::new(&client, &config());

        let (featured, stats) = api.home_overview().await;
        assert_eq!(featured.unwrap()[0].name, "Clash Night");
        assert_eq!(stats.unwrap_err().kind, ApiErrorKind::Network);
        assert_eq!(client.requests.borrow().len(), 2);
    }
}
