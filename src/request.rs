use serde::de::DeserializeOwned;
use std::collections::HashMap;

use khelmela_shared::validation::ImageFile;

use crate::error::{ApiError, ApiResult};

pub use khelmela_shared::protocol::HttpMethod;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// multipart 表单中的一个字段
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text(String),
    File(ImageFile),
}

/// 请求体
#[derive(Debug, Clone, PartialEq)]
pub enum HttpBody {
    /// JSON 字符串，发送时带 `Content-Type: application/json`
    Json(String),
    /// multipart/form-data，边界由浏览器生成
    Multipart(Vec<(String, FormPart)>),
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<HttpBody>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_json(mut self, body: String) -> Self {
        self.body = Some(HttpBody::Json(body));
        self
    }

    pub fn with_multipart(mut self, parts: Vec<(String, FormPart)>) -> Self {
        self.body = Some(HttpBody::Multipart(parts));
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    /// JSON 请求体（测试中用于断言）
    pub fn json_body(&self) -> Option<&str> {
        match &self.body {
            Some(HttpBody::Json(s)) => Some(s),
            _ => None,
        }
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 解析 JSON 响应体；空响应体按 `null` 处理
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        let body = if self.body.trim().is_empty() {
            "null"
        } else {
            self.body.as_str()
        };
        serde_json::from_str(body).map_err(|e| ApiError::parse(e.to_string()))
    }
}

/// HTTP 客户端特性 (Trait)
/// 使用 async_trait 以支持异步调用，(?Send) 是因为浏览器环境下的 JS 值不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    /// 只有请求无法完成时才返回错误；非 2xx 状态码照常返回响应
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

// =========================================================
// 测试实现: Mock 客户端
// =========================================================

#[cfg(test)]
enum MockReply {
    Response(HttpResponse),
    Error(String),
}

/// 按 URL 回放预设响应，并记录所有收到的请求
#[cfg(test)]
#[derive(Default)]
pub struct MockHttpClient {
    replies: std::cell::RefCell<HashMap<String, MockReply>>,
    pub requests: std::cell::RefCell<Vec<HttpRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mock_response(&self, url: &str, status: u16, body: serde_json::Value) {
        self.mock_raw(url, status, &body.to_string());
    }

    pub fn mock_raw(&self, url: &str, status: u16, body: &str) {
        self.replies.borrow_mut().insert(
            url.to_string(),
            MockReply::Response(HttpResponse {
                status,
                body: body.to_string(),
            }),
        );
    }

    pub fn mock_network_error(&self, url: &str, message: &str) {
        self.replies
            .borrow_mut()
            .insert(url.to_string(), MockReply::Error(message.to_string()));
    }

    pub fn sent_to(&self, url: &str) -> Vec<HttpRequest> {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.url == url)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let url = req.url.clone();
        self.requests.borrow_mut().push(req);
        match self.replies.borrow().get(&url) {
            Some(MockReply::Response(resp)) => Ok(resp.clone()),
            Some(MockReply::Error(message)) => Err(ApiError::network(message.clone())),
            None => Ok(HttpResponse {
                status: 404,
                body: String::new(),
            }),
        }
    }
}
