//! KhelMela API 层
//!
//! 与传输无关：浏览器端提供 `fetch` 实现的 [`HttpClient`]，测试中使用 Mock 客户端。

pub mod api;
pub mod config;
pub mod error;
pub mod flows;
pub mod request;
pub mod upload;

pub use api::KhelMelaApi;
pub use config::RuntimeConfig;
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use flows::{FlowContext, Navigator, submit_form};
pub use request::{FormPart, HttpBody, HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use upload::ImageHost;
