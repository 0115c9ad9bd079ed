//! 图床上传
//!
//! 图片先上传到图床，拿到的 URL 再写进后续的元数据请求，两步之间没有事务保证。

use serde::Deserialize;

use khelmela_shared::validation::ImageFile;

use crate::config::RuntimeConfig;
use crate::error::{ApiError, ApiResult};
use crate::request::{FormPart, HttpClient, HttpMethod, HttpRequest};

pub const UPLOAD_FAILED: &str = "Image upload failed";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    secure_url: Option<String>,
}

/// 图床客户端
pub struct ImageHost<'a, C: HttpClient> {
    client: &'a C,
    endpoint: String,
    cloud_name: String,
    upload_preset: String,
}

impl<'a, C: HttpClient> ImageHost<'a, C> {
    pub fn new(client: &'a C, config: &RuntimeConfig) -> Self {
        Self {
            client,
            endpoint: config.upload_url(),
            cloud_name: config.cloud_name.clone(),
            upload_preset: config.upload_preset.clone(),
        }
    }

    /// 上传图片并返回可访问的 URL
    ///
    /// 类型或大小不合格的文件在发出任何请求之前就被拒绝。
    pub async fn upload(&self, file: &ImageFile) -> ApiResult<String> {
        file.check()?;

        let parts = vec![
            ("file".to_string(), FormPart::File(file.clone())),
            (
                "upload_preset".to_string(),
                FormPart::Text(self.upload_preset.clone()),
            ),
            (
                "cloud_name".to_string(),
                FormPart::Text(self.cloud_name.clone()),
            ),
        ];
        let req = HttpRequest::new(&self.endpoint, HttpMethod::Post).with_multipart(parts);

        log::info!("Uploading image '{}' ({} bytes)", file.name, file.size());
        let resp = self
            .client
            .send(req)
            .await
            .map_err(|e| ApiError::upload(e.message))?;
        if !resp.is_success() {
            log::warn!("Image host responded {}", resp.status);
            return Err(ApiError::upload(UPLOAD_FAILED));
        }

        let body: UploadResponse = resp.json()?;
        body.url
            .or(body.secure_url)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ApiError::upload(UPLOAD_FAILED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;
    use crate::request::{HttpBody, MockHttpClient};
    use serde_json::json;

    const ENDPOINT: &str = "https://api.cloudinary.com/v1_1/demo/image/upload";

    fn config() -> RuntimeConfig {
        RuntimeConfig {
            cloud_name: "demo".into(),
            upload_preset: "preset".into(),
            ..RuntimeConfig::default()
        }
    }

    fn png(size: usize) -> ImageFile {
        ImageFile {
            name: "cover.png".into(),
            content_type: "image/png".into(),
            bytes: vec![0; size],
        }
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_fields() {
        let client = MockHttpClient::new();
        client.mock_response(ENDPOINT, 200, json!({ "url": "http://res/x.png" }));
        let host = ImageHost::new(&client, &config());

        let url = host.upload(&png(10)).await.unwrap();
        assert_eq!(url, "http://res/x.png");

        let sent = client.sent_to(ENDPOINT);
        let Some(HttpBody::Multipart(parts)) = &sent[0].body else {
            panic!("expected multipart body");
        };
        let names: Vec<&str> = parts.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["file", "upload_preset", "cloud_name"]);
        assert_eq!(parts[1].1, FormPart::Text("preset".into()));
    }

    #[tokio::test]
    async fn test_secure_url_fallback() {
        let client = MockHttpClient::new();
        client.mock_response(ENDPOINT, 200, json!({ "secure_url": "https://res/x.png" }));
        let host = ImageHost::new(&client, &config());
        assert_eq!(host.upload(&png(1)).await.unwrap(), "https://res/x.png");
    }

    #[tokio::test]
    async fn test_rejected_before_network() {
        let client = MockHttpClient::new();
        let host = ImageHost::new(&client, &config());

        let mut pdf = png(1);
        pdf.content_type = "application/pdf".into();
        let err = host.upload(&pdf).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Upload);

        let err = host.upload(&png(5 * 1024 * 1024 + 1)).await.unwrap_err();
        assert_eq!(err.message, "Image must be smaller than 5MB");
        assert!(client.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_host_failure() {
        let client = MockHttpClient::new();
        client.mock_response(ENDPOINT, 400, json!({ "error": { "message": "bad preset" } }));
        let host = ImageHost::new(&client, &config());
        let err = host.upload(&png(1)).await.unwrap_err();
        assert_eq!(err.message, UPLOAD_FAILED);
    }
}
