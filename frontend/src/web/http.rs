//! HTTP 请求封装模块
//!
//! 基于 `web_sys::fetch` 实现 [`khelmela::HttpClient`]，API 层的调用约定
//! （鉴权头、错误体解析、404 语义）都在 `khelmela` 里，这里只负责把请求发出去。

use async_trait::async_trait;
use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Headers, Request, RequestInit, Response};

use khelmela::{ApiError, ApiResult, FormPart, HttpBody, HttpClient, HttpRequest, HttpResponse};
use khelmela_shared::validation::ImageFile;

/// 浏览器 fetch 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

#[async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let headers = Headers::new().map_err(|e| build_error("创建 Headers 失败", e))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| build_error("设置 Header 失败", e))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        match &req.body {
            Some(HttpBody::Json(body)) => opts.set_body(&JsValue::from_str(body)),
            // multipart 的 Content-Type（含 boundary）由浏览器生成
            Some(HttpBody::Multipart(parts)) => {
                let form: JsValue = form_data(parts)?.into();
                opts.set_body(&form);
            }
            None => {}
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| build_error("请求构建失败", e))?;

        let window = web_sys::window().ok_or_else(|| ApiError::network("无法获取 window 对象"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| ApiError::network(js_message(&e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| ApiError::parse(format!("Response 类型转换失败: {:?}", e)))?;

        let promise = response
            .text()
            .map_err(|e| ApiError::parse(js_message(&e)))?;
        let text = JsFuture::from(promise)
            .await
            .map_err(|e| ApiError::network(js_message(&e)))?;

        Ok(HttpResponse {
            status: response.status(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}

/// 组装 multipart 表单
fn form_data(parts: &[(String, FormPart)]) -> ApiResult<FormData> {
    let form = FormData::new().map_err(|e| build_error("创建 FormData 失败", e))?;
    for (name, part) in parts {
        match part {
            FormPart::Text(value) => form.append_with_str(name, value),
            FormPart::File(file) => {
                let blob = to_blob(file)?;
                form.append_with_blob_and_filename(name, &blob, &file.name)
            }
        }
        .map_err(|e| build_error("写入 FormData 失败", e))?;
    }
    Ok(form)
}

fn to_blob(file: &ImageFile) -> ApiResult<Blob> {
    let bytes = Uint8Array::from(file.bytes.as_slice());
    let parts = Array::of1(&bytes);
    let bag = BlobPropertyBag::new();
    bag.set_type(&file.content_type);
    Blob::new_with_u8_array_sequence_and_options(&parts, &bag)
        .map_err(|e| build_error("创建 Blob 失败", e))
}

fn build_error(context: &str, e: JsValue) -> ApiError {
    ApiError::network(format!("{}: {}", context, js_message(&e)))
}

/// 提取 JS 异常的可读信息
pub(crate) fn js_message(e: &JsValue) -> String {
    e.dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| e.as_string())
        .unwrap_or_else(|| format!("{:?}", e))
}
