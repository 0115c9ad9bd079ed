//! 文件选择
//!
//! `<input type="file">` 选中的文件读成 [`ImageFile`]，字节保存在 Rust 侧，
//! 这样表单状态可以放进 signal。

use js_sys::Uint8Array;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, HtmlInputElement, Url};

use khelmela_shared::validation::{ImageFile, check_image_file};

use super::http::js_message;

/// 取出 change 事件中选中的第一个文件
pub fn selected_file(ev: &Event) -> Option<File> {
    let input: HtmlInputElement = ev.target()?.dyn_into().ok()?;
    input.files()?.get(0)
}

/// 读取文件内容
///
/// 类型和大小先按文件元数据检查，不合格的文件不会被读入内存。
pub async fn read_image_file(file: &File) -> Result<ImageFile, String> {
    check_image_file(&file.type_(), file.size() as usize).map_err(|e| e.to_string())?;
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| js_message(&e))?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    Ok(ImageFile {
        name: file.name(),
        content_type: file.type_(),
        bytes,
    })
}

/// 本地预览地址
pub fn preview_url(file: &File) -> Option<String> {
    Url::create_object_url_with_blob(file).ok()
}

pub fn revoke_preview(url: &str) {
    let _ = Url::revoke_object_url(url);
}
