//! 富文本渲染
//!
//! 整个应用里唯一使用 `inner_html` 的地方，输入一律先经过 `render_rich_text` 清洗。

use leptos::prelude::*;

use khelmela_shared::sanitize::render_rich_text;

#[component]
pub fn RichText(
    #[prop(into)] source: String,
    #[prop(optional, into)] class: String,
) -> impl IntoView {
    let html = render_rich_text(&source);
    view! { <div class=format!("prose max-w-none {}", class) inner_html=html></div> }
}
