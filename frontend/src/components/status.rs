//! 加载 / 空状态 / 通知

use leptos::prelude::*;

use crate::web::router::Link;

#[component]
pub fn Loading(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-16 gap-3">
            <span class="loading loading-spinner loading-lg text-primary"></span>
            {label.map(|l| view! { <span class="text-base-content/70">{l}</span> })}
        </div>
    }
}

/// 资源不存在时的空状态，附带返回入口
#[component]
pub fn NotFoundState(
    #[prop(into)] title: String,
    #[prop(into)] message: String,
    #[prop(into)] back_to: String,
    #[prop(into)] back_label: String,
) -> impl IntoView {
    view! {
        <div class="hero py-24">
            <div class="hero-content text-center">
                <div class="max-w-md">
                    <h1 class="text-4xl font-bold">{title}</h1>
                    <p class="py-6 text-base-content/70">{message}</p>
                    <Link to=back_to class="btn btn-primary">{back_label}</Link>
                </div>
            </div>
        </div>
    }
}

/// 页面级错误提示
#[component]
pub fn ErrorBanner(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div role="alert" class="alert alert-error my-4">
            <span>{message}</span>
        </div>
    }
}

/// 右上角的短暂通知：(消息, 是否出错)
#[component]
pub fn Toast(notification: ReadSignal<Option<(String, bool)>>) -> impl IntoView {
    view! {
        <Show when=move || notification.get().is_some()>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    let is_err = notification.get().is_some_and(|(_, e)| e);
                    if is_err { "alert alert-error shadow-lg" } else { "alert alert-success shadow-lg" }
                }>
                    <span>{move || notification.get().map(|(m, _)| m).unwrap_or_default()}</span>
                </div>
            </div>
        </Show>
    }
}
