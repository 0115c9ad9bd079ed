//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 路径到页面的解析由 [`AppRoute::resolve`] 完成，访问级别通过注入的信号提供：
//! 同一路径在不同访问级别下可能解析为不同页面（或 `NotFound`）。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use khelmela::Navigator;
use khelmela_shared::{Access, AppRoute};

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn set_document_title(route: &AppRoute) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(route.title());
    }
}

/// 路由器服务
///
/// 保存当前路径和解析结果，通过 Signal 驱动界面更新。
#[derive(Clone, Copy)]
pub struct RouterService {
    path: RwSignal<String>,
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// 访问级别（注入的信号，与会话解耦）
    access: Signal<Access>,
}

impl RouterService {
    fn new(access: Signal<Access>) -> Self {
        let path = current_path();
        let initial_route = AppRoute::resolve(&path, access.get_untracked());
        set_document_title(&initial_route);
        let (current_route, set_route) = signal(initial_route);

        Self {
            path: RwSignal::new(path),
            current_route,
            set_route,
            access,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 当前浏览器路径（用于导航高亮）
    pub fn path(&self) -> Signal<String> {
        self.path.into()
    }

    /// 导航到新路径：推入 History 并按当前访问级别重新解析
    pub fn navigate(&self, path: &str) {
        if self.path.get_untracked() != path {
            push_history_state(path);
        }
        self.load(path.to_string());
    }

    fn load(&self, path: String) {
        let route = AppRoute::resolve(&path, self.access.get_untracked());
        log::debug!("[Router] {} -> {}", path, route);
        set_document_title(&route);
        self.path.set(path);
        self.set_route.set(route);
    }

    /// 浏览器后退/前进按钮
    fn init_popstate_listener(&self) {
        let router = *self;
        let closure = Closure::<dyn Fn()>::new(move || {
            router.load(current_path());
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 访问级别变化（登录 / 登出）时，按新的路由表重新解析当前路径
    fn setup_access_refresh(&self) {
        let router = *self;
        let access = self.access;

        Effect::new(move |previous: Option<Access>| {
            let level = access.get();
            if previous.is_some_and(|p| p != level) {
                log::info!("[Router] Access changed to {}", level.label());
                router.load(router.path.get_untracked());
            }
            level
        });
    }
}

impl Navigator for RouterService {
    fn navigate(&self, path: &str) {
        RouterService::navigate(self, path);
    }
}

fn provide_router(access: Signal<Access>) -> RouterService {
    let router = RouterService::new(access);

    router.init_popstate_listener();
    router.setup_access_refresh();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(
    /// 访问级别信号
    access: Signal<Access>,
    children: Children,
) -> impl IntoView {
    provide_router(access);

    children()
}

/// 路由出口组件
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 客户端导航链接
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        // 保留新标签页打开等浏览器默认行为
        if ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
