//! KhelMela 前端应用
//!
//! 采用 Context-Driven 架构：
//! - `session`: 会话上下文（登录状态与持久化）
//! - `web::router`: 路由服务，按会话派生的访问级别选择路由表
//! - `components` / `pages`: UI 组件层
//!
//! 请求约定、表单流程和领域模型分别在 `khelmela` 与 `khelmela_shared` 中。

mod forms;
mod session;
mod components {
    pub mod blog_card;
    pub mod blog_form;
    pub mod footer;
    pub mod header;
    pub mod rich_text;
    pub mod status;
    pub mod tournament_card;
}
mod pages {
    pub mod blog;
    pub mod blog_creator;
    pub mod blog_edit;
    pub mod blog_post;
    pub mod home;
    pub mod login;
    pub mod not_found;
    pub mod profile;
    pub mod signup;
    pub mod tournament_detail;
    pub mod tournaments;
}

use leptos::prelude::*;

use khelmela::{FlowContext, KhelMelaApi, RuntimeConfig};
use khelmela_shared::AppRoute;

use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::pages::blog::BlogPage;
use crate::pages::blog_creator::BlogCreatorPage;
use crate::pages::blog_edit::BlogEditPage;
use crate::pages::blog_post::BlogPostPage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::not_found::NotFoundPage;
use crate::pages::profile::ProfilePage;
use crate::pages::signup::SignupPage;
use crate::pages::tournament_detail::TournamentDetailPage;
use crate::pages::tournaments::TournamentsPage;
use crate::session::{SessionContext, use_session};

// 原生 Web API 封装模块
pub(crate) mod web {
    pub mod file;
    mod http;
    pub mod router;
    mod storage;
    mod timer;

    pub use http::FetchHttpClient;
    pub use storage::LocalStorage;
    pub use timer::Interval;
}

use web::FetchHttpClient;
use web::router::{Router, RouterOutlet, RouterService, use_router};

static CLIENT: FetchHttpClient = FetchHttpClient;

/// 页面发起请求所需的依赖
#[derive(Clone)]
pub(crate) struct Services {
    pub config: RuntimeConfig,
    pub router: RouterService,
    pub session: SessionContext,
}

impl Services {
    /// 携带当前会话令牌的 API 客户端
    pub fn api(&self) -> KhelMelaApi<'static, FetchHttpClient> {
        KhelMelaApi::new(&CLIENT, &self.config).with_token(self.session.token().as_deref())
    }

    pub fn flows<'a>(
        &'a self,
        token: Option<&'a str>,
    ) -> FlowContext<'a, FetchHttpClient, RouterService> {
        FlowContext::new(&CLIENT, &self.config, &self.router).with_token(token)
    }
}

pub(crate) fn use_services() -> Services {
    Services {
        config: use_context::<RuntimeConfig>().unwrap_or_default(),
        router: use_router(),
        session: use_session(),
    }
}

/// 路由匹配函数
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Signup => view! { <SignupPage /> }.into_any(),
        AppRoute::Blog => view! { <BlogPage /> }.into_any(),
        AppRoute::BlogPost(id) => view! { <BlogPostPage id=id /> }.into_any(),
        AppRoute::BlogCreator => view! { <BlogCreatorPage /> }.into_any(),
        AppRoute::EditBlog(id) => view! { <BlogEditPage id=id /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::Tournaments => view! { <TournamentsPage /> }.into_any(),
        AppRoute::TournamentDetail(id) => view! { <TournamentDetailPage id=id /> }.into_any(),
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 运行时配置
    let config = RuntimeConfig::from_build_env();
    log::info!("API base URL: {}", config.api_base_url);
    provide_context(config);

    // 2. 会话上下文（从 LocalStorage 恢复）
    let session = SessionContext::restore();
    provide_context(session);

    // 3. 访问级别信号注入路由服务
    let access = session.access_signal();

    view! {
        <Router access=access>
            <div class="flex flex-col min-h-screen bg-base-200">
                <Header />
                <main class="flex-grow">
                    <RouterOutlet matcher=route_matcher />
                </main>
                <Footer />
            </div>
        </Router>
    }
}
