use leptos::prelude::*;

use khelmela_shared::route::{Page, offers};
use khelmela_shared::{AppRoute, SessionWriter};

use crate::session::use_session;
use crate::web::router::{Link, use_router};

pub const APP_STORE_URL: &str = "https://play.google.com/store/apps/details?id=com.khelmela.app";

/// 顶部导航：(路径, 文本)
const NAV_LINKS: &[(&str, &str)] = &[
    ("/", "Home"),
    ("/#features", "Features"),
    ("/tournaments", "Tournaments"),
    ("/blog", "Blog"),
    ("/#about", "About"),
    ("/#contact", "Contact"),
];

fn link_class(active: bool) -> &'static str {
    if active {
        "btn btn-ghost btn-sm text-secondary"
    } else {
        "btn btn-ghost btn-sm"
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let path = router.path();
    let access = session.access_signal();

    let is_logged_in = move || session.is_logged_in();
    let offers_login = move || offers(access.get(), Page::Login);
    let offers_profile = move || access.get().can_view_profile();

    let on_logout = move |_| {
        session.logout();
        router.navigate(&AppRoute::Login.to_path());
    };

    let nav_items = move || {
        let current = path.get();
        let mut links: Vec<(&'static str, &'static str)> = NAV_LINKS.to_vec();
        if offers_profile() {
            links.push(("/profile", "Profile"));
        }
        links
            .into_iter()
            .map(|(href, label)| {
                let active = href == current;
                // 首页分区锚点交给浏览器处理
                if href.contains('#') {
                    view! { <li><a href=href class=link_class(false)>{label}</a></li> }.into_any()
                } else {
                    view! { <li><Link to=href class=link_class(active)>{label}</Link></li> }
                        .into_any()
                }
            })
            .collect_view()
    };

    view! {
        <header class="navbar bg-base-100 shadow sticky top-0 z-50">
            <div class="navbar-start">
                <Link to="/" class="btn btn-ghost text-2xl font-bold tracking-wider">
                    <span class="text-primary">"Khel"</span>
                    <span class="text-secondary">"Mela"</span>
                </Link>
            </div>
            <nav class="navbar-center hidden md:flex">
                <ul class="menu menu-horizontal gap-1">{nav_items}</ul>
            </nav>
            <div class="navbar-end gap-2">
                <Show when=is_logged_in>
                    <button class="btn btn-primary btn-sm" on:click=on_logout>"Logout"</button>
                </Show>
                <Show when=offers_login>
                    <Link to="/login" class="btn btn-primary btn-sm">"Login"</Link>
                </Show>
                <a
                    class="btn btn-outline btn-sm hidden lg:inline-flex"
                    href=APP_STORE_URL
                    target="_blank"
                    rel="noopener noreferrer"
                >
                    "Get The App"
                </a>
            </div>
        </header>
    }
}
