use leptos::prelude::*;
use leptos::task::spawn_local;

use khelmela_shared::pagination::Pager;
use khelmela_shared::{AppRoute, BLOG_PAGE_LIMIT, BlogPage as BlogList};

use crate::components::blog_card::BlogCard;
use crate::components::status::{ErrorBanner, Loading, Toast};
use crate::use_services;
use crate::web::router::Link;

const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this post?";

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[component]
pub fn BlogPage() -> impl IntoView {
    let services = use_services();
    let access = services.session.access_signal();

    let pager = RwSignal::new(Pager::default());
    let (page, set_page) = signal(BlogList::default());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);

    // 只有页码变化才重新加载，写回分页信息不会再次触发
    let current_page = Memo::new(move |_| pager.with(Pager::current));
    let loader = services.clone();
    Effect::new(move |_| {
        let current = current_page.get();
        let services = loader.clone();
        set_loading.set(true);
        spawn_local(async move {
            match services.api().blogs(current, BLOG_PAGE_LIMIT).await {
                Ok(list) => {
                    pager.update(|p| p.apply(list.pagination));
                    set_page.set(list);
                    set_error_msg.set(None);
                }
                Err(e) => {
                    leptos::logging::error!("Error fetching blogs: {}", e);
                    set_error_msg.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    });

    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    let handle_delete = Callback::new(move |id: String| {
        if !confirm(DELETE_CONFIRMATION) {
            return;
        }
        let services = services.clone();
        spawn_local(async move {
            let token = services.session.token();
            match services.flows(token.as_deref()).delete_blog(&id).await {
                Ok(()) => {
                    set_page.update(|p| {
                        p.remove(&id);
                    });
                    set_notification.set(Some(("Post deleted".to_string(), false)));
                }
                Err(e) => {
                    leptos::logging::error!("Delete error: {}", e);
                    set_notification.set(Some((e.to_string(), true)));
                }
            }
        });
    });

    let go_to = move |target: u32| {
        pager.update(|p| {
            p.go_to(target);
        });
    };

    let posts = move || {
        let first_page = pager.with(Pager::is_first_page);
        page.with(|p| {
            p.blogs
                .iter()
                .enumerate()
                .map(|(i, post)| (post.clone(), first_page && i == 0))
                .collect::<Vec<_>>()
        })
    };

    let page_numbers = move || {
        let (current, total) = pager.with(|p| (p.current(), p.info().total_pages.max(1)));
        (1..=total)
            .map(|n| {
                let class = if n == current { "join-item btn btn-active" } else { "join-item btn" };
                view! { <button class=class on:click=move |_| go_to(n)>{n}</button> }
            })
            .collect_view()
    };

    view! {
        <div class="max-w-6xl mx-auto px-4 py-10 space-y-8">
            <Toast notification=notification />

            <div class="flex flex-col sm:flex-row items-center justify-between gap-4">
                <div>
                    <h1 class="text-4xl font-bold">"KhelMela Blog"</h1>
                    <p class="text-base-content/70">"News, guides and stories from the Nepali gaming scene."</p>
                </div>
                <Show when=move || access.get().can_create_blog()>
                    <Link to=AppRoute::BlogCreator.to_path() class="btn btn-primary">"Create Blog"</Link>
                </Show>
            </div>

            {move || error_msg.get().map(|e| view! { <ErrorBanner message=e /> })}

            <Show when=move || !loading.get() fallback=|| view! { <Loading label="Loading..." /> }>
                <Show
                    when=move || !page.with(|p| p.blogs.is_empty())
                    fallback=|| view! { <p class="text-center py-12 text-base-content/60">"No blog posts yet."</p> }
                >
                    <h2 class="text-2xl font-bold">
                        {move || {
                            let current = pager.with(Pager::current);
                            if current == 1 { "Latest Posts".to_string() } else { format!("Page {}", current) }
                        }}
                    </h2>
                    <div class="grid gap-8 md:grid-cols-2">
                        <For
                            each=posts
                            key=|(post, featured)| (post.id().unwrap_or_default().to_string(), *featured)
                            children=move |(post, featured)| {
                                let level = access.get_untracked();
                                view! {
                                    <div class=if featured { "md:col-span-2" } else { "" }>
                                        <BlogCard
                                            post=post
                                            featured=featured
                                            can_edit=level.can_edit_blog()
                                            can_delete=level.can_delete_blog()
                                            on_delete=handle_delete
                                        />
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>

            <div class="flex justify-center">
                <div class="join">
                    <button
                        class="join-item btn"
                        disabled=move || !pager.with(Pager::can_prev)
                        on:click=move |_| pager.update(|p| {
                            p.prev();
                        })
                    >
                        "Previous"
                    </button>
                    {page_numbers}
                    <button
                        class="join-item btn"
                        disabled=move || !pager.with(Pager::can_next)
                        on:click=move |_| pager.update(|p| {
                            p.next();
                        })
                    >
                        "Next"
                    </button>
                </div>
            </div>
        </div>
    }
}
