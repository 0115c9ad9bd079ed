use leptos::prelude::*;
use leptos::task::spawn_local;

use khelmela_shared::date::format_long_date;
use khelmela_shared::{AppRoute, BlogPost};

use crate::components::blog_card::cover_of;
use crate::components::rich_text::RichText;
use crate::components::status::{Loading, NotFoundState};
use crate::use_services;
use crate::web::router::Link;

#[derive(Debug, Clone)]
enum Loaded {
    Pending,
    Found(Box<BlogPost>),
    Missing,
    Failed(String),
}

fn history_back() {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.back();
    }
}

#[component]
pub fn BlogPostPage(id: String) -> impl IntoView {
    let services = use_services();
    let (state, set_state) = signal(Loaded::Pending);

    spawn_local(async move {
        let loaded = match services.api().blog(&id).await {
            Ok(post) => Loaded::Found(Box::new(post)),
            Err(e) if e.is_not_found() => Loaded::Missing,
            Err(e) => {
                leptos::logging::error!("Fetch error: {}", e);
                Loaded::Failed(e.to_string())
            }
        };
        set_state.set(loaded);
    });

    move || match state.get() {
        Loaded::Pending => view! { <Loading /> }.into_any(),
        Loaded::Missing => view! {
            <NotFoundState
                title="Blog Post Not Found"
                message="This post doesn't exist or has been removed."
                back_to=AppRoute::Blog.to_path()
                back_label="Back to Blog"
            />
        }
        .into_any(),
        Loaded::Failed(message) => view! {
            <div class="max-w-4xl mx-auto px-4 py-8 text-center">
                <div role="alert" class="alert alert-error mb-4">
                    <span>{message}</span>
                </div>
                <Link to=AppRoute::Blog.to_path() class="btn btn-primary">"Back to Blog"</Link>
            </div>
        }
        .into_any(),
        Loaded::Found(post) => view! { <PostView post=*post /> }.into_any(),
    }
}

#[component]
fn PostView(post: BlogPost) -> impl IntoView {
    let date = post.created_at.as_ref().map(format_long_date);
    let category = post.category_label().map(str::to_string);
    let content = post.content.clone().filter(|c| !c.trim().is_empty());

    view! {
        <div class="max-w-5xl mx-auto px-4 py-8 space-y-8">
            <div class="flex justify-between">
                <button class="btn btn-ghost" on:click=move |_| history_back()>"← Back"</button>
                <Link to=AppRoute::Blog.to_path() class="btn btn-primary">"View All Posts"</Link>
            </div>

            <h1 class="text-center text-4xl font-bold leading-tight">{post.display_title().to_string()}</h1>

            <figure class="relative rounded-box overflow-hidden shadow-lg max-w-3xl mx-auto h-80">
                <img src=cover_of(&post) alt=post.display_title().to_string() class="w-full h-full object-cover" />
                {category.map(|c| view! { <span class="badge badge-primary absolute top-4 left-4">{c}</span> })}
            </figure>

            <header class="space-y-4">
                <RichText source=post.description.clone() class="text-lg" />
                <div class="flex items-center gap-4 text-base-content/70 pb-6 border-b border-base-300">
                    <span class="font-medium">{post.display_author().to_string()}</span>
                    {date.map(|d| view! { <span>{d}</span> })}
                </div>
            </header>

            {content.map(|c| view! {
                <article class="bg-base-100 rounded-box p-8 shadow-sm">
                    <RichText source=c class="prose-lg" />
                </article>
            })}
        </div>
    }
}
