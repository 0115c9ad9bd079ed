use leptos::prelude::*;

use khelmela_shared::date::format_date;
use khelmela_shared::sanitize::strip_tags;
use khelmela_shared::{AppRoute, BlogPost};

use crate::web::router::Link;

pub const PLACEHOLDER_COVER: &str =
    "https://images.unsplash.com/photo-1511512578047-dfb367046420?auto=format&fit=crop&q=80";

const EXCERPT_CHARS: usize = 150;

/// 列表摘要：去掉标签后截断
pub fn excerpt(description: &str) -> String {
    let text = strip_tags(description).replace('\n', " ");
    if text.chars().count() <= EXCERPT_CHARS {
        return text;
    }
    let cut: String = text.chars().take(EXCERPT_CHARS).collect();
    format!("{}...", cut.trim_end())
}

pub fn cover_of(post: &BlogPost) -> String {
    post.image
        .clone()
        .filter(|i| !i.trim().is_empty())
        .unwrap_or_else(|| PLACEHOLDER_COVER.to_string())
}

/// 管理员操作按钮
#[component]
pub fn AdminActions(
    id: String,
    can_edit: bool,
    can_delete: bool,
    #[prop(into)] on_delete: Callback<String>,
) -> impl IntoView {
    let edit_path = AppRoute::EditBlog(id.clone()).to_path();
    view! {
        {can_edit.then(|| view! { <Link to=edit_path class="btn btn-xs btn-outline">"Edit"</Link> })}
        {can_delete.then(|| view! {
            <button class="btn btn-xs btn-outline btn-error" on:click=move |_| on_delete.run(id.clone())>
                "Delete"
            </button>
        })}
    }
}

#[component]
pub fn BlogCard(
    post: BlogPost,
    /// 第一页的首篇文章以大卡片展示
    #[prop(optional)]
    featured: bool,
    can_edit: bool,
    can_delete: bool,
    #[prop(into)] on_delete: Callback<String>,
) -> impl IntoView {
    let id = post.id().unwrap_or_default().to_string();
    let href = AppRoute::BlogPost(id.clone()).to_path();
    let date = post.created_at.as_ref().map(format_date).unwrap_or_default();
    let category = post.category_label().map(str::to_string);
    let (card_class, title_class) = if featured {
        ("card lg:card-side bg-base-100 shadow-xl", "card-title text-3xl")
    } else {
        ("card bg-base-100 shadow-xl", "card-title")
    };

    view! {
        <article class=card_class>
            <figure class=if featured { "lg:w-1/2 h-72" } else { "h-48" }>
                <img src=cover_of(&post) alt=post.display_title().to_string() class="w-full h-full object-cover" />
            </figure>
            <div class="card-body">
                <div class="flex items-center gap-2 text-sm text-base-content/60">
                    {category.map(|c| view! { <span class="badge badge-primary badge-outline">{c}</span> })}
                    <span>{date}</span>
                </div>
                <h2 class=title_class>{post.display_title().to_string()}</h2>
                <p class="text-base-content/70">{excerpt(&post.description)}</p>
                <div class="card-actions items-center justify-between mt-2">
                    <span class="text-sm">"By " {post.display_author().to_string()}</span>
                    <div class="flex gap-2">
                        <AdminActions id=id can_edit=can_edit can_delete=can_delete on_delete=on_delete />
                        <Link to=href class="btn btn-sm btn-primary">"Read More"</Link>
                    </div>
                </div>
            </div>
        </article>
    }
}
