//! 博客编辑表单（创建与编辑共用）

use leptos::prelude::*;
use leptos::task::spawn_local;

use khelmela_shared::BlogPost;
use khelmela_shared::blog::BLOG_CATEGORIES;
use khelmela_shared::sanitize::format_description;
use khelmela_shared::validation::{BlogDraft, ImageFile};

use crate::components::rich_text::RichText;
use crate::forms::{FieldError, SignalForm};
use crate::web::file::{preview_url, read_image_file, revoke_preview, selected_file};

#[component]
pub fn BlogDraftFields(
    form: SignalForm<BlogDraft>,
    /// 选中文件后的处理：创建页暂存到草稿，编辑页立即上传
    #[prop(into)]
    on_image: Callback<ImageFile>,
    /// 正在处理图片（编辑页上传中）
    #[prop(optional)]
    image_busy: Option<Signal<bool>>,
) -> impl IntoView {
    let local_preview = RwSignal::new(Option::<String>::None);

    let on_file = move |ev: leptos::web_sys::Event| {
        let Some(file) = selected_file(&ev) else {
            return;
        };
        spawn_local(async move {
            match read_image_file(&file).await {
                Ok(image) => {
                    if let Some(old) = local_preview.get_untracked() {
                        revoke_preview(&old);
                    }
                    local_preview.set(preview_url(&file));
                    on_image.run(image);
                }
                Err(e) => form.fail(format!("Could not read file: {}", e)),
            }
        });
    };

    let clear_image = move |_| {
        if let Some(old) = local_preview.get_untracked() {
            revoke_preview(&old);
        }
        local_preview.set(None);
        form.edit("image", |d| {
            d.image_file = None;
            d.image_url.clear();
        });
    };

    let preview = move || {
        let uploading = image_busy.is_some_and(|busy| busy.get());
        let local = local_preview.get();
        form.value(|d| d.preview_image(local, uploading))
    };

    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text">"Cover Image"</span>
            </label>
            {move || match preview() {
                Some(src) => view! {
                    <div class="relative">
                        <img src=src alt="Preview" class="w-full h-64 object-cover rounded-box" />
                        <button type="button" class="btn btn-circle btn-sm absolute top-2 right-2" on:click=clear_image>
                            "✕"
                        </button>
                    </div>
                }
                .into_any(),
                None => view! {
                    <div class="border-2 border-dashed border-base-300 rounded-box p-8 text-center space-y-4">
                        <input
                            type="file"
                            accept="image/*"
                            class="file-input file-input-bordered w-full max-w-xs"
                            on:change=on_file
                        />
                        <div class="divider">"or paste an image URL"</div>
                        <input
                            type="url"
                            class="input input-bordered w-full"
                            placeholder="https://example.com/image.jpg"
                            prop:value=move || form.value(|d| d.image_url.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.edit("image", |d| d.image_url = value);
                            }
                        />
                    </div>
                }
                .into_any(),
            }}
            <Show when=move || image_busy.is_some_and(|busy| busy.get())>
                <p class="text-sm mt-1"><span class="loading loading-spinner loading-xs"></span> " Uploading image..."</p>
            </Show>
            <FieldError message=Signal::derive(move || form.error("image")) />
        </div>

        <div class="form-control">
            <label class="label" for="title">
                <span class="label-text">"Title"</span>
            </label>
            <input
                id="title"
                class="input input-bordered"
                placeholder="Enter your blog title"
                prop:value=move || form.value(|d| d.title.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.edit("title", |d| d.title = value);
                }
            />
            <FieldError message=Signal::derive(move || form.error("title")) />
        </div>

        <div class="form-control">
            <label class="label" for="category">
                <span class="label-text">"Category"</span>
            </label>
            <select
                id="category"
                class="select select-bordered"
                prop:value=move || form.value(|d| d.category.clone())
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    form.edit("category", |d| d.category = value);
                }
            >
                {BLOG_CATEGORIES
                    .iter()
                    .map(|(id, label)| view! { <option value=*id>{*label}</option> })
                    .collect_view()}
            </select>
            <FieldError message=Signal::derive(move || form.error("category")) />
        </div>

        <div class="form-control">
            <label class="label" for="description">
                <span class="label-text">"Content"</span>
                <span class="label-text-alt">
                    {move || form.value(|d| d.description.trim().chars().count())} " characters"
                </span>
            </label>
            <textarea
                id="description"
                class="textarea textarea-bordered h-64"
                placeholder="Write your blog content here. Each line becomes a paragraph."
                prop:value=move || form.value(|d| d.description.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.edit("description", |d| d.description = value);
                }
            ></textarea>
            <FieldError message=Signal::derive(move || form.error("description")) />
        </div>
    }
}

/// 草稿预览：与详情页一致的渲染方式
#[component]
pub fn DraftPreview(form: SignalForm<BlogDraft>, #[prop(into)] author: String) -> impl IntoView {
    move || {
        let draft = form.value(|d| d.clone());
        let post = BlogPost {
            title: Some(draft.title.clone()),
            description: format_description(&draft.description),
            category: Some(draft.category.clone()),
            author_name: Some(author.clone()),
            ..BlogPost::default()
        };
        view! {
            <article class="space-y-4">
                <span class="badge badge-primary">{post.category_label().unwrap_or_default().to_string()}</span>
                <h1 class="text-3xl font-bold">{post.display_title().to_string()}</h1>
                <p class="text-sm text-base-content/60">"By " {post.display_author().to_string()}</p>
                <RichText source=post.description.clone() />
            </article>
        }
    }
}
