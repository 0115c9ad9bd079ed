use leptos::prelude::*;
use leptos::task::spawn_local;

use khelmela_shared::form::ValidationMode;
use khelmela_shared::validation::{BlogDraft, ImageFile};
use khelmela_shared::{AppRoute, BlogPost};

use crate::components::blog_form::BlogDraftFields;
use crate::components::status::{ErrorBanner, Loading, NotFoundState};
use crate::forms::{FormAlert, SignalForm};
use crate::use_services;
use crate::web::router::Link;

#[derive(Debug, Clone)]
enum Loaded {
    Pending,
    Found(Box<BlogPost>),
    Missing,
    Failed(String),
}

#[component]
pub fn BlogEditPage(id: String) -> impl IntoView {
    let services = use_services();
    let (state, set_state) = signal(Loaded::Pending);

    let loader = services.clone();
    let post_id = id.clone();
    spawn_local(async move {
        let loaded = match loader.api().blog(&post_id).await {
            Ok(post) => Loaded::Found(Box::new(post)),
            Err(e) if e.is_not_found() => Loaded::Missing,
            Err(e) => {
                leptos::logging::error!("Failed to load post {}: {}", post_id, e);
                Loaded::Failed(e.to_string())
            }
        };
        set_state.set(loaded);
    });

    move || match state.get() {
        Loaded::Pending => view! { <Loading label="Loading post..." /> }.into_any(),
        Loaded::Missing => view! {
            <NotFoundState
                title="Blog Post Not Found"
                message="The post you're trying to edit doesn't exist."
                back_to=AppRoute::Blog.to_path()
                back_label="Back to Blog"
            />
        }
        .into_any(),
        Loaded::Failed(message) => view! { <div class="max-w-2xl mx-auto px-4"><ErrorBanner message=message /></div> }.into_any(),
        Loaded::Found(post) => view! { <EditForm id=id.clone() post=*post /> }.into_any(),
    }
}

#[component]
fn EditForm(id: String, post: BlogPost) -> impl IntoView {
    let services = use_services();
    let form = SignalForm::<BlogDraft>::new(ValidationMode::Eager);
    form.load(BlogDraft::from_post(&post));

    let (uploading, set_uploading) = signal(false);

    // 编辑时选中图片立即上传，草稿只保存上传后的地址
    let uploader = services.clone();
    let on_image = Callback::new(move |image: ImageFile| {
        let services = uploader.clone();
        set_uploading.set(true);
        spawn_local(async move {
            match services.flows(None).upload_image(&image).await {
                Ok(url) => form.edit("image", |d| {
                    d.image_url = url;
                    d.image_file = None;
                }),
                Err(e) => {
                    leptos::logging::error!("Image upload error: {}", e);
                    form.fail("Failed to upload image");
                }
            }
            set_uploading.set(false);
        });
    });

    let cancel_path = AppRoute::BlogPost(id.clone()).to_path();
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let services = services.clone();
        let id = id.clone();
        let original = post.clone();
        spawn_local(async move {
            let token = services.session.token();
            services
                .flows(token.as_deref())
                .update_blog(&form, &id, &original)
                .await;
        });
    };

    view! {
        <div class="max-w-2xl mx-auto px-4 py-8">
            <h1 class="text-2xl font-bold mb-6">"Edit Post"</h1>
            <form class="space-y-6" on:submit=on_submit novalidate>
                <FormAlert message=Signal::derive(move || form.form_error()) />
                <BlogDraftFields form=form on_image=on_image image_busy=Signal::derive(move || uploading.get()) />
                <div class="flex justify-end gap-4">
                    <Link to=cancel_path class="btn btn-ghost">"Cancel"</Link>
                    <button
                        class="btn btn-primary"
                        disabled=move || uploading.get() || !form.can_submit()
                    >
                        {move || if form.submitting() {
                            view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                        } else {
                            "Save Changes".into_any()
                        }}
                    </button>
                </div>
            </form>
        </div>
    }
}
