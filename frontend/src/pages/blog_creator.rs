use leptos::prelude::*;
use leptos::task::spawn_local;

use khelmela_shared::form::ValidationMode;
use khelmela_shared::validation::{BlogDraft, ImageFile};

use crate::components::blog_form::{BlogDraftFields, DraftPreview};
use crate::forms::{FormAlert, SignalForm};
use crate::use_services;

#[component]
pub fn BlogCreatorPage() -> impl IntoView {
    let services = use_services();
    let form = SignalForm::<BlogDraft>::new(ValidationMode::Eager);
    let (previewing, set_previewing) = signal(false);

    let author = services
        .session
        .user()
        .map(|u| u.username)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "Anonymous".to_string());

    // 新建时图片在发布时才上传
    let on_image = Callback::new(move |image: ImageFile| {
        form.edit("image", |d| d.image_file = Some(image));
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let services = services.clone();
        spawn_local(async move {
            let token = services.session.token();
            let user = services.session.user();
            services
                .flows(token.as_deref())
                .create_blog(&form, user.as_ref())
                .await;
        });
    };

    view! {
        <div class="max-w-4xl mx-auto px-4 py-10">
            <div class="flex items-center justify-between mb-6">
                <h1 class="text-3xl font-bold">"Create New Blog Post"</h1>
                <button class="btn btn-outline btn-sm" type="button" on:click=move |_| set_previewing.update(|p| *p = !*p)>
                    {move || if previewing.get() { "Continue Editing" } else { "Preview" }}
                </button>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <Show
                        when=move || previewing.get()
                        fallback=move || view! {
                            <form class="space-y-6" on:submit=on_submit.clone() novalidate>
                                <FormAlert message=Signal::derive(move || form.form_error()) />
                                <BlogDraftFields form=form on_image=on_image />
                                <div class="flex justify-end">
                                    <button class="btn btn-primary" disabled=move || !form.can_submit()>
                                        {move || if form.submitting() {
                                            view! { <span class="loading loading-spinner"></span> "Publishing..." }.into_any()
                                        } else {
                                            "Publish Post".into_any()
                                        }}
                                    </button>
                                </div>
                            </form>
                        }
                    >
                        <DraftPreview form=form author=author.clone() />
                    </Show>
                </div>
            </div>
        </div>
    }
}
