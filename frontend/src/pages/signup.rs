use leptos::prelude::*;
use leptos::task::spawn_local;

use khelmela_shared::form::ValidationMode;
use khelmela_shared::validation::SignupForm;

use crate::forms::{FieldError, FormAlert, SignalForm};
use crate::use_services;
use crate::web::file::{read_image_file, selected_file};

/// 文本输入框
#[component]
fn TextField(
    form: SignalForm<SignupForm>,
    field: &'static str,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    read: fn(&SignupForm) -> String,
    write: fn(&mut SignupForm, String),
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label" for=field>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=field
                type=input_type
                class="input input-bordered"
                prop:value=move || form.value(read)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.edit(field, |v| write(v, value));
                }
            />
            <FieldError message=Signal::derive(move || form.error(field)) />
        </div>
    }
}

/// 创建账号（仅管理员可见）
#[component]
pub fn SignupPage() -> impl IntoView {
    let services = use_services();
    let form = SignalForm::<SignupForm>::new(ValidationMode::OnSubmit);

    let on_photo = move |ev: leptos::web_sys::Event| {
        let Some(file) = selected_file(&ev) else {
            return;
        };
        spawn_local(async move {
            match read_image_file(&file).await {
                Ok(image) => form.edit("photo", |v| v.photo = Some(image)),
                Err(e) => form.fail(format!("Could not read file: {}", e)),
            }
        });
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let services = services.clone();
        spawn_local(async move {
            let token = services.session.token();
            services.flows(token.as_deref()).signup(&form).await;
        });
    };

    let submitting = move || form.submitting();

    view! {
        <div class="hero min-h-[70vh]">
            <div class="hero-content flex-col w-full max-w-lg">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Create Account"</h1>
                    <p class="text-base-content/70">"Register a new KhelMela member"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <FormAlert message=Signal::derive(move || form.form_error()) />

                        <TextField
                            form=form
                            field="name"
                            label="Username"
                            read=|v| v.name.clone()
                            write=|v, s| v.name = s
                        />
                        <TextField
                            form=form
                            field="email"
                            label="Email"
                            input_type="email"
                            read=|v| v.email.clone()
                            write=|v, s| v.email = s
                        />
                        <TextField
                            form=form
                            field="password"
                            label="Password"
                            input_type="password"
                            read=|v| v.password.clone()
                            write=|v, s| v.password = s
                        />
                        <TextField
                            form=form
                            field="confirm_password"
                            label="Confirm Password"
                            input_type="password"
                            read=|v| v.confirm_password.clone()
                            write=|v, s| v.confirm_password = s
                        />

                        <div class="form-control">
                            <label class="label" for="photo">
                                <span class="label-text">"Profile Photo (optional)"</span>
                            </label>
                            <input
                                id="photo"
                                type="file"
                                accept="image/*"
                                class="file-input file-input-bordered w-full"
                                on:change=on_photo
                            />
                            <FieldError message=Signal::derive(move || form.error("photo")) />
                        </div>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=submitting>
                                {move || if submitting() {
                                    view! { <span class="loading loading-spinner"></span> "Creating..." }.into_any()
                                } else {
                                    "Create Account".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
