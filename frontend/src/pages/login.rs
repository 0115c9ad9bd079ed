use leptos::prelude::*;
use leptos::task::spawn_local;

use khelmela_shared::form::ValidationMode;
use khelmela_shared::validation::LoginForm;

use crate::forms::{FieldError, FormAlert, SignalForm};
use crate::use_services;

#[component]
pub fn LoginPage() -> impl IntoView {
    let services = use_services();
    let form = SignalForm::<LoginForm>::new(ValidationMode::OnSubmit);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let services = services.clone();
        spawn_local(async move {
            let flows = services.flows(None);
            flows.login(&form, &services.session).await;
        });
    };

    let submitting = move || form.submitting();

    view! {
        <div class="hero min-h-[70vh]">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Welcome Back"</h1>
                    <p class="text-base-content/70">"Sign in to your KhelMela account"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <FormAlert message=Signal::derive(move || form.form_error()) />

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                class="input input-bordered"
                                prop:value=move || form.value(|v| v.email.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.edit("email", |v| v.email = value);
                                }
                            />
                            <FieldError message=Signal::derive(move || form.error("email")) />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                class="input input-bordered"
                                prop:value=move || form.value(|v| v.password.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.edit("password", |v| v.password = value);
                                }
                            />
                            <FieldError message=Signal::derive(move || form.error("password")) />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=submitting>
                                {move || if submitting() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign In".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
