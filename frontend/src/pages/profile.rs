use leptos::prelude::*;

use khelmela_shared::date::format_month_year;
use khelmela_shared::{AppRoute, AuthUser, SessionWriter};

use crate::components::status::Toast;
use crate::session::use_session;
use crate::web::router::{Link, use_router};

/// 个人资料中仅在本地编辑的展示字段
#[derive(Debug, Clone, Default, PartialEq)]
struct ProfileDetails {
    name: String,
    location: String,
    website: String,
    phone: String,
    company: String,
}

impl ProfileDetails {
    fn from_user(user: Option<&AuthUser>) -> Self {
        Self {
            name: user.map(|u| u.username.clone()).unwrap_or_default(),
            location: "Nepal".to_string(),
            ..Self::default()
        }
    }
}

fn or_placeholder(value: &str) -> String {
    if value.trim().is_empty() {
        "Not provided".to_string()
    } else {
        value.to_string()
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let user = session.user();

    let email = user.as_ref().map(|u| u.email.clone()).unwrap_or_default();
    let initials = user.as_ref().map(AuthUser::initials).unwrap_or_default();
    let avatar = user.as_ref().and_then(|u| u.avatar_url.clone());
    let member_since = user
        .as_ref()
        .and_then(|u| u.created_at.as_ref())
        .map(format_month_year)
        .unwrap_or_else(|| format_month_year(&khelmela_shared::date::now()));
    let is_admin = session.access().can_create_accounts();

    let details = RwSignal::new(ProfileDetails::from_user(user.as_ref()));
    let draft = RwSignal::new(details.get_untracked());
    let (editing, set_editing) = signal(false);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);

    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    let on_edit = move |_| {
        draft.set(details.get_untracked());
        set_editing.set(true);
    };
    let on_cancel = move |_| set_editing.set(false);
    let on_save = move |_| {
        details.set(draft.get_untracked());
        set_editing.set(false);
        set_notification.set(Some(("Profile updated successfully!".to_string(), false)));
    };
    let on_logout = move |_| {
        session.logout();
        router.navigate(&AppRoute::Login.to_path());
    };

    let field = move |label: &'static str,
                      read: fn(&ProfileDetails) -> String,
                      write: fn(&mut ProfileDetails, String)| {
        view! {
            <div class="form-control">
                <label class="label">
                    <span class="label-text">{label}</span>
                </label>
                <Show
                    when=move || editing.get()
                    fallback=move || view! {
                        <p class="px-1 py-2">{move || details.with(|d| or_placeholder(&read(d)))}</p>
                    }
                >
                    <input
                        class="input input-bordered"
                        prop:value=move || draft.with(read)
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| write(d, value));
                        }
                    />
                </Show>
            </div>
        }
    };

    view! {
        <div class="max-w-4xl mx-auto px-4 py-8 space-y-6">
            <Toast notification=notification />

            <div class="text-center py-4">
                <h1 class="text-3xl font-bold">"Profile"</h1>
                <p class="text-base-content/70 mt-1">"Manage your account settings and preferences"</p>
            </div>

            <div class="flex items-center justify-between">
                <div>
                    <Show when=move || is_admin>
                        <Link to=AppRoute::Signup.to_path() class="btn btn-secondary">"Make Account"</Link>
                    </Show>
                </div>
                <div class="flex gap-2">
                    <Show
                        when=move || editing.get()
                        fallback=move || view! { <button class="btn btn-outline" on:click=on_edit>"Edit Profile"</button> }
                    >
                        <button class="btn btn-primary" on:click=on_save>"Save"</button>
                        <button class="btn btn-ghost" on:click=on_cancel>"Cancel"</button>
                    </Show>
                    <button class="btn btn-outline btn-error" on:click=on_logout>"Logout"</button>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body items-center text-center">
                    {match avatar {
                        Some(src) => view! {
                            <div class="avatar">
                                <div class="w-28 rounded-full">
                                    <img src=src alt="Profile photo" />
                                </div>
                            </div>
                        }
                        .into_any(),
                        None => view! {
                            <div class="avatar placeholder">
                                <div class="bg-primary text-primary-content w-28 rounded-full">
                                    <span class="text-3xl">{initials}</span>
                                </div>
                            </div>
                        }
                        .into_any(),
                    }}
                    <h2 class="card-title text-2xl">{move || details.with(|d| d.name.clone())}</h2>
                    <p class="text-base-content/70">{email.clone()}</p>
                    <p class="text-sm text-base-content/60">"Member since " {member_since.clone()}</p>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"Personal Information"</h3>
                    <div class="grid md:grid-cols-2 gap-4">
                        {field("Full Name", |d| d.name.clone(), |d, v| d.name = v)}
                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Email"</span>
                            </label>
                            <p class="px-1 py-2">{email.clone()}</p>
                        </div>
                        {field("Location", |d| d.location.clone(), |d, v| d.location = v)}
                        {field("Company", |d| d.company.clone(), |d, v| d.company = v)}
                        {field("Website", |d| d.website.clone(), |d, v| d.website = v)}
                        {field("Phone", |d| d.phone.clone(), |d, v| d.phone = v)}
                    </div>
                </div>
            </div>
        </div>
    }
}
