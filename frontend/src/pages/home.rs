use leptos::prelude::*;
use leptos::task::spawn_local;

use khelmela_shared::form::{FormState, FormStore, ValidationMode};
use khelmela_shared::validation::ContactForm;
use khelmela_shared::{Stat, Tournament};

use crate::components::header::APP_STORE_URL;
use crate::components::status::Loading;
use crate::components::tournament_card::TournamentCard;
use crate::forms::{FieldError, SignalForm};
use crate::use_services;
use crate::web::router::Link;

const FEATURES: &[(&str, &str)] = &[
    (
        "Tournament Creation",
        "Create custom tournaments with flexible brackets, team sizes, and prize pools tailored to your community's needs.",
    ),
    (
        "Real-time Statistics",
        "Track player and team performance with detailed analytics, match history, and progress tracking.",
    ),
    (
        "Team Management",
        "Build and manage your team with integrated communication tools, role assignments, and practice scheduling.",
    ),
    (
        "Live Streaming",
        "Broadcast your tournaments with integrated streaming capabilities and spectator features for wider audience reach.",
    ),
    (
        "Prize Distribution",
        "Automated prize pool management and secure payment distribution to winners with transparent transaction history.",
    ),
    (
        "Mobile Access",
        "Stay connected to your tournaments and teams on-the-go with our fully-featured mobile application.",
    ),
];

const CONTACT_EMAIL: &str = "bussinesskhelmela@gmail.com";

/// 联系表单发送成功提示的显示时长
const MESSAGE_SENT_NOTICE: std::time::Duration = std::time::Duration::from_millis(2500);

#[component]
pub fn HomePage() -> impl IntoView {
    let services = use_services();

    let (featured, set_featured) = signal(Vec::<Tournament>::new());
    let (stats, set_stats) = signal(Vec::<Stat>::new());
    let (loading, set_loading) = signal(true);
    let (load_error, set_load_error) = signal(Option::<String>::None);

    spawn_local(async move {
        let (featured, stats) = services.api().home_overview().await;
        match featured {
            Ok(list) => set_featured.set(list),
            Err(e) => set_load_error.set(Some(e.to_string())),
        }
        // 统计数据是装饰性的，失败时只记录日志
        match stats {
            Ok(list) => set_stats.set(list),
            Err(e) => leptos::logging::warn!("Failed to load stats: {}", e),
        }
        set_loading.set(false);
    });

    view! {
        <section id="home" class="hero min-h-[60vh] bg-base-100">
            <div class="hero-content flex-col lg:flex-row gap-12">
                <div class="max-w-xl text-center lg:text-left">
                    <h1 class="text-5xl font-bold">
                        <span class="block">"Next Level"</span>
                        <span class="text-secondary">"Gaming"</span>
                    </h1>
                    <p class="py-6 text-lg text-base-content/70">
                        "Join and compete in gaming tournaments on our platform. Take your gaming experience to new heights."
                    </p>
                    <div class="flex gap-3 justify-center lg:justify-start">
                        <a class="btn btn-primary" href=APP_STORE_URL target="_blank" rel="noopener noreferrer">
                            "Download Now"
                        </a>
                        <Link to="/tournaments" class="btn btn-outline">"Browse Tournaments"</Link>
                    </div>
                </div>
                <Show when=move || !stats.with(Vec::is_empty)>
                    <div class="stats stats-vertical md:stats-horizontal shadow bg-base-200">
                        <For
                            each=move || stats.get()
                            key=|s| s.label.clone()
                            children=|stat| view! {
                                <div class="stat">
                                    <div class="stat-title">{stat.label}</div>
                                    <div class="stat-value text-primary">{stat.value}</div>
                                </div>
                            }
                        />
                    </div>
                </Show>
            </div>
        </section>

        <section id="tournaments" class="py-16 px-4">
            <div class="max-w-7xl mx-auto">
                <div class="flex items-end justify-between mb-8">
                    <h2 class="text-3xl font-bold">"Featured " <span class="text-secondary">"Tournaments"</span></h2>
                    <Link to="/tournaments" class="link link-primary">"View all"</Link>
                </div>
                <Show when=move || !loading.get() fallback=|| view! { <Loading /> }>
                    {move || load_error.get().map(|e| view! {
                        <div role="alert" class="alert alert-warning">
                            <span>"Could not load featured tournaments: " {e}</span>
                        </div>
                    })}
                    <Show when=move || featured.with(Vec::is_empty) && load_error.get().is_none()>
                        <p class="text-center text-base-content/60 py-8">"No featured tournaments right now."</p>
                    </Show>
                    <div class="grid gap-6 md:grid-cols-2 lg:grid-cols-3">
                        <For
                            each=move || featured.get()
                            key=|t| t.id.clone()
                            children=|t| view! { <TournamentCard tournament=t /> }
                        />
                    </div>
                </Show>
            </div>
        </section>

        <section id="features" class="py-16 px-4 bg-base-100">
            <div class="max-w-7xl mx-auto">
                <h2 class="text-3xl font-bold text-center mb-10">"Platform " <span class="text-primary">"Features"</span></h2>
                <div class="grid gap-6 md:grid-cols-2 lg:grid-cols-3">
                    {FEATURES
                        .iter()
                        .map(|(title, description)| view! {
                            <div class="card bg-base-200">
                                <div class="card-body">
                                    <h3 class="card-title">{*title}</h3>
                                    <p class="text-base-content/70">{*description}</p>
                                </div>
                            </div>
                        })
                        .collect_view()}
                </div>
            </div>
        </section>

        <section id="download" class="py-16 px-4">
            <div class="max-w-3xl mx-auto text-center space-y-6">
                <h2 class="text-3xl font-bold">"Take KhelMela " <span class="text-secondary">"Everywhere"</span></h2>
                <p class="text-base-content/70">"Register for tournaments, follow your matches and get results on your phone."</p>
                <a class="btn btn-primary" href=APP_STORE_URL target="_blank" rel="noopener noreferrer">"Get it on Google Play"</a>
            </div>
        </section>

        <section id="about" class="py-16 px-4 bg-base-100">
            <div class="max-w-3xl mx-auto space-y-4">
                <h2 class="text-3xl font-bold">"About " <span class="text-primary">"KhelMela"</span></h2>
                <p class="text-base-content/70">
                    "KhelMela was started by a group of battle royale fans and esports lovers who wanted to build a platform for all kinds of players, from beginners to pros. Our goal is to make competitive gaming easy and fun for everyone, while giving organizers the tools they need to run smooth and exciting tournaments."
                </p>
                <p class="text-base-content/70">
                    "Since our launch in 2025, we're committed to growing the esports ecosystem and supporting communities in Nepal."
                </p>
            </div>
        </section>

        <ContactSection />
    }
}

/// 联系表单：只做本地校验，提交后短暂显示已发送
#[component]
fn ContactSection() -> impl IntoView {
    let form = SignalForm::<ContactForm>::new(ValidationMode::OnSubmit);
    let (sent, set_sent) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let accepted = form.with_form(FormState::begin_submit).flatten();
        if accepted.is_some() {
            form.with_form(|state| state.complete(Ok::<(), String>(())));
            set_sent.set(true);
            set_timeout(move || set_sent.set(false), MESSAGE_SENT_NOTICE);
        }
    };

    let input = move |field: &'static str,
                      label: &'static str,
                      placeholder: &'static str,
                      read: fn(&ContactForm) -> String,
                      write: fn(&mut ContactForm, String)| {
        view! {
            <div class="form-control">
                <label class="label" for=field>
                    <span class="label-text">{label}</span>
                </label>
                <input
                    id=field
                    class="input input-bordered"
                    placeholder=placeholder
                    prop:value=move || form.value(read)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.edit(field, |v| write(v, value));
                    }
                />
                <FieldError message=Signal::derive(move || form.error(field)) />
            </div>
        }
    };

    view! {
        <section id="contact" class="py-16 px-4">
            <div class="max-w-5xl mx-auto grid gap-10 md:grid-cols-2">
                <div class="space-y-6">
                    <h2 class="text-3xl font-bold">"Get In " <span class="text-secondary">"Touch"</span></h2>
                    <div>
                        <h3 class="font-bold">"Email Us"</h3>
                        <p class="text-base-content/60">"For general inquiries and support"</p>
                        <a class="link link-secondary" href=format!("mailto:{}", CONTACT_EMAIL)>{CONTACT_EMAIL}</a>
                    </div>
                    <div>
                        <h3 class="font-bold">"Our Location"</h3>
                        <p class="text-base-content/60">"We are based in FarWest, Nepal"</p>
                    </div>
                </div>

                <form class="card bg-base-100 shadow-xl card-body" on:submit=on_submit novalidate>
                    <h3 class="card-title">"Send us a message"</h3>
                    <Show when=move || sent.get()>
                        <div role="alert" class="alert alert-success">
                            <span>"Message sent! We'll get back to you soon."</span>
                        </div>
                    </Show>
                    {input("name", "Your Name", "John Doe", |v| v.name.clone(), |v, s| v.name = s)}
                    {input("email", "Email Address", "john@example.com", |v| v.email.clone(), |v, s| v.email = s)}
                    {input("subject", "Subject", "How can we help you?", |v| v.subject.clone(), |v, s| v.subject = s)}
                    <div class="form-control">
                        <label class="label" for="message">
                            <span class="label-text">"Message"</span>
                        </label>
                        <textarea
                            id="message"
                            class="textarea textarea-bordered h-32"
                            placeholder="Tell us how we can assist you..."
                            prop:value=move || form.value(|v| v.message.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.edit("message", |v| v.message = value);
                            }
                        ></textarea>
                        <FieldError message=Signal::derive(move || form.error("message")) />
                    </div>
                    <button class="btn btn-primary mt-4">"Send Message"</button>
                </form>
            </div>
        </section>
    }
}
