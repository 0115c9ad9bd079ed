use leptos::prelude::*;
use leptos::task::spawn_local;

use khelmela_shared::date::{format_long_date, format_optional_date, now};
use khelmela_shared::tournament::format_money;
use khelmela_shared::{AppRoute, Tournament};

use crate::components::rich_text::RichText;
use crate::components::status::{Loading, NotFoundState};
use crate::components::tournament_card::{FALLBACK_IMAGE, StatusBadge};
use crate::use_services;
use crate::web::Interval;
use crate::web::router::Link;

/// 时间进度条刷新间隔
const PROGRESS_REFRESH_MS: u32 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Overview,
    Schedule,
    Teams,
    Rules,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Overview, Tab::Schedule, Tab::Teams, Tab::Rules];

    fn label(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Schedule => "Schedule",
            Tab::Teams => "Teams",
            Tab::Rules => "Rules",
        }
    }
}

/// 加载结果
#[derive(Debug, Clone)]
enum Loaded {
    Pending,
    Found(Box<Tournament>),
    Missing(String),
}

#[component]
pub fn TournamentDetailPage(id: String) -> impl IntoView {
    let services = use_services();
    let (state, set_state) = signal(Loaded::Pending);

    spawn_local(async move {
        let loaded = match services.api().tournament(&id).await {
            Ok(t) => Loaded::Found(Box::new(t)),
            Err(e) if e.is_not_found() => {
                Loaded::Missing("The tournament you're looking for doesn't exist or has been removed.".to_string())
            }
            Err(e) => {
                leptos::logging::warn!("Failed to load tournament {}: {}", id, e);
                Loaded::Missing(e.to_string())
            }
        };
        set_state.set(loaded);
    });

    move || match state.get() {
        Loaded::Pending => view! { <Loading label="Loading tournament..." /> }.into_any(),
        Loaded::Missing(message) => view! {
            <NotFoundState
                title="Tournament Not Found"
                message=message
                back_to=AppRoute::Tournaments.to_path()
                back_label="Back to Tournaments"
            />
        }
        .into_any(),
        Loaded::Found(t) => view! { <TournamentView tournament=*t /> }.into_any(),
    }
}

#[component]
fn TournamentView(tournament: Tournament) -> impl IntoView {
    let (tab, set_tab) = signal(Tab::Overview);

    // 时间进度每分钟重新计算
    let (clock, set_clock) = signal(now());
    let ticker = Interval::new(PROGRESS_REFRESH_MS, move || set_clock.set(now()));
    if ticker.is_none() {
        leptos::logging::warn!("Progress refresh timer unavailable");
    }
    StoredValue::new_local(ticker);

    let progress = {
        let t = tournament.clone();
        move || t.progress_at(clock.get()).to_string()
    };

    let image = tournament
        .image
        .clone()
        .filter(|i| !i.is_empty())
        .unwrap_or_else(|| FALLBACK_IMAGE.to_string());

    let tabs = move || {
        Tab::ALL
            .iter()
            .map(|&t| {
                view! {
                    <a
                        role="tab"
                        class=move || if tab.get() == t { "tab tab-active" } else { "tab" }
                        on:click=move |_| set_tab.set(t)
                    >
                        {t.label()}
                    </a>
                }
            })
            .collect_view()
    };

    let body = {
        let t = tournament.clone();
        move || match tab.get() {
            Tab::Overview => overview(&t).into_any(),
            Tab::Schedule => schedule(&t).into_any(),
            Tab::Teams => teams(&t).into_any(),
            Tab::Rules => rules(&t).into_any(),
        }
    };

    view! {
        <div class="max-w-6xl mx-auto px-4 py-8 space-y-6">
            <Link to=AppRoute::Tournaments.to_path() class="btn btn-ghost btn-sm">"← Back to Tournaments"</Link>

            <div class="card lg:card-side bg-base-100 shadow-xl">
                <figure class="lg:w-1/2">
                    <img src=image alt=tournament.name.clone() class="h-full w-full object-cover" />
                </figure>
                <div class="card-body gap-4">
                    <div class="flex items-center gap-2">
                        <StatusBadge status=tournament.status />
                        <span class="text-base-content/60">{tournament.game.clone()}</span>
                    </div>
                    <h1 class="text-3xl font-bold">{tournament.name.clone()}</h1>
                    <div class="stats stats-vertical sm:stats-horizontal bg-base-200">
                        <div class="stat">
                            <div class="stat-title">"Prize Pool"</div>
                            <div class="stat-value text-secondary text-2xl">"Rs. " {format_money(tournament.prize_pool)}</div>
                        </div>
                        <div class="stat">
                            <div class="stat-title">"Slots Left"</div>
                            <div class="stat-value text-2xl">{tournament.slots_left()}</div>
                            <div class="stat-desc">{tournament.registered_teams} " / " {tournament.max_teams} " teams"</div>
                        </div>
                    </div>
                    {(tournament.entry_fee > 0.0).then(|| view! {
                        <p>"Entry Fee: " <span class="font-bold">"Rs. " {format_money(tournament.entry_fee)}</span></p>
                    })}
                    <div>
                        <div class="flex justify-between text-xs mb-1">
                            <span>"Registration"</span>
                            <span>{tournament.fill_percent()} "%"</span>
                        </div>
                        <progress class="progress progress-primary w-full" value=tournament.fill_percent().to_string() max="100"></progress>
                    </div>
                    <div>
                        <div class="flex justify-between text-xs mb-1">
                            <span>{format_optional_date(tournament.start_date.as_ref())}</span>
                            <span>{format_optional_date(tournament.end_date.as_ref())}</span>
                        </div>
                        <progress class="progress progress-secondary w-full" value=progress max="100"></progress>
                    </div>
                    <div class="card-actions">
                        {if tournament.is_full() {
                            view! { <button class="btn btn-disabled">"Registration Full"</button> }.into_any()
                        } else {
                            view! { <button class="btn btn-primary">"Register Now"</button> }.into_any()
                        }}
                    </div>
                </div>
            </div>

            <div role="tablist" class="tabs tabs-bordered">{tabs}</div>
            <div class="card bg-base-100 shadow">
                <div class="card-body">{body}</div>
            </div>
        </div>
    }
}

fn overview(t: &Tournament) -> impl IntoView {
    let detail = |label: &'static str, value: Option<String>| {
        value.map(|v| {
            view! {
                <div>
                    <h4 class="font-medium">{label}</h4>
                    <p class="text-base-content/70">{v}</p>
                </div>
            }
        })
    };

    view! {
        <h2 class="card-title">"About This Tournament"</h2>
        {t.description.clone().map(|d| view! { <RichText source=d /> })}
        <div class="grid sm:grid-cols-2 gap-4 mt-4">
            {detail("Team Size", t.team_size.map(|s| s.to_string()))}
            {detail("Category", Some(t.category.clone()).filter(|c| !c.is_empty()))}
            {detail("Organizer", t.organizer.clone())}
            {detail("Location", t.location.clone())}
        </div>
        <h3 class="font-bold text-lg mt-6">"Prize Distribution"</h3>
        <ul class="space-y-2">
            {t
                .prize_split()
                .into_iter()
                .map(|(place, amount)| view! {
                    <li class="flex justify-between">
                        <span>{place}</span>
                        <span class="font-bold">"Rs. " {format_money(amount as f64)}</span>
                    </li>
                })
                .collect_view()}
        </ul>
    }
}

fn schedule(t: &Tournament) -> impl IntoView {
    let milestones = t.schedule();
    if milestones.is_empty() {
        return view! { <p class="text-base-content/60">"Schedule to be announced."</p> }.into_any();
    }
    view! {
        <ul class="timeline timeline-vertical">
            {milestones
                .into_iter()
                .map(|m| {
                    let when = match m.ends {
                        Some(ends) => format!("{} - {}", format_long_date(&m.starts), format_long_date(&ends)),
                        None => format_long_date(&m.starts),
                    };
                    view! {
                        <li>
                            <div class="timeline-start">{when}</div>
                            <div class="timeline-end timeline-box">{m.label}</div>
                            <hr />
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
    .into_any()
}

fn teams(t: &Tournament) -> impl IntoView {
    if t.teams.is_empty() {
        return view! {
            <div class="text-center py-12">
                <h3 class="text-xl font-bold mb-2">"No Teams Registered Yet"</h3>
                <p class="text-base-content/60">
                    "Be the first to register your team for this tournament and get ready to compete!"
                </p>
            </div>
        }
        .into_any();
    }
    view! {
        <div class="grid sm:grid-cols-2 gap-4">
            {t
                .teams
                .iter()
                .map(|team| view! {
                    <div class="border border-base-300 rounded-box p-4">
                        <h4 class="font-bold">{team.name.clone()}</h4>
                        <p class="text-sm text-base-content/70">"Captain: " {team.captain.clone()}</p>
                        <p class="text-xs text-base-content/50">"Team ID: " {team.id.clone()}</p>
                    </div>
                })
                .collect_view()}
        </div>
    }
    .into_any()
}

fn rules(t: &Tournament) -> impl IntoView {
    view! {
        <h2 class="card-title">"Tournament Rules"</h2>
        <RichText source=t.rules_text().to_string() />
    }
}
