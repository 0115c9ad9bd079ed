use leptos::prelude::*;

use khelmela_shared::date::format_optional_date;
use khelmela_shared::tournament::format_money;
use khelmela_shared::{AppRoute, Tournament, TournamentStatus};

use crate::web::router::Link;

pub const FALLBACK_IMAGE: &str =
    "https://images.unsplash.com/photo-1542751371-adc38448a05e?auto=format&fit=crop&q=80";

pub fn status_class(status: TournamentStatus) -> &'static str {
    match status {
        TournamentStatus::Live => "badge badge-error",
        TournamentStatus::Upcoming => "badge badge-secondary",
        TournamentStatus::Completed => "badge badge-neutral",
        TournamentStatus::Unknown => "badge badge-ghost",
    }
}

#[component]
pub fn StatusBadge(status: TournamentStatus) -> impl IntoView {
    status
        .badge()
        .map(|label| view! { <span class=status_class(status)>{label}</span> })
}

#[component]
pub fn TournamentCard(tournament: Tournament) -> impl IntoView {
    let href = AppRoute::TournamentDetail(tournament.id.clone()).to_path();
    let image = tournament
        .image
        .clone()
        .filter(|i| !i.is_empty())
        .unwrap_or_else(|| FALLBACK_IMAGE.to_string());
    let fill = tournament.fill_percent().to_string();
    let starts = format_optional_date(tournament.start_date.as_ref());
    let ends = format_optional_date(tournament.end_date.as_ref());

    view! {
        <div class="card bg-base-100 shadow-xl">
            <figure class="relative h-44">
                <img src=image alt=tournament.name.clone() class="w-full h-full object-cover" />
                <div class="absolute top-3 right-3">
                    <StatusBadge status=tournament.status />
                </div>
            </figure>
            <div class="card-body gap-3">
                <div class="text-sm text-base-content/60">{tournament.game.clone()}</div>
                <h3 class="card-title">
                    <Link to=href.clone() class="link link-hover">{tournament.name.clone()}</Link>
                </h3>
                <div class="flex justify-between text-sm">
                    <span>"Prize Pool"</span>
                    <span class="font-bold text-secondary">"Rs. " {format_money(tournament.prize_pool)}</span>
                </div>
                <div class="flex justify-between text-sm text-base-content/70">
                    <span>{starts} " - " {ends}</span>
                </div>
                <div>
                    <div class="flex justify-between text-xs mb-1">
                        <span>"Teams"</span>
                        <span>{tournament.registered_teams} "/" {tournament.max_teams}</span>
                    </div>
                    <progress class="progress progress-primary w-full" value=fill max="100"></progress>
                </div>
                <div class="card-actions justify-end">
                    {if tournament.is_full() {
                        view! { <span class="badge badge-outline">"Registration Full"</span> }.into_any()
                    } else {
                        view! {
                            <Link to=href class="btn btn-primary btn-sm">"Register Now"</Link>
                        }
                        .into_any()
                    }}
                </div>
            </div>
        </div>
    }
}
