use leptos::prelude::*;
use leptos::task::spawn_local;

use khelmela_shared::tournament::{FilterOption, GAME_CATEGORIES, GAMES, STATUSES, TournamentFilter};
use khelmela_shared::Tournament;

use crate::components::status::{ErrorBanner, Loading};
use crate::components::tournament_card::TournamentCard;
use crate::use_services;

fn option_group(label: &'static str, options: &'static [FilterOption]) -> impl IntoView {
    // 每组的 "all" 只在第一组出现一次
    let items = options
        .iter()
        .filter(|(id, _)| *id != "all")
        .map(|(id, name)| view! { <option value=*id>{*name}</option> })
        .collect_view();
    view! { <optgroup label=label>{items}</optgroup> }
}

#[component]
pub fn TournamentsPage() -> impl IntoView {
    let services = use_services();

    let (tournaments, set_tournaments) = signal(Vec::<Tournament>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let filter = RwSignal::new(TournamentFilter::default());

    spawn_local(async move {
        match services.api().tournaments().await {
            Ok(list) => set_tournaments.set(list),
            Err(e) => set_error_msg.set(Some(e.to_string())),
        }
        set_loading.set(false);
    });

    let visible = move || {
        filter.with(|f| {
            tournaments.with(|list| f.apply(list).into_iter().cloned().collect::<Vec<_>>())
        })
    };

    view! {
        <div class="max-w-7xl mx-auto px-4 py-10 space-y-8">
            <div class="text-center space-y-2">
                <h1 class="text-4xl font-bold">"Tournaments"</h1>
                <p class="text-base-content/70">"Find a tournament, gather your squad and compete."</p>
            </div>

            <div class="flex flex-col md:flex-row gap-4">
                <input
                    type="search"
                    class="input input-bordered flex-1"
                    placeholder="Search tournaments..."
                    prop:value=move || filter.with(|f| f.query.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        filter.update(|f| f.query = value);
                    }
                />
                <select
                    class="select select-bordered md:w-64"
                    prop:value=move || filter.with(|f| f.category.clone())
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        filter.update(|f| f.category = value);
                    }
                >
                    <option value="all">"All Tournaments"</option>
                    {option_group("Categories", GAME_CATEGORIES)}
                    {option_group("Games", GAMES)}
                    {option_group("Status", STATUSES)}
                </select>
            </div>

            {move || error_msg.get().map(|e| view! { <ErrorBanner message=e /> })}

            <Show when=move || !loading.get() fallback=|| view! { <Loading label="Loading tournaments..." /> }>
                <Show
                    when=move || !visible().is_empty()
                    fallback=move || view! {
                        <Show when=move || error_msg.get().is_none()>
                            <p class="text-center py-12 text-base-content/60">
                                "No tournaments match your search."
                            </p>
                        </Show>
                    }
                >
                    <div class="grid gap-6 md:grid-cols-2 lg:grid-cols-3">
                        <For
                            each=visible
                            key=|t| t.id.clone()
                            children=|t| view! { <TournamentCard tournament=t /> }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}
