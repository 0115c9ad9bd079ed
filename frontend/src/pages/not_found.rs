use leptos::prelude::*;

use khelmela_shared::AppRoute;

use crate::web::router::Link;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="hero min-h-[60vh]">
            <div class="hero-content text-center">
                <div class="max-w-md">
                    <h1 class="text-7xl font-bold text-primary">"404"</h1>
                    <p class="text-2xl font-semibold mt-4">"Page Not Found"</p>
                    <p class="py-6 text-base-content/70">"The page you are looking for does not exist or you do not have access to it."</p>
                    <Link to=AppRoute::Home.to_path() class="btn btn-primary">"Go Home"</Link>
                </div>
            </div>
        </div>
    }
}
