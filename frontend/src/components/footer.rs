use leptos::prelude::*;

use crate::web::router::Link;

#[component]
pub fn Footer() -> impl IntoView {
    let year = khelmela_shared::date::now().format("%Y").to_string();

    view! {
        <footer class="footer p-10 bg-neutral text-neutral-content">
            <aside>
                <p class="text-2xl font-bold tracking-wider">
                    <span class="text-primary">"Khel"</span>
                    <span class="text-secondary">"Mela"</span>
                </p>
                <p class="opacity-70">"Nepal's esports tournament platform."</p>
            </aside>
            <nav>
                <h6 class="footer-title">"Quick Links"</h6>
                <Link to="/" class="link link-hover">"Home"</Link>
                <Link to="/tournaments" class="link link-hover">"Tournaments"</Link>
                <Link to="/blog" class="link link-hover">"Blog"</Link>
                <a href="/#download" class="link link-hover">"Download"</a>
                <a href="/#about" class="link link-hover">"About Us"</a>
                <a href="/#contact" class="link link-hover">"Contact"</a>
            </nav>
            <nav>
                <h6 class="footer-title">"Resources"</h6>
                <a class="link link-hover">"Support Center"</a>
                <a class="link link-hover">"Tournament Rules"</a>
                <a class="link link-hover">"FAQ"</a>
            </nav>
            <nav>
                <h6 class="footer-title">"Legal"</h6>
                <a class="link link-hover">"Terms of Service"</a>
                <a class="link link-hover">"Privacy Policy"</a>
                <a class="link link-hover">"Refund Policy"</a>
            </nav>
        </footer>
        <div class="footer footer-center p-4 bg-neutral text-neutral-content border-t border-base-content/10">
            <p>{format!("© {} KhelMela. All rights reserved.", year)}</p>
        </div>
    }
}
