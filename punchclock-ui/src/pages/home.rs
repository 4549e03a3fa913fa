//! Home Page
//!
//! Terminal screen shown while waiting for a card.

use chrono::Local;
use gloo_timers::callback::Interval;
use leptos::*;

use crate::app::use_app_context;
use crate::i18n::DateTimePreset;

/// Home page component
#[component]
pub fn Home() -> impl IntoView {
    let ctx = use_app_context();
    let now = create_rw_signal(Local::now());

    let ticker = Interval::new(1000, move || now.set(Local::now()));
    on_cleanup(move || drop(ticker));

    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center space-y-6">
            <h1 class="text-4xl font-bold">{move || ctx.t("home.title")}</h1>

            <div class="text-6xl font-mono text-primary-400">
                {move || now.get().format("%H:%M:%S").to_string()}
            </div>

            <p class="text-gray-400">
                {move || {
                    let date = ctx.format_datetime(&now.get(), DateTimePreset::Long);
                    ctx.t_with("home.today", &[("date", &date)])
                }}
            </p>

            <div class="bg-gray-800 rounded-xl px-8 py-6 text-2xl pulse">
                {move || ctx.t("home.prompt")}
            </div>
        </div>
    }
}
