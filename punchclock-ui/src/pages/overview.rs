//! Overview Page
//!
//! Who is currently present.

use leptos::*;

use crate::api::{self, Card, ClientError};
use crate::app::use_app_context;
use crate::components::Loading;

/// Presence overview page component
#[component]
pub fn Overview() -> impl IntoView {
    let ctx = use_app_context();
    let cards = create_rw_signal(Vec::<Card>::new());
    let counts = create_rw_signal((0usize, 0usize));
    let loading = create_rw_signal(true);
    let failure = create_rw_signal(None::<ClientError>);
    let reload = create_rw_signal(0u32);

    create_effect(move |_| {
        reload.get();
        loading.set(true);
        spawn_local(async move {
            match api::fetch_overview().await {
                Ok(overview) => {
                    counts.set((overview.present, overview.total));
                    cards.set(overview.cards);
                    failure.set(None);
                }
                Err(e) => {
                    log::error!("Failed to fetch overview: {}", e);
                    ctx.show_error(ctx.error_text(&e));
                    failure.set(Some(e));
                }
            }
            loading.set(false);
        });
    });

    let summary = move || {
        let (present, total) = counts.get();
        ctx.t_with(
            "overview.summary",
            &[("present", &present.to_string()), ("total", &total.to_string())],
        )
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">{move || ctx.t("overview.title")}</h1>
                <span class="text-gray-400">{summary}</span>
            </div>

            {move || {
                if loading.get() {
                    view! { <Loading /> }.into_view()
                } else if let Some(error) = failure.get() {
                    view! {
                        <div class="space-y-3">
                            <p class="text-red-400">{move || ctx.error_text(&error)}</p>
                            <button
                                class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm"
                                on:click=move |_| reload.update(|n| *n += 1)
                            >
                                {move || ctx.t("common.retry")}
                            </button>
                        </div>
                    }.into_view()
                } else if cards.with(Vec::is_empty) {
                    view! {
                        <p class="text-gray-400">{move || ctx.t("overview.empty")}</p>
                    }.into_view()
                } else {
                    view! {
                        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                            <For
                                each=move || cards.get()
                                key=|card| card.id
                                children=move |card| view! { <PresenceCard card=card /> }
                            />
                        </div>
                    }.into_view()
                }
            }}
        </div>
    }
}

#[component]
fn PresenceCard(card: Card) -> impl IntoView {
    let ctx = use_app_context();
    let present = card.is_present;

    view! {
        <div class="bg-gray-800 rounded-lg p-4">
            <div class="font-semibold truncate">{card.display_name().to_string()}</div>
            <div class={if present { "text-green-400 text-sm" } else { "text-gray-500 text-sm" }}>
                {move || {
                    if present { ctx.t("overview.present") } else { ctx.t("overview.absent") }
                }}
            </div>
        </div>
    }
}
