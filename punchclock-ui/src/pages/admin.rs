//! Admin Page
//!
//! Registered cards and the punch log.

use leptos::*;

use crate::api::{self, Card, ClientError, PunchLogEntry};
use crate::app::{use_app_context, AppContext};
use crate::components::Loading;
use crate::i18n::DateTimePreset;

/// Administration page component
#[component]
pub fn Admin() -> impl IntoView {
    let ctx = use_app_context();
    let cards = create_rw_signal(Vec::<Card>::new());
    let entries = create_rw_signal(Vec::<PunchLogEntry>::new());
    let card_total = create_rw_signal(0usize);
    let log_total = create_rw_signal(0usize);
    let loading = create_rw_signal(true);
    let notice = create_rw_signal(None::<String>);

    create_effect(move |_| {
        spawn_local(async move {
            match api::fetch_cards().await {
                Ok(list) => {
                    card_total.set(list.total);
                    cards.set(list.cards);
                }
                Err(e) => report_load_error(ctx, "cards", e),
            }
            match api::fetch_punch_log().await {
                Ok(log) => {
                    log_total.set(log.total);
                    entries.set(log.entries);
                }
                Err(e) => report_load_error(ctx, "punch log", e),
            }
            loading.set(false);
        });
    });

    let clear_log = move |_: ev::MouseEvent| {
        let confirmed = window()
            .confirm_with_message(&ctx.t("admin.confirm_clear"))
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        spawn_local(async move {
            match api::clear_punch_log().await {
                Ok(removed) => {
                    entries.set(Vec::new());
                    log_total.set(0);
                    let count = removed.to_string();
                    notice.set(Some(ctx.t_with("admin.cleared", &[("count", &count)])));
                }
                Err(e) => report_load_error(ctx, "clear log", e),
            }
        });
    };

    view! {
        <div class="space-y-8">
            <h1 class="text-3xl font-bold">{move || ctx.t("admin.title")}</h1>

            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">
                    {move || ctx.t("admin.cards")}
                    <span class="text-gray-500 ml-2">{move || format!("({})", card_total.get())}</span>
                </h2>
                {move || {
                    if loading.get() {
                        view! { <Loading /> }.into_view()
                    } else {
                        view! { <CardTable cards=cards /> }.into_view()
                    }
                }}
            </section>

            <section class="bg-gray-800 rounded-xl p-6">
                <div class="flex items-center justify-between mb-4">
                    <h2 class="text-xl font-semibold">
                        {move || ctx.t("admin.log")}
                        <span class="text-gray-500 ml-2">{move || format!("({})", log_total.get())}</span>
                    </h2>
                    <button
                        class="px-4 py-2 bg-red-600 hover:bg-red-700 rounded-lg text-sm transition-colors"
                        on:click=clear_log
                    >
                        {move || ctx.t("admin.clear_log")}
                    </button>
                </div>

                {move || notice.get().map(|text| view! { <p class="text-green-400 mb-4">{text}</p> })}

                {move || {
                    if loading.get() {
                        view! { <Loading /> }.into_view()
                    } else if entries.with(Vec::is_empty) {
                        view! {
                            <p class="text-gray-400">{move || ctx.t("admin.empty_log")}</p>
                        }.into_view()
                    } else {
                        view! { <PunchLogTable entries=entries /> }.into_view()
                    }
                }}
            </section>
        </div>
    }
}

fn report_load_error(ctx: AppContext, what: &str, error: ClientError) {
    log::error!("Failed to load {}: {}", what, error);
    ctx.show_error(ctx.error_text(&error));
}

#[component]
fn CardTable(cards: RwSignal<Vec<Card>>) -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <table class="w-full text-left text-sm">
            <thead class="text-gray-400">
                <tr>
                    <th>{move || ctx.t("admin.columns.card_number")}</th>
                    <th>{move || ctx.t("admin.columns.name")}</th>
                    <th>{move || ctx.t("admin.columns.fullname")}</th>
                    <th>{move || ctx.t("admin.columns.user_id")}</th>
                    <th>{move || ctx.t("admin.columns.present")}</th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || cards.get()
                    key=|card| card.id
                    children=move |card| {
                        let present = card.is_present;
                        view! {
                            <tr class="border-t border-gray-700">
                                <td class="font-mono">{card.card_number}</td>
                                <td>{card.card_name.unwrap_or_default()}</td>
                                <td>{card.user_fullname.unwrap_or_default()}</td>
                                <td>{card.user_id.unwrap_or_default()}</td>
                                <td>
                                    {move || if present { ctx.t("common.yes") } else { ctx.t("common.no") }}
                                </td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
    }
}

#[component]
fn PunchLogTable(entries: RwSignal<Vec<PunchLogEntry>>) -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <table class="w-full text-left text-sm">
            <thead class="text-gray-400">
                <tr>
                    <th>{move || ctx.t("admin.columns.time")}</th>
                    <th>{move || ctx.t("admin.columns.fullname")}</th>
                    <th>{move || ctx.t("admin.columns.card_number")}</th>
                    <th>{move || ctx.t("admin.columns.status")}</th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || entries.get()
                    key=|entry| entry.id
                    children=move |entry| {
                        let status_key = entry.status_key();
                        let timestamp = entry.timestamp;
                        let name = entry
                            .user_fullname
                            .clone()
                            .or_else(|| entry.card_name.clone())
                            .unwrap_or_default();
                        view! {
                            <tr class="border-t border-gray-700">
                                <td>{move || ctx.format_millis(timestamp, DateTimePreset::Short)}</td>
                                <td>{name}</td>
                                <td class="font-mono">{entry.card_number}</td>
                                <td>{move || ctx.t(&status_key)}</td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
    }
}
