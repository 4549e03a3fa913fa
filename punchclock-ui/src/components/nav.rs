//! Navigation Component
//!
//! Header navigation bar with route buttons and the language switch.

use leptos::*;

use crate::app::use_app_context;
use crate::pages::Page;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let ctx = use_app_context();
    let locales: Vec<String> = ctx
        .i18n
        .with_untracked(|i18n| i18n.available_locales().into_iter().map(String::from).collect());
    let can_go_back = move || ctx.router.with(|router| router.history().can_go_back());
    let can_go_forward = move || ctx.router.with(|router| router.history().can_go_forward());

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Brand
                    <button class="flex items-center space-x-3" on:click=move |_| ctx.navigate("/")>
                        <span class="text-2xl">"⏱"</span>
                        <span class="text-xl font-bold text-white">{move || ctx.t("app.title")}</span>
                    </button>

                    // Route buttons
                    <div class="flex items-center space-x-1">
                        <button
                            class="px-3 py-2 rounded-lg text-gray-400 hover:text-white disabled:opacity-30"
                            disabled=move || !can_go_back()
                            on:click=move |_| ctx.back()
                        >
                            "←"
                        </button>
                        <button
                            class="px-3 py-2 rounded-lg text-gray-400 hover:text-white disabled:opacity-30"
                            disabled=move || !can_go_forward()
                            on:click=move |_| ctx.forward()
                        >
                            "→"
                        </button>
                        {Page::ALL.into_iter().map(|page| view! { <NavLink page=page /> }).collect_view()}
                    </div>

                    // Language switch
                    <div class="flex items-center space-x-1 text-sm">
                        <span class="text-gray-500 mr-2">{move || ctx.t("nav.language")}</span>
                        {locales
                            .into_iter()
                            .map(|locale| view! { <LocaleButton locale=locale /> })
                            .collect_view()}
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Button navigating to one page
#[component]
fn NavLink(page: Page) -> impl IntoView {
    let ctx = use_app_context();
    let is_active = move || ctx.current_page() == page;

    view! {
        <button
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            class:bg-gray-700=is_active
            class:text-white=is_active
            on:click=move |_| ctx.navigate(page.path())
        >
            {move || ctx.t(page.label_key())}
        </button>
    }
}

#[component]
fn LocaleButton(locale: String) -> impl IntoView {
    let ctx = use_app_context();
    let label = locale.clone();
    let code = locale.clone();
    let is_current = create_memo(move |_| ctx.locale() == code);

    view! {
        <button
            class="px-2 py-1 rounded uppercase text-gray-400 hover:text-white"
            class:text-white=move || is_current.get()
            class:font-bold=move || is_current.get()
            on:click=move |_| ctx.set_locale(&locale)
        >
            {label}
        </button>
    }
}
