//! Loading Component

use leptos::*;

/// Full-width loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    let ctx = crate::app::use_app_context();

    view! {
        <div class="flex items-center justify-center py-12 space-x-3 text-gray-400">
            <div class="loading-spinner w-8 h-8" />
            <span>{move || ctx.t("common.loading")}</span>
        </div>
    }
}
