//! App Root Component
//!
//! Root component and the application context shared by every page.

use chrono::{DateTime, Local, Utc};
use leptos::*;

use crate::api::ClientError;
use crate::components::Nav;
use crate::i18n::{DateTimePreset, I18n};
use crate::pages::Page;
use crate::router::Router;

/// Application context provided to all components
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Localization context for the current locale
    pub i18n: RwSignal<I18n>,
    /// Route table and navigation history
    pub router: RwSignal<Router<Page>>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
}

impl AppContext {
    pub fn new(i18n: I18n, router: Router<Page>) -> Self {
        Self {
            i18n: create_rw_signal(i18n),
            router: create_rw_signal(router),
            error: create_rw_signal(None),
        }
    }

    /// Translate in the current locale
    pub fn t(&self, key: &str) -> String {
        self.i18n.with(|i18n| i18n.translate(key))
    }

    /// Translate with `{name}` substitution
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.i18n.with(|i18n| i18n.translate_with(key, args))
    }

    /// Render a Unix millisecond timestamp in local time
    pub fn format_millis(&self, millis: i64, preset: DateTimePreset) -> String {
        match DateTime::<Utc>::from_timestamp_millis(millis) {
            Some(utc) => self.format_datetime(&utc.with_timezone(&Local), preset),
            None => millis.to_string(),
        }
    }

    pub fn format_datetime(&self, value: &DateTime<Local>, preset: DateTimePreset) -> String {
        self.i18n
            .with(|i18n| i18n.format_datetime(value, preset, None))
    }

    pub fn locale(&self) -> String {
        self.i18n.with(|i18n| i18n.locale().to_string())
    }

    /// Switch the current locale
    pub fn set_locale(&self, locale: &str) {
        self.i18n.update(|i18n| *i18n = i18n.with_locale(locale));
    }

    /// Page registered for the current location
    pub fn current_page(&self) -> Page {
        self.router.with(|router| {
            router
                .resolve(router.current_path())
                .copied()
                .unwrap_or_default()
        })
    }

    pub fn navigate(&self, path: &str) {
        self.router.update(|router| {
            if let Err(e) = router.navigate(path) {
                log::error!("Navigation failed: {}", e);
            }
        });
    }

    pub fn back(&self) {
        self.router.update(|router| {
            router.back();
        });
    }

    pub fn forward(&self) {
        self.router.update(|router| {
            router.forward();
        });
    }

    /// User-facing text for a failed API request
    pub fn error_text(&self, error: &ClientError) -> String {
        self.i18n.with(|i18n| describe_client_error(i18n, error))
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: String) {
        self.error.set(Some(message));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

fn describe_client_error(i18n: &I18n, error: &ClientError) -> String {
    if error.is_network() {
        i18n.translate("errors.network")
    } else {
        i18n.translate_with("errors.load_failed", &[("error", &error.to_string())])
    }
}

/// Provide the application context to the component tree
pub fn provide_app_context(i18n: I18n, router: Router<Page>) -> AppContext {
    let context = AppContext::new(i18n, router);
    provide_context(context);
    context
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

/// Root application component
#[component]
pub fn App(i18n: I18n, router: Router<Page>) -> impl IntoView {
    let ctx = provide_app_context(i18n, router);

    // Keep <html lang> in sync with the current locale
    create_effect(move |_| {
        let locale = ctx.locale();
        if let Some(root) = document().document_element() {
            if let Err(e) = root.set_attribute("lang", &locale) {
                log::error!("Failed to set document language: {:?}", e);
            }
        }
    });

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            <Nav />

            <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                {move || ctx.current_page().render()}
            </main>

            <Footer />
        </div>
    }
}

/// Footer with the error banner and the current location
#[component]
fn Footer() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                <span class="text-gray-400">{move || ctx.t("app.subtitle")}</span>

                {move || {
                    ctx.error.get().map(|message| {
                        view! { <span class="text-red-400">{message}</span> }
                    })
                }}

                <span class="text-gray-500 font-mono">
                    {move || ctx.router.with(|router| router.current_path().to_string())}
                </span>
            </div>
        </footer>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::build_i18n;

    #[test]
    fn test_network_errors_use_their_own_message() {
        let i18n = build_i18n().unwrap().with_locale("en");
        let text = describe_client_error(&i18n, &ClientError::Network("refused".to_string()));
        assert_eq!(text, "The server is not reachable");
    }

    #[test]
    fn test_other_errors_include_details() {
        let i18n = build_i18n().unwrap().with_locale("en");
        let text = describe_client_error(&i18n, &ClientError::Status(500));
        assert_eq!(text, "Could not load data: HTTP 500");
    }
}
