//! Application bootstrap
//!
//! Builds the localization context and the router from embedded data, then
//! mounts the root component onto `#app`. Runs once at startup.

use leptos::*;
use wasm_bindgen::JsCast;

use crate::app::App;
use crate::i18n::{DateTimeFormat, DateTimeFormats, I18n, I18nError, MonthStyle, NumericStyle};
use crate::pages::Page;
use crate::router::{Router, RouterError};

/// CSS selector of the mount target
pub const MOUNT_SELECTOR: &str = "#app";

pub const DEFAULT_LOCALE: &str = "sl";
pub const FALLBACK_LOCALE: &str = "en";

const SL_MESSAGES: &str = include_str!("../locales/sl.json");
const EN_MESSAGES: &str = include_str!("../locales/en.json");

/// Startup failures
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    I18n(#[from] I18nError),

    #[error(transparent)]
    Router(#[from] RouterError),

    #[error("mount target '{0}' not found")]
    MountTargetMissing(&'static str),

    #[error("no document available")]
    NoDocument,

    #[error("failed to install console logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Route `log` records to the browser console. Debug builds log at debug level.
pub fn init_logging() -> Result<(), BootstrapError> {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    console_log::init_with_level(level)?;
    Ok(())
}

/// `Short` shows the abbreviated month, `Long` the full month name.
pub fn datetime_formats() -> DateTimeFormats {
    let base = DateTimeFormat::new()
        .year(NumericStyle::Numeric)
        .day(NumericStyle::TwoDigit)
        .hour(NumericStyle::TwoDigit)
        .minute(NumericStyle::TwoDigit)
        .second(NumericStyle::TwoDigit);

    DateTimeFormats {
        short: base.month(MonthStyle::Short),
        long: base.month(MonthStyle::Long),
    }
}

pub fn build_i18n() -> Result<I18n, BootstrapError> {
    let i18n = I18n::builder(DEFAULT_LOCALE, FALLBACK_LOCALE)
        .messages_json("sl", SL_MESSAGES)?
        .messages_json("en", EN_MESSAGES)?
        .datetime_formats("sl", datetime_formats())
        .datetime_formats("en", datetime_formats())
        .build();
    Ok(i18n)
}

/// `/` (home), `/overview` and `/admin`
pub fn routes() -> [(&'static str, Page); 3] {
    Page::ALL.map(|page| (page.path(), page))
}

pub fn build_router() -> Result<Router<Page>, BootstrapError> {
    Ok(Router::from_routes(routes())?)
}

/// Mount the application onto [`MOUNT_SELECTOR`]
pub fn mount(i18n: I18n, router: Router<Page>) -> Result<(), BootstrapError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(BootstrapError::NoDocument)?;

    let target = document
        .query_selector(MOUNT_SELECTOR)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
        .ok_or(BootstrapError::MountTargetMissing(MOUNT_SELECTOR))?;

    mount_to(target, move || view! { <App i18n=i18n router=router /> });
    Ok(())
}

/// Build every subsystem and mount
pub fn run() -> Result<(), BootstrapError> {
    let i18n = build_i18n()?;
    let router = build_router()?;

    log::info!(
        "Starting punchclock terminal (locale '{}', fallback '{}', {} routes)",
        i18n.locale(),
        i18n.fallback_locale(),
        router.table().len()
    );

    mount(i18n, router)
}
