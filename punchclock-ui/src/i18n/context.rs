//! Localization context
//!
//! An [`I18n`] is an immutable view of a shared catalog (message tables,
//! date/time presets and locale conventions) under one current locale.
//! Switching locale produces a new context over the same catalog.

use chrono::{DateTime, TimeZone};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::datetime::{DateTimeFormats, DateTimePreset, LocaleConventions};
use super::messages::MessageTable;

/// Errors raised while assembling a localization context
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    #[error("invalid messages for locale '{locale}': {source}")]
    InvalidMessages {
        locale: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default)]
struct Catalog {
    fallback: String,
    messages: HashMap<String, MessageTable>,
    datetime_formats: HashMap<String, DateTimeFormats>,
    conventions: HashMap<String, LocaleConventions>,
}

impl Catalog {
    fn conventions(&self, locale: &str) -> LocaleConventions {
        self.conventions
            .get(locale)
            .copied()
            .unwrap_or_else(|| LocaleConventions::for_code(locale))
    }
}

/// Locale-aware text and date/time formatting
#[derive(Debug, Clone)]
pub struct I18n {
    catalog: Arc<Catalog>,
    locale: String,
}

impl I18n {
    pub fn builder(locale: impl Into<String>, fallback: impl Into<String>) -> I18nBuilder {
        I18nBuilder::new(locale, fallback)
    }

    /// Current locale
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn fallback_locale(&self) -> &str {
        &self.catalog.fallback
    }

    /// Locales with a message table, sorted
    pub fn available_locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.catalog.messages.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    /// Same catalog, different current locale
    pub fn with_locale(&self, locale: impl Into<String>) -> Self {
        let locale = locale.into();
        if !self.catalog.messages.contains_key(&locale) {
            log::debug!("Switching to locale '{}' without messages", locale);
        }
        Self {
            catalog: Arc::clone(&self.catalog),
            locale,
        }
    }

    /// Resolve `key` in `locale`, then in the fallback locale
    pub fn lookup(&self, key: &str, locale: &str) -> Option<&str> {
        let catalog = &self.catalog;
        catalog
            .messages
            .get(locale)
            .and_then(|table| table.get(key))
            .or_else(|| {
                catalog
                    .messages
                    .get(&catalog.fallback)
                    .and_then(|table| table.get(key))
            })
    }

    /// Whether `key` resolves in the current locale or the fallback
    pub fn has(&self, key: &str) -> bool {
        self.lookup(key, &self.locale).is_some()
    }

    /// Translate `key` in the current locale
    pub fn translate(&self, key: &str) -> String {
        self.translate_in(key, &self.locale)
    }

    /// Translate `key` in `locale`.
    ///
    /// Falls back to the fallback locale; when neither has the key the key
    /// itself is returned and a warning is logged.
    pub fn translate_in(&self, key: &str, locale: &str) -> String {
        match self.lookup(key, locale) {
            Some(text) => text.to_string(),
            None => {
                log::warn!("Missing translation for '{}' in locale '{}'", key, locale);
                key.to_string()
            }
        }
    }

    /// Translate `key` and substitute `{name}` placeholders from `args`
    pub fn translate_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        interpolate(&self.translate(key), args)
    }

    /// Render `value` with a named preset.
    ///
    /// Uses the presets of `locale` (the current locale when `None`), then
    /// those of the fallback locale. Without any preset the value is
    /// rendered as RFC 3339.
    pub fn format_datetime<Tz: TimeZone>(
        &self,
        value: &DateTime<Tz>,
        preset: DateTimePreset,
        locale: Option<&str>,
    ) -> String
    where
        Tz::Offset: fmt::Display,
    {
        let locale = locale.unwrap_or(&self.locale);
        let catalog = &self.catalog;

        let resolved = catalog
            .datetime_formats
            .get(locale)
            .map(|formats| (locale, formats))
            .or_else(|| {
                catalog
                    .datetime_formats
                    .get(&catalog.fallback)
                    .map(|formats| (catalog.fallback.as_str(), formats))
            });

        match resolved {
            Some((source, formats)) => catalog
                .conventions(source)
                .render(value, formats.get(preset)),
            None => {
                log::warn!(
                    "Missing date/time preset '{}' for locale '{}'",
                    preset.name(),
                    locale
                );
                value.to_rfc3339()
            }
        }
    }
}

/// Single pass `{name}` substitution. Unknown names are kept verbatim.
fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        let name = &after[..close];
        match args.iter().find(|(arg, _)| *arg == name) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

/// Builder for [`I18n`]
#[derive(Debug)]
pub struct I18nBuilder {
    locale: String,
    catalog: Catalog,
}

impl I18nBuilder {
    pub fn new(locale: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            catalog: Catalog {
                fallback: fallback.into(),
                ..Catalog::default()
            },
        }
    }

    /// Set the message table of `locale`, replacing any previous one
    pub fn messages(mut self, locale: impl Into<String>, table: MessageTable) -> Self {
        self.catalog.messages.insert(locale.into(), table);
        self
    }

    /// Parse a JSON locale file as the message table of `locale`
    pub fn messages_json(self, locale: &str, json: &str) -> Result<Self, I18nError> {
        let table = MessageTable::from_json(json).map_err(|source| I18nError::InvalidMessages {
            locale: locale.to_string(),
            source,
        })?;
        Ok(self.messages(locale, table))
    }

    pub fn datetime_formats(mut self, locale: impl Into<String>, formats: DateTimeFormats) -> Self {
        self.catalog.datetime_formats.insert(locale.into(), formats);
        self
    }

    /// Override the conventions derived from the locale code
    pub fn conventions(mut self, locale: impl Into<String>, conventions: LocaleConventions) -> Self {
        self.catalog.conventions.insert(locale.into(), conventions);
        self
    }

    pub fn build(self) -> I18n {
        for locale in [&self.locale, &self.catalog.fallback] {
            if !self.catalog.messages.contains_key(locale) {
                log::warn!("No messages for configured locale '{}'", locale);
            }
        }

        I18n {
            catalog: Arc::new(self.catalog),
            locale: self.locale,
        }
    }
}
