//! Internationalization
//!
//! Locale message tables, named date/time presets and the [`I18n`] context
//! that resolves both with a fallback locale.

pub mod context;
pub mod datetime;
pub mod messages;

pub use context::{I18n, I18nBuilder, I18nError};
pub use datetime::{
    DateTimeFormat, DateTimeFormats, DateTimePreset, FieldOrder, HourCycle, LocaleConventions,
    MonthStyle, NumericStyle,
};
pub use messages::MessageTable;
