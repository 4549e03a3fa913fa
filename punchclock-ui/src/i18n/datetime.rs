//! Date/time presets
//!
//! Named presets (`Short`, `Long`) are typed records of which fields to show
//! and how. A preset is rendered through the conventions of a locale (field
//! order, hour cycle, month names) into a chrono format pattern.
//!
//! ```text
//! preset            en                            sl
//! Short   Jan 05, 2024, 09:03:07 AM    05. jan 2024 09:03:07
//! Long    January 05, 2024, 09:03:07 AM  05. januar 2024 09:03:07
//! ```

use chrono::{DateTime, TimeZone};
use std::fmt;

/// Named date/time preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTimePreset {
    Short,
    Long,
}

impl DateTimePreset {
    pub fn name(self) -> &'static str {
        match self {
            DateTimePreset::Short => "short",
            DateTimePreset::Long => "long",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "short" => Some(DateTimePreset::Short),
            "long" => Some(DateTimePreset::Long),
            _ => None,
        }
    }
}

/// Representation of a numeric field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericStyle {
    /// No padding (`5`)
    Numeric,
    /// Zero-padded to two digits (`05`)
    TwoDigit,
}

/// Representation of the month field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStyle {
    Numeric,
    TwoDigit,
    /// Abbreviated name (`Jan`)
    Short,
    /// Full name (`January`)
    Long,
}

impl MonthStyle {
    fn is_textual(self) -> bool {
        matches!(self, MonthStyle::Short | MonthStyle::Long)
    }
}

/// Which fields a preset renders. `None` omits the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTimeFormat {
    pub year: Option<NumericStyle>,
    pub month: Option<MonthStyle>,
    pub day: Option<NumericStyle>,
    pub hour: Option<NumericStyle>,
    pub minute: Option<NumericStyle>,
    pub second: Option<NumericStyle>,
}

impl DateTimeFormat {
    pub const fn new() -> Self {
        Self {
            year: None,
            month: None,
            day: None,
            hour: None,
            minute: None,
            second: None,
        }
    }

    pub const fn year(mut self, style: NumericStyle) -> Self {
        self.year = Some(style);
        self
    }

    pub const fn month(mut self, style: MonthStyle) -> Self {
        self.month = Some(style);
        self
    }

    pub const fn day(mut self, style: NumericStyle) -> Self {
        self.day = Some(style);
        self
    }

    pub const fn hour(mut self, style: NumericStyle) -> Self {
        self.hour = Some(style);
        self
    }

    pub const fn minute(mut self, style: NumericStyle) -> Self {
        self.minute = Some(style);
        self
    }

    pub const fn second(mut self, style: NumericStyle) -> Self {
        self.second = Some(style);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::new()
    }
}

/// The presets of one locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeFormats {
    pub short: DateTimeFormat,
    pub long: DateTimeFormat,
}

impl DateTimeFormats {
    pub fn get(&self, preset: DateTimePreset) -> &DateTimeFormat {
        match preset {
            DateTimePreset::Short => &self.short,
            DateTimePreset::Long => &self.long,
        }
    }
}

/// Order of the date fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrder {
    MonthDayYear,
    DayMonthYear,
    YearMonthDay,
}

/// 12-hour clock with a day period, or 24-hour clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourCycle {
    H12,
    H23,
}

/// How a locale lays out dates and times
#[derive(Debug, Clone, Copy)]
pub struct LocaleConventions {
    /// Source of month and day-period names
    pub names: chrono::Locale,
    pub order: FieldOrder,
    pub hour_cycle: HourCycle,
}

impl LocaleConventions {
    /// Conventions for a locale code, matched on the language subtag
    pub fn for_code(code: &str) -> Self {
        let language = code
            .split(['-', '_'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();

        match language.as_str() {
            "en" => Self {
                names: chrono::Locale::en_US,
                order: FieldOrder::MonthDayYear,
                hour_cycle: HourCycle::H12,
            },
            "sl" => Self {
                names: chrono::Locale::sl_SI,
                order: FieldOrder::DayMonthYear,
                hour_cycle: HourCycle::H23,
            },
            "de" => Self {
                names: chrono::Locale::de_DE,
                order: FieldOrder::DayMonthYear,
                hour_cycle: HourCycle::H23,
            },
            _ => Self {
                names: chrono::Locale::POSIX,
                order: FieldOrder::YearMonthDay,
                hour_cycle: HourCycle::H23,
            },
        }
    }

    /// chrono strftime pattern for `format` under these conventions
    pub fn pattern(&self, format: &DateTimeFormat) -> String {
        let date = self.date_pattern(format);
        let time = self.time_pattern(format);

        match (date.is_empty(), time.is_empty()) {
            (false, false) => {
                let separator = match self.order {
                    FieldOrder::MonthDayYear => ", ",
                    _ => " ",
                };
                format!("{}{}{}", date, separator, time)
            }
            (false, true) => date,
            _ => time,
        }
    }

    /// Render `value` with `format`
    pub fn render<Tz: TimeZone>(&self, value: &DateTime<Tz>, format: &DateTimeFormat) -> String
    where
        Tz::Offset: fmt::Display,
    {
        let pattern = self.pattern(format);
        value.format_localized(&pattern, self.names).to_string()
    }

    fn date_pattern(&self, format: &DateTimeFormat) -> String {
        let year = format.year.map(|style| match style {
            NumericStyle::Numeric => "%Y",
            NumericStyle::TwoDigit => "%y",
        });
        let month = format.month.map(|style| match style {
            MonthStyle::Numeric => "%-m",
            MonthStyle::TwoDigit => "%m",
            MonthStyle::Short => "%b",
            MonthStyle::Long => "%B",
        });
        let day = format.day.map(|style| match style {
            NumericStyle::Numeric => "%-d",
            NumericStyle::TwoDigit => "%d",
        });
        let textual = format.month.map(MonthStyle::is_textual).unwrap_or(false);

        match (self.order, textual) {
            (FieldOrder::MonthDayYear, true) => {
                let month_day = join(&[month, day], " ");
                let month_day = (!month_day.is_empty()).then_some(month_day.as_str());
                join(&[month_day, year], ", ")
            }
            (FieldOrder::MonthDayYear, false) => join(&[month, day, year], "/"),
            (FieldOrder::DayMonthYear, true) => {
                let day = day.map(|d| format!("{}.", d));
                join(&[day.as_deref(), month, year], " ")
            }
            (FieldOrder::DayMonthYear, false) => join(&[day, month, year], ". "),
            (FieldOrder::YearMonthDay, true) => join(&[year, month, day], " "),
            (FieldOrder::YearMonthDay, false) => join(&[year, month, day], "-"),
        }
    }

    fn time_pattern(&self, format: &DateTimeFormat) -> String {
        let hour = format.hour.map(|style| match (self.hour_cycle, style) {
            (HourCycle::H12, NumericStyle::Numeric) => "%-I",
            (HourCycle::H12, NumericStyle::TwoDigit) => "%I",
            (HourCycle::H23, NumericStyle::Numeric) => "%-H",
            (HourCycle::H23, NumericStyle::TwoDigit) => "%H",
        });
        let minute = format.minute.map(|_| "%M");
        let second = format.second.map(|_| "%S");

        let clock = join(&[hour, minute, second], ":");
        if hour.is_some() && self.hour_cycle == HourCycle::H12 {
            format!("{} %p", clock)
        } else {
            clock
        }
    }
}

fn join(parts: &[Option<&str>], separator: &str) -> String {
    parts
        .iter()
        .flatten()
        .copied()
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn full(month: MonthStyle) -> DateTimeFormat {
        DateTimeFormat::new()
            .year(NumericStyle::Numeric)
            .month(month)
            .day(NumericStyle::TwoDigit)
            .hour(NumericStyle::TwoDigit)
            .minute(NumericStyle::TwoDigit)
            .second(NumericStyle::TwoDigit)
    }

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 5, 9, 3, 7).unwrap()
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(DateTimePreset::parse("Short"), Some(DateTimePreset::Short));
        assert_eq!(DateTimePreset::parse("long"), Some(DateTimePreset::Long));
        assert_eq!(DateTimePreset::parse("medium"), None);
        assert_eq!(DateTimePreset::Long.name(), "long");
    }

    #[test]
    fn test_english_patterns() {
        let en = LocaleConventions::for_code("en");
        assert_eq!(en.pattern(&full(MonthStyle::Short)), "%b %d, %Y, %I:%M:%S %p");
        assert_eq!(en.pattern(&full(MonthStyle::Numeric)), "%-m/%d/%Y, %I:%M:%S %p");
    }

    #[test]
    fn test_slovenian_patterns() {
        let sl = LocaleConventions::for_code("sl-SI");
        assert_eq!(sl.pattern(&full(MonthStyle::Long)), "%d. %B %Y %H:%M:%S");
        assert_eq!(sl.pattern(&full(MonthStyle::TwoDigit)), "%d. %m. %Y %H:%M:%S");
    }

    #[test]
    fn test_partial_formats() {
        let en = LocaleConventions::for_code("en");
        let date_only = DateTimeFormat::new()
            .month(MonthStyle::Long)
            .year(NumericStyle::Numeric);
        assert_eq!(en.pattern(&date_only), "%B, %Y");

        let time_only = DateTimeFormat::new()
            .hour(NumericStyle::Numeric)
            .minute(NumericStyle::TwoDigit);
        assert_eq!(en.pattern(&time_only), "%-I:%M %p");

        let iso = LocaleConventions::for_code("xx");
        assert_eq!(iso.pattern(&full(MonthStyle::TwoDigit)), "%Y-%m-%d %H:%M:%S");
        assert!(DateTimeFormat::new().is_empty());
    }

    #[test]
    fn test_render_english() {
        let en = LocaleConventions::for_code("en");
        assert_eq!(
            en.render(&sample(), &full(MonthStyle::Short)),
            "Jan 05, 2024, 09:03:07 AM"
        );
        assert_eq!(
            en.render(&sample(), &full(MonthStyle::Long)),
            "January 05, 2024, 09:03:07 AM"
        );
    }

    #[test]
    fn test_render_slovenian_month_names() {
        let sl = LocaleConventions::for_code("sl");
        let long = sl.render(&sample(), &full(MonthStyle::Long));
        assert!(long.starts_with("05. januar 2024"), "{}", long);
        assert!(long.ends_with("09:03:07"), "{}", long);
    }
}
