//! Display formatting policy: currency strings and relative date labels.
//! Formatting never changes stored amounts; it is applied at render time
//! from the active [`CurrencyConfig`].

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// The active display currency. Changing it only affects rendering, never
/// the stored amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrencyConfig {
    pub code: String,
    pub symbol: String,
    pub locale: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            code: "RUB".into(),
            symbol: "₽".into(),
            locale: "ru-RU".into(),
        }
    }
}

/// Currency codes without reliable locale-aware formatting. These are always
/// rendered as "grouped number + symbol". An explicit list, not a heuristic.
const MANUAL_SYMBOL_CODES: &[&str] = &["UZS"];

/// Renders an amount rounded to whole units, grouped and signed per the
/// locale, with the currency symbol placed by locale convention.
pub fn format_currency(amount: f64, config: &CurrencyConfig) -> String {
    let rounded = amount.round() as i64;
    let grouped = group_digits(rounded.unsigned_abs(), grouping_separator(&config.locale));
    if MANUAL_SYMBOL_CODES.contains(&config.code.as_str()) || symbol_trails(&config.locale) {
        let body = if rounded < 0 {
            format!("-{}", grouped)
        } else {
            grouped
        };
        format!("{} {}", body, config.symbol)
    } else if rounded < 0 {
        format!("-{}{}", config.symbol, grouped)
    } else {
        format!("{}{}", config.symbol, grouped)
    }
}

/// Relative label for the two most recent days, absolute "day month year"
/// otherwise. Labels follow the configured locale (Russian or English).
pub fn format_date_label(date: NaiveDate, today: NaiveDate, config: &CurrencyConfig) -> String {
    let russian = russian_locale(&config.locale);
    if date == today {
        return if russian { "Сегодня" } else { "Today" }.to_string();
    }
    if today.signed_duration_since(date).num_days() == 1 {
        return if russian { "Вчера" } else { "Yesterday" }.to_string();
    }
    format!(
        "{} {} {}",
        date.day(),
        month_label(date.month(), russian),
        date.year()
    )
}

fn russian_locale(locale: &str) -> bool {
    locale.starts_with("ru")
}

fn grouping_separator(locale: &str) -> char {
    // Space-grouping locales of the supported currencies; the rest group
    // with commas.
    if locale.starts_with("ru") || locale.starts_with("uz") {
        ' '
    } else {
        ','
    }
}

fn symbol_trails(locale: &str) -> bool {
    locale.starts_with("ru") || locale.starts_with("uz")
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}

fn month_label(month: u32, russian: bool) -> &'static str {
    if russian {
        match month {
            1 => "января",
            2 => "февраля",
            3 => "марта",
            4 => "апреля",
            5 => "мая",
            6 => "июня",
            7 => "июля",
            8 => "августа",
            9 => "сентября",
            10 => "октября",
            11 => "ноября",
            12 => "декабря",
            _ => "",
        }
    } else {
        match month {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            12 => "December",
            _ => "",
        }
    }
}
