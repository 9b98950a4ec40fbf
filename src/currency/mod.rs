use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("BRL")
    }
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub date_format: DateFormatStyle,
}

impl LocaleConfig {
    /// Separators and date style for a BCP 47 tag; unknown tags fall back
    /// to `en-US` conventions while keeping the requested tag.
    pub fn for_tag(tag: &str) -> Self {
        let (decimal_separator, grouping_separator, date_format) = match tag {
            "pt-BR" | "pt-PT" | "es-ES" | "de-DE" | "it-IT" => {
                (',', '.', DateFormatStyle::DayMonthYear)
            }
            "fr-FR" => (',', ' ', DateFormatStyle::DayMonthYear),
            "en-GB" => ('.', ',', DateFormatStyle::DayMonthYear),
            "en-US" => ('.', ',', DateFormatStyle::Medium),
            _ => ('.', ',', DateFormatStyle::Short),
        };
        Self {
            language_tag: tag.to_string(),
            decimal_separator,
            grouping_separator,
            date_format,
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::for_tag("pt-BR")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DateFormatStyle {
    Short,
    Medium,
    DayMonthYear,
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "BRL" => "R$".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "AUD" => "A$".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value);
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body.as_str(), None),
    };
    let grouped = match int_part.strip_prefix('-') {
        Some(digits) => format!("-{}", group_digits(digits, locale.grouping_separator)),
        None => group_digits(int_part, locale.grouping_separator),
    };
    match frac_part {
        Some(frac) => format!("{}{}{}", grouped, locale.decimal_separator, frac),
        None => grouped,
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped.chars().rev().collect()
}

/// Formats a money amount, e.g. `R$ 1.275,00` for BRL under `pt-BR`.
pub fn format_currency_value(amount: f64, code: &CurrencyCode, locale: &LocaleConfig) -> String {
    let precision = minor_units_for(code.as_str());
    let body = format_number(locale, amount.abs(), precision);
    let symbol = symbol_for(code.as_str());
    let sign = if amount < 0.0 { "-" } else { "" };
    if symbol.chars().count() > 1 {
        format!("{sign}{symbol} {body}")
    } else {
        format!("{sign}{symbol}{body}")
    }
}

pub fn format_date(locale: &LocaleConfig, date: NaiveDate) -> String {
    match locale.date_format {
        DateFormatStyle::Short => date.format("%Y-%m-%d").to_string(),
        DateFormatStyle::Medium => format!(
            "{:02} {} {}",
            date.day(),
            month_label(date.month()),
            date.year()
        ),
        DateFormatStyle::DayMonthYear => date.format("%d/%m/%Y").to_string(),
    }
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_brl_with_brazilian_separators() {
        let locale = LocaleConfig::for_tag("pt-BR");
        let brl = CurrencyCode::new("brl");
        assert_eq!(format_currency_value(1275.0, &brl, &locale), "R$ 1.275,00");
        assert_eq!(format_currency_value(37.5, &brl, &locale), "R$ 37,50");
        assert_eq!(format_currency_value(-2.0, &brl, &locale), "-R$ 2,00");
    }

    #[test]
    fn formats_usd_and_yen() {
        let locale = LocaleConfig::for_tag("en-US");
        assert_eq!(
            format_currency_value(1234567.891, &CurrencyCode::new("USD"), &locale),
            "$1,234,567.89"
        );
        assert_eq!(
            format_currency_value(980.0, &CurrencyCode::new("JPY"), &locale),
            "¥980"
        );
    }

    #[test]
    fn formats_dates_per_locale() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(format_date(&LocaleConfig::for_tag("pt-BR"), date), "07/03/2025");
        assert_eq!(format_date(&LocaleConfig::for_tag("en-US"), date), "07 Mar 2025");
        assert_eq!(format_date(&LocaleConfig::for_tag("xx"), date), "2025-03-07");
    }
}
