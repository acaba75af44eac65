//! Helper functions for the console front end
//!
//! - Month keys in the back office's `mm.yyyy` format
//! - Loose validation of user input
//! - MarkdownV2 escaping for chat renderers
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_ticket_scraper::helpers::{is_month_key, quick_access_months};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 12, 3).unwrap();
//! assert_eq!(quick_access_months(today), vec!["12.2025", "01.2026"]);
//! assert!(is_month_key("09.2025"));
//! ```

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static MONTH_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}\.\d{4}$").expect("month regex"));

/// `mm.yyyy`
pub fn month_key(month: u32, year: i32) -> String {
    format!("{:02}.{}", month, year)
}

pub fn current_month_key() -> String {
    month_key_of(Local::now().date_naive())
}

fn month_key_of(date: NaiveDate) -> String {
    month_key(date.month(), date.year())
}

/// This month and the next one; December rolls over into January
pub fn quick_access_months(today: NaiveDate) -> Vec<String> {
    let next = if today.month() == 12 {
        month_key(1, today.year() + 1)
    } else {
        month_key(today.month() + 1, today.year())
    };
    vec![month_key_of(today), next]
}

pub fn is_month_key(s: &str) -> bool {
    MONTH_KEY.is_match(s)
}

/// Show codes are plain non-empty digit strings
pub fn is_show_code(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

const MARKDOWN_RESERVED: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!', ',',
    ':',
];

/// Escape characters MarkdownV2 treats as markup
pub fn md_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_RESERVED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_key_is_zero_padded() {
        assert_eq!(month_key(9, 2025), "09.2025");
        assert_eq!(month_key(11, 2025), "11.2025");
    }

    #[test]
    fn test_quick_access_months_mid_year() {
        let today = NaiveDate::from_ymd_opt(2025, 9, 30).unwrap();
        assert_eq!(quick_access_months(today), vec!["09.2025", "10.2025"]);
    }

    #[test]
    fn test_is_month_key() {
        assert!(is_month_key("09.2025"));
        assert!(!is_month_key("9.2025"));
        assert!(!is_month_key("09.25"));
        assert!(!is_month_key("09.2025 "));
    }

    #[test]
    fn test_is_show_code() {
        assert!(is_show_code("845512"));
        assert!(!is_show_code(""));
        assert!(!is_show_code("84a5"));
        assert!(!is_show_code("١٢٣"));
    }

    #[test]
    fn test_md_escape() {
        assert_eq!(md_escape("12.09 19:00"), r"12\.09 19\:00");
        assert_eq!(md_escape("Код: `42`"), r"Код\: \`42\`");
        assert_eq!(md_escape("Чайка"), "Чайка");
    }
}
