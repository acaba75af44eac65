/// Quick-access cache population against a scripted month source
use rust_ticket_scraper::browser::BrowserError;
use rust_ticket_scraper::cache::{ListingSource, QuickAccessCache};
use rust_ticket_scraper::models::ShowListingEntry;
use std::cell::RefCell;
use std::collections::HashMap;

struct ScriptedMonths {
    months: HashMap<String, Vec<ShowListingEntry>>,
    requested: RefCell<Vec<(String, Option<String>)>>,
}

impl ScriptedMonths {
    fn new(months: &[(&str, Vec<ShowListingEntry>)]) -> Self {
        Self {
            months: months
                .iter()
                .map(|(m, entries)| (m.to_string(), entries.clone()))
                .collect(),
            requested: RefCell::new(vec![]),
        }
    }
}

impl ListingSource for ScriptedMonths {
    fn month_listing(
        &self,
        month: &str,
        filter: Option<&str>,
    ) -> Result<Vec<ShowListingEntry>, BrowserError> {
        self.requested
            .borrow_mut()
            .push((month.to_string(), filter.map(str::to_string)));

        let entries = self
            .months
            .get(month)
            .ok_or_else(|| BrowserError::NavigationTimeout(format!("month {}", month)))?;

        Ok(entries
            .iter()
            .filter(|e| filter.map_or(true, |f| e.text.contains(f)))
            .cloned()
            .collect())
    }
}

fn show(day: u32, title: &str, code: &str) -> ShowListingEntry {
    ShowListingEntry::new(format!("Пт, {:02}.09 19:00 {}", day, title), code)
}

fn months(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

#[test]
fn test_populate_appends_months_in_order() {
    let source = ScriptedMonths::new(&[
        (
            "09.2025",
            vec![show(12, "«ЧАЙКА»", "1"), show(13, "«ДЯДЯ ВАНЯ»", "2"), show(20, "«ЧАЙКА»", "3")],
        ),
        ("10.2025", vec![show(4, "«ЧАЙКА»", "4")]),
    ]);

    let mut cache = QuickAccessCache::new();
    let added = cache
        .populate(&source, &months(&["09.2025", "10.2025"]), "ЧАЙКА")
        .unwrap();

    assert_eq!(added, 3);
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.list_dates(), vec!["12.09 19:00", "20.09 19:00", "04.09 19:00"]);
    assert_eq!(cache.lookup("20.09 19:00"), Some("3"));

    let requested = source.requested.borrow();
    assert_eq!(requested[0], ("09.2025".to_string(), Some("ЧАЙКА".to_string())));
    assert_eq!(requested[1].0, "10.2025");
}

#[test]
fn test_populate_with_empty_second_month() {
    let source = ScriptedMonths::new(&[
        (
            "12.2025",
            vec![show(5, "«ЧАЙКА»", "11"), show(6, "«ЧАЙКА»", "12"), show(7, "«ЧАЙКА»", "13")],
        ),
        ("01.2026", vec![show(9, "«ТРИ СЕСТРЫ»", "14")]),
    ]);

    let mut cache = QuickAccessCache::new();
    let added = cache
        .populate(&source, &months(&["12.2025", "01.2026"]), "ЧАЙКА")
        .unwrap();

    assert_eq!(added, 3);
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.list_dates().len(), 3);
}

#[test]
fn test_repeated_populate_keeps_duplicates() {
    let source = ScriptedMonths::new(&[("09.2025", vec![show(12, "«ЧАЙКА»", "1")])]);
    let mut cache = QuickAccessCache::new();

    cache.populate(&source, &months(&["09.2025"]), "ЧАЙКА").unwrap();
    cache.populate(&source, &months(&["09.2025"]), "ЧАЙКА").unwrap();

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.list_dates(), vec!["12.09 19:00", "12.09 19:00"]);
}

#[test]
fn test_same_date_different_codes_returns_first() {
    let source = ScriptedMonths::new(&[
        ("09.2025", vec![show(12, "«ЧАЙКА»", "first")]),
        ("10.2025", vec![show(12, "«ЧАЙКА»", "second")]),
    ]);
    let mut cache = QuickAccessCache::new();
    cache
        .populate(&source, &months(&["09.2025", "10.2025"]), "ЧАЙКА")
        .unwrap();

    assert_eq!(cache.lookup("12.09 19:00"), Some("first"));
}

#[test]
fn test_failed_month_leaves_cache_untouched() {
    let source = ScriptedMonths::new(&[("09.2025", vec![show(12, "«ЧАЙКА»", "1")])]);
    let mut cache = QuickAccessCache::new();

    let err = cache
        .populate(&source, &months(&["09.2025", "10.2025"]), "ЧАЙКА")
        .unwrap_err();

    assert!(err.is_timeout());
    assert!(cache.is_empty());
}
