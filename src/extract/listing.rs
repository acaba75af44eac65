use crate::models::ShowListingEntry;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static MENU_LINKS_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".nav.navbar-nav.extend-menu a").expect("menu links selector")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Parse a month menu page into its show links, in document order.
///
/// Only links whose href starts with `show_url_prefix` are shows; the code
/// is the rest of the href. With a `filter`, entries whose text does not
/// contain it (case-sensitive) are dropped.
pub fn extract_month_listing(
    html: &str,
    show_url_prefix: &str,
    filter: Option<&str>,
) -> Vec<ShowListingEntry> {
    let document = Html::parse_document(html);
    let mut entries = Vec::new();

    for link in document.select(&MENU_LINKS_SELECTOR) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let Some(code) = href.strip_prefix(show_url_prefix) else {
            continue;
        };

        let joined = link
            .text()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let text = WHITESPACE.replace_all(&joined, " ").into_owned();

        if let Some(needle) = filter {
            if !text.contains(needle) {
                continue;
            }
        }

        entries.push(ShowListingEntry::new(text, code));
    }

    log::debug!(
        "Month menu: {} show links kept (filter: {:?})",
        entries.len(),
        filter
    );
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "https://tickets.example/admin/events/info/";

    #[test]
    fn test_whitespace_is_collapsed() {
        let html = format!(
            r#"<ul class="nav navbar-nav extend-menu">
                <li><a href="{p}501"><span>Пт,  12.09</span>
                    <span>19:00</span>
                    «ЧАЙКА»&nbsp;(основная сцена)</a></li>
            </ul>"#,
            p = PREFIX
        );

        let entries = extract_month_listing(&html, PREFIX, None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "Пт, 12.09 19:00 «ЧАЙКА» (основная сцена)");
        assert_eq!(entries[0].code, "501");
    }

    #[test]
    fn test_link_without_href_is_skipped() {
        let html = format!(
            r#"<ul class="nav navbar-nav extend-menu"><li><a>Сентябрь</a></li><li><a href="{p}7">Сб, 13.09 18:00 «ЧАЙКА»</a></li></ul>"#,
            p = PREFIX
        );
        let entries = extract_month_listing(&html, PREFIX, None);
        assert_eq!(entries, vec![ShowListingEntry::new("Сб, 13.09 18:00 «ЧАЙКА»", "7")]);
    }
}
